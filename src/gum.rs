//! Adapter for the `gum` terminal UI toolkit.
//!
//! `gum` is optional. [`Chooser::probe`] runs `gum --version` once per run and
//! the flows fall back to the numbered menu in [`crate::selection`] when it
//! fails. Interactive commands inherit this process's stdin and stderr so the
//! UI stays on the terminal, while stdout is captured to read the answer.

use std::{
    collections::HashMap,
    io::Write,
    process::{Command, Stdio},
};

/// Synchronous interface to an external chooser/styler.
pub trait Chooser {
    /// Whether the chooser can be used at all.
    fn probe(&self) -> bool;

    /// Asks for a line of text; `None` when cancelled.
    fn input(&self, prompt: &str, placeholder: &str) -> Option<String>;

    /// Lets the user pick one of `labels`; returns its index.
    fn choose(&self, labels: &[String], header: &str) -> Option<usize>;

    /// Renders and prints `text`, returning what was printed.
    fn style(&self, text: &str, style: &Style) -> String;
}

/// Presentation options understood by `gum style`.
#[derive(Debug, Clone, Default)]
pub struct Style {
    pub bold: bool,
    pub faint: bool,
    pub italic: bool,
    pub underline: bool,
    pub strikethrough: bool,
    pub foreground: Option<String>,
    pub background: Option<String>,
    pub border: Option<String>,
    pub border_foreground: Option<String>,
    pub border_background: Option<String>,
    pub padding: Option<String>,
    pub margin: Option<String>,
    pub align: Option<String>,
    pub width: Option<u16>,
}

impl Style {
    pub fn fg(color: &str) -> Self {
        Self {
            foreground: Some(color.to_string()),
            ..Self::default()
        }
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub fn faint(mut self) -> Self {
        self.faint = true;
        self
    }

    pub fn italic(mut self) -> Self {
        self.italic = true;
        self
    }

    /// Rounded border in `color`.
    pub fn boxed(mut self, color: &str) -> Self {
        self.border = Some("rounded".to_string());
        self.border_foreground = Some(color.to_string());
        self
    }

    pub fn padding(mut self, padding: &str) -> Self {
        self.padding = Some(padding.to_string());
        self
    }

    pub fn margin(mut self, margin: &str) -> Self {
        self.margin = Some(margin.to_string());
        self
    }

    pub fn align(mut self, align: &str) -> Self {
        self.align = Some(align.to_string());
        self
    }

    /// Flags for `gum style`, without the text.
    pub fn args(&self) -> Vec<String> {
        let mut args = Vec::new();
        for (enabled, flag) in [
            (self.bold, "--bold"),
            (self.faint, "--faint"),
            (self.italic, "--italic"),
            (self.underline, "--underline"),
            (self.strikethrough, "--strikethrough"),
        ] {
            if enabled {
                args.push(flag.to_string());
            }
        }

        let mut push = |flag: &str, value: &Option<String>| {
            if let Some(value) = value {
                args.push(flag.to_string());
                args.push(value.clone());
            }
        };
        push("--foreground", &self.foreground);
        push("--background", &self.background);
        if self.border.is_some() {
            push("--border", &self.border);
            push("--border-foreground", &self.border_foreground);
            push("--border-background", &self.border_background);
        }
        push("--padding", &self.padding);
        push("--margin", &self.margin);
        push("--align", &self.align);

        if let Some(width) = self.width {
            args.push("--width".to_string());
            args.push(width.to_string());
        }
        args
    }
}

/// Arguments for `gum input`.
pub fn input_args(prompt: &str, placeholder: &str) -> Vec<String> {
    let mut args = vec!["input".to_string(), "--prompt".to_string(), prompt.to_string()];
    if !placeholder.is_empty() {
        args.push("--placeholder".to_string());
        args.push(placeholder.to_string());
    }
    for (flag, value) in [
        ("--prompt.foreground", "212"),
        ("--placeholder.foreground", "240"),
        ("--cursor.foreground", "212"),
    ] {
        args.push(flag.to_string());
        args.push(value.to_string());
    }
    args
}

/// Arguments for `gum choose`, with the labels appended last.
pub fn choose_args(labels: &[String], header: &str) -> Vec<String> {
    let mut args = vec!["choose".to_string()];
    if !header.is_empty() {
        args.push("--header".to_string());
        args.push(header.to_string());
    }
    for (flag, value) in [
        ("--header.foreground", "212"),
        ("--cursor.foreground", "212"),
        ("--selected.foreground", "48"),
        ("--item.foreground", "7"),
        ("--cursor", "▶ "),
        ("--selected-prefix", "✓ "),
        ("--unselected-prefix", "  "),
        ("--height", "15"),
    ] {
        args.push(flag.to_string());
        args.push(value.to_string());
    }
    args.extend(labels.iter().cloned());
    args
}

/// Makes labels pairwise distinct by suffixing repeats with ` [n]`.
///
/// `gum choose` answers with the chosen text, so distinct labels are what
/// lets the answer map back to exactly one position.
pub fn disambiguate(labels: &[String]) -> Vec<String> {
    let mut totals: HashMap<&str, usize> = HashMap::new();
    for label in labels {
        *totals.entry(label.as_str()).or_default() += 1;
    }

    let mut seen: HashMap<&str, usize> = HashMap::new();
    labels
        .iter()
        .map(|label| {
            if totals[label.as_str()] == 1 {
                return label.clone();
            }
            let n = seen.entry(label.as_str()).or_default();
            *n += 1;
            format!("{} [{}]", label, n)
        })
        .collect()
}

/// Index of the label `gum` printed, if it is one of `labels`.
pub fn match_choice(labels: &[String], output: &str) -> Option<usize> {
    let picked = output.trim_end_matches(['\r', '\n']).trim();
    if picked.is_empty() {
        return None;
    }
    labels.iter().position(|label| label.trim() == picked)
}

/// The `gum` binary on `PATH` (or at an explicit location).
#[derive(Debug, Clone)]
pub struct Gum {
    program: String,
}

impl Default for Gum {
    fn default() -> Self {
        Self::new("gum")
    }
}

impl Gum {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Runs an interactive command and returns its stdout on exit status 0.
    fn interactive(&self, args: &[String]) -> Option<String> {
        let output = Command::new(&self.program)
            .args(args)
            .stdin(Stdio::inherit())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .output();

        match output {
            Ok(out) if out.status.success() => Some(String::from_utf8_lossy(&out.stdout).into_owned()),
            Ok(out) => {
                log::debug!("{} {} exited with {}", self.program, args[0], out.status);
                None
            }
            Err(e) => {
                log::debug!("{} {} failed: {}", self.program, args[0], e);
                None
            }
        }
    }
}

impl Chooser for Gum {
    fn probe(&self) -> bool {
        Command::new(&self.program)
            .arg("--version")
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map(|status| status.success())
            .unwrap_or(false)
    }

    fn input(&self, prompt: &str, placeholder: &str) -> Option<String> {
        self.interactive(&input_args(prompt, placeholder))
            .map(|out| out.trim().to_string())
            .filter(|value| !value.is_empty())
    }

    fn choose(&self, labels: &[String], header: &str) -> Option<usize> {
        if labels.is_empty() {
            return None;
        }
        let shown = disambiguate(labels);
        let output = self.interactive(&choose_args(&shown, header))?;
        match_choice(&shown, &output)
    }

    fn style(&self, text: &str, style: &Style) -> String {
        let rendered = Command::new(&self.program)
            .arg("style")
            .args(style.args())
            .arg(text)
            .stdin(Stdio::null())
            .stderr(Stdio::null())
            .output()
            .ok()
            .filter(|out| out.status.success())
            .map(|out| String::from_utf8_lossy(&out.stdout).into_owned())
            .unwrap_or_else(|| format!("{}\n", text));

        let mut stdout = std::io::stdout().lock();
        let _ = stdout.write_all(rendered.as_bytes());
        let _ = stdout.flush();
        rendered
    }
}
