//! Clipboard sink.
//!
//! Text is handed to the platform's own copy utility on stdin, which keeps
//! the clipboard populated after this process exits. Each platform has an
//! ordered list of utilities; the first one that runs and exits with status
//! 0 wins. When none works the caller prints the text instead.

use std::{
    env,
    io::Write,
    process::{Command, Stdio},
};

/// Destination for resolved URLs.
pub trait Clipboard {
    /// Copies `text`, returning whether it reached the clipboard.
    fn copy(&self, text: &str) -> bool;
}

/// A copy utility and its arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopyCommand {
    pub program: String,
    pub args: Vec<String>,
}

impl CopyCommand {
    fn new(program: &str, args: &[&str]) -> Self {
        Self {
            program: program.to_string(),
            args: args.iter().map(|a| a.to_string()).collect(),
        }
    }

    fn run(&self, text: &str) -> std::io::Result<bool> {
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()?;

        // stdin is dropped before waiting so the utility sees end of input
        let written = match child.stdin.take() {
            Some(mut stdin) => stdin.write_all(text.as_bytes()),
            None => Ok(()),
        };
        let status = child.wait()?;
        written?;
        Ok(status.success())
    }
}

/// The OS clipboard reached through the platform copy utilities.
#[derive(Debug, Clone)]
pub struct SystemClipboard {
    commands: Vec<CopyCommand>,
}

impl SystemClipboard {
    /// Picks the copy utilities for the running platform.
    pub fn detect() -> Self {
        Self::with_commands(platform_commands(env::var_os("WAYLAND_DISPLAY").is_some()))
    }

    pub fn with_commands(commands: Vec<CopyCommand>) -> Self {
        Self { commands }
    }

    pub fn commands(&self) -> &[CopyCommand] {
        &self.commands
    }
}

impl Clipboard for SystemClipboard {
    fn copy(&self, text: &str) -> bool {
        for command in &self.commands {
            match command.run(text) {
                Ok(true) => {
                    log::debug!("Copied to clipboard using {}", command.program);
                    return true;
                }
                Ok(false) => log::warn!("{} exited with an error", command.program),
                Err(e) => log::debug!("{} unavailable: {}", command.program, e),
            }
        }
        log::error!("No clipboard utility accepted the text");
        false
    }
}

/// Copy utilities in order of preference.
pub fn platform_commands(wayland: bool) -> Vec<CopyCommand> {
    if cfg!(target_os = "macos") {
        return vec![CopyCommand::new("pbcopy", &[])];
    }
    if cfg!(target_os = "windows") {
        return vec![CopyCommand::new("clip", &[])];
    }

    let mut commands = Vec::new();
    if wayland {
        commands.push(CopyCommand::new("wl-copy", &[]));
    }
    commands.push(CopyCommand::new("xclip", &["-selection", "clipboard"]));
    commands.push(CopyCommand::new("xsel", &["--clipboard", "--input"]));
    commands
}
