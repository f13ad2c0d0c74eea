//! Numbered-menu selection.
//!
//! Renders candidates as `1. label` lines, reads a single line of input and
//! resolves it to one item, every item, or nothing. Blank input picks the
//! first entry; anything that is not an in-range number picks nothing.

use std::io::{BufRead, Write};

use crate::{
    Res,
    error::ResolverError,
    types::{Album, Artist},
    utils,
};

pub const PROMPT: &str = "Choose a number (blank = first): ";
pub const ALL_ALBUMS_LABEL: &str = "ALL albums (copy all URLs)";
pub const CHOOSER_ALL_ALBUMS_LABEL: &str = "🎵 ALL albums (copy all URLs)";

/// Something that can be listed in a menu.
pub trait Candidate {
    /// Text after the `N. ` prefix in the numbered menu.
    fn menu_label(&self) -> String;

    /// Optional indented second line in the numbered menu.
    fn menu_detail(&self) -> Option<String> {
        None
    }

    /// Single-line label for the external chooser.
    fn chooser_label(&self) -> String;
}

impl Candidate for Artist {
    fn menu_label(&self) -> String {
        if self.followers.total > 0 {
            format!(
                "{} ({} followers)",
                display_name(&self.name),
                utils::format_thousands(self.followers.total)
            )
        } else {
            display_name(&self.name).to_string()
        }
    }

    fn menu_detail(&self) -> Option<String> {
        if self.followers.total == 0 || self.genres.is_empty() {
            return None;
        }
        Some(self.genres.iter().take(3).cloned().collect::<Vec<_>>().join(", "))
    }

    fn chooser_label(&self) -> String {
        let name = display_name(&self.name);
        if self.followers.total == 0 {
            return name.to_string();
        }

        let mut info = format!("({} followers", utils::format_compact(self.followers.total));
        let genres = self.genres.iter().take(2).cloned().collect::<Vec<_>>().join(", ");
        if !genres.is_empty() {
            info.push_str(", ");
            info.push_str(&genres);
        }
        info.push(')');
        format!("{} {}", name, info)
    }
}

impl Candidate for Album {
    fn menu_label(&self) -> String {
        format!(
            "{} — {} ({})",
            display_name(&self.name),
            self.artist_names(),
            utils::release_year(self.release_date.as_deref())
        )
    }

    fn chooser_label(&self) -> String {
        format!(
            "{} ({})",
            display_name(&self.name),
            utils::release_year(self.release_date.as_deref())
        )
    }
}

fn display_name(name: &str) -> &str {
    if name.is_empty() { "?" } else { name }
}

/// Outcome of a menu.
#[derive(Debug)]
pub enum Selection<'a, T> {
    One(&'a T),
    All,
    Nothing(ResolverError),
}

impl<'a, T> Selection<'a, T> {
    /// Converts "nothing" into its error so flows can use `?`.
    pub fn required(self) -> Res<Choice<'a, T>> {
        match self {
            Selection::One(item) => Ok(Choice::One(item)),
            Selection::All => Ok(Choice::All),
            Selection::Nothing(reason) => Err(reason),
        }
    }
}

/// A selection that picked something.
#[derive(Debug, PartialEq)]
pub enum Choice<'a, T> {
    One(&'a T),
    All,
}

/// Resolves one line of menu input against `len` entries.
///
/// `None` stands for end of input. Returns the zero-based index, `len` for
/// the ALL entry when `allow_all` is set, or the reason nothing was picked.
pub fn parse_choice(input: Option<&str>, len: usize, allow_all: bool) -> Result<usize, ResolverError> {
    let Some(line) = input else {
        return Err(ResolverError::Cancelled);
    };
    if len == 0 {
        return Err(ResolverError::Cancelled);
    }

    let line = line.trim();
    if line.is_empty() {
        return Ok(0);
    }

    let choice = line
        .parse::<i64>()
        .map_err(|_| ResolverError::InvalidSelection)?;

    if allow_all && choice == len as i64 + 1 {
        return Ok(len);
    }
    if (1..=len as i64).contains(&choice) {
        return Ok(choice as usize - 1);
    }
    Err(ResolverError::OutOfRange)
}

/// Writes the numbered menu for `items` to `out`.
pub fn render_menu<T: Candidate, W: Write>(items: &[T], allow_all: bool, out: &mut W) -> Res<()> {
    for (idx, item) in items.iter().enumerate() {
        writeln!(out, "{}. {}", idx + 1, item.menu_label())?;
        if let Some(detail) = item.menu_detail() {
            writeln!(out, "   {}", detail)?;
        }
    }
    if allow_all {
        writeln!(out, "{}. {}", items.len() + 1, ALL_ALBUMS_LABEL)?;
    }
    Ok(())
}

/// Shows the menu, reads one line from `input` and resolves it.
///
/// Invalid and out-of-range answers are reported on `out` before returning
/// [`Selection::Nothing`]; there is no second prompt.
///
/// # Example
///
/// ```
/// let stdin = std::io::stdin();
/// let selection = choose(&albums, true, &mut stdin.lock(), &mut std::io::stdout())?;
/// ```
pub fn choose<'a, T, R, W>(
    items: &'a [T],
    allow_all: bool,
    input: &mut R,
    out: &mut W,
) -> Res<Selection<'a, T>>
where
    T: Candidate,
    R: BufRead,
    W: Write,
{
    if items.is_empty() {
        return Ok(Selection::Nothing(ResolverError::Cancelled));
    }

    render_menu(items, allow_all, out)?;
    write!(out, "\n{}", PROMPT)?;
    out.flush()?;

    let line = read_line(input)?;
    let selection = match parse_choice(line.as_deref(), items.len(), allow_all) {
        Ok(idx) if idx == items.len() => Selection::All,
        Ok(idx) => Selection::One(&items[idx]),
        Err(reason) => {
            if !matches!(reason, ResolverError::Cancelled) {
                writeln!(out, "{}", reason)?;
            }
            Selection::Nothing(reason)
        }
    };
    Ok(selection)
}

/// One line without its terminator, or `None` at end of input.
pub fn read_line<R: BufRead>(input: &mut R) -> Res<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
}
