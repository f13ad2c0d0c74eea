//! # CLI Module
//!
//! The interactive flows behind each subcommand. Every flow is the same
//! short pipeline over the library:
//!
//! ```text
//! query (argument, prompt or stdin)
//!     ↓
//! credentials → Session → access token
//!     ↓
//! search (and, for artist flows, the artist's albums)
//!     ↓
//! selection (numbered menu or gum)
//!     ↓
//! share URL(s) → clipboard, or printed
//! ```
//!
//! ## Commands
//!
//! - [`resolve`] - band/album or free query to the first album's URL, no menu
//! - [`albums`] - album search with a numbered menu, optional ALL entry
//! - [`artists`] - artist search, then that artist's albums
//! - [`browse`] - the artist flow rendered with `gum`, with plain fallback
//!
//! ## Error Handling
//!
//! Flows return [`crate::Res`]. Finding nothing is reported and returns
//! `Ok(())`, except for [`resolve`] where the lookup itself is the result.
//! A failed clipboard copy degrades to printing and is never an error.

pub mod albums;
pub mod artists;
pub mod browse;
pub mod resolve;

use std::io::{BufRead, Write};

use crate::{
    Res,
    clipboard::Clipboard,
    config::Config,
    error::ResolverError,
    info,
    selection::read_line,
    spotify::{self, Session},
    success,
    types::AccessToken,
};

/// Shared collaborators of a run.
pub struct Context<'a, C: Clipboard> {
    pub config: &'a Config,
    pub clipboard: &'a C,
    /// Print results instead of copying them.
    pub no_clipboard: bool,
}

/// Where menus are written and answers are read.
pub struct Console<R, W> {
    pub input: R,
    pub output: W,
    /// Whether `input` is a terminal a human is typing into.
    pub interactive: bool,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W, interactive: bool) -> Self {
        Self {
            input,
            output,
            interactive,
        }
    }

    /// Writes `message` and reads one trimmed line; `None` at end of input.
    pub fn prompt(&mut self, message: &str) -> Res<Option<String>> {
        write!(self.output, "{}", message)?;
        self.output.flush()?;
        Ok(read_line(&mut self.input)?.map(|line| line.trim().to_string()))
    }

    /// Everything left on the input, trimmed.
    pub fn read_rest(&mut self) -> Res<String> {
        let mut buf = String::new();
        self.input.read_to_string(&mut buf)?;
        Ok(buf.trim().to_string())
    }
}

/// Joins positional words into a query, `None` when there are none.
pub fn query_from_words(words: &[String]) -> Option<String> {
    let query = words.join(" ");
    let query = query.trim();
    if query.is_empty() {
        None
    } else {
        Some(query.to_string())
    }
}

/// Checks credentials, builds the session and fetches a token.
pub async fn authorize(config: &Config) -> Res<(Session, AccessToken)> {
    let credentials = config.credentials()?;
    let session = Session::new(config)?;
    let token = spotify::auth::get_token(&session, &credentials)
        .await
        .ok_or(ResolverError::NoToken)?;
    Ok((session, token))
}

/// Copies `text` or prints it, reporting which happened.
///
/// Returns whether the text reached the clipboard.
pub fn deliver<C: Clipboard>(ctx: &Context<'_, C>, text: &str, summary: &str) -> bool {
    if ctx.no_clipboard {
        println!("{}", text);
        return false;
    }

    if ctx.clipboard.copy(text) {
        success!("Copied to clipboard: {}", summary);
        println!("   {}", text.replace('\n', "\n   "));
        true
    } else {
        info!("Clipboard unavailable, printing instead:");
        println!("{}", text);
        false
    }
}

/// Newline-joined share URLs of every album that has one.
pub fn joined_urls(albums: &[crate::types::Album]) -> (String, usize) {
    let urls: Vec<&str> = albums.iter().filter_map(|a| a.share_url()).collect();
    (urls.join("\n"), urls.len())
}
