//! Spotify Album Resolver Library
//!
//! This library provides the building blocks behind the `spotify-resolver`
//! command-line tool: searching the Spotify catalog for artists and albums,
//! letting a human pick from the results and handing the resulting share
//! link to the system clipboard.
//!
//! # Modules
//!
//! - `cli` - Interactive flows behind each subcommand
//! - `clipboard` - Clipboard sink backed by the platform copy utilities
//! - `config` - Configuration file, environment overlay and paths
//! - `error` - The crate-wide error type
//! - `gum` - Adapter for the external `gum` terminal chooser/styler
//! - `logging` - Diagnostic log file setup
//! - `selection` - Numbered-menu selection engine
//! - `spotify` - Spotify Web API client (session, token, search, catalog)
//! - `types` - Data structures and type definitions
//! - `utils` - Formatting, de-duplication and sorting helpers
//!
//! # Example
//!
//! ```
//! use spotify_resolver::{config::Config, spotify};
//!
//! #[tokio::main]
//! async fn main() -> spotify_resolver::Res<()> {
//!     let config = Config::load(None).await;
//!     let session = spotify::Session::new(&config)?;
//!     let token = spotify::auth::get_token(&session, &config.credentials()?).await;
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod clipboard;
pub mod config;
pub mod error;
pub mod gum;
pub mod logging;
pub mod selection;
pub mod spotify;
pub mod types;
pub mod utils;

/// A convenient Result type alias for operations that may fail.
///
/// Every fallible operation in the library reports a [`error::ResolverError`],
/// which `main` turns into a message and an exit code.
pub type Res<T> = std::result::Result<T, error::ResolverError>;

/// Prints an informational message with a blue bullet point.
///
/// Creates a formatted output line with a distinctive blue "o" indicator
/// followed by the provided message. Used for general information and
/// status updates throughout the application.
///
/// # Example
///
/// ```
/// info!("Searching for albums: {}...", query);
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a success message with a green checkmark.
///
/// # Example
///
/// ```
/// success!("Copied to clipboard: {}", url);
/// ```
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error message with a red exclamation mark and exits the program.
///
/// Creates a formatted error output with a red "!" indicator and immediately
/// terminates the program with exit code 1. Only the binary uses this; the
/// library reports failures through [`Res`].
///
/// # Example
///
/// ```
/// error!("Missing Spotify credentials");
/// // Program exits here - code after this will not execute
/// ```
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    eprintln!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a warning message with a yellow exclamation mark.
///
/// Used for recoverable issues such as a degraded clipboard or a missing
/// `gum` binary.
///
/// # Example
///
/// ```
/// warning!("Could not read config: {}", e);
/// ```
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
