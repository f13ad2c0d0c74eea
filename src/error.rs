use std::path::PathBuf;

use thiserror::Error;

/// Everything that can stop a resolver run.
///
/// Variants follow the failure classes the tool distinguishes: configuration,
/// authentication, transport, user input and lookups that came back empty.
#[derive(Debug, Error)]
pub enum ResolverError {
    #[error(
        "Missing Spotify credentials. Add client_id and client_secret to {}",
        .0.display()
    )]
    MissingCredentials(PathBuf),

    #[error("Failed to obtain Spotify access token")]
    NoToken,

    #[error("Token request failed with status {status}: {body}")]
    TokenRejected { status: u16, body: String },

    #[error("No access token in response")]
    MissingAccessToken,

    #[error("Spotify API returned {status} for {url}: {body}")]
    Api {
        status: u16,
        url: String,
        body: String,
    },

    #[error("Network error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Query required")]
    EmptyQuery,

    #[error("Invalid selection")]
    InvalidSelection,

    #[error("Choice out of range")]
    OutOfRange,

    #[error("Nothing selected")]
    Cancelled,

    #[error("{0} not found")]
    NotFound(String),

    #[error("No URL available for {0}")]
    MissingUrl(String),
}
