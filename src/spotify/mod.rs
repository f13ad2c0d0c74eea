//! # Spotify Integration Module
//!
//! Thin client for the three Spotify Web API endpoints the resolver needs.
//! Every call goes through one [`Session`], which owns the HTTP client, the
//! default headers, the timeout and the retry policy.
//!
//! ```text
//! CLI flows
//!     ↓
//! auth::get_token  search::search_albums / search_artists  releases::get_artist_albums
//!     ↓
//! Session (reqwest client + retry loop)
//!     ↓
//! Spotify Web API
//! ```
//!
//! ## Endpoints
//!
//! - `POST /api/token` - client-credentials grant with Basic auth
//! - `GET /search` - keyword search filtered by item type
//! - `GET /artists/{id}/albums` - an artist's albums (`include_groups=album`)
//!
//! ## Error Handling
//!
//! Retries happen inside the session for rate limiting (429) and transient
//! server errors (500, 502, 503, 504). Whatever is left after the retry
//! budget is spent surfaces as a [`crate::error::ResolverError`]. The token
//! fetch is the exception: [`auth::get_token`] reports the failure and
//! returns `None`, leaving the decision to terminate to the caller.
//!
//! ## Usage
//!
//! ```rust
//! let session = spotify::Session::new(&config)?;
//! let token = spotify::auth::get_token(&session, &config.credentials()?)
//!     .await
//!     .ok_or(ResolverError::NoToken)?;
//! let albums = spotify::search::search_albums(&session, &token, "Master of Puppets", 20, None).await?;
//! ```

pub mod auth;
pub mod releases;
pub mod search;
mod session;

pub use session::{RetryPolicy, Session};
