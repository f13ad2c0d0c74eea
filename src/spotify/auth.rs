use base64::{Engine, engine::general_purpose::STANDARD};
use reqwest::header::AUTHORIZATION;

use crate::{
    Res,
    error::ResolverError,
    types::{AccessToken, Credentials, TokenResponse},
    utils, warning,
};

use super::Session;

/// Fetches an app-only access token via the client-credentials grant.
///
/// Never fails loudly: transport errors, non-2xx responses and bodies
/// without an `access_token` are reported and yield `None`. The caller
/// decides whether a missing token ends the run.
///
/// # Arguments
///
/// * `session` - Session whose token endpoint, timeout and retry policy apply
/// * `credentials` - Client id and secret from the configuration
///
/// # Example
///
/// ```
/// let Some(token) = get_token(&session, &credentials).await else {
///     error!("Failed to obtain Spotify access token");
/// };
/// ```
pub async fn get_token(session: &Session, credentials: &Credentials) -> Option<AccessToken> {
    log::debug!("Requesting Spotify access token...");

    match request_token(session, credentials).await {
        Ok(token) => {
            log::debug!("Successfully obtained access token");
            Some(token)
        }
        Err(e) => {
            log::error!("Error obtaining access token: {}", e);
            warning!("{}", e);
            None
        }
    }
}

/// The fallible core of [`get_token`].
///
/// Posts `grant_type=client_credentials` with a Basic authorization header
/// built from `base64(client_id:client_secret)`.
pub async fn request_token(session: &Session, credentials: &Credentials) -> Res<AccessToken> {
    let request = session
        .post(session.token_url())
        .header(AUTHORIZATION, basic_auth_header(credentials))
        .form(&[("grant_type", "client_credentials")]);

    let response = session.send(request).await?;
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(ResolverError::TokenRejected {
            status: status.as_u16(),
            body: utils::snippet(&body, 400),
        });
    }

    let payload = response.json::<TokenResponse>().await?;
    payload
        .access_token
        .filter(|token| !token.is_empty())
        .map(AccessToken)
        .ok_or(ResolverError::MissingAccessToken)
}

pub fn basic_auth_header(credentials: &Credentials) -> String {
    let raw = format!("{}:{}", credentials.client_id, credentials.client_secret);
    format!("Basic {}", STANDARD.encode(raw.as_bytes()))
}
