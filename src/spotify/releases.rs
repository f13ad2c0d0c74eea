use crate::{
    Res,
    types::{AccessToken, Album, Page},
};

use super::{Session, search::clamp_limit, session::ensure_success};

/// Retrieves an artist's albums from the Spotify Web API.
///
/// Only the `album` release group is requested; singles, compilations and
/// appearances are filtered out by Spotify, not locally. Results come back
/// in the provider's order and may repeat the same album id, so callers
/// de-duplicate with [`crate::utils::remove_duplicate_albums`] before
/// presenting them.
///
/// # Arguments
///
/// * `artist_id` - Spotify ID of the artist
/// * `token` - Bearer token from [`super::auth::get_token`]
/// * `limit` - Page size, clamped to 1..=50
/// * `market` - ISO country code restricting availability
///
/// # API Endpoint
///
/// `GET /artists/{id}/albums?include_groups=album&limit={limit}&market={market}`
///
/// # Example
///
/// ```
/// let albums = get_artist_albums(&session, &token, "2ye2Wgw4gimLv2eAKyk1NB", 50, "US").await?;
/// println!("Found {} releases", albums.len());
/// ```
pub async fn get_artist_albums(
    session: &Session,
    token: &AccessToken,
    artist_id: &str,
    limit: u32,
    market: &str,
) -> Res<Vec<Album>> {
    let api_url = session.api_url(&format!("artists/{id}/albums", id = artist_id));
    let limit = clamp_limit(limit).to_string();

    let request = session
        .get(&api_url)
        .bearer_auth(token.as_str())
        .query(&[
            ("include_groups", "album"),
            ("limit", limit.as_str()),
            ("market", market),
        ]);

    let response = ensure_success(session.send(request).await?).await?;
    let json = response.json::<Page<Album>>().await?;

    log::debug!("Artist {} has {} album entries", artist_id, json.items.len());
    Ok(json.items)
}
