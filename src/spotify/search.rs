use crate::{
    Res,
    types::{AccessToken, Album, Artist, SearchKind, SearchResponse},
};

use super::{Session, session::ensure_success};

/// Spotify caps page sizes at 50.
pub fn clamp_limit(limit: u32) -> u32 {
    limit.clamp(1, 50)
}

/// Searches the catalog for albums.
///
/// The query is sent verbatim, so field filters such as
/// `artist:Metallica album:Master of Puppets` work as documented by Spotify.
/// No match is an empty vector, not an error.
///
/// # Example
///
/// ```
/// let albums = search_albums(&session, &token, "artist:Metallica", 20, Some("US")).await?;
/// ```
pub async fn search_albums(
    session: &Session,
    token: &AccessToken,
    query: &str,
    limit: u32,
    market: Option<&str>,
) -> Res<Vec<Album>> {
    let response = search(session, token, query, SearchKind::Album, limit, market).await?;
    Ok(response.albums.unwrap_or_default().items)
}

/// Searches the catalog for artists. No match is an empty vector.
pub async fn search_artists(
    session: &Session,
    token: &AccessToken,
    query: &str,
    limit: u32,
) -> Res<Vec<Artist>> {
    let response = search(session, token, query, SearchKind::Artist, limit, None).await?;
    Ok(response.artists.unwrap_or_default().items)
}

async fn search(
    session: &Session,
    token: &AccessToken,
    query: &str,
    kind: SearchKind,
    limit: u32,
    market: Option<&str>,
) -> Res<SearchResponse> {
    let mut params = vec![
        ("q", query.to_string()),
        ("type", kind.to_string()),
        ("limit", clamp_limit(limit).to_string()),
    ];
    if let Some(market) = market {
        params.push(("market", market.to_string()));
    }

    log::info!("Searching Spotify API for {}: {}", kind, query);
    let request = session
        .get(&session.api_url("search"))
        .bearer_auth(token.as_str())
        .query(&params);

    let response = ensure_success(session.send(request).await?).await?;
    let json = response.json::<SearchResponse>().await?;
    Ok(json)
}
