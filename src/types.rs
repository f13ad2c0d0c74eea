use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use tabled::Tabled;

pub const SPOTIFY_ALBUM_BASE: &str = "https://open.spotify.com/album/";

#[derive(Debug, Clone)]
pub struct Credentials {
    pub client_id: String,
    pub client_secret: String,
}

/// Bearer token from the client-credentials grant.
///
/// Expiry is not tracked; a token is fetched once per run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessToken(pub String);

impl AccessToken {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchKind {
    Artist,
    Album,
}

impl fmt::Display for SearchKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchKind::Artist => write!(f, "artist"),
            SearchKind::Album => write!(f, "album"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExternalUrls {
    #[serde(default)]
    pub spotify: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Followers {
    #[serde(default)]
    pub total: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Artist {
    pub id: String,
    pub name: String,
    pub genres: Vec<String>,
    pub followers: Followers,
    pub external_urls: ExternalUrls,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AlbumArtist {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Album {
    pub id: String,
    pub name: String,
    pub artists: Vec<AlbumArtist>,
    /// `YYYY-MM-DD`, `YYYY-MM` or `YYYY` depending on the release.
    pub release_date: Option<String>,
    pub external_urls: ExternalUrls,
}

impl Album {
    pub fn artist_names(&self) -> String {
        self.artists
            .iter()
            .map(|a| if a.name.is_empty() { "?" } else { a.name.as_str() })
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// The share link reported by the API, if any.
    pub fn share_url(&self) -> Option<&str> {
        self.external_urls
            .spotify
            .as_deref()
            .filter(|url| !url.is_empty())
    }

    /// `https://open.spotify.com/album/{id}`, built from the identifier alone.
    pub fn canonical_url(&self) -> Option<String> {
        if self.id.is_empty() {
            None
        } else {
            Some(format!("{}{}", SPOTIFY_ALBUM_BASE, self.id))
        }
    }
}

/// One page of search or catalog results.
///
/// The API occasionally puts `null` entries in `items`; they are dropped.
#[derive(Debug, Clone, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct Page<T> {
    #[serde(default = "Vec::new", deserialize_with = "skip_null_items")]
    pub items: Vec<T>,
}

impl<T> Default for Page<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

fn skip_null_items<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    let items: Option<Vec<Option<T>>> = Option::deserialize(deserializer)?;
    Ok(items.unwrap_or_default().into_iter().flatten().collect())
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SearchResponse {
    pub artists: Option<Page<Artist>>,
    pub albums: Option<Page<Album>>,
}

#[derive(Tabled)]
pub struct AlbumTableRow {
    #[tabled(rename = "#")]
    pub index: usize,
    pub name: String,
    pub artists: String,
    pub year: String,
    pub url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_pages_decode_for_every_item_type() {
        let response: SearchResponse = serde_json::from_str(
            r#"{
                "artists": {"items": [{"id": "a", "name": "A", "followers": {"total": 3}}, null]},
                "albums": {"items": [null, {"id": "b", "name": "B", "release_date": "1999"}]}
            }"#,
        )
        .unwrap();

        let artists = response.artists.unwrap_or_default().items;
        assert_eq!(artists.len(), 1);
        assert_eq!(artists[0].followers.total, 3);

        let albums = response.albums.unwrap_or_default().items;
        assert_eq!(albums.len(), 1);
        assert_eq!(albums[0].release_date.as_deref(), Some("1999"));
    }

    #[test]
    fn missing_items_decode_as_empty_page() {
        let page: Page<Artist> = serde_json::from_str("{}").unwrap();
        assert!(page.items.is_empty());
    }
}
