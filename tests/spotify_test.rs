mod common;

use std::collections::HashMap;

use serde_json::json;

use common::*;
use spotify_resolver::{
    error::ResolverError,
    spotify::{Session, auth, releases, search},
    types::{AccessToken, Credentials},
};

fn credentials() -> Credentials {
    Credentials {
        client_id: CLIENT_ID.to_string(),
        client_secret: CLIENT_SECRET.to_string(),
    }
}

fn token() -> AccessToken {
    AccessToken(TOKEN.to_string())
}

#[test]
fn test_basic_auth_header() {
    let header = auth::basic_auth_header(&Credentials {
        client_id: "abc".to_string(),
        client_secret: "xyz".to_string(),
    });
    // base64("abc:xyz")
    assert_eq!(header, "Basic YWJjOnh5eg==");
}

#[test]
fn test_clamp_limit() {
    assert_eq!(search::clamp_limit(0), 1);
    assert_eq!(search::clamp_limit(20), 20);
    assert_eq!(search::clamp_limit(50), 50);
    assert_eq!(search::clamp_limit(500), 50);
}

#[tokio::test]
async fn test_get_token_success() {
    let (base, mock) = serve(MockSpotify {
        token_body: json!({"access_token": "abc"}),
        ..MockSpotify::default()
    })
    .await;
    let session = Session::new(&config_for(&base)).unwrap();

    let token = auth::get_token(&session, &credentials()).await;
    assert_eq!(token, Some(AccessToken("abc".to_string())));

    let requests = mock.requests_to("/api/token");
    assert_eq!(requests.len(), 1);
    assert_eq!(
        requests[0].authorization.as_deref(),
        Some(auth::basic_auth_header(&credentials()).as_str())
    );
    assert_eq!(requests[0].body, "grant_type=client_credentials");
}

#[tokio::test]
async fn test_get_token_rejected() {
    for status in [400, 401] {
        let (base, _mock) = serve(MockSpotify {
            token_status: status,
            token_body: json!({"error": "invalid_client"}),
            ..MockSpotify::default()
        })
        .await;
        let session = Session::new(&config_for(&base)).unwrap();

        assert_eq!(auth::get_token(&session, &credentials()).await, None);

        match auth::request_token(&session, &credentials()).await {
            Err(ResolverError::TokenRejected { status: got, body }) => {
                assert_eq!(got, status);
                assert!(body.contains("invalid_client"));
            }
            other => panic!("expected rejection, got {:?}", other),
        }
    }
}

#[tokio::test]
async fn test_get_token_without_access_token() {
    let (base, _mock) = serve(MockSpotify {
        token_body: json!({"token_type": "Bearer"}),
        ..MockSpotify::default()
    })
    .await;
    let session = Session::new(&config_for(&base)).unwrap();

    assert!(matches!(
        auth::request_token(&session, &credentials()).await,
        Err(ResolverError::MissingAccessToken)
    ));
    assert_eq!(auth::get_token(&session, &credentials()).await, None);
}

#[tokio::test]
async fn test_get_token_unreachable() {
    // Nothing listens on the discard port
    let mut config = config_for("http://127.0.0.1:9");
    config.max_retries = 0;
    let session = Session::new(&config).unwrap();

    assert_eq!(auth::get_token(&session, &credentials()).await, None);
}

#[tokio::test]
async fn test_search_albums_empty() {
    let (base, _mock) = serve(MockSpotify::default()).await;
    let session = Session::new(&config_for(&base)).unwrap();

    let albums = search::search_albums(&session, &token(), "nothing here", 20, None)
        .await
        .unwrap();
    assert!(albums.is_empty());
}

#[tokio::test]
async fn test_search_albums_sends_query() {
    let (base, mock) = serve(MockSpotify {
        albums: vec![
            album_json("XYZ", "Master of Puppets", "1986-03-03", "Metallica"),
            album_json("ABC", "Master of Puppets (Remastered)", "2017-04-14", "Metallica"),
        ],
        ..MockSpotify::default()
    })
    .await;
    let session = Session::new(&config_for(&base)).unwrap();

    let albums = search::search_albums(
        &session,
        &token(),
        "artist:Metallica album:Master of Puppets",
        100,
        Some("US"),
    )
    .await
    .unwrap();

    // Provider order is kept
    let ids: Vec<&str> = albums.iter().map(|a| a.id.as_str()).collect();
    assert_eq!(ids, vec!["XYZ", "ABC"]);
    assert_eq!(albums[0].artist_names(), "Metallica");

    let requests = mock.requests_to("/v1/search");
    assert_eq!(requests.len(), 1);
    let expected: HashMap<String, String> = [
        ("q", "artist:Metallica album:Master of Puppets"),
        ("type", "album"),
        ("limit", "50"),
        ("market", "US"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect();
    assert_eq!(requests[0].params, expected);
    assert_eq!(
        requests[0].authorization.as_deref(),
        Some(format!("Bearer {}", TOKEN).as_str())
    );
}

#[tokio::test]
async fn test_search_artists() {
    let (base, mock) = serve(MockSpotify {
        artists: vec![
            artist_json("m1", "Metallica", 25_000_000, &["metal", "thrash metal"]),
            artist_json("m2", "Metallica Tribute", 120, &[]),
        ],
        ..MockSpotify::default()
    })
    .await;
    let session = Session::new(&config_for(&base)).unwrap();

    let artists = search::search_artists(&session, &token(), "metallica", 10)
        .await
        .unwrap();

    assert_eq!(artists.len(), 2);
    assert_eq!(artists[0].name, "Metallica");
    assert_eq!(artists[0].followers.total, 25_000_000);
    assert_eq!(artists[0].genres, vec!["metal", "thrash metal"]);

    let requests = mock.requests_to("/v1/search");
    assert_eq!(requests[0].params.get("type").map(String::as_str), Some("artist"));
    assert_eq!(requests[0].params.get("limit").map(String::as_str), Some("10"));
    assert!(!requests[0].params.contains_key("market"));
}

#[tokio::test]
async fn test_get_artist_albums() {
    let mut artist_albums = HashMap::new();
    artist_albums.insert(
        "m1".to_string(),
        vec![
            album_json("a1", "Master of Puppets", "1986-03-03", "Metallica"),
            album_json("a2", "72 Seasons", "2023-04-14", "Metallica"),
        ],
    );
    let (base, mock) = serve(MockSpotify {
        artist_albums,
        ..MockSpotify::default()
    })
    .await;
    let session = Session::new(&config_for(&base)).unwrap();

    let albums = releases::get_artist_albums(&session, &token(), "m1", 50, "SE")
        .await
        .unwrap();
    assert_eq!(albums.len(), 2);

    let requests = mock.requests_to("/v1/artists/m1/albums");
    assert_eq!(requests.len(), 1);
    let params = &requests[0].params;
    assert_eq!(params.get("include_groups").map(String::as_str), Some("album"));
    assert_eq!(params.get("limit").map(String::as_str), Some("50"));
    assert_eq!(params.get("market").map(String::as_str), Some("SE"));
}

#[tokio::test]
async fn test_get_artist_albums_unknown_artist() {
    let (base, _mock) = serve(MockSpotify::default()).await;
    let session = Session::new(&config_for(&base)).unwrap();

    match releases::get_artist_albums(&session, &token(), "nope", 50, "US").await {
        Err(ResolverError::Api { status, url, body }) => {
            assert_eq!(status, 404);
            assert!(url.contains("/artists/nope/albums"));
            assert!(body.contains("non existing id"));
        }
        other => panic!("expected API error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_transient_failures_are_retried() {
    let (base, mock) = serve(MockSpotify {
        search_failures: 2,
        albums: vec![album_json("XYZ", "Master of Puppets", "1986-03-03", "Metallica")],
        ..MockSpotify::default()
    })
    .await;
    let session = Session::new(&config_for(&base)).unwrap();

    let albums = search::search_albums(&session, &token(), "metallica", 20, None)
        .await
        .unwrap();

    assert_eq!(albums.len(), 1);
    assert_eq!(mock.requests_to("/v1/search").len(), 3);
}

#[tokio::test]
async fn test_retries_are_bounded() {
    let (base, mock) = serve(MockSpotify {
        search_failures: 10,
        ..MockSpotify::default()
    })
    .await;
    let mut config = config_for(&base);
    config.max_retries = 1;
    let session = Session::new(&config).unwrap();

    let result = search::search_albums(&session, &token(), "metallica", 20, None).await;

    assert!(matches!(result, Err(ResolverError::Api { status: 503, .. })));
    // One attempt plus one retry
    assert_eq!(mock.requests_to("/v1/search").len(), 2);
}

#[tokio::test]
async fn test_client_errors_are_not_retried() {
    let (base, mock) = serve(MockSpotify {
        search_status: 400,
        ..MockSpotify::default()
    })
    .await;
    let session = Session::new(&config_for(&base)).unwrap();

    let result = search::search_albums(&session, &token(), "metallica", 20, None).await;

    assert!(matches!(result, Err(ResolverError::Api { status: 400, .. })));
    assert_eq!(mock.requests_to("/v1/search").len(), 1);
}
