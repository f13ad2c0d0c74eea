#![allow(dead_code)]

use std::{
    cell::RefCell,
    collections::HashMap,
    io::Cursor,
    sync::{
        Arc, Mutex,
        atomic::{AtomicUsize, Ordering},
    },
};

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    routing::{get, post},
};
use serde_json::{Value, json};

use spotify_resolver::{
    cli::{Console, Context},
    clipboard::Clipboard,
    config::Config,
    gum::{Chooser, Style},
};

pub const CLIENT_ID: &str = "client-id";
pub const CLIENT_SECRET: &str = "client-secret";
pub const TOKEN: &str = "test-token";

/// A request seen by the mock server.
#[derive(Debug, Clone)]
pub struct Recorded {
    pub path: String,
    pub params: HashMap<String, String>,
    pub authorization: Option<String>,
    pub body: String,
}

/// Canned Spotify responses served by [`serve`].
pub struct MockSpotify {
    pub token_status: u16,
    pub token_body: Value,
    pub albums: Vec<Value>,
    pub artists: Vec<Value>,
    pub artist_albums: HashMap<String, Vec<Value>>,
    /// Number of 503 answers the search endpoint gives before succeeding.
    pub search_failures: usize,
    pub search_status: u16,
    pub search_hits: AtomicUsize,
    pub requests: Mutex<Vec<Recorded>>,
}

impl Default for MockSpotify {
    fn default() -> Self {
        Self {
            token_status: 200,
            token_body: json!({"access_token": TOKEN, "token_type": "Bearer", "expires_in": 3600}),
            albums: Vec::new(),
            artists: Vec::new(),
            artist_albums: HashMap::new(),
            search_failures: 0,
            search_status: 200,
            search_hits: AtomicUsize::new(0),
            requests: Mutex::new(Vec::new()),
        }
    }
}

impl MockSpotify {
    pub fn requests(&self) -> Vec<Recorded> {
        self.requests.lock().unwrap().clone()
    }

    pub fn requests_to(&self, path: &str) -> Vec<Recorded> {
        self.requests()
            .into_iter()
            .filter(|r| r.path == path)
            .collect()
    }

    fn record(&self, path: String, params: HashMap<String, String>, headers: &HeaderMap, body: String) {
        let authorization = headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        self.requests.lock().unwrap().push(Recorded {
            path,
            params,
            authorization,
            body,
        });
    }
}

type Shared = Arc<MockSpotify>;

async fn token(State(mock): State<Shared>, headers: HeaderMap, body: String) -> (StatusCode, Json<Value>) {
    mock.record("/api/token".to_string(), HashMap::new(), &headers, body);
    let status = StatusCode::from_u16(mock.token_status).unwrap();
    (status, Json(mock.token_body.clone()))
}

async fn search(
    State(mock): State<Shared>,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> (StatusCode, Json<Value>) {
    mock.record("/v1/search".to_string(), params.clone(), &headers, String::new());

    let hit = mock.search_hits.fetch_add(1, Ordering::SeqCst);
    if hit < mock.search_failures {
        return (StatusCode::SERVICE_UNAVAILABLE, Json(json!({"error": "unavailable"})));
    }
    if mock.search_status != 200 {
        let status = StatusCode::from_u16(mock.search_status).unwrap();
        return (status, Json(json!({"error": {"status": mock.search_status, "message": "nope"}})));
    }

    let body = match params.get("type").map(String::as_str) {
        Some("artist") => json!({"artists": {"items": mock.artists.clone()}}),
        _ => json!({"albums": {"items": mock.albums.clone()}}),
    };
    (StatusCode::OK, Json(body))
}

async fn artist_albums(
    State(mock): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Query(params): Query<HashMap<String, String>>,
) -> (StatusCode, Json<Value>) {
    mock.record(format!("/v1/artists/{}/albums", id), params, &headers, String::new());
    match mock.artist_albums.get(&id) {
        Some(items) => (StatusCode::OK, Json(json!({"items": items}))),
        None => (
            StatusCode::NOT_FOUND,
            Json(json!({"error": {"status": 404, "message": "non existing id"}})),
        ),
    }
}

/// Starts the mock on an ephemeral port and returns its base URL.
pub async fn serve(mock: MockSpotify) -> (String, Shared) {
    let mock = Arc::new(mock);
    let app = Router::new()
        .route("/api/token", post(token))
        .route("/v1/search", get(search))
        .route("/v1/artists/{id}/albums", get(artist_albums))
        .with_state(Arc::clone(&mock));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{}", addr), mock)
}

/// Config pointing at the mock, without backoff sleeps.
pub fn config_for(base: &str) -> Config {
    Config {
        client_id: Some(CLIENT_ID.to_string()),
        client_secret: Some(CLIENT_SECRET.to_string()),
        api_url: format!("{}/v1", base),
        token_url: format!("{}/api/token", base),
        timeout: 5.0,
        retry_delay: 0.0,
        ..Config::default()
    }
}

pub fn album_json(id: &str, name: &str, release_date: &str, artist: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "release_date": release_date,
        "album_type": "album",
        "artists": [{"id": format!("{}_artist", id), "name": artist}],
        "external_urls": {"spotify": format!("https://open.spotify.com/album/{}", id)}
    })
}

pub fn artist_json(id: &str, name: &str, followers: u64, genres: &[&str]) -> Value {
    json!({
        "id": id,
        "name": name,
        "genres": genres,
        "followers": {"href": null, "total": followers},
        "external_urls": {"spotify": format!("https://open.spotify.com/artist/{}", id)}
    })
}

/// Records everything copied; `works = false` simulates a missing clipboard.
pub struct FakeClipboard {
    pub works: bool,
    pub copied: RefCell<Vec<String>>,
}

impl FakeClipboard {
    pub fn new() -> Self {
        Self {
            works: true,
            copied: RefCell::new(Vec::new()),
        }
    }

    pub fn broken() -> Self {
        Self {
            works: false,
            copied: RefCell::new(Vec::new()),
        }
    }

    pub fn contents(&self) -> Vec<String> {
        self.copied.borrow().clone()
    }
}

impl Clipboard for FakeClipboard {
    fn copy(&self, text: &str) -> bool {
        if self.works {
            self.copied.borrow_mut().push(text.to_string());
        }
        self.works
    }
}

/// Scripted chooser: answers `choose` calls from `picks` in order.
pub struct FakeChooser {
    pub available: bool,
    pub query: Option<String>,
    pub picks: RefCell<Vec<Option<usize>>>,
    pub shown: RefCell<Vec<Vec<String>>>,
    pub styled: RefCell<Vec<String>>,
}

impl FakeChooser {
    pub fn new(picks: Vec<Option<usize>>) -> Self {
        Self {
            available: true,
            query: None,
            picks: RefCell::new(picks),
            shown: RefCell::new(Vec::new()),
            styled: RefCell::new(Vec::new()),
        }
    }

    pub fn unavailable() -> Self {
        Self {
            available: false,
            ..Self::new(Vec::new())
        }
    }
}

impl Chooser for FakeChooser {
    fn probe(&self) -> bool {
        self.available
    }

    fn input(&self, _prompt: &str, _placeholder: &str) -> Option<String> {
        self.query.clone()
    }

    fn choose(&self, labels: &[String], _header: &str) -> Option<usize> {
        self.shown.borrow_mut().push(labels.to_vec());
        let mut picks = self.picks.borrow_mut();
        if picks.is_empty() {
            None
        } else {
            picks.remove(0)
        }
    }

    fn style(&self, text: &str, _style: &Style) -> String {
        self.styled.borrow_mut().push(text.to_string());
        text.to_string()
    }
}

pub fn context<'a>(config: &'a Config, clipboard: &'a FakeClipboard) -> Context<'a, FakeClipboard> {
    Context {
        config,
        clipboard,
        no_clipboard: false,
    }
}

/// Console fed with `input`, capturing everything written.
pub fn console(input: &str) -> Console<Cursor<Vec<u8>>, Vec<u8>> {
    Console::new(Cursor::new(input.as_bytes().to_vec()), Vec::new(), true)
}

pub fn output(console: &Console<Cursor<Vec<u8>>, Vec<u8>>) -> String {
    String::from_utf8_lossy(&console.output).into_owned()
}
