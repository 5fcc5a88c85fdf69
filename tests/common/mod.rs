#![allow(dead_code)]

//! A fake Spotify Web API and accounts service on an ephemeral port.

use std::{
    collections::HashMap,
    sync::{
        Arc, Mutex,
        atomic::{AtomicBool, AtomicUsize, Ordering},
    },
};

use axum::{
    Form, Router,
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode, header::AUTHORIZATION},
    response::{IntoResponse, Json, Response},
    routing::{get, post},
};
use serde_json::{Value, json};
use sporex::spotify::{CatalogClient, CatalogConfig};

pub const PLAYLIST_ID: &str = "37i9dQZF1EIgtiaACXv6tQ";

/// Playlist whose second item has no track and third item is a local file.
pub const GAPPY_PLAYLIST_ID: &str = "gappy";

pub const ARTIST_ID: &str = "0OdUWJ0sBjDrqHygGUXeCF";

/// Id the fake answers 404 for.
pub const MISSING_ID: &str = "0000000000000000000000";

pub struct MockSpotify {
    pub base_url: String,
    pub token_calls: AtomicUsize,
    pub info_calls: AtomicUsize,
    pub page_calls: AtomicUsize,
    pub feature_calls: AtomicUsize,
    pub artist_calls: AtomicUsize,
    /// Number of upcoming API requests answered with an expired-token 401.
    pub expire_next: AtomicUsize,
    /// Reject token requests with 400.
    pub token_fail: AtomicBool,
    /// 1-based page request answered with 500, 0 for none.
    pub fail_page: AtomicUsize,
    pub track_total: AtomicUsize,
    pub page_queries: Mutex<Vec<HashMap<String, String>>>,
    pub search_queries: Mutex<Vec<String>>,
}

impl MockSpotify {
    pub fn config(&self) -> CatalogConfig {
        CatalogConfig {
            api_url: format!("{}/v1", self.base_url),
            token_url: format!("{}/api/token", self.base_url),
            client_id: "client-id".to_string(),
            client_secret: "client-secret".to_string(),
            market: "US".to_string(),
        }
    }

    pub async fn client(&self) -> CatalogClient {
        CatalogClient::connect(self.config())
            .await
            .expect("mock token endpoint should issue a token")
    }

    pub fn set_tracks(&self, total: usize) {
        self.track_total.store(total, Ordering::SeqCst);
    }

    pub fn count(counter: &AtomicUsize) -> usize {
        counter.load(Ordering::SeqCst)
    }
}

/// Starts the fake on `127.0.0.1:0` and returns its shared state.
pub async fn start_mock_spotify() -> Arc<MockSpotify> {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind mock spotify");
    let addr = listener.local_addr().expect("mock spotify address");

    let state = Arc::new(MockSpotify {
        base_url: format!("http://{}", addr),
        token_calls: AtomicUsize::new(0),
        info_calls: AtomicUsize::new(0),
        page_calls: AtomicUsize::new(0),
        feature_calls: AtomicUsize::new(0),
        artist_calls: AtomicUsize::new(0),
        expire_next: AtomicUsize::new(0),
        token_fail: AtomicBool::new(false),
        fail_page: AtomicUsize::new(0),
        track_total: AtomicUsize::new(120),
        page_queries: Mutex::new(Vec::new()),
        search_queries: Mutex::new(Vec::new()),
    });

    let app = Router::new()
        .route("/api/token", post(token))
        .route("/v1/playlists/{id}", get(playlist))
        .route("/v1/playlists/{id}/tracks", get(playlist_tracks))
        .route("/v1/audio-features", get(audio_features))
        .route("/v1/artists", get(several_artists))
        .route("/v1/artists/{id}", get(artist))
        .route("/v1/artists/{id}/top-tracks", get(top_tracks))
        .route("/v1/search", get(search))
        .with_state(Arc::clone(&state));

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("mock spotify server");
    });

    state
}

fn upstream_error(status: StatusCode, message: &str) -> Response {
    (
        status,
        Json(json!({ "error": { "status": status.as_u16(), "message": message } })),
    )
        .into_response()
}

/// Rejects the request unless it carries the most recently issued token.
fn check_auth(state: &MockSpotify, headers: &HeaderMap) -> Option<Response> {
    let pending = state.expire_next.load(Ordering::SeqCst);
    if pending > 0 {
        state.expire_next.store(pending - 1, Ordering::SeqCst);
        return Some(upstream_error(
            StatusCode::UNAUTHORIZED,
            "The access token expired",
        ));
    }

    let expected = format!("Bearer token-{}", state.token_calls.load(Ordering::SeqCst));
    let sent = headers.get(AUTHORIZATION).and_then(|h| h.to_str().ok());
    if sent != Some(expected.as_str()) {
        return Some(upstream_error(StatusCode::UNAUTHORIZED, "Invalid access token"));
    }

    None
}

fn track_json(index: usize) -> Value {
    json!({
        "id": format!("track{:04}", index),
        "name": format!("Song {}", index),
        "popularity": 40,
        "duration_ms": 185000,
        "is_playable": true,
        "preview_url": null,
        "artists": [
            { "id": format!("artist{}", index % 3), "name": format!("Artist {}", index % 3) }
        ],
        "album": { "name": "Album" }
    })
}

fn artist_json(id: &str) -> Value {
    json!({
        "id": id,
        "name": format!("Name of {}", id),
        "genres": ["cowpunk", "alt-country"],
        "popularity": 60,
        "followers": { "total": 1000 },
        "images": [{ "url": "https://i.scdn.co/image/artist" }]
    })
}

async fn token(State(state): State<Arc<MockSpotify>>, Form(form): Form<HashMap<String, String>>) -> Response {
    if state.token_fail.load(Ordering::SeqCst)
        || form.get("grant_type").map(String::as_str) != Some("client_credentials")
    {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "invalid_client" })),
        )
            .into_response();
    }

    let n = state.token_calls.fetch_add(1, Ordering::SeqCst) + 1;
    Json(json!({
        "access_token": format!("token-{}", n),
        "token_type": "Bearer",
        "expires_in": 3600
    }))
    .into_response()
}

async fn playlist(
    State(state): State<Arc<MockSpotify>>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Response {
    state.info_calls.fetch_add(1, Ordering::SeqCst);
    if let Some(rejection) = check_auth(&state, &headers) {
        return rejection;
    }
    if id == MISSING_ID {
        return upstream_error(StatusCode::NOT_FOUND, "Resource not found");
    }

    Json(json!({
        "id": id,
        "name": format!("Playlist {}", id),
        "images": [{ "url": "https://i.scdn.co/image/cover" }]
    }))
    .into_response()
}

async fn playlist_tracks(
    State(state): State<Arc<MockSpotify>>,
    Path(id): Path<String>,
    Query(query): Query<HashMap<String, String>>,
    headers: HeaderMap,
) -> Response {
    let call = state.page_calls.fetch_add(1, Ordering::SeqCst) + 1;
    state
        .page_queries
        .lock()
        .expect("page query log")
        .push(query.clone());

    if let Some(rejection) = check_auth(&state, &headers) {
        return rejection;
    }
    if state.fail_page.load(Ordering::SeqCst) == call {
        return upstream_error(StatusCode::INTERNAL_SERVER_ERROR, "Server error");
    }
    if id == MISSING_ID {
        return upstream_error(StatusCode::NOT_FOUND, "Resource not found");
    }

    if id == GAPPY_PLAYLIST_ID {
        let mut local = track_json(2);
        local["id"] = Value::Null;
        return Json(json!({
            "items": [
                { "track": track_json(0) },
                { "track": null },
                { "track": local },
                { "track": track_json(3) },
                { "track": track_json(4) }
            ],
            "next": null,
            "total": 5
        }))
        .into_response();
    }

    let total = state.track_total.load(Ordering::SeqCst);
    let offset: usize = query.get("offset").and_then(|o| o.parse().ok()).unwrap_or(0);
    let limit: usize = query.get("limit").and_then(|l| l.parse().ok()).unwrap_or(100);
    let end = (offset + limit).min(total);

    let items: Vec<Value> = (offset..end).map(|i| json!({ "track": track_json(i) })).collect();
    let next = (end < total).then(|| {
        format!(
            "{}/v1/playlists/{}/tracks?offset={}&limit={}",
            state.base_url, id, end, limit
        )
    });

    Json(json!({ "items": items, "next": next, "total": total })).into_response()
}

fn requested_ids(query: &HashMap<String, String>) -> Vec<String> {
    query
        .get("ids")
        .map(|ids| ids.split(',').map(str::to_string).collect())
        .unwrap_or_default()
}

async fn audio_features(
    State(state): State<Arc<MockSpotify>>,
    Query(query): Query<HashMap<String, String>>,
    headers: HeaderMap,
) -> Response {
    state.feature_calls.fetch_add(1, Ordering::SeqCst);
    if let Some(rejection) = check_auth(&state, &headers) {
        return rejection;
    }

    // track0002 has no analysis
    let features: Vec<Value> = requested_ids(&query)
        .iter()
        .map(|id| {
            if id == "track0002" {
                Value::Null
            } else {
                json!({
                    "id": id,
                    "danceability": 0.51234,
                    "energy": 0.8,
                    "acousticness": 0.1,
                    "instrumentalness": 0.0,
                    "tempo": 119.6,
                    "valence": 0.3
                })
            }
        })
        .collect();

    Json(json!({ "audio_features": features })).into_response()
}

async fn several_artists(
    State(state): State<Arc<MockSpotify>>,
    Query(query): Query<HashMap<String, String>>,
    headers: HeaderMap,
) -> Response {
    state.artist_calls.fetch_add(1, Ordering::SeqCst);
    if let Some(rejection) = check_auth(&state, &headers) {
        return rejection;
    }

    let artists: Vec<Value> = requested_ids(&query).iter().map(|id| artist_json(id)).collect();
    Json(json!({ "artists": artists })).into_response()
}

async fn artist(
    State(state): State<Arc<MockSpotify>>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Response {
    if let Some(rejection) = check_auth(&state, &headers) {
        return rejection;
    }
    if id == MISSING_ID {
        return upstream_error(StatusCode::NOT_FOUND, "Resource not found");
    }

    Json(artist_json(&id)).into_response()
}

async fn top_tracks(
    State(state): State<Arc<MockSpotify>>,
    Path(id): Path<String>,
    Query(query): Query<HashMap<String, String>>,
    headers: HeaderMap,
) -> Response {
    if let Some(rejection) = check_auth(&state, &headers) {
        return rejection;
    }
    if id == MISSING_ID {
        return upstream_error(StatusCode::NOT_FOUND, "Resource not found");
    }
    if !query.contains_key("market") {
        return upstream_error(StatusCode::BAD_REQUEST, "Missing market");
    }

    let tracks: Vec<Value> = (0..3).map(track_json).collect();
    Json(json!({ "tracks": tracks })).into_response()
}

async fn search(
    State(state): State<Arc<MockSpotify>>,
    Query(query): Query<HashMap<String, String>>,
    headers: HeaderMap,
) -> Response {
    if let Some(rejection) = check_auth(&state, &headers) {
        return rejection;
    }

    let q = query.get("q").cloned().unwrap_or_default();
    state
        .search_queries
        .lock()
        .expect("search query log")
        .push(q.clone());

    let items = if q.contains("cowpunk") {
        json!([
            { "id": "p-other", "name": "Cowpunk Mix", "owner": { "id": "someone" } },
            null,
            { "id": "p-spotify", "name": "Cowpunk Mix", "owner": { "id": "spotify" } },
            { "id": "p-everynoise", "name": "The Sound of Cowpunk", "owner": { "id": "thesoundsofspotify" } }
        ])
    } else {
        json!([])
    };

    Json(json!({ "playlists": { "items": items } })).into_response()
}
