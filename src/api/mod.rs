//! # API Module
//!
//! HTTP route handlers of the Spotify Explorer web application. Every handler
//! answers with JSON.
//!
//! ## Endpoints
//!
//! ### Playlists
//!
//! - [`get_playlist`] - Turns a pasted playlist link into a redirect to the inspector
//! - [`playlist_inspector`] - Playlist name, cover and public link
//! - [`playlist_tracks`] - Enriched track list of a playlist
//!
//! ### Genres
//!
//! - [`list_genres`] - All known genres
//! - [`search_genre`] - Redirects a known genre title to its inspector
//! - [`genre_inspector`] - Genre playlist of a source, plus the visitor's history with the genre
//!
//! ### Artists
//!
//! - [`artist`] - Artist profile
//! - [`artist_top_tracks`] - Top tracks of an artist
//!
//! ### Accounts
//!
//! - [`signup`], [`login`], [`logout`] - Session lifecycle
//! - [`user_profile`] - Own profile with favorite, saved and disliked genres
//! - [`update_genre_favorite_status`] - Marks a genre as favorite, saved or disliked
//!
//! ### Monitoring
//!
//! - [`health`] - Status and version
//!
//! ## Error Responses
//!
//! Nothing the catalog client cannot find is fatal: the handler answers with a
//! [`Notice`], a `{"message": ...}` body with a 4xx status, and the caller
//! decides where to go next.
//!
//! ## Sessions
//!
//! `signup` and `login` hand out an opaque session token. Requests carry it as
//! `Authorization: Bearer <token>`; sessions live in memory only.

mod artists;
mod genres;
mod health;
mod playlists;
mod state;
mod users;

pub use artists::{artist, artist_top_tracks};
pub use genres::{genre_inspector, list_genres, search_genre};
pub use health::health;
pub use playlists::{get_playlist, playlist_inspector, playlist_tracks};
pub use state::AppState;
pub use users::{login, logout, signup, update_genre_favorite_status, user_profile};

use axum::{
    http::{HeaderMap, StatusCode, header::AUTHORIZATION},
    response::{IntoResponse, Json, Response},
};
use serde_json::json;

use crate::utils;

pub const LOGIN_REQUIRED: &str = "Whoops, you need to log in to view that page.";
pub const INVALID_ID: &str = "That doesn't look like a Spotify id.";

/// A user-facing message with a status code.
#[derive(Debug, Clone)]
pub struct Notice {
    pub status: StatusCode,
    pub message: String,
}

impl Notice {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn login_required() -> Self {
        Self::new(StatusCode::UNAUTHORIZED, LOGIN_REQUIRED)
    }

    pub fn internal() -> Self {
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            "Something went wrong. Please try again.",
        )
    }
}

impl IntoResponse for Notice {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "message": self.message }))).into_response()
    }
}

/// Rejects path ids that are not Spotify base62 ids before they reach the
/// catalog client.
fn require_spotify_id(id: &str) -> Result<(), Notice> {
    if utils::is_spotify_id(id) {
        Ok(())
    } else {
        Err(Notice::bad_request(INVALID_ID))
    }
}

/// Extracts the session token from `Authorization: Bearer <token>`.
fn session_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

/// The id of the logged-in user, if the request carries a live session.
async fn current_user(state: &AppState, headers: &HeaderMap) -> Option<u64> {
    let token = session_token(headers)?;
    state.sessions.lock().await.get(token).copied()
}
