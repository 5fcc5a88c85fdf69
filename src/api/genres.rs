use axum::{
    Extension,
    extract::{Path, Query},
    http::HeaderMap,
    response::{IntoResponse, Json, Redirect, Response},
};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::types::{Genre, GenreFacts, GenreSource, PlaylistInfo};

use super::{AppState, Notice, current_user};

#[derive(Debug, Deserialize)]
pub struct GenreSearchQuery {
    pub genre: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SourceQuery {
    pub source: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct GenreView {
    pub genre: String,
    pub source: GenreSource,
    pub playlist: PlaylistInfo,
    pub url: String,
    /// Inspector link of the same genre from the other source.
    pub alternate_source_url: String,
    /// Only for logged-in visitors of a known genre.
    pub facts: Option<GenreFacts>,
}

fn inspector_path(genre: &str, source: GenreSource) -> String {
    format!(
        "/genre-inspector/{}?source={}",
        urlencoding::encode(genre),
        source
    )
}

pub async fn list_genres(Extension(state): Extension<AppState>) -> Json<Vec<Genre>> {
    Json(state.genres.lock().await.all().to_vec())
}

pub async fn search_genre(
    Query(query): Query<GenreSearchQuery>,
    Extension(state): Extension<AppState>,
) -> Response {
    let Some(title) = query.genre.filter(|g| !g.trim().is_empty()) else {
        return Notice::bad_request("Please enter a genre to search for.").into_response();
    };

    let genre = state
        .genres
        .lock()
        .await
        .find_by_title(&title)
        .map(|g| g.title.clone());

    match genre {
        Some(genre) => Redirect::to(&inspector_path(&genre, GenreSource::Spotify)).into_response(),
        None => Notice::not_found(format!("Sorry, we don't know the genre '{}'.", title.trim()))
            .into_response(),
    }
}

pub async fn genre_inspector(
    Path(genre): Path<String>,
    Query(query): Query<SourceQuery>,
    headers: HeaderMap,
    Extension(state): Extension<AppState>,
) -> Result<Json<GenreView>, Notice> {
    let source = match query.source.as_deref() {
        Some(source) => source.parse::<GenreSource>().map_err(Notice::bad_request)?,
        None => GenreSource::default(),
    };

    let playlist = {
        let mut catalog = state.catalog.lock().await;
        match catalog.find_playlist_by_genre(&genre, source).await {
            Some(playlist_id) => catalog.get_playlist_info(&playlist_id).await,
            None => None,
        }
    };

    let Some(playlist) = playlist else {
        return Err(Notice::not_found(format!(
            "Sorry, no {} playlist found for '{}'.",
            source, genre
        )));
    };

    let facts = match current_user(&state, &headers).await {
        Some(user_id) => visit_genre(&state, user_id, &genre).await,
        None => None,
    };

    Ok(Json(GenreView {
        alternate_source_url: inspector_path(&genre, source.other()),
        url: playlist.url(),
        genre,
        source,
        playlist,
        facts,
    }))
}

/// Records the visit of a known genre and returns what was known before it.
async fn visit_genre(state: &AppState, user_id: u64, title: &str) -> Option<GenreFacts> {
    let genre_id = state.genres.lock().await.find_by_title(title).map(|g| g.id)?;

    let mut preferences = state.preferences.lock().await;
    let facts = preferences.view(user_id, genre_id);
    if let Err(e) = preferences.persist().await {
        warn!(user_id, genre_id, error = %e, "Failed to persist genre visit");
    }

    Some(facts)
}
