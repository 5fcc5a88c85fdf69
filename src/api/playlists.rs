use axum::{
    Extension,
    extract::{Path, Query},
    response::{IntoResponse, Json, Redirect, Response},
};
use serde::{Deserialize, Serialize};

use crate::{
    types::{PlaylistInfo, Track},
    utils,
};

use super::{AppState, Notice, require_spotify_id};

const INVALID_LINK: &str =
    "That doesn't look like a playlist link. Try one like https://open.spotify.com/playlist/...";

#[derive(Debug, Deserialize)]
pub struct PlaylistLinkQuery {
    pub playlist_link: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct PlaylistView {
    pub playlist: PlaylistInfo,
    pub url: String,
}

pub async fn get_playlist(Query(query): Query<PlaylistLinkQuery>) -> Response {
    match query.playlist_link.as_deref().and_then(utils::parse_playlist_id) {
        Some(playlist_id) => {
            Redirect::to(&format!("/playlist-inspector/{}", playlist_id)).into_response()
        }
        None => Notice::bad_request(INVALID_LINK).into_response(),
    }
}

pub async fn playlist_inspector(
    Path(playlist_id): Path<String>,
    Extension(state): Extension<AppState>,
) -> Result<Json<PlaylistView>, Notice> {
    require_spotify_id(&playlist_id)?;

    let playlist = {
        let mut catalog = state.catalog.lock().await;
        catalog.get_playlist_info(&playlist_id).await
    };

    match playlist {
        Some(playlist) => Ok(Json(PlaylistView {
            url: playlist.url(),
            playlist,
        })),
        None => Err(Notice::not_found(
            "Sorry, we couldn't find that playlist. It may be private or removed.",
        )),
    }
}

pub async fn playlist_tracks(
    Path(playlist_id): Path<String>,
    Extension(state): Extension<AppState>,
) -> Result<Json<Vec<Track>>, Notice> {
    require_spotify_id(&playlist_id)?;

    let tracks = {
        let mut catalog = state.catalog.lock().await;
        catalog.get_playlist_tracks(&playlist_id).await
    };

    tracks
        .map(Json)
        .ok_or_else(|| Notice::not_found("Sorry, we couldn't load the tracks of that playlist."))
}
