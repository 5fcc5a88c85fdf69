use axum::{Extension, extract::Path, response::Json};

use crate::types::{ArtistProfile, Track};

use super::{AppState, Notice, require_spotify_id};

pub async fn artist(
    Path(artist_id): Path<String>,
    Extension(state): Extension<AppState>,
) -> Result<Json<ArtistProfile>, Notice> {
    require_spotify_id(&artist_id)?;

    let artist = {
        let mut catalog = state.catalog.lock().await;
        catalog.get_artist(&artist_id).await
    };

    artist
        .map(Json)
        .ok_or_else(|| Notice::not_found("Sorry, we couldn't find that artist."))
}

pub async fn artist_top_tracks(
    Path(artist_id): Path<String>,
    Extension(state): Extension<AppState>,
) -> Result<Json<Vec<Track>>, Notice> {
    require_spotify_id(&artist_id)?;

    let tracks = {
        let mut catalog = state.catalog.lock().await;
        catalog.get_artist_top_tracks(&artist_id).await
    };

    tracks
        .map(Json)
        .ok_or_else(|| Notice::not_found("Sorry, we couldn't load that artist's top tracks."))
}
