use axum::{
    Extension, Router,
    routing::{get, post},
};
use std::{net::SocketAddr, str::FromStr};
use tracing::info;

use crate::{Res, api};

/// Assembles the application router around `state`.
pub fn router(state: api::AppState) -> Router {
    Router::new()
        .route("/health", get(api::health))
        .route("/get-playlist", get(api::get_playlist))
        .route(
            "/playlist-inspector/{playlist_id}",
            get(api::playlist_inspector),
        )
        .route(
            "/get-playlist-tracks/{playlist_id}",
            get(api::playlist_tracks),
        )
        .route("/genres", get(api::list_genres))
        .route("/search-genre", get(api::search_genre))
        .route("/genre-inspector/{genre}", get(api::genre_inspector))
        .route("/artists/{artist_id}", get(api::artist))
        .route(
            "/artists/{artist_id}/top-tracks",
            get(api::artist_top_tracks),
        )
        .route("/signup", post(api::signup))
        .route("/login", post(api::login))
        .route("/logout", post(api::logout))
        .route("/users/{user_id}", get(api::user_profile))
        .route(
            "/users/update-genre-favorite-status",
            post(api::update_genre_favorite_status),
        )
        .layer(Extension(state))
}

/// Binds `addr` and serves the application until the process ends.
pub async fn start_api_server(state: api::AppState, addr: &str) -> Res<()> {
    let addr = SocketAddr::from_str(addr)
        .map_err(|e| format!("Failed to parse server address {}: {}", addr, e))?;

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(%addr, "Listening");
    axum::serve(listener, router(state)).await?;
    Ok(())
}
