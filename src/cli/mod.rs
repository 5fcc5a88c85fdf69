//! # CLI Module
//!
//! Terminal front-end of sporex. Each command connects its own catalog client
//! (or opens the local data files), shows a spinner while Spotify is queried and
//! renders the result as a table.
//!
//! ## Commands
//!
//! - [`serve`] - Runs the JSON web application
//! - [`playlist`] - Inspects a playlist and its enriched tracks
//! - [`genre`] - Finds the genre playlist of a source
//! - [`genres`] - Lists the known genres
//! - [`artist`] - Shows an artist profile or top tracks
//! - [`seed`] - Replaces the genre list with an Every Noise export
//!
//! ## Usage
//!
//! ```bash
//! sporex seed genres.json
//! sporex playlist https://open.spotify.com/playlist/37i9dQZF1EIgtiaACXv6tQ --open
//! sporex genre cowpunk --source thesoundsofspotify
//! sporex serve --addr 0.0.0.0:5000
//! ```
//!
//! Unrecoverable failures end the process through the `error!` macro; absent
//! catalog data is reported with `warning!` and the command returns normally.

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

use crate::{config, error, spotify::CatalogClient};

mod artists;
mod genres;
mod playlist;
mod serve;

pub use artists::artist;
pub use genres::{genre, genres, seed};
pub use playlist::playlist;
pub use serve::serve;

fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_style(
        ProgressStyle::with_template("{spinner:.blue} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
    );
    pb
}

/// Builds a catalog client from the environment and fetches its first token.
async fn connect_catalog() -> CatalogClient {
    let catalog_config = match config::catalog_config() {
        Ok(c) => c,
        Err(e) => error!("{}. Add it to your environment or .env file.", e),
    };

    let pb = spinner("Requesting access token...");
    let client = CatalogClient::connect(catalog_config).await;
    pb.finish_and_clear();

    match client {
        Ok(client) => client,
        Err(e) => error!("Cannot connect to Spotify. Err: {}", e),
    }
}
