use std::path::Path;

use tabled::Table;

use crate::{
    config, error, info,
    management::{GenreManager, PreferenceManager},
    success,
    types::{GenreSource, GenreTableRow},
    warning,
};

use super::{connect_catalog, spinner};

/// Looks up the genre playlist curated by `source` and prints its link.
pub async fn genre(title: &str, source: GenreSource) {
    let title = title.trim();
    if title.is_empty() {
        error!("Genre title must not be empty")
    }

    let mut client = connect_catalog().await;

    let pb = spinner(&format!("Searching {} playlists for {}...", source, title));
    let playlist_id = client.find_playlist_by_genre(title, source).await;
    pb.finish_and_clear();

    let Some(playlist_id) = playlist_id else {
        warning!(
            "No {} playlist found for {}. Try --source {}",
            source,
            title,
            source.other()
        );
        return;
    };

    match client.get_playlist_info(&playlist_id).await {
        Some(playlist) => {
            success!("{}", playlist.name);
            info!("{}", playlist.url());
        }
        None => success!("https://open.spotify.com/playlist/{}", playlist_id),
    }
}

/// Prints the known genres, optionally filtered by a title fragment.
pub async fn genres(search: Option<String>) {
    let manager = match GenreManager::load(config::data_dir()).await {
        Ok(m) => m,
        Err(e) => error!("Failed to load genres. Err: {}", e),
    };

    let term = search.map(|s| s.to_lowercase());
    let rows: Vec<GenreTableRow> = manager
        .all()
        .iter()
        .filter(|g| {
            term.as_deref()
                .is_none_or(|term| g.title.to_lowercase().contains(term))
        })
        .map(|g| GenreTableRow {
            id: g.id,
            title: g.title.clone(),
            energy: g.en_energy_score.map(|s| s.to_string()).unwrap_or_default(),
            popularity: g
                .en_popularity_score
                .map(|s| s.to_string())
                .unwrap_or_default(),
        })
        .collect();

    if rows.is_empty() {
        warning!("No genres found. Run sporex seed <file> first.");
        return;
    }

    println!("{}", Table::new(rows));
}

/// Replaces the stored genres with the entries of an Every Noise export.
pub async fn seed(file: &Path) {
    let seeds = match GenreManager::read_seed_file(file).await {
        Ok(seeds) => seeds,
        Err(e) => error!("Cannot read {}. Err: {}", file.display(), e),
    };

    let data_dir = config::data_dir();
    let mut manager = match GenreManager::load(&data_dir).await {
        Ok(m) => m,
        Err(e) => error!("Failed to load genres. Err: {}", e),
    };
    let mut preferences = match PreferenceManager::load(&data_dir).await {
        Ok(p) => p,
        Err(e) => error!("Failed to load preferences. Err: {}", e),
    };

    info!("Seeding {} genres from {}", seeds.len(), file.display());
    if let Err(e) = manager.seed(seeds).persist().await {
        error!("Failed to store genres. Err: {}", e);
    }

    let dropped = preferences.retain_genres(&manager.ids());
    if dropped > 0 {
        warning!("Dropped {} preferences of removed genres", dropped);
        if let Err(e) = preferences.persist().await {
            error!("Failed to store preferences. Err: {}", e);
        }
    }

    success!("Stored {} genres", manager.count());
}
