use std::path::{Path, PathBuf};

use crate::{
    error::StoreError,
    types::{Genre, GenreSeed},
};

use super::{read_collection, write_collection};

const GENRES_FILE: &str = "genres.json";

pub struct GenreManager {
    root: PathBuf,
    genres: Vec<Genre>,
}

impl GenreManager {
    pub async fn load(root: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let root = root.into();
        let genres = read_collection(&root.join(GENRES_FILE)).await?;
        Ok(Self { root, genres })
    }

    pub async fn persist(&self) -> Result<(), StoreError> {
        write_collection(&self.path(), &self.genres).await
    }

    /// Reads an Every Noise genre export (a JSON array of [`GenreSeed`]).
    pub async fn read_seed_file(path: &Path) -> Result<Vec<GenreSeed>, StoreError> {
        let content = async_fs::read_to_string(path).await?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Replaces all genres with `seeds`, sorted by title. Duplicate titles
    /// keep their first occurrence.
    ///
    /// Titles already stored keep their id and playlist ids; new titles get
    /// ids above every id handed out before, so a removed genre's id is never
    /// reused. Callers drop preferences of removed genres through
    /// [`PreferenceManager::retain_genres`](super::PreferenceManager::retain_genres).
    pub fn seed(&mut self, seeds: Vec<GenreSeed>) -> &mut Self {
        let mut last_id = self.genres.iter().map(|g| g.id).max().unwrap_or(0);
        let mut genres: Vec<Genre> = Vec::with_capacity(seeds.len());

        for seed in seeds {
            let title = seed.title.trim().to_string();
            if title.is_empty() || genres.iter().any(|g| g.title.eq_ignore_ascii_case(&title)) {
                continue;
            }

            let existing = self.find_by_title(&title);
            let id = match existing {
                Some(genre) => genre.id,
                None => {
                    last_id += 1;
                    last_id
                }
            };

            genres.push(Genre {
                id,
                title,
                spotify_playlist_id: existing.and_then(|g| g.spotify_playlist_id.clone()),
                en_playlist_id: existing.and_then(|g| g.en_playlist_id.clone()),
                en_energy_score: seed.energy_score,
                en_dynamic_variation_score: seed.dynamic_variation_score,
                en_instrumentalness_score: seed.instrumentalness_score,
                en_organic_mechanical_score: seed.organic_mechanical_score,
                en_dense_spiky_score: seed.dense_spiky_score,
                en_popularity_score: seed.popularity_score,
            });
        }

        genres.sort_by(|a, b| a.title.to_lowercase().cmp(&b.title.to_lowercase()));
        self.genres = genres;
        self
    }

    /// Ids of all stored genres.
    pub fn ids(&self) -> Vec<u64> {
        self.genres.iter().map(|g| g.id).collect()
    }

    pub fn all(&self) -> &[Genre] {
        &self.genres
    }

    pub fn get(&self, genre_id: u64) -> Option<&Genre> {
        self.genres.iter().find(|g| g.id == genre_id)
    }

    pub fn find_by_title(&self, title: &str) -> Option<&Genre> {
        let title = title.trim();
        self.genres.iter().find(|g| g.title.eq_ignore_ascii_case(title))
    }

    pub fn count(&self) -> usize {
        self.genres.len()
    }

    fn path(&self) -> PathBuf {
        self.root.join(GENRES_FILE)
    }
}
