use std::path::PathBuf;

use chrono::Utc;

use crate::{
    error::StoreError,
    types::{FavoriteStatus, GenreFacts, UserGenre},
};

use super::{read_collection, write_collection};

const PREFERENCES_FILE: &str = "user-genres.json";

/// Per-user genre preferences, at most one record per (user, genre).
pub struct PreferenceManager {
    root: PathBuf,
    records: Vec<UserGenre>,
}

impl PreferenceManager {
    pub async fn load(root: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let root = root.into();
        let records = read_collection(&root.join(PREFERENCES_FILE)).await?;
        Ok(Self { root, records })
    }

    pub async fn persist(&self) -> Result<(), StoreError> {
        write_collection(&self.path(), &self.records).await
    }

    /// Records a visit of `user_id` to `genre_id`.
    ///
    /// Returns what was known before this visit (`last_viewed` is `None` on the
    /// first one) and moves the last-viewed timestamp to now.
    pub fn view(&mut self, user_id: u64, genre_id: u64) -> GenreFacts {
        let now = Utc::now();

        if let Some(record) = self.find_mut(user_id, genre_id) {
            let facts = GenreFacts {
                last_viewed: Some(record.last_viewed),
                favorite_status: record.favorite_status,
            };
            record.last_viewed = now;
            return facts;
        }

        let id = self.next_id();
        self.records.push(UserGenre {
            id,
            user_id,
            genre_id,
            favorite_status: None,
            last_viewed: now,
        });

        GenreFacts {
            last_viewed: None,
            favorite_status: None,
        }
    }

    /// Sets (or clears) the favorite status, creating the record if needed.
    pub fn set_status(
        &mut self,
        user_id: u64,
        genre_id: u64,
        status: Option<FavoriteStatus>,
    ) -> &UserGenre {
        let index = match self
            .records
            .iter()
            .position(|r| r.user_id == user_id && r.genre_id == genre_id)
        {
            Some(index) => {
                self.records[index].favorite_status = status;
                index
            }
            None => {
                let id = self.next_id();
                self.records.push(UserGenre {
                    id,
                    user_id,
                    genre_id,
                    favorite_status: status,
                    last_viewed: Utc::now(),
                });
                self.records.len() - 1
            }
        };

        &self.records[index]
    }

    /// Drops every record whose genre is not in `genre_ids` and returns how
    /// many were dropped.
    pub fn retain_genres(&mut self, genre_ids: &[u64]) -> usize {
        let before = self.records.len();
        self.records.retain(|r| genre_ids.contains(&r.genre_id));
        before - self.records.len()
    }

    pub fn get(&self, user_id: u64, genre_id: u64) -> Option<&UserGenre> {
        self.records
            .iter()
            .find(|r| r.user_id == user_id && r.genre_id == genre_id)
    }

    /// Genre ids the user marked with `status`, in insertion order.
    pub fn genre_ids_with_status(&self, user_id: u64, status: FavoriteStatus) -> Vec<u64> {
        self.records
            .iter()
            .filter(|r| r.user_id == user_id && r.favorite_status == Some(status))
            .map(|r| r.genre_id)
            .collect()
    }

    fn find_mut(&mut self, user_id: u64, genre_id: u64) -> Option<&mut UserGenre> {
        self.records
            .iter_mut()
            .find(|r| r.user_id == user_id && r.genre_id == genre_id)
    }

    fn next_id(&self) -> u64 {
        self.records.iter().map(|r| r.id).max().unwrap_or(0) + 1
    }

    fn path(&self) -> PathBuf {
        self.root.join(PREFERENCES_FILE)
    }
}
