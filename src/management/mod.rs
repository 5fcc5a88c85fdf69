//! File-backed persistence for users, genres and per-user genre preferences.
//!
//! Each manager keeps its collection in memory and writes it as one pretty
//! printed JSON document under the data directory on `persist()`. Callers
//! mutate first and persist afterwards.

mod genres;
mod preferences;
mod users;

pub use genres::GenreManager;
pub use preferences::PreferenceManager;
pub use users::UserManager;

use std::path::Path;

use serde::{Serialize, de::DeserializeOwned};

use crate::error::StoreError;

/// Reads a JSON array from `path`. A missing file is an empty collection.
async fn read_collection<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, StoreError> {
    if !path.is_file() {
        return Ok(Vec::new());
    }

    let content = async_fs::read_to_string(path).await?;
    Ok(serde_json::from_str(&content)?)
}

async fn write_collection<T: Serialize>(path: &Path, items: &[T]) -> Result<(), StoreError> {
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent).await?;
    }

    let json = serde_json::to_string_pretty(items)?;
    async_fs::write(path, json).await?;
    Ok(())
}
