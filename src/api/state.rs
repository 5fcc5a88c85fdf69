use std::{collections::HashMap, path::Path, sync::Arc};

use tokio::sync::Mutex;

use crate::{
    error::StoreError,
    management::{GenreManager, PreferenceManager, UserManager},
    spotify::CatalogClient,
};

/// Everything the handlers share.
///
/// The catalog client sits behind one lock, so catalog operations from
/// concurrent requests run one after another and a token refresh never
/// overlaps another request on the same client.
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<Mutex<CatalogClient>>,
    pub users: Arc<Mutex<UserManager>>,
    pub genres: Arc<Mutex<GenreManager>>,
    pub preferences: Arc<Mutex<PreferenceManager>>,
    /// Session token to user id.
    pub sessions: Arc<Mutex<HashMap<String, u64>>>,
}

impl AppState {
    pub fn new(
        catalog: CatalogClient,
        users: UserManager,
        genres: GenreManager,
        preferences: PreferenceManager,
    ) -> Self {
        Self {
            catalog: Arc::new(Mutex::new(catalog)),
            users: Arc::new(Mutex::new(users)),
            genres: Arc::new(Mutex::new(genres)),
            preferences: Arc::new(Mutex::new(preferences)),
            sessions: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Loads the persisted collections from `data_dir`.
    pub async fn load(catalog: CatalogClient, data_dir: &Path) -> Result<Self, StoreError> {
        let users = UserManager::load(data_dir).await?;
        let genres = GenreManager::load(data_dir).await?;
        let preferences = PreferenceManager::load(data_dir).await?;
        Ok(Self::new(catalog, users, genres, preferences))
    }
}
