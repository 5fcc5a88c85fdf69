//! # Spotify Catalog Client
//!
//! This module wraps the Spotify Web API behind [`CatalogClient`], a stateful
//! façade that owns the app-level bearer token, pages through large playlists
//! and enriches raw tracks with audio-feature and artist data.
//!
//! ## Architecture
//!
//! ```text
//! Web layer / CLI
//!          ↓
//! CatalogClient
//!     ├── auth       (client-credentials token, bearer header)
//!     ├── playlists  (playlist info, cursor-paginated tracks)
//!     ├── tracks     (batched audio-feature enrichment)
//!     ├── artists    (batched artist enrichment, profile, top tracks)
//!     └── search     (genre playlist lookup)
//!          ↓
//! HTTP Layer (reqwest, JSON)
//!          ↓
//! Spotify Web API
//! ```
//!
//! ## Failure Handling
//!
//! Every response outside `{200, 201, 202, 204}` is classified once into an
//! [`ApiFailure`](crate::error::ApiFailure). A 401 carrying a token-expiry
//! message triggers exactly one token refresh and one retry of the identical
//! request; every other failure is terminal. There is no backoff and 429 is
//! not treated specially.
//!
//! The public catalog operations return `Option`: an upstream failure and an
//! empty result both mean "nothing to show", and the diagnostic detail goes to
//! the log instead of the caller.
//!
//! ## Batched Lookups
//!
//! Audio-feature and artist lookups take comma-joined ids and answer with an
//! array whose element `i` belongs to the id at position `i`, with `null` for
//! ids upstream does not know. Results are mapped back by position, never by
//! id.
//!
//! ## Thread Safety
//!
//! Refreshing the token needs `&mut self` and the client carries no lock of its
//! own. Callers that share one client wrap it in their own synchronization; the
//! web layer uses `Arc<tokio::sync::Mutex<CatalogClient>>`.

pub mod artists;
pub mod auth;
pub mod playlists;
pub mod search;
pub mod tracks;

pub use artists::apply_artist_details;
pub use search::match_genre_playlist;
pub use tracks::apply_audio_features;

use reqwest::{Client, header::AUTHORIZATION};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::{
    error::{ApiFailure, CatalogError, SUCCESS_STATUSES},
    types::AccessToken,
};

/// Largest number of ids sent in one batched lookup. Matches the playlist
/// page size so one page needs one lookup per enrichment.
pub(crate) const BATCH_SIZE: usize = 50;

/// Endpoints, credentials and market of a [`CatalogClient`].
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    /// Base URL of the Web API, e.g. `https://api.spotify.com/v1`.
    pub api_url: String,
    /// Token endpoint of the accounts service.
    pub token_url: String,
    pub client_id: String,
    pub client_secret: String,
    /// ISO country code catalog requests are scoped to.
    pub market: String,
}

/// Outcome of a single HTTP exchange.
enum Attempt {
    Success(String),
    Failed(ApiFailure),
}

#[derive(Debug)]
pub struct CatalogClient {
    http: Client,
    config: CatalogConfig,
    token: Option<AccessToken>,
    authorization: Option<String>,
}

impl CatalogClient {
    /// Creates a client without a token.
    ///
    /// # Errors
    ///
    /// Fails with [`CatalogError::EmptyCredentials`] if the client id or secret
    /// is blank, or if the HTTP client cannot be built.
    pub fn new(config: CatalogConfig) -> Result<Self, CatalogError> {
        if config.client_id.trim().is_empty() || config.client_secret.trim().is_empty() {
            return Err(CatalogError::EmptyCredentials);
        }

        let http = Client::builder()
            .user_agent(concat!(
                env!("CARGO_PKG_NAME"),
                "/",
                env!("CARGO_PKG_VERSION")
            ))
            .build()?;

        Ok(Self {
            http,
            config,
            token: None,
            authorization: None,
        })
    }

    /// Creates a client and acquires its first token.
    pub async fn connect(config: CatalogConfig) -> Result<Self, CatalogError> {
        let mut client = Self::new(config)?;
        client.acquire_token().await?;
        Ok(client)
    }

    /// The token currently held, if one was ever acquired.
    pub fn token(&self) -> Option<&AccessToken> {
        self.token.as_ref()
    }

    pub fn market(&self) -> &str {
        &self.config.market
    }

    fn api_url(&self, path: &str) -> String {
        format!("{}{}", self.config.api_url.trim_end_matches('/'), path)
    }

    async fn send_get(&self, url: &str, query: &[(&str, &str)]) -> Result<Attempt, CatalogError> {
        debug!("GET {} with params: {:?}", url, query);

        let mut request = self.http.get(url);
        if !query.is_empty() {
            request = request.query(query);
        }
        if let Some(authorization) = &self.authorization {
            request = request.header(AUTHORIZATION, authorization);
        }

        let response = request.send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;

        if SUCCESS_STATUSES.contains(&status) {
            Ok(Attempt::Success(body))
        } else {
            Ok(Attempt::Failed(ApiFailure::classify(status, body)))
        }
    }

    /// GETs `url` and decodes the JSON body.
    ///
    /// An expired token is refreshed once and the identical request is issued
    /// again; the second answer is final.
    async fn get_json<T: DeserializeOwned>(
        &mut self,
        url: &str,
        query: &[(&str, &str)],
    ) -> Result<T, CatalogError> {
        let body = match self.send_get(url, query).await? {
            Attempt::Success(body) => body,
            Attempt::Failed(failure) if failure.is_token_expired() => {
                debug!("Token expired while requesting {}, refreshing", url);
                self.acquire_token().await?;
                match self.send_get(url, query).await? {
                    Attempt::Success(body) => body,
                    Attempt::Failed(failure) => return Err(CatalogError::Upstream(failure)),
                }
            }
            Attempt::Failed(failure) => return Err(CatalogError::Upstream(failure)),
        };

        Ok(serde_json::from_str(&body)?)
    }
}
