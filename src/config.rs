//! Configuration management for the Spotify Explorer.
//!
//! This module handles loading and accessing configuration values from environment
//! variables and `.env` files. It provides a centralized way to manage application
//! configuration including Spotify API credentials, endpoint URLs, server settings
//! and the location of persisted data.
//!
//! The configuration system follows a hierarchical approach:
//! 1. Environment variables (highest priority)
//! 2. `.env` file in the local data directory
//! 3. Application defaults (where applicable)

use std::{env, path::PathBuf};

use crate::{error::CatalogError, spotify::CatalogConfig};

pub const DEFAULT_API_URL: &str = "https://api.spotify.com/v1";
pub const DEFAULT_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";
pub const DEFAULT_MARKET: &str = "US";
pub const DEFAULT_SERVER_ADDRESS: &str = "127.0.0.1:5000";

/// Loads environment variables from a `.env` file in the local data directory.
///
/// Creates the data directory if it doesn't exist. A missing `.env` file is not
/// an error: the process environment alone may carry the configuration. Values
/// already present in the environment are never overridden.
///
/// # Directory Structure
///
/// The function looks for the `.env` file in:
/// - Linux: `~/.local/share/sporex/.env`
/// - macOS: `~/Library/Application Support/sporex/.env`
/// - Windows: `%LOCALAPPDATA%/sporex/.env`
///
/// # Errors
///
/// Returns an error if the data directory cannot be created or an existing
/// `.env` file cannot be parsed.
pub async fn load_env() -> Result<(), String> {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("sporex/.env");
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent)
            .await
            .map_err(|e| e.to_string())?;
    }

    if path.is_file() {
        dotenv::from_path(&path).map_err(|e| e.to_string())?;
    }
    Ok(())
}

/// Returns the address the web application binds to.
///
/// Reads `SERVER_ADDRESS`, defaulting to `127.0.0.1:5000`.
pub fn server_addr() -> String {
    env::var("SERVER_ADDRESS").unwrap_or_else(|_| DEFAULT_SERVER_ADDRESS.to_string())
}

/// Returns the Spotify API client ID used for the client-credentials grant.
///
/// # Errors
///
/// Fails if `SPOTIFY_API_AUTH_CLIENT_ID` is not set.
pub fn spotify_client_id() -> Result<String, CatalogError> {
    env::var("SPOTIFY_API_AUTH_CLIENT_ID")
        .map_err(|_| CatalogError::MissingConfig("SPOTIFY_API_AUTH_CLIENT_ID"))
}

/// Returns the Spotify API client secret.
///
/// The client secret should be kept confidential and never exposed in logs.
///
/// # Errors
///
/// Fails if `SPOTIFY_API_AUTH_CLIENT_SECRET` is not set.
pub fn spotify_client_secret() -> Result<String, CatalogError> {
    env::var("SPOTIFY_API_AUTH_CLIENT_SECRET")
        .map_err(|_| CatalogError::MissingConfig("SPOTIFY_API_AUTH_CLIENT_SECRET"))
}

/// Returns the Spotify Web API base URL (`SPOTIFY_API_URL`).
pub fn spotify_apiurl() -> String {
    env::var("SPOTIFY_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string())
}

/// Returns the Spotify token endpoint (`SPOTIFY_API_TOKEN_URL`).
pub fn spotify_apitoken_url() -> String {
    env::var("SPOTIFY_API_TOKEN_URL").unwrap_or_else(|_| DEFAULT_TOKEN_URL.to_string())
}

/// Returns the market (ISO country code) used to scope catalog requests.
pub fn spotify_market() -> String {
    env::var("SPOTIFY_MARKET").unwrap_or_else(|_| DEFAULT_MARKET.to_string())
}

/// Returns the directory holding users, genres and preferences.
///
/// Reads `SPOREX_DATA_DIR`, defaulting to `sporex` inside the platform's local
/// data directory.
pub fn data_dir() -> PathBuf {
    match env::var("SPOREX_DATA_DIR") {
        Ok(dir) => PathBuf::from(dir),
        Err(_) => {
            let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
            path.push("sporex");
            path
        }
    }
}

/// Assembles the catalog client configuration from the environment.
///
/// # Errors
///
/// Fails if the client id or secret is missing.
pub fn catalog_config() -> Result<CatalogConfig, CatalogError> {
    Ok(CatalogConfig {
        api_url: spotify_apiurl(),
        token_url: spotify_apitoken_url(),
        client_id: spotify_client_id()?,
        client_secret: spotify_client_secret()?,
        market: spotify_market(),
    })
}
