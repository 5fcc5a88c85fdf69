//! Spotify Explorer Library
//!
//! This library powers a small web application for inspecting Spotify
//! playlists and browsing playlists by genre. It wraps the Spotify Web API in a
//! token-owning catalog client, keeps users and their genre preferences in
//! JSON documents, and exposes everything through a JSON HTTP API and a CLI.
//!
//! # Modules
//!
//! - `api` - HTTP route handlers of the web application
//! - `cli` - Command-line interface implementations
//! - `config` - Configuration management and environment variables
//! - `error` - Error types of the catalog client and the persistence layer
//! - `management` - File-backed persistence for users, genres and preferences
//! - `server` - Router assembly and the HTTP server loop
//! - `spotify` - Spotify Web API catalog client
//! - `types` - Data structures and type definitions
//! - `utils` - Utility functions and helpers
//!
//! # Example
//!
//! ```
//! use sporex::{config, spotify::CatalogClient};
//!
//! #[tokio::main]
//! async fn main() -> sporex::Res<()> {
//!     config::load_env().await?;
//!     let mut client = CatalogClient::connect(config::catalog_config()?).await?;
//!     if let Some(info) = client.get_playlist_info("37i9dQZF1EIgtiaACXv6tQ").await {
//!         println!("{}", info.name);
//!     }
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod management;
pub mod server;
pub mod spotify;
pub mod types;
pub mod utils;

/// A convenient Result type alias for operations that may fail.
///
/// Used by the CLI and server plumbing where any error simply needs to be
/// reported. Library code returns the concrete errors from [`error`].
pub type Res<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Prints an informational message with a blue bullet point.
///
/// # Example
///
/// ```
/// info!("Fetching playlist {}", playlist_id);
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a success message with a green checkmark.
///
/// # Example
///
/// ```
/// success!("Found {} tracks", tracks.len());
/// ```
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error message with a red exclamation mark and exits the program.
///
/// Only meant for the CLI, where an unrecoverable error ends the command.
/// Library and server code log through `tracing` instead.
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a warning message with a yellow exclamation mark.
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
