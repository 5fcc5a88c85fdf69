use rand::{Rng, distr::Alphanumeric};

use crate::types::GenreSource;

/// Length of a Spotify base62 id.
const SPOTIFY_ID_LEN: usize = 22;

/// Formats milliseconds as `minutes:seconds`, seconds zero-padded.
pub fn format_duration(ms: u64) -> String {
    let total_secs = ms / 1000;
    format!("{}:{:02}", total_secs / 60, total_secs % 60)
}

/// Rounds to the given number of decimal places.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

/// Builds the search query used to find a genre playlist of `source`.
pub fn genre_search_query(genre_title: &str, source: GenreSource) -> String {
    match source {
        GenreSource::Spotify => format!("{} mix", genre_title),
        GenreSource::TheSoundsOfSpotify => format!("the sound of {}", genre_title),
    }
}

/// Extracts the playlist id from a playlist link.
///
/// Accepts `https://open.spotify.com/playlist/<id>` (optionally with a locale
/// segment and a query string), `spotify:playlist:<id>` and a bare id.
pub fn parse_playlist_id(link: &str) -> Option<String> {
    let link = link.trim();

    let candidate = if let Some(rest) = link.strip_prefix("spotify:playlist:") {
        rest
    } else if link.contains("open.spotify.com/") {
        let (_, rest) = link.split_once("/playlist/")?;
        rest.split(['?', '#', '/']).next()?
    } else {
        link
    };

    is_spotify_id(candidate).then(|| candidate.to_string())
}

/// Whether `value` looks like a Spotify base62 id.
pub fn is_spotify_id(value: &str) -> bool {
    value.len() == SPOTIFY_ID_LEN && value.chars().all(|c| c.is_ascii_alphanumeric())
}

fn random_alphanumeric(len: usize) -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(len)
        .map(char::from)
        .collect()
}

/// Opaque token identifying a logged-in session.
pub fn generate_session_token() -> String {
    random_alphanumeric(64)
}

/// Hashes a password with bcrypt at the default cost. The salt is embedded in
/// the returned hash.
pub fn hash_password(password: &str) -> Result<String, bcrypt::BcryptError> {
    bcrypt::hash(password, bcrypt::DEFAULT_COST)
}

/// Checks `password` against a bcrypt hash. Malformed hashes never match.
pub fn verify_password(hash: &str, password: &str) -> bool {
    bcrypt::verify(password, hash).unwrap_or(false)
}
