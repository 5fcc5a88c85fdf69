use std::{fmt, str::FromStr};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tabled::Tabled;

use crate::error::StoreError;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AccessToken {
    pub access_token: String,
    #[serde(default)]
    pub token_type: String,
    #[serde(default)]
    pub expires_in: u64,
}

// Upstream payloads

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Image {
    pub url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistObject {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub images: Option<Vec<Image>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistTracksPage {
    #[serde(default)]
    pub items: Vec<PlaylistItem>,
    pub next: Option<String>,
    pub total: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistItem {
    pub track: Option<TrackObject>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackObject {
    pub id: Option<String>,
    pub name: String,
    pub popularity: Option<u32>,
    #[serde(default)]
    pub duration_ms: u64,
    pub is_playable: Option<bool>,
    pub preview_url: Option<String>,
    #[serde(default)]
    pub artists: Vec<SimpleArtist>,
    pub album: Option<SimpleAlbum>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimpleArtist {
    pub id: Option<String>,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimpleAlbum {
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AudioFeaturesResponse {
    #[serde(default)]
    pub audio_features: Vec<Option<AudioFeaturesObject>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AudioFeaturesObject {
    #[serde(default)]
    pub danceability: f64,
    #[serde(default)]
    pub energy: f64,
    #[serde(default)]
    pub acousticness: f64,
    #[serde(default)]
    pub instrumentalness: f64,
    #[serde(default)]
    pub tempo: f64,
    #[serde(default)]
    pub valence: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeveralArtistsResponse {
    #[serde(default)]
    pub artists: Vec<Option<ArtistObject>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtistObject {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub genres: Vec<String>,
    pub popularity: Option<u32>,
    pub followers: Option<Followers>,
    #[serde(default)]
    pub images: Vec<Image>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Followers {
    pub total: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopTracksResponse {
    #[serde(default)]
    pub tracks: Vec<TrackObject>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
    pub playlists: Option<SearchPlaylists>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchPlaylists {
    #[serde(default)]
    pub items: Vec<Option<SearchPlaylist>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchPlaylist {
    pub id: String,
    pub name: String,
    pub owner: PlaylistOwner,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistOwner {
    pub id: String,
}

// Records handed to callers

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlaylistInfo {
    pub id: String,
    pub name: String,
    pub image_url: Option<String>,
}

impl PlaylistInfo {
    /// Public link of the playlist in the Spotify web player.
    pub fn url(&self) -> String {
        format!("https://open.spotify.com/playlist/{}", self.id)
    }
}

impl From<PlaylistObject> for PlaylistInfo {
    fn from(playlist: PlaylistObject) -> Self {
        let image_url = playlist
            .images
            .and_then(|images| images.into_iter().next())
            .map(|image| image.url);

        Self {
            id: playlist.id,
            name: playlist.name,
            image_url,
        }
    }
}

/// A playlist or top-list track flattened into one record.
///
/// `audio_features` and `artist_details` are filled in after the track itself
/// was fetched and stay `None` when their lookup failed or came back null.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Track {
    pub id: String,
    pub name: String,
    pub popularity: Option<u32>,
    pub duration_ms: u64,
    pub duration: Option<String>,
    pub is_playable: Option<bool>,
    pub preview_url: Option<String>,
    pub album: Option<String>,
    pub artist_id: Option<String>,
    pub artist_name: Option<String>,
    pub audio_features: Option<AudioFeatures>,
    pub artist_details: Option<ArtistDetails>,
}

impl Track {
    /// Flattens an upstream track. Returns `None` for tracks without an id
    /// (local files, removed entries).
    pub fn from_object(track: TrackObject) -> Option<Self> {
        let id = track.id?;
        let primary = track.artists.into_iter().next();

        Some(Self {
            id,
            name: track.name,
            popularity: track.popularity,
            duration_ms: track.duration_ms,
            duration: None,
            is_playable: track.is_playable,
            preview_url: track.preview_url,
            album: track.album.map(|album| album.name),
            artist_id: primary.as_ref().and_then(|artist| artist.id.clone()),
            artist_name: primary.map(|artist| artist.name),
            audio_features: None,
            artist_details: None,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AudioFeatures {
    pub danceability: f64,
    pub energy: f64,
    pub acousticness: f64,
    pub instrumentalness: f64,
    pub tempo: i64,
    pub positivity: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ArtistDetails {
    pub followers: Option<u64>,
    pub popularity: Option<u32>,
    pub genres: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ArtistProfile {
    pub id: String,
    pub name: String,
    pub genres: Vec<String>,
    pub popularity: Option<u32>,
    pub followers: Option<u64>,
    pub image_url: Option<String>,
}

impl From<ArtistObject> for ArtistProfile {
    fn from(artist: ArtistObject) -> Self {
        Self {
            id: artist.id,
            name: artist.name,
            genres: artist.genres,
            popularity: artist.popularity,
            followers: artist.followers.and_then(|f| f.total),
            image_url: artist.images.into_iter().next().map(|image| image.url),
        }
    }
}

/// Which curator's genre playlist to look for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GenreSource {
    /// Spotify's official "<genre> Mix" playlists.
    #[default]
    Spotify,
    /// Every Noise's "The Sound of <genre>" playlists.
    TheSoundsOfSpotify,
}

impl GenreSource {
    /// The owner id of the source's playlists.
    pub fn as_str(&self) -> &'static str {
        match self {
            GenreSource::Spotify => "spotify",
            GenreSource::TheSoundsOfSpotify => "thesoundsofspotify",
        }
    }

    pub fn other(&self) -> Self {
        match self {
            GenreSource::Spotify => GenreSource::TheSoundsOfSpotify,
            GenreSource::TheSoundsOfSpotify => GenreSource::Spotify,
        }
    }
}

impl fmt::Display for GenreSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GenreSource {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "spotify" => Ok(GenreSource::Spotify),
            "thesoundsofspotify" => Ok(GenreSource::TheSoundsOfSpotify),
            other => Err(format!("Unknown genre source: {}", other)),
        }
    }
}

// Persisted records

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FavoriteStatus {
    Favorite,
    Save,
    Dislike,
}

impl FavoriteStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            FavoriteStatus::Favorite => "favorite",
            FavoriteStatus::Save => "save",
            FavoriteStatus::Dislike => "dislike",
        }
    }
}

impl FromStr for FavoriteStatus {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "favorite" => Ok(FavoriteStatus::Favorite),
            "save" => Ok(FavoriteStatus::Save),
            "dislike" => Ok(FavoriteStatus::Dislike),
            other => Err(StoreError::InvalidStatus(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct User {
    pub id: u64,
    pub email: String,
    pub username: String,
    pub password: String,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Genre {
    pub id: u64,
    pub title: String,
    pub spotify_playlist_id: Option<String>,
    pub en_playlist_id: Option<String>,
    pub en_energy_score: Option<i64>,
    pub en_dynamic_variation_score: Option<i64>,
    pub en_instrumentalness_score: Option<i64>,
    pub en_organic_mechanical_score: Option<i64>,
    pub en_dense_spiky_score: Option<i64>,
    pub en_popularity_score: Option<i64>,
}

/// One entry of an Every Noise genre export.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenreSeed {
    pub title: String,
    pub energy_score: Option<i64>,
    pub dynamic_variation_score: Option<i64>,
    pub instrumentalness_score: Option<i64>,
    pub organic_mechanical_score: Option<i64>,
    pub dense_spiky_score: Option<i64>,
    pub popularity_score: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserGenre {
    pub id: u64,
    pub user_id: u64,
    pub genre_id: u64,
    pub favorite_status: Option<FavoriteStatus>,
    pub last_viewed: DateTime<Utc>,
}

/// What a user saw of a genre before the current visit.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GenreFacts {
    /// `None` on the first visit.
    pub last_viewed: Option<DateTime<Utc>>,
    pub favorite_status: Option<FavoriteStatus>,
}

// Terminal tables

#[derive(Tabled)]
pub struct TrackTableRow {
    pub name: String,
    pub artist: String,
    pub album: String,
    pub duration: String,
    pub popularity: String,
    pub tempo: String,
    pub energy: String,
    pub genres: String,
}

impl From<&Track> for TrackTableRow {
    fn from(track: &Track) -> Self {
        let features = track.audio_features.as_ref();
        Self {
            name: track.name.clone(),
            artist: track.artist_name.clone().unwrap_or_default(),
            album: track.album.clone().unwrap_or_default(),
            duration: track.duration.clone().unwrap_or_default(),
            popularity: track
                .popularity
                .map(|p| p.to_string())
                .unwrap_or_default(),
            tempo: features.map(|f| f.tempo.to_string()).unwrap_or_default(),
            energy: features.map(|f| f.energy.to_string()).unwrap_or_default(),
            genres: track
                .artist_details
                .as_ref()
                .map(|d| d.genres.iter().take(3).cloned().collect::<Vec<_>>().join(","))
                .unwrap_or_default(),
        }
    }
}

#[derive(Tabled)]
pub struct GenreTableRow {
    pub id: u64,
    pub title: String,
    pub energy: String,
    pub popularity: String,
}
