use tracing::warn;

use crate::{
    error::CatalogError,
    types::{
        ArtistDetails, ArtistObject, ArtistProfile, SeveralArtistsResponse, TopTracksResponse,
        Track,
    },
    utils,
};

use super::{BATCH_SIZE, CatalogClient};

impl CatalogClient {
    /// Adds primary-artist followers, popularity and genres to `tracks`.
    ///
    /// Artist ids are looked up in track order, duplicates included. Tracks
    /// without a primary artist id are skipped; the call never fails.
    pub async fn get_artist_details(&mut self, mut tracks: Vec<Track>) -> Vec<Track> {
        self.enrich_artist_details(&mut tracks).await;
        tracks
    }

    pub(crate) async fn enrich_artist_details(&mut self, tracks: &mut [Track]) {
        let url = self.api_url("/artists");

        for batch in tracks.chunks_mut(BATCH_SIZE) {
            let ids = artist_ids(batch);

            if ids.is_empty() {
                continue;
            }

            match self
                .get_json::<SeveralArtistsResponse>(&url, &[("ids", &ids)])
                .await
            {
                Ok(response) => apply_artist_details(batch, response.artists),
                Err(e) => warn!(error = %e, "Artist lookup failed, leaving tracks unenriched"),
            }
        }
    }

    /// Fetches one artist's full profile.
    pub async fn get_artist(&mut self, artist_id: &str) -> Option<ArtistProfile> {
        match self.fetch_artist(artist_id).await {
            Ok(artist) => Some(artist),
            Err(e) => {
                warn!(artist_id, error = %e, "Failed to fetch artist");
                None
            }
        }
    }

    async fn fetch_artist(&mut self, artist_id: &str) -> Result<ArtistProfile, CatalogError> {
        let url = self.api_url(&format!("/artists/{}", urlencoding::encode(artist_id)));
        let artist: ArtistObject = self.get_json(&url, &[]).await?;
        Ok(artist.into())
    }

    /// Fetches an artist's top tracks in the configured market, with album
    /// name and display duration filled in.
    pub async fn get_artist_top_tracks(&mut self, artist_id: &str) -> Option<Vec<Track>> {
        match self.fetch_artist_top_tracks(artist_id).await {
            Ok(tracks) => Some(tracks),
            Err(e) => {
                warn!(artist_id, error = %e, "Failed to fetch artist top tracks");
                None
            }
        }
    }

    async fn fetch_artist_top_tracks(&mut self, artist_id: &str) -> Result<Vec<Track>, CatalogError> {
        let url = self.api_url(&format!(
            "/artists/{}/top-tracks",
            urlencoding::encode(artist_id)
        ));
        let market = self.config.market.clone();

        let response: TopTracksResponse = self.get_json(&url, &[("market", &market)]).await?;

        Ok(response
            .tracks
            .into_iter()
            .filter_map(Track::from_object)
            .map(|mut track| {
                track.duration = Some(utils::format_duration(track.duration_ms));
                track
            })
            .collect())
    }
}

/// Indices of the tracks that carry a primary artist id, in track order.
fn artist_positions(tracks: &[Track]) -> Vec<usize> {
    tracks
        .iter()
        .enumerate()
        .filter(|(_, track)| track.artist_id.is_some())
        .map(|(i, _)| i)
        .collect()
}

fn artist_ids(tracks: &[Track]) -> String {
    artist_positions(tracks)
        .into_iter()
        .filter_map(|i| tracks[i].artist_id.as_deref())
        .collect::<Vec<_>>()
        .join(",")
}

/// Maps a batched artist response onto `tracks` by position.
///
/// Entry `i` belongs to the `i`-th track that has a primary artist id, the same
/// order the lookup ids were sent in. A `None` entry clears that track's
/// artist details.
pub fn apply_artist_details(tracks: &mut [Track], artists: Vec<Option<ArtistObject>>) {
    let positions = artist_positions(tracks);
    if artists.len() != positions.len() {
        warn!(
            expected = positions.len(),
            received = artists.len(),
            "Artist batch length mismatch"
        );
    }

    for (position, entry) in positions.into_iter().zip(artists) {
        tracks[position].artist_details = entry.map(|artist| ArtistDetails {
            followers: artist.followers.and_then(|f| f.total),
            popularity: artist.popularity,
            genres: artist.genres,
        });
    }
}
