use tracing::warn;

use crate::{
    types::{AudioFeatures, AudioFeaturesObject, AudioFeaturesResponse, Track},
    utils::round_to,
};

use super::{BATCH_SIZE, CatalogClient};

impl CatalogClient {
    /// Adds audio features to `tracks` and hands them back.
    ///
    /// Tracks whose lookup failed or came back null keep `audio_features`
    /// unset; the call itself never fails.
    pub async fn get_track_audio_features(&mut self, mut tracks: Vec<Track>) -> Vec<Track> {
        self.enrich_audio_features(&mut tracks).await;
        tracks
    }

    pub(crate) async fn enrich_audio_features(&mut self, tracks: &mut [Track]) {
        let url = self.api_url("/audio-features");

        for batch in tracks.chunks_mut(BATCH_SIZE) {
            let ids = batch
                .iter()
                .map(|track| track.id.as_str())
                .collect::<Vec<_>>()
                .join(",");

            match self
                .get_json::<AudioFeaturesResponse>(&url, &[("ids", &ids)])
                .await
            {
                Ok(response) => apply_audio_features(batch, response.audio_features),
                Err(e) => warn!(error = %e, "Audio feature lookup failed, leaving tracks unenriched"),
            }
        }
    }
}

/// Maps a batched audio-feature response onto `tracks` by position.
///
/// Entry `i` belongs to `tracks[i]`; a `None` entry clears that track's
/// features. Scores are rounded to 3 decimals and tempo to a whole number.
pub fn apply_audio_features(tracks: &mut [Track], features: Vec<Option<AudioFeaturesObject>>) {
    if features.len() != tracks.len() {
        warn!(
            expected = tracks.len(),
            received = features.len(),
            "Audio feature batch length mismatch"
        );
    }

    for (track, entry) in tracks.iter_mut().zip(features) {
        track.audio_features = entry.map(|f| AudioFeatures {
            danceability: round_to(f.danceability, 3),
            energy: round_to(f.energy, 3),
            acousticness: round_to(f.acousticness, 3),
            instrumentalness: round_to(f.instrumentalness, 3),
            tempo: f.tempo.round() as i64,
            positivity: round_to(f.valence, 3),
        });
    }
}
