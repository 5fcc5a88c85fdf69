use tracing::{debug, warn};

use crate::{
    error::CatalogError,
    types::{PlaylistInfo, PlaylistObject, PlaylistTracksPage, Track},
    utils,
};

use super::CatalogClient;

/// Tracks requested per page.
pub const PAGE_SIZE: usize = 50;

/// Upper bound on pages followed for one playlist (1000 tracks).
pub const MAX_PAGES: usize = 20;

const PLAYLIST_FIELDS: &str = "id,name,images";
const TRACK_FIELDS: &str = "next,offset,total,items(track(id,name,popularity,duration_ms,is_playable,preview_url,type,artists(id,name),album(name)))";

impl CatalogClient {
    /// Fetches id, name and cover image of a playlist.
    ///
    /// Returns `None` if the playlist cannot be fetched, including after a
    /// refresh-and-retry for an expired token.
    pub async fn get_playlist_info(&mut self, playlist_id: &str) -> Option<PlaylistInfo> {
        match self.fetch_playlist_info(playlist_id).await {
            Ok(info) => Some(info),
            Err(e) => {
                warn!(playlist_id, error = %e, "Failed to fetch playlist info");
                None
            }
        }
    }

    async fn fetch_playlist_info(&mut self, playlist_id: &str) -> Result<PlaylistInfo, CatalogError> {
        let url = self.api_url(&format!(
            "/playlists/{}",
            urlencoding::encode(playlist_id)
        ));
        let market = self.config.market.clone();

        let playlist: PlaylistObject = self
            .get_json(&url, &[("fields", PLAYLIST_FIELDS), ("market", &market)])
            .await?;

        Ok(playlist.into())
    }

    /// Fetches every track of a playlist, enriched with audio features and
    /// primary-artist details, in playlist order.
    ///
    /// Pages of [`PAGE_SIZE`] tracks are followed through the upstream `next`
    /// cursor, at most [`MAX_PAGES`] of them. A page that fails terminally
    /// discards the tracks of earlier pages and yields `None`.
    pub async fn get_playlist_tracks(&mut self, playlist_id: &str) -> Option<Vec<Track>> {
        match self.fetch_playlist_tracks(playlist_id).await {
            Ok(tracks) => Some(tracks),
            Err(e) => {
                warn!(playlist_id, error = %e, "Failed to fetch playlist tracks");
                None
            }
        }
    }

    async fn fetch_playlist_tracks(&mut self, playlist_id: &str) -> Result<Vec<Track>, CatalogError> {
        let market = self.config.market.clone();
        let limit = PAGE_SIZE.to_string();

        let mut tracks: Vec<Track> = Vec::new();
        let mut next = Some(self.api_url(&format!(
            "/playlists/{}/tracks",
            urlencoding::encode(playlist_id)
        )));
        let mut pages = 0;

        while let Some(url) = next.take() {
            if pages == MAX_PAGES {
                warn!(playlist_id, "Playlist exceeds {} pages, stopping", MAX_PAGES);
                break;
            }

            // cursor urls already carry every parameter
            let page: PlaylistTracksPage = if pages == 0 {
                self.get_json(
                    &url,
                    &[
                        ("fields", TRACK_FIELDS),
                        ("market", &market),
                        ("limit", &limit),
                        ("offset", "0"),
                    ],
                )
                .await?
            } else {
                self.get_json(&url, &[]).await?
            };
            pages += 1;

            let mut batch: Vec<Track> = page
                .items
                .into_iter()
                .filter_map(|item| item.track)
                .filter_map(Track::from_object)
                .collect();
            debug!(playlist_id, page = pages, tracks = batch.len(), "Fetched playlist page");

            self.enrich_audio_features(&mut batch).await;
            self.enrich_artist_details(&mut batch).await;

            tracks.extend(batch);
            next = page.next;
        }

        for track in &mut tracks {
            track.duration = Some(utils::format_duration(track.duration_ms));
        }

        Ok(tracks)
    }
}
