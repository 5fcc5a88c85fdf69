use tracing::{debug, warn};

use crate::{
    error::CatalogError,
    types::{GenreSource, SearchPlaylist, SearchResponse},
    utils,
};

use super::CatalogClient;

const SEARCH_LIMIT: &str = "10";

impl CatalogClient {
    /// Finds the genre playlist curated by `source`.
    ///
    /// Searches for `"<genre> mix"` (Spotify) or `"the sound of <genre>"`
    /// (Every Noise) and returns the first result owned by the source whose
    /// lowercased name contains the genre title. This is a best-effort match:
    /// upstream result order breaks ties.
    pub async fn find_playlist_by_genre(
        &mut self,
        genre_title: &str,
        source: GenreSource,
    ) -> Option<String> {
        match self.search_genre_playlists(genre_title, source).await {
            Ok(items) => {
                let found = match_genre_playlist(&items, genre_title, source);
                if found.is_none() {
                    debug!(genre_title, %source, "No genre playlist matched");
                }
                found
            }
            Err(e) => {
                warn!(genre_title, %source, error = %e, "Genre playlist search failed");
                None
            }
        }
    }

    async fn search_genre_playlists(
        &mut self,
        genre_title: &str,
        source: GenreSource,
    ) -> Result<Vec<Option<SearchPlaylist>>, CatalogError> {
        let url = self.api_url("/search");
        let query = utils::genre_search_query(genre_title, source);
        let market = self.config.market.clone();

        let response: SearchResponse = self
            .get_json(
                &url,
                &[
                    ("q", &query),
                    ("type", "playlist"),
                    ("market", &market),
                    ("limit", SEARCH_LIMIT),
                ],
            )
            .await?;

        Ok(response.playlists.map(|p| p.items).unwrap_or_default())
    }
}

/// Picks the first search result owned by `source` whose lowercased name
/// contains the genre title. Null results are skipped.
pub fn match_genre_playlist(
    items: &[Option<SearchPlaylist>],
    genre_title: &str,
    source: GenreSource,
) -> Option<String> {
    let genre = genre_title.to_lowercase();

    items
        .iter()
        .flatten()
        .find(|playlist| {
            playlist.owner.id == source.as_str() && playlist.name.to_lowercase().contains(&genre)
        })
        .map(|playlist| playlist.id.clone())
}
