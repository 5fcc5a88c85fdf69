use crate::{error, info, success, warning};

use super::{connect_catalog, playlist::print_tracks, spinner};

pub async fn artist(artist_id: &str, top_tracks: bool) {
    let mut client = connect_catalog().await;

    let pb = spinner("Fetching artist...");
    let profile = client.get_artist(artist_id).await;
    pb.finish_and_clear();

    let Some(profile) = profile else {
        error!("Artist {} not found", artist_id)
    };

    success!("{}", profile.name);
    if let Some(followers) = profile.followers {
        info!("Followers: {}", followers);
    }
    if let Some(popularity) = profile.popularity {
        info!("Popularity: {}", popularity);
    }
    if !profile.genres.is_empty() {
        info!("Genres: {}", profile.genres.join(", "));
    }

    if !top_tracks {
        return;
    }

    let pb = spinner("Fetching top tracks...");
    let tracks = client.get_artist_top_tracks(artist_id).await;
    pb.finish_and_clear();

    match tracks {
        Some(tracks) if tracks.is_empty() => warning!("{} has no top tracks", profile.name),
        Some(tracks) => print_tracks(&tracks),
        None => warning!("Cannot load the top tracks of {}", profile.name),
    }
}
