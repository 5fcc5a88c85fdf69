use tabled::Table;

use crate::{
    error, info, success,
    types::{Track, TrackTableRow},
    utils, warning,
};

use super::{connect_catalog, spinner};

pub async fn playlist(link: &str, open: bool) {
    let Some(playlist_id) = utils::parse_playlist_id(link) else {
        error!("'{}' is neither a playlist link nor a playlist id", link)
    };

    let mut client = connect_catalog().await;

    let pb = spinner("Fetching playlist...");
    let Some(playlist) = client.get_playlist_info(&playlist_id).await else {
        pb.finish_and_clear();
        error!("Playlist {} not found", playlist_id)
    };

    pb.set_message(format!("Fetching tracks of {}...", playlist.name));
    let tracks = client.get_playlist_tracks(&playlist_id).await;
    pb.finish_and_clear();

    let Some(tracks) = tracks else {
        warning!("Cannot load the tracks of {}", playlist.name);
        return;
    };

    success!("{} - {} tracks", playlist.name, tracks.len());
    print_tracks(&tracks);

    if open {
        info!("Opening {}", playlist.url());
        if let Err(e) = webbrowser::open(&playlist.url()) {
            warning!("Cannot open browser. Err: {}", e);
        }
    }
}

pub(super) fn print_tracks(tracks: &[Track]) {
    if tracks.is_empty() {
        return;
    }

    let rows: Vec<TrackTableRow> = tracks.iter().map(TrackTableRow::from).collect();
    println!("{}", Table::new(rows));
}
