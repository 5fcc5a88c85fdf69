use sporex::error::{ApiFailure, FailureKind, StoreError};
use sporex::spotify::{apply_artist_details, apply_audio_features, match_genre_playlist};
use sporex::types::{
    ArtistObject, AudioFeaturesObject, FavoriteStatus, Followers, GenreSource, PlaylistOwner,
    SearchPlaylist, Track, TrackTableRow,
};
use sporex::utils::*;

// Helper function to create a test track
fn create_test_track(id: &str, artist_id: Option<&str>) -> Track {
    Track {
        id: id.to_string(),
        name: format!("Track {}", id),
        popularity: Some(50),
        duration_ms: 185000,
        duration: None,
        is_playable: Some(true),
        preview_url: None,
        album: Some("Album".to_string()),
        artist_id: artist_id.map(str::to_string),
        artist_name: artist_id.map(|a| format!("Artist {}", a)),
        audio_features: None,
        artist_details: None,
    }
}

fn create_test_features(energy: f64, tempo: f64) -> AudioFeaturesObject {
    AudioFeaturesObject {
        danceability: 0.51234,
        energy,
        acousticness: 0.1,
        instrumentalness: 0.0,
        tempo,
        valence: 0.66666,
    }
}

fn create_test_artist(id: &str, followers: u64, genres: &[&str]) -> ArtistObject {
    ArtistObject {
        id: id.to_string(),
        name: format!("Artist {}", id),
        genres: genres.iter().map(|g| g.to_string()).collect(),
        popularity: Some(70),
        followers: Some(Followers {
            total: Some(followers),
        }),
        images: Vec::new(),
    }
}

fn create_search_playlist(id: &str, name: &str, owner: &str) -> Option<SearchPlaylist> {
    Some(SearchPlaylist {
        id: id.to_string(),
        name: name.to_string(),
        owner: PlaylistOwner {
            id: owner.to_string(),
        },
    })
}

#[test]
fn test_format_duration() {
    assert_eq!(format_duration(185000), "3:05");
    assert_eq!(format_duration(7000), "0:07");
    assert_eq!(format_duration(0), "0:00");
    assert_eq!(format_duration(600000), "10:00");

    // Leftover milliseconds are truncated
    assert_eq!(format_duration(59999), "0:59");
}

#[test]
fn test_round_to() {
    assert_eq!(round_to(0.51234, 3), 0.512);
    assert_eq!(round_to(0.6666, 3), 0.667);
    assert_eq!(round_to(119.6, 0), 120.0);
}

#[test]
fn test_genre_search_query() {
    assert_eq!(
        genre_search_query("cowpunk", GenreSource::Spotify),
        "cowpunk mix"
    );
    assert_eq!(
        genre_search_query("cowpunk", GenreSource::TheSoundsOfSpotify),
        "the sound of cowpunk"
    );
}

#[test]
fn test_parse_playlist_id() {
    let id = "37i9dQZF1EIgtiaACXv6tQ";

    assert_eq!(
        parse_playlist_id(&format!("https://open.spotify.com/playlist/{}", id)),
        Some(id.to_string())
    );
    assert_eq!(
        parse_playlist_id(&format!(
            "https://open.spotify.com/intl-de/playlist/{}?si=abc123",
            id
        )),
        Some(id.to_string())
    );
    assert_eq!(
        parse_playlist_id(&format!("spotify:playlist:{}", id)),
        Some(id.to_string())
    );
    assert_eq!(parse_playlist_id(&format!("  {}  ", id)), Some(id.to_string()));
}

#[test]
fn test_parse_playlist_id_rejects_malformed_links() {
    assert_eq!(parse_playlist_id(""), None);
    assert_eq!(parse_playlist_id("not a link"), None);
    assert_eq!(parse_playlist_id("37i9dQZF1EIgtia"), None);
    assert_eq!(
        parse_playlist_id("https://open.spotify.com/album/37i9dQZF1EIgtiaACXv6tQ"),
        None
    );
    assert_eq!(parse_playlist_id("https://open.spotify.com/playlist/"), None);
}

#[test]
fn test_generate_session_token() {
    let token = generate_session_token();

    assert_eq!(token.len(), 64);
    assert!(token.chars().all(|c| c.is_ascii_alphanumeric()));
    assert_ne!(token, generate_session_token());
}

#[test]
fn test_hash_password() {
    let hash = hash_password("secret123").unwrap();

    assert!(hash.starts_with("$2"));
    assert!(!hash.contains("secret123"));
    assert!(verify_password(&hash, "secret123"));
    assert!(!verify_password(&hash, "secret124"));

    // Salted: same password, different hash
    assert_ne!(hash, hash_password("secret123").unwrap());
}

#[test]
fn test_verify_password_rejects_malformed_hash() {
    assert!(!verify_password("plaintext", "plaintext"));
    assert!(!verify_password("", "secret123"));
}

#[test]
fn test_is_spotify_id() {
    assert!(is_spotify_id("37i9dQZF1EIgtiaACXv6tQ"));
    assert!(!is_spotify_id("../artists/0OdUWJ0sBjDr"));
    assert!(!is_spotify_id("37i9dQZF1EIgtiaACXv6t?"));
    assert!(!is_spotify_id("37i9dQZF1EIgtiaACXv6tQx"));
}

#[test]
fn test_genre_source() {
    assert_eq!("spotify".parse::<GenreSource>(), Ok(GenreSource::Spotify));
    assert_eq!(
        "TheSoundsOfSpotify".parse::<GenreSource>(),
        Ok(GenreSource::TheSoundsOfSpotify)
    );
    assert!("everynoise".parse::<GenreSource>().is_err());

    assert_eq!(GenreSource::default(), GenreSource::Spotify);
    assert_eq!(GenreSource::Spotify.other(), GenreSource::TheSoundsOfSpotify);
    assert_eq!(GenreSource::TheSoundsOfSpotify.to_string(), "thesoundsofspotify");
}

#[test]
fn test_favorite_status() {
    assert_eq!(
        "favorite".parse::<FavoriteStatus>().ok(),
        Some(FavoriteStatus::Favorite)
    );
    assert_eq!("save".parse::<FavoriteStatus>().ok(), Some(FavoriteStatus::Save));
    assert_eq!(
        "dislike".parse::<FavoriteStatus>().ok(),
        Some(FavoriteStatus::Dislike)
    );
    assert!(matches!(
        "love".parse::<FavoriteStatus>(),
        Err(StoreError::InvalidStatus(s)) if s == "love"
    ));
}

#[test]
fn test_classify_expired_token() {
    let body = r#"{"error": {"status": 401, "message": "The access token expired"}}"#;
    let failure = ApiFailure::classify(401, body.to_string());

    assert_eq!(failure.kind, FailureKind::TokenExpired);
    assert!(failure.is_token_expired());
    assert_eq!(failure.body, body);

    let invalid = r#"{"error": {"status": 401, "message": "Invalid access token"}}"#;
    assert!(ApiFailure::classify(401, invalid.to_string()).is_token_expired());
}

#[test]
fn test_classify_other_failures() {
    // Wrong status for an expiry message
    let body = r#"{"error": {"status": 400, "message": "The access token expired"}}"#;
    assert_eq!(
        ApiFailure::classify(400, body.to_string()).kind,
        FailureKind::Other
    );

    // 401 with another message
    let body = r#"{"error": {"status": 401, "message": "No token provided"}}"#;
    assert_eq!(
        ApiFailure::classify(401, body.to_string()).kind,
        FailureKind::Other
    );

    // Body that is not JSON
    assert_eq!(
        ApiFailure::classify(401, "Unauthorized".to_string()).kind,
        FailureKind::Other
    );
    assert_eq!(
        ApiFailure::classify(500, String::new()).kind,
        FailureKind::Other
    );
}

#[test]
fn test_apply_audio_features_with_null_entry() {
    let mut tracks: Vec<Track> = (0..4)
        .map(|i| create_test_track(&format!("t{}", i), Some("a")))
        .collect();

    let features = vec![
        Some(create_test_features(0.8, 120.4)),
        Some(create_test_features(0.5, 99.5)),
        None,
        Some(create_test_features(0.25, 140.0)),
    ];

    apply_audio_features(&mut tracks, features);

    assert!(tracks[0].audio_features.is_some());
    assert!(tracks[1].audio_features.is_some());
    assert!(tracks[2].audio_features.is_none());
    assert!(tracks[3].audio_features.is_some());

    let first = tracks[0].audio_features.as_ref().unwrap();
    assert_eq!(first.energy, 0.8);
    assert_eq!(first.tempo, 120);
    assert_eq!(first.danceability, 0.512);
    assert_eq!(first.positivity, 0.667);

    assert_eq!(tracks[1].audio_features.as_ref().unwrap().tempo, 100);
    assert_eq!(tracks[3].audio_features.as_ref().unwrap().energy, 0.25);
}

#[test]
fn test_apply_audio_features_short_response() {
    let mut tracks = vec![create_test_track("t0", None), create_test_track("t1", None)];

    apply_audio_features(&mut tracks, vec![Some(create_test_features(0.9, 90.0))]);

    assert!(tracks[0].audio_features.is_some());
    assert!(tracks[1].audio_features.is_none());
}

#[test]
fn test_apply_artist_details_maps_by_position() {
    let mut tracks = vec![
        create_test_track("t0", Some("x")),
        create_test_track("t1", None),
        create_test_track("t2", Some("y")),
        create_test_track("t3", Some("x")),
    ];

    let artists = vec![
        Some(create_test_artist("x", 1000, &["cowpunk", "alt-country"])),
        Some(create_test_artist("y", 25, &[])),
        None,
    ];

    apply_artist_details(&mut tracks, artists);

    let first = tracks[0].artist_details.as_ref().unwrap();
    assert_eq!(first.followers, Some(1000));
    assert_eq!(first.popularity, Some(70));
    assert_eq!(first.genres, vec!["cowpunk", "alt-country"]);

    // Tracks without an artist id are skipped, not counted
    assert!(tracks[1].artist_details.is_none());
    assert_eq!(tracks[2].artist_details.as_ref().unwrap().followers, Some(25));

    // Null entry for a repeated artist leaves that track bare
    assert!(tracks[3].artist_details.is_none());
}

#[test]
fn test_match_genre_playlist() {
    let items = vec![
        create_search_playlist("p1", "Cowpunk Mix", "someone"),
        None,
        create_search_playlist("p2", "Indie Mix", "spotify"),
        create_search_playlist("p3", "Cowpunk Mix", "spotify"),
        create_search_playlist("p4", "The Sound of Cowpunk", "thesoundsofspotify"),
    ];

    assert_eq!(
        match_genre_playlist(&items, "cowpunk", GenreSource::Spotify),
        Some("p3".to_string())
    );
    assert_eq!(
        match_genre_playlist(&items, "Cowpunk", GenreSource::TheSoundsOfSpotify),
        Some("p4".to_string())
    );
    assert_eq!(
        match_genre_playlist(&items, "vaporwave", GenreSource::Spotify),
        None
    );
    assert_eq!(match_genre_playlist(&[], "cowpunk", GenreSource::Spotify), None);
}

#[test]
fn test_track_table_row() {
    let mut track = create_test_track("t0", Some("x"));
    track.duration = Some(format_duration(track.duration_ms));
    apply_audio_features(
        std::slice::from_mut(&mut track),
        vec![Some(create_test_features(0.8, 120.0))],
    );

    let row = TrackTableRow::from(&track);

    assert_eq!(row.name, "Track t0");
    assert_eq!(row.artist, "Artist x");
    assert_eq!(row.duration, "3:05");
    assert_eq!(row.tempo, "120");
    assert_eq!(row.energy, "0.8");
    assert_eq!(row.genres, "");
}
