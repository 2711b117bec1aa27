use tunevibe::analysis::AggregateResult;
use tunevibe::error::Error;
use tunevibe::spotify::playlists::{extract_playlist_id, playlist_url};
use tunevibe::spotify::recommendations::{MAX_SEED_TRACKS, RecommendationQuery};

// Helper function to create an aggregate with the given targets
fn create_test_aggregate(valence: f64, energy: f64, danceability: f64) -> AggregateResult {
    AggregateResult {
        valence,
        energy,
        danceability,
        norm_tempo: 0.5,
        norm_loudness: 0.5,
        acousticness: 0.1,
        instrumentalness: 0.0,
        mood_score: 0.5,
        avg_tempo: 120.0,
        avg_loudness: -6.0,
        track_count: 10,
    }
}

#[test]
fn test_extract_playlist_id_from_url() {
    let id = extract_playlist_id("https://open.spotify.com/playlist/37i9dQZF1DXcBWIGoYBM5M?si=abc123")
        .unwrap();
    assert_eq!(id, "37i9dQZF1DXcBWIGoYBM5M");

    let id = extract_playlist_id("https://open.spotify.com/playlist/37i9dQZF1DXcBWIGoYBM5M/").unwrap();
    assert_eq!(id, "37i9dQZF1DXcBWIGoYBM5M");

    let id = extract_playlist_id("https://open.spotify.com/playlist/37i9dQZF1DXcBWIGoYBM5M#top").unwrap();
    assert_eq!(id, "37i9dQZF1DXcBWIGoYBM5M");
}

#[test]
fn test_extract_playlist_id_from_uri_and_bare_id() {
    assert_eq!(
        extract_playlist_id("spotify:playlist:37i9dQZF1DXcBWIGoYBM5M").unwrap(),
        "37i9dQZF1DXcBWIGoYBM5M"
    );
    assert_eq!(
        extract_playlist_id("  37i9dQZF1DXcBWIGoYBM5M  ").unwrap(),
        "37i9dQZF1DXcBWIGoYBM5M"
    );
}

#[test]
fn test_extract_playlist_id_rejects_garbage() {
    for input in [
        "",
        "   ",
        "https://open.spotify.com/playlist/",
        "https://open.spotify.com/album/abc?x=1",
        "spotify:playlist:",
        "not an id",
    ] {
        assert!(
            matches!(extract_playlist_id(input), Err(Error::InvalidPlaylistUrl(_))),
            "expected rejection for {:?}",
            input
        );
    }
}

#[test]
fn test_playlist_url() {
    assert_eq!(playlist_url("abc123"), "https://open.spotify.com/playlist/abc123");
}

#[test]
fn test_recommendation_query_seeds_and_targets() {
    let seeds: Vec<String> = (0..8).map(|i| format!("seed{}", i)).collect();
    let query = RecommendationQuery::from_aggregate(&seeds, &create_test_aggregate(0.62, 0.81, 0.4), 20);

    assert_eq!(query.seed_tracks.len(), MAX_SEED_TRACKS);
    assert_eq!(query.seed_tracks[0], "seed0");
    assert_eq!(query.target_valence, 0.62);
    assert_eq!(query.limit, 20);

    let params = query.params();
    assert!(params.contains(&("seed_tracks", "seed0,seed1,seed2,seed3,seed4".to_string())));
    assert!(params.contains(&("target_valence", "0.620".to_string())));
    assert!(params.contains(&("target_energy", "0.810".to_string())));
    assert!(params.contains(&("target_danceability", "0.400".to_string())));
    assert!(params.contains(&("limit", "20".to_string())));
}

#[test]
fn test_recommendation_query_clamps_limit() {
    let result = create_test_aggregate(0.5, 0.5, 0.5);
    let seeds = vec!["a".to_string()];

    assert_eq!(RecommendationQuery::from_aggregate(&seeds, &result, 0).limit, 1);
    assert_eq!(RecommendationQuery::from_aggregate(&seeds, &result, 500).limit, 100);
}
