use tunevibe::analysis::{BubblePoint, aggregate, to_chart_data};
use tunevibe::types::{AudioFeatures, TrackArtist, TrackAudioFeatureItem, TrackInfo};
use tunevibe::utils::*;

// Helper function to create a test track with optional features
fn create_test_item(name: &str, artists: &[&str], danceability: Option<f64>) -> TrackAudioFeatureItem {
    let id = name.to_lowercase().replace(' ', "");
    TrackAudioFeatureItem {
        track: TrackInfo {
            id: Some(id.clone()),
            name: name.to_string(),
            artists: artists
                .iter()
                .map(|a| TrackArtist {
                    name: a.to_string(),
                })
                .collect(),
            popularity: 42,
        },
        audio_features: danceability.map(|d| AudioFeatures {
            id,
            danceability: d,
            energy: 0.5,
            valence: 0.25,
            tempo: 100.0,
            loudness: -8.0,
            acousticness: 0.3,
            instrumentalness: 0.0,
            liveness: 0.2,
            speechiness: 0.04,
        }),
    }
}

#[test]
fn test_generate_code_verifier() {
    let verifier = generate_code_verifier();

    // Should be exactly 128 characters
    assert_eq!(verifier.len(), PKCE_VERIFIER_LENGTH);

    // Should contain only alphanumeric characters
    assert!(verifier.chars().all(|c| c.is_ascii_alphanumeric()));

    // Two generated verifiers should be different
    let verifier2 = generate_code_verifier();
    assert_ne!(verifier, verifier2);
}

#[test]
fn test_generate_code_challenge() {
    let verifier = "test_verifier_123";
    let challenge = generate_code_challenge(verifier);

    // SHA-256 digest is 32 bytes, 43 characters without padding
    assert_eq!(challenge.len(), 43);

    // Should be deterministic - same input produces same output
    assert_eq!(challenge, generate_code_challenge(verifier));

    // Different input should produce different output
    assert_ne!(challenge, generate_code_challenge("different_verifier"));

    // Should be base64-encoded (URL-safe, no padding)
    assert!(
        challenge
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
    );
}

#[test]
fn test_generate_code_challenge_known_vector() {
    // Example from RFC 7636, appendix B
    let challenge = generate_code_challenge("dBjftJeZ4CVP-mB92K27uhbUJU1p1r_wW1gFWFOEjXk");
    assert_eq!(challenge, "E9Melhoa2OwvFrEMTJguCHaoeK1t8URWbuGJSstw-cM");
}

#[test]
fn test_format_percent() {
    assert_eq!(format_percent(0.734), "73%");
    assert_eq!(format_percent(0.0), "0%");
    assert_eq!(format_percent(1.0), "100%");
}

#[test]
fn test_track_table_rows_mark_missing_features() {
    let items = vec![
        create_test_item("Night Drive", &["Lead", "Feature"], Some(0.812)),
        create_test_item("Local File", &[], None),
    ];

    let rows = track_table_rows(&items);

    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].name, "Night Drive");
    assert_eq!(rows[0].artists, "Lead");
    assert_eq!(rows[0].danceability, "81%");
    assert_eq!(rows[0].valence, "25%");
    assert_eq!(rows[1].artists, "");
    assert_eq!(rows[1].danceability, "-");
    assert_eq!(rows[1].valence, "-");
}

#[test]
fn test_chart_table_rows_follow_chart_order() {
    let items = vec![
        create_test_item("One", &["A"], Some(0.6)),
        create_test_item("Two", &["B"], Some(0.4)),
    ];
    let chart = to_chart_data(&aggregate(&items).unwrap());

    let rows = chart_table_rows(&chart);

    let labels: Vec<&str> = rows.iter().map(|r| r.label.as_str()).collect();
    assert_eq!(
        labels,
        vec![
            "Valence",
            "Energy",
            "Danceability",
            "Tempo",
            "Loudness",
            "Acousticness"
        ]
    );
    assert_eq!(rows[0].value, "25.0");
    assert_eq!(rows[2].value, "50.0");
    assert_eq!(rows[0].color, "rgb(255, 99, 132)");
}

#[test]
fn test_bubble_table_rows_format() {
    let points = vec![BubblePoint {
        x: 0.5,
        y: 0.25,
        r: 8.4,
        label: "Song by Band".to_string(),
    }];

    let rows = bubble_table_rows(&points);

    assert_eq!(rows[0].track, "Song by Band");
    assert_eq!(rows[0].x, "0.500");
    assert_eq!(rows[0].y, "0.250");
    assert_eq!(rows[0].r, "8.4");
}
