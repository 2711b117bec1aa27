use tunevibe::analysis::{
    FeatureKey, aggregate,
    aggregate::{mean, mood_score},
    bubble_points,
    chart::{CHART_LABELS, PALETTE},
    describe,
    describe::{danceability_phrase, energy_phrase, loudness_phrase, valence_phrase},
    to_chart_data,
};
use tunevibe::error::Error;
use tunevibe::types::{AudioFeatures, TrackArtist, TrackAudioFeatureItem, TrackInfo};

const EPSILON: f64 = 1e-9;

// Helper function to create audio features with neutral defaults
fn features(id: &str, danceability: f64, energy: f64, valence: f64, tempo: f64, loudness: f64) -> AudioFeatures {
    AudioFeatures {
        id: id.to_string(),
        danceability,
        energy,
        valence,
        tempo,
        loudness,
        acousticness: 0.2,
        instrumentalness: 0.0,
        liveness: 0.1,
        speechiness: 0.05,
    }
}

// Helper function to create a playlist item
fn item(id: &str, features: Option<AudioFeatures>) -> TrackAudioFeatureItem {
    TrackAudioFeatureItem {
        track: TrackInfo {
            id: Some(id.to_string()),
            name: format!("Track {}", id),
            artists: vec![
                TrackArtist {
                    name: "First Artist".to_string(),
                },
                TrackArtist {
                    name: "Second Artist".to_string(),
                },
            ],
            popularity: 50,
        },
        audio_features: features,
    }
}

fn sample_items() -> Vec<TrackAudioFeatureItem> {
    vec![
        item("a", Some(features("a", 0.8, 0.9, 0.6, 100.0, -5.0))),
        item("b", Some(features("b", 0.4, 0.3, 0.2, 200.0, -15.0))),
        item("c", Some(features("c", 0.6, 0.6, 0.7, 150.0, -10.0))),
    ]
}

#[test]
fn test_aggregate_means_match_raw_columns() {
    let items = sample_items();
    let result = aggregate(&items).unwrap();

    assert!((result.danceability - 0.6).abs() < EPSILON);
    assert!((result.energy - 0.6).abs() < EPSILON);
    assert!((result.valence - 0.5).abs() < EPSILON);
    assert!((result.acousticness - 0.2).abs() < EPSILON);
    assert!((result.avg_tempo - 150.0).abs() < EPSILON);
    assert!((result.avg_loudness + 10.0).abs() < EPSILON);
    assert_eq!(result.track_count, 3);
}

#[test]
fn test_aggregate_excludes_tracks_without_features() {
    let mut items = sample_items();
    items.insert(1, item("missing", None));
    items.push(item("also-missing", None));

    let with_gaps = aggregate(&items).unwrap();
    let without_gaps = aggregate(&sample_items()).unwrap();

    // Missing tracks must not drag the averages towards zero
    assert_eq!(with_gaps, without_gaps);
    assert_eq!(with_gaps.track_count, 3);
}

#[test]
fn test_aggregate_without_features_is_insufficient_data() {
    let items = vec![item("a", None), item("b", None)];
    assert!(matches!(aggregate(&items), Err(Error::InsufficientData)));
}

#[test]
fn test_aggregate_empty_input_is_insufficient_data() {
    assert!(matches!(aggregate(&[]), Err(Error::InsufficientData)));
}

#[test]
fn test_normalized_tempo_two_distinct_values() {
    let items = vec![
        item("a", Some(features("a", 0.5, 0.5, 0.5, 100.0, -8.0))),
        item("b", Some(features("b", 0.5, 0.5, 0.5, 200.0, -6.0))),
    ];
    let result = aggregate(&items).unwrap();

    assert!((result.norm_tempo - 0.5).abs() < EPSILON);
    assert!((result.norm_loudness - 0.5).abs() < EPSILON);
}

#[test]
fn test_single_track_uses_midpoint_for_normalized_columns() {
    let items = vec![item("a", Some(features("a", 0.5, 0.5, 0.5, 120.0, -7.0)))];
    let result = aggregate(&items).unwrap();

    assert_eq!(result.norm_tempo, 0.5);
    assert_eq!(result.norm_loudness, 0.5);
    assert!(result.mood_score.is_finite());
}

#[test]
fn test_identical_tempos_use_midpoint() {
    let items = vec![
        item("a", Some(features("a", 0.5, 0.5, 0.5, 128.0, -9.0))),
        item("b", Some(features("b", 0.5, 0.5, 0.5, 128.0, -3.0))),
        item("c", Some(features("c", 0.5, 0.5, 0.5, 128.0, -6.0))),
    ];
    let result = aggregate(&items).unwrap();

    assert_eq!(result.norm_tempo, 0.5);
    assert!((result.norm_loudness - 0.5).abs() < EPSILON);
}

#[test]
fn test_mood_score_valence_only() {
    assert_eq!(mood_score(1.0, 0.0, 0.0, 0.0, 0.0, 0.0), 0.40);
}

#[test]
fn test_mood_score_matches_weighted_aggregate() {
    let result = aggregate(&sample_items()).unwrap();
    let expected = 0.40 * result.valence
        + 0.25 * result.energy
        + 0.15 * result.danceability
        + 0.10 * result.norm_tempo
        + 0.05 * result.norm_loudness
        + 0.05 * result.acousticness;

    assert!((result.mood_score - expected).abs() < EPSILON);
    assert!((0.0..=1.0).contains(&result.mood_score));
}

#[test]
fn test_percentages_scale_fractions() {
    let result = aggregate(&sample_items()).unwrap();
    let pct = result.percentages();

    assert!((pct.valence - 50.0).abs() < EPSILON);
    assert!((pct.energy - 60.0).abs() < EPSILON);
    assert!((pct.tempo - 50.0).abs() < EPSILON);
    assert!((pct.mood_score - result.mood_score * 100.0).abs() < EPSILON);
}

#[test]
fn test_mean_of_empty_column_is_none() {
    assert_eq!(mean(&[]), None);
    assert_eq!(mean(&[2.0, 4.0]), Some(3.0));
}

#[test]
fn test_chart_data_has_six_values_in_fixed_order() {
    for size in [1, 3, 40] {
        let items: Vec<TrackAudioFeatureItem> = (0..size)
            .map(|i| {
                let id = format!("t{}", i);
                let f = features(&id, 0.5, 0.4, 0.3, 90.0 + i as f64, -6.0 - i as f64);
                item(&id, Some(f))
            })
            .collect();

        let chart = to_chart_data(&aggregate(&items).unwrap());
        assert_eq!(chart.values.len(), 6);
        assert_eq!(
            chart.labels,
            vec![
                "Valence",
                "Energy",
                "Danceability",
                "Tempo",
                "Loudness",
                "Acousticness"
            ]
        );
        assert!(chart.values.iter().all(|v| (0.0..=100.0).contains(v)));
    }
}

#[test]
fn test_chart_data_values_and_colors() {
    let result = aggregate(&sample_items()).unwrap();
    let chart = to_chart_data(&result);
    let pct = result.percentages();

    assert_eq!(
        chart.values,
        vec![
            pct.valence,
            pct.energy,
            pct.danceability,
            pct.tempo,
            pct.loudness,
            pct.acousticness
        ]
    );

    let mapping: Vec<(&str, &str)> = chart.rows().map(|(label, _, color)| (label, color)).collect();
    assert_eq!(
        mapping,
        vec![
            ("Valence", "rgb(255, 99, 132)"),
            ("Energy", "rgb(54, 162, 235)"),
            ("Danceability", "rgb(255, 99, 5)"),
            ("Tempo", "rgb(255, 99, 132)"),
            ("Loudness", "rgb(54, 162, 235)"),
            ("Acousticness", "rgb(255, 99, 5)"),
        ]
    );

    // Stable across calls
    assert_eq!(to_chart_data(&result), chart);
    assert_eq!(CHART_LABELS.len(), 6);
    assert_eq!(PALETTE.len(), 3);
}

#[test]
fn test_threshold_boundaries_are_exclusive() {
    assert_eq!(energy_phrase(0.71), "energetic and powerful");
    assert_eq!(energy_phrase(0.70), "moderately energetic");
    assert_eq!(energy_phrase(0.41), "moderately energetic");
    assert_eq!(energy_phrase(0.40), "mellow and calm");

    assert_eq!(danceability_phrase(0.9), "highly danceable");
    assert_eq!(danceability_phrase(0.7), "somewhat danceable");
    assert_eq!(danceability_phrase(0.1), "more reserved in danceability");

    assert_eq!(valence_phrase(0.75), "positive and cheerful");
    assert_eq!(valence_phrase(0.5), "moderately cheerful");
    assert_eq!(valence_phrase(0.4), "more contemplative or subdued");

    assert_eq!(loudness_phrase(-9.99), "louder");
    assert_eq!(loudness_phrase(-10.0), "quieter");
}

#[test]
fn test_describe_energy_boundary() {
    let mut result = aggregate(&sample_items()).unwrap();

    result.energy = 0.71;
    assert!(describe(&result, "Mix").contains("energetic and powerful"));

    result.energy = 0.70;
    let text = describe(&result, "Mix");
    assert!(text.contains("moderately energetic"));
    assert!(!text.contains("energetic and powerful"));
}

#[test]
fn test_describe_embeds_name_tempo_and_loudness() {
    let mut result = aggregate(&sample_items()).unwrap();
    result.avg_tempo = 121.6;
    result.avg_loudness = -7.4567;
    result.danceability = 0.8;
    result.valence = 0.2;

    let text = describe(&result, "Road Trip");

    assert!(text.contains("The playlist 'Road Trip'"));
    assert!(text.contains("average tempo of 122 BPM"));
    assert!(text.contains("average loudness of -7.46 dB"));
    assert!(text.contains("louder sound profile"));
    assert!(text.contains("highly danceable"));
    assert!(text.contains("more contemplative or subdued"));
}

#[test]
fn test_describe_rounds_loudness_ties_away_from_zero() {
    let items = vec![
        item("a", Some(features("a", 0.5, 0.5, 0.5, 120.0, -7.0))),
        item("b", Some(features("b", 0.5, 0.5, 0.5, 120.0, -7.25))),
    ];
    let result = aggregate(&items).unwrap();
    assert_eq!(result.avg_loudness, -7.125);

    let text = describe(&result, "Ties");
    assert!(text.contains("average loudness of -7.13 dB"), "{}", text);
}

#[test]
fn test_bubble_points_skip_tracks_without_features() {
    let mut items = sample_items();
    items.push(item("missing", None));

    let points = bubble_points(
        &items,
        FeatureKey::Danceability,
        FeatureKey::Energy,
        FeatureKey::Popularity,
    );

    assert_eq!(points.len(), 3);
    assert_eq!(points[0].x, 0.8);
    assert_eq!(points[0].y, 0.9);
    assert_eq!(points[0].r, 10.0); // popularity 50 / 5
    assert_eq!(points[0].label, "Track a by First Artist, Second Artist");
}

#[test]
fn test_bubble_feature_radius_scales_by_ten() {
    let points = bubble_points(
        &sample_items(),
        FeatureKey::Popularity,
        FeatureKey::Valence,
        FeatureKey::Danceability,
    );

    assert_eq!(points[1].x, 50.0);
    assert_eq!(points[1].y, 0.2);
    assert!((points[1].r - 4.0).abs() < EPSILON);
}

#[test]
fn test_feature_key_parsing() {
    assert_eq!("Energy".parse::<FeatureKey>(), Ok(FeatureKey::Energy));
    assert_eq!(" popularity ".parse::<FeatureKey>(), Ok(FeatureKey::Popularity));
    assert!("tempo".parse::<FeatureKey>().is_err());

    for key in FeatureKey::ALL {
        assert_eq!(key.to_string().parse::<FeatureKey>(), Ok(key));
    }
}
