use std::{fmt, str::FromStr};

use serde::Serialize;

use crate::types::{AudioFeatures, TrackAudioFeatureItem};

/// A per-track value that can drive a bubble chart axis or radius.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FeatureKey {
    Acousticness,
    Danceability,
    Energy,
    Instrumentalness,
    Liveness,
    Speechiness,
    Valence,
    Popularity,
}

impl FeatureKey {
    pub const ALL: [FeatureKey; 8] = [
        FeatureKey::Acousticness,
        FeatureKey::Danceability,
        FeatureKey::Energy,
        FeatureKey::Instrumentalness,
        FeatureKey::Liveness,
        FeatureKey::Speechiness,
        FeatureKey::Valence,
        FeatureKey::Popularity,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FeatureKey::Acousticness => "acousticness",
            FeatureKey::Danceability => "danceability",
            FeatureKey::Energy => "energy",
            FeatureKey::Instrumentalness => "instrumentalness",
            FeatureKey::Liveness => "liveness",
            FeatureKey::Speechiness => "speechiness",
            FeatureKey::Valence => "valence",
            FeatureKey::Popularity => "popularity",
        }
    }

    fn value(&self, popularity: u32, features: &AudioFeatures) -> f64 {
        match self {
            FeatureKey::Acousticness => features.acousticness,
            FeatureKey::Danceability => features.danceability,
            FeatureKey::Energy => features.energy,
            FeatureKey::Instrumentalness => features.instrumentalness,
            FeatureKey::Liveness => features.liveness,
            FeatureKey::Speechiness => features.speechiness,
            FeatureKey::Valence => features.valence,
            FeatureKey::Popularity => popularity as f64,
        }
    }

    /// Popularity runs 0-100 while features run 0-1, so each gets its own scale.
    fn radius(&self, popularity: u32, features: &AudioFeatures) -> f64 {
        match self {
            FeatureKey::Popularity => popularity as f64 / 5.0,
            other => other.value(popularity, features) * 10.0,
        }
    }
}

impl fmt::Display for FeatureKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FeatureKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_ascii_lowercase();
        FeatureKey::ALL
            .into_iter()
            .find(|k| k.as_str() == needle)
            .ok_or_else(|| {
                let valid = FeatureKey::ALL
                    .iter()
                    .map(|k| k.as_str())
                    .collect::<Vec<_>>()
                    .join(", ");
                format!("unknown feature '{}', expected one of: {}", s, valid)
            })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BubblePoint {
    pub x: f64,
    pub y: f64,
    pub r: f64,
    /// "Track by Artist, Artist".
    pub label: String,
}

/// One point per track that has audio features; the rest are skipped.
pub fn bubble_points(
    items: &[TrackAudioFeatureItem],
    x: FeatureKey,
    y: FeatureKey,
    size: FeatureKey,
) -> Vec<BubblePoint> {
    items
        .iter()
        .filter_map(|item| {
            let features = item.audio_features.as_ref()?;
            let popularity = item.track.popularity;
            Some(BubblePoint {
                x: x.value(popularity, features),
                y: y.value(popularity, features),
                r: size.radius(popularity, features),
                label: format!("{} by {}", item.track.name, item.track.artist_names()),
            })
        })
        .collect()
}
