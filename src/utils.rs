use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use rand::{Rng, distr::Alphanumeric};
use sha2::{Digest, Sha256};

use crate::{
    analysis::{BubblePoint, ChartData},
    types::{BubbleTableRow, ChartTableRow, TrackAudioFeatureItem, TrackTableRow},
};

pub const PKCE_VERIFIER_LENGTH: usize = 128;

pub fn generate_code_verifier() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(PKCE_VERIFIER_LENGTH)
        .map(char::from)
        .collect()
}

pub fn generate_code_challenge(verifier: &str) -> String {
    let hash = Sha256::digest(verifier.as_bytes());
    URL_SAFE_NO_PAD.encode(hash)
}

/// Formats a `[0, 1]` fraction as a whole percentage, e.g. `0.734` → `"73%"`.
pub fn format_percent(fraction: f64) -> String {
    format!("{}%", (fraction * 100.0).round() as i64)
}

/// Track rows for display. Tracks without features show `-`.
pub fn track_table_rows(items: &[TrackAudioFeatureItem]) -> Vec<TrackTableRow> {
    items
        .iter()
        .map(|item| {
            let (danceability, valence) = match &item.audio_features {
                Some(f) => (format_percent(f.danceability), format_percent(f.valence)),
                None => ("-".to_string(), "-".to_string()),
            };
            TrackTableRow {
                name: item.track.name.clone(),
                artists: item
                    .track
                    .artists
                    .first()
                    .map(|a| a.name.clone())
                    .unwrap_or_default(),
                danceability,
                valence,
            }
        })
        .collect()
}

pub fn chart_table_rows(chart: &ChartData) -> Vec<ChartTableRow> {
    chart
        .rows()
        .map(|(label, value, color)| ChartTableRow {
            label: label.to_string(),
            value: format!("{:.1}", value),
            color: color.to_string(),
        })
        .collect()
}

pub fn bubble_table_rows(points: &[BubblePoint]) -> Vec<BubbleTableRow> {
    points
        .iter()
        .map(|p| BubbleTableRow {
            track: p.label.clone(),
            x: format!("{:.3}", p.x),
            y: format!("{:.3}", p.y),
            r: format!("{:.1}", p.r),
        })
        .collect()
}
