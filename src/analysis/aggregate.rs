use serde::Serialize;

use crate::{
    Res,
    error::Error,
    types::{AudioFeatures, TrackAudioFeatureItem},
};

pub const VALENCE_WEIGHT: f64 = 0.40;
pub const ENERGY_WEIGHT: f64 = 0.25;
pub const DANCEABILITY_WEIGHT: f64 = 0.15;
pub const TEMPO_WEIGHT: f64 = 0.10;
pub const LOUDNESS_WEIGHT: f64 = 0.05;
pub const ACOUSTICNESS_WEIGHT: f64 = 0.05;

/// Value assigned to every element of a column whose min equals its max.
pub const DEGENERATE_RANGE_MIDPOINT: f64 = 0.5;

/// Representative statistics for one playlist snapshot.
///
/// Every field except `avg_tempo`, `avg_loudness` and `track_count` is a
/// fraction in `[0, 1]`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregateResult {
    pub valence: f64,
    pub energy: f64,
    pub danceability: f64,
    /// Mean of the min-max normalized tempo column.
    pub norm_tempo: f64,
    /// Mean of the min-max normalized loudness column.
    pub norm_loudness: f64,
    pub acousticness: f64,
    pub instrumentalness: f64,
    pub mood_score: f64,
    /// Raw mean tempo in BPM.
    pub avg_tempo: f64,
    /// Raw mean loudness in dB, usually negative.
    pub avg_loudness: f64,
    /// Number of tracks that contributed to the columns.
    pub track_count: usize,
}

/// The [`AggregateResult`] fractions scaled to `[0, 100]` for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Percentages {
    pub valence: f64,
    pub energy: f64,
    pub danceability: f64,
    pub tempo: f64,
    pub loudness: f64,
    pub acousticness: f64,
    pub mood_score: f64,
}

impl AggregateResult {
    pub fn percentages(&self) -> Percentages {
        Percentages {
            valence: self.valence * 100.0,
            energy: self.energy * 100.0,
            danceability: self.danceability * 100.0,
            tempo: self.norm_tempo * 100.0,
            loudness: self.norm_loudness * 100.0,
            acousticness: self.acousticness * 100.0,
            mood_score: self.mood_score * 100.0,
        }
    }
}

/// Computes averages, normalized tempo/loudness and the mood score.
///
/// Items without audio features are left out of every column, so they never
/// count as zero in a mean.
///
/// # Errors
///
/// Returns [`Error::InsufficientData`] when no item carries audio features.
pub fn aggregate(items: &[TrackAudioFeatureItem]) -> Res<AggregateResult> {
    let records: Vec<&AudioFeatures> = items
        .iter()
        .filter_map(|item| item.audio_features.as_ref())
        .collect();

    if records.is_empty() {
        return Err(Error::InsufficientData);
    }

    let danceability = column_mean(&records, |r| r.danceability)?;
    let energy = column_mean(&records, |r| r.energy)?;
    let valence = column_mean(&records, |r| r.valence)?;
    let acousticness = column_mean(&records, |r| r.acousticness)?;
    let instrumentalness = column_mean(&records, |r| r.instrumentalness)?;

    let tempos = column(&records, |r| r.tempo);
    let loudnesses = column(&records, |r| r.loudness);

    let avg_tempo = mean(&tempos).ok_or(Error::InsufficientData)?;
    let avg_loudness = mean(&loudnesses).ok_or(Error::InsufficientData)?;
    let norm_tempo = mean(&normalize(&tempos)).ok_or(Error::InsufficientData)?;
    let norm_loudness = mean(&normalize(&loudnesses)).ok_or(Error::InsufficientData)?;

    Ok(AggregateResult {
        valence,
        energy,
        danceability,
        norm_tempo,
        norm_loudness,
        acousticness,
        instrumentalness,
        mood_score: mood_score(
            valence,
            energy,
            danceability,
            norm_tempo,
            norm_loudness,
            acousticness,
        ),
        avg_tempo,
        avg_loudness,
        track_count: records.len(),
    })
}

fn column(records: &[&AudioFeatures], value: impl Fn(&AudioFeatures) -> f64) -> Vec<f64> {
    records.iter().map(|&r| value(r)).collect()
}

fn column_mean(records: &[&AudioFeatures], value: impl Fn(&AudioFeatures) -> f64) -> Res<f64> {
    mean(&column(records, value)).ok_or(Error::InsufficientData)
}

/// Weighted composite of the six `[0, 1]` components.
pub fn mood_score(
    valence: f64,
    energy: f64,
    danceability: f64,
    norm_tempo: f64,
    norm_loudness: f64,
    acousticness: f64,
) -> f64 {
    VALENCE_WEIGHT * valence
        + ENERGY_WEIGHT * energy
        + DANCEABILITY_WEIGHT * danceability
        + TEMPO_WEIGHT * norm_tempo
        + LOUDNESS_WEIGHT * norm_loudness
        + ACOUSTICNESS_WEIGHT * acousticness
}

/// Min-max normalizes a column to `[0, 1]`.
///
/// A column with zero range maps every element to
/// [`DEGENERATE_RANGE_MIDPOINT`].
pub fn normalize(values: &[f64]) -> Vec<f64> {
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let range = max - min;

    if range == 0.0 {
        return vec![DEGENERATE_RANGE_MIDPOINT; values.len()];
    }

    values.iter().map(|v| (v - min) / range).collect()
}

/// Arithmetic mean, `None` for an empty column.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}
