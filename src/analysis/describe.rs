use super::AggregateResult;

const HIGH_THRESHOLD: f64 = 0.7;
const MID_THRESHOLD: f64 = 0.4;
const LOUD_THRESHOLD_DB: f64 = -10.0;

/// Picks one of three phrases; a value equal to a threshold falls into the
/// lower bracket.
fn bracket(value: f64, high: &'static str, mid: &'static str, low: &'static str) -> &'static str {
    if value > HIGH_THRESHOLD {
        high
    } else if value > MID_THRESHOLD {
        mid
    } else {
        low
    }
}

pub fn energy_phrase(energy: f64) -> &'static str {
    bracket(
        energy,
        "energetic and powerful",
        "moderately energetic",
        "mellow and calm",
    )
}

pub fn danceability_phrase(danceability: f64) -> &'static str {
    bracket(
        danceability,
        "highly danceable",
        "somewhat danceable",
        "more reserved in danceability",
    )
}

pub fn valence_phrase(valence: f64) -> &'static str {
    bracket(
        valence,
        "positive and cheerful",
        "moderately cheerful",
        "more contemplative or subdued",
    )
}

pub fn loudness_phrase(loudness_db: f64) -> &'static str {
    if loudness_db > LOUD_THRESHOLD_DB {
        "louder"
    } else {
        "quieter"
    }
}

/// Rounds to two decimals with ties away from zero, so `-7.125` becomes `-7.13`.
fn round_hundredths(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Builds the qualitative summary sentence for a playlist.
///
/// Energy, danceability and valence each pick one of three phrases; a value
/// equal to 0.7 or 0.4 falls into the lower bracket. Loudness above -10 dB
/// reads as "louder".
///
/// # Arguments
///
/// * `result` - Aggregate of the playlist's tracks
/// * `playlist_name` - Name embedded verbatim in the sentence
///
/// # Returns
///
/// One paragraph with the mean tempo rounded to whole BPM and the mean
/// loudness rounded to two decimals, ties away from zero.
///
/// # Example
///
/// ```
/// let result = aggregate(&items)?;
/// println!("{}", describe(&result, "Road Trip"));
/// ```
pub fn describe(result: &AggregateResult, playlist_name: &str) -> String {
    format!(
        "The playlist '{name}' features tracks that are generally {energy}, with a {dance} feel. \
         The tracks overall emit a {mood} vibe, supported by an average tempo of {tempo} BPM. \
         The average loudness of {loudness:.2} dB indicates a {loud} sound profile, \
         suitable for varied listening experiences.",
        name = playlist_name,
        energy = energy_phrase(result.energy),
        dance = danceability_phrase(result.danceability),
        mood = valence_phrase(result.valence),
        tempo = result.avg_tempo.round() as i64,
        loudness = round_hundredths(result.avg_loudness),
        loud = loudness_phrase(result.avg_loudness),
    )
}
