use serde::Serialize;

use super::AggregateResult;

/// Bar labels, in display order.
pub const CHART_LABELS: [&str; 6] = [
    "Valence",
    "Energy",
    "Danceability",
    "Tempo",
    "Loudness",
    "Acousticness",
];

/// Bar colours, assigned by position and repeated once the palette runs out.
pub const PALETTE: [&str; 3] = ["rgb(255, 99, 132)", "rgb(54, 162, 235)", "rgb(255, 99, 5)"];

/// Dataset for the six-bar mood chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartData {
    pub labels: Vec<String>,
    /// Percentages in `[0, 100]`, aligned with `labels`.
    pub values: Vec<f64>,
    pub colors: Vec<String>,
}

impl ChartData {
    /// `(label, value, color)` triples in display order.
    pub fn rows(&self) -> impl Iterator<Item = (&str, f64, &str)> {
        self.labels
            .iter()
            .zip(&self.values)
            .zip(&self.colors)
            .map(|((label, value), color)| (label.as_str(), *value, color.as_str()))
    }
}

/// Colour of the bar at `index`, wrapping around the palette.
pub fn palette_color(index: usize) -> &'static str {
    PALETTE[index % PALETTE.len()]
}

/// Reshapes an [`AggregateResult`] into chart labels, values and colours.
///
/// Always produces six bars in [`CHART_LABELS`] order: valence, energy and
/// danceability means, the means of the normalized tempo and loudness columns,
/// and the acousticness mean, each scaled to `[0, 100]`. Colours come from
/// [`PALETTE`] by position, so a label keeps its colour between calls.
///
/// # Example
///
/// ```
/// let chart = to_chart_data(&aggregate(&items)?);
/// for (label, value, color) in chart.rows() {
///     println!("{label}: {value:.1} ({color})");
/// }
/// ```
pub fn to_chart_data(result: &AggregateResult) -> ChartData {
    let pct = result.percentages();
    let values = vec![
        pct.valence,
        pct.energy,
        pct.danceability,
        pct.tempo,
        pct.loudness,
        pct.acousticness,
    ];

    ChartData {
        labels: CHART_LABELS.iter().map(|l| l.to_string()).collect(),
        colors: (0..values.len())
            .map(|i| palette_color(i).to_string())
            .collect(),
        values,
    }
}
