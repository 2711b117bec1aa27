use serde::Serialize;
use tabled::Table;

use crate::{
    Res,
    analysis::{
        AggregateResult, BubblePoint, ChartData, FeatureKey, Percentages, aggregate, bubble_points,
        describe, to_chart_data,
    },
    cli::spinner,
    error,
    error::Error,
    info,
    management::AppTokenProvider,
    spotify::{
        features::{FeatureLookup, attach_features, fetch_audio_features},
        playlists::{extract_playlist_id, get_playlist},
    },
    types::TrackAudioFeatureItem,
    utils, warning,
};

/// A playlist and its tracks paired with whatever features could be fetched.
pub(crate) struct PlaylistSnapshot {
    pub id: String,
    pub name: String,
    pub items: Vec<TrackAudioFeatureItem>,
    pub lookup: FeatureLookup,
}

/// Axes and radius for the optional bubble chart output.
#[derive(Debug, Clone, Copy)]
pub struct BubbleAxes {
    pub x: FeatureKey,
    pub y: FeatureKey,
    pub size: FeatureKey,
}

#[derive(Serialize)]
struct AnalysisReport<'a> {
    id: &'a str,
    name: &'a str,
    tracks: usize,
    aggregate: &'a AggregateResult,
    percentages: Percentages,
    chart: &'a ChartData,
    description: &'a str,
    missing_ids: &'a [String],
    #[serde(skip_serializing_if = "Option::is_none")]
    bubble: Option<Vec<BubblePoint>>,
}

pub(crate) async fn load_snapshot(
    playlist: &str,
    tokens: &mut AppTokenProvider,
    quiet: bool,
) -> Res<PlaylistSnapshot> {
    let playlist_id = extract_playlist_id(playlist)?;
    let token = tokens.get_valid_token().await?;

    let pb = spinner("Fetching playlist...");
    let fetched = get_playlist(&token, &playlist_id).await;
    pb.finish_and_clear();
    let fetched = fetched?;

    if !quiet {
        info!(
            "Fetched {} tracks from playlist '{}'",
            fetched.tracks.len(),
            fetched.name
        );
    }

    let ids: Vec<Option<String>> = fetched.tracks.iter().map(|t| t.id.clone()).collect();

    let pb = spinner("Fetching audio features...");
    let lookup = fetch_audio_features(&token, &ids).await;
    pb.finish_and_clear();

    report_missing(&lookup);

    Ok(PlaylistSnapshot {
        id: fetched.id,
        name: fetched.name,
        items: attach_features(fetched.tracks, &lookup),
        lookup,
    })
}

fn report_missing(lookup: &FeatureLookup) {
    for e in &lookup.errors {
        warning!("Audio feature batch failed: {}", e);
    }

    if !lookup.is_complete() {
        warning!(
            "{} tracks have no audio features and are left out of the analysis: {}",
            lookup.missing.len(),
            lookup.missing.join(", ")
        );
    }
}

/// Prints the mood analysis of a playlist.
///
/// Tables and the description by default, a single JSON document with
/// `json`. A playlist without any audio features is reported as "no data",
/// not as an all-zero result.
pub async fn analyze(playlist: String, json: bool, bubble: Option<BubbleAxes>) {
    let mut tokens = AppTokenProvider::new();
    let snapshot = match load_snapshot(&playlist, &mut tokens, json).await {
        Ok(snapshot) => snapshot,
        Err(e) => error!("Cannot analyze playlist {}: {}", playlist, e),
    };

    let result = match aggregate(&snapshot.items) {
        Ok(result) => result,
        Err(Error::InsufficientData) => {
            warning!(
                "No audio features available for playlist '{}', nothing to analyze.",
                snapshot.name
            );
            return;
        }
        Err(e) => error!("Cannot analyze playlist {}: {}", playlist, e),
    };

    let chart = to_chart_data(&result);
    let description = describe(&result, &snapshot.name);
    let points = bubble.map(|axes| bubble_points(&snapshot.items, axes.x, axes.y, axes.size));

    if json {
        let report = AnalysisReport {
            id: &snapshot.id,
            name: &snapshot.name,
            tracks: snapshot.items.len(),
            aggregate: &result,
            percentages: result.percentages(),
            chart: &chart,
            description: &description,
            missing_ids: &snapshot.lookup.missing,
            bubble: points,
        };
        match serde_json::to_string_pretty(&report) {
            Ok(out) => println!("{}", out),
            Err(e) => error!("Cannot serialize analysis: {}", e),
        }
        return;
    }

    println!("{}\n", Table::new(utils::track_table_rows(&snapshot.items)));
    println!("{}\n", Table::new(utils::chart_table_rows(&chart)));

    if let (Some(axes), Some(points)) = (bubble, points) {
        println!(
            "Bubble chart: x = {}, y = {}, size = {}\n{}\n",
            axes.x,
            axes.y,
            axes.size,
            Table::new(utils::bubble_table_rows(&points))
        );
    }

    info!(
        "Mood score: {} ({} of {} tracks analysed)",
        utils::format_percent(result.mood_score),
        result.track_count,
        snapshot.items.len()
    );
    println!("\n{}", description);
}
