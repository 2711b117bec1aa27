use tabled::Table;

use crate::{
    analysis::aggregate,
    cli::{analyze::load_snapshot, spinner},
    error, info,
    management::AppTokenProvider,
    spotify::recommendations::{RecommendationQuery, get_recommendations},
    types::RecommendationTableRow,
    utils,
};

/// Suggests tracks close to a playlist's mood.
///
/// Seeds are the first tracks that have audio features; targets are the
/// playlist's average valence, energy and danceability.
pub async fn recommend(playlist: String, limit: u32) {
    let mut tokens = AppTokenProvider::new();
    let snapshot = match load_snapshot(&playlist, &mut tokens, false).await {
        Ok(snapshot) => snapshot,
        Err(e) => error!("Cannot load playlist {}: {}", playlist, e),
    };

    let result = match aggregate(&snapshot.items) {
        Ok(result) => result,
        Err(e) => error!("Cannot derive recommendation targets: {}", e),
    };

    let seeds: Vec<String> = snapshot
        .items
        .iter()
        .filter(|item| item.audio_features.is_some())
        .filter_map(|item| item.track.id.clone())
        .collect();
    let query = RecommendationQuery::from_aggregate(&seeds, &result, limit);

    info!(
        "Looking for tracks around valence {}, energy {}, danceability {}",
        utils::format_percent(query.target_valence),
        utils::format_percent(query.target_energy),
        utils::format_percent(query.target_danceability)
    );

    // Reuses the app token from the snapshot unless it expired meanwhile.
    let token = match tokens.get_valid_token().await {
        Ok(token) => token,
        Err(e) => error!("Cannot obtain Spotify access token: {}", e),
    };

    let pb = spinner("Fetching recommendations...");
    let tracks = get_recommendations(&token, &query).await;
    pb.finish_and_clear();

    let tracks = match tracks {
        Ok(tracks) => tracks,
        Err(e) => error!("Cannot fetch recommendations: {}", e),
    };

    let rows: Vec<RecommendationTableRow> = tracks
        .iter()
        .map(|t| RecommendationTableRow {
            name: t.name.clone(),
            artists: t.artist_names(),
            popularity: t.popularity,
        })
        .collect();

    println!("{}", Table::new(rows));
}
