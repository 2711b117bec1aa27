use crate::{
    Res, analysis::AggregateResult, config, spotify::get_json, types::RecommendationsResponse,
    types::TrackInfo,
};

/// Spotify accepts at most five seeds per request.
pub const MAX_SEED_TRACKS: usize = 5;
pub const MAX_RECOMMENDATIONS: u32 = 100;

/// Query for `GET /recommendations`, seeded from an analysed playlist.
#[derive(Debug, Clone, PartialEq)]
pub struct RecommendationQuery {
    pub seed_tracks: Vec<String>,
    pub target_valence: f64,
    pub target_energy: f64,
    pub target_danceability: f64,
    pub limit: u32,
}

impl RecommendationQuery {
    /// Uses the first [`MAX_SEED_TRACKS`] ids as seeds and the playlist's
    /// averages as targets. `limit` is clamped to `1..=100`.
    pub fn from_aggregate(seed_ids: &[String], result: &AggregateResult, limit: u32) -> Self {
        Self {
            seed_tracks: seed_ids.iter().take(MAX_SEED_TRACKS).cloned().collect(),
            target_valence: result.valence,
            target_energy: result.energy,
            target_danceability: result.danceability,
            limit: limit.clamp(1, MAX_RECOMMENDATIONS),
        }
    }

    /// Query string pairs; targets are sent with three decimals.
    pub fn params(&self) -> Vec<(&'static str, String)> {
        vec![
            ("seed_tracks", self.seed_tracks.join(",")),
            ("target_valence", format!("{:.3}", self.target_valence)),
            ("target_energy", format!("{:.3}", self.target_energy)),
            (
                "target_danceability",
                format!("{:.3}", self.target_danceability),
            ),
            ("limit", self.limit.to_string()),
        ]
    }
}

/// Requests tracks close to the query's targets.
///
/// # Arguments
///
/// * `token` - App or user access token
/// * `query` - Seeds, targets and limit, see [`RecommendationQuery::from_aggregate`]
///
/// # Returns
///
/// - `Ok(Vec<TrackInfo>)` - Up to `query.limit` recommended tracks
/// - `Err(Error::Http)` - Network error or non-success status, such as a
///   request without any seed
pub async fn get_recommendations(token: &str, query: &RecommendationQuery) -> Res<Vec<TrackInfo>> {
    let url = format!("{uri}/recommendations", uri = config::spotify_api_url());
    let res: RecommendationsResponse = get_json(&url, &query.params(), token).await?;
    Ok(res.tracks)
}
