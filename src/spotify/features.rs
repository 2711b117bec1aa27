use std::{
    collections::{HashMap, HashSet},
    future::Future,
    sync::Arc,
};

use tokio::sync::Semaphore;

use crate::{
    Res, config,
    error::Error,
    spotify::get_json,
    types::{AudioFeatures, AudioFeaturesResponse, TrackAudioFeatureItem, TrackInfo},
};

/// Upper bound of ids per `GET /audio-features` request, set by Spotify.
pub const MAX_AUDIO_FEATURE_IDS: usize = 100;

/// Upper bound of audio-feature requests in flight at the same time.
pub const MAX_CONCURRENT_BATCHES: usize = 4;

/// Audio features keyed by track id, plus the ids that could not be resolved.
#[derive(Debug, Default)]
pub struct FeatureLookup {
    pub features: HashMap<String, AudioFeatures>,
    /// Ids from failed batches and ids Spotify returned no features for, in
    /// request order and without duplicates.
    pub missing: Vec<String>,
    pub failed_batches: usize,
    /// One message per failed batch.
    pub errors: Vec<String>,
}

impl FeatureLookup {
    pub fn get(&self, id: &str) -> Option<&AudioFeatures> {
        self.features.get(id)
    }

    pub fn is_complete(&self) -> bool {
        self.missing.is_empty()
    }
}

/// Drops absent and blank ids, keeping the order of the rest.
pub fn clean_track_ids(ids: &[Option<String>]) -> Vec<String> {
    ids.iter()
        .flatten()
        .filter(|id| !id.trim().is_empty())
        .cloned()
        .collect()
}

/// Splits the usable ids into ordered chunks of at most
/// [`MAX_AUDIO_FEATURE_IDS`].
///
/// Absent ids are removed before chunking, so they never shift the chunk
/// boundaries of the ids after them.
pub fn chunk_track_ids(ids: &[Option<String>]) -> Vec<Vec<String>> {
    clean_track_ids(ids)
        .chunks(MAX_AUDIO_FEATURE_IDS)
        .map(|chunk| chunk.to_vec())
        .collect()
}

/// Folds per-batch outcomes into one [`FeatureLookup`].
///
/// A failed batch contributes its ids to `missing` and never discards the
/// features of other batches.
pub fn merge_batches(batches: Vec<(Vec<String>, Res<Vec<Option<AudioFeatures>>>)>) -> FeatureLookup {
    let mut lookup = FeatureLookup::default();
    let mut requested: Vec<String> = Vec::new();

    for (ids, outcome) in batches {
        match outcome {
            Ok(features) => {
                for feature in features.into_iter().flatten() {
                    lookup.features.insert(feature.id.clone(), feature);
                }
            }
            Err(e) => {
                lookup.failed_batches += 1;
                lookup.errors.push(e.to_string());
            }
        }
        requested.extend(ids);
    }

    let mut seen = HashSet::new();
    lookup.missing = requested
        .into_iter()
        .filter(|id| !lookup.features.contains_key(id))
        .filter(|id| seen.insert(id.clone()))
        .collect();

    lookup
}

/// Runs `fetch` once per chunk of ids and merges the per-chunk outcomes.
///
/// The ids are cleaned and split with [`chunk_track_ids`]. Every chunk runs in
/// its own tokio task, but at most [`MAX_CONCURRENT_BATCHES`] of them call
/// `fetch` at the same time; the others wait for a permit. Each task returns
/// its own result and merging only starts after every task has been joined.
///
/// # Arguments
///
/// * `ids` - Playlist track ids in playlist order; `None` and blank ids are skipped
/// * `fetch` - Produces the request for one chunk of at most [`MAX_AUDIO_FEATURE_IDS`] ids
///
/// # Returns
///
/// A [`FeatureLookup`] with the features of every successful chunk. Ids of
/// failed chunks and ids Spotify had no features for end up in
/// [`FeatureLookup::missing`]; a failing chunk never discards the others.
///
/// # Example
///
/// ```
/// let lookup = fetch_in_batches(&ids, |chunk| async move {
///     get_audio_features(&token, &chunk).await
/// })
/// .await;
///
/// if !lookup.is_complete() {
///     warning!("{} tracks without features", lookup.missing.len());
/// }
/// ```
pub async fn fetch_in_batches<F, Fut>(ids: &[Option<String>], fetch: F) -> FeatureLookup
where
    F: Fn(Vec<String>) -> Fut,
    Fut: Future<Output = Res<Vec<Option<AudioFeatures>>>> + Send + 'static,
{
    let permits = Arc::new(Semaphore::new(MAX_CONCURRENT_BATCHES));

    let handles: Vec<_> = chunk_track_ids(ids)
        .into_iter()
        .map(|chunk| {
            let permits = Arc::clone(&permits);
            let request = fetch(chunk.clone());
            let handle = tokio::spawn(async move {
                let _permit = permits.acquire_owned().await?;
                request.await
            });
            (chunk, handle)
        })
        .collect();

    let mut batches = Vec::with_capacity(handles.len());
    for (chunk, handle) in handles {
        let outcome = match handle.await {
            Ok(outcome) => outcome,
            Err(e) => Err(Error::Task(e)),
        };
        batches.push((chunk, outcome));
    }

    merge_batches(batches)
}

/// `GET /audio-features` for a single chunk of ids.
///
/// # Arguments
///
/// * `token` - App or user access token
/// * `ids` - At most [`MAX_AUDIO_FEATURE_IDS`] track ids
///
/// # Returns
///
/// One entry per requested id, `None` where Spotify has no features for the
/// track. Network errors and non-success statuses are returned as
/// `Err(Error::Http)` after the retries of [`get_json`].
pub async fn get_audio_features(token: &str, ids: &[String]) -> Res<Vec<Option<AudioFeatures>>> {
    let url = format!("{}/audio-features", config::spotify_api_url());
    let res: AudioFeaturesResponse = get_json(&url, &[("ids", ids.join(","))], token).await?;
    Ok(res.audio_features)
}

/// Fetches audio features for every usable id using the given access token.
///
/// Wraps [`get_audio_features`] in [`fetch_in_batches`], so ids are chunked,
/// requests run with bounded concurrency and failed chunks end up in
/// [`FeatureLookup::missing`] instead of aborting the lookup.
///
/// # Example
///
/// ```
/// let ids: Vec<Option<String>> = playlist.tracks.iter().map(|t| t.id.clone()).collect();
/// let lookup = fetch_audio_features(&token, &ids).await;
/// let items = attach_features(playlist.tracks, &lookup);
/// ```
pub async fn fetch_audio_features(token: &str, ids: &[Option<String>]) -> FeatureLookup {
    let token = token.to_string();
    fetch_in_batches(ids, move |chunk| {
        let token = token.clone();
        async move { get_audio_features(&token, &chunk).await }
    })
    .await
}

/// Pairs each track with its features, keeping playlist order.
pub fn attach_features(tracks: Vec<TrackInfo>, lookup: &FeatureLookup) -> Vec<TrackAudioFeatureItem> {
    tracks
        .into_iter()
        .map(|track| {
            let audio_features = track.id.as_deref().and_then(|id| lookup.get(id)).cloned();
            TrackAudioFeatureItem {
                track,
                audio_features,
            }
        })
        .collect()
}
