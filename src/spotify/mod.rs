//! # Spotify Integration Module
//!
//! The HTTP layer between tunevibe and the Spotify Web API.
//!
//! ```text
//! CLI Layer
//!     ↓
//! Spotify Integration Layer
//!     ├── auth             (PKCE login, refresh, client credentials)
//!     ├── playlists        (playlist by id, user's playlists)
//!     ├── features         (batched audio-feature lookups)
//!     └── recommendations  (seeded recommendation lookups)
//!     ↓
//! HTTP Layer (reqwest, JSON)
//! ```
//!
//! ## Tokens
//!
//! Public playlist reads, audio features and recommendations run on an app
//! token from the client-credentials flow
//! ([`AppTokenProvider`](crate::management::AppTokenProvider)). Listing the
//! user's own playlists needs the user token from `tunevibe auth`
//! ([`TokenManager`](crate::management::TokenManager)).
//!
//! ## Retries
//!
//! Every GET goes through [`get_json`], which retries `502 Bad Gateway` after
//! a fixed delay and honours `Retry-After` on `429 Too Many Requests` as long
//! as the requested delay is at most [`MAX_RETRY_AFTER_SECS`].

pub mod auth;
pub mod features;
pub mod playlists;
pub mod recommendations;

use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use tokio::time::sleep;

use crate::{Res, warning};

pub const MAX_RETRIES: u32 = 3;
pub const BAD_GATEWAY_DELAY_SECS: u64 = 10;
pub const MAX_RETRY_AFTER_SECS: u64 = 120;

/// Sends an authenticated GET and decodes the JSON body.
///
/// # Errors
///
/// Network failures, non-success statuses that are not retried (or that keep
/// failing after [`MAX_RETRIES`] attempts) and undecodable bodies.
pub async fn get_json<T: DeserializeOwned>(
    url: &str,
    query: &[(&str, String)],
    token: &str,
) -> Res<T> {
    let client = Client::new();
    let mut attempt = 0;

    loop {
        attempt += 1;
        let response = client
            .get(url)
            .query(query)
            .bearer_auth(token)
            .send()
            .await?;

        match response.status() {
            StatusCode::BAD_GATEWAY if attempt < MAX_RETRIES => {
                sleep(Duration::from_secs(BAD_GATEWAY_DELAY_SECS)).await;
                continue;
            }
            StatusCode::TOO_MANY_REQUESTS if attempt < MAX_RETRIES => {
                let retry_after = response
                    .headers()
                    .get("retry-after")
                    .and_then(|v| v.to_str().ok())
                    .and_then(|v| v.parse::<u64>().ok())
                    .unwrap_or(1);

                if retry_after <= MAX_RETRY_AFTER_SECS {
                    sleep(Duration::from_secs(retry_after)).await;
                    continue;
                }

                warning!(
                    "Spotify asked to retry after {} seconds, giving up on this request.",
                    retry_after
                );
            }
            _ => {}
        }

        let response = response.error_for_status()?;
        return Ok(response.json::<T>().await?);
    }
}
