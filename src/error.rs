//! Error type shared by every tunevibe module.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// No track in the input carried audio features.
    #[error("insufficient data: no track has audio features available")]
    InsufficientData,

    #[error("invalid Spotify playlist reference: {0}")]
    InvalidPlaylistUrl(String),

    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    #[error("missing configuration value {0}, add it to your .env file")]
    MissingConfig(&'static str),

    #[error("cannot load .env file: {0}")]
    Env(#[from] dotenv::Error),

    #[error("Spotify request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("authentication failed: {0}")]
    Auth(String),

    #[error("background task failed: {0}")]
    Task(#[from] tokio::task::JoinError),

    #[error("request limiter closed: {0}")]
    Limiter(#[from] tokio::sync::AcquireError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
