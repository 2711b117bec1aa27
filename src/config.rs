//! Configuration management for tunevibe.
//!
//! Values come from environment variables, optionally loaded from a `.env`
//! file in the local data directory:
//! 1. Environment variables (highest priority)
//! 2. `<data_local_dir>/tunevibe/.env`
//! 3. Built-in defaults for the public Spotify endpoints

use std::{env, path::PathBuf};

use crate::{Res, error::Error};

pub const DEFAULT_SPOTIFY_API_URL: &str = "https://api.spotify.com/v1";
pub const DEFAULT_SPOTIFY_AUTH_URL: &str = "https://accounts.spotify.com/authorize";
pub const DEFAULT_SPOTIFY_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";
pub const DEFAULT_SERVER_ADDRESS: &str = "127.0.0.1:8888";
pub const DEFAULT_SPOTIFY_SCOPE: &str = "playlist-read-private playlist-read-collaborative";

/// Loads environment variables from `<data_local_dir>/tunevibe/.env`.
///
/// Creates the directory if needed. A missing `.env` file is not an error,
/// since every value can also be supplied through the process environment.
///
/// # Directory Structure
///
/// - Linux: `~/.local/share/tunevibe/.env`
/// - macOS: `~/Library/Application Support/tunevibe/.env`
/// - Windows: `%LOCALAPPDATA%/tunevibe/.env`
///
/// # Errors
///
/// Returns an error if the directory cannot be created or the file exists but
/// cannot be parsed.
pub async fn load_env() -> Res<()> {
    let path = data_dir().join(".env");
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent).await?;
    }

    if path.is_file() {
        dotenv::from_path(&path)?;
    }
    Ok(())
}

/// Root directory for every file tunevibe writes (`.env`, caches).
pub fn data_dir() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("tunevibe");
    path
}

fn required(key: &'static str) -> Res<String> {
    match env::var(key) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(Error::MissingConfig(key)),
    }
}

fn with_default(key: &str, default: &str) -> String {
    env::var(key)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}

/// Address the local OAuth callback server binds to (`SERVER_ADDRESS`).
pub fn server_addr() -> String {
    with_default("SERVER_ADDRESS", DEFAULT_SERVER_ADDRESS)
}

/// Spotify application client id (`SPOTIFY_CLIENT_ID`).
pub fn spotify_client_id() -> Res<String> {
    required("SPOTIFY_CLIENT_ID")
}

/// Spotify application client secret (`SPOTIFY_CLIENT_SECRET`).
///
/// Only the client-credentials flow uses it; the user login runs PKCE and
/// never sends the secret.
pub fn spotify_client_secret() -> Res<String> {
    required("SPOTIFY_CLIENT_SECRET")
}

/// OAuth redirect URI registered for the application (`SPOTIFY_REDIRECT_URI`).
pub fn spotify_redirect_uri() -> Res<String> {
    required("SPOTIFY_REDIRECT_URI")
}

/// Scopes requested during login (`SPOTIFY_SCOPE`).
pub fn spotify_scope() -> String {
    with_default("SPOTIFY_SCOPE", DEFAULT_SPOTIFY_SCOPE)
}

/// Spotify authorization page (`SPOTIFY_AUTH_URL`).
pub fn spotify_auth_url() -> String {
    with_default("SPOTIFY_AUTH_URL", DEFAULT_SPOTIFY_AUTH_URL)
}

/// Spotify Web API base URL (`SPOTIFY_API_URL`).
pub fn spotify_api_url() -> String {
    with_default("SPOTIFY_API_URL", DEFAULT_SPOTIFY_API_URL)
}

/// Spotify token endpoint (`SPOTIFY_TOKEN_URL`).
pub fn spotify_token_url() -> String {
    with_default("SPOTIFY_TOKEN_URL", DEFAULT_SPOTIFY_TOKEN_URL)
}
