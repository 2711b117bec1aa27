use std::{
    path::PathBuf,
    time::{Duration, Instant},
};

use chrono::Utc;

use crate::{Res, config, spotify, types::Token};

/// User tokens are refreshed this many seconds before they expire.
pub const USER_TOKEN_REFRESH_MARGIN_SECS: u64 = 240;
/// App tokens are treated as expired this many seconds early.
pub const APP_TOKEN_EXPIRY_MARGIN_SECS: u64 = 60;

/// The logged-in user's OAuth token, cached on disk between runs.
pub struct TokenManager {
    token: Token,
}

impl TokenManager {
    pub fn new(token: Token) -> Self {
        TokenManager { token }
    }

    pub async fn load() -> Res<Self> {
        let content = async_fs::read_to_string(Self::token_path()).await?;
        let token: Token = serde_json::from_str(&content)?;
        Ok(Self { token })
    }

    pub async fn persist(&self) -> Res<()> {
        let path = Self::token_path();
        if let Some(parent) = path.parent() {
            async_fs::create_dir_all(parent).await?;
        }

        let json = serde_json::to_string_pretty(&self.token)?;
        async_fs::write(path, json).await?;
        Ok(())
    }

    /// Returns an access token, refreshing and persisting it first when it is
    /// about to expire.
    pub async fn get_valid_token(&mut self) -> Res<String> {
        if self.is_expired() {
            self.token = spotify::auth::refresh_token(&self.token.refresh_token).await?;
            self.persist().await?;
        }

        Ok(self.token.access_token.clone())
    }

    pub fn is_expired(&self) -> bool {
        is_user_token_expired(&self.token, Utc::now().timestamp() as u64)
    }

    fn token_path() -> PathBuf {
        config::data_dir().join("cache/token.json")
    }
}

/// Whether `token` is inside its refresh margin at unix time `now`.
pub fn is_user_token_expired(token: &Token, now: u64) -> bool {
    let expires_at = token.obtained_at + token.expires_in;
    now + USER_TOKEN_REFRESH_MARGIN_SECS >= expires_at
}

/// An app access token together with the instant it stops being usable.
#[derive(Debug, Clone)]
pub struct CachedToken {
    pub access_token: String,
    pub expires_at: Instant,
}

impl CachedToken {
    /// `expires_in` is the lifetime Spotify reported, in seconds.
    pub fn new(access_token: String, expires_in: u64) -> Self {
        let lifetime = expires_in.saturating_sub(APP_TOKEN_EXPIRY_MARGIN_SECS);
        Self {
            access_token,
            expires_at: Instant::now() + Duration::from_secs(lifetime),
        }
    }

    pub fn is_valid_at(&self, now: Instant) -> bool {
        now < self.expires_at
    }
}

/// Client-credentials token holder.
///
/// Fetches a token on first use and again only after the cached one expired.
/// Owned by whoever created it; nothing is shared process-wide.
///
/// App tokens read public playlists, audio features and recommendations. They
/// are kept in memory only, so every command invocation starts without one.
///
/// # Example
///
/// ```
/// let mut tokens = AppTokenProvider::new();
/// let token = tokens.get_valid_token().await?; // client-credentials request
/// let again = tokens.get_valid_token().await?; // served from the cache
/// assert_eq!(token, again);
/// ```
#[derive(Debug, Default)]
pub struct AppTokenProvider {
    cached: Option<CachedToken>,
}

impl AppTokenProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts from an already obtained token.
    pub fn with_token(token: CachedToken) -> Self {
        Self {
            cached: Some(token),
        }
    }

    pub fn needs_refresh(&self, now: Instant) -> bool {
        !self.cached.as_ref().is_some_and(|t| t.is_valid_at(now))
    }

    /// Returns the cached access token, requesting a new one first when none is
    /// cached or the cached one reached its `expires_at`.
    ///
    /// # Returns
    ///
    /// - `Ok(String)` - Access token usable as a bearer token
    /// - `Err(Error)` - Missing client credentials or a rejected token request
    pub async fn get_valid_token(&mut self) -> Res<String> {
        if let Some(token) = self.cached.as_ref().filter(|t| t.is_valid_at(Instant::now())) {
            return Ok(token.access_token.clone());
        }

        let token = spotify::auth::client_credentials_token().await?;
        let access_token = token.access_token.clone();
        self.cached = Some(token);
        Ok(access_token)
    }
}
