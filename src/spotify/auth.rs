use std::{sync::Arc, time::Duration};

use base64::{Engine, engine::general_purpose::STANDARD};
use chrono::Utc;
use reqwest::{Client, Url};
use tokio::sync::Mutex;

use crate::{
    Res, config, error,
    error::Error,
    management::{CachedToken, TokenManager},
    server::start_api_server,
    success,
    types::{PkceToken, Token, TokenResponse},
    utils, warning,
};

/// Maximum time `auth` waits for the browser redirect.
pub const LOGIN_TIMEOUT_SECS: u64 = 60;

/// Runs the OAuth 2.0 PKCE login and stores the resulting user token.
///
/// 1. Generates a code verifier and its S256 challenge
/// 2. Starts the local callback server
/// 3. Opens the Spotify authorization page in the browser
/// 4. Waits for the callback handler to exchange the code
/// 5. Persists the token through [`TokenManager`]
///
/// Exits the process with an error message when configuration is missing, the
/// login times out or the token cannot be saved.
pub async fn auth(shared_state: Arc<Mutex<Option<PkceToken>>>) {
    let auth_url = match authorize_url(&shared_state).await {
        Ok(url) => url,
        Err(e) => error!("Cannot start authentication: {}", e),
    };

    let server_state = Arc::clone(&shared_state);
    tokio::spawn(async move {
        start_api_server(server_state).await;
    });

    if webbrowser::open(&auth_url).is_err() {
        warning!(
            "Failed to open browser. Please navigate to the following URL manually:\n{}",
            auth_url
        )
    }

    match wait_for_token(shared_state).await {
        Some(t) => {
            let token_manager = TokenManager::new(t);
            if let Err(e) = token_manager.persist().await {
                error!("Failed to save token to cache: {}", e);
            }

            success!("Authentication successful!");
        }
        None => {
            error!("Authentication failed or timed out.");
        }
    }
}

/// Builds the authorization URL and stores the verifier for the callback.
async fn authorize_url(shared_state: &Arc<Mutex<Option<PkceToken>>>) -> Res<String> {
    let code_verifier = utils::generate_code_verifier();
    let code_challenge = utils::generate_code_challenge(&code_verifier);

    let url = Url::parse_with_params(
        &config::spotify_auth_url(),
        &[
            ("client_id", config::spotify_client_id()?),
            ("response_type", "code".to_string()),
            ("redirect_uri", config::spotify_redirect_uri()?),
            ("code_challenge", code_challenge),
            ("code_challenge_method", "S256".to_string()),
            ("scope", config::spotify_scope()),
        ],
    )
    .map_err(|e| Error::InvalidUrl(e.to_string()))?;

    let mut lock = shared_state.lock().await;
    *lock = Some(PkceToken {
        code_verifier,
        token: None,
    });

    Ok(url.to_string())
}

/// Polls the shared state once per second until the callback stored a token.
async fn wait_for_token(shared_state: Arc<Mutex<Option<PkceToken>>>) -> Option<Token> {
    use std::time::Instant;

    let max_wait = Duration::from_secs(LOGIN_TIMEOUT_SECS);
    let start = Instant::now();

    while start.elapsed() < max_wait {
        let lock = shared_state.lock().await;
        if let Some(token) = lock.as_ref().and_then(|p| p.token.as_ref()) {
            return Some(token.clone());
        }
        drop(lock);
        tokio::time::sleep(Duration::from_secs(1)).await;
    }

    None
}

/// Exchanges a refresh token for a fresh user token.
///
/// Spotify may omit the refresh token in the response; the previous one is
/// kept in that case.
pub async fn refresh_token(refresh_token: &str) -> Res<Token> {
    let client_id = config::spotify_client_id()?;
    let res = Client::new()
        .post(config::spotify_token_url())
        .form(&[
            ("grant_type", "refresh_token"),
            ("refresh_token", refresh_token),
            ("client_id", client_id.as_str()),
        ])
        .send()
        .await?
        .error_for_status()
        .map_err(|e| Error::Auth(format!("token refresh rejected: {}", e)))?;

    let body: TokenResponse = res.json().await?;
    Ok(user_token(body, Some(refresh_token)))
}

/// Completes the PKCE flow by trading the authorization code for a token.
pub async fn exchange_code_pkce(code: &str, verifier: &str) -> Res<Token> {
    let client_id = config::spotify_client_id()?;
    let redirect_uri = config::spotify_redirect_uri()?;

    let res = Client::new()
        .post(config::spotify_token_url())
        .form(&[
            ("grant_type", "authorization_code"),
            ("client_id", client_id.as_str()),
            ("code", code),
            ("code_verifier", verifier),
            ("redirect_uri", redirect_uri.as_str()),
        ])
        .send()
        .await?
        .error_for_status()
        .map_err(|e| Error::Auth(format!("code exchange rejected: {}", e)))?;

    let body: TokenResponse = res.json().await?;
    Ok(user_token(body, None))
}

/// Requests an app token with the client-credentials flow.
///
/// App tokens cannot read user data but cover public playlists, audio
/// features and recommendations.
pub async fn client_credentials_token() -> Res<CachedToken> {
    let credentials = format!(
        "{}:{}",
        config::spotify_client_id()?,
        config::spotify_client_secret()?
    );

    let res = Client::new()
        .post(config::spotify_token_url())
        .header(
            "Authorization",
            format!("Basic {}", STANDARD.encode(credentials.as_bytes())),
        )
        .form(&[("grant_type", "client_credentials")])
        .send()
        .await?
        .error_for_status()
        .map_err(|e| Error::Auth(format!("client credentials rejected: {}", e)))?;

    let body: TokenResponse = res.json().await?;
    Ok(CachedToken::new(
        body.access_token,
        body.expires_in.unwrap_or(3600),
    ))
}

fn user_token(body: TokenResponse, previous_refresh: Option<&str>) -> Token {
    Token {
        access_token: body.access_token,
        refresh_token: body
            .refresh_token
            .or_else(|| previous_refresh.map(str::to_string))
            .unwrap_or_default(),
        scope: body.scope.unwrap_or_default(),
        expires_in: body.expires_in.unwrap_or(3600),
        obtained_at: Utc::now().timestamp() as u64,
    }
}
