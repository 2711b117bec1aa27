mod saved;
mod token;

pub use saved::SavedPlaylistManager;
pub use token::AppTokenProvider;
pub use token::CachedToken;
pub use token::TokenManager;
pub use token::USER_TOKEN_REFRESH_MARGIN_SECS;
pub use token::is_user_token_expired;
