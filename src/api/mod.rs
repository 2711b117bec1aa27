//! # API Module
//!
//! HTTP endpoints served by the local callback server during `tunevibe auth`.
//!
//! - [`callback`] receives Spotify's OAuth redirect and exchanges the
//!   authorization code for a user token (PKCE).
//! - [`health`] reports status and version, handy to check that the server is
//!   reachable on `SERVER_ADDRESS` before logging in.
//!
//! ```rust,ignore
//! use axum::{Router, routing::get};
//! use tunevibe::api::{callback, health};
//!
//! let app = Router::new()
//!     .route("/callback", get(callback))
//!     .route("/health", get(health));
//! ```

mod callback;
mod health;

pub use callback::callback;
pub use health::health;
