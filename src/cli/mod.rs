//! # CLI Module
//!
//! User-facing commands. Each command resolves tokens, calls into
//! [`crate::spotify`] for data, hands the data to [`crate::analysis`] and
//! renders the outcome as tables (tabled) or JSON.
//!
//! ```text
//! CLI Layer (User Interface)
//!     ↓
//! Analysis Layer (aggregation, chart, description)   Management Layer (tokens, saved playlists)
//!     ↓
//! Spotify Layer (HTTP requests)
//! ```
//!
//! ## Commands
//!
//! - [`auth`] - Spotify login (PKCE), needed for [`playlists`]
//! - [`analyze`] - Mood summary, chart and description for a playlist
//! - [`playlists`] - Lists the logged-in user's playlists
//! - [`list_saved`], [`save`], [`remove_saved`] - Local saved playlist store
//! - [`recommend`] - Recommendations seeded from a playlist's mood
//!
//! Unrecoverable failures print through `error!` and exit with status 1.
//! Partial failures, such as tracks whose audio features could not be
//! fetched, are reported with `warning!` and the command carries on.

mod analyze;
mod auth;
mod playlists;
mod recommend;
mod saved;

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

pub use analyze::BubbleAxes;
pub use analyze::analyze;
pub use auth::auth;
pub use playlists::playlists;
pub use recommend::recommend;
pub use saved::list_saved;
pub use saved::remove_saved;
pub use saved::save;

pub(crate) fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_style(
        ProgressStyle::with_template("{spinner:.blue} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
    );
    pb
}
