//! # Analysis Module
//!
//! Pure computations over a playlist's audio features. Nothing in here performs
//! I/O; every function is a deterministic function of its input.
//!
//! ```text
//! Vec<TrackAudioFeatureItem>
//!          ↓
//! aggregate()        → AggregateResult (averages, normalized tempo/loudness, mood score)
//!          ↓
//! to_chart_data()    → labels / values / colors for the six-bar chart
//! describe()         → qualitative sentence for the playlist
//! bubble_points()    → per-track scatter points
//! ```
//!
//! Tracks without audio features are excluded from every column. When no
//! track has features, [`aggregate`] fails with
//! [`Error::InsufficientData`](crate::error::Error::InsufficientData) instead
//! of producing zeros.

pub mod aggregate;
pub mod bubble;
pub mod chart;
pub mod describe;

pub use aggregate::{AggregateResult, Percentages, aggregate};
pub use bubble::{BubblePoint, FeatureKey, bubble_points};
pub use chart::{ChartData, to_chart_data};
pub use describe::describe;
