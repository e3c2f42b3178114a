//! Domain layer between `covtrack-api` and the terminal UI.
//!
//! - **[`SparkSource`] / [`SparkAdapter`]**: the chart-facing data contract:
//!   count, record lookup, metric projection and the visible-window lower
//!   bound. Pull-based: the chart re-reads when the adapter's generation
//!   changes.
//!
//! - **[`ScreenController`]**: owns the [`SelectionState`], the two fetched
//!   result slots (national series, per-state map) and the summary label
//!   state. Driven entirely by method calls from the UI loop.
//!
//! - **[`fetch`]**: spawns the two independent fetch tasks and delivers
//!   each [`FetchOutcome`] through a callback, honoring a
//!   `CancellationToken` tied to the screen's lifetime.
//!
//! - **Domain model** ([`model`]): [`DailyRecord`], [`Metric`],
//!   [`TimeWindow`], [`Jurisdiction`].

pub mod config;
pub mod controller;
pub mod convert;
pub mod error;
pub mod fetch;
pub mod model;
pub mod series;
pub mod spark;

// ── Primary re-exports ──────────────────────────────────────────────
pub use covtrack_api::{DEFAULT_BASE_URL, TrackingClient};
pub use config::TrackerConfig;
pub use controller::{LoadState, ScreenController, Summary};
pub use error::CoreError;
pub use fetch::{FetchHandles, FetchOutcome, spawn_fetches};
pub use model::{DailyRecord, Jurisdiction, Metric, SelectionState, TimeWindow};
pub use series::{Series, StateSeriesMap};
pub use spark::{SparkAdapter, SparkSource};
