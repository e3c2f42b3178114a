//! Async Rust client for the COVID Tracking Project daily statistics API.
//!
//! Two read-only endpoints are exposed through [`TrackingClient`]:
//!
//! - `us/daily.json`: national daily aggregates, newest first.
//! - `states/daily.json`: per-state daily records, newest first.
//!
//! Responses are decoded into loosely-typed [`DailyEntry`] rows; domain
//! normalization (chronological order, grouping) lives in `covtrack-core`.

pub mod client;
pub mod error;
pub mod models;
pub mod transport;

pub use client::{DEFAULT_BASE_URL, Endpoint, TrackingClient};
pub use error::Error;
pub use models::{DailyEntry, DateField};
pub use transport::TransportConfig;
