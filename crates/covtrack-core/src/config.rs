// ── Runtime configuration ──
//
// Describes *where* to fetch from and what the screen shows first. Built by
// the TUI from the config file and flags; core never reads files itself.

use std::time::Duration;

use url::Url;

use covtrack_api::{TrackingClient, TransportConfig};

use crate::error::CoreError;
use crate::model::SelectionState;

/// Everything the screen needs to start fetching.
#[derive(Debug, Clone)]
pub struct TrackerConfig {
    /// API root, e.g. `https://api.covidtracking.com/v1/`.
    pub base_url: Url,
    /// Per-request timeout.
    pub timeout: Duration,
    /// Selection applied when the national series first loads.
    pub default_selection: SelectionState,
}

impl TrackerConfig {
    /// Build the HTTP client described by this config.
    pub fn client(&self) -> Result<TrackingClient, CoreError> {
        let transport = TransportConfig::with_timeout(self.timeout);
        Ok(TrackingClient::new(self.base_url.clone(), &transport)?)
    }
}
