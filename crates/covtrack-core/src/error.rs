// ── Core error types ──
//
// User-facing errors from covtrack-core. Consumers never see reqwest or
// serde errors directly; the `From<covtrack_api::Error>` impl flattens
// transport-layer failures into message-carrying variants so the type
// stays `Clone` and can travel inside UI actions.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    // ── Fetch errors ─────────────────────────────────────────────────
    #[error("Cannot reach {endpoint}: {reason}")]
    FetchFailed { endpoint: String, reason: String },

    #[error("{endpoint} answered HTTP {status}")]
    Http { endpoint: String, status: u16 },

    #[error("{endpoint} returned no data")]
    EmptyResponse { endpoint: String },

    #[error("Malformed response: {message}")]
    InvalidData { message: String },

    // ── Data source errors ───────────────────────────────────────────
    #[error("Index {index} out of range for a series of {count} records")]
    OutOfRange { index: usize, count: usize },

    #[error("No series for state '{code}'")]
    StateNotFound { code: String },

    #[error("Data not loaded yet")]
    NotReady,

    // ── Configuration errors ─────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl CoreError {
    /// Whether this error came from the network side rather than from a
    /// contract violation inside the app.
    pub fn is_fetch_error(&self) -> bool {
        matches!(
            self,
            Self::FetchFailed { .. }
                | Self::Http { .. }
                | Self::EmptyResponse { .. }
                | Self::InvalidData { .. }
        )
    }
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<covtrack_api::Error> for CoreError {
    fn from(err: covtrack_api::Error) -> Self {
        match err {
            covtrack_api::Error::Transport(ref e) => {
                let endpoint = e
                    .url()
                    .map_or_else(|| "<unknown>".into(), |u| u.path().to_string());
                let reason = if e.is_timeout() {
                    "request timed out".to_string()
                } else if e.is_connect() {
                    "connection failed".to_string()
                } else {
                    e.to_string()
                };
                CoreError::FetchFailed { endpoint, reason }
            }
            covtrack_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("Invalid URL: {e}"),
            },
            covtrack_api::Error::ClientBuild(message) => CoreError::Config { message },
            covtrack_api::Error::Http {
                endpoint, status, ..
            } => CoreError::Http { endpoint, status },
            covtrack_api::Error::EmptyBody { endpoint } => CoreError::EmptyResponse { endpoint },
            covtrack_api::Error::Deserialization { message, body: _ } => {
                CoreError::InvalidData { message }
            }
        }
    }
}
