//! Fetch orchestration: the two independent one-shot requests a screen
//! issues at startup.
//!
//! Each request runs in its own tokio task and races the screen's
//! [`CancellationToken`]. A completed request hands its [`FetchOutcome`] to
//! the `deliver` callback; a cancelled one delivers nothing, so nothing can
//! reach a screen that is already gone.

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use covtrack_api::TrackingClient;

use crate::error::CoreError;
use crate::series::{self, Series, StateSeriesMap};

/// Result of one of the two startup fetches.
#[derive(Debug, Clone)]
pub enum FetchOutcome {
    National(Result<Series, CoreError>),
    States(Result<StateSeriesMap, CoreError>),
}

/// Join handles for the two fetch tasks.
#[derive(Debug)]
pub struct FetchHandles {
    pub national: JoinHandle<()>,
    pub states: JoinHandle<()>,
}

impl FetchHandles {
    /// Wait for both tasks to finish (delivered or cancelled). A task that
    /// panicked is logged and does not affect the other.
    pub async fn join(self) {
        let (national, states) = tokio::join!(self.national, self.states);
        if let Err(e) = national {
            warn!(error = %e, "national fetch task did not complete");
        }
        if let Err(e) = states {
            warn!(error = %e, "states fetch task did not complete");
        }
    }
}

/// Fetch and normalize the national series.
pub async fn fetch_national(client: &TrackingClient) -> Result<Series, CoreError> {
    let entries = client.national_daily().await?;
    let series = series::normalize_national(entries)?;
    info!(days = series.len(), "national series loaded");
    Ok(series)
}

/// Fetch, normalize and group the per-state series.
pub async fn fetch_states(client: &TrackingClient) -> Result<StateSeriesMap, CoreError> {
    let entries = client.states_daily().await?;
    let groups = series::normalize_states(entries)?;
    info!(states = groups.len(), "per-state series loaded");
    Ok(groups)
}

/// Spawn both fetches. There is no ordering between them; `deliver` may see
/// the states outcome first, only one outcome, or none at all.
pub fn spawn_fetches<F>(client: TrackingClient, cancel: CancellationToken, deliver: F) -> FetchHandles
where
    F: Fn(FetchOutcome) + Clone + Send + 'static,
{
    let national = {
        let client = client.clone();
        let cancel = cancel.clone();
        let deliver = deliver.clone();
        tokio::spawn(async move {
            tokio::select! {
                biased;

                () = cancel.cancelled() => debug!("national fetch cancelled"),

                result = fetch_national(&client) => {
                    if let Err(ref e) = result {
                        warn!(error = %e, "national fetch failed");
                    }
                    if !cancel.is_cancelled() {
                        deliver(FetchOutcome::National(result));
                    }
                }
            }
        })
    };

    let states = tokio::spawn(async move {
        tokio::select! {
            biased;

            () = cancel.cancelled() => debug!("states fetch cancelled"),

            result = fetch_states(&client) => {
                if let Err(ref e) = result {
                    warn!(error = %e, "states fetch failed");
                }
                if !cancel.is_cancelled() {
                    deliver(FetchOutcome::States(result));
                }
            }
        }
    });

    FetchHandles { national, states }
}
