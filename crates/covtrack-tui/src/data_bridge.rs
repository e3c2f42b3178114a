//! Data bridge: runs the two startup fetches and forwards each completion
//! into the TUI's action channel.

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use covtrack_core::{FetchHandles, TrackingClient, spawn_fetches};

use crate::action::Action;

/// Start both fetches. Outcomes arrive as [`Action::Fetched`]; a cancelled
/// token (app quitting) suppresses delivery.
pub fn spawn_data_bridge(
    client: TrackingClient,
    action_tx: mpsc::UnboundedSender<Action>,
    cancel: CancellationToken,
) -> FetchHandles {
    info!(base_url = %client.base_url(), "fetching daily series");
    spawn_fetches(client, cancel, move |outcome| {
        if action_tx.send(Action::Fetched(outcome)).is_err() {
            debug!("action channel closed; dropping fetch outcome");
        }
    })
}
