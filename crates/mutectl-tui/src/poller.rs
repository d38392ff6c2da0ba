//! Status poller — the repeating fetch behind the live view.
//!
//! One background task owns the cadence: fetches are sequential within a
//! single loop, so they can never overlap, and the `CancellationToken` is
//! the explicit stop signal — tearing the view down cancels the task
//! deterministically instead of leaking a repeating timer.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use mutectl_api::ControllerClient;

use crate::action::Action;

/// Spawn the polling task.
///
/// - `interval`: poll cadence from preferences (seconds-granularity).
/// - `refresh_rx`: out-of-band "fetch now" requests (the retry key, and
///   post-command refreshes).
/// - `cancel`: stop signal; the task exits promptly when cancelled.
pub fn spawn_status_poller(
    client: Arc<ControllerClient>,
    interval: Duration,
    action_tx: mpsc::UnboundedSender<Action>,
    mut refresh_rx: mpsc::UnboundedReceiver<()>,
    cancel: CancellationToken,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        // A slow fetch must not cause a burst of catch-up polls.
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                biased;

                () = cancel.cancelled() => break,

                _ = ticker.tick() => {}

                Some(()) = refresh_rx.recv() => {
                    // Explicit refresh resets the cadence so the next
                    // scheduled poll doesn't land immediately after.
                    ticker.reset();
                }
            }

            // The fetch happens inside the loop body: the next tick cannot
            // fire until this round trip resolves or times out.
            match client.status().await {
                Ok(status) => {
                    if action_tx.send(Action::StatusUpdated(status)).is_err() {
                        break;
                    }
                }
                Err(err) => {
                    warn!(error = %err, "status poll failed");
                    if action_tx.send(Action::StatusError(err.to_string())).is_err() {
                        break;
                    }
                }
            }
        }

        debug!("status poller shut down");
    })
}
