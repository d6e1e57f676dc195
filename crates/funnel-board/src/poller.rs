use crate::FunnelBoardController;

use std::sync::Arc;
use std::time::Duration;

use funnel_client::ChallengeBackend;
use log::{debug, warn};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

/// Handle to a background reload loop. Dropping it stops the loop.
pub struct BoardPoller {
    stop_tx: watch::Sender<bool>,
    handle: JoinHandle<()>,
}

impl BoardPoller {
    /// Ask the loop to stop after the load in progress, if any
    pub fn stop(&self) {
        let _ = self.stop_tx.send(true);
    }

    /// Stop the loop and wait for it to exit
    pub async fn shutdown(self) {
        self.stop();
        if let Err(e) = self.handle.await {
            warn!("Board poller ended abnormally: {}", e);
        }
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

/// Reload the board every `interval`, starting immediately.
pub fn spawn_poller<B>(controller: Arc<FunnelBoardController<B>>, interval: Duration) -> BoardPoller
where
    B: ChallengeBackend + 'static,
{
    let (stop_tx, mut stop_rx) = watch::channel(false);

    let handle = tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        debug!("Board poller started (every {:?})", interval);

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    // Failures are already in the view
                    if let Err(e) = controller.load().await {
                        debug!("Polled load failed: {}", e);
                    }
                }
                // Fires on stop() and when the handle is dropped
                _ = stop_rx.changed() => break,
            }
        }

        debug!("Board poller stopped");
    });

    BoardPoller { stop_tx, handle }
}
