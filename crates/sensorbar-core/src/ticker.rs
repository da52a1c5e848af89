//! Refresh timer.
//!
//! The ticker only signals; the owner of the surface runs the actual update
//! when it receives the signal.

use std::time::Duration;
use tokio::sync::{mpsc, watch};
use tracing::debug;

/// Sleep-then-signal loop with an interruptible wait.
#[derive(Debug, Clone, Copy)]
pub struct Ticker {
    interval: Duration,
}

impl Ticker {
    pub fn new(interval: Duration) -> Self {
        Self { interval }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Sends a refresh request, then waits one interval, until `shutdown`
    /// turns true, its sender is dropped, or the refresh receiver is gone.
    ///
    /// The first request is sent immediately.
    pub async fn run(self, refresh: mpsc::Sender<()>, mut shutdown: watch::Receiver<bool>) {
        loop {
            if *shutdown.borrow() {
                break;
            }

            // A slow owner can leave the slot full; shutdown still wins
            tokio::select! {
                sent = refresh.send(()) => {
                    if sent.is_err() {
                        debug!("Refresh receiver closed, stopping ticker");
                        break;
                    }
                }
                changed = shutdown.changed() => {
                    if changed.is_err() {
                        break;
                    }
                    continue;
                }
            }

            tokio::select! {
                _ = tokio::time::sleep(self.interval) => {}
                changed = shutdown.changed() => {
                    if changed.is_err() {
                        break;
                    }
                }
            }
        }
        debug!("Ticker stopped");
    }
}
