//! Display-refresh clock
//!
//! Emits one [`FrameTick`] per frame until shut down. Observers and the
//! pointer light are advanced on these ticks, never inside input handlers.

use std::time::Duration;

use tokio::sync::{mpsc, watch};
use tracing::{debug, info, warn};

/// Frame interval used when the configured rate is zero
pub const FALLBACK_FRAME: Duration = Duration::from_millis(16);

/// Shortest frame interval; `tokio::time::interval` rejects a zero period
pub const MIN_FRAME: Duration = Duration::from_millis(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameTick {
    /// Frames emitted before this one
    pub index: u64,
}

pub struct FrameClock {
    period: Duration,
    tx: mpsc::UnboundedSender<FrameTick>,
}

impl FrameClock {
    pub fn new(fps: u32, tx: mpsc::UnboundedSender<FrameTick>) -> Self {
        Self {
            period: Self::period_for(fps),
            tx,
        }
    }

    pub fn period_for(fps: u32) -> Duration {
        if fps == 0 {
            FALLBACK_FRAME
        } else {
            Duration::from_micros(1_000_000 / fps as u64).max(MIN_FRAME)
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Tick until `shutdown` flips to true or the receiver goes away
    pub async fn run(self, mut shutdown: watch::Receiver<bool>) {
        info!("Frame clock started: {:?} per frame", self.period);

        let mut interval = tokio::time::interval(self.period);
        interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
        // The first tick completes immediately
        interval.tick().await;

        let mut index = 0;
        loop {
            tokio::select! {
                result = shutdown.changed() => {
                    if result.is_err() || *shutdown.borrow() {
                        debug!("Frame clock received shutdown signal");
                        break;
                    }
                }

                _ = interval.tick() => {
                    if self.tx.send(FrameTick { index }).is_err() {
                        warn!("Failed to send frame tick: receiver dropped");
                        break;
                    }
                    index += 1;
                }
            }
        }

        info!("Frame clock stopped after {} frames", index);
    }

    /// Spawn onto the current runtime
    pub fn spawn(self, shutdown: watch::Receiver<bool>) -> tokio::task::JoinHandle<()> {
        tokio::spawn(self.run(shutdown))
    }
}
