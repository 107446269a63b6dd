use std::time::Duration;

use dash_logging::dash_debug;
use tokio::sync::watch;
use tokio::time::{interval, MissedTickBehavior};

use crate::dashboard::Dashboard;

/// How often an attached poller reconciles when the host does not say.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(4);

/// Periodic reconciliation with an explicit start/stop lifecycle, owned by
/// whatever hosts the dashboard.
///
/// The first tick fires immediately (one reconciliation on attach). Each
/// tick awaits its `list()` inline, so polls never pile up behind a slow
/// service; missed ticks are skipped, not bursted. Dropping the handle
/// stops the loop.
pub struct Poller {
    stop_tx: watch::Sender<bool>,
}

impl Poller {
    /// Spawns the poll loop on the current runtime.
    pub fn start(dashboard: Dashboard, poll_interval: Duration) -> Self {
        let (stop_tx, mut stop_rx) = watch::channel(false);
        tokio::spawn(async move {
            let mut tick = interval(poll_interval);
            tick.set_missed_tick_behavior(MissedTickBehavior::Skip);
            dash_debug!("poller started, reconciling every {poll_interval:?}");
            loop {
                tokio::select! {
                    biased;
                    _ = stop_rx.changed() => break,
                    _ = tick.tick() => dashboard.list().await,
                }
            }
            dash_debug!("poller stopped");
        });
        Self { stop_tx }
    }

    /// Stops future polls immediately. A reconciliation already in flight
    /// is left to finish; its write lands in the dashboard the caller still
    /// owns, bounded by the staleness guard.
    pub fn stop(&self) {
        let _ = self.stop_tx.send(true);
    }
}

impl Drop for Poller {
    fn drop(&mut self) {
        self.stop();
    }
}
