// src/engine/runtime.rs

use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::errors::Result;
use crate::supervisor::SharedSupervisor;
use crate::watch::Notification;

/// Options that influence how the runtime behaves.
#[derive(Debug, Clone, Copy)]
pub struct RuntimeOptions {
    /// Start the command before the first notification arrives.
    pub run_immediately: bool,
}

impl Default for RuntimeOptions {
    fn default() -> Self {
        Self {
            run_immediately: true,
        }
    }
}

/// The restart loop.
///
/// Notifications are handled strictly one at a time: each runs a full
/// `stop()` followed by `start()`, and the next notification is not read until
/// that `start()` has returned. Nothing is coalesced.
pub struct Runtime {
    supervisor: SharedSupervisor,
    notifications: mpsc::Receiver<Notification>,
    options: RuntimeOptions,
    cycles: u64,
}

impl Runtime {
    pub fn new(
        supervisor: SharedSupervisor,
        notifications: mpsc::Receiver<Notification>,
        options: RuntimeOptions,
    ) -> Self {
        Self {
            supervisor,
            notifications,
            options,
            cycles: 0,
        }
    }

    /// Main loop. Yields the number of completed restart cycles.
    ///
    /// Returns once the notification stream closes (the watcher gave
    /// up); whatever process is running at that point is left alone. Any
    /// supervisor error is fatal and returned immediately.
    pub async fn run(mut self) -> Result<u64> {
        if self.options.run_immediately {
            self.supervisor.lock().await.start()?;
        }

        info!("watchrun runtime started");

        while let Some(Notification) = self.notifications.recv().await {
            self.restart().await?;
        }

        warn!(
            cycles = self.cycles,
            "notification stream closed; the command will not be restarted again"
        );
        Ok(self.cycles)
    }

    /// One restart cycle.
    ///
    /// The lock is released between the two halves so a shutdown can claim
    /// the supervisor after the stop and before the next start.
    async fn restart(&mut self) -> Result<()> {
        let outcome = self.supervisor.lock().await.stop().await?;
        debug!(?outcome, "stop finished");

        let pid = self.supervisor.lock().await.start()?;
        self.cycles += 1;
        debug!(pid, cycle = self.cycles, "restart cycle complete");
        Ok(())
    }
}
