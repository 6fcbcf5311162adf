// src/shutdown.rs

//! Signal-driven shutdown.
//!
//! The child runs in its own process group, so a Ctrl-C on the terminal does
//! not reach it. The coordinator catches SIGINT/SIGTERM, stops the child the
//! same way a restart would, and exits the program.

use std::fmt;

use tokio::signal::unix::{Signal, SignalKind, signal};
use tokio::task::JoinHandle;
use tracing::{error, info};

use crate::errors::{EXIT_FATAL, EXIT_OK, Result};
use crate::supervisor::{SharedSupervisor, Supervisor};

/// Which termination signal was received.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShutdownSignal {
    Interrupt,
    Terminate,
}

impl fmt::Display for ShutdownSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShutdownSignal::Interrupt => write!(f, "SIGINT"),
            ShutdownSignal::Terminate => write!(f, "SIGTERM"),
        }
    }
}

/// Listens for termination signals and owns the status-0 exit.
pub struct ShutdownCoordinator {
    supervisor: SharedSupervisor,
    interrupt: Signal,
    terminate: Signal,
}

impl ShutdownCoordinator {
    /// Register the signal handlers. Call this before the first child is
    /// spawned so an early signal cannot leave it orphaned.
    pub fn install(supervisor: SharedSupervisor) -> Result<Self> {
        Ok(Self {
            supervisor,
            interrupt: signal(SignalKind::interrupt())?,
            terminate: signal(SignalKind::terminate())?,
        })
    }

    /// Run the listener on its own task. The task never finishes normally:
    /// handling a signal ends the whole process.
    pub fn spawn(self) -> JoinHandle<()> {
        tokio::spawn(self.listen())
    }

    async fn listen(mut self) {
        let signal = self.next_signal().await;
        info!(%signal, "termination signal received");

        // The guard is held across `exit` so the restart loop cannot start
        // another child in between. Signals arriving meanwhile stay queued
        // and die with the process.
        let mut supervisor = self.supervisor.lock().await;
        let code = shutdown(&mut supervisor).await;
        std::process::exit(code);
    }

    async fn next_signal(&mut self) -> ShutdownSignal {
        tokio::select! {
            _ = self.interrupt.recv() => ShutdownSignal::Interrupt,
            _ = self.terminate.recv() => ShutdownSignal::Terminate,
        }
    }
}

/// Stop whatever is running, with the configured stop mode, and return the
/// exit status the program should use.
pub async fn shutdown(supervisor: &mut Supervisor) -> i32 {
    match supervisor.stop().await {
        Ok(outcome) => {
            info!(?outcome, "managed process stopped; exiting");
            EXIT_OK
        }
        Err(err) => {
            error!(error = %err, "failed to stop managed process during shutdown");
            EXIT_FATAL
        }
    }
}
