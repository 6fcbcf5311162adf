// src/supervisor/supervisor.rs

use std::fmt;
use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::debug;

use crate::errors::{Result, WatchrunError};
use crate::report::{LifecycleEvent, Reporter};
use crate::supervisor::SupervisorConfig;
use crate::supervisor::process::{ManagedProcess, StopOutcome};

/// State of the single managed-process slot.
///
/// `Stopped → Starting → Running → Stopping → Stopped`. `Starting` and
/// `Stopping` are only observable from inside `start()`/`stop()`, since both
/// run under the supervisor lock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProcessState {
    #[default]
    Stopped,
    Starting,
    Running {
        pid: u32,
    },
    Stopping {
        pid: u32,
    },
}

impl ProcessState {
    pub fn is_running(&self) -> bool {
        matches!(self, ProcessState::Running { .. })
    }
}

impl fmt::Display for ProcessState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProcessState::Stopped => write!(f, "stopped"),
            ProcessState::Starting => write!(f, "starting"),
            ProcessState::Running { pid } => write!(f, "running (pid {pid})"),
            ProcessState::Stopping { pid } => write!(f, "stopping (pid {pid})"),
        }
    }
}

/// The supervisor shared between the restart loop and the shutdown
/// coordinator. Holding the lock is what serializes `start()` and `stop()`.
pub type SharedSupervisor = Arc<Mutex<Supervisor>>;

/// Owner of the one managed process.
///
/// At most one [`ManagedProcess`] exists at a time: `start()` refuses to run
/// while a process is held, and the handle is only released by `stop()`.
#[derive(Debug)]
pub struct Supervisor {
    config: SupervisorConfig,
    reporter: Arc<dyn Reporter>,
    state: ProcessState,
    current: Option<ManagedProcess>,
}

impl Supervisor {
    pub fn new(config: SupervisorConfig, reporter: Arc<dyn Reporter>) -> Self {
        Self {
            config,
            reporter,
            state: ProcessState::Stopped,
            current: None,
        }
    }

    pub fn into_shared(self) -> SharedSupervisor {
        Arc::new(Mutex::new(self))
    }

    pub fn config(&self) -> &SupervisorConfig {
        &self.config
    }

    pub fn state(&self) -> ProcessState {
        self.state
    }

    pub fn current_pid(&self) -> Option<u32> {
        self.current.as_ref().map(ManagedProcess::pid)
    }

    /// Spawn the command and hold on to it. Returns the new pid.
    ///
    /// A spawn failure is fatal to the program; the slot is left `Stopped`.
    pub fn start(&mut self) -> Result<u32> {
        if let Some(pid) = self.current_pid() {
            return Err(WatchrunError::AlreadyRunning { pid });
        }

        self.state = ProcessState::Starting;
        self.reporter.report(&LifecycleEvent::Starting {
            command: self.config.command.clone(),
        });

        let process = match ManagedProcess::spawn(&self.config.shell, &self.config.command) {
            Ok(process) => process,
            Err(err) => {
                self.state = ProcessState::Stopped;
                return Err(err);
            }
        };

        let pid = process.pid();
        self.current = Some(process);
        self.state = ProcessState::Running { pid };
        self.reporter.report(&LifecycleEvent::Started { pid });
        Ok(pid)
    }

    /// Stop the held process using the configured [`StopMode`](crate::supervisor::StopMode).
    ///
    /// Returns `None` when there was nothing to stop. The handle is dropped
    /// once the stop procedure has finished, whatever its outcome.
    pub async fn stop(&mut self) -> Result<Option<StopOutcome>> {
        let Some(process) = self.current.take() else {
            debug!("stop requested with no managed process");
            return Ok(None);
        };

        self.state = ProcessState::Stopping { pid: process.pid() };
        let result = process
            .stop(
                self.config.stop_mode,
                self.config.kill_timeout,
                self.reporter.as_ref(),
            )
            .await;
        self.state = ProcessState::Stopped;

        result.map(Some)
    }

    /// Is the held process still alive? `false` when nothing is held.
    pub fn is_alive(&mut self) -> bool {
        self.current.as_mut().is_some_and(ManagedProcess::is_alive)
    }
}
