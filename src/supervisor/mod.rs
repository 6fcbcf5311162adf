// src/supervisor/mod.rs

//! Managed child process lifecycle.
//!
//! - [`process`] wraps one spawned child: its process group, liveness, and
//!   the graceful-then-forced stop procedure.
//! - [`supervisor`] owns the single process slot and its state machine. It is
//!   the only thing allowed to spawn, signal or reap the child.

pub mod process;
pub mod supervisor;

use std::time::Duration;

pub use process::{ManagedProcess, StopOutcome};
pub use supervisor::{ProcessState, SharedSupervisor, Supervisor};

/// How long a process group gets to exit after the termination signal before
/// the leader is killed.
pub const KILL_TIMEOUT: Duration = Duration::from_secs(2);

/// Program used to interpret the command line (`<shell> -c <cmd>`).
pub const DEFAULT_SHELL: &str = "bash";

/// How `stop()` treats a running process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StopMode {
    /// Signal the process group, kill the leader if it outlives the timeout.
    #[default]
    Graceful,
    /// Send nothing; wait for the process to exit on its own.
    WaitForExit,
}

impl StopMode {
    pub fn from_wait_flag(wait: bool) -> Self {
        if wait {
            StopMode::WaitForExit
        } else {
            StopMode::Graceful
        }
    }
}

/// Supervisor settings. Fixed for the lifetime of the process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SupervisorConfig {
    pub command: String,
    pub shell: String,
    pub stop_mode: StopMode,
    pub kill_timeout: Duration,
}

impl SupervisorConfig {
    pub fn new(command: impl Into<String>, stop_mode: StopMode) -> Self {
        Self {
            command: command.into(),
            shell: DEFAULT_SHELL.to_string(),
            stop_mode,
            kill_timeout: KILL_TIMEOUT,
        }
    }

    pub fn with_shell(mut self, shell: impl Into<String>) -> Self {
        self.shell = shell.into();
        self
    }
}
