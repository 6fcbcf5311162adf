// src/report.rs

//! Lifecycle reporting.
//!
//! The supervisor and the watcher describe what they are doing through a
//! [`Reporter`] handed to them at construction time, instead of writing to a
//! shared console. Production uses [`TracingReporter`]; tests plug in a
//! recorder and assert on the sequence of events.

use std::fmt::Debug;
use std::path::PathBuf;

use tracing::{info, warn};

/// Something observable that happened to the managed process or the watched
/// tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LifecycleEvent {
    /// About to spawn the command.
    Starting { command: String },
    /// The command is running as process `pid` (also its group id).
    Started { pid: u32 },
    /// Waiting for the process to exit on its own (wait-for-exit mode).
    Waiting { pid: u32 },
    /// The process group was asked to terminate.
    Stopping { pid: u32 },
    /// The process exited; `code` is `None` when it died from a signal or the
    /// status could not be collected.
    Stopped { pid: u32, code: Option<i32> },
    /// The leader ignored the termination request and was killed.
    Killed { pid: u32 },
    /// A write was observed under the watched tree.
    Change { paths: Vec<PathBuf> },
}

/// Sink for [`LifecycleEvent`]s.
pub trait Reporter: Send + Sync + Debug {
    fn report(&self, event: &LifecycleEvent);
}

/// Renders lifecycle events as `tracing` records.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingReporter;

impl Reporter for TracingReporter {
    fn report(&self, event: &LifecycleEvent) {
        match event {
            LifecycleEvent::Starting { command } => info!(%command, "starting..."),
            LifecycleEvent::Started { pid } => info!(pid, "process started"),
            LifecycleEvent::Waiting { pid } => info!(pid, "waiting for task to complete"),
            LifecycleEvent::Stopping { pid } => info!(pid, "stopping task..."),
            LifecycleEvent::Stopped { pid, code: Some(0) } => info!(pid, "task stopped"),
            LifecycleEvent::Stopped { pid, code } => {
                warn!(pid, exit_code = ?code, "task stopped with non-zero status")
            }
            LifecycleEvent::Killed { pid } => warn!(pid, "KILLed process"),
            LifecycleEvent::Change { paths } => info!(?paths, "write detected"),
        }
    }
}
