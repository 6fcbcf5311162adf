// src/supervisor/process.rs

use std::os::fd::AsFd;
use std::process::{ExitStatus, Stdio};
use std::time::Duration;

use nix::sys::signal::{Signal, killpg};
use nix::unistd::Pid;
use tokio::process::{Child, Command};
use tracing::{debug, info, warn};

use crate::errors::{Result, WatchrunError};
use crate::report::{LifecycleEvent, Reporter};
use crate::supervisor::StopMode;

/// How a stopped process went away.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StopOutcome {
    /// The process exited (on its own or from the group signal).
    Exited(ExitStatus),
    /// Waiting for the exit failed; the process may or may not be gone.
    WaitFailed(String),
    /// The leader outlived the timeout and was killed.
    Killed,
}

/// Handle to the running child.
///
/// The child leads its own process group (group id == pid), so a group-wide
/// signal reaches everything it forked without touching the supervisor.
#[derive(Debug)]
pub struct ManagedProcess {
    pid: u32,
    pgid: Pid,
    child: Child,
}

impl ManagedProcess {
    /// Spawn `<shell> -c <command>` in a new process group.
    ///
    /// stdin is inherited; stdout and stderr both go to the supervisor's
    /// stdout so the child's output is interleaved on one stream.
    pub fn spawn(shell: &str, command: &str) -> Result<Self> {
        let spawn_err = |source: std::io::Error| WatchrunError::Spawn {
            command: command.to_string(),
            source,
        };

        let stdout = std::io::stdout()
            .as_fd()
            .try_clone_to_owned()
            .map_err(spawn_err)?;

        let mut cmd = Command::new(shell);
        cmd.arg("-c")
            .arg(command)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::from(stdout))
            .process_group(0);

        let child = cmd.spawn().map_err(spawn_err)?;
        let pid = child.id().ok_or_else(|| {
            spawn_err(std::io::Error::other("child exited before its pid was read"))
        })?;

        debug!(pid, shell, %command, "spawned managed process");

        Ok(Self {
            pid,
            pgid: Pid::from_raw(pid as i32),
            child,
        })
    }

    pub fn pid(&self) -> u32 {
        self.pid
    }

    pub fn pgid(&self) -> i32 {
        self.pgid.as_raw()
    }

    /// True while the leader has not exited. Reaps it if it has.
    pub fn is_alive(&mut self) -> bool {
        matches!(self.child.try_wait(), Ok(None))
    }

    /// Stop the process and consume the handle.
    ///
    /// Errors are fatal: the leader could not be killed, or could not be
    /// reaped after the kill.
    pub async fn stop(
        self,
        mode: StopMode,
        kill_timeout: Duration,
        reporter: &dyn Reporter,
    ) -> Result<StopOutcome> {
        match mode {
            StopMode::WaitForExit => Ok(self.wait_for_exit(reporter).await),
            StopMode::Graceful => self.terminate(kill_timeout, reporter).await,
        }
    }

    async fn wait_for_exit(mut self, reporter: &dyn Reporter) -> StopOutcome {
        let pid = self.pid;
        reporter.report(&LifecycleEvent::Waiting { pid });

        match self.child.wait().await {
            Ok(status) => {
                reporter.report(&LifecycleEvent::Stopped {
                    pid,
                    code: status.code(),
                });
                StopOutcome::Exited(status)
            }
            Err(err) => {
                warn!(pid, error = %err, "wait error");
                reporter.report(&LifecycleEvent::Stopped { pid, code: None });
                StopOutcome::WaitFailed(err.to_string())
            }
        }
    }

    async fn terminate(mut self, kill_timeout: Duration, reporter: &dyn Reporter) -> Result<StopOutcome> {
        let pid = self.pid;
        reporter.report(&LifecycleEvent::Stopping { pid });

        // ESRCH here just means the group is already gone; the wait below
        // still collects the exit status.
        if let Err(errno) = killpg(self.pgid, Signal::SIGTERM) {
            debug!(pid, pgid = self.pgid.as_raw(), %errno, "failed to signal process group");
        }

        tokio::select! {
            status = self.child.wait() => {
                match status {
                    Ok(status) => {
                        reporter.report(&LifecycleEvent::Stopped { pid, code: status.code() });
                        Ok(StopOutcome::Exited(status))
                    }
                    Err(err) => {
                        warn!(pid, error = %err, "stopped with wait error");
                        reporter.report(&LifecycleEvent::Stopped { pid, code: None });
                        Ok(StopOutcome::WaitFailed(err.to_string()))
                    }
                }
            }

            _ = tokio::time::sleep(kill_timeout) => {
                info!(
                    pid,
                    timeout_ms = kill_timeout.as_millis() as u64,
                    "process group ignored termination; killing leader"
                );
                // Leader only. Other group members that ignored SIGTERM are
                // left running.
                self.child
                    .start_kill()
                    .map_err(|source| WatchrunError::Kill { pid, source })?;
                self.child
                    .wait()
                    .await
                    .map_err(|source| WatchrunError::Wait { pid, source })?;
                reporter.report(&LifecycleEvent::Killed { pid });
                Ok(StopOutcome::Killed)
            }
        }
    }
}
