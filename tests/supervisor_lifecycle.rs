// tests/supervisor_lifecycle.rs
mod common;
use crate::common::{
    RecordingReporter, init_tracing, process_running, wait_for_file, wait_until_dead, with_timeout,
};

use std::error::Error;
use std::os::unix::process::ExitStatusExt;
use std::sync::Arc;
use std::time::Instant;

use nix::sys::signal::Signal;
use tokio::time::{Duration, sleep};

use watchrun::errors::WatchrunError;
use watchrun::report::LifecycleEvent;
use watchrun::supervisor::{
    KILL_TIMEOUT, ProcessState, StopMode, StopOutcome, Supervisor, SupervisorConfig,
};

type TestResult = Result<(), Box<dyn Error>>;

fn supervisor(command: &str, mode: StopMode) -> (Supervisor, RecordingReporter) {
    let reporter = RecordingReporter::new();
    let sup = Supervisor::new(
        SupervisorConfig::new(command, mode),
        Arc::new(reporter.clone()),
    );
    (sup, reporter)
}

#[tokio::test]
async fn graceful_stop_terminates_group_without_kill() -> TestResult {
    init_tracing();
    let tmp = tempfile::tempdir()?;
    let ready = tmp.path().join("ready");
    let (mut sup, reporter) = supervisor(
        &format!("touch {}; exec sleep 30", ready.display()),
        StopMode::Graceful,
    );

    let pid = sup.start()?;
    assert_eq!(sup.state(), ProcessState::Running { pid });
    assert!(sup.is_alive());
    wait_for_file(&ready).await?;

    let began = Instant::now();
    let outcome = with_timeout(sup.stop()).await?;
    let elapsed = began.elapsed();

    match outcome {
        Some(StopOutcome::Exited(status)) => {
            assert_eq!(status.signal(), Some(Signal::SIGTERM as i32));
        }
        other => panic!("expected a terminated exit, got {other:?}"),
    }
    assert!(elapsed < KILL_TIMEOUT, "took {elapsed:?}");
    assert_eq!(reporter.kills(), 0);
    assert_eq!(sup.state(), ProcessState::Stopped);
    assert_eq!(sup.current_pid(), None);
    assert!(!process_running(pid));
    Ok(())
}

#[tokio::test]
async fn group_signal_reaches_grandchildren() -> TestResult {
    init_tracing();
    let tmp = tempfile::tempdir()?;
    let pidfile = tmp.path().join("grandchild.pid");
    // The background sleep is a separate process in the same group.
    let (mut sup, _reporter) = supervisor(
        &format!("sleep 30 & echo $! > {}; wait", pidfile.display()),
        StopMode::Graceful,
    );

    sup.start()?;
    wait_for_file(&pidfile).await?;
    sleep(Duration::from_millis(50)).await;
    let grandchild: u32 = std::fs::read_to_string(&pidfile)?.trim().parse()?;

    with_timeout(sup.stop()).await?;

    // The grandchild got SIGTERM too.
    assert!(
        wait_until_dead(grandchild).await,
        "grandchild {grandchild} survived the group signal"
    );
    Ok(())
}

#[tokio::test]
async fn ignored_termination_escalates_to_kill_of_leader() -> TestResult {
    init_tracing();
    let tmp = tempfile::tempdir()?;
    let ready = tmp.path().join("ready");
    let (mut sup, reporter) = supervisor(
        &format!("trap '' TERM; touch {}; sleep 5", ready.display()),
        StopMode::Graceful,
    );

    let pid = sup.start()?;
    wait_for_file(&ready).await?;

    let began = Instant::now();
    let outcome = with_timeout(sup.stop()).await?;
    let elapsed = began.elapsed();

    assert_eq!(outcome, Some(StopOutcome::Killed));
    assert!(elapsed >= KILL_TIMEOUT, "escalated early after {elapsed:?}");
    assert!(elapsed < KILL_TIMEOUT + Duration::from_secs(1), "took {elapsed:?}");
    assert_eq!(reporter.kills(), 1);
    assert!(!process_running(pid), "leader {pid} still alive after kill");

    let events = reporter.events();
    assert_eq!(events.last(), Some(&LifecycleEvent::Killed { pid }));
    Ok(())
}

#[tokio::test]
async fn wait_mode_never_signals() -> TestResult {
    init_tracing();
    let tmp = tempfile::tempdir()?;
    let ready = tmp.path().join("ready");
    // Would die from SIGTERM with no exit code; exiting with 3 proves it ran
    // to completion.
    let (mut sup, reporter) = supervisor(
        &format!("touch {}; sleep 0.5; exit 3", ready.display()),
        StopMode::WaitForExit,
    );

    let pid = sup.start()?;
    wait_for_file(&ready).await?;

    let outcome = with_timeout(sup.stop()).await?;
    match outcome {
        Some(StopOutcome::Exited(status)) => assert_eq!(status.code(), Some(3)),
        other => panic!("expected natural exit, got {other:?}"),
    }

    let events = reporter.events();
    assert!(events.contains(&LifecycleEvent::Waiting { pid }));
    assert!(!events.contains(&LifecycleEvent::Stopping { pid }));
    assert!(events.contains(&LifecycleEvent::Stopped { pid, code: Some(3) }));
    assert_eq!(reporter.kills(), 0);
    Ok(())
}

#[tokio::test]
async fn wait_mode_outlasts_the_kill_timeout() -> TestResult {
    init_tracing();
    let (mut sup, reporter) = supervisor("sleep 2.5", StopMode::WaitForExit);

    sup.start()?;
    let began = Instant::now();
    let outcome = with_timeout(sup.stop()).await?;

    assert!(began.elapsed() >= Duration::from_secs(2));
    assert!(matches!(outcome, Some(StopOutcome::Exited(s)) if s.success()));
    assert_eq!(reporter.kills(), 0);
    Ok(())
}

#[tokio::test]
async fn second_start_is_refused_while_running() -> TestResult {
    init_tracing();
    let (mut sup, reporter) = supervisor("sleep 30", StopMode::Graceful);

    let pid = sup.start()?;
    match sup.start() {
        Err(WatchrunError::AlreadyRunning { pid: running }) => assert_eq!(running, pid),
        other => panic!("expected AlreadyRunning, got {other:?}"),
    }
    assert_eq!(reporter.starts(), 1);
    assert_eq!(sup.state(), ProcessState::Running { pid });

    with_timeout(sup.stop()).await?;
    Ok(())
}

#[tokio::test]
async fn stop_without_process_is_a_no_op() -> TestResult {
    init_tracing();
    let (mut sup, reporter) = supervisor("true", StopMode::Graceful);

    assert_eq!(sup.stop().await?, None);
    assert_eq!(sup.state(), ProcessState::Stopped);
    assert!(reporter.events().is_empty());
    Ok(())
}

#[tokio::test]
async fn spawn_failure_is_reported_and_leaves_slot_stopped() -> TestResult {
    init_tracing();
    let reporter = RecordingReporter::new();
    let config = SupervisorConfig::new("echo hi", StopMode::Graceful)
        .with_shell("/nonexistent/watchrun-shell");
    let mut sup = Supervisor::new(config, Arc::new(reporter.clone()));

    match sup.start() {
        Err(WatchrunError::Spawn { command, .. }) => assert_eq!(command, "echo hi"),
        other => panic!("expected Spawn error, got {other:?}"),
    }
    assert_eq!(sup.state(), ProcessState::Stopped);
    assert_eq!(sup.current_pid(), None);
    assert_eq!(reporter.starts(), 0);
    Ok(())
}

#[tokio::test]
async fn exited_child_is_not_alive_but_still_stoppable() -> TestResult {
    init_tracing();
    let (mut sup, reporter) = supervisor("exit 0", StopMode::Graceful);

    sup.start()?;
    for _ in 0..100 {
        if !sup.is_alive() {
            break;
        }
        sleep(Duration::from_millis(20)).await;
    }
    assert!(!sup.is_alive());

    // Group is already gone; stop still collects the status without escalating.
    let outcome = with_timeout(sup.stop()).await?;
    assert!(matches!(outcome, Some(StopOutcome::Exited(s)) if s.success()));
    assert_eq!(reporter.kills(), 0);
    Ok(())
}
