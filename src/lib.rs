// src/lib.rs

pub mod cli;
pub mod config;
pub mod engine;
pub mod errors;
pub mod logging;
pub mod report;
pub mod shutdown;
pub mod supervisor;
pub mod watch;

use std::sync::Arc;

use tracing::{debug, info};

use crate::cli::CliArgs;
use crate::config::{Settings, load_settings};
use crate::engine::{Runtime, RuntimeOptions};
use crate::errors::{Result, WatchrunError};
use crate::report::{Reporter, TracingReporter};
use crate::shutdown::ShutdownCoordinator;
use crate::supervisor::Supervisor;
use crate::watch::{collect_watch_dirs, notification_channel, spawn_watcher};

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - settings resolution and validation
/// - the supervisor (shared with the shutdown coordinator)
/// - SIGINT/SIGTERM handling
/// - the file watcher
/// - the restart loop
///
/// Only returns on a fatal error, or after `--dry-run`. A normal shutdown
/// exits the process from the coordinator.
pub async fn run(args: CliArgs) -> Result<()> {
    let settings = load_settings(&args)?;

    if args.dry_run {
        return print_dry_run(&settings);
    }

    let reporter: Arc<dyn Reporter> = Arc::new(TracingReporter);
    let supervisor = Supervisor::new(settings.supervisor.clone(), Arc::clone(&reporter)).into_shared();

    // Signals first, so the child is never spawned without someone able to
    // clean up its process group.
    let coordinator = ShutdownCoordinator::install(Arc::clone(&supervisor))?.spawn();

    let (notify_tx, notify_rx) = notification_channel();
    let _watcher = spawn_watcher(settings.watch.clone(), notify_tx, Arc::clone(&reporter));

    let options = RuntimeOptions {
        run_immediately: settings.run_immediately,
    };
    let cycles = Runtime::new(supervisor, notify_rx, options).run().await?;
    info!(cycles, "no more restarts; waiting for a termination signal");

    // The watcher is gone but the child keeps running until a signal arrives.
    coordinator
        .await
        .map_err(|e| WatchrunError::Other(e.into()))?;
    Ok(())
}

/// Print resolved settings and the directories that would be registered.
fn print_dry_run(settings: &Settings) -> Result<()> {
    println!("watchrun dry-run");
    println!("  watch.root = {}", settings.watch.root.display());
    println!("  watch.recursive = {}", settings.watch.recursive);
    println!("  watch.exclude = {}", settings.watch.excludes);
    println!("  command.cmd = {}", settings.supervisor.command);
    println!("  command.shell = {}", settings.supervisor.shell);
    println!("  command.stop_mode = {:?}", settings.supervisor.stop_mode);
    println!("  command.init = {}", settings.run_immediately);
    println!();

    let dirs = collect_watch_dirs(&settings.watch)?;
    println!("directories ({}):", dirs.len());
    for dir in &dirs {
        println!("  - {}", dir.display());
    }

    debug!("dry-run complete (no execution)");
    Ok(())
}
