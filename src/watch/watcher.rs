// src/watch/watcher.rs

use std::sync::Arc;

use notify::{Config, Event, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, trace, warn};

use crate::errors::{Result, WatchrunError};
use crate::report::{LifecycleEvent, Reporter};
use crate::watch::events::{Notification, is_write_event};
use crate::watch::walker::{WatchConfig, collect_watch_dirs};

/// Spawn the watcher task.
///
/// The task owns the notification facility for its whole life. It registers
/// every directory chosen by [`collect_watch_dirs`] individually (the facility
/// is used non-recursively), then forwards one [`Notification`] per write
/// event on `notify_tx`.
///
/// If the facility cannot be created or the initial walk fails, the error is
/// logged and the task ends: `notify_tx` is dropped and no further
/// notifications are ever delivered. The rest of the program keeps running.
pub fn spawn_watcher(
    config: WatchConfig,
    notify_tx: mpsc::Sender<Notification>,
    reporter: Arc<dyn Reporter>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        if let Err(err) = run_watcher(config, notify_tx, reporter).await {
            error!(error = %err, "watcher stopped; changes will no longer restart the command");
        }
    })
}

async fn run_watcher(
    config: WatchConfig,
    notify_tx: mpsc::Sender<Notification>,
    reporter: Arc<dyn Reporter>,
) -> Result<()> {
    // Channel from the blocking notify callback into the async world. Errors
    // travel the same way so both streams are handled in one place.
    let (event_tx, mut event_rx) = mpsc::unbounded_channel::<notify::Result<Event>>();

    let mut watcher = RecommendedWatcher::new(
        move |res: notify::Result<Event>| {
            // Only fails once the receiving task is gone.
            let _ = event_tx.send(res);
        },
        Config::default(),
    )?;

    let walk_config = config.clone();
    let dirs = tokio::task::spawn_blocking(move || collect_watch_dirs(&walk_config))
        .await
        .map_err(|e| WatchrunError::Other(e.into()))??;

    let mut registered = 0usize;
    for dir in &dirs {
        match watcher.watch(dir, RecursiveMode::NonRecursive) {
            Ok(()) => {
                registered += 1;
                trace!(path = %dir.display(), "watching directory");
            }
            Err(err) => {
                warn!(path = %dir.display(), error = %err, "failed to watch directory");
            }
        }
    }

    info!(
        root = %config.root.display(),
        recursive = config.recursive,
        excludes = %config.excludes,
        directories = registered,
        "file watcher started"
    );

    while let Some(res) = event_rx.recv().await {
        match res {
            Ok(event) => {
                if !is_write_event(&event.kind) {
                    trace!(kind = ?event.kind, paths = ?event.paths, "ignoring non-write event");
                    continue;
                }

                reporter.report(&LifecycleEvent::Change {
                    paths: event.paths.clone(),
                });

                if notify_tx.send(Notification).await.is_err() {
                    debug!("notification receiver dropped; watcher exiting");
                    return Ok(());
                }
            }
            Err(err) => {
                warn!(error = %err, "file watch error");
            }
        }
    }

    // The callback owns the sender and lives as long as `watcher`, so this is
    // only reached if the facility shuts itself down.
    drop(watcher);
    debug!("watcher event loop finished");
    Ok(())
}
