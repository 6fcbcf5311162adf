// src/watch/walker.rs

use std::path::PathBuf;

use tracing::{debug, trace, warn};
use walkdir::WalkDir;

use crate::errors::Result;
use crate::watch::exclude::ExcludeSet;

/// What to watch. Fixed for the lifetime of the process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WatchConfig {
    pub root: PathBuf,
    pub recursive: bool,
    pub excludes: ExcludeSet,
}

impl WatchConfig {
    pub fn new(root: impl Into<PathBuf>, recursive: bool, excludes: ExcludeSet) -> Self {
        Self {
            root: root.into(),
            recursive,
            excludes,
        }
    }
}

/// List every directory that must be registered with the notification
/// facility, in depth-first order.
///
/// - Non-recursive: just the root.
/// - Recursive: the root and all directories beneath it, except that a
///   directory whose name is in the exclude set is skipped together with its
///   whole subtree. The root itself is subject to the same check.
///
/// Symlinks are not followed. An error on the root itself (missing,
/// unreadable) is returned and the caller treats it as a setup failure. Errors
/// below the root are logged and the walk carries on with the remaining
/// entries. A directory whose contents cannot be listed is still returned; it
/// is only its subtree that is lost.
pub fn collect_watch_dirs(config: &WatchConfig) -> Result<Vec<PathBuf>> {
    if !config.recursive {
        return Ok(vec![config.root.clone()]);
    }

    let excludes = &config.excludes;
    let mut dirs = Vec::new();

    let walker = WalkDir::new(&config.root)
        .follow_links(false)
        .into_iter()
        .filter_entry(|entry| {
            let skip = entry.file_type().is_dir() && excludes.contains(entry.file_name());
            if skip {
                debug!(path = %entry.path().display(), "skipping excluded directory");
            }
            !skip
        });

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) if err.depth() == 0 => return Err(err.into()),
            Err(err) => {
                warn!(path = ?err.path(), error = %err, "skipping unreadable path");
                continue;
            }
        };
        if entry.file_type().is_dir() {
            trace!(path = %entry.path().display(), "directory selected for watching");
            dirs.push(entry.into_path());
        }
    }

    Ok(dirs)
}
