// src/config/validate.rs

use crate::config::settings::Settings;
use crate::errors::{Result, WatchrunError};

/// Reject settings the program cannot run with.
///
/// This checks, in order:
/// - a non-blank command was given
/// - the watch root exists and is a directory
pub fn validate_settings(settings: &Settings) -> Result<()> {
    if settings.supervisor.command.trim().is_empty() {
        return Err(WatchrunError::MissingCommand);
    }

    let root = &settings.watch.root;
    if root.as_os_str().is_empty() {
        return Err(WatchrunError::InvalidWatchDir {
            path: root.clone(),
            reason: "please specify a directory to watch".to_string(),
        });
    }

    let meta = std::fs::metadata(root).map_err(|e| WatchrunError::InvalidWatchDir {
        path: root.clone(),
        reason: e.to_string(),
    })?;

    if !meta.is_dir() {
        return Err(WatchrunError::InvalidWatchDir {
            path: root.clone(),
            reason: "not a directory".to_string(),
        });
    }

    Ok(())
}
