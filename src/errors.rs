// src/errors.rs

//! Crate-wide error type and exit codes.

use std::path::PathBuf;

use thiserror::Error;

/// Exit status for a coordinated shutdown.
pub const EXIT_OK: i32 = 0;

/// Exit status for every fatal condition.
pub const EXIT_FATAL: i32 = 1;

#[derive(Error, Debug)]
pub enum WatchrunError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Please specify a command to run (--cmd). For more info see --help.")]
    MissingCommand,

    #[error("Invalid watch directory {path:?}: {reason}")]
    InvalidWatchDir { path: PathBuf, reason: String },

    #[error("Failed to spawn `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("A managed process (pid {pid}) is already running")]
    AlreadyRunning { pid: u32 },

    #[error("Failed to KILL process {pid}: {source}")]
    Kill {
        pid: u32,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to reap process {pid}: {source}")]
    Wait {
        pid: u32,
        #[source]
        source: std::io::Error,
    },

    #[error("File watcher error: {0}")]
    Notify(#[from] notify::Error),

    #[error("Directory walk error: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, WatchrunError>;
