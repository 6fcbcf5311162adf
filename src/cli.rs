// src/cli.rs

//! CLI argument parsing using `clap`.
//!
//! Behavioural flags are all `Option`s so that settings resolution can tell an
//! explicit flag apart from one that was left out and fall back to the config
//! file (if any) before the built-in defaults.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

/// Command-line arguments for `watchrun`.
#[derive(Debug, Clone, Default, Parser)]
#[command(
    name = "watchrun",
    version,
    about = "Restart a command whenever files under a directory are written.",
    long_about = None
)]
pub struct CliArgs {
    /// Directory to watch.
    ///
    /// Default: `./`.
    #[arg(long, value_name = "DIR")]
    pub watch: Option<PathBuf>,

    /// Watch the directory recursively (default: true).
    #[arg(
        short = 'r',
        long,
        value_name = "BOOL",
        num_args = 0..=1,
        default_missing_value = "true"
    )]
    pub recursive: Option<bool>,

    /// Directory name(s) to exclude, comma separated (default: `.git`).
    #[arg(long, value_name = "NAMES", value_delimiter = ',')]
    pub exclude: Option<Vec<String>>,

    /// Command to run, and restart whenever a write is observed.
    #[arg(long, value_name = "COMMAND")]
    pub cmd: Option<String>,

    /// Wait for the command to finish on its own instead of stopping it
    /// (default: false).
    #[arg(
        long,
        value_name = "BOOL",
        num_args = 0..=1,
        default_missing_value = "true"
    )]
    pub wait: Option<bool>,

    /// Run the command immediately instead of waiting for the first change
    /// (default: true).
    #[arg(
        long,
        value_name = "BOOL",
        num_args = 0..=1,
        default_missing_value = "true"
    )]
    pub init: Option<bool>,

    /// Optional TOML config file. Explicit flags take precedence over it.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Logging level (error, warn, info, debug, trace). Default: info.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Resolve settings and print the directories that would be watched,
    /// without running anything.
    #[arg(long)]
    pub dry_run: bool,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
