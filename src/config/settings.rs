// src/config/settings.rs

use std::path::PathBuf;

use crate::cli::CliArgs;
use crate::config::model::ConfigFile;
use crate::supervisor::{StopMode, SupervisorConfig};
use crate::watch::{ExcludeSet, WatchConfig};

/// Default watch root.
pub const DEFAULT_WATCH_DIR: &str = "./";

/// Default exclude list.
pub const DEFAULT_EXCLUDE: &str = ".git";

const DEFAULT_RECURSIVE: bool = true;
const DEFAULT_WAIT: bool = false;
const DEFAULT_INIT: bool = true;

/// Everything the program needs to run, after merging all sources.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub watch: WatchConfig,
    pub supervisor: SupervisorConfig,
    pub run_immediately: bool,
}

impl Settings {
    /// Merge CLI flags over the optional file over built-in defaults.
    ///
    /// No validation happens here; a missing command resolves to an empty
    /// string and is rejected by [`validate_settings`](crate::config::validate_settings).
    pub fn resolve(args: &CliArgs, file: Option<&ConfigFile>) -> Self {
        let default_file = ConfigFile::default();
        let file = file.unwrap_or(&default_file);

        let root = args
            .watch
            .clone()
            .or_else(|| file.watch.dir.clone())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_WATCH_DIR));

        let recursive = args
            .recursive
            .or(file.watch.recursive)
            .unwrap_or(DEFAULT_RECURSIVE);

        let excludes = match args.exclude.as_ref().or(file.watch.exclude.as_ref()) {
            Some(names) => ExcludeSet::new(names),
            None => ExcludeSet::parse(DEFAULT_EXCLUDE),
        };

        let command = args
            .cmd
            .clone()
            .or_else(|| file.command.cmd.clone())
            .unwrap_or_default();

        let wait = args.wait.or(file.command.wait).unwrap_or(DEFAULT_WAIT);
        let run_immediately = args.init.or(file.command.init).unwrap_or(DEFAULT_INIT);

        let mut supervisor = SupervisorConfig::new(command, StopMode::from_wait_flag(wait));
        if let Some(shell) = &file.command.shell {
            supervisor = supervisor.with_shell(shell.clone());
        }

        Self {
            watch: WatchConfig::new(root, recursive, excludes),
            supervisor,
            run_immediately,
        }
    }
}
