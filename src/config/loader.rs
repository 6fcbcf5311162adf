// src/config/loader.rs

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::cli::CliArgs;
use crate::config::model::ConfigFile;
use crate::config::settings::Settings;
use crate::config::validate::validate_settings;
use crate::errors::{Result, WatchrunError};

/// Load a configuration file from a given path.
///
/// This only performs TOML deserialization; it does **not** validate the
/// result. Use [`load_settings`] for the full pipeline.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<ConfigFile> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)
        .map_err(|e| WatchrunError::Config(format!("reading config file {path:?}: {e}")))?;

    let config: ConfigFile = toml::from_str(&contents)?;
    debug!(?path, "loaded config file");

    Ok(config)
}

/// Build validated [`Settings`] from the command line.
///
/// - Reads the `--config` file if one was given.
/// - Applies precedence: explicit flag, then file, then default.
/// - Checks that a command was given and the watch directory exists.
pub fn load_settings(args: &CliArgs) -> Result<Settings> {
    let file = args.config.as_deref().map(load_from_path).transpose()?;
    let settings = Settings::resolve(args, file.as_ref());
    validate_settings(&settings)?;
    Ok(settings)
}
