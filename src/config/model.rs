// src/config/model.rs

use std::path::PathBuf;

use serde::Deserialize;

/// Optional configuration file, e.g.:
///
/// ```toml
/// [watch]
/// dir = "./"
/// recursive = true
/// exclude = [".git", "target"]
///
/// [command]
/// cmd = "cargo run"
/// wait = false
/// init = true
/// ```
///
/// Every key is optional; anything left out falls back to the CLI flag or the
/// built-in default. Unknown keys are rejected so typos don't go unnoticed.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    #[serde(default)]
    pub watch: WatchSection,

    #[serde(default)]
    pub command: CommandSection,
}

/// `[watch]` section.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WatchSection {
    /// Directory to watch. Relative paths are taken as-is (relative to the
    /// working directory), like the `--watch` flag.
    pub dir: Option<PathBuf>,

    pub recursive: Option<bool>,

    /// Excluded directory names.
    pub exclude: Option<Vec<String>>,
}

/// `[command]` section.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CommandSection {
    pub cmd: Option<String>,

    /// Wait for the command to exit instead of stopping it.
    pub wait: Option<bool>,

    /// Run the command before the first change.
    pub init: Option<bool>,

    /// Shell used as `<shell> -c <cmd>`. Only settable here.
    pub shell: Option<String>,
}
