// src/config/mod.rs

//! Configuration loading and validation for watchrun.
//!
//! Responsibilities:
//! - Define the optional TOML data model (`model.rs`).
//! - Load a config file from disk (`loader.rs`).
//! - Merge CLI flags, file values and defaults into [`Settings`] (`settings.rs`).
//! - Validate the result before anything runs (`validate.rs`).

pub mod loader;
pub mod model;
pub mod settings;
pub mod validate;

pub use loader::{load_from_path, load_settings};
pub use model::{CommandSection, ConfigFile, WatchSection};
pub use settings::{DEFAULT_EXCLUDE, DEFAULT_WATCH_DIR, Settings};
pub use validate::validate_settings;
