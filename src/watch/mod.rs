// src/watch/mod.rs

//! File watching and change detection.
//!
//! This module is responsible for:
//! - Deciding which directories get registered (`walker`, `exclude`).
//! - Wiring up the filesystem notification facility (`notify`).
//! - Reducing raw events to write notifications (`events`).
//!
//! It does **not** know about the managed process; it only turns writes into
//! [`Notification`]s on a channel.

pub mod events;
pub mod exclude;
pub mod walker;
pub mod watcher;

pub use events::{Notification, is_write_event, notification_channel};
pub use exclude::ExcludeSet;
pub use walker::{WatchConfig, collect_watch_dirs};
pub use watcher::spawn_watcher;
