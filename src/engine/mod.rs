// src/engine/mod.rs

//! Restart orchestration.
//!
//! The [`runtime`] loop consumes watcher notifications and turns each one into
//! a stop-then-start cycle on the shared supervisor.

pub mod runtime;

pub use runtime::{Runtime, RuntimeOptions};
