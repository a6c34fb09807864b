// src/config/mod.rs

//! Watcher configuration.
//!
//! - [`model`] defines the raw `WatcherOptions` (filled in by the caller with
//!   `with_*` setters) and the validated, immutable `WatcherConfig`.
//! - [`validate`] turns options into a config, rejecting a zero frequency,
//!   an empty command or extension, a missing base directory and exclusion
//!   patterns that do not compile.

pub mod model;
pub mod validate;

pub use model::{CommandLine, WatcherConfig, WatcherOptions};
pub use validate::validate_options;
