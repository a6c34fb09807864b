// src/watch/mod.rs

//! Polling-based change detection.
//!
//! This module is responsible for:
//! - Deciding whether a path is excluded ([`exclude`]).
//! - Walking the base directory into a snapshot of watched files
//!   ([`collector`]).
//! - Checking a snapshot concurrently for a file modified inside the
//!   staleness window ([`check`]).
//!
//! It does **not** run commands; the engine turns a detected change into a
//! notification for the executor.

pub mod check;
pub mod collector;
pub mod exclude;

pub use check::{first_change, is_changed, CheckResult};
pub use collector::{collect, FileRecord};
pub use exclude::{is_excluded, is_wildcard, ExclusionSet};
