// src/exec/mod.rs

//! Process execution layer.
//!
//! This module is responsible for running the configured command when the
//! scheduler detects a change, using `tokio::process::Command`.
//!
//! - [`command`] spawns one process with inherited stdio and maps failures
//!   to `WatcherError::CommandExecution`.
//! - [`backend`] provides the `CommandBackend` trait and the production
//!   `ProcessBackend`; tests replace it with fakes.
//! - [`executor_loop`] owns the command lock and the single worker that
//!   drains trigger notifications.

use std::path::PathBuf;

pub mod backend;
pub mod command;
pub mod executor_loop;

pub use backend::{CommandBackend, ProcessBackend};
pub use command::run_command;
pub use executor_loop::{spawn_executor, CommandExecutor, ExecutorHandle, Notified};

/// Notification sent to the executor when a tick detects a change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trigger {
    /// Tick number (starting at 1) that detected the change.
    pub tick: u64,
    /// The changed file that won the check.
    pub path: PathBuf,
}
