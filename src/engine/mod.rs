// src/engine/mod.rs

//! Watch scheduler for files-watcher.
//!
//! This module ties together:
//! - the polling timer
//! - the file collector and the concurrent change checks
//! - the command executor worker
//! - the signal channel and the cancellation token that stop the loop
//!
//! Per tick the scheduler moves through
//! `Idle → Collecting → CheckingFiles → (Triggering | Idle)`. Command
//! execution happens on the executor worker, outside this state machine, so
//! a slow command never holds up detection.

use std::fmt;

use crate::signals::ShutdownSignal;

/// Scheduler-side states of the watch loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WatchState {
    /// Waiting for the next tick.
    Idle,
    /// Walking the base directory.
    Collecting,
    /// Per-file staleness checks in flight.
    CheckingFiles,
    /// Handing a notification to the executor.
    Triggering,
    /// Terminal: a signal arrived or the token was cancelled.
    Stopped,
}

impl fmt::Display for WatchState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            WatchState::Idle => "idle",
            WatchState::Collecting => "collecting",
            WatchState::CheckingFiles => "checking-files",
            WatchState::Triggering => "triggering",
            WatchState::Stopped => "stopped",
        };
        f.write_str(s)
    }
}

/// Why [`Scheduler::run`] returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stopped {
    /// An OS signal arrived. Nothing in flight was waited for; callers are
    /// expected to exit the process right away.
    Signal(ShutdownSignal),
    /// The cancellation token fired. No new ticks were started; the command
    /// run that was already queued or running was allowed to finish.
    Cancelled,
}

pub mod scheduler;

pub use scheduler::{detect_change, Scheduler};
