// src/exec/backend.rs

//! Pluggable command backend abstraction.
//!
//! The executor talks to a `CommandBackend` instead of spawning processes
//! directly. Production code uses [`ProcessBackend`]; tests swap in a fake
//! that records runs, sleeps, or fails on demand.

use std::future::Future;
use std::pin::Pin;

use crate::config::CommandLine;
use crate::errors::Result;

use super::command::run_command;

/// Trait abstracting how the configured command is run.
pub trait CommandBackend: Send + 'static {
    /// Run `command` to completion.
    ///
    /// An `Err` means the run failed (spawn failure or non-zero exit); the
    /// executor logs it and keeps going.
    fn run<'a>(
        &'a mut self,
        command: &'a CommandLine,
    ) -> Pin<Box<dyn Future<Output = Result<()>> + Send + 'a>>;
}

/// Backend that spawns a real OS process with inherited stdio.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessBackend;

impl CommandBackend for ProcessBackend {
    fn run<'a>(
        &'a mut self,
        command: &'a CommandLine,
    ) -> Pin<Box<dyn Future<Output = Result<()>> + Send + 'a>> {
        Box::pin(run_command(command))
    }
}
