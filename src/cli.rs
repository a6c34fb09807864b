// src/cli.rs

//! CLI argument parsing using `clap`.

use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, ValueEnum};

use crate::config::model::{
    DEFAULT_CHECK_DELAY, DEFAULT_EXTENSION, DEFAULT_FREQUENCY_SECS, DEFAULT_QUEUE_LENGTH,
    WatcherOptions,
};

/// Command-line arguments for `files-watcher`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "files-watcher",
    version,
    about = "Poll a directory tree and run a command when watched files change.",
    long_about = None
)]
pub struct CliArgs {
    /// Root directory to watch.
    #[arg(long, value_name = "DIR", default_value = ".")]
    pub path: PathBuf,

    /// Command to run when a change is detected, e.g. "go build ./...".
    ///
    /// Split on whitespace into program and arguments; no shell is involved.
    #[arg(long, value_name = "CMD")]
    pub cmd: String,

    /// Only files with this extension are watched.
    #[arg(long, value_name = "EXT", default_value = DEFAULT_EXTENSION)]
    pub ext: String,

    /// Exclusion pattern; repeat for several.
    ///
    /// A pattern containing `*`, `?`, `[` or `{` is a glob matched against
    /// the file path; anything else must equal the path or the file name.
    #[arg(long = "exclude", value_name = "PATTERN")]
    pub excluded: Vec<String>,

    /// Poll interval in seconds; also how recent a modification must be to
    /// count as a change.
    #[arg(long, value_name = "SECS", default_value_t = DEFAULT_FREQUENCY_SECS)]
    pub frequency: u64,

    /// Artificial delay before each per-file check, in milliseconds.
    #[arg(long, value_name = "MS", default_value_t = DEFAULT_CHECK_DELAY.as_millis() as u64)]
    pub check_delay_ms: u64,

    /// How many detected changes may wait while the command is running.
    #[arg(long, value_name = "N", default_value_t = DEFAULT_QUEUE_LENGTH)]
    pub queue_length: usize,

    /// Stop scheduling new polls after this many seconds.
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Validate options, print the files that would be watched, run nothing.
    #[arg(long)]
    pub dry_run: bool,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `FILES_WATCHER_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,
}

impl CliArgs {
    /// Map the flags onto watcher options.
    pub fn to_options(&self) -> WatcherOptions {
        WatcherOptions::new()
            .with_base_path(&self.path)
            .with_command(&self.cmd)
            .with_extension(&self.ext)
            .with_excluded(self.excluded.iter().cloned())
            .with_frequency(self.frequency)
            .with_check_delay(Duration::from_millis(self.check_delay_ms))
            .with_queue_length(self.queue_length)
    }
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
