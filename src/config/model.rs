// src/config/model.rs

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Default file-extension filter.
pub const DEFAULT_EXTENSION: &str = ".go";

/// Default polling interval (and staleness window), in seconds.
pub const DEFAULT_FREQUENCY_SECS: u64 = 3;

/// Upper bound on the polling interval (one week).
pub const MAX_FREQUENCY_SECS: u64 = 7 * 24 * 60 * 60;

/// Default artificial delay applied by each per-file checker.
pub const DEFAULT_CHECK_DELAY: Duration = Duration::from_millis(100);

/// Default number of trigger notifications allowed to wait for the command.
pub const DEFAULT_QUEUE_LENGTH: usize = 1;

/// Raw, unvalidated watcher options.
///
/// Built by the caller (usually the CLI layer) with the `with_*` setters and
/// turned into a [`WatcherConfig`] through `WatcherConfig::try_from`, which
/// runs validation:
///
/// ```no_run
/// use files_watcher::config::{WatcherConfig, WatcherOptions};
///
/// let cfg = WatcherConfig::try_from(
///     WatcherOptions::new()
///         .with_command("cargo build")
///         .with_extension(".rs")
///         .with_excluded(["target/*"])
///         .with_frequency(5),
/// )?;
/// # Ok::<(), files_watcher::errors::WatcherError>(())
/// ```
#[derive(Debug, Clone)]
pub struct WatcherOptions {
    pub base_path: PathBuf,
    pub command: String,
    pub extension: String,
    pub excluded: Vec<String>,
    /// Polling interval in whole seconds.
    pub frequency: u64,
    pub check_delay: Duration,
    pub queue_length: usize,
}

impl Default for WatcherOptions {
    fn default() -> Self {
        Self {
            base_path: PathBuf::from("."),
            command: String::new(),
            extension: DEFAULT_EXTENSION.to_string(),
            excluded: Vec::new(),
            frequency: DEFAULT_FREQUENCY_SECS,
            check_delay: DEFAULT_CHECK_DELAY,
            queue_length: DEFAULT_QUEUE_LENGTH,
        }
    }
}

impl WatcherOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_base_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.base_path = path.into();
        self
    }

    pub fn with_command(mut self, command: impl Into<String>) -> Self {
        self.command = command.into();
        self
    }

    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }

    pub fn with_excluded<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.excluded = patterns.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_frequency(mut self, secs: u64) -> Self {
        self.frequency = secs;
        self
    }

    pub fn with_check_delay(mut self, delay: Duration) -> Self {
        self.check_delay = delay;
        self
    }

    pub fn with_queue_length(mut self, len: usize) -> Self {
        self.queue_length = len;
        self
    }
}

/// A command line split into the executable and its arguments.
///
/// Tokens are separated on whitespace; quoting is not interpreted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine {
    program: String,
    args: Vec<String>,
}

impl CommandLine {
    /// Split a command string. Returns `None` for a blank string.
    pub fn parse(line: &str) -> Option<Self> {
        let mut parts = line.split_whitespace().map(str::to_string);
        let program = parts.next()?;
        Some(Self {
            program,
            args: parts.collect(),
        })
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }
}

impl fmt::Display for CommandLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.program)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

/// Validated, immutable watcher configuration.
///
/// Only constructible through `TryFrom<WatcherOptions>` (see
/// [`crate::config::validate`]), so every instance satisfies
/// `0 < frequency <= MAX_FREQUENCY_SECS`, has a non-empty command and
/// extension, and carries exclusion patterns that compile.
#[derive(Debug, Clone)]
pub struct WatcherConfig {
    base_path: PathBuf,
    command: CommandLine,
    extension: String,
    excluded: Vec<String>,
    frequency: Duration,
    check_delay: Duration,
    queue_length: usize,
}

impl WatcherConfig {
    pub(crate) fn new_unchecked(
        base_path: PathBuf,
        command: CommandLine,
        extension: String,
        excluded: Vec<String>,
        frequency: Duration,
        check_delay: Duration,
        queue_length: usize,
    ) -> Self {
        Self {
            base_path,
            command,
            extension,
            excluded,
            frequency,
            check_delay,
            queue_length,
        }
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    pub fn command(&self) -> &CommandLine {
        &self.command
    }

    /// Extension filter, always with a leading dot (e.g. `".go"`).
    pub fn extension(&self) -> &str {
        &self.extension
    }

    pub fn excluded(&self) -> &[String] {
        &self.excluded
    }

    /// Polling interval; also the width of the staleness window.
    pub fn frequency(&self) -> Duration {
        self.frequency
    }

    pub fn check_delay(&self) -> Duration {
        self.check_delay
    }

    pub fn queue_length(&self) -> usize {
        self.queue_length
    }
}
