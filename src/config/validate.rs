// src/config/validate.rs

use std::time::Duration;

use crate::config::model::{CommandLine, MAX_FREQUENCY_SECS, WatcherConfig, WatcherOptions};
use crate::errors::{Result, WatcherError};
use crate::watch::exclude::ExclusionSet;

impl TryFrom<WatcherOptions> for WatcherConfig {
    type Error = crate::errors::WatcherError;

    fn try_from(raw: WatcherOptions) -> std::result::Result<Self, Self::Error> {
        let command = check_options(&raw)?;

        Ok(WatcherConfig::new_unchecked(
            raw.base_path,
            command,
            normalize_extension(&raw.extension),
            raw.excluded,
            Duration::from_secs(raw.frequency),
            raw.check_delay,
            raw.queue_length,
        ))
    }
}

/// Check the raw options without building a config.
///
/// Exclusion patterns are compiled here so that a bad pattern is reported
/// before the watch loop starts rather than on the first tick.
pub fn validate_options(opts: &WatcherOptions) -> Result<()> {
    check_options(opts).map(|_| ())
}

/// Run every check and hand back the parsed command.
fn check_options(opts: &WatcherOptions) -> Result<CommandLine> {
    validate_frequency(opts)?;
    let command = validate_command(opts)?;
    validate_extension(opts)?;
    validate_base_path(opts)?;
    validate_queue_length(opts)?;
    ExclusionSet::compile(&opts.excluded)?;
    Ok(command)
}

fn validate_frequency(opts: &WatcherOptions) -> Result<()> {
    if opts.frequency == 0 {
        return Err(WatcherError::Config("frequency must be >= 1 second (got 0)".to_string()));
    }
    if opts.frequency > MAX_FREQUENCY_SECS {
        return Err(WatcherError::Config(format!(
            "frequency must be <= {MAX_FREQUENCY_SECS} seconds (got {})",
            opts.frequency
        )));
    }
    Ok(())
}

fn validate_command(opts: &WatcherOptions) -> Result<CommandLine> {
    CommandLine::parse(&opts.command)
        .ok_or_else(|| WatcherError::Config("command must not be empty".to_string()))
}

fn validate_extension(opts: &WatcherOptions) -> Result<()> {
    let ext = opts.extension.trim();
    if ext.is_empty() || ext == "." {
        return Err(WatcherError::Config(format!(
            "extension must name a file suffix, e.g. \".go\" (got {:?})",
            opts.extension
        )));
    }
    Ok(())
}

fn validate_base_path(opts: &WatcherOptions) -> Result<()> {
    if !opts.base_path.is_dir() {
        return Err(WatcherError::Config(format!(
            "base path {:?} is not a directory",
            opts.base_path
        )));
    }
    Ok(())
}

fn validate_queue_length(opts: &WatcherOptions) -> Result<()> {
    if opts.queue_length == 0 {
        return Err(WatcherError::Config("queue_length must be >= 1 (got 0)".to_string()));
    }
    Ok(())
}

/// `"go"` and `".go"` both mean files ending in `.go`.
fn normalize_extension(ext: &str) -> String {
    let ext = ext.trim();
    if ext.starts_with('.') {
        ext.to_string()
    } else {
        format!(".{ext}")
    }
}
