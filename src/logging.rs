// src/logging.rs

//! Tracing subscriber setup.
//!
//! The filter comes from `--log-level` when given, otherwise from the
//! `FILES_WATCHER_LOG` directives (anything `EnvFilter` accepts, e.g.
//! `files_watcher::engine=trace,info`), otherwise `info`.
//!
//! Logs go to STDERR; the watched command inherits STDOUT and STDERR, so its
//! output is interleaved with ours but never captured.

use anyhow::Result;
use tracing_subscriber::{fmt, EnvFilter};

use crate::cli::LogLevel;

pub const LOG_ENV_VAR: &str = "FILES_WATCHER_LOG";

const DEFAULT_DIRECTIVE: &str = "info";

/// Install the global subscriber. Fails if one is already set.
pub fn init_logging(cli_level: Option<LogLevel>) -> Result<()> {
    fmt()
        .with_env_filter(build_filter(cli_level))
        .with_target(true)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to install log subscriber: {e}"))
}

fn build_filter(cli_level: Option<LogLevel>) -> EnvFilter {
    match cli_level {
        Some(level) => EnvFilter::new(directive(level)),
        None => EnvFilter::try_from_env(LOG_ENV_VAR)
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE)),
    }
}

fn directive(level: LogLevel) -> &'static str {
    match level {
        LogLevel::Error => "error",
        LogLevel::Warn => "warn",
        LogLevel::Info => "info",
        LogLevel::Debug => "debug",
        LogLevel::Trace => "trace",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_level_becomes_the_whole_filter() {
        assert_eq!(build_filter(Some(LogLevel::Debug)).to_string(), "debug");
        assert_eq!(build_filter(Some(LogLevel::Error)).to_string(), "error");
    }
}
