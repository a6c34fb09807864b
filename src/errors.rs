// src/errors.rs

//! Crate-wide error type and result alias.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum WatcherError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Traversal error at {path:?}: {source}")]
    Traversal {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    #[error("Invalid exclusion pattern '{pattern}': {source}")]
    PatternCompile {
        pattern: String,
        #[source]
        source: globset::Error,
    },

    #[error("error occurred processing during file watch: command '{command}' {reason}")]
    CommandExecution { command: String, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, WatcherError>;
