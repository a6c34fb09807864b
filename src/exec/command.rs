// src/exec/command.rs

use std::process::Stdio;

use tokio::process::Command;
use tracing::{debug, info};

use crate::config::CommandLine;
use crate::errors::{Result, WatcherError};

/// Spawn `command` and wait for it to exit.
///
/// Stdout and stderr are inherited from the watcher so command output shows
/// up directly in the terminal; stdin is closed. A spawn failure or a
/// non-zero exit is returned as [`WatcherError::CommandExecution`].
pub async fn run_command(command: &CommandLine) -> Result<()> {
    info!(cmd = %command, "starting command process");

    let status = Command::new(command.program())
        .args(command.args())
        .stdin(Stdio::null())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .status()
        .await
        .map_err(|e| WatcherError::CommandExecution {
            command: command.to_string(),
            reason: format!("could not be run: {e}"),
        })?;

    debug!(cmd = %command, ?status, "command process exited");

    if !status.success() {
        return Err(WatcherError::CommandExecution {
            command: command.to_string(),
            reason: match status.code() {
                Some(code) => format!("exited with status {code}"),
                None => format!("was terminated ({status})"),
            },
        });
    }

    Ok(())
}
