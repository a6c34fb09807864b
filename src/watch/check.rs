// src/watch/check.rs

//! Concurrent staleness checks over one collection snapshot.

use std::time::{Duration, SystemTime};

use tokio::sync::mpsc;
use tokio::time::sleep;
use tracing::{debug, info, trace};

use crate::watch::collector::FileRecord;

/// Result reported by a single per-file check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckResult {
    Changed(FileRecord),
    Unchanged,
}

/// True if `modified_at` falls inside the trailing `window` ending at `now`.
///
/// The comparison is strict: a file modified exactly `window` ago is not
/// considered changed.
pub fn is_changed(modified_at: SystemTime, now: SystemTime, window: Duration) -> bool {
    match now.checked_sub(window) {
        Some(cutoff) => modified_at > cutoff,
        None => true,
    }
}

/// Check every file concurrently and return the first one found changed.
///
/// One Tokio task is spawned per file. Each waits `delay`, then compares the
/// file's modification time against `now - window` (with `now` taken at that
/// moment) and reports on a results channel sized to the snapshot, so no
/// checker ever blocks on send. As soon as a change is reported the remaining
/// checkers are detached: they run to completion and their results are
/// dropped with the receiver.
///
/// Returns `None` when every file reported unchanged (or the snapshot was
/// empty).
pub async fn first_change(
    files: Vec<FileRecord>,
    window: Duration,
    delay: Duration,
) -> Option<FileRecord> {
    if files.is_empty() {
        return None;
    }

    let (tx, mut rx) = mpsc::channel::<CheckResult>(files.len());

    for file in files {
        let tx = tx.clone();
        tokio::spawn(async move {
            if !delay.is_zero() {
                sleep(delay).await;
            }

            let result = if is_changed(file.modified_at, SystemTime::now(), window) {
                CheckResult::Changed(file)
            } else {
                CheckResult::Unchanged
            };

            // The receiver is gone once another checker won.
            let _ = tx.send(result).await;
        });
    }
    drop(tx);

    let mut unchanged = 0usize;
    while let Some(result) = rx.recv().await {
        match result {
            CheckResult::Changed(file) => {
                info!(file = %file.name, path = ?file.path, "file has changed");
                return Some(file);
            }
            CheckResult::Unchanged => {
                unchanged += 1;
                trace!(unchanged, "file unchanged");
            }
        }
    }

    debug!(unchanged, "no watched file changed in this window");
    None
}
