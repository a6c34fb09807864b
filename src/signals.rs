// src/signals.rs

//! OS signal subscription.
//!
//! Turns interrupt, terminate and hangup signals into [`ShutdownSignal`]
//! values on an `mpsc` channel, which is what [`crate::engine::Scheduler::run`]
//! listens on.

use std::fmt;

use tokio::sync::mpsc;
use tracing::warn;

/// A process-level signal that stops the watcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShutdownSignal {
    Interrupt,
    Terminate,
    Hangup,
}

impl fmt::Display for ShutdownSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ShutdownSignal::Interrupt => "SIGINT",
            ShutdownSignal::Terminate => "SIGTERM",
            ShutdownSignal::Hangup => "SIGHUP",
        };
        f.write_str(s)
    }
}

/// Register signal handlers and forward every delivery into a channel.
///
/// Must be called from within a Tokio runtime. A kind that cannot be
/// registered is logged and skipped.
pub fn subscribe() -> mpsc::Receiver<ShutdownSignal> {
    let (tx, rx) = mpsc::channel(4);
    spawn_forwarders(tx);
    rx
}

#[cfg(unix)]
fn spawn_forwarders(tx: mpsc::Sender<ShutdownSignal>) {
    use tokio::signal::unix::{signal, SignalKind};

    let kinds = [
        (SignalKind::interrupt(), ShutdownSignal::Interrupt),
        (SignalKind::terminate(), ShutdownSignal::Terminate),
        (SignalKind::hangup(), ShutdownSignal::Hangup),
    ];

    for (kind, value) in kinds {
        let mut stream = match signal(kind) {
            Ok(stream) => stream,
            Err(err) => {
                warn!(signal = %value, error = %err, "failed to listen for signal");
                continue;
            }
        };

        let tx = tx.clone();
        tokio::spawn(async move {
            while stream.recv().await.is_some() {
                if tx.send(value).await.is_err() {
                    break;
                }
            }
        });
    }
}

#[cfg(not(unix))]
fn spawn_forwarders(tx: mpsc::Sender<ShutdownSignal>) {
    tokio::spawn(async move {
        loop {
            if let Err(err) = tokio::signal::ctrl_c().await {
                warn!(error = %err, "failed to listen for Ctrl+C");
                return;
            }
            if tx.send(ShutdownSignal::Interrupt).await.is_err() {
                return;
            }
        }
    });
}
