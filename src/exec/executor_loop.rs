// src/exec/executor_loop.rs

//! The command executor and its background worker.

use std::fmt;
use std::sync::Arc;

use tokio::sync::{mpsc, Mutex};
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use crate::config::CommandLine;
use crate::errors::Result;

use super::backend::CommandBackend;
use super::Trigger;

/// Runs the configured command, one run at a time.
///
/// The backend lives behind an owned `tokio::sync::Mutex`: holding the guard
/// is the right to run the command. Clones share the same lock, so runs
/// started through any clone are serialized, and the guard is dropped on
/// every exit path, including a failed run.
pub struct CommandExecutor<B> {
    command: Arc<CommandLine>,
    backend: Arc<Mutex<B>>,
}

impl<B> Clone for CommandExecutor<B> {
    fn clone(&self) -> Self {
        Self {
            command: Arc::clone(&self.command),
            backend: Arc::clone(&self.backend),
        }
    }
}

impl<B> fmt::Debug for CommandExecutor<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandExecutor")
            .field("command", &self.command)
            .finish_non_exhaustive()
    }
}

impl<B: CommandBackend> CommandExecutor<B> {
    pub fn new(command: CommandLine, backend: B) -> Self {
        Self {
            command: Arc::new(command),
            backend: Arc::new(Mutex::new(backend)),
        }
    }

    pub fn command(&self) -> &CommandLine {
        &self.command
    }

    /// Run the command once for `trigger`, waiting for any run in progress.
    pub async fn execute(&self, trigger: &Trigger) -> Result<()> {
        let mut backend = self.backend.lock().await;
        debug!(tick = trigger.tick, path = ?trigger.path, "command lock acquired");
        backend.run(&self.command).await
    }
}

/// Result of handing a trigger to the executor worker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notified {
    /// The trigger was queued and will cause a run.
    Queued,
    /// The queue was full; an already-queued run will cover this change.
    Coalesced,
    /// The worker has stopped.
    Closed,
}

/// Sending side of the executor worker.
#[derive(Debug)]
pub struct ExecutorHandle {
    tx: mpsc::Sender<Trigger>,
    worker: JoinHandle<()>,
}

impl ExecutorHandle {
    /// Hand a trigger to the worker without waiting.
    ///
    /// Never blocks the caller: when `queue_length` triggers are already
    /// waiting the new one is coalesced into them.
    pub fn notify(&self, trigger: Trigger) -> Notified {
        match self.tx.try_send(trigger) {
            Ok(()) => Notified::Queued,
            Err(mpsc::error::TrySendError::Full(t)) => {
                debug!(tick = t.tick, "command run already queued; coalescing trigger");
                Notified::Coalesced
            }
            Err(mpsc::error::TrySendError::Closed(t)) => {
                warn!(tick = t.tick, "executor worker stopped; dropping trigger");
                Notified::Closed
            }
        }
    }

    /// Close the queue and wait for queued runs to finish.
    pub async fn shutdown(self) {
        drop(self.tx);
        if let Err(err) = self.worker.await {
            warn!(error = %err, "executor worker ended abnormally");
        }
    }
}

/// Spawn the single executor worker.
///
/// The worker takes triggers off a queue holding at most `queue_length`
/// entries and runs the command for each under the executor's lock. A failed
/// run is logged and never stops the worker.
pub fn spawn_executor<B: CommandBackend>(
    executor: CommandExecutor<B>,
    queue_length: usize,
) -> ExecutorHandle {
    let (tx, mut rx) = mpsc::channel::<Trigger>(queue_length.max(1));

    let worker = tokio::spawn(async move {
        info!(cmd = %executor.command(), "executor loop started");

        while let Some(trigger) = rx.recv().await {
            match executor.execute(&trigger).await {
                Ok(()) => info!(tick = trigger.tick, "command completed successfully"),
                Err(err) => error!(tick = trigger.tick, error = %err, "command failed"),
            }
        }

        info!("executor loop finished (channel closed)");
    });

    ExecutorHandle { tx, worker }
}
