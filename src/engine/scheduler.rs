// src/engine/scheduler.rs

use std::fmt;
use std::sync::Arc;

use anyhow::anyhow;
use tokio::sync::mpsc;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, trace};

use crate::config::WatcherConfig;
use crate::errors::{Result, WatcherError};
use crate::exec::{
    spawn_executor, CommandBackend, CommandExecutor, ExecutorHandle, Notified, ProcessBackend,
    Trigger,
};
use crate::signals::ShutdownSignal;
use crate::watch::{collect, first_change, FileRecord};

use super::{Stopped, WatchState};

/// One detection pass outside the loop: collect a fresh snapshot and check it.
///
/// Runs the same two steps as a scheduler tick, without state tracking or
/// triggering. The directory walk runs on Tokio's blocking pool; the per-file
/// checks run concurrently as described in [`first_change`]. Returns the file
/// that won the check, or `None` if nothing changed inside the staleness
/// window.
pub async fn detect_change(config: Arc<WatcherConfig>) -> Result<Option<FileRecord>> {
    let files = collect_snapshot(Arc::clone(&config)).await?;
    Ok(check_snapshot(&config, files).await)
}

async fn check_snapshot(config: &WatcherConfig, files: Vec<FileRecord>) -> Option<FileRecord> {
    first_change(files, config.frequency(), config.check_delay()).await
}

async fn collect_snapshot(config: Arc<WatcherConfig>) -> Result<Vec<FileRecord>> {
    tokio::task::spawn_blocking(move || collect(&config))
        .await
        .map_err(|e| WatcherError::Other(anyhow!("collection task failed: {e}")))?
}

/// The polling loop.
///
/// Owns the validated config and the command executor. [`Scheduler::run`]
/// spawns the executor worker, then on every tick collects, checks and, on
/// the first detected change, notifies the worker without waiting for the
/// command.
pub struct Scheduler<B: CommandBackend> {
    config: Arc<WatcherConfig>,
    executor: CommandExecutor<B>,
    state: WatchState,
    ticks: u64,
}

impl<B: CommandBackend> fmt::Debug for Scheduler<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scheduler")
            .field("config", &self.config)
            .field("state", &self.state)
            .field("ticks", &self.ticks)
            .finish_non_exhaustive()
    }
}

impl Scheduler<ProcessBackend> {
    /// Scheduler that runs the configured command as a real process.
    pub fn new(config: WatcherConfig) -> Self {
        Self::with_backend(config, ProcessBackend)
    }
}

impl<B: CommandBackend> Scheduler<B> {
    pub fn with_backend(config: WatcherConfig, backend: B) -> Self {
        let executor = CommandExecutor::new(config.command().clone(), backend);
        Self {
            config: Arc::new(config),
            executor,
            state: WatchState::Idle,
            ticks: 0,
        }
    }

    pub fn config(&self) -> &WatcherConfig {
        &self.config
    }

    pub fn state(&self) -> WatchState {
        self.state
    }

    /// Main loop.
    ///
    /// Waits on the timer, the signal channel and `cancel` at the same time.
    /// The first tick fires one `frequency` after start. A tick's collect and
    /// check phase completes before the next tick is awaited; ticks missed
    /// meanwhile are skipped rather than bunched.
    ///
    /// - A signal ends the loop immediately, even mid-tick, without waiting
    ///   for in-flight checks or commands.
    /// - Cancellation stops new ticks. A tick already in progress finishes,
    ///   and the executor drains its queue before this returns. A signal
    ///   arriving during the drain still ends the loop at once.
    ///
    /// A closed signal channel is treated as "no signals will arrive".
    pub async fn run(
        mut self,
        cancel: CancellationToken,
        mut signals: mpsc::Receiver<ShutdownSignal>,
    ) -> Result<Stopped> {
        info!(
            base = ?self.config.base_path(),
            ext = %self.config.extension(),
            cmd = %self.config.command(),
            frequency = ?self.config.frequency(),
            excluded = ?self.config.excluded(),
            "starting the watcher daemon"
        );

        let executor = spawn_executor(self.executor.clone(), self.config.queue_length());

        let period = self.config.frequency();
        let mut ticker = interval_at(Instant::now() + period, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                biased;
                Some(signal) = signals.recv() => return Ok(self.stop_on_signal(signal)),
                _ = cancel.cancelled() => {
                    self.transition(WatchState::Stopped);
                    info!("cancellation requested; no further ticks will be scheduled");
                    tokio::select! {
                        biased;
                        Some(signal) = signals.recv() => return Ok(self.stop_on_signal(signal)),
                        _ = executor.shutdown() => return Ok(Stopped::Cancelled),
                    }
                }
                _ = ticker.tick() => {}
            }

            tokio::select! {
                biased;
                Some(signal) = signals.recv() => return Ok(self.stop_on_signal(signal)),
                _ = self.tick(&executor) => {}
            }
        }
    }

    /// One collect-and-check round.
    async fn tick(&mut self, executor: &ExecutorHandle) {
        self.ticks += 1;
        let tick = self.ticks;
        debug!(tick, "tick");

        self.transition(WatchState::Collecting);
        let files = match collect_snapshot(Arc::clone(&self.config)).await {
            Ok(files) => files,
            Err(err) => {
                error!(tick, error = %err, "collecting watched files failed; retrying next tick");
                self.transition(WatchState::Idle);
                return;
            }
        };

        self.transition(WatchState::CheckingFiles);
        let changed = check_snapshot(&self.config, files).await;

        if let Some(file) = changed {
            self.transition(WatchState::Triggering);
            match executor.notify(Trigger { tick, path: file.path }) {
                Notified::Queued => debug!(tick, "command run queued"),
                Notified::Coalesced => debug!(tick, "change covered by an already queued run"),
                Notified::Closed => error!(tick, "executor is gone; change not acted on"),
            }
        }

        self.transition(WatchState::Idle);
    }

    fn stop_on_signal(&mut self, signal: ShutdownSignal) -> Stopped {
        self.transition(WatchState::Stopped);
        info!(%signal, "you interrupted me; stopping immediately");
        Stopped::Signal(signal)
    }

    fn transition(&mut self, next: WatchState) {
        trace!(from = %self.state, to = %next, "scheduler state");
        self.state = next;
    }
}
