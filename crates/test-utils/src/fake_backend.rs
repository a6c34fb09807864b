use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use files_watcher::config::CommandLine;
use files_watcher::errors::{Result, WatcherError};
use files_watcher::exec::CommandBackend;

/// Shared counters observed by a [`FakeBackend`].
#[derive(Debug, Default)]
pub struct RunStats {
    runs: AtomicUsize,
    active: AtomicUsize,
    max_active: AtomicUsize,
    commands: Mutex<Vec<String>>,
}

impl RunStats {
    /// Completed plus in-progress runs.
    pub fn runs(&self) -> usize {
        self.runs.load(Ordering::SeqCst)
    }

    /// Highest number of runs ever observed in progress at once.
    pub fn max_active(&self) -> usize {
        self.max_active.load(Ordering::SeqCst)
    }

    pub fn commands(&self) -> Vec<String> {
        self.commands.lock().unwrap().clone()
    }
}

/// A backend that:
/// - records each run and how many overlap,
/// - optionally sleeps to simulate a slow command,
/// - fails the runs whose (1-based) number is listed in `fail_on`.
#[derive(Debug, Clone)]
pub struct FakeBackend {
    stats: Arc<RunStats>,
    duration: Duration,
    fail_on: Vec<usize>,
}

impl FakeBackend {
    pub fn new() -> Self {
        Self {
            stats: Arc::new(RunStats::default()),
            duration: Duration::ZERO,
            fail_on: Vec::new(),
        }
    }

    pub fn taking(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    pub fn failing_on(mut self, runs: &[usize]) -> Self {
        self.fail_on = runs.to_vec();
        self
    }

    pub fn stats(&self) -> Arc<RunStats> {
        Arc::clone(&self.stats)
    }
}

impl Default for FakeBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandBackend for FakeBackend {
    fn run<'a>(
        &'a mut self,
        command: &'a CommandLine,
    ) -> Pin<Box<dyn Future<Output = Result<()>> + Send + 'a>> {
        Box::pin(async move {
            let stats = &self.stats;
            let run = stats.runs.fetch_add(1, Ordering::SeqCst) + 1;
            let active = stats.active.fetch_add(1, Ordering::SeqCst) + 1;
            stats.max_active.fetch_max(active, Ordering::SeqCst);
            stats.commands.lock().unwrap().push(command.to_string());

            if !self.duration.is_zero() {
                tokio::time::sleep(self.duration).await;
            }

            stats.active.fetch_sub(1, Ordering::SeqCst);

            if self.fail_on.contains(&run) {
                return Err(WatcherError::CommandExecution {
                    command: command.to_string(),
                    reason: format!("exited with status 1 (fake run {run})"),
                });
            }
            Ok(())
        })
    }
}
