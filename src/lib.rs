// src/lib.rs

pub mod cli;
pub mod config;
pub mod engine;
pub mod errors;
pub mod exec;
pub mod logging;
pub mod signals;
pub mod watch;

use std::time::Duration;

use anyhow::Result;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::cli::CliArgs;
use crate::config::WatcherConfig;
use crate::engine::{Scheduler, Stopped};
use crate::watch::collect;

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - option validation
/// - signal subscription
/// - the optional `--timeout` cancellation
/// - the scheduler loop
///
/// On a shutdown signal the process exits straight away, without waiting for
/// a running command.
pub async fn run(args: CliArgs) -> Result<()> {
    let cfg = WatcherConfig::try_from(args.to_options())?;

    if args.dry_run {
        print_dry_run(&cfg)?;
        return Ok(());
    }

    let signals = signals::subscribe();

    let cancel = CancellationToken::new();
    if let Some(secs) = args.timeout {
        let token = cancel.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_secs(secs)).await;
            debug!(secs, "timeout elapsed");
            token.cancel();
        });
    }

    let scheduler = Scheduler::new(cfg);
    match scheduler.run(cancel, signals).await? {
        Stopped::Signal(signal) => {
            info!(%signal, "exiting");
            std::process::exit(0);
        }
        Stopped::Cancelled => {
            info!("watcher stopped");
            Ok(())
        }
    }
}

/// Dry-run output: the resolved options and the files currently watched.
fn print_dry_run(cfg: &WatcherConfig) -> Result<()> {
    println!("files-watcher dry-run");
    println!("  base path = {}", cfg.base_path().display());
    println!("  command   = {}", cfg.command());
    println!("  extension = {}", cfg.extension());
    println!("  frequency = {:?}", cfg.frequency());
    if !cfg.excluded().is_empty() {
        println!("  excluded  = {:?}", cfg.excluded());
    }
    println!();

    let files = collect(cfg)?;
    println!("watched files ({}):", files.len());
    for file in &files {
        println!("  - {}", file.path.display());
    }

    debug!("dry-run complete (no execution)");
    Ok(())
}
