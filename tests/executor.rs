// tests/executor.rs

use std::path::PathBuf;
use std::time::Duration;

use files_watcher::config::CommandLine;
use files_watcher::exec::{spawn_executor, CommandExecutor, Notified, Trigger};
use files_watcher_test_utils::fake_backend::FakeBackend;
use files_watcher_test_utils::{init_tracing, with_timeout};

fn trigger(tick: u64) -> Trigger {
    Trigger {
        tick,
        path: PathBuf::from("main.go"),
    }
}

fn command() -> CommandLine {
    CommandLine::parse("go build ./...").unwrap()
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_executions_never_overlap() {
    init_tracing();
    let backend = FakeBackend::new().taking(Duration::from_millis(20));
    let stats = backend.stats();
    let executor = CommandExecutor::new(command(), backend);

    let mut handles = Vec::new();
    for tick in 0..8 {
        let executor = executor.clone();
        handles.push(tokio::spawn(async move {
            executor.execute(&trigger(tick)).await
        }));
    }
    for h in handles {
        h.await.unwrap().unwrap();
    }

    assert_eq!(stats.runs(), 8);
    assert_eq!(stats.max_active(), 1);
    assert!(stats.commands().iter().all(|c| c == "go build ./..."));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn lock_is_released_after_a_failed_run() {
    let backend = FakeBackend::new().failing_on(&[1]);
    let stats = backend.stats();
    let executor = CommandExecutor::new(command(), backend);

    assert!(executor.execute(&trigger(1)).await.is_err());
    with_timeout(executor.execute(&trigger(2))).await.unwrap();

    assert_eq!(stats.runs(), 2);
}

#[tokio::test]
async fn worker_keeps_running_after_a_failure() {
    let backend = FakeBackend::new().failing_on(&[1]);
    let stats = backend.stats();
    let handle = spawn_executor(CommandExecutor::new(command(), backend), 4);

    assert_eq!(handle.notify(trigger(1)), Notified::Queued);
    assert_eq!(handle.notify(trigger(2)), Notified::Queued);
    with_timeout(handle.shutdown()).await;

    assert_eq!(stats.runs(), 2);
}

#[tokio::test]
async fn triggers_beyond_the_queue_are_coalesced() {
    let backend = FakeBackend::new().taking(Duration::from_millis(200));
    let stats = backend.stats();
    let handle = spawn_executor(CommandExecutor::new(command(), backend), 1);

    // First trigger is picked up by the worker, second waits in the queue.
    assert_eq!(handle.notify(trigger(1)), Notified::Queued);
    tokio::time::sleep(Duration::from_millis(50)).await;
    assert_eq!(handle.notify(trigger(2)), Notified::Queued);
    assert_eq!(handle.notify(trigger(3)), Notified::Coalesced);

    with_timeout(handle.shutdown()).await;

    assert_eq!(stats.runs(), 2);
    assert_eq!(stats.max_active(), 1);
}
