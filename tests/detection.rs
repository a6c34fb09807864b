// tests/detection.rs

use std::error::Error;
use std::sync::Arc;
use std::time::Duration;

use files_watcher::config::{WatcherConfig, WatcherOptions};
use files_watcher::engine::detect_change;
use files_watcher_test_utils::fixtures::Tree;
use files_watcher_test_utils::init_tracing;

type TestResult = Result<(), Box<dyn Error>>;

fn config_for(tree: &Tree, excluded: Vec<String>) -> Arc<WatcherConfig> {
    Arc::new(
        WatcherConfig::try_from(
            WatcherOptions::new()
                .with_base_path(tree.root())
                .with_command("true")
                .with_excluded(excluded)
                .with_frequency(3)
                .with_check_delay(Duration::from_millis(10)),
        )
        .expect("valid test config"),
    )
}

#[tokio::test]
async fn file_touched_one_second_ago_is_changed() -> TestResult {
    init_tracing();
    let tree = Tree::basepath_layout();
    tree.file_aged("subdir2/test2.go", Duration::from_secs(1));

    let changed = detect_change(config_for(&tree, vec![])).await?;

    let file = changed.expect("a change inside the window");
    assert_eq!(file.name, "test2.go");
    assert!(file.path.ends_with("subdir2/test2.go"));
    Ok(())
}

#[tokio::test]
async fn file_touched_ten_seconds_ago_is_not_changed() -> TestResult {
    let tree = Tree::basepath_layout();
    tree.file_aged("subdir2/test2.go", Duration::from_secs(10));

    let changed = detect_change(config_for(&tree, vec![])).await?;

    assert!(changed.is_none());
    Ok(())
}

#[tokio::test]
async fn excluded_fresh_file_does_not_count() -> TestResult {
    let tree = Tree::basepath_layout();
    tree.file_aged("subdir1/test1.go", Duration::from_secs(1));

    let changed = detect_change(config_for(&tree, vec![tree.path_str("subdir1/*")])).await?;

    assert!(changed.is_none());
    Ok(())
}

#[tokio::test]
async fn fresh_file_with_other_extension_does_not_count() -> TestResult {
    let tree = Tree::basepath_layout();
    tree.file_aged("notes.md", Duration::ZERO);

    assert!(detect_change(config_for(&tree, vec![])).await?.is_none());
    Ok(())
}

#[tokio::test]
async fn every_fresh_file_can_be_the_one_reported() -> TestResult {
    let tree = Tree::new();
    for i in 0..25 {
        tree.old_file(&format!("pkg{i}/old.go"));
    }
    tree.file_aged("pkg7/new.go", Duration::from_millis(500));

    let changed = detect_change(config_for(&tree, vec![])).await?;

    assert_eq!(changed.map(|f| f.name), Some("new.go".to_string()));
    Ok(())
}
