#![allow(dead_code)]

use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

use tempfile::TempDir;

/// A throwaway directory tree whose files can be given arbitrary ages.
pub struct Tree {
    dir: TempDir,
}

impl Tree {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("creating temp dir"),
        }
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    /// `root/rel` as a string, handy for building exclusion patterns.
    pub fn path_str(&self, rel: &str) -> String {
        self.root().join(rel).to_string_lossy().into_owned()
    }

    /// Create `rel` (and parent dirs) with a modification time `age` ago.
    pub fn file_aged(&self, rel: &str, age: Duration) -> PathBuf {
        let path = self.root().join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("creating parent dirs");
        }
        fs::write(&path, rel.as_bytes()).expect("writing fixture file");
        set_age(&path, age);
        path
    }

    /// Create `rel` with a modification time of one hour ago.
    pub fn old_file(&self, rel: &str) -> PathBuf {
        self.file_aged(rel, Duration::from_secs(3600))
    }

    pub fn dir(&self, rel: &str) -> PathBuf {
        let path = self.root().join(rel);
        fs::create_dir_all(&path).expect("creating fixture dir");
        path
    }

    /// Bump the modification time of `rel` to now.
    pub fn touch(&self, rel: &str) {
        set_age(&self.root().join(rel), Duration::ZERO);
    }

    /// The classic four-file layout:
    ///
    /// ```text
    /// subdir1/test.go
    /// subdir1/test1.go
    /// subdir2/test.go
    /// subdir2/test2.go
    /// ```
    ///
    /// plus a few files that are never watched (`README.md`, `.git/hook.go`).
    /// All files are an hour old.
    pub fn basepath_layout() -> Self {
        let tree = Self::new();
        tree.old_file("subdir1/test.go");
        tree.old_file("subdir1/test1.go");
        tree.old_file("subdir2/test.go");
        tree.old_file("subdir2/test2.go");
        tree.old_file("README.md");
        tree.old_file(".git/hook.go");
        tree
    }
}

impl Default for Tree {
    fn default() -> Self {
        Self::new()
    }
}

pub fn set_age(path: &Path, age: Duration) {
    let when = SystemTime::now() - age;
    File::options()
        .write(true)
        .open(path)
        .and_then(|f| f.set_modified(when))
        .expect("setting modification time");
}
