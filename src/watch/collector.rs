// src/watch/collector.rs

use std::path::{Component, Path, PathBuf};
use std::time::SystemTime;

use tracing::{debug, trace, warn};
use walkdir::{DirEntry, WalkDir};

use crate::config::WatcherConfig;
use crate::errors::{Result, WatcherError};
use crate::watch::exclude::ExclusionSet;

/// A watched file as seen by one collection pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRecord {
    /// Bare file name, e.g. `"main.go"`.
    pub name: String,
    /// Path as yielded by the walk, rooted at the configured base path.
    pub path: PathBuf,
    pub modified_at: SystemTime,
}

/// Walk `config.base_path()` and return every watched file.
///
/// Entries are visited depth-first in file-name order. Directories, anything
/// under a path starting with `.git`, and files whose extension differs from
/// the configured one are skipped; the remaining files go through the
/// exclusion patterns, which are tested against both the walked path and the
/// path relative to the base.
///
/// Error policy:
/// - a walk error on a single entry is logged and that subtree skipped when
///   no exclusions are configured, and returned as
///   [`WatcherError::Traversal`] otherwise;
/// - an exclusion pattern that does not compile is returned as
///   [`WatcherError::PatternCompile`].
pub fn collect(config: &WatcherConfig) -> Result<Vec<FileRecord>> {
    let base = config.base_path();
    let exclusions = ExclusionSet::compile(config.excluded())?;
    let mut files = Vec::new();

    let walker = WalkDir::new(base)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| !is_git_path(base, e.path()));

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                if exclusions.is_empty() {
                    warn!(error = %err, "skipping unreadable entry during collection");
                    continue;
                }
                let path = err
                    .path()
                    .map(Path::to_path_buf)
                    .unwrap_or_else(|| base.to_path_buf());
                return Err(WatcherError::Traversal { path, source: err });
            }
        };

        if entry.file_type().is_dir() || !has_extension(entry.path(), config.extension()) {
            continue;
        }

        let path = display_path(entry.path());
        let path_str = path.to_string_lossy();
        let name = entry.file_name().to_string_lossy().into_owned();

        if !exclusions.is_empty() && is_excluded_entry(&exclusions, base, &path, &name) {
            trace!(path = %path_str, "file excluded");
            continue;
        }

        let modified_at = match modified_time(&entry) {
            Ok(t) => t,
            Err(err) => {
                warn!(path = %path_str, error = %err, "cannot read modification time; skipping");
                continue;
            }
        };

        files.push(FileRecord {
            name,
            path,
            modified_at,
        });
    }

    debug!(base = ?base, count = files.len(), "collected watched files");
    Ok(files)
}

/// Patterns may name the walked path or the path relative to the base, so
/// `subdir1/*` works whatever the base path is.
fn is_excluded_entry(exclusions: &ExclusionSet, base: &Path, path: &Path, name: &str) -> bool {
    if exclusions.is_excluded(&path.to_string_lossy(), name) {
        return true;
    }
    match path.strip_prefix(display_path(base)) {
        Ok(rel) if !rel.as_os_str().is_empty() => {
            exclusions.is_excluded(&rel.to_string_lossy(), name)
        }
        _ => false,
    }
}

fn modified_time(entry: &DirEntry) -> std::io::Result<SystemTime> {
    entry.metadata().map_err(std::io::Error::from)?.modified()
}

/// `.git`, `.github`, `.gitignore`, ... relative to the base.
fn is_git_path(base: &Path, path: &Path) -> bool {
    path.strip_prefix(base)
        .map(|rel| display_path(rel).to_string_lossy().starts_with(".git"))
        .unwrap_or(false)
}

fn has_extension(path: &Path, extension: &str) -> bool {
    let wanted = extension.trim_start_matches('.');
    path.extension().is_some_and(|ext| ext == wanted)
}

/// Drop the leading `./` the walker adds when the base path is `.`, so
/// paths read the same as the patterns users write.
fn display_path(path: &Path) -> PathBuf {
    let mut components = path.components().peekable();
    while components.peek() == Some(&Component::CurDir) {
        components.next();
    }
    components.collect()
}
