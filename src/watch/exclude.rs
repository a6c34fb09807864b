// src/watch/exclude.rs

use std::fmt;

use globset::{Glob, GlobMatcher};

use crate::errors::{Result, WatcherError};

/// Characters that turn an exclusion pattern into a wildcard pattern.
const WILDCARD_CHARS: &[char] = &['*', '?', '[', '{'];

/// Returns true if `pattern` should be compiled as a glob rather than
/// compared literally.
pub fn is_wildcard(pattern: &str) -> bool {
    pattern.contains(WILDCARD_CHARS)
}

/// Decide whether a file is excluded by any of `patterns`.
///
/// Patterns are evaluated in order and the first match wins:
/// - a wildcard pattern is compiled as a glob and tested against `path`;
/// - any other pattern matches when it equals `file_name` or `path`.
///
/// A wildcard pattern that does not compile is reported as
/// [`WatcherError::PatternCompile`]; it is never treated as a match or a
/// non-match. Patterns after the first match are not compiled.
pub fn is_excluded(path: &str, file_name: &str, patterns: &[String]) -> Result<bool> {
    for pattern in patterns {
        let hit = if is_wildcard(pattern) {
            compile_glob(pattern)?.is_match(path)
        } else {
            exact_match(pattern, path, file_name)
        };
        if hit {
            return Ok(true);
        }
    }
    Ok(false)
}

fn exact_match(pattern: &str, path: &str, file_name: &str) -> bool {
    file_name == pattern || path == pattern
}

fn compile_glob(pattern: &str) -> Result<GlobMatcher> {
    Glob::new(pattern)
        .map(|g| g.compile_matcher())
        .map_err(|source| WatcherError::PatternCompile {
            pattern: pattern.to_string(),
            source,
        })
}

#[derive(Clone)]
enum ExclusionPattern {
    Exact(String),
    Wildcard(GlobMatcher),
}

impl ExclusionPattern {
    fn matches(&self, path: &str, file_name: &str) -> bool {
        match self {
            ExclusionPattern::Exact(p) => exact_match(p, path, file_name),
            ExclusionPattern::Wildcard(m) => m.is_match(path),
        }
    }
}

/// An ordered, pre-compiled list of exclusion patterns.
///
/// Same first-match-wins semantics as [`is_excluded`], but every wildcard is
/// compiled once up front so a pass over a large tree does not recompile
/// them per file.
#[derive(Clone, Default)]
pub struct ExclusionSet {
    patterns: Vec<ExclusionPattern>,
}

impl fmt::Debug for ExclusionSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExclusionSet")
            .field("len", &self.patterns.len())
            .finish_non_exhaustive()
    }
}

impl ExclusionSet {
    /// Compile every pattern, failing on the first invalid wildcard.
    pub fn compile(patterns: &[String]) -> Result<Self> {
        let patterns = patterns
            .iter()
            .map(|p| {
                if is_wildcard(p) {
                    compile_glob(p).map(ExclusionPattern::Wildcard)
                } else {
                    Ok(ExclusionPattern::Exact(p.clone()))
                }
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { patterns })
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_excluded(&self, path: &str, file_name: &str) -> bool {
        self.patterns.iter().any(|p| p.matches(path, file_name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pats(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn exact_pattern_matches_full_path_or_bare_name() {
        let patterns = pats(&["base/subdir1/test.go", "main.go"]);

        assert!(is_excluded("base/subdir1/test.go", "test.go", &patterns).unwrap());
        assert!(is_excluded("base/other/main.go", "main.go", &patterns).unwrap());
        assert!(!is_excluded("base/subdir2/test.go", "test.go", &patterns).unwrap());
    }

    #[test]
    fn exact_matching_is_case_sensitive() {
        let patterns = pats(&["Main.go"]);
        assert!(!is_excluded("base/main.go", "main.go", &patterns).unwrap());
    }

    #[test]
    fn wildcard_matches_against_path() {
        let patterns = pats(&["base/subdir1/*"]);

        assert!(is_excluded("base/subdir1/test.go", "test.go", &patterns).unwrap());
        assert!(is_excluded("base/subdir1/deep/x.go", "x.go", &patterns).unwrap());
        assert!(!is_excluded("base/subdir10/test.go", "test.go", &patterns).unwrap());
        assert!(!is_excluded("base/subdir2/test.go", "test.go", &patterns).unwrap());
    }

    #[test]
    fn wildcard_is_not_compared_to_the_bare_name() {
        let patterns = pats(&["test*"]);
        assert!(!is_excluded("base/test.go", "test.go", &patterns).unwrap());
        assert!(is_excluded("test.go", "test.go", &patterns).unwrap());
    }

    #[test]
    fn invalid_wildcard_is_an_error() {
        let patterns = pats(&["base/[abc"]);
        let err = is_excluded("base/a.go", "a.go", &patterns).unwrap_err();
        assert!(matches!(err, WatcherError::PatternCompile { pattern, .. } if pattern == "base/[abc"));
    }

    #[test]
    fn first_match_wins_before_a_bad_pattern_is_reached() {
        let patterns = pats(&["a.go", "base/[abc"]);
        assert!(is_excluded("base/a.go", "a.go", &patterns).unwrap());
        assert!(is_excluded("base/b.go", "b.go", &patterns).is_err());
    }

    #[test]
    fn no_patterns_excludes_nothing() {
        assert!(!is_excluded("base/a.go", "a.go", &[]).unwrap());
        assert!(ExclusionSet::compile(&[]).unwrap().is_empty());
    }

    #[test]
    fn compiled_set_agrees_with_is_excluded() {
        let patterns = pats(&["vendor/**", "gen.go", "cmd/?/main.go"]);
        let set = ExclusionSet::compile(&patterns).unwrap();
        assert_eq!(set.len(), 3);

        for (path, name) in [
            ("vendor/x/y.go", "y.go"),
            ("pkg/gen.go", "gen.go"),
            ("cmd/a/main.go", "main.go"),
            ("cmd/ab/main.go", "main.go"),
            ("pkg/lib.go", "lib.go"),
        ] {
            assert_eq!(
                set.is_excluded(path, name),
                is_excluded(path, name, &patterns).unwrap(),
                "disagreement on {path}"
            );
        }
    }
}
