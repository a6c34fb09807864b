// tests/exclusion_properties.rs

use proptest::prelude::*;

use files_watcher::errors::WatcherError;
use files_watcher::watch::{is_excluded, is_wildcard, ExclusionSet};

fn segment() -> impl Strategy<Value = String> {
    "[a-z0-9_]{1,8}"
}

fn rel_path() -> impl Strategy<Value = (Vec<String>, String)> {
    (proptest::collection::vec(segment(), 0..4), segment()).prop_map(|(dirs, stem)| {
        (dirs, format!("{stem}.go"))
    })
}

fn join(dirs: &[String], name: &str) -> String {
    let mut parts = dirs.to_vec();
    parts.push(name.to_string());
    parts.join("/")
}

proptest! {
    #[test]
    fn exact_name_or_path_is_always_excluded((dirs, name) in rel_path()) {
        let path = join(&dirs, &name);

        prop_assert!(is_excluded(&path, &name, &[name.clone()]).unwrap());
        prop_assert!(is_excluded(&path, &name, &[path.clone()]).unwrap());
    }

    #[test]
    fn unrelated_exact_pattern_never_excludes(
        (dirs, name) in rel_path(),
        other in segment(),
    ) {
        let path = join(&dirs, &name);
        let pattern = format!("{other}.rs");

        prop_assert!(!is_excluded(&path, &name, &[pattern]).unwrap());
    }

    #[test]
    fn directory_wildcard_matches_iff_path_is_under_it(
        dir in segment(),
        (dirs, name) in rel_path(),
    ) {
        let path = join(&dirs, &name);
        let pattern = format!("{dir}/*");
        let expected = path.starts_with(&format!("{dir}/"));

        prop_assert_eq!(is_excluded(&path, &name, &[pattern.clone()]).unwrap(), expected);

        let set = ExclusionSet::compile(&[pattern]).unwrap();
        prop_assert_eq!(set.is_excluded(&path, &name), expected);
    }

    #[test]
    fn unclosed_class_is_always_a_compile_error((dirs, name) in rel_path(), dir in segment()) {
        let path = join(&dirs, &name);
        let pattern = format!("{dir}/[{dir}");
        prop_assert!(is_wildcard(&pattern));

        let err = is_excluded(&path, &name, &[pattern.clone()]).unwrap_err();
        let is_compile_error = matches!(err, WatcherError::PatternCompile { .. });
        prop_assert!(is_compile_error);
        prop_assert!(ExclusionSet::compile(&[pattern]).is_err());
    }
}
