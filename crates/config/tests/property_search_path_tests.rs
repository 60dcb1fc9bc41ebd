//! Property-based tests for search-path resolution.
//!
//! These tests build random directory layouts on disk and check that
//! resolution always picks the earliest directory containing the file,
//! and falls back to the first directory when none does.
//!
//! Test coverage:
//! - First match wins regardless of which later directories also match
//! - Fallback is exactly `first_dir/relative_path`
//! - Empty relative path returns the first directory

use proptest::prelude::*;
use roadie_config::{ConfigError, resolve_path};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Strategy for a layout: which of up to six directories hold the file.
fn layout_strategy() -> impl Strategy<Value = Vec<bool>> {
    prop::collection::vec(any::<bool>(), 1..=6)
}

/// Strategy for relative paths of one to three segments.
fn relative_parts_strategy() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec("[a-z]{1,8}(\\.yml)?", 1..=3)
}

fn build_layout(temp: &TempDir, layout: &[bool], parts: &[String]) -> Vec<PathBuf> {
    layout
        .iter()
        .enumerate()
        .map(|(i, has_file)| {
            let dir = temp.path().join(format!("dir{i}"));
            fs::create_dir_all(&dir).unwrap();
            if *has_file {
                let file = parts.iter().fold(dir.clone(), |path, part| path.join(part));
                fs::create_dir_all(file.parent().unwrap()).unwrap();
                fs::write(&file, "").unwrap();
            }
            dir
        })
        .collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Test that the earliest directory containing the path wins.
    #[test]
    fn test_first_existing_directory_wins(layout in layout_strategy(), parts in relative_parts_strategy()) {
        let temp = TempDir::new().unwrap();
        let dirs = build_layout(&temp, &layout, &parts);

        let resolved = resolve_path(&dirs, &parts).unwrap();

        let expected_dir = layout
            .iter()
            .position(|has_file| *has_file)
            .map_or(&dirs[0], |i| &dirs[i]);
        let expected = parts.iter().fold(expected_dir.clone(), |path, part| path.join(part));
        prop_assert_eq!(resolved, expected);
    }

    /// Test that an empty relative path resolves to the first directory.
    #[test]
    fn test_empty_parts_return_first_directory(layout in layout_strategy()) {
        let temp = TempDir::new().unwrap();
        let dirs = build_layout(&temp, &layout, &["unused".to_string()]);

        let resolved = resolve_path::<PathBuf, String>(&dirs, &[]).unwrap();
        prop_assert_eq!(&resolved, &dirs[0]);
    }

    /// Test that an empty search path always fails.
    #[test]
    fn test_empty_search_path_always_fails(parts in relative_parts_strategy()) {
        let dirs: Vec<PathBuf> = Vec::new();
        prop_assert!(matches!(resolve_path(&dirs, &parts), Err(ConfigError::EmptySearchPath)));
    }
}
