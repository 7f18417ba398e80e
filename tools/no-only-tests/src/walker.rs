use crate::parse::SOURCE_EXTENSIONS;
use regex::Regex;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

static TEST_FILE_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\.(test|spec)\.[cm]?[jt]sx?$").unwrap()
});

pub fn is_source_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| SOURCE_EXTENSIONS.contains(&ext))
}

/// `foo.test.ts`, `foo.spec.jsx`, or anything below a `__tests__` directory.
pub fn is_test_file(path: &Path) -> bool {
    let name_matches = path
        .file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|name| TEST_FILE_NAME.is_match(name));
    name_matches || path.components().any(|c| c.as_os_str() == "__tests__")
}

/// Recursively collect lintable JS/TS files, skipping specified directories.
/// Results are sorted so output is stable across runs.
pub fn collect_source_files(dir: &Path, skip_dirs: &HashSet<&str>, tests_only: bool) -> Vec<PathBuf> {
    let mut results = Vec::new();
    collect_inner(dir, skip_dirs, tests_only, &mut results);
    results.sort();
    results
}

fn collect_inner(dir: &Path, skip_dirs: &HashSet<&str>, tests_only: bool, results: &mut Vec<PathBuf>) {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(_) => return,
    };

    for entry in entries.flatten() {
        let path = entry.path();
        if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
            if path.is_dir() {
                if !skip_dirs.contains(name) {
                    collect_inner(&path, skip_dirs, tests_only, results);
                }
            } else if path.is_file() && is_source_file(&path) && (!tests_only || is_test_file(&path)) {
                results.push(path);
            }
        }
    }
}

/// Expand CLI targets: directories are walked, anything else is taken as
/// given. Missing paths stay in the list so the caller can report them.
pub fn expand_targets(targets: &[PathBuf], skip_dirs: &HashSet<&str>, tests_only: bool) -> Vec<PathBuf> {
    let mut results = Vec::new();
    for target in targets {
        if target.is_dir() {
            results.extend(collect_source_files(target, skip_dirs, tests_only));
        } else {
            results.push(target.clone());
        }
    }
    results.dedup();
    results
}
