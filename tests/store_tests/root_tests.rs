//! Tests for root directory preparation
//!
//! These tests verify:
//! - A private, prefixed subdirectory is created under the root
//! - The writability probe does not linger
//! - Missing and non-directory roots are rejected

use std::fs;

use spillslice::store::root::prepare_root;
use spillslice::SpillError;
use tempfile::TempDir;

#[test]
fn test_prepare_creates_prefixed_subdirectory() {
    let root = TempDir::new().unwrap();

    let dir = prepare_root(root.path(), "spillslice-").unwrap();

    assert!(dir.path().is_dir());
    assert_eq!(dir.path().parent().unwrap(), root.path());
    let name = dir.path().file_name().unwrap().to_string_lossy().into_owned();
    assert!(name.starts_with("spillslice-"), "{}", name);
}

#[test]
fn test_probe_file_is_removed() {
    let root = TempDir::new().unwrap();

    let _dir = prepare_root(root.path(), "p-").unwrap();

    let leftovers: Vec<String> = fs::read_dir(root.path())
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .filter(|name| name.starts_with("probe-"))
        .collect();
    assert!(leftovers.is_empty(), "{:?}", leftovers);
}

#[test]
fn test_two_calls_yield_distinct_directories() {
    let root = TempDir::new().unwrap();

    let a = prepare_root(root.path(), "same-").unwrap();
    let b = prepare_root(root.path(), "same-").unwrap();

    assert_ne!(a.path(), b.path());
}

#[test]
fn test_close_removes_subdirectory_and_contents() {
    let root = TempDir::new().unwrap();
    let dir = prepare_root(root.path(), "x-").unwrap();
    let path = dir.path().to_path_buf();
    fs::write(path.join("1"), b"slot").unwrap();

    dir.close().unwrap();

    assert!(!path.exists());
}

#[test]
fn test_missing_root_rejected() {
    let root = TempDir::new().unwrap();
    let missing = root.path().join("nope");

    let err = prepare_root(&missing, "x-").unwrap_err();

    assert!(matches!(err, SpillError::RootDir { ref path, .. } if *path == missing));
}

#[test]
fn test_file_root_rejected() {
    let root = TempDir::new().unwrap();
    let file = root.path().join("file");
    fs::write(&file, b"not a dir").unwrap();

    let err = prepare_root(&file, "x-").unwrap_err();

    assert!(err.to_string().contains("not a directory"), "{}", err);
}
