#![allow(dead_code)] // Shared across integration tests; each test binary uses a subset of helpers.

use std::path::PathBuf;
use tempfile::TempDir;

pub const FIXTURE: &str = include_str!("../fixtures/gitignore.example");

/// Copy the sample ignore file into a fresh temp dir so tests can save freely.
pub fn fixture_copy() -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join(".gitignore");
    std::fs::write(&path, FIXTURE).expect("write fixture");
    (dir, path)
}

pub fn read(path: &std::path::Path) -> String {
    std::fs::read_to_string(path).expect("read output")
}
