//! Shared test utilities for envstage integration tests.
//!
//! Responsibilities:
//! - Provide a hermetic CLI command factory.
//! - Build temp directories holding env files and a schema.
//!
//! Invariants / Assumptions:
//! - The child starts with an empty environment; tests set every variable they rely on.
//! - Tests point `--base-dir` at a temp directory instead of relying on the working directory.

use assert_cmd::Command;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Returns a hermetic `envstage` command for integration testing.
pub fn envstage_cmd() -> Command {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("envstage");

    // Clear potential host leakage; `check` validates the whole process environment
    cmd.env_clear();

    cmd
}

/// Temp directory pre-populated with `files`.
pub fn env_dir(files: &[(&str, &str)]) -> TempDir {
    let dir = TempDir::new().expect("Failed to create temp dir");
    for (name, contents) in files {
        fs::write(dir.path().join(name), contents).expect("Failed to write fixture");
    }
    dir
}

/// Path of a file inside `dir`.
#[allow(dead_code)]
pub fn fixture(dir: &TempDir, name: &str) -> PathBuf {
    dir.path().join(name)
}
