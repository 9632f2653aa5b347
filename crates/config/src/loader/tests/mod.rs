//! Tests for the configuration loader.
//!
//! Responsibilities:
//! - Test candidate file resolution against explicit and default base directories.
//! - Test dotenv loading, the `DOTENV_DISABLED` gate, and error reporting.
//! - Test the full `configure` pipeline against explicit tables and the process environment.
//!
//! Invariants:
//! - Tests that touch the process environment or cwd use `serial_test` and `env_lock()`.
//! - Temporary directories are cleaned up automatically via `tempfile`.

use std::fs;
use std::path::Path;
use std::sync::Mutex;


/// Returns the global test lock for environment variable isolation.
pub fn env_lock() -> &'static Mutex<()> {
    crate::test_util::global_test_lock()
}

/// Write `contents` to `dir/name`.
pub fn write_env_file(dir: &Path, name: &str, contents: &str) {
    fs::write(dir.join(name), contents).expect("Failed to write env file");
}
