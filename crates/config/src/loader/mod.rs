//! Configuration loader for environment-specific dotenv files.
//!
//! Responsibilities:
//! - Resolve `[<base>/<canonical env>, <base>/.env]` from `NODE_ENV`.
//! - Load those files into an explicit `EnvVars` table or the process environment.
//! - Validate the merged environment against the caller's schema plus `NODE_ENV`.
//! - Enforce `DOTENV_DISABLED` gate to prevent accidental dotenv loading in tests.
//!
//! Does NOT handle:
//! - Field parsing rules (see `schema`).
//! - Installing a tracing subscriber (the application's job; see the CLI crate).
//!
//! Invariants / Assumptions:
//! - Variables already set take precedence over file contents.
//! - The environment-specific file takes precedence over `.env`.
//! - Missing files are skipped; unreadable or malformed files are errors.

mod builder;
mod expand;
mod files;
mod options;

#[cfg(test)]
mod tests;

pub use builder::{ConfigLoader, configure};
pub use files::candidate_files;
pub use options::{ConfigOptions, ShowEnvironmentFiles};
