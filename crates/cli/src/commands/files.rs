//! `files` command: list candidate environment files in precedence order.

use anyhow::{Context, Result};
use envstage_config::{ConfigLoader, EnvVars, Environment};
use std::fmt::Write as _;
use std::path::PathBuf;

/// Render the environment line and one line per candidate file.
fn render(environment: Option<Environment>, files: &[PathBuf]) -> String {
    let mut out = String::new();
    let name = environment.map(|env| env.as_str()).unwrap_or("none");
    let _ = writeln!(out, "environment: {}", name);
    for file in files {
        let status = if file.is_file() { "found" } else { "missing" };
        let _ = writeln!(out, "{}\t{}", file.display(), status);
    }
    out
}

pub fn run(loader: &ConfigLoader) -> Result<()> {
    let vars = EnvVars::from_process();
    let environment = Environment::resolve(&vars);
    let files = loader
        .environment_files(&vars)
        .context("Failed to resolve environment files")?;
    print!("{}", render(environment, &files));
    Ok(())
}
