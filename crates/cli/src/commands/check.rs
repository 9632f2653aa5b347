//! `check` command: load environment files and validate against a JSON schema.
//!
//! Responsibilities:
//! - Read the schema file and run the loader against a snapshot of the process environment.
//! - Print the cleaned values as `KEY=value` lines or a JSON object.
//!
//! Does NOT handle:
//! - Mutating the process environment; the snapshot is validated in place.

use anyhow::{Context, Result};
use envstage_config::{CleanedEnv, ConfigLoader, EnvVars, Schema};
use serde_json::Value;
use std::fmt::Write as _;
use std::path::Path;

use crate::args::OutputFormat;

fn format_text(env: &CleanedEnv) -> String {
    let mut out = String::new();
    for (key, value) in env.iter() {
        match value {
            Value::String(s) => {
                let _ = writeln!(out, "{}={}", key, s);
            }
            other => {
                let _ = writeln!(out, "{}={}", key, other);
            }
        }
    }
    out
}

fn format_json(env: &CleanedEnv) -> Result<String> {
    serde_json::to_string_pretty(&env.to_json()).context("Failed to serialize cleaned values")
}

pub fn run(loader: &ConfigLoader, schema_path: &Path, output: OutputFormat) -> Result<()> {
    let schema = Schema::from_json_file(schema_path)?;
    let mut vars = EnvVars::from_process();
    let env = loader.configure_with(&mut vars, schema)?;

    match output {
        OutputFormat::Text => print!("{}", format_text(&env)),
        OutputFormat::Json => println!("{}", format_json(&env)?),
    }
    Ok(())
}
