//! Environment file resolution and dotenv loading.
//!
//! Responsibilities:
//! - Build the ordered candidate list `[<base>/<canonical env>, <base>/.env]`.
//! - Load candidate files into an `EnvVars` table or into the process environment via `dotenvy`.
//! - Map dotenvy failures to `ConfigError` without exposing file contents.
//!
//! Does NOT handle:
//! - Deciding whether loading is enabled (see `ConfigLoader::dotenv_disabled`).
//! - Schema validation (see `clean`).
//!
//! Invariants:
//! - The candidate list never contains an empty entry; an unresolved environment is omitted.
//! - Existing keys are never overwritten, so earlier files take precedence over later ones.
//! - A missing file is skipped; any other read or parse failure is an error.
//! - A file is parsed completely before any key is applied, in both modes.

use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::expand::{expand_substitutions, mark_substitutions};
use crate::constants::{FALLBACK_ENV_FILE, LOADER_LOG_TARGET};
use crate::environment::Environment;
use crate::error::ConfigError;
use crate::vars::EnvVars;

const BOM: char = '\u{FEFF}';

/// Candidate environment files for `environment`, resolved against `base_dir`.
pub fn candidate_files(base_dir: &Path, environment: Option<Environment>) -> Vec<PathBuf> {
    [environment.map(|env| env.file_name()), Some(FALLBACK_ENV_FILE)]
        .into_iter()
        .flatten()
        .map(|name| base_dir.join(name))
        .collect()
}

/// SAFETY: Error messages never include raw .env line contents to prevent secret leakage.
fn map_dotenv_error(path: &Path, err: dotenvy::Error) -> ConfigError {
    match err {
        dotenvy::Error::LineParse(_, idx) => ConfigError::DotenvParse {
            path: path.to_path_buf(),
            error_index: idx,
        },
        dotenvy::Error::Io(io_err) => ConfigError::DotenvIo {
            path: path.to_path_buf(),
            kind: io_err.kind(),
        },
        _ => ConfigError::DotenvUnknown {
            path: path.to_path_buf(),
        },
    }
}

/// Read a dotenv file, or `None` if it does not exist. A leading BOM is dropped.
fn read_env_file(path: &Path) -> Result<Option<String>, ConfigError> {
    match fs::read_to_string(path) {
        Ok(mut contents) => {
            if contents.starts_with(BOM) {
                contents.drain(..BOM.len_utf8());
            }
            Ok(Some(contents))
        }
        Err(e) if e.kind() == ErrorKind::NotFound => {
            tracing::debug!(target: LOADER_LOG_TARGET, path = %path.display(), "env file not found, skipping");
            Ok(None)
        }
        Err(e) => Err(ConfigError::DotenvIo {
            path: path.to_path_buf(),
            kind: e.kind(),
        }),
    }
}

fn parse_entries(path: &Path, contents: &str) -> Result<Vec<(String, String)>, ConfigError> {
    dotenvy::from_read_iter(contents.as_bytes())
        .collect::<Result<Vec<(String, String)>, _>>()
        .map_err(|e| map_dotenv_error(path, e))
}

/// Load one dotenv file into `vars`.
///
/// `$VAR` and `${VAR}` resolve against `vars` first, then against keys defined
/// earlier in the same file; the process environment is never consulted. The
/// file is parsed completely before anything is merged, so a syntax error
/// leaves `vars` untouched. Returns `Ok(false)` if the file does not exist.
pub fn load_file_into(vars: &mut EnvVars, path: &Path) -> Result<bool, ConfigError> {
    let Some(contents) = read_env_file(path)? else {
        return Ok(false);
    };
    let entries = parse_entries(path, &mark_substitutions(&contents))?;

    let mut file_values: HashMap<String, String> = HashMap::new();
    let mut resolved = Vec::with_capacity(entries.len());
    for (key, raw) in entries {
        let value = expand_substitutions(&raw, |name| {
            vars.get(name)
                .or_else(|| file_values.get(name).map(String::as_str))
        });
        file_values.insert(key.clone(), value.clone());
        resolved.push((key, value));
    }

    let mut applied = 0usize;
    for (key, value) in resolved {
        if vars.insert_if_absent(key, value) {
            applied += 1;
        }
    }
    tracing::debug!(target: LOADER_LOG_TARGET, path = %path.display(), applied, "loaded env file");
    Ok(true)
}

/// Load one dotenv file into the process environment.
///
/// The file is parsed completely before `dotenvy` sets anything, so a syntax
/// error leaves the process untouched. Existing variables are never
/// overridden. Returns `Ok(false)` if the file does not exist.
pub fn load_file_into_process(path: &Path) -> Result<bool, ConfigError> {
    let Some(contents) = read_env_file(path)? else {
        return Ok(false);
    };
    parse_entries(path, &contents)?;
    dotenvy::from_read(contents.as_bytes()).map_err(|e| map_dotenv_error(path, e))?;

    tracing::debug!(target: LOADER_LOG_TARGET, path = %path.display(), "loaded env file into process");
    Ok(true)
}
