//! Error types for loading and validating configuration.
//!
//! Responsibilities:
//! - Define `ConfigError` for every failure `configure` can surface.
//! - Define `EnvError`, the per-key validation failure schema authors match on.
//! - Aggregate per-key failures into `ValidationErrors`.
//!
//! Invariants:
//! - Dotenv errors NEVER include raw .env line contents to prevent secret leakage.
//! - `ValidationErrors` preserves schema order.

use std::fmt;
use std::io::ErrorKind;
use std::path::PathBuf;
use thiserror::Error;

/// A single key that failed validation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EnvError {
    #[error("Missing required environment variable: {key}{}", desc_suffix(.desc))]
    Missing { key: String, desc: Option<String> },

    #[error("Invalid value for {key}: {message}")]
    Invalid { key: String, message: String },

    /// The rejected value is kept for callers but never rendered, since it may be a secret.
    #[error("Value for {key} not in choices [{}]", .choices.join(", "))]
    NotInChoices {
        key: String,
        value: String,
        choices: Vec<String>,
    },
}

fn desc_suffix(desc: &Option<String>) -> String {
    desc.as_deref()
        .map(|d| format!(" ({d})"))
        .unwrap_or_default()
}

impl EnvError {
    /// Name of the variable that failed.
    pub fn key(&self) -> &str {
        match self {
            EnvError::Missing { key, .. }
            | EnvError::Invalid { key, .. }
            | EnvError::NotInChoices { key, .. } => key,
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, EnvError::Missing { .. })
    }
}

/// Every key that failed validation in one `configure` call, in schema order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidationErrors {
    errors: Vec<EnvError>,
}

impl ValidationErrors {
    pub(crate) fn push(&mut self, error: EnvError) {
        self.errors.push(error);
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn errors(&self) -> &[EnvError] {
        &self.errors
    }

    /// Failure recorded for `key`, if any.
    pub fn get(&self, key: &str) -> Option<&EnvError> {
        self.errors.iter().find(|e| e.key() == key)
    }

    /// Keys with no value anywhere in the environment.
    pub fn missing_keys(&self) -> Vec<&str> {
        self.errors
            .iter()
            .filter(|e| e.is_missing())
            .map(EnvError::key)
            .collect()
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} environment variable(s) failed validation", self.errors.len())?;
        for error in &self.errors {
            write!(f, "\n  - {error}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

impl IntoIterator for ValidationErrors {
    type Item = EnvError;
    type IntoIter = std::vec::IntoIter<EnvError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.into_iter()
    }
}

/// Errors that can occur while loading or validating configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("{0}")]
    Validation(ValidationErrors),

    /// Failed to parse a dotenv file due to invalid syntax.
    ///
    /// SAFETY: This error only includes the byte index of the parse failure,
    /// NOT the offending line content, to prevent leaking secrets.
    #[error(
        "Failed to parse env file {} at position {error_index}. Hint: set DOTENV_DISABLED=1 to skip .env loading",
        .path.display()
    )]
    DotenvParse { path: PathBuf, error_index: usize },

    /// Failed to read a dotenv file for a reason other than it not existing.
    #[error("Failed to read env file {}: {kind}", .path.display())]
    DotenvIo { path: PathBuf, kind: ErrorKind },

    /// Unknown dotenv error (future variants from dotenvy crate).
    ///
    /// SAFETY: This error does not include any raw dotenv content.
    #[error(
        "Failed to load env file {}. Hint: set DOTENV_DISABLED=1 to skip .env loading",
        .path.display()
    )]
    DotenvUnknown { path: PathBuf },

    #[error("Field '{0}' is defined in both schemas")]
    DuplicateField(String),

    #[error("Unknown environment name '{0}'")]
    UnknownEnvironment(String),

    #[error("Unable to determine current directory: {0}")]
    CurrentDir(#[source] std::io::Error),

    #[error("Invalid schema file at {}: {message}", .path.display())]
    SchemaFile { path: PathBuf, message: String },
}

impl From<ValidationErrors> for ConfigError {
    fn from(errors: ValidationErrors) -> Self {
        ConfigError::Validation(errors)
    }
}

impl ConfigError {
    /// Validation failures, if this is a validation error.
    pub fn validation_errors(&self) -> Option<&ValidationErrors> {
        match self {
            ConfigError::Validation(errors) => Some(errors),
            _ => None,
        }
    }
}
