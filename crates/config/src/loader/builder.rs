//! Configuration loader builder implementation.
//!
//! Responsibilities:
//! - Provide a builder-pattern `ConfigLoader` carrying the base directory and reporting options.
//! - Resolve candidate environment files for the current `NODE_ENV`.
//! - Run the full `configure` pipeline: resolve, report, load, merge schema, clean.
//!
//! Does NOT handle:
//! - Dotenv parsing (delegated to `dotenvy` via files.rs).
//! - Field parsing rules (see `schema`).
//!
//! Invariants / Assumptions:
//! - The caller's schema overrides the injected `NODE_ENV` field.
//! - Files never override variables that are already set, including ones set by earlier calls.
//! - The `DOTENV_DISABLED` variable is checked before any file is read.

use std::path::PathBuf;

use super::files::{candidate_files, load_file_into, load_file_into_process};
use super::options::{ConfigOptions, ShowEnvironmentFiles};
use crate::clean::{CleanedEnv, clean};
use crate::constants::{DOTENV_DISABLED_VAR, LOADER_LOG_TARGET, NODE_ENV_VAR};
use crate::environment::{Environment, node_env};
use crate::error::ConfigError;
use crate::schema::Schema;
use crate::vars::EnvVars;

/// Loads environment-specific dotenv files and validates the result against a schema.
#[derive(Debug, Clone, Default)]
pub struct ConfigLoader {
    base_dir: Option<PathBuf>,
    show_environment_files: ShowEnvironmentFiles,
}

impl ConfigLoader {
    /// Create a new configuration loader.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_options(options: ConfigOptions) -> Self {
        Self {
            base_dir: options.base_dir,
            show_environment_files: options.show_environment_files,
        }
    }

    /// Resolve environment files against `base_dir` instead of the working directory.
    pub fn with_base_dir(mut self, base_dir: impl Into<PathBuf>) -> Self {
        self.base_dir = Some(base_dir.into());
        self
    }

    /// Report the resolved environment files when configuring.
    pub fn with_show_environment_files(mut self, show: impl Into<ShowEnvironmentFiles>) -> Self {
        self.show_environment_files = show.into();
        self
    }

    /// Check if dotenv loading is disabled in the given table.
    fn dotenv_disabled(vars: &EnvVars) -> bool {
        matches!(vars.get(DOTENV_DISABLED_VAR), Some("true") | Some("1"))
    }

    /// Absolute directory environment files are resolved against.
    pub fn base_dir(&self) -> Result<PathBuf, ConfigError> {
        match &self.base_dir {
            Some(dir) if dir.is_absolute() => Ok(dir.clone()),
            Some(dir) => Ok(std::env::current_dir()
                .map_err(ConfigError::CurrentDir)?
                .join(dir)),
            None => std::env::current_dir().map_err(ConfigError::CurrentDir),
        }
    }

    /// Ordered candidate files for `environment`; earlier files take precedence.
    pub fn candidate_files(
        &self,
        environment: Option<Environment>,
    ) -> Result<Vec<PathBuf>, ConfigError> {
        Ok(candidate_files(&self.base_dir()?, environment))
    }

    fn report_files(&self, environment: Option<Environment>, files: &[PathBuf]) {
        if !self.show_environment_files.is_enabled() {
            return;
        }
        let environment = environment.map(|env| env.as_str()).unwrap_or("none");
        match self.show_environment_files.label() {
            Some(label) => tracing::info!(
                target: LOADER_LOG_TARGET,
                label,
                environment,
                files = ?files,
                "environment files"
            ),
            None => tracing::info!(
                target: LOADER_LOG_TARGET,
                environment,
                files = ?files,
                "environment files"
            ),
        }
    }

    /// Candidate files for the `NODE_ENV` found in `vars`.
    ///
    /// Emits the environment-files diagnostic when reporting is enabled.
    pub fn environment_files(&self, vars: &EnvVars) -> Result<Vec<PathBuf>, ConfigError> {
        let environment = Environment::resolve(vars);
        let files = self.candidate_files(environment)?;
        self.report_files(environment, &files);
        Ok(files)
    }

    /// Resolve the environment from `vars` and load its candidate files into `vars`.
    ///
    /// Missing files are silently skipped. Returns the files that were read.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - A file exists but has invalid syntax (`ConfigError::DotenvParse`)
    /// - A file exists but cannot be read (`ConfigError::DotenvIo`)
    pub fn load_dotenv(&self, vars: &mut EnvVars) -> Result<Vec<PathBuf>, ConfigError> {
        let files = self.environment_files(vars)?;

        if Self::dotenv_disabled(vars) {
            tracing::debug!(target: LOADER_LOG_TARGET, "dotenv loading disabled");
            return Ok(Vec::new());
        }

        let mut loaded = Vec::new();
        for file in files {
            if load_file_into(vars, &file)? {
                loaded.push(file);
            }
        }
        Ok(loaded)
    }

    /// Like [`load_dotenv`](Self::load_dotenv), but reads and writes the process environment.
    pub fn load_dotenv_into_process(&self) -> Result<Vec<PathBuf>, ConfigError> {
        let snapshot = EnvVars::from_process();
        let files = self.environment_files(&snapshot)?;

        if Self::dotenv_disabled(&snapshot) {
            tracing::debug!(target: LOADER_LOG_TARGET, "dotenv loading disabled");
            return Ok(Vec::new());
        }

        let mut loaded = Vec::new();
        for file in files {
            if load_file_into_process(&file)? {
                loaded.push(file);
            }
        }
        Ok(loaded)
    }

    /// Load environment files into `vars` and validate it against `schema`.
    ///
    /// `NODE_ENV` is always validated against the full alias set unless `schema`
    /// defines its own `NODE_ENV` field.
    pub fn configure_with(
        &self,
        vars: &mut EnvVars,
        schema: Schema,
    ) -> Result<CleanedEnv, ConfigError> {
        self.load_dotenv(vars)?;
        validate(vars, schema)
    }

    /// Load environment files into the process environment and validate it against `schema`.
    ///
    /// Variables already present in the process are never overwritten, so a
    /// second call observes values set by the first.
    pub fn configure(&self, schema: Schema) -> Result<CleanedEnv, ConfigError> {
        self.load_dotenv_into_process()?;
        validate(&EnvVars::from_process(), schema)
    }
}

fn validate(vars: &EnvVars, schema: Schema) -> Result<CleanedEnv, ConfigError> {
    let environment = Environment::resolve(vars);
    tracing::debug!(
        target: LOADER_LOG_TARGET,
        environment = environment.map(|env| env.as_str()),
        "resolved environment"
    );
    let schema = schema.overlay(Schema::new().field(NODE_ENV_VAR, node_env(None)));
    clean(vars, &schema, environment)
}

/// Load environment files into the process environment and validate it against `schema`.
///
/// Equivalent to `ConfigLoader::from_options(options).configure(schema)`.
pub fn configure(schema: Schema, options: ConfigOptions) -> Result<CleanedEnv, ConfigError> {
    ConfigLoader::from_options(options).configure(schema)
}
