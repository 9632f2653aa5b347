//! Centralized constants for the envstage workspace.
//!
//! Variable names and file names shared by the loader, the validator and the CLI.

/// Variable holding the raw (free-form) environment name.
pub const NODE_ENV_VAR: &str = "NODE_ENV";

/// Variable that turns off dotenv file loading when set to `1` or `true`.
pub const DOTENV_DISABLED_VAR: &str = "DOTENV_DISABLED";

/// Fallback dotenv file read after the environment-specific one.
pub const FALLBACK_ENV_FILE: &str = ".env";

/// Tracing target used for loader diagnostics.
pub const LOADER_LOG_TARGET: &str = "envstage_config::loader";
