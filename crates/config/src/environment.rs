//! Environment name normalization.
//!
//! Responsibilities:
//! - Map raw environment names (`PRODUCTION`, `dev`, `LOCAL`, ...) to a canonical `Environment`.
//! - Expose the accepted raw spellings so schemas can restrict `NODE_ENV` to them.
//! - Build the `NODE_ENV` field descriptor injected by the loader.
//!
//! Does NOT handle:
//! - Rejecting unknown names during loading (the validator does that via `choices`).
//! - Locating or reading dotenv files (see `loader`).
//!
//! Invariants:
//! - Every alias maps to exactly one canonical environment.
//! - Lookup is exact and case-sensitive; `Production` is not an alias.
//! - An absent or unrecognized name resolves to `None`, never to an error.

use std::fmt;
use std::str::FromStr;

use crate::constants::NODE_ENV_VAR;
use crate::error::ConfigError;
use crate::schema::{Field, str};
use crate::vars::EnvVars;

/// Canonical environment identifiers used to select dotenv files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Environment {
    Prod,
    Test,
    Dev,
    Local,
}

/// Accepted raw spellings, in declaration order.
const ENVIRONMENT_ALIASES: &[(&str, Environment)] = &[
    ("prod", Environment::Prod),
    ("production", Environment::Prod),
    ("PRODUCTION", Environment::Prod),
    ("PROD", Environment::Prod),
    ("test", Environment::Test),
    ("TEST", Environment::Test),
    ("dev", Environment::Dev),
    ("development", Environment::Dev),
    ("DEVELOPMENT", Environment::Dev),
    ("local", Environment::Local),
    ("LOCAL", Environment::Local),
];

impl Environment {
    /// All canonical environments.
    pub const ALL: [Environment; 4] = [
        Environment::Prod,
        Environment::Test,
        Environment::Dev,
        Environment::Local,
    ];

    /// Look up a raw environment name in the alias table.
    pub fn from_alias(raw: &str) -> Option<Self> {
        ENVIRONMENT_ALIASES
            .iter()
            .find(|(alias, _)| *alias == raw)
            .map(|(_, env)| *env)
    }

    /// Resolve the canonical environment from `NODE_ENV` in the given table.
    ///
    /// Blank, missing and unrecognized values all resolve to `None`.
    pub fn resolve(vars: &EnvVars) -> Option<Self> {
        vars.get_non_blank(NODE_ENV_VAR)
            .and_then(Self::from_alias)
    }

    /// Canonical name, e.g. `prod`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Prod => "prod",
            Environment::Test => "test",
            Environment::Dev => "dev",
            Environment::Local => "local",
        }
    }

    /// Name of the environment-specific dotenv file, relative to the base directory.
    pub fn file_name(&self) -> &'static str {
        self.as_str()
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Environment {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_alias(s).ok_or_else(|| ConfigError::UnknownEnvironment(s.to_string()))
    }
}

/// Every accepted raw environment name, in declaration order.
pub fn alias_names() -> Vec<&'static str> {
    ENVIRONMENT_ALIASES.iter().map(|(alias, _)| *alias).collect()
}

/// Field descriptor for `NODE_ENV`: a string restricted to `choices`.
///
/// With `None` the choices are the full alias set.
pub fn node_env(choices: Option<&[&str]>) -> Field {
    let choices: Vec<&str> = match choices {
        Some(choices) => choices.to_vec(),
        None => alias_names(),
    };
    str()
        .choices(choices)
        .desc("Deployment environment name")
}
