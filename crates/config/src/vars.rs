//! Explicit environment variable table.
//!
//! Responsibilities:
//! - Hold the variables that loading and validation operate on as an owned value.
//! - Snapshot the process environment when the caller wants process-global behavior.
//! - Provide the blank-filtering read used by the validator.
//!
//! Does NOT handle:
//! - Writing back into the process environment (see `ConfigLoader::configure`).
//! - Parsing dotenv files (delegated to `dotenvy`).
//!
//! Invariants:
//! - `insert_if_absent` never overwrites an existing key.
//! - Empty or whitespace-only values are treated as unset by `get_non_blank`.

use std::collections::BTreeMap;

/// Environment variable table passed explicitly to the loader and validator.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvVars {
    vars: BTreeMap<String, String>,
}

impl EnvVars {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot the current process environment.
    ///
    /// Variables whose name or value is not valid Unicode are skipped.
    pub fn from_process() -> Self {
        let vars = std::env::vars_os()
            .filter_map(|(key, value)| Some((key.into_string().ok()?, value.into_string().ok()?)))
            .collect();
        Self { vars }
    }

    /// Build a table from key/value pairs. Later duplicates replace earlier ones.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let vars = pairs
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Self { vars }
    }

    /// Raw value for `key`, including blank values.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.vars.get(key).map(String::as_str)
    }

    /// Value for `key`, or `None` if unset, empty, or whitespace-only.
    ///
    /// A non-blank value is returned exactly as stored, surrounding whitespace included.
    pub fn get_non_blank(&self, key: &str) -> Option<&str> {
        self.get(key).filter(|v| !v.trim().is_empty())
    }

    pub fn contains(&self, key: &str) -> bool {
        self.vars.contains_key(key)
    }

    /// Set `key`, replacing any previous value.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.vars.insert(key.into(), value.into());
    }

    /// Set `key` only if it is not already present. Returns whether the value was inserted.
    pub fn insert_if_absent(&mut self, key: impl Into<String>, value: impl Into<String>) -> bool {
        let key = key.into();
        if self.vars.contains_key(&key) {
            return false;
        }
        self.vars.insert(key, value.into());
        true
    }

    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.vars.remove(key)
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.vars.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for EnvVars {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self::from_pairs(iter)
    }
}
