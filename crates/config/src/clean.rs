//! Validation of an environment table against a schema.
//!
//! Responsibilities:
//! - Resolve each schema field to a value: the raw variable, a dev/test default, or a default.
//! - Collect every failing key before returning, so one run reports all problems.
//! - Produce `CleanedEnv`, the typed result handed to the caller.
//!
//! Does NOT handle:
//! - Loading dotenv files (see `loader`).
//!
//! Invariants:
//! - Either every field validates and a `CleanedEnv` is returned, or nothing is.
//! - Dev defaults never apply in production or when the environment is unresolved.
//! - Only schema keys appear in the cleaned environment.

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::collections::BTreeMap;

use crate::environment::Environment;
use crate::error::{ConfigError, EnvError, ValidationErrors};
use crate::schema::{DevDefault, Field, FieldRejection, Schema};
use crate::vars::EnvVars;

/// Validated configuration returned by `configure`.
#[derive(Debug, Clone, PartialEq)]
pub struct CleanedEnv {
    values: BTreeMap<String, Value>,
    environment: Option<Environment>,
}

impl CleanedEnv {
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    pub fn str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_str)
    }

    pub fn bool(&self, key: &str) -> Option<bool> {
        self.get(key).and_then(Value::as_bool)
    }

    pub fn i64(&self, key: &str) -> Option<i64> {
        self.get(key).and_then(Value::as_i64)
    }

    pub fn u64(&self, key: &str) -> Option<u64> {
        self.get(key).and_then(Value::as_u64)
    }

    pub fn f64(&self, key: &str) -> Option<f64> {
        self.get(key).and_then(Value::as_f64)
    }

    pub fn u16(&self, key: &str) -> Option<u16> {
        self.u64(key).and_then(|v| u16::try_from(v).ok())
    }

    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Canonical environment resolved from `NODE_ENV`, if any.
    pub fn environment(&self) -> Option<Environment> {
        self.environment
    }

    pub fn is_production(&self) -> bool {
        self.environment == Some(Environment::Prod)
    }

    pub fn is_test(&self) -> bool {
        self.environment == Some(Environment::Test)
    }

    /// True for the `dev` and `local` environments.
    pub fn is_dev(&self) -> bool {
        matches!(self.environment, Some(Environment::Dev | Environment::Local))
    }

    /// Cleaned values as a JSON object.
    pub fn to_json(&self) -> Value {
        Value::Object(
            self.values
                .iter()
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect::<Map<String, Value>>(),
        )
    }

    /// Deserialize the cleaned values into a typed configuration struct.
    pub fn deserialize<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_value(self.to_json())
    }

    pub fn into_values(self) -> BTreeMap<String, Value> {
        self.values
    }
}

/// Where a field's value comes from when the variable is unset.
enum Fallback<'a> {
    Value(&'a Value),
    Omit,
    Missing,
}

fn fallback_for<'a>(field: &'a Field, environment: Option<Environment>) -> Fallback<'a> {
    let non_production = matches!(environment, Some(env) if env != Environment::Prod);
    if non_production {
        match field.dev_default_value() {
            Some(DevDefault::Value(value)) => return Fallback::Value(value),
            Some(DevDefault::TestOnly(value)) if environment == Some(Environment::Test) => {
                return Fallback::Value(value);
            }
            Some(DevDefault::TestOnly(_)) => return Fallback::Missing,
            None => {}
        }
    }
    match field.default_value() {
        Some(value) => Fallback::Value(value),
        None if field.is_optional() => Fallback::Omit,
        None => Fallback::Missing,
    }
}

fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Validate `vars` against `schema`.
///
/// `environment` selects whether dev and test-only defaults apply.
pub fn clean(
    vars: &EnvVars,
    schema: &Schema,
    environment: Option<Environment>,
) -> Result<CleanedEnv, ConfigError> {
    let mut values = BTreeMap::new();
    let mut errors = ValidationErrors::default();

    for (key, field) in schema.iter() {
        let Some(raw) = vars.get_non_blank(key) else {
            match fallback_for(field, environment) {
                Fallback::Value(value) => {
                    values.insert(key.to_string(), value.clone());
                }
                Fallback::Omit => {}
                Fallback::Missing => errors.push(EnvError::Missing {
                    key: key.to_string(),
                    desc: field.description().map(str::to_string),
                }),
            }
            continue;
        };

        match field.validate(raw) {
            Ok(value) => {
                values.insert(key.to_string(), value);
            }
            Err(FieldRejection::Invalid(message)) => errors.push(EnvError::Invalid {
                key: key.to_string(),
                message,
            }),
            Err(FieldRejection::NotInChoices { value, choices }) => {
                errors.push(EnvError::NotInChoices {
                    key: key.to_string(),
                    value: display_value(&value),
                    choices: choices.iter().map(display_value).collect(),
                })
            }
        }
    }

    if !errors.is_empty() {
        tracing::debug!(failed = errors.len(), "environment validation failed");
        return Err(ConfigError::Validation(errors));
    }

    Ok(CleanedEnv {
        values,
        environment,
    })
}
