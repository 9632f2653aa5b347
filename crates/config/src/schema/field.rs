//! Field descriptors.
//!
//! Responsibilities:
//! - Describe how one variable is parsed (`FieldKind`) and constrained (`choices`).
//! - Carry defaults: a plain `default`, a development-only default, or a test-only default.
//! - Carry documentation metadata (`desc`, `example`, `docs`) used in error messages and the CLI.
//!
//! Does NOT handle:
//! - Reading variables or aggregating errors (see `clean`).
//!
//! Invariants:
//! - Defaults are not run through the parser or the choices check.
//! - A field is required unless it has a default or was marked `optional()`.

use serde_json::Value;
use std::fmt;
use std::sync::Arc;

use super::validators;

/// Closure type accepted by [`make_validator`].
pub type ValidatorFn = dyn Fn(&str) -> Result<Value, String> + Send + Sync;

/// How a raw value is parsed.
#[derive(Clone)]
pub enum FieldKind {
    Str,
    Bool,
    Num,
    Port,
    Url,
    Email,
    Host,
    Json,
    Custom(Arc<ValidatorFn>),
}

impl FieldKind {
    /// Short name of the kind, as used in schema files.
    pub fn name(&self) -> &'static str {
        match self {
            FieldKind::Str => "str",
            FieldKind::Bool => "bool",
            FieldKind::Num => "num",
            FieldKind::Port => "port",
            FieldKind::Url => "url",
            FieldKind::Email => "email",
            FieldKind::Host => "host",
            FieldKind::Json => "json",
            FieldKind::Custom(_) => "custom",
        }
    }

    fn parse(&self, raw: &str) -> Result<Value, String> {
        match self {
            FieldKind::Str => validators::parse_str(raw),
            FieldKind::Bool => validators::parse_bool(raw),
            FieldKind::Num => validators::parse_num(raw),
            FieldKind::Port => validators::parse_port(raw),
            FieldKind::Url => validators::parse_url(raw),
            FieldKind::Email => validators::parse_email(raw),
            FieldKind::Host => validators::parse_host(raw),
            FieldKind::Json => validators::parse_json(raw),
            FieldKind::Custom(f) => f(raw),
        }
    }
}

impl fmt::Debug for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Default that only applies outside production.
#[derive(Debug, Clone, PartialEq)]
pub enum DevDefault {
    /// Used in every non-production environment.
    Value(Value),
    /// Used only in the test environment; other non-production environments treat the key as missing.
    TestOnly(Value),
}

/// Why a raw value was rejected by [`Field::validate`].
#[derive(Debug, Clone, PartialEq)]
pub enum FieldRejection {
    Invalid(String),
    NotInChoices { value: Value, choices: Vec<Value> },
}

/// Descriptor for a single configuration variable.
#[derive(Debug, Clone)]
pub struct Field {
    kind: FieldKind,
    choices: Option<Vec<Value>>,
    default: Option<Value>,
    dev_default: Option<DevDefault>,
    optional: bool,
    desc: Option<String>,
    example: Option<String>,
    docs: Option<String>,
}

impl Field {
    pub fn new(kind: FieldKind) -> Self {
        Self {
            kind,
            choices: None,
            default: None,
            dev_default: None,
            optional: false,
            desc: None,
            example: None,
            docs: None,
        }
    }

    /// Restrict parsed values to `choices`.
    pub fn choices<I, V>(mut self, choices: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.choices = Some(choices.into_iter().map(Into::into).collect());
        self
    }

    /// Value used when the variable is unset.
    pub fn default(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self
    }

    /// Value used when the variable is unset and the environment is not production.
    pub fn dev_default(mut self, value: impl Into<Value>) -> Self {
        self.dev_default = Some(DevDefault::Value(value.into()));
        self
    }

    /// Value used when the variable is unset and the environment is `test`.
    pub fn test_only(mut self, value: impl Into<Value>) -> Self {
        self.dev_default = Some(DevDefault::TestOnly(value.into()));
        self
    }

    /// Leave the key out of the cleaned environment instead of failing when unset.
    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    pub fn desc(mut self, desc: impl Into<String>) -> Self {
        self.desc = Some(desc.into());
        self
    }

    pub fn example(mut self, example: impl Into<String>) -> Self {
        self.example = Some(example.into());
        self
    }

    pub fn docs(mut self, docs: impl Into<String>) -> Self {
        self.docs = Some(docs.into());
        self
    }

    /// Parse `raw` and check it against `choices`.
    pub fn validate(&self, raw: &str) -> Result<Value, FieldRejection> {
        let value = self.kind.parse(raw).map_err(FieldRejection::Invalid)?;
        if let Some(choices) = &self.choices {
            if !choices.contains(&value) {
                return Err(FieldRejection::NotInChoices {
                    value,
                    choices: choices.clone(),
                });
            }
        }
        Ok(value)
    }

    pub fn kind(&self) -> &FieldKind {
        &self.kind
    }

    pub fn choice_values(&self) -> Option<&[Value]> {
        self.choices.as_deref()
    }

    pub fn default_value(&self) -> Option<&Value> {
        self.default.as_ref()
    }

    pub fn dev_default_value(&self) -> Option<&DevDefault> {
        self.dev_default.as_ref()
    }

    /// Whether an unset variable is an error in production.
    pub fn is_required(&self) -> bool {
        self.default.is_none() && !self.optional
    }

    pub fn is_optional(&self) -> bool {
        self.optional
    }

    pub fn description(&self) -> Option<&str> {
        self.desc.as_deref()
    }

    pub fn example_value(&self) -> Option<&str> {
        self.example.as_deref()
    }

    pub fn docs_url(&self) -> Option<&str> {
        self.docs.as_deref()
    }
}

/// Any string.
pub fn str() -> Field {
    Field::new(FieldKind::Str)
}

/// `true`/`t`/`yes`/`on`/`1` or `false`/`f`/`no`/`off`/`0`.
pub fn bool() -> Field {
    Field::new(FieldKind::Bool)
}

/// A finite number; integral values are stored as integers.
pub fn num() -> Field {
    Field::new(FieldKind::Num)
}

/// A TCP/UDP port between 1 and 65535.
pub fn port() -> Field {
    Field::new(FieldKind::Port)
}

/// An absolute URL.
pub fn url() -> Field {
    Field::new(FieldKind::Url)
}

pub fn email() -> Field {
    Field::new(FieldKind::Email)
}

/// A host name or an IP address.
pub fn host() -> Field {
    Field::new(FieldKind::Host)
}

/// Any JSON document; the cleaned value is the parsed document.
pub fn json() -> Field {
    Field::new(FieldKind::Json)
}

/// A field parsed by a caller-supplied closure.
///
/// ```
/// use envstage_config::make_validator;
///
/// let even = make_validator(|raw| {
///     let n: i64 = raw.parse().map_err(|_| "must be an integer".to_string())?;
///     if n % 2 == 0 { Ok(n.into()) } else { Err("must be even".to_string()) }
/// });
/// assert!(even.validate("4").is_ok());
/// assert!(even.validate("3").is_err());
/// ```
pub fn make_validator<F>(parse: F) -> Field
where
    F: Fn(&str) -> Result<Value, String> + Send + Sync + 'static,
{
    Field::new(FieldKind::Custom(Arc::new(parse)))
}
