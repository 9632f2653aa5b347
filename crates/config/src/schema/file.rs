//! JSON schema documents.
//!
//! A schema file is a JSON object mapping each variable name to a field spec:
//!
//! ```json
//! {
//!   "PORT": { "type": "port", "devDefault": 3000, "desc": "HTTP listen port" },
//!   "LOG_FORMAT": { "type": "str", "choices": ["json", "text"], "default": "text" },
//!   "SENTRY_DSN": { "type": "url", "optional": true }
//! }
//! ```
//!
//! Custom validators cannot be expressed in a file; only the built-in kinds are accepted.

use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::Path;

use super::{Field, FieldKind, Schema};
use crate::error::ConfigError;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "lowercase")]
enum KindSpec {
    Str,
    Bool,
    Num,
    Port,
    Url,
    Email,
    Host,
    Json,
}

impl From<KindSpec> for FieldKind {
    fn from(kind: KindSpec) -> Self {
        match kind {
            KindSpec::Str => FieldKind::Str,
            KindSpec::Bool => FieldKind::Bool,
            KindSpec::Num => FieldKind::Num,
            KindSpec::Port => FieldKind::Port,
            KindSpec::Url => FieldKind::Url,
            KindSpec::Email => FieldKind::Email,
            KindSpec::Host => FieldKind::Host,
            KindSpec::Json => FieldKind::Json,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct FieldSpec {
    #[serde(rename = "type")]
    kind: KindSpec,
    #[serde(default)]
    choices: Option<Vec<Value>>,
    #[serde(default)]
    default: Option<Value>,
    #[serde(default)]
    dev_default: Option<Value>,
    #[serde(default)]
    test_only: Option<Value>,
    #[serde(default)]
    optional: bool,
    #[serde(default)]
    desc: Option<String>,
    #[serde(default)]
    example: Option<String>,
    #[serde(default)]
    docs: Option<String>,
}

impl FieldSpec {
    fn into_field(self) -> Field {
        let mut field = Field::new(self.kind.into());
        if let Some(choices) = self.choices {
            field = field.choices(choices);
        }
        if let Some(default) = self.default {
            field = field.default(default);
        }
        if let Some(dev_default) = self.dev_default {
            field = field.dev_default(dev_default);
        }
        if let Some(test_only) = self.test_only {
            field = field.test_only(test_only);
        }
        if self.optional {
            field = field.optional();
        }
        if let Some(desc) = self.desc {
            field = field.desc(desc);
        }
        if let Some(example) = self.example {
            field = field.example(example);
        }
        if let Some(docs) = self.docs {
            field = field.docs(docs);
        }
        field
    }
}

impl Schema {
    /// Parse a schema from a JSON document.
    ///
    /// `origin` is only used to label errors.
    pub fn from_json_str(json: &str, origin: &Path) -> Result<Schema, ConfigError> {
        let specs: BTreeMap<String, FieldSpec> =
            serde_json::from_str(json).map_err(|e| ConfigError::SchemaFile {
                path: origin.to_path_buf(),
                message: e.to_string(),
            })?;

        Ok(specs
            .into_iter()
            .map(|(name, spec)| (name, spec.into_field()))
            .collect())
    }

    /// Read and parse a JSON schema file.
    pub fn from_json_file(path: &Path) -> Result<Schema, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::SchemaFile {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Self::from_json_str(&contents, path)
    }
}
