//! Configuration schemas.
//!
//! Responsibilities:
//! - Hold the mapping from variable name to field descriptor (`Schema`).
//! - Merge schemas explicitly, either rejecting collisions (`merge`) or letting one side win (`overlay`).
//! - Load schemas described as JSON documents (see `file`).
//!
//! Does NOT handle:
//! - Validating values against a schema (see `clean`).
//!
//! Invariants:
//! - Field names are unique; iteration order is sorted by name.

mod field;
mod file;
mod validators;

use std::collections::BTreeMap;

pub use field::{
    DevDefault, Field, FieldKind, FieldRejection, ValidatorFn, bool, email, host, json,
    make_validator, num, port, str, url,
};

use crate::error::ConfigError;

/// Mapping from variable name to field descriptor.
#[derive(Debug, Clone, Default)]
pub struct Schema {
    fields: BTreeMap<String, Field>,
}

impl Schema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a field, builder style.
    pub fn field(mut self, name: impl Into<String>, field: Field) -> Self {
        self.fields.insert(name.into(), field);
        self
    }

    /// Add or replace a field, returning the previous descriptor.
    pub fn insert(&mut self, name: impl Into<String>, field: Field) -> Option<Field> {
        self.fields.insert(name.into(), field)
    }

    pub fn get(&self, name: &str) -> Option<&Field> {
        self.fields.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Field)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// Union of two schemas. A name defined in both is an error.
    pub fn merge(mut self, other: Schema) -> Result<Schema, ConfigError> {
        for (name, field) in other.fields {
            if self.fields.contains_key(&name) {
                return Err(ConfigError::DuplicateField(name));
            }
            self.fields.insert(name, field);
        }
        Ok(self)
    }

    /// Union of two schemas where fields of `self` replace those of `base`.
    pub fn overlay(self, base: Schema) -> Schema {
        let mut fields = base.fields;
        fields.extend(self.fields);
        Schema { fields }
    }
}

impl<K: Into<String>> FromIterator<(K, Field)> for Schema {
    fn from_iter<I: IntoIterator<Item = (K, Field)>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().map(|(k, f)| (k.into(), f)).collect(),
        }
    }
}

impl IntoIterator for Schema {
    type Item = (String, Field);
    type IntoIter = std::collections::btree_map::IntoIter<String, Field>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.into_iter()
    }
}
