//! Normalized records: raw external data keyed by target field identifiers.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A single mapped value together with its declared type tag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MappedField {
    /// Value copied from the raw record; `Null` when the key was absent.
    pub value: Value,
    #[serde(rename = "type")]
    pub field_type: String,
}

/// One raw external record after field mapping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedRecord {
    /// Position of the originating raw record in the source data.
    pub source_index: usize,
    pub fields: BTreeMap<String, MappedField>,
}

impl NormalizedRecord {
    #[must_use]
    pub const fn new(source_index: usize) -> Self {
        Self {
            source_index,
            fields: BTreeMap::new(),
        }
    }

    pub fn insert(&mut self, target: impl Into<String>, value: Value, field_type: impl Into<String>) {
        self.fields.insert(
            target.into(),
            MappedField {
                value,
                field_type: field_type.into(),
            },
        );
    }

    #[must_use]
    pub fn get(&self, target: &str) -> Option<&MappedField> {
        self.fields.get(target)
    }

    /// Non-empty string value of `target`, if any.
    #[must_use]
    pub fn str_value(&self, target: &str) -> Option<&str> {
        self.get(target)
            .and_then(|field| field.value.as_str())
            .filter(|s| !s.is_empty())
    }
}

/// Render a mapped value as the string written into a localized entry field.
///
/// Strings pass through verbatim, scalars use their display form, absent
/// values become empty, and composite values are encoded as compact JSON.
#[must_use]
pub fn stringify(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        composite => composite.to_string(),
    }
}
