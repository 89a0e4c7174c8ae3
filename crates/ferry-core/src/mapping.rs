//! Hand-authored field mapping configuration.
//!
//! A mapping names, for every target field, the external key it is copied from
//! and a type tag. The `asset_labels` sub-mapping marks which target fields
//! describe the record's asset rather than ordinary entry content.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

/// Type tag that switches a field to rich-text document encoding.
pub const RICH_TEXT: &str = "RichText";

/// Source of a single target field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldMapping {
    /// Key (or dotted path) looked up in each raw external record.
    #[serde(alias = "externalKey")]
    pub external_key: String,

    /// Platform field type tag (e.g., `Symbol`, `Text`, `RichText`).
    #[serde(rename = "type", default = "default_field_type")]
    pub field_type: String,
}

fn default_field_type() -> String {
    "Symbol".to_string()
}

impl FieldMapping {
    #[must_use]
    pub fn new(external_key: impl Into<String>, field_type: impl Into<String>) -> Self {
        Self {
            external_key: external_key.into(),
            field_type: field_type.into(),
        }
    }
}

/// Target fields that carry the asset's title, source URL, and MIME type.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetLabels {
    /// Field holding the asset's display title.
    #[serde(default)]
    pub title: String,

    /// Field holding the binary source URL. The asset link is written here.
    #[serde(default)]
    pub upload: String,

    /// Field holding the asset's MIME type.
    #[serde(default, alias = "contentType")]
    pub content_type: String,
}

impl AssetLabels {
    /// Whether `field` is one of the three asset label targets.
    #[must_use]
    pub fn contains(&self, field: &str) -> bool {
        !field.is_empty() && (field == self.title || field == self.upload || field == self.content_type)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MappingConfig {
    /// Target field identifier → external source.
    #[serde(default)]
    pub fields: BTreeMap<String, FieldMapping>,

    #[serde(
        default,
        alias = "assetLabels",
        alias = "assets_keys_to_match",
        alias = "assetsKeysToMatch"
    )]
    pub asset_labels: AssetLabels,
}

impl MappingConfig {
    /// Check if the mapping has at least one field and an upload label.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        !self.fields.is_empty() && !self.asset_labels.upload.is_empty()
    }

    /// Whether `field` describes the asset rather than entry content.
    #[must_use]
    pub fn is_asset_field(&self, field: &str) -> bool {
        self.asset_labels.contains(field)
    }

    /// Iterate over target fields written verbatim into the entry payload.
    pub fn entry_fields(&self) -> impl Iterator<Item = (&String, &FieldMapping)> {
        self.fields
            .iter()
            .filter(|(target, _)| !self.is_asset_field(target))
    }

    /// Reject mappings the builder cannot act on.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidMapping`] when there are no fields, a field
    /// has an empty external key, or the upload label does not name a mapped
    /// field.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.fields.is_empty() {
            return Err(CoreError::InvalidMapping("no fields are mapped".into()));
        }
        if let Some((target, _)) = self
            .fields
            .iter()
            .find(|(_, mapping)| mapping.external_key.is_empty())
        {
            return Err(CoreError::InvalidMapping(format!(
                "field '{target}' has an empty external key"
            )));
        }
        let upload = &self.asset_labels.upload;
        if upload.is_empty() {
            return Err(CoreError::InvalidMapping(
                "asset_labels.upload is not set".into(),
            ));
        }
        if !self.fields.contains_key(upload) {
            return Err(CoreError::InvalidMapping(format!(
                "asset_labels.upload names '{upload}', which is not a mapped field"
            )));
        }
        Ok(())
    }
}
