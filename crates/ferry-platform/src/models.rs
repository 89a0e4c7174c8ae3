//! Management API resource shapes.
//!
//! Only the fields Ferry reads are modelled; `fields` maps stay as raw JSON so
//! entries and assets round-trip through update calls without loss.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// System metadata present on every resource.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sys {
    pub id: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub version: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published_version: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Space {
    pub sys: Sys,
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvironmentInfo {
    pub sys: Sys,
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Locale {
    pub sys: Sys,
    #[serde(default)]
    pub name: String,
    /// Platform-native locale code (e.g., `en-US`).
    pub code: String,
    #[serde(default)]
    pub default: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentType {
    pub sys: Sys,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub display_field: Option<String>,
    #[serde(default)]
    pub fields: Vec<Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    pub sys: Sys,
    #[serde(default)]
    pub fields: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Asset {
    pub sys: Sys,
    #[serde(default)]
    pub fields: Map<String, Value>,
}

impl Asset {
    /// Locales that carry a `file` value.
    #[must_use]
    pub fn file_locales(&self) -> Vec<String> {
        self.fields
            .get("file")
            .and_then(Value::as_object)
            .map(|files| files.keys().cloned().collect())
            .unwrap_or_default()
    }

    /// Whether the file for `locale` has been processed into a served URL.
    #[must_use]
    pub fn is_processed(&self, locale: &str) -> bool {
        self.fields
            .get("file")
            .and_then(|files| files.get(locale))
            .and_then(|file| file.get("url"))
            .and_then(Value::as_str)
            .is_some_and(|url| !url.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parse_entry_response() {
        let entry: Entry = serde_json::from_value(json!({
            "sys": {"id": "e1", "type": "Entry", "version": 3, "publishedVersion": 2},
            "fields": {"title": {"en-US": "Hello"}}
        }))
        .unwrap();
        assert_eq!(entry.sys.id, "e1");
        assert_eq!(entry.sys.version, 3);
        assert_eq!(entry.sys.published_version, Some(2));
        assert_eq!(entry.fields["title"]["en-US"], "Hello");
    }

    #[test]
    fn asset_processing_state() {
        let mut asset: Asset = serde_json::from_value(json!({
            "sys": {"id": "a1", "type": "Asset", "version": 1},
            "fields": {
                "file": {
                    "en-US": {"fileName": "a1.png", "upload": "https://img.test/a.png"},
                    "de-DE": {"fileName": "a1.png", "url": "//cdn.test/a1.png"}
                }
            }
        }))
        .unwrap();

        let mut locales = asset.file_locales();
        locales.sort();
        assert_eq!(locales, vec!["de-DE", "en-US"]);
        assert!(asset.is_processed("de-DE"));
        assert!(!asset.is_processed("en-US"));

        asset.fields.remove("file");
        assert!(asset.file_locales().is_empty());
    }
}
