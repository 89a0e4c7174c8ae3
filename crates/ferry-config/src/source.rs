//! External data source selection.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

fn default_config_dir() -> String {
    crate::DEFAULT_CONFIG_DIR.to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SourceConfig {
    /// REST endpoint returning `{ "data": [...] }`.
    #[serde(default)]
    pub url: String,

    /// Headers sent with the source GET request.
    #[serde(default)]
    pub headers: BTreeMap<String, String>,

    /// JSON file (relative to `config_dir`) holding `{ "data": [...] }`.
    #[serde(default)]
    pub file: String,

    #[serde(default = "default_config_dir")]
    pub config_dir: String,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            headers: BTreeMap::new(),
            file: String::new(),
            config_dir: default_config_dir(),
        }
    }
}

impl SourceConfig {
    pub fn has_url(&self) -> bool {
        !self.url.is_empty()
    }

    pub fn has_file(&self) -> bool {
        !self.file.is_empty()
    }
}
