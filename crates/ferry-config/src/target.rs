//! Target platform credentials.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

pub const DEFAULT_ENVIRONMENT: &str = "master";
pub const DEFAULT_BASE_URL: &str = "https://api.contentful.com";

fn default_environment_id() -> String {
    DEFAULT_ENVIRONMENT.to_string()
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TargetConfig {
    /// Management API personal access token.
    #[serde(default)]
    pub access_token: String,

    #[serde(default)]
    pub space_id: String,

    /// Environment within the space (defaults to `master`).
    #[serde(default = "default_environment_id")]
    pub environment_id: String,

    /// Management API root URL.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Extra headers sent with every management API call.
    #[serde(default)]
    pub headers: BTreeMap<String, String>,
}

impl Default for TargetConfig {
    fn default() -> Self {
        Self {
            access_token: String::new(),
            space_id: String::new(),
            environment_id: default_environment_id(),
            base_url: default_base_url(),
            headers: BTreeMap::new(),
        }
    }
}

impl TargetConfig {
    /// Check if the token and space are set.
    pub fn is_configured(&self) -> bool {
        !self.access_token.is_empty() && !self.space_id.is_empty()
    }
}
