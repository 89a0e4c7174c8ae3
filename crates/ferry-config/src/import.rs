//! Import run settings.

use serde::{Deserialize, Serialize};

use crate::ConfigError;

const fn default_concurrency() -> usize {
    4
}

const fn default_call_timeout_secs() -> u64 {
    30
}

fn default_content_type() -> String {
    "image/jpeg".to_string()
}

const fn default_process_poll_attempts() -> u32 {
    10
}

const fn default_process_poll_interval_ms() -> u64 {
    500
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ImportConfig {
    /// Content type every imported entry is created with.
    #[serde(default)]
    pub content_type_id: String,

    /// Locale identifier, resolved to a locale code before import.
    #[serde(default)]
    pub locale_id: String,

    /// Worker pool width for the batch runner.
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,

    /// Upper bound for a single management API call, in seconds.
    #[serde(default = "default_call_timeout_secs")]
    pub call_timeout_secs: u64,

    /// Map only the first N source records.
    #[serde(default)]
    pub record_limit: Option<usize>,

    /// MIME type used when a record carries none.
    #[serde(default = "default_content_type")]
    pub default_content_type: String,

    /// How many times to poll an asset while waiting for processing.
    #[serde(default = "default_process_poll_attempts")]
    pub process_poll_attempts: u32,

    #[serde(default = "default_process_poll_interval_ms")]
    pub process_poll_interval_ms: u64,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            content_type_id: String::new(),
            locale_id: String::new(),
            concurrency: default_concurrency(),
            call_timeout_secs: default_call_timeout_secs(),
            record_limit: None,
            default_content_type: default_content_type(),
            process_poll_attempts: default_process_poll_attempts(),
            process_poll_interval_ms: default_process_poll_interval_ms(),
        }
    }
}

impl ImportConfig {
    /// Check if the content type and locale are set.
    pub fn is_configured(&self) -> bool {
        !self.content_type_id.is_empty() && !self.locale_id.is_empty()
    }

    /// Reject values the batch runner cannot honour.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] for a zero pool width, a zero
    /// timeout, or zero poll attempts.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.concurrency == 0 {
            return Err(ConfigError::InvalidValue {
                field: "import.concurrency".into(),
                reason: "must be at least 1".into(),
            });
        }
        if self.call_timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "import.call_timeout_secs".into(),
                reason: "must be at least 1".into(),
            });
        }
        if self.process_poll_attempts == 0 {
            return Err(ConfigError::InvalidValue {
                field: "import.process_poll_attempts".into(),
                reason: "must be at least 1".into(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_correct() {
        let config = ImportConfig::default();
        assert!(!config.is_configured());
        assert_eq!(config.concurrency, 4);
        assert_eq!(config.call_timeout_secs, 30);
        assert_eq!(config.record_limit, None);
        assert_eq!(config.default_content_type, "image/jpeg");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn zero_concurrency_is_rejected() {
        let config = ImportConfig {
            concurrency: 0,
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("import.concurrency"));
    }
}
