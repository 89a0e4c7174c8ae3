//! Errors raised while loading or checking `ferry.toml` and `FERRY_*` settings.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    /// A layer could not be read or a value has the wrong shape.
    #[error("failed to load ferry configuration: {0}")]
    Load(#[from] figment::Error),

    /// A section an import needs is missing or has empty required keys.
    #[error(
        "'{section}' is not configured: add a [{section}] table to ferry.toml or set FERRY_{}__* variables",
        .section.to_ascii_uppercase()
    )]
    NotConfigured { section: String },

    /// A key is present but out of range.
    #[error("invalid {field}: {reason}")]
    InvalidValue { field: String, reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_section_names_its_env_prefix() {
        let err = ConfigError::NotConfigured {
            section: "target".into(),
        };
        assert_eq!(
            err.to_string(),
            "'target' is not configured: add a [target] table to ferry.toml or set FERRY_TARGET__* variables"
        );
    }

    #[test]
    fn invalid_value_names_the_key() {
        let err = ConfigError::InvalidValue {
            field: "import.concurrency".into(),
            reason: "must be at least 1".into(),
        };
        assert_eq!(err.to_string(), "invalid import.concurrency: must be at least 1");
    }
}
