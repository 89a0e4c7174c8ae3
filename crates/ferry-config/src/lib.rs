//! # ferry-config
//!
//! Layered configuration loading for Ferry using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`FERRY_*` prefix, `__` as separator)
//! 2. Project-level `config/ferry.toml` (the config directory is overridable)
//! 3. User-level `~/.config/ferry/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `FERRY_TARGET__ACCESS_TOKEN` -> `target.access_token`,
//! `FERRY_IMPORT__LOCALE_ID` -> `import.locale_id`, etc.
//! The `__` (double underscore) separates nested config sections.
//!
//! # Usage
//!
//! ```no_run
//! use ferry_config::FerryConfig;
//!
//! let config = FerryConfig::load_with_dotenv().expect("config");
//!
//! if config.target.is_configured() {
//!     println!("space: {}", config.target.space_id);
//! }
//! ```

mod error;
mod import;
mod source;
mod target;

pub use error::ConfigError;
pub use ferry_core::MappingConfig;
pub use import::ImportConfig;
pub use source::SourceConfig;
pub use target::TargetConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Directory holding the project config file and file-mode source data.
pub const DEFAULT_CONFIG_DIR: &str = "config";

/// Name of the project config file inside the config directory.
pub const CONFIG_FILE_NAME: &str = "ferry.toml";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct FerryConfig {
    #[serde(default)]
    pub target: TargetConfig,
    #[serde(default)]
    pub source: SourceConfig,
    #[serde(default)]
    pub import: ImportConfig,
    #[serde(default)]
    pub mapping: MappingConfig,
}

impl FerryConfig {
    /// Load configuration from all sources using the default config directory.
    ///
    /// Does NOT call `dotenvy` -- use [`Self::load_with_dotenv`] if you need `.env`
    /// file loading.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Load`] if a provider fails or a value has the
    /// wrong shape.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(Path::new(DEFAULT_CONFIG_DIR))
    }

    /// Load configuration with the project file taken from `config_dir`.
    ///
    /// Unless a higher-priority layer says otherwise, `source.config_dir` is
    /// set to `config_dir` so file-mode sources resolve next to the config file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Load`] on extraction failure.
    pub fn load_from(config_dir: &Path) -> Result<Self, ConfigError> {
        Self::figment_in(config_dir)
            .extract()
            .map_err(ConfigError::from)
    }

    /// Load configuration with `.env` file support.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Load`] on extraction failure.
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::load()
    }

    /// Build the figment provider chain for the default config directory.
    pub fn figment() -> Figment {
        Self::figment_in(Path::new(DEFAULT_CONFIG_DIR))
    }

    /// Build the figment provider chain for `config_dir`.
    ///
    /// This is public so tests can inspect the figment directly or add
    /// additional providers on top.
    pub fn figment_in(config_dir: &Path) -> Figment {
        let mut defaults = Self::default();
        defaults.source.config_dir = config_dir.to_string_lossy().into_owned();

        let mut figment = Figment::from(Serialized::defaults(defaults));

        // Layer 1: User-global config
        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            figment = figment.merge(Toml::file(global_path));
        }

        // Layer 2: Project-local config
        let local_path = config_dir.join(CONFIG_FILE_NAME);
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        // Layer 3: Environment variables (highest priority)
        figment.merge(Env::prefixed("FERRY_").split("__"))
    }

    /// Confirm every section an import run needs is present and sane.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NotConfigured`] naming the first empty section,
    /// or [`ConfigError::InvalidValue`] for out-of-range settings.
    pub fn ensure_importable(&self) -> Result<(), ConfigError> {
        self.ensure_connectable()?;
        if !self.mapping.is_configured() {
            return Err(ConfigError::NotConfigured {
                section: "mapping".into(),
            });
        }
        self.mapping
            .validate()
            .map_err(|e| ConfigError::InvalidValue {
                field: "mapping".into(),
                reason: e.to_string(),
            })?;
        self.import.validate()
    }

    /// Confirm the target credentials and import identifiers are present.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NotConfigured`] naming the first empty section.
    pub fn ensure_connectable(&self) -> Result<(), ConfigError> {
        if !self.target.is_configured() {
            return Err(ConfigError::NotConfigured {
                section: "target".into(),
            });
        }
        if !self.import.is_configured() {
            return Err(ConfigError::NotConfigured {
                section: "import".into(),
            });
        }
        Ok(())
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("ferry").join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_loads() {
        let config = FerryConfig::default();
        assert!(!config.target.is_configured());
        assert!(!config.import.is_configured());
        assert!(!config.mapping.is_configured());
        assert_eq!(config.target.environment_id, "master");
    }

    #[test]
    fn figment_builds_without_files() {
        let figment = FerryConfig::figment_in(Path::new("does-not-exist"));
        let config: FerryConfig = figment.extract().expect("should extract defaults");
        assert!(!config.target.is_configured());
        assert_eq!(config.import.concurrency, 4);
        assert_eq!(config.source.config_dir, "does-not-exist");
    }

    #[test]
    fn ensure_importable_names_missing_section() {
        let err = FerryConfig::default().ensure_importable().unwrap_err();
        assert!(matches!(err, ConfigError::NotConfigured { ref section } if section == "target"));
    }
}
