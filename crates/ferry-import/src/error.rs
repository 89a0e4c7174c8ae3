//! Import error types.
//!
//! Two tiers: [`RunError`] aborts the whole run before any record is touched,
//! [`ImportError`] fails a single record and is collected into its outcome.

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use ferry_core::CoreError;
use ferry_platform::PlatformError;
use thiserror::Error;

/// Failures while reading raw records from the configured source.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("no source configured: set source.url or source.file")]
    Missing,

    #[error("ambiguous source: both source.url ({url}) and source.file ({file}) are set")]
    Ambiguous { url: String, file: String },

    #[error("source request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("source {url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{origin} is not valid JSON: {source}")]
    Json {
        origin: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("{origin}: {reason}")]
    Shape { origin: String, reason: String },
}

/// The remote call a record import was performing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    CreateEntry,
    CreateAsset,
    ProcessAsset,
    FetchAsset,
    PublishAsset,
    UpdateEntry,
    PublishEntry,
}

impl Step {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::CreateEntry => "create_entry",
            Self::CreateAsset => "create_asset",
            Self::ProcessAsset => "process_asset",
            Self::FetchAsset => "fetch_asset",
            Self::PublishAsset => "publish_asset",
            Self::UpdateEntry => "update_entry",
            Self::PublishEntry => "publish_entry",
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Failure of one record's entry + asset chain.
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("{step} failed: {source}")]
    Platform {
        step: Step,
        #[source]
        source: PlatformError,
    },

    #[error("{step} timed out after {}ms", .limit.as_millis())]
    Timeout { step: Step, limit: Duration },

    #[error(transparent)]
    Record(#[from] CoreError),

    #[error("asset {asset_id} was not processed after {attempts} checks")]
    AssetNotProcessed { asset_id: String, attempts: u32 },
}

impl ImportError {
    /// The remote call that failed, when the failure came from one.
    #[must_use]
    pub const fn step(&self) -> Option<Step> {
        match self {
            Self::Platform { step, .. } | Self::Timeout { step, .. } => Some(*step),
            Self::Record(_) => None,
            Self::AssetNotProcessed { .. } => Some(Step::FetchAsset),
        }
    }

    /// Message of the underlying failure, without the step prefix.
    ///
    /// For platform API errors this is the JSON error payload.
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Self::Platform { source, .. } => source.to_string(),
            other => other.to_string(),
        }
    }
}

/// Failures that stop the run before any record is imported.
#[derive(Debug, Error)]
pub enum RunError {
    #[error("mapping is invalid: {0}")]
    Mapping(#[source] CoreError),

    #[error(
        "target validation failed (content type '{content_type_id}', locale '{locale_id}'): {source}"
    )]
    Validation {
        content_type_id: String,
        locale_id: String,
        #[source]
        source: PlatformError,
    },

    #[error("target validation timed out after {}ms", .limit.as_millis())]
    ValidationTimeout { limit: Duration },

    #[error(transparent)]
    Source(#[from] SourceError),
}
