//! Platform error types.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Errors that can occur when talking to the management API.
#[derive(Debug, Error)]
pub enum PlatformError {
    /// HTTP transport error (connect failure, client-side timeout, TLS).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API returned a non-success status. Displays as the JSON payload.
    #[error("{0}")]
    Api(Box<ApiErrorPayload>),

    /// Failed to parse an API response.
    #[error("parse error: {0}")]
    Parse(String),

    /// A configured header name or value is not valid HTTP.
    #[error("invalid header '{name}': {reason}")]
    InvalidHeader { name: String, reason: String },
}

impl PlatformError {
    /// HTTP status of an API error, if this is one.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api(payload) => Some(payload.status),
            _ => None,
        }
    }
}

/// Structured description of a failed API call.
///
/// Its `Display` form is the compact JSON encoding, so a failure message can be
/// parsed back into the structured fields by whoever reports it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiErrorPayload {
    pub status: u16,
    pub status_text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
    pub message: String,
    #[serde(default)]
    pub details: Value,
    pub request: RequestInfo,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestInfo {
    pub url: String,
    pub method: String,
}

impl fmt::Display for ApiErrorPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let json = serde_json::to_string(self).map_err(|_| fmt::Error)?;
        f.write_str(&json)
    }
}
