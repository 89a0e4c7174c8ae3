//! Shared HTTP response helpers for management API calls.
//!
//! Centralizes status-code checks (non-success → [`PlatformError::Api`] with
//! the platform's error body unpacked) so resource modules stay focused on
//! request construction and response mapping.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{ApiErrorPayload, PlatformError, RequestInfo};

/// Media type of management API request and response bodies.
pub const CONTENT_TYPE: &str = "application/vnd.contentful.management.v1+json";

/// Optimistic-locking header carried by update and publish calls.
pub const VERSION_HEADER: &str = "X-Contentful-Version";

/// Content type header required by entry creation.
pub const CONTENT_TYPE_ID_HEADER: &str = "X-Contentful-Content-Type";

/// Check an HTTP response for a non-success status.
///
/// Returns the response unchanged on success. Otherwise reads the body and
/// builds an [`ApiErrorPayload`] from the platform's `{message, details,
/// requestId}` error shape, falling back to the raw body text as the message.
/// Rate limiting (429) is reported like any other API error.
pub async fn check_response(
    resp: reqwest::Response,
    method: &str,
) -> Result<reqwest::Response, PlatformError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }

    let url = resp.url().to_string();
    let body = resp.text().await.unwrap_or_default();
    Err(PlatformError::Api(Box::new(error_payload(
        status.as_u16(),
        status.canonical_reason().unwrap_or_default(),
        &body,
        RequestInfo {
            url,
            method: method.to_string(),
        },
    ))))
}

/// Deserialize a successful response body.
pub async fn read_json<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, PlatformError> {
    let bytes = resp.bytes().await?;
    serde_json::from_slice(&bytes).map_err(|e| PlatformError::Parse(e.to_string()))
}

fn error_payload(status: u16, status_text: &str, body: &str, request: RequestInfo) -> ApiErrorPayload {
    let parsed = serde_json::from_str::<Value>(body).ok();
    let field = |name: &str| parsed.as_ref().and_then(|v| v.get(name)).cloned();

    let message = field("message")
        .and_then(|v| v.as_str().map(str::to_string))
        .unwrap_or_else(|| body.to_string());
    let request_id = field("requestId").and_then(|v| v.as_str().map(str::to_string));

    ApiErrorPayload {
        status,
        status_text: status_text.to_string(),
        request_id,
        message,
        details: field("details").unwrap_or(Value::Null),
        request,
    }
}
