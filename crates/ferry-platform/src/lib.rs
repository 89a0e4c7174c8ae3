//! # ferry-platform
//!
//! Management API client for the target content platform.
//!
//! - [`connect`] authenticates and resolves a space + environment handle
//! - [`validate_resources`] checks the target content type and resolves the
//!   locale identifier to a locale code
//! - [`ManagementApi`] is the environment-scoped seam the importer drives

pub mod api;
pub mod connection;
pub mod models;
pub mod validator;

mod assets;
mod entries;
mod error;
mod http;
mod schema;

pub use api::ManagementApi;
pub use connection::{Credentials, connect};
pub use error::{ApiErrorPayload, PlatformError, RequestInfo};
pub use models::{Asset, ContentType, Entry, EnvironmentInfo, Locale, Space, Sys};
pub use validator::{ResolvedTarget, validate_resources};

use std::time::Duration;

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};

// ── Client ─────────────────────────────────────────────────────────

/// HTTP handle bound to one space and environment.
///
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct Environment {
    http: reqwest::Client,
    base_url: String,
    space_id: String,
    environment_id: String,
}

impl Environment {
    /// Build a handle without contacting the platform.
    ///
    /// Use [`connect`] to also verify the credentials, space and environment.
    ///
    /// # Errors
    ///
    /// Returns [`PlatformError::InvalidHeader`] if the token or an extra header
    /// is not a valid HTTP header, or [`PlatformError::Http`] if the client
    /// fails to build.
    pub fn new(credentials: &Credentials) -> Result<Self, PlatformError> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("ferry/", env!("CARGO_PKG_VERSION")))
            .timeout(credentials.timeout)
            .default_headers(default_headers(credentials)?)
            .build()?;

        Ok(Self {
            http,
            base_url: credentials.base_url.trim_end_matches('/').to_string(),
            space_id: credentials.space_id.clone(),
            environment_id: credentials.environment_id.clone(),
        })
    }

    #[must_use]
    pub fn space_id(&self) -> &str {
        &self.space_id
    }

    #[must_use]
    pub fn environment_id(&self) -> &str {
        &self.environment_id
    }

    fn space_url(&self) -> String {
        format!(
            "{}/spaces/{}",
            self.base_url,
            urlencoding::encode(&self.space_id)
        )
    }

    /// URL of `path` under this space + environment.
    fn env_url(&self, path: &str) -> String {
        format!(
            "{}/environments/{}/{path}",
            self.space_url(),
            urlencoding::encode(&self.environment_id)
        )
    }
}

fn default_headers(credentials: &Credentials) -> Result<HeaderMap, PlatformError> {
    let mut headers = HeaderMap::new();
    headers.insert(
        AUTHORIZATION,
        header_value("Authorization", &format!("Bearer {}", credentials.access_token))?,
    );
    headers.insert(CONTENT_TYPE, HeaderValue::from_static(crate::http::CONTENT_TYPE));

    for (name, value) in &credentials.headers {
        let header_name =
            HeaderName::from_bytes(name.as_bytes()).map_err(|e| PlatformError::InvalidHeader {
                name: name.clone(),
                reason: e.to_string(),
            })?;
        headers.insert(header_name, header_value(name, value)?);
    }
    Ok(headers)
}

fn header_value(name: &str, value: &str) -> Result<HeaderValue, PlatformError> {
    HeaderValue::from_str(value).map_err(|e| PlatformError::InvalidHeader {
        name: name.to_string(),
        reason: e.to_string(),
    })
}

/// Default per-request timeout for management API calls.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
