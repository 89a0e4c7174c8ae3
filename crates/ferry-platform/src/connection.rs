//! Authenticate and resolve an environment handle.

use std::collections::BTreeMap;
use std::time::Duration;

use ferry_config::TargetConfig;
use tracing::instrument;

use crate::error::PlatformError;
use crate::http::{check_response, read_json};
use crate::models::{EnvironmentInfo, Space};
use crate::{DEFAULT_TIMEOUT, Environment};

/// Everything needed to reach one environment of one space.
#[derive(Clone)]
pub struct Credentials {
    pub access_token: String,
    pub space_id: String,
    pub environment_id: String,
    pub base_url: String,
    pub headers: BTreeMap<String, String>,
    /// Per-request timeout applied by the HTTP client.
    pub timeout: Duration,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("access_token", &"<redacted>")
            .field("space_id", &self.space_id)
            .field("environment_id", &self.environment_id)
            .field("base_url", &self.base_url)
            .field("headers", &self.headers.keys().collect::<Vec<_>>())
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl From<&TargetConfig> for Credentials {
    fn from(config: &TargetConfig) -> Self {
        Self {
            access_token: config.access_token.clone(),
            space_id: config.space_id.clone(),
            environment_id: if config.environment_id.is_empty() {
                ferry_config::TargetConfig::default().environment_id
            } else {
                config.environment_id.clone()
            },
            base_url: config.base_url.clone(),
            headers: config.headers.clone(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl Credentials {
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Authenticate against the platform and resolve the configured environment.
///
/// Looks up the space (which proves the token is accepted) and then the
/// environment. No retry is attempted.
///
/// # Errors
///
/// Returns [`PlatformError`] if the client cannot be built, authentication
/// fails, or the space or environment does not exist.
#[instrument(skip(credentials), fields(space = %credentials.space_id, environment = %credentials.environment_id))]
pub async fn connect(credentials: &Credentials) -> Result<Environment, PlatformError> {
    let env = Environment::new(credentials)?;

    let space = env.fetch_space().await?;
    tracing::debug!(name = %space.name, "space resolved");

    let info = env.fetch_environment().await?;
    tracing::info!(
        space = %space.sys.id,
        environment = %info.sys.id,
        "connected to management API"
    );
    Ok(env)
}

impl Environment {
    async fn fetch_space(&self) -> Result<Space, PlatformError> {
        let resp = check_response(self.http.get(self.space_url()).send().await?, "GET").await?;
        read_json(resp).await
    }

    async fn fetch_environment(&self) -> Result<EnvironmentInfo, PlatformError> {
        let url = format!(
            "{}/environments/{}",
            self.space_url(),
            urlencoding::encode(&self.environment_id)
        );
        let resp = check_response(self.http.get(&url).send().await?, "GET").await?;
        read_json(resp).await
    }
}
