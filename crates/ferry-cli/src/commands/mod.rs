use anyhow::Context;
use ferry_config::FerryConfig;
use ferry_platform::{Credentials, Environment, connect};

use crate::cli::{Commands, GlobalFlags};

pub mod preview;
pub mod run;
pub mod validate;

/// Route a parsed command to its handler.
pub async fn dispatch(
    command: Commands,
    config: FerryConfig,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match command {
        Commands::Run(args) => run::handle(&args, config, flags).await,
        Commands::Validate => validate::handle(&config, flags).await,
        Commands::Preview(args) => preview::handle(&args, config, flags).await,
    }
}

/// Connect to the configured environment, logging the attempted target on failure.
pub async fn connect_target(config: &FerryConfig) -> anyhow::Result<Environment> {
    let credentials = Credentials::from(&config.target).with_timeout(std::time::Duration::from_secs(
        config.import.call_timeout_secs,
    ));

    match connect(&credentials).await {
        Ok(env) => Ok(env),
        Err(error) => {
            tracing::error!(
                space = %credentials.space_id,
                environment = %credentials.environment_id,
                base_url = %credentials.base_url,
                %error,
                "connection to the target environment failed"
            );
            Err(error).with_context(|| {
                format!(
                    "failed to connect to space '{}' environment '{}'",
                    credentials.space_id, credentials.environment_id
                )
            })
        }
    }
}

/// Plain HTTP client for reading URL sources.
pub fn source_client(config: &FerryConfig) -> anyhow::Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(config.import.call_timeout_secs))
        .build()
        .context("failed to build source HTTP client")
}
