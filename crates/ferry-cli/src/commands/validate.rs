use anyhow::Context;
use ferry_config::FerryConfig;
use ferry_platform::validate_resources;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::output::output;
use crate::progress::Progress;

#[derive(Debug, Serialize)]
struct ValidateResponse {
    space_id: String,
    environment_id: String,
    content_type_id: String,
    content_type_name: String,
    locale_code: String,
}

/// Handle `ferry validate`.
pub async fn handle(config: &FerryConfig, flags: &GlobalFlags) -> anyhow::Result<()> {
    config.ensure_connectable()?;

    let spinner = Progress::spinner("validating target");
    let env = super::connect_target(config).await.inspect_err(|_| {
        spinner.finish_err("connection failed");
    })?;

    let import = &config.import;
    let target = validate_resources(&env, &import.content_type_id, &import.locale_id)
        .await
        .inspect_err(|error| {
            spinner.finish_err("validation failed");
            tracing::error!(
                content_type = %import.content_type_id,
                locale = %import.locale_id,
                %error,
                "target validation failed"
            );
        })
        .with_context(|| {
            format!(
                "content type '{}' or locale '{}' not found",
                import.content_type_id, import.locale_id
            )
        })?;
    spinner.finish_clear();

    output(
        &ValidateResponse {
            space_id: env.space_id().to_string(),
            environment_id: env.environment_id().to_string(),
            content_type_id: target.content_type_id,
            content_type_name: target.content_type_name,
            locale_code: target.locale_code,
        },
        flags.format,
    )
}
