use std::path::Path;

use anyhow::Context;
use ferry_config::FerryConfig;

use crate::cli::{GlobalFlags, SourceArgs};

/// Load `.env`, then the layered configuration for `--config-dir`.
pub fn load_config(flags: &GlobalFlags) -> anyhow::Result<FerryConfig> {
    load_project_dotenv(&flags.config_dir)?;
    FerryConfig::load_from(&flags.config_dir).map_err(anyhow::Error::from)
}

/// Prefer a `.env` next to the config directory, then the working directory.
fn load_project_dotenv(config_dir: &Path) -> anyhow::Result<()> {
    let beside_config = config_dir
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .map(|parent| parent.join(".env"));

    if let Some(env_path) = beside_config
        && env_path.exists()
    {
        dotenvy::from_path(&env_path)
            .with_context(|| format!("failed to load dotenv file at {}", env_path.display()))?;
        return Ok(());
    }

    dotenvy::dotenv().ok();
    Ok(())
}

/// Replace the configured source with the one given on the command line.
pub fn apply_source_overrides(config: &mut FerryConfig, args: &SourceArgs) {
    if let Some(file) = &args.file {
        config.source.file.clone_from(file);
        config.source.url.clear();
    } else if let Some(url) = &args.url {
        config.source.url.clone_from(url);
        config.source.file.clear();
    }
}
