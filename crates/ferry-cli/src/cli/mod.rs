use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

pub mod global;

pub use global::{GlobalFlags, OutputFormat};

/// Top-level CLI parser for the `ferry` binary.
#[derive(Debug, Parser)]
#[command(
    name = "ferry",
    version,
    about = "Ferry - import external JSON records as published entries and assets"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format: json, table, raw
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Quiet mode (suppress non-essential output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Directory holding ferry.toml and file-mode source data
    #[arg(short, long, global = true, default_value = ferry_config::DEFAULT_CONFIG_DIR)]
    pub config_dir: PathBuf,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Import every source record as a published entry with a linked asset
    Run(RunArgs),
    /// Connect and check the target content type and locale
    Validate,
    /// Read and map the source without contacting the platform
    Preview(PreviewArgs),
}

/// Source selection shared by `run` and `preview`. Replaces the configured source.
#[derive(Debug, Clone, Default, Args)]
pub struct SourceArgs {
    /// JSON file with a top-level `data` array, relative to the config directory
    #[arg(long, conflicts_with = "url")]
    pub file: Option<String>,

    /// REST endpoint returning a top-level `data` array
    #[arg(long)]
    pub url: Option<String>,
}

#[derive(Debug, Clone, Args)]
pub struct RunArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Maximum number of records imported at once
    #[arg(long, value_parser = clap::value_parser!(u16).range(1..))]
    pub concurrency: Option<u16>,

    /// Import only the first records of the source
    #[arg(long)]
    pub sample: bool,
}

#[derive(Debug, Clone, Args)]
pub struct PreviewArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Map only the first records of the source
    #[arg(long)]
    pub sample: bool,
}

impl Cli {
    /// Extract ergonomic global flags struct for command handlers.
    #[must_use]
    pub fn global_flags(&self) -> GlobalFlags {
        GlobalFlags {
            format: self.format,
            quiet: self.quiet,
            verbose: self.verbose,
            config_dir: self.config_dir.clone(),
        }
    }
}
