//! Run orchestration: validate target, read source, map, import, report.

use std::time::Duration;

use chrono::Utc;
use ferry_config::FerryConfig;
use ferry_core::{MappingConfig, NormalizedRecord};
use ferry_platform::{ManagementApi, validate_resources};
use tracing::{Instrument, Span};

use crate::batch::{RecordOutcome, run_batch};
use crate::builder::ImportSettings;
use crate::error::RunError;
use crate::mapper::{SAMPLE_LIMIT, map_records};
use crate::report::{ImportReport, summarize};
use crate::source::Source;

/// Everything an import run needs besides the platform handle and source.
#[derive(Debug, Clone)]
pub struct ImportPlan {
    pub content_type_id: String,
    pub locale_id: String,
    pub mapping: MappingConfig,
    pub concurrency: usize,
    pub record_limit: Option<usize>,
    pub default_content_type: String,
    pub call_timeout: Duration,
    pub poll_attempts: u32,
    pub poll_interval: Duration,
}

impl ImportPlan {
    #[must_use]
    pub fn from_config(config: &FerryConfig) -> Self {
        let import = &config.import;
        Self {
            content_type_id: import.content_type_id.clone(),
            locale_id: import.locale_id.clone(),
            mapping: config.mapping.clone(),
            concurrency: import.concurrency,
            record_limit: import.record_limit,
            default_content_type: import.default_content_type.clone(),
            call_timeout: Duration::from_secs(import.call_timeout_secs),
            poll_attempts: import.process_poll_attempts,
            poll_interval: Duration::from_millis(import.process_poll_interval_ms),
        }
    }

    /// Cap the run at [`SAMPLE_LIMIT`] records, keeping a tighter configured limit.
    #[must_use]
    pub fn sampled(mut self) -> Self {
        self.record_limit = Some(self.record_limit.map_or(SAMPLE_LIMIT, |n| n.min(SAMPLE_LIMIT)));
        self
    }

    #[must_use]
    pub const fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency;
        self
    }

    fn settings(&self, locale_code: String) -> ImportSettings {
        ImportSettings {
            content_type_id: self.content_type_id.clone(),
            locale_code,
            default_content_type: self.default_content_type.clone(),
            call_timeout: self.call_timeout,
            poll_attempts: self.poll_attempts,
            poll_interval: self.poll_interval,
        }
    }
}

/// Per-run identity carried through logging.
#[derive(Debug, Clone)]
pub struct RunContext {
    pub run_id: String,
    pub span: Span,
}

impl RunContext {
    #[must_use]
    pub fn new() -> Self {
        Self::with_id(format!("run-{}", Utc::now().format("%Y%m%dT%H%M%S%.3fZ")))
    }

    #[must_use]
    pub fn with_id(run_id: impl Into<String>) -> Self {
        let run_id = run_id.into();
        let span = tracing::info_span!("import_run", run_id = %run_id);
        Self { run_id, span }
    }
}

impl Default for RunContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Execute a full import run.
///
/// Target validation happens before the source is read; if it fails, no
/// record is touched.
///
/// # Errors
///
/// Returns [`RunError`] when the mapping is invalid, the target cannot be
/// validated, or the source cannot be read. Per-record failures are reported
/// in the returned [`ImportReport`] instead.
pub async fn run<F>(
    api: &dyn ManagementApi,
    plan: &ImportPlan,
    source: &Source,
    http: &reqwest::Client,
    ctx: &RunContext,
    on_settled: F,
) -> Result<ImportReport, RunError>
where
    F: FnMut(&RecordOutcome),
{
    async {
        plan.mapping.validate().map_err(RunError::Mapping)?;

        let target = tokio::time::timeout(
            plan.call_timeout,
            validate_resources(api, &plan.content_type_id, &plan.locale_id),
        )
        .await
        .map_err(|_| RunError::ValidationTimeout {
            limit: plan.call_timeout,
        })?
        .map_err(|source| RunError::Validation {
            content_type_id: plan.content_type_id.clone(),
            locale_id: plan.locale_id.clone(),
            source,
        })?;

        let raw = source.read(http).await?;
        let records = map_records(&raw, &plan.mapping, plan.record_limit);
        let settings = plan.settings(target.locale_code);

        let outcomes = run_batch(
            api,
            &records,
            &plan.mapping,
            &settings,
            plan.concurrency,
            on_settled,
        )
        .await;

        let report = summarize(ctx.run_id.clone(), &outcomes);
        report.log();
        Ok(report)
    }
    .instrument(ctx.span.clone())
    .await
}

/// Read and map the source without touching the platform.
///
/// # Errors
///
/// Returns [`RunError`] when the mapping is invalid or the source cannot be read.
pub async fn preview(
    plan: &ImportPlan,
    source: &Source,
    http: &reqwest::Client,
) -> Result<Vec<NormalizedRecord>, RunError> {
    plan.mapping.validate().map_err(RunError::Mapping)?;
    let raw = source.read(http).await?;
    Ok(map_records(&raw, &plan.mapping, plan.record_limit))
}
