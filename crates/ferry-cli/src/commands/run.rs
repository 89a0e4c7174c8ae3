use ferry_config::FerryConfig;
use ferry_import::{ImportPlan, RecordOutcome, RunContext, Source, run};

use crate::bootstrap::apply_source_overrides;
use crate::cli::{GlobalFlags, RunArgs};
use crate::output::output_report;
use crate::progress::Progress;

/// Handle `ferry run`: the full import.
///
/// Fails when the run aborts or when any record failed, after the report has
/// been printed.
pub async fn handle(args: &RunArgs, mut config: FerryConfig, flags: &GlobalFlags) -> anyhow::Result<()> {
    apply_source_overrides(&mut config, &args.source);
    if let Some(concurrency) = args.concurrency {
        config.import.concurrency = usize::from(concurrency);
    }
    config.ensure_importable()?;
    let source = Source::from_config(&config.source)?;

    let mut plan = ImportPlan::from_config(&config);
    if args.sample {
        plan = plan.sampled();
    }

    let ctx = RunContext::new();
    tracing::info!(
        run_id = %ctx.run_id,
        %source,
        space = %config.target.space_id,
        environment = %config.target.environment_id,
        content_type = %plan.content_type_id,
        locale = %plan.locale_id,
        concurrency = plan.concurrency,
        "starting import"
    );

    let env = super::connect_target(&config).await?;
    let http = super::source_client(&config)?;

    let progress = Progress::records("importing");
    let mut failed = 0_u64;
    let on_settled = |outcome: &RecordOutcome| {
        progress.inc(1);
        if !outcome.is_success() {
            failed += 1;
            progress.set_message(&format!("importing ({failed} failed)"));
        }
    };

    let report = match run(&env, &plan, &source, &http, &ctx, on_settled).await {
        Ok(report) => report,
        Err(error) => {
            progress.finish_err("aborted");
            tracing::error!(
                run_id = %ctx.run_id,
                %source,
                space = %config.target.space_id,
                environment = %config.target.environment_id,
                content_type = %plan.content_type_id,
                locale = %plan.locale_id,
                %error,
                "import aborted"
            );
            return Err(error.into());
        }
    };

    if report.has_failures() {
        progress.finish_err(&report.summary_line());
    } else {
        progress.finish_clear();
    }
    output_report(&report, flags.format)?;

    if report.has_failures() {
        anyhow::bail!("{} of {} records failed", report.failed, report.total);
    }
    Ok(())
}
