use ferry_config::FerryConfig;
use ferry_core::NormalizedRecord;
use ferry_import::{ImportPlan, Source, preview};
use serde_json::{Map, Value};

use crate::bootstrap::apply_source_overrides;
use crate::cli::{GlobalFlags, PreviewArgs};
use crate::output::output;

/// Handle `ferry preview`: read and map only.
pub async fn handle(
    args: &PreviewArgs,
    mut config: FerryConfig,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    apply_source_overrides(&mut config, &args.source);
    let source = Source::from_config(&config.source)?;

    let mut plan = ImportPlan::from_config(&config);
    if args.sample {
        plan = plan.sampled();
    }

    let http = super::source_client(&config)?;
    let records = preview(&plan, &source, &http).await?;
    tracing::info!(%source, records = records.len(), "source mapped");

    let rows = records.iter().map(record_row).collect::<Vec<_>>();
    output(&rows, flags.format)
}

/// Flatten a record into `{index, <target>: value, ...}` for display.
fn record_row(record: &NormalizedRecord) -> Value {
    let mut row = Map::new();
    row.insert("index".into(), Value::from(record.source_index));
    for (target, field) in &record.fields {
        row.insert(target.clone(), field.value.clone());
    }
    Value::Object(row)
}
