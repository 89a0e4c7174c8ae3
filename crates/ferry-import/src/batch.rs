//! Bounded, order-preserving execution of per-record imports.

use ferry_core::{MappingConfig, NormalizedRecord};
use ferry_platform::ManagementApi;
use futures::StreamExt;
use tracing::Instrument;

use crate::builder::{ImportSettings, ImportedRecord, import_record};
use crate::error::ImportError;

/// Settled result of one record's import.
#[derive(Debug)]
pub struct RecordOutcome {
    pub record_index: usize,
    pub result: Result<ImportedRecord, ImportError>,
}

impl RecordOutcome {
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.result.is_ok()
    }
}

/// Import every record with at most `width` in flight.
///
/// Returns exactly one outcome per record, in input order. A failing record
/// never cancels the others. `on_settled` sees each outcome as it is yielded.
pub async fn run_batch<F>(
    api: &dyn ManagementApi,
    records: &[NormalizedRecord],
    mapping: &MappingConfig,
    settings: &ImportSettings,
    width: usize,
    mut on_settled: F,
) -> Vec<RecordOutcome>
where
    F: FnMut(&RecordOutcome),
{
    let width = width.max(1);
    tracing::info!(records = records.len(), width, "starting batch");

    futures::stream::iter(records)
        .map(|record| {
            let span = tracing::info_span!("record", index = record.source_index);
            async move {
                let result = import_record(api, record, mapping, settings).await;
                if let Err(err) = &result {
                    tracing::warn!(error = %err, "record failed");
                }
                RecordOutcome {
                    record_index: record.source_index,
                    result,
                }
            }
            .instrument(span)
        })
        .buffered(width)
        .inspect(|outcome| on_settled(outcome))
        .collect()
        .await
}
