//! Aggregate run report.
//!
//! Failure details are recovered by parsing each failure message as a JSON
//! error envelope; anything that does not parse is kept as the raw message.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::batch::RecordOutcome;
use crate::builder::ImportedRecord;

/// Final report of one import run.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportReport {
    pub run_id: String,
    pub total: usize,
    pub succeeded: usize,
    pub failed: usize,
    pub imported: Vec<ImportedRecord>,
    pub failures: Vec<FailureDetail>,
}

/// Structured description of one failed record.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FailureDetail {
    pub record_index: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub step: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_status: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_status_text: Option<String>,
    pub error_message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_details: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_url: Option<String>,
}

/// Envelope shape accepted when parsing a failure message.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ErrorEnvelope {
    status: Option<u16>,
    status_text: Option<String>,
    message: Option<String>,
    details: Option<Value>,
    request: Option<EnvelopeRequest>,
}

#[derive(Debug, Deserialize)]
struct EnvelopeRequest {
    url: Option<String>,
}

impl FailureDetail {
    /// Build a detail from a failure message, parsing it as an error envelope
    /// when possible.
    #[must_use]
    pub fn from_message(record_index: usize, step: Option<String>, message: &str) -> Self {
        let envelope = serde_json::from_str::<ErrorEnvelope>(message)
            .ok()
            .filter(|e| e.status.is_some() || e.message.is_some());

        match envelope {
            Some(envelope) => Self {
                record_index,
                step,
                error_status: envelope.status,
                error_status_text: envelope.status_text,
                error_message: envelope.message.unwrap_or_else(|| message.to_string()),
                error_details: envelope.details.filter(|d| !is_empty_details(d)),
                request_url: envelope.request.and_then(|r| r.url),
            },
            None => Self {
                record_index,
                step,
                error_status: None,
                error_status_text: None,
                error_message: message.to_string(),
                error_details: None,
                request_url: None,
            },
        }
    }
}

fn is_empty_details(details: &Value) -> bool {
    match details {
        Value::Null => true,
        Value::Object(map) => map.is_empty(),
        Value::Array(items) => items.is_empty(),
        _ => false,
    }
}

/// Fold per-record outcomes into the run report. Outcome order is preserved.
#[must_use]
pub fn summarize(run_id: impl Into<String>, outcomes: &[RecordOutcome]) -> ImportReport {
    let mut imported = Vec::new();
    let mut failures = Vec::new();

    for outcome in outcomes {
        match &outcome.result {
            Ok(record) => imported.push(record.clone()),
            Err(err) => failures.push(FailureDetail::from_message(
                outcome.record_index,
                err.step().map(|s| s.to_string()),
                &err.message(),
            )),
        }
    }

    ImportReport {
        run_id: run_id.into(),
        total: outcomes.len(),
        succeeded: imported.len(),
        failed: failures.len(),
        imported,
        failures,
    }
}

impl ImportReport {
    #[must_use]
    pub fn has_failures(&self) -> bool {
        self.failed > 0
    }

    #[must_use]
    pub fn summary_line(&self) -> String {
        format!(
            "Import finished. Total: {}. Successfully: {}. Failed: {}.",
            self.total, self.succeeded, self.failed
        )
    }

    /// Pretty JSON list of failures, or `no errors` when there are none.
    #[must_use]
    pub fn failure_log(&self) -> String {
        if self.failures.is_empty() {
            return "no errors".to_string();
        }
        serde_json::to_string_pretty(&self.failures)
            .unwrap_or_else(|_| format!("{} failures", self.failures.len()))
    }

    /// Emit the summary and failure details through tracing.
    pub fn log(&self) {
        let errors = self.failure_log();
        if self.has_failures() {
            tracing::warn!(
                run_id = %self.run_id,
                total = self.total,
                succeeded = self.succeeded,
                failed = self.failed,
                errors = %errors,
                "{}",
                self.summary_line()
            );
        } else {
            tracing::info!(
                run_id = %self.run_id,
                total = self.total,
                succeeded = self.succeeded,
                failed = self.failed,
                errors = %errors,
                "{}",
                self.summary_line()
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ImportError, Step};
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use std::io;
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn logged(report: &ImportReport) -> String {
        let captured = Captured::default();
        let writer = captured.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();
        tracing::subscriber::with_default(subscriber, || report.log());
        let bytes = captured.0.lock().unwrap().clone();
        String::from_utf8(bytes).unwrap()
    }

    #[test]
    fn parses_api_envelope() {
        let message = json!({
            "status": 409,
            "statusText": "Conflict",
            "message": "Version mismatch",
            "details": {"errors": [{"name": "taken"}]},
            "request": {"url": "https://api.test/entries", "method": "POST"}
        })
        .to_string();

        let detail = FailureDetail::from_message(2, Some("create_entry".into()), &message);
        assert_eq!(detail.error_status, Some(409));
        assert_eq!(detail.error_status_text.as_deref(), Some("Conflict"));
        assert_eq!(detail.error_message, "Version mismatch");
        assert_eq!(detail.request_url.as_deref(), Some("https://api.test/entries"));
        assert!(detail.error_details.is_some());
    }

    #[test]
    fn empty_details_are_dropped() {
        let message = json!({"status": 404, "message": "not found", "details": {}}).to_string();
        let detail = FailureDetail::from_message(0, None, &message);
        assert_eq!(detail.error_details, None);
    }

    #[test]
    fn unparseable_message_is_kept_raw() {
        let detail = FailureDetail::from_message(1, Some("publish_asset".into()), "publish_asset timed out after 30000ms");
        assert_eq!(detail.error_status, None);
        assert_eq!(detail.error_message, "publish_asset timed out after 30000ms");
        assert_eq!(detail.step.as_deref(), Some("publish_asset"));
    }

    #[test]
    fn json_without_envelope_fields_is_kept_raw() {
        let detail = FailureDetail::from_message(0, None, r#"{"unrelated": true}"#);
        assert_eq!(detail.error_message, r#"{"unrelated": true}"#);
        assert_eq!(detail.error_status, None);
    }

    #[test]
    fn serialized_detail_skips_absent_fields() {
        let detail = FailureDetail::from_message(4, None, "boom");
        assert_eq!(
            serde_json::to_value(&detail).unwrap(),
            json!({"recordIndex": 4, "errorMessage": "boom"})
        );
    }

    #[test]
    fn summary_line_and_empty_failure_log() {
        let report = summarize("run-1", &[]);
        assert_eq!(report.summary_line(), "Import finished. Total: 0. Successfully: 0. Failed: 0.");
        assert_eq!(report.failure_log(), "no errors");
        assert!(!report.has_failures());
    }

    #[test]
    fn log_is_one_summary_event_carrying_failures() {
        let outcomes = [RecordOutcome {
            record_index: 3,
            result: Err(ImportError::Timeout {
                step: Step::UpdateEntry,
                limit: Duration::from_millis(50),
            }),
        }];
        let out = logged(&summarize("run-9", &outcomes));

        assert_eq!(out.matches("Import finished. Total: 1. Successfully: 0. Failed: 1.").count(), 1);
        assert_eq!(out.matches(" WARN ").count(), 1);
        assert!(out.contains("update_entry timed out after 50ms"), "got {out}");
        assert!(!out.contains("import errors"));
    }

    #[test]
    fn clean_log_says_no_errors_on_the_summary() {
        let out = logged(&summarize("run-1", &[]));
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 1, "got {out}");
        assert!(lines[0].contains("Import finished. Total: 0."));
        assert!(lines[0].contains("errors=no errors"));
    }
}
