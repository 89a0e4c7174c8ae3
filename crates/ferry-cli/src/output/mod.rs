use ferry_import::ImportReport;
use serde::Serialize;
use serde_json::Value;

use crate::cli::OutputFormat;
use crate::ui;

pub mod table;

/// Render a serializable response to a string in the requested format.
pub fn render<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(value)?),
        OutputFormat::Table => render_table(value),
        OutputFormat::Raw => Ok(serde_json::to_string(value)?),
    }
}

/// Print a serializable response in the requested format.
pub fn output<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<()> {
    let rendered = render(value, format)?;
    println!("{rendered}");
    Ok(())
}

/// Render an import report. Tables get the summary line and one row per failure.
pub fn render_report(report: &ImportReport, format: OutputFormat) -> anyhow::Result<String> {
    if format != OutputFormat::Table {
        return render(report, format);
    }

    let mut sections = vec![report.summary_line()];
    if report.failures.is_empty() {
        sections.push(String::from("no errors"));
    } else if let Value::Array(items) = serde_json::to_value(&report.failures)? {
        sections.push(render_array_table(&items));
    }
    Ok(sections.join("\n\n"))
}

pub fn output_report(report: &ImportReport, format: OutputFormat) -> anyhow::Result<()> {
    println!("{}", render_report(report, format)?);
    Ok(())
}

fn table_options() -> table::TableOptions {
    let prefs = ui::prefs();
    table::TableOptions {
        max_width: prefs.term_width,
        color: prefs.table_color,
    }
}

fn render_table<T: Serialize>(value: &T) -> anyhow::Result<String> {
    Ok(match serde_json::to_value(value)? {
        Value::Array(items) => render_array_table(&items),
        Value::Object(map) => {
            let rows = map
                .into_iter()
                .map(|(key, value)| vec![key, cell(&value)])
                .collect::<Vec<_>>();
            table::render_entity_table(&["key", "value"], &rows, table_options())
        }
        scalar => table::render_entity_table(&["value"], &[vec![cell(&scalar)]], table_options()),
    })
}

/// One row per item. Object items become columns in first-seen key order.
fn render_array_table(items: &[Value]) -> String {
    if items.is_empty() {
        return String::from("(no rows)");
    }

    let objects = items.iter().map(Value::as_object).collect::<Option<Vec<_>>>();
    let Some(objects) = objects else {
        let rows = items.iter().map(|item| vec![cell(item)]).collect::<Vec<_>>();
        return table::render_entity_table(&["value"], &rows, table_options());
    };

    let mut columns: Vec<&str> = Vec::new();
    for key in objects.iter().flat_map(|map| map.keys()) {
        if !columns.contains(&key.as_str()) {
            columns.push(key);
        }
    }

    let rows = objects
        .iter()
        .map(|map| {
            columns
                .iter()
                .map(|column| map.get(*column).map_or_else(|| String::from("-"), cell))
                .collect::<Vec<_>>()
        })
        .collect::<Vec<_>>();
    table::render_entity_table(&columns, &rows, table_options())
}

fn cell(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use ferry_import::{FailureDetail, ImportReport, ImportedRecord};
    use serde::Serialize;

    use super::{render, render_report};
    use crate::cli::OutputFormat;

    #[derive(Serialize)]
    struct Example {
        locale_code: &'static str,
        fields: u32,
    }

    fn report() -> ImportReport {
        ImportReport {
            run_id: "run-1".into(),
            total: 2,
            succeeded: 1,
            failed: 1,
            imported: vec![ImportedRecord {
                record_index: 0,
                entry_id: "e1".into(),
                asset_id: "a1".into(),
                file_name: "e1.png".into(),
            }],
            failures: vec![FailureDetail::from_message(
                1,
                Some("create_entry".into()),
                r#"{"status":409,"statusText":"Conflict","message":"Version mismatch"}"#,
            )],
        }
    }

    #[test]
    fn json_render_is_valid_json() {
        let value = Example { locale_code: "en-US", fields: 3 };
        let out = render(&value, OutputFormat::Json).expect("json render should work");
        let parsed: serde_json::Value = serde_json::from_str(&out).expect("json should parse");
        assert_eq!(parsed["locale_code"], "en-US");
        assert_eq!(parsed["fields"], 3);
    }

    #[test]
    fn raw_render_is_single_line_json() {
        let out = render(&report(), OutputFormat::Raw).expect("raw render should work");
        let parsed: serde_json::Value = serde_json::from_str(&out).expect("json should parse");
        assert_eq!(parsed["failures"][0]["errorStatus"], 409);
        assert!(!out.contains('\n'));
    }

    #[test]
    fn table_render_for_object_is_tabular() {
        let value = Example { locale_code: "en-US", fields: 3 };
        let out = render(&value, OutputFormat::Table).expect("table render should work");
        assert!(out.lines().next().is_some_and(|line| line.contains("key")));
        assert!(out.contains("locale_code"));
    }

    #[test]
    fn report_table_has_summary_and_failure_rows() {
        let out = render_report(&report(), OutputFormat::Table).expect("table render should work");
        let mut lines = out.lines();
        assert_eq!(
            lines.next(),
            Some("Import finished. Total: 2. Successfully: 1. Failed: 1.")
        );
        assert!(out.contains("errorStatus"));
        assert!(out.contains("Version mismatch"));
    }

    #[test]
    fn report_table_without_failures_says_so() {
        let mut report = report();
        report.failures.clear();
        report.failed = 0;
        let out = render_report(&report, OutputFormat::Table).expect("table render should work");
        assert!(out.ends_with("no errors"));
    }
}
