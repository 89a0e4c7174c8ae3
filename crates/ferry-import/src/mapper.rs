//! Field mapping: raw external records → normalized records.

use ferry_core::{MappingConfig, NormalizedRecord};
use serde_json::Value;

/// Record cap applied by sample runs.
pub const SAMPLE_LIMIT: usize = 10;

/// Map raw records in source order, keeping at most `limit` of them.
///
/// Every target field in `mapping.fields` is present in each output record.
/// A key the raw record lacks maps to `Null`, which is still forwarded.
#[must_use]
pub fn map_records(
    records: &[Value],
    mapping: &MappingConfig,
    limit: Option<usize>,
) -> Vec<NormalizedRecord> {
    let take = limit.unwrap_or(records.len());
    if take < records.len() {
        tracing::info!(
            total = records.len(),
            kept = take,
            "source truncated to record limit"
        );
    }

    records
        .iter()
        .take(take)
        .enumerate()
        .map(|(index, raw)| map_record(index, raw, mapping))
        .collect()
}

/// Map one raw record.
#[must_use]
pub fn map_record(index: usize, raw: &Value, mapping: &MappingConfig) -> NormalizedRecord {
    let mut record = NormalizedRecord::new(index);
    for (target, field) in &mapping.fields {
        let value = lookup(raw, &field.external_key).cloned().unwrap_or(Value::Null);
        record.insert(target.clone(), value, field.field_type.clone());
    }
    record
}

/// Find `key` in `raw`: exact top-level key first, then a dotted path.
fn lookup<'a>(raw: &'a Value, key: &str) -> Option<&'a Value> {
    if let Some(value) = raw.get(key) {
        return Some(value);
    }
    if !key.contains('.') {
        return None;
    }
    key.split('.').try_fold(raw, |node, segment| match node {
        Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
        _ => node.get(segment),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use ferry_core::{AssetLabels, FieldMapping};
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use serde_json::json;
    use std::collections::BTreeMap;

    fn mapping() -> MappingConfig {
        let mut fields = BTreeMap::new();
        fields.insert("title".into(), FieldMapping::new("name", "Symbol"));
        fields.insert("body".into(), FieldMapping::new("description", "RichText"));
        fields.insert("image".into(), FieldMapping::new("media.url", "Symbol"));
        MappingConfig {
            fields,
            asset_labels: AssetLabels {
                title: "title".into(),
                upload: "image".into(),
                content_type: "mime".into(),
            },
        }
    }

    fn raw(n: usize) -> Vec<Value> {
        (0..n)
            .map(|i| json!({"name": format!("item-{i}"), "description": "d", "media": {"url": format!("https://img.test/{i}.png")}}))
            .collect()
    }

    #[test]
    fn record_contains_exactly_mapped_keys() {
        let records = map_records(&raw(1), &mapping(), None);
        let keys: Vec<&str> = records[0].fields.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["body", "image", "title"]);
        assert_eq!(records[0].fields["title"].value, json!("item-0"));
        assert_eq!(records[0].fields["body"].field_type, "RichText");
        assert_eq!(records[0].fields["image"].value, json!("https://img.test/0.png"));
    }

    #[test]
    fn missing_keys_are_forwarded_as_null() {
        let records = map_records(&[json!({"name": "only"})], &mapping(), None);
        assert_eq!(records[0].fields["body"].value, Value::Null);
        assert_eq!(records[0].fields["image"].value, Value::Null);
        assert_eq!(records[0].fields.len(), 3);
    }

    #[rstest]
    #[case(25, 10)]
    #[case(11, 10)]
    #[case(10, 10)]
    #[case(3, 3)]
    #[case(0, 0)]
    fn sample_limit_truncates(#[case] input: usize, #[case] expected: usize) {
        let records = map_records(&raw(input), &mapping(), Some(SAMPLE_LIMIT));
        assert_eq!(records.len(), expected);
        for (i, record) in records.iter().enumerate() {
            assert_eq!(record.source_index, i);
            assert_eq!(record.fields["title"].value, json!(format!("item-{i}")));
        }
    }

    #[test]
    fn no_limit_maps_everything_in_order() {
        let records = map_records(&raw(15), &mapping(), None);
        assert_eq!(records.len(), 15);
        assert_eq!(records[14].source_index, 14);
    }

    #[test]
    fn exact_key_wins_over_dotted_path() {
        let raw = json!({"media.url": "flat", "media": {"url": "nested"}});
        assert_eq!(lookup(&raw, "media.url"), Some(&json!("flat")));
    }

    #[test]
    fn dotted_path_indexes_arrays() {
        let raw = json!({"images": [{"src": "a"}, {"src": "b"}]});
        assert_eq!(lookup(&raw, "images.1.src"), Some(&json!("b")));
        assert_eq!(lookup(&raw, "images.9.src"), None);
        assert_eq!(lookup(&raw, "images"), raw.get("images"));
    }
}
