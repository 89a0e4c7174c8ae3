//! Entry and asset construction for one normalized record.
//!
//! The whole chain (create entry, create/process/publish asset, link, update,
//! publish entry) runs as a single awaitable unit. Any step's failure is the
//! record's failure.

use std::future::Future;
use std::time::Duration;

use ferry_core::{
    CoreError, Link, MappingConfig, NormalizedRecord, RICH_TEXT, RichTextDocument, stringify,
};
use ferry_platform::{Asset, ManagementApi, PlatformError};
use serde::Serialize;
use serde_json::{Map, Value, json};

use crate::error::{ImportError, Step};

/// Known file extension ↔ MIME type pairs. The first match wins both ways.
const KNOWN_TYPES: &[(&str, &str)] = &[
    ("jpg", "image/jpeg"),
    ("jpeg", "image/jpeg"),
    ("png", "image/png"),
    ("gif", "image/gif"),
    ("webp", "image/webp"),
    ("svg", "image/svg+xml"),
    ("avif", "image/avif"),
    ("tiff", "image/tiff"),
    ("bmp", "image/bmp"),
    ("pdf", "application/pdf"),
    ("mp4", "video/mp4"),
    ("webm", "video/webm"),
    ("mp3", "audio/mpeg"),
];

/// Fallback extension when neither the MIME type nor the URL names one.
const FALLBACK_EXTENSION: &str = "bin";

/// Per-run settings for record imports, fixed after target validation.
#[derive(Debug, Clone)]
pub struct ImportSettings {
    pub content_type_id: String,
    /// Resolved locale code keying every localized field.
    pub locale_code: String,
    pub default_content_type: String,
    pub call_timeout: Duration,
    pub poll_attempts: u32,
    pub poll_interval: Duration,
}

/// Identifiers produced by a successful record import.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportedRecord {
    pub record_index: usize,
    pub entry_id: String,
    pub asset_id: String,
    pub file_name: String,
}

/// Import one record: entry, asset, link, publish.
///
/// # Errors
///
/// Returns [`ImportError`] for the first failing or timed-out step, or when the
/// record carries no upload URL. Entries created before the failure are left
/// in place.
pub async fn import_record(
    api: &dyn ManagementApi,
    record: &NormalizedRecord,
    mapping: &MappingConfig,
    settings: &ImportSettings,
) -> Result<ImportedRecord, ImportError> {
    let locale = settings.locale_code.as_str();
    let upload_field = mapping.asset_labels.upload.as_str();
    let upload_url = record
        .str_value(upload_field)
        .ok_or_else(|| CoreError::MissingField {
            index: record.source_index,
            field: upload_field.to_string(),
            reason: "has no upload URL".into(),
        })?;

    let fields = build_entry_fields(record, mapping, locale);
    let entry = timed(
        settings,
        Step::CreateEntry,
        api.create_entry(&settings.content_type_id, fields),
    )
    .await?;
    tracing::debug!(entry = %entry.sys.id, "entry created");

    let content_type = resolve_content_type(record, mapping, upload_url, &settings.default_content_type);
    let file_name = asset_file_name(&entry.sys.id, &content_type, upload_url);
    let asset_fields = build_asset_fields(
        &file_name,
        &content_type,
        upload_url,
        record.str_value(&mapping.asset_labels.title),
        locale,
    );

    let asset = timed(settings, Step::CreateAsset, api.create_asset(asset_fields)).await?;
    let asset = process_for_all_locales(api, asset, settings).await?;
    let asset = timed(settings, Step::PublishAsset, api.publish_asset(&asset)).await?;
    tracing::debug!(asset = %asset.sys.id, "asset published");

    let mut entry = entry;
    attach_asset_link(
        &mut entry.fields,
        upload_field,
        locale,
        Link::asset(&asset.sys.id).to_value(),
    );
    let entry = timed(settings, Step::UpdateEntry, api.update_entry(&entry)).await?;
    let entry = timed(settings, Step::PublishEntry, api.publish_entry(&entry)).await?;

    tracing::info!(entry = %entry.sys.id, asset = %asset.sys.id, "record imported");
    Ok(ImportedRecord {
        record_index: record.source_index,
        entry_id: entry.sys.id,
        asset_id: asset.sys.id,
        file_name,
    })
}

/// Build the localized `fields` payload for entry creation.
///
/// Asset label fields are left out. `RichText` fields become a one-paragraph
/// document; everything else is written as a string.
#[must_use]
pub fn build_entry_fields(
    record: &NormalizedRecord,
    mapping: &MappingConfig,
    locale: &str,
) -> Map<String, Value> {
    let mut fields = Map::new();
    for (target, field) in mapping.entry_fields() {
        let (value, field_type) = record.get(target).map_or((&Value::Null, field.field_type.as_str()), |m| {
            (&m.value, m.field_type.as_str())
        });
        let text = stringify(value);
        let localized = if field_type == RICH_TEXT {
            serde_json::to_value(RichTextDocument::paragraph(text)).unwrap_or_default()
        } else {
            Value::String(text)
        };
        fields.insert(target.clone(), json!({ locale: localized }));
    }
    fields
}

/// Build the localized `fields` payload for asset creation.
#[must_use]
pub fn build_asset_fields(
    file_name: &str,
    content_type: &str,
    upload_url: &str,
    description: Option<&str>,
    locale: &str,
) -> Map<String, Value> {
    let mut fields = Map::new();
    fields.insert("title".into(), json!({ locale: file_name }));
    fields.insert(
        "file".into(),
        json!({
            locale: {
                "contentType": content_type,
                "fileName": file_name,
                "upload": upload_url,
            }
        }),
    );
    if let Some(description) = description {
        fields.insert("description".into(), json!({ locale: description }));
    }
    fields
}

/// Add an asset link to `field` for `locale`.
///
/// Appends when the field already holds a non-empty list for the locale,
/// otherwise sets a single-element list.
pub fn attach_asset_link(fields: &mut Map<String, Value>, field: &str, locale: &str, link: Value) {
    let slot = fields
        .entry(field.to_string())
        .or_insert_with(|| Value::Object(Map::new()));
    if !slot.is_object() {
        *slot = Value::Object(Map::new());
    }
    let Some(localized) = slot.as_object_mut() else {
        return;
    };
    match localized.get_mut(locale) {
        Some(Value::Array(links)) if !links.is_empty() => links.push(link),
        _ => {
            localized.insert(locale.to_string(), Value::Array(vec![link]));
        }
    }
}

/// `<entryId>.<ext>` with the extension taken from the MIME type, then the URL.
#[must_use]
pub fn asset_file_name(entry_id: &str, content_type: &str, upload_url: &str) -> String {
    let extension = extension_for_mime(content_type)
        .or_else(|| url_extension(upload_url))
        .unwrap_or_else(|| FALLBACK_EXTENSION.to_string());
    format!("{entry_id}.{extension}")
}

/// MIME type from the record, else inferred from the URL, else the default.
fn resolve_content_type(
    record: &NormalizedRecord,
    mapping: &MappingConfig,
    upload_url: &str,
    default: &str,
) -> String {
    record
        .str_value(&mapping.asset_labels.content_type)
        .map(str::to_string)
        .or_else(|| url_extension(upload_url).and_then(|ext| mime_for_extension(&ext)))
        .unwrap_or_else(|| default.to_string())
}

fn extension_for_mime(content_type: &str) -> Option<String> {
    let essence = content_type.split(';').next()?.trim().to_ascii_lowercase();
    KNOWN_TYPES
        .iter()
        .find(|(_, mime)| *mime == essence)
        .map(|(ext, _)| (*ext).to_string())
}

fn mime_for_extension(extension: &str) -> Option<String> {
    KNOWN_TYPES
        .iter()
        .find(|(ext, _)| *ext == extension)
        .map(|(_, mime)| (*mime).to_string())
}

/// Lowercased extension of the URL's last path segment, ignoring query and fragment.
///
/// The scheme and authority are never treated as a path, so a bare host has none.
fn url_extension(url: &str) -> Option<String> {
    let target = url.split(['?', '#']).next()?;
    let path = match target.split_once("//") {
        Some((_, rest)) => rest.split_once('/').map_or("", |(_, path)| path),
        None => target,
    };
    let last = path.rsplit('/').next()?;
    let (_, ext) = last.rsplit_once('.')?;
    let valid = (1..=5).contains(&ext.len()) && ext.chars().all(|c| c.is_ascii_alphanumeric());
    valid.then(|| ext.to_ascii_lowercase())
}

/// Process the asset's file for every locale it carries, then wait until each
/// has a served URL.
async fn process_for_all_locales(
    api: &dyn ManagementApi,
    asset: Asset,
    settings: &ImportSettings,
) -> Result<Asset, ImportError> {
    let mut locales = asset.file_locales();
    if locales.is_empty() {
        locales.push(settings.locale_code.clone());
    }

    for locale in &locales {
        timed(settings, Step::ProcessAsset, api.process_asset(&asset, locale)).await?;
    }

    for attempt in 1..=settings.poll_attempts {
        let current = timed(settings, Step::FetchAsset, api.get_asset(&asset.sys.id)).await?;
        if locales.iter().all(|locale| current.is_processed(locale)) {
            tracing::debug!(asset = %current.sys.id, attempt, "asset processed");
            return Ok(current);
        }
        if attempt < settings.poll_attempts {
            tokio::time::sleep(settings.poll_interval).await;
        }
    }

    Err(ImportError::AssetNotProcessed {
        asset_id: asset.sys.id,
        attempts: settings.poll_attempts,
    })
}

/// Run one remote call under the per-call timeout.
async fn timed<T, F>(settings: &ImportSettings, step: Step, call: F) -> Result<T, ImportError>
where
    F: Future<Output = Result<T, PlatformError>>,
{
    match tokio::time::timeout(settings.call_timeout, call).await {
        Ok(result) => result.map_err(|source| ImportError::Platform { step, source }),
        Err(_) => Err(ImportError::Timeout {
            step,
            limit: settings.call_timeout,
        }),
    }
}
