//! Confirm the import target exists before any record is touched.

use crate::api::ManagementApi;
use crate::error::PlatformError;

/// Target identifiers resolved against the platform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedTarget {
    /// Platform-native code of the requested locale (e.g., `en-US`).
    pub locale_code: String,
    pub content_type_id: String,
    pub content_type_name: String,
}

/// Resolve `locale_id` to its locale code and confirm `content_type_id` exists.
///
/// The locale is looked up first; its code keys every localized field write.
/// The content type lookup only proves existence.
///
/// # Errors
///
/// Returns the first lookup's [`PlatformError`]. Callers treat this as a
/// run-abort.
pub async fn validate_resources(
    api: &dyn ManagementApi,
    content_type_id: &str,
    locale_id: &str,
) -> Result<ResolvedTarget, PlatformError> {
    let locale = api.get_locale(locale_id).await?;
    let content_type = api.get_content_type(content_type_id).await?;

    tracing::info!(
        locale = %locale.code,
        content_type = %content_type.sys.id,
        "import target validated"
    );

    Ok(ResolvedTarget {
        locale_code: locale.code,
        content_type_id: content_type.sys.id,
        content_type_name: content_type.name,
    })
}
