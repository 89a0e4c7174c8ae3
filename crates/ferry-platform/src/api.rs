//! The environment-scoped management API seam.
//!
//! Import orchestration only talks to [`ManagementApi`], so runs can be driven
//! against the live [`Environment`] client or an in-memory double.

use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::error::PlatformError;
use crate::models::{Asset, ContentType, Entry, Locale};
use crate::Environment;

/// Management calls available once a space and environment are resolved.
///
/// Implementations must be safe to share across concurrently running record
/// imports.
#[async_trait]
pub trait ManagementApi: Send + Sync {
    async fn get_locale(&self, locale_id: &str) -> Result<Locale, PlatformError>;

    async fn get_content_type(&self, content_type_id: &str) -> Result<ContentType, PlatformError>;

    async fn create_entry(
        &self,
        content_type_id: &str,
        fields: Map<String, Value>,
    ) -> Result<Entry, PlatformError>;

    /// Persist `entry.fields`, guarded by `entry.sys.version`.
    async fn update_entry(&self, entry: &Entry) -> Result<Entry, PlatformError>;

    async fn publish_entry(&self, entry: &Entry) -> Result<Entry, PlatformError>;

    async fn create_asset(&self, fields: Map<String, Value>) -> Result<Asset, PlatformError>;

    /// Ask the platform to process the uploaded file for one locale.
    async fn process_asset(&self, asset: &Asset, locale: &str) -> Result<(), PlatformError>;

    async fn get_asset(&self, asset_id: &str) -> Result<Asset, PlatformError>;

    async fn publish_asset(&self, asset: &Asset) -> Result<Asset, PlatformError>;
}

#[async_trait]
impl ManagementApi for Environment {
    async fn get_locale(&self, locale_id: &str) -> Result<Locale, PlatformError> {
        self.fetch_locale(locale_id).await
    }

    async fn get_content_type(&self, content_type_id: &str) -> Result<ContentType, PlatformError> {
        self.fetch_content_type(content_type_id).await
    }

    async fn create_entry(
        &self,
        content_type_id: &str,
        fields: Map<String, Value>,
    ) -> Result<Entry, PlatformError> {
        self.post_entry(content_type_id, fields).await
    }

    async fn update_entry(&self, entry: &Entry) -> Result<Entry, PlatformError> {
        self.put_entry(entry).await
    }

    async fn publish_entry(&self, entry: &Entry) -> Result<Entry, PlatformError> {
        self.put_entry_published(entry).await
    }

    async fn create_asset(&self, fields: Map<String, Value>) -> Result<Asset, PlatformError> {
        self.post_asset(fields).await
    }

    async fn process_asset(&self, asset: &Asset, locale: &str) -> Result<(), PlatformError> {
        self.put_asset_process(asset, locale).await
    }

    async fn get_asset(&self, asset_id: &str) -> Result<Asset, PlatformError> {
        self.fetch_asset(asset_id).await
    }

    async fn publish_asset(&self, asset: &Asset) -> Result<Asset, PlatformError> {
        self.put_asset_published(asset).await
    }
}
