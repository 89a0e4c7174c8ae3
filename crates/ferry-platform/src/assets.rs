//! Asset create, process, fetch and publish calls.

use serde_json::{Map, Value, json};

use crate::error::PlatformError;
use crate::http::{CONTENT_TYPE, VERSION_HEADER, check_response, read_json};
use crate::models::Asset;
use crate::Environment;

impl Environment {
    pub(crate) async fn post_asset(&self, fields: Map<String, Value>) -> Result<Asset, PlatformError> {
        let resp = self
            .http
            .post(self.env_url("assets"))
            .header(reqwest::header::CONTENT_TYPE, CONTENT_TYPE)
            .json(&json!({ "fields": fields }))
            .send()
            .await?;
        let asset: Asset = read_json(check_response(resp, "POST").await?).await?;
        tracing::debug!(asset = %asset.sys.id, "asset created");
        Ok(asset)
    }

    pub(crate) async fn put_asset_process(
        &self,
        asset: &Asset,
        locale: &str,
    ) -> Result<(), PlatformError> {
        let url = format!(
            "{}/files/{}/process",
            self.asset_url(&asset.sys.id),
            urlencoding::encode(locale)
        );
        let resp = self
            .http
            .put(&url)
            .header(VERSION_HEADER, asset.sys.version)
            .send()
            .await?;
        check_response(resp, "PUT").await?;
        Ok(())
    }

    pub(crate) async fn fetch_asset(&self, asset_id: &str) -> Result<Asset, PlatformError> {
        let resp = self.http.get(self.asset_url(asset_id)).send().await?;
        read_json(check_response(resp, "GET").await?).await
    }

    pub(crate) async fn put_asset_published(&self, asset: &Asset) -> Result<Asset, PlatformError> {
        let resp = self
            .http
            .put(format!("{}/published", self.asset_url(&asset.sys.id)))
            .header(VERSION_HEADER, asset.sys.version)
            .send()
            .await?;
        let published: Asset = read_json(check_response(resp, "PUT").await?).await?;
        tracing::debug!(asset = %published.sys.id, "asset published");
        Ok(published)
    }

    fn asset_url(&self, asset_id: &str) -> String {
        self.env_url(&format!("assets/{}", urlencoding::encode(asset_id)))
    }
}
