//! Entry create, update and publish calls.

use serde_json::{Map, Value, json};

use crate::error::PlatformError;
use crate::http::{CONTENT_TYPE, CONTENT_TYPE_ID_HEADER, VERSION_HEADER, check_response, read_json};
use crate::models::Entry;
use crate::Environment;

impl Environment {
    pub(crate) async fn post_entry(
        &self,
        content_type_id: &str,
        fields: Map<String, Value>,
    ) -> Result<Entry, PlatformError> {
        let resp = self
            .http
            .post(self.env_url("entries"))
            .header(CONTENT_TYPE_ID_HEADER, content_type_id)
            .header(reqwest::header::CONTENT_TYPE, CONTENT_TYPE)
            .json(&json!({ "fields": fields }))
            .send()
            .await?;
        let entry: Entry = read_json(check_response(resp, "POST").await?).await?;
        tracing::debug!(entry = %entry.sys.id, "entry created");
        Ok(entry)
    }

    pub(crate) async fn put_entry(&self, entry: &Entry) -> Result<Entry, PlatformError> {
        let resp = self
            .http
            .put(self.entry_url(&entry.sys.id))
            .header(VERSION_HEADER, entry.sys.version)
            .header(reqwest::header::CONTENT_TYPE, CONTENT_TYPE)
            .json(&json!({ "fields": entry.fields }))
            .send()
            .await?;
        read_json(check_response(resp, "PUT").await?).await
    }

    pub(crate) async fn put_entry_published(&self, entry: &Entry) -> Result<Entry, PlatformError> {
        let resp = self
            .http
            .put(format!("{}/published", self.entry_url(&entry.sys.id)))
            .header(VERSION_HEADER, entry.sys.version)
            .send()
            .await?;
        let published: Entry = read_json(check_response(resp, "PUT").await?).await?;
        tracing::debug!(entry = %published.sys.id, "entry published");
        Ok(published)
    }

    fn entry_url(&self, entry_id: &str) -> String {
        self.env_url(&format!("entries/{}", urlencoding::encode(entry_id)))
    }
}
