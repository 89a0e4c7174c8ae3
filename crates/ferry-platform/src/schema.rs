//! Locale and content type lookups.

use crate::error::PlatformError;
use crate::http::{check_response, read_json};
use crate::models::{ContentType, Locale};
use crate::Environment;

impl Environment {
    pub(crate) async fn fetch_locale(&self, locale_id: &str) -> Result<Locale, PlatformError> {
        let url = self.env_url(&format!("locales/{}", urlencoding::encode(locale_id)));
        let resp = check_response(self.http.get(&url).send().await?, "GET").await?;
        read_json(resp).await
    }

    pub(crate) async fn fetch_content_type(
        &self,
        content_type_id: &str,
    ) -> Result<ContentType, PlatformError> {
        let url = self.env_url(&format!(
            "content_types/{}",
            urlencoding::encode(content_type_id)
        ));
        let resp = check_response(self.http.get(&url).send().await?, "GET").await?;
        read_json(resp).await
    }
}
