//! Raw record retrieval from a REST endpoint or a local JSON file.
//!
//! Both modes expect a JSON document with a top-level `data` array.

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

use ferry_config::SourceConfig;
use serde_json::Value;

use crate::error::SourceError;

/// Where raw external records come from. Exactly one mode per run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    Url {
        url: String,
        headers: BTreeMap<String, String>,
    },
    File {
        path: PathBuf,
    },
}

impl Source {
    /// Select the source mode from configuration.
    ///
    /// File paths resolve relative to `config.config_dir`.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::Ambiguous`] when both a URL and a file are set,
    /// and [`SourceError::Missing`] when neither is.
    pub fn from_config(config: &SourceConfig) -> Result<Self, SourceError> {
        match (config.has_url(), config.has_file()) {
            (true, true) => Err(SourceError::Ambiguous {
                url: config.url.clone(),
                file: config.file.clone(),
            }),
            (false, false) => Err(SourceError::Missing),
            (true, false) => Ok(Self::Url {
                url: config.url.clone(),
                headers: config.headers.clone(),
            }),
            (false, true) => Ok(Self::File {
                path: Path::new(&config.config_dir).join(&config.file),
            }),
        }
    }

    /// Fetch and unwrap the `data` array.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError`] if the request or file read fails, the body is
    /// not JSON, or `data` is missing or not an array.
    pub async fn read(&self, http: &reqwest::Client) -> Result<Vec<Value>, SourceError> {
        let records = match self {
            Self::Url { url, headers } => read_url(http, url, headers).await?,
            Self::File { path } => read_file(path).await?,
        };
        tracing::info!(source = %self, records = records.len(), "source records read");
        Ok(records)
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Url { url, .. } => write!(f, "url:{url}"),
            Self::File { path } => write!(f, "file:{}", path.display()),
        }
    }
}

async fn read_url(
    http: &reqwest::Client,
    url: &str,
    headers: &BTreeMap<String, String>,
) -> Result<Vec<Value>, SourceError> {
    let mut request = http.get(url);
    for (name, value) in headers {
        request = request.header(name.as_str(), value.as_str());
    }

    let resp = request.send().await?;
    if !resp.status().is_success() {
        return Err(SourceError::Status {
            url: url.to_string(),
            status: resp.status().as_u16(),
        });
    }

    let bytes = resp.bytes().await?;
    let document = serde_json::from_slice(&bytes).map_err(|source| SourceError::Json {
        origin: url.to_string(),
        source,
    })?;
    extract_data(document, url)
}

async fn read_file(path: &Path) -> Result<Vec<Value>, SourceError> {
    let text = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| SourceError::Io {
            path: path.to_path_buf(),
            source,
        })?;
    let origin = path.display().to_string();
    let document = serde_json::from_str(&text).map_err(|source| SourceError::Json {
        origin: origin.clone(),
        source,
    })?;
    extract_data(document, &origin)
}

/// Take the `data` array out of a source document.
fn extract_data(document: Value, origin: &str) -> Result<Vec<Value>, SourceError> {
    let Value::Object(mut root) = document else {
        return Err(SourceError::Shape {
            origin: origin.to_string(),
            reason: "top-level JSON value is not an object".into(),
        });
    };
    match root.remove("data") {
        Some(Value::Array(records)) => Ok(records),
        Some(_) => Err(SourceError::Shape {
            origin: origin.to_string(),
            reason: "`data` is not an array".into(),
        }),
        None => Err(SourceError::Shape {
            origin: origin.to_string(),
            reason: "missing `data` property".into(),
        }),
    }
}
