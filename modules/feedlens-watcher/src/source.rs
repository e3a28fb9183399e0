use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use sha2::{Digest, Sha256};

use crate::error::{Result, WatcherError};

/// Produces the current rendering of the feed as HTML.
#[async_trait]
pub trait FeedSource: Send + Sync {
    async fn snapshot(&self) -> Result<String>;

    /// Base for resolving relative permalinks, when the page has one.
    fn base_url(&self) -> Option<&str> {
        None
    }
}

#[async_trait]
impl<S: FeedSource + ?Sized> FeedSource for Arc<S> {
    async fn snapshot(&self) -> Result<String> {
        (**self).snapshot().await
    }

    fn base_url(&self) -> Option<&str> {
        (**self).base_url()
    }
}

/// Content hash used to tell whether the document changed between polls.
pub fn fingerprint(html: &str) -> String {
    hex::encode(Sha256::digest(html.as_bytes()))
}

// ---------------------------------------------------------------------------
// FileSource
// ---------------------------------------------------------------------------

/// A page saved to disk, re-read on every snapshot.
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl FeedSource for FileSource {
    async fn snapshot(&self) -> Result<String> {
        Ok(tokio::fs::read_to_string(&self.path).await?)
    }
}

// ---------------------------------------------------------------------------
// BrowserlessSource
// ---------------------------------------------------------------------------

/// Fully rendered page HTML from a Browserless `/content` endpoint.
pub struct BrowserlessSource {
    client: reqwest::Client,
    endpoint: String,
    page_url: String,
    token: Option<String>,
}

impl BrowserlessSource {
    pub fn new(endpoint: &str, page_url: &str, token: Option<&str>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self {
            client,
            endpoint: endpoint.trim_end_matches('/').to_string(),
            page_url: page_url.to_string(),
            token: token.map(String::from),
        })
    }
}

#[async_trait]
impl FeedSource for BrowserlessSource {
    async fn snapshot(&self) -> Result<String> {
        let mut req = self
            .client
            .post(format!("{}/content", self.endpoint))
            .json(&serde_json::json!({ "url": self.page_url }));
        if let Some(ref token) = self.token {
            req = req.query(&[("token", token)]);
        }

        let resp = req.send().await?;

        let status = resp.status();
        if !status.is_success() {
            let message = resp.text().await.unwrap_or_default();
            return Err(WatcherError::Source(format!(
                "Browserless returned {status}: {message}"
            )));
        }

        Ok(resp.text().await?)
    }

    fn base_url(&self) -> Option<&str> {
        Some(&self.page_url)
    }
}

// ---------------------------------------------------------------------------
// MemorySource
// ---------------------------------------------------------------------------

/// HTML pushed in by an embedder, e.g. a bridge that serializes the live
/// document whenever it mutates.
#[derive(Default)]
pub struct MemorySource {
    html: Mutex<String>,
    base_url: Option<String>,
}

impl MemorySource {
    pub fn new(html: impl Into<String>) -> Self {
        Self {
            html: Mutex::new(html.into()),
            base_url: None,
        }
    }

    pub fn with_base_url(mut self, url: &str) -> Self {
        self.base_url = Some(url.to_string());
        self
    }

    pub fn set(&self, html: impl Into<String>) {
        *self.html.lock().unwrap_or_else(|e| e.into_inner()) = html.into();
    }
}

#[async_trait]
impl FeedSource for MemorySource {
    async fn snapshot(&self) -> Result<String> {
        Ok(self.html.lock().unwrap_or_else(|e| e.into_inner()).clone())
    }

    fn base_url(&self) -> Option<&str> {
        self.base_url.as_deref()
    }
}
