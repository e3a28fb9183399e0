use async_trait::async_trait;

use feedlens_common::{AnalysisResult, AnalyzeRequest, AnalyzeResponse};

use crate::error::{Result, WatcherError};

/// The watcher's view of the analysis proxy.
#[async_trait]
pub trait AnalysisClient: Send + Sync {
    async fn analyze(&self, text: &str) -> Result<AnalysisResult>;
}

/// Calls `POST /analyze` on the analysis proxy.
pub struct ProxyClient {
    client: reqwest::Client,
    analyze_url: String,
}

impl ProxyClient {
    pub fn new(analyze_url: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            analyze_url: analyze_url.to_string(),
        }
    }
}

#[async_trait]
impl AnalysisClient for ProxyClient {
    /// Any non-success status is an error; a body missing either the emotion
    /// or the topic section is a parse error.
    async fn analyze(&self, text: &str) -> Result<AnalysisResult> {
        let resp = self
            .client
            .post(&self.analyze_url)
            .json(&AnalyzeRequest::new(text))
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let message = resp.text().await.unwrap_or_default();
            return Err(WatcherError::Status {
                status: status.as_u16(),
                message,
            });
        }

        let body = resp.text().await?;
        let parsed: AnalyzeResponse = serde_json::from_str(&body)?;
        Ok(parsed.into())
    }
}
