pub mod error;
pub mod types;

pub use error::{HfError, Result};
pub use types::{ClassificationResponse, LabelScore, ZeroShotResponse};

use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Serialize;
use types::{ClassificationInput, ZeroShotInput, ZeroShotParameters};

/// j-hartmann/emotion-english-distilroberta-base on the HF inference router.
pub const SENTIMENT_MODEL_URL: &str =
    "https://router.huggingface.co/hf-inference/models/j-hartmann/emotion-english-distilroberta-base";

/// facebook/bart-large-mnli on the HF inference router.
pub const TOPIC_MODEL_URL: &str =
    "https://router.huggingface.co/hf-inference/models/facebook/bart-large-mnli";

pub struct HfInferenceClient {
    client: reqwest::Client,
    token: Option<String>,
    sentiment_url: String,
    topic_url: String,
}

impl HfInferenceClient {
    pub fn new(token: Option<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            token,
            sentiment_url: SENTIMENT_MODEL_URL.to_string(),
            topic_url: TOPIC_MODEL_URL.to_string(),
        })
    }

    pub fn with_sentiment_url(mut self, url: &str) -> Self {
        self.sentiment_url = url.to_string();
        self
    }

    pub fn with_topic_url(mut self, url: &str) -> Self {
        self.topic_url = url.to_string();
        self
    }

    /// Run the emotion model over `text`. Returns every label, highest score first.
    pub async fn classify(&self, text: &str) -> Result<Vec<LabelScore>> {
        tracing::debug!(url = %self.sentiment_url, "Sending sentiment request");

        let resp: ClassificationResponse = self
            .post(&self.sentiment_url, &ClassificationInput { inputs: text })
            .await?;
        let ranked = resp.into_ranked();

        tracing::debug!(count = ranked.len(), "Sentiment response received");
        Ok(ranked)
    }

    /// Zero-shot classify `text` against `candidate_labels`. Returns every
    /// candidate the model scored, highest first.
    pub async fn zero_shot(
        &self,
        text: &str,
        candidate_labels: &[&str],
    ) -> Result<Vec<LabelScore>> {
        tracing::debug!(
            url = %self.topic_url,
            candidates = candidate_labels.len(),
            "Sending topic classification request"
        );

        let input = ZeroShotInput {
            inputs: text,
            parameters: ZeroShotParameters { candidate_labels },
        };
        let resp: ZeroShotResponse = self.post(&self.topic_url, &input).await?;
        let ranked = resp.into_ranked();

        tracing::debug!(count = ranked.len(), "Topic response received");
        Ok(ranked)
    }

    async fn post<B: Serialize, T: DeserializeOwned>(&self, url: &str, body: &B) -> Result<T> {
        let mut req = self.client.post(url).json(body);
        if let Some(ref token) = self.token {
            req = req.bearer_auth(token);
        }

        let resp = req.send().await?;

        let status = resp.status();
        if !status.is_success() {
            let message = resp.text().await.unwrap_or_default();
            return Err(HfError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body = resp.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}
