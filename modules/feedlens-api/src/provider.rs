// InferenceProvider: the two model calls the analyzer depends on.
//
// Production wires HfInferenceClient; tests swap in a counting mock so the
// router can be exercised without the network.

use async_trait::async_trait;
use hf_inference_client::{HfInferenceClient, LabelScore, Result};

#[async_trait]
pub trait InferenceProvider: Send + Sync {
    /// Emotion labels for `text`, as scored by the sentiment model.
    async fn emotions(&self, text: &str) -> Result<Vec<LabelScore>>;

    /// Zero-shot topic scores for `text` over `candidate_labels`.
    async fn topics(&self, text: &str, candidate_labels: &[&str]) -> Result<Vec<LabelScore>>;
}

#[async_trait]
impl InferenceProvider for HfInferenceClient {
    async fn emotions(&self, text: &str) -> Result<Vec<LabelScore>> {
        self.classify(text).await
    }

    async fn topics(&self, text: &str, candidate_labels: &[&str]) -> Result<Vec<LabelScore>> {
        self.zero_shot(text, candidate_labels).await
    }
}
