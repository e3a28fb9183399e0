use std::sync::Arc;

use feedlens_common::{AnalysisResult, CANDIDATE_LABELS, MAX_TOPICS, NEUTRAL_EMOTION};
use hf_inference_client::{types::rank, LabelScore};
use tracing::debug;

use crate::error::ApiError;
use crate::provider::InferenceProvider;

/// Runs both models over a text and folds their output into an `AnalysisResult`.
#[derive(Clone)]
pub struct Analyzer {
    provider: Arc<dyn InferenceProvider>,
}

impl Analyzer {
    pub fn new(provider: Arc<dyn InferenceProvider>) -> Self {
        Self { provider }
    }

    /// Empty text is rejected before either model is called. The two model
    /// calls are independent and run concurrently; the first failure wins.
    pub async fn analyze(&self, text: &str) -> Result<AnalysisResult, ApiError> {
        if text.is_empty() {
            return Err(ApiError::EmptyText);
        }

        let (emotions, topics) = tokio::try_join!(
            self.provider.emotions(text),
            self.provider.topics(text, &CANDIDATE_LABELS),
        )?;

        debug!(?emotions, ?topics, "Raw model scores");

        Ok(AnalysisResult {
            emotion: dominant_emotion(&emotions),
            topics: top_topics(topics),
        })
    }
}

/// Highest-scoring label, lower-cased. The first of equal scores wins;
/// an empty list is `neutral`.
pub fn dominant_emotion(scores: &[LabelScore]) -> String {
    scores
        .iter()
        .fold(None::<&LabelScore>, |best, item| match best {
            Some(b) if item.score <= b.score => Some(b),
            _ => Some(item),
        })
        .map(|top| top.label.to_lowercase())
        .unwrap_or_else(|| NEUTRAL_EMOTION.to_string())
}

/// Up to `MAX_TOPICS` labels, highest score first.
pub fn top_topics(scores: Vec<LabelScore>) -> Vec<String> {
    rank(scores)
        .into_iter()
        .take(MAX_TOPICS)
        .map(|s| s.label)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use hf_inference_client::{ClassificationResponse, ZeroShotResponse};
    use serde_json::json;

    fn score(label: &str, score: f64) -> LabelScore {
        LabelScore {
            label: label.to_string(),
            score,
        }
    }

    #[test]
    fn nested_sentiment_picks_joy() {
        let resp: ClassificationResponse = serde_json::from_value(json!([[
            {"label": "joy", "score": 0.9},
            {"label": "anger", "score": 0.1}
        ]]))
        .unwrap();
        assert_eq!(dominant_emotion(&resp.into_ranked()), "joy");
    }

    #[test]
    fn empty_sentiment_is_neutral() {
        assert_eq!(dominant_emotion(&[]), "neutral");
    }

    #[test]
    fn emotion_is_lower_cased() {
        assert_eq!(dominant_emotion(&[score("SURPRISE", 0.4)]), "surprise");
    }

    #[test]
    fn emotion_ties_keep_first() {
        let scores = [score("fear", 0.2), score("joy", 0.4), score("anger", 0.4)];
        assert_eq!(dominant_emotion(&scores), "joy");
    }

    #[test]
    fn emotion_does_not_depend_on_input_order() {
        let scores = [score("anger", 0.1), score("sadness", 0.3), score("joy", 0.6)];
        assert_eq!(dominant_emotion(&scores), "joy");
    }

    #[test]
    fn parallel_topics_take_top_three() {
        let resp: ZeroShotResponse = serde_json::from_value(json!({
            "labels": ["a", "b", "c", "d"],
            "scores": [0.1, 0.9, 0.5, 0.2]
        }))
        .unwrap();
        assert_eq!(top_topics(resp.into_ranked()), vec!["b", "c", "d"]);
    }

    #[test]
    fn pair_topics_sorted_descending() {
        let resp: ZeroShotResponse = serde_json::from_value(json!([
            {"label": "x", "score": 0.3},
            {"label": "y", "score": 0.7}
        ]))
        .unwrap();
        assert_eq!(top_topics(resp.into_ranked()), vec!["y", "x"]);
    }

    #[test]
    fn unsorted_topics_are_ranked() {
        let topics = vec![score("news", 0.2), score("humor", 0.8), score("crime", 0.1)];
        assert_eq!(top_topics(topics), vec!["humor", "news", "crime"]);
    }

    #[test]
    fn no_topics_is_empty() {
        assert!(top_topics(Vec::new()).is_empty());
    }
}
