use serde::{Deserialize, Serialize};

// --- Topic classification ---

/// Zero-shot candidates sent with every topic request.
pub const CANDIDATE_LABELS: [&str; 19] = [
    "politics",
    "technology",
    "sports",
    "finance",
    "entertainment",
    "education",
    "science",
    "relationships",
    "crime",
    "mental health",
    "insult",
    "racism",
    "humor",
    "motivation",
    "violence",
    "social issues",
    "religion",
    "personal life",
    "news",
];

/// Topics returned per analysis.
pub const MAX_TOPICS: usize = 3;

/// Emotion reported when the sentiment model returns no labels.
pub const NEUTRAL_EMOTION: &str = "neutral";

// --- Analysis result ---

/// Normalized outcome of analyzing one text.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisResult {
    /// Dominant emotion, lower-cased.
    pub emotion: String,
    /// At most `MAX_TOPICS` labels, highest confidence first.
    pub topics: Vec<String>,
}

// --- /analyze wire contract ---

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalyzeRequest {
    #[serde(default)]
    pub text: Option<String>,
}

impl AnalyzeRequest {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyzeResponse {
    pub emotion: EmotionView,
    pub topic: TopicView,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmotionView {
    pub sentiment: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopicView {
    pub labels: Vec<String>,
}

impl From<AnalysisResult> for AnalyzeResponse {
    fn from(result: AnalysisResult) -> Self {
        Self {
            emotion: EmotionView {
                sentiment: result.emotion,
            },
            topic: TopicView {
                labels: result.topics,
            },
        }
    }
}

impl From<AnalyzeResponse> for AnalysisResult {
    fn from(resp: AnalyzeResponse) -> Self {
        Self {
            emotion: resp.emotion.sentiment,
            topics: resp.topic.labels,
        }
    }
}

/// Error payload for 4xx/5xx responses from `/analyze`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}
