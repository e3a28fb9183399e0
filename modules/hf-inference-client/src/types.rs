use serde::{Deserialize, Serialize};

// --- Requests ---

/// Body for text-classification models.
#[derive(Debug, Clone, Serialize)]
pub struct ClassificationInput<'a> {
    pub inputs: &'a str,
}

/// Body for zero-shot classification models.
#[derive(Debug, Clone, Serialize)]
pub struct ZeroShotInput<'a> {
    pub inputs: &'a str,
    pub parameters: ZeroShotParameters<'a>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ZeroShotParameters<'a> {
    pub candidate_labels: &'a [&'a str],
}

// --- Responses ---

/// A single `{label, score}` pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelScore {
    pub label: String,
    pub score: f64,
}

/// Text-classification output. Depending on the router version the ranked
/// list arrives flat or wrapped in a one-element batch.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ClassificationResponse {
    Nested(Vec<Vec<LabelScore>>),
    Flat(Vec<LabelScore>),
}

impl ClassificationResponse {
    /// Unwrap one level of batching and rank by score, highest first.
    pub fn into_ranked(self) -> Vec<LabelScore> {
        let scores = match self {
            ClassificationResponse::Nested(batches) => {
                batches.into_iter().next().unwrap_or_default()
            }
            ClassificationResponse::Flat(scores) => scores,
        };
        rank(scores)
    }
}

/// Zero-shot output. Newer router versions return `{label, score}` pairs,
/// older ones parallel `labels` / `scores` arrays (plus the echoed sequence).
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ZeroShotResponse {
    Pairs(Vec<LabelScore>),
    Parallel {
        labels: Vec<String>,
        scores: Vec<f64>,
    },
}

impl ZeroShotResponse {
    /// Collapse either shape into one ranked list, highest first.
    /// Parallel arrays of unequal length are paired up to the shorter one.
    pub fn into_ranked(self) -> Vec<LabelScore> {
        let pairs = match self {
            ZeroShotResponse::Pairs(pairs) => pairs,
            ZeroShotResponse::Parallel { labels, scores } => labels
                .into_iter()
                .zip(scores)
                .map(|(label, score)| LabelScore { label, score })
                .collect(),
        };
        rank(pairs)
    }
}

/// Stable descending sort: equal scores keep the provider's order.
pub fn rank(mut scores: Vec<LabelScore>) -> Vec<LabelScore> {
    scores.sort_by(|a, b| b.score.total_cmp(&a.score));
    scores
}
