use std::collections::HashMap;
use std::sync::Mutex;

use feedlens_common::AnalysisResult;

use crate::key::PostKey;

/// Topic tags shown per post.
pub const MAX_TOPIC_TAGS: usize = 2;

pub const LOADING_TEXT: &str = "Analyzing...";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagKind {
    Emotion,
    Topic,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    pub kind: TagKind,
    pub label: String,
}

impl Tag {
    /// Style classes: emotion tags also carry their label as a class.
    pub fn class_name(&self) -> String {
        match self.kind {
            TagKind::Emotion => format!("sentiment-tag emotion {}", self.label),
            TagKind::Topic => "sentiment-tag topic".to_string(),
        }
    }
}

/// The emotion tag followed by up to `MAX_TOPIC_TAGS` topic tags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagSet {
    pub tags: Vec<Tag>,
}

impl TagSet {
    pub fn from_result(result: &AnalysisResult) -> Self {
        let emotion = Tag {
            kind: TagKind::Emotion,
            label: result.emotion.clone(),
        };
        let topics = result.topics.iter().take(MAX_TOPIC_TAGS).map(|t| Tag {
            kind: TagKind::Topic,
            label: t.clone(),
        });

        Self {
            tags: std::iter::once(emotion).chain(topics).collect(),
        }
    }

    pub fn labels(&self) -> Vec<&str> {
        self.tags.iter().map(|t| t.label.as_str()).collect()
    }

    /// Markup for hosts that inject the tags into a page.
    pub fn to_html(&self) -> String {
        let spans: String = self
            .tags
            .iter()
            .map(|t| {
                format!(
                    r#"<span class="{}">{}</span>"#,
                    escape(&t.class_name()),
                    escape(&t.label)
                )
            })
            .collect();
        format!(r#"<div class="sentiment-tags">{spans}</div>"#)
    }
}

/// Markup for the transient loading state.
pub fn loading_html() -> String {
    format!(r#"<div class="sentiment-tags"><span class="sentiment-loading">{LOADING_TEXT}</span></div>"#)
}

fn escape(raw: &str) -> String {
    raw.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

// ---------------------------------------------------------------------------
// Annotator: the produced document surface
// ---------------------------------------------------------------------------

pub trait Annotator: Send + Sync {
    fn show_loading(&self, key: &PostKey);
    fn clear_loading(&self, key: &PostKey);
    fn render_tags(&self, key: &PostKey, tags: &TagSet);
}

/// Logs every annotation instead of drawing it.
pub struct TracingAnnotator;

impl Annotator for TracingAnnotator {
    fn show_loading(&self, key: &PostKey) {
        tracing::debug!(%key, "Showing loading indicator");
    }

    fn clear_loading(&self, key: &PostKey) {
        tracing::debug!(%key, "Loading cleared");
    }

    fn render_tags(&self, key: &PostKey, tags: &TagSet) {
        tracing::info!(%key, tags = ?tags.labels(), "Post annotated");
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Annotation {
    pub loading: bool,
    pub tags: Option<TagSet>,
}

/// Keeps annotations in memory, keyed by post.
#[derive(Debug, Default)]
pub struct RecordingAnnotator {
    annotations: Mutex<HashMap<PostKey, Annotation>>,
}

impl RecordingAnnotator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &PostKey) -> Option<Annotation> {
        self.lock().get(key).cloned()
    }

    pub fn is_loading(&self, key: &PostKey) -> bool {
        self.get(key).is_some_and(|a| a.loading)
    }

    pub fn tags(&self, key: &PostKey) -> Option<TagSet> {
        self.get(key).and_then(|a| a.tags)
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<PostKey, Annotation>> {
        self.annotations.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Annotator for RecordingAnnotator {
    fn show_loading(&self, key: &PostKey) {
        self.lock().entry(key.clone()).or_default().loading = true;
    }

    fn clear_loading(&self, key: &PostKey) {
        if let Some(annotation) = self.lock().get_mut(key) {
            annotation.loading = false;
        }
    }

    fn render_tags(&self, key: &PostKey, tags: &TagSet) {
        self.lock().entry(key.clone()).or_default().tags = Some(tags.clone());
    }
}
