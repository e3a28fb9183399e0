//! Discovery, dedup and rendering behaviour of FeedWatcher with a mock proxy.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::Semaphore;

use feedlens_common::AnalysisResult;
use feedlens_watcher::{
    AnalysisClient, FeedWatcher, HtmlSnapshot, PostKey, RecordingAnnotator, Result, WatcherError,
};

/// Records every text it is asked about. Each call waits for a permit on
/// `gate`, so tests decide when responses arrive.
struct MockClient {
    calls: Mutex<Vec<String>>,
    gate: Semaphore,
    fail: bool,
}

impl MockClient {
    fn open() -> Arc<Self> {
        Arc::new(Self {
            calls: Mutex::new(Vec::new()),
            gate: Semaphore::new(Semaphore::MAX_PERMITS),
            fail: false,
        })
    }

    fn gated() -> Arc<Self> {
        Arc::new(Self {
            calls: Mutex::new(Vec::new()),
            gate: Semaphore::new(0),
            fail: false,
        })
    }

    fn failing() -> Arc<Self> {
        Arc::new(Self {
            calls: Mutex::new(Vec::new()),
            gate: Semaphore::new(Semaphore::MAX_PERMITS),
            fail: true,
        })
    }

    fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn release(&self, n: usize) {
        self.gate.add_permits(n);
    }
}

#[async_trait]
impl AnalysisClient for MockClient {
    async fn analyze(&self, text: &str) -> Result<AnalysisResult> {
        self.calls.lock().unwrap().push(text.to_string());
        self.gate.acquire().await.unwrap().forget();
        if self.fail {
            return Err(WatcherError::Status {
                status: 500,
                message: r#"{"error":"Analysis failed"}"#.to_string(),
            });
        }
        Ok(AnalysisResult {
            emotion: "joy".to_string(),
            topics: vec!["sports".to_string(), "news".to_string(), "humor".to_string()],
        })
    }
}

fn feed(posts: &[(&str, Option<&str>)]) -> HtmlSnapshot {
    let articles: String = posts
        .iter()
        .map(|(id, text)| {
            let text_el = text
                .map(|t| format!(r#"<div data-testid="tweetText">{t}</div>"#))
                .unwrap_or_default();
            format!(r#"<article data-testid="tweet" data-tweet-id="{id}">{text_el}</article>"#)
        })
        .collect();
    HtmlSnapshot::parse(&format!("<html><body>{articles}</body></html>"))
}

fn key(id: &str) -> PostKey {
    PostKey::Id(id.to_string())
}

async fn finish(handles: Vec<tokio::task::JoinHandle<()>>) {
    for handle in handles {
        handle.await.unwrap();
    }
}

#[tokio::test]
async fn annotates_post_with_emotion_and_two_topics() {
    let client = MockClient::open();
    let annotator = Arc::new(RecordingAnnotator::new());
    let watcher = FeedWatcher::new(client.clone(), annotator.clone());

    finish(watcher.discover(&feed(&[("1", Some("  great match tonight  "))]))).await;

    assert_eq!(client.calls(), vec!["great match tonight"]);
    let tags = annotator.tags(&key("1")).expect("tags rendered");
    assert_eq!(tags.labels(), vec!["joy", "sports", "news"]);
    assert!(!annotator.is_loading(&key("1")));
}

#[tokio::test]
async fn same_key_in_overlapping_scans_requests_once() {
    let client = MockClient::gated();
    let annotator = Arc::new(RecordingAnnotator::new());
    let watcher = FeedWatcher::new(client.clone(), annotator.clone());
    let doc = feed(&[("1", Some("hello"))]);

    let first = watcher.discover(&doc);
    let second = watcher.discover(&doc);

    assert_eq!(first.len(), 1);
    assert!(second.is_empty());
    assert!(annotator.is_loading(&key("1")));

    client.release(1);
    finish(first).await;

    assert_eq!(client.calls().len(), 1);
    assert!(!annotator.is_loading(&key("1")));
    assert!(annotator.tags(&key("1")).is_some());
}

#[tokio::test]
async fn annotated_post_is_not_requested_again() {
    let client = MockClient::open();
    let watcher = FeedWatcher::new(client.clone(), Arc::new(RecordingAnnotator::new()));
    let doc = feed(&[("1", Some("hello"))]);

    finish(watcher.discover(&doc)).await;
    finish(watcher.discover(&doc)).await;

    assert_eq!(client.calls().len(), 1);
}

#[tokio::test]
async fn post_without_text_is_retried_next_scan() {
    let client = MockClient::open();
    let annotator = Arc::new(RecordingAnnotator::new());
    let watcher = FeedWatcher::new(client.clone(), annotator.clone());

    let started = watcher.discover(&feed(&[("1", None)]));
    assert!(started.is_empty());
    assert!(!watcher.is_tracked(&key("1")));
    assert!(client.calls().is_empty());
    assert!(annotator.get(&key("1")).is_none());

    finish(watcher.discover(&feed(&[("1", Some("now with text"))]))).await;
    assert_eq!(client.calls(), vec!["now with text"]);
}

#[tokio::test]
async fn whitespace_only_text_counts_as_missing() {
    let client = MockClient::open();
    let watcher = FeedWatcher::new(client.clone(), Arc::new(RecordingAnnotator::new()));

    assert!(watcher.discover(&feed(&[("1", Some("   "))])).is_empty());
    assert!(!watcher.is_tracked(&key("1")));
}

#[tokio::test]
async fn failed_analysis_leaves_no_tags_and_no_loading() {
    let client = MockClient::failing();
    let annotator = Arc::new(RecordingAnnotator::new());
    let watcher = FeedWatcher::new(client.clone(), annotator.clone());
    let doc = feed(&[("1", Some("hello"))]);

    finish(watcher.discover(&doc)).await;

    assert!(annotator.tags(&key("1")).is_none());
    assert!(!annotator.is_loading(&key("1")));

    // No retry while the post stays in the document.
    finish(watcher.discover(&doc)).await;
    assert_eq!(client.calls().len(), 1);
}

#[tokio::test]
async fn finished_posts_leaving_the_document_are_forgotten() {
    let client = MockClient::open();
    let watcher = FeedWatcher::new(client.clone(), Arc::new(RecordingAnnotator::new()));

    finish(watcher.discover(&feed(&[("1", Some("one")), ("2", Some("two"))]))).await;
    assert_eq!(watcher.tracked(), 2);

    finish(watcher.discover(&feed(&[("2", Some("two"))]))).await;
    assert_eq!(watcher.tracked(), 1);
    assert!(!watcher.is_tracked(&key("1")));

    // Rendered again after removal: its tags went with the old element.
    finish(watcher.discover(&feed(&[("1", Some("one")), ("2", Some("two"))]))).await;
    let calls = client.calls();
    assert_eq!(calls.len(), 3);
    assert_eq!(calls[2], "one");
}

#[tokio::test]
async fn pending_posts_survive_removal() {
    let client = MockClient::gated();
    let watcher = FeedWatcher::new(client.clone(), Arc::new(RecordingAnnotator::new()));

    let started = watcher.discover(&feed(&[("1", Some("one"))]));
    assert!(watcher.discover(&feed(&[])).is_empty());
    assert!(watcher.is_tracked(&key("1")));

    assert!(watcher.discover(&feed(&[("1", Some("one"))])).is_empty());

    client.release(1);
    finish(started).await;
    assert_eq!(client.calls().len(), 1);
}

#[tokio::test]
async fn posts_without_identity_are_analyzed_every_scan() {
    let client = MockClient::open();
    let watcher = FeedWatcher::new(client.clone(), Arc::new(RecordingAnnotator::new()));
    let doc = HtmlSnapshot::parse(
        r#"<article data-testid="tweet"><div data-testid="tweetText">anon</div></article>"#,
    );

    finish(watcher.discover(&doc)).await;
    finish(watcher.discover(&doc)).await;

    assert_eq!(client.calls(), vec!["anon", "anon"]);
}
