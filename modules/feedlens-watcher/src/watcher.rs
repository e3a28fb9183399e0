use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard};

use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::client::AnalysisClient;
use crate::dedup::SeenSet;
use crate::dom::{FeedDocument, PostElement};
use crate::key::PostKey;
use crate::render::{Annotator, TagSet};

/// Discovers posts in a document and runs each through analysis once.
///
/// The seen set is checked and updated synchronously inside `discover`,
/// before any task is spawned, so overlapping scans cannot both request the
/// same key.
pub struct FeedWatcher<C, A> {
    client: Arc<C>,
    annotator: Arc<A>,
    seen: Arc<Mutex<SeenSet>>,
}

impl<C, A> Clone for FeedWatcher<C, A> {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
            annotator: self.annotator.clone(),
            seen: self.seen.clone(),
        }
    }
}

impl<C, A> FeedWatcher<C, A>
where
    C: AnalysisClient + 'static,
    A: Annotator + 'static,
{
    pub fn new(client: Arc<C>, annotator: Arc<A>) -> Self {
        Self {
            client,
            annotator,
            seen: Arc::new(Mutex::new(SeenSet::new())),
        }
    }

    /// Scan every post in `document`. Returns the analyses this scan started.
    pub fn discover<D: FeedDocument>(&self, document: &D) -> Vec<JoinHandle<()>> {
        let posts = document.posts();
        let mut present = HashSet::with_capacity(posts.len());
        let mut started = Vec::new();

        for post in &posts {
            let key = PostKey::derive(post);
            present.insert(key.clone());
            if let Some(handle) = self.process_post(key, post) {
                started.push(handle);
            }
        }

        let evicted = self.seen().evict_absent(&present);
        debug!(
            posts = posts.len(),
            started = started.len(),
            evicted,
            "Scan complete"
        );

        started
    }

    /// Number of keys currently tracked as analyzed or in flight.
    pub fn tracked(&self) -> usize {
        self.seen().len()
    }

    pub fn is_tracked(&self, key: &PostKey) -> bool {
        self.seen().contains(key)
    }

    fn process_post(&self, key: PostKey, post: &impl PostElement) -> Option<JoinHandle<()>> {
        let text = {
            let mut seen = self.seen();
            if seen.contains(&key) {
                return None;
            }

            let Some(text) = extract_text(post) else {
                debug!(%key, "No text in post, will retry on next scan");
                return None;
            };

            seen.mark_pending(key.clone());
            text
        };

        self.annotator.show_loading(&key);

        let client = self.client.clone();
        let annotator = self.annotator.clone();
        let seen = self.seen.clone();

        Some(tokio::spawn(async move {
            let result = match client.analyze(&text).await {
                Ok(result) => Some(result),
                Err(e) => {
                    warn!(%key, error = %e, "Error analyzing post");
                    None
                }
            };

            annotator.clear_loading(&key);
            if let Some(result) = result {
                annotator.render_tags(&key, &TagSet::from_result(&result));
            }

            lock(&seen).mark_annotated(&key);
        }))
    }

    fn seen(&self) -> MutexGuard<'_, SeenSet> {
        lock(&self.seen)
    }
}

/// Trimmed text of the post's text element; `None` when the element is
/// missing or holds only whitespace.
pub fn extract_text(post: &impl PostElement) -> Option<String> {
    post.text()
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
}

fn lock(seen: &Mutex<SeenSet>) -> MutexGuard<'_, SeenSet> {
    seen.lock().unwrap_or_else(|e| e.into_inner())
}
