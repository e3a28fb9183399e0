use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

use crate::client::AnalysisClient;
use crate::render::Annotator;
use crate::snapshot::HtmlSnapshot;
use crate::source::{fingerprint, FeedSource};
use crate::watcher::FeedWatcher;

/// Tells a running `Runner` the document's child list changed.
#[derive(Clone)]
pub struct MutationHandle {
    tx: mpsc::UnboundedSender<()>,
}

impl MutationHandle {
    /// Returns false once the runner has stopped.
    pub fn notify(&self) -> bool {
        self.tx.send(()).is_ok()
    }
}

/// Drives a `FeedWatcher` from a `FeedSource`.
///
/// Scans are triggered by one initial scan after `warmup`, by a changed
/// snapshot on any poll, and by explicit mutation notifications.
pub struct Runner<S, C, A> {
    source: S,
    watcher: FeedWatcher<C, A>,
    poll_interval: Duration,
    warmup: Duration,
    mutations: mpsc::UnboundedReceiver<()>,
}

impl<S, C, A> Runner<S, C, A>
where
    S: FeedSource,
    C: AnalysisClient + 'static,
    A: Annotator + 'static,
{
    pub fn new(
        source: S,
        watcher: FeedWatcher<C, A>,
        poll_interval: Duration,
        warmup: Duration,
    ) -> (Self, MutationHandle) {
        let (tx, rx) = mpsc::unbounded_channel();
        let runner = Self {
            source,
            watcher,
            poll_interval,
            warmup,
            mutations: rx,
        };
        (runner, MutationHandle { tx })
    }

    /// Watch until the task is dropped. Source failures are logged and the
    /// next poll tries again.
    pub async fn run(mut self) {
        info!(
            poll_ms = self.poll_interval.as_millis() as u64,
            warmup_ms = self.warmup.as_millis() as u64,
            "Feed watcher started"
        );

        let warmup = tokio::time::sleep(self.warmup);
        tokio::pin!(warmup);
        let mut warmed_up = false;

        let mut ticker = tokio::time::interval(self.poll_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        let mut last_seen: Option<String> = None;
        let mut notifications_open = true;

        loop {
            tokio::select! {
                _ = &mut warmup, if !warmed_up => {
                    warmed_up = true;
                    debug!("Initial scan");
                    if let Some(html) = self.fetch().await {
                        last_seen = Some(fingerprint(&html));
                        self.scan(&html);
                    }
                }
                _ = ticker.tick() => {
                    let Some(html) = self.fetch().await else { continue };
                    let current = fingerprint(&html);
                    // Without an earlier snapshot nothing has been scanned yet.
                    let changed = last_seen.as_ref().map_or(true, |prev| *prev != current);
                    last_seen = Some(current);
                    if changed {
                        debug!("Document changed");
                        self.scan(&html);
                    }
                }
                msg = self.mutations.recv(), if notifications_open => {
                    match msg {
                        Some(()) => {
                            debug!("Mutation notified");
                            if let Some(html) = self.fetch().await {
                                last_seen = Some(fingerprint(&html));
                                self.scan(&html);
                            }
                        }
                        None => notifications_open = false,
                    }
                }
            }
        }
    }

    async fn fetch(&self) -> Option<String> {
        match self.source.snapshot().await {
            Ok(html) => Some(html),
            Err(e) => {
                warn!(error = %e, "Failed to read feed snapshot");
                None
            }
        }
    }

    fn scan(&self, html: &str) {
        let snapshot = HtmlSnapshot::parse_with_base(html, self.source.base_url());
        self.watcher.discover(&snapshot);
    }
}
