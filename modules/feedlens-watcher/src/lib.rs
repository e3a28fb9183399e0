pub mod client;
pub mod dedup;
pub mod dom;
pub mod error;
pub mod key;
pub mod render;
pub mod runner;
pub mod snapshot;
pub mod source;
pub mod watcher;

pub use client::{AnalysisClient, ProxyClient};
pub use dedup::{PostState, SeenSet};
pub use dom::{FeedDocument, PostElement};
pub use error::{Result, WatcherError};
pub use key::PostKey;
pub use render::{Annotator, RecordingAnnotator, Tag, TagKind, TagSet, TracingAnnotator};
pub use runner::{MutationHandle, Runner};
pub use snapshot::{HtmlSnapshot, SnapshotPost};
pub use source::{BrowserlessSource, FeedSource, FileSource, MemorySource};
pub use watcher::FeedWatcher;
