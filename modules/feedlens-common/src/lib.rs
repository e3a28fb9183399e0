pub mod types;
pub mod config;
pub mod error;

pub use types::*;
pub use config::{FeedSourceConfig, ProxyConfig, WatcherConfig};
pub use error::FeedlensError;
