use std::sync::Arc;

use anyhow::Result;
use tracing::info;
use tracing_subscriber::EnvFilter;

use feedlens_common::{FeedSourceConfig, WatcherConfig};
use feedlens_watcher::{
    BrowserlessSource, FeedSource, FeedWatcher, FileSource, ProxyClient, Runner, TracingAnnotator,
};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = WatcherConfig::from_env()?;
    info!(analyze_url = %config.analyze_url, source = ?config.source, "Feed watcher starting");

    let watcher = FeedWatcher::new(
        Arc::new(ProxyClient::new(&config.analyze_url)),
        Arc::new(TracingAnnotator),
    );

    match config.source.clone() {
        FeedSourceConfig::File(path) => watch(FileSource::new(path), watcher, &config).await,
        FeedSourceConfig::Browserless {
            endpoint,
            page_url,
            token,
        } => {
            let source = BrowserlessSource::new(&endpoint, &page_url, token.as_deref())?;
            watch(source, watcher, &config).await
        }
    }

    Ok(())
}

async fn watch<S: FeedSource>(
    source: S,
    watcher: FeedWatcher<ProxyClient, TracingAnnotator>,
    config: &WatcherConfig,
) {
    let (runner, _mutations) = Runner::new(source, watcher, config.poll_interval, config.warmup);

    tokio::select! {
        _ = runner.run() => {}
        _ = tokio::signal::ctrl_c() => info!("Shutting down"),
    }
}
