use std::sync::Arc;

use anyhow::Result;
use tracing::info;
use tracing_subscriber::EnvFilter;

use feedlens_api::{build_router, AppState};
use feedlens_common::ProxyConfig;
use hf_inference_client::HfInferenceClient;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("Analysis proxy starting");

    let config = ProxyConfig::from_env()?;

    let mut client = HfInferenceClient::new(config.hf_token.clone(), config.hf_timeout)?;
    if let Some(ref url) = config.sentiment_model_url {
        client = client.with_sentiment_url(url);
    }
    if let Some(ref url) = config.topic_model_url {
        client = client.with_topic_url(url);
    }

    let state = Arc::new(AppState::new(Arc::new(client)));
    let app = build_router(state);

    let addr = format!("{}:{}", config.web_host, config.web_port);
    info!("Analysis proxy listening on {addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
