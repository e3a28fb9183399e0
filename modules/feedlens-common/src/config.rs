use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::error::FeedlensError;

type Result<T> = std::result::Result<T, FeedlensError>;

/// Analysis proxy configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct ProxyConfig {
    // Inference provider
    pub hf_token: Option<String>,
    pub sentiment_model_url: Option<String>,
    pub topic_model_url: Option<String>,
    pub hf_timeout: Duration,

    // Web server
    pub web_host: String,
    pub web_port: u16,
}

impl ProxyConfig {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_vars(|key| std::env::var(key).ok())
    }

    pub fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let var = |key: &str| lookup(key).filter(|v| !v.is_empty());

        let config = Self {
            hf_token: var("HF_TOKEN"),
            sentiment_model_url: var("SENTIMENT_MODEL_URL"),
            topic_model_url: var("TOPIC_MODEL_URL"),
            hf_timeout: Duration::from_secs(parse_or("HF_TIMEOUT_SECS", var("HF_TIMEOUT_SECS"), 30)?),
            web_host: var("WEB_HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            web_port: parse_or("PORT", var("PORT"), 3000)?,
        };

        config.log_keys();
        Ok(config)
    }

    fn log_keys(&self) {
        tracing::info!("Config loaded:");
        tracing::info!("  HF_TOKEN: {}", preview_opt(&self.hf_token));
        tracing::info!("  SENTIMENT_MODEL_URL: {}", or_default(&self.sentiment_model_url));
        tracing::info!("  TOPIC_MODEL_URL: {}", or_default(&self.topic_model_url));
    }
}

/// Where the watcher reads rendered feed snapshots from.
#[derive(Debug, Clone, PartialEq)]
pub enum FeedSourceConfig {
    /// A saved page on disk, re-read on every poll.
    File(PathBuf),
    /// A Browserless `/content` endpoint rendering `page_url`.
    Browserless {
        endpoint: String,
        page_url: String,
        token: Option<String>,
    },
}

/// Feed watcher configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct WatcherConfig {
    pub analyze_url: String,
    pub source: FeedSourceConfig,
    pub poll_interval: Duration,
    pub warmup: Duration,
}

impl WatcherConfig {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_vars(|key| std::env::var(key).ok())
    }

    pub fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let var = |key: &str| lookup(key).filter(|v| !v.is_empty());

        let source = match (var("FEED_FILE"), var("BROWSERLESS_URL")) {
            (Some(path), _) => FeedSourceConfig::File(PathBuf::from(path)),
            (None, Some(endpoint)) => FeedSourceConfig::Browserless {
                endpoint,
                page_url: var("FEED_URL").ok_or_else(|| {
                    FeedlensError::Config("FEED_URL is required with BROWSERLESS_URL".to_string())
                })?,
                token: var("BROWSERLESS_TOKEN"),
            },
            (None, None) => {
                return Err(FeedlensError::Config(
                    "one of FEED_FILE or BROWSERLESS_URL must be set".to_string(),
                ))
            }
        };

        Ok(Self {
            analyze_url: var("ANALYZE_URL")
                .unwrap_or_else(|| "http://localhost:3000/analyze".to_string()),
            source,
            poll_interval: Duration::from_millis(parse_or(
                "POLL_INTERVAL_MS",
                var("POLL_INTERVAL_MS"),
                1000,
            )?),
            warmup: Duration::from_millis(parse_or("WARMUP_MS", var("WARMUP_MS"), 2000)?),
        })
    }
}

fn parse_or<T: FromStr>(key: &str, value: Option<String>, default: T) -> Result<T> {
    match value {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| FeedlensError::Config(format!("{key} must be a number, got {raw:?}"))),
        None => Ok(default),
    }
}

fn preview_opt(val: &Option<String>) -> String {
    match val {
        Some(v) => {
            let n = v.char_indices().nth(5).map_or(v.len(), |(i, _)| i);
            format!("{}...({} chars)", &v[..n], v.chars().count())
        }
        None => "<not set>".to_string(),
    }
}

fn or_default(val: &Option<String>) -> &str {
    val.as_deref().unwrap_or("<default>")
}
