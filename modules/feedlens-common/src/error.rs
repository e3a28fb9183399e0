use thiserror::Error;

#[derive(Error, Debug)]
pub enum FeedlensError {
    #[error("Configuration error: {0}")]
    Config(String),
}
