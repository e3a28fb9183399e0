use thiserror::Error;

pub type Result<T> = std::result::Result<T, HfError>;

#[derive(Debug, Error)]
pub enum HfError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Parse error: {0}")]
    Parse(String),
}

impl HfError {
    /// Best-effort detail for callers that relay the failure.
    /// API errors hand back the provider's body (as JSON when it parses),
    /// everything else the error message.
    pub fn details(&self) -> serde_json::Value {
        match self {
            HfError::Api { message, .. } => serde_json::from_str(message)
                .unwrap_or_else(|_| serde_json::Value::String(message.clone())),
            HfError::Network(message) | HfError::Parse(message) => {
                serde_json::Value::String(message.clone())
            }
        }
    }
}

impl From<reqwest::Error> for HfError {
    fn from(err: reqwest::Error) -> Self {
        HfError::Network(err.to_string())
    }
}

impl From<serde_json::Error> for HfError {
    fn from(err: serde_json::Error) -> Self {
        HfError::Parse(err.to_string())
    }
}
