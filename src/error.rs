//! Error types for the proxy.

use thiserror::Error;

#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ProxyError {
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Invalid request: {message}")]
    InvalidRequest { message: String },

    #[error("Upstream error: {message}")]
    Upstream { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
}

impl ProxyError {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    pub fn invalid_request(msg: impl Into<String>) -> Self {
        Self::InvalidRequest {
            message: msg.into(),
        }
    }

    pub fn upstream(msg: impl Into<String>) -> Self {
        Self::Upstream {
            message: msg.into(),
        }
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal {
            message: msg.into(),
        }
    }

    /// The bare detail, without the category prefix `Display` adds.
    /// Used when embedding the failure in a synthetic completion.
    pub fn detail(&self) -> String {
        match self {
            Self::Config { message }
            | Self::InvalidRequest { message }
            | Self::Upstream { message }
            | Self::Internal { message } => message.clone(),
            other => other.to_string(),
        }
    }

    /// Failures that come from talking to the provider, as opposed to bugs or
    /// bad input on our side.
    pub fn is_upstream(&self) -> bool {
        matches!(self, Self::Config { .. } | Self::Upstream { .. } | Self::Http(_))
    }
}

pub type Result<T> = std::result::Result<T, ProxyError>;
