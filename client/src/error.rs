use std::time::Duration;
use thiserror::Error;

/// Message used when a transport failure carries no text of its own.
pub const NETWORK_FALLBACK_MESSAGE: &str = "Network request failed";

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ClientError {
    // Connect/transport failure. The message is surfaced to callers as-is.
    #[error("{0}")]
    Network(String),

    #[error("HTTP {status}: {status_text}")]
    Http { status: u16, status_text: String },

    #[error("Invalid JSON response: {0}")]
    Parse(String),

    // Body was valid JSON but not the shape the caller asked for.
    #[error("Unexpected response shape: {0}")]
    Schema(String),

    #[error("Request timed out after {} ms", .0.as_millis())]
    Timeout(Duration),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Variant tag of a [`ClientError`], kept on error results so callers can
/// branch without matching on message text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Network,
    Http,
    Parse,
    Schema,
    Timeout,
    Config,
}

impl ClientError {
    pub fn network(message: impl Into<String>) -> Self {
        let message = message.into();
        if message.trim().is_empty() {
            ClientError::Network(NETWORK_FALLBACK_MESSAGE.to_string())
        } else {
            ClientError::Network(message)
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            ClientError::Network(_) => ErrorKind::Network,
            ClientError::Http { .. } => ErrorKind::Http,
            ClientError::Parse(_) => ErrorKind::Parse,
            ClientError::Schema(_) => ErrorKind::Schema,
            ClientError::Timeout(_) => ErrorKind::Timeout,
            ClientError::Config(_) => ErrorKind::Config,
        }
    }
}
