use client::ClientError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnalyticsError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Indicator calculation error: {0}")]
    IndicatorError(String),

    #[error("API client error: {source}")]
    ClientError {
        #[from]
        source: ClientError,
    },

    #[error("I/O error: {source}")]
    IoError {
        #[from]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, AnalyticsError>;
