// Analytics library root: technical indicators and forecast/return metrics
// over price series, plus the settings and summary used by the binary.

pub mod config;
pub mod error;
pub mod indicators;
pub mod metrics;
pub mod report;

pub use error::AnalyticsError;
