// Request/cache client for the dashboard backend REST API.

pub mod cache;
pub mod client;
pub mod config;
pub mod endpoints;
pub mod error;
pub mod generation;
pub mod result;
pub mod transport;

pub use client::{ApiClient, RequestOptions};
pub use config::ClientSettings;
pub use error::{ClientError, ErrorKind};
pub use generation::{GenerationToken, RequestGeneration};
pub use result::RequestResult;
pub use transport::{HttpTransport, Transport, TransportRequest, TransportResponse};

// Re-exported so callers can build `RequestOptions` without depending on reqwest.
pub use reqwest::Method;
