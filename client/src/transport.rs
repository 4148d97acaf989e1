// Network seam of the API client: one request in, one status/body pair out.
use async_trait::async_trait;
use reqwest::Method;
use serde_json::Value;
use std::time::Duration;

use crate::error::ClientError;

#[derive(Debug, Clone)]
pub struct TransportRequest {
    pub method: Method,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<Value>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TransportResponse {
    pub status: u16,
    pub status_text: String,
    pub body: String,
}

impl TransportResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Anything that can carry a request to the backend. Non-2xx statuses are
/// returned as responses, not errors; only failures to get a response at
/// all are `Err`.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: TransportRequest) -> Result<TransportResponse, ClientError>;
}

/// reqwest-backed transport used outside of tests.
pub struct HttpTransport {
    client: reqwest::Client,
    timeout: Duration,
}

impl HttpTransport {
    pub fn new(timeout: Duration) -> Result<Self, ClientError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ClientError::Config(format!("failed to build HTTP client: {}", e)))?;
        Ok(Self { client, timeout })
    }

    fn map_error(&self, err: reqwest::Error) -> ClientError {
        if err.is_timeout() {
            ClientError::Timeout(self.timeout)
        } else {
            ClientError::network(err.to_string())
        }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: TransportRequest) -> Result<TransportResponse, ClientError> {
        let mut builder = self.client.request(request.method, &request.url);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(|e| self.map_error(e))?;
        let status = response.status();
        let body = response.text().await.map_err(|e| self.map_error(e))?;

        Ok(TransportResponse {
            status: status.as_u16(),
            status_text: status.canonical_reason().unwrap_or_default().to_string(),
            body,
        })
    }
}
