// REST client for the dashboard backend with a short-lived response cache
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, Mutex as StdMutex, MutexGuard, PoisonError};
use tokio::sync::{Mutex, OnceCell};
use tokio::time::Instant;

use crate::cache::ResponseCache;
use crate::config::ClientSettings;
use crate::error::ClientError;
use crate::result::RequestResult;
use crate::transport::{HttpTransport, Transport, TransportRequest};

type InFlight = Arc<OnceCell<Result<Value, ClientError>>>;
type FlightMap = StdMutex<HashMap<String, Flight>>;

/// One network read shared by every caller waiting on the same endpoint.
struct Flight {
    cell: InFlight,
    waiters: usize,
}

/// Holds a caller's place in a [`Flight`]. Dropping it, on completion or on
/// cancellation, releases the place; the last one out removes the flight.
struct FlightGuard<'a> {
    flights: &'a FlightMap,
    endpoint: &'a str,
    cell: InFlight,
}

impl Drop for FlightGuard<'_> {
    fn drop(&mut self) {
        let mut flights = lock_flights(self.flights);
        let finished = match flights.get_mut(self.endpoint) {
            Some(flight) if Arc::ptr_eq(&flight.cell, &self.cell) => {
                flight.waiters -= 1;
                flight.waiters == 0
            }
            _ => false,
        };
        if finished {
            flights.remove(self.endpoint);
        }
    }
}

fn lock_flights(flights: &FlightMap) -> MutexGuard<'_, HashMap<String, Flight>> {
    flights.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Per-request options. A request with an explicit `method` is never cached
/// and never coalesced, even when the caller asks for caching.
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    pub method: Option<Method>,
    pub headers: Vec<(String, String)>,
    pub body: Option<Value>,
}

impl RequestOptions {
    pub fn with_method(method: Method) -> Self {
        Self {
            method: Some(method),
            ..Self::default()
        }
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn json(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }
}

/// Client for the backend REST API.
///
/// Default-method reads are cached per endpoint string for the configured TTL
/// (60 s by default) and the cache holds at most `cache_capacity` entries.
/// Concurrent cacheable reads of the same endpoint share one network call.
/// Nothing is retried; a write does not invalidate cached reads, use
/// [`ApiClient::clear_cache_for_endpoint`] or `use_cache = false` for that.
/// Clearing also detaches reads already in flight: later callers start a new
/// network call and the detached result is never written to the cache.
pub struct ApiClient {
    base_url: String,
    settings: ClientSettings,
    transport: Arc<dyn Transport>,
    cache: Mutex<ResponseCache>,
    in_flight: FlightMap,
}

impl ApiClient {
    /// Builds a client that talks HTTP through reqwest.
    pub fn new(settings: ClientSettings) -> Result<Self, ClientError> {
        settings.validate()?;
        let transport = HttpTransport::new(settings.request_timeout())?;
        Self::with_transport(settings, Arc::new(transport))
    }

    /// Builds a client over any [`Transport`]. Settings are validated here too.
    pub fn with_transport(settings: ClientSettings, transport: Arc<dyn Transport>) -> Result<Self, ClientError> {
        settings.validate()?;
        let base_url = settings.base_url.trim_end_matches('/').to_string();
        let cache = ResponseCache::new(settings.cache_ttl(), settings.cache_capacity);
        Ok(Self {
            base_url,
            settings,
            transport,
            cache: Mutex::new(cache),
            in_flight: StdMutex::new(HashMap::new()),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn settings(&self) -> &ClientSettings {
        &self.settings
    }

    pub async fn request(&self, endpoint: &str, options: RequestOptions, use_cache: bool) -> RequestResult<Value> {
        self.fetch(endpoint, options, use_cache).await.into()
    }

    pub async fn request_as<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        options: RequestOptions,
        use_cache: bool,
    ) -> RequestResult<T> {
        self.fetch_as(endpoint, options, use_cache).await.into()
    }

    pub async fn fetch_as<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        options: RequestOptions,
        use_cache: bool,
    ) -> Result<T, ClientError> {
        let value = self.fetch(endpoint, options, use_cache).await?;
        serde_json::from_value(value).map_err(|e| {
            tracing::warn!(endpoint, error = %e, "Response did not match expected schema");
            ClientError::Schema(e.to_string())
        })
    }

    /// Same as [`ApiClient::request`] but keeps the typed error.
    pub async fn fetch(&self, endpoint: &str, options: RequestOptions, use_cache: bool) -> Result<Value, ClientError> {
        let cacheable = use_cache && options.method.is_none();
        if !cacheable {
            return self.send(endpoint, options).await;
        }

        if let Some(data) = self.cached(endpoint).await {
            return Ok(data);
        }

        let guard = self.join_flight(endpoint);
        let flight = &guard.cell;
        let outcome = guard
            .cell
            .get_or_init(|| async move {
                // Another caller may have filled the cache between our miss and
                // joining the flight.
                if let Some(data) = self.cached(endpoint).await {
                    return Ok(data);
                }
                let outcome = self.send(endpoint, options).await;
                if let Ok(data) = &outcome {
                    self.store(endpoint, flight, data).await;
                }
                outcome
            })
            .await
            .clone();
        outcome
    }

    fn join_flight<'a>(&'a self, endpoint: &'a str) -> FlightGuard<'a> {
        let mut flights = lock_flights(&self.in_flight);
        let flight = flights.entry(endpoint.to_string()).or_insert_with(|| Flight {
            cell: Arc::new(OnceCell::new()),
            waiters: 0,
        });
        flight.waiters += 1;
        FlightGuard {
            flights: &self.in_flight,
            endpoint,
            cell: flight.cell.clone(),
        }
    }

    /// Caches a read unless its flight was detached by a clear while it ran.
    /// The flight check happens under the cache lock, and clears detach
    /// flights before taking that lock, so a detached read never lands.
    async fn store(&self, endpoint: &str, flight: &InFlight, data: &Value) {
        let mut cache = self.cache.lock().await;
        let current = lock_flights(&self.in_flight)
            .get(endpoint)
            .is_some_and(|f| Arc::ptr_eq(&f.cell, flight));
        if current {
            cache.insert(endpoint.to_string(), data.clone(), Instant::now());
        } else {
            tracing::debug!(endpoint, "Dropping read that was cleared while in flight");
        }
    }

    pub async fn clear_cache(&self) {
        lock_flights(&self.in_flight).clear();
        self.cache.lock().await.clear();
        tracing::debug!("API cache cleared");
    }

    pub async fn clear_cache_for_endpoint(&self, endpoint: &str) {
        lock_flights(&self.in_flight).remove(endpoint);
        if self.cache.lock().await.remove(endpoint) {
            tracing::debug!(endpoint, "API cache entry cleared");
        }
    }

    pub async fn cache_len(&self) -> usize {
        self.cache.lock().await.len()
    }

    async fn cached(&self, endpoint: &str) -> Option<Value> {
        let hit = self.cache.lock().await.get(endpoint, Instant::now());
        if hit.is_some() {
            tracing::debug!(endpoint, "API cache hit");
        }
        hit
    }

    async fn send(&self, endpoint: &str, options: RequestOptions) -> Result<Value, ClientError> {
        let RequestOptions { method, headers, body } = options;
        let method = method.unwrap_or(Method::GET);
        tracing::debug!(endpoint, %method, "API request");

        let outcome = self.dispatch(endpoint, method.clone(), headers, body).await;
        if let Err(err) = &outcome {
            tracing::warn!(endpoint, %method, error = %err, "API request failed");
        }
        outcome
    }

    async fn dispatch(
        &self,
        endpoint: &str,
        method: Method,
        extra_headers: Vec<(String, String)>,
        body: Option<Value>,
    ) -> Result<Value, ClientError> {
        let mut headers = vec![("Content-Type".to_string(), "application/json".to_string())];
        headers.extend(extra_headers);

        let request = TransportRequest {
            method,
            url: format!("{}{}", self.base_url, endpoint),
            headers,
            body,
        };

        let timeout = self.settings.request_timeout();
        let response = match tokio::time::timeout(timeout, self.transport.send(request)).await {
            Ok(response) => response?,
            Err(_) => return Err(ClientError::Timeout(timeout)),
        };

        if !response.is_success() {
            return Err(ClientError::Http {
                status: response.status,
                status_text: response.status_text,
            });
        }

        serde_json::from_str(&response.body).map_err(|e| ClientError::Parse(e.to_string()))
    }
}
