// Monotonic request generations for discarding out-of-order responses
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GenerationToken(u64);

/// One counter per logical subscription (e.g. "price history of the symbol
/// currently on screen"). Take a token before issuing a request and apply
/// the response only if the token is still current when it arrives.
///
/// Clones share the same counter.
#[derive(Debug, Clone, Default)]
pub struct RequestGeneration {
    latest: Arc<AtomicU64>,
}

impl RequestGeneration {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a new generation, superseding every earlier token.
    pub fn begin(&self) -> GenerationToken {
        GenerationToken(self.latest.fetch_add(1, Ordering::AcqRel) + 1)
    }

    pub fn is_current(&self, token: GenerationToken) -> bool {
        self.latest.load(Ordering::Acquire) == token.0
    }

    /// Returns `value` only when `token` is still current.
    pub fn accept<T>(&self, token: GenerationToken, value: T) -> Option<T> {
        if self.is_current(token) {
            Some(value)
        } else {
            tracing::debug!(token = token.0, "Discarding stale response");
            None
        }
    }
}
