// Endpoint-keyed response cache with a fixed TTL and an insertion-order capacity bound
use serde_json::Value;
use std::collections::{HashMap, VecDeque};
use std::time::Duration;
use tokio::time::Instant;

#[derive(Debug, Clone)]
pub struct CacheEntry {
    pub data: Value,
    pub timestamp: Instant,
}

/// Holds at most `capacity` entries. When an insert pushes the map over the
/// bound, the oldest-inserted key goes first. Entries older than `ttl` are
/// never returned and are dropped when a read finds them.
#[derive(Debug)]
pub struct ResponseCache {
    entries: HashMap<String, CacheEntry>,
    insertion_order: VecDeque<String>,
    ttl: Duration,
    capacity: usize,
}

impl ResponseCache {
    pub fn new(ttl: Duration, capacity: usize) -> Self {
        Self {
            entries: HashMap::new(),
            insertion_order: VecDeque::new(),
            ttl,
            capacity,
        }
    }

    pub fn get(&mut self, key: &str, now: Instant) -> Option<Value> {
        let entry = self.entries.get(key)?;
        if now.saturating_duration_since(entry.timestamp) < self.ttl {
            return Some(entry.data.clone());
        }
        tracing::debug!(endpoint = key, "Cache entry expired");
        self.remove(key);
        None
    }

    pub fn insert(&mut self, key: String, data: Value, now: Instant) {
        if self.entries.contains_key(&key) {
            self.insertion_order.retain(|k| k != &key);
        }
        self.insertion_order.push_back(key.clone());
        self.entries.insert(key, CacheEntry { data, timestamp: now });

        while self.entries.len() > self.capacity {
            match self.insertion_order.pop_front() {
                Some(oldest) => {
                    tracing::debug!(endpoint = %oldest, "Evicting oldest cache entry");
                    self.entries.remove(&oldest);
                }
                None => break,
            }
        }
    }

    pub fn remove(&mut self, key: &str) -> bool {
        if self.entries.remove(key).is_some() {
            self.insertion_order.retain(|k| k != key);
            true
        } else {
            false
        }
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.insertion_order.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[cfg(test)]
    pub(crate) fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    #[cfg(test)]
    pub(crate) fn timestamp(&self, key: &str) -> Option<Instant> {
        self.entries.get(key).map(|e| e.timestamp)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const TTL: Duration = Duration::from_secs(60);

    #[test]
    fn live_entry_is_returned() {
        let now = Instant::now();
        let mut cache = ResponseCache::new(TTL, 100);
        cache.insert("/api/x".to_string(), json!({"v": 1}), now);
        assert_eq!(cache.get("/api/x", now + Duration::from_secs(59)), Some(json!({"v": 1})));
    }

    #[test]
    fn expired_entry_is_dropped_on_read() {
        let now = Instant::now();
        let mut cache = ResponseCache::new(TTL, 100);
        cache.insert("/api/x".to_string(), json!(1), now);
        assert_eq!(cache.get("/api/x", now + TTL), None);
        assert!(cache.is_empty());
    }

    #[test]
    fn capacity_evicts_oldest_inserted() {
        let now = Instant::now();
        let mut cache = ResponseCache::new(TTL, 3);
        for i in 0..4 {
            cache.insert(format!("/api/{}", i), json!(i), now);
        }
        assert_eq!(cache.len(), 3);
        assert!(!cache.contains("/api/0"));
        assert!(cache.contains("/api/1"));
        assert!(cache.contains("/api/3"));
    }

    #[test]
    fn reinsert_moves_key_to_newest() {
        let now = Instant::now();
        let mut cache = ResponseCache::new(TTL, 2);
        cache.insert("/a".to_string(), json!(1), now);
        cache.insert("/b".to_string(), json!(2), now);
        cache.insert("/a".to_string(), json!(3), now + Duration::from_secs(1));
        cache.insert("/c".to_string(), json!(4), now);

        assert!(cache.contains("/a"));
        assert!(!cache.contains("/b"));
        assert_eq!(cache.timestamp("/a"), Some(now + Duration::from_secs(1)));
    }

    #[test]
    fn remove_and_clear() {
        let now = Instant::now();
        let mut cache = ResponseCache::new(TTL, 10);
        cache.insert("/a".to_string(), json!(1), now);
        cache.insert("/b".to_string(), json!(2), now);
        assert!(cache.remove("/a"));
        assert!(!cache.remove("/a"));
        assert_eq!(cache.len(), 1);
        cache.clear();
        assert!(cache.is_empty());
    }

    #[test]
    fn zero_capacity_holds_nothing() {
        let mut cache = ResponseCache::new(TTL, 0);
        cache.insert("/a".to_string(), json!(1), Instant::now());
        assert!(cache.is_empty());
    }
}
