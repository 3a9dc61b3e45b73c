use std::num::NonZeroUsize;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use lru::LruCache;
use serde_json::Value;

struct CacheEntry {
    value: Value,
    expires_at: Instant,
}

/// LRU response cache with per-entry TTLs, keyed by request path. Owned by
/// the HTTP layer and injected into handlers; the core aggregation services
/// never see it.
pub struct ResponseCache {
    inner: Mutex<LruCache<String, CacheEntry>>,
}

impl ResponseCache {
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        ResponseCache {
            inner: Mutex::new(LruCache::new(capacity)),
        }
    }

    /// Fetch a live entry. Expired entries are evicted on the way out and
    /// reported as a miss.
    pub fn get(&self, key: &str) -> Option<Value> {
        let mut inner = self.inner.lock().ok()?;
        let live = match inner.get(key) {
            Some(entry) => entry.expires_at > Instant::now(),
            None => return None,
        };
        if live {
            inner.get(key).map(|entry| entry.value.clone())
        } else {
            inner.pop(key);
            None
        }
    }

    pub fn set(&self, key: String, value: Value, ttl: Duration) {
        if let Ok(mut inner) = self.inner.lock() {
            inner.put(
                key,
                CacheEntry {
                    value,
                    expires_at: Instant::now() + ttl,
                },
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_set_then_get_within_ttl() {
        let cache = ResponseCache::new(8);
        cache.set("a".to_string(), json!({"n": 1}), Duration::from_secs(60));
        assert_eq!(cache.get("a"), Some(json!({"n": 1})));
    }

    #[test]
    fn test_expired_entry_is_a_miss() {
        let cache = ResponseCache::new(8);
        cache.set("a".to_string(), json!(1), Duration::from_secs(0));
        assert_eq!(cache.get("a"), None);
    }

    #[test]
    fn test_capacity_eviction_drops_oldest() {
        let cache = ResponseCache::new(2);
        cache.set("a".to_string(), json!(1), Duration::from_secs(60));
        cache.set("b".to_string(), json!(2), Duration::from_secs(60));
        cache.set("c".to_string(), json!(3), Duration::from_secs(60));
        assert_eq!(cache.get("a"), None);
        assert_eq!(cache.get("b"), Some(json!(2)));
        assert_eq!(cache.get("c"), Some(json!(3)));
    }

    #[test]
    fn test_zero_capacity_rounds_up_to_one() {
        let cache = ResponseCache::new(0);
        cache.set("a".to_string(), json!(1), Duration::from_secs(60));
        assert_eq!(cache.get("a"), Some(json!(1)));
    }
}
