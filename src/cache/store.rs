//! Expiring Cache Module
//!
//! HashMap storage with insertion-order eviction and lazy TTL expiration.

use std::collections::HashMap;
use std::time::Duration;

use tracing::debug;

use crate::cache::{CacheEntry, CacheStats, InsertionOrder};

// == Expiring Cache ==
/// Capacity-bounded cache whose entries expire lazily.
///
/// Expired entries stay in the map until a read discovers them or capacity
/// pressure evicts them. Nothing sweeps proactively.
#[derive(Debug)]
pub struct ExpiringCache<V> {
    /// Key-value storage
    entries: HashMap<String, CacheEntry<V>>,
    /// First-insertion order for eviction
    order: InsertionOrder,
    /// Performance statistics
    stats: CacheStats,
    /// Maximum number of entries after a `set` returns
    max_entries: usize,
    /// TTL applied when `set` gets none
    default_ttl: Duration,
}

impl<V: Clone> ExpiringCache<V> {
    // == Constructor ==
    pub fn new(max_entries: usize, default_ttl: Duration) -> Self {
        Self {
            entries: HashMap::new(),
            order: InsertionOrder::new(),
            stats: CacheStats::new(),
            max_entries,
            default_ttl,
        }
    }

    // == Set ==
    /// Stores `value` under `key`, expiring after `ttl` (or the default).
    ///
    /// Overwriting replaces value and expiry but keeps the key's original
    /// insertion position. If the map then holds more than `max_entries`,
    /// the earliest-inserted entry is evicted.
    pub fn set(&mut self, key: impl Into<String>, value: V, ttl: Option<Duration>) {
        let key = key.into();
        let entry = CacheEntry::new(value, ttl.unwrap_or(self.default_ttl));

        self.order.record(&key);
        self.entries.insert(key, entry);

        if self.entries.len() > self.max_entries {
            if let Some(evicted) = self.order.pop_oldest() {
                self.entries.remove(&evicted);
                self.stats.record_eviction();
                debug!("Cache evicted oldest entry {}", evicted);
            }
        }

        self.stats.set_total_entries(self.entries.len());
    }

    // == Get ==
    /// Returns the value if present and unexpired.
    ///
    /// An expired entry is removed on the spot and reported as absent.
    pub fn get(&mut self, key: &str) -> Option<V> {
        let expired = match self.entries.get(key) {
            None => {
                self.stats.record_miss();
                return None;
            }
            Some(entry) => entry.is_expired(),
        };

        if expired {
            self.entries.remove(key);
            self.order.remove(key);
            self.stats.record_expiration();
            self.stats.set_total_entries(self.entries.len());
            debug!("Cache entry {} expired on read", key);
            return None;
        }

        self.stats.record_hit();
        self.entries.get(key).map(|entry| entry.value.clone())
    }

    // == Clear ==
    pub fn clear(&mut self) {
        self.entries.clear();
        self.order.clear();
        self.stats.set_total_entries(0);
    }

    // == Stats ==
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.entries.len());
        stats
    }

    // == Length ==
    /// Number of stored entries, including expired ones not yet read.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn max_entries(&self) -> usize {
        self.max_entries
    }

    pub fn default_ttl(&self) -> Duration {
        self.default_ttl
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use std::thread::sleep;

    fn cache(max_entries: usize) -> ExpiringCache<String> {
        ExpiringCache::new(max_entries, Duration::from_secs(300))
    }

    #[test]
    fn test_cache_new() {
        let cache = cache(100);
        assert_eq!(cache.len(), 0);
        assert!(cache.is_empty());
        assert_eq!(cache.max_entries(), 100);
        assert_eq!(cache.default_ttl(), Duration::from_secs(300));
    }

    #[test]
    fn test_set_and_get() {
        let mut cache = cache(100);

        cache.set("key1", "value1".to_string(), None);

        assert_eq!(cache.get("key1").as_deref(), Some("value1"));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_get_nonexistent() {
        let mut cache = cache(100);
        assert_eq!(cache.get("nonexistent"), None);
    }

    #[test]
    fn test_overwrite() {
        let mut cache = cache(100);

        cache.set("key1", "value1".to_string(), None);
        cache.set("key1", "value2".to_string(), None);

        assert_eq!(cache.get("key1").as_deref(), Some("value2"));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_ttl_expiration() {
        let mut cache = cache(100);

        cache.set("k", "v".to_string(), Some(Duration::from_millis(100)));
        assert_eq!(cache.get("k").as_deref(), Some("v"));

        sleep(Duration::from_millis(150));

        assert_eq!(cache.get("k"), None);
        assert_eq!(cache.len(), 0, "Expired entry should no longer count");
    }

    #[test]
    fn test_expired_entries_linger_until_read() {
        let mut cache = cache(100);

        cache.set("k", "v".to_string(), Some(Duration::ZERO));

        // Nothing sweeps: the entry is still stored
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get("k"), None);
        assert_eq!(cache.len(), 0);
    }

    #[test]
    fn test_insertion_order_eviction() {
        let mut cache = cache(3);

        cache.set("key1", "value1".to_string(), None);
        cache.set("key2", "value2".to_string(), None);
        cache.set("key3", "value3".to_string(), None);
        cache.set("key4", "value4".to_string(), None);

        assert_eq!(cache.len(), 3);
        assert_eq!(cache.get("key1"), None);
        assert!(cache.get("key2").is_some());
        assert!(cache.get("key3").is_some());
        assert!(cache.get("key4").is_some());
    }

    #[test]
    fn test_reads_do_not_protect_from_eviction() {
        let mut cache = cache(3);

        cache.set("key1", "value1".to_string(), None);
        cache.set("key2", "value2".to_string(), None);
        cache.set("key3", "value3".to_string(), None);

        // Access key1; eviction still follows insertion order
        cache.get("key1");
        cache.set("key4", "value4".to_string(), None);

        assert_eq!(cache.get("key1"), None);
        assert!(cache.get("key2").is_some());
    }

    #[test]
    fn test_overwrite_keeps_insertion_position() {
        let mut cache = cache(2);

        cache.set("a", "1".to_string(), None);
        cache.set("b", "2".to_string(), None);
        cache.set("a", "3".to_string(), None);
        cache.set("c", "4".to_string(), None);

        assert_eq!(cache.get("a"), None);
        assert_eq!(cache.get("b").as_deref(), Some("2"));
        assert_eq!(cache.get("c").as_deref(), Some("4"));
    }

    #[test]
    fn test_overwrite_at_capacity_does_not_evict() {
        let mut cache = cache(2);

        cache.set("a", "1".to_string(), None);
        cache.set("b", "2".to_string(), None);
        cache.set("b", "3".to_string(), None);

        assert_eq!(cache.len(), 2);
        assert_eq!(cache.stats().evictions, 0);
    }

    #[test]
    fn test_clear() {
        let mut cache = cache(10);
        cache.set("a", "1".to_string(), None);
        cache.set("b", "2".to_string(), None);

        cache.clear();

        assert!(cache.is_empty());
        assert_eq!(cache.get("a"), None);
    }

    #[test]
    fn test_stats() {
        let mut cache = cache(1);

        cache.set("key1", "value1".to_string(), None);
        cache.get("key1");
        cache.get("nonexistent");
        cache.set("key2", "value2".to_string(), None);

        let stats = cache.stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.evictions, 1);
        assert_eq!(stats.total_entries, 1);
    }

    #[test]
    fn test_zero_capacity_keeps_nothing() {
        let mut cache = cache(0);
        cache.set("a", "1".to_string(), None);
        assert!(cache.is_empty());
    }
}
