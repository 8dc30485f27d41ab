//! Namespace Store Module
//!
//! One bounded key/entry map per kind of tag data. Recency lives in the
//! shared [`AccessTracker`] owned by the caller, so every operation that
//! touches recency borrows it.

use std::collections::HashMap;
use std::time::Duration;

use tracing::debug;

use crate::cache::{AccessTracker, CacheEntry, CacheKey, NamespaceStats};
use crate::config::NamespaceConfig;

// == Namespace Store ==
/// Bounded, TTL-aware storage for one data kind.
#[derive(Debug)]
pub struct NamespaceStore<T> {
    /// Name used in logs
    name: &'static str,
    /// Key-value storage
    entries: HashMap<CacheKey, CacheEntry<T>>,
    /// Maximum number of entries allowed
    capacity: usize,
    /// TTL applied by the typed setters
    default_ttl: Duration,
    /// Best-effort counters
    stats: NamespaceStats,
}

impl<T: Clone> NamespaceStore<T> {
    // == Constructor ==
    pub fn new(name: &'static str, config: NamespaceConfig) -> Self {
        Self {
            name,
            entries: HashMap::new(),
            capacity: config.capacity,
            default_ttl: config.ttl,
            stats: NamespaceStats::new(config.capacity),
        }
    }

    // == Get ==
    /// Returns a clone of the live value under `key`.
    ///
    /// An expired entry is removed on the spot and reported as absent. A hit
    /// refreshes the key's recency but never its expiry.
    pub fn get(&mut self, key: &CacheKey, now_ms: u64, access: &mut AccessTracker) -> Option<T> {
        let expired = match self.entries.get(key) {
            Some(entry) => entry.is_expired(now_ms),
            None => {
                self.stats.record_miss();
                return None;
            }
        };

        if expired {
            self.entries.remove(key);
            access.remove(key);
            self.stats.record_miss();
            self.stats.record_expirations(1);
            debug!(namespace = self.name, key = %key, "Lazily expired entry");
            return None;
        }

        self.stats.record_hit();
        access.touch(key);
        self.entries.get(key).map(|entry| entry.value.clone())
    }

    // == Set ==
    /// Stores `value` under `key` with the given TTL.
    ///
    /// Inserting a new key into a full store first evicts the store's least
    /// recently used key. Overwriting an existing key resets its creation
    /// time and never evicts. A zero-capacity store keeps nothing.
    pub fn set(
        &mut self,
        key: CacheKey,
        value: T,
        ttl: Duration,
        now_ms: u64,
        access: &mut AccessTracker,
    ) {
        if self.capacity == 0 {
            debug!(namespace = self.name, key = %key, "Zero capacity, value not cached");
            return;
        }

        let is_overwrite = self.entries.contains_key(&key);
        if !is_overwrite && self.entries.len() >= self.capacity {
            self.evict_lru(access);
        }

        access.touch(&key);
        self.entries.insert(key, CacheEntry::new(value, now_ms, ttl));
    }

    /// Stores `value` with this namespace's configured TTL.
    pub fn set_default(
        &mut self,
        key: CacheKey,
        value: T,
        now_ms: u64,
        access: &mut AccessTracker,
    ) {
        let ttl = self.default_ttl;
        self.set(key, value, ttl, now_ms, access);
    }

    // == Evict ==
    /// Removes the key with the lowest access sequence in this store.
    fn evict_lru(&mut self, access: &mut AccessTracker) {
        let victim = access.least_recent(self.entries.keys()).cloned();
        if let Some(victim) = victim {
            self.entries.remove(&victim);
            access.remove(&victim);
            self.stats.record_eviction();
            debug!(namespace = self.name, key = %victim, "Evicted least recently used entry");
        }
    }

    // == Delete ==
    /// Removes `key` unconditionally. Returns whether it was present.
    pub fn delete(&mut self, key: &CacheKey, access: &mut AccessTracker) -> bool {
        access.remove(key);
        self.entries.remove(key).is_some()
    }

    // == Delete Where ==
    /// Removes every key matching `predicate`. Returns the number removed.
    pub fn delete_where<F>(&mut self, mut predicate: F, access: &mut AccessTracker) -> usize
    where
        F: FnMut(&CacheKey) -> bool,
    {
        let doomed: Vec<CacheKey> = self
            .entries
            .keys()
            .filter(|key| predicate(*key))
            .cloned()
            .collect();

        for key in &doomed {
            self.entries.remove(key);
            access.remove(key);
        }
        doomed.len()
    }

    // == Cleanup Expired ==
    /// Removes every entry expired at `now_ms`. Returns the number removed.
    pub fn cleanup_expired(&mut self, now_ms: u64, access: &mut AccessTracker) -> usize {
        let expired: Vec<CacheKey> = self
            .entries
            .iter()
            .filter(|(_, entry)| entry.is_expired(now_ms))
            .map(|(key, _)| key.clone())
            .collect();

        for key in &expired {
            self.entries.remove(key);
            access.remove(key);
        }

        self.stats.record_expirations(expired.len());
        expired.len()
    }

    /// Drops every entry.
    pub fn clear(&mut self, access: &mut AccessTracker) {
        for key in self.entries.keys() {
            access.remove(key);
        }
        self.entries.clear();
    }

    // == Accessors ==
    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn default_ttl(&self) -> Duration {
        self.default_ttl
    }

    pub fn contains(&self, key: &CacheKey) -> bool {
        self.entries.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &CacheKey> {
        self.entries.keys()
    }

    // == Stats ==
    /// Returns a snapshot of this store's counters.
    pub fn stats(&self) -> NamespaceStats {
        let mut stats = self.stats.clone();
        stats.entries = self.entries.len();
        stats
    }

    // == Length ==
    /// Returns the current number of entries, expired or not.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::{build_key, KeyParams};

    const TTL: Duration = Duration::from_secs(60);

    fn key(n: usize) -> CacheKey {
        build_key("u1", "test", &KeyParams::new().with("n", n))
    }

    fn store(capacity: usize) -> NamespaceStore<String> {
        NamespaceStore::new("test", NamespaceConfig::new(TTL, capacity))
    }

    #[test]
    fn test_store_new() {
        let store = store(10);
        assert!(store.is_empty());
        assert_eq!(store.capacity(), 10);
        assert_eq!(store.default_ttl(), TTL);
        assert_eq!(store.name(), "test");
    }

    #[test]
    fn test_store_set_and_get() {
        let mut access = AccessTracker::new();
        let mut store = store(10);

        store.set(key(1), "value1".to_string(), TTL, 0, &mut access);

        assert_eq!(store.get(&key(1), 0, &mut access), Some("value1".to_string()));
        assert_eq!(store.len(), 1);
        assert!(access.contains(&key(1)));
    }

    #[test]
    fn test_store_get_nonexistent() {
        let mut access = AccessTracker::new();
        let mut store = store(10);

        assert_eq!(store.get(&key(1), 0, &mut access), None);
        assert_eq!(store.stats().misses, 1);
    }

    #[test]
    fn test_store_lazy_expiry_removes_entry() {
        let mut access = AccessTracker::new();
        let mut store = store(10);
        store.set(key(1), "v".to_string(), Duration::from_millis(100), 1_000, &mut access);

        assert!(store.get(&key(1), 1_099, &mut access).is_some());
        assert!(store.get(&key(1), 1_100, &mut access).is_none());

        assert!(store.is_empty());
        assert!(!access.contains(&key(1)));
        assert_eq!(store.stats().expirations, 1);
    }

    #[test]
    fn test_store_overwrite_resets_created_at() {
        let mut access = AccessTracker::new();
        let mut store = store(10);

        store.set(key(1), "old".to_string(), TTL, 0, &mut access);
        store.set(key(1), "new".to_string(), TTL, 50_000, &mut access);

        assert_eq!(store.len(), 1);
        assert_eq!(store.get(&key(1), 100_000, &mut access), Some("new".to_string()));
    }

    #[test]
    fn test_store_lru_eviction() {
        let mut access = AccessTracker::new();
        let mut store = store(3);

        for n in 1..=4 {
            store.set(key(n), format!("value{n}"), TTL, 0, &mut access);
        }

        assert_eq!(store.len(), 3);
        assert!(!store.contains(&key(1)));
        assert!(store.contains(&key(4)));
        assert_eq!(store.stats().evictions, 1);
    }

    #[test]
    fn test_store_lru_touch_on_get() {
        let mut access = AccessTracker::new();
        let mut store = store(3);
        for n in 1..=3 {
            store.set(key(n), format!("value{n}"), TTL, 0, &mut access);
        }

        store.get(&key(1), 0, &mut access);
        store.set(key(4), "value4".to_string(), TTL, 0, &mut access);

        assert!(store.contains(&key(1)));
        assert!(!store.contains(&key(2)));
    }

    #[test]
    fn test_store_overwrite_at_capacity_does_not_evict() {
        let mut access = AccessTracker::new();
        let mut store = store(2);
        store.set(key(1), "a".to_string(), TTL, 0, &mut access);
        store.set(key(2), "b".to_string(), TTL, 0, &mut access);

        store.set(key(1), "a2".to_string(), TTL, 0, &mut access);

        assert_eq!(store.len(), 2);
        assert_eq!(store.stats().evictions, 0);
    }

    #[test]
    fn test_store_zero_capacity_keeps_nothing() {
        let mut access = AccessTracker::new();
        let mut store = store(0);

        store.set(key(1), "v".to_string(), TTL, 0, &mut access);

        assert!(store.is_empty());
        assert!(access.is_empty());
        assert_eq!(store.get(&key(1), 0, &mut access), None);
    }

    #[test]
    fn test_store_zero_ttl_never_hits() {
        let mut access = AccessTracker::new();
        let mut store = store(10);

        store.set(key(1), "v".to_string(), Duration::ZERO, 0, &mut access);
        assert_eq!(store.get(&key(1), 0, &mut access), None);
    }

    #[test]
    fn test_store_delete() {
        let mut access = AccessTracker::new();
        let mut store = store(10);
        store.set(key(1), "v".to_string(), TTL, 0, &mut access);

        assert!(store.delete(&key(1), &mut access));
        assert!(!store.delete(&key(1), &mut access));
        assert!(store.is_empty());
        assert!(access.is_empty());
    }

    #[test]
    fn test_store_delete_where() {
        let mut access = AccessTracker::new();
        let mut store = store(10);
        for n in 1..=5 {
            store.set(key(n), "v".to_string(), TTL, 0, &mut access);
        }

        let removed = store.delete_where(
            |k| k.as_str().ends_with(":2") || k.as_str().ends_with(":4"),
            &mut access,
        );

        assert_eq!(removed, 2);
        assert_eq!(store.len(), 3);
        assert_eq!(access.len(), 3);
    }

    #[test]
    fn test_store_cleanup_expired() {
        let mut access = AccessTracker::new();
        let mut store = store(10);
        store.set(key(1), "short".to_string(), Duration::from_secs(1), 0, &mut access);
        store.set(key(2), "long".to_string(), Duration::from_secs(10), 0, &mut access);

        assert_eq!(store.cleanup_expired(1_000, &mut access), 1);
        assert_eq!(store.len(), 1);
        assert!(store.get(&key(2), 1_000, &mut access).is_some());
        assert!(!access.contains(&key(1)));
    }

    #[test]
    fn test_store_clear() {
        let mut access = AccessTracker::new();
        let mut store = store(10);
        store.set(key(1), "v".to_string(), TTL, 0, &mut access);

        store.clear(&mut access);
        assert!(store.is_empty());
        assert!(access.is_empty());
    }
}
