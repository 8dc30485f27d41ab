//! LRU Tracker Module
//!
//! Records the order in which keys were last touched, across every
//! namespace, so a full store can evict its least recently used key.

use std::collections::HashMap;

use crate::cache::CacheKey;

// == Access Tracker ==
/// Global access order shared by all namespace stores.
///
/// Every touch stamps the key with the next value of a monotonically
/// increasing counter. Lower sequence number = older access. Sequence numbers
/// are only compared, never exposed outside the cache.
#[derive(Debug, Default)]
pub struct AccessTracker {
    /// Last access sequence number per key
    order: HashMap<CacheKey, u64>,
    /// Last sequence number handed out
    counter: u64,
}

impl AccessTracker {
    // == Constructor ==
    pub fn new() -> Self {
        Self::default()
    }

    // == Touch ==
    /// Marks a key as the most recently used one.
    pub fn touch(&mut self, key: &CacheKey) {
        self.counter += 1;
        match self.order.get_mut(key) {
            Some(seq) => *seq = self.counter,
            None => {
                self.order.insert(key.clone(), self.counter);
            }
        }
    }

    // == Remove ==
    /// Forgets a key.
    pub fn remove(&mut self, key: &CacheKey) {
        self.order.remove(key);
    }

    // == Sequence ==
    /// Last access sequence number of `key`; untracked keys count as oldest.
    pub fn sequence(&self, key: &CacheKey) -> u64 {
        self.order.get(key).copied().unwrap_or(0)
    }

    // == Least Recent ==
    /// Picks the least recently touched key among `keys`.
    ///
    /// Linear in the number of candidates. On equal sequence numbers the
    /// first candidate encountered wins.
    pub fn least_recent<'a, I>(&self, keys: I) -> Option<&'a CacheKey>
    where
        I: IntoIterator<Item = &'a CacheKey>,
    {
        let mut oldest: Option<(&'a CacheKey, u64)> = None;
        for key in keys {
            let seq = self.sequence(key);
            match oldest {
                Some((_, best)) if best <= seq => {}
                _ => oldest = Some((key, seq)),
            }
        }
        oldest.map(|(key, _)| key)
    }

    // == Length ==
    /// Returns the number of tracked keys.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn contains(&self, key: &CacheKey) -> bool {
        self.order.contains_key(key)
    }

    /// Drops every tracked key. The counter keeps running.
    pub fn clear(&mut self) {
        self.order.clear();
    }
}
