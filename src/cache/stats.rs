//! Cache Statistics Module
//!
//! Read-only introspection: entry counts per namespace plus best-effort
//! hit/miss counters. The counters are informational only.

use serde::Serialize;

// == Namespace Stats ==
/// Counters for a single namespace store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NamespaceStats {
    /// Current number of entries
    pub entries: usize,
    /// Configured capacity bound
    pub capacity: usize,
    /// Lookups that returned a value
    pub hits: u64,
    /// Lookups that found nothing or an expired entry
    pub misses: u64,
    /// Entries removed to make room for a new key
    pub evictions: u64,
    /// Entries removed because their TTL elapsed (lazily or by sweep)
    pub expirations: u64,
}

impl NamespaceStats {
    // == Constructor ==
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            ..Self::default()
        }
    }

    // == Hit Rate ==
    /// Returns hits / (hits + misses), or 0.0 if no lookups have been made.
    pub fn hit_rate(&self) -> f64 {
        hit_rate(self.hits, self.misses)
    }

    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    pub fn record_miss(&mut self) {
        self.misses += 1;
    }

    pub fn record_eviction(&mut self) {
        self.evictions += 1;
    }

    pub fn record_expirations(&mut self, count: usize) {
        self.expirations += count as u64;
    }
}

// == Cache Stats ==
/// Snapshot of all three namespaces.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    pub tag_list: NamespaceStats,
    pub tag_stats: NamespaceStats,
    pub tag_search: NamespaceStats,
    /// Sum of entries over every namespace
    pub total_entries: usize,
}

impl CacheStats {
    pub fn new(
        tag_list: NamespaceStats,
        tag_stats: NamespaceStats,
        tag_search: NamespaceStats,
    ) -> Self {
        let total_entries = tag_list.entries + tag_stats.entries + tag_search.entries;
        Self {
            tag_list,
            tag_stats,
            tag_search,
            total_entries,
        }
    }

    /// Combined hit rate over every namespace.
    pub fn hit_rate(&self) -> f64 {
        let namespaces = [&self.tag_list, &self.tag_stats, &self.tag_search];
        let hits = namespaces.iter().map(|ns| ns.hits).sum();
        let misses = namespaces.iter().map(|ns| ns.misses).sum();
        hit_rate(hits, misses)
    }
}

fn hit_rate(hits: u64, misses: u64) -> f64 {
    let total = hits + misses;
    if total == 0 {
        0.0
    } else {
        hits as f64 / total as f64
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_namespace_stats_new() {
        let stats = NamespaceStats::new(100);
        assert_eq!(stats.capacity, 100);
        assert_eq!(stats.entries, 0);
        assert_eq!(stats.hits, 0);
        assert_eq!(stats.evictions, 0);
    }

    #[test]
    fn test_hit_rate_no_requests() {
        assert_eq!(NamespaceStats::new(1).hit_rate(), 0.0);
    }

    #[test]
    fn test_hit_rate_mixed() {
        let mut stats = NamespaceStats::new(1);
        stats.record_hit();
        stats.record_miss();
        assert_eq!(stats.hit_rate(), 0.5);
    }

    #[test]
    fn test_record_eviction_and_expirations() {
        let mut stats = NamespaceStats::new(1);
        stats.record_eviction();
        stats.record_expirations(3);
        assert_eq!(stats.evictions, 1);
        assert_eq!(stats.expirations, 3);
    }

    #[test]
    fn test_cache_stats_totals() {
        let mut list = NamespaceStats::new(1000);
        list.entries = 3;
        list.hits = 3;
        let mut search = NamespaceStats::new(100);
        search.entries = 2;
        search.misses = 1;

        let stats = CacheStats::new(list, NamespaceStats::new(1000), search);
        assert_eq!(stats.total_entries, 5);
        assert_eq!(stats.hit_rate(), 0.75);
    }

    #[test]
    fn test_cache_stats_serializes() {
        let stats = CacheStats::default();
        let json = serde_json::to_value(&stats).unwrap();
        assert_eq!(json["total_entries"], 0);
        assert_eq!(json["tag_search"]["capacity"], 0);
    }
}
