//! Tag Cache Module
//!
//! The three tag namespaces (lists, statistics, search results) behind one
//! handle, sharing a single access tracker and clock.

use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::cache::{
    build_key, AccessTracker, CacheKey, CacheStats, Clock, KeyParams, NamespaceStore, SystemClock,
};
use crate::config::CacheConfig;
use crate::models::{Tag, TagSearchResult, TagStatistics};

// == Operation Names ==
/// Operation component of tag list keys
pub const TAG_LIST_OP: &str = "tagList";
/// Operation component of tag statistics keys
pub const TAG_STATS_OP: &str = "tagStats";
/// Operation component of tag search keys
pub const TAG_SEARCH_OP: &str = "tagSearch";

/// A [`TagCache`] behind the one lock that guards all three namespaces.
///
/// Every operation, reads included, needs the write half: lookups update
/// recency and may drop expired entries.
pub type SharedTagCache = Arc<RwLock<TagCache>>;

// == Tag Cache ==
/// Per-user cache for tag lists, tag statistics and tag search results.
///
/// The cache never fetches anything. On a miss the caller loads the data from
/// the backend and stores it back with the matching setter.
#[derive(Debug)]
pub struct TagCache {
    tag_list: NamespaceStore<Vec<Tag>>,
    tag_stats: NamespaceStore<Vec<TagStatistics>>,
    tag_search: NamespaceStore<Vec<TagSearchResult>>,
    /// Recency shared by all three stores
    access: AccessTracker,
    clock: Arc<dyn Clock>,
}

impl TagCache {
    // == Constructor ==
    /// Creates an empty cache reading wall-clock time.
    pub fn new(config: &CacheConfig) -> Self {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    /// Creates an empty cache reading time from `clock`.
    pub fn with_clock(config: &CacheConfig, clock: Arc<dyn Clock>) -> Self {
        Self {
            tag_list: NamespaceStore::new(TAG_LIST_OP, config.tag_list),
            tag_stats: NamespaceStore::new(TAG_STATS_OP, config.tag_stats),
            tag_search: NamespaceStore::new(TAG_SEARCH_OP, config.tag_search),
            access: AccessTracker::new(),
            clock,
        }
    }

    /// Wraps the cache for sharing across tasks.
    pub fn into_shared(self) -> SharedTagCache {
        Arc::new(RwLock::new(self))
    }

    // == Tag List ==
    pub fn get_tag_list(&mut self, user_id: &str) -> Option<Vec<Tag>> {
        let key = build_key(user_id, TAG_LIST_OP, &KeyParams::new());
        let now = self.clock.now_ms();
        self.tag_list.get(&key, now, &mut self.access)
    }

    pub fn set_tag_list(&mut self, user_id: &str, tags: Vec<Tag>) {
        let key = build_key(user_id, TAG_LIST_OP, &KeyParams::new());
        let now = self.clock.now_ms();
        self.tag_list.set_default(key, tags, now, &mut self.access);
    }

    // == Tag Statistics ==
    pub fn get_tag_statistics(
        &mut self,
        user_id: &str,
        params: &KeyParams,
    ) -> Option<Vec<TagStatistics>> {
        let key = build_key(user_id, TAG_STATS_OP, params);
        let now = self.clock.now_ms();
        self.tag_stats.get(&key, now, &mut self.access)
    }

    pub fn set_tag_statistics(
        &mut self,
        user_id: &str,
        stats: Vec<TagStatistics>,
        params: &KeyParams,
    ) {
        let key = build_key(user_id, TAG_STATS_OP, params);
        let now = self.clock.now_ms();
        self.tag_stats.set_default(key, stats, now, &mut self.access);
    }

    // == Tag Search ==
    pub fn get_tag_search_results(
        &mut self,
        user_id: &str,
        query: &str,
        limit: usize,
    ) -> Option<Vec<TagSearchResult>> {
        let key = build_key(user_id, TAG_SEARCH_OP, &search_params(query, limit));
        let now = self.clock.now_ms();
        self.tag_search.get(&key, now, &mut self.access)
    }

    pub fn set_tag_search_results(
        &mut self,
        user_id: &str,
        query: &str,
        results: Vec<TagSearchResult>,
        limit: usize,
    ) {
        let key = build_key(user_id, TAG_SEARCH_OP, &search_params(query, limit));
        let now = self.clock.now_ms();
        self.tag_search.set_default(key, results, now, &mut self.access);
    }

    // == Invalidation ==
    /// Drops every cached entry of `user_id` in all three namespaces.
    ///
    /// Returns the number of entries removed.
    pub fn invalidate_user(&mut self, user_id: &str) -> usize {
        let access = &mut self.access;
        let owned_by = |key: &CacheKey| key.belongs_to(user_id);

        let removed = self.tag_list.delete_where(owned_by, access)
            + self.tag_stats.delete_where(owned_by, access)
            + self.tag_search.delete_where(owned_by, access);

        debug!(user_id, removed, "Invalidated user tag cache");
        removed
    }

    /// Same as [`TagCache::invalidate_user`].
    pub fn invalidate_user_tag_cache(&mut self, user_id: &str) -> usize {
        self.invalidate_user(user_id)
    }

    /// Invalidates after a change to tag `tag_id`.
    ///
    /// Currently flushes the whole per-user cache: cached lists, statistics
    /// and search results are not indexed by the tags they contain.
    pub fn invalidate_tag(&mut self, user_id: &str, tag_id: &str) -> usize {
        debug!(user_id, tag_id, "Tag changed, flushing user tag cache");
        self.invalidate_user(user_id)
    }

    // == Maintenance ==
    /// Removes every expired entry from every namespace.
    ///
    /// Idempotent. Returns the number of entries removed.
    pub fn cleanup(&mut self) -> usize {
        let now = self.clock.now_ms();
        let removed = self.tag_list.cleanup_expired(now, &mut self.access)
            + self.tag_stats.cleanup_expired(now, &mut self.access)
            + self.tag_search.cleanup_expired(now, &mut self.access);

        if removed > 0 {
            info!(removed, "Tag cache sweep removed expired entries");
        } else {
            debug!("Tag cache sweep found no expired entries");
        }
        removed
    }

    /// Drops everything in every namespace.
    pub fn clear(&mut self) {
        self.tag_list.clear(&mut self.access);
        self.tag_stats.clear(&mut self.access);
        self.tag_search.clear(&mut self.access);
    }

    // == Stats ==
    /// Returns entry counts per namespace and the total.
    pub fn stats(&self) -> CacheStats {
        CacheStats::new(
            self.tag_list.stats(),
            self.tag_stats.stats(),
            self.tag_search.stats(),
        )
    }

    // == Length ==
    /// Total number of entries over all namespaces, expired or not.
    pub fn len(&self) -> usize {
        self.tag_list.len() + self.tag_stats.len() + self.tag_search.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of keys with recorded recency. Always equals [`TagCache::len`].
    pub fn tracked_keys(&self) -> usize {
        self.access.len()
    }
}

fn search_params(query: &str, limit: usize) -> KeyParams {
    KeyParams::new().with("query", query).with("limit", limit)
}
