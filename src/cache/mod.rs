//! Cache Module
//!
//! Per-user tag cache: three TTL namespaces with a shared LRU access order.

mod clock;
mod entry;
mod key;
mod lru;
mod namespace;
mod stats;
mod tag_cache;


// Re-export public types
pub use clock::{current_timestamp_ms, Clock, ManualClock, SystemClock};
pub use entry::CacheEntry;
pub use key::{build_key, CacheKey, KeyParams, KEY_SEPARATOR, PARAM_SEPARATOR};
pub use lru::AccessTracker;
pub use namespace::NamespaceStore;
pub use stats::{CacheStats, NamespaceStats};
pub use tag_cache::{SharedTagCache, TagCache, TAG_LIST_OP, TAG_SEARCH_OP, TAG_STATS_OP};
