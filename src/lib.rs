//! Tag Cache - an in-process cache for per-user tag data
//!
//! Caches tag lists, tag statistics and tag search results with a TTL per
//! namespace, LRU eviction on a shared access order, and per-user
//! invalidation.

pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod tasks;

pub use cache::{CacheStats, KeyParams, SharedTagCache, TagCache};
pub use config::CacheConfig;
pub use error::{CacheError, Result};
pub use tasks::spawn_cleanup_task;
