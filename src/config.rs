//! Configuration Module
//!
//! Per-namespace TTL and capacity policy, loaded from environment variables.

use std::env;
use std::time::Duration;

use crate::error::{CacheError, Result};

// == Defaults ==
/// Default TTL for cached tag lists (5 minutes)
pub const DEFAULT_TAG_LIST_TTL: Duration = Duration::from_secs(5 * 60);
/// Default TTL for cached tag statistics (10 minutes)
pub const DEFAULT_TAG_STATS_TTL: Duration = Duration::from_secs(10 * 60);
/// Default TTL for cached tag search results (2 minutes)
pub const DEFAULT_TAG_SEARCH_TTL: Duration = Duration::from_secs(2 * 60);
/// Default capacity for the tag list and tag statistics namespaces
pub const DEFAULT_CAPACITY: usize = 1000;
/// Default capacity for the tag search namespace
pub const DEFAULT_SEARCH_CAPACITY: usize = 100;
/// Suggested interval between maintenance sweeps
pub const DEFAULT_CLEANUP_INTERVAL: Duration = Duration::from_secs(5 * 60);

/// TTL and capacity bound for a single namespace store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NamespaceConfig {
    /// Lifetime of an entry, counted from insertion
    pub ttl: Duration,
    /// Maximum number of entries the store may hold
    pub capacity: usize,
}

impl NamespaceConfig {
    pub const fn new(ttl: Duration, capacity: usize) -> Self {
        Self { ttl, capacity }
    }
}

/// Tag cache configuration.
///
/// All values can be configured via environment variables with the defaults
/// above. Zero TTLs and zero capacities are accepted: such a namespace simply
/// never serves a hit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheConfig {
    pub tag_list: NamespaceConfig,
    pub tag_stats: NamespaceConfig,
    pub tag_search: NamespaceConfig,
    /// Interval for the optional background sweep driver
    pub cleanup_interval: Duration,
}

impl CacheConfig {
    /// Loads configuration from environment variables.
    ///
    /// # Environment Variables
    /// - `TAG_LIST_TTL_SECS` / `TAG_LIST_CAPACITY` (default: 300 / 1000)
    /// - `TAG_STATS_TTL_SECS` / `TAG_STATS_CAPACITY` (default: 600 / 1000)
    /// - `TAG_SEARCH_TTL_SECS` / `TAG_SEARCH_CAPACITY` (default: 120 / 100)
    /// - `CACHE_CLEANUP_INTERVAL_SECS` (default: 300, must be non-zero)
    ///
    /// Unset variables use the default. Values that do not parse as unsigned
    /// integers are rejected instead of being silently replaced.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Same as [`CacheConfig::from_env`] but reads values through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let secs = |name: &str, default: Duration| -> Result<Duration> {
            Ok(parse_var::<u64, _>(&lookup, name)?
                .map(Duration::from_secs)
                .unwrap_or(default))
        };
        let count = |name: &str, default: usize| -> Result<usize> {
            Ok(parse_var::<usize, _>(&lookup, name)?.unwrap_or(default))
        };

        let config = Self {
            tag_list: NamespaceConfig::new(
                secs("TAG_LIST_TTL_SECS", defaults.tag_list.ttl)?,
                count("TAG_LIST_CAPACITY", defaults.tag_list.capacity)?,
            ),
            tag_stats: NamespaceConfig::new(
                secs("TAG_STATS_TTL_SECS", defaults.tag_stats.ttl)?,
                count("TAG_STATS_CAPACITY", defaults.tag_stats.capacity)?,
            ),
            tag_search: NamespaceConfig::new(
                secs("TAG_SEARCH_TTL_SECS", defaults.tag_search.ttl)?,
                count("TAG_SEARCH_CAPACITY", defaults.tag_search.capacity)?,
            ),
            cleanup_interval: secs("CACHE_CLEANUP_INTERVAL_SECS", defaults.cleanup_interval)?,
        };

        config.validate()?;
        Ok(config)
    }

    /// Rejects settings that cannot work at runtime.
    pub fn validate(&self) -> Result<()> {
        if self.cleanup_interval.is_zero() {
            return Err(CacheError::invalid_config(
                "CACHE_CLEANUP_INTERVAL_SECS",
                "cleanup interval must be greater than zero",
            ));
        }
        Ok(())
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            tag_list: NamespaceConfig::new(DEFAULT_TAG_LIST_TTL, DEFAULT_CAPACITY),
            tag_stats: NamespaceConfig::new(DEFAULT_TAG_STATS_TTL, DEFAULT_CAPACITY),
            tag_search: NamespaceConfig::new(DEFAULT_TAG_SEARCH_TTL, DEFAULT_SEARCH_CAPACITY),
            cleanup_interval: DEFAULT_CLEANUP_INTERVAL,
        }
    }
}

fn parse_var<T, F>(lookup: &F, name: &str) -> Result<Option<T>>
where
    T: std::str::FromStr,
    F: Fn(&str) -> Option<String>,
{
    match lookup(name) {
        None => Ok(None),
        Some(raw) => raw.trim().parse::<T>().map(Some).map_err(|_| {
            CacheError::invalid_config(
                name,
                format!("expected a non-negative integer, got '{}'", raw),
            )
        }),
    }
}
