//! Cache Entry Module
//!
//! Defines a single timestamped cache entry with its own TTL.

use std::time::Duration;

use crate::cache::clock::duration_ms;

// == Cache Entry ==
/// A stored value together with the time it was inserted and its lifetime.
///
/// `created_at` is fixed at insertion; reads never refresh it, so an entry
/// always dies at `created_at + ttl`.
#[derive(Debug, Clone, PartialEq)]
pub struct CacheEntry<T> {
    /// The stored value
    pub value: T,
    /// Insertion timestamp (Unix milliseconds)
    pub created_at: u64,
    /// Lifetime counted from `created_at`
    pub ttl: Duration,
}

impl<T> CacheEntry<T> {
    // == Constructor ==
    /// Creates an entry inserted at `now_ms`.
    pub fn new(value: T, now_ms: u64, ttl: Duration) -> Self {
        Self {
            value,
            created_at: now_ms,
            ttl,
        }
    }

    // == Is Expired ==
    /// Checks whether the entry is expired at `now_ms`.
    ///
    /// Boundary condition: expired once `now - created_at >= ttl`, so a zero
    /// TTL entry is expired immediately. A clock that moved backwards counts
    /// as zero elapsed time.
    pub fn is_expired(&self, now_ms: u64) -> bool {
        now_ms.saturating_sub(self.created_at) >= duration_ms(self.ttl)
    }

    // == Time To Live ==
    /// Returns remaining lifetime in milliseconds, 0 once expired.
    pub fn ttl_remaining_ms(&self, now_ms: u64) -> u64 {
        self.expires_at().saturating_sub(now_ms)
    }

    /// Absolute expiry time (Unix milliseconds).
    pub fn expires_at(&self) -> u64 {
        self.created_at.saturating_add(duration_ms(self.ttl))
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_creation() {
        let entry = CacheEntry::new("value", 1_000, Duration::from_secs(60));

        assert_eq!(entry.value, "value");
        assert_eq!(entry.created_at, 1_000);
        assert_eq!(entry.expires_at(), 61_000);
        assert!(!entry.is_expired(1_000));
    }

    #[test]
    fn test_expiration_boundary_condition() {
        let entry = CacheEntry::new(1u32, 0, Duration::from_millis(500));

        assert!(!entry.is_expired(499));
        assert!(entry.is_expired(500), "Entry should be expired at boundary");
        assert!(entry.is_expired(501));
    }

    #[test]
    fn test_zero_ttl_is_expired_immediately() {
        let entry = CacheEntry::new((), 10, Duration::ZERO);
        assert!(entry.is_expired(10));
    }

    #[test]
    fn test_clock_going_backwards_is_not_expiry() {
        let entry = CacheEntry::new((), 10_000, Duration::from_secs(1));
        assert!(!entry.is_expired(5_000));
    }

    #[test]
    fn test_ttl_remaining_ms() {
        let entry = CacheEntry::new((), 0, Duration::from_secs(10));

        assert_eq!(entry.ttl_remaining_ms(0), 10_000);
        assert_eq!(entry.ttl_remaining_ms(9_000), 1_000);
        assert_eq!(entry.ttl_remaining_ms(20_000), 0);
    }
}
