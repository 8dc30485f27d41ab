//! Error types for the tag cache
//!
//! Lookups never fail (a miss is `None`), so every variant here belongs to
//! construction time.

use thiserror::Error;

// == Cache Error Enum ==
/// Unified error type for the tag cache.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CacheError {
    /// A configuration value could not be used
    #[error("Invalid configuration for {name}: {reason}")]
    InvalidConfig {
        /// Name of the offending setting (usually an env var)
        name: String,
        /// What was wrong with it
        reason: String,
    },
}

impl CacheError {
    /// Shorthand for building an `InvalidConfig` error.
    pub fn invalid_config(name: impl Into<String>, reason: impl Into<String>) -> Self {
        CacheError::InvalidConfig {
            name: name.into(),
            reason: reason.into(),
        }
    }
}

// == Result Type Alias ==
/// Convenience Result type for the tag cache.
pub type Result<T> = std::result::Result<T, CacheError>;
