//! Record shapes stored by the tag cache
//!
//! The cache never looks inside these; it only clones them in and out.

pub mod tag;

pub use tag::{Tag, TagSearchResult, TagStatistics};
