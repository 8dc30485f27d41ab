//! Background Tasks Module
//!
//! Drivers for work the cache does not schedule itself.
//!
//! # Tasks
//! - TTL Cleanup: sweeps expired tag cache entries at a fixed interval

mod cleanup;

pub use cleanup::spawn_cleanup_task;
