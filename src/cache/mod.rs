//! Cache Module
//!
//! Provides in-memory caching with TTL expiration and LRU eviction.

mod entry;
mod key;
mod lru;
mod stats;
mod store;

#[cfg(test)]
mod property_tests;

// Re-export public types
pub use entry::CacheEntry;
pub use key::{cache_key, KEY_SEPARATOR};
pub use lru::LruTracker;
pub use stats::CacheStats;
pub use store::BoundedCache;

// == Public Constants ==
/// Default capacity of a cache instance
pub const DEFAULT_MAX_ENTRIES: usize = 1000;

/// Default time-to-live in seconds for memoized values
pub const DEFAULT_TTL_SECS: u64 = 3600;
