//! API Guard - in-process protective primitives for API layers
//!
//! A bounded cache with TTL expiry and LRU eviction, and a fixed-window
//! per-identifier rate limiter. Both are explicit service instances meant to
//! be shared behind an `Arc` for the lifetime of the process.

pub mod api;
pub mod cache;
pub mod clock;
pub mod config;
pub mod error;
pub mod limiter;
pub mod models;
pub mod tasks;

pub use api::AppState;
pub use cache::{cache_key, BoundedCache, CacheStats};
pub use clock::{Clock, MockClock, SystemClock};
pub use config::Config;
pub use error::{GuardError, Result};
pub use limiter::{RateLimitConfig, RateLimiter, SweepMode};
pub use tasks::spawn_cleanup_task;
