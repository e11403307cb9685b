//! Rate Limiter Module
//!
//! Fixed-window request counting keyed by caller-supplied identifiers.

mod config;
#[allow(clippy::module_inception)]
mod limiter;
mod window;

pub use config::{RateLimitConfig, SweepMode, DEFAULT_LIMIT, DEFAULT_WINDOW_SECS};
pub use limiter::RateLimiter;
pub use window::RateWindow;
