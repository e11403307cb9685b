//! Fixed-window rate limiter.
//!
//! Each identifier gets a window anchored at its first call. Calls inside
//! the window increment its count; once the window has fully elapsed the
//! record is dropped and the next call opens a fresh window with count 1.
//! Windows do not slide, so a burst straddling a window boundary can see up
//! to twice the limit.

use std::collections::HashMap;
use std::fmt::Display;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tracing::{debug, warn};

use super::{RateLimitConfig, RateWindow, SweepMode};
use crate::clock::{Clock, SystemClock};

/// Thread-safe per-identifier call counter.
#[derive(Debug)]
pub struct RateLimiter<C = SystemClock> {
    config: RateLimitConfig,
    windows: Mutex<HashMap<String, RateWindow>>,
    clock: C,
}

impl RateLimiter<SystemClock> {
    /// Create a new rate limiter with the given configuration.
    pub fn new(config: RateLimitConfig) -> Self {
        Self::with_clock(config, SystemClock)
    }

    /// Builds the identifier for a caller address scoped to an action.
    pub fn identifier(addr: impl Display, action: &str) -> String {
        format!("{}:{}", addr, action)
    }
}

impl Default for RateLimiter<SystemClock> {
    fn default() -> Self {
        Self::new(RateLimitConfig::default())
    }
}

impl<C: Clock> RateLimiter<C> {
    /// Create a rate limiter reading time from `clock`.
    pub fn with_clock(config: RateLimitConfig, clock: C) -> Self {
        Self {
            config,
            windows: Mutex::new(HashMap::new()),
            clock,
        }
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, RateWindow>> {
        self.windows.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn config(&self) -> &RateLimitConfig {
        &self.config
    }

    /// Counts a call for `identifier` and reports whether it exceeded
    /// `limit` within `window`.
    ///
    /// `true` means the caller should be rejected; the call is still counted.
    /// Sweep, increment and comparison happen under one lock.
    pub fn check_and_increment(&self, identifier: &str, limit: u64, window: Duration) -> bool {
        let now = self.clock.now_ms();
        let mut windows = self.lock();

        match self.config.sweep {
            SweepMode::EveryCall => {
                let before = windows.len();
                windows.retain(|_, w| w.is_live(now, window));
                let dropped = before - windows.len();
                if dropped > 0 {
                    debug!(dropped, "swept elapsed rate windows");
                }
            }
            SweepMode::Lazy => {
                if windows
                    .get(identifier)
                    .is_some_and(|w| !w.is_live(now, window))
                {
                    windows.remove(identifier);
                }
            }
        }

        let count = match windows.get_mut(identifier) {
            Some(w) => {
                w.count += 1;
                w.count
            }
            None => {
                debug!(identifier, "opening rate window");
                windows.insert(identifier.to_string(), RateWindow::open(now));
                1
            }
        };

        let exceeded = count > limit;
        if exceeded {
            warn!(identifier, count, limit, "rate limit exceeded");
        }
        exceeded
    }

    /// [`RateLimiter::check_and_increment`] with the configured limit and
    /// window.
    pub fn check(&self, identifier: &str) -> bool {
        self.check_and_increment(identifier, self.config.limit, self.config.window())
    }

    /// Drops every record whose window has elapsed. Returns how many went.
    pub fn sweep(&self, window: Duration) -> usize {
        let now = self.clock.now_ms();
        let mut windows = self.lock();
        let before = windows.len();
        windows.retain(|_, w| w.is_live(now, window));
        before - windows.len()
    }

    /// Current count for `identifier`, if it has a record.
    ///
    /// Records are not checked for expiry here.
    pub fn count(&self, identifier: &str) -> Option<u64> {
        self.lock().get(identifier).map(|w| w.count)
    }

    /// Time left in `identifier`'s window, measured against `window`.
    ///
    /// Pass the same window that was given to
    /// [`RateLimiter::check_and_increment`].
    pub fn retry_after(&self, identifier: &str, window: Duration) -> Option<Duration> {
        let now = self.clock.now_ms();
        self.lock()
            .get(identifier)
            .map(|w| w.remaining(now, window))
    }

    /// Number of identifiers currently holding a record.
    pub fn tracked(&self) -> usize {
        self.lock().len()
    }
}
