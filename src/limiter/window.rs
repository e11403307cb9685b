//! Per-identifier fixed window record.

use std::time::Duration;

use crate::clock::duration_ms;

/// Call count within a window anchored at the identifier's first call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateWindow {
    /// Calls counted in this window
    pub count: u64,
    /// Window start (Unix milliseconds)
    pub window_start: u64,
}

impl RateWindow {
    /// Opens a window at `now_ms` with the first call counted.
    pub fn open(now_ms: u64) -> Self {
        Self {
            count: 1,
            window_start: now_ms,
        }
    }

    /// True while `now - window_start < window`.
    pub fn is_live(&self, now_ms: u64, window: Duration) -> bool {
        now_ms.saturating_sub(self.window_start) < duration_ms(window)
    }

    /// Time left before the window elapses.
    pub fn remaining(&self, now_ms: u64, window: Duration) -> Duration {
        let elapsed = now_ms.saturating_sub(self.window_start);
        Duration::from_millis(duration_ms(window).saturating_sub(elapsed))
    }
}
