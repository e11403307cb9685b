//! Rate limiter configuration.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::GuardError;

/// Default calls allowed per window
pub const DEFAULT_LIMIT: u64 = 100;

/// Default window length in seconds
pub const DEFAULT_WINDOW_SECS: u64 = 3600;

/// How stale window records are reclaimed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SweepMode {
    /// Scan every tracked identifier on every call.
    #[default]
    EveryCall,
    /// Check only the caller's own record; stale records of idle identifiers
    /// wait for [`RateLimiter::sweep`](super::RateLimiter::sweep), usually run
    /// by the background cleanup task.
    Lazy,
}

impl fmt::Display for SweepMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EveryCall => write!(f, "every_call"),
            Self::Lazy => write!(f, "lazy"),
        }
    }
}

impl FromStr for SweepMode {
    type Err = GuardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "every_call" | "every-call" => Ok(Self::EveryCall),
            "lazy" => Ok(Self::Lazy),
            other => Err(GuardError::InvalidConfig(format!(
                "unknown rate limit sweep mode '{}'",
                other
            ))),
        }
    }
}

/// Defaults applied by [`RateLimiter::check`](super::RateLimiter::check).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateLimitConfig {
    /// Calls allowed per window before `check` reports exceeded
    pub limit: u64,
    /// Window length in seconds
    pub window_secs: u64,
    /// Stale record reclamation strategy
    #[serde(default)]
    pub sweep: SweepMode,
}

impl RateLimitConfig {
    pub fn window(&self) -> Duration {
        Duration::from_secs(self.window_secs)
    }
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            window_secs: DEFAULT_WINDOW_SECS,
            sweep: SweepMode::EveryCall,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = RateLimitConfig::default();
        assert_eq!(config.limit, 100);
        assert_eq!(config.window(), Duration::from_secs(3600));
        assert_eq!(config.sweep, SweepMode::EveryCall);
    }

    #[test]
    fn test_sweep_mode_parse() {
        assert_eq!("lazy".parse::<SweepMode>().unwrap(), SweepMode::Lazy);
        assert_eq!(" Every_Call ".parse::<SweepMode>().unwrap(), SweepMode::EveryCall);
        assert!(matches!(
            "sometimes".parse::<SweepMode>(),
            Err(GuardError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_sweep_mode_display_round_trips() {
        for mode in [SweepMode::EveryCall, SweepMode::Lazy] {
            assert_eq!(mode.to_string().parse::<SweepMode>().unwrap(), mode);
        }
    }
}
