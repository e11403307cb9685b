//! Configuration Module
//!
//! Handles loading and managing configuration from environment variables.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::cache::{DEFAULT_MAX_ENTRIES, DEFAULT_TTL_SECS};
use crate::error::{GuardError, Result};
use crate::limiter::{RateLimitConfig, SweepMode, DEFAULT_LIMIT, DEFAULT_WINDOW_SECS};

/// Process configuration.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Maximum number of entries the cache can hold
    pub max_entries: usize,
    /// Default TTL in seconds for memoized values
    pub default_ttl: u64,
    /// Rate limiter defaults
    pub rate_limit: RateLimitConfig,
    /// HTTP server port
    pub server_port: u16,
    /// Background cleanup task interval in seconds
    pub cleanup_interval: u64,
}

fn env_or<T: FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_MAX_ENTRIES` - Maximum cache entries (default: 1000)
    /// - `CACHE_DEFAULT_TTL` - Default TTL in seconds (default: 3600)
    /// - `RATE_LIMIT` - Calls allowed per window (default: 100)
    /// - `RATE_LIMIT_WINDOW` - Window length in seconds (default: 3600)
    /// - `RATE_LIMIT_SWEEP` - `every_call` or `lazy` (default: every_call)
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `CLEANUP_INTERVAL` - Cleanup frequency in seconds (default: 60)
    pub fn from_env() -> Self {
        Self {
            max_entries: env_or("CACHE_MAX_ENTRIES", DEFAULT_MAX_ENTRIES),
            default_ttl: env_or("CACHE_DEFAULT_TTL", DEFAULT_TTL_SECS),
            rate_limit: RateLimitConfig {
                limit: env_or("RATE_LIMIT", DEFAULT_LIMIT),
                window_secs: env_or("RATE_LIMIT_WINDOW", DEFAULT_WINDOW_SECS),
                sweep: env_or("RATE_LIMIT_SWEEP", SweepMode::EveryCall),
            },
            server_port: env_or("SERVER_PORT", 3000),
            cleanup_interval: env_or("CLEANUP_INTERVAL", 60),
        }
    }

    pub fn default_ttl(&self) -> Duration {
        Duration::from_secs(self.default_ttl)
    }

    /// Rejects values the primitives cannot work with.
    pub fn validate(&self) -> Result<()> {
        if self.max_entries == 0 {
            return Err(GuardError::InvalidConfig(
                "CACHE_MAX_ENTRIES must be greater than 0".to_string(),
            ));
        }
        if self.rate_limit.limit == 0 {
            return Err(GuardError::InvalidConfig(
                "RATE_LIMIT must be greater than 0".to_string(),
            ));
        }
        if self.rate_limit.window_secs == 0 {
            return Err(GuardError::InvalidConfig(
                "RATE_LIMIT_WINDOW must be greater than 0".to_string(),
            ));
        }
        if self.cleanup_interval == 0 {
            return Err(GuardError::InvalidConfig(
                "CLEANUP_INTERVAL must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_entries: DEFAULT_MAX_ENTRIES,
            default_ttl: DEFAULT_TTL_SECS,
            rate_limit: RateLimitConfig::default(),
            server_port: 3000,
            cleanup_interval: 60,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.max_entries, 1000);
        assert_eq!(config.default_ttl(), Duration::from_secs(3600));
        assert_eq!(config.rate_limit.limit, 100);
        assert_eq!(config.rate_limit.window_secs, 3600);
        assert_eq!(config.rate_limit.sweep, SweepMode::EveryCall);
        assert_eq!(config.server_port, 3000);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_from_env_defaults() {
        for name in [
            "CACHE_MAX_ENTRIES",
            "CACHE_DEFAULT_TTL",
            "RATE_LIMIT",
            "RATE_LIMIT_WINDOW",
            "RATE_LIMIT_SWEEP",
            "SERVER_PORT",
            "CLEANUP_INTERVAL",
        ] {
            env::remove_var(name);
        }

        let config = Config::from_env();
        assert_eq!(config.max_entries, 1000);
        assert_eq!(config.default_ttl, 3600);
        assert_eq!(config.rate_limit.limit, 100);
        assert_eq!(config.cleanup_interval, 60);
    }

    #[test]
    fn test_validate_rejects_zero_values() {
        let config = Config {
            max_entries: 0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(GuardError::InvalidConfig(_))));

        let mut config = Config::default();
        config.rate_limit.window_secs = 0;
        assert!(matches!(config.validate(), Err(GuardError::InvalidConfig(_))));
    }
}
