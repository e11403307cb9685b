//! Response DTOs for the demonstration API
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::Serialize;

use crate::cache::CacheStats;

/// Cache section of the health report.
#[derive(Debug, Clone, Serialize)]
pub struct CacheHealth {
    /// "healthy" or "unhealthy"
    pub status: String,
    /// Whether the probe value was read back unchanged
    pub read_write_test: bool,
    /// Share of capacity occupied, in `0.0..=1.0`
    pub fill_ratio: f64,
}

impl CacheHealth {
    pub fn new(read_back: bool, stats: &CacheStats) -> Self {
        Self {
            status: if read_back { "healthy" } else { "unhealthy" }.to_string(),
            read_write_test: read_back,
            fill_ratio: stats.fill_ratio(),
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Overall status
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
    /// Probe result and fill ratio
    pub cache: CacheHealth,
    /// Cache occupancy snapshot
    pub cache_stats: CacheStats,
}

impl HealthResponse {
    pub fn new(read_back: bool, cache_stats: CacheStats) -> Self {
        let cache = CacheHealth::new(read_back, &cache_stats);
        Self {
            status: cache.status.clone(),
            timestamp: chrono::Utc::now().to_rfc3339(),
            cache,
            cache_stats,
        }
    }
}

/// Response body for DELETE /cache
#[derive(Debug, Clone, Serialize)]
pub struct ClearResponse {
    pub message: String,
    /// Entries present before clearing
    pub cleared: usize,
}

impl ClearResponse {
    pub fn new(cleared: usize) -> Self {
        Self {
            message: format!("Cleared {} cache entries", cleared),
            cleared,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_response_serialize() {
        let stats = CacheStats {
            total_entries: 5,
            active_entries: 5,
            max_size: 20,
            ..Default::default()
        };
        let resp = HealthResponse::new(true, stats);
        let json = serde_json::to_value(&resp).unwrap();

        assert_eq!(json["status"], "healthy");
        assert!(json["timestamp"].is_string());
        assert_eq!(json["cache"]["status"], "healthy");
        assert_eq!(json["cache"]["read_write_test"], true);
        assert_eq!(json["cache"]["fill_ratio"], 0.25);
        assert_eq!(json["cache_stats"]["total_entries"], 5);
        assert_eq!(json["cache_stats"]["max_size"], 20);
    }

    #[test]
    fn test_failed_read_back_is_unhealthy() {
        let resp = HealthResponse::new(false, CacheStats::default());

        assert_eq!(resp.status, "unhealthy");
        assert_eq!(resp.cache.status, "unhealthy");
        assert!(!resp.cache.read_write_test);
        assert_eq!(resp.cache.fill_ratio, 0.0);
    }

    #[test]
    fn test_clear_response_serialize() {
        let resp = ClearResponse::new(4);
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("\"cleared\":4"));
    }
}
