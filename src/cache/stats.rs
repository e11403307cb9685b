//! Cache Statistics Module
//!
//! Point-in-time snapshot consumed by the monitoring endpoint.

use serde::Serialize;

// == Cache Stats ==
/// Snapshot of cache occupancy.
///
/// Field names are a stable contract for health/monitoring consumers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    /// Physically present entries, including not-yet-purged expired ones
    pub total_entries: usize,
    /// Entries whose TTL has elapsed
    pub expired_entries: usize,
    /// `total_entries - expired_entries`
    pub active_entries: usize,
    /// Configured capacity
    pub max_size: usize,
    /// Creation time of the oldest present entry (RFC 3339), if any
    pub oldest_entry: Option<String>,
}

impl CacheStats {
    /// Share of capacity currently occupied, in `0.0..=1.0`.
    ///
    /// Reported by the health endpoint.
    pub fn fill_ratio(&self) -> f64 {
        if self.max_size == 0 {
            0.0
        } else {
            self.total_entries as f64 / self.max_size as f64
        }
    }
}
