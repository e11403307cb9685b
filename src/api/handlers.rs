//! API Handlers
//!
//! HTTP handlers exposing cache health and occupancy.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use axum::{extract::State, Json};
use serde_json::Value;

use crate::cache::{BoundedCache, CacheStats};
use crate::config::Config;
use crate::limiter::RateLimiter;
use crate::models::{ClearResponse, HealthResponse};

const HEALTH_PROBE_PREFIX: &str = "health_check";
const HEALTH_PROBE_TTL: Duration = Duration::from_secs(60);

static HEALTH_PROBE_SEQ: AtomicU64 = AtomicU64::new(0);

/// Unique per call, so concurrent health checks never touch each other's entry.
fn health_probe_key() -> String {
    let seq = HEALTH_PROBE_SEQ.fetch_add(1, Ordering::Relaxed);
    format!("{}_{}", HEALTH_PROBE_PREFIX, seq)
}

/// Application state shared across all handlers.
///
/// One cache and one limiter per process, injected here rather than held in
/// globals.
#[derive(Clone)]
pub struct AppState {
    /// Shared response cache
    pub cache: Arc<BoundedCache<Value>>,
    /// Shared request limiter
    pub limiter: Arc<RateLimiter>,
}

impl AppState {
    pub fn new(cache: BoundedCache<Value>, limiter: RateLimiter) -> Self {
        Self {
            cache: Arc::new(cache),
            limiter: Arc::new(limiter),
        }
    }

    /// Builds both primitives from configuration.
    pub fn from_config(config: &Config) -> Self {
        Self::new(
            BoundedCache::new(config.max_entries, config.default_ttl()),
            RateLimiter::new(config.rate_limit.clone()),
        )
    }
}

/// Handler for GET /health
///
/// Writes, reads back and deletes a probe entry, then reports the result
/// with a stats snapshot.
pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    let key = health_probe_key();
    let probe = Value::String("ok".to_string());
    state.cache.set(key.as_str(), probe.clone(), Some(HEALTH_PROBE_TTL));
    let read_back = state.cache.get(&key) == Some(probe);
    state.cache.delete(&key);

    Json(HealthResponse::new(read_back, state.cache.stats()))
}

/// Handler for GET /stats
pub async fn stats_handler(State(state): State<AppState>) -> Json<CacheStats> {
    Json(state.cache.stats())
}

/// Handler for DELETE /cache
pub async fn clear_handler(State(state): State<AppState>) -> Json<ClearResponse> {
    let cleared = state.cache.size();
    state.cache.clear();
    Json(ClearResponse::new(cleared))
}
