//! Cache Store Module
//!
//! Bounded cache combining HashMap storage with LRU tracking and TTL expiration.

use std::collections::HashMap;
use std::fmt::Display;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tracing::{debug, error};

use crate::cache::{CacheEntry, CacheStats, LruTracker, DEFAULT_TTL_SECS};
use crate::clock::{to_rfc3339, Clock, SystemClock};

// == Inner State ==
/// Map and recency sequence; always mutated together under one lock.
#[derive(Debug)]
struct Inner<V> {
    entries: HashMap<String, CacheEntry<V>>,
    lru: LruTracker,
}

impl<V> Inner<V> {
    fn remove(&mut self, key: &str) -> Option<CacheEntry<V>> {
        self.lru.remove(key);
        self.entries.remove(key)
    }

    fn purge_expired(&mut self, now_ms: u64) -> usize {
        let expired: Vec<String> = self
            .entries
            .iter()
            .filter(|(_, entry)| entry.is_expired(now_ms))
            .map(|(key, _)| key.clone())
            .collect();

        for key in &expired {
            self.remove(key);
        }
        expired.len()
    }
}

// == Bounded Cache ==
/// Capacity-limited key/value cache with per-entry TTL and LRU eviction.
///
/// All operations take `&self`; share one instance behind an `Arc`.
#[derive(Debug)]
pub struct BoundedCache<V, C = SystemClock> {
    inner: Mutex<Inner<V>>,
    max_entries: usize,
    default_ttl: Duration,
    clock: C,
}

impl<V: Clone> BoundedCache<V, SystemClock> {
    // == Constructor ==
    /// Creates a cache using the system clock.
    ///
    /// # Arguments
    /// * `max_entries` - Maximum number of entries the cache can hold
    /// * `default_ttl` - TTL applied by [`BoundedCache::memoize`]
    pub fn new(max_entries: usize, default_ttl: Duration) -> Self {
        Self::with_clock(max_entries, default_ttl, SystemClock)
    }
}

impl<V: Clone> Default for BoundedCache<V, SystemClock> {
    fn default() -> Self {
        Self::new(
            crate::cache::DEFAULT_MAX_ENTRIES,
            Duration::from_secs(DEFAULT_TTL_SECS),
        )
    }
}

impl<V: Clone, C: Clock> BoundedCache<V, C> {
    /// Creates a cache reading time from `clock`.
    pub fn with_clock(max_entries: usize, default_ttl: Duration, clock: C) -> Self {
        Self {
            inner: Mutex::new(Inner {
                entries: HashMap::new(),
                lru: LruTracker::new(),
            }),
            max_entries,
            default_ttl,
            clock,
        }
    }

    fn lock(&self) -> MutexGuard<'_, Inner<V>> {
        // Every mutation leaves map and sequence consistent before it can
        // panic, so a poisoned guard is still usable.
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    // == Get ==
    /// Returns the value if present and not expired, marking it most
    /// recently used.
    ///
    /// Expired entries are reported as absent but left in place until the
    /// next purge.
    pub fn get(&self, key: &str) -> Option<V> {
        let now = self.clock.now_ms();
        let mut inner = self.lock();

        let value = match inner.entries.get(key) {
            Some(entry) if !entry.is_expired(now) => entry.value.clone(),
            _ => return None,
        };
        inner.lru.touch(key);
        Some(value)
    }

    // == Set ==
    /// Stores `value` under `key` and returns it.
    ///
    /// Purges expired entries first. If the cache is still full and `key` is
    /// new, the least recently used entry is evicted whether or not it has
    /// expired. `ttl = None` stores an entry that never expires.
    pub fn set(&self, key: impl Into<String>, value: V, ttl: Option<Duration>) -> V {
        let key = key.into();
        let now = self.clock.now_ms();
        let mut inner = self.lock();

        let purged = inner.purge_expired(now);
        if purged > 0 {
            debug!(purged, "purged expired cache entries");
        }

        if !inner.entries.contains_key(&key) && inner.entries.len() >= self.max_entries {
            if let Some(evicted) = inner.lru.evict_oldest() {
                inner.entries.remove(&evicted);
                debug!(key = %evicted, "evicted least recently used entry");
            }
        }

        // Capacity zero: nothing can be retained.
        if self.max_entries == 0 {
            return value;
        }

        inner
            .entries
            .insert(key.clone(), CacheEntry::new(value.clone(), ttl, now));
        inner.lru.touch(&key);
        value
    }

    // == Delete ==
    /// Removes `key`. No-op if absent.
    pub fn delete(&self, key: &str) {
        self.lock().remove(key);
    }

    /// Empties the cache.
    pub fn clear(&self) {
        let mut inner = self.lock();
        inner.entries.clear();
        inner.lru.clear();
    }

    /// Number of physically present entries, including unpurged expired ones.
    pub fn size(&self) -> usize {
        self.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.size() == 0
    }

    pub fn max_size(&self) -> usize {
        self.max_entries
    }

    pub fn default_ttl(&self) -> Duration {
        self.default_ttl
    }

    // == Stats ==
    /// Scans all entries and returns a snapshot. Does not purge.
    pub fn stats(&self) -> CacheStats {
        let now = self.clock.now_ms();
        let inner = self.lock();

        let total_entries = inner.entries.len();
        let expired_entries = inner
            .entries
            .values()
            .filter(|entry| entry.is_expired(now))
            .count();
        let oldest_entry = inner
            .entries
            .values()
            .map(|entry| entry.created_at)
            .min()
            .and_then(to_rfc3339);

        CacheStats {
            total_entries,
            expired_entries,
            active_entries: total_entries - expired_entries,
            max_size: self.max_entries,
            oldest_entry,
        }
    }

    // == Purge Expired ==
    /// Physically removes every expired entry, returning how many went.
    pub fn purge_expired(&self) -> usize {
        let now = self.clock.now_ms();
        self.lock().purge_expired(now)
    }

    // == Fetch ==
    /// Returns the cached value for `key`, or runs `producer` and caches
    /// its result with `ttl`.
    ///
    /// The lock is not held while `producer` runs, so concurrent misses on
    /// the same key each run their own producer. A producer error is
    /// returned unchanged and nothing is cached.
    pub fn fetch<F, E>(&self, key: &str, ttl: Option<Duration>, producer: F) -> Result<V, E>
    where
        F: FnOnce() -> Result<V, E>,
    {
        if let Some(value) = self.get(key) {
            return Ok(value);
        }

        let value = producer()?;
        Ok(self.set(key, value, ttl))
    }

    /// [`BoundedCache::fetch`] with the cache's default TTL.
    pub fn memoize<F, E>(&self, key: &str, producer: F) -> Result<V, E>
    where
        F: FnOnce() -> Result<V, E>,
    {
        self.fetch(key, Some(self.default_ttl), producer)
    }

    /// Like [`BoundedCache::fetch`], but a producer failure is logged and
    /// replaced by `fallback`. Nothing is cached on failure.
    pub fn fetch_or_fallback<F, E>(
        &self,
        key: &str,
        ttl: Option<Duration>,
        fallback: V,
        producer: F,
    ) -> V
    where
        F: FnOnce() -> Result<V, E>,
        E: Display,
    {
        match self.fetch(key, ttl, producer) {
            Ok(value) => value,
            Err(err) => {
                error!(key, error = %err, "cache producer failed, using fallback");
                fallback
            }
        }
    }

    /// Checks that the map and the recency sequence hold the same key set.
    #[cfg(test)]
    pub(crate) fn is_consistent(&self) -> bool {
        let inner = self.lock();
        inner.lru.len() == inner.entries.len()
            && inner.lru.iter().all(|k| inner.entries.contains_key(k))
    }
}
