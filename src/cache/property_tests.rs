//! Property-Based Tests for Cache Module
//!
//! Uses proptest to check the cache invariants under arbitrary operation
//! sequences.

use proptest::prelude::*;
use std::collections::HashSet;
use std::time::Duration;

use crate::cache::BoundedCache;
use crate::clock::MockClock;

// == Strategies ==
fn key_strategy() -> impl Strategy<Value = String> {
    "[a-f]{1,2}".prop_map(|s| s)
}

fn ttl_strategy() -> impl Strategy<Value = Option<Duration>> {
    prop::option::of((1u64..30).prop_map(Duration::from_secs))
}

#[derive(Debug, Clone)]
enum CacheOp {
    Set {
        key: String,
        value: u32,
        ttl: Option<Duration>,
    },
    Get {
        key: String,
    },
    Delete {
        key: String,
    },
    Advance {
        secs: u64,
    },
}

fn cache_op_strategy() -> impl Strategy<Value = CacheOp> {
    prop_oneof![
        (key_strategy(), any::<u32>(), ttl_strategy())
            .prop_map(|(key, value, ttl)| CacheOp::Set { key, value, ttl }),
        key_strategy().prop_map(|key| CacheOp::Get { key }),
        key_strategy().prop_map(|key| CacheOp::Delete { key }),
        (0u64..20).prop_map(|secs| CacheOp::Advance { secs }),
    ]
}

fn apply(cache: &BoundedCache<u32, MockClock>, clock: &MockClock, op: CacheOp) {
    match op {
        CacheOp::Set { key, value, ttl } => {
            cache.set(key, value, ttl);
        }
        CacheOp::Get { key } => {
            cache.get(&key);
        }
        CacheOp::Delete { key } => cache.delete(&key),
        CacheOp::Advance { secs } => clock.advance_secs(secs),
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    // Size never exceeds capacity and map/recency key sets always agree.
    #[test]
    fn prop_capacity_and_consistency(
        capacity in 1usize..8,
        ops in prop::collection::vec(cache_op_strategy(), 1..80)
    ) {
        let clock = MockClock::starting_at(0);
        let cache = BoundedCache::with_clock(capacity, Duration::from_secs(60), clock.clone());

        for op in ops {
            apply(&cache, &clock, op);
            prop_assert!(cache.size() <= capacity);
            prop_assert!(cache.is_consistent());
        }
    }

    // active + expired always equals total.
    #[test]
    fn prop_stats_arithmetic(ops in prop::collection::vec(cache_op_strategy(), 1..80)) {
        let clock = MockClock::starting_at(0);
        let cache = BoundedCache::with_clock(16, Duration::from_secs(60), clock.clone());

        for op in ops {
            apply(&cache, &clock, op);
        }

        let stats = cache.stats();
        prop_assert_eq!(stats.total_entries, cache.size());
        prop_assert_eq!(stats.active_entries + stats.expired_entries, stats.total_entries);
        prop_assert_eq!(stats.max_size, 16);
    }

    // A value just set is readable until its TTL elapses, then absent.
    #[test]
    fn prop_set_then_get_until_expiry(
        key in key_strategy(),
        value in any::<u32>(),
        ttl_secs in 1u64..1000
    ) {
        let clock = MockClock::starting_at(0);
        let cache = BoundedCache::with_clock(4, Duration::from_secs(60), clock.clone());

        cache.set(key.clone(), value, Some(Duration::from_secs(ttl_secs)));
        prop_assert_eq!(cache.get(&key), Some(value));

        clock.advance_secs(ttl_secs);
        prop_assert_eq!(cache.get(&key), Some(value));

        clock.advance(Duration::from_millis(1));
        prop_assert_eq!(cache.get(&key), None);
    }

    // Filling past capacity evicts exactly the first-inserted, never-read keys.
    #[test]
    fn prop_lru_eviction_order(keys in prop::collection::vec(key_strategy(), 2..12)) {
        let unique: Vec<String> = {
            let mut seen = HashSet::new();
            keys.into_iter().filter(|k| seen.insert(k.clone())).collect()
        };
        prop_assume!(unique.len() >= 2);

        let capacity = unique.len() - 1;
        let cache: BoundedCache<u32, MockClock> =
            BoundedCache::with_clock(capacity, Duration::from_secs(60), MockClock::starting_at(0));

        for (i, key) in unique.iter().enumerate() {
            cache.set(key.clone(), i as u32, None);
        }

        prop_assert_eq!(cache.get(&unique[0]), None);
        for (i, key) in unique.iter().enumerate().skip(1) {
            prop_assert_eq!(cache.get(key), Some(i as u32));
        }
    }
}
