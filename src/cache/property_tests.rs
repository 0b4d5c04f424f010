//! Property-Based Tests for Cache Module
//!
//! Uses proptest to check the engine's invariants over generated operation
//! sequences. The engine is async, so each case drives it with
//! `tokio_test::block_on` on a manual clock.

use proptest::prelude::*;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::time::Duration;

use crate::cache::{CacheEngine, ManualClock, SetOptions};
use crate::config::CacheConfig;
use crate::storage::MemoryStore;

// == Test Configuration ==
const TEST_MAX_SIZE: usize = 100;
const START: i64 = 1_700_000_000_000;

async fn open_engine(max_size: usize) -> (CacheEngine, Arc<ManualClock>) {
    let clock = Arc::new(ManualClock::new(START));
    let config = CacheConfig::default().with_max_size(max_size);
    let engine =
        CacheEngine::open_with_clock(Arc::new(MemoryStore::new()), config, clock.clone()).await;
    (engine, clock)
}

// == Strategies ==
/// Generates valid cache keys
fn valid_key_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9_]{1,32}".prop_map(|s| s)
}

/// Generates cache values
fn valid_value_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 ]{0,64}".prop_map(|s| s)
}

/// Generates a sequence of cache operations for testing
#[derive(Debug, Clone)]
enum CacheOp {
    Set { key: String, value: String },
    Get { key: String },
    Remove { key: String },
}

fn cache_op_strategy() -> impl Strategy<Value = CacheOp> {
    // Small key space so operations actually collide.
    let key = "[a-e]";
    prop_oneof![
        (key, valid_value_strategy()).prop_map(|(key, value)| CacheOp::Set { key, value }),
        key.prop_map(|key| CacheOp::Get { key }),
        key.prop_map(|key| CacheOp::Remove { key }),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    // Property 1: Round-trip
    // *For any* key and value, `set` then an immediate `get` returns the value.
    #[test]
    fn prop_roundtrip_storage(key in valid_key_strategy(), value in valid_value_strategy()) {
        tokio_test::block_on(async {
            let (cache, _) = open_engine(TEST_MAX_SIZE).await;

            prop_assert!(cache.set(&key, &value, SetOptions::default()).await);
            let retrieved: Option<String> = cache.get(&key).await;
            prop_assert_eq!(retrieved, Some(value), "Round-trip value mismatch");
            Ok(())
        })?;
    }

    // Property 2: Expiry
    // *For any* TTL, once it has elapsed `get` misses and `has` is false.
    #[test]
    fn prop_ttl_expiration(key in valid_key_strategy(), ttl_ms in 1u64..10_000) {
        tokio_test::block_on(async {
            let (cache, clock) = open_engine(TEST_MAX_SIZE).await;
            cache.set(&key, &1u32, SetOptions::with_ttl(Duration::from_millis(ttl_ms))).await;

            clock.advance(Duration::from_millis(ttl_ms));
            prop_assert!(cache.has(&key).await, "Entry should be live up to its expiry");

            clock.advance(Duration::from_millis(1));
            prop_assert_eq!(cache.get::<u32>(&key).await, None);
            prop_assert!(!cache.has(&key).await);
            prop_assert_eq!(cache.metadata().await.total_misses, 1);
            Ok(())
        })?;
    }

    // Property 3: Statistics Accuracy
    // *For any* sequence of operations, hits and misses match what `get`
    // returned and the entry count matches the live keys.
    #[test]
    fn prop_statistics_accuracy(ops in prop::collection::vec(cache_op_strategy(), 1..40)) {
        tokio_test::block_on(async {
            let (cache, _) = open_engine(TEST_MAX_SIZE).await;
            let mut live: HashSet<String> = HashSet::new();
            let mut expected_hits = 0u64;
            let mut expected_misses = 0u64;

            for op in ops {
                match op {
                    CacheOp::Set { key, value } => {
                        cache.set(&key, &value, SetOptions::default()).await;
                        live.insert(key);
                    }
                    CacheOp::Get { key } => match cache.get::<String>(&key).await {
                        Some(_) => expected_hits += 1,
                        None => expected_misses += 1,
                    },
                    CacheOp::Remove { key } => {
                        cache.remove(&key).await;
                        live.remove(&key);
                    }
                }
            }

            let meta = cache.metadata().await;
            prop_assert_eq!(meta.total_hits, expected_hits, "Hits mismatch");
            prop_assert_eq!(meta.total_misses, expected_misses, "Misses mismatch");
            prop_assert_eq!(meta.total_entries, live.len(), "Entry count mismatch");
            Ok(())
        })?;
    }

    // Property 4: Idempotent Remove
    // *For any* number of repeated removals, the entry count never goes
    // below the number of untouched keys.
    #[test]
    fn prop_remove_idempotent(key in valid_key_strategy(), repeats in 1usize..5) {
        tokio_test::block_on(async {
            let (cache, _) = open_engine(TEST_MAX_SIZE).await;
            cache.set(&key, &1u32, SetOptions::default()).await;

            for _ in 0..repeats {
                cache.remove(&key).await;
            }
            prop_assert_eq!(cache.metadata().await.total_entries, 0);
            Ok(())
        })?;
    }

    // Property 5: Capacity Enforcement
    // *For any* sequence of `set` calls, the entry count never exceeds max_size.
    #[test]
    fn prop_capacity_enforcement(
        entries in prop::collection::vec(
            (valid_key_strategy(), valid_value_strategy(), 1u64..100_000),
            1..120
        ),
        max_size in 1usize..20
    ) {
        tokio_test::block_on(async {
            let (cache, _) = open_engine(max_size).await;

            for (key, value, ttl) in entries {
                cache.set(&key, &value, SetOptions::with_ttl(Duration::from_millis(ttl))).await;
                let count = cache.metadata().await.total_entries;
                prop_assert!(
                    count <= max_size,
                    "Cache size {} exceeds max {}",
                    count,
                    max_size
                );
            }
            Ok(())
        })?;
    }

    // Property 6: Soonest-Expiry Eviction
    // *For any* set of entries with distinct TTLs exceeding max_size, the
    // survivors are exactly the entries that expire last.
    #[test]
    fn prop_evicts_soonest_expiry(
        ttls in prop::collection::hash_set(1u64..1_000_000, 2..30),
        max_size in 1usize..10
    ) {
        let ttls: Vec<u64> = ttls.into_iter().collect();
        prop_assume!(ttls.len() > max_size);

        tokio_test::block_on(async {
            let (cache, _) = open_engine(max_size).await;
            let keyed: HashMap<String, u64> = ttls
                .iter()
                .map(|ttl| (format!("key_{}", ttl), *ttl))
                .collect();

            for (key, ttl) in &keyed {
                cache.set(key, ttl, SetOptions::with_ttl(Duration::from_millis(*ttl))).await;
            }

            let mut by_ttl: Vec<(&String, &u64)> = keyed.iter().collect();
            by_ttl.sort_by_key(|(_, ttl)| **ttl);
            let survivors: HashSet<&String> =
                by_ttl.iter().rev().take(max_size).map(|(k, _)| *k).collect();

            for key in keyed.keys() {
                prop_assert_eq!(
                    cache.has(key).await,
                    survivors.contains(key),
                    "Unexpected eviction outcome for '{}'",
                    key
                );
            }
            Ok(())
        })?;
    }

    // Property 7: Hit Rate
    // *For any* counts of hits and misses, the hit rate is hits/(hits+misses)*100.
    #[test]
    fn prop_hit_rate(hits in 0u64..20, misses in 0u64..20) {
        tokio_test::block_on(async {
            let (cache, _) = open_engine(TEST_MAX_SIZE).await;
            cache.set("present", &1u32, SetOptions::default()).await;

            for _ in 0..hits {
                cache.get::<u32>("present").await;
            }
            for _ in 0..misses {
                cache.get::<u32>("absent").await;
            }

            let expected = if hits + misses == 0 {
                0.0
            } else {
                hits as f64 / (hits + misses) as f64 * 100.0
            };
            let actual = cache.get_hit_rate().await;
            prop_assert!((actual - expected).abs() < 1e-9, "Hit rate {} != {}", actual, expected);
            Ok(())
        })?;
    }

    // Property 8: Prefix Clearing
    // *For any* key set, `clear_by_prefix` removes exactly the keys whose
    // storage key contains the prefix.
    #[test]
    fn prop_clear_by_prefix_exact(
        keys in prop::collection::hash_set("(api|img|fx)_[a-z0-9]{1,6}", 1..20),
        prefix in prop_oneof![Just("api_"), Just("img_"), Just("fx_"), Just("zz")]
    ) {
        tokio_test::block_on(async {
            let (cache, _) = open_engine(TEST_MAX_SIZE).await;
            for key in &keys {
                cache.set(key, &1u32, SetOptions::default()).await;
            }

            let expected_removed = keys.iter().filter(|k| k.contains(prefix)).count();
            prop_assert_eq!(cache.clear_by_prefix(prefix).await, expected_removed);

            for key in &keys {
                prop_assert_eq!(cache.has(key).await, !key.contains(prefix));
            }
            prop_assert_eq!(
                cache.metadata().await.total_entries,
                keys.len() - expected_removed
            );
            Ok(())
        })?;
    }
}

// == Property Test for Error Response Format ==
// This tests the CacheError -> HTTP response conversion

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    // Property 9: Error Response Format
    // *For any* error, the HTTP response carries a JSON body with a string
    // "error" field holding the error message.
    #[test]
    fn prop_error_response_format(error_msg in "[a-zA-Z0-9 _-]{1,100}") {
        use crate::error::CacheError;
        use axum::body::to_bytes;
        use axum::response::IntoResponse;

        let error_variants = vec![
            CacheError::StorageRead(error_msg.clone()),
            CacheError::StorageWrite(error_msg.clone()),
            CacheError::Serialization(error_msg.clone()),
            CacheError::NotFound(error_msg.clone()),
            CacheError::InvalidRequest(error_msg.clone()),
            CacheError::Internal(error_msg.clone()),
        ];

        for error in error_variants {
            let expected_msg = error.to_string();
            let response = error.into_response();

            let content_type = response
                .headers()
                .get("content-type")
                .and_then(|v| v.to_str().ok());
            prop_assert!(
                content_type.map(|ct| ct.contains("application/json")).unwrap_or(false),
                "Response should have JSON content-type"
            );

            let bytes = tokio_test::block_on(to_bytes(response.into_body(), usize::MAX)).unwrap();
            let json: serde_json::Value =
                serde_json::from_slice(&bytes).expect("Response body should be valid JSON");

            prop_assert_eq!(json["error"].as_str(), Some(expected_msg.as_str()));
        }
    }
}
