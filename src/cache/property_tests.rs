//! Property-Based Tests for the Cache Module
//!
//! Uses proptest to verify store invariants over arbitrary operation
//! sequences.

use proptest::prelude::*;
use serde_json::{json, Value};

use crate::cache::{canonical_string, make_key, CacheStore};
use crate::config::CacheConfig;
use crate::storage::MemoryTier;

// == Test Configuration ==
const TEST_MAX_ENTRIES: usize = 100;

fn test_store(max_entries: usize) -> CacheStore {
    CacheStore::new(
        CacheConfig::with_max_entries(max_entries),
        Box::new(MemoryTier::new()),
    )
}

// == Strategies ==
/// Generates cache keys
fn key_strategy() -> impl Strategy<Value = String> {
    "[a-z0-9_:.]{1,32}"
}

/// Generates JSON payloads of the shapes the dashboard actually caches
fn value_strategy() -> impl Strategy<Value = Value> {
    prop_oneof![
        "[a-zA-Z0-9 ]{0,64}".prop_map(Value::from),
        any::<f64>().prop_filter("finite", |f| f.is_finite()).prop_map(|f| json!(f)),
        prop::collection::vec(any::<i64>(), 0..8).prop_map(|v| json!(v)),
        ("[a-z]{1,8}", any::<i64>()).prop_map(|(s, n)| {
            let mut map = serde_json::Map::new();
            map.insert(s, json!(n));
            Value::Object(map)
        }),
    ]
}

/// A sequence element for operation-sequence properties
#[derive(Debug, Clone)]
enum CacheOp {
    Set { key: String, value: Value },
    Get { key: String },
    Delete { key: String },
}

fn cache_op_strategy() -> impl Strategy<Value = CacheOp> {
    prop_oneof![
        (key_strategy(), value_strategy())
            .prop_map(|(key, value)| CacheOp::Set { key, value }),
        key_strategy().prop_map(|key| CacheOp::Get { key }),
        key_strategy().prop_map(|key| CacheOp::Delete { key }),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // Property: over any operation sequence, hit/miss/set/delete counters
    // match the operations that actually occurred.
    #[test]
    fn prop_statistics_accuracy(ops in prop::collection::vec(cache_op_strategy(), 1..50)) {
        let mut store = test_store(TEST_MAX_ENTRIES);
        let mut expected_hits: u64 = 0;
        let mut expected_misses: u64 = 0;
        let mut expected_sets: u64 = 0;
        let mut expected_deletes: u64 = 0;

        for op in ops {
            match op {
                CacheOp::Set { key, value } => {
                    store.set(&key, value, None);
                    expected_sets += 1;
                }
                CacheOp::Get { key } => {
                    match store.get(&key) {
                        Some(_) => expected_hits += 1,
                        None => expected_misses += 1,
                    }
                }
                CacheOp::Delete { key } => {
                    store.delete(&key);
                    expected_deletes += 1;
                }
            }
        }

        let stats = store.stats();
        prop_assert_eq!(stats.hits, expected_hits, "Hits mismatch");
        prop_assert_eq!(stats.misses, expected_misses, "Misses mismatch");
        prop_assert_eq!(stats.sets, expected_sets, "Sets mismatch");
        prop_assert_eq!(stats.deletes, expected_deletes, "Deletes mismatch");
        prop_assert_eq!(stats.size, store.len(), "Size mismatch");
    }

    // Property: storing a value and reading it back before expiry returns
    // exactly the stored value.
    #[test]
    fn prop_roundtrip_storage(key in key_strategy(), value in value_strategy()) {
        let mut store = test_store(TEST_MAX_ENTRIES);

        store.set(&key, value.clone(), None);

        let retrieved = store.get(&key);
        prop_assert_eq!(retrieved, Some(value), "Round-trip value mismatch");
    }

    // Property: after a delete, a get for that key misses.
    #[test]
    fn prop_delete_removes_entry(key in key_strategy(), value in value_strategy()) {
        let mut store = test_store(TEST_MAX_ENTRIES);

        store.set(&key, value, None);
        prop_assert!(store.get(&key).is_some(), "Key should exist before delete");

        store.delete(&key);

        prop_assert!(store.get(&key).is_none(), "Key should not exist after delete");
    }

    // Property: writing the same key twice leaves exactly one entry holding
    // the second value.
    #[test]
    fn prop_overwrite_semantics(
        key in key_strategy(),
        value1 in value_strategy(),
        value2 in value_strategy()
    ) {
        let mut store = test_store(TEST_MAX_ENTRIES);

        store.set(&key, value1, None);
        store.set(&key, value2.clone(), None);

        let retrieved = store.get(&key);
        prop_assert_eq!(retrieved, Some(value2), "Overwrite should return new value");
        prop_assert_eq!(store.len(), 1, "Exactly one entry after overwrite");
    }

    // Property: the memory tier never exceeds its configured capacity.
    #[test]
    fn prop_capacity_enforcement(
        entries in prop::collection::vec((key_strategy(), value_strategy()), 1..200)
    ) {
        let max_entries = 50;
        let mut store = test_store(max_entries);

        for (key, value) in entries {
            store.set(&key, value, None);
            prop_assert!(
                store.len() <= max_entries,
                "Cache size {} exceeds max {}",
                store.len(),
                max_entries
            );
        }
    }

    // Property: canonical serialization is insensitive to object key order,
    // so structurally identical parameters always produce identical keys.
    #[test]
    fn prop_key_determinism(
        map in prop::collection::hash_map("[a-z]{1,8}", any::<i64>(), 1..6)
    ) {
        let pairs: Vec<(String, i64)> = map.into_iter().collect();
        let forward: serde_json::Map<String, Value> = pairs
            .iter()
            .map(|(k, v)| (k.clone(), json!(v)))
            .collect();
        let reverse: serde_json::Map<String, Value> = pairs
            .iter()
            .rev()
            .map(|(k, v)| (k.clone(), json!(v)))
            .collect();

        prop_assert_eq!(
            canonical_string(&Value::Object(forward.clone())),
            canonical_string(&Value::Object(reverse.clone()))
        );
        prop_assert_eq!(
            make_key("chart", &[Value::Object(forward)]),
            make_key("chart", &[Value::Object(reverse)])
        );
    }
}

// Property tests for LRU eviction behavior
proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // Property: filling the cache to capacity and inserting one more key
    // evicts the least recently accessed entry, and only that one.
    #[test]
    fn prop_lru_eviction_order(
        initial_keys in prop::collection::vec(key_strategy(), 3..10),
        new_key in key_strategy(),
        new_value in value_strategy()
    ) {
        let unique_keys: Vec<String> = initial_keys
            .into_iter()
            .collect::<std::collections::HashSet<_>>()
            .into_iter()
            .collect();

        prop_assume!(unique_keys.len() >= 2);
        prop_assume!(!unique_keys.contains(&new_key));

        let capacity = unique_keys.len();
        let mut store = test_store(capacity);

        let oldest_key = unique_keys[0].clone();
        for key in &unique_keys {
            store.set(key, json!(format!("value_{key}")), None);
        }

        prop_assert_eq!(store.len(), capacity, "Cache should be at capacity");

        store.set(&new_key, new_value, None);

        prop_assert_eq!(store.len(), capacity, "Cache should remain at capacity");
        prop_assert!(
            store.get(&oldest_key).is_none(),
            "Oldest key '{}' should have been evicted",
            oldest_key
        );
        prop_assert!(store.get(&new_key).is_some(), "New key should exist");

        for key in unique_keys.iter().skip(1) {
            prop_assert!(
                store.get(key).is_some(),
                "Key '{}' should still exist (not the oldest)",
                key
            );
        }
    }

    // Property: reading a key protects it from the next eviction.
    #[test]
    fn prop_lru_access_tracking(
        keys in prop::collection::vec(key_strategy(), 3..8),
        new_key in key_strategy(),
        new_value in value_strategy()
    ) {
        let unique_keys: Vec<String> = keys
            .into_iter()
            .collect::<std::collections::HashSet<_>>()
            .into_iter()
            .collect();

        prop_assume!(unique_keys.len() >= 3);
        prop_assume!(!unique_keys.contains(&new_key));

        let capacity = unique_keys.len();
        let mut store = test_store(capacity);

        for key in &unique_keys {
            store.set(key, json!(format!("value_{key}")), None);
        }

        // Touch the would-be eviction candidate
        let accessed_key = unique_keys[0].clone();
        let _ = store.get(&accessed_key);

        let expected_evicted = unique_keys[1].clone();

        store.set(&new_key, new_value, None);

        prop_assert!(
            store.get(&accessed_key).is_some(),
            "Accessed key '{}' should not be evicted",
            accessed_key
        );
        prop_assert!(
            store.get(&expected_evicted).is_none(),
            "Key '{}' should have been evicted as least recently accessed",
            expected_evicted
        );
        prop_assert!(store.get(&new_key).is_some(), "New key should exist");
    }
}

// == Durable Tier Round-Trip Property ==
proptest! {
    #![proptest_config(ProptestConfig::with_cases(50))]

    // Property: any stored value survives a simulated restart through the
    // durable tier.
    #[test]
    fn prop_restart_rehydration(key in key_strategy(), value in value_strategy()) {
        let tier = MemoryTier::new();
        {
            let mut store = CacheStore::new(
                CacheConfig::default(),
                Box::new(tier.clone()),
            );
            store.set(&key, value.clone(), None);
        }

        let mut restarted = CacheStore::new(CacheConfig::default(), Box::new(tier));
        prop_assert_eq!(restarted.get(&key), Some(value), "Rehydration mismatch");
    }
}
