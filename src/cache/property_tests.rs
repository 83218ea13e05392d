//! Property-Based Tests for Cache Module
//!
//! Uses proptest to verify the composite-key codec round trip and the
//! in-memory backend against a reference model.

use proptest::prelude::*;
use std::collections::HashMap;

use crate::cache::{Cache, MemoryCache};
use crate::key;

// == Strategies ==
/// Generates key parts free of the delimiter, including the empty string
fn key_part_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9_./-]{0,32}".prop_map(|s| s)
}

/// Generates arbitrary byte payloads, including empty ones
fn value_strategy() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(any::<u8>(), 0..128)
}

/// Generates a sequence of cache operations for model testing
#[derive(Debug, Clone)]
enum CacheOp {
    Set { key: String, value: Vec<u8> },
    Delete { key: String },
}

fn cache_op_strategy() -> impl Strategy<Value = CacheOp> {
    prop_oneof![
        ("[a-z]{1,8}", value_strategy()).prop_map(|(key, value)| CacheOp::Set { key, value }),
        "[a-z]{1,8}".prop_map(|key| CacheOp::Delete { key }),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // For any prefix and suffix free of the delimiter, decomposing a
    // composed key returns the original parts - including empty ones.
    #[test]
    fn prop_codec_round_trip(prefix in key_part_strategy(), suffix in key_part_strategy()) {
        let composed = key::compose(&prefix, &suffix);
        prop_assert_eq!(key::decompose(&composed), (prefix.as_str(), suffix.as_str()));
    }

    // Composing never alters the parts: the key starts with the prefix and
    // ends with the suffix verbatim.
    #[test]
    fn prop_compose_preserves_content(prefix in key_part_strategy(), suffix in key_part_strategy()) {
        let composed = key::compose(&prefix, &suffix);
        prop_assert!(composed.starts_with(prefix.as_str()));
        prop_assert!(composed.ends_with(suffix.as_str()));
    }

    // For any key-value pair, storing then retrieving returns the exact
    // payload - empty values included, since presence is not truthiness.
    #[test]
    fn prop_memory_round_trip(key in "[a-z;]{1,16}", value in value_strategy()) {
        let cache = MemoryCache::new();

        cache.set(&key, &value, None).unwrap();

        prop_assert_eq!(cache.get(&key).unwrap(), Some(value));
    }

    // For any sequence of set/delete operations, the in-memory backend
    // agrees with a plain map applying the same last-write-wins rules.
    #[test]
    fn prop_memory_matches_model(ops in prop::collection::vec(cache_op_strategy(), 1..50)) {
        let cache = MemoryCache::new();
        let mut model: HashMap<String, Vec<u8>> = HashMap::new();

        for op in ops {
            match op {
                CacheOp::Set { key, value } => {
                    cache.set(&key, &value, None).unwrap();
                    model.insert(key, value);
                }
                CacheOp::Delete { key } => {
                    cache.delete(&key).unwrap();
                    model.remove(&key);
                }
            }
        }

        prop_assert_eq!(cache.len(), model.len());
        for (key, value) in &model {
            let got = cache.get(key).unwrap();
            prop_assert_eq!(got.as_ref(), Some(value));
        }
    }
}
