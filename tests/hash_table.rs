use chain_hashmap::{bucket_index, ConfigError, HashTable, TableConfig};
use std::collections::BTreeSet;

fn init_test_logger() {
    let _ = env_logger::builder()
        .filter_level(log::LevelFilter::Debug)
        .is_test(true)
        .try_init();
}

#[test]
fn set_get_overwrite_example() {
    let mut m = HashTable::new();
    m.set("a", 1);
    m.set("b", 2);
    m.set("a", 3);
    assert_eq!(m.length(), 2);
    assert_eq!(m.get("a"), Some(&3));
    assert_eq!(m.get("b"), Some(&2));

    let entries: BTreeSet<(&str, i32)> = m.entries().into_iter().map(|(k, v)| (k, *v)).collect();
    assert_eq!(entries, BTreeSet::from([("a", 3), ("b", 2)]));
}

#[test]
fn overwrite_keeps_length() {
    let mut m = HashTable::new();
    m.set("k", "v1".to_string());
    let before = m.length();
    m.set("k", "v2".to_string());
    assert_eq!(m.length(), before);
    assert_eq!(m.get("k").map(String::as_str), Some("v2"));
}

#[test]
fn remove_then_get_reports_absence() {
    let mut m = HashTable::new();
    m.set("gone", 1);
    assert!(m.remove("gone"));
    assert_eq!(m.get("gone"), None);
    assert!(!m.has("gone"));

    m.set("stay", 2);
    let before = m.length();
    assert!(!m.remove("never-inserted"));
    assert_eq!(m.length(), before);
}

#[test]
fn twenty_keys_double_the_table() {
    init_test_logger();
    let mut m = HashTable::with_buckets(16, 0.75).unwrap();
    let words = [
        "apple", "banana", "carrot", "dog", "elephant", "frog", "grape", "hat", "ice cream",
        "jacket", "kite", "lion", "moon", "nest", "orange", "pear", "queen", "robot", "sun",
        "tree",
    ];
    for (i, w) in words.iter().enumerate() {
        m.set(*w, i);
        assert!(m.len() as f64 / m.bucket_count() as f64 <= m.load_factor());
        assert_eq!(m.length(), m.len());
    }
    assert_eq!(m.bucket_count(), 32);
    for (i, w) in words.iter().enumerate() {
        assert_eq!(m.get(w), Some(&i), "lost {w} after rehash");
    }
    assert_eq!(m.keys().len(), 20);
    assert_eq!(m.values().len(), 20);
    assert_eq!(m.entries().len(), 20);
}

#[test]
fn keys_values_entries_round_trip() {
    let mut m = HashTable::new();
    for i in 0..50 {
        m.set(format!("key{i}"), i);
    }
    for i in (0..50).step_by(3) {
        m.set(format!("key{i}"), i * 100);
    }

    let keys: BTreeSet<String> = m.keys().into_iter().map(str::to_string).collect();
    let expected_keys: BTreeSet<String> = (0..50).map(|i| format!("key{i}")).collect();
    assert_eq!(keys, expected_keys);

    let pairs: BTreeSet<(String, i32)> = m
        .entries()
        .into_iter()
        .map(|(k, v)| (k.to_string(), *v))
        .collect();
    let expected: BTreeSet<(String, i32)> = (0..50)
        .map(|i| (format!("key{i}"), if i % 3 == 0 { i * 100 } else { i }))
        .collect();
    assert_eq!(pairs, expected);

    let mut values: Vec<i32> = m.values().into_iter().copied().collect();
    values.sort_unstable();
    let mut expected_values: Vec<i32> = expected.iter().map(|(_, v)| *v).collect();
    expected_values.sort_unstable();
    assert_eq!(values, expected_values);
}

#[test]
fn clear_empties_but_keeps_capacity() {
    let mut m = HashTable::new();
    for i in 0..30 {
        m.set(i.to_string(), i);
    }
    let buckets = m.bucket_count();
    m.clear();
    assert_eq!(m.length(), 0);
    assert_eq!(m.len(), 0);
    assert_eq!(m.bucket_count(), buckets);
    for i in 0..30 {
        assert!(!m.has(&i.to_string()));
    }
    assert!(m.keys().is_empty());
}

#[test]
fn construction_fails_fast_on_bad_parameters() {
    assert_eq!(
        HashTable::<i32>::with_buckets(0, 0.75).err(),
        Some(ConfigError::ZeroBucketCount)
    );
    assert_eq!(
        HashTable::<i32>::with_buckets(16, -1.0).err(),
        Some(ConfigError::InvalidLoadFactor(-1.0))
    );
    let cfg = TableConfig::default().with_initial_bucket_count(64);
    let m = HashTable::<i32>::with_config(cfg).unwrap();
    assert_eq!(m.bucket_count(), 64);
    assert_eq!(m.load_factor(), 0.75);
}

#[test]
fn default_matches_new() {
    let m: HashTable<()> = HashTable::default();
    assert_eq!(m.bucket_count(), 16);
    assert_eq!(m.load_factor(), 0.75);
    assert!(m.is_empty());
}

#[test]
fn hash_is_exposed_for_any_bucket_count() {
    assert_eq!(bucket_index("", 7), 0);
    assert_eq!(bucket_index("a", 16), 1);
    assert_eq!(bucket_index("a", 64), 33);
}

#[test]
fn iterate_by_reference() {
    let m: HashTable<u8> = [("x", 1u8), ("y", 2)].into_iter().collect();
    let mut sum = 0;
    for (_k, v) in &m {
        sum += *v;
    }
    assert_eq!(sum, 3);
}
