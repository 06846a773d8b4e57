use long_hashmap::{ConfigError, LongHashMap, LongMapConfig, DEFAULT_CAPACITY};

/// Keys 1..=100 mapped to "value_1".."value_100".
fn populated() -> LongHashMap<String> {
    let mut m = LongHashMap::new();
    for i in 1..=100i64 {
        assert_eq!(m.insert(i, format!("value_{i}")), None);
    }
    m
}

#[test]
fn put_counts_distinct_keys() {
    let mut m = populated();
    assert_eq!(m.len(), 100);
    m.insert(101, "value_101".to_string());
    assert_eq!(m.len(), 101);

    // Same key, new value: replaced in place.
    let old = m.insert(50, "duplicate".to_string());
    assert_eq!(old.as_deref(), Some("value_50"));
    assert_eq!(m.len(), 101);
    assert_eq!(m.get(50).map(String::as_str), Some("duplicate"));

    // A fresh key after the duplicate: counted once, old entries untouched.
    m.insert(500, "collision".to_string());
    assert_eq!(m.len(), 102);
    assert_eq!(m.get(500).map(String::as_str), Some("collision"));
    assert_eq!(m.get(4).map(String::as_str), Some("value_4"));
}

#[test]
fn duplicate_then_collision_scenario() {
    let mut m = populated();
    m.insert(50, "duplicate".to_string());
    assert_eq!(m.len(), 100);
    assert_eq!(m.get(50).map(String::as_str), Some("duplicate"));

    m.insert(500, "collision".to_string());
    assert_eq!(m.len(), 101);
    assert_eq!(m.get(500).map(String::as_str), Some("collision"));
    assert_eq!(m.get(44).map(String::as_str), Some("value_44"));

    // Whether 500 chains depends on the hash, so force a chain onto 44's bucket.
    let target = m.bucket_of(44);
    let sharer = (501i64..)
        .find(|&k| m.bucket_of(k) == target)
        .expect("some key shares the bucket");
    let capacity = m.capacity();
    m.insert(sharer, "chained".to_string());
    assert_eq!(m.capacity(), capacity, "no resize between picking and inserting");
    assert_eq!(m.bucket_of(sharer), m.bucket_of(44));
    assert_eq!(m.len(), 102);
    assert_eq!(m.get(sharer).map(String::as_str), Some("chained"));
    assert_eq!(m.get(44).map(String::as_str), Some("value_44"));
    assert_eq!(m.get(500).map(String::as_str), Some("collision"));

    // Unlinking one chain member leaves the other reachable.
    assert_eq!(m.remove(44).as_deref(), Some("value_44"));
    assert_eq!(m.get(sharer).map(String::as_str), Some("chained"));
    assert_eq!(m.len(), 101);
}

#[test]
fn true_bucket_collision_at_current_capacity() {
    let mut m = populated();
    let target = m.bucket_of(44);
    let colliding = (1000i64..)
        .find(|&k| m.bucket_of(k) == target)
        .expect("some key shares the bucket");
    let capacity = m.capacity();

    m.insert(colliding, "collision".to_string());
    assert_eq!(m.capacity(), capacity, "one extra entry must not resize here");
    assert_eq!(m.len(), 101);
    assert_eq!(m.get(colliding).map(String::as_str), Some("collision"));
    assert_eq!(m.get(44).map(String::as_str), Some("value_44"));
}

#[test]
fn get_misses_are_none() {
    let m = populated();
    assert_eq!(m.get(44).map(String::as_str), Some("value_44"));
    assert_eq!(m.get(200), None);
    assert_eq!(m.get(0), None);
    assert_eq!(m.get(-44), None);
}

#[test]
fn remove_returns_value_once() {
    let mut m = populated();
    assert_eq!(m.remove(50).as_deref(), Some("value_50"));
    assert_eq!(m.len(), 99);
    assert!(!m.contains_key(50));
    assert_eq!(m.remove(50), None);
    assert_eq!(m.remove(500), None);
    assert_eq!(m.len(), 99);
}

#[test]
fn clear_empties_the_map() {
    let mut m = populated();
    assert!(!m.is_empty());
    let capacity = m.capacity();
    m.clear();
    assert!(m.is_empty());
    assert_eq!(m.len(), 0);
    assert_eq!(m.capacity(), capacity);
    assert!(m.keys().is_empty());
    assert_eq!(m.get(1), None);
}

#[test]
fn contains_key_and_value() {
    let m = populated();
    assert!(m.contains_key(100));
    assert!(!m.contains_key(101));
    assert!(m.contains_value(&"value_100".to_string()));
    assert!(!m.contains_value(&"value_101".to_string()));
}

#[test]
fn keys_and_values_snapshot() {
    let m = populated();
    let keys = m.keys();
    let values = m.values();
    assert_eq!(keys.len(), 100);
    assert_eq!(values.len(), 100);

    // Bucket order, not insertion order: compare as sets.
    let mut sorted = keys.clone();
    sorted.sort_unstable();
    assert_eq!(sorted, (1..=100).collect::<Vec<i64>>());

    for (k, v) in keys.iter().zip(&values) {
        assert_eq!(v, &format!("value_{k}"));
    }
}

#[test]
fn resizes_keep_every_entry() {
    let mut m = LongHashMap::new();
    assert_eq!(m.capacity(), DEFAULT_CAPACITY);
    let mut capacities = vec![m.capacity()];
    for k in 0..5_000i64 {
        m.insert(k * 1_000_003, k);
        if m.capacity() != *capacities.last().unwrap() {
            capacities.push(m.capacity());
            for j in 0..=k {
                assert_eq!(m.get(j * 1_000_003), Some(&j));
            }
        }
    }
    assert!(capacities.len() >= 3, "expected at least two resizes: {capacities:?}");
    assert!(capacities.windows(2).all(|w| w[1] == w[0] * 2));
}

#[test]
fn negative_keys_are_independent() {
    let mut m = LongHashMap::new();
    // A signed remainder would put -3 at index -3 and confuse it with 13 after wrapping.
    m.insert(-3, "minus three");
    m.insert(13, "thirteen");
    m.insert(-16, "minus sixteen");
    m.insert(0, "zero");
    assert!(m.bucket_of(-3) < m.capacity());
    assert_eq!(m.get(-3), Some(&"minus three"));
    assert_eq!(m.get(13), Some(&"thirteen"));
    assert_eq!(m.get(-16), Some(&"minus sixteen"));
    assert_eq!(m.get(0), Some(&"zero"));
    assert_eq!(m.len(), 4);
}

#[test]
fn with_config_validates() {
    let bad = LongMapConfig::new().with_load_factor(-0.5);
    assert_eq!(
        LongHashMap::<u8>::with_config(bad).err(),
        Some(ConfigError::InvalidLoadFactor)
    );
    let bad = LongMapConfig::new().with_growth_factor(3);
    assert_eq!(
        LongHashMap::<u8>::with_config(bad).err(),
        Some(ConfigError::InvalidGrowthFactor)
    );

    let good = LongMapConfig::new().with_initial_capacity(100).with_load_factor(1.0);
    let m = LongHashMap::<u8>::with_config(good).expect("valid config");
    assert_eq!(m.capacity(), 128);
    assert_eq!(m.config().load_factor(), 1.0);
}

#[test]
fn from_iterator_and_extend() {
    let mut m: LongHashMap<&str> = [(1, "a"), (2, "b"), (1, "c")].into_iter().collect();
    assert_eq!(m.len(), 2);
    assert_eq!(m.get(1), Some(&"c"));
    m.extend([(3, "d"), (-4, "e")]);
    assert_eq!(m.len(), 4);
    assert_eq!(m[-4], "e");
}
