use growmap::{Config, Error, GrowableMap, GrowableMapBuilder, StdTable};

#[test]
fn test_basic_insert_get() {
    let map = GrowableMap::new(0.75).unwrap();

    map.insert("key1", "value1").unwrap();
    assert_eq!(map.get(&"key1"), Some("value1"));

    // Overwrite
    map.insert("key1", "value2").unwrap();
    assert_eq!(map.get(&"key1"), Some("value2"));
}

#[test]
fn test_missing_key_is_none() {
    let map: GrowableMap<u64, u64> = GrowableMap::new(0.75).unwrap();
    assert!(map.get(&1).is_none());
    assert!(!map.contains_key(&1));
    assert!(map.share().get(&1).is_none());
}

#[test]
fn test_info_map_entries() {
    let map = GrowableMap::new(0.75).unwrap();
    map.insert(123_i64, (456_i64, "789".to_string())).unwrap();
    map.insert(456_i64, (456_i64, "789".to_string())).unwrap();

    let user_map = map.share();
    assert_eq!(user_map.len(), 2);

    let mut seen = 0;
    for (key, value) in &user_map {
        assert!(*key == 123 || *key == 456);
        assert_eq!(value, &(456, "789".to_string()));
        seen += 1;
    }
    assert_eq!(seen, 2);
}

#[test]
fn test_size_counts_every_insert() {
    let map = GrowableMap::new(0.75).unwrap();

    map.insert("key", 1).unwrap();
    map.insert("key", 2).unwrap();
    map.insert("key", 3).unwrap();
    map.insert("other", 4).unwrap();

    assert_eq!(map.size(), 4);
    assert_eq!(map.len(), 2);
}

#[test]
fn test_len_and_is_empty() {
    let map = GrowableMap::new(0.75).unwrap();

    assert!(map.is_empty());
    assert_eq!(map.len(), 0);

    map.insert("key1", "value1").unwrap();
    assert!(!map.is_empty());
    assert_eq!(map.len(), 1);

    map.insert("key2", "value2").unwrap();
    assert_eq!(map.len(), 2);
}

#[test]
fn test_construction_validation() {
    assert_eq!(
        GrowableMap::<u64, u64>::new(0.0).unwrap_err(),
        Error::InvalidLoadFactor
    );
    assert_eq!(
        GrowableMap::<u64, u64>::new(-0.5).unwrap_err(),
        Error::InvalidLoadFactor
    );
    assert_eq!(
        GrowableMap::<u64, u64>::new(f64::INFINITY).unwrap_err(),
        Error::InvalidLoadFactor
    );

    let map = GrowableMap::<u64, u64>::new(0.75).unwrap();
    assert_eq!(map.load_factor(), 0.75);
    assert_eq!(map.size(), 0);
    assert!(map.is_empty());
}

#[test]
fn test_builder() {
    let map = GrowableMapBuilder::new()
        .load_factor(0.5)
        .unwrap()
        .initial_buckets(32)
        .unwrap()
        .build::<String, i32>()
        .unwrap();

    map.insert("test".to_string(), 42).unwrap();
    assert_eq!(map.get(&"test".to_string()), Some(42));
    assert_eq!(map.bucket_count(), 32);
    assert_eq!(map.load_factor(), 0.5);
}

#[test]
fn test_builder_invalid_settings() {
    assert!(GrowableMapBuilder::new().load_factor(0.0).is_err());
    assert!(GrowableMapBuilder::new().load_factor(f64::NAN).is_err());
    assert!(GrowableMapBuilder::new().initial_buckets(0).is_err());
    assert_eq!(
        Config::new().initial_buckets(0).unwrap_err(),
        Error::InvalidBucketCount
    );
}

#[test]
fn test_builder_with_std_table() {
    let map = GrowableMapBuilder::new()
        .initial_buckets(4)
        .unwrap()
        .build_with_table::<u32, String, StdTable<u32, String>>()
        .unwrap();

    for i in 0..20 {
        map.insert(i, i.to_string()).unwrap();
    }
    assert_eq!(map.len(), 20);
    assert_eq!(map.get(&7), Some("7".to_string()));
}

#[test]
fn test_error_display() {
    assert_eq!(
        Error::InvalidLoadFactor.to_string(),
        "load factor must be finite and greater than 0"
    );
    assert_eq!(
        Error::AllocationFailed { buckets: 64 }.to_string(),
        "failed to allocate a table with 64 buckets"
    );
    assert_eq!(
        Error::RetriesExhausted { attempts: 3 }.to_string(),
        "insert gave up after 3 attempts"
    );
}

#[test]
fn test_stats() {
    let map = GrowableMap::new(0.75).unwrap();

    map.insert("key1", "value1").unwrap();
    map.insert("key2", "value2").unwrap();
    map.insert("key2", "value3").unwrap();

    let stats = map.stats();
    assert_eq!(stats.size, 3);
    assert_eq!(stats.len, 2);
    assert_eq!(stats.bucket_count, 16);
    assert_eq!(stats.load_factor, 0.75);
    assert!(stats.fill_ratio() < 0.75);
}
