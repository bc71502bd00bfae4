use growmap::{Config, GrowableMap};
use proptest::prelude::*;
use std::collections::HashMap;

fn config(load_factor: f64, buckets: usize) -> Config {
    Config::new()
        .load_factor(load_factor)
        .unwrap()
        .initial_buckets(buckets)
        .unwrap()
}

proptest! {
    #[cfg_attr(miri, ignore)]
    #[test]
    fn last_write_wins(
        ops in prop::collection::vec((0_u16..64, any::<u32>()), 0..400),
        load_factor in 0.1_f64..4.0,
        buckets in 1_usize..64,
    ) {
        let map: GrowableMap<u16, u32> = GrowableMap::with_config(config(load_factor, buckets)).unwrap();
        let mut model = HashMap::new();

        for (key, value) in &ops {
            map.insert(*key, *value).unwrap();
            model.insert(*key, *value);
        }

        let snapshot = map.share();
        prop_assert_eq!(snapshot.len(), model.len());
        for (key, value) in &model {
            prop_assert_eq!(snapshot.get(key), Some(value));
        }
    }

    #[cfg_attr(miri, ignore)]
    #[test]
    fn size_counts_calls_and_buckets_never_shrink(
        keys in prop::collection::vec(0_u8..16, 1..300),
        load_factor in 0.25_f64..2.0,
    ) {
        let map: GrowableMap<u8, usize> = GrowableMap::with_config(config(load_factor, 4)).unwrap();
        let mut buckets = map.bucket_count();

        for (calls, key) in keys.iter().enumerate() {
            map.insert(*key, calls).unwrap();
            prop_assert_eq!(map.size(), calls + 1);
            prop_assert!(map.bucket_count() >= buckets);
            buckets = map.bucket_count();
        }
    }

    #[cfg_attr(miri, ignore)]
    #[test]
    fn snapshot_never_changes(
        before in prop::collection::vec(any::<u16>(), 0..50),
        after in prop::collection::vec(any::<u16>(), 1..200),
    ) {
        let map: GrowableMap<u16, u16> = GrowableMap::with_config(config(0.75, 4)).unwrap();
        for key in &before {
            map.insert(*key, *key).unwrap();
        }

        let snapshot = map.share();
        let mut captured: Vec<_> = snapshot.iter().map(|(k, v)| (*k, *v)).collect();
        captured.sort_unstable();

        for key in &after {
            map.insert(*key, key.wrapping_add(1)).unwrap();
        }

        let mut now: Vec<_> = snapshot.iter().map(|(k, v)| (*k, *v)).collect();
        now.sort_unstable();
        prop_assert_eq!(captured, now);
    }
}
