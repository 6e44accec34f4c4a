/// Drives a map through random inserts, removals, range removals and lookups,
/// checking it against a `BTreeMap` after every step.
macro_rules! map_model_test {
    ($map:expr, $seed:expr) => {{
        const N: u32 = 1024;
        fastrand::seed($seed);
        let mut map = $map;
        let mut check = std::collections::BTreeMap::<u32, u64>::new();
        for _ in 0..10_000 {
            let action = fastrand::u32(0..100);
            let key = fastrand::u32(0..N);
            if (action >= 60 && map.len() < (N * 4 / 5) as usize) || map.len() < 2 {
                let value = fastrand::u64(..);
                let added = !check.contains_key(&key);
                check.entry(key).or_insert(value);
                let (pos, inserted) = map.insert(key, value);
                assert_eq!(inserted, added);
                assert_eq!(map.get_index(pos), Some((key, &check[&key])));
            } else if action >= 50 {
                assert_eq!(map.remove(key), check.remove(&key));
                assert!(!map.contains_key(key));
            } else if action >= 30 {
                let mut b = fastrand::usize(0..map.len() - 1);
                let mut e = fastrand::usize(0..map.len() - 1);
                if b > e {
                    std::mem::swap(&mut b, &mut e);
                }
                map.sort();
                let lo = map.get_index(b).unwrap().0;
                let hi = map.get_index(e).unwrap().0;
                check.retain(|k, _| !(lo..hi).contains(k));
                map.remove_range(b..e);
                map.sort();
                assert!(map.iter().map(|(k, v)| (k, *v)).eq(check.iter().map(|(k, v)| (*k, *v))));
            } else if action >= 20 {
                let (k, v) = map.remove_at(map.len() / 2);
                assert_eq!(check.remove(&k), Some(v));
                assert!(!map.contains_key(k));
            } else {
                assert_eq!(map.get(key), check.get(&key));
                assert_eq!(map.find(key).is_some(), check.contains_key(&key));
            }
            assert_eq!(map.len(), check.len());
        }
        map.verify().unwrap();
        map.sort();
        assert!(map.iter().map(|(k, v)| (k, *v)).eq(check.into_iter()));
        map.clear();
        assert!(map.iter().next().is_none());
        map.verify().unwrap();
    }};
}

mod map_tests;
