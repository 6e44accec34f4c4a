use crate::{Capabilities, DirectMap};

#[test]
fn test_random_model() {
    map_model_test!(DirectMap::<u32, u64>::with_capacity(1024), 5417);
}

#[test]
fn test_random_model_growing_from_empty() {
    map_model_test!(DirectMap::<u32, u64>::new(), 90210);
}

#[test]
fn test_insert_keeps_existing_value() {
    let mut m = DirectMap::new();
    assert_eq!(m.insert(7u32, "first"), (0, true));
    assert_eq!(m.insert(3, "second"), (1, true));
    assert_eq!(m.insert(7, "again"), (0, false));
    assert_eq!(m[7], "first");
    assert_eq!(m.len(), 2);
    m.verify().unwrap();
}

#[test]
fn test_remove_swaps_last_into_place() {
    let mut m: DirectMap<u32, char> = [(1, 'a'), (2, 'b'), (3, 'c'), (4, 'd')].into_iter().collect();
    assert_eq!(m.remove(2), Some('b'));
    assert_eq!(m.get_index(1), Some((4, &'d')));
    assert_eq!(m.find(4), Some(1));
    assert_eq!(m.len(), 3);
    for (k, v) in [(1, 'a'), (3, 'c'), (4, 'd')] {
        assert_eq!(m.get(k), Some(&v));
    }
    assert_eq!(m.remove(2), None);
    assert_eq!(m.remove(999), None);
    m.verify().unwrap();
}

#[test]
fn test_get_or_insert_default() {
    let mut counts: DirectMap<u8, u32> = DirectMap::new();
    for b in b"abracadabra" {
        *counts.get_or_insert_default(*b) += 1;
    }
    assert_eq!(counts[b'a'], 5);
    assert_eq!(counts[b'b'], 2);
    assert_eq!(counts[b'r'], 2);
    assert_eq!(counts.len(), 5);
    *counts.get_or_insert_with(b'z', || 100) += 1;
    assert_eq!(counts.get(b'z'), Some(&101));
    counts[b'c'] = 9;
    assert_eq!(counts.get(b'c'), Some(&9));
}

#[test]
#[should_panic(expected = "not found")]
fn test_index_absent_key_panics() {
    let m: DirectMap<u32, u32> = [(1, 1)].into_iter().collect();
    let _ = m[2];
}

#[test]
fn test_remap_after_external_sort() {
    let mut m: DirectMap<u32, String> = (0..50u32).rev().map(|k| (k * 3, k.to_string())).collect();
    m.entries_mut().sort_by(|a, b| a.1.cmp(&b.1));
    assert!(m.verify().is_err());
    m.remap();
    m.verify().unwrap();
    for k in 0..50u32 {
        assert_eq!(m.get(k * 3).map(String::as_str), Some(k.to_string().as_str()));
    }
}

#[test]
fn test_sort_and_bounds() {
    let mut m: DirectMap<u32, u32> = [40, 10, 30, 20, 50].into_iter().map(|k| (k, k)).collect();
    m.sort();
    assert!(m.keys().eq([10, 20, 30, 40, 50]));
    assert_eq!(m.lower_bound(30), 2);
    assert_eq!(m.upper_bound(30), 3);
    assert_eq!(m.lower_bound(31), 3);
    assert_eq!(m.upper_bound(31), 3);
    assert_eq!(m.lower_bound(0), 0);
    assert_eq!(m.upper_bound(60), 5);
    m.verify().unwrap();
}

#[test]
fn test_retain() {
    let mut m: DirectMap<u32, u32> = (0..100).map(|k| (k, k * k)).collect();
    m.retain(|k, v| {
        *v += 1;
        k % 4 == 0
    });
    assert_eq!(m.len(), 25);
    for k in 0..100 {
        assert_eq!(m.get(k).copied(), (k % 4 == 0).then_some(k * k + 1));
    }
    m.verify().unwrap();
}

#[test]
fn test_remove_range_and_remove_at() {
    let mut m: DirectMap<u32, u32> = (0..10).map(|k| (k, k)).collect();
    m.remove_range(2..5);
    assert_eq!(m.len(), 7);
    for k in 2..5 {
        assert!(!m.contains_key(k));
    }
    m.verify().unwrap();
    let (k, v) = m.remove_at(0);
    assert_eq!((k, v), (0, 0));
    assert!(!m.contains_key(0));
    m.remove_range(0..m.len());
    assert!(m.is_empty());
    m.verify().unwrap();
}

#[test]
#[should_panic(expected = "beyond end")]
fn test_remove_range_past_end_panics() {
    let mut m: DirectMap<u32, u32> = (0..3).map(|k| (k, k)).collect();
    m.remove_range(1..4);
}

#[test]
fn test_capacity_and_clear() {
    let mut m = DirectMap::<u32, u8>::with_capacity(100);
    assert_eq!(m.capacity(), 100);
    m.insert(99, 1);
    assert_eq!(m.capacity(), 100);
    m.insert(100, 2);
    assert_eq!(m.capacity(), 200);
    m.try_reserve(1000).unwrap();
    assert_eq!(m.capacity(), 1000);
    assert_eq!(m.get(100), Some(&2));
    m.clear();
    assert!(m.is_empty());
    assert_eq!(m.capacity(), 1000);
    assert_eq!(m.get(99), None);
    assert!(m.try_reserve(usize::MAX).is_err());
}

#[test]
fn test_equality_ignores_order() {
    let a: DirectMap<u16, i32> = [(1, 10), (2, 20), (3, 30)].into_iter().collect();
    let b: DirectMap<u16, i32> = [(3, 30), (1, 10), (2, 20)].into_iter().collect();
    let c: DirectMap<u16, i32> = [(3, 31), (1, 10), (2, 20)].into_iter().collect();
    assert_eq!(a, b);
    assert_ne!(a, c);
    assert_ne!(a, DirectMap::new());
}

#[test]
fn test_debug_prints_map() {
    let m: DirectMap<u32, &str> = [(1, "a"), (2, "b")].into_iter().collect();
    assert_eq!(format!("{m:?}"), r#"{1: "a", 2: "b"}"#);
}

#[test]
fn test_iterators() {
    let mut m: DirectMap<u32, u32> = (0..8).map(|k| (k, 0)).collect();
    for (k, v) in &mut m {
        *v = k * 10;
    }
    for v in m.values_mut() {
        *v += 1;
    }
    assert!(m.iter().map(|(k, v)| (k, *v)).eq((0..8).map(|k| (k, k * 10 + 1))));
    assert!(m.iter().rev().map(|(k, _)| k).eq((0..8).rev()));
    assert_eq!(m.iter().len(), 8);
    assert_eq!(m.values().copied().sum::<u32>(), 288);
    let pairs: Vec<(u32, u32)> = m.into_iter().collect();
    assert_eq!(pairs.len(), 8);
    assert_eq!(pairs[3], (3, 31));
}

#[test]
fn test_clone_and_swap_with() {
    let mut a: DirectMap<u32, String> = [(1, "x".to_string())].into_iter().collect();
    let mut b = a.clone();
    b.insert(2, "y".to_string());
    assert_eq!(a.len(), 1);
    a.swap_with(&mut b);
    assert_eq!(a.len(), 2);
    assert_eq!(b.len(), 1);
    a.verify().unwrap();
    b.verify().unwrap();
}

#[test]
fn test_capabilities() {
    let caps = DirectMap::<u32, u32>::CAPABILITIES;
    assert!(caps.contains(Capabilities::INTEGER_KEYS | Capabilities::REVERSE_KEY_ADD));
    assert!(!caps.contains(Capabilities::SORTED));
}

#[test]
fn test_u64_keys() {
    let mut m = DirectMap::<u64, u8>::new();
    m.insert(3, 1);
    assert_eq!(m.get(3), Some(&1));
    assert_eq!(m.get(u64::MAX), None);
    assert!(!m.contains_key(1 << 40));
}

#[test]
fn test_signed_keys() {
    let mut m = DirectMap::<i32, f64>::new();
    for k in [0, 3, 17, 1024] {
        assert!(m.insert(k, k as f64 * 0.5).1);
    }
    for k in [0, 3, 17, 1024] {
        assert_eq!(m.get(k), Some(&(k as f64 * 0.5)));
        assert!(m.contains_key(k));
    }
    for k in [-1, -3, -1024, i32::MIN] {
        assert_eq!(m.find(k), None);
        assert!(!m.contains_key(k));
        assert_eq!(m.get(k), None);
        assert_eq!(m.remove(k), None);
    }
    assert_eq!(m.remove(17), Some(8.5));
    assert_eq!(m.len(), 3);
    m.sort();
    assert!(m.keys().eq([0, 3, 1024]));
    m.verify().unwrap();
}
