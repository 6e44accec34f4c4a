use std::collections::BTreeMap;

use stead::support::bits::nextpow2;
use stead::{DirectMap, DirectSet, ErrorKind, SegmentMetrics, SegmentedDirectMap, SegmentedVec};

#[test]
fn test_segmented_map_scenario() {
    let mut m = SegmentedDirectMap::with_block_size(64);
    for (k, v) in [(5u32, "a"), (1, "b"), (9, "c"), (1024, "d")] {
        m.insert(k, v);
    }
    assert_eq!(m.len(), 4);
    assert_eq!(m.get(1024), Some(&"d"));

    assert_eq!(m.remove(1), Some("b"));
    assert_eq!(m.len(), 3);
    assert!(!m.contains_key(1));
    assert_eq!(m.get(9), Some(&"c"));
    m.verify().unwrap();
}

#[test]
fn test_flat_and_segmented_maps_agree() {
    fastrand::seed(64738);
    let mut flat = DirectMap::<u32, u32>::new();
    let mut segmented = SegmentedDirectMap::<u32, u32>::with_block_size(32);
    let mut check = BTreeMap::new();
    for _ in 0..5000 {
        let key = fastrand::u32(0..2000);
        if fastrand::u8(0..3) == 0 {
            let expected = check.remove(&key);
            assert_eq!(flat.remove(key), expected);
            assert_eq!(segmented.remove(key), expected);
        } else {
            let value = fastrand::u32(..);
            check.entry(key).or_insert(value);
            flat.insert(key, value);
            segmented.insert(key, value);
        }
    }
    assert_eq!(flat.len(), check.len());
    assert_eq!(segmented.len(), check.len());
    for (&k, v) in &check {
        assert_eq!(flat.get(k), Some(v));
        assert_eq!(segmented.get(k), Some(v));
    }
    flat.sort();
    segmented.sort();
    assert!(flat.iter().eq(segmented.iter()));
    flat.verify().unwrap();
    segmented.verify().unwrap();
}

#[test]
fn test_set_operations_over_map_keys() {
    let evens: DirectSet<u16> = (0..100).step_by(2).collect();
    let mut small: DirectSet<u16> = (0..20).collect();
    let mut rest = small.clone();
    small.set_intersect(&evens);
    rest.set_complement(&evens);
    assert_eq!(small.len(), 10);
    assert_eq!(rest.len(), 10);
    assert!(small.iter().all(|k| k % 2 == 0));
    assert!(rest.iter().all(|k| k % 2 == 1));
}

#[test]
fn test_segmented_vec_with_shared_metrics() {
    let metrics = SegmentMetrics::new(100);
    assert_eq!(metrics.block_size(), nextpow2(100));

    let mut v: SegmentedVec<u32> = SegmentedVec::with_metrics(metrics);
    v.extend(0..1000u32);
    assert_eq!(v.segment_count(), metrics.segments_for(1000));
    assert_eq!(v.map_index(300), (2, 44));
    assert_eq!(v.at(v.cursor_at(300)), &300);
    assert_eq!(v.index_of(v.end()), 1000);

    let first = &v[0] as *const u32;
    v.extend(1000..5000);
    assert_eq!(&v[0] as *const u32, first);
}

#[test]
fn test_errors_surface_through_facade() {
    let err = SegmentMetrics::try_new(0).unwrap_err();
    assert!(matches!(err.kind(), ErrorKind::InvalidArgument { .. }));
    let mut m = DirectMap::<u32, u8>::new();
    let err = m.try_reserve(usize::MAX).unwrap_err();
    assert!(matches!(err.kind(), ErrorKind::AllocationFailed { .. }));
}
