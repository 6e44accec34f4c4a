//! The dense/sparse core shared by every direct-address container.

use std::fmt;
use std::marker::PhantomData;
use std::ops::Range;

use stead_common::{Result, verify_data};

use crate::key::{DirectKey, KeyFromValue};
use crate::storage::{DenseStore, SparseIndex};

/// Dense entries `D` of type `E` keyed by `K`, addressed through the sparse index `S`.
///
/// Invariant: for every dense position `pos`, the sparse slot of
/// `dense[pos].key()` holds `pos`. Every mutation made through this type keeps it;
/// [`remap`](Self::remap) re-establishes it after the dense entries were reordered
/// from outside.
#[derive(Clone)]
pub(crate) struct RawTable<K, E, D, S> {
    dense: D,
    sparse: S,
    _marker: PhantomData<fn(E) -> K>,
}

impl<K, E, D, S> RawTable<K, E, D, S>
where
    K: DirectKey,
    E: KeyFromValue<K>,
    D: DenseStore<E>,
    S: SparseIndex,
{
    pub fn from_parts(dense: D, sparse: S) -> Self {
        RawTable {
            dense,
            sparse,
            _marker: PhantomData,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.dense.len()
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.sparse.capacity()
    }

    #[inline]
    pub fn dense(&self) -> &D {
        &self.dense
    }

    /// Mutable access to the dense entries. A caller that reorders them or changes
    /// their keys must call [`remap`](Self::remap) afterwards.
    #[inline]
    pub fn dense_mut(&mut self) -> &mut D {
        &mut self.dense
    }

    pub fn into_dense(self) -> D {
        self.dense
    }

    #[inline]
    pub fn sparse(&self) -> &S {
        &self.sparse
    }

    /// Returns the dense position of `key`.
    #[inline]
    pub fn find(&self, key: K) -> Option<usize> {
        self.sparse
            .slot(key.to_index())?
            .resolve(key, &self.dense)
    }

    #[inline]
    pub fn contains(&self, key: K) -> bool {
        self.find(key).is_some()
    }

    /// Inserts the entry produced by `make` unless `key` is already present.
    ///
    /// Returns the dense position of `key` and whether a new entry was added.
    pub fn insert_with<F>(&mut self, key: K, make: F) -> (usize, bool)
    where
        F: FnOnce() -> E,
    {
        if let Some(pos) = self.find(key) {
            return (pos, false);
        }
        let index = key.to_index();
        if index >= self.sparse.capacity() {
            let target = self.sparse.growth_target(index);
            if self.sparse.grow(target) {
                self.rebuild_sparse();
            }
        }
        let entry = make();
        debug_assert!(entry.key() == key);
        self.dense.push(entry);
        let pos = self.dense.len() - 1;
        self.sparse.set(index, pos);
        (pos, true)
    }

    /// Removes the entry at dense position `pos`, moving the last entry into its place.
    ///
    /// # Panics
    ///
    /// Panics if `pos` is out of bounds.
    pub fn remove_at(&mut self, pos: usize) -> E {
        let removed = self.dense.swap_remove(pos);
        if let Some(moved) = self.dense.get(pos) {
            let index = moved.key().to_index();
            self.sparse.set(index, pos);
        }
        removed
    }

    pub fn remove(&mut self, key: K) -> Option<E> {
        let pos = self.find(key)?;
        Some(self.remove_at(pos))
    }

    /// Removes the entries at dense positions `range`.
    ///
    /// Runs in O(range length): entries from the tail fill the vacated positions.
    ///
    /// # Panics
    ///
    /// Panics if the range is decreasing or extends past the end.
    pub fn remove_range(&mut self, range: Range<usize>) {
        assert!(range.start <= range.end, "decreasing range {range:?}");
        assert!(
            range.end <= self.len(),
            "range {range:?} beyond end {}",
            self.len()
        );
        for pos in range.rev() {
            self.remove_at(pos);
        }
    }

    /// Keeps only the entries for which `keep` returns `true`.
    ///
    /// Walks the dense entries backwards, so every entry moved into a vacated
    /// position has already been kept.
    pub fn retain<F>(&mut self, mut keep: F)
    where
        F: FnMut(&mut E) -> bool,
    {
        let mut pos = self.dense.len();
        while pos > 0 {
            pos -= 1;
            if !keep(&mut self.dense[pos]) {
                self.remove_at(pos);
            }
        }
    }

    pub fn clear(&mut self) {
        self.dense.clear();
    }

    /// Makes room for keys below `capacity` and for `capacity` entries in total.
    pub fn reserve(&mut self, capacity: usize) {
        if self.sparse.grow(capacity) {
            self.rebuild_sparse();
        }
        self.dense
            .reserve(capacity.saturating_sub(self.dense.len()));
    }

    pub fn try_reserve(&mut self, capacity: usize) -> Result<()> {
        if self.sparse.try_grow(capacity)? {
            self.rebuild_sparse();
        }
        self.dense
            .try_reserve(capacity.saturating_sub(self.dense.len()))
    }

    /// Rebuilds the sparse index from the dense entries, growing it first if a key
    /// does not fit.
    pub fn remap(&mut self) {
        let needed = self
            .dense
            .entries()
            .map(|entry| entry.key().to_index())
            .max()
            .map_or(0, |index| index.saturating_add(1));
        self.sparse.grow(needed);
        self.rebuild_sparse();
        log::debug!("direct map: remapped {} entries", self.dense.len());
    }

    /// Sorts the dense entries by key, then remaps.
    pub fn sort(&mut self) {
        self.dense
            .sort_unstable_by(|a, b| a.key().cmp(&b.key()));
        self.remap();
    }

    /// First dense position whose key is not less than `key`.
    pub fn lower_bound(&self, key: K) -> usize {
        self.dense.partition_point(|entry| entry.key() < key)
    }

    /// First dense position whose key is greater than `key`.
    pub fn upper_bound(&self, key: K) -> usize {
        self.dense.partition_point(|entry| entry.key() <= key)
    }

    /// Checks that every dense entry is reachable through the sparse index.
    pub fn verify(&self) -> Result<()> {
        for (pos, entry) in self.dense.entries().enumerate() {
            let key = entry.key();
            let index = key.to_index();
            verify_data!(SparseEntry(index), index < self.sparse.capacity());
            let slot = self.sparse.slot(index);
            verify_data!(
                SparseEntry(index),
                slot.is_some_and(|slot| slot.position() == pos)
            );
        }
        Ok(())
    }

    fn rebuild_sparse(&mut self) {
        for (pos, entry) in self.dense.entries().enumerate() {
            self.sparse.set(entry.key().to_index(), pos);
        }
    }
}

struct SparseEntry(usize);

impl fmt::Display for SparseEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "sparse[{}]", self.0)
    }
}

#[cfg(test)]
mod tests {
    use stead_common::ErrorKind;

    use super::*;
    use crate::storage::FlatIndex;

    type Table = RawTable<u32, (u32, u64), Vec<(u32, u64)>, FlatIndex>;

    fn table(keys: &[u32]) -> Table {
        let mut t = Table::from_parts(Vec::new(), FlatIndex::default());
        for &k in keys {
            t.insert_with(k, || (k, k as u64 * 10));
        }
        t
    }

    #[test]
    fn test_insert_grows_sparse() {
        let mut t = table(&[]);
        assert_eq!(t.capacity(), 0);
        assert_eq!(t.insert_with(5, || (5, 50)), (0, true));
        assert_eq!(t.capacity(), 6);
        assert_eq!(t.insert_with(7, || (7, 70)), (1, true));
        assert_eq!(t.capacity(), 12);
        assert_eq!(t.insert_with(5, || unreachable!()), (0, false));
        assert_eq!(t.find(7), Some(1));
        assert_eq!(t.find(6), None);
        assert_eq!(t.find(100), None);
        t.verify().unwrap();
    }

    #[test]
    fn test_remove_moves_last() {
        let mut t = table(&[1, 2, 3, 4]);
        assert_eq!(t.remove(2), Some((2, 20)));
        assert_eq!(t.dense()[1], (4, 40));
        assert_eq!(t.find(4), Some(1));
        assert_eq!(t.remove(2), None);
        assert!(!t.contains(2));
        t.verify().unwrap();
    }

    #[test]
    fn test_remove_range() {
        for (start, end) in [(0, 6), (1, 3), (2, 6), (5, 6), (3, 3), (0, 1)] {
            let keys = [10, 11, 12, 13, 14, 15];
            let mut t = table(&keys);
            t.remove_range(start..end);
            assert_eq!(t.len(), keys.len() - (end - start));
            for (pos, &k) in keys.iter().enumerate() {
                assert_eq!(t.contains(k), !(start..end).contains(&pos), "key {k}");
            }
            t.verify().unwrap();
        }
    }

    #[test]
    fn test_retain() {
        let mut t = table(&[0, 1, 2, 3, 4, 5, 6, 7, 8, 9]);
        t.retain(|e| e.0 % 3 == 0);
        assert_eq!(t.len(), 4);
        for k in 0..10 {
            assert_eq!(t.contains(k), k % 3 == 0);
        }
        t.verify().unwrap();
    }

    #[test]
    fn test_verify_detects_external_reorder() {
        let mut t = table(&[3, 1, 2]);
        t.dense_mut().swap(0, 2);
        let err = t.verify().unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::Inconsistent { .. }));
        t.remap();
        t.verify().unwrap();
        assert_eq!(t.find(3), Some(2));
    }

    #[test]
    fn test_remap_grows_for_foreign_keys() {
        let mut t = table(&[1]);
        t.dense_mut().push((500, 5000));
        assert!(t.verify().is_err());
        t.remap();
        assert!(t.capacity() > 500);
        assert_eq!(t.find(500), Some(1));
        t.verify().unwrap();
    }

    #[test]
    fn test_sort_and_bounds() {
        let mut t = table(&[9, 3, 7, 1, 5]);
        t.sort();
        let keys: Vec<u32> = t.dense().iter().map(|e| e.0).collect();
        assert_eq!(keys, [1, 3, 5, 7, 9]);
        assert_eq!(t.lower_bound(5), 2);
        assert_eq!(t.upper_bound(5), 3);
        assert_eq!(t.lower_bound(4), 2);
        assert_eq!(t.upper_bound(4), 2);
        assert_eq!(t.lower_bound(0), 0);
        assert_eq!(t.upper_bound(10), 5);
        t.verify().unwrap();
    }

    #[test]
    fn test_reserve_and_clear() {
        let mut t = table(&[2, 4]);
        t.reserve(1000);
        assert_eq!(t.capacity(), 1000);
        assert_eq!(t.find(4), Some(1));
        t.try_reserve(2000).unwrap();
        assert_eq!(t.find(2), Some(0));
        t.clear();
        assert_eq!(t.len(), 0);
        assert_eq!(t.capacity(), 2000);
        assert!(!t.contains(2));
        assert_eq!(t.sparse().capacity(), 2000);
    }
}
