//! Dense and sparse storage behind the direct-address containers.
//!
//! The dense store holds the live entries gap-free. The sparse index maps a key's
//! slot to a dense position. Sparse entries are never trusted on their own: a
//! [`Slot`] resolves only if the dense store really holds the key at that position,
//! so stale entries left behind by removals need no cleanup.

use std::cmp::Ordering;
use std::ops::{Index, IndexMut};

use stead_common::{Error, Result};
use stead_segmented_vec::{SegmentMetrics, SegmentedVec};

use crate::key::{DirectKey, KeyFromValue};

/// Gap-free storage of the live entries.
pub(crate) trait DenseStore<E>: Index<usize, Output = E> + IndexMut<usize> {
    fn len(&self) -> usize;

    fn get(&self, pos: usize) -> Option<&E>;

    fn push(&mut self, entry: E);

    /// Removes the entry at `pos`, moving the last entry into its place.
    fn swap_remove(&mut self, pos: usize) -> E;

    fn clear(&mut self);

    fn reserve(&mut self, additional: usize);

    fn try_reserve(&mut self, additional: usize) -> Result<()>;

    fn sort_unstable_by<F>(&mut self, compare: F)
    where
        F: FnMut(&E, &E) -> Ordering;

    fn partition_point<P>(&self, pred: P) -> usize
    where
        P: FnMut(&E) -> bool;

    fn entries<'a>(&'a self) -> impl Iterator<Item = &'a E>
    where
        E: 'a;
}

impl<E> DenseStore<E> for Vec<E> {
    #[inline]
    fn len(&self) -> usize {
        Vec::len(self)
    }

    #[inline]
    fn get(&self, pos: usize) -> Option<&E> {
        <[E]>::get(self, pos)
    }

    #[inline]
    fn push(&mut self, entry: E) {
        Vec::push(self, entry);
    }

    #[inline]
    fn swap_remove(&mut self, pos: usize) -> E {
        Vec::swap_remove(self, pos)
    }

    fn clear(&mut self) {
        Vec::clear(self);
    }

    fn reserve(&mut self, additional: usize) {
        Vec::reserve(self, additional);
    }

    fn try_reserve(&mut self, additional: usize) -> Result<()> {
        Vec::try_reserve(self, additional).map_err(|e| Error::alloc("dense entries", e))
    }

    fn sort_unstable_by<F>(&mut self, compare: F)
    where
        F: FnMut(&E, &E) -> Ordering,
    {
        <[E]>::sort_unstable_by(self, compare);
    }

    fn partition_point<P>(&self, pred: P) -> usize
    where
        P: FnMut(&E) -> bool,
    {
        <[E]>::partition_point(self, pred)
    }

    fn entries<'a>(&'a self) -> impl Iterator<Item = &'a E>
    where
        E: 'a,
    {
        <[E]>::iter(self)
    }
}

impl<E> DenseStore<E> for SegmentedVec<E> {
    #[inline]
    fn len(&self) -> usize {
        SegmentedVec::len(self)
    }

    #[inline]
    fn get(&self, pos: usize) -> Option<&E> {
        SegmentedVec::get(self, pos)
    }

    #[inline]
    fn push(&mut self, entry: E) {
        SegmentedVec::push(self, entry);
    }

    #[inline]
    fn swap_remove(&mut self, pos: usize) -> E {
        SegmentedVec::swap_remove(self, pos)
    }

    fn clear(&mut self) {
        SegmentedVec::clear(self);
    }

    fn reserve(&mut self, additional: usize) {
        SegmentedVec::reserve(self, additional);
    }

    fn try_reserve(&mut self, additional: usize) -> Result<()> {
        SegmentedVec::try_reserve(self, additional)
    }

    fn sort_unstable_by<F>(&mut self, compare: F)
    where
        F: FnMut(&E, &E) -> Ordering,
    {
        SegmentedVec::sort_unstable_by(self, compare);
    }

    fn partition_point<P>(&self, pred: P) -> usize
    where
        P: FnMut(&E) -> bool,
    {
        SegmentedVec::partition_point(self, pred)
    }

    fn entries<'a>(&'a self) -> impl Iterator<Item = &'a E>
    where
        E: 'a,
    {
        SegmentedVec::iter(self)
    }
}

/// A sparse index entry: the dense position a key had when it was last written.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Slot(usize);

impl Slot {
    #[inline]
    pub fn position(self) -> usize {
        self.0
    }

    /// Returns the dense position of `key` if the dense store still holds it there.
    #[inline]
    pub fn resolve<K, E, D>(self, key: K, dense: &D) -> Option<usize>
    where
        K: DirectKey,
        E: KeyFromValue<K>,
        D: DenseStore<E>,
    {
        match dense.get(self.0) {
            Some(entry) if entry.key() == key => Some(self.0),
            _ => None,
        }
    }
}

/// Table of dense positions indexed directly by key.
pub(crate) trait SparseIndex {
    /// Number of addressable key slots.
    fn capacity(&self) -> usize;

    fn slot(&self, index: usize) -> Option<Slot>;

    /// Records `pos` for the key at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is not below [`capacity`](Self::capacity).
    fn set(&mut self, index: usize, pos: usize);

    /// Capacity to grow to when inserting a key at `index` that does not fit.
    fn growth_target(&self, index: usize) -> usize;

    /// Grows the table to at least `capacity` slots.
    ///
    /// Returns `true` if the recorded positions were lost and must be rebuilt from
    /// the dense store.
    fn grow(&mut self, capacity: usize) -> bool;

    /// Fallible version of [`grow`](Self::grow).
    fn try_grow(&mut self, capacity: usize) -> Result<bool>;
}

/// A single contiguous sparse table.
///
/// Growing replaces the table with a fresh zeroed one, so every growth is followed
/// by a rebuild from the dense entries.
#[derive(Clone, Debug, Default)]
pub(crate) struct FlatIndex {
    slots: Vec<usize>,
}

impl FlatIndex {
    fn replace(&mut self, slots: Vec<usize>) {
        log::debug!(
            "direct map: sparse table grown {} -> {} slots",
            self.slots.len(),
            slots.len()
        );
        self.slots = slots;
    }
}

impl SparseIndex for FlatIndex {
    #[inline]
    fn capacity(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    fn slot(&self, index: usize) -> Option<Slot> {
        self.slots.get(index).copied().map(Slot)
    }

    #[inline]
    fn set(&mut self, index: usize, pos: usize) {
        self.slots[index] = pos;
    }

    fn growth_target(&self, index: usize) -> usize {
        index
            .saturating_add(1)
            .max(self.slots.len().saturating_mul(2))
    }

    fn grow(&mut self, capacity: usize) -> bool {
        if capacity <= self.slots.len() {
            return false;
        }
        self.replace(vec![0; capacity]);
        true
    }

    fn try_grow(&mut self, capacity: usize) -> Result<bool> {
        if capacity <= self.slots.len() {
            return Ok(false);
        }
        let mut slots = Vec::new();
        slots
            .try_reserve_exact(capacity)
            .map_err(|e| Error::alloc("sparse table", e))?;
        slots.resize(capacity, 0);
        self.replace(slots);
        Ok(true)
    }
}

/// A sparse table made of fixed-size blocks.
///
/// Growing appends whole blocks. Blocks already in place are never touched, so
/// recorded positions survive growth.
#[derive(Clone, Debug)]
pub(crate) struct BlockIndex {
    slots: SegmentedVec<usize>,
}

impl BlockIndex {
    pub fn with_metrics(metrics: SegmentMetrics) -> BlockIndex {
        BlockIndex {
            slots: SegmentedVec::with_metrics(metrics),
        }
    }

    pub fn metrics(&self) -> SegmentMetrics {
        self.slots.metrics()
    }

    /// Rounds `capacity` up to whole blocks.
    fn block_capacity(&self, capacity: usize) -> usize {
        let metrics = self.slots.metrics();
        metrics.segments_for(capacity) << metrics.shift()
    }

    fn log_growth(&self, before: usize) {
        log::debug!(
            "direct map: appended {} sparse blocks, {} slots total",
            self.slots.segment_count() - before,
            self.slots.len()
        );
    }
}

impl Default for BlockIndex {
    fn default() -> Self {
        BlockIndex::with_metrics(SegmentMetrics::default())
    }
}

impl SparseIndex for BlockIndex {
    #[inline]
    fn capacity(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    fn slot(&self, index: usize) -> Option<Slot> {
        self.slots.get(index).copied().map(Slot)
    }

    #[inline]
    fn set(&mut self, index: usize, pos: usize) {
        self.slots[index] = pos;
    }

    fn growth_target(&self, index: usize) -> usize {
        index.saturating_add(1)
    }

    fn grow(&mut self, capacity: usize) -> bool {
        let capacity = self.block_capacity(capacity);
        if capacity > self.slots.len() {
            let before = self.slots.segment_count();
            self.slots.resize(capacity, 0);
            self.log_growth(before);
        }
        false
    }

    fn try_grow(&mut self, capacity: usize) -> Result<bool> {
        let capacity = self.block_capacity(capacity);
        if capacity > self.slots.len() {
            let before = self.slots.segment_count();
            self.slots.try_resize_with(capacity, || 0)?;
            self.log_growth(before);
        }
        Ok(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slot_resolves_only_matching_key() {
        let dense: Vec<(u32, char)> = vec![(4, 'a'), (9, 'b')];
        assert_eq!(Slot(1).resolve(9u32, &dense), Some(1));
        assert_eq!(Slot(1).resolve(4u32, &dense), None);
        assert_eq!(Slot(2).resolve(9u32, &dense), None);
        assert_eq!(Slot(0).position(), 0);
    }

    #[test]
    fn test_flat_index_growth_loses_positions() {
        let mut index = FlatIndex::default();
        assert_eq!(index.capacity(), 0);
        assert_eq!(index.growth_target(5), 6);
        assert!(index.grow(6));
        index.set(5, 3);
        assert_eq!(index.slot(5), Some(Slot(3)));
        assert_eq!(index.slot(6), None);

        assert_eq!(index.growth_target(7), 12);
        assert!(index.try_grow(12).unwrap());
        assert_eq!(index.capacity(), 12);
        assert_eq!(index.slot(5), Some(Slot(0)));
        assert!(!index.grow(4));
    }

    #[test]
    fn test_block_index_growth_keeps_positions() {
        let mut index = BlockIndex::with_metrics(SegmentMetrics::new(64));
        assert!(!index.grow(10));
        assert_eq!(index.capacity(), 64);
        index.set(9, 42);
        assert!(!index.try_grow(1025).unwrap());
        assert_eq!(index.capacity(), 17 * 64);
        assert_eq!(index.slot(9), Some(Slot(42)));
        assert_eq!(index.growth_target(2000), 2001);
        assert_eq!(index.metrics().block_size(), 64);
    }

    #[test]
    fn test_vec_dense_store() {
        let mut dense: Vec<(u32, char)> = Vec::new();
        DenseStore::push(&mut dense, (7, 'a'));
        DenseStore::push(&mut dense, (2, 'b'));
        DenseStore::push(&mut dense, (5, 'c'));
        let keys: Vec<u32> = DenseStore::entries(&dense).map(|e: &(u32, char)| e.0).collect();
        assert_eq!(keys, [7, 2, 5]);
        assert_eq!(DenseStore::swap_remove(&mut dense, 0), (7, 'a'));
        assert_eq!(DenseStore::get(&dense, 0), Some(&(5, 'c')));
        DenseStore::sort_unstable_by(&mut dense, |a: &(u32, char), b: &(u32, char)| a.0.cmp(&b.0));
        assert_eq!(DenseStore::partition_point(&dense, |e: &(u32, char)| e.0 < 5), 1);
        assert_eq!(DenseStore::len(&dense), 2);
    }

    #[test]
    fn test_segmented_dense_store() {
        let mut dense: SegmentedVec<u32> = SegmentedVec::with_block_size(2);
        DenseStore::push(&mut dense, 5);
        DenseStore::push(&mut dense, 1);
        DenseStore::push(&mut dense, 3);
        assert_eq!(DenseStore::swap_remove(&mut dense, 0), 5);
        assert_eq!(DenseStore::get(&dense, 0), Some(&3));
        DenseStore::sort_unstable_by(&mut dense, |a, b| a.cmp(b));
        assert_eq!(DenseStore::partition_point(&dense, |&x| x < 3), 1);
        assert_eq!(DenseStore::entries(&dense).count(), 2);
    }
}
