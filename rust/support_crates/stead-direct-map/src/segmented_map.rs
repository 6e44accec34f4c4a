//! Direct-address map over segmented storage.

use std::fmt;
use std::ops::{Index, IndexMut, Range};

use stead_common::Result;
use stead_segmented_vec::{SegmentMetrics, SegmentedVec};

use crate::capabilities::Capabilities;
use crate::iter::{Iter, IterMut};
use crate::key::DirectKey;
use crate::storage::BlockIndex;
use crate::table::RawTable;

/// A direct-address map whose entries and sparse table are both segmented.
///
/// Same contract as [`DirectMap`](crate::DirectMap), with two differences:
///
/// - The sparse table grows by appending blocks, so a large key domain never needs
///   one giant allocation and growth never triggers a rebuild.
/// - Entries live in a [`SegmentedVec`], so they never move when the map grows.
///   Removal still moves the last entry into the vacated position.
///
/// Both arrays share one block size, rounded up to a power of two.
///
/// # Examples
///
/// ```
/// use stead_direct_map::SegmentedDirectMap;
///
/// let mut m = SegmentedDirectMap::with_block_size(64);
/// for (k, v) in [(5u32, "a"), (1, "b"), (9, "c"), (1024, "d")] {
///     m.insert(k, v);
/// }
/// assert_eq!(m.len(), 4);
/// assert_eq!(m.get(1024), Some(&"d"));
/// assert_eq!(m.capacity(), 1088);
/// ```
#[derive(Clone)]
pub struct SegmentedDirectMap<K, V> {
    table: RawTable<K, (K, V), SegmentedVec<(K, V)>, BlockIndex>,
}

impl<K: DirectKey, V> SegmentedDirectMap<K, V> {
    /// Containers of this kind hold unique integer keys in insertion-dependent order.
    pub const CAPABILITIES: Capabilities = Capabilities::DIRECT_ADDRESS;

    /// Creates an empty map with the default block size.
    pub fn new() -> SegmentedDirectMap<K, V> {
        Self::with_metrics(SegmentMetrics::default())
    }

    /// Creates an empty map whose blocks hold `block_size` entries, rounded up to a
    /// power of two.
    ///
    /// # Panics
    ///
    /// Panics if `block_size` is zero or too large to round.
    pub fn with_block_size(block_size: usize) -> SegmentedDirectMap<K, V> {
        Self::with_metrics(SegmentMetrics::new(block_size))
    }

    /// Fallible version of [`with_block_size`](Self::with_block_size).
    pub fn try_with_block_size(block_size: usize) -> Result<SegmentedDirectMap<K, V>> {
        Ok(Self::with_metrics(SegmentMetrics::try_new(block_size)?))
    }

    pub fn with_metrics(metrics: SegmentMetrics) -> SegmentedDirectMap<K, V> {
        SegmentedDirectMap {
            table: RawTable::from_parts(
                SegmentedVec::with_metrics(metrics),
                BlockIndex::with_metrics(metrics),
            ),
        }
    }

    #[inline]
    pub fn metrics(&self) -> SegmentMetrics {
        self.table.sparse().metrics()
    }

    #[inline]
    pub fn block_size(&self) -> usize {
        self.metrics().block_size()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.table.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.table.len() == 0
    }

    /// Returns the number of key slots of the sparse table, always a whole number of
    /// blocks.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.table.capacity()
    }

    /// Makes room for keys below `capacity` and `capacity` entries.
    pub fn reserve(&mut self, capacity: usize) {
        self.table.reserve(capacity);
    }

    pub fn try_reserve(&mut self, capacity: usize) -> Result<()> {
        self.table.try_reserve(capacity)
    }

    /// Removes all entries, releasing the entry segments. The sparse table keeps its
    /// blocks.
    pub fn clear(&mut self) {
        self.table.clear();
    }

    pub fn swap_with(&mut self, other: &mut SegmentedDirectMap<K, V>) {
        std::mem::swap(self, other);
    }

    /// Inserts `value` under `key` unless the key is already present, in which case
    /// the map is unchanged and `value` is dropped.
    ///
    /// Returns the dense position of `key` and whether the entry was added.
    pub fn insert(&mut self, key: K, value: V) -> (usize, bool) {
        self.table.insert_with(key, || (key, value))
    }

    pub fn get_or_insert_default(&mut self, key: K) -> &mut V
    where
        V: Default,
    {
        self.get_or_insert_with(key, V::default)
    }

    pub fn get_or_insert_with<F>(&mut self, key: K, f: F) -> &mut V
    where
        F: FnOnce() -> V,
    {
        let (pos, _) = self.table.insert_with(key, || (key, f()));
        &mut self.table.dense_mut()[pos].1
    }

    #[inline]
    pub fn find(&self, key: K) -> Option<usize> {
        self.table.find(key)
    }

    #[inline]
    pub fn contains_key(&self, key: K) -> bool {
        self.table.contains(key)
    }

    #[inline]
    pub fn get(&self, key: K) -> Option<&V> {
        let pos = self.table.find(key)?;
        Some(&self.table.dense()[pos].1)
    }

    #[inline]
    pub fn get_mut(&mut self, key: K) -> Option<&mut V> {
        let pos = self.table.find(key)?;
        Some(&mut self.table.dense_mut()[pos].1)
    }

    pub fn get_index(&self, pos: usize) -> Option<(K, &V)> {
        self.table.dense().get(pos).map(|(k, v)| (*k, v))
    }

    pub fn get_index_mut(&mut self, pos: usize) -> Option<(K, &mut V)> {
        self.table.dense_mut().get_mut(pos).map(|(k, v)| (*k, v))
    }

    pub fn remove(&mut self, key: K) -> Option<V> {
        self.table.remove(key).map(|(_, v)| v)
    }

    /// Removes the entry at dense position `pos`.
    ///
    /// # Panics
    ///
    /// Panics if `pos` is out of bounds.
    pub fn remove_at(&mut self, pos: usize) -> (K, V) {
        self.table.remove_at(pos)
    }

    pub fn remove_range(&mut self, range: Range<usize>) {
        self.table.remove_range(range);
    }

    pub fn retain<F>(&mut self, mut f: F)
    where
        F: FnMut(K, &mut V) -> bool,
    {
        self.table.retain(|(k, v)| f(*k, v));
    }

    pub fn iter(&self) -> Iter<stead_segmented_vec::Iter<'_, (K, V)>> {
        Iter::new(self.table.dense().iter())
    }

    pub fn iter_mut(&mut self) -> IterMut<stead_segmented_vec::IterMut<'_, (K, V)>> {
        IterMut::new(self.table.dense_mut().iter_mut())
    }

    pub fn keys(&self) -> impl DoubleEndedIterator<Item = K> + ExactSizeIterator {
        self.table.dense().iter().map(|(k, _)| *k)
    }

    pub fn values(&self) -> impl DoubleEndedIterator<Item = &V> + ExactSizeIterator {
        self.table.dense().iter().map(|(_, v)| v)
    }

    pub fn values_mut(&mut self) -> impl DoubleEndedIterator<Item = &mut V> + ExactSizeIterator {
        self.table.dense_mut().iter_mut().map(|(_, v)| v)
    }

    /// Returns the dense entries.
    #[inline]
    pub fn entries(&self) -> &SegmentedVec<(K, V)> {
        self.table.dense()
    }

    /// Returns the dense entries for in-place reordering.
    ///
    /// After moving entries around or changing keys, call [`remap`](Self::remap)
    /// before using the map by key again.
    #[inline]
    pub fn entries_mut(&mut self) -> &mut SegmentedVec<(K, V)> {
        self.table.dense_mut()
    }

    pub fn remap(&mut self) {
        self.table.remap();
    }

    pub fn sort(&mut self) {
        self.table.sort();
    }

    pub fn lower_bound(&self, key: K) -> usize {
        self.table.lower_bound(key)
    }

    pub fn upper_bound(&self, key: K) -> usize {
        self.table.upper_bound(key)
    }

    pub fn verify(&self) -> Result<()> {
        self.table.verify()
    }
}

impl<K: DirectKey, V> Default for SegmentedDirectMap<K, V> {
    fn default() -> Self {
        SegmentedDirectMap::new()
    }
}

impl<K: DirectKey, V> Index<K> for SegmentedDirectMap<K, V> {
    type Output = V;

    fn index(&self, key: K) -> &V {
        match self.get(key) {
            Some(value) => value,
            None => panic!("key {key:?} not found in SegmentedDirectMap"),
        }
    }
}

impl<K: DirectKey, V> IndexMut<K> for SegmentedDirectMap<K, V> {
    fn index_mut(&mut self, key: K) -> &mut V {
        match self.get_mut(key) {
            Some(value) => value,
            None => panic!("key {key:?} not found in SegmentedDirectMap"),
        }
    }
}

impl<K: DirectKey, V: fmt::Debug> fmt::Debug for SegmentedDirectMap<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K: DirectKey, V: PartialEq> PartialEq for SegmentedDirectMap<K, V> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().all(|(k, v)| other.get(k) == Some(v))
    }
}

impl<K: DirectKey, V: Eq> Eq for SegmentedDirectMap<K, V> {}

impl<K: DirectKey, V> Extend<(K, V)> for SegmentedDirectMap<K, V> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (k, v) in iter {
            self.insert(k, v);
        }
    }
}

impl<K: DirectKey, V> FromIterator<(K, V)> for SegmentedDirectMap<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = SegmentedDirectMap::new();
        map.extend(iter);
        map
    }
}

impl<K: DirectKey, V> IntoIterator for SegmentedDirectMap<K, V> {
    type Item = (K, V);
    type IntoIter = stead_segmented_vec::IntoIter<(K, V)>;

    fn into_iter(self) -> Self::IntoIter {
        self.table.into_dense().into_iter()
    }
}

impl<'a, K: DirectKey, V> IntoIterator for &'a SegmentedDirectMap<K, V> {
    type Item = (K, &'a V);
    type IntoIter = Iter<stead_segmented_vec::Iter<'a, (K, V)>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, K: DirectKey, V> IntoIterator for &'a mut SegmentedDirectMap<K, V> {
    type Item = (K, &'a mut V);
    type IntoIter = IterMut<stead_segmented_vec::IterMut<'a, (K, V)>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}
