//! Direct-address map over contiguous storage.

use std::fmt;
use std::ops::{Index, IndexMut, Range};

use stead_common::Result;

use crate::capabilities::Capabilities;
use crate::iter::{Iter, IterMut};
use crate::key::DirectKey;
use crate::storage::FlatIndex;
use crate::table::RawTable;

/// A map from integer keys to values with O(1) insert, lookup and removal.
///
/// `DirectMap` keeps its `(key, value)` entries packed in one vector, in no
/// particular order, and addresses them through a sparse table indexed directly by
/// key. Removal moves the last entry into the vacated position, so it is O(1) and
/// does not preserve order.
///
/// The sparse table grows to cover the largest key ever inserted and never shrinks.
/// Growing it replaces the table and rebuilds it from the entries, which costs
/// O(len).
///
/// # Examples
///
/// ```
/// use stead_direct_map::DirectMap;
///
/// let mut m = DirectMap::new();
/// m.insert(3u32, "three");
/// m.insert(10, "ten");
/// assert_eq!(m.get(10), Some(&"ten"));
/// assert_eq!(m.remove(3), Some("three"));
/// assert!(!m.contains_key(3));
/// assert_eq!(m.len(), 1);
/// ```
#[derive(Clone)]
pub struct DirectMap<K, V> {
    table: RawTable<K, (K, V), Vec<(K, V)>, FlatIndex>,
}

impl<K: DirectKey, V> DirectMap<K, V> {
    /// Containers of this kind hold unique integer keys in insertion-dependent order.
    pub const CAPABILITIES: Capabilities = Capabilities::DIRECT_ADDRESS;

    /// Creates an empty map. No memory is allocated until the first insert.
    pub fn new() -> DirectMap<K, V> {
        DirectMap {
            table: RawTable::from_parts(Vec::new(), FlatIndex::default()),
        }
    }

    /// Creates an empty map with room for keys below `capacity`.
    pub fn with_capacity(capacity: usize) -> DirectMap<K, V> {
        let mut map = DirectMap::new();
        map.reserve(capacity);
        map
    }

    /// Returns the number of entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// Returns `true` if the map has no entries.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.table.len() == 0
    }

    /// Returns the number of key slots of the sparse table. Keys below this bound
    /// are inserted without growing it.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.table.capacity()
    }

    /// Makes room for keys below `capacity` and `capacity` entries.
    pub fn reserve(&mut self, capacity: usize) {
        self.table.reserve(capacity);
    }

    /// Fallible version of [`reserve`](Self::reserve).
    pub fn try_reserve(&mut self, capacity: usize) -> Result<()> {
        self.table.try_reserve(capacity)
    }

    /// Removes all entries. The sparse table keeps its capacity.
    pub fn clear(&mut self) {
        self.table.clear();
    }

    /// Exchanges the contents of two maps.
    pub fn swap_with(&mut self, other: &mut DirectMap<K, V>) {
        std::mem::swap(self, other);
    }

    /// Inserts `value` under `key` unless the key is already present, in which case
    /// the map is unchanged and `value` is dropped.
    ///
    /// Returns the dense position of `key` and whether the entry was added.
    pub fn insert(&mut self, key: K, value: V) -> (usize, bool) {
        self.table.insert_with(key, || (key, value))
    }

    /// Returns the value under `key`, inserting `V::default()` first if absent.
    pub fn get_or_insert_default(&mut self, key: K) -> &mut V
    where
        V: Default,
    {
        self.get_or_insert_with(key, V::default)
    }

    /// Returns the value under `key`, inserting `f()` first if absent.
    pub fn get_or_insert_with<F>(&mut self, key: K, f: F) -> &mut V
    where
        F: FnOnce() -> V,
    {
        let (pos, _) = self.table.insert_with(key, || (key, f()));
        &mut self.table.dense_mut()[pos].1
    }

    /// Returns the dense position of `key`.
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

    /// Returns the entry at dense position `pos`.
    pub fn get_index(&self, pos: usize) -> Option<(K, &V)> {
        self.table.dense().get(pos).map(|(k, v)| (*k, v))
    }

    pub fn get_index_mut(&mut self, pos: usize) -> Option<(K, &mut V)> {
        self.table.dense_mut().get_mut(pos).map(|(k, v)| (*k, v))
    }

    /// Removes `key` and returns its value. The last entry takes its dense position.
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

    /// Removes the entries at dense positions `range`, in O(range length).
    ///
    /// # Panics
    ///
    /// Panics if the range is decreasing or extends past the end.
    pub fn remove_range(&mut self, range: Range<usize>) {
        self.table.remove_range(range);
    }

    /// Keeps only the entries for which `f` returns `true`.
    pub fn retain<F>(&mut self, mut f: F)
    where
        F: FnMut(K, &mut V) -> bool,
    {
        self.table.retain(|(k, v)| f(*k, v));
    }

    /// Returns an iterator over `(key, &value)` in dense order.
    pub fn iter(&self) -> Iter<std::slice::Iter<'_, (K, V)>> {
        Iter::new(self.table.dense().iter())
    }

    /// Returns an iterator over `(key, &mut value)` in dense order.
    pub fn iter_mut(&mut self) -> IterMut<std::slice::IterMut<'_, (K, V)>> {
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
    pub fn entries(&self) -> &[(K, V)] {
        self.table.dense()
    }

    /// Returns the dense entries for in-place reordering.
    ///
    /// After moving entries around or changing keys, call [`remap`](Self::remap)
    /// before using the map by key again.
    #[inline]
    pub fn entries_mut(&mut self) -> &mut [(K, V)] {
        self.table.dense_mut()
    }

    /// Rebuilds the sparse table from the dense entries in O(len).
    pub fn remap(&mut self) {
        self.table.remap();
    }

    /// Sorts the entries by key. Afterwards [`lower_bound`](Self::lower_bound) and
    /// [`upper_bound`](Self::upper_bound) are meaningful, until the next removal.
    pub fn sort(&mut self) {
        self.table.sort();
    }

    /// First dense position whose key is not less than `key`. Requires sorted entries.
    pub fn lower_bound(&self, key: K) -> usize {
        self.table.lower_bound(key)
    }

    /// First dense position whose key is greater than `key`. Requires sorted entries.
    pub fn upper_bound(&self, key: K) -> usize {
        self.table.upper_bound(key)
    }

    /// Checks that every entry is reachable through the sparse table.
    pub fn verify(&self) -> Result<()> {
        self.table.verify()
    }
}

impl<K: DirectKey, V> Default for DirectMap<K, V> {
    fn default() -> Self {
        DirectMap::new()
    }
}

impl<K: DirectKey, V> Index<K> for DirectMap<K, V> {
    type Output = V;

    /// # Panics
    ///
    /// Panics if `key` is not present.
    fn index(&self, key: K) -> &V {
        match self.get(key) {
            Some(value) => value,
            None => panic!("key {key:?} not found in DirectMap"),
        }
    }
}

impl<K: DirectKey, V> IndexMut<K> for DirectMap<K, V> {
    fn index_mut(&mut self, key: K) -> &mut V {
        match self.get_mut(key) {
            Some(value) => value,
            None => panic!("key {key:?} not found in DirectMap"),
        }
    }
}

impl<K: DirectKey, V: fmt::Debug> fmt::Debug for DirectMap<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K: DirectKey, V: PartialEq> PartialEq for DirectMap<K, V> {
    /// Two maps are equal when they hold the same key/value pairs, in any order.
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().all(|(k, v)| other.get(k) == Some(v))
    }
}

impl<K: DirectKey, V: Eq> Eq for DirectMap<K, V> {}

impl<K: DirectKey, V> Extend<(K, V)> for DirectMap<K, V> {
    /// Inserts every pair. A key already present keeps its current value.
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (k, v) in iter {
            self.insert(k, v);
        }
    }
}

impl<K: DirectKey, V> FromIterator<(K, V)> for DirectMap<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = DirectMap::new();
        map.extend(iter);
        map
    }
}

impl<K: DirectKey, V> IntoIterator for DirectMap<K, V> {
    type Item = (K, V);
    type IntoIter = std::vec::IntoIter<(K, V)>;

    fn into_iter(self) -> Self::IntoIter {
        self.table.into_dense().into_iter()
    }
}

impl<'a, K: DirectKey, V> IntoIterator for &'a DirectMap<K, V> {
    type Item = (K, &'a V);
    type IntoIter = Iter<std::slice::Iter<'a, (K, V)>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, K: DirectKey, V> IntoIterator for &'a mut DirectMap<K, V> {
    type Item = (K, &'a mut V);
    type IntoIter = IterMut<std::slice::IterMut<'a, (K, V)>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}
