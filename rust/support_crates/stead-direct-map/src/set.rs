//! Direct-address set over contiguous storage.

use std::fmt;
use std::ops::Range;

use stead_common::Result;

use crate::capabilities::Capabilities;
use crate::key::DirectKey;
use crate::storage::FlatIndex;
use crate::table::RawTable;

/// A set of integer keys with O(1) insert, membership test and removal.
///
/// Keys are kept packed in one vector, in no particular order, and addressed
/// through a sparse table indexed directly by key. [`set_intersect`] and
/// [`set_complement`] filter the set in place in O(len), testing membership in the
/// other set in O(1) per key.
///
/// [`set_intersect`]: DirectSet::set_intersect
/// [`set_complement`]: DirectSet::set_complement
///
/// # Examples
///
/// ```
/// use stead_direct_map::DirectSet;
///
/// let mut a: DirectSet<u16> = [1, 2, 3, 4, 5].into_iter().collect();
/// let b: DirectSet<u16> = [2, 4, 6].into_iter().collect();
/// a.set_intersect(&b);
/// let expected: DirectSet<u16> = [4, 2].into_iter().collect();
/// assert_eq!(a, expected);
/// ```
#[derive(Clone)]
pub struct DirectSet<K> {
    table: RawTable<K, K, Vec<K>, FlatIndex>,
}

impl<K: DirectKey> DirectSet<K> {
    /// Containers of this kind hold unique integer keys in insertion-dependent order.
    pub const CAPABILITIES: Capabilities = Capabilities::DIRECT_ADDRESS;

    pub fn new() -> DirectSet<K> {
        DirectSet {
            table: RawTable::from_parts(Vec::new(), FlatIndex::default()),
        }
    }

    /// Creates an empty set with room for keys below `capacity`.
    pub fn with_capacity(capacity: usize) -> DirectSet<K> {
        let mut set = DirectSet::new();
        set.reserve(capacity);
        set
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.table.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.table.len() == 0
    }

    /// Returns the number of key slots of the sparse table.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.table.capacity()
    }

    pub fn reserve(&mut self, capacity: usize) {
        self.table.reserve(capacity);
    }

    pub fn try_reserve(&mut self, capacity: usize) -> Result<()> {
        self.table.try_reserve(capacity)
    }

    pub fn clear(&mut self) {
        self.table.clear();
    }

    pub fn swap_with(&mut self, other: &mut DirectSet<K>) {
        std::mem::swap(self, other);
    }

    /// Adds `key`. Returns its dense position and whether it was newly added.
    pub fn insert(&mut self, key: K) -> (usize, bool) {
        self.table.insert_with(key, || key)
    }

    #[inline]
    pub fn find(&self, key: K) -> Option<usize> {
        self.table.find(key)
    }

    #[inline]
    pub fn contains(&self, key: K) -> bool {
        self.table.contains(key)
    }

    /// Removes `key`. Returns `true` if it was present.
    pub fn remove(&mut self, key: K) -> bool {
        self.table.remove(key).is_some()
    }

    /// Removes the key at dense position `pos`.
    ///
    /// # Panics
    ///
    /// Panics if `pos` is out of bounds.
    pub fn remove_at(&mut self, pos: usize) -> K {
        self.table.remove_at(pos)
    }

    /// Removes the keys at dense positions `range`, in O(range length).
    pub fn remove_range(&mut self, range: Range<usize>) {
        self.table.remove_range(range);
    }

    /// Returns the key at dense position `pos`.
    pub fn get_index(&self, pos: usize) -> Option<K> {
        self.table.dense().get(pos).copied()
    }

    pub fn retain<F>(&mut self, mut f: F)
    where
        F: FnMut(K) -> bool,
    {
        self.table.retain(|k| f(*k));
    }

    /// Keeps only the keys also present in `other`.
    pub fn set_intersect(&mut self, other: &DirectSet<K>) {
        self.retain(|k| other.contains(k));
    }

    /// Removes every key present in `other`.
    pub fn set_complement(&mut self, other: &DirectSet<K>) {
        self.retain(|k| !other.contains(k));
    }

    /// Returns an iterator over the keys in dense order.
    pub fn iter(&self) -> std::iter::Copied<std::slice::Iter<'_, K>> {
        self.table.dense().iter().copied()
    }

    #[inline]
    pub fn as_slice(&self) -> &[K] {
        self.table.dense()
    }

    /// Returns the dense keys for in-place reordering.
    ///
    /// After moving keys around or changing them, call [`remap`](Self::remap) before
    /// using the set by key again.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [K] {
        self.table.dense_mut()
    }

    /// Rebuilds the sparse table from the dense keys in O(len).
    pub fn remap(&mut self) {
        self.table.remap();
    }

    /// Sorts the keys ascending.
    pub fn sort(&mut self) {
        self.table.sort();
    }

    /// First dense position whose key is not less than `key`. Requires sorted keys.
    pub fn lower_bound(&self, key: K) -> usize {
        self.table.lower_bound(key)
    }

    /// First dense position whose key is greater than `key`. Requires sorted keys.
    pub fn upper_bound(&self, key: K) -> usize {
        self.table.upper_bound(key)
    }

    pub fn verify(&self) -> Result<()> {
        self.table.verify()
    }
}

impl<K: DirectKey> Default for DirectSet<K> {
    fn default() -> Self {
        DirectSet::new()
    }
}

impl<K: DirectKey> fmt::Debug for DirectSet<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<K: DirectKey> PartialEq for DirectSet<K> {
    /// Two sets are equal when they hold the same keys, in any order.
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().all(|k| other.contains(k))
    }
}

impl<K: DirectKey> Eq for DirectSet<K> {}

impl<K: DirectKey> Extend<K> for DirectSet<K> {
    fn extend<I: IntoIterator<Item = K>>(&mut self, iter: I) {
        for key in iter {
            self.insert(key);
        }
    }
}

impl<'a, K: DirectKey + 'a> Extend<&'a K> for DirectSet<K> {
    fn extend<I: IntoIterator<Item = &'a K>>(&mut self, iter: I) {
        self.extend(iter.into_iter().copied());
    }
}

impl<K: DirectKey> FromIterator<K> for DirectSet<K> {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut set = DirectSet::new();
        set.extend(iter);
        set
    }
}

impl<K: DirectKey> IntoIterator for DirectSet<K> {
    type Item = K;
    type IntoIter = std::vec::IntoIter<K>;

    fn into_iter(self) -> Self::IntoIter {
        self.table.into_dense().into_iter()
    }
}

impl<'a, K: DirectKey> IntoIterator for &'a DirectSet<K> {
    type Item = K;
    type IntoIter = std::iter::Copied<std::slice::Iter<'a, K>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
