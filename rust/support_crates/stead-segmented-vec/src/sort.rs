//! In-place ordering helpers for [`SegmentedVec`].
//!
//! Elements are never relocated between segments by anything other than swaps, so
//! the sort is an in-place heapsort over linear indices.

use std::cmp::Ordering;

use crate::SegmentedVec;

impl<T> SegmentedVec<T> {
    /// Sorts the vector with a comparator. The sort is not stable.
    pub fn sort_unstable_by<F>(&mut self, mut compare: F)
    where
        F: FnMut(&T, &T) -> Ordering,
    {
        let len = self.len();
        if len < 2 {
            return;
        }
        let mut is_less = |a: &T, b: &T| compare(a, b) == Ordering::Less;
        for node in (0..len / 2).rev() {
            sift_down(self, node, len, &mut is_less);
        }
        for end in (1..len).rev() {
            self.swap_in_bounds(0, end);
            sift_down(self, 0, end, &mut is_less);
        }
    }

    /// Sorts the vector with a key extraction function. The sort is not stable.
    pub fn sort_unstable_by_key<K, F>(&mut self, mut f: F)
    where
        K: Ord,
        F: FnMut(&T) -> K,
    {
        self.sort_unstable_by(|a, b| f(a).cmp(&f(b)));
    }

    /// Sorts the vector. The sort is not stable.
    pub fn sort_unstable(&mut self)
    where
        T: Ord,
    {
        self.sort_unstable_by(T::cmp);
    }

    /// Binary searches a sorted vector with a comparator.
    ///
    /// Same contract as [`slice::binary_search_by`]: `Ok(index)` of a matching
    /// element, or `Err(index)` where a matching element could be inserted.
    pub fn binary_search_by<F>(&self, mut f: F) -> Result<usize, usize>
    where
        F: FnMut(&T) -> Ordering,
    {
        let pos = self.partition_point(|item| f(item) == Ordering::Less);
        match self.get(pos) {
            Some(item) if f(item) == Ordering::Equal => Ok(pos),
            _ => Err(pos),
        }
    }

    /// Returns `true` if the elements are in non-decreasing order by `compare`.
    pub fn is_sorted_by<F>(&self, mut compare: F) -> bool
    where
        F: FnMut(&T, &T) -> bool,
    {
        let mut iter = self.iter();
        let Some(mut prev) = iter.next() else {
            return true;
        };
        for item in iter {
            if !compare(prev, item) {
                return false;
            }
            prev = item;
        }
        true
    }
}

/// Restores the heap property below `node`. Every position touched is below `end`,
/// which never exceeds `len()`.
fn sift_down<T, F>(v: &mut SegmentedVec<T>, mut node: usize, end: usize, is_less: &mut F)
where
    F: FnMut(&T, &T) -> bool,
{
    debug_assert!(end <= v.len());
    loop {
        let mut child = 2 * node + 1;
        if child >= end {
            return;
        }
        if child + 1 < end && is_less(v.get_in_bounds(child), v.get_in_bounds(child + 1)) {
            child += 1;
        }
        if !is_less(v.get_in_bounds(node), v.get_in_bounds(child)) {
            return;
        }
        v.swap_in_bounds(node, child);
        node = child;
    }
}
