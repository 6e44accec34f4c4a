//! Pointer-stable segmented vector.
//!
//! This module provides [`SegmentedVec<T>`], a vector that stores its elements in
//! uniformly-sized segments instead of one contiguous buffer, so growing it never
//! moves an element that was already constructed.

use std::fmt;
use std::ops::{Index, IndexMut, Range};

use stead_common::{Error, Result};

use crate::iter::{IntoIter, Iter, IterMut};
use crate::metrics::{Cursor, SegmentMetrics};
use crate::segment::Segment;

/// An append/pop-back vector built on top of uniformly-sized segments.
///
/// `SegmentedVec<T>` provides a `Vec`-like interface while keeping every element at
/// a fixed address for as long as it lives:
///
/// - **Push** constructs the element in the spare room of the last segment, or in a
///   freshly allocated segment when the last one is full. Existing segments are
///   never reallocated.
/// - **Pop** destroys the last element and releases the last segment once it is
///   empty.
/// - **Indexing** is O(1): element `i` lives in segment `i >> shift` at offset
///   `i & mask`.
///
/// All segments except the last one are always full.
///
/// # Block Size
///
/// The requested block size is rounded up to the next power of two. The default
/// is [`SegmentMetrics::DEFAULT_BLOCK_SIZE`] elements.
///
/// # Examples
///
/// ```
/// use stead_segmented_vec::SegmentedVec;
///
/// let mut v = SegmentedVec::with_block_size(4);
/// v.push(10u32);
/// let first = &v[0] as *const u32;
/// for i in 0..100 {
///     v.push(i);
/// }
/// assert_eq!(&v[0] as *const u32, first);
/// assert_eq!(v.len(), 101);
/// assert_eq!(v.segment_count(), 26);
/// ```
pub struct SegmentedVec<T> {
    /// The individual segments that make up the collection
    segments: Vec<Segment<T>>,
    /// Uniform segment geometry
    metrics: SegmentMetrics,
    /// Total number of elements across all segments
    len: usize,
}

impl<T> SegmentedVec<T> {
    /// Creates a new, empty `SegmentedVec` with the default block size.
    pub fn new() -> SegmentedVec<T> {
        Self::with_metrics(SegmentMetrics::default())
    }

    /// Creates a new, empty `SegmentedVec` whose block size is `block_size`
    /// rounded up to a power of two.
    ///
    /// # Panics
    ///
    /// Panics if `block_size` is zero or too large to round.
    pub fn with_block_size(block_size: usize) -> SegmentedVec<T> {
        Self::with_metrics(SegmentMetrics::new(block_size))
    }

    /// Fallible version of [`with_block_size`](Self::with_block_size).
    pub fn try_with_block_size(block_size: usize) -> Result<SegmentedVec<T>> {
        Ok(Self::with_metrics(SegmentMetrics::try_new(block_size)?))
    }

    /// Creates a new, empty `SegmentedVec` with the given segment geometry.
    pub fn with_metrics(metrics: SegmentMetrics) -> SegmentedVec<T> {
        SegmentedVec {
            segments: Vec::new(),
            metrics,
            len: 0,
        }
    }

    /// Returns the total number of elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the vector contains no elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the segment geometry.
    #[inline]
    pub fn metrics(&self) -> SegmentMetrics {
        self.metrics
    }

    /// Returns the number of elements per segment.
    #[inline]
    pub fn block_size(&self) -> usize {
        self.metrics.block_size()
    }

    /// Returns the number of allocated segments.
    #[inline]
    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }

    /// Returns the number of element slots in the allocated segments.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.segments.len() << self.metrics.shift()
    }

    /// Returns the live part of every segment, in order.
    pub fn segments(&self) -> impl DoubleEndedIterator<Item = &[T]> + ExactSizeIterator {
        self.segments.iter().map(|segment| &segment[..])
    }

    /// Maps a linear index to a `(segment, offset)` pair.
    #[inline]
    pub fn map_index(&self, index: usize) -> (usize, usize) {
        self.metrics.map_index(index)
    }

    /// Returns a reference to the element at `index`, or `None` if out of bounds.
    #[inline]
    pub fn get(&self, index: usize) -> Option<&T> {
        let (sid, offset) = self.map_index(index);
        self.segments.get(sid)?.get(offset)
    }

    /// Returns a mutable reference to the element at `index`, or `None` if out of
    /// bounds.
    #[inline]
    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        let (sid, offset) = self.map_index(index);
        self.segments.get_mut(sid)?.get_mut(offset)
    }

    pub fn first(&self) -> Option<&T> {
        self.segments.first()?.first()
    }

    pub fn first_mut(&mut self) -> Option<&mut T> {
        self.segments.first_mut()?.first_mut()
    }

    pub fn last(&self) -> Option<&T> {
        self.segments.last()?.last()
    }

    pub fn last_mut(&mut self) -> Option<&mut T> {
        self.segments.last_mut()?.last_mut()
    }

    /// Appends an element to the end of the vector.
    ///
    /// If the last segment is full, a new segment is allocated first. No existing
    /// element is moved.
    #[inline]
    pub fn push(&mut self, value: T) {
        let block_size = self.metrics.block_size();
        if let Some(segment) = self.segments.last_mut() {
            if !segment.is_full(block_size) {
                segment.push(value);
                self.len += 1;
                return;
            }
        }
        self.push_to_new_segment(value);
    }

    /// Allocates a new segment, constructs `value` in it and appends it.
    #[cold]
    fn push_to_new_segment(&mut self, value: T) {
        let mut segment = Segment::with_block_size(self.metrics.block_size());
        segment.push(value);
        self.segments.push(segment);
        self.len += 1;
        log::trace!(
            "segmented vec: allocated segment {} ({} slots)",
            self.segments.len() - 1,
            self.metrics.block_size()
        );
    }

    /// Fallible version of [`push`](Self::push): fails instead of aborting when a
    /// new segment cannot be allocated. `value` is dropped on failure.
    pub fn try_push(&mut self, value: T) -> Result<()> {
        let block_size = self.metrics.block_size();
        if self.segments.last().is_none_or(|s| s.is_full(block_size)) {
            self.segments
                .try_reserve(1)
                .map_err(|e| Error::alloc("segment table", e))?;
            self.segments.push(Segment::try_with_block_size(block_size)?);
            log::trace!(
                "segmented vec: allocated segment {} ({} slots)",
                self.segments.len() - 1,
                block_size
            );
        }
        self.push(value);
        Ok(())
    }

    /// Removes the last element and returns it, or `None` if the vector is empty.
    ///
    /// The last segment is released as soon as it becomes empty.
    pub fn pop(&mut self) -> Option<T> {
        let segment = self.segments.last_mut()?;
        let value = segment.pop()?;
        self.len -= 1;
        if segment.is_empty() {
            self.segments.pop();
            log::trace!(
                "segmented vec: released segment {}",
                self.segments.len()
            );
        }
        Some(value)
    }

    /// Shortens the vector to `len` elements, releasing emptied segments.
    ///
    /// Has no effect if `len` is not below the current length.
    pub fn truncate(&mut self, len: usize) {
        if len >= self.len {
            return;
        }
        let keep = self.metrics.segments_for(len);
        log::trace!(
            "segmented vec: truncating {} -> {} elements, releasing {} segments",
            self.len,
            len,
            self.segments.len() - keep
        );
        self.segments.truncate(keep);
        if let Some(last) = self.segments.last_mut() {
            last.truncate(len - ((keep - 1) << self.metrics.shift()));
        }
        self.len = len;
    }

    /// Resizes the vector so that `len()` is `new_len`, filling new slots with
    /// values produced by `f`.
    pub fn resize_with<F>(&mut self, new_len: usize, mut f: F)
    where
        F: FnMut() -> T,
    {
        if new_len > self.len {
            self.reserve(new_len - self.len);
            while self.len < new_len {
                self.push(f());
            }
        } else {
            self.truncate(new_len);
        }
    }

    /// Fallible version of [`resize_with`](Self::resize_with).
    ///
    /// On failure the vector keeps the elements appended before the failing
    /// allocation.
    pub fn try_resize_with<F>(&mut self, new_len: usize, mut f: F) -> Result<()>
    where
        F: FnMut() -> T,
    {
        if new_len > self.len {
            self.try_reserve(new_len - self.len)?;
            while self.len < new_len {
                self.try_push(f())?;
            }
        } else {
            self.truncate(new_len);
        }
        Ok(())
    }

    /// Reserves room in the segment table for at least `additional` more elements.
    ///
    /// Segment buffers themselves are allocated lazily, when the first element is
    /// pushed into them.
    pub fn reserve(&mut self, additional: usize) {
        let needed = self.metrics.segments_for(self.len.saturating_add(additional));
        self.segments
            .reserve(needed.saturating_sub(self.segments.len()));
    }

    /// Fallible version of [`reserve`](Self::reserve).
    pub fn try_reserve(&mut self, additional: usize) -> Result<()> {
        let needed = self.metrics.segments_for(self.len.saturating_add(additional));
        self.segments
            .try_reserve(needed.saturating_sub(self.segments.len()))
            .map_err(|e| Error::alloc("segment table", e))
    }

    /// Removes all elements and releases every segment.
    ///
    /// The segment geometry is preserved.
    pub fn clear(&mut self) {
        self.segments.clear();
        self.len = 0;
    }

    /// Exchanges the contents of two vectors, including their geometry.
    pub fn swap_with(&mut self, other: &mut SegmentedVec<T>) {
        std::mem::swap(self, other);
    }

    /// Swaps two elements.
    ///
    /// # Panics
    ///
    /// Panics if `a` or `b` is out of bounds.
    pub fn swap(&mut self, a: usize, b: usize) {
        self.check_index(a);
        self.check_index(b);
        self.swap_in_bounds(a, b);
    }

    /// Swaps two elements whose positions are already known to be below `len()`.
    pub(crate) fn swap_in_bounds(&mut self, a: usize, b: usize) {
        debug_assert!(a < self.len && b < self.len);
        let (sa, oa) = self.map_index(a);
        let (sb, ob) = self.map_index(b);
        if sa == sb {
            self.segments[sa].swap(oa, ob);
            return;
        }
        let ((lo, lo_offset), (hi, hi_offset)) = if sa < sb {
            ((sa, oa), (sb, ob))
        } else {
            ((sb, ob), (sa, oa))
        };
        let (head, tail) = self.segments.split_at_mut(hi);
        std::mem::swap(&mut head[lo][lo_offset], &mut tail[0][hi_offset]);
    }

    /// Removes the element at `index` and returns it, replacing it with the last
    /// element.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds.
    pub fn swap_remove(&mut self, index: usize) -> T {
        self.check_index(index);
        let last = self.len - 1;
        if index != last {
            self.swap(index, last);
        }
        match self.pop() {
            Some(value) => value,
            None => unreachable!("pop from a non-empty vector"),
        }
    }

    /// Returns the cursor of the first element.
    #[inline]
    pub fn begin(&self) -> Cursor {
        Cursor::START
    }

    /// Returns the cursor one past the last element.
    #[inline]
    pub fn end(&self) -> Cursor {
        self.metrics.cursor(self.len)
    }

    /// Returns the cursor of linear position `index` (`index == len()` is allowed).
    #[inline]
    pub fn cursor_at(&self, index: usize) -> Cursor {
        assert!(index <= self.len, "cursor position {index} beyond end {}", self.len);
        self.metrics.cursor(index)
    }

    /// Returns the linear position of `cursor`.
    #[inline]
    pub fn index_of(&self, cursor: Cursor) -> usize {
        self.metrics.index(cursor)
    }

    /// Returns the element addressed by `cursor`.
    ///
    /// # Panics
    ///
    /// Panics if `cursor` does not address a live element.
    #[inline]
    pub fn at(&self, cursor: Cursor) -> &T {
        &self.segments[cursor.segment()][cursor.offset()]
    }

    /// Returns the element addressed by `cursor`.
    ///
    /// # Panics
    ///
    /// Panics if `cursor` does not address a live element.
    #[inline]
    pub fn at_mut(&mut self, cursor: Cursor) -> &mut T {
        &mut self.segments[cursor.segment()][cursor.offset()]
    }

    /// Returns an iterator over the elements.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(&self.segments, self.metrics, Cursor::START, self.end())
    }

    /// Returns an iterator over the elements in `range`.
    ///
    /// # Panics
    ///
    /// Panics if the range is decreasing or extends past the end.
    pub fn range(&self, range: Range<usize>) -> Iter<'_, T> {
        assert!(range.start <= range.end, "decreasing range {range:?}");
        assert!(range.end <= self.len, "range {range:?} beyond end {}", self.len);
        Iter::new(
            &self.segments,
            self.metrics,
            self.metrics.cursor(range.start),
            self.metrics.cursor(range.end),
        )
    }

    /// Returns an iterator that allows modifying each element.
    pub fn iter_mut(&mut self) -> IterMut<'_, T> {
        IterMut::new(&mut self.segments, self.len)
    }

    /// Returns the number of elements for which `pred` holds, assuming the
    /// vector is partitioned by `pred` (all `true` elements first).
    pub fn partition_point<P>(&self, mut pred: P) -> usize
    where
        P: FnMut(&T) -> bool,
    {
        let mut lo = 0;
        let mut hi = self.len;
        while lo < hi {
            let mid = lo + (hi - lo) / 2;
            if pred(&self[mid]) {
                lo = mid + 1;
            } else {
                hi = mid;
            }
        }
        lo
    }

    /// Returns the element at a position already known to be below `len()`.
    #[inline]
    pub(crate) fn get_in_bounds(&self, index: usize) -> &T {
        debug_assert!(index < self.len);
        let (sid, offset) = self.map_index(index);
        &self.segments[sid][offset]
    }

    #[inline]
    fn check_index(&self, index: usize) {
        assert!(
            index < self.len,
            "index {index} out of range for SegmentedVec of length {}",
            self.len
        );
    }
}

impl<T: Clone> SegmentedVec<T> {
    /// Resizes the vector so that `len()` is `new_len`, filling new slots with
    /// clones of `value`.
    pub fn resize(&mut self, new_len: usize, value: T) {
        self.resize_with(new_len, || value.clone());
    }

    /// Clones and appends all elements of `other`.
    pub fn extend_from_slice(&mut self, other: &[T]) {
        self.reserve(other.len());
        for value in other {
            self.push(value.clone());
        }
    }
}

impl<T> Default for SegmentedVec<T> {
    fn default() -> Self {
        SegmentedVec::new()
    }
}

impl<T: Clone> Clone for SegmentedVec<T> {
    /// Copies every element into freshly allocated full-size segments.
    fn clone(&self) -> Self {
        let mut copy = SegmentedVec::with_metrics(self.metrics);
        copy.segments.reserve_exact(self.segments.len());
        for segment in &self.segments {
            copy.extend_from_slice(segment);
        }
        copy
    }
}

impl<T> Index<usize> for SegmentedVec<T> {
    type Output = T;

    /// # Panics
    ///
    /// Panics if the index is out of bounds, same as standard vector indexing.
    #[inline]
    fn index(&self, index: usize) -> &T {
        self.check_index(index);
        let (sid, offset) = self.map_index(index);
        &self.segments[sid][offset]
    }
}

impl<T> IndexMut<usize> for SegmentedVec<T> {
    #[inline]
    fn index_mut(&mut self, index: usize) -> &mut T {
        self.check_index(index);
        let (sid, offset) = self.map_index(index);
        &mut self.segments[sid][offset]
    }
}

impl<T: fmt::Debug> fmt::Debug for SegmentedVec<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T: PartialEq> PartialEq for SegmentedVec<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.iter().eq(other.iter())
    }
}

impl<T: Eq> Eq for SegmentedVec<T> {}

impl<T> Extend<T> for SegmentedVec<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        let iter = iter.into_iter();
        self.reserve(iter.size_hint().0);
        for value in iter {
            self.push(value);
        }
    }
}

impl<'a, T: Copy + 'a> Extend<&'a T> for SegmentedVec<T> {
    fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
        self.extend(iter.into_iter().copied());
    }
}

impl<T> FromIterator<T> for SegmentedVec<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut v = SegmentedVec::new();
        v.extend(iter);
        v
    }
}

impl<T> From<Vec<T>> for SegmentedVec<T> {
    fn from(values: Vec<T>) -> Self {
        values.into_iter().collect()
    }
}

impl<T> IntoIterator for SegmentedVec<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> IntoIter<T> {
        IntoIter::new(self.segments, self.len)
    }
}

impl<'a, T> IntoIterator for &'a SegmentedVec<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}

impl<'a, T> IntoIterator for &'a mut SegmentedVec<T> {
    type Item = &'a mut T;
    type IntoIter = IterMut<'a, T>;

    fn into_iter(self) -> IterMut<'a, T> {
        self.iter_mut()
    }
}
