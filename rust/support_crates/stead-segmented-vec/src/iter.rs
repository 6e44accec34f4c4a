//! Iterators over [`SegmentedVec`](crate::SegmentedVec).

use std::iter::FusedIterator;

use crate::metrics::{Cursor, SegmentMetrics};
use crate::segment::Segment;

/// Immutable iterator over a segmented vector.
///
/// The iterator is a pair of cursors. Stepping crosses segment boundaries in O(1),
/// and skipping ahead with [`nth`](Iterator::nth) or [`nth_back`](DoubleEndedIterator::nth_back)
/// is O(1) as well, since it goes through cursor arithmetic rather than walking the
/// segments.
pub struct Iter<'a, T> {
    segments: &'a [Segment<T>],
    metrics: SegmentMetrics,
    front: Cursor,
    back: Cursor,
}

impl<'a, T> Iter<'a, T> {
    pub(crate) fn new(
        segments: &'a [Segment<T>],
        metrics: SegmentMetrics,
        front: Cursor,
        back: Cursor,
    ) -> Iter<'a, T> {
        debug_assert!(front <= back);
        Iter {
            segments,
            metrics,
            front,
            back,
        }
    }

    /// Cursor of the next element yielded from the front.
    #[inline]
    pub fn cursor(&self) -> Cursor {
        self.front
    }

    /// Cursor one past the next element yielded from the back.
    #[inline]
    pub fn end_cursor(&self) -> Cursor {
        self.back
    }

    #[inline]
    fn remaining(&self) -> usize {
        self.metrics.distance(self.front, self.back) as usize
    }

    #[inline]
    fn get(&self, cursor: Cursor) -> &'a T {
        let segments: &'a [Segment<T>] = self.segments;
        &segments[cursor.segment()][cursor.offset()]
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    #[inline]
    fn next(&mut self) -> Option<&'a T> {
        if self.front == self.back {
            return None;
        }
        let item = self.get(self.front);
        self.front = self.metrics.next(self.front);
        Some(item)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.remaining();
        (n, Some(n))
    }

    fn nth(&mut self, n: usize) -> Option<&'a T> {
        if n >= self.remaining() {
            self.front = self.back;
            return None;
        }
        self.front = self.metrics.advance(self.front, n as isize);
        self.next()
    }

    #[inline]
    fn count(self) -> usize {
        self.remaining()
    }

    fn last(mut self) -> Option<&'a T> {
        self.next_back()
    }
}

impl<T> DoubleEndedIterator for Iter<'_, T> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.front == self.back {
            return None;
        }
        self.back = self.metrics.prev(self.back);
        Some(self.get(self.back))
    }

    fn nth_back(&mut self, n: usize) -> Option<Self::Item> {
        if n >= self.remaining() {
            self.back = self.front;
            return None;
        }
        self.back = self.metrics.advance(self.back, -(n as isize));
        self.next_back()
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> FusedIterator for Iter<'_, T> {}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Iter {
            segments: self.segments,
            metrics: self.metrics,
            front: self.front,
            back: self.back,
        }
    }
}

/// Mutable iterator over a segmented vector.
pub struct IterMut<'a, T> {
    segments: std::slice::IterMut<'a, Segment<T>>,
    front: std::slice::IterMut<'a, T>,
    back: std::slice::IterMut<'a, T>,
    remaining: usize,
}

impl<'a, T> IterMut<'a, T> {
    pub(crate) fn new(segments: &'a mut [Segment<T>], len: usize) -> IterMut<'a, T> {
        IterMut {
            segments: segments.iter_mut(),
            front: Default::default(),
            back: Default::default(),
            remaining: len,
        }
    }
}

impl<'a, T> Iterator for IterMut<'a, T> {
    type Item = &'a mut T;

    fn next(&mut self) -> Option<&'a mut T> {
        loop {
            if let Some(item) = self.front.next() {
                self.remaining -= 1;
                return Some(item);
            }
            match self.segments.next() {
                Some(segment) => self.front = segment.iter_mut(),
                None => {
                    let item = self.back.next()?;
                    self.remaining -= 1;
                    return Some(item);
                }
            }
        }
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> DoubleEndedIterator for IterMut<'_, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(item) = self.back.next_back() {
                self.remaining -= 1;
                return Some(item);
            }
            match self.segments.next_back() {
                Some(segment) => self.back = segment.iter_mut(),
                None => {
                    let item = self.front.next_back()?;
                    self.remaining -= 1;
                    return Some(item);
                }
            }
        }
    }
}

impl<T> ExactSizeIterator for IterMut<'_, T> {}

impl<T> FusedIterator for IterMut<'_, T> {}

/// Owning iterator over a segmented vector.
pub struct IntoIter<T> {
    segments: std::vec::IntoIter<Segment<T>>,
    front: std::vec::IntoIter<T>,
    back: std::vec::IntoIter<T>,
    remaining: usize,
}

impl<T> IntoIter<T> {
    pub(crate) fn new(segments: Vec<Segment<T>>, len: usize) -> IntoIter<T> {
        IntoIter {
            segments: segments.into_iter(),
            front: Default::default(),
            back: Default::default(),
            remaining: len,
        }
    }
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        loop {
            if let Some(item) = self.front.next() {
                self.remaining -= 1;
                return Some(item);
            }
            match self.segments.next() {
                Some(segment) => self.front = segment.into_vec().into_iter(),
                None => {
                    let item = self.back.next()?;
                    self.remaining -= 1;
                    return Some(item);
                }
            }
        }
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    fn next_back(&mut self) -> Option<T> {
        loop {
            if let Some(item) = self.back.next_back() {
                self.remaining -= 1;
                return Some(item);
            }
            match self.segments.next_back() {
                Some(segment) => self.back = segment.into_vec().into_iter(),
                None => {
                    let item = self.front.next_back()?;
                    self.remaining -= 1;
                    return Some(item);
                }
            }
        }
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}

impl<T> FusedIterator for IntoIter<T> {}
