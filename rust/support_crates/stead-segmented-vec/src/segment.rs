use std::ops::{Deref, DerefMut};

use stead_common::{Error, Result};

/// A fixed-capacity block of storage with an explicit live length.
///
/// The backing buffer is allocated once with room for the whole block, and
/// elements are only ever constructed into its spare capacity or destroyed from
/// its end, so the buffer is never reallocated while the segment lives.
pub(crate) struct Segment<T> {
    items: Vec<T>,
}

impl<T> Segment<T> {
    pub fn with_block_size(block_size: usize) -> Segment<T> {
        Segment {
            items: Vec::with_capacity(block_size),
        }
    }

    pub fn try_with_block_size(block_size: usize) -> Result<Segment<T>> {
        let mut items = Vec::new();
        items
            .try_reserve_exact(block_size)
            .map_err(|e| Error::alloc("segment", e))?;
        Ok(Segment { items })
    }

    /// Constructs `value` in the next free slot.
    #[inline]
    pub fn push(&mut self, value: T) {
        debug_assert!(self.items.len() < self.items.capacity());
        self.items.push(value);
    }

    /// Destroys the last live element and returns it.
    #[inline]
    pub fn pop(&mut self) -> Option<T> {
        self.items.pop()
    }

    #[inline]
    pub fn truncate(&mut self, len: usize) {
        self.items.truncate(len);
    }

    #[inline]
    pub fn is_full(&self, block_size: usize) -> bool {
        self.items.len() >= block_size
    }

    pub fn into_vec(self) -> Vec<T> {
        self.items
    }
}

impl<T> Deref for Segment<T> {
    type Target = [T];

    #[inline]
    fn deref(&self) -> &[T] {
        &self.items
    }
}

impl<T> DerefMut for Segment<T> {
    #[inline]
    fn deref_mut(&mut self) -> &mut [T] {
        &mut self.items
    }
}
