//! Segment geometry and cursor arithmetic.
//!
//! A [`SegmentMetrics`] value describes the uniform block size of a segmented
//! container together with the shift and mask derived from it. A [`Cursor`] is a
//! `(segment, offset)` position; all cursor arithmetic is done here, through the
//! shift decomposition, so it costs O(1) regardless of how far a cursor moves.

use stead_bits::PowerOfTwo;
use stead_common::{Error, Result, verify_arg};

/// Uniform segment geometry: block size (a power of two), its shift and its mask.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SegmentMetrics {
    block_size: usize,
    shift: u32,
    mask: usize,
}

impl SegmentMetrics {
    /// Default block size: 1024 elements per segment.
    pub const DEFAULT_BLOCK_SIZE: usize = 1024;

    /// Creates metrics for the requested block size, rounded up to a power of two.
    ///
    /// # Panics
    ///
    /// Panics if `requested` is zero or cannot be rounded to a power of two.
    pub fn new(requested: usize) -> SegmentMetrics {
        match Self::try_new(requested) {
            Ok(metrics) => metrics,
            Err(e) => panic!("{e}"),
        }
    }

    /// Creates metrics for the requested block size, rounded up to a power of two.
    pub fn try_new(requested: usize) -> Result<SegmentMetrics> {
        verify_arg!(block_size, requested > 0);
        let block_size = requested.checked_nextpow2().ok_or_else(|| {
            Error::invalid_arg(
                "block_size",
                format!("{requested} cannot be rounded up to a power of two"),
            )
        })?;
        Ok(SegmentMetrics {
            block_size,
            shift: requested.ceil_log2(),
            mask: block_size - 1,
        })
    }

    /// Number of elements per segment.
    #[inline]
    pub fn block_size(&self) -> usize {
        self.block_size
    }

    /// `log2(block_size)`.
    #[inline]
    pub fn shift(&self) -> u32 {
        self.shift
    }

    /// `block_size - 1`.
    #[inline]
    pub fn mask(&self) -> usize {
        self.mask
    }

    /// Maps a linear index to a `(segment, offset)` pair.
    #[inline]
    pub fn map_index(&self, index: usize) -> (usize, usize) {
        (index >> self.shift, index & self.mask)
    }

    /// Number of segments needed to hold `len` elements.
    #[inline]
    pub fn segments_for(&self, len: usize) -> usize {
        (len >> self.shift) + usize::from(len & self.mask != 0)
    }

    /// Returns the cursor addressing linear position `index`.
    ///
    /// A position exactly at the end of a segment is the start of the next one.
    #[inline]
    pub fn cursor(&self, index: usize) -> Cursor {
        let (segment, offset) = self.map_index(index);
        Cursor { segment, offset }
    }

    /// Returns the linear position addressed by `cursor`.
    #[inline]
    pub fn index(&self, cursor: Cursor) -> usize {
        (cursor.segment << self.shift) | cursor.offset
    }

    /// Moves `cursor` one position forward.
    #[inline]
    pub fn next(&self, cursor: Cursor) -> Cursor {
        if cursor.offset == self.mask {
            Cursor {
                segment: cursor.segment + 1,
                offset: 0,
            }
        } else {
            Cursor {
                segment: cursor.segment,
                offset: cursor.offset + 1,
            }
        }
    }

    /// Moves `cursor` one position back.
    ///
    /// # Panics
    ///
    /// Panics if `cursor` is at the very first position.
    #[inline]
    pub fn prev(&self, cursor: Cursor) -> Cursor {
        if cursor.offset == 0 {
            assert!(cursor.segment > 0, "cursor moved before the first segment");
            Cursor {
                segment: cursor.segment - 1,
                offset: self.mask,
            }
        } else {
            Cursor {
                segment: cursor.segment,
                offset: cursor.offset - 1,
            }
        }
    }

    /// Moves `cursor` by `delta` positions (negative moves back).
    ///
    /// # Panics
    ///
    /// Panics if the result would lie before the first position.
    #[inline]
    pub fn advance(&self, cursor: Cursor, delta: isize) -> Cursor {
        let offset = cursor.offset as isize + delta;
        // Arithmetic shift rounds toward negative infinity.
        let segment = cursor.segment as isize + (offset >> self.shift);
        assert!(segment >= 0, "cursor moved before the first segment");
        Cursor {
            segment: segment as usize,
            offset: offset as usize & self.mask,
        }
    }

    /// Returns the signed number of positions from `from` to `to`.
    #[inline]
    pub fn distance(&self, from: Cursor, to: Cursor) -> isize {
        let segments = to.segment as isize - from.segment as isize;
        (segments << self.shift) + (to.offset as isize - from.offset as isize)
    }
}

impl Default for SegmentMetrics {
    fn default() -> Self {
        SegmentMetrics::new(Self::DEFAULT_BLOCK_SIZE)
    }
}

/// A `(segment, offset)` position inside a segmented container.
///
/// Cursors are plain positions: equality and ordering compare the segment first and
/// the offset second, never the element stored there. Cursors are always normalized,
/// the offset is strictly below the block size of the metrics that produced them.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Cursor {
    segment: usize,
    offset: usize,
}

impl Cursor {
    /// Position of the first element of any segmented container.
    pub const START: Cursor = Cursor {
        segment: 0,
        offset: 0,
    };

    #[inline]
    pub fn segment(&self) -> usize {
        self.segment
    }

    #[inline]
    pub fn offset(&self) -> usize {
        self.offset
    }
}
