//! Power-of-two rounding helpers used to size segments.
//!
//! Segmented containers round the requested block capacity up to a power of two
//! so that element addressing reduces to a shift and a mask:
//!
//! ```rust
//! use stead_bits::pow2::{ceil_log2, nextpow2};
//!
//! let block_size = nextpow2(1000);
//! let shift = ceil_log2(1000);
//! assert_eq!(block_size, 1024);
//! assert_eq!(1usize << shift, block_size);
//! assert_eq!(2049 >> shift, 2);
//! assert_eq!(2049 & (block_size - 1), 1);
//! ```
//!
//! # Edge cases
//!
//! - `nextpow2(0)` is `1` and `ceil_log2(0)` is `0`, so the pair still satisfies
//!   `nextpow2(n) == 1 << ceil_log2(n)`.
//! - `floor_log2(0)` is `0`.
//! - Rounding a value above the largest representable power of two overflows:
//!   [`PowerOfTwo::checked_nextpow2`] returns `None`, [`PowerOfTwo::nextpow2`] panics.
//!   In that case `ceil_log2` returns the bit width of the word.

/// Power-of-two rounding over unsigned machine words.
pub trait PowerOfTwo: Copy + Sized {
    /// Bit width of the word.
    const BITS: u32;

    /// Returns the base-2 logarithm of `self` rounded down (`0` for zero).
    fn floor_log2(self) -> u32;

    /// Returns the smallest `k` such that `2^k >= self` (`0` for zero and one).
    fn ceil_log2(self) -> u32;

    /// Returns the smallest power of two that is `>= self`, or `None` on overflow.
    fn checked_nextpow2(self) -> Option<Self>;

    /// Returns the smallest power of two that is `>= self`.
    ///
    /// # Panics
    ///
    /// Panics if the result is not representable in the word type.
    fn nextpow2(self) -> Self;
}

macro_rules! impl_power_of_two {
    ($($t:ty),* $(,)?) => {$(
        impl PowerOfTwo for $t {
            const BITS: u32 = <$t>::BITS;

            #[inline]
            fn floor_log2(self) -> u32 {
                if self == 0 { 0 } else { self.ilog2() }
            }

            #[inline]
            fn ceil_log2(self) -> u32 {
                if self <= 1 { 0 } else { (self - 1).ilog2() + 1 }
            }

            #[inline]
            fn checked_nextpow2(self) -> Option<Self> {
                self.checked_next_power_of_two()
            }

            #[inline]
            fn nextpow2(self) -> Self {
                match self.checked_nextpow2() {
                    Some(p) => p,
                    None => panic!(
                        "nextpow2({}) overflows {}",
                        self,
                        stringify!($t)
                    ),
                }
            }
        }
    )*};
}

impl_power_of_two!(u8, u16, u32, u64, u128, usize);

/// Rounds `n` up to the next power of two. See [`PowerOfTwo::nextpow2`].
#[inline]
pub fn nextpow2(n: usize) -> usize {
    n.nextpow2()
}

/// Returns `k` such that `1 << k == nextpow2(n)`. See [`PowerOfTwo::ceil_log2`].
#[inline]
pub fn ceil_log2(n: usize) -> u32 {
    n.ceil_log2()
}

/// Returns the base-2 logarithm of `n` rounded down. See [`PowerOfTwo::floor_log2`].
#[inline]
pub fn floor_log2(n: usize) -> u32 {
    n.floor_log2()
}
