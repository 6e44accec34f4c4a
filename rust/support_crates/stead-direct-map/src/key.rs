//! Keys of direct-address containers.

use std::fmt;

/// An integer-like key that addresses the sparse index table directly.
///
/// The key domain is expected to be dense and bounded: the sparse table of a
/// container grows to `to_index() + 1` slots for the largest key ever inserted.
///
/// Implemented for the primitive integers. Negative keys are never within capacity,
/// so they are never found. Newtype keys implement it by forwarding to their inner
/// integer:
///
/// ```
/// use stead_direct_map::{DirectKey, DirectSet};
///
/// #[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
/// struct NodeId(u32);
///
/// impl DirectKey for NodeId {
///     fn to_index(self) -> usize {
///         self.0 as usize
///     }
/// }
///
/// let mut nodes = DirectSet::new();
/// nodes.insert(NodeId(3));
/// assert!(nodes.contains(NodeId(3)));
/// ```
pub trait DirectKey: Copy + Ord + fmt::Debug {
    /// Returns the slot of this key in the sparse index table.
    fn to_index(self) -> usize;
}

macro_rules! impl_direct_key {
    ($($t:ty),* $(,)?) => {$(
        impl DirectKey for $t {
            #[inline]
            fn to_index(self) -> usize {
                self as usize
            }
        }
    )*};
}

impl_direct_key!(u8, u16, u32, usize);

// Negative keys and keys wider than `usize` map to `usize::MAX`, which no sparse
// table can grow to hold, so lookups of them always miss.
macro_rules! impl_checked_direct_key {
    ($($t:ty),* $(,)?) => {$(
        impl DirectKey for $t {
            #[inline]
            fn to_index(self) -> usize {
                usize::try_from(self).unwrap_or(usize::MAX)
            }
        }
    )*};
}

impl_checked_direct_key!(u64, i8, i16, i32, i64, isize);

/// A trait for dense entries that carry their own key.
pub trait KeyFromValue<K> {
    /// Returns the key associated with the entry.
    fn key(&self) -> K;
}

impl<K: DirectKey> KeyFromValue<K> for K {
    #[inline]
    fn key(&self) -> K {
        *self
    }
}

impl<K: DirectKey, V> KeyFromValue<K> for (K, V) {
    #[inline]
    fn key(&self) -> K {
        self.0
    }
}
