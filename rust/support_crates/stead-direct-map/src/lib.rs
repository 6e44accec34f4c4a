//! Direct-address maps and sets over a bounded integer key domain.
//!
//! Every container here keeps two coupled arrays: a dense array of the live
//! entries, gap-free and in no particular order, and a sparse table indexed directly
//! by key that records each key's dense position. Lookups are a bounds check plus a
//! key cross-check, insertion appends, and removal moves the last entry into the
//! vacated position, so all three are O(1).
//!
//! - [`DirectMap`] and [`DirectSet`] keep both arrays contiguous.
//! - [`SegmentedDirectMap`] keeps both arrays in segmented storage, so a very large
//!   key domain never needs one giant allocation and entries never move on growth.

pub mod capabilities;
pub mod iter;
pub mod key;
pub mod map;
pub mod segmented_map;
pub mod set;
mod storage;
mod table;

#[cfg(test)]
mod tests;

pub use capabilities::Capabilities;
pub use key::{DirectKey, KeyFromValue};
pub use map::DirectMap;
pub use segmented_map::SegmentedDirectMap;
pub use set::DirectSet;
