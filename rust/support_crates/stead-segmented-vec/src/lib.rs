//! Pointer-stable segmented vector.
//!
//! [`SegmentedVec`] stores its elements in an ordered sequence of fixed-capacity
//! segments. Appending never moves an element that is already constructed, and
//! element `i` is reached in O(1) through the shift and mask of its
//! [`SegmentMetrics`].

pub mod iter;
pub mod metrics;
mod segment;
pub mod segmented_vec;
mod sort;


pub use iter::{IntoIter, Iter, IterMut};
pub use metrics::{Cursor, SegmentMetrics};
pub use segmented_vec::SegmentedVec;
