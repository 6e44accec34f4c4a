//! # Stead: Stable-Address Containers
//!
//! Stead is a small family of containers for workloads that index large, dense
//! integer domains and hold on to element addresses while the container grows.
//!
//! ## Module Organization
//!
//! * [`segmented_vec`] - A vector built from fixed-capacity segments. Appending never
//!   moves an existing element, and indexing is a shift and a mask.
//! * [`direct_map`] - Maps and sets keyed by bounded integers, with O(1) insert, lookup
//!   and removal through a sparse table indexed directly by key.
//! * [`common`] - The shared error type and verification helpers.
//!
//! ### Support Modules
//!
//! The [`support`] module contains lower-level utilities:
//!
//! * [`support::bits`] - Power-of-two rounding and integer logarithms used for
//!   segment sizing.
//!
//! ## Choosing a Container
//!
//! * [`DirectMap`] and [`DirectSet`] keep entries in one contiguous vector. They suit
//!   small and medium key domains and give the fastest iteration.
//! * [`SegmentedDirectMap`] splits both arrays into blocks. A very large key domain
//!   never needs one giant allocation, growth appends blocks instead of rebuilding,
//!   and references to entries stay valid while the map grows.
//!
//! ## Example
//!
//! ```
//! use stead::SegmentedDirectMap;
//!
//! let mut m = SegmentedDirectMap::with_block_size(64);
//! m.insert(5u32, "a");
//! m.insert(1024, "d");
//! m.remove(5);
//! assert_eq!(m.len(), 1);
//! assert_eq!(m.get(1024), Some(&"d"));
//! ```

pub use stead_common as common;
pub use stead_direct_map as direct_map;
pub use stead_segmented_vec as segmented_vec;

pub use stead_common::{Error, ErrorKind, Result};
pub use stead_direct_map::{
    Capabilities, DirectKey, DirectMap, DirectSet, KeyFromValue, SegmentedDirectMap,
};
pub use stead_segmented_vec::{Cursor, SegmentMetrics, SegmentedVec};

pub mod support {
    pub use stead_bits as bits;
}
