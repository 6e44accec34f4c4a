//! Bit helpers for segment sizing.

pub mod pow2;

pub use pow2::{PowerOfTwo, ceil_log2, floor_log2, nextpow2};
