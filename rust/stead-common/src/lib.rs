//! Core definitions shared by all stead-* crates: the error type and the
//! argument/consistency verification helpers.

pub mod error;
pub mod result;

pub use error::{Error, ErrorKind};
pub use result::Result;
