//! Primitive codec for package headers
//!
//! Fixed-width little-endian integers, 32-bit booleans, length-prefixed
//! strings and count-prefixed sequences.

mod reader;

pub use reader::PackageReader;
