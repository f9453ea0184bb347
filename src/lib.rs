//! Typed encoding to, and decoding from, dynamic key-value trees.

/// Dynamic values, the encode and decode engines, and their policies.
pub mod coder;
