//! Codec implementations for common types

pub mod bytes;
pub mod primitives;
