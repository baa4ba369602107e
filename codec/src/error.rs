//! Error types for codec operations

use thiserror::Error;

/// Error type for codec operations.
///
/// Every variant is terminal for the read in progress: no partially decoded
/// value is ever returned alongside an error.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Fewer bytes remain than the value being read requires.
    #[error("unexpected end of buffer")]
    EndOfBuffer,
    /// Bytes remain after a value that should have consumed the whole buffer.
    #[error("extra data found: {0} bytes")]
    ExtraData(usize),
    /// A varint is non-minimal or does not fit in the target type.
    #[error("invalid varint")]
    InvalidVarint,
    /// A length prefix fell outside the configured range.
    #[error("invalid length: {0}")]
    InvalidLength(usize),
    /// A value was well-formed at the byte level but rejected by its type.
    #[error("invalid data in {0}: {1}")]
    Invalid(&'static str, &'static str), // context, message
}

impl Error {
    /// Returns true if the error was caused by running out of input.
    ///
    /// Truncation is the only error that more bytes could have fixed; every
    /// other variant describes a malformed value.
    pub fn is_truncated(&self) -> bool {
        matches!(self, Error::EndOfBuffer)
    }
}
