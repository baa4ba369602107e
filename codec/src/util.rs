//! Codec utility functions

use crate::Error;
use bytes::Buf;

/// Checks that the buffer has at least `len` bytes remaining.
#[inline]
pub fn at_least<B: Buf>(buf: &mut B, len: usize) -> Result<(), Error> {
    if buf.remaining() < len {
        return Err(Error::EndOfBuffer);
    }
    Ok(())
}
