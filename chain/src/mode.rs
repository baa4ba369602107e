//! Full and for-signing encodings.
//!
//! Headers and blocks have two canonical encodings. [Mode::Full] carries every field and is
//! what gets stored, transmitted, and hashed into a block's identity. [Mode::ForSigning]
//! blanks the signature script (and drops a block's transactions) so the signature never has
//! to cover itself.

use bytes::BufMut;
use ledger_codec::{EncodeSize, Write};

/// Selects which canonical encoding to produce.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    /// Every field, exactly as held in memory.
    Full,
    /// The signature script written as an empty string; block transactions omitted.
    ForSigning,
}

/// Types with a canonical encoding in each [Mode].
pub trait EncodeMode {
    /// Writes the encoding selected by `mode`.
    fn write_mode(&self, buf: &mut impl BufMut, mode: Mode);

    /// Returns the exact size of the encoding selected by `mode`.
    fn encode_size_mode(&self, mode: Mode) -> usize;

    /// Returns a view that encodes `self` in [Mode::ForSigning].
    fn for_signing(&self) -> ForSigning<'_, Self>
    where
        Self: Sized,
    {
        ForSigning(self)
    }
}

/// A borrowed value that encodes in [Mode::ForSigning].
///
/// ```
/// use bytes::Bytes;
/// use ledger_chain::{EncodeMode, Header};
/// use ledger_codec::Encode;
///
/// let mut header = Header::genesis(1000, Bytes::from_static(&[0xAA]));
/// let unsigned = header.for_signing().encode();
/// header.signature_script = Bytes::from_static(b"proof");
/// assert_eq!(header.for_signing().encode(), unsigned);
/// ```
#[derive(Clone, Copy, Debug)]
pub struct ForSigning<'a, T>(&'a T);

impl<T: EncodeMode> Write for ForSigning<'_, T> {
    fn write(&self, buf: &mut impl BufMut) {
        self.0.write_mode(buf, Mode::ForSigning);
    }
}

impl<T: EncodeMode> EncodeSize for ForSigning<'_, T> {
    fn encode_size(&self) -> usize {
        self.0.encode_size_mode(Mode::ForSigning)
    }
}
