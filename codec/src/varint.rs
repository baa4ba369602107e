//! Canonical variable-length integer encoding and decoding
//!
//! Values are written little-endian in groups of 7 bits (LEB128). Each byte uses:
//! - 7 bits for the value
//! - 1 "continuation" bit to indicate if more bytes follow
//!
//! Unlike plain LEB128, every value has exactly one accepted encoding. A reader rejects
//! any encoding whose final byte is zero (a redundant high-order group) and any encoding
//! that sets bits beyond the width of the target type. Re-encoding a decoded value
//! therefore always reproduces the bytes that were read.
//!
//! `usize` is omitted so that behavior does not depend on the target architecture.

use crate::{EncodeSize, Error, Read, Write};
use bytes::{Buf, BufMut};
use std::ops::{BitOrAssign, Shl, ShrAssign};

const BITS_PER_BYTE: usize = 8;
const DATA_BITS_PER_BYTE: usize = 7;
const DATA_BITS_MASK: u8 = 0x7F;
const CONTINUATION_BIT_MASK: u8 = 0x80;

/// An unsigned primitive that can be varint encoded.
pub trait UPrim:
    Copy
    + From<u8>
    + Sized
    + ShrAssign<usize>
    + Shl<usize, Output = Self>
    + BitOrAssign<Self>
    + PartialOrd
{
    /// Width of the type in bits.
    const BITS: usize;

    /// Returns the number of leading zeros in the integer.
    fn leading_zeros(self) -> u32;

    /// Returns the least significant byte of the integer.
    fn as_u8(self) -> u8;
}

macro_rules! impl_uprim {
    ($type:ty) => {
        impl UPrim for $type {
            const BITS: usize = <$type>::BITS as usize;

            #[inline]
            fn leading_zeros(self) -> u32 {
                self.leading_zeros()
            }

            #[inline]
            fn as_u8(self) -> u8 {
                self as u8
            }
        }
    };
}
impl_uprim!(u16);
impl_uprim!(u32);
impl_uprim!(u64);

/// Encodes an unsigned integer as a varint.
pub fn write<T: UPrim>(value: T, buf: &mut impl BufMut) {
    let continuation_threshold = T::from(CONTINUATION_BIT_MASK);
    if value < continuation_threshold {
        // Fast path for small values (common case for lengths).
        buf.put_u8(value.as_u8());
        return;
    }

    let mut val = value;
    while val >= continuation_threshold {
        buf.put_u8(val.as_u8() | CONTINUATION_BIT_MASK);
        val >>= DATA_BITS_PER_BYTE;
    }
    buf.put_u8(val.as_u8());
}

/// Decodes an unsigned integer from its canonical varint encoding.
///
/// Returns [Error::EndOfBuffer] if the buffer ends before the final byte and
/// [Error::InvalidVarint] if the encoding is non-minimal or overflows `T`.
pub fn read<T: UPrim>(buf: &mut impl Buf) -> Result<T, Error> {
    let mut result = T::from(0);
    let mut shift = 0;

    loop {
        if !buf.has_remaining() {
            return Err(Error::EndOfBuffer);
        }
        let byte = buf.get_u8();

        // A zero byte after the first one only adds an empty high-order group.
        if shift > 0 && byte == 0 {
            return Err(Error::InvalidVarint);
        }

        // If this must be the last byte, reject bits beyond the width of T. The continuation
        // bit is the most significant bit, so this also rejects a continuation here and
        // guarantees `shift` never reaches `T::BITS`.
        let remaining_bits = T::BITS - shift;
        if remaining_bits <= DATA_BITS_PER_BYTE {
            let relevant_bits = BITS_PER_BYTE - byte.leading_zeros() as usize;
            if relevant_bits > remaining_bits {
                return Err(Error::InvalidVarint);
            }
        }

        result |= T::from(byte & DATA_BITS_MASK) << shift;

        if byte & CONTINUATION_BIT_MASK == 0 {
            return Ok(result);
        }
        shift += DATA_BITS_PER_BYTE;
    }
}

/// Calculates the number of bytes needed to encode an unsigned integer as a varint.
pub fn size<T: UPrim>(value: T) -> usize {
    let data_bits = T::BITS - value.leading_zeros() as usize;
    usize::max(1, data_bits.div_ceil(DATA_BITS_PER_BYTE))
}

/// Writes a length (of a byte string or collection) as a `u64` varint.
pub(crate) fn write_len(len: usize, buf: &mut impl BufMut) {
    write(len as u64, buf);
}

/// Size of a length written with [write_len].
pub(crate) fn len_size(len: usize) -> usize {
    size(len as u64)
}

/// An ergonomic wrapper to encode a primitive unsigned integer as a varint rather than
/// as the default fixed-width integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct UInt<T: UPrim>(pub T);

impl<T: UPrim> Write for UInt<T> {
    fn write(&self, buf: &mut impl BufMut) {
        write(self.0, buf);
    }
}

impl<T: UPrim> Read for UInt<T> {
    type Cfg = ();

    fn read_cfg(buf: &mut impl Buf, _: &()) -> Result<Self, Error> {
        read(buf).map(UInt)
    }
}

impl<T: UPrim> EncodeSize for UInt<T> {
    fn encode_size(&self) -> usize {
        size(self.0)
    }
}

impl From<UInt<u64>> for u64 {
    fn from(value: UInt<u64>) -> Self {
        value.0
    }
}

impl From<UInt<u32>> for u32 {
    fn from(value: UInt<u32>) -> Self {
        value.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{DecodeExt, Encode};
    use bytes::Bytes;
    use test_case::test_case;

    #[test_case(0, &[0x00]; "zero")]
    #[test_case(1, &[0x01]; "one")]
    #[test_case(127, &[0x7F]; "largest single byte")]
    #[test_case(128, &[0x80, 0x01]; "smallest two bytes")]
    #[test_case(300, &[0xAC, 0x02]; "three hundred")]
    #[test_case(16_384, &[0x80, 0x80, 0x01]; "smallest three bytes")]
    #[test_case(u64::MAX, &[0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0x01]; "max")]
    fn test_vectors(value: u64, expected: &[u8]) {
        let mut buf = Vec::new();
        write(value, &mut buf);
        assert_eq!(buf, expected);
        assert_eq!(size(value), expected.len());

        let mut reader = expected;
        assert_eq!(read::<u64>(&mut reader).unwrap(), value);
        assert!(reader.is_empty());
    }

    #[test_case(&[0x80, 0x00]; "zero with padding")]
    #[test_case(&[0x81, 0x00]; "one with padding")]
    #[test_case(&[0xFF, 0x80, 0x00]; "two groups of padding")]
    fn test_non_minimal_rejected(encoded: &[u8]) {
        let mut reader = encoded;
        assert_eq!(read::<u64>(&mut reader), Err(Error::InvalidVarint));
    }

    #[test]
    fn test_overflow_rejected() {
        // The tenth byte may only carry the 64th bit.
        let mut buf = Bytes::from_static(&[
            0x80, 0x80, 0x80, 0x80, 0x80, 0x80, 0x80, 0x80, 0x80, 0x02,
        ]);
        assert_eq!(read::<u64>(&mut buf), Err(Error::InvalidVarint));

        // u32::MAX + 1 does not fit in a u32.
        let mut encoded = Vec::new();
        write(u32::MAX as u64 + 1, &mut encoded);
        assert_eq!(read::<u32>(&mut &encoded[..]), Err(Error::InvalidVarint));

        // A continuation on the last possible byte.
        let mut buf = Bytes::from_static(&[0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0x01]);
        assert_eq!(read::<u32>(&mut buf), Err(Error::InvalidVarint));
    }

    #[test]
    fn test_insufficient_buffer() {
        let mut buf = Bytes::from_static(&[0x80]);
        assert_eq!(read::<u64>(&mut buf), Err(Error::EndOfBuffer));

        let mut buf = Bytes::new();
        assert_eq!(read::<u64>(&mut buf), Err(Error::EndOfBuffer));
    }

    #[test]
    fn test_sizes_across_widths() {
        for value in [0u64, 0x7F, 0x80, 0x3FFF, 0x4000, 0xFFFF_FFFF, u64::MAX] {
            let mut buf = Vec::new();
            write(value, &mut buf);
            assert_eq!(buf.len(), size(value));
        }
        for value in [0u32, 0x7F, 0x80, u32::MAX] {
            let mut buf = Vec::new();
            write(value, &mut buf);
            assert_eq!(buf.len(), size(value));
            assert_eq!(read::<u32>(&mut &buf[..]).unwrap(), value);
        }
    }

    #[test]
    fn test_uint_wrapper() {
        let encoded = UInt(300u64).encode();
        assert_eq!(encoded.as_ref(), &[0xAC, 0x02]);
        let decoded: u64 = UInt::<u64>::decode(encoded).unwrap().into();
        assert_eq!(decoded, 300);
    }
}
