//! Codec implementations for length-prefixed byte strings.
//!
//! A byte string is written as its length (a canonical `u64` varint) followed by the raw
//! bytes. Readers take a [RangeCfg] bounding the length they will accept.

use crate::{util::at_least, varint, EncodeSize, Error, RangeCfg, Read, Write};
use bytes::{Buf, BufMut, Bytes};

/// Writes `value` as a length-prefixed byte string.
#[inline]
pub fn write_slice(value: &[u8], buf: &mut impl BufMut) {
    varint::write_len(value.len(), buf);
    buf.put_slice(value);
}

/// Returns the encoded size of `value` as a length-prefixed byte string.
#[inline]
pub fn slice_size(value: &[u8]) -> usize {
    varint::len_size(value.len()) + value.len()
}

/// Reads a length prefix and checks it against `range` and the bytes remaining.
fn read_len(buf: &mut impl Buf, range: &RangeCfg) -> Result<usize, Error> {
    let len = varint::read::<u64>(buf)?;
    let len = usize::try_from(len).map_err(|_| Error::InvalidVarint)?;
    if !range.contains(len) {
        return Err(Error::InvalidLength(len));
    }
    at_least(buf, len)?;
    Ok(len)
}

impl Write for Bytes {
    #[inline]
    fn write(&self, buf: &mut impl BufMut) {
        write_slice(self, buf);
    }
}

impl EncodeSize for Bytes {
    #[inline]
    fn encode_size(&self) -> usize {
        slice_size(self)
    }
}

impl Read for Bytes {
    type Cfg = RangeCfg;

    #[inline]
    fn read_cfg(buf: &mut impl Buf, range: &RangeCfg) -> Result<Self, Error> {
        let len = read_len(buf, range)?;
        Ok(buf.copy_to_bytes(len))
    }
}

impl Write for Vec<u8> {
    #[inline]
    fn write(&self, buf: &mut impl BufMut) {
        write_slice(self, buf);
    }
}

impl EncodeSize for Vec<u8> {
    #[inline]
    fn encode_size(&self) -> usize {
        slice_size(self)
    }
}

impl Read for Vec<u8> {
    type Cfg = RangeCfg;

    #[inline]
    fn read_cfg(buf: &mut impl Buf, range: &RangeCfg) -> Result<Self, Error> {
        let len = read_len(buf, range)?;
        let mut dst = vec![0; len];
        buf.copy_to_slice(&mut dst);
        Ok(dst)
    }
}
