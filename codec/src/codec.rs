//! Core codec traits and implementations

use crate::error::Error;
use bytes::{Buf, BufMut, BytesMut};

/// Trait for types that can be written (encoded) to a buffer.
pub trait Write {
    /// Encodes this value by writing to a buffer.
    ///
    /// Writing to a [`BufMut`] never fails; implementations may panic if the
    /// buffer cannot grow to hold the value.
    fn write(&self, buf: &mut impl BufMut);
}

/// Trait for types that know the exact size of their encoding.
pub trait EncodeSize {
    /// Returns the encoded size of this value in bytes.
    ///
    /// This method MUST return the exact number of bytes that [`Write::write`] writes.
    fn encode_size(&self) -> usize;
}

/// Trait for types with a known, fixed encoded size.
pub trait FixedSize {
    /// The size of the encoded value in bytes.
    const SIZE: usize;
}

// Automatically implement `EncodeSize` for types with a fixed size.
impl<T: FixedSize> EncodeSize for T {
    #[inline]
    fn encode_size(&self) -> usize {
        Self::SIZE
    }
}

/// Trait for types that can be read (decoded) from a buffer.
///
/// The associated `Cfg` allows bounding what a read may allocate, which matters when
/// decoding untrusted input. Use `()` for types that need no configuration.
pub trait Read: Sized {
    /// Configuration consulted while reading.
    type Cfg: Clone;

    /// Reads a value from the buffer, consuming exactly the bytes of its encoding.
    ///
    /// Returns the first error encountered; the buffer position is unspecified afterwards.
    fn read_cfg(buf: &mut impl Buf, cfg: &Self::Cfg) -> Result<Self, Error>;
}

/// Trait for types that can be encoded to a fresh buffer.
pub trait Encode: Write + EncodeSize {
    /// Encodes a value to a `BytesMut` buffer.
    ///
    /// Panics if the `write` implementation does not write [`EncodeSize::encode_size`] bytes.
    ///
    /// (Provided method).
    fn encode(&self) -> BytesMut {
        let len = self.encode_size();
        let mut buffer = BytesMut::with_capacity(len);
        self.write(&mut buffer);
        assert_eq!(buffer.len(), len, "write() did not write expected bytes");
        buffer
    }
}

// Automatically implement `Encode` for types that implement `Write` and `EncodeSize`.
impl<T: Write + EncodeSize> Encode for T {}

/// Trait for types that can be decoded from a buffer, ensuring the entire buffer is consumed.
pub trait Decode: Read {
    /// Decodes a value from a buffer, failing if any bytes remain afterwards.
    ///
    /// (Provided method).
    fn decode_cfg(mut buf: impl Buf, cfg: &Self::Cfg) -> Result<Self, Error> {
        let result = Self::read_cfg(&mut buf, cfg)?;

        // Check that the buffer is fully consumed.
        let remaining = buf.remaining();
        if remaining > 0 {
            return Err(Error::ExtraData(remaining));
        }

        Ok(result)
    }
}

// Automatically implement `Decode` for types that implement `Read`.
impl<T: Read> Decode for T {}

/// Trait for types that can be encoded and decoded.
pub trait Codec: Encode + Decode {}

// Automatically implement `Codec` for types that implement `Encode` and `Decode`.
impl<T: Encode + Decode> Codec for T {}

/// Extension trait providing an ergonomic read method for types requiring no configuration.
pub trait ReadExt: Read<Cfg = ()> {
    /// Reads a value using the default `()` config.
    fn read(buf: &mut impl Buf) -> Result<Self, Error> {
        Self::read_cfg(buf, &())
    }
}

// Automatically implement `ReadExt` for types that implement `Read` with no config.
impl<T: Read<Cfg = ()>> ReadExt for T {}

/// Extension trait providing an ergonomic decode method for types requiring no configuration.
pub trait DecodeExt: Decode<Cfg = ()> {
    /// Decodes a value using the default `()` config.
    fn decode(buf: impl Buf) -> Result<Self, Error> {
        Self::decode_cfg(buf, &())
    }
}

// Automatically implement `DecodeExt` for types that implement `Decode` with no config.
impl<T: Decode<Cfg = ()>> DecodeExt for T {}
