//! Canonical binary encoding for ledger structures.
//!
//! # Overview
//!
//! A binary serialization library designed so that:
//! - Every value has exactly one valid encoding (what is hashed is what was decoded)
//! - Untrusted input is decoded with explicit bounds on every length prefix
//!
//! # Supported Types
//!
//! Natively supports:
//! - Fixed-width integers `u8`, `u16`, `u32`, `u64` (big-endian)
//! - Minimal varints for `u16`, `u32`, `u64` via [varint::UInt]
//! - Fixed-size byte arrays `[u8; N]`
//! - Length-prefixed byte strings: [bytes::Bytes] and `Vec<u8>`
//!
//! User-defined types compose these by implementing [Write], [EncodeSize] and [Read].
//!
//! # Example
//!
//! ```
//! use bytes::{Buf, BufMut, Bytes};
//! use ledger_codec::{
//!     varint::UInt, Decode, Encode, EncodeSize, Error, RangeCfg, Read, ReadExt, Write,
//! };
//!
//! #[derive(Debug, PartialEq)]
//! struct Entry {
//!     height: u64,
//!     index: u32,
//!     data: Bytes,
//! }
//!
//! impl Write for Entry {
//!     fn write(&self, buf: &mut impl BufMut) {
//!         self.height.write(buf);
//!         UInt(self.index).write(buf);
//!         self.data.write(buf);
//!     }
//! }
//!
//! impl EncodeSize for Entry {
//!     fn encode_size(&self) -> usize {
//!         self.height.encode_size() + UInt(self.index).encode_size() + self.data.encode_size()
//!     }
//! }
//!
//! impl Read for Entry {
//!     type Cfg = RangeCfg;
//!
//!     fn read_cfg(buf: &mut impl Buf, cfg: &RangeCfg) -> Result<Self, Error> {
//!         let height = u64::read(buf)?;
//!         let index = UInt::<u32>::read(buf)?.into();
//!         let data = Bytes::read_cfg(buf, cfg)?;
//!         Ok(Self { height, index, data })
//!     }
//! }
//!
//! let entry = Entry { height: 7, index: 300, data: Bytes::from_static(b"abc") };
//! let encoded = entry.encode();
//! assert_eq!(encoded.len(), 8 + 2 + 4);
//! assert_eq!(Entry::decode_cfg(encoded, &RangeCfg::new(..=16)).unwrap(), entry);
//! ```

pub mod codec;
pub mod config;
pub mod error;
pub mod types;
pub mod util;
pub mod varint;

// Re-export main types and traits
pub use codec::{
    Codec, Decode, DecodeExt, Encode, EncodeSize, FixedSize, Read, ReadExt, Write,
};
pub use config::RangeCfg;
pub use error::Error;
