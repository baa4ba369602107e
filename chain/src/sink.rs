//! Moving canonical encodings through blocking byte streams.
//!
//! Encoding into memory cannot fail. Only the stream can, and when it does the error is
//! returned unchanged inside [Error::Sink] together with the number of bytes transferred
//! before the failure.

use crate::Error;
use ledger_codec::{Decode, Encode};
use std::io;
use tracing::warn;

/// Writes the encoding of `value` to `writer`, returning the number of bytes written.
pub fn write_to(value: &impl Encode, writer: &mut impl io::Write) -> Result<u64, Error> {
    let encoded = value.encode();
    let mut remaining = &encoded[..];
    let mut offset = 0u64;
    while !remaining.is_empty() {
        match writer.write(remaining) {
            Ok(0) => return Err(failed(offset, io::ErrorKind::WriteZero.into())),
            Ok(n) => {
                offset += n as u64;
                remaining = &remaining[n..];
            }
            Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
            Err(err) => return Err(failed(offset, err)),
        }
    }
    writer.flush().map_err(|err| failed(offset, err))?;
    Ok(offset)
}

/// Reads `reader` to its end and decodes exactly one `T` from the bytes read.
pub fn read_from<T: Decode>(reader: &mut impl io::Read, cfg: &T::Cfg) -> Result<T, Error> {
    let mut buf = Vec::new();
    if let Err(err) = reader.read_to_end(&mut buf) {
        // `read_to_end` keeps every byte read before the failure in `buf`.
        return Err(failed(buf.len() as u64, err));
    }
    Ok(T::decode_cfg(&buf[..], cfg)?)
}

fn failed(offset: u64, source: io::Error) -> Error {
    warn!(offset, ?source, "sink failed");
    Error::Sink { offset, source }
}
