//! Block header, its canonical encodings, and the hashes derived from them.
//!
//! # Format
//!
//! ```text
//! version           u32, big-endian
//! height            u64, big-endian
//! previous          32 bytes
//! commitment        varint length + bytes
//! timestamp         u64, big-endian
//! signature_script  varint length + bytes (empty in ForSigning mode)
//! output_script     varint length + bytes
//! ```

use crate::{
    commitment::Commitment,
    config::Limits,
    mode::{EncodeMode, Mode},
    sink, Authorizer, Error, NEW_BLOCK_VERSION,
};
use bytes::{Buf, BufMut, Bytes};
use chrono::{DateTime, Utc};
use ledger_codec::{types::bytes::write_slice, Encode, EncodeSize, Read, ReadExt, Write};
use ledger_cryptography::{
    sha3::{self, Digest},
    Digestible,
};
use std::io;

/// Metadata of a block.
///
/// Encoding is a pure function of these fields: two headers with equal fields always produce
/// identical bytes and identical hashes.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Header {
    /// Format version of the block.
    pub version: u32,

    /// Position in the chain. The genesis block has height 0.
    pub height: u64,

    /// [Header::hash] of the preceding header ([Digest::ZERO] for genesis).
    pub previous: Digest,

    /// Transaction and state roots.
    pub commitment: Commitment,

    /// Seconds since the Unix epoch. Never less than the parent's timestamp.
    pub timestamp: u64,

    /// Authenticates this header against the previous header's output script.
    pub signature_script: Bytes,

    /// Predicate the next header's signature script must satisfy.
    pub output_script: Bytes,
}

impl Header {
    /// Creates an unsigned genesis header with both roots zeroed.
    pub fn genesis(timestamp: u64, output_script: Bytes) -> Self {
        Self {
            version: NEW_BLOCK_VERSION,
            height: 0,
            previous: Digest::ZERO,
            commitment: Commitment::from_roots(Digest::ZERO, Digest::ZERO),
            timestamp,
            signature_script: Bytes::new(),
            output_script,
        }
    }

    /// Creates an unsigned header extending `parent`.
    ///
    /// The commitment starts empty; fill it with [Header::set_tx_root] and
    /// [Header::set_state_root] before signing. Fails with [Error::HeightOverflow] if
    /// `parent` is at the maximum height.
    pub fn child(parent: &Header, timestamp: u64, output_script: Bytes) -> Result<Self, Error> {
        let height = parent
            .height
            .checked_add(1)
            .ok_or(Error::HeightOverflow(parent.height))?;
        Ok(Self {
            version: NEW_BLOCK_VERSION,
            height,
            previous: parent.hash(),
            commitment: Commitment::new(),
            timestamp,
            signature_script: Bytes::new(),
            output_script,
        })
    }

    /// Returns the hash of the full encoding: the block's identity on chain.
    pub fn hash(&self) -> Digest {
        sha3::hash(&self.encode())
    }

    /// Returns the hash of the for-signing encoding, which ignores the signature script.
    pub fn hash_for_sig(&self) -> Digest {
        sha3::hash(&self.for_signing().encode())
    }

    /// Returns the timestamp as UTC calendar time with whole-second precision.
    ///
    /// Timestamps beyond the representable calendar range saturate to the latest
    /// representable time.
    pub fn time(&self) -> DateTime<Utc> {
        i64::try_from(self.timestamp)
            .ok()
            .and_then(|secs| DateTime::from_timestamp(secs, 0))
            .unwrap_or(DateTime::<Utc>::MAX_UTC)
    }

    /// Returns the transaction root held in the commitment.
    pub fn tx_root(&self) -> Digest {
        self.commitment.tx_root()
    }

    /// Returns the state root held in the commitment.
    pub fn state_root(&self) -> Digest {
        self.commitment.state_root()
    }

    /// Sets the transaction root held in the commitment.
    pub fn set_tx_root(&mut self, root: Digest) {
        self.commitment.set_tx_root(root);
    }

    /// Sets the state root held in the commitment.
    pub fn set_state_root(&mut self, root: Digest) {
        self.commitment.set_state_root(root);
    }

    /// Returns true once a signature script has been attached.
    pub fn is_signed(&self) -> bool {
        !self.signature_script.is_empty()
    }

    /// Signs the header against the previous header's `output_script`.
    ///
    /// The signature covers [Header::hash_for_sig]. A header can only be signed once.
    pub fn sign(
        &mut self,
        output_script: &[u8],
        authorizer: &impl Authorizer,
    ) -> Result<(), Error> {
        if self.is_signed() {
            return Err(Error::AlreadySigned);
        }
        let message = self.hash_for_sig();
        self.signature_script = authorizer
            .authorize(output_script, &message)
            .ok_or(Error::Unauthorized)?;
        Ok(())
    }

    /// Writes the full encoding to `writer`, returning the number of bytes written.
    pub fn write_to(&self, writer: &mut impl io::Write) -> Result<u64, Error> {
        sink::write_to(self, writer)
    }

    /// Writes the for-signing encoding to `writer`, returning the number of bytes written.
    pub fn write_for_sig_to(&self, writer: &mut impl io::Write) -> Result<u64, Error> {
        sink::write_to(&self.for_signing(), writer)
    }

    /// Reads a header from `reader`, which must hold exactly one full encoding.
    pub fn read_from(reader: &mut impl io::Read, limits: &Limits) -> Result<Self, Error> {
        sink::read_from(reader, limits)
    }
}

impl EncodeMode for Header {
    fn write_mode(&self, buf: &mut impl BufMut, mode: Mode) {
        self.version.write(buf);
        self.height.write(buf);
        self.previous.write(buf);
        self.commitment.write(buf);
        self.timestamp.write(buf);
        match mode {
            Mode::Full => self.signature_script.write(buf),
            Mode::ForSigning => write_slice(&[], buf),
        }
        self.output_script.write(buf);
    }

    fn encode_size_mode(&self, mode: Mode) -> usize {
        let signature_script = match mode {
            Mode::Full => self.signature_script.encode_size(),
            Mode::ForSigning => Bytes::new().encode_size(),
        };
        self.version.encode_size()
            + self.height.encode_size()
            + self.previous.encode_size()
            + self.commitment.encode_size()
            + self.timestamp.encode_size()
            + signature_script
            + self.output_script.encode_size()
    }
}

impl Write for Header {
    fn write(&self, buf: &mut impl BufMut) {
        self.write_mode(buf, Mode::Full);
    }
}

impl EncodeSize for Header {
    fn encode_size(&self) -> usize {
        self.encode_size_mode(Mode::Full)
    }
}

impl Read for Header {
    type Cfg = Limits;

    fn read_cfg(buf: &mut impl Buf, limits: &Limits) -> Result<Self, ledger_codec::Error> {
        let version = u32::read(buf)?;
        let height = u64::read(buf)?;
        let previous = Digest::read(buf)?;
        let commitment = Commitment::read_cfg(buf, &limits.commitment)?;
        let timestamp = u64::read(buf)?;
        let signature_script = Bytes::read_cfg(buf, &limits.script)?;
        let output_script = Bytes::read_cfg(buf, &limits.script)?;
        Ok(Self {
            version,
            height,
            previous,
            commitment,
            timestamp,
            signature_script,
            output_script,
        })
    }
}

impl Digestible for Header {
    type Digest = Digest;

    fn digest(&self) -> Digest {
        self.hash()
    }
}
