//! A header plus the ordered transactions it commits to.
//!
//! The full encoding is the header's full encoding, a varint transaction count, and each
//! payload in order. The for-signing encoding is the header's for-signing encoding alone:
//! signers commit to the transaction root inside the commitment, never to the literal
//! transaction bytes.

use crate::{
    config::Limits,
    header::Header,
    mode::{EncodeMode, Mode},
    sink,
    transaction::Transaction,
    Error,
};
use bytes::{Buf, BufMut};
use chrono::{DateTime, Utc};
use ledger_codec::{varint, Encode, EncodeSize, Read, Write};
use ledger_cryptography::{sha3::Digest, Digestible};
use std::io;

/// A complete block.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Block<P> {
    /// Header of the block.
    pub header: Header,

    /// Transactions in block order.
    pub transactions: Vec<Transaction<P>>,
}

impl<P> Block<P> {
    /// Creates a block from a header and its transactions.
    pub fn new(header: Header, transactions: Vec<Transaction<P>>) -> Self {
        Self {
            header,
            transactions,
        }
    }

    /// Returns the hash of the block's header.
    pub fn hash(&self) -> Digest {
        self.header.hash()
    }

    /// Returns the signing hash of the block's header.
    pub fn hash_for_sig(&self) -> Digest {
        self.header.hash_for_sig()
    }

    /// Returns the block's height.
    pub fn height(&self) -> u64 {
        self.header.height
    }

    /// Returns the block's timestamp as UTC calendar time.
    pub fn time(&self) -> DateTime<Utc> {
        self.header.time()
    }

    /// Returns the transaction root from the header's commitment.
    pub fn tx_root(&self) -> Digest {
        self.header.tx_root()
    }

    /// Returns the state root from the header's commitment.
    pub fn state_root(&self) -> Digest {
        self.header.state_root()
    }

    /// Overwrites the transaction root in the header's commitment.
    pub fn set_tx_root(&mut self, root: Digest) {
        self.header.set_tx_root(root);
    }

    /// Overwrites the state root in the header's commitment.
    pub fn set_state_root(&mut self, root: Digest) {
        self.header.set_state_root(root);
    }

    /// Returns the ids of the block's transactions, in order.
    pub fn transaction_ids(&self) -> Vec<Digest> {
        self.transactions.iter().map(Transaction::id).collect()
    }
}

impl<P: Write + EncodeSize> Block<P> {
    /// Writes the full encoding to `writer`, returning the number of bytes written.
    pub fn write_to(&self, writer: &mut impl io::Write) -> Result<u64, Error> {
        sink::write_to(self, writer)
    }

    /// Writes the for-signing encoding to `writer`, returning the number of bytes written.
    pub fn write_for_sig_to(&self, writer: &mut impl io::Write) -> Result<u64, Error> {
        sink::write_to(&self.for_signing(), writer)
    }
}

impl<P: Read + Encode> Block<P> {
    /// Reads a block from `reader`, which must hold exactly one full encoding.
    pub fn read_from(
        reader: &mut impl io::Read,
        cfg: &(Limits, P::Cfg),
    ) -> Result<Self, Error> {
        sink::read_from(reader, cfg)
    }
}

impl<P: Write + EncodeSize> EncodeMode for Block<P> {
    fn write_mode(&self, buf: &mut impl BufMut, mode: Mode) {
        self.header.write_mode(buf, mode);
        if mode == Mode::ForSigning {
            return;
        }
        varint::write(self.transactions.len() as u64, buf);
        for tx in &self.transactions {
            tx.write(buf);
        }
    }

    fn encode_size_mode(&self, mode: Mode) -> usize {
        let header = self.header.encode_size_mode(mode);
        if mode == Mode::ForSigning {
            return header;
        }
        header
            + varint::size(self.transactions.len() as u64)
            + self
                .transactions
                .iter()
                .map(EncodeSize::encode_size)
                .sum::<usize>()
    }
}

impl<P: Write + EncodeSize> Write for Block<P> {
    fn write(&self, buf: &mut impl BufMut) {
        self.write_mode(buf, Mode::Full);
    }
}

impl<P: Write + EncodeSize> EncodeSize for Block<P> {
    fn encode_size(&self) -> usize {
        self.encode_size_mode(Mode::Full)
    }
}

impl<P: Read + Encode> Read for Block<P> {
    type Cfg = (Limits, P::Cfg);

    fn read_cfg(
        buf: &mut impl Buf,
        (limits, cfg): &(Limits, P::Cfg),
    ) -> Result<Self, ledger_codec::Error> {
        let header = Header::read_cfg(buf, limits)?;

        let count = varint::read::<u64>(buf)?;
        let count = usize::try_from(count).map_err(|_| ledger_codec::Error::InvalidVarint)?;
        if !limits.transactions.contains(count) {
            return Err(ledger_codec::Error::InvalidLength(count));
        }

        // Every payload occupies at least one byte, so the remaining input bounds the
        // allocation even when the configured limit is generous.
        let mut transactions = Vec::with_capacity(count.min(buf.remaining()));
        for _ in 0..count {
            transactions.push(Transaction::read_cfg(buf, cfg)?);
        }
        Ok(Self {
            header,
            transactions,
        })
    }
}

impl<P> Digestible for Block<P> {
    type Digest = Digest;

    fn digest(&self) -> Digest {
        self.hash()
    }
}
