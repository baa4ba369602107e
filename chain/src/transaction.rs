//! Transactions paired with their cached identity.

use bytes::{Buf, BufMut};
use ledger_codec::{Encode, EncodeSize, Error, Read, Write};
use ledger_cryptography::{
    sha3::{self, Digest},
    Digestible,
};

/// A transaction payload and the digest of its canonical encoding.
///
/// The id is computed once in [Transaction::new] and never recomputed. The payload is not
/// reachable mutably, so the id cannot drift from it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Transaction<P> {
    payload: P,
    id: Digest,
}

impl<P: Encode> Transaction<P> {
    /// Wraps `payload`, hashing its canonical encoding into the transaction id.
    pub fn new(payload: P) -> Self {
        let id = sha3::hash(&payload.encode());
        Self { payload, id }
    }
}

impl<P> Transaction<P> {
    /// Returns the transaction id.
    pub fn id(&self) -> Digest {
        self.id
    }

    /// Returns the payload.
    pub fn payload(&self) -> &P {
        &self.payload
    }

    /// Consumes the transaction, returning the payload.
    pub fn into_payload(self) -> P {
        self.payload
    }
}

impl<P: Write> Write for Transaction<P> {
    fn write(&self, buf: &mut impl BufMut) {
        self.payload.write(buf);
    }
}

impl<P: EncodeSize> EncodeSize for Transaction<P> {
    fn encode_size(&self) -> usize {
        self.payload.encode_size()
    }
}

impl<P: Read + Encode> Read for Transaction<P> {
    type Cfg = P::Cfg;

    fn read_cfg(buf: &mut impl Buf, cfg: &P::Cfg) -> Result<Self, Error> {
        P::read_cfg(buf, cfg).map(Self::new)
    }
}

impl<P> Digestible for Transaction<P> {
    type Digest = Digest;

    fn digest(&self) -> Digest {
        self.id
    }
}
