//! Mock payloads and scripts for testing.
//!
//! # Warning
//!
//! [KeyScript] is a hash lock, not a signature scheme: anyone who has seen one signature
//! script can sign any message. It exists to exercise the production and acceptance flow.

use crate::{Authorizer, Verifier};
use bytes::{Buf, BufMut, Bytes};
use ledger_codec::{EncodeSize, Error, FixedSize, RangeCfg, Read, ReadExt, Write};
use ledger_cryptography::{
    sha3::{self, Digest},
    Hasher, Sha3,
};

/// A minimal transaction payload: a nonce followed by opaque data.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Payload {
    pub nonce: u64,
    pub data: Bytes,
}

impl Payload {
    /// Creates a payload from a nonce and its data.
    pub fn new(nonce: u64, data: Bytes) -> Self {
        Self { nonce, data }
    }
}

impl Write for Payload {
    fn write(&self, buf: &mut impl BufMut) {
        self.nonce.write(buf);
        self.data.write(buf);
    }
}

impl EncodeSize for Payload {
    fn encode_size(&self) -> usize {
        self.nonce.encode_size() + self.data.encode_size()
    }
}

impl Read for Payload {
    type Cfg = RangeCfg;

    fn read_cfg(buf: &mut impl Buf, range: &RangeCfg) -> Result<Self, Error> {
        let nonce = u64::read(buf)?;
        let data = Bytes::read_cfg(buf, range)?;
        Ok(Self { nonce, data })
    }
}

/// A secret whose hash is the output script it satisfies.
///
/// Signature scripts are `key || sha3(key || message)`.
#[derive(Clone, Debug)]
pub struct KeyScript {
    key: Bytes,
}

impl KeyScript {
    /// Creates a key script from its secret.
    pub fn new(key: Bytes) -> Self {
        Self { key }
    }

    /// Returns the output script this key satisfies.
    pub fn output_script(&self) -> Bytes {
        Bytes::copy_from_slice(sha3::hash(&self.key).as_ref())
    }
}

fn tag(key: &[u8], message: &Digest) -> Digest {
    let mut hasher = Sha3::new();
    hasher.update(key);
    hasher.update(message);
    hasher.finalize()
}

impl Authorizer for KeyScript {
    fn authorize(&self, output_script: &[u8], message: &Digest) -> Option<Bytes> {
        if output_script != self.output_script().as_ref() {
            return None;
        }
        let mut signature = self.key.to_vec();
        signature.extend_from_slice(&tag(&self.key, message));
        Some(signature.into())
    }
}

/// Verifies signature scripts produced by [KeyScript].
#[derive(Clone, Copy, Debug, Default)]
pub struct HashLock;

impl Verifier for HashLock {
    fn verify(&self, output_script: &[u8], signature_script: &[u8], message: &Digest) -> bool {
        let Some(split) = signature_script.len().checked_sub(Digest::SIZE) else {
            return false;
        };
        let (key, proof) = signature_script.split_at(split);
        sha3::hash(key).as_ref() == output_script && tag(key, message).as_ref() == proof
    }
}
