//! Two digest slots packed into a header's variable-length commitment field.
//!
//! The field is a plain byte string on the wire. Logically it holds the transaction root at
//! bytes `[0, 32)` and the state root at bytes `[32, 64)`; a slot the buffer does not fully
//! cover reads as [Digest::ZERO]. Setters only ever grow the buffer, so bytes beyond the
//! slot being written (including any trailing bytes past 64) survive every update.

use bytes::{Buf, BufMut};
use ledger_codec::{EncodeSize, Error, RangeCfg, Read, Write};
use ledger_cryptography::sha3::Digest;
use std::ops::Range;

const SLOT_SIZE: usize = 32;

#[derive(Clone, Copy)]
enum Slot {
    TxRoot,
    StateRoot,
}

impl Slot {
    fn range(self) -> Range<usize> {
        let start = match self {
            Slot::TxRoot => 0,
            Slot::StateRoot => SLOT_SIZE,
        };
        start..start + SLOT_SIZE
    }
}

/// The commitment field of a [crate::Header].
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Commitment(Vec<u8>);

impl Commitment {
    /// Creates an empty commitment (both roots read as zero).
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a 64-byte commitment holding both roots.
    pub fn from_roots(tx_root: Digest, state_root: Digest) -> Self {
        let mut commitment = Self::new();
        commitment.set_tx_root(tx_root);
        commitment.set_state_root(state_root);
        commitment
    }

    /// Returns the transaction root, or zero if the field is shorter than 32 bytes.
    pub fn tx_root(&self) -> Digest {
        self.get(Slot::TxRoot)
    }

    /// Returns the state root, or zero if the field is shorter than 64 bytes.
    pub fn state_root(&self) -> Digest {
        self.get(Slot::StateRoot)
    }

    /// Overwrites the transaction root, growing the field to 32 bytes if needed.
    pub fn set_tx_root(&mut self, root: Digest) {
        self.set(Slot::TxRoot, root);
    }

    /// Overwrites the state root, zero-filling the field up to 64 bytes if needed.
    pub fn set_state_root(&mut self, root: Digest) {
        self.set(Slot::StateRoot, root);
    }

    /// Length of the raw field in bytes.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if the raw field is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn get(&self, slot: Slot) -> Digest {
        self.0
            .get(slot.range())
            .and_then(|bytes| Digest::try_from(bytes).ok())
            .unwrap_or(Digest::ZERO)
    }

    fn set(&mut self, slot: Slot, root: Digest) {
        let range = slot.range();
        if self.0.len() < range.end {
            self.0.resize(range.end, 0);
        }
        self.0[range].copy_from_slice(root.as_ref());
    }
}

impl From<Vec<u8>> for Commitment {
    fn from(value: Vec<u8>) -> Self {
        Self(value)
    }
}

impl From<&[u8]> for Commitment {
    fn from(value: &[u8]) -> Self {
        Self(value.to_vec())
    }
}

impl AsRef<[u8]> for Commitment {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl Write for Commitment {
    fn write(&self, buf: &mut impl BufMut) {
        self.0.write(buf);
    }
}

impl EncodeSize for Commitment {
    fn encode_size(&self) -> usize {
        self.0.encode_size()
    }
}

impl Read for Commitment {
    type Cfg = RangeCfg;

    fn read_cfg(buf: &mut impl Buf, range: &RangeCfg) -> Result<Self, Error> {
        Vec::<u8>::read_cfg(buf, range).map(Self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ledger_codec::{Decode, Encode};
    use ledger_cryptography::{Hasher, Sha3};
    use rand::{rngs::StdRng, SeedableRng};

    fn digests() -> (Digest, Digest) {
        let mut rng = StdRng::seed_from_u64(7);
        (Sha3::random(&mut rng), Sha3::random(&mut rng))
    }

    #[test]
    fn test_empty_reads_zero() {
        let commitment = Commitment::new();
        assert_eq!(commitment.tx_root(), Digest::ZERO);
        assert_eq!(commitment.state_root(), Digest::ZERO);
    }

    #[test]
    fn test_set_both_from_empty() {
        let (d1, d2) = digests();
        let mut commitment = Commitment::new();
        commitment.set_tx_root(d1);
        assert_eq!(commitment.len(), 32);
        commitment.set_state_root(d2);
        assert_eq!(commitment.tx_root(), d1);
        assert_eq!(commitment.state_root(), d2);
        assert_eq!(commitment.len(), 64);
    }

    #[test]
    fn test_state_root_first_zero_pads() {
        let (_, d2) = digests();
        let mut commitment = Commitment::from(vec![0xAB; 10]);
        commitment.set_state_root(d2);
        assert_eq!(commitment.len(), 64);
        assert_eq!(&commitment.as_ref()[..10], &[0xAB; 10]);
        assert!(commitment.as_ref()[10..32].iter().all(|b| *b == 0));
        assert_eq!(commitment.state_root(), d2);

        // The first slot now exists and starts with the original bytes.
        assert_eq!(&commitment.tx_root()[..10], &[0xAB; 10]);
    }

    #[test]
    fn test_short_buffers() {
        let commitment = Commitment::from(vec![1; 31]);
        assert_eq!(commitment.tx_root(), Digest::ZERO);

        let commitment = Commitment::from(vec![1; 63]);
        assert_eq!(commitment.tx_root(), Digest::from([1; 32]));
        assert_eq!(commitment.state_root(), Digest::ZERO);
    }

    #[test]
    fn test_setters_preserve_other_bytes() {
        let (d1, d2) = digests();
        let original: Vec<u8> = (0..80).collect();
        let mut commitment = Commitment::from(original.clone());

        commitment.set_tx_root(d1);
        assert_eq!(commitment.len(), 80);
        assert_eq!(&commitment.as_ref()[32..], &original[32..]);

        commitment.set_state_root(d2);
        assert_eq!(commitment.len(), 80);
        assert_eq!(&commitment.as_ref()[..32], d1.as_ref());
        assert_eq!(&commitment.as_ref()[64..], &original[64..]);
        assert_eq!(commitment.state_root(), d2);
    }

    #[test]
    fn test_tx_root_keeps_tail_of_short_buffer() {
        let (d1, _) = digests();
        let mut commitment = Commitment::from(vec![9; 40]);
        commitment.set_tx_root(d1);
        assert_eq!(commitment.len(), 40);
        assert_eq!(&commitment.as_ref()[32..], &[9; 8]);
    }

    #[test]
    fn test_codec() {
        let (d1, d2) = digests();
        let commitment = Commitment::from_roots(d1, d2);
        let encoded = commitment.encode();
        assert_eq!(encoded.len(), 65);
        assert_eq!(encoded[0], 64);
        let decoded = Commitment::decode_cfg(encoded, &RangeCfg::default()).unwrap();
        assert_eq!(decoded, commitment);
    }
}
