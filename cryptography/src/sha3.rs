//! SHA3-256 implementation of the `Hasher` trait.
//!
//! This implementation uses the `sha3` crate to generate SHA3-256 digests.
//!
//! # Example
//! ```rust
//! use ledger_cryptography::{Hasher, Sha3};
//!
//! let mut hasher = Sha3::new();
//! hasher.update(b"hello,");
//! hasher.update(b"world!");
//! let digest = hasher.finalize();
//! println!("digest: {digest}");
//! ```

use crate::{Error, Hasher};
use bytes::{Buf, BufMut};
use ledger_codec::{Error as CodecError, FixedSize, Read, ReadExt, Write};
use ledger_utils::hex;
use rand::{CryptoRng, Rng};
use sha3::{Digest as _, Sha3_256 as ISha3};
use std::{
    fmt::{Debug, Display},
    ops::Deref,
};

const DIGEST_LENGTH: usize = 32;

/// Generate a SHA3-256 digest from a message.
pub fn hash(message: &[u8]) -> Digest {
    let array: [u8; DIGEST_LENGTH] = ISha3::digest(message).into();
    Digest(array)
}

/// SHA3-256 hasher.
#[derive(Debug)]
pub struct Sha3 {
    hasher: ISha3,
}

impl Default for Sha3 {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for Sha3 {
    fn clone(&self) -> Self {
        // We manually implement `Clone` to avoid cloning the hasher state.
        Self::default()
    }
}

impl Hasher for Sha3 {
    type Digest = Digest;

    fn new() -> Self {
        Self {
            hasher: ISha3::new(),
        }
    }

    fn update(&mut self, message: &[u8]) {
        self.hasher.update(message);
    }

    fn finalize(&mut self) -> Digest {
        let array: [u8; DIGEST_LENGTH] = self.hasher.finalize_reset().into();
        Digest(array)
    }

    fn reset(&mut self) {
        self.hasher = ISha3::new();
    }

    fn random<R: Rng + CryptoRng>(rng: &mut R) -> Digest {
        let mut digest = [0u8; DIGEST_LENGTH];
        rng.fill_bytes(&mut digest);
        Digest(digest)
    }
}

/// Digest of a SHA3-256 hashing operation.
///
/// The all-zero digest doubles as the "absent" value: the genesis header's previous hash and
/// an unset commitment slot both read as [Digest::ZERO].
#[derive(Clone, Copy, Default, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[repr(transparent)]
pub struct Digest(pub [u8; DIGEST_LENGTH]);

impl Digest {
    /// The all-zero digest.
    pub const ZERO: Self = Self([0; DIGEST_LENGTH]);

    /// Returns true if every byte is zero.
    pub fn is_zero(&self) -> bool {
        self == &Self::ZERO
    }
}

impl Write for Digest {
    fn write(&self, buf: &mut impl BufMut) {
        self.0.write(buf);
    }
}

impl Read for Digest {
    type Cfg = ();

    fn read_cfg(buf: &mut impl Buf, _: &()) -> Result<Self, CodecError> {
        <[u8; DIGEST_LENGTH]>::read(buf).map(Self)
    }
}

impl FixedSize for Digest {
    const SIZE: usize = DIGEST_LENGTH;
}

impl From<[u8; DIGEST_LENGTH]> for Digest {
    fn from(value: [u8; DIGEST_LENGTH]) -> Self {
        Self(value)
    }
}

impl TryFrom<&[u8]> for Digest {
    type Error = Error;

    fn try_from(value: &[u8]) -> Result<Self, Self::Error> {
        let array: [u8; DIGEST_LENGTH] =
            value.try_into().map_err(|_| Error::InvalidDigestLength)?;
        Ok(Self(array))
    }
}

impl AsRef<[u8]> for Digest {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl Deref for Digest {
    type Target = [u8];
    fn deref(&self) -> &[u8] {
        &self.0
    }
}

impl Debug for Digest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", hex(&self.0))
    }
}

impl Display for Digest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", hex(&self.0))
    }
}
