//! Hash ledger structures into fixed-size digests.
//!
//! Every identity in the ledger (a header's hash, its signing hash, a transaction's id) is a
//! [Hasher] digest over a canonical [ledger_codec] encoding. The default hasher is [Sha3]
//! (SHA3-256).

use rand::{CryptoRng, Rng};
use thiserror::Error;

pub mod sha3;
pub use self::sha3::{hash, Sha3};

/// Errors that can occur when interacting with digests.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("invalid digest length")]
    InvalidDigestLength,
}

/// Interface that ledger crates rely on for hashing.
///
/// This trait is required to implement `Clone` because it is often part of a struct that is
/// cloned. Implementations do not clone the hasher state; call `reset` after cloning if in doubt.
pub trait Hasher: Clone + Send + Sync + 'static {
    /// Digest generated by the hasher.
    type Digest: Copy + Eq + AsRef<[u8]>;

    /// Create a new hasher.
    fn new() -> Self;

    /// Append message to previously recorded data.
    fn update(&mut self, message: &[u8]);

    /// Hash all recorded data and reset the hasher to the initial state.
    fn finalize(&mut self) -> Self::Digest;

    /// Reset the hasher without generating a hash.
    ///
    /// This function does not need to be called after `finalize`.
    fn reset(&mut self);

    /// Generate a random digest.
    ///
    /// # Warning
    ///
    /// This function is typically used for testing and is not recommended
    /// for production use.
    fn random<R: Rng + CryptoRng>(rng: &mut R) -> Self::Digest;
}

/// An object that can be uniquely represented as a digest.
pub trait Digestible {
    /// The type of digest produced by this object.
    type Digest: Copy + Eq;

    /// Returns a unique representation of the object as a digest.
    fn digest(&self) -> Self::Digest;
}
