use ledger_cryptography::sha3::Digest;
use std::io;
use thiserror::Error;

/// Errors that can occur when encoding, decoding, persisting, or linking blocks.
#[derive(Error, Debug)]
pub enum Error {
    #[error("codec: {0}")]
    Codec(#[from] ledger_codec::Error),
    #[error("invalid stored value: expected bytes, found {0}")]
    InvalidStoredValue(&'static str),
    #[error("sink failed after {offset} bytes: {source}")]
    Sink {
        offset: u64,
        #[source]
        source: io::Error,
    },
    #[error("header already signed")]
    AlreadySigned,
    #[error("no signature satisfies the output script")]
    Unauthorized,
    #[error("signature script does not satisfy the output script")]
    InvalidSignature,
    #[error("height overflow: no header can extend height {0}")]
    HeightOverflow(u64),
    #[error("height mismatch: expected {expected}, found {found}")]
    HeightMismatch { expected: u64, found: u64 },
    #[error("previous hash mismatch: expected {expected}, found {found}")]
    PreviousMismatch { expected: Digest, found: Digest },
    #[error("timestamp regression: parent {parent}, child {child}")]
    TimestampRegression { parent: u64, child: u64 },
}
