//! Bounds applied when decoding headers and blocks from untrusted bytes.

use ledger_codec::RangeCfg;

/// Largest commitment accepted by [Limits::default].
pub const MAX_COMMITMENT: usize = 1024;

/// Largest signature or output script accepted by [Limits::default].
pub const MAX_SCRIPT: usize = 64 * 1024;

/// Largest transaction count accepted by [Limits::default].
pub const MAX_TRANSACTIONS: usize = 64 * 1024;

/// Length limits consulted while reading a [crate::Header] or [crate::Block].
///
/// A length prefix outside its range fails with [ledger_codec::Error::InvalidLength]
/// before any bytes are copied.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Limits {
    /// Accepted length of the commitment field.
    pub commitment: RangeCfg,
    /// Accepted length of the signature and output scripts.
    pub script: RangeCfg,
    /// Accepted number of transactions in a block.
    pub transactions: RangeCfg,
}

impl Limits {
    /// Limits that accept any length representable on this platform.
    pub fn unbounded() -> Self {
        Self {
            commitment: RangeCfg::default(),
            script: RangeCfg::default(),
            transactions: RangeCfg::default(),
        }
    }
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            commitment: RangeCfg::new(..=MAX_COMMITMENT),
            script: RangeCfg::new(..=MAX_SCRIPT),
            transactions: RangeCfg::new(..=MAX_TRANSACTIONS),
        }
    }
}
