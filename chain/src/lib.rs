//! Encode, hash, and link the blocks of a permissioned ledger.
//!
//! # Overview
//!
//! Each [Header] names a predicate (its output script) that the next header's signature
//! script must satisfy. A producer:
//!
//! 1. Builds an unsigned header with [Header::child] and fills the commitment roots.
//! 2. Signs [Header::hash_for_sig] via [Header::sign], which blanks the signature script
//!    in what it hashes.
//! 3. Persists or broadcasts the [Block]'s full encoding ([store::Stored::value]).
//!
//! A peer decodes the bytes ([store::Stored::scan] or [ledger_codec::Decode]), then runs
//! [validate::accept] against the parent header before trusting the block.
//!
//! Everything here is a pure function of in-memory values: encoding, decoding, and hashing
//! never block or suspend, and independent values can be processed on any thread.
//!
//! # Example
//!
//! ```
//! use bytes::Bytes;
//! use ledger_chain::{
//!     mocks::{HashLock, KeyScript, Payload},
//!     store::Stored,
//!     validate, Block, Header, Limits, Transaction,
//! };
//! use ledger_codec::RangeCfg;
//! use ledger_cryptography::sha3;
//!
//! let key = KeyScript::new(Bytes::from_static(b"producer"));
//! let genesis = Header::genesis(1000, key.output_script());
//!
//! let tx = Transaction::new(Payload::new(1, Bytes::from_static(b"hello")));
//! let mut header = Header::child(&genesis, 1010, key.output_script()).unwrap();
//! header.set_tx_root(tx.id());
//! header.set_state_root(sha3::hash(b"state"));
//! header.sign(&genesis.output_script, &key).unwrap();
//! let block = Block::new(header, vec![tx]);
//!
//! let cfg = (Limits::default(), RangeCfg::new(..=1024));
//! let received = Block::<Payload>::scan(&block.value(), &cfg).unwrap();
//! validate::accept(&genesis, &received.header, &HashLock).unwrap();
//! assert_eq!(received.hash(), block.hash());
//! ```

pub mod block;
pub mod commitment;
pub mod config;
mod error;
pub mod header;
pub mod mocks;
pub mod mode;
pub mod sink;
pub mod store;
pub mod transaction;
pub mod validate;

pub use block::Block;
pub use commitment::Commitment;
pub use config::Limits;
pub use error::Error;
pub use header::Header;
pub use mode::{EncodeMode, ForSigning, Mode};
pub use transaction::Transaction;
pub use validate::{Authorizer, Verifier};

/// Block version to use when creating new blocks.
pub const NEW_BLOCK_VERSION: u32 = 1;
