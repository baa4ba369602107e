//! Conversion between headers/blocks and the values a SQL driver stores.
//!
//! The stored form is the full canonical encoding, the same bytes sent over the network, so
//! storage and transmission never disagree on format.

use crate::{block::Block, header::Header, Error};
use chrono::{DateTime, Utc};
use ledger_codec::{Decode, Encode, Read};
use ledger_cryptography::sha3::Digest;
use std::any::type_name;
use tracing::{debug, warn};

/// A value as handed over by a SQL driver.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Null,
    Int(i64),
    Float(f64),
    Bool(bool),
    Text(String),
    Bytes(Vec<u8>),
    Time(DateTime<Utc>),
}

impl Value {
    /// Name of the value's kind, for error reporting.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Bool(_) => "bool",
            Value::Text(_) => "text",
            Value::Bytes(_) => "bytes",
            Value::Time(_) => "time",
        }
    }
}

/// Types persisted as their full canonical encoding.
pub trait Stored: Encode + Decode {
    /// Returns the height and hash identifying the value in logs.
    fn identity(&self) -> (u64, Digest);

    /// Returns the value to store.
    fn value(&self) -> Value {
        let encoded = self.encode();
        let (height, hash) = self.identity();
        debug!(height, %hash, len = encoded.len(), "storing value");
        Value::Bytes(encoded.to_vec())
    }

    /// Reconstructs a value from what the driver returned.
    ///
    /// Anything other than [Value::Bytes] fails with [Error::InvalidStoredValue] without
    /// attempting to decode.
    fn scan(value: &Value, cfg: &<Self as Read>::Cfg) -> Result<Self, Error> {
        let Value::Bytes(bytes) = value else {
            warn!(kind = type_name::<Self>(), found = value.kind(), "rejected stored value");
            return Err(Error::InvalidStoredValue(value.kind()));
        };
        let decoded = Self::decode_cfg(bytes.as_slice(), cfg).map_err(|err| {
            warn!(
                kind = type_name::<Self>(),
                len = bytes.len(),
                ?err,
                "failed to decode stored value"
            );
            Error::from(err)
        })?;
        let (height, hash) = decoded.identity();
        debug!(height, %hash, len = bytes.len(), "loaded value");
        Ok(decoded)
    }
}

impl Stored for Header {
    fn identity(&self) -> (u64, Digest) {
        (self.height, self.hash())
    }
}

impl<P: Encode + Read> Stored for Block<P> {
    fn identity(&self) -> (u64, Digest) {
        self.header.identity()
    }
}
