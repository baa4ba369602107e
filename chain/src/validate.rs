//! Chain linkage and authorization checks applied before accepting a header.
//!
//! Script semantics live outside this crate. Block production reaches them through an
//! [Authorizer] and acceptance through a [Verifier].

use crate::{header::Header, Error};
use bytes::Bytes;
use ledger_cryptography::sha3::Digest;
use tracing::debug;

/// Produces signature scripts that satisfy an output script.
pub trait Authorizer {
    /// Returns a signature script satisfying `output_script` over `message`, or `None` if
    /// this authorizer cannot satisfy the predicate.
    fn authorize(&self, output_script: &[u8], message: &Digest) -> Option<Bytes>;
}

/// Checks signature scripts against output scripts.
pub trait Verifier {
    /// Returns true if `signature_script` satisfies `output_script` over `message`.
    fn verify(&self, output_script: &[u8], signature_script: &[u8], message: &Digest) -> bool;
}

/// Checks that `child` directly extends `parent`.
pub fn verify_link(parent: &Header, child: &Header) -> Result<(), Error> {
    let expected = parent
        .height
        .checked_add(1)
        .ok_or(Error::HeightOverflow(parent.height))?;
    if child.height != expected {
        return Err(Error::HeightMismatch {
            expected,
            found: child.height,
        });
    }
    let expected = parent.hash();
    if child.previous != expected {
        return Err(Error::PreviousMismatch {
            expected,
            found: child.previous,
        });
    }
    if child.timestamp < parent.timestamp {
        return Err(Error::TimestampRegression {
            parent: parent.timestamp,
            child: child.timestamp,
        });
    }
    Ok(())
}

/// Checks that `child`'s signature script satisfies `parent`'s output script.
pub fn verify_signature(
    parent: &Header,
    child: &Header,
    verifier: &impl Verifier,
) -> Result<(), Error> {
    let message = child.hash_for_sig();
    if !verifier.verify(&parent.output_script, &child.signature_script, &message) {
        return Err(Error::InvalidSignature);
    }
    Ok(())
}

/// Runs every check required to accept `child` on top of `parent`.
pub fn accept(parent: &Header, child: &Header, verifier: &impl Verifier) -> Result<(), Error> {
    verify_link(parent, child)?;
    verify_signature(parent, child, verifier)?;
    debug!(height = child.height, hash = %child.hash(), "accepted header");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mocks::{HashLock, KeyScript};

    fn pair() -> (KeyScript, Header, Header) {
        let key = KeyScript::new(Bytes::from_static(b"producer"));
        let parent = Header::genesis(1000, key.output_script());
        let mut child = Header::child(&parent, 1000, key.output_script()).unwrap();
        child.set_tx_root(Digest::from([1; 32]));
        child.set_state_root(Digest::from([2; 32]));
        child.sign(&parent.output_script, &key).unwrap();
        (key, parent, child)
    }

    #[test]
    fn test_accept() {
        let (_, parent, child) = pair();
        accept(&parent, &child, &HashLock).unwrap();
    }

    #[test]
    fn test_height_mismatch() {
        let (_, parent, mut child) = pair();
        child.height = 5;
        assert!(matches!(
            verify_link(&parent, &child),
            Err(Error::HeightMismatch {
                expected: 1,
                found: 5
            })
        ));
    }

    #[test]
    fn test_previous_mismatch() {
        let (_, parent, mut child) = pair();
        child.previous = Digest::ZERO;
        assert!(matches!(
            verify_link(&parent, &child),
            Err(Error::PreviousMismatch { .. })
        ));
    }

    #[test]
    fn test_equal_timestamp_allowed() {
        let (_, parent, child) = pair();
        assert_eq!(parent.timestamp, child.timestamp);
        verify_link(&parent, &child).unwrap();
    }

    #[test]
    fn test_max_height_parent() {
        let (_, mut parent, mut child) = pair();
        parent.height = u64::MAX;
        child.height = u64::MAX;
        assert!(matches!(
            verify_link(&parent, &child),
            Err(Error::HeightOverflow(u64::MAX))
        ));
        assert!(matches!(
            accept(&parent, &parent, &HashLock),
            Err(Error::HeightOverflow(u64::MAX))
        ));
    }

    #[test]
    fn test_timestamp_regression() {
        let (_, parent, mut child) = pair();
        child.timestamp = parent.timestamp - 1;
        assert!(matches!(
            verify_link(&parent, &child),
            Err(Error::TimestampRegression {
                parent: 1000,
                child: 999
            })
        ));
    }

    #[test]
    fn test_tampered_commitment_invalidates_signature() {
        let (_, parent, mut child) = pair();
        child.set_state_root(Digest::from([9; 32]));
        assert!(matches!(
            verify_signature(&parent, &child, &HashLock),
            Err(Error::InvalidSignature)
        ));
    }

    #[test]
    fn test_wrong_producer() {
        let (_, parent, _) = pair();
        let intruder = KeyScript::new(Bytes::from_static(b"intruder"));
        let mut forged = Header::child(&parent, 1001, intruder.output_script()).unwrap();
        forged.signature_script = intruder
            .authorize(&intruder.output_script(), &forged.hash_for_sig())
            .unwrap();
        assert!(matches!(
            accept(&parent, &forged, &HashLock),
            Err(Error::InvalidSignature)
        ));
    }
}
