//! Injection points for the external hashing and nonce backends.
//!
//! The engine never picks a hash function or a nonce policy on its own;
//! both arrive as strategies at construction time (see
//! [`Notary`](super::Notary)).  Implementations may be backed by platform
//! crypto APIs and may fail; every failure aborts the surrounding
//! operation without partial output.

use std::fmt;

/// Failure surfaced by an external hashing or nonce backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendFailure {
    pub reason: String,
}

impl BackendFailure {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

impl fmt::Display for BackendFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "backend failure: {}", self.reason)
    }
}

impl std::error::Error for BackendFailure {}

/// Hash abstraction used for leaf commitments and node combination.
///
/// A leaf commitment is `hash(value || nonce)` and an internal node is
/// `hash(left || right)`; no extra framing or domain tags are inserted,
/// so the digest layout is entirely the backend's business.
pub trait ImprintHasher: Send + Sync {
    type Digest: AsRef<[u8]> + Clone + Eq + Send + Sync;

    /// Hashes an opaque payload.
    fn hash(&self, payload: &[u8]) -> Result<Self::Digest, BackendFailure>;

    /// Width in bytes of every digest this backend emits.
    fn digest_size(&self) -> usize;

    /// Rebuilds a native digest from its canonical bytes, rejecting
    /// payloads of the wrong width.
    fn digest_from_bytes(&self, bytes: &[u8]) -> Option<Self::Digest>;

    /// Commits one leaf value under its blinding nonce.
    fn commit_leaf(&self, value: &[u8], nonce: &[u8]) -> Result<Self::Digest, BackendFailure> {
        let mut payload = Vec::with_capacity(value.len() + nonce.len());
        payload.extend_from_slice(value);
        payload.extend_from_slice(nonce);
        self.hash(&payload)
    }

    /// Combines two child digests into their parent.
    fn combine(
        &self,
        left: &Self::Digest,
        right: &Self::Digest,
    ) -> Result<Self::Digest, BackendFailure> {
        let left = left.as_ref();
        let right = right.as_ref();
        let mut payload = Vec::with_capacity(left.len() + right.len());
        payload.extend_from_slice(left);
        payload.extend_from_slice(right);
        self.hash(&payload)
    }
}

/// Nonce derivation strategy, keyed by the leaf's path.
///
/// The path is the engine's configured prefix followed by the leaf index,
/// which lets one tree embed as a labeled subtree of a larger structure.
/// Hiding of withheld values rests entirely on the nonces being
/// unpredictable to outside observers; the engine treats the output as
/// opaque bytes and enforces nothing about its distribution.
pub trait Noncer: Send + Sync {
    fn nonce(&self, path: &[u32]) -> Result<Vec<u8>, BackendFailure>;
}
