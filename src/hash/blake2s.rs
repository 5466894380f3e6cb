//! BLAKE2s reference backend.

use blake2::{Blake2s256, Digest as _};

use crate::notary::traits::{BackendFailure, ImprintHasher};

const DIGEST_SIZE: usize = 32;

/// Deterministic BLAKE2s-256 hashing backend.
///
/// Used throughout the test suite and the benches; equally valid in
/// production wherever BLAKE2s is the agreed hash family.
#[derive(Debug, Clone, Copy, Default)]
pub struct Blake2sHasher;

impl ImprintHasher for Blake2sHasher {
    type Digest = [u8; DIGEST_SIZE];

    fn hash(&self, payload: &[u8]) -> Result<Self::Digest, BackendFailure> {
        let mut hasher = Blake2s256::new();
        hasher.update(payload);
        Ok(hasher.finalize().into())
    }

    fn digest_size(&self) -> usize {
        DIGEST_SIZE
    }

    fn digest_from_bytes(&self, bytes: &[u8]) -> Option<Self::Digest> {
        bytes.try_into().ok()
    }
}
