//! BLAKE3-backed hasher and keyed nonce derivation.

use crate::notary::traits::{BackendFailure, ImprintHasher, Noncer};

const DIGEST_SIZE: usize = 32;

/// Plain BLAKE3 hashing backend.
#[derive(Debug, Clone, Copy, Default)]
pub struct Blake3Hasher;

impl ImprintHasher for Blake3Hasher {
    type Digest = [u8; DIGEST_SIZE];

    fn hash(&self, payload: &[u8]) -> Result<Self::Digest, BackendFailure> {
        Ok(*blake3::hash(payload).as_bytes())
    }

    fn digest_size(&self) -> usize {
        DIGEST_SIZE
    }

    fn digest_from_bytes(&self, bytes: &[u8]) -> Option<Self::Digest> {
        bytes.try_into().ok()
    }
}

/// Nonce derivation through BLAKE3 keyed hashing of the leaf path.
///
/// The path is absorbed as little-endian `u32` words.  While the key
/// stays secret the nonces are unpredictable to outside observers, and
/// the recipe holder can regenerate them at will; leaking the key
/// forfeits hiding for every tree it covered.
#[derive(Debug, Clone, Copy)]
pub struct KeyedNoncer {
    key: [u8; 32],
}

impl KeyedNoncer {
    pub fn new(key: [u8; 32]) -> Self {
        Self { key }
    }
}

impl Noncer for KeyedNoncer {
    fn nonce(&self, path: &[u32]) -> Result<Vec<u8>, BackendFailure> {
        let mut buf = Vec::with_capacity(4 * path.len());
        for segment in path {
            buf.extend_from_slice(&segment.to_le_bytes());
        }
        Ok(blake3::keyed_hash(&self.key, &buf).as_bytes().to_vec())
    }
}
