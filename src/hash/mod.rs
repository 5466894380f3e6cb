//! Concrete hashing and nonce backends.
//!
//! The engine accepts any [`ImprintHasher`](crate::notary::ImprintHasher)
//! / [`Noncer`](crate::notary::Noncer) pair; the backends here cover the
//! common cases.  [`Blake3Hasher`] is the recommended production hash,
//! [`Blake2sHasher`] the deterministic reference backend used across the
//! test suite, [`KeyedNoncer`] a reproducible yet unpredictable nonce
//! source and [`EmptyNoncer`] the explicit opt-out of hiding.

use crate::notary::traits::{BackendFailure, Noncer};

pub mod blake2s;
pub mod blake3;

pub use blake2s::Blake2sHasher;
pub use blake3::{Blake3Hasher, KeyedNoncer};

/// Fixed empty nonce for every leaf.
///
/// Commitments stay binding, but withheld values can be brute-forced by
/// anyone holding the imprint; only suitable when hiding is not required.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmptyNoncer;

impl Noncer for EmptyNoncer {
    fn nonce(&self, _path: &[u32]) -> Result<Vec<u8>, BackendFailure> {
        Ok(Vec::new())
    }
}
