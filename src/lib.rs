//! Merkle notarization and selective-disclosure engine.
//!
//! The crate commits an ordered sequence of opaque byte values to a single
//! fixed-size digest (the *imprint*) and later proves that an arbitrary
//! subset of those values belongs to the committed set, without revealing
//! anything about the withheld values.  Three operations cover the whole
//! lifecycle:
//!
//! * [`Notary::notarize`] pads the values to a complete binary tree, blinds
//!   every leaf with a nonce and reduces bottom-up to the imprint, emitting
//!   a full [`Recipe`].
//! * [`Notary::disclose`] projects a [`Recipe`] onto a set of leaf indices,
//!   producing the smallest self-contained [`Evidence`] from which the
//!   imprint is still recomputable.
//! * [`Notary::imprint`] recomputes the imprint from an [`Evidence`] alone;
//!   comparing the result against an anchored digest is the caller's job.
//!
//! Hashing and nonce derivation are injected strategies ([`ImprintHasher`]
//! and [`Noncer`]); the crate ships BLAKE3 and BLAKE2s backends but treats
//! both concerns as caller obligations.  In particular the hiding property
//! of the commitment holds only when the supplied noncer is unpredictable
//! to outside observers.

pub mod hash;
pub mod notary;
pub mod utils;

pub use hash::{Blake2sHasher, Blake3Hasher, EmptyNoncer, KeyedNoncer};
pub use notary::{
    decode_evidence, decode_recipe, encode_evidence, encode_recipe, BackendFailure, Digest,
    Evidence, ImprintHasher, LeafRecord, LeafValue, Noncer, Notary, NotaryError, Recipe, SerKind,
    TreeNode,
};

/// Result type used throughout the crate to surface engine errors.
pub type NotaryResult<T> = core::result::Result<T, NotaryError>;
