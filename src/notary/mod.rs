//! Notarization core: tree building, minimal disclosure and verification.
//!
//! The module fixes the following layout knobs:
//!
//! * **Shape:** trees are complete and binary.  An input of `N` values is
//!   padded with empty-sentinel leaves to the smallest power of two
//!   `L >= max(N, 1)`; `N == 0` degenerates to a single node that is both
//!   the only leaf and the root.
//! * **Indexing:** heap numbering over the whole tree.  The root sits at
//!   index `0`, the children of node `i` at `2i + 1` and `2i + 2`, and
//!   leaf `k` at `(L - 1) + k`.  [`Recipe`] and [`Evidence`] share this
//!   scheme so both are walked by the same reconstruction code.
//! * **Commitments:** leaf `k` commits as `hash(value || nonce)` where the
//!   nonce is derived from the leaf path (`path_prefix ++ [k]`); internal
//!   nodes hash the concatenation of their two children in order.  Padding
//!   leaves carry an empty value and an empty nonce, so their commitments
//!   are public knowledge and never need to travel inside an [`Evidence`].
//!
//! The public API re-exports the most relevant types for convenience.

mod evidence;
mod imprint;
mod ser;
pub mod traits;
mod tree;
mod types;

pub use ser::{decode_evidence, decode_recipe, encode_evidence, encode_recipe, WIRE_VERSION};
pub use traits::{BackendFailure, ImprintHasher, Noncer};
pub use tree::Notary;
pub use types::{
    Digest, Evidence, LeafRecord, LeafValue, NotaryError, Recipe, SerKind, TreeNode,
};
