use serde::{Deserialize, Serialize};
use std::fmt;

use super::traits::BackendFailure;

/// Canonical digest exchanged through [`Recipe`] and [`Evidence`].
///
/// The engine is generic over the hasher's native digest type; at the API
/// boundary every digest is converted into this byte-backed form so the
/// plain-data structures stay serializable and hasher-agnostic.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Digest {
    bytes: Vec<u8>,
}

impl Digest {
    /// Creates a digest from raw bytes.
    pub fn new(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }

    /// Returns a reference to the underlying bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Consumes the digest and returns the bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    /// Mutable view into the digest bytes.
    pub fn as_bytes_mut(&mut self) -> &mut [u8] {
        &mut self.bytes
    }
}

impl fmt::Debug for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Digest(0x")?;
        for byte in &self.bytes {
            write!(f, "{:02x}", byte)?;
        }
        write!(f, ")")
    }
}

impl AsRef<[u8]> for Digest {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

/// Payload of a leaf: the original bytes, or a marker for a hidden value.
///
/// The engine itself never emits `Redacted` records: a [`Recipe`] holds
/// every value in clear and an [`Evidence`] omits hidden leaves entirely.
/// The variant exists so integrating systems can render a partially
/// disclosed document; feeding a redacted record back into verification is
/// rejected as incomplete.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum LeafValue {
    /// Value present in clear.
    Bytes(Vec<u8>),
    /// Value withheld by the holder.
    Redacted,
}

impl LeafValue {
    /// Empty sentinel committed by padding leaves.
    pub fn empty() -> Self {
        LeafValue::Bytes(Vec::new())
    }

    /// Returns the clear bytes, or `None` for a redacted value.
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            LeafValue::Bytes(bytes) => Some(bytes),
            LeafValue::Redacted => None,
        }
    }

    /// True when the value is withheld.
    pub fn is_redacted(&self) -> bool {
        matches!(self, LeafValue::Redacted)
    }
}

/// One leaf of a notarization tree: the value plus its blinding nonce.
///
/// `index` is the 0-based leaf position, not the heap index of the node
/// that carries the leaf's commitment.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeafRecord {
    pub index: u32,
    pub value: LeafValue,
    pub nonce: Vec<u8>,
}

/// Hash of one tree node, tagged with its heap index.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeNode {
    pub index: u32,
    pub hash: Digest,
}

/// Full, unredacted description of one notarization.
///
/// Held solely by the data owner; immutable once built.  `values` lists
/// every leaf including padding in ascending leaf order, `nodes` every
/// tree node in ascending heap order, so `nodes[0]` is the imprint.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipe {
    pub leaf_count: u32,
    pub values: Vec<LeafRecord>,
    pub nodes: Vec<TreeNode>,
}

impl Recipe {
    /// The committed root digest, i.e. the public imprint.
    pub fn imprint(&self) -> Option<&Digest> {
        self.nodes.first().map(|node| &node.hash)
    }

    /// Number of real (non-padding) values in the notarized set.
    pub fn leaf_count(&self) -> u32 {
        self.leaf_count
    }

    /// Number of leaf slots after padding to a power of two.
    pub fn leaf_slots(&self) -> u32 {
        super::tree::leaf_slots(self.leaf_count)
    }
}

/// Self-contained proof for one disclosure subset.
///
/// `values` holds only the disclosed leaves (ascending), `nodes` the
/// minimal explicit hashes a verifier cannot re-derive from those leaves
/// and from the public padding commitments.  The structure never
/// references the [`Recipe`] it was projected from.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Evidence {
    pub leaf_count: u32,
    pub values: Vec<LeafRecord>,
    pub nodes: Vec<TreeNode>,
}

/// Payload domains reported by the canonical byte codecs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SerKind {
    Recipe,
    Evidence,
}

/// Errors emitted by the notarization engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotaryError {
    /// The external hasher or noncer rejected a request; the whole
    /// operation is aborted with nothing partial returned.
    HashingFailed { reason: String },
    /// `disclose` was asked for a leaf outside `[0, leaf_count)`.
    IndexOutOfRange { index: u32, leaf_count: u32 },
    /// The supplied recipe violates the engine's layout invariants.
    MalformedRecipe { reason: &'static str },
    /// The evidence is missing or misdeclaring a hash required to reach
    /// the root.  Distinct from a root mismatch, which the engine never
    /// checks itself.
    IncompleteEvidence { reason: &'static str },
    /// A canonical byte payload could not be encoded or decoded.
    Serialization(SerKind),
}

impl fmt::Display for NotaryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NotaryError::HashingFailed { reason } => {
                write!(f, "hashing backend failed: {}", reason)
            }
            NotaryError::IndexOutOfRange { index, leaf_count } => {
                write!(
                    f,
                    "leaf index {} out of range ({} notarized values)",
                    index, leaf_count
                )
            }
            NotaryError::MalformedRecipe { reason } => {
                write!(f, "malformed recipe: {}", reason)
            }
            NotaryError::IncompleteEvidence { reason } => {
                write!(f, "incomplete evidence: {}", reason)
            }
            NotaryError::Serialization(kind) => {
                write!(f, "serialization error in {:?} payload", kind)
            }
        }
    }
}

impl std::error::Error for NotaryError {}

impl From<BackendFailure> for NotaryError {
    fn from(failure: BackendFailure) -> Self {
        NotaryError::HashingFailed {
            reason: failure.reason,
        }
    }
}
