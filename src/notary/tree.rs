use crate::hash::EmptyNoncer;
use crate::utils::parallel::map_level;
use crate::NotaryResult;

use super::traits::{BackendFailure, ImprintHasher, Noncer};
use super::types::{Digest, LeafRecord, LeafValue, NotaryError, Recipe, TreeNode};

/// Largest accepted value count.  Anything above this cannot be padded to
/// a power of two within `u32`, so `leaf_count` fields decoded from
/// untrusted payloads must be checked against it before any tree sizing.
pub(crate) const MAX_LEAF_COUNT: u32 = 1 << 31;

/// Number of leaf slots after padding `leaf_count` values to a complete
/// binary tree.  The empty input still occupies one slot, making the
/// single node both the only leaf and the root.
///
/// Counts beyond [`MAX_LEAF_COUNT`] have no representable padded width
/// and clamp to it; the engine paths reject such counts before calling
/// this.
pub(crate) fn leaf_slots(leaf_count: u32) -> u32 {
    if leaf_count == 0 {
        1
    } else {
        leaf_count.min(MAX_LEAF_COUNT).next_power_of_two()
    }
}

/// Total node count of a complete binary tree with `slots` leaves.
pub(crate) fn node_count(slots: u32) -> usize {
    2 * slots as usize - 1
}

/// Heap index of the node carrying leaf `k` in a tree with `slots` leaves.
pub(crate) fn leaf_node_index(slots: u32, k: u32) -> usize {
    (slots - 1) as usize + k as usize
}

pub(crate) fn convert_digest<H: ImprintHasher>(digest: H::Digest) -> Digest {
    Digest::new(digest.as_ref().to_vec())
}

/// Checks the layout invariants `disclose` relies on: one record per leaf
/// slot, one node per tree position, both in ascending order, no redacted
/// values.
pub(crate) fn check_recipe(recipe: &Recipe) -> NotaryResult<()> {
    if recipe.leaf_count > MAX_LEAF_COUNT {
        return Err(NotaryError::MalformedRecipe {
            reason: "leaf count out of range",
        });
    }
    let slots = leaf_slots(recipe.leaf_count);
    if recipe.values.len() != slots as usize {
        return Err(NotaryError::MalformedRecipe {
            reason: "value count disagrees with padded leaf count",
        });
    }
    if recipe.nodes.len() != node_count(slots) {
        return Err(NotaryError::MalformedRecipe {
            reason: "node count disagrees with tree size",
        });
    }
    for (k, record) in recipe.values.iter().enumerate() {
        if record.index as usize != k {
            return Err(NotaryError::MalformedRecipe {
                reason: "leaf records out of order",
            });
        }
        if record.value.is_redacted() {
            return Err(NotaryError::MalformedRecipe {
                reason: "recipe holds a redacted leaf",
            });
        }
    }
    for (i, node) in recipe.nodes.iter().enumerate() {
        if node.index as usize != i {
            return Err(NotaryError::MalformedRecipe {
                reason: "tree nodes out of order",
            });
        }
    }
    Ok(())
}

/// Notarization engine tying together the injected hasher, the nonce
/// strategy and the optional path prefix.
///
/// All three operations are pure computations over in-memory data; the
/// engine holds no mutable state and a single instance may serve any
/// number of notarizations.
pub struct Notary<H: ImprintHasher, N: Noncer = EmptyNoncer> {
    hasher: H,
    noncer: N,
    path_prefix: Vec<u32>,
}

impl<H: ImprintHasher> Notary<H, EmptyNoncer> {
    /// Creates an engine with a fixed empty nonce for every leaf.
    ///
    /// Without an unpredictable noncer the commitment still binds, but a
    /// verifier can brute-force withheld values; callers needing hiding
    /// must follow up with [`with_noncer`](Notary::with_noncer).
    pub fn new(hasher: H) -> Self {
        Self {
            hasher,
            noncer: EmptyNoncer,
            path_prefix: Vec::new(),
        }
    }
}

impl<H: ImprintHasher, N: Noncer> Notary<H, N> {
    /// Replaces the nonce strategy.
    pub fn with_noncer<M: Noncer>(self, noncer: M) -> Notary<H, M> {
        Notary {
            hasher: self.hasher,
            noncer,
            path_prefix: self.path_prefix,
        }
    }

    /// Labels this tree as a subtree of a larger structure: every leaf
    /// path handed to the noncer is prefixed with `prefix`.
    pub fn with_path_prefix(mut self, prefix: Vec<u32>) -> Self {
        self.path_prefix = prefix;
        self
    }

    fn leaf_path(&self, k: u32) -> Vec<u32> {
        let mut path = Vec::with_capacity(self.path_prefix.len() + 1);
        path.extend_from_slice(&self.path_prefix);
        path.push(k);
        path
    }

    /// Commits `values` into a full [`Recipe`].
    ///
    /// Leaves are committed level-parallel where the `parallel` feature is
    /// active; each internal level starts strictly after the level below
    /// it completed, because every parent consumes its children's output.
    /// Any backend failure aborts the whole build.
    pub fn notarize(&self, values: &[Vec<u8>]) -> NotaryResult<Recipe> {
        if values.len() > MAX_LEAF_COUNT as usize {
            return Err(NotaryError::MalformedRecipe {
                reason: "leaf count out of range",
            });
        }
        let leaf_count = values.len() as u32;
        let slots = leaf_slots(leaf_count);

        let mut records = Vec::with_capacity(slots as usize);
        for k in 0..slots {
            if (k as usize) < values.len() {
                let nonce = self.noncer.nonce(&self.leaf_path(k))?;
                records.push(LeafRecord {
                    index: k,
                    value: LeafValue::Bytes(values[k as usize].clone()),
                    nonce,
                });
            } else {
                records.push(LeafRecord {
                    index: k,
                    value: LeafValue::empty(),
                    nonce: Vec::new(),
                });
            }
        }

        let commit = |k: usize| -> Result<H::Digest, BackendFailure> {
            let record = &records[k];
            let value = record.value.as_bytes().unwrap_or_default();
            self.hasher.commit_leaf(value, &record.nonce)
        };
        let hashed: Vec<H::Digest> = map_level(records.len(), commit)?;

        let mut levels = Vec::new();
        levels.push(hashed.clone());
        let mut current = hashed;

        while current.len() > 1 {
            let pair = |index: usize| -> Result<H::Digest, BackendFailure> {
                self.hasher
                    .combine(&current[2 * index], &current[2 * index + 1])
            };
            let next: Vec<H::Digest> = map_level(current.len() / 2, pair)?;

            levels.push(next.clone());
            current = next;
        }

        // Heap numbering concatenates the levels root-first.
        let mut nodes = Vec::with_capacity(node_count(slots));
        let mut index = 0u32;
        for level in levels.into_iter().rev() {
            for digest in level {
                nodes.push(TreeNode {
                    index,
                    hash: convert_digest::<H>(digest),
                });
                index += 1;
            }
        }

        Ok(Recipe {
            leaf_count,
            values: records,
            nodes,
        })
    }

    /// Projects `recipe` onto the disclosure set `indices`, returning the
    /// smallest [`Evidence`](super::Evidence) that still reproduces the
    /// imprint.  Duplicate indices collapse; an index outside
    /// `[0, leaf_count)` is rejected.
    pub fn disclose(
        &self,
        recipe: &Recipe,
        indices: &[u32],
    ) -> NotaryResult<super::types::Evidence> {
        super::evidence::disclose(recipe, indices)
    }

    /// Recomputes the imprint from `evidence` alone.
    pub fn imprint(&self, evidence: &super::types::Evidence) -> NotaryResult<Digest> {
        super::imprint::imprint(&self.hasher, evidence)
    }
}
