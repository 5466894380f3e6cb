use std::collections::BTreeMap;

use super::traits::ImprintHasher;
use super::tree::{convert_digest, leaf_node_index, leaf_slots, node_count, MAX_LEAF_COUNT};
use super::types::{Digest, Evidence, NotaryError};

/// Recomputes the root digest from an [`Evidence`] alone.
///
/// Known hashes are seeded from the explicit nodes, from re-committing
/// each disclosed leaf and from the public padding commitments, then the
/// tree is climbed sparsely: working from the highest heap index down,
/// sibling pairs combine into their parent until only the root remains.
/// The working set stays proportional to the evidence itself, so a
/// hostile `leaf_count` cannot size any allocation.  A root that stays
/// unresolved means the evidence is missing a required hash.
pub(crate) fn imprint<H: ImprintHasher>(
    hasher: &H,
    evidence: &Evidence,
) -> Result<Digest, NotaryError> {
    let n = evidence.leaf_count;
    if n > MAX_LEAF_COUNT {
        return Err(NotaryError::IncompleteEvidence {
            reason: "leaf count out of range",
        });
    }
    let slots = leaf_slots(n);
    let total = node_count(slots);
    let width = hasher.digest_size();

    let mut resolved: BTreeMap<usize, H::Digest> = BTreeMap::new();

    for node in &evidence.nodes {
        let at = node.index as usize;
        if at >= total {
            return Err(NotaryError::IncompleteEvidence {
                reason: "node index outside the tree",
            });
        }
        if node.hash.as_bytes().len() != width {
            return Err(NotaryError::IncompleteEvidence {
                reason: "node digest has the wrong width",
            });
        }
        let digest = hasher
            .digest_from_bytes(node.hash.as_bytes())
            .ok_or(NotaryError::IncompleteEvidence {
                reason: "node digest rejected by the hasher",
            })?;
        if resolved.insert(at, digest).is_some() {
            return Err(NotaryError::IncompleteEvidence {
                reason: "duplicate node index",
            });
        }
    }

    for record in &evidence.values {
        if record.index >= n {
            return Err(NotaryError::IncompleteEvidence {
                reason: "disclosed leaf outside the value range",
            });
        }
        let value = record
            .value
            .as_bytes()
            .ok_or(NotaryError::IncompleteEvidence {
                reason: "redacted leaf presented as disclosed",
            })?;
        let commitment = hasher.commit_leaf(value, &record.nonce)?;
        // A recomputed commitment outranks any explicit hash at the same
        // position.
        resolved.insert(leaf_node_index(slots, record.index), commitment);
    }

    seed_padding(hasher, n, slots, &mut resolved)?;

    // Sparse bottom-up reduction.  Taking the largest index first means a
    // missing sibling can never appear later (parents always sit below
    // their children), so such an entry is unreachable and dropped.
    loop {
        let Some((&top, _)) = resolved.last_key_value() else {
            break;
        };
        if top == 0 {
            break;
        }
        let sibling = if top % 2 == 1 { top + 1 } else { top - 1 };
        let parent = (top - 1) / 2;
        if !resolved.contains_key(&sibling) {
            resolved.remove(&top);
            continue;
        }
        let (left_at, right_at) = if top % 2 == 1 {
            (top, sibling)
        } else {
            (sibling, top)
        };
        let left = resolved.remove(&left_at);
        let right = resolved.remove(&right_at);
        if resolved.contains_key(&parent) {
            // An explicit parent hash outranks its derivable children.
            continue;
        }
        if let (Some(left), Some(right)) = (left, right) {
            resolved.insert(parent, hasher.combine(&left, &right)?);
        }
    }

    let root = resolved
        .remove(&0)
        .ok_or(NotaryError::IncompleteEvidence {
            reason: "root not derivable from the supplied hashes",
        })?;
    Ok(convert_digest::<H>(root))
}

/// Seeds the public padding commitments for the leaf range `[n, slots)`.
///
/// The range decomposes into at most `log2(slots)` maximal aligned
/// subtrees; each consists of padding leaves only, so its top hash is one
/// of the chained digests `p_0 = commit(empty, empty)`,
/// `p_{h+1} = combine(p_h, p_h)`.  Only those subtree tops are inserted,
/// and an explicit node at the same position wins.
fn seed_padding<H: ImprintHasher>(
    hasher: &H,
    n: u32,
    slots: u32,
    resolved: &mut BTreeMap<usize, H::Digest>,
) -> Result<(), NotaryError> {
    let slots = u64::from(slots);
    let mut blocks: Vec<(usize, u32)> = Vec::new();
    let mut k = u64::from(n);
    while k < slots {
        let mut height = 0u32;
        while k % (1u64 << (height + 1)) == 0 && k + (1u64 << (height + 1)) <= slots {
            height += 1;
        }
        let top = ((slots + k) >> height) as usize - 1;
        blocks.push((top, height));
        k += 1u64 << height;
    }
    if blocks.is_empty() {
        return Ok(());
    }

    let max_height = blocks.iter().map(|&(_, h)| h).max().unwrap_or(0);
    let mut chained = Vec::with_capacity(max_height as usize + 1);
    chained.push(hasher.commit_leaf(&[], &[])?);
    for h in 1..=max_height as usize {
        let below = &chained[h - 1];
        let digest = hasher.combine(below, below)?;
        chained.push(digest);
    }

    for (top, height) in blocks {
        if !resolved.contains_key(&top) {
            resolved.insert(top, chained[height as usize].clone());
        }
    }
    Ok(())
}
