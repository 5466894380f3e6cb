use std::collections::BTreeSet;

use super::tree::{check_recipe, leaf_node_index, leaf_slots, node_count};
use super::types::{Evidence, NotaryError, Recipe};

/// Minimal multiproof selection.
///
/// A node is *known* when it is a disclosed leaf, a padding leaf (whose
/// commitment any verifier can recompute), or when both of its children
/// are known.  Walking down from the root, a subtree whose top is known
/// contributes nothing; a subtree containing a disclosed leaf is
/// descended into; any other subtree is summarized by its single top
/// hash.  The result is exactly the set of hashes the verifier cannot
/// derive on its own.
pub(crate) fn disclose(recipe: &Recipe, indices: &[u32]) -> Result<Evidence, NotaryError> {
    check_recipe(recipe)?;

    let n = recipe.leaf_count;
    let slots = leaf_slots(n);
    let total = node_count(slots);

    let mut disclosed = BTreeSet::new();
    for &index in indices {
        if index >= n {
            return Err(NotaryError::IndexOutOfRange {
                index,
                leaf_count: n,
            });
        }
        disclosed.insert(index);
    }

    // The empty notarization reduces to one node; its hash is the whole
    // evidence.
    if n == 0 {
        return Ok(Evidence {
            leaf_count: 0,
            values: Vec::new(),
            nodes: vec![recipe.nodes[0].clone()],
        });
    }

    let mut known = vec![false; total];
    let mut holds_disclosed = vec![false; total];
    for k in 0..slots {
        let at = leaf_node_index(slots, k);
        known[at] = disclosed.contains(&k) || k >= n;
        holds_disclosed[at] = disclosed.contains(&k);
    }
    for i in (0..(slots - 1) as usize).rev() {
        known[i] = known[2 * i + 1] && known[2 * i + 2];
        holds_disclosed[i] = holds_disclosed[2 * i + 1] || holds_disclosed[2 * i + 2];
    }

    let first_leaf = (slots - 1) as usize;
    let mut explicit = Vec::new();
    let mut stack = vec![0usize];
    while let Some(i) = stack.pop() {
        if known[i] {
            continue;
        }
        if i >= first_leaf || !holds_disclosed[i] {
            explicit.push(i);
        } else {
            stack.push(2 * i + 1);
            stack.push(2 * i + 2);
        }
    }
    explicit.sort_unstable();

    let values = disclosed
        .iter()
        .map(|&k| recipe.values[k as usize].clone())
        .collect();
    let nodes = explicit
        .into_iter()
        .map(|i| recipe.nodes[i].clone())
        .collect();

    Ok(Evidence {
        leaf_count: n,
        values,
        nodes,
    })
}
