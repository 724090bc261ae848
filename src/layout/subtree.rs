//! Subtree membership: the flattened descendant ids of every node.
//!
//! Consumed by interactive drag handlers, which move every id in a node's
//! list by the same delta as the dragged node. Has no effect on coordinates.

use crate::tree::Tree;

/// Descendant ids per node, indexed like the tree arena.
///
/// Each list holds, for every child in order, the child's id followed by
/// the child's own list. Leaves get an empty list.
pub fn subtree_ids(tree: &Tree<'_>) -> Vec<Vec<String>> {
    let mut lists: Vec<Vec<String>> = vec![Vec::new(); tree.len()];

    // Children always follow their parent in the preorder arena, so walking
    // it backwards finishes every child before its parent.
    for v in tree.preorder().rev() {
        let mut ids = Vec::new();
        for &child in tree.children(v) {
            ids.push(tree.id(child).to_string());
            ids.extend(lists[child.index()].iter().cloned());
        }
        lists[v.index()] = ids;
    }

    lists
}
