//! Tree - arena built from flat node records.
//!
//! The builder resolves the root, walks declared child ids depth-first and
//! stores every reachable node in a `Vec<TreeNode>` addressed by
//! [`NodeIndex`]. Parent and child relations are plain index lookups, so the
//! tree holds no reference cycles.

use std::collections::{HashMap, HashSet};

use serde::Serialize;
use tracing::{debug, warn};

use super::node::{NodeIndex, NodeRecord, TreeNode};
use crate::error::LayoutError;

const ROOT_SIBLINGS: &[NodeIndex] = &[NodeIndex::ROOT];

/// Why a declared parent → child link was left out of the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum DropReason {
    /// The child id does not match any input record.
    UnknownChild,
    /// The record lists itself as a child.
    SelfReference,
    /// The child was already reached through an earlier parent.
    AlreadyPlaced,
}

/// A declared child reference that did not become a tree edge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DroppedReference {
    /// Id of the declaring record.
    pub parent: String,
    /// The declared child id.
    pub child: String,
    /// Why the link was dropped.
    pub reason: DropReason,
}

/// A rooted tree over borrowed input records.
///
/// Nodes are stored in preorder: the root is [`NodeIndex::ROOT`] and every
/// parent precedes its descendants.
#[derive(Debug)]
pub struct Tree<'a> {
    /// The input records, in caller order.
    records: &'a [NodeRecord],
    /// Arena of reachable nodes in preorder.
    nodes: Vec<TreeNode>,
    /// Map from input slot to arena index (None when unreachable).
    slot_to_index: Vec<Option<NodeIndex>>,
    /// Map from record id to input slot.
    id_to_slot: HashMap<&'a str, usize>,
    /// Child references that were skipped while building.
    dropped: Vec<DroppedReference>,
}

impl<'a> Tree<'a> {
    /// Build a tree from `records`.
    ///
    /// The root is `root_id` when given, otherwise the only record that no
    /// other record lists as a child.
    pub fn build(records: &'a [NodeRecord], root_id: Option<&str>) -> Result<Self, LayoutError> {
        let mut id_to_slot: HashMap<&'a str, usize> = HashMap::with_capacity(records.len());
        for (slot, record) in records.iter().enumerate() {
            if id_to_slot.insert(record.id.as_str(), slot).is_some() {
                return Err(LayoutError::DuplicateNodeId(record.id.clone()));
            }
        }

        let root_slot = Self::resolve_root(records, &id_to_slot, root_id)?;

        let mut tree = Self {
            records,
            nodes: Vec::with_capacity(records.len()),
            slot_to_index: vec![None; records.len()],
            id_to_slot,
            dropped: Vec::new(),
        };
        tree.link(root_slot);

        debug!(
            records = records.len(),
            nodes = tree.nodes.len(),
            dropped = tree.dropped.len(),
            root = %records[root_slot].id,
            "built layout tree"
        );
        for reference in &tree.dropped {
            warn!(
                parent = %reference.parent,
                child = %reference.child,
                reason = ?reference.reason,
                "dropped child reference"
            );
        }

        Ok(tree)
    }

    fn resolve_root(
        records: &[NodeRecord],
        id_to_slot: &HashMap<&str, usize>,
        root_id: Option<&str>,
    ) -> Result<usize, LayoutError> {
        if let Some(id) = root_id {
            return id_to_slot
                .get(id)
                .copied()
                .ok_or_else(|| LayoutError::RootNotFound {
                    requested: Some(id.to_string()),
                });
        }

        let mut has_parent = vec![false; records.len()];
        for record in records {
            for child in &record.children {
                if *child == record.id {
                    continue;
                }
                if let Some(&slot) = id_to_slot.get(child.as_str()) {
                    has_parent[slot] = true;
                }
            }
        }

        let candidates: Vec<usize> = (0..records.len())
            .filter(|&slot| !has_parent[slot])
            .collect();
        match candidates.as_slice() {
            [] => Err(LayoutError::RootNotFound { requested: None }),
            [root] => Ok(*root),
            _ => Err(LayoutError::MultipleRootCandidates {
                candidates: candidates
                    .iter()
                    .map(|&slot| records[slot].id.clone())
                    .collect(),
            }),
        }
    }

    /// Depth-first linking from the root. A node reachable through several
    /// parents keeps the first one, which also terminates on cyclic input.
    fn link(&mut self, root_slot: usize) {
        let records = self.records;
        let mut visited: HashSet<usize> = HashSet::with_capacity(records.len());
        let mut stack: Vec<(usize, Option<NodeIndex>)> = vec![(root_slot, None)];

        while let Some((slot, parent)) = stack.pop() {
            if !visited.insert(slot) {
                if let Some(parent) = parent {
                    let parent_slot = self.nodes[parent.index()].slot;
                    self.dropped.push(DroppedReference {
                        parent: records[parent_slot].id.clone(),
                        child: records[slot].id.clone(),
                        reason: DropReason::AlreadyPlaced,
                    });
                }
                continue;
            }

            let index = NodeIndex(self.nodes.len() as u32);
            let number = match parent {
                Some(parent) => {
                    let siblings = &mut self.nodes[parent.index()].children;
                    siblings.push(index);
                    siblings.len() - 1
                }
                None => 0,
            };
            self.nodes.push(TreeNode {
                slot,
                parent,
                children: Vec::new(),
                number,
            });
            self.slot_to_index[slot] = Some(index);

            let record = &records[slot];
            let mut resolved = Vec::with_capacity(record.children.len());
            for child in &record.children {
                match self.id_to_slot.get(child.as_str()) {
                    Some(&child_slot) if child_slot == slot => {
                        self.dropped.push(DroppedReference {
                            parent: record.id.clone(),
                            child: child.clone(),
                            reason: DropReason::SelfReference,
                        });
                    }
                    Some(&child_slot) => resolved.push(child_slot),
                    None => {
                        self.dropped.push(DroppedReference {
                            parent: record.id.clone(),
                            child: child.clone(),
                            reason: DropReason::UnknownChild,
                        });
                    }
                }
            }

            // Reversed so the leftmost child is popped first.
            for &child_slot in resolved.iter().rev() {
                stack.push((child_slot, Some(index)));
            }
        }
    }

    /// The root index.
    #[inline]
    pub fn root(&self) -> NodeIndex {
        NodeIndex::ROOT
    }

    /// Number of nodes reachable from the root. Never zero.
    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Arena entry for `index`.
    #[inline]
    pub fn node(&self, index: NodeIndex) -> &TreeNode {
        &self.nodes[index.index()]
    }

    /// Resolved children of `index`, left to right.
    #[inline]
    pub fn children(&self, index: NodeIndex) -> &[NodeIndex] {
        &self.nodes[index.index()].children
    }

    /// Siblings of `index` including itself, left to right. The root is its
    /// own single sibling.
    pub fn siblings(&self, index: NodeIndex) -> &[NodeIndex] {
        match self.nodes[index.index()].parent {
            Some(parent) => &self.nodes[parent.index()].children,
            None => ROOT_SIBLINGS,
        }
    }

    /// The record a node was built from.
    #[inline]
    pub fn record(&self, index: NodeIndex) -> &'a NodeRecord {
        &self.records[self.nodes[index.index()].slot]
    }

    /// Id of a node.
    #[inline]
    pub fn id(&self, index: NodeIndex) -> &'a str {
        self.record(index).id.as_str()
    }

    /// Look a node up by id. None for unknown or unreachable ids.
    pub fn find(&self, id: &str) -> Option<NodeIndex> {
        self.id_to_slot
            .get(id)
            .and_then(|&slot| self.slot_to_index[slot])
    }

    /// All arena indices in preorder.
    pub fn preorder(&self) -> impl DoubleEndedIterator<Item = NodeIndex> + '_ {
        (0..self.nodes.len() as u32).map(NodeIndex)
    }

    /// Take ownership of the dropped-reference report.
    pub fn into_dropped_references(self) -> Vec<DroppedReference> {
        self.dropped
    }
}
