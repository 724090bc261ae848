//! Node types and related structures.
//!
//! Two views of a node exist:
//! - [`NodeRecord`]: the flat input record (id, declared child ids, opaque
//!   payload) as supplied by the data provider.
//! - [`TreeNode`]: the arena entry built from a record, holding resolved
//!   parent and child links as [`NodeIndex`] values.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Arena index of a node within one built [`Tree`](super::Tree).
///
/// Indices are assigned in preorder starting from the root, so the root is
/// always `NodeIndex(0)`. They are only meaningful for the tree that
/// produced them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeIndex(pub u32);

impl NodeIndex {
    /// The root of every built tree.
    pub const ROOT: NodeIndex = NodeIndex(0);

    /// Position in the arena and the scratch arrays.
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for NodeIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Node({})", self.0)
    }
}

/// One input node as supplied by the caller.
///
/// Fields other than `id` and `children` are kept verbatim in `payload` and
/// handed back with the layout result.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct NodeRecord {
    /// Unique node id.
    pub id: String,
    /// Declared child ids, in display order (left to right).
    #[serde(default)]
    pub children: Vec<String>,
    /// Opaque caller data.
    #[serde(flatten)]
    pub payload: Map<String, Value>,
}

impl NodeRecord {
    /// Create a record with the given id and child ids and no payload.
    pub fn new<I, S>(id: impl Into<String>, children: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            id: id.into(),
            children: children.into_iter().map(Into::into).collect(),
            payload: Map::new(),
        }
    }

    /// Create a record with no children.
    pub fn leaf(id: impl Into<String>) -> Self {
        Self::new(id, std::iter::empty::<String>())
    }

    /// Attach one payload field.
    pub fn with_payload(mut self, key: impl Into<String>, value: Value) -> Self {
        self.payload.insert(key.into(), value);
        self
    }
}

/// Arena entry for one node of a built tree.
#[derive(Debug, Clone)]
pub struct TreeNode {
    /// Position of the originating record in the input slice.
    pub slot: usize,
    /// Parent arena index (None for the root).
    pub parent: Option<NodeIndex>,
    /// Resolved children, in declared order.
    pub children: Vec<NodeIndex>,
    /// Left-to-right position among the parent's resolved children.
    pub number: usize,
}

impl TreeNode {
    /// True when the node has no resolved children.
    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// True for the root and for a first child.
    #[inline]
    pub fn is_leftmost(&self) -> bool {
        self.number == 0
    }
}
