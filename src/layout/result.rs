//! Layout output: per-node positions, subtree membership and tree edges.

use std::fmt::Write as _;

use serde::Serialize;
use serde_json::{Map, Value};

use super::orientation::{Orientation, Position};
use crate::tree::DroppedReference;

/// Abstract-space placement of a node.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct NodePlacement {
    /// Depth in the tree (root = 0).
    pub depth: u32,
    /// Row coordinate (`depth * minimalRowDistance`).
    pub row: f64,
    /// Resolved column coordinate.
    pub column: f64,
}

/// One output node, in the same order as the input records.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionedNode {
    /// Node id.
    pub id: String,
    /// Final screen position. None when the record is not reachable from
    /// the root.
    pub position: Option<Position>,
    /// Row/column placement. None when the record is not reachable.
    pub placement: Option<NodePlacement>,
    /// Flattened descendant ids, children first in declared order.
    pub subtree_ids: Vec<String>,
    /// Caller payload, passed through untouched.
    #[serde(skip_serializing_if = "Map::is_empty")]
    pub payload: Map<String, Value>,
}

/// A resolved parent → child link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TreeEdge {
    /// Edge id, `"{source}-{target}"`.
    pub id: String,
    /// Parent id.
    pub source: String,
    /// Child id.
    pub target: String,
}

impl TreeEdge {
    pub(crate) fn new(source: &str, target: &str) -> Self {
        Self {
            id: format!("{source}-{target}"),
            source: source.to_string(),
            target: target.to_string(),
        }
    }
}

/// Result of one layout run.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutResult {
    pub(crate) root: String,
    pub(crate) orientation: Orientation,
    pub(crate) nodes: Vec<PositionedNode>,
    pub(crate) edges: Vec<TreeEdge>,
    pub(crate) dropped_references: Vec<DroppedReference>,
    /// Output slots in tree preorder.
    #[serde(skip)]
    pub(crate) preorder: Vec<usize>,
}

impl LayoutResult {
    /// Id of the resolved root.
    #[inline]
    pub fn root(&self) -> &str {
        &self.root
    }

    /// Orientation the positions were projected with.
    #[inline]
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// All nodes, in input order.
    #[inline]
    pub fn nodes(&self) -> &[PositionedNode] {
        &self.nodes
    }

    /// Resolved parent → child links, grouped by parent in tree preorder.
    #[inline]
    pub fn edges(&self) -> &[TreeEdge] {
        &self.edges
    }

    /// Declared child references that were left out of the tree.
    #[inline]
    pub fn dropped_references(&self) -> &[DroppedReference] {
        &self.dropped_references
    }

    /// Look a node up by id.
    pub fn node(&self, id: &str) -> Option<&PositionedNode> {
        self.nodes.iter().find(|node| node.id == id)
    }

    /// Final position of a node, if it was placed.
    pub fn position(&self, id: &str) -> Option<Position> {
        self.node(id).and_then(|node| node.position)
    }

    /// Number of nodes that received a position.
    pub fn placed_count(&self) -> usize {
        self.preorder.len()
    }

    /// Bounding box of all placed nodes as `(min_x, min_y, max_x, max_y)`.
    pub fn bounds(&self) -> Option<(f64, f64, f64, f64)> {
        self.nodes
            .iter()
            .filter_map(|node| node.position)
            .fold(None, |bounds, p| {
                Some(match bounds {
                    None => (p.x, p.y, p.x, p.y),
                    Some((min_x, min_y, max_x, max_y)) => {
                        (min_x.min(p.x), min_y.min(p.y), max_x.max(p.x), max_y.max(p.y))
                    }
                })
            })
    }

    /// Interleaved `[x0, y0, x1, y1, ...]` in input order, for direct
    /// upload to a render buffer. Unplaced nodes get NaN.
    pub fn positions_flat(&self) -> Vec<f32> {
        let mut flat = Vec::with_capacity(self.nodes.len() * 2);
        for node in &self.nodes {
            match node.position {
                Some(p) => {
                    flat.push(p.x as f32);
                    flat.push(p.y as f32);
                }
                None => {
                    flat.push(f32::NAN);
                    flat.push(f32::NAN);
                }
            }
        }
        flat
    }

    /// Indented preorder listing of the placed tree, one `id (x, y)` per
    /// line.
    pub fn dump(&self) -> String {
        let mut out = String::new();
        for &slot in &self.preorder {
            let node = &self.nodes[slot];
            let (Some(position), Some(placement)) = (node.position, node.placement) else {
                continue;
            };
            let indent = placement.depth as usize * 2;
            let _ = writeln!(
                out,
                "{:indent$}{} ({}, {})",
                "",
                node.id,
                position.x,
                position.y,
                indent = indent
            );
        }
        out
    }
}
