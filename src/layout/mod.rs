//! Tidy tree layout pipeline.
//!
//! [`compute_layout`] runs every stage in order: tree building, row
//! assignment, provisional placement with contour-based overlap correction,
//! position resolution, subtree membership indexing and orientation. Each
//! call builds its own tree and scratch state and discards them afterwards.

pub mod contour;
pub mod options;
pub mod orientation;
pub mod result;
pub mod subtree;
pub mod tidy_tree;

pub use options::LayoutOptions;
pub use orientation::{Orientation, Position};
pub use result::{LayoutResult, NodePlacement, PositionedNode, TreeEdge};
pub use tidy_tree::TidyTreeLayout;

use tracing::debug;

use crate::error::LayoutError;
use crate::tree::{NodeRecord, Tree};

/// Lay out the tree described by `records`.
///
/// Fails before any geometry is computed when the options are invalid or no
/// unique root can be resolved. Records that are not reachable from the root
/// are returned without a position.
pub fn compute_layout(
    records: &[NodeRecord],
    options: &LayoutOptions,
) -> Result<LayoutResult, LayoutError> {
    let engine = TidyTreeLayout::new(options.clone())?;
    let tree = Tree::build(records, options.root_id.as_deref())?;

    let scratch = engine.place(&tree);
    let mut subtrees = subtree::subtree_ids(&tree);
    let orientation = Orientation::from_horizontal(options.horizontal);

    let mut nodes: Vec<PositionedNode> = records
        .iter()
        .map(|record| PositionedNode {
            id: record.id.clone(),
            position: None,
            placement: None,
            subtree_ids: Vec::new(),
            payload: record.payload.clone(),
        })
        .collect();

    let mut preorder = Vec::with_capacity(tree.len());
    let mut edges = Vec::with_capacity(tree.len().saturating_sub(1));
    for v in tree.preorder() {
        let slot = tree.node(v).slot;
        let (row, column) = (scratch.row(v), scratch.column(v));

        let node = &mut nodes[slot];
        node.position = Some(orientation.project(row, column));
        node.placement = Some(NodePlacement {
            depth: scratch.depth(v),
            row,
            column,
        });
        node.subtree_ids = std::mem::take(&mut subtrees[v.index()]);
        preorder.push(slot);

        for &child in tree.children(v) {
            edges.push(TreeEdge::new(tree.id(v), tree.id(child)));
        }
    }

    debug!(
        placed = preorder.len(),
        unplaced = records.len() - preorder.len(),
        ?orientation,
        "computed tree layout"
    );

    Ok(LayoutResult {
        root: tree.id(tree.root()).to_string(),
        orientation,
        nodes,
        edges,
        preorder,
        dropped_references: tree.into_dropped_references(),
    })
}
