//! Tidy tree layout: contour-based Reingold-Tilford placement.
//!
//! Lays out an ordered rooted tree so that nodes sit in bands by depth,
//! sibling subtrees keep a minimum gap at every depth they share, and parents
//! are centered over their children.
//!
//! # Algorithm Overview
//!
//! 1. **Row assignment (preorder):** `depth` and `row` from the parent.
//! 2. **Provisional placement (postorder):** each node gets a column relative
//!    to its left sibling plus a `shift` to apply lazily to its subtree.
//!    Overlaps against earlier siblings are found by comparing contours and
//!    pushed rightward; once a rightmost sibling that has children is placed
//!    the intermediate siblings are spread evenly. Leaves skip both steps.
//! 3. **Resolution (preorder):** accumulated shifts are folded into absolute
//!    columns and cleared.
//!
//! Contours are recomputed per sibling comparison, so placement is
//! O(n · depth) per sibling set in the worst case rather than linear.

use tracing::debug;

use super::contour::minimum_distance;
use super::options::LayoutOptions;
use crate::tree::{NodeIndex, Tree};

/// Per-node scratch state for one layout run, stored as parallel arrays
/// indexed by [`NodeIndex`].
#[derive(Debug, Clone)]
pub struct LayoutScratch {
    /// Depth in the tree (root = 0).
    depth: Vec<u32>,
    /// Row coordinate (depth band).
    row: Vec<f64>,
    /// Column coordinate; provisional until resolved.
    column: Vec<f64>,
    /// Pending horizontal shift for the node's descendants.
    shift: Vec<f64>,
}

impl LayoutScratch {
    /// Zeroed scratch for `len` nodes.
    pub fn new(len: usize) -> Self {
        Self {
            depth: vec![0; len],
            row: vec![0.0; len],
            column: vec![0.0; len],
            shift: vec![0.0; len],
        }
    }

    /// Number of nodes covered.
    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.depth.len()
    }

    #[inline]
    pub fn depth(&self, v: NodeIndex) -> u32 {
        self.depth[v.index()]
    }

    #[inline]
    pub fn row(&self, v: NodeIndex) -> f64 {
        self.row[v.index()]
    }

    #[inline]
    pub fn column(&self, v: NodeIndex) -> f64 {
        self.column[v.index()]
    }

    #[inline]
    pub fn shift(&self, v: NodeIndex) -> f64 {
        self.shift[v.index()]
    }

    #[inline]
    pub(crate) fn set_column(&mut self, v: NodeIndex, column: f64) {
        self.column[v.index()] = column;
    }

    #[inline]
    pub(crate) fn set_shift(&mut self, v: NodeIndex, shift: f64) {
        self.shift[v.index()] = shift;
    }

    /// Move a node and, lazily, its whole subtree to the right.
    #[inline]
    fn push_right(&mut self, v: NodeIndex, amount: f64) {
        self.column[v.index()] += amount;
        self.shift[v.index()] += amount;
    }

    /// Depth and row for every node in one preorder pass.
    ///
    /// The arena is stored in preorder, so every parent is visited before its
    /// children.
    pub fn assign_rows(&mut self, tree: &Tree<'_>, row_distance: f64) {
        for v in tree.preorder() {
            match tree.node(v).parent {
                None => {
                    self.depth[v.index()] = 0;
                    self.row[v.index()] = 0.0;
                }
                Some(parent) => {
                    self.depth[v.index()] = self.depth[parent.index()] + 1;
                    self.row[v.index()] = self.row[parent.index()] + row_distance;
                }
            }
        }
    }
}

/// The tidy tree layout engine.
#[derive(Debug, Clone)]
pub struct TidyTreeLayout {
    options: LayoutOptions,
}

impl TidyTreeLayout {
    /// Create a layout engine, rejecting invalid distances.
    pub fn new(options: LayoutOptions) -> Result<Self, crate::LayoutError> {
        options.validate()?;
        Ok(Self { options })
    }

    /// Create a layout engine with default options.
    pub fn with_defaults() -> Self {
        Self {
            options: LayoutOptions::default(),
        }
    }

    /// Run row assignment, provisional placement and resolution.
    ///
    /// The returned scratch holds final, absolute columns and all-zero shifts.
    pub fn place(&self, tree: &Tree<'_>) -> LayoutScratch {
        let mut scratch = LayoutScratch::new(tree.len());
        scratch.assign_rows(tree, self.options.minimal_row_distance);
        self.first_walk(tree, &mut scratch);
        Self::second_walk(tree, &mut scratch);

        debug!(
            nodes = tree.len(),
            column_distance = self.options.minimal_column_distance,
            row_distance = self.options.minimal_row_distance,
            "placed tidy tree"
        );
        scratch
    }

    /// Postorder over the whole tree, left subtrees before right ones.
    ///
    /// Uses an explicit stack so deep chains do not exhaust the call stack.
    fn first_walk(&self, tree: &Tree<'_>, scratch: &mut LayoutScratch) {
        let mut stack = vec![(tree.root(), false)];

        while let Some((v, expanded)) = stack.pop() {
            if expanded {
                self.place_provisionally(tree, scratch, v);
                continue;
            }
            stack.push((v, true));
            for &child in tree.children(v).iter().rev() {
                stack.push((child, false));
            }
        }
    }

    /// Provisional column and shift for `v`, whose children and left
    /// siblings are already placed.
    fn place_provisionally(&self, tree: &Tree<'_>, scratch: &mut LayoutScratch, v: NodeIndex) {
        let distance = self.options.minimal_column_distance;
        let node = tree.node(v);
        let siblings = tree.siblings(v);
        let previous = (!node.is_leftmost()).then(|| siblings[node.number - 1]);

        // Where the node would sit to be centered over its children.
        let center = match node.children.as_slice() {
            [] => None,
            [only] => Some(scratch.column(*only)),
            [first, .., last] => Some((scratch.column(*first) + scratch.column(*last)) / 2.0),
        };

        match (previous, center) {
            (None, None) => scratch.set_column(v, 0.0),
            (None, Some(center)) => scratch.set_column(v, center),
            (Some(previous), None) => {
                scratch.set_column(v, scratch.column(previous) + distance);
            }
            (Some(previous), Some(center)) => {
                let column = scratch.column(previous) + distance;
                scratch.set_column(v, column);
                scratch.set_shift(v, column - center);
            }
        }

        // A leaf is done once it sits next to its left sibling, even when it
        // is the rightmost one: equalization only follows a parent.
        if previous.is_none() || center.is_none() {
            return;
        }

        self.resolve_overlap(tree, scratch, v);

        if node.number == siblings.len() - 1 {
            self.equalize_spacing(tree, scratch, v);
        }
    }

    /// Push `v` right until it clears every earlier sibling's subtree.
    ///
    /// Moves only go rightward, so one pass over the earlier siblings is
    /// enough.
    fn resolve_overlap(&self, tree: &Tree<'_>, scratch: &mut LayoutScratch, v: NodeIndex) {
        let distance = self.options.minimal_column_distance;
        let number = tree.node(v).number;

        for &sibling in &tree.siblings(v)[..number] {
            if let Some(gap) = minimum_distance(tree, scratch, sibling, v) {
                if gap < distance {
                    scratch.push_right(v, distance - gap);
                }
            }
        }
    }

    /// Spread the siblings between the leftmost one and `v` (the rightmost).
    ///
    /// Each intermediate sibling is first pushed clear of its left neighbour,
    /// since the neighbour may itself have moved, then pushed out to at
    /// least the even interval `width / number`.
    fn equalize_spacing(&self, tree: &Tree<'_>, scratch: &mut LayoutScratch, v: NodeIndex) {
        let number = tree.node(v).number;
        if number <= 1 {
            return;
        }

        let distance = self.options.minimal_column_distance;
        let siblings = tree.siblings(v);
        let width = scratch.column(v) - scratch.column(siblings[0]);
        let desired_interval = width / number as f64;

        for i in 1..=number {
            let mid = siblings[i];
            let prev = siblings[i - 1];

            if i > 1 && !tree.node(mid).is_leaf() {
                if let Some(gap) = minimum_distance(tree, scratch, prev, mid) {
                    if gap < distance {
                        scratch.push_right(mid, distance - gap);
                    }
                }
            }

            let interval = scratch.column(mid) - scratch.column(prev);
            if interval < desired_interval {
                scratch.push_right(mid, desired_interval - interval);
            }
        }
    }

    /// Fold the shifts of all ancestors into every column, then clear them.
    ///
    /// The arena is stored in preorder, so a parent's accumulated offset is
    /// final before any of its children read it.
    fn second_walk(tree: &Tree<'_>, scratch: &mut LayoutScratch) {
        let mut offsets = vec![0.0; tree.len()];

        for v in tree.preorder() {
            let inherited = tree.node(v).parent.map_or(0.0, |p| offsets[p.index()]);
            scratch.column[v.index()] += inherited;
            offsets[v.index()] = inherited + scratch.shift(v);
            scratch.shift[v.index()] = 0.0;
        }
    }
}

impl Default for TidyTreeLayout {
    fn default() -> Self {
        Self::with_defaults()
    }
}
