//! Subtree contours and the clearance between two sibling subtrees.
//!
//! A contour records, for every depth a subtree occupies, its leftmost or
//! rightmost column. Columns are read as `column + accumulated shift`, where
//! the shift sum starts at zero at the queried node, so contours are relative
//! to the subtree root's own frame. Two siblings share a frame, which makes
//! their contours directly comparable.

use super::tidy_tree::LayoutScratch;
use crate::tree::{NodeIndex, Tree};

/// Which edge of the subtree to trace.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    /// Minimum column per depth.
    Left,
    /// Maximum column per depth.
    Right,
}

/// Per-depth extreme columns of one subtree.
#[derive(Debug, Clone, PartialEq)]
pub struct Contour {
    /// Depth of the subtree root.
    base_depth: u32,
    /// Extreme column for `base_depth + i`.
    extremes: Vec<f64>,
}

impl Contour {
    /// Trace the `side` contour of the subtree rooted at `node`.
    pub fn of(tree: &Tree<'_>, scratch: &LayoutScratch, node: NodeIndex, side: Side) -> Self {
        let base_depth = scratch.depth(node);
        let mut extremes: Vec<f64> = Vec::new();

        // Preorder with the shift sum inherited from the parent.
        let mut stack: Vec<(NodeIndex, f64)> = vec![(node, 0.0)];
        while let Some((v, shift_sum)) = stack.pop() {
            let level = (scratch.depth(v) - base_depth) as usize;
            let x = scratch.column(v) + shift_sum;

            if level == extremes.len() {
                extremes.push(x);
            } else {
                let current = &mut extremes[level];
                *current = match side {
                    Side::Left => current.min(x),
                    Side::Right => current.max(x),
                };
            }

            let child_sum = shift_sum + scratch.shift(v);
            for &child in tree.children(v).iter().rev() {
                stack.push((child, child_sum));
            }
        }

        Self {
            base_depth,
            extremes,
        }
    }

    /// Deepest depth present in the subtree.
    #[inline]
    pub fn max_depth(&self) -> u32 {
        self.base_depth + self.extremes.len() as u32 - 1
    }

    /// Extreme column at `depth`, if the subtree reaches it.
    pub fn at(&self, depth: u32) -> Option<f64> {
        depth
            .checked_sub(self.base_depth)
            .and_then(|level| self.extremes.get(level as usize))
            .copied()
    }
}

/// Tightest gap between the subtree of `left` and the subtree of `right`.
///
/// Compares the right contour of `left` with the left contour of `right` at
/// every depth strictly below the siblings' own row that both subtrees
/// reach. Negative values mean overlap. Returns None when the subtrees share
/// no such depth.
pub fn minimum_distance(
    tree: &Tree<'_>,
    scratch: &LayoutScratch,
    left: NodeIndex,
    right: NodeIndex,
) -> Option<f64> {
    let left_edge = Contour::of(tree, scratch, left, Side::Right);
    let right_edge = Contour::of(tree, scratch, right, Side::Left);

    let deepest = left_edge.max_depth().min(right_edge.max_depth());
    let first = scratch.depth(right) + 1;

    (first..=deepest)
        .filter_map(|depth| Some(right_edge.at(depth)? - left_edge.at(depth)?))
        .reduce(f64::min)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::NodeRecord;

    fn records(shape: &[(&str, &[&str])]) -> Vec<NodeRecord> {
        shape
            .iter()
            .map(|(id, children)| NodeRecord::new(*id, children.iter().copied()))
            .collect()
    }

    /// Scratch with depths assigned and columns set by hand.
    fn scratch_with(
        tree: &Tree<'_>,
        columns: &[(&str, f64)],
        shifts: &[(&str, f64)],
    ) -> LayoutScratch {
        let mut scratch = LayoutScratch::new(tree.len());
        scratch.assign_rows(tree, 100.0);
        for &(id, column) in columns {
            scratch.set_column(tree.find(id).unwrap(), column);
        }
        for &(id, shift) in shifts {
            scratch.set_shift(tree.find(id).unwrap(), shift);
        }
        scratch
    }

    #[test]
    fn test_contours_apply_shift_below_the_node() {
        // r → a → [a1, a2]
        let input = records(&[("r", &["a"]), ("a", &["a1", "a2"]), ("a1", &[]), ("a2", &[])]);
        let tree = Tree::build(&input, None).unwrap();
        let scratch = scratch_with(
            &tree,
            &[("a", 75.0), ("a1", 0.0), ("a2", 50.0)],
            &[("a", 50.0)],
        );
        let a = tree.find("a").unwrap();

        let left = Contour::of(&tree, &scratch, a, Side::Left);
        assert_eq!(left.max_depth(), 2);
        assert_eq!(left.at(1), Some(75.0), "own column is not shifted");
        assert_eq!(left.at(2), Some(50.0));
        assert_eq!(left.at(0), None);
        assert_eq!(left.at(3), None);

        let right = Contour::of(&tree, &scratch, a, Side::Right);
        assert_eq!(right.at(1), Some(75.0));
        assert_eq!(right.at(2), Some(100.0));
    }

    #[test]
    fn test_shift_sums_accumulate_down_the_subtree() {
        // r → a → b → c
        let input = records(&[("r", &["a"]), ("a", &["b"]), ("b", &["c"]), ("c", &[])]);
        let tree = Tree::build(&input, None).unwrap();
        let scratch = scratch_with(
            &tree,
            &[("r", 0.0), ("a", 0.0), ("b", 0.0), ("c", 0.0)],
            &[("r", 10.0), ("a", 5.0), ("b", 1.0)],
        );

        let contour = Contour::of(&tree, &scratch, tree.root(), Side::Left);
        assert_eq!(contour.at(0), Some(0.0));
        assert_eq!(contour.at(1), Some(10.0));
        assert_eq!(contour.at(2), Some(15.0));
        assert_eq!(contour.at(3), Some(16.0));
    }

    #[test]
    fn test_minimum_distance_reports_overlap() {
        // r → [a, b], a → [a1, a2], b → [b1, b2]
        let input = records(&[
            ("r", &["a", "b"]),
            ("a", &["a1", "a2"]),
            ("b", &["b1", "b2"]),
            ("a1", &[]),
            ("a2", &[]),
            ("b1", &[]),
            ("b2", &[]),
        ]);
        let tree = Tree::build(&input, None).unwrap();
        let scratch = scratch_with(
            &tree,
            &[("a", 25.0), ("a1", 0.0), ("a2", 50.0), ("b", 75.0), ("b1", 0.0), ("b2", 50.0)],
            &[("b", 50.0)],
        );

        let a = tree.find("a").unwrap();
        let b = tree.find("b").unwrap();
        // a2 sits at 50, b1 at 0 + 50.
        assert_eq!(minimum_distance(&tree, &scratch, a, b), Some(0.0));
    }

    #[test]
    fn test_minimum_distance_takes_tightest_level() {
        // a reaches depth 3 and bulges right at depth 3.
        let input = records(&[
            ("r", &["a", "b"]),
            ("a", &["a1"]),
            ("a1", &["a11"]),
            ("a11", &[]),
            ("b", &["b1"]),
            ("b1", &["b11"]),
            ("b11", &[]),
        ]);
        let tree = Tree::build(&input, None).unwrap();
        let scratch = scratch_with(
            &tree,
            &[("a", 0.0), ("a1", 0.0), ("a11", 30.0), ("b", 100.0), ("b1", 100.0), ("b11", 100.0)],
            &[],
        );

        let a = tree.find("a").unwrap();
        let b = tree.find("b").unwrap();
        assert_eq!(minimum_distance(&tree, &scratch, a, b), Some(70.0));
    }

    #[test]
    fn test_minimum_distance_ignores_the_sibling_row() {
        let input = records(&[("r", &["a", "b"]), ("a", &[]), ("b", &["b1"]), ("b1", &[])]);
        let tree = Tree::build(&input, None).unwrap();
        let scratch = scratch_with(&tree, &[("a", 0.0), ("b", 0.0), ("b1", 0.0)], &[]);

        let a = tree.find("a").unwrap();
        let b = tree.find("b").unwrap();
        assert_eq!(
            minimum_distance(&tree, &scratch, a, b),
            None,
            "a leaf shares no depth below the sibling row"
        );
    }
}
