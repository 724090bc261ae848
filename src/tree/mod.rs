//! Tree data structures.
//!
//! Input records are turned into an arena-backed rooted tree. Nodes are
//! addressed by [`NodeIndex`], so parent and child navigation is O(1)
//! without shared ownership.

mod builder;
mod node;

pub use builder::{DropReason, DroppedReference, Tree};
pub use node::{NodeIndex, NodeRecord, TreeNode};
