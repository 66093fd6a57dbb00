//! Binary partition tree
//!
//! Each node exclusively owns its children and its container; there are no
//! parent links. A node has either no children or exactly two, which the
//! `Option<Box<Split>>` layout makes unrepresentable otherwise.

use core::fmt;

use super::corridor::Corridor;
use super::rect::Rectangle;
use super::room::Room;

/// Identifier of a container, unique within one tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ContainerId(pub u32);

impl fmt::Display for ContainerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A rectangular region produced by space partitioning.
#[derive(Debug, Clone, PartialEq)]
pub struct Container {
    pub id: ContainerId,
    pub rect: Rectangle,
    pub room: Option<Room>,
    pub corridor: Option<Corridor>,
}

impl Container {
    pub fn new(id: ContainerId, rect: Rectangle) -> Self {
        Self {
            id,
            rect,
            room: None,
            corridor: None,
        }
    }
}

/// The two children of a split node.
#[derive(Debug, Clone, PartialEq)]
pub struct Split {
    /// Left (vertical split) or top (horizontal split) child
    pub left: TreeNode,
    /// Right or bottom child
    pub right: TreeNode,
}

/// A node of the partition tree.
#[derive(Debug, Clone, PartialEq)]
pub struct TreeNode {
    pub leaf: Container,
    pub split: Option<Box<Split>>,
}

impl TreeNode {
    /// A childless node
    pub fn new(leaf: Container) -> Self {
        Self { leaf, split: None }
    }

    /// A node with two children
    pub fn with_children(leaf: Container, left: TreeNode, right: TreeNode) -> Self {
        Self {
            leaf,
            split: Some(Box::new(Split { left, right })),
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.split.is_none()
    }

    pub fn left(&self) -> Option<&TreeNode> {
        self.split.as_deref().map(|s| &s.left)
    }

    pub fn right(&self) -> Option<&TreeNode> {
        self.split.as_deref().map(|s| &s.right)
    }

    /// Bottom-most containers, left subtree first.
    pub fn leaves(&self) -> Vec<&Container> {
        let mut out = Vec::new();
        self.collect_leaves(&mut out);
        out
    }

    fn collect_leaves<'a>(&'a self, out: &mut Vec<&'a Container>) {
        match self.split.as_deref() {
            Some(split) => {
                split.left.collect_leaves(out);
                split.right.collect_leaves(out);
            }
            None => out.push(&self.leaf),
        }
    }

    /// Mutable bottom-most containers, in the same order as [`TreeNode::leaves`].
    pub fn leaves_mut(&mut self) -> Vec<&mut Container> {
        let mut out = Vec::new();
        self.collect_leaves_mut(&mut out);
        out
    }

    fn collect_leaves_mut<'a>(&'a mut self, out: &mut Vec<&'a mut Container>) {
        match self.split.as_deref_mut() {
            Some(split) => {
                split.left.collect_leaves_mut(out);
                split.right.collect_leaves_mut(out);
            }
            None => out.push(&mut self.leaf),
        }
    }

    /// Pre-order walk over every node
    pub fn walk<'a>(&'a self, visit: &mut impl FnMut(&'a TreeNode)) {
        visit(self);
        if let Some(split) = self.split.as_deref() {
            split.left.walk(visit);
            split.right.walk(visit);
        }
    }

    /// All corridors, in pre-order
    pub fn corridors(&self) -> Vec<&Corridor> {
        let mut out = Vec::new();
        self.walk(&mut |node| {
            if let Some(corridor) = node.leaf.corridor.as_ref() {
                out.push(corridor);
            }
        });
        out
    }

    /// All placed rooms, in leaf order
    pub fn rooms(&self) -> Vec<&Room> {
        self.leaves().into_iter().filter_map(|c| c.room.as_ref()).collect()
    }

    /// Number of nodes in the tree
    pub fn node_count(&self) -> usize {
        let mut count = 0;
        self.walk(&mut |_| count += 1);
        count
    }

    /// Length of the longest root-to-leaf path, counting edges
    pub fn depth(&self) -> usize {
        match self.split.as_deref() {
            Some(split) => 1 + split.left.depth().max(split.right.depth()),
            None => 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf(id: u32, rect: Rectangle) -> TreeNode {
        TreeNode::new(Container::new(ContainerId(id), rect))
    }

    fn sample() -> TreeNode {
        let right = TreeNode::with_children(
            Container::new(ContainerId(2), Rectangle::new(5, 0, 5, 10)),
            leaf(3, Rectangle::new(5, 0, 5, 4)),
            leaf(4, Rectangle::new(5, 4, 5, 6)),
        );
        TreeNode::with_children(
            Container::new(ContainerId(0), Rectangle::new(0, 0, 10, 10)),
            leaf(1, Rectangle::new(0, 0, 5, 10)),
            right,
        )
    }

    #[test]
    fn test_leaves_order() {
        let tree = sample();
        let ids: Vec<_> = tree.leaves().iter().map(|c| c.id.0).collect();
        assert_eq!(ids, vec![1, 3, 4]);
    }

    #[test]
    fn test_single_node_is_its_own_leaf() {
        let tree = leaf(7, Rectangle::new(0, 0, 3, 3));
        assert!(tree.is_leaf());
        assert_eq!(tree.leaves().len(), 1);
        assert_eq!(tree.leaves()[0].id, ContainerId(7));
        assert_eq!(tree.depth(), 0);
    }

    #[test]
    fn test_counts() {
        let tree = sample();
        assert_eq!(tree.node_count(), 5);
        assert_eq!(tree.depth(), 2);
        assert!(tree.left().is_some_and(TreeNode::is_leaf));
        assert!(tree.right().is_some_and(|n| !n.is_leaf()));
    }

    #[test]
    fn test_leaves_mut_matches_leaves() {
        let mut tree = sample();
        let ids: Vec<_> = tree.leaves().iter().map(|c| c.id).collect();
        let mut_ids: Vec<_> = tree.leaves_mut().iter().map(|c| c.id).collect();
        assert_eq!(ids, mut_ids);
    }
}
