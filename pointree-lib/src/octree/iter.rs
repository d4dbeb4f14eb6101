use std::iter::FusedIterator;

use super::node::OctreeNode;

/// An iterator that traverses the nodes of an octree depth-first in pre-order.
///
/// Each parent is yielded before its children, which are in turn traversed in order of
/// [`Octant::code`](crate::math_enums::Octant::code).
#[derive(Clone, Debug)]
pub struct Iter<'a> {
    /// Nodes that still have to be yielded, the next one at the end.
    stack: Vec<&'a OctreeNode>,
}

impl<'a> Iter<'a> {
    pub(crate) fn new(root: Option<&'a OctreeNode>) -> Self {
        Self {
            stack: root.into_iter().collect(),
        }
    }

    /// Only yields nodes without children.
    pub fn leaves(self) -> impl FusedIterator<Item = &'a OctreeNode> {
        self.filter(|node| node.is_leaf())
    }

    /// Only yields nodes with at least one child.
    pub fn parents(self) -> impl FusedIterator<Item = &'a OctreeNode> {
        self.filter(|node| node.is_parent())
    }
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a OctreeNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        // reversed, so that the lowest octant ends up on top
        self.stack
            .extend(node.children().rev().map(|(_, child)| child));
        Some(node)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.stack.len(), None)
    }
}

impl FusedIterator for Iter<'_> {}
