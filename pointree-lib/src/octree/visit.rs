use std::ops::ControlFlow;

use super::node::OctreeNode;

/// Contains callbacks for octree traversal using [`OctreeNode::visit`].
///
/// - [`OctreeVisitor::leaf`] is called for nodes without children.
/// - [`OctreeVisitor::parent`] is called for nodes with children.
///
/// This is the read-only interface meant for consumers such as renderers, which e.g. draw one
/// wireframe cube per node and one glyph per point.
pub trait OctreeVisitor {
    /// The type within the [`ControlFlow::Break`] used to break visitation.
    type Break;

    /// Called for nodes without children.
    fn leaf(&mut self, node: &OctreeNode) -> ControlFlow<Self::Break>;

    /// Called for nodes with children.
    ///
    /// Return [`VisitNode::Enter`] to visit its children, resulting in further callbacks.
    fn parent(&mut self, node: &OctreeNode) -> ControlFlow<Self::Break, VisitNode>;
}

/// Octree control flow for nodes that can be entered.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub enum VisitNode {
    /// Skips over this node without entering it.
    Skip,
    /// Enters this node, causing additional calls on the visitor.
    Enter,
}

impl VisitNode {
    pub fn is_skip(&self) -> bool {
        matches!(self, Self::Skip)
    }

    pub fn is_enter(&self) -> bool {
        matches!(self, Self::Enter)
    }
}
