use std::ops::ControlFlow;

use enum_map::EnumMap;

use super::{
    cube::Cube,
    iter::Iter,
    visit::{OctreeVisitor, VisitNode},
};
use crate::{
    math_enums::{Octant, Octants},
    point::{Point, PointSet},
};

/// The child slots of a subdivided [`OctreeNode`], one per [`Octant`].
///
/// Octants that did not receive any points are [`None`].
pub type Children = EnumMap<Octant, Option<OctreeNode>>;

/// A node within an octree covering a cubic region of space.
///
/// Every node holds all points that fell into its region while building, regardless of whether it
/// is a leaf or not. Points of a parent are distributed among its children, so across all leaves,
/// every point is stored exactly once.
#[derive(Clone, Debug, PartialEq)]
pub struct OctreeNode {
    /// The region covered by this node.
    cube: Cube,
    /// The number of subdivisions from the root to this node.
    depth: u8,
    /// All points within [`Self::cube`].
    points: PointSet,
    /// [`None`] for leaf nodes.
    ///
    /// Never contains only empty slots.
    children: Option<Box<Children>>,
}

impl OctreeNode {
    /// Constructs a leaf node.
    pub(crate) fn leaf(cube: Cube, depth: u8, points: PointSet) -> Self {
        Self {
            cube,
            depth,
            points,
            children: None,
        }
    }

    /// Constructs a parent node.
    ///
    /// `children` must contain at least one node.
    pub(crate) fn parent(cube: Cube, depth: u8, points: PointSet, children: Children) -> Self {
        debug_assert!(children.values().any(Option::is_some));
        Self {
            cube,
            depth,
            points,
            children: Some(Box::new(children)),
        }
    }

    /// The region covered by this node.
    pub fn cube(&self) -> Cube {
        self.cube
    }

    /// The centroid of the region covered by this node.
    pub fn center(&self) -> Point {
        self.cube.center()
    }

    /// The edge length of the region covered by this node.
    pub fn size(&self) -> f64 {
        self.cube.size()
    }

    /// The number of subdivisions from the root to this node.
    pub fn depth(&self) -> u8 {
        self.depth
    }

    /// All points within the region of this node.
    pub fn points(&self) -> &PointSet {
        &self.points
    }

    /// Whether this node has no children.
    pub fn is_leaf(&self) -> bool {
        self.children.is_none()
    }

    /// Whether this node has at least one child.
    pub fn is_parent(&self) -> bool {
        self.children.is_some()
    }

    /// Returns the child in the given `octant`.
    ///
    /// Returns [`None`] for leaf nodes and for octants that did not receive any points.
    pub fn child(&self, octant: Octant) -> Option<&OctreeNode> {
        self.children.as_ref()?[octant].as_ref()
    }

    /// Returns all present children along with their octant, ordered by [`Octant::code`].
    pub fn children(&self) -> impl DoubleEndedIterator<Item = (Octant, &OctreeNode)> {
        self.children
            .iter()
            .flat_map(|children| children.iter())
            .filter_map(|(octant, child)| Some((octant, child.as_ref()?)))
    }

    /// Returns the set of octants that hold a child.
    pub fn child_octants(&self) -> Octants {
        self.children().map(|(octant, _)| octant).collect()
    }

    /// Returns an iterator that traverses this node and all of its descendants depth-first.
    pub fn iter(&self) -> Iter<'_> {
        Iter::new(Some(self))
    }

    /// Recursively visits this node and its descendants depth-first using the given `visitor`.
    ///
    /// Children are visited in order of [`Octant::code`]. Stops as soon as the `visitor` breaks.
    pub fn visit<V: OctreeVisitor>(&self, visitor: &mut V) -> ControlFlow<V::Break> {
        if self.is_leaf() {
            return visitor.leaf(self);
        }

        match visitor.parent(self)? {
            VisitNode::Skip => ControlFlow::Continue(()),
            VisitNode::Enter => {
                for (_, child) in self.children() {
                    child.visit(visitor)?;
                }
                ControlFlow::Continue(())
            }
        }
    }
}
