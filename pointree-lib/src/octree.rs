pub mod builder;
pub mod config;
pub mod cube;
pub mod iter;
pub mod node;
pub mod visit;

use builder::{validate, BuildError, Builder};
use config::OctreeConfig;
use cube::Cube;
use iter::Iter;
use node::OctreeNode;
use tracing::{debug, debug_span};

use crate::point::PointSet;

/// An octree that organizes a set of points by recursively subdividing a cube into octants.
///
/// The octree starts out empty and is populated using [`Octree::build`]. Once built, the tree is
/// immutable and can only be traversed, e.g. using [`Octree::iter`] or [`OctreeNode::visit`].
///
/// ```
/// # use glam::DVec3;
/// # use pointree_lib::octree::{config::OctreeConfig, cube::Cube, Octree};
/// let mut octree = Octree::new(OctreeConfig::new(6, 1));
/// let points = [DVec3::ZERO, DVec3::X, DVec3::Y, DVec3::new(1.0, 1.0, 0.0)];
/// let root = octree.build(points, Cube::new(DVec3::splat(0.5), 2.0))?;
/// assert!(root.is_parent());
/// assert_eq!(octree.iter().leaves().count(), 4);
/// # Ok::<(), pointree_lib::octree::builder::BuildError>(())
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Octree {
    config: OctreeConfig,
    /// [`None`] until the octree is built.
    root: Option<OctreeNode>,
}

impl Octree {
    /// Constructs a new empty [`Octree`] that will be built according to the given `config`.
    pub const fn new(config: OctreeConfig) -> Self {
        Self { config, root: None }
    }

    /// The parameters this octree is built with.
    pub fn config(&self) -> OctreeConfig {
        self.config
    }

    /// The root node, or [`None`] if the octree was not built yet.
    pub fn root(&self) -> Option<&OctreeNode> {
        self.root.as_ref()
    }

    /// Consumes the octree, returning its root node.
    pub fn into_root(self) -> Option<OctreeNode> {
        self.root
    }

    /// Builds the octree from the given `points` within the given root `cube`.
    ///
    /// Replaces any previously built tree.
    ///
    /// # Errors
    ///
    /// Returns a [`BuildError`] without touching the current tree if `cube` is invalid or does not
    /// contain all of the `points`.
    pub fn build(
        &mut self,
        points: impl Into<PointSet>,
        cube: Cube,
    ) -> Result<&OctreeNode, BuildError> {
        self.build_with(points.into(), cube, Builder::build)
    }

    /// Same as [`Octree::build`], but builds large subtrees in parallel.
    ///
    /// The resulting tree is identical to the one built by [`Octree::build`].
    ///
    /// # Errors
    ///
    /// See [`Octree::build`].
    pub fn build_par(
        &mut self,
        points: impl Into<PointSet>,
        cube: Cube,
    ) -> Result<&OctreeNode, BuildError> {
        self.build_with(points.into(), cube, Builder::build_par)
    }

    fn build_with(
        &mut self,
        points: PointSet,
        cube: Cube,
        build: impl FnOnce(Builder, PointSet, Cube, u8) -> OctreeNode,
    ) -> Result<&OctreeNode, BuildError> {
        let _span = debug_span!("octree::build", points = points.len()).entered();

        validate(&points, cube)?;
        let root = build(Builder::new(self.config), points, cube, 0);

        let stats = OctreeStats::of(&root);
        debug!(
            nodes = stats.nodes,
            leaves = stats.leaves,
            depth = stats.depth,
            largest_leaf = stats.largest_leaf,
            "built octree"
        );

        Ok(&*self.root.insert(root))
    }

    /// Returns an iterator that traverses all nodes depth-first.
    ///
    /// Yields nothing if the octree was not built yet.
    pub fn iter(&self) -> Iter<'_> {
        Iter::new(self.root.as_ref())
    }

    /// Returns statistics about the built tree, or [`None`] if the octree was not built yet.
    pub fn stats(&self) -> Option<OctreeStats> {
        self.root.as_ref().map(OctreeStats::of)
    }
}

/// Summary of the shape of a built octree.
#[derive(Clone, Copy, Debug, Default, Hash, PartialEq, Eq)]
pub struct OctreeStats {
    /// The total number of nodes, including the root.
    pub nodes: usize,
    /// The number of nodes without children.
    pub leaves: usize,
    /// The depth of the deepest node.
    pub depth: u8,
    /// The number of points across all leaves, i.e. the number of points the tree was built from.
    pub points: usize,
    /// The number of points in the leaf holding the most points.
    pub largest_leaf: usize,
}

impl OctreeStats {
    /// Collects statistics for the tree starting at the given `root`.
    pub fn of(root: &OctreeNode) -> Self {
        root.iter().fold(Self::default(), |mut stats, node| {
            stats.nodes += 1;
            stats.depth = stats.depth.max(node.depth());
            if node.is_leaf() {
                stats.leaves += 1;
                stats.points += node.points().len();
                stats.largest_leaf = stats.largest_leaf.max(node.points().len());
            }
            stats
        })
    }
}
