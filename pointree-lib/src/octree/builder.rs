use enum_map::EnumMap;
use itertools::zip_eq;
use thiserror::Error;
use tracing::trace;

use super::{
    config::OctreeConfig,
    cube::Cube,
    node::{Children, OctreeNode},
};
use crate::{
    math_enums::Octant,
    point::{Point, PointSet},
};

/// Nodes with fewer points than this are built sequentially by [`Builder::build_par`].
pub const PARALLEL_MIN_POINTS: usize = 1024;

/// The points of a node distributed among its octants.
pub type Buckets = EnumMap<Octant, PointSet>;

/// Errors for building an octree from an invalid root cube or invalid points.
///
/// These are detected before any subdivision happens.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum BuildError {
    #[error("cube size must be finite and positive, got {size}")]
    InvalidSize { size: f64 },
    #[error("cube center must be finite, got {center}")]
    NonFiniteCenter { center: Point },
    #[error("point {index} is not finite: {point}")]
    NonFinitePoint { index: usize, point: Point },
    #[error("point {index} at {point} lies outside the root cube")]
    PointOutsideCube { index: usize, point: Point },
}

/// Checks that `cube` is valid and encloses all `points`.
pub fn validate(points: &[Point], cube: Cube) -> Result<(), BuildError> {
    if !cube.size().is_finite() || cube.size() <= 0.0 {
        return Err(BuildError::InvalidSize { size: cube.size() });
    }
    if !cube.center().is_finite() {
        return Err(BuildError::NonFiniteCenter {
            center: cube.center(),
        });
    }
    for (index, &point) in points.iter().enumerate() {
        if !point.is_finite() {
            return Err(BuildError::NonFinitePoint { index, point });
        }
        if !cube.contains(point) {
            return Err(BuildError::PointOutsideCube { index, point });
        }
    }
    Ok(())
}

/// Distributes `points` into one bucket per octant around `center`.
pub fn partition(points: &[Point], center: Point) -> Buckets {
    let mut buckets = Buckets::default();
    for &point in points {
        buckets[Octant::classify(point, center)].push(point);
    }
    buckets
}

/// Whether splitting `total` points into `buckets` actually separates them.
///
/// This is the case if any non-empty bucket holds fewer than all points. Otherwise all points ended
/// up in the same octant and subdividing would just repeat the same partition one level deeper.
pub fn makes_progress(buckets: &Buckets, total: usize) -> bool {
    buckets
        .values()
        .any(|bucket| !bucket.is_empty() && bucket.len() < total)
}

/// Recursively builds [`OctreeNode`]s according to an [`OctreeConfig`].
///
/// Unlike [`Octree::build`](super::Octree::build), the builder does not validate its input. Points
/// outside the given cube are still assigned to the closest octant along each axis.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Builder {
    config: OctreeConfig,
}

impl Builder {
    pub const fn new(config: OctreeConfig) -> Self {
        Self { config }
    }

    /// Builds a node at the given `depth` covering `cube` from the given `points`.
    ///
    /// The node is subdivided until the [`OctreeConfig`] forces a leaf or until the points stop
    /// separating. Only octants that receive points are turned into children.
    pub fn build(self, points: PointSet, cube: Cube, depth: u8) -> OctreeNode {
        match self.split(&points, cube, depth) {
            None => OctreeNode::leaf(cube, depth, points),
            Some(buckets) => {
                let children = buckets.map(|octant, bucket| {
                    (!bucket.is_empty()).then(|| self.build(bucket, cube.child(octant), depth + 1))
                });
                OctreeNode::parent(cube, depth, points, children)
            }
        }
    }

    /// Like [`Self::build`], but builds the children of large nodes in parallel.
    ///
    /// The resulting tree is exactly the same as the one returned by [`Self::build`].
    pub fn build_par(self, points: PointSet, cube: Cube, depth: u8) -> OctreeNode {
        if points.len() < PARALLEL_MIN_POINTS {
            return self.build(points, cube, depth);
        }

        match self.split(&points, cube, depth) {
            None => OctreeNode::leaf(cube, depth, points),
            Some(buckets) => {
                let mut children = Children::default();
                rayon::scope(|scope| {
                    for ((octant, slot), (_, bucket)) in zip_eq(children.iter_mut(), buckets) {
                        if !bucket.is_empty() {
                            scope.spawn(move |_| {
                                *slot = Some(self.build_par(bucket, cube.child(octant), depth + 1));
                            });
                        }
                    }
                });
                OctreeNode::parent(cube, depth, points, children)
            }
        }
    }

    /// Returns the buckets for the children of a node, or [`None`] if the node must be a leaf.
    fn split(self, points: &PointSet, cube: Cube, depth: u8) -> Option<Buckets> {
        if self.config.forces_leaf(depth, points.len()) {
            return None;
        }

        let buckets = partition(points, cube.center());
        if makes_progress(&buckets, points.len()) {
            Some(buckets)
        } else {
            trace!(
                depth,
                points = points.len(),
                "points do not separate, keeping node as leaf"
            );
            None
        }
    }
}
