use glam::DVec3;

use crate::{math_enums::Octant, point::Point};

/// An axis-aligned cube in 3D-space, given by its center and edge length.
///
/// The cube is closed, i.e. points lying exactly on its faces are [contained](Self::contains).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Cube {
    /// The centroid of the cube.
    center: Point,
    /// The edge length of the cube.
    size: f64,
}

impl Cube {
    /// Constructs a [`Cube`] with the given `center` and edge length `size`.
    ///
    /// No validation happens here; see [`Self::is_valid`].
    pub const fn new(center: Point, size: f64) -> Self {
        Self { center, size }
    }

    /// Constructs a [`Cube`] spanning from `min` to `min + size` along every axis.
    pub fn from_min(min: Point, size: f64) -> Self {
        Self::new(min + DVec3::splat(size * 0.5), size)
    }

    /// Whether the center is finite and the size is finite and strictly positive.
    pub fn is_valid(self) -> bool {
        self.center.is_finite() && self.size.is_finite() && self.size > 0.0
    }

    /// The centroid of the cube.
    pub const fn center(self) -> Point {
        self.center
    }

    /// The edge length of the cube.
    pub const fn size(self) -> f64 {
        self.size
    }

    /// Half the edge length of the cube.
    pub fn half_size(self) -> f64 {
        self.size * 0.5
    }

    /// The lower corner (inclusive).
    pub fn min(self) -> Point {
        self.center - DVec3::splat(self.half_size())
    }

    /// The upper corner (inclusive).
    pub fn max(self) -> Point {
        self.center + DVec3::splat(self.half_size())
    }

    /// Whether the specified `point` lies within the cube, including its faces.
    pub fn contains(self, point: Point) -> bool {
        point.cmpge(self.min()).all() && point.cmple(self.max()).all()
    }

    /// Returns the octant of this cube that `point` should be assigned to.
    ///
    /// See [`Octant::classify`] for how ties are resolved.
    pub fn octant_of(self, point: Point) -> Octant {
        Octant::classify(point, self.center)
    }

    /// Returns the cube covering the given `octant` of this cube.
    ///
    /// The child has half the size and its center is offset by a quarter of this cube's size along
    /// every axis.
    pub fn child(self, octant: Octant) -> Self {
        let child_size = self.half_size();
        Self::new(child_center(self.center, octant, child_size), child_size)
    }

    /// Splits the cube into its eight octants, ordered by [`Octant::code`].
    pub fn split_into_octants(self) -> [Self; 8] {
        Octant::ALL.map(|octant| self.child(octant))
    }
}

/// Calculates the center of a child cube of size `child_size` in the given `octant`.
///
/// Each axis is offset by half the `child_size`, positive if `octant` lies on the positive side
/// along that axis and negative otherwise.
pub fn child_center(parent_center: Point, octant: Octant, child_size: f64) -> Point {
    parent_center + octant.signs() * (child_size * 0.5)
}
