use std::ops::Deref;

use glam::DVec3;
use rand::Rng;
use rand_distr::{Distribution, Normal};
use thiserror::Error;

use crate::octree::cube::Cube;

/// A single point in 3D-space.
pub type Point = DVec3;

/// An unordered collection of [`Point`]s.
///
/// This is both the input for building an octree and the payload stored in each of its nodes.
///
/// Dereferences to a slice of points, so all the usual slice methods are available.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PointSet(Vec<Point>);

impl PointSet {
    /// Constructs a new empty [`PointSet`].
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Appends a point.
    pub fn push(&mut self, point: Point) {
        self.0.push(point);
    }

    /// Returns the points as a slice.
    pub fn as_slice(&self) -> &[Point] {
        &self.0
    }

    /// Returns the component-wise minimum and maximum of all points.
    ///
    /// Returns [`None`] if the set is empty.
    pub fn bounds(&self) -> Option<(Point, Point)> {
        let (&first, rest) = self.0.split_first()?;
        Some(
            rest.iter()
                .fold((first, first), |(min, max), &point| {
                    (min.min(point), max.max(point))
                }),
        )
    }

    /// Returns the smallest [`Cube`] centered on the [bounds](Self::bounds) that encloses all
    /// points.
    ///
    /// If all points coincide (or only a single point exists), the cube has a size of `1.0` to
    /// keep it valid.
    ///
    /// Returns [`None`] if the set is empty.
    pub fn bounding_cube(&self) -> Option<Cube> {
        let (min, max) = self.bounds()?;
        let size = (max - min).max_element();
        Some(Cube::new(
            (min + max) * 0.5,
            if size > 0.0 { size } else { 1.0 },
        ))
    }

    /// Generates `count` points uniformly distributed within the given `cube`.
    ///
    /// # Errors
    ///
    /// Returns [`GenerateError::InvalidCube`] if the cube is not [valid](Cube::is_valid).
    pub fn uniform<R: Rng + ?Sized>(
        rng: &mut R,
        cube: Cube,
        count: usize,
    ) -> Result<Self, GenerateError> {
        if !cube.is_valid() {
            return Err(GenerateError::InvalidCube { cube });
        }
        let (min, max) = (cube.min(), cube.max());
        Ok((0..count)
            .map(|_| {
                Point::new(
                    rng.random_range(min.x..=max.x),
                    rng.random_range(min.y..=max.y),
                    rng.random_range(min.z..=max.z),
                )
            })
            .collect())
    }

    /// Generates `per_cluster` points around each of the given `centers`.
    ///
    /// Every coordinate is offset from its cluster center by a normally distributed amount with
    /// the given standard deviation. Clusters are generated in the order of `centers`.
    ///
    /// # Errors
    ///
    /// Returns [`GenerateError::InvalidStdDev`] if `std_dev` is negative or not finite.
    pub fn clustered<R: Rng + ?Sized>(
        rng: &mut R,
        centers: &[Point],
        per_cluster: usize,
        std_dev: f64,
    ) -> Result<Self, GenerateError> {
        let jitter = Normal::new(0.0, std_dev)
            .ok()
            .filter(|_| std_dev.is_finite())
            .ok_or(GenerateError::InvalidStdDev { std_dev })?;
        Ok(centers
            .iter()
            .flat_map(|&center| std::iter::repeat_n(center, per_cluster))
            .map(|center| {
                center
                    + Point::new(
                        jitter.sample(rng),
                        jitter.sample(rng),
                        jitter.sample(rng),
                    )
            })
            .collect())
    }
}

/// Errors for generating random points from invalid parameters.
#[derive(Clone, Copy, Debug, PartialEq, Error)]
pub enum GenerateError {
    #[error("standard deviation must be finite and non-negative, got {std_dev}")]
    InvalidStdDev { std_dev: f64 },
    #[error("cube must have a finite center and a finite positive size, got {cube:?}")]
    InvalidCube { cube: Cube },
}

impl Deref for PointSet {
    type Target = [Point];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<Vec<Point>> for PointSet {
    fn from(points: Vec<Point>) -> Self {
        Self(points)
    }
}

impl<const N: usize> From<[Point; N]> for PointSet {
    fn from(points: [Point; N]) -> Self {
        Self(points.into())
    }
}

impl From<PointSet> for Vec<Point> {
    fn from(points: PointSet) -> Self {
        points.0
    }
}

impl FromIterator<Point> for PointSet {
    fn from_iter<I: IntoIterator<Item = Point>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for PointSet {
    type Item = Point;
    type IntoIter = std::vec::IntoIter<Point>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a PointSet {
    type Item = &'a Point;
    type IntoIter = std::slice::Iter<'a, Point>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, SeedableRng};

    use super::*;

    #[test]
    fn bounds() {
        assert_eq!(PointSet::new().bounds(), None);

        let points = PointSet::from([
            Point::new(1.0, -2.0, 0.0),
            Point::new(-1.0, 3.0, 0.5),
            Point::new(0.0, 0.0, -4.0),
        ]);
        assert_eq!(
            points.bounds(),
            Some((Point::new(-1.0, -2.0, -4.0), Point::new(1.0, 3.0, 0.5)))
        );
    }

    #[test]
    fn bounding_cube_encloses_all_points() {
        let points = PointSet::from([
            Point::new(1.0, -2.0, 0.0),
            Point::new(-1.0, 3.0, 0.5),
            Point::new(0.0, 0.0, -4.0),
        ]);
        let cube = points.bounding_cube().unwrap();
        assert_eq!(cube.size(), 5.0);
        assert_eq!(cube.center(), Point::new(0.0, 0.5, -1.75));
        assert!(points.iter().all(|&point| cube.contains(point)));
    }

    #[test]
    fn bounding_cube_of_single_point() {
        let points = PointSet::from([Point::splat(2.0)]);
        assert_eq!(
            points.bounding_cube(),
            Some(Cube::new(Point::splat(2.0), 1.0))
        );
    }

    #[test]
    fn uniform_stays_within_cube() {
        let mut rng = StdRng::seed_from_u64(7);
        let cube = Cube::new(Point::new(1.0, 2.0, 3.0), 4.0);
        let points = PointSet::uniform(&mut rng, cube, 500).unwrap();
        assert_eq!(points.len(), 500);
        assert!(points.iter().all(|&point| cube.contains(point)));
    }

    #[test]
    fn uniform_rejects_invalid_cube() {
        let mut rng = StdRng::seed_from_u64(7);
        for cube in [
            Cube::new(Point::ZERO, f64::NAN),
            Cube::new(Point::ZERO, f64::INFINITY),
            Cube::new(Point::ZERO, -1.0),
            Cube::new(Point::new(f64::INFINITY, 0.0, 0.0), 1.0),
        ] {
            assert!(matches!(
                PointSet::uniform(&mut rng, cube, 10),
                Err(GenerateError::InvalidCube { .. })
            ));
        }
    }

    #[test]
    fn clustered_is_deterministic_for_a_seed() {
        let centers = [Point::splat(-3.0), Point::splat(3.0)];
        let a = PointSet::clustered(&mut StdRng::seed_from_u64(42), &centers, 100, 1.0).unwrap();
        let b = PointSet::clustered(&mut StdRng::seed_from_u64(42), &centers, 100, 1.0).unwrap();
        let c = PointSet::clustered(&mut StdRng::seed_from_u64(43), &centers, 100, 1.0).unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(a.len(), 200);
    }

    #[test]
    fn clustered_points_follow_the_standard_deviation() {
        let centers = [Point::splat(-3.0), Point::splat(3.0)];
        let std_dev = 0.5;
        let points =
            PointSet::clustered(&mut StdRng::seed_from_u64(1), &centers, 2000, std_dev).unwrap();
        for (cluster, &center) in points.chunks(2000).zip(&centers) {
            let count = cluster.len() as f64;
            let mean = cluster.iter().sum::<Point>() / count;
            let variance = cluster
                .iter()
                .map(|&point| (point - mean) * (point - mean))
                .sum::<Point>()
                / count;
            let sample_std_dev = variance.powf(0.5);

            assert!((mean - center).abs().max_element() < 0.1);
            assert!(sample_std_dev.cmpgt(DVec3::splat(0.4)).all());
            assert!(sample_std_dev.cmplt(DVec3::splat(0.6)).all());
        }
    }

    #[test]
    fn clustered_with_zero_std_dev_repeats_the_centers() {
        let centers = [Point::splat(-3.0), Point::splat(3.0)];
        let points = PointSet::clustered(&mut StdRng::seed_from_u64(1), &centers, 3, 0.0).unwrap();
        assert_eq!(&points[..3], &[centers[0]; 3]);
        assert_eq!(&points[3..], &[centers[1]; 3]);
    }

    #[test]
    fn clustered_rejects_invalid_std_dev() {
        let mut rng = StdRng::seed_from_u64(1);
        for std_dev in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY, -1.0] {
            assert!(matches!(
                PointSet::clustered(&mut rng, &[Point::ZERO], 10, std_dev),
                Err(GenerateError::InvalidStdDev { .. })
            ));
        }
    }
}
