/// The parameters that decide when building an octree stops subdividing.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub struct OctreeConfig {
    /// Nodes at this depth are never subdivided.
    ///
    /// The root has a depth of `0`, so a `max_depth` of `0` always results in a single leaf.
    pub max_depth: u8,
    /// Nodes holding this many points or fewer are never subdivided.
    pub min_points: usize,
}

impl OctreeConfig {
    /// The maximum depth used by [`OctreeConfig::default`].
    pub const DEFAULT_MAX_DEPTH: u8 = 6;

    /// The minimum number of points used by [`OctreeConfig::default`].
    pub const DEFAULT_MIN_POINTS: usize = 5;

    pub const fn new(max_depth: u8, min_points: usize) -> Self {
        Self {
            max_depth,
            min_points,
        }
    }

    pub const fn with_max_depth(mut self, max_depth: u8) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub const fn with_min_points(mut self, min_points: usize) -> Self {
        self.min_points = min_points;
        self
    }

    /// Whether a node at the given `depth` holding `point_count` points must stay a leaf.
    ///
    /// This does not take into account whether splitting would actually separate the points.
    pub const fn forces_leaf(self, depth: u8, point_count: usize) -> bool {
        depth >= self.max_depth || point_count <= self.min_points
    }
}

impl Default for OctreeConfig {
    fn default() -> Self {
        Self::new(Self::DEFAULT_MAX_DEPTH, Self::DEFAULT_MIN_POINTS)
    }
}
