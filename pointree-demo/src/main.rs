//! Point cloud octree demo.
//!
//! Scatters a few clusters of random points, builds an octree around them and prints what a
//! renderer would draw: one wireframe cube per node, styled by depth, and one glyph per point.

mod draw;

use anyhow::{Context, Result};
use clap::Parser;
use pointree_lib::{
    octree::{config::OctreeConfig, cube::Cube, Octree, OctreeStats},
    point::{Point, PointSet},
};
use rand::{rngs::StdRng, SeedableRng};
use tracing::info;
use tracing_subscriber::EnvFilter;

use draw::DrawList;

/// Centers of the generated point clusters.
const CLUSTER_CENTERS: [Point; 4] = [
    Point::new(-3.0, -3.0, -3.0),
    Point::new(3.0, 3.0, 3.0),
    Point::new(-3.0, 3.0, -3.0),
    Point::new(3.0, -3.0, 3.0),
];

/// Builds an octree over clustered random points.
#[derive(Parser, Debug)]
#[command(name = "pointree")]
#[command(about = "Builds an octree over clustered random points and prints its draw list")]
struct Args {
    /// Seed for the point generator.
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Nodes at this depth are never subdivided.
    #[arg(long, default_value_t = OctreeConfig::DEFAULT_MAX_DEPTH)]
    max_depth: u8,

    /// Nodes holding this many points or fewer are never subdivided.
    #[arg(long, default_value_t = 10)]
    min_points: usize,

    /// Number of points generated around each cluster center.
    #[arg(long, default_value_t = 250)]
    points_per_cluster: usize,

    /// Standard deviation of the offset of a point from its cluster center along each axis.
    #[arg(long, default_value_t = 1.0, value_parser = parse_std_dev)]
    std_dev: f64,

    /// Edge length of the root cube, centered on the origin.
    #[arg(long, default_value_t = 12.0)]
    size: f64,

    /// Build large subtrees in parallel.
    #[arg(long)]
    parallel: bool,

    /// Print every draw command.
    #[arg(long)]
    draw_list: bool,
}

/// Parses a standard deviation, which must be finite and non-negative.
fn parse_std_dev(arg: &str) -> Result<f64, String> {
    let std_dev = arg.parse::<f64>().map_err(|error| error.to_string())?;
    if std_dev.is_finite() && std_dev >= 0.0 {
        Ok(std_dev)
    } else {
        Err(format!("must be finite and non-negative, got {std_dev}"))
    }
}

/// Generates the clustered point cloud, clamping stray points onto the boundary of `cube`.
fn cluster_points(seed: u64, per_cluster: usize, std_dev: f64, cube: Cube) -> Result<PointSet> {
    let mut rng = StdRng::seed_from_u64(seed);
    let points = PointSet::clustered(&mut rng, &CLUSTER_CENTERS, per_cluster, std_dev)
        .context("Failed to generate point clusters")?;
    if !cube.is_valid() {
        // rejected by the build anyway
        return Ok(points);
    }
    let (min, max) = (cube.min(), cube.max());
    Ok(points
        .into_iter()
        .map(|point| point.clamp(min, max))
        .collect())
}

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let args = Args::parse();

    let cube = Cube::new(Point::ZERO, args.size);
    let points = cluster_points(args.seed, args.points_per_cluster, args.std_dev, cube)?;
    info!(points = points.len(), seed = args.seed, "generated point cloud");

    let config = OctreeConfig::new(args.max_depth, args.min_points);
    let mut octree = Octree::new(config);
    let root = if args.parallel {
        octree.build_par(points, cube)
    } else {
        octree.build(points, cube)
    }
    .context("Failed to build octree")?;

    let draw_list = DrawList::collect(root, config.max_depth);
    if args.draw_list {
        for command in draw_list.commands() {
            println!("{command}");
        }
    }

    let stats = OctreeStats::of(root);
    println!(
        "{} nodes ({} leaves), depth {}, {} points, largest leaf holds {}",
        stats.nodes, stats.leaves, stats.depth, stats.points, stats.largest_leaf
    );
    println!(
        "{} cubes and {} points to draw",
        draw_list.cube_count(),
        draw_list.point_count()
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn args_defaults() {
        let args = Args::parse_from(["pointree"]);
        assert_eq!(args.seed, 42);
        assert_eq!(args.max_depth, 6);
        assert_eq!(args.min_points, 10);
        assert_eq!(args.points_per_cluster, 250);
        assert_eq!(args.std_dev, 1.0);
        assert_eq!(args.size, 12.0);
        assert!(!args.parallel);
        assert!(!args.draw_list);
    }

    #[test]
    fn args_flags() {
        let args = Args::parse_from(["pointree", "--max-depth", "3", "--parallel", "--draw-list"]);
        assert_eq!(args.max_depth, 3);
        assert!(args.parallel);
        assert!(args.draw_list);
    }

    #[test]
    fn args_reject_invalid_std_dev() {
        for std_dev in ["NaN", "inf", "-inf", "-1", "wide"] {
            let result = Args::try_parse_from(["pointree", "--std-dev", std_dev]);
            assert!(result.is_err(), "{std_dev} should be rejected");
        }
        let args = Args::parse_from(["pointree", "--std-dev", "0"]);
        assert_eq!(args.std_dev, 0.0);
    }

    #[test]
    fn cluster_points_rejects_invalid_std_dev() {
        let cube = Cube::new(Point::ZERO, 12.0);
        for std_dev in [f64::NAN, f64::INFINITY, -1.0] {
            assert!(cluster_points(42, 10, std_dev, cube).is_err());
        }
    }

    #[test]
    fn cluster_points_are_clamped_into_the_cube() {
        let cube = Cube::new(Point::ZERO, 6.0);
        let points = cluster_points(42, 100, 1.0, cube).unwrap();
        assert_eq!(points.len(), 400);
        assert!(points.iter().all(|&point| cube.contains(point)));
        // every cluster center lies on a corner of this cube, so clamping must have happened
        assert!(points.iter().any(|point| point.abs().max_element() == 3.0));
    }

    #[test]
    fn default_cloud_builds() {
        let cube = Cube::new(Point::ZERO, 12.0);
        let points = cluster_points(42, 250, 1.0, cube).unwrap();
        let mut octree = Octree::new(OctreeConfig::new(6, 10));
        let root = octree.build(points, cube).unwrap();
        assert!(root.is_parent());
        assert_eq!(OctreeStats::of(root).points, 1000);
        assert!(OctreeStats::of(root).depth <= 6);
    }
}
