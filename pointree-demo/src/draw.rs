use std::{convert::Infallible, fmt, ops::ControlFlow};

use glam::Vec3;
use pointree_lib::{
    octree::{
        node::OctreeNode,
        visit::{OctreeVisitor, VisitNode},
    },
    point::Point,
};

/// How to draw the wireframe of a node's cube.
///
/// Shallow nodes are drawn thick, opaque and green, fading to thin, translucent and blue towards
/// the maximum depth.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CubeStyle {
    pub color: Vec3,
    pub line_width: f32,
    pub opacity: f32,
}

impl CubeStyle {
    /// Returns the style for a node at `depth` in a tree that is at most `max_depth` deep.
    pub fn for_depth(depth: u8, max_depth: u8) -> Self {
        let ratio = if max_depth == 0 {
            0.0
        } else {
            f32::from(depth.min(max_depth)) / f32::from(max_depth)
        };
        Self {
            color: Vec3::new(0.0, 1.0 - ratio, ratio),
            line_width: 3.0 - 2.0 * ratio,
            opacity: 0.8 - 0.5 * ratio,
        }
    }
}

/// A single primitive for an external renderer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DrawCommand {
    WireCube {
        center: Point,
        size: f64,
        style: CubeStyle,
    },
    Point {
        position: Point,
    },
}

impl fmt::Display for DrawCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WireCube {
                center,
                size,
                style,
            } => write!(
                f,
                "cube center={center} size={size} color={} width={:.2} opacity={:.2}",
                style.color, style.line_width, style.opacity
            ),
            Self::Point { position } => write!(f, "point {position}"),
        }
    }
}

/// Collects one wireframe cube per node and one point glyph per point stored in a leaf.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DrawList {
    max_depth: u8,
    commands: Vec<DrawCommand>,
}

impl DrawList {
    /// Walks the tree below `root` and collects its draw commands in pre-order.
    pub fn collect(root: &OctreeNode, max_depth: u8) -> Self {
        let mut draw_list = Self {
            max_depth,
            commands: Vec::new(),
        };
        match root.visit(&mut draw_list) {
            ControlFlow::Continue(()) => draw_list,
            ControlFlow::Break(never) => match never {},
        }
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn cube_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|command| matches!(command, DrawCommand::WireCube { .. }))
            .count()
    }

    pub fn point_count(&self) -> usize {
        self.commands.len() - self.cube_count()
    }

    fn push_cube(&mut self, node: &OctreeNode) {
        self.commands.push(DrawCommand::WireCube {
            center: node.center(),
            size: node.size(),
            style: CubeStyle::for_depth(node.depth(), self.max_depth),
        });
    }
}

impl OctreeVisitor for DrawList {
    type Break = Infallible;

    fn leaf(&mut self, node: &OctreeNode) -> ControlFlow<Self::Break> {
        self.push_cube(node);
        self.commands.extend(
            node.points()
                .iter()
                .map(|&position| DrawCommand::Point { position }),
        );
        ControlFlow::Continue(())
    }

    fn parent(&mut self, node: &OctreeNode) -> ControlFlow<Self::Break, VisitNode> {
        self.push_cube(node);
        ControlFlow::Continue(VisitNode::Enter)
    }
}

#[cfg(test)]
mod tests {
    use pointree_lib::octree::{config::OctreeConfig, cube::Cube, Octree};

    use super::*;

    fn assert_close(a: f32, b: f32) {
        assert!((a - b).abs() < 1e-6, "{a} != {b}");
    }

    #[test]
    fn style_fades_with_depth() {
        let root = CubeStyle::for_depth(0, 6);
        assert_eq!(root.color, Vec3::new(0.0, 1.0, 0.0));
        assert_close(root.line_width, 3.0);
        assert_close(root.opacity, 0.8);

        let deepest = CubeStyle::for_depth(6, 6);
        assert_eq!(deepest.color, Vec3::new(0.0, 0.0, 1.0));
        assert_close(deepest.line_width, 1.0);
        assert_close(deepest.opacity, 0.3);

        let half = CubeStyle::for_depth(3, 6);
        assert!(half.color.abs_diff_eq(Vec3::new(0.0, 0.5, 0.5), 1e-6));
        assert_close(half.line_width, 2.0);
        assert_close(half.opacity, 0.55);
    }

    #[test]
    fn style_for_zero_max_depth() {
        assert_eq!(CubeStyle::for_depth(0, 0), CubeStyle::for_depth(0, 6));
    }

    #[test]
    fn one_cube_per_node_and_one_glyph_per_point() {
        let points = [
            Point::new(0.0, 0.0, 0.0),
            Point::new(1.0, 0.0, 0.0),
            Point::new(0.0, 1.0, 0.0),
            Point::new(1.0, 1.0, 0.0),
            Point::new(0.5, 0.5, 0.0),
        ];
        let mut octree = Octree::new(OctreeConfig::new(6, 1));
        let root = octree
            .build(points, Cube::new(Point::new(0.5, 0.5, 0.0), 2.0))
            .unwrap();

        let draw_list = DrawList::collect(root, 6);
        assert_eq!(draw_list.cube_count(), root.iter().count());
        assert_eq!(draw_list.point_count(), 5);

        // pre-order, so the root cube comes first
        assert_eq!(
            draw_list.commands().first(),
            Some(&DrawCommand::WireCube {
                center: Point::new(0.5, 0.5, 0.0),
                size: 2.0,
                style: CubeStyle::for_depth(0, 6),
            })
        );
    }

    #[test]
    fn display() {
        let command = DrawCommand::Point {
            position: Point::new(1.0, 2.0, 3.0),
        };
        assert_eq!(command.to_string(), "point [1, 2, 3]");
    }
}
