//! Persistent subdivision tree for patches that are hit by many rays.
//!
//! Built once per precompute, then read-only: any number of threads may
//! walk the same tree concurrently.

use bezel_math::{BoundingSphere, Ray};

use crate::intersect::{intersect_quad, Quad, SurfaceRef};
use crate::refine::{refine_all, Refiner};
use crate::{ControlGrid, Hit, PatchSettings, UvRect};

/// Subdivision tree node.
///
/// Each node owns its children, so dropping the root frees the whole tree.
#[derive(Debug, Clone)]
pub enum PatchNode {
    /// Split sub-patch with 2 or 4 children.
    Interior {
        children: Vec<PatchNode>,
        bounds: BoundingSphere,
    },
    /// Flat (or depth capped) sub-patch stored as a quad.
    Leaf { quad: Quad, bounds: BoundingSphere },
}

/// Shape of a built tree, collected while building.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TreeStats {
    /// Deepest level at which a node was created
    pub max_depth: u32,
    pub leaves: usize,
    pub interiors: usize,
}

/// Refiner that stores every sub-patch as a node.
struct TreeBuilder {
    stats: TreeStats,
}

impl Refiner for TreeBuilder {
    type Output = PatchNode;

    fn leaf(&mut self, grid: &ControlGrid, rect: UvRect, bounds: BoundingSphere, depth: u32) -> PatchNode {
        self.stats.leaves += 1;
        self.stats.max_depth = self.stats.max_depth.max(depth);
        PatchNode::Leaf {
            quad: Quad::from_grid(grid, rect),
            bounds,
        }
    }

    fn interior<I>(&mut self, children: I, bounds: BoundingSphere, depth: u32) -> PatchNode
    where
        I: Iterator<Item = PatchNode>,
    {
        self.stats.interiors += 1;
        self.stats.max_depth = self.stats.max_depth.max(depth);
        PatchNode::Interior {
            children: children.collect(),
            bounds,
        }
    }
}

impl PatchNode {
    /// Bounding sphere of the sub-patch this node covers.
    pub fn bounds(&self) -> &BoundingSphere {
        match self {
            PatchNode::Interior { bounds, .. } | PatchNode::Leaf { bounds, .. } => bounds,
        }
    }

    /// Push every intersection of `ray` below this node onto `hits`.
    ///
    /// Sub-trees whose bounding sphere the ray misses are skipped.
    pub fn walk(&self, ray: &Ray, surface: SurfaceRef<'_>, hits: &mut Vec<Hit>) -> usize {
        match self {
            PatchNode::Interior { children, bounds } => {
                if !bounds.hit(ray) {
                    return 0;
                }
                children.iter().map(|child| child.walk(ray, surface, hits)).sum()
            }

            PatchNode::Leaf { quad, bounds } => {
                if !bounds.hit(ray) {
                    return 0;
                }
                intersect_quad(ray, quad, surface, hits)
            }
        }
    }

    /// Collect the quads of all leaves below this node.
    pub fn leaves<'a>(&'a self, out: &mut Vec<&'a Quad>) {
        match self {
            PatchNode::Interior { children, .. } => {
                for child in children {
                    child.leaves(out);
                }
            }
            PatchNode::Leaf { quad, .. } => out.push(quad),
        }
    }
}

/// A built subdivision tree and its statistics.
#[derive(Debug, Clone)]
pub struct PatchTree {
    root: PatchNode,
    stats: TreeStats,
}

impl PatchTree {
    /// Build the tree for a whole patch.
    pub fn build(grid: &ControlGrid, settings: &PatchSettings) -> Self {
        let mut builder = TreeBuilder {
            stats: TreeStats::default(),
        };
        let root = refine_all(grid, UvRect::UNIT, 0, settings, &mut builder);

        Self {
            root,
            stats: builder.stats,
        }
    }

    pub fn root(&self) -> &PatchNode {
        &self.root
    }

    pub fn stats(&self) -> TreeStats {
        self.stats
    }

    /// Intersect a ray with the tree, pushing hits onto `hits`.
    pub fn walk(&self, ray: &Ray, surface: SurfaceRef<'_>, hits: &mut Vec<Hit>) -> usize {
        self.root.walk(ray, surface, hits)
    }

    /// Quads of all leaves, in build order.
    pub fn leaves(&self) -> Vec<&Quad> {
        let mut out = Vec::with_capacity(self.stats.leaves);
        self.root.leaves(&mut out);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::UvMapping;
    use bezel_math::DVec3;

    fn bump() -> ControlGrid {
        ControlGrid::from_fn(|i, j| {
            let z = if (1..=2).contains(&i) && (1..=2).contains(&j) { 1.0 } else { 0.0 };
            DVec3::new(i as f64, j as f64, z)
        })
    }

    #[test]
    fn test_flat_patch_builds_single_leaf() {
        let grid = ControlGrid::from_fn(|i, j| DVec3::new(i as f64, j as f64, 0.0));
        let tree = PatchTree::build(&grid, &PatchSettings::default());

        assert!(matches!(tree.root(), PatchNode::Leaf { .. }));
        assert_eq!(tree.stats(), TreeStats { max_depth: 0, leaves: 1, interiors: 0 });
    }

    #[test]
    fn test_depth_capped_tree_shape() {
        let settings = PatchSettings::default().with_steps(2, 1).with_flatness(0.0);
        let tree = PatchTree::build(&bump(), &settings);
        let stats = tree.stats();

        // depth 0 splits four ways, depth 1 splits u only, depth 2 are leaves
        assert_eq!(stats.leaves, 8);
        assert_eq!(stats.interiors, 5);
        assert_eq!(stats.max_depth, 2);

        match tree.root() {
            PatchNode::Interior { children, .. } => {
                assert_eq!(children.len(), 4);
                for child in children {
                    assert!(matches!(child, PatchNode::Interior { children, .. } if children.len() == 2));
                }
            }
            other => panic!("expected interior root, got {:?}", other),
        }
    }

    #[test]
    fn test_coincident_grid_builds_full_tree() {
        let point = DVec3::new(1.0, 2.0, 3.0);
        let grid = ControlGrid::from_fn(|_, _| point);
        let tree = PatchTree::build(&grid, &PatchSettings::default().with_steps(2, 2));

        // never flat, so both budgets are spent
        assert_eq!(tree.stats(), TreeStats { max_depth: 2, leaves: 16, interiors: 5 });
        assert_eq!(tree.root().bounds().center, point);
        assert_eq!(tree.root().bounds().radius_squared, 0.0);
    }

    #[test]
    fn test_leaves_cover_domain() {
        let settings = PatchSettings::default().with_steps(3, 3).with_flatness(0.05);
        let tree = PatchTree::build(&bump(), &settings);
        let leaves = tree.leaves();

        assert_eq!(leaves.len(), tree.stats().leaves);
        let area: f64 = leaves.iter().map(|q| q.rect.area()).sum();
        assert!((area - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_node_spheres_contain_leaf_corners() {
        let settings = PatchSettings::default().with_steps(2, 2).with_flatness(0.0);
        let tree = PatchTree::build(&bump(), &settings);
        let root_bounds = *tree.root().bounds();

        for quad in tree.leaves() {
            for corner in quad.corners {
                assert!(root_bounds.contains(corner, 1e-9));
            }
        }
    }

    #[test]
    fn test_walk_prunes_missing_ray() {
        let grid = bump();
        let mapping = UvMapping::default();
        let surface = SurfaceRef { grid: &grid, mapping: &mapping };
        let tree = PatchTree::build(&grid, &PatchSettings::default());

        let mut hits = Vec::new();
        let ray = Ray::new(DVec3::new(10.0, 10.0, 5.0), -DVec3::Z);
        assert_eq!(tree.walk(&ray, surface, &mut hits), 0);
        assert!(hits.is_empty());

        let ray = Ray::new(DVec3::new(1.3, 1.7, 5.0), -DVec3::Z);
        assert_eq!(tree.walk(&ray, surface, &mut hits), 1);
        assert_eq!(hits.len(), 1);
    }
}
