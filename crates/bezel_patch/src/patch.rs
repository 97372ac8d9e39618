//! The user-facing bicubic patch: owns the control grid, chooses between
//! per-ray subdivision and the cached tree, and keeps derived data in step
//! with every geometric edit.

use bezel_math::{Aabb, BoundingSphere, DMat4, DQuat, DVec3, Interval, Ray, Transform};

use crate::intersect::SurfaceRef;
use crate::subdivide::subdivide_and_intersect;
use crate::tree::{PatchTree, TreeStats};
use crate::{evaluate, ControlGrid, Hit, PatchError, PatchMode, PatchResult, PatchSettings, SurfacePoint, UvMapping, UvRect};

/// Query strategy, fixed by the patch mode.
#[derive(Debug)]
enum Strategy {
    Direct,
    Cached(PatchTree),
}

/// A bicubic Bezier patch ready for ray queries.
///
/// Construction precomputes the bounds (and, in cached mode, the tree), and
/// every transform recomputes them before returning, so a `Patch` never
/// answers queries from stale data.
#[derive(Debug)]
pub struct Patch {
    grid: ControlGrid,
    settings: PatchSettings,
    uv_mapping: UvMapping,
    bounds: BoundingSphere,
    bbox: Aabb,
    strategy: Strategy,
}

impl Patch {
    /// Create a patch from its control grid.
    ///
    /// Fails if the settings are out of range or a control point is not finite.
    pub fn new(grid: ControlGrid, settings: PatchSettings) -> PatchResult<Self> {
        settings.validate()?;
        Self::check_grid(&grid)?;

        let mut patch = Self {
            grid,
            settings,
            uv_mapping: UvMapping::default(),
            bounds: BoundingSphere::new(DVec3::ZERO, 0.0),
            bbox: Aabb::EMPTY,
            strategy: Strategy::Direct,
        };
        patch.precompute();
        Ok(patch)
    }

    fn check_grid(grid: &ControlGrid) -> PatchResult<()> {
        match grid.first_non_finite() {
            Some((u, v)) => Err(PatchError::NonFiniteControlPoint { u, v }),
            None => Ok(()),
        }
    }

    /// Rebuild everything derived from the control grid.
    ///
    /// Recomputes the bounding sphere and box; in cached mode the old tree
    /// is dropped and a new one is built.
    pub fn precompute(&mut self) {
        self.bounds = self.grid.bounding_sphere();
        self.bbox = self.grid.bounding_box();

        self.strategy = match self.settings.mode {
            PatchMode::Direct => Strategy::Direct,
            PatchMode::Cached => {
                let tree = PatchTree::build(&self.grid, &self.settings);
                let stats = tree.stats();
                log::info!(
                    "Built patch tree: {} leaves, {} interior nodes, max depth {}",
                    stats.leaves,
                    stats.interiors,
                    stats.max_depth
                );
                Strategy::Cached(tree)
            }
        };

        log::debug!(
            "Precomputed {:?} patch: bounding sphere center {:?}, radius {}",
            self.settings.mode,
            self.bounds.center,
            self.bounds.radius()
        );
    }

    fn surface(&self) -> SurfaceRef<'_> {
        SurfaceRef {
            grid: &self.grid,
            mapping: &self.uv_mapping,
        }
    }

    /// Push every intersection of `ray` with the patch onto `hits`.
    ///
    /// Hits come in no particular order; returns how many were pushed.
    pub fn all_intersections(&self, ray: &Ray, hits: &mut Vec<Hit>) -> usize {
        match &self.strategy {
            Strategy::Direct => subdivide_and_intersect(
                ray,
                &self.grid,
                UvRect::UNIT,
                0,
                &self.settings,
                self.surface(),
                hits,
            ),
            Strategy::Cached(tree) => tree.walk(ray, self.surface(), hits),
        }
    }

    /// All intersections of `ray` with the patch, in no particular order.
    pub fn intersections(&self, ray: &Ray) -> Vec<Hit> {
        let mut hits = Vec::new();
        self.all_intersections(ray, &mut hits);
        hits
    }

    /// Nearest intersection with a depth inside `ray_t`.
    pub fn closest_hit(&self, ray: &Ray, ray_t: Interval) -> Option<Hit> {
        self.intersections(ray)
            .into_iter()
            .filter(|hit| ray_t.contains(hit.depth))
            .min_by(|a, b| a.depth.total_cmp(&b.depth))
    }

    /// A patch has no interior.
    pub fn inside(&self, _point: DVec3) -> bool {
        false
    }

    /// Evaluate the surface at `(u, v)`.
    pub fn evaluate(&self, u: f64, v: f64) -> SurfacePoint {
        evaluate(&self.grid, u, v)
    }

    /// Replace the grid with `f` applied to every control point, then
    /// precompute.
    ///
    /// If any moved point is not finite the patch is left untouched.
    fn apply(&mut self, f: impl FnMut(DVec3) -> DVec3) -> PatchResult<()> {
        let moved = self.grid.map(f);
        Self::check_grid(&moved)?;
        self.grid = moved;
        self.precompute();
        Ok(())
    }

    /// Move every control point by `offset`.
    pub fn translate(&mut self, offset: DVec3) -> PatchResult<()> {
        self.apply(|p| p + offset)
    }

    /// Scale every control point component-wise about the origin.
    pub fn scale(&mut self, factors: DVec3) -> PatchResult<()> {
        self.apply(|p| p * factors)
    }

    /// Rotate every control point about the origin.
    pub fn rotate(&mut self, rotation: DQuat) -> PatchResult<()> {
        self.apply(|p| rotation * p)
    }

    /// Apply a scale/rotate/translate transform to every control point.
    pub fn transform(&mut self, transform: &Transform) -> PatchResult<()> {
        self.apply(|p| transform.transform_point(p))
    }

    /// Apply a general affine matrix to every control point.
    pub fn transform_matrix(&mut self, matrix: &DMat4) -> PatchResult<()> {
        self.apply(|p| matrix.transform_point3(p))
    }

    /// Replace the texture-space corners.
    ///
    /// Only hits produced after the change see the new mapping.
    pub fn set_uv_mapping(&mut self, mapping: UvMapping) {
        self.uv_mapping = mapping;
    }

    pub fn uv_mapping(&self) -> &UvMapping {
        &self.uv_mapping
    }

    pub fn grid(&self) -> &ControlGrid {
        &self.grid
    }

    pub fn settings(&self) -> &PatchSettings {
        &self.settings
    }

    pub fn mode(&self) -> PatchMode {
        self.settings.mode
    }

    /// Bounding sphere of all 16 control points.
    pub fn bounding_sphere(&self) -> BoundingSphere {
        self.bounds
    }

    /// Axis-aligned box around all 16 control points.
    pub fn bounding_box(&self) -> Aabb {
        self.bbox
    }

    /// Statistics of the cached tree; `None` in direct mode.
    pub fn tree_stats(&self) -> Option<TreeStats> {
        match &self.strategy {
            Strategy::Direct => None,
            Strategy::Cached(tree) => Some(tree.stats()),
        }
    }

    /// The cached tree; `None` in direct mode.
    pub fn tree(&self) -> Option<&PatchTree> {
        match &self.strategy {
            Strategy::Direct => None,
            Strategy::Cached(tree) => Some(tree),
        }
    }
}

impl Clone for Patch {
    /// Copies the grid, settings and mapping, then precomputes the copy on
    /// its own so no tree is shared.
    fn clone(&self) -> Self {
        let mut copy = Self {
            grid: self.grid,
            settings: self.settings.clone(),
            uv_mapping: self.uv_mapping,
            bounds: self.bounds,
            bbox: self.bbox,
            strategy: Strategy::Direct,
        };
        copy.precompute();
        copy
    }
}
