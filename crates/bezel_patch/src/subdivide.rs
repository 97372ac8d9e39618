//! Per-ray adaptive subdivision for patches that keep no tree.
//!
//! Follows exactly the same subdivision decisions as the cached tree, but
//! prunes against the current ray while splitting and intersects leaves
//! immediately, so nothing outlives the query.

use bezel_math::{BoundingSphere, Ray};

use crate::intersect::{intersect_quad, Quad, SurfaceRef};
use crate::refine::{refine, Refiner};
use crate::{ControlGrid, Hit, PatchSettings, UvRect};

/// Refiner that intersects leaves with a single ray.
struct RaySubdivider<'r, 's> {
    ray: &'r Ray,
    surface: SurfaceRef<'s>,
    hits: &'r mut Vec<Hit>,
}

impl Refiner for RaySubdivider<'_, '_> {
    type Output = usize;

    fn accept(&mut self, bounds: &BoundingSphere) -> bool {
        bounds.hit(self.ray)
    }

    fn leaf(&mut self, grid: &ControlGrid, rect: UvRect, _bounds: BoundingSphere, _depth: u32) -> usize {
        intersect_quad(self.ray, &Quad::from_grid(grid, rect), self.surface, self.hits)
    }

    fn interior<I>(&mut self, children: I, _bounds: BoundingSphere, _depth: u32) -> usize
    where
        I: Iterator<Item = usize>,
    {
        children.sum()
    }
}

/// Intersect `ray` with the sub-patch `grid` covering `rect`, subdividing
/// from `depth` as needed. Hits are pushed onto `hits`; returns their count.
pub fn subdivide_and_intersect(
    ray: &Ray,
    grid: &ControlGrid,
    rect: UvRect,
    depth: u32,
    settings: &PatchSettings,
    surface: SurfaceRef<'_>,
    hits: &mut Vec<Hit>,
) -> usize {
    let mut subdivider = RaySubdivider { ray, surface, hits };
    refine(grid, rect, depth, settings, &mut subdivider).unwrap_or(0)
}
