//! Parallel ray queries.
//!
//! A built patch is read-only during queries, so rays are spread across the
//! rayon pool with no locking.

use bezel_math::Ray;
use rayon::prelude::*;

use crate::{Hit, Patch};

/// Intersect every ray with `patch` in parallel.
///
/// The result has one entry per ray, in input order.
pub fn intersect_batch(patch: &Patch, rays: &[Ray]) -> Vec<Vec<Hit>> {
    rays.par_iter().map(|ray| patch.intersections(ray)).collect()
}

/// Nearest hit depth per ray, or `None` for a miss.
pub fn closest_depths(patch: &Patch, rays: &[Ray]) -> Vec<Option<f64>> {
    rays.par_iter()
        .map(|ray| {
            patch
                .intersections(ray)
                .iter()
                .map(|hit| hit.depth)
                .min_by(f64::total_cmp)
        })
        .collect()
}
