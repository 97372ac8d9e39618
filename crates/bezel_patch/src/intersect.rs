//! Ray intersection with the planar quads that approximate flat sub-patches.
//!
//! A quad is split along its `(u0,v0)-(u1,v1)` diagonal into two triangles.
//! Each triangle is solved in the basis of its two edges and unit normal;
//! the reported normal is not the flat facet normal but the true surface
//! normal at the triangle corners, blended barycentrically.

use bezel_math::{invert3, DMat3, DVec2, DVec3, Ray};

use crate::eval::FALLBACK_NORMAL;
use crate::{evaluate, ControlGrid, UvMapping, UvRect, BEZIER_EPSILON};

/// Hits closer to the ray origin than this are ignored.
pub const DEPTH_TOLERANCE: f64 = 1.0e-5;

/// One ray/patch intersection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hit {
    /// Distance along the ray, in multiples of the ray direction
    pub depth: f64,
    /// World-space hit point
    pub point: DVec3,
    /// Unit surface normal (not oriented against the ray)
    pub normal: DVec3,
    /// Parametric coordinate along u
    pub u: f64,
    /// Parametric coordinate along v
    pub v: f64,
    /// Texture coordinates from the patch's [`UvMapping`]
    pub texture_uv: DVec2,
}

/// A triangle corner tagged with its parametric coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PatchVertex {
    pub position: DVec3,
    pub u: f64,
    pub v: f64,
}

/// The four corners of a flat (sub-)patch and the parameters they cover.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quad {
    /// Corners in the order of [`ControlGrid::corners`]
    pub corners: [DVec3; 4],
    pub rect: UvRect,
}

impl Quad {
    pub fn from_grid(grid: &ControlGrid, rect: UvRect) -> Self {
        Self {
            corners: grid.corners(),
            rect,
        }
    }

    /// The two triangles sharing the `corners[0]-corners[2]` diagonal.
    pub fn triangles(&self) -> [[PatchVertex; 3]; 2] {
        let uv = self.rect.corners();
        let vertex = |k: usize| PatchVertex {
            position: self.corners[k],
            u: uv[k].0,
            v: uv[k].1,
        };
        [[vertex(0), vertex(1), vertex(2)], [vertex(0), vertex(2), vertex(3)]]
    }
}

/// The full patch a sub-patch belongs to, used to reconstruct normals and
/// texture coordinates at hit points.
#[derive(Debug, Clone, Copy)]
pub struct SurfaceRef<'a> {
    pub grid: &'a ControlGrid,
    pub mapping: &'a UvMapping,
}

/// Intersect a ray with one triangle of a sub-patch.
///
/// Returns `None` for degenerate triangles, rays parallel to the triangle,
/// hits closer than [`DEPTH_TOLERANCE`] and hits outside the triangle.
pub fn intersect_triangle(ray: &Ray, tri: &[PatchVertex; 3], surface: SurfaceRef<'_>) -> Option<Hit> {
    let v0 = tri[0].position;
    let e0 = tri[1].position - v0;
    let e1 = tri[2].position - v0;

    let n = e0.cross(e1);
    let len2 = n.length_squared();
    if len2 <= BEZIER_EPSILON * e0.length_squared() * e1.length_squared() {
        return None;
    }

    let basis = DMat3::from_cols(e0, e1, n / len2.sqrt());
    let inv = invert3(&basis)?;

    // Component along the normal in the edge basis
    let n_row = inv.row(2);
    let denom = n_row.dot(ray.direction);
    if denom.abs() < BEZIER_EPSILON {
        return None;
    }

    let depth = n_row.dot(v0 - ray.origin) / denom;
    if depth.is_nan() || depth < DEPTH_TOLERANCE {
        return None;
    }

    let point = ray.at(depth);
    let q = point - v0;
    let a = inv.row(0).dot(q);
    let b = inv.row(1).dot(q);
    if a < 0.0 || b < 0.0 || a + b > 1.0 {
        return None;
    }
    let r = 1.0 - a - b;

    let normal = tri
        .iter()
        .zip([r, a, b])
        .map(|(vx, w)| evaluate(surface.grid, vx.u, vx.v).normal * w)
        .sum::<DVec3>();
    let normal_len2 = normal.length_squared();
    let normal = if normal_len2 > BEZIER_EPSILON {
        normal / normal_len2.sqrt()
    } else {
        FALLBACK_NORMAL
    };

    let u = r * tri[0].u + a * tri[1].u + b * tri[2].u;
    let v = r * tri[0].v + a * tri[1].v + b * tri[2].v;

    Some(Hit {
        depth,
        point,
        normal,
        u,
        v,
        texture_uv: surface.mapping.map(u, v),
    })
}

/// Intersect a ray with both triangles of a quad, pushing hits onto `hits`.
///
/// A ray crossing the shared diagonal is reported once: the second
/// triangle's hit is dropped when it lands at the first one's depth.
/// Returns the number of hits pushed.
pub fn intersect_quad(ray: &Ray, quad: &Quad, surface: SurfaceRef<'_>, hits: &mut Vec<Hit>) -> usize {
    let [first, second] = quad.triangles();

    let first_hit = intersect_triangle(ray, &first, surface);
    let second_hit = intersect_triangle(ray, &second, surface).filter(|h2| match first_hit {
        Some(h1) => (h2.depth - h1.depth).abs() > DEPTH_TOLERANCE * h1.depth.max(1.0),
        None => true,
    });

    let mut count = 0;
    for hit in [first_hit, second_hit].into_iter().flatten() {
        hits.push(hit);
        count += 1;
    }
    count
}
