//! Planarity test deciding when a sub-patch can be replaced by two triangles.

use bezel_math::DVec3;

use crate::{ControlGrid, BEZIER_EPSILON};

/// Corners closer than this are treated as coincident.
const COINCIDENT_EPSILON: f64 = 1.0e-10;

/// A plane `normal . p + offset = 0` with a unit normal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
    pub normal: DVec3,
    pub offset: f64,
}

impl Plane {
    /// Plane through three points, or `None` if they are colinear.
    ///
    /// The normal is `(a - b) x (c - b)`, normalized.
    pub fn through(a: DVec3, b: DVec3, c: DVec3) -> Option<Plane> {
        let e1 = a - b;
        let e2 = c - b;
        let n = e1.cross(e2);
        let len2 = n.length_squared();

        if len2 <= BEZIER_EPSILON * e1.length_squared() * e2.length_squared() {
            return None;
        }

        let normal = n / len2.sqrt();
        Some(Plane {
            normal,
            offset: -normal.dot(a),
        })
    }

    /// Signed distance from `p` to the plane.
    #[inline]
    pub fn signed_distance(&self, p: DVec3) -> f64 {
        self.normal.dot(p) + self.offset
    }
}

/// Corner triples tried, in order, when looking for a reference plane.
/// Indices refer to [`ControlGrid::corners`].
const CORNER_TRIPLES: [[usize; 3]; 4] = [[0, 1, 3], [0, 2, 3], [0, 1, 2], [1, 2, 3]];

fn distinct(a: DVec3, b: DVec3) -> bool {
    a.distance(b) >= COINCIDENT_EPSILON
}

/// Largest unsigned distance of any control point from the plane through
/// three of the grid's corners.
///
/// Returns `None` when no three pairwise distinct corners exist or the
/// chosen corners are colinear; such a grid is never considered flat.
pub fn flatness(grid: &ControlGrid) -> Option<f64> {
    let corners = grid.corners();

    let [a, b, c] = CORNER_TRIPLES
        .iter()
        .map(|t| [corners[t[0]], corners[t[1]], corners[t[2]]])
        .find(|[a, b, c]| distinct(*a, *b) && distinct(*a, *c) && distinct(*b, *c))?;

    let plane = Plane::through(a, b, c)?;

    Some(
        grid.points()
            .map(|p| plane.signed_distance(p).abs())
            .fold(0.0, f64::max),
    )
}

/// True if the grid deviates from planar by less than `tolerance`.
pub fn flat_enough(grid: &ControlGrid, tolerance: f64) -> bool {
    matches!(flatness(grid), Some(dist) if dist < tolerance)
}
