//! Evaluation of a bicubic Bezier patch and its tangents.

use bezel_math::DVec3;

use crate::{ControlGrid, BEZIER_EPSILON};

/// Binomial coefficients of the cubic Bernstein basis.
const BINOMIAL: [f64; 4] = [1.0, 3.0, 3.0, 1.0];

/// Normal reported where the tangents are parallel or vanish.
pub const FALLBACK_NORMAL: DVec3 = DVec3::X;

/// Position, unit normal and partial derivatives at one parametric location.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfacePoint {
    pub position: DVec3,
    pub normal: DVec3,
    /// dP/du
    pub tangent_u: DVec3,
    /// dP/dv
    pub tangent_v: DVec3,
}

/// Bernstein weights and their derivatives for one parameter.
#[inline]
fn bernstein(t: f64) -> ([f64; 4], [f64; 4]) {
    let s = 1.0 - t;

    // powers of t and (1 - t), and their derivatives
    let mut pt = [1.0; 4];
    let mut ps = [1.0; 4];
    let mut dpt = [0.0; 4];
    let mut dps = [0.0; 4];
    for i in 1..4 {
        pt[i] = pt[i - 1] * t;
        ps[i] = ps[i - 1] * s;
        dpt[i] = i as f64 * pt[i - 1];
        dps[i] = -(i as f64) * ps[i - 1];
    }

    let mut value = [0.0; 4];
    let mut deriv = [0.0; 4];
    for i in 0..4 {
        value[i] = BINOMIAL[i] * pt[i] * ps[3 - i];
        deriv[i] = BINOMIAL[i] * (dpt[i] * ps[3 - i] + pt[i] * dps[3 - i]);
    }
    (value, deriv)
}

/// Evaluate the patch at `(u, v)`.
///
/// `u` and `v` are expected in `[0, 1]` and are not range checked. The
/// normal is `normalize(dP/du x dP/dv)`; when the tangents are degenerate
/// it falls back to [`FALLBACK_NORMAL`].
pub fn evaluate(grid: &ControlGrid, u: f64, v: f64) -> SurfacePoint {
    let (bu, dbu) = bernstein(u);
    let (bv, dbv) = bernstein(v);

    let mut position = DVec3::ZERO;
    let mut tangent_u = DVec3::ZERO;
    let mut tangent_v = DVec3::ZERO;

    for i in 0..4 {
        for j in 0..4 {
            let p = grid.get(i, j);
            position += p * (bu[i] * bv[j]);
            tangent_u += p * (dbu[i] * bv[j]);
            tangent_v += p * (bu[i] * dbv[j]);
        }
    }

    let cross = tangent_u.cross(tangent_v);
    let len2 = cross.length_squared();
    let normal = if len2 > BEZIER_EPSILON * tangent_u.length_squared() * tangent_v.length_squared() {
        cross / len2.sqrt()
    } else {
        FALLBACK_NORMAL
    };

    SurfacePoint {
        position,
        normal,
        tangent_u,
        tangent_v,
    }
}
