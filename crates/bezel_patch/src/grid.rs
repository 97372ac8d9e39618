//! The 4x4 control net of a bicubic patch and the parametric rectangles
//! its sub-patches cover.

use bezel_math::{Aabb, BoundingSphere, DVec3};

/// A 4x4 net of control points, indexed `[u][v]`.
///
/// Row `[i]` holds the four points of the cubic Bezier curve at the i-th
/// u control position; each row is a curve in v and each column a curve
/// in u. The surface passes through the four corners:
/// `(0,0) -> [0][0]`, `(1,0) -> [3][0]`, `(0,1) -> [0][3]`, `(1,1) -> [3][3]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControlGrid(pub [[DVec3; 4]; 4]);

impl ControlGrid {
    /// Wrap a 4x4 array of control points.
    pub fn new(points: [[DVec3; 4]; 4]) -> Self {
        Self(points)
    }

    /// Build a grid from a function of the `(u, v)` indices.
    pub fn from_fn(mut f: impl FnMut(usize, usize) -> DVec3) -> Self {
        Self(std::array::from_fn(|i| std::array::from_fn(|j| f(i, j))))
    }

    /// Control point at `[u][v]`.
    #[inline]
    pub fn get(&self, u: usize, v: usize) -> DVec3 {
        self.0[u][v]
    }

    /// All 16 control points in `[u][v]` row order.
    pub fn points(&self) -> impl Iterator<Item = DVec3> + '_ {
        self.0.iter().flat_map(|row| row.iter().copied())
    }

    /// The four corners in quad order: `(u0,v0)`, `(u0,v1)`, `(u1,v1)`, `(u1,v0)`.
    pub fn corners(&self) -> [DVec3; 4] {
        [self.0[0][0], self.0[0][3], self.0[3][3], self.0[3][0]]
    }

    /// Apply `f` to every control point.
    pub fn map(&self, mut f: impl FnMut(DVec3) -> DVec3) -> Self {
        Self::from_fn(|i, j| f(self.0[i][j]))
    }

    /// Index of the first control point with a non-finite coordinate.
    pub fn first_non_finite(&self) -> Option<(usize, usize)> {
        (0..4)
            .flat_map(|i| (0..4).map(move |j| (i, j)))
            .find(|&(i, j)| !self.0[i][j].is_finite())
    }

    /// Bounding sphere of the 16 control points.
    ///
    /// A Bezier patch lies in the convex hull of its control net, so this
    /// sphere bounds the surface too.
    pub fn bounding_sphere(&self) -> BoundingSphere {
        let points: [DVec3; 16] = std::array::from_fn(|k| self.0[k / 4][k % 4]);
        BoundingSphere::from_points(&points)
    }

    /// Axis-aligned box around the 16 control points.
    pub fn bounding_box(&self) -> Aabb {
        Aabb::enclosing(self.points())
    }
}

/// Parametric extent `[u0, u1] x [v0, v1]` of a (sub-)patch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UvRect {
    pub u0: f64,
    pub u1: f64,
    pub v0: f64,
    pub v1: f64,
}

impl UvRect {
    /// The whole patch domain.
    pub const UNIT: UvRect = UvRect {
        u0: 0.0,
        u1: 1.0,
        v0: 0.0,
        v1: 1.0,
    };

    pub fn new(u0: f64, u1: f64, v0: f64, v1: f64) -> Self {
        Self { u0, u1, v0, v1 }
    }

    /// Parametric midpoint along u.
    #[inline]
    pub fn u_mid(&self) -> f64 {
        (self.u0 + self.u1) / 2.0
    }

    /// Parametric midpoint along v.
    #[inline]
    pub fn v_mid(&self) -> f64 {
        (self.v0 + self.v1) / 2.0
    }

    /// Halves along u: (left, right).
    pub fn split_u(&self) -> (UvRect, UvRect) {
        let ut = self.u_mid();
        (
            UvRect::new(self.u0, ut, self.v0, self.v1),
            UvRect::new(ut, self.u1, self.v0, self.v1),
        )
    }

    /// Halves along v: (bottom, top).
    pub fn split_v(&self) -> (UvRect, UvRect) {
        let vt = self.v_mid();
        (
            UvRect::new(self.u0, self.u1, self.v0, vt),
            UvRect::new(self.u0, self.u1, vt, self.v1),
        )
    }

    /// Quarters: lower-left, upper-left, lower-right, upper-right.
    pub fn split_both(&self) -> [UvRect; 4] {
        let (left, right) = self.split_u();
        let (lower_left, upper_left) = left.split_v();
        let (lower_right, upper_right) = right.split_v();
        [lower_left, upper_left, lower_right, upper_right]
    }

    /// Parametric coordinates of the quad corners, in the order used by
    /// [`ControlGrid::corners`].
    pub fn corners(&self) -> [(f64, f64); 4] {
        [
            (self.u0, self.v0),
            (self.u0, self.v1),
            (self.u1, self.v1),
            (self.u1, self.v0),
        ]
    }

    /// Area of the rectangle in parameter space.
    pub fn area(&self) -> f64 {
        (self.u1 - self.u0) * (self.v1 - self.v0)
    }
}

impl Default for UvRect {
    fn default() -> Self {
        Self::UNIT
    }
}
