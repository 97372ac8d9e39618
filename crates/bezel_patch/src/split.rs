//! de Casteljau subdivision of a control grid at the parametric midpoint.
//!
//! The halves are exact: each reproduces its half of the parent surface
//! when evaluated over `[0, 1]`.

use bezel_math::DVec3;

use crate::ControlGrid;

#[inline]
fn mid(a: DVec3, b: DVec3) -> DVec3 {
    (a + b) * 0.5
}

/// Split one cubic Bezier curve at t = 0.5.
#[inline]
fn split_curve(c: [DVec3; 4]) -> ([DVec3; 4], [DVec3; 4]) {
    let p01 = mid(c[0], c[1]);
    let half = mid(c[1], c[2]);
    let p23 = mid(c[2], c[3]);
    let p012 = mid(p01, half);
    let p123 = mid(half, p23);
    let center = mid(p012, p123);

    ([c[0], p01, p012, center], [center, p123, p23, c[3]])
}

/// Split along u into (left, right), covering `u in [0, 0.5]` and `[0.5, 1]`.
pub fn split_u(grid: &ControlGrid) -> (ControlGrid, ControlGrid) {
    let mut left = *grid;
    let mut right = *grid;

    for j in 0..4 {
        let column = [grid.get(0, j), grid.get(1, j), grid.get(2, j), grid.get(3, j)];
        let (l, r) = split_curve(column);
        for i in 0..4 {
            left.0[i][j] = l[i];
            right.0[i][j] = r[i];
        }
    }

    (left, right)
}

/// Split along v into (bottom, top), covering `v in [0, 0.5]` and `[0.5, 1]`.
pub fn split_v(grid: &ControlGrid) -> (ControlGrid, ControlGrid) {
    let mut bottom = *grid;
    let mut top = *grid;

    for i in 0..4 {
        let (b, t) = split_curve(grid.0[i]);
        bottom.0[i] = b;
        top.0[i] = t;
    }

    (bottom, top)
}

/// Split along both axes: lower-left, upper-left, lower-right, upper-right.
///
/// Splits u first, then v on each half.
pub fn split_both(grid: &ControlGrid) -> [ControlGrid; 4] {
    let (left, right) = split_u(grid);
    let (lower_left, upper_left) = split_v(&left);
    let (lower_right, upper_right) = split_v(&right);
    [lower_left, upper_left, lower_right, upper_right]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluate;

    fn wavy() -> ControlGrid {
        ControlGrid::from_fn(|i, j| {
            DVec3::new(
                i as f64 + 0.1 * j as f64,
                j as f64 - 0.2 * (i * i) as f64,
                ((i * 7 + j * 3) % 5) as f64 * 0.4,
            )
        })
    }

    fn close(a: DVec3, b: DVec3) -> bool {
        (a - b).length() < 1e-10
    }

    #[test]
    fn test_split_u_exact() {
        let grid = wavy();
        let (left, right) = split_u(&grid);

        for k in 0..=10 {
            let s = k as f64 / 10.0;
            for &v in &[0.0, 0.3, 0.8, 1.0] {
                let orig_left = evaluate(&grid, s * 0.5, v).position;
                let orig_right = evaluate(&grid, 0.5 + s * 0.5, v).position;
                assert!(close(evaluate(&left, s, v).position, orig_left));
                assert!(close(evaluate(&right, s, v).position, orig_right));
            }
        }
    }

    #[test]
    fn test_split_v_exact() {
        let grid = wavy();
        let (bottom, top) = split_v(&grid);

        for k in 0..=10 {
            let s = k as f64 / 10.0;
            for &u in &[0.0, 0.45, 1.0] {
                assert!(close(evaluate(&bottom, u, s).position, evaluate(&grid, u, s * 0.5).position));
                assert!(close(evaluate(&top, u, s).position, evaluate(&grid, u, 0.5 + s * 0.5).position));
            }
        }
    }

    #[test]
    fn test_halves_share_boundary() {
        let grid = wavy();
        let (left, right) = split_u(&grid);
        for j in 0..4 {
            assert_eq!(left.get(3, j), right.get(0, j));
        }

        let (bottom, top) = split_v(&grid);
        for i in 0..4 {
            assert_eq!(bottom.get(i, 3), top.get(i, 0));
        }
    }

    #[test]
    fn test_split_both_quadrants() {
        let grid = wavy();
        let [lower_left, upper_left, lower_right, upper_right] = split_both(&grid);

        assert!(close(lower_left.get(0, 0), grid.get(0, 0)));
        assert!(close(upper_left.get(0, 3), grid.get(0, 3)));
        assert!(close(lower_right.get(3, 0), grid.get(3, 0)));
        assert!(close(upper_right.get(3, 3), grid.get(3, 3)));
        assert!(close(upper_right.get(0, 0), evaluate(&grid, 0.5, 0.5).position));
    }
}
