use crate::DMat3;

/// Determinant magnitude below which a 3x3 matrix is treated as singular.
pub const INVERT_EPSILON: f64 = 1.0e-10;

/// Invert a 3x3 matrix by cofactor expansion.
///
/// Returns `None` when `|det| < INVERT_EPSILON`. Unlike `DMat3::inverse`,
/// a singular matrix is reported instead of producing infinities.
pub fn invert3(m: &DMat3) -> Option<DMat3> {
    // Rows of the inverse are the cofactor cross products of the columns.
    let r0 = m.y_axis.cross(m.z_axis);
    let r1 = m.z_axis.cross(m.x_axis);
    let r2 = m.x_axis.cross(m.y_axis);

    let det = m.x_axis.dot(r0);
    if det.abs() < INVERT_EPSILON {
        return None;
    }

    Some(DMat3::from_cols(r0, r1, r2).transpose() * det.recip())
}
