//! Mapping from patch parameters to texture coordinates.

use bezel_math::DVec2;

/// Texture coordinates assigned to the four patch corners.
///
/// The default maps the patch onto the unit square. Parameters are mapped
/// with `v` running along the first edge (`corners[0] -> corners[1]`) and
/// `u` running across to the opposite edge (`corners[3] -> corners[2]`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UvMapping {
    pub corners: [DVec2; 4],
}

impl Default for UvMapping {
    fn default() -> Self {
        Self {
            corners: [
                DVec2::new(0.0, 0.0),
                DVec2::new(1.0, 0.0),
                DVec2::new(1.0, 1.0),
                DVec2::new(0.0, 1.0),
            ],
        }
    }
}

impl UvMapping {
    pub fn new(corners: [DVec2; 4]) -> Self {
        Self { corners }
    }

    /// Texture coordinates for the parametric point `(u, v)`.
    pub fn map(&self, u: f64, v: f64) -> DVec2 {
        let [c0, c1, c2, c3] = self.corners;
        let near = c0.lerp(c1, v);
        let far = c3.lerp(c2, v);
        near.lerp(far, u)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_mapping_swaps_axes() {
        let mapping = UvMapping::default();
        assert_eq!(mapping.map(0.0, 0.0), DVec2::new(0.0, 0.0));
        assert_eq!(mapping.map(0.25, 0.75), DVec2::new(0.75, 0.25));
        assert_eq!(mapping.map(1.0, 1.0), DVec2::new(1.0, 1.0));
    }

    #[test]
    fn test_custom_corners() {
        let mapping = UvMapping::new([
            DVec2::new(2.0, 2.0),
            DVec2::new(4.0, 2.0),
            DVec2::new(4.0, 6.0),
            DVec2::new(2.0, 6.0),
        ]);
        assert_eq!(mapping.map(0.5, 0.5), DVec2::new(3.0, 4.0));
        assert_eq!(mapping.map(1.0, 0.0), DVec2::new(2.0, 6.0));
    }
}
