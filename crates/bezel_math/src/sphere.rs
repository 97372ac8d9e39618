use crate::{DVec3, Ray};

/// Slack added to the squared radius when pruning rays.
pub const SPHERE_EPSILON: f64 = 1.0e-10;

/// A bounding sphere stored as center and squared radius.
///
/// The squared radius is kept so that ray pruning never needs a square root.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct BoundingSphere {
    pub center: DVec3,
    pub radius_squared: f64,
}

impl BoundingSphere {
    /// Create a sphere from a center and a squared radius.
    pub fn new(center: DVec3, radius_squared: f64) -> Self {
        Self {
            center,
            radius_squared,
        }
    }

    /// Bound a set of points.
    ///
    /// The center is the arithmetic mean of the points and the squared
    /// radius is the largest squared distance from that center, which is
    /// not the minimal sphere. An empty set gives a zero sphere at the origin.
    pub fn from_points(points: &[DVec3]) -> Self {
        if points.is_empty() {
            return Self::new(DVec3::ZERO, 0.0);
        }

        let center = points.iter().copied().sum::<DVec3>() / points.len() as f64;
        let radius_squared = points
            .iter()
            .map(|p| p.distance_squared(center))
            .fold(0.0, f64::max);

        Self::new(center, radius_squared)
    }

    /// Radius of the sphere.
    pub fn radius(&self) -> f64 {
        self.radius_squared.sqrt()
    }

    /// Returns true if the point lies within the sphere, allowing `epsilon`
    /// of slack on the radius.
    pub fn contains(&self, p: DVec3, epsilon: f64) -> bool {
        p.distance(self.center) <= self.radius() + epsilon
    }

    /// Conservative ray test.
    ///
    /// A ray starting inside the sphere always passes. Otherwise the sphere
    /// must lie ahead of the origin and the ray's squared distance of
    /// closest approach to the center must not exceed the squared radius.
    #[inline]
    pub fn hit(&self, ray: &Ray) -> bool {
        let to_center = self.center - ray.origin;
        let dist1 = to_center.length_squared();

        if dist1 < self.radius_squared {
            return true;
        }

        let along = to_center.dot(ray.direction);
        if along <= 0.0 {
            return false;
        }

        let dir_len2 = ray.direction.length_squared();
        if dir_len2 <= 0.0 {
            return false;
        }

        let dist2 = along * along / dir_len2;
        dist1 - dist2 <= self.radius_squared + SPHERE_EPSILON
    }
}
