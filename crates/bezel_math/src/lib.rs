//! Double-precision geometry shared by the patch engine: rays, depth
//! windows, bounding volumes, transforms and a guarded 3×3 inverse.

// Re-export glam for convenience
pub use glam::*;

mod aabb;
mod interval;
mod matrix;
mod ray;
mod sphere;
mod transform;

pub use aabb::Aabb;
pub use interval::Interval;
pub use matrix::{invert3, INVERT_EPSILON};
pub use ray::Ray;
pub use sphere::{BoundingSphere, SPHERE_EPSILON};
pub use transform::Transform;
