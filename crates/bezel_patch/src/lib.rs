//! Ray intersection with bicubic Bezier patches.
//!
//! A [`Patch`] owns a 4×4 control grid and answers ray queries by
//! adaptively subdividing the surface into nearly flat quads and
//! intersecting their two triangles. Subdivision either happens per ray
//! ([`PatchMode::Direct`]) or once up front into a tree of bounding spheres
//! ([`PatchMode::Cached`]). Both strategies share the same split policy and
//! return the same hits.
//!
//! # Example
//!
//! ```
//! use bezel_patch::{ControlGrid, Patch, PatchSettings, Ray, DVec3};
//!
//! let grid = ControlGrid::from_fn(|i, j| DVec3::new(i as f64 / 3.0, j as f64 / 3.0, 0.0));
//! let patch = Patch::new(grid, PatchSettings::default()).unwrap();
//!
//! let ray = Ray::new(DVec3::new(0.5, 0.5, 1.0), DVec3::new(0.0, 0.0, -1.0));
//! let hits = patch.intersections(&ray);
//! assert_eq!(hits.len(), 1);
//! assert!((hits[0].depth - 1.0).abs() < 1e-9);
//! ```

pub mod batch;
pub mod error;
pub mod eval;
pub mod flatness;
pub mod grid;
pub mod intersect;
pub mod patch;
pub mod refine;
pub mod settings;
pub mod split;
pub mod subdivide;
pub mod tree;
pub mod uv;

/// Threshold for treating cross products and plane normals as degenerate.
pub const BEZIER_EPSILON: f64 = 1.0e-10;

pub use batch::{closest_depths, intersect_batch};
pub use error::{PatchError, PatchResult};
pub use eval::{evaluate, SurfacePoint};
pub use flatness::{flat_enough, flatness, Plane};
pub use grid::{ControlGrid, UvRect};
pub use intersect::{intersect_quad, intersect_triangle, Hit, PatchVertex, Quad, SurfaceRef, DEPTH_TOLERANCE};
pub use patch::Patch;
pub use settings::{PatchMode, PatchSettings, MAX_STEPS};
pub use split::{split_both, split_u, split_v};
pub use subdivide::subdivide_and_intersect;
pub use tree::{PatchNode, PatchTree, TreeStats};
pub use uv::UvMapping;

pub use bezel_math::{Aabb, BoundingSphere, DMat4, DQuat, DVec2, DVec3, Interval, Ray, Transform};
