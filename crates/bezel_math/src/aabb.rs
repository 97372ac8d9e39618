use crate::{DVec3, Interval, Ray};

/// Axis-aligned box used for coarse rejection before a shape is asked for
/// its exact intersections.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Aabb {
    pub min: DVec3,
    pub max: DVec3,
}

impl Aabb {
    /// Box with no volume; contains nothing and is never hit.
    pub const EMPTY: Aabb = Aabb {
        min: DVec3::INFINITY,
        max: DVec3::NEG_INFINITY,
    };

    pub fn new(min: DVec3, max: DVec3) -> Self {
        Self { min, max }
    }

    /// Tightest box around a set of points.
    ///
    /// Returns [`Aabb::EMPTY`] when the iterator yields nothing.
    pub fn enclosing<I>(points: I) -> Self
    where
        I: IntoIterator<Item = DVec3>,
    {
        points.into_iter().fold(Aabb::EMPTY, |acc, p| Aabb {
            min: acc.min.min(p),
            max: acc.max.max(p),
        })
    }

    pub fn is_empty(&self) -> bool {
        self.min.cmpgt(self.max).any()
    }

    /// Inclusive on every face, so flat boxes still contain their points.
    pub fn contains(&self, p: DVec3) -> bool {
        p.cmpge(self.min).all() && p.cmple(self.max).all()
    }

    pub fn center(&self) -> DVec3 {
        (self.min + self.max) * 0.5
    }

    pub fn extent(&self) -> DVec3 {
        self.max - self.min
    }

    /// Slab test: whether the ray passes through the box at a depth inside
    /// `ray_t`. Touching a face counts as a hit.
    pub fn hit(&self, ray: &Ray, ray_t: Interval) -> bool {
        if self.is_empty() {
            return false;
        }

        let inv = ray.direction.recip();
        let t0 = (self.min - ray.origin) * inv;
        let t1 = (self.max - ray.origin) * inv;

        // NaN from 0 * inf (ray in a face plane) is ignored by min/max
        let near = t0.min(t1).max_element().max(ray_t.min);
        let far = t0.max(t1).min_element().min(ray_t.max);
        near <= far
    }
}
