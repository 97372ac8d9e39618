/// Closed window `[min, max]` of accepted ray depths.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interval {
    pub min: f64,
    pub max: f64,
}

impl Interval {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Every depth in front of the ray origin.
    pub const FORWARD: Interval = Interval {
        min: 0.0,
        max: f64::INFINITY,
    };

    /// Inclusive at both ends.
    pub fn contains(&self, depth: f64) -> bool {
        self.min <= depth && depth <= self.max
    }

    pub fn is_empty(&self) -> bool {
        !(self.min <= self.max)
    }

    /// Copy of this window with `max` lowered to `depth` if that is smaller.
    pub fn clipped_to(&self, depth: f64) -> Interval {
        Interval::new(self.min, self.max.min(depth))
    }
}
