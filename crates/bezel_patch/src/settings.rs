//! Patch configuration: caching strategy, subdivision budgets and flatness.

use crate::{PatchError, PatchResult};

/// Largest accepted per-axis subdivision budget.
///
/// A cached tree at this cap with both budgets spent holds 4^10 (about a
/// million) leaves, a few hundred megabytes.
pub const MAX_STEPS: u32 = 10;

/// How a patch answers ray queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PatchMode {
    /// Subdivide per ray; nothing is kept between queries.
    Direct,
    /// Build a subdivision tree once and walk it for every ray.
    #[default]
    Cached,
}

impl PatchMode {
    /// Map a numeric patch type onto a mode.
    ///
    /// `0` is [`PatchMode::Direct`] and `1` is [`PatchMode::Cached`]. Types
    /// above 1 used to select methods that no longer exist and are treated
    /// as cached; negative types are rejected.
    pub fn from_type(patch_type: i32) -> PatchResult<Self> {
        match patch_type {
            0 => Ok(PatchMode::Direct),
            1 => Ok(PatchMode::Cached),
            t if t > 1 => {
                log::warn!("Patch type {} no longer supported, using type 1", t);
                Ok(PatchMode::Cached)
            }
            t => Err(PatchError::UnknownMode(t)),
        }
    }

    /// Numeric patch type of this mode.
    pub fn patch_type(self) -> i32 {
        match self {
            PatchMode::Direct => 0,
            PatchMode::Cached => 1,
        }
    }
}

/// Subdivision settings for a patch.
#[derive(Debug, Clone, PartialEq)]
pub struct PatchSettings {
    /// Caching strategy
    pub mode: PatchMode,
    /// Maximum number of splits along u
    pub u_steps: u32,
    /// Maximum number of splits along v
    pub v_steps: u32,
    /// Largest control-point distance from the reference plane for which a
    /// sub-patch is treated as planar
    pub flatness: f64,
}

impl Default for PatchSettings {
    fn default() -> Self {
        Self {
            mode: PatchMode::Cached,
            u_steps: 3,
            v_steps: 3,
            flatness: 0.01,
        }
    }
}

impl PatchSettings {
    /// Set the caching mode.
    pub fn with_mode(mut self, mode: PatchMode) -> Self {
        self.mode = mode;
        self
    }

    /// Set both subdivision budgets.
    pub fn with_steps(mut self, u_steps: u32, v_steps: u32) -> Self {
        self.u_steps = u_steps;
        self.v_steps = v_steps;
        self
    }

    /// Set the flatness tolerance.
    pub fn with_flatness(mut self, flatness: f64) -> Self {
        self.flatness = flatness;
        self
    }

    /// Check that the settings describe a bounded subdivision.
    pub fn validate(&self) -> PatchResult<()> {
        if self.u_steps > MAX_STEPS || self.v_steps > MAX_STEPS {
            return Err(PatchError::InvalidSteps {
                u_steps: self.u_steps,
                v_steps: self.v_steps,
                max: MAX_STEPS,
            });
        }

        if !self.flatness.is_finite() || self.flatness < 0.0 {
            return Err(PatchError::InvalidFlatness(self.flatness));
        }

        Ok(())
    }
}
