//! Errors raised while configuring a patch.
//!
//! Intersection queries never fail: degenerate geometry resolves to "no hit"
//! or a fallback normal instead of an error.

use thiserror::Error;

/// Errors that can occur when a patch is constructed or reconfigured.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PatchError {
    #[error("Subdivision steps out of range: u_steps={u_steps}, v_steps={v_steps} (max {max})")]
    InvalidSteps { u_steps: u32, v_steps: u32, max: u32 },

    #[error("Flatness tolerance must be finite and non-negative, got {0}")]
    InvalidFlatness(f64),

    #[error("Control point [{u}][{v}] is not finite")]
    NonFiniteControlPoint { u: usize, v: usize },

    #[error("Undefined bicubic patch type: {0}")]
    UnknownMode(i32),
}

pub type PatchResult<T> = Result<T, PatchError>;
