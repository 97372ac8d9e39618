//! Adaptive subdivision policy shared by the cached tree builder and the
//! per-ray subdivider.
//!
//! The decision of whether to stop or which axis to split lives only here;
//! callers plug in what happens at leaves and interior nodes through
//! [`Refiner`].

use bezel_math::BoundingSphere;

use crate::split::{split_both, split_u, split_v};
use crate::{flat_enough, ControlGrid, PatchSettings, UvRect};

/// What to do with a sub-patch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SplitAction {
    /// Flat enough, or both depth budgets spent: treat as a quad
    Leaf,
    /// Split along u only (v budget spent): left, right
    SplitU,
    /// Split along v only (u budget spent): bottom, top
    SplitV,
    /// Split both axes: lower-left, upper-left, lower-right, upper-right
    SplitBoth,
}

/// Decide how to treat a sub-patch at `depth`.
///
/// The u budget is consulted before the v budget.
pub fn choose_split(grid: &ControlGrid, depth: u32, settings: &PatchSettings) -> SplitAction {
    if flat_enough(grid, settings.flatness) {
        return SplitAction::Leaf;
    }

    if depth >= settings.u_steps {
        if depth >= settings.v_steps {
            SplitAction::Leaf
        } else {
            SplitAction::SplitV
        }
    } else if depth >= settings.v_steps {
        SplitAction::SplitU
    } else {
        SplitAction::SplitBoth
    }
}

/// Actions taken by [`refine`] as it walks the subdivision.
pub trait Refiner {
    type Output;

    /// Whether to descend into a sub-patch with these bounds.
    fn accept(&mut self, _bounds: &BoundingSphere) -> bool {
        true
    }

    /// A sub-patch that will not be split further.
    fn leaf(&mut self, grid: &ControlGrid, rect: UvRect, bounds: BoundingSphere, depth: u32) -> Self::Output;

    /// A split sub-patch, given the outputs of its accepted children in
    /// split order.
    fn interior<I>(&mut self, children: I, bounds: BoundingSphere, depth: u32) -> Self::Output
    where
        I: Iterator<Item = Self::Output>;
}

/// Recursively subdivide `grid`, covering `rect`, starting at `depth`.
///
/// Returns `None` if the refiner rejected this sub-patch. Recursion is
/// bounded by `max(u_steps, v_steps)` levels.
pub fn refine<R: Refiner>(
    grid: &ControlGrid,
    rect: UvRect,
    depth: u32,
    settings: &PatchSettings,
    refiner: &mut R,
) -> Option<R::Output> {
    let bounds = grid.bounding_sphere();
    if !refiner.accept(&bounds) {
        return None;
    }
    Some(expand(grid, rect, bounds, depth, settings, refiner))
}

/// Like [`refine`], but always produces output for `grid` itself.
///
/// `accept` is only consulted for descendants.
pub fn refine_all<R: Refiner>(
    grid: &ControlGrid,
    rect: UvRect,
    depth: u32,
    settings: &PatchSettings,
    refiner: &mut R,
) -> R::Output {
    expand(grid, rect, grid.bounding_sphere(), depth, settings, refiner)
}

fn expand<R: Refiner>(
    grid: &ControlGrid,
    rect: UvRect,
    bounds: BoundingSphere,
    depth: u32,
    settings: &PatchSettings,
    refiner: &mut R,
) -> R::Output {
    let mut children: [Option<(ControlGrid, UvRect)>; 4] = [None; 4];
    match choose_split(grid, depth, settings) {
        SplitAction::Leaf => return refiner.leaf(grid, rect, bounds, depth),
        SplitAction::SplitU => {
            let (left, right) = split_u(grid);
            let (left_rect, right_rect) = rect.split_u();
            children[0] = Some((left, left_rect));
            children[1] = Some((right, right_rect));
        }
        SplitAction::SplitV => {
            let (bottom, top) = split_v(grid);
            let (bottom_rect, top_rect) = rect.split_v();
            children[0] = Some((bottom, bottom_rect));
            children[1] = Some((top, top_rect));
        }
        SplitAction::SplitBoth => {
            for (slot, child) in children.iter_mut().zip(split_both(grid).into_iter().zip(rect.split_both())) {
                *slot = Some(child);
            }
        }
    }

    let mut outputs: [Option<R::Output>; 4] = std::array::from_fn(|_| None);
    for (output, (child, child_rect)) in outputs.iter_mut().zip(children.iter().flatten()) {
        *output = refine(child, *child_rect, depth + 1, settings, refiner);
    }

    refiner.interior(outputs.into_iter().flatten(), bounds, depth)
}
