//! Background grid line generation.
//!
//! Only the lines that can actually be seen are produced: the visible world
//! rectangle is clipped to the floor, and line positions are snapped outward
//! to the nearest pitch multiple. When zoomed far out the grid disappears,
//! and between the hide and fine thresholds the pitch doubles.

#[cfg(test)]
#[path = "grid_test.rs"]
mod grid_test;

use crate::consts::{GRID_FINE_SCALE, GRID_HIDE_SCALE, GRID_SIZE};
use crate::geometry::Rect;
use crate::viewport::Point;

/// Grid policy.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridPolicy {
    /// Fine pitch in world units.
    pub grid_size: f64,
    /// No grid below this scale.
    pub hide_below: f64,
    /// Fine pitch strictly above this scale, doubled pitch otherwise.
    pub fine_above: f64,
}

impl Default for GridPolicy {
    fn default() -> Self {
        Self { grid_size: GRID_SIZE, hide_below: GRID_HIDE_SCALE, fine_above: GRID_FINE_SCALE }
    }
}

/// A single grid segment in world space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridLine {
    pub from: Point,
    pub to: Point,
}

/// Everything needed to draw the grid for one frame.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GridPlan {
    pub pitch: f64,
    pub opacity: f64,
    pub lines: Vec<GridLine>,
}

impl GridPlan {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// Pitch for `scale`, or `None` when the grid is hidden.
#[must_use]
pub fn grid_pitch(scale: f64, policy: &GridPolicy) -> Option<f64> {
    if scale < policy.hide_below || policy.grid_size <= 0.0 {
        return None;
    }
    if scale > policy.fine_above {
        Some(policy.grid_size)
    } else {
        Some(policy.grid_size * 2.0)
    }
}

/// Line opacity, fading as the view zooms out.
#[must_use]
pub fn grid_opacity(scale: f64) -> f64 {
    (scale * 0.5).min(0.5)
}

/// Snapped line coordinates covering `[lo, hi]`, clipped to `[min, max]`.
fn line_positions(lo: f64, hi: f64, min: f64, max: f64, pitch: f64) -> Vec<f64> {
    let start = ((lo / pitch).floor() * pitch).max(min);
    let end = ((hi / pitch).ceil() * pitch).min(max);
    if end < start {
        return Vec::new();
    }

    // Start may be a clipped floor edge rather than a multiple; step from the
    // first multiple at or after it so lines stay on the global lattice.
    let first = (start / pitch).ceil() * pitch;
    let mut out = Vec::new();
    let mut k = 0.0_f64;
    loop {
        let v = first + k * pitch;
        if v > end {
            break;
        }
        out.push(v);
        k += 1.0;
    }
    out
}

/// Build the grid for a visible world rectangle on a floor.
///
/// `visible` should already include the culling buffer (see
/// [`crate::visibility::visible_rect`]). Returns an empty plan when the grid
/// is hidden or the view does not overlap the floor.
#[must_use]
pub fn build_grid(visible: &Rect, floor: &Rect, scale: f64, policy: &GridPolicy) -> GridPlan {
    let Some(pitch) = grid_pitch(scale, policy) else {
        return GridPlan::default();
    };
    let Some(area) = visible.intersect(floor) else {
        return GridPlan { pitch, opacity: grid_opacity(scale), lines: Vec::new() };
    };

    let mut lines = Vec::new();
    for x in line_positions(area.x, area.right(), floor.x, floor.right(), pitch) {
        lines.push(GridLine { from: Point::new(x, area.y), to: Point::new(x, area.bottom()) });
    }
    for y in line_positions(area.y, area.bottom(), floor.y, floor.bottom(), pitch) {
        lines.push(GridLine { from: Point::new(area.x, y), to: Point::new(area.right(), y) });
    }

    GridPlan { pitch, opacity: grid_opacity(scale), lines }
}
