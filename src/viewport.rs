//! Pan/zoom viewport and coordinate conversions.
//!
//! The viewport is an affine map `screen = world * scale + pan`. Everything
//! that needs to go between pointer pixels and floor-plan units goes through
//! here so the two directions stay exact inverses of each other.

#[cfg(test)]
#[path = "viewport_test.rs"]
mod viewport_test;

use serde::{Deserialize, Serialize};

use crate::consts::{MAX_SCALE, MIN_SCALE, ZOOM_FACTOR};

/// A point in either screen or world space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Width and height of the stage (screen pixels) or of a floor (world units).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Scale limits and zoom step for a viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomPolicy {
    pub min_scale: f64,
    pub max_scale: f64,
    pub factor: f64,
}

impl Default for ZoomPolicy {
    fn default() -> Self {
        Self { min_scale: MIN_SCALE, max_scale: MAX_SCALE, factor: ZOOM_FACTOR }
    }
}

/// Plain copy of the viewport's pan/scale, handed to per-frame consumers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportState {
    /// Horizontal world-to-screen translation in screen pixels.
    pub pan_x: f64,
    /// Vertical world-to-screen translation in screen pixels.
    pub pan_y: f64,
    /// Screen pixels per world unit.
    pub scale: f64,
}

/// Inputs for [`Viewport::auto_fit`].
#[derive(Debug, Clone, Copy)]
pub struct FitRequest {
    /// Stage size in screen pixels.
    pub stage: Size,
    /// Floor size in world units.
    pub floor: Size,
    /// World-space position of the floor's top-left corner.
    pub floor_origin: Point,
    /// Padding reserved on every side of the stage, in pixels.
    pub padding: f64,
    /// Height of the host header bar covering the top of the stage.
    pub header_inset: f64,
}

/// Pan/zoom state for the floor canvas.
///
/// `scale` is kept inside `[policy.min_scale, policy.max_scale]` by every
/// mutator, so [`Viewport::screen_to_world`] never divides by zero.
#[derive(Debug, Clone, Copy)]
pub struct Viewport {
    pan_x: f64,
    pan_y: f64,
    scale: f64,
    policy: ZoomPolicy,
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(ZoomPolicy::default())
    }
}

impl Viewport {
    #[must_use]
    pub fn new(policy: ZoomPolicy) -> Self {
        Self { pan_x: 0.0, pan_y: 0.0, scale: 1.0, policy }
    }

    #[must_use]
    pub fn scale(&self) -> f64 {
        self.scale
    }

    #[must_use]
    pub fn pan(&self) -> Point {
        Point::new(self.pan_x, self.pan_y)
    }

    #[must_use]
    pub fn policy(&self) -> ZoomPolicy {
        self.policy
    }

    /// Snapshot of the current pan/scale.
    #[must_use]
    pub fn state(&self) -> ViewportState {
        ViewportState { pan_x: self.pan_x, pan_y: self.pan_y, scale: self.scale }
    }

    /// Overwrite pan and scale. The scale is clamped, never rejected.
    pub fn set_state(&mut self, state: ViewportState) {
        self.pan_x = state.pan_x;
        self.pan_y = state.pan_y;
        self.set_scale(state.scale);
    }

    /// Set the scale directly, clamped to the policy range.
    ///
    /// Non-finite input leaves the scale unchanged.
    pub fn set_scale(&mut self, scale: f64) {
        if scale.is_finite() {
            self.scale = scale.clamp(self.policy.min_scale, self.policy.max_scale);
        }
    }

    /// Convert a screen-space point (pixels) to world coordinates.
    #[must_use]
    pub fn screen_to_world(&self, screen: Point) -> Point {
        Point {
            x: (screen.x - self.pan_x) / self.scale,
            y: (screen.y - self.pan_y) / self.scale,
        }
    }

    /// Convert a world-space point to screen coordinates (pixels).
    #[must_use]
    pub fn world_to_screen(&self, world: Point) -> Point {
        Point {
            x: world.x * self.scale + self.pan_x,
            y: world.y * self.scale + self.pan_y,
        }
    }

    /// Convert a screen-space distance (pixels) to world-space distance.
    #[must_use]
    pub fn screen_dist_to_world(&self, screen_dist: f64) -> f64 {
        screen_dist / self.scale
    }

    /// Zoom by `factor ^ direction` keeping the world point under `screen` fixed.
    ///
    /// Positive `direction` zooms in, negative zooms out. At the scale limits
    /// the call still re-anchors pan, which is a no-op when the scale did not
    /// change.
    pub fn zoom_at(&mut self, screen: Point, direction: f64) {
        if !direction.is_finite() {
            return;
        }
        let anchor_world = self.screen_to_world(screen);
        let new_scale = (self.scale * self.policy.factor.powf(direction))
            .clamp(self.policy.min_scale, self.policy.max_scale);
        self.scale = new_scale;
        self.pan_x = screen.x - anchor_world.x * new_scale;
        self.pan_y = screen.y - anchor_world.y * new_scale;
    }

    /// Translate the view by a screen-space delta. Panning is unbounded.
    pub fn pan_by(&mut self, delta: Point) {
        self.pan_x += delta.x;
        self.pan_y += delta.y;
    }

    /// Return to 1:1 scale with the world origin at the stage origin.
    pub fn reset(&mut self) {
        self.pan_x = 0.0;
        self.pan_y = 0.0;
        self.scale = 1.0;
    }

    /// Fit a floor into the stage area below the header, never upscaling past 1:1.
    ///
    /// The result is applied to `self` and also returned. Degenerate floor
    /// sizes leave the viewport untouched.
    pub fn auto_fit(&mut self, req: FitRequest) -> ViewportState {
        if req.floor.width <= 0.0 || req.floor.height <= 0.0 {
            return self.state();
        }

        let avail_w = req.stage.width - 2.0 * req.padding;
        let avail_h = req.stage.height - req.header_inset - 2.0 * req.padding;
        let scale = (avail_w / req.floor.width)
            .min(avail_h / req.floor.height)
            .min(1.0)
            .clamp(self.policy.min_scale, self.policy.max_scale);

        let scaled_w = req.floor.width * scale;
        let scaled_h = req.floor.height * scale;
        let body_h = req.stage.height - req.header_inset;

        self.scale = scale;
        self.pan_x = (req.stage.width - scaled_w) / 2.0 - req.floor_origin.x * scale;
        self.pan_y = req.header_inset + (body_h - scaled_h) / 2.0 - req.floor_origin.y * scale;
        self.state()
    }
}
