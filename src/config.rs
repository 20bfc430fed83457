//! Editor policy configuration parsed from environment variables.
//!
//! Every tunable has a default in [`crate::consts`]. Hosts override them with
//! `FLOORPLAN_*` variables; overrides are validated so a typo fails loudly
//! instead of silently falling back.

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;

use std::env::VarError;

use crate::consts::{FIT_PADDING_PX, HEADER_INSET_PX, ROOM_PADDING};
use crate::drag::DragPolicy;
use crate::error::ErrorCode;
use crate::floor::FloorLimits;
use crate::grid::GridPolicy;
use crate::resize::ResizePolicy;
use crate::viewport::{Size, ZoomPolicy};
use crate::visibility::{TierThresholds, VisibilityPolicy};

/// Errors produced while reading configuration.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    /// A variable was set but is not a finite number.
    #[error("{var} is not a number: {value:?}")]
    InvalidNumber { var: &'static str, value: String },

    /// A value is outside the range that makes sense for it.
    #[error("config value out of range: {0}")]
    OutOfRange(String),
}

impl ErrorCode for ConfigError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidNumber { .. } => "E_CONFIG_PARSE",
            Self::OutOfRange(_) => "E_CONFIG_RANGE",
        }
    }
}

/// All editor policies in one place.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EditorConfig {
    pub zoom: ZoomPolicy,
    pub visibility: VisibilityPolicy,
    pub grid: GridPolicy,
    pub drag: DragPolicy,
    pub resize: ResizePolicy,
    pub floor_limits: FloorLimits,
    /// Clearance between room walls and nested items.
    pub room_padding: f64,
    /// Stage padding on every side for auto-fit.
    pub fit_padding: f64,
    /// Host header height removed from the stage for auto-fit.
    pub header_inset: f64,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            zoom: ZoomPolicy::default(),
            visibility: VisibilityPolicy::default(),
            grid: GridPolicy::default(),
            drag: DragPolicy::default(),
            resize: ResizePolicy::default(),
            floor_limits: FloorLimits::default(),
            room_padding: ROOM_PADDING,
            fit_padding: FIT_PADDING_PX,
            header_inset: HEADER_INSET_PX,
        }
    }
}

impl EditorConfig {
    /// Build config from environment variables.
    ///
    /// Optional (defaults from [`crate::consts`]):
    /// - `FLOORPLAN_MIN_SCALE`, `FLOORPLAN_MAX_SCALE`, `FLOORPLAN_ZOOM_FACTOR`
    /// - `FLOORPLAN_FIT_PADDING`, `FLOORPLAN_HEADER_INSET`
    /// - `FLOORPLAN_VISIBILITY_BUFFER`
    /// - `FLOORPLAN_TIER_ICON`, `FLOORPLAN_TIER_TEXT`, `FLOORPLAN_TIER_FULL`
    /// - `FLOORPLAN_GRID_SIZE`, `FLOORPLAN_GRID_HIDE`, `FLOORPLAN_GRID_FINE`
    /// - `FLOORPLAN_DRAG_THRESHOLD`, `FLOORPLAN_DRAG_RELEASE_MS`
    /// - `FLOORPLAN_RESIZE_RELEASE_MS`, `FLOORPLAN_HANDLE_HIDE`
    /// - `FLOORPLAN_MIN_ROOM_WIDTH`, `FLOORPLAN_MIN_ROOM_HEIGHT`, `FLOORPLAN_ROOM_PADDING`
    /// - `FLOORPLAN_FLOOR_MIN_WIDTH`, `FLOORPLAN_FLOOR_MAX_WIDTH`
    /// - `FLOORPLAN_FLOOR_MIN_HEIGHT`, `FLOORPLAN_FLOOR_MAX_HEIGHT`
    ///
    /// # Errors
    ///
    /// See [`from_vars`](Self::from_vars).
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(|key| env_value(std::env::var(key)))
    }

    /// Build config from an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// [`ConfigError::InvalidNumber`] for an unparsable value and
    /// [`ConfigError::OutOfRange`] when the result fails [`validate`](Self::validate).
    pub fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let env = Vars { lookup: &lookup };
        let d = Self::default();

        let cfg = Self {
            zoom: ZoomPolicy {
                min_scale: env.f64("FLOORPLAN_MIN_SCALE", d.zoom.min_scale)?,
                max_scale: env.f64("FLOORPLAN_MAX_SCALE", d.zoom.max_scale)?,
                factor: env.f64("FLOORPLAN_ZOOM_FACTOR", d.zoom.factor)?,
            },
            visibility: VisibilityPolicy {
                buffer_px: env.f64("FLOORPLAN_VISIBILITY_BUFFER", d.visibility.buffer_px)?,
                tiers: TierThresholds {
                    icon: env.f64("FLOORPLAN_TIER_ICON", d.visibility.tiers.icon)?,
                    text: env.f64("FLOORPLAN_TIER_TEXT", d.visibility.tiers.text)?,
                    full: env.f64("FLOORPLAN_TIER_FULL", d.visibility.tiers.full)?,
                },
            },
            grid: GridPolicy {
                grid_size: env.f64("FLOORPLAN_GRID_SIZE", d.grid.grid_size)?,
                hide_below: env.f64("FLOORPLAN_GRID_HIDE", d.grid.hide_below)?,
                fine_above: env.f64("FLOORPLAN_GRID_FINE", d.grid.fine_above)?,
            },
            drag: DragPolicy {
                threshold_px: env.f64("FLOORPLAN_DRAG_THRESHOLD", d.drag.threshold_px)?,
                release_delay_ms: env.f64("FLOORPLAN_DRAG_RELEASE_MS", d.drag.release_delay_ms)?,
            },
            resize: ResizePolicy {
                min_size: Size::new(
                    env.f64("FLOORPLAN_MIN_ROOM_WIDTH", d.resize.min_size.width)?,
                    env.f64("FLOORPLAN_MIN_ROOM_HEIGHT", d.resize.min_size.height)?,
                ),
                handle_hide_scale: env.f64("FLOORPLAN_HANDLE_HIDE", d.resize.handle_hide_scale)?,
                release_delay_ms: env.f64("FLOORPLAN_RESIZE_RELEASE_MS", d.resize.release_delay_ms)?,
            },
            floor_limits: FloorLimits {
                min_width: env.f64("FLOORPLAN_FLOOR_MIN_WIDTH", d.floor_limits.min_width)?,
                max_width: env.f64("FLOORPLAN_FLOOR_MAX_WIDTH", d.floor_limits.max_width)?,
                min_height: env.f64("FLOORPLAN_FLOOR_MIN_HEIGHT", d.floor_limits.min_height)?,
                max_height: env.f64("FLOORPLAN_FLOOR_MAX_HEIGHT", d.floor_limits.max_height)?,
            },
            room_padding: env.f64("FLOORPLAN_ROOM_PADDING", d.room_padding)?,
            fit_padding: env.f64("FLOORPLAN_FIT_PADDING", d.fit_padding)?,
            header_inset: env.f64("FLOORPLAN_HEADER_INSET", d.header_inset)?,
        };
        cfg.validate()?;
        Ok(cfg)
    }

    /// Check cross-field constraints.
    ///
    /// # Errors
    ///
    /// [`ConfigError::OutOfRange`] naming the first violated constraint.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let z = &self.zoom;
        if z.min_scale <= 0.0 || z.min_scale > z.max_scale {
            return Err(ConfigError::OutOfRange(format!(
                "zoom scale range [{}, {}] must be positive and ordered",
                z.min_scale, z.max_scale
            )));
        }
        if z.factor <= 1.0 {
            return Err(ConfigError::OutOfRange(format!("zoom factor {} must exceed 1", z.factor)));
        }

        let t = &self.visibility.tiers;
        if !(t.icon <= t.text && t.text <= t.full) {
            return Err(ConfigError::OutOfRange(format!(
                "tier thresholds {} / {} / {} must be non-decreasing",
                t.icon, t.text, t.full
            )));
        }

        if self.grid.grid_size <= 0.0 {
            return Err(ConfigError::OutOfRange(format!("grid size {} must be positive", self.grid.grid_size)));
        }

        let f = &self.floor_limits;
        if f.min_width <= 0.0 || f.min_width > f.max_width || f.min_height <= 0.0 || f.min_height > f.max_height {
            return Err(ConfigError::OutOfRange(format!(
                "floor limits {}..{} x {}..{} must be positive and ordered",
                f.min_width, f.max_width, f.min_height, f.max_height
            )));
        }

        let non_negative = [
            ("visibility buffer", self.visibility.buffer_px),
            ("drag threshold", self.drag.threshold_px),
            ("drag release delay", self.drag.release_delay_ms),
            ("resize release delay", self.resize.release_delay_ms),
            ("min room width", self.resize.min_size.width),
            ("min room height", self.resize.min_size.height),
            ("room padding", self.room_padding),
            ("fit padding", self.fit_padding),
            ("header inset", self.header_inset),
        ];
        if let Some((name, value)) = non_negative.iter().find(|(_, v)| *v < 0.0) {
            return Err(ConfigError::OutOfRange(format!("{name} {value} must not be negative")));
        }
        Ok(())
    }
}

struct Vars<'a, F: Fn(&str) -> Option<String>> {
    lookup: &'a F,
}

/// Map an environment read to an override. An unset variable means "use
/// the default"; a non-UTF-8 value is passed on lossily so parsing rejects it.
fn env_value(read: Result<String, VarError>) -> Option<String> {
    match read {
        Ok(value) => Some(value),
        Err(VarError::NotPresent) => None,
        Err(VarError::NotUnicode(raw)) => Some(raw.to_string_lossy().into_owned()),
    }
}

impl<F: Fn(&str) -> Option<String>> Vars<'_, F> {
    fn f64(&self, var: &'static str, default: f64) -> Result<f64, ConfigError> {
        let Some(raw) = (self.lookup)(var) else {
            return Ok(default);
        };
        match raw.trim().parse::<f64>() {
            Ok(v) if v.is_finite() => Ok(v),
            _ => Err(ConfigError::InvalidNumber { var, value: raw }),
        }
    }
}
