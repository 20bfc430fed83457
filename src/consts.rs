//! Shared numeric constants for the floor-plan engine.
//!
//! These are the defaults behind [`crate::config::EditorConfig`]; hosts that
//! need a different policy override them through config rather than editing
//! these values.

// ── Viewport ────────────────────────────────────────────────────

/// Smallest allowed zoom scale (screen pixels per world unit).
pub const MIN_SCALE: f64 = 0.1;

/// Largest allowed zoom scale.
pub const MAX_SCALE: f64 = 3.0;

/// Multiplicative zoom step applied per wheel notch.
pub const ZOOM_FACTOR: f64 = 1.1;

/// Stage padding reserved on every side when auto-fitting a floor, in pixels.
pub const FIT_PADDING_PX: f64 = 100.0;

/// Height of the host's header bar, subtracted from the stage when fitting.
pub const HEADER_INSET_PX: f64 = 64.0;

// ── Visibility ──────────────────────────────────────────────────

/// Extra screen-space margin around the stage when culling items.
pub const VISIBILITY_BUFFER_PX: f64 = 100.0;

/// Below this scale only the floor background is drawn.
pub const TIER_ICON_SCALE: f64 = 0.4;

/// At or above this scale item labels are drawn.
pub const TIER_TEXT_SCALE: f64 = 0.5;

/// At or above this scale status indicators are drawn.
pub const TIER_FULL_SCALE: f64 = 0.7;

// ── Grid ────────────────────────────────────────────────────────

/// Grid pitch in world units at normal zoom.
pub const GRID_SIZE: f64 = 40.0;

/// Below this scale the grid is not drawn at all.
pub const GRID_HIDE_SCALE: f64 = 0.3;

/// Above this scale the fine pitch is used; otherwise it doubles.
pub const GRID_FINE_SCALE: f64 = 0.7;

// ── Gestures ────────────────────────────────────────────────────

/// Pointer travel in screen pixels before a press becomes a drag.
pub const DRAG_THRESHOLD_PX: f64 = 3.0;

/// Delay before canvas pan re-enables after a drag gesture ends.
pub const DRAG_RELEASE_DELAY_MS: f64 = 50.0;

/// Delay before canvas pan and room drag re-enable after a resize ends.
pub const RESIZE_RELEASE_DELAY_MS: f64 = 100.0;

/// Minimum room width in world units.
pub const MIN_ROOM_WIDTH: f64 = 300.0;

/// Minimum room height in world units.
pub const MIN_ROOM_HEIGHT: f64 = 200.0;

/// Below this scale resize handles are hidden.
pub const HANDLE_HIDE_SCALE: f64 = 0.3;

// ── Containers ──────────────────────────────────────────────────

/// Inner padding kept between a room's walls and the items inside it.
pub const ROOM_PADDING: f64 = 8.0;

/// Floor width bounds in world units.
pub const FLOOR_MIN_WIDTH: f64 = 800.0;
pub const FLOOR_MAX_WIDTH: f64 = 3000.0;

/// Floor height bounds in world units.
pub const FLOOR_MIN_HEIGHT: f64 = 600.0;
pub const FLOOR_MAX_HEIGHT: f64 = 2400.0;
