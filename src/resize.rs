//! Room resize gesture driven by the right, bottom, or corner handle.
//!
//! The room's top-left corner is fixed; only width and height change. Unlike
//! item drag, every move commits the new size so the room's contents reflow
//! live. The cadence differs from drag on purpose and is kept that way.

#[cfg(test)]
#[path = "resize_test.rs"]
mod resize_test;

use tracing::debug;

use crate::consts::{HANDLE_HIDE_SCALE, MIN_ROOM_HEIGHT, MIN_ROOM_WIDTH, RESIZE_RELEASE_DELAY_MS};
use crate::error::EditError;
use crate::floor::ItemId;
use crate::geometry::Rect;
use crate::gesture::{GestureGate, GestureKind, GestureLease, GestureOwner};
use crate::viewport::{Point, Size};

/// Which handle is being dragged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResizeDirection {
    Right,
    Bottom,
    Corner,
}

impl ResizeDirection {
    #[must_use]
    pub fn affects_width(self) -> bool {
        matches!(self, Self::Right | Self::Corner)
    }

    #[must_use]
    pub fn affects_height(self) -> bool {
        matches!(self, Self::Bottom | Self::Corner)
    }
}

/// Resize tuning.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResizePolicy {
    pub min_size: Size,
    /// Handles are hidden below this zoom.
    pub handle_hide_scale: f64,
    pub release_delay_ms: f64,
}

impl Default for ResizePolicy {
    fn default() -> Self {
        Self {
            min_size: Size::new(MIN_ROOM_WIDTH, MIN_ROOM_HEIGHT),
            handle_hide_scale: HANDLE_HIDE_SCALE,
            release_delay_ms: RESIZE_RELEASE_DELAY_MS,
        }
    }
}

/// The room being resized.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResizeTarget {
    pub id: ItemId,
    /// Fixed top-left corner, in world space.
    pub top_left: Point,
    pub size: Size,
    /// The room may not grow past these bounds.
    pub floor: Rect,
    /// Size the room's nested items need; the room never shrinks below it.
    pub content_min: Size,
}

/// Live size update; the caller commits each one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResizeCommit {
    pub id: ItemId,
    pub size: Size,
}

#[derive(Debug)]
struct ResizeSession {
    target: ResizeTarget,
    direction: ResizeDirection,
    origin_pointer: Point,
    current: Size,
    lease: GestureLease,
}

/// Handle-drag state machine for rooms.
#[derive(Debug, Default)]
pub struct ResizeController {
    policy: ResizePolicy,
    session: Option<ResizeSession>,
}

impl ResizeController {
    #[must_use]
    pub fn new(policy: ResizePolicy) -> Self {
        Self { policy, session: None }
    }

    #[must_use]
    pub fn policy(&self) -> &ResizePolicy {
        &self.policy
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.session.is_some()
    }

    /// Direction and item of the running gesture.
    #[must_use]
    pub fn active(&self) -> Option<(ItemId, ResizeDirection)> {
        self.session.as_ref().map(|s| (s.target.id, s.direction))
    }

    /// Whether resize handles should be drawn and accept input.
    #[must_use]
    pub fn handles_visible(&self, selected: bool, locked: bool, scale: f64) -> bool {
        selected && !locked && scale >= self.policy.handle_hide_scale
    }

    /// Press on a handle. Claims the gesture gate, which also keeps the room's
    /// own drag and the canvas pan from starting.
    ///
    /// # Errors
    ///
    /// [`EditError::Locked`] on a locked floor, [`EditError::GestureBusy`]
    /// when another gesture owns the gate.
    pub fn handle_down(
        &mut self,
        target: ResizeTarget,
        direction: ResizeDirection,
        screen: Point,
        locked: bool,
        gate: &GestureGate,
    ) -> Result<(), EditError> {
        self.session = None;
        if locked {
            debug!(id = %target.id, "resize: refused on locked floor");
            return Err(EditError::Locked);
        }
        let lease = gate.acquire(GestureOwner { item: target.id, kind: GestureKind::Resize })?;
        debug!(id = %target.id, ?direction, "resize: started");
        self.session = Some(ResizeSession {
            target,
            direction,
            origin_pointer: screen,
            current: target.size,
            lease,
        });
        Ok(())
    }

    /// Pointer moved. Every call during a gesture yields a commit.
    pub fn handle_move(&mut self, screen: Point, scale: f64) -> Option<ResizeCommit> {
        let policy = self.policy;
        let session = self.session.as_mut()?;
        let target = session.target;

        let dx = (screen.x - session.origin_pointer.x) / scale;
        let dy = (screen.y - session.origin_pointer.y) / scale;

        // The floor edge caps growth; the minimum (policy or contents) wins over the cap.
        let min_width = policy.min_size.width.max(target.content_min.width);
        let min_height = policy.min_size.height.max(target.content_min.height);
        let mut size = target.size;
        if session.direction.affects_width() {
            let cap = target.floor.right() - target.top_left.x;
            size.width = (target.size.width + dx).min(cap).max(min_width);
        }
        if session.direction.affects_height() {
            let cap = target.floor.bottom() - target.top_left.y;
            size.height = (target.size.height + dy).min(cap).max(min_height);
        }
        session.current = size;
        Some(ResizeCommit { id: target.id, size })
    }

    /// Pointer released. Ends the gesture and starts the pan cooldown.
    ///
    /// Returns the last size for reference; it was already committed by the
    /// final move.
    pub fn handle_up(&mut self, now_ms: f64) -> Option<ResizeCommit> {
        let session = self.session.take()?;
        let ResizeSession { target, current, lease, .. } = session;
        lease.release(now_ms, self.policy.release_delay_ms);
        debug!(id = %target.id, width = current.width, height = current.height, "resize: finished");
        Some(ResizeCommit { id: target.id, size: current })
    }

    /// Abandon the gesture. Sizes already committed by moves stay committed.
    pub fn cancel(&mut self, now_ms: f64) {
        if let Some(session) = self.session.take() {
            debug!(id = %session.target.id, "resize: cancelled");
            session.lease.release(now_ms, self.policy.release_delay_ms);
        }
    }
}
