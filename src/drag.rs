//! Item drag gesture: the state machine that separates "click to select" from "drag to move".
//!
//! ```text
//!            pointer_down (unlocked, gate free)
//!   Idle ─────────────────────────────────────▶ Armed
//!    ▲                                          │ move beyond threshold
//!    │ pointer_up / cancel                      ▼
//!    └────────────────────────────────────── Dragging
//! ```
//!
//! Selection is emitted on every pointer-down, before anything else, even
//! when the floor is locked. Position is committed at most once per gesture,
//! on pointer-up, and only if the pointer travelled past the threshold.
//! Intermediate moves only update a clamped preview.
//!
//! The editor keeps one controller and reuses it for whichever item is
//! pressed; the gesture gate guarantees only one item gesture runs at a time.

#[cfg(test)]
#[path = "drag_test.rs"]
mod drag_test;

use tracing::debug;

use crate::consts::{DRAG_RELEASE_DELAY_MS, DRAG_THRESHOLD_PX};
use crate::error::EditError;
use crate::floor::ItemId;
use crate::geometry::{Anchor, Container};
use crate::gesture::{GestureGate, GestureKind, GestureLease, GestureOwner};
use crate::viewport::{Point, Size};

/// Drag tuning.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragPolicy {
    /// Travel on either axis, in screen pixels, that turns a press into a drag.
    pub threshold_px: f64,
    /// Canvas pan cooldown after the gesture ends.
    pub release_delay_ms: f64,
}

impl Default for DragPolicy {
    fn default() -> Self {
        Self { threshold_px: DRAG_THRESHOLD_PX, release_delay_ms: DRAG_RELEASE_DELAY_MS }
    }
}

/// What is being dragged and where it must stay.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragTarget {
    pub id: ItemId,
    pub anchor: Anchor,
    pub size: Size,
    /// The item's stored position when the press started.
    pub origin: Point,
    pub container: Container,
}

/// Output of the controller, in the order it happened.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragEvent {
    /// The item was pressed; select it.
    Select(ItemId),
    /// Visual-only position while dragging. Not a commit.
    Preview { id: ItemId, position: Point },
    /// Final position for a completed drag. Emitted at most once per gesture.
    Commit { id: ItemId, position: Point },
}

/// Observable phase of the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragPhase {
    Idle,
    Armed,
    Dragging,
}

#[derive(Debug)]
struct DragSession {
    target: DragTarget,
    origin_screen: Point,
    /// Latched once the threshold is crossed; never reverts within a gesture.
    moved: bool,
    /// Last clamped position.
    current: Point,
    lease: GestureLease,
}

/// Pointer state machine for moving one item at a time.
#[derive(Debug, Default)]
pub struct DragController {
    policy: DragPolicy,
    session: Option<DragSession>,
}

impl DragController {
    #[must_use]
    pub fn new(policy: DragPolicy) -> Self {
        Self { policy, session: None }
    }

    #[must_use]
    pub fn phase(&self) -> DragPhase {
        match &self.session {
            None => DragPhase::Idle,
            Some(s) if s.moved => DragPhase::Dragging,
            Some(_) => DragPhase::Armed,
        }
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.session.is_some()
    }

    /// Item id and clamped position to draw instead of the stored one.
    #[must_use]
    pub fn preview(&self) -> Option<(ItemId, Point)> {
        self.session
            .as_ref()
            .filter(|s| s.moved)
            .map(|s| (s.target.id, s.current))
    }

    /// Press on an item.
    ///
    /// Always yields [`DragEvent::Select`] first. When `locked` is set the
    /// gesture stops there. An already-running gesture is cancelled first.
    ///
    /// # Errors
    ///
    /// Returns the selection event together with [`EditError::Locked`] or
    /// [`EditError::GestureBusy`] when no drag could be armed; the selection
    /// must still be applied by the caller.
    pub fn pointer_down(
        &mut self,
        target: DragTarget,
        screen: Point,
        locked: bool,
        gate: &GestureGate,
    ) -> (DragEvent, Result<(), EditError>) {
        self.session = None;
        let select = DragEvent::Select(target.id);

        if locked {
            debug!(id = %target.id, "drag: press on locked floor; select only");
            return (select, Err(EditError::Locked));
        }

        let lease = match gate.acquire(GestureOwner { item: target.id, kind: GestureKind::Drag }) {
            Ok(lease) => lease,
            Err(e) => {
                debug!(id = %target.id, error = %e, "drag: gate busy; select only");
                return (select, Err(e));
            }
        };

        debug!(id = %target.id, "drag: armed");
        self.session = Some(DragSession {
            target,
            origin_screen: screen,
            moved: false,
            current: target.origin,
            lease,
        });
        (select, Ok(()))
    }

    /// Pointer moved. Returns a preview once the gesture is a real drag.
    pub fn pointer_move(&mut self, screen: Point, scale: f64) -> Option<DragEvent> {
        let threshold = self.policy.threshold_px;
        let session = self.session.as_mut()?;

        let dx = screen.x - session.origin_screen.x;
        let dy = screen.y - session.origin_screen.y;
        if !session.moved {
            if dx.abs() <= threshold && dy.abs() <= threshold {
                return None;
            }
            session.moved = true;
            debug!(id = %session.target.id, "drag: threshold crossed");
        }

        let target = session.target;
        let proposed = Point::new(target.origin.x + dx / scale, target.origin.y + dy / scale);
        session.current = target.container.constrain(target.anchor, proposed, target.size);
        Some(DragEvent::Preview { id: target.id, position: session.current })
    }

    /// Pointer released. Returns the single commit if the gesture was a drag.
    pub fn pointer_up(&mut self, screen: Point, scale: f64, now_ms: f64) -> Option<DragEvent> {
        self.pointer_move(screen, scale);
        let session = self.session.take()?;
        let DragSession { target, moved, current, lease, .. } = session;
        lease.release(now_ms, self.policy.release_delay_ms);

        if !moved {
            debug!(id = %target.id, "drag: released without moving");
            return None;
        }
        debug!(id = %target.id, x = current.x, y = current.y, "drag: commit");
        Some(DragEvent::Commit { id: target.id, position: current })
    }

    /// Abandon the gesture without committing anything.
    pub fn cancel(&mut self, now_ms: f64) {
        if let Some(session) = self.session.take() {
            debug!(id = %session.target.id, "drag: cancelled");
            session.lease.release(now_ms, self.policy.release_delay_ms);
        }
    }
}
