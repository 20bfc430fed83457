//! Gesture ownership: at most one item gesture at a time, and no canvas pan while one runs.
//!
//! A controller that wants to drag or resize first acquires a
//! [`GestureLease`] from the [`GestureGate`]. While any lease is held the
//! canvas pan is disabled. The lease is released explicitly on commit or
//! cancel, with an optional cooldown so the trailing click of the same
//! gesture cannot start a pan. If a lease is dropped without being released
//! (an early return, a replaced controller) the gate is freed immediately.
//!
//! The gate is single-threaded (`Rc<Cell<_>>`); the editor runs on one event
//! loop and never shares it across threads.

#[cfg(test)]
#[path = "gesture_test.rs"]
mod gesture_test;

use std::cell::Cell;
use std::rc::Rc;

use crate::error::EditError;
use crate::floor::ItemId;

/// Which kind of gesture holds the gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureKind {
    Drag,
    Resize,
}

/// Current holder of the gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GestureOwner {
    pub item: ItemId,
    pub kind: GestureKind,
}

#[derive(Debug, Clone, Copy, Default)]
struct GateState {
    owner: Option<GestureOwner>,
    /// Canvas pan stays disabled until this time, in host milliseconds.
    cooldown_until_ms: f64,
}

/// Shared mutual-exclusion token for item gestures.
#[derive(Debug, Clone, Default)]
pub struct GestureGate {
    state: Rc<Cell<GateState>>,
}

impl GestureGate {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim the gate for `owner`.
    ///
    /// # Errors
    ///
    /// Returns [`EditError::GestureBusy`] while another lease is held.
    pub fn acquire(&self, owner: GestureOwner) -> Result<GestureLease, EditError> {
        let mut state = self.state.get();
        if state.owner.is_some() {
            return Err(EditError::GestureBusy);
        }
        state.owner = Some(owner);
        self.state.set(state);
        Ok(GestureLease { state: Rc::clone(&self.state), owner, released: false })
    }

    /// The gesture currently holding the gate, if any.
    #[must_use]
    pub fn owner(&self) -> Option<GestureOwner> {
        self.state.get().owner
    }

    #[must_use]
    pub fn is_held(&self) -> bool {
        self.owner().is_some()
    }

    /// Whether the canvas may pan at `now_ms`.
    #[must_use]
    pub fn pan_enabled(&self, now_ms: f64) -> bool {
        let state = self.state.get();
        state.owner.is_none() && now_ms >= state.cooldown_until_ms
    }
}

/// Proof of gate ownership. Dropping it frees the gate.
#[derive(Debug)]
pub struct GestureLease {
    state: Rc<Cell<GateState>>,
    owner: GestureOwner,
    released: bool,
}

impl GestureLease {
    #[must_use]
    pub fn owner(&self) -> GestureOwner {
        self.owner
    }

    /// Free the gate, keeping canvas pan disabled for `delay_ms` after `now_ms`.
    pub fn release(mut self, now_ms: f64, delay_ms: f64) {
        self.free(Some(now_ms + delay_ms));
    }

    fn free(&mut self, cooldown_until_ms: Option<f64>) {
        if self.released {
            return;
        }
        self.released = true;
        let mut state = self.state.get();
        state.owner = None;
        if let Some(until) = cooldown_until_ms {
            state.cooldown_until_ms = state.cooldown_until_ms.max(until);
        }
        self.state.set(state);
    }
}

impl Drop for GestureLease {
    fn drop(&mut self) {
        self.free(None);
    }
}
