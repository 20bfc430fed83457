//! Editor core: routes host input events through the gesture controllers
//! into the item store, and hands back a list of [`Action`]s for the host.
//!
//! The core owns the viewport, both gesture controllers, and the gesture gate.
//! It is generic over the store so hosts can put their own state container
//! behind [`ItemStore`]; [`FloorStore`] is the default.
//!
//! Timing-sensitive calls take `now_ms`, the host's monotonic clock in
//! milliseconds, so release cooldowns are testable without real time.

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

use tracing::{debug, warn};

use crate::config::EditorConfig;
use crate::drag::{DragController, DragEvent, DragTarget};
use crate::drop_zone::{DropPayload, DropZoneResolver};
use crate::error::EditError;
use crate::floor::{Floor, ItemId, SpatialItem, TableStatus};
use crate::gesture::GestureGate;
use crate::render::{build_frame, FrameInput, RenderFrame};
use crate::resize::{ResizeController, ResizeDirection, ResizeTarget};
use crate::store::{FloorStore, ItemStore, StoreAction};
use crate::viewport::{FitRequest, Point, Size, Viewport, ViewportState};

/// Actions returned from input handlers for the host to process.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Selected(Option<ItemId>),
    ItemMoved { id: ItemId, position: Point },
    ItemResized { id: ItemId, size: Size },
    ItemCreated(SpatialItem),
    ItemDeleted { id: ItemId },
    StatusChanged { id: ItemId, status: TableStatus },
    /// The operation was refused; the host decides whether to tell the user.
    Rejected(EditError),
    RenderNeeded,
}

/// Core editor state, independent of any windowing or DOM layer.
#[derive(Debug)]
pub struct EditorCore<S: ItemStore = FloorStore> {
    store: S,
    viewport: Viewport,
    config: EditorConfig,
    gate: GestureGate,
    drag: DragController,
    resize: ResizeController,
    drop_zone: DropZoneResolver,
    stage: Size,
}

impl<S: ItemStore> EditorCore<S> {
    #[must_use]
    pub fn new(store: S, config: EditorConfig) -> Self {
        Self {
            store,
            viewport: Viewport::new(config.zoom),
            gate: GestureGate::new(),
            drag: DragController::new(config.drag),
            resize: ResizeController::new(config.resize),
            drop_zone: DropZoneResolver::new(config.room_padding),
            stage: Size::new(0.0, 0.0),
            config,
        }
    }

    // --- Queries ---

    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    #[must_use]
    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    #[must_use]
    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    #[must_use]
    pub fn stage(&self) -> Size {
        self.stage
    }

    #[must_use]
    pub fn selection(&self) -> Option<ItemId> {
        self.store.selected()
    }

    /// Whether the canvas accepts pan input at `now_ms`.
    #[must_use]
    pub fn pan_enabled(&self, now_ms: f64) -> bool {
        self.gate.pan_enabled(now_ms)
    }

    /// Whether an item drag or room resize is in progress.
    #[must_use]
    pub fn gesture_active(&self) -> bool {
        self.drag.is_active() || self.resize.is_active()
    }

    /// Uncommitted drag position, in the dragged item's own frame.
    #[must_use]
    pub fn drag_preview(&self) -> Option<(ItemId, Point)> {
        self.drag.preview()
    }

    // --- Viewport ---

    /// Update the stage size reported by the host layout.
    pub fn set_stage_size(&mut self, stage: Size) {
        self.stage = stage;
    }

    /// Fit the whole floor into the stage below the header.
    pub fn fit_to_floor(&mut self) -> ViewportState {
        let req = FitRequest {
            stage: self.stage,
            floor: self.store.floor().size(),
            floor_origin: Point::new(0.0, 0.0),
            padding: self.config.fit_padding,
            header_inset: self.config.header_inset,
        };
        let state = self.viewport.auto_fit(req);
        debug!(scale = state.scale, pan_x = state.pan_x, pan_y = state.pan_y, "viewport: fit to floor");
        state
    }

    /// Wheel zoom anchored at the pointer. Positive `direction` zooms in.
    pub fn on_wheel(&mut self, screen: Point, direction: f64) -> Vec<Action> {
        self.viewport.zoom_at(screen, direction);
        vec![Action::RenderNeeded]
    }

    /// Canvas pan. Ignored while an item gesture holds the gate or its cooldown runs.
    pub fn on_stage_pan(&mut self, delta: Point, now_ms: f64) -> Vec<Action> {
        if !self.gate.pan_enabled(now_ms) {
            debug!("viewport: pan suppressed by active gesture");
            return Vec::new();
        }
        self.viewport.pan_by(delta);
        vec![Action::RenderNeeded]
    }

    // --- Pointer input ---

    /// Press on an item: select it, then arm a drag. On a locked floor the
    /// selection still happens and a `Rejected(Locked)` follows it.
    pub fn on_item_pointer_down(&mut self, id: ItemId, screen: Point) -> Vec<Action> {
        let floor = self.store.floor();
        let Some(item) = floor.layout_items.iter().find(|item| item.id == id) else {
            return vec![self.reject(EditError::ItemNotFound(id))];
        };
        let target = DragTarget {
            id,
            anchor: item.kind.anchor(),
            size: item.size(),
            origin: item.position(),
            container: floor.container_for(item, self.config.room_padding),
        };
        let locked = self.store.is_locked();

        let (select, armed) = self.drag.pointer_down(target, screen, locked, &self.gate);
        let mut actions = Vec::new();
        if let DragEvent::Select(id) = select {
            actions.extend(self.select(Some(id)));
        }
        match armed {
            Ok(()) => {}
            Err(EditError::Locked) => actions.push(self.reject(EditError::Locked)),
            Err(e) => debug!(%id, error = %e, "editor: press did not arm a drag"),
        }
        actions
    }

    /// Press on a room's resize handle.
    pub fn on_handle_down(&mut self, id: ItemId, direction: ResizeDirection, screen: Point) -> Vec<Action> {
        let floor = self.store.floor();
        let Some(room) = floor.layout_items.iter().find(|item| item.id == id) else {
            return vec![self.reject(EditError::ItemNotFound(id))];
        };
        if !room.kind.is_room() {
            debug!(%id, "editor: resize handle on a non-room item ignored");
            return Vec::new();
        }
        let locked = self.store.is_locked();
        let selected = self.store.selected() == Some(id);
        if !locked && !self.resize.handles_visible(selected, locked, self.viewport.scale()) {
            debug!(%id, selected, scale = self.viewport.scale(), "editor: press on a hidden resize handle ignored");
            return Vec::new();
        }
        let target = ResizeTarget {
            id,
            top_left: room.position(),
            size: room.size(),
            floor: floor.bounds(),
            content_min: floor.content_extent(room, self.config.room_padding),
        };
        match self.resize.handle_down(target, direction, screen, locked, &self.gate) {
            Ok(()) => Vec::new(),
            Err(e) => vec![self.reject(e)],
        }
    }

    /// Pointer moved anywhere on the stage.
    pub fn on_pointer_move(&mut self, screen: Point) -> Vec<Action> {
        let scale = self.viewport.scale();
        if self.resize.is_active() {
            let Some(commit) = self.resize.handle_move(screen, scale) else {
                return Vec::new();
            };
            let action = StoreAction::CommitResize { id: commit.id, size: commit.size };
            return match self.dispatch(action, commit.id) {
                Ok(()) => vec![Action::ItemResized { id: commit.id, size: commit.size }, Action::RenderNeeded],
                Err(e) => vec![self.reject(e)],
            };
        }
        match self.drag.pointer_move(screen, scale) {
            Some(DragEvent::Preview { .. }) => vec![Action::RenderNeeded],
            _ => Vec::new(),
        }
    }

    /// Pointer released anywhere on the stage.
    pub fn on_pointer_up(&mut self, screen: Point, now_ms: f64) -> Vec<Action> {
        if self.resize.is_active() {
            return match self.resize.handle_up(now_ms) {
                Some(_) => vec![Action::RenderNeeded],
                None => Vec::new(),
            };
        }
        let scale = self.viewport.scale();
        let Some(DragEvent::Commit { id, position }) = self.drag.pointer_up(screen, scale, now_ms) else {
            return Vec::new();
        };
        match self.dispatch(StoreAction::CommitMove { id, position }, id) {
            Ok(()) => vec![Action::ItemMoved { id, position }, Action::RenderNeeded],
            Err(e) => vec![self.reject(e), Action::RenderNeeded],
        }
    }

    /// Abandon any running gesture without committing (pointer capture lost).
    pub fn cancel_gesture(&mut self, now_ms: f64) -> Vec<Action> {
        if !self.gesture_active() {
            return Vec::new();
        }
        self.drag.cancel(now_ms);
        self.resize.cancel(now_ms);
        vec![Action::RenderNeeded]
    }

    // --- Commands ---

    /// Select an item, or clear the selection. Allowed on locked floors.
    pub fn select(&mut self, id: Option<ItemId>) -> Vec<Action> {
        match self.store.dispatch(StoreAction::Select(id)).into_result(id.unwrap_or_default()) {
            Ok(()) => vec![Action::Selected(id), Action::RenderNeeded],
            Err(e) => vec![self.reject(e)],
        }
    }

    /// Create an item from an external drop at a screen point.
    pub fn on_drop(&mut self, screen: Point, payload: &DropPayload) -> Vec<Action> {
        match self.drop_zone.drop_item(&mut self.store, &self.viewport, screen, payload) {
            Ok(item) => vec![Action::ItemCreated(item), Action::RenderNeeded],
            Err(e) => vec![Action::Rejected(e)],
        }
    }

    /// Delete an item; deleting a room removes its contents too.
    pub fn delete_item(&mut self, id: ItemId, now_ms: f64) -> Vec<Action> {
        if self.store.is_locked() {
            return vec![self.reject(EditError::Locked)];
        }
        if self.gesture_active() {
            self.cancel_gesture(now_ms);
        }
        match self.dispatch(StoreAction::Delete(id), id) {
            Ok(()) => vec![Action::ItemDeleted { id }, Action::RenderNeeded],
            Err(e) => vec![self.reject(e)],
        }
    }

    /// Change a table's status. Allowed on locked floors.
    pub fn set_status(&mut self, id: ItemId, status: TableStatus) -> Vec<Action> {
        match self.dispatch(StoreAction::SetStatus { id, status }, id) {
            Ok(()) => vec![Action::StatusChanged { id, status }, Action::RenderNeeded],
            Err(e) => vec![self.reject(e)],
        }
    }

    // --- Render ---

    /// Snapshot of what to draw this frame.
    #[must_use]
    pub fn render_frame(&self) -> RenderFrame {
        build_frame(&FrameInput {
            floor: self.store.floor(),
            viewport: &self.viewport,
            stage: self.stage,
            selected: self.store.selected(),
            preview: self.drag.preview(),
            visibility: &self.config.visibility,
            grid: &self.config.grid,
            resize: &self.resize,
        })
    }

    // --- Internals ---

    fn dispatch(&mut self, action: StoreAction, id: ItemId) -> Result<(), EditError> {
        self.store.dispatch(action).into_result(id)
    }

    fn reject(&self, error: EditError) -> Action {
        warn!(floor_id = %self.store.floor().id, error = %error, "editor: operation rejected");
        Action::Rejected(error)
    }
}

impl EditorCore<FloorStore> {
    /// Editor over an in-memory store holding `floor`.
    #[must_use]
    pub fn with_floor(floor: Floor, config: EditorConfig) -> Self {
        Self::new(FloorStore::new(floor), config)
    }

    /// Replace the floor wholesale (switching floors), dropping any gesture,
    /// and fit the new floor into the stage.
    pub fn load_floor(&mut self, floor: Floor, now_ms: f64) -> ViewportState {
        self.cancel_gesture(now_ms);
        self.store.load_floor(floor);
        self.fit_to_floor()
    }

    pub fn set_locked(&mut self, locked: bool, now_ms: f64) {
        if locked {
            self.cancel_gesture(now_ms);
        }
        self.store.set_locked(locked);
    }

    pub fn store_mut(&mut self) -> &mut FloorStore {
        &mut self.store
    }
}
