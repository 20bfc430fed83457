//! Item store: the dispatch contract the engine commits into, and the
//! in-memory implementation backed by a single [`Floor`].
//!
//! The engine never mutates items directly. Every committed change is a
//! [`StoreAction`] passed to [`ItemStore::dispatch`], which reports what
//! happened as a [`DispatchOutcome`] instead of failing. A locked floor turns
//! every mutation except selection and table status into
//! [`DispatchOutcome::Locked`].

#[cfg(test)]
#[path = "store_test.rs"]
mod store_test;

use tracing::debug;

use crate::error::EditError;
use crate::floor::{Floor, ItemId, ItemKind, SpatialItem, TableStatus};
use crate::viewport::{Point, Size};

/// A change request sent to the item store.
#[derive(Debug, Clone, PartialEq)]
pub enum StoreAction {
    /// Select an item, or clear the selection with `None`.
    Select(Option<ItemId>),
    /// Commit a new anchor position for an item.
    CommitMove { id: ItemId, position: Point },
    /// Commit a new size for an item. The anchor does not move.
    CommitResize { id: ItemId, size: Size },
    /// Add a new item to the floor.
    CreateItem(SpatialItem),
    /// Remove an item. Removing a room also removes everything inside it.
    Delete(ItemId),
    /// Change a table's occupancy status. Allowed on locked floors.
    SetStatus { id: ItemId, status: TableStatus },
}

impl StoreAction {
    /// Whether this action changes layout and is therefore refused on a locked floor.
    #[must_use]
    pub fn is_mutation(&self) -> bool {
        !matches!(self, Self::Select(_) | Self::SetStatus { .. })
    }
}

/// Result of a dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// The action was applied.
    Applied,
    /// The floor is locked and the action was ignored.
    Locked,
    /// The action referenced an item that does not exist.
    NotFound,
    /// The action does not apply to this kind of item (e.g. status on a room).
    Unsupported,
}

impl DispatchOutcome {
    #[must_use]
    pub fn is_applied(self) -> bool {
        matches!(self, Self::Applied)
    }

    /// Convert into a `Result`, naming `id` for the not-found case.
    ///
    /// # Errors
    ///
    /// `Locked` maps to [`EditError::Locked`]; `NotFound` and `Unsupported`
    /// map to [`EditError::ItemNotFound`].
    pub fn into_result(self, id: ItemId) -> Result<(), EditError> {
        match self {
            Self::Applied => Ok(()),
            Self::Locked => Err(EditError::Locked),
            Self::NotFound | Self::Unsupported => Err(EditError::ItemNotFound(id)),
        }
    }
}

/// Read model plus dispatch capability over one floor's items.
pub trait ItemStore {
    /// Apply an action. Never panics; every refusal is reported in the outcome.
    fn dispatch(&mut self, action: StoreAction) -> DispatchOutcome;

    /// The floor currently held by the store.
    fn floor(&self) -> &Floor;

    /// The currently selected item, if any.
    fn selected(&self) -> Option<ItemId>;

    fn items(&self) -> &[SpatialItem] {
        &self.floor().layout_items
    }

    fn item(&self, id: &ItemId) -> Option<&SpatialItem> {
        self.items().iter().find(|item| item.id == *id)
    }

    fn is_locked(&self) -> bool {
        self.floor().is_locked
    }
}

/// In-memory [`ItemStore`] over a single floor.
#[derive(Debug, Clone)]
pub struct FloorStore {
    floor: Floor,
    selected: Option<ItemId>,
}

impl FloorStore {
    #[must_use]
    pub fn new(floor: Floor) -> Self {
        Self { floor, selected: None }
    }

    /// Replace the whole floor (switching floors). Clears the selection.
    pub fn load_floor(&mut self, floor: Floor) {
        self.floor = floor;
        self.selected = None;
    }

    /// Take the floor out for saving.
    #[must_use]
    pub fn snapshot(&self) -> Floor {
        self.floor.clone()
    }

    /// Lock or unlock editing. Locking is allowed at any time.
    pub fn set_locked(&mut self, locked: bool) {
        self.floor.is_locked = locked;
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.floor.name = name.into();
    }

    /// Change the floor dimensions. Top-level items left outside a smaller
    /// floor are pulled back in; returns the ids that moved.
    pub fn set_size(&mut self, size: Size) -> Vec<ItemId> {
        self.floor.width = size.width;
        self.floor.height = size.height;
        self.floor.clamp_to_bounds()
    }

    /// Apply a backend-assigned version after a successful save.
    pub fn set_version(&mut self, version: u64) {
        self.floor.version = version;
    }

    fn item_mut(&mut self, id: &ItemId) -> Option<&mut SpatialItem> {
        self.floor.layout_items.iter_mut().find(|item| item.id == *id)
    }

    fn apply(&mut self, action: StoreAction) -> DispatchOutcome {
        match action {
            StoreAction::Select(None) => {
                self.selected = None;
                DispatchOutcome::Applied
            }
            StoreAction::Select(Some(id)) => {
                if self.item(&id).is_none() {
                    return DispatchOutcome::NotFound;
                }
                self.selected = Some(id);
                DispatchOutcome::Applied
            }
            StoreAction::CommitMove { id, position } => {
                let Some(item) = self.item_mut(&id) else {
                    return DispatchOutcome::NotFound;
                };
                item.x = position.x;
                item.y = position.y;
                DispatchOutcome::Applied
            }
            StoreAction::CommitResize { id, size } => {
                let Some(item) = self.item_mut(&id) else {
                    return DispatchOutcome::NotFound;
                };
                item.width = size.width;
                item.height = size.height;
                DispatchOutcome::Applied
            }
            StoreAction::CreateItem(item) => {
                self.floor.layout_items.push(item);
                DispatchOutcome::Applied
            }
            StoreAction::Delete(id) => {
                let before = self.floor.layout_items.len();
                self.floor
                    .layout_items
                    .retain(|item| item.id != id && item.room_id != Some(id));
                if self.floor.layout_items.len() == before {
                    return DispatchOutcome::NotFound;
                }
                if self.selected.is_some_and(|sel| self.item(&sel).is_none()) {
                    self.selected = None;
                }
                DispatchOutcome::Applied
            }
            StoreAction::SetStatus { id, status } => {
                let Some(item) = self.item_mut(&id) else {
                    return DispatchOutcome::NotFound;
                };
                match &mut item.kind {
                    ItemKind::Table { status: current, .. } => {
                        *current = status;
                        DispatchOutcome::Applied
                    }
                    _ => DispatchOutcome::Unsupported,
                }
            }
        }
    }
}

impl ItemStore for FloorStore {
    fn dispatch(&mut self, action: StoreAction) -> DispatchOutcome {
        if self.floor.is_locked && action.is_mutation() {
            debug!(floor_id = %self.floor.id, ?action, "store: refused on locked floor");
            return DispatchOutcome::Locked;
        }
        let outcome = self.apply(action);
        debug!(floor_id = %self.floor.id, ?outcome, "store: dispatched");
        outcome
    }

    fn floor(&self) -> &Floor {
        &self.floor
    }

    fn selected(&self) -> Option<ItemId> {
        self.selected
    }
}
