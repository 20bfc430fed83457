//! Turns an external drop (palette drag-and-drop or touch release) into a new item.
//!
//! The drop point arrives in screen space. It is mapped through the viewport
//! inverse, matched against the rooms on the floor, clamped into whichever
//! container it landed in, labelled, and finally committed as a single
//! [`StoreAction::CreateItem`].

#[cfg(test)]
#[path = "drop_zone_test.rs"]
mod drop_zone_test;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::consts::ROOM_PADDING;
use crate::error::EditError;
use crate::floor::{ItemId, ItemKind, SpatialItem};
use crate::geometry::{Anchor, Container};
use crate::numbering::{next_label, LabelScope};
use crate::store::{ItemStore, StoreAction};
use crate::viewport::{Point, Size, Viewport};

/// What the drag source says it is dropping.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DropPayload {
    pub item_type: Option<String>,
    pub declared_width: Option<f64>,
    pub declared_height: Option<f64>,
}

impl DropPayload {
    #[must_use]
    pub fn new(item_type: impl Into<String>, width: f64, height: f64) -> Self {
        Self {
            item_type: Some(item_type.into()),
            declared_width: Some(width),
            declared_height: Some(height),
        }
    }

    /// Check the payload and resolve it into an item kind and size.
    ///
    /// # Errors
    ///
    /// [`EditError::MalformedPayload`] when the type is missing or unknown,
    /// or either dimension is missing, non-finite, or not positive.
    pub fn validate(&self) -> Result<(ItemKind, Size), EditError> {
        let Some(item_type) = self.item_type.as_deref() else {
            return Err(EditError::MalformedPayload("missing itemType".into()));
        };
        let Some(kind) = ItemKind::from_item_type(item_type) else {
            return Err(EditError::MalformedPayload(format!("unknown itemType {item_type:?}")));
        };
        let width = positive_dimension("declaredWidth", self.declared_width)?;
        let height = positive_dimension("declaredHeight", self.declared_height)?;
        Ok((kind, Size::new(width, height)))
    }
}

fn positive_dimension(name: &str, value: Option<f64>) -> Result<f64, EditError> {
    match value {
        Some(v) if v.is_finite() && v > 0.0 => Ok(v),
        Some(v) => Err(EditError::MalformedPayload(format!("{name} must be positive, got {v}"))),
        None => Err(EditError::MalformedPayload(format!("missing {name}"))),
    }
}

/// Where a drop landed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropTarget {
    Canvas,
    Room(ItemId),
}

/// Drop-to-create resolver.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DropZoneResolver {
    /// Clearance kept between a room's walls and its contents.
    pub room_padding: f64,
}

impl Default for DropZoneResolver {
    fn default() -> Self {
        Self { room_padding: ROOM_PADDING }
    }
}

impl DropZoneResolver {
    #[must_use]
    pub fn new(room_padding: f64) -> Self {
        Self { room_padding }
    }

    /// Topmost room whose bounds contain `world`. Later items draw on top.
    fn room_at<'a>(items: &'a [SpatialItem], world: Point) -> Option<&'a SpatialItem> {
        items
            .iter()
            .rev()
            .find(|item| item.kind.is_room() && item.local_bounds().contains(world))
    }

    /// Build the item a drop would create, without touching the store.
    ///
    /// # Errors
    ///
    /// [`EditError::MalformedPayload`] for a bad payload,
    /// [`EditError::Locked`] on a locked floor, and
    /// [`EditError::OutOfBoundsDrop`] when the point is off the floor.
    pub fn resolve<S: ItemStore>(
        &self,
        store: &S,
        viewport: &Viewport,
        screen: Point,
        payload: &DropPayload,
    ) -> Result<(DropTarget, SpatialItem), EditError> {
        let (kind, size) = payload.validate()?;
        let floor = store.floor();
        if floor.is_locked {
            return Err(EditError::Locked);
        }

        let world = viewport.screen_to_world(screen);
        let bounds = floor.bounds();
        if !bounds.contains(world) {
            return Err(EditError::OutOfBoundsDrop);
        }

        // Rooms do not nest.
        let room = if kind.is_room() { None } else { Self::room_at(&floor.layout_items, world) };

        let (target, position, scope) = match room {
            Some(room) => {
                let local = Point::new(world.x - room.x, world.y - room.y);
                let container = Container::Room { size: room.size(), padding: self.room_padding };
                let position = container.constrain(Anchor::Center, local, size);
                (DropTarget::Room(room.id), position, LabelScope::Room(room.id))
            }
            None => {
                let position = Container::Canvas(bounds).constrain(kind.anchor(), world, size);
                let scope = if kind.is_room() { LabelScope::Floor } else { LabelScope::FloorCanvas };
                (DropTarget::Canvas, position, scope)
            }
        };

        let label = next_label(kind.label_prefix(), scope, &floor.layout_items);
        let mut item = SpatialItem::new(kind, position, size, label);
        if let DropTarget::Room(room_id) = target {
            item.room_id = Some(room_id);
        }
        Ok((target, item))
    }

    /// Resolve the drop and commit the new item.
    ///
    /// # Errors
    ///
    /// Everything [`resolve`](Self::resolve) reports, plus
    /// [`EditError::Locked`] if the store refuses the create.
    pub fn drop_item<S: ItemStore>(
        &self,
        store: &mut S,
        viewport: &Viewport,
        screen: Point,
        payload: &DropPayload,
    ) -> Result<SpatialItem, EditError> {
        let (target, item) = match self.resolve(store, viewport, screen, payload) {
            Ok(resolved) => resolved,
            Err(e) => {
                warn!(error = %e, x = screen.x, y = screen.y, "drop: rejected");
                return Err(e);
            }
        };
        debug!(id = %item.id, label = %item.label, ?target, "drop: creating item");
        store.dispatch(StoreAction::CreateItem(item.clone())).into_result(item.id)?;
        Ok(item)
    }
}
