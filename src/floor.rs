//! Floor data model: spatial items, their kinds, and the floor that holds them.
//!
//! Items come in three kinds. Tables and utilities are **center-anchored**:
//! `(x, y)` is the middle of their bounding box. Rooms are **top-left
//! anchored**. An item nested in a room (`room_id` set) stores its position
//! relative to the room's top-left corner, so moving a room carries its
//! contents with it.
//!
//! Everything here derives serde so a floor round-trips through the backend
//! and through JSON import/export untouched.

#[cfg(test)]
#[path = "floor_test.rs"]
mod floor_test;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::consts::{FLOOR_MAX_HEIGHT, FLOOR_MAX_WIDTH, FLOOR_MIN_HEIGHT, FLOOR_MIN_WIDTH};
use crate::geometry::{Anchor, Container, Rect};
use crate::viewport::{Point, Size};

/// Unique identifier for a spatial item.
pub type ItemId = Uuid;

/// Unique identifier for a floor.
pub type FloorId = Uuid;

/// Occupancy state shown on a table at full detail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TableStatus {
    #[default]
    Available,
    Occupied,
    Reserved,
    Cleaning,
}

/// Fixed fixtures placed on a floor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UtilityKind {
    Bar,
    Kitchen,
    Restroom,
    Entrance,
    Cashier,
    Stairs,
}

impl UtilityKind {
    /// Label prefix used when numbering utilities of this kind.
    #[must_use]
    pub fn prefix(self) -> &'static str {
        match self {
            Self::Bar => "BAR",
            Self::Kitchen => "KIT",
            Self::Restroom => "WC",
            Self::Entrance => "ENT",
            Self::Cashier => "POS",
            Self::Stairs => "ST",
        }
    }

    fn from_name(name: &str) -> Option<Self> {
        match name {
            "bar" => Some(Self::Bar),
            "kitchen" => Some(Self::Kitchen),
            "restroom" => Some(Self::Restroom),
            "entrance" => Some(Self::Entrance),
            "cashier" => Some(Self::Cashier),
            "stairs" => Some(Self::Stairs),
            _ => None,
        }
    }
}

/// Table number prefix shared by every table size.
pub const TABLE_PREFIX: &str = "T";

/// Room number prefix; room numbering is floor-global.
pub const ROOM_PREFIX: &str = "AREA";

/// Variant-specific part of a spatial item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ItemKind {
    /// A dining table seating `seats` guests.
    Table {
        seats: u32,
        #[serde(default)]
        status: TableStatus,
    },
    /// A fixed utility (bar, kitchen, restroom, ...).
    Utility { utility: UtilityKind },
    /// A named area that can contain other items.
    Room,
}

impl ItemKind {
    /// Parse a drag-source item type such as `"table-4"`, `"room"` or `"bar"`.
    ///
    /// A bare `"table"` seats four.
    #[must_use]
    pub fn from_item_type(item_type: &str) -> Option<Self> {
        let item_type = item_type.trim().to_ascii_lowercase();
        if item_type == "room" {
            return Some(Self::Room);
        }
        if item_type == "table" {
            return Some(Self::Table { seats: 4, status: TableStatus::Available });
        }
        if let Some(seats) = item_type.strip_prefix("table-") {
            return match seats.parse::<u32>() {
                Ok(seats) if seats > 0 => Some(Self::Table { seats, status: TableStatus::Available }),
                _ => None,
            };
        }
        UtilityKind::from_name(&item_type).map(|utility| Self::Utility { utility })
    }

    /// Label prefix for numbering. All tables share one prefix regardless of size.
    #[must_use]
    pub fn label_prefix(&self) -> &'static str {
        match self {
            Self::Table { .. } => TABLE_PREFIX,
            Self::Utility { utility } => utility.prefix(),
            Self::Room => ROOM_PREFIX,
        }
    }

    #[must_use]
    pub fn is_room(&self) -> bool {
        matches!(self, Self::Room)
    }

    /// Whether `(x, y)` names the top-left corner rather than the center.
    #[must_use]
    pub fn anchor(&self) -> Anchor {
        if self.is_room() { Anchor::TopLeft } else { Anchor::Center }
    }
}

/// A positioned item on a floor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpatialItem {
    /// Unique identifier, immutable after creation.
    pub id: ItemId,
    #[serde(flatten)]
    pub kind: ItemKind,
    /// Anchor x: center for tables/utilities, left edge for rooms.
    pub x: f64,
    /// Anchor y: center for tables/utilities, top edge for rooms.
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// Visual rotation in degrees; never affects constraint math.
    #[serde(default)]
    pub rotation: f64,
    /// Display label, e.g. `"T4"` or `"AREA2"`.
    #[serde(default)]
    pub label: String,
    /// Containing room, if any. Position is then room-relative.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub room_id: Option<ItemId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capacity: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl SpatialItem {
    /// Build a new item with a fresh id.
    #[must_use]
    pub fn new(kind: ItemKind, position: Point, size: Size, label: impl Into<String>) -> Self {
        let capacity = match kind {
            ItemKind::Table { seats, .. } => Some(seats),
            _ => None,
        };
        Self {
            id: Uuid::new_v4(),
            kind,
            x: position.x,
            y: position.y,
            width: size.width,
            height: size.height,
            rotation: 0.0,
            label: label.into(),
            room_id: None,
            capacity,
            description: None,
        }
    }

    #[must_use]
    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }

    #[must_use]
    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Axis-aligned box in the item's own coordinate frame (room-local when nested).
    #[must_use]
    pub fn local_bounds(&self) -> Rect {
        match self.kind.anchor() {
            Anchor::Center => Rect::centered(self.position(), self.size()),
            Anchor::TopLeft => Rect::new(self.x, self.y, self.width, self.height),
        }
    }

    /// Set rotation, normalized into `[0, 360)`.
    pub fn set_rotation(&mut self, degrees: f64) {
        if degrees.is_finite() {
            self.rotation = degrees.rem_euclid(360.0);
        }
    }
}

/// Allowed floor dimensions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FloorLimits {
    pub min_width: f64,
    pub max_width: f64,
    pub min_height: f64,
    pub max_height: f64,
}

impl Default for FloorLimits {
    fn default() -> Self {
        Self {
            min_width: FLOOR_MIN_WIDTH,
            max_width: FLOOR_MAX_WIDTH,
            min_height: FLOOR_MIN_HEIGHT,
            max_height: FLOOR_MAX_HEIGHT,
        }
    }
}

impl FloorLimits {
    /// Clamp a requested floor size into the allowed range.
    #[must_use]
    pub fn clamp(&self, size: Size) -> Size {
        Size::new(
            size.width.clamp(self.min_width, self.max_width),
            size.height.clamp(self.min_height, self.max_height),
        )
    }
}

/// One floor (or place) of the restaurant, with its layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Floor {
    pub id: FloorId,
    pub name: String,
    pub width: f64,
    pub height: f64,
    /// Save counter, bumped by the backend on every successful save.
    #[serde(default)]
    pub version: u64,
    #[serde(default)]
    pub is_locked: bool,
    #[serde(default)]
    pub layout_items: Vec<SpatialItem>,
}

impl Floor {
    /// Create an empty, unlocked floor with its size clamped to `limits`.
    #[must_use]
    pub fn new(name: impl Into<String>, size: Size, limits: &FloorLimits) -> Self {
        let size = limits.clamp(size);
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            width: size.width,
            height: size.height,
            version: 0,
            is_locked: false,
            layout_items: Vec::new(),
        }
    }

    #[must_use]
    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// The floor canvas in world space; the floor's origin is the world origin.
    #[must_use]
    pub fn bounds(&self) -> Rect {
        Rect::new(0.0, 0.0, self.width, self.height)
    }

    /// The room `item` is nested in. `None` for top-level items and for
    /// items whose room no longer exists.
    #[must_use]
    pub fn parent_room(&self, item: &SpatialItem) -> Option<&SpatialItem> {
        let room_id = item.room_id?;
        self.layout_items
            .iter()
            .find(|candidate| candidate.id == room_id && candidate.kind.is_room())
    }

    /// World position of the origin of `item`'s coordinate frame.
    #[must_use]
    pub fn frame_origin(&self, item: &SpatialItem) -> Point {
        self.parent_room(item)
            .map_or(Point::new(0.0, 0.0), |room| room.position())
    }

    /// Item bounding box in world space.
    #[must_use]
    pub fn world_bounds(&self, item: &SpatialItem) -> Rect {
        let origin = self.frame_origin(item);
        let local = item.local_bounds();
        Rect::new(local.x + origin.x, local.y + origin.y, local.width, local.height)
    }

    /// Smallest size `room` can shrink to while every item nested in it keeps
    /// `padding` clear of the right and bottom walls. Zero when it is empty.
    #[must_use]
    pub fn content_extent(&self, room: &SpatialItem, padding: f64) -> Size {
        self.layout_items
            .iter()
            .filter(|item| item.room_id == Some(room.id))
            .map(SpatialItem::local_bounds)
            .fold(Size::new(0.0, 0.0), |acc, b| {
                Size::new(acc.width.max(b.right() + padding), acc.height.max(b.bottom() + padding))
            })
    }

    /// Pull every top-level item back inside the floor bounds after the floor
    /// shrank. Nested items move with their room. Returns the ids that moved.
    pub fn clamp_to_bounds(&mut self) -> Vec<ItemId> {
        let bounds = self.bounds();
        let rooms: Vec<ItemId> = self
            .layout_items
            .iter()
            .filter(|item| item.kind.is_room())
            .map(|item| item.id)
            .collect();

        let mut moved = Vec::new();
        for item in &mut self.layout_items {
            if item.room_id.is_some_and(|room| rooms.contains(&room)) {
                continue;
            }
            let clamped = Container::Canvas(bounds).constrain(item.kind.anchor(), item.position(), item.size());
            if clamped != item.position() {
                item.x = clamped.x;
                item.y = clamped.y;
                moved.push(item.id);
            }
        }
        moved
    }

    /// The space `item` must stay inside while it is moved.
    #[must_use]
    pub fn container_for(&self, item: &SpatialItem, room_padding: f64) -> Container {
        match self.parent_room(item) {
            Some(room) => Container::Room { size: room.size(), padding: room_padding },
            None => Container::Canvas(self.bounds()),
        }
    }
}

/// Serialize a floor to pretty-printed JSON for export.
///
/// # Errors
///
/// Returns the serializer error if the floor cannot be encoded.
pub fn export_json(floor: &Floor) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(floor)
}

/// Parse a floor from exported JSON.
///
/// # Errors
///
/// Returns the parse error when the document is not a valid floor.
pub fn import_json(json: &str) -> Result<Floor, serde_json::Error> {
    serde_json::from_str(json)
}
