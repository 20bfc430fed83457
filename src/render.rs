//! Per-frame render snapshot.
//!
//! Hosts draw from a [`RenderFrame`] and never reach into the store or the
//! gesture state themselves. Building a frame is read-only: it culls items,
//! picks the detail tier, lays out the grid, and overlays the live drag
//! preview on top of stored positions.

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;

use crate::floor::{Floor, ItemId, ItemKind, SpatialItem, TableStatus};
use crate::geometry::{Anchor, Rect};
use crate::grid::{build_grid, GridPlan, GridPolicy};
use crate::resize::ResizeController;
use crate::viewport::{Point, Size, Viewport, ViewportState};
use crate::visibility::{detail_tier, is_visible, visible_rect, DetailTier, VisibilityPolicy};

/// One item as it should be drawn this frame.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderItem {
    pub id: ItemId,
    pub kind: ItemKind,
    /// Bounding box in world space, drag preview applied.
    pub world: Rect,
    /// Bounding box in screen pixels.
    pub screen: Rect,
    pub rotation: f64,
    /// Present once the tier shows text.
    pub label: Option<String>,
    /// Present for tables once the tier shows status.
    pub status: Option<TableStatus>,
    pub selected: bool,
    /// Drawn at a preview position that has not been committed yet.
    pub dragging: bool,
}

/// Everything a host needs to paint one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderFrame {
    pub viewport: ViewportState,
    pub tier: DetailTier,
    /// Visible world rectangle, buffer included.
    pub visible: Rect,
    /// Items to draw, bottom first.
    pub items: Vec<RenderItem>,
    pub grid: GridPlan,
    /// Room whose resize handles should be shown.
    pub handles: Option<ItemId>,
}

/// Inputs to [`build_frame`].
#[derive(Debug, Clone, Copy)]
pub struct FrameInput<'a> {
    pub floor: &'a Floor,
    pub viewport: &'a Viewport,
    pub stage: Size,
    pub selected: Option<ItemId>,
    /// Uncommitted drag position, in the item's own frame.
    pub preview: Option<(ItemId, Point)>,
    pub visibility: &'a VisibilityPolicy,
    pub grid: &'a GridPolicy,
    pub resize: &'a ResizeController,
}

impl FrameInput<'_> {
    fn position_of(&self, item: &SpatialItem) -> (Point, bool) {
        match self.preview {
            Some((id, position)) if id == item.id => (position, true),
            _ => (item.position(), false),
        }
    }

    /// World anchor and bounds, with the preview applied to the item or to its room.
    fn placement(&self, item: &SpatialItem) -> (Point, Rect, bool) {
        let (local, dragging) = self.position_of(item);
        let (origin, room_dragging) = match self.floor.parent_room(item) {
            Some(room) => self.position_of(room),
            None => (Point::new(0.0, 0.0), false),
        };
        let anchor = Point::new(local.x + origin.x, local.y + origin.y);
        let bounds = match item.kind.anchor() {
            Anchor::Center => Rect::centered(anchor, item.size()),
            Anchor::TopLeft => Rect::new(anchor.x, anchor.y, item.width, item.height),
        };
        (anchor, bounds, dragging || room_dragging)
    }
}

/// Build the snapshot for one frame.
#[must_use]
pub fn build_frame(input: &FrameInput<'_>) -> RenderFrame {
    let scale = input.viewport.scale();
    let buffer = input.visibility.buffer_px;
    let tier = detail_tier(scale, &input.visibility.tiers);
    let visible = visible_rect(input.viewport, input.stage, buffer);
    let grid = build_grid(&visible, &input.floor.bounds(), scale, input.grid);

    let mut items = Vec::new();
    if tier.shows_items() {
        for item in &input.floor.layout_items {
            let (anchor, world, dragging) = input.placement(item);
            if !is_visible(anchor, &visible, scale, buffer) {
                continue;
            }
            let top_left = input.viewport.world_to_screen(Point::new(world.x, world.y));
            let status = match item.kind {
                ItemKind::Table { status, .. } if tier.shows_status() => Some(status),
                _ => None,
            };
            items.push(RenderItem {
                id: item.id,
                kind: item.kind,
                world,
                screen: Rect::new(top_left.x, top_left.y, world.width * scale, world.height * scale),
                rotation: item.rotation,
                label: tier.shows_text().then(|| item.label.clone()),
                status,
                selected: input.selected == Some(item.id),
                dragging,
            });
        }
    }

    let handles = input.selected.filter(|id| {
        input.floor.layout_items.iter().any(|item| {
            item.id == *id
                && item.kind.is_room()
                && input.resize.handles_visible(true, input.floor.is_locked, scale)
        })
    });

    RenderFrame { viewport: input.viewport.state(), tier, visible, items, grid, handles }
}
