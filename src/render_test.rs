#![allow(clippy::float_cmp)]

use super::*;
use crate::floor::FloorLimits;
use crate::viewport::ViewportState;

struct Scene {
    floor: Floor,
    viewport: Viewport,
    visibility: VisibilityPolicy,
    grid: GridPolicy,
    resize: ResizeController,
}

impl Scene {
    fn new(items: Vec<SpatialItem>) -> Self {
        let mut floor = Floor::new("Main", Size::new(1600.0, 1200.0), &FloorLimits::default());
        floor.layout_items = items;
        Self {
            floor,
            viewport: Viewport::default(),
            visibility: VisibilityPolicy::default(),
            grid: GridPolicy::default(),
            resize: ResizeController::default(),
        }
    }

    fn at(mut self, pan_x: f64, pan_y: f64, scale: f64) -> Self {
        self.viewport.set_state(ViewportState { pan_x, pan_y, scale });
        self
    }

    fn frame(&self, selected: Option<ItemId>, preview: Option<(ItemId, Point)>) -> RenderFrame {
        build_frame(&FrameInput {
            floor: &self.floor,
            viewport: &self.viewport,
            stage: Size::new(800.0, 600.0),
            selected,
            preview,
            visibility: &self.visibility,
            grid: &self.grid,
            resize: &self.resize,
        })
    }
}

fn table(label: &str, x: f64, y: f64) -> SpatialItem {
    SpatialItem::new(
        ItemKind::Table { seats: 4, status: TableStatus::Reserved },
        Point::new(x, y),
        Size::new(80.0, 80.0),
        label,
    )
}

fn room(x: f64, y: f64) -> SpatialItem {
    SpatialItem::new(ItemKind::Room, Point::new(x, y), Size::new(400.0, 300.0), "AREA1")
}

// --- tiers ---

#[test]
fn full_tier_includes_label_and_status() {
    let scene = Scene::new(vec![table("T1", 100.0, 100.0)]);
    let frame = scene.frame(None, None);
    assert_eq!(frame.tier, DetailTier::Full);
    assert_eq!(frame.items[0].label.as_deref(), Some("T1"));
    assert_eq!(frame.items[0].status, Some(TableStatus::Reserved));
}

#[test]
fn icon_text_tier_drops_status() {
    let scene = Scene::new(vec![table("T1", 100.0, 100.0)]).at(0.0, 0.0, 0.6);
    let frame = scene.frame(None, None);
    assert_eq!(frame.tier, DetailTier::IconText);
    assert_eq!(frame.items[0].label.as_deref(), Some("T1"));
    assert_eq!(frame.items[0].status, None);
}

#[test]
fn icon_tier_drops_label() {
    let scene = Scene::new(vec![table("T1", 100.0, 100.0)]).at(0.0, 0.0, 0.45);
    let frame = scene.frame(None, None);
    assert_eq!(frame.tier, DetailTier::Icon);
    assert_eq!(frame.items[0].label, None);
}

// --- culling ---

#[test]
fn items_far_off_screen_are_culled() {
    // Visible world rect at scale 1 is (-100, -100, 1000, 800); the item test
    // grows it by another 100, so x = 1000 is the last visible column.
    let scene = Scene::new(vec![table("T1", 1000.0, 300.0), table("T2", 1001.0, 300.0)]);
    let frame = scene.frame(None, None);
    let labels: Vec<_> = frame.items.iter().filter_map(|i| i.label.as_deref()).collect();
    assert_eq!(labels, vec!["T1"]);
}

#[test]
fn screen_rect_follows_viewport() {
    let scene = Scene::new(vec![table("T1", 100.0, 100.0)]).at(50.0, 20.0, 2.0);
    let frame = scene.frame(None, None);
    assert_eq!(frame.items[0].world, Rect::new(60.0, 60.0, 80.0, 80.0));
    assert_eq!(frame.items[0].screen, Rect::new(170.0, 140.0, 160.0, 160.0));
}

// --- preview ---

#[test]
fn room_preview_moves_children() {
    let area = room(200.0, 200.0);
    let mut child = table("T1", 100.0, 100.0);
    child.room_id = Some(area.id);
    let (area_id, child_id) = (area.id, child.id);
    let scene = Scene::new(vec![area, child]);

    let frame = scene.frame(None, Some((area_id, Point::new(300.0, 250.0))));
    let child = frame.items.iter().find(|i| i.id == child_id).unwrap();
    assert_eq!(child.world, Rect::new(360.0, 310.0, 80.0, 80.0));
    assert!(child.dragging);
    let area = frame.items.iter().find(|i| i.id == area_id).unwrap();
    assert_eq!(area.world, Rect::new(300.0, 250.0, 400.0, 300.0));
}

// --- handles / grid ---

#[test]
fn handles_only_for_selected_unlocked_room_at_usable_zoom() {
    let area = room(200.0, 200.0);
    let t = table("T1", 100.0, 100.0);
    let (area_id, t_id) = (area.id, t.id);
    let mut scene = Scene::new(vec![area, t]);

    assert_eq!(scene.frame(Some(area_id), None).handles, Some(area_id));
    assert_eq!(scene.frame(Some(t_id), None).handles, None);
    assert_eq!(scene.frame(None, None).handles, None);

    scene.floor.is_locked = true;
    assert_eq!(scene.frame(Some(area_id), None).handles, None);

    scene.floor.is_locked = false;
    let scene = scene.at(0.0, 0.0, 0.29);
    assert_eq!(scene.frame(Some(area_id), None).handles, None);
}

#[test]
fn grid_is_clipped_to_floor() {
    let scene = Scene::new(vec![]);
    let frame = scene.frame(None, None);
    assert_eq!(frame.grid.pitch, 40.0);
    for line in &frame.grid.lines {
        assert!(line.from.x >= 0.0 && line.from.y >= 0.0);
        assert!(line.to.x <= 1600.0 && line.to.y <= 1200.0);
    }
    assert!(!frame.grid.is_empty());
}
