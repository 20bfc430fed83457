#![allow(clippy::float_cmp)]

use super::*;

fn floor_rect() -> Rect {
    Rect::new(0.0, 0.0, 1200.0, 800.0)
}

// =============================================================
// Rect
// =============================================================

#[test]
fn rect_centered_places_box_around_point() {
    let r = Rect::centered(Point::new(100.0, 50.0), Size::new(40.0, 20.0));
    assert_eq!(r, Rect::new(80.0, 40.0, 40.0, 20.0));
    assert_eq!(r.center(), Point::new(100.0, 50.0));
}

#[test]
fn rect_contains_is_inclusive() {
    let r = Rect::new(0.0, 0.0, 10.0, 10.0);
    assert!(r.contains(Point::new(0.0, 0.0)));
    assert!(r.contains(Point::new(10.0, 10.0)));
    assert!(!r.contains(Point::new(10.01, 5.0)));
}

#[test]
fn rect_expand_grows_every_side() {
    let r = Rect::new(10.0, 10.0, 20.0, 20.0).expand(5.0);
    assert_eq!(r, Rect::new(5.0, 5.0, 30.0, 30.0));
}

#[test]
fn rect_intersect_overlap_and_disjoint() {
    let a = Rect::new(0.0, 0.0, 100.0, 100.0);
    let b = Rect::new(50.0, -20.0, 100.0, 60.0);
    assert_eq!(a.intersect(&b), Some(Rect::new(50.0, 0.0, 50.0, 40.0)));
    let c = Rect::new(200.0, 200.0, 10.0, 10.0);
    assert_eq!(a.intersect(&c), None);
}

// =============================================================
// constrain_centered
// =============================================================

#[test]
fn centered_inside_is_unchanged() {
    let p = constrain_centered(Point::new(300.0, 200.0), Size::new(80.0, 80.0), floor_rect());
    assert_eq!(p, Point::new(300.0, 200.0));
}

#[test]
fn centered_clamps_each_edge() {
    let size = Size::new(80.0, 60.0);
    assert_eq!(constrain_centered(Point::new(-50.0, 400.0), size, floor_rect()), Point::new(40.0, 400.0));
    assert_eq!(constrain_centered(Point::new(5000.0, 400.0), size, floor_rect()), Point::new(1160.0, 400.0));
    assert_eq!(constrain_centered(Point::new(500.0, -1.0), size, floor_rect()), Point::new(500.0, 30.0));
    assert_eq!(constrain_centered(Point::new(500.0, 900.0), size, floor_rect()), Point::new(500.0, 770.0));
}

#[test]
fn centered_oversized_item_is_centered() {
    let p = constrain_centered(Point::new(0.0, 0.0), Size::new(2000.0, 60.0), floor_rect());
    assert_eq!(p.x, 600.0);
}

#[test]
fn centered_result_box_fits_container() {
    let size = Size::new(120.0, 90.0);
    for (x, y) in [(-1e5, -1e5), (1e5, 1e5), (0.0, 799.0), (1199.0, 0.0)] {
        let p = constrain_centered(Point::new(x, y), size, floor_rect());
        assert!(floor_rect().contains_rect(&Rect::centered(p, size), 1e-9));
    }
}

// =============================================================
// constrain_top_left
// =============================================================

#[test]
fn top_left_clamps_to_far_edges() {
    let size = Size::new(300.0, 200.0);
    let p = constrain_top_left(Point::new(1100.0, 700.0), size, floor_rect());
    assert_eq!(p, Point::new(900.0, 600.0));
}

#[test]
fn top_left_clamps_negative() {
    let p = constrain_top_left(Point::new(-10.0, -10.0), Size::new(300.0, 200.0), floor_rect());
    assert_eq!(p, Point::new(0.0, 0.0));
}

#[test]
fn top_left_respects_offset_bounds() {
    let bounds = Rect::new(100.0, 100.0, 500.0, 500.0);
    let p = constrain_top_left(Point::new(0.0, 550.0), Size::new(50.0, 50.0), bounds);
    assert_eq!(p, Point::new(100.0, 550.0));
}

// =============================================================
// constrain_to_room
// =============================================================

#[test]
fn room_constraint_keeps_padding() {
    let room = Size::new(300.0, 200.0);
    let size = Size::new(40.0, 40.0);
    let p = constrain_to_room(Point::new(0.0, 0.0), size, room, 8.0);
    assert_eq!(p, Point::new(28.0, 28.0));
    let q = constrain_to_room(Point::new(1000.0, 1000.0), size, room, 8.0);
    assert_eq!(q, Point::new(272.0, 172.0));
}

#[test]
fn room_constraint_inside_unchanged() {
    let p = constrain_to_room(Point::new(150.0, 100.0), Size::new(40.0, 40.0), Size::new(300.0, 200.0), 8.0);
    assert_eq!(p, Point::new(150.0, 100.0));
}

// =============================================================
// viewBox parsing
// =============================================================

#[test]
fn parse_viewbox_space_separated() {
    let svg = r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 24 32"><path/></svg>"#;
    assert_eq!(parse_viewbox(svg), Some(Size::new(24.0, 32.0)));
}

#[test]
fn parse_viewbox_comma_separated_single_quotes() {
    let svg = "<svg viewBox='-5,-5, 110.5 ,60'></svg>";
    assert_eq!(parse_viewbox(svg), Some(Size::new(110.5, 60.0)));
}

#[test]
fn parse_viewbox_rejects_missing_and_malformed() {
    assert_eq!(parse_viewbox("<svg width=\"10\"></svg>"), None);
    assert_eq!(parse_viewbox("<svg viewBox=\"0 0 24\"></svg>"), None);
    assert_eq!(parse_viewbox("<svg viewBox=\"0 0 a 24\"></svg>"), None);
    assert_eq!(parse_viewbox("<svg viewBox=\"0 0 0 24\"></svg>"), None);
    assert_eq!(parse_viewbox("<svg viewBox=\"0 0 1 2 3\"></svg>"), None);
}

#[test]
fn viewbox_cache_memoizes_by_key() {
    let mut cache = ViewBoxCache::new();
    assert!(cache.is_empty());
    let first = cache.dimensions("table", "<svg viewBox=\"0 0 48 48\"/>");
    // A different document under the same key is not re-parsed.
    let second = cache.dimensions("table", "<svg viewBox=\"0 0 10 10\"/>");
    assert_eq!(first, Some(Size::new(48.0, 48.0)));
    assert_eq!(second, first);
    assert_eq!(cache.len(), 1);
}

#[test]
fn viewbox_cache_remembers_failures() {
    let mut cache = ViewBoxCache::new();
    assert_eq!(cache.dimensions("broken", "<svg/>"), None);
    assert_eq!(cache.dimensions("broken", "<svg viewBox=\"0 0 5 5\"/>"), None);
    cache.clear();
    assert_eq!(cache.dimensions("broken", "<svg viewBox=\"0 0 5 5\"/>"), Some(Size::new(5.0, 5.0)));
}
