//! Pure geometry helpers: rectangles, bounds constraints, and icon viewBox parsing.
//!
//! Nothing here holds state except [`ViewBoxCache`], which only memoizes
//! parse results. The constraint functions are the single source of truth for
//! "keep the item inside its container"; drag, resize, and drop all go
//! through them.

#[cfg(test)]
#[path = "geometry_test.rs"]
mod geometry_test;

use std::collections::HashMap;

use crate::viewport::{Point, Size};

/// An axis-aligned rectangle in world or screen space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    #[must_use]
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    /// Rectangle of `size` centered on `center`.
    #[must_use]
    pub fn centered(center: Point, size: Size) -> Self {
        Self::new(center.x - size.width / 2.0, center.y - size.height / 2.0, size.width, size.height)
    }

    #[must_use]
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    #[must_use]
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    #[must_use]
    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Inclusive point containment.
    #[must_use]
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x && p.x <= self.right() && p.y >= self.y && p.y <= self.bottom()
    }

    /// Grow (or shrink, for negative `margin`) the rectangle on every side.
    #[must_use]
    pub fn expand(&self, margin: f64) -> Self {
        Self::new(self.x - margin, self.y - margin, self.width + 2.0 * margin, self.height + 2.0 * margin)
    }

    /// Overlapping region of two rectangles, or `None` when they are disjoint.
    #[must_use]
    pub fn intersect(&self, other: &Rect) -> Option<Rect> {
        let x0 = self.x.max(other.x);
        let y0 = self.y.max(other.y);
        let x1 = self.right().min(other.right());
        let y1 = self.bottom().min(other.bottom());
        if x1 < x0 || y1 < y0 {
            return None;
        }
        Some(Rect::new(x0, y0, x1 - x0, y1 - y0))
    }

    /// True when `inner` lies entirely inside `self`, with `eps` slack.
    #[must_use]
    pub fn contains_rect(&self, inner: &Rect, eps: f64) -> bool {
        inner.x >= self.x - eps
            && inner.y >= self.y - eps
            && inner.right() <= self.right() + eps
            && inner.bottom() <= self.bottom() + eps
    }
}

/// Which point of the bounding box an item's `(x, y)` refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    Center,
    TopLeft,
}

/// The space an item must stay inside.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Container {
    /// The floor canvas, in world coordinates.
    Canvas(Rect),
    /// A room interior, in room-local coordinates, inset by `padding`.
    Room { size: Size, padding: f64 },
}

impl Container {
    /// Clamp an item's anchor point so its box stays inside this container.
    #[must_use]
    pub fn constrain(&self, anchor: Anchor, position: Point, size: Size) -> Point {
        match (*self, anchor) {
            (Self::Canvas(bounds), Anchor::Center) => constrain_centered(position, size, bounds),
            (Self::Canvas(bounds), Anchor::TopLeft) => constrain_top_left(position, size, bounds),
            (Self::Room { size: room, padding }, Anchor::Center) => {
                constrain_to_room(position, size, room, padding)
            }
            (Self::Room { size: room, padding }, Anchor::TopLeft) => {
                constrain_top_left(position, size, room_interior(room, padding))
            }
        }
    }
}

fn room_interior(room_size: Size, padding: f64) -> Rect {
    Rect::new(
        padding,
        padding,
        (room_size.width - 2.0 * padding).max(0.0),
        (room_size.height - 2.0 * padding).max(0.0),
    )
}

/// Clamp `v` into `[lo, hi]`; when the range is inverted, return its midpoint.
///
/// An item larger than its container cannot fit on either side, so it is
/// centered instead of snapping to one edge.
fn clamp_span(v: f64, lo: f64, hi: f64) -> f64 {
    if lo > hi {
        return (lo + hi) / 2.0;
    }
    v.clamp(lo, hi)
}

/// Constrain a center-anchored item of `size` so its box stays inside `bounds`.
#[must_use]
pub fn constrain_centered(center: Point, size: Size, bounds: Rect) -> Point {
    let hw = size.width / 2.0;
    let hh = size.height / 2.0;
    Point::new(
        clamp_span(center.x, bounds.x + hw, bounds.right() - hw),
        clamp_span(center.y, bounds.y + hh, bounds.bottom() - hh),
    )
}

/// Constrain a top-left-anchored item of `size` so its box stays inside `bounds`.
#[must_use]
pub fn constrain_top_left(top_left: Point, size: Size, bounds: Rect) -> Point {
    Point::new(
        clamp_span(top_left.x, bounds.x, bounds.right() - size.width),
        clamp_span(top_left.y, bounds.y, bounds.bottom() - size.height),
    )
}

/// Constrain a center-anchored item inside a room, in room-local coordinates.
///
/// `room_size` is the room's width/height; `padding` is kept clear along
/// every wall. The returned point is relative to the room's top-left corner.
#[must_use]
pub fn constrain_to_room(local_center: Point, size: Size, room_size: Size, padding: f64) -> Point {
    constrain_centered(local_center, size, room_interior(room_size, padding))
}

/// Parse the width and height out of an SVG document's `viewBox` attribute.
///
/// Accepts whitespace- or comma-separated `min-x min-y width height`.
/// Returns `None` when the attribute is missing, malformed, or degenerate.
#[must_use]
pub fn parse_viewbox(svg: &str) -> Option<Size> {
    let start = svg.find("viewBox")?;
    let rest = &svg[start + "viewBox".len()..];
    let rest = rest.trim_start().strip_prefix('=')?.trim_start();
    let quote = rest.chars().next().filter(|c| *c == '"' || *c == '\'')?;
    let body = &rest[1..];
    let end = body.find(quote)?;

    let mut nums = [0.0_f64; 4];
    let mut count = 0;
    for token in body[..end].split(|c: char| c.is_whitespace() || c == ',').filter(|t| !t.is_empty()) {
        if count == 4 {
            return None;
        }
        let Ok(value) = token.parse::<f64>() else {
            return None;
        };
        nums[count] = value;
        count += 1;
    }
    if count != 4 || nums.iter().any(|n| !n.is_finite()) {
        return None;
    }

    let (width, height) = (nums[2], nums[3]);
    if width <= 0.0 || height <= 0.0 {
        return None;
    }
    Some(Size::new(width, height))
}

/// Memoizes [`parse_viewbox`] results keyed by icon name.
///
/// Failed parses are cached too, so a broken icon is only scanned once.
#[derive(Debug, Default)]
pub struct ViewBoxCache {
    entries: HashMap<String, Option<Size>>,
}

impl ViewBoxCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Dimensions for `key`, parsing `svg` on first request.
    pub fn dimensions(&mut self, key: &str, svg: &str) -> Option<Size> {
        if let Some(cached) = self.entries.get(key) {
            return *cached;
        }
        let parsed = parse_viewbox(svg);
        self.entries.insert(key.to_string(), parsed);
        parsed
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
