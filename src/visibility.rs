//! Visibility culling and level-of-detail selection.
//!
//! Culling is **center-point** based: an item counts as visible when its
//! world position lies inside the visible rectangle grown by a screen-space
//! margin. Large items whose center sits just off-screen can therefore be
//! culled while part of them would still show. That is a known approximation
//! kept on purpose; switching to full box intersection changes what renders.

#[cfg(test)]
#[path = "visibility_test.rs"]
mod visibility_test;

use crate::consts::{TIER_FULL_SCALE, TIER_ICON_SCALE, TIER_TEXT_SCALE, VISIBILITY_BUFFER_PX};
use crate::geometry::Rect;
use crate::viewport::{Point, Size, Viewport};

/// How much of an item to draw at the current zoom. Ordered by information content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum DetailTier {
    /// Floor background only; items are not drawn.
    Background,
    /// Item icon only.
    Icon,
    /// Icon plus label.
    IconText,
    /// Icon, label, and status indicator.
    Full,
}

impl DetailTier {
    #[must_use]
    pub fn shows_items(self) -> bool {
        self >= Self::Icon
    }

    #[must_use]
    pub fn shows_text(self) -> bool {
        self >= Self::IconText
    }

    #[must_use]
    pub fn shows_status(self) -> bool {
        self == Self::Full
    }
}

/// Scale thresholds where the detail tier steps up.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TierThresholds {
    pub icon: f64,
    pub text: f64,
    pub full: f64,
}

impl Default for TierThresholds {
    fn default() -> Self {
        Self { icon: TIER_ICON_SCALE, text: TIER_TEXT_SCALE, full: TIER_FULL_SCALE }
    }
}

/// Culling and tier policy.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisibilityPolicy {
    /// Screen-space margin added around the stage and again around each item test.
    pub buffer_px: f64,
    pub tiers: TierThresholds,
}

impl Default for VisibilityPolicy {
    fn default() -> Self {
        Self { buffer_px: VISIBILITY_BUFFER_PX, tiers: TierThresholds::default() }
    }
}

/// Detail tier for a scale. Each threshold belongs to the higher tier.
#[must_use]
pub fn detail_tier(scale: f64, tiers: &TierThresholds) -> DetailTier {
    if scale >= tiers.full {
        DetailTier::Full
    } else if scale >= tiers.text {
        DetailTier::IconText
    } else if scale >= tiers.icon {
        DetailTier::Icon
    } else {
        DetailTier::Background
    }
}

/// World rectangle covered by the stage, grown by `buffer_px` screen pixels.
///
/// The buffer is converted to world units with the current scale before
/// expanding, so it stays a constant on-screen margin at any zoom.
#[must_use]
pub fn visible_rect(viewport: &Viewport, stage: Size, buffer_px: f64) -> Rect {
    let top_left = viewport.screen_to_world(Point::new(0.0, 0.0));
    let bottom_right = viewport.screen_to_world(Point::new(stage.width, stage.height));
    Rect::new(top_left.x, top_left.y, bottom_right.x - top_left.x, bottom_right.y - top_left.y)
        .expand(viewport.screen_dist_to_world(buffer_px))
}

/// Whether an item whose world position is `position` should be drawn.
///
/// `rect` is the output of [`visible_rect`]; it is grown again by
/// `buffer_px / scale` before the point test.
#[must_use]
pub fn is_visible(position: Point, rect: &Rect, scale: f64, buffer_px: f64) -> bool {
    rect.expand(buffer_px / scale).contains(position)
}
