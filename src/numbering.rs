//! Display-label allocation for newly created items.
//!
//! Labels look like `{PREFIX}{n}`. The next number is one past the highest
//! existing number for that prefix **within the same scope**; gaps are not
//! reused. Tables and utilities are scoped to their container (the floor, or
//! one room). Rooms are always numbered floor-wide.

#[cfg(test)]
#[path = "numbering_test.rs"]
mod numbering_test;

use tracing::debug;

use crate::floor::{ItemId, SpatialItem};

/// The container whose items share a numbering sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelScope {
    /// Every item on the floor, regardless of nesting.
    Floor,
    /// Items placed directly on the floor canvas (not inside any room).
    FloorCanvas,
    /// Items placed inside the given room.
    Room(ItemId),
}

impl LabelScope {
    fn contains(self, item: &SpatialItem) -> bool {
        match self {
            Self::Floor => true,
            Self::FloorCanvas => item.room_id.is_none(),
            Self::Room(room) => item.room_id == Some(room),
        }
    }
}

/// Extract `n` from a label of the exact form `{prefix}{n}`.
fn label_number(label: &str, prefix: &str) -> Option<u64> {
    let digits = label.strip_prefix(prefix)?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    // Only overflow can fail here; such a label never wins the max.
    digits.parse::<u64>().map_or_else(
        |e| {
            debug!(label, error = %e, "numbering: label number skipped");
            None
        },
        Some,
    )
}

/// Next free label for `prefix` among `items` in `scope`.
#[must_use]
pub fn next_label(prefix: &str, scope: LabelScope, items: &[SpatialItem]) -> String {
    let next = items
        .iter()
        .filter(|item| scope.contains(item))
        .filter_map(|item| label_number(&item.label, prefix))
        .max()
        .map_or(1, |max| max.saturating_add(1));
    format!("{prefix}{next}")
}
