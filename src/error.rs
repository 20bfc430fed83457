//! Editing error taxonomy.
//!
//! None of these are fatal. Locked floors and out-of-bounds drops are normal
//! user situations the host surfaces as a notice; a malformed payload is a
//! bug in the drag source and is propagated rather than swallowed.

use uuid::Uuid;

/// Stable machine-readable code for an error, for hosts that map errors to UI copy.
pub trait ErrorCode {
    fn error_code(&self) -> &'static str;
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EditError {
    #[error("floor is locked")]
    Locked,
    #[error("drop point is outside the floor")]
    OutOfBoundsDrop,
    #[error("malformed drop payload: {0}")]
    MalformedPayload(String),
    #[error("item not found: {0}")]
    ItemNotFound(Uuid),
    #[error("another gesture is already active")]
    GestureBusy,
}

impl ErrorCode for EditError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Locked => "E_FLOOR_LOCKED",
            Self::OutOfBoundsDrop => "E_OUT_OF_BOUNDS",
            Self::MalformedPayload(_) => "E_MALFORMED_PAYLOAD",
            Self::ItemNotFound(_) => "E_ITEM_NOT_FOUND",
            Self::GestureBusy => "E_GESTURE_BUSY",
        }
    }
}
