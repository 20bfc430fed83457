//! Spatial editing and viewport engine for restaurant floor plans.
//!
//! The crate owns everything between raw pointer input and a stored floor:
//! pan/zoom math, drag and resize gestures with their thresholds and
//! cooldowns, drop placement into rooms, item numbering, level-of-detail
//! culling, and the grid. Hosts feed input events to
//! [`engine::EditorCore`], apply the returned [`engine::Action`]s to their
//! UI, and draw each [`render::RenderFrame`].
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Editor core routing input through gestures into the store |
//! | [`store`] | Item store contract and the in-memory floor store |
//! | [`floor`] | Floor and item types, nesting rules, JSON import/export |
//! | [`viewport`] | Pan/zoom state, coordinate conversions, auto-fit |
//! | [`geometry`] | Rectangles, anchors, and containment clamping |
//! | [`gesture`] | Shared gate keeping stage pan and item gestures exclusive |
//! | [`drag`] | Item drag with threshold and commit-once semantics |
//! | [`resize`] | Room resize handles with floor and minimum-size caps |
//! | [`drop_zone`] | Palette drop validation and placement |
//! | [`numbering`] | Next free label per item type |
//! | [`visibility`] | Detail tiers and off-screen culling |
//! | [`grid`] | Background grid lines clipped to the floor |
//! | [`render`] | Frame assembly for the host renderer |
//! | [`services`] | Async floor backend and the editing session over it |
//! | [`config`] | Editor tunables, overridable from the environment |
//! | [`error`] | Edit errors and stable error codes |
//! | [`consts`] | Shared numeric defaults |

pub mod config;
pub mod consts;
pub mod drag;
pub mod drop_zone;
pub mod engine;
pub mod error;
pub mod floor;
pub mod geometry;
pub mod gesture;
pub mod grid;
pub mod numbering;
pub mod render;
pub mod resize;
pub mod services;
pub mod store;
pub mod viewport;
pub mod visibility;

pub use config::EditorConfig;
pub use engine::{Action, EditorCore};
pub use error::{EditError, ErrorCode};
pub use floor::{Floor, FloorId, ItemId, ItemKind, SpatialItem};
pub use services::backend::{FloorBackend, MemoryBackend};
pub use services::floor::FloorService;
pub use store::{FloorStore, ItemStore};
pub use viewport::{Point, Size, Viewport};
