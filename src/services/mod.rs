//! Floor persistence and session services.
//!
//! ARCHITECTURE
//! ============
//! The editing engine is synchronous and never awaits. Everything that
//! touches storage lives here: [`backend`] defines the async persistence
//! contract and an in-memory implementation, and [`floor`] keeps one editor
//! session in step with it (switching, saving, renaming, deleting floors).

pub mod backend;
pub mod floor;
