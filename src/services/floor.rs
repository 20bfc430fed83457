//! Floor session service — one editor bound to one stored floor at a time.
//!
//! DESIGN
//! ======
//! The session owns the [`EditorCore`] and a backend handle. Switching floors
//! loads the target wholesale, replaces every item in the editor, and re-fits
//! the viewport. Edits stay local until [`FloorService::save`]; the version
//! returned by the backend is written back so the next save is not stale.
//!
//! ERROR HANDLING
//! ==============
//! A failed load leaves the current floor in place. A failed save leaves the
//! local edits and version untouched so the caller can retry or reload.

#[cfg(test)]
#[path = "floor_test.rs"]
mod floor_test;

use tracing::{info, warn};

use crate::config::EditorConfig;
use crate::engine::EditorCore;
use crate::error::EditError;
use crate::floor::{Floor, FloorId};
use crate::store::ItemStore;
use crate::viewport::{Size, ViewportState};

use super::backend::{BackendError, FloorBackend, FloorSummary};

/// Size used for the floor created when the backend has none.
const DEFAULT_FLOOR_SIZE: Size = Size { width: 1600.0, height: 1200.0 };

/// Name used for the floor created when the backend has none.
const DEFAULT_FLOOR_NAME: &str = "Floor 1";

/// An editing session over floors held by a [`FloorBackend`].
#[derive(Debug)]
pub struct FloorService<B: FloorBackend> {
    backend: B,
    editor: EditorCore,
}

impl<B: FloorBackend> FloorService<B> {
    /// Open a session on the first stored floor, creating one if none exist.
    ///
    /// # Errors
    ///
    /// Returns a [`BackendError`] if listing, creating, or loading fails.
    pub async fn open(backend: B, config: EditorConfig, stage: Size) -> Result<Self, BackendError> {
        let floors = backend.list_floors().await?;
        let floor = match floors.first() {
            Some(summary) => backend.load_floor(summary.id).await?,
            None => {
                let fresh = Floor::new(DEFAULT_FLOOR_NAME, DEFAULT_FLOOR_SIZE, &config.floor_limits);
                backend.create_floor(&fresh).await?
            }
        };
        info!(floor_id = %floor.id, name = %floor.name, "session: opened");

        let mut editor = EditorCore::with_floor(floor, config);
        editor.set_stage_size(stage);
        editor.fit_to_floor();
        Ok(Self { backend, editor })
    }

    #[must_use]
    pub fn editor(&self) -> &EditorCore {
        &self.editor
    }

    pub fn editor_mut(&mut self) -> &mut EditorCore {
        &mut self.editor
    }

    #[must_use]
    pub fn backend(&self) -> &B {
        &self.backend
    }

    #[must_use]
    pub fn current(&self) -> &Floor {
        self.editor.store().floor()
    }

    /// All stored floors.
    ///
    /// # Errors
    ///
    /// Returns a [`BackendError`] if the listing fails.
    pub async fn list(&self) -> Result<Vec<FloorSummary>, BackendError> {
        self.backend.list_floors().await
    }

    /// Create a new, empty floor without switching to it. The size is clamped
    /// to the configured floor limits.
    ///
    /// # Errors
    ///
    /// Returns a [`BackendError`] if the backend refuses the floor.
    pub async fn create(&self, name: &str, size: Size) -> Result<FloorSummary, BackendError> {
        let floor = Floor::new(name, size, &self.editor.config().floor_limits);
        let created = self.backend.create_floor(&floor).await?;
        Ok(FloorSummary::from(&created))
    }

    /// Load `id` and make it the edited floor. Unsaved edits on the current
    /// floor are discarded.
    ///
    /// # Errors
    ///
    /// Returns a [`BackendError`] if the load fails; the current floor stays.
    pub async fn switch_to(&mut self, id: FloorId, now_ms: f64) -> Result<ViewportState, BackendError> {
        let floor = match self.backend.load_floor(id).await {
            Ok(floor) => floor,
            Err(e) => {
                warn!(floor_id = %id, error = %e, "session: switch failed");
                return Err(e);
            }
        };
        info!(floor_id = %id, items = floor.layout_items.len(), "session: switched floor");
        Ok(self.editor.load_floor(floor, now_ms))
    }

    /// Reload the current floor from the backend, discarding local edits.
    ///
    /// # Errors
    ///
    /// Returns a [`BackendError`] if the load fails.
    pub async fn reload(&mut self, now_ms: f64) -> Result<ViewportState, BackendError> {
        let id = self.current().id;
        self.switch_to(id, now_ms).await
    }

    /// Persist the current floor and adopt the new version.
    ///
    /// # Errors
    ///
    /// [`BackendError::VersionConflict`] when another session saved first.
    pub async fn save(&mut self) -> Result<u64, BackendError> {
        let snapshot = self.editor.store().snapshot();
        match self.backend.save_floor(&snapshot).await {
            Ok(version) => {
                self.editor.store_mut().set_version(version);
                info!(floor_id = %snapshot.id, version, "session: saved");
                Ok(version)
            }
            Err(e) => {
                warn!(floor_id = %snapshot.id, error = %e, "session: save failed");
                Err(e)
            }
        }
    }

    /// Rename a stored floor, keeping the open copy in step when it is the current one.
    ///
    /// # Errors
    ///
    /// [`BackendError::NotFound`] for an unknown id.
    pub async fn rename(&mut self, id: FloorId, name: &str) -> Result<(), BackendError> {
        self.backend.rename_floor(id, name).await?;
        if self.current().id == id {
            self.editor.store_mut().set_name(name);
        }
        Ok(())
    }

    /// Delete a stored floor. Deleting the open floor switches to the first
    /// remaining one, creating a fresh floor when none remain.
    ///
    /// # Errors
    ///
    /// Returns a [`BackendError`] if the delete or the follow-up switch fails.
    pub async fn delete(&mut self, id: FloorId, now_ms: f64) -> Result<(), BackendError> {
        self.backend.delete_floor(id).await?;
        info!(floor_id = %id, "session: floor deleted");
        if self.current().id != id {
            return Ok(());
        }

        let remaining = self.backend.list_floors().await?;
        let next = match remaining.first() {
            Some(summary) => summary.id,
            None => {
                let limits = self.editor.config().floor_limits;
                let fresh = Floor::new(DEFAULT_FLOOR_NAME, DEFAULT_FLOOR_SIZE, &limits);
                self.backend.create_floor(&fresh).await?.id
            }
        };
        self.switch_to(next, now_ms).await?;
        Ok(())
    }

    /// Lock or unlock the open floor. Takes effect immediately; persisted on save.
    pub fn set_locked(&mut self, locked: bool, now_ms: f64) {
        info!(floor_id = %self.current().id, locked, "session: lock changed");
        self.editor.set_locked(locked, now_ms);
    }

    /// Change the open floor's dimensions, clamped to the configured limits,
    /// and re-fit the viewport. Items outside a shrunken floor are pulled
    /// back inside. Returns the size actually applied.
    ///
    /// # Errors
    ///
    /// [`EditError::Locked`] on a locked floor.
    pub fn resize_floor(&mut self, size: Size) -> Result<Size, EditError> {
        if self.editor.store().is_locked() {
            warn!(floor_id = %self.current().id, "session: resize refused on locked floor");
            return Err(EditError::Locked);
        }
        let applied = self.editor.config().floor_limits.clamp(size);
        let moved = self.editor.store_mut().set_size(applied);
        self.editor.fit_to_floor();
        info!(
            floor_id = %self.current().id,
            width = applied.width,
            height = applied.height,
            moved = moved.len(),
            "session: floor resized"
        );
        Ok(applied)
    }
}
