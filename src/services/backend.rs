//! Backend service — async persistence contract for floors.
//!
//! DESIGN
//! ======
//! Floors are stored whole: a save replaces the stored document, and the
//! backend owns the version counter. A save must present the version it
//! loaded; a stale version is rejected instead of overwriting someone
//! else's edits.
//!
//! [`MemoryBackend`] keeps each floor as its exported JSON document so every
//! save and load crosses the same serialization boundary a remote store would.

#[cfg(test)]
#[path = "backend_test.rs"]
mod backend_test;

use std::collections::HashMap;

use tokio::sync::RwLock;
use tracing::{info, warn};

use crate::error::ErrorCode;
use crate::floor::{export_json, import_json, Floor, FloorId};

// =============================================================================
// TYPES
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    #[error("floor not found: {0}")]
    NotFound(FloorId),
    #[error("version conflict on floor {id}: expected {expected}, stored {stored}")]
    VersionConflict { id: FloorId, expected: u64, stored: u64 },
    #[error("serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ErrorCode for BackendError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "E_FLOOR_NOT_FOUND",
            Self::VersionConflict { .. } => "E_VERSION_CONFLICT",
            Self::Serialization(_) => "E_SERIALIZATION",
        }
    }
}

/// Listing row for a stored floor.
#[derive(Debug, Clone, PartialEq)]
pub struct FloorSummary {
    pub id: FloorId,
    pub name: String,
    pub width: f64,
    pub height: f64,
    pub version: u64,
    pub is_locked: bool,
    pub item_count: usize,
}

impl From<&Floor> for FloorSummary {
    fn from(floor: &Floor) -> Self {
        Self {
            id: floor.id,
            name: floor.name.clone(),
            width: floor.width,
            height: floor.height,
            version: floor.version,
            is_locked: floor.is_locked,
            item_count: floor.layout_items.len(),
        }
    }
}

// =============================================================================
// CONTRACT
// =============================================================================

/// Async floor storage. Enables swapping the in-memory store for a remote one.
#[async_trait::async_trait]
pub trait FloorBackend: Send + Sync {
    /// All stored floors, in creation order.
    ///
    /// # Errors
    ///
    /// Returns a [`BackendError`] if the listing cannot be read.
    async fn list_floors(&self) -> Result<Vec<FloorSummary>, BackendError>;

    /// Load one floor with its items.
    ///
    /// # Errors
    ///
    /// [`BackendError::NotFound`] for an unknown id.
    async fn load_floor(&self, id: FloorId) -> Result<Floor, BackendError>;

    /// Store a new floor. The stored copy starts at version 1.
    ///
    /// # Errors
    ///
    /// [`BackendError::Serialization`] if the floor cannot be encoded.
    async fn create_floor(&self, floor: &Floor) -> Result<Floor, BackendError>;

    /// Replace a stored floor and return its new version.
    ///
    /// # Errors
    ///
    /// [`BackendError::VersionConflict`] when `floor.version` is not the
    /// stored version, [`BackendError::NotFound`] for an unknown id.
    async fn save_floor(&self, floor: &Floor) -> Result<u64, BackendError>;

    /// Change a floor's display name. Does not bump the version.
    ///
    /// # Errors
    ///
    /// [`BackendError::NotFound`] for an unknown id.
    async fn rename_floor(&self, id: FloorId, name: &str) -> Result<(), BackendError>;

    /// Remove a floor and its items.
    ///
    /// # Errors
    ///
    /// [`BackendError::NotFound`] for an unknown id.
    async fn delete_floor(&self, id: FloorId) -> Result<(), BackendError>;
}

// =============================================================================
// IN-MEMORY BACKEND
// =============================================================================

#[derive(Debug, Default)]
struct Stored {
    order: Vec<FloorId>,
    documents: HashMap<FloorId, String>,
}

impl Stored {
    fn decode(&self, id: FloorId) -> Result<Floor, BackendError> {
        let Some(json) = self.documents.get(&id) else {
            return Err(BackendError::NotFound(id));
        };
        Ok(import_json(json)?)
    }
}

/// Mock backend holding floors in memory.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    stored: RwLock<Stored>,
}

impl MemoryBackend {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Backend pre-populated with `floors`, each stored at version 1.
    ///
    /// # Errors
    ///
    /// [`BackendError::Serialization`] if any floor cannot be encoded.
    pub async fn with_floors(floors: &[Floor]) -> Result<Self, BackendError> {
        let backend = Self::new();
        for floor in floors {
            backend.create_floor(floor).await?;
        }
        Ok(backend)
    }
}

#[async_trait::async_trait]
impl FloorBackend for MemoryBackend {
    async fn list_floors(&self) -> Result<Vec<FloorSummary>, BackendError> {
        let stored = self.stored.read().await;
        let mut out = Vec::with_capacity(stored.order.len());
        for id in &stored.order {
            out.push(FloorSummary::from(&stored.decode(*id)?));
        }
        Ok(out)
    }

    async fn load_floor(&self, id: FloorId) -> Result<Floor, BackendError> {
        self.stored.read().await.decode(id)
    }

    async fn create_floor(&self, floor: &Floor) -> Result<Floor, BackendError> {
        let mut created = floor.clone();
        created.version = 1;
        let json = export_json(&created)?;

        let mut stored = self.stored.write().await;
        if stored.documents.insert(created.id, json).is_none() {
            stored.order.push(created.id);
        }
        info!(floor_id = %created.id, name = %created.name, "backend: floor created");
        Ok(created)
    }

    async fn save_floor(&self, floor: &Floor) -> Result<u64, BackendError> {
        let mut stored = self.stored.write().await;
        let current = stored.decode(floor.id)?;
        if current.version != floor.version {
            warn!(
                floor_id = %floor.id,
                expected = floor.version,
                stored = current.version,
                "backend: stale save rejected"
            );
            return Err(BackendError::VersionConflict {
                id: floor.id,
                expected: floor.version,
                stored: current.version,
            });
        }

        let mut saved = floor.clone();
        saved.version = current.version + 1;
        let json = export_json(&saved)?;
        stored.documents.insert(saved.id, json);
        info!(floor_id = %saved.id, version = saved.version, items = saved.layout_items.len(), "backend: floor saved");
        Ok(saved.version)
    }

    async fn rename_floor(&self, id: FloorId, name: &str) -> Result<(), BackendError> {
        let mut stored = self.stored.write().await;
        let mut floor = stored.decode(id)?;
        floor.name = name.to_string();
        let json = export_json(&floor)?;
        stored.documents.insert(id, json);
        info!(floor_id = %id, name, "backend: floor renamed");
        Ok(())
    }

    async fn delete_floor(&self, id: FloorId) -> Result<(), BackendError> {
        let mut stored = self.stored.write().await;
        if stored.documents.remove(&id).is_none() {
            return Err(BackendError::NotFound(id));
        }
        stored.order.retain(|existing| *existing != id);
        info!(floor_id = %id, "backend: floor deleted");
        Ok(())
    }
}
