use uuid::Uuid;

use super::*;
use crate::floor::{FloorLimits, ItemKind, SpatialItem};
use crate::viewport::{Point, Size};

fn floor(name: &str) -> Floor {
    Floor::new(name, Size::new(1600.0, 1200.0), &FloorLimits::default())
}

#[tokio::test]
async fn create_then_list_in_creation_order() {
    let backend = MemoryBackend::new();
    let first = backend.create_floor(&floor("Ground")).await.unwrap();
    let second = backend.create_floor(&floor("Terrace")).await.unwrap();

    assert_eq!(first.version, 1);
    let listed = backend.list_floors().await.unwrap();
    let names: Vec<_> = listed.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["Ground", "Terrace"]);
    assert_eq!(listed[1].id, second.id);
}

#[tokio::test]
async fn load_round_trips_items() {
    let mut original = floor("Ground");
    original.layout_items.push(SpatialItem::new(
        ItemKind::Room,
        Point::new(10.0, 20.0),
        Size::new(400.0, 300.0),
        "AREA1",
    ));
    let backend = MemoryBackend::with_floors(&[original.clone()]).await.unwrap();

    let loaded = backend.load_floor(original.id).await.unwrap();
    assert_eq!(loaded.layout_items, original.layout_items);
    assert_eq!(loaded.version, 1);
}

#[tokio::test]
async fn load_unknown_floor_is_not_found() {
    let backend = MemoryBackend::new();
    let id = Uuid::new_v4();
    let err = backend.load_floor(id).await.unwrap_err();
    assert!(matches!(err, BackendError::NotFound(missing) if missing == id));
    assert_eq!(err.error_code(), "E_FLOOR_NOT_FOUND");
}

#[tokio::test]
async fn save_bumps_version() {
    let backend = MemoryBackend::new();
    let mut current = backend.create_floor(&floor("Ground")).await.unwrap();

    current.name = "Main hall".into();
    let v2 = backend.save_floor(&current).await.unwrap();
    assert_eq!(v2, 2);
    current.version = v2;
    assert_eq!(backend.save_floor(&current).await.unwrap(), 3);

    let loaded = backend.load_floor(current.id).await.unwrap();
    assert_eq!(loaded.name, "Main hall");
    assert_eq!(loaded.version, 3);
}

#[tokio::test]
async fn stale_save_is_rejected() {
    let backend = MemoryBackend::new();
    let loaded = backend.create_floor(&floor("Ground")).await.unwrap();
    let other_session = loaded.clone();

    backend.save_floor(&loaded).await.unwrap();
    let err = backend.save_floor(&other_session).await.unwrap_err();
    assert!(matches!(err, BackendError::VersionConflict { expected: 1, stored: 2, .. }));
    assert_eq!(err.error_code(), "E_VERSION_CONFLICT");
}

#[tokio::test]
async fn corrupt_document_is_serialization_error() {
    let backend = MemoryBackend::new();
    let mut bad = floor("Ground");
    // Non-finite numbers are written as `null` and cannot be read back.
    bad.width = f64::NAN;
    let created = backend.create_floor(&bad).await.unwrap();

    let err = backend.load_floor(created.id).await.unwrap_err();
    assert!(matches!(err, BackendError::Serialization(_)));
    assert_eq!(err.error_code(), "E_SERIALIZATION");
}

#[tokio::test]
async fn rename_keeps_version() {
    let backend = MemoryBackend::new();
    let created = backend.create_floor(&floor("Ground")).await.unwrap();
    backend.rename_floor(created.id, "Lobby").await.unwrap();

    let loaded = backend.load_floor(created.id).await.unwrap();
    assert_eq!(loaded.name, "Lobby");
    assert_eq!(loaded.version, 1);
}

#[tokio::test]
async fn delete_removes_from_listing() {
    let backend = MemoryBackend::new();
    let a = backend.create_floor(&floor("A")).await.unwrap();
    let b = backend.create_floor(&floor("B")).await.unwrap();

    backend.delete_floor(a.id).await.unwrap();
    let listed = backend.list_floors().await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, b.id);
    assert!(matches!(backend.delete_floor(a.id).await, Err(BackendError::NotFound(_))));
}
