use uuid::Uuid;

use super::*;

fn owner(kind: GestureKind) -> GestureOwner {
    GestureOwner { item: Uuid::new_v4(), kind }
}

#[test]
fn fresh_gate_allows_pan() {
    let gate = GestureGate::new();
    assert!(!gate.is_held());
    assert!(gate.pan_enabled(0.0));
}

#[test]
fn acquire_disables_pan_and_blocks_second_owner() {
    let gate = GestureGate::new();
    let drag = owner(GestureKind::Drag);
    let lease = gate.acquire(drag).unwrap();
    assert_eq!(lease.owner(), drag);
    assert_eq!(gate.owner(), Some(drag));
    assert!(!gate.pan_enabled(1_000.0));
    assert_eq!(gate.acquire(owner(GestureKind::Resize)).unwrap_err(), EditError::GestureBusy);
}

#[test]
fn release_applies_cooldown() {
    let gate = GestureGate::new();
    let lease = gate.acquire(owner(GestureKind::Drag)).unwrap();
    lease.release(1_000.0, 50.0);
    assert!(!gate.is_held());
    assert!(!gate.pan_enabled(1_049.0));
    assert!(gate.pan_enabled(1_050.0));
}

#[test]
fn drop_frees_immediately() {
    let gate = GestureGate::new();
    {
        let _lease = gate.acquire(owner(GestureKind::Resize)).unwrap();
        assert!(gate.is_held());
    }
    assert!(!gate.is_held());
    assert!(gate.pan_enabled(0.0));
}

#[test]
fn gate_clones_share_state() {
    let gate = GestureGate::new();
    let view = gate.clone();
    let lease = gate.acquire(owner(GestureKind::Drag)).unwrap();
    assert!(view.is_held());
    drop(lease);
    assert!(!view.is_held());
}

#[test]
fn cooldown_never_shortens() {
    let gate = GestureGate::new();
    gate.acquire(owner(GestureKind::Resize)).unwrap().release(0.0, 100.0);
    gate.acquire(owner(GestureKind::Drag)).unwrap().release(10.0, 50.0);
    assert!(!gate.pan_enabled(99.0));
    assert!(gate.pan_enabled(100.0));
}
