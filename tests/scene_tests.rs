//! Scene Store Tests
//!
//! Tests for:
//! - Command semantics (add, remove, rename, visibility, duplicate,
//!   selection, transform/material updates, background)
//! - Monotonic version bumps and rejected-command no-ops
//! - Data-model clamping (scale floor, sphere uniform scale, torus
//!   major/minor, material ranges)
//! - Background presets through the configurable palette
//! - JSON round-trip persistence

use glam::Vec3;

use lumen::{
    BackgroundPalette, BackgroundPreset, Material, MaterialKind, PrimitiveKind, SceneCommand,
    SceneStore, Transform,
};

fn add(store: &mut SceneStore, primitive: PrimitiveKind) -> String {
    store
        .apply(SceneCommand::AddObject { primitive })
        .expect("add always succeeds")
}

// ============================================================================
// Object lifecycle
// ============================================================================

#[test]
fn add_creates_a_named_visible_object() {
    let mut store = SceneStore::new();
    let id = add(&mut store, PrimitiveKind::Sphere);

    let object = store.get(&id).unwrap();
    assert_eq!(object.name, "Sphere");
    assert_eq!(object.primitive, PrimitiveKind::Sphere);
    assert!(object.visible);
    assert_eq!(object.transform, Transform::IDENTITY);
}

#[test]
fn remove_deletes_and_clears_selection() {
    let mut store = SceneStore::new();
    let id = add(&mut store, PrimitiveKind::Cuboid);
    store.apply(SceneCommand::SetSelection { id: Some(id.clone()) });

    store.apply(SceneCommand::RemoveObject { id: id.clone() });
    assert!(store.get(&id).is_none());
    assert!(store.selected().is_none());
    assert!(store.objects().is_empty());
}

#[test]
fn remove_keeps_later_objects_addressable() {
    let mut store = SceneStore::new();
    let first = add(&mut store, PrimitiveKind::Sphere);
    let second = add(&mut store, PrimitiveKind::Torus);
    let third = add(&mut store, PrimitiveKind::Cone);

    store.apply(SceneCommand::RemoveObject { id: first });
    assert!(store.get(&second).is_some());
    assert!(store.get(&third).is_some());
    store.apply(SceneCommand::RenameObject {
        id: third.clone(),
        name: "Spike".into(),
    });
    assert_eq!(store.get(&third).unwrap().name, "Spike");
}

#[test]
fn duplicate_copies_everything_but_the_identity() {
    let mut store = SceneStore::new();
    let id = add(&mut store, PrimitiveKind::Capsule);
    store.apply(SceneCommand::UpdateTransform {
        id: id.clone(),
        transform: Transform::from_position(Vec3::new(1.0, 2.0, 3.0)),
    });

    let copy_id = store
        .apply(SceneCommand::DuplicateObject { id: id.clone() })
        .unwrap();
    assert_ne!(copy_id, id);

    let original = store.get(&id).unwrap().clone();
    let copy = store.get(&copy_id).unwrap();
    assert_eq!(copy.name, "Capsule Copy");
    assert_eq!(copy.transform, original.transform);
    assert_eq!(copy.material, original.material);
}

#[test]
fn visibility_toggles() {
    let mut store = SceneStore::new();
    let id = add(&mut store, PrimitiveKind::Cylinder);
    store.apply(SceneCommand::SetVisibility {
        id: id.clone(),
        visible: false,
    });
    assert!(!store.get(&id).unwrap().visible);
}

// ============================================================================
// Selection
// ============================================================================

#[test]
fn selecting_an_unknown_id_is_rejected_without_a_version_bump() {
    let mut store = SceneStore::new();
    add(&mut store, PrimitiveKind::Sphere);
    let version = store.version();

    let result = store.apply(SceneCommand::SetSelection {
        id: Some("missing".into()),
    });
    assert!(result.is_none());
    assert_eq!(store.version(), version);
    assert!(store.selected().is_none());
}

#[test]
fn reselecting_the_same_object_does_not_bump_the_version() {
    let mut store = SceneStore::new();
    let id = add(&mut store, PrimitiveKind::Sphere);
    store.apply(SceneCommand::SetSelection { id: Some(id.clone()) });
    let version = store.version();

    store.apply(SceneCommand::SetSelection { id: Some(id) });
    assert_eq!(store.version(), version);
}

// ============================================================================
// Data-model clamping
// ============================================================================

#[test]
fn scale_is_floored() {
    let mut store = SceneStore::new();
    let id = add(&mut store, PrimitiveKind::Cuboid);
    store.apply(SceneCommand::UpdateTransform {
        id: id.clone(),
        transform: Transform {
            scale: Vec3::new(0.0, -3.0, 0.05),
            ..Transform::IDENTITY
        },
    });
    let scale = store.get(&id).unwrap().transform.scale;
    assert!(scale.min_element() >= 0.1);
}

#[test]
fn sphere_scale_stays_uniform() {
    let mut store = SceneStore::new();
    let id = add(&mut store, PrimitiveKind::Sphere);
    store.apply(SceneCommand::UpdateTransform {
        id: id.clone(),
        transform: Transform {
            scale: Vec3::new(1.0, 3.0, 2.0),
            ..Transform::IDENTITY
        },
    });
    let scale = store.get(&id).unwrap().transform.scale;
    assert_eq!(scale.x, scale.y);
    assert_eq!(scale.y, scale.z);
    assert_eq!(scale.x, 3.0);
}

#[test]
fn torus_scale_keeps_major_above_minor() {
    let mut store = SceneStore::new();
    let id = add(&mut store, PrimitiveKind::Torus);
    store.apply(SceneCommand::UpdateTransform {
        id: id.clone(),
        transform: Transform {
            scale: Vec3::new(2.0, 5.0, 1.0),
            ..Transform::IDENTITY
        },
    });
    let scale = store.get(&id).unwrap().transform.scale;
    assert!(scale.x > scale.y, "major must exceed minor");
    assert!(scale.y > 0.0);
    assert_eq!(scale.y, scale.z);
}

#[test]
fn material_updates_clamp_to_their_ranges() {
    let mut store = SceneStore::new();
    let id = add(&mut store, PrimitiveKind::Sphere);
    store.apply(SceneCommand::UpdateMaterial {
        id: id.clone(),
        material: Material {
            kind: MaterialKind::Light,
            color: Vec3::new(2.0, -1.0, 0.5),
            ior: 9.0,
            intensity: 500.0,
        },
    });

    let material = store.get(&id).unwrap().material;
    assert_eq!(material.color, Vec3::new(1.0, 0.0, 0.5));
    assert!(material.ior <= 2.5);
    assert!(material.intensity <= 20.0);
}

// ============================================================================
// Versioning and background
// ============================================================================

#[test]
fn every_effective_mutation_bumps_the_version() {
    let mut store = SceneStore::new();
    let v0 = store.version();
    let id = add(&mut store, PrimitiveKind::Sphere);
    assert!(store.version() > v0);

    let v1 = store.version();
    store.apply(SceneCommand::SetBackground { color: 0x0011_2233 });
    assert!(store.version() > v1);

    // Re-setting the identical background is a no-op.
    let v2 = store.version();
    store.apply(SceneCommand::SetBackground { color: 0x0011_2233 });
    assert_eq!(store.version(), v2);

    let v3 = store.version();
    store.apply(SceneCommand::RemoveObject { id });
    assert!(store.version() > v3);
}

#[test]
fn background_presets_come_from_the_palette() {
    let palette = BackgroundPalette {
        day: 0x0010_2030,
        dusk: 0x0040_5060,
        night: 0x0001_0203,
    };
    let mut store = SceneStore::with_palette(palette);
    assert_eq!(store.background(), 0x0010_2030);

    store.apply(SceneCommand::SetBackgroundPreset {
        preset: BackgroundPreset::Night,
    });
    assert_eq!(store.background(), 0x0001_0203);

    store.apply(SceneCommand::SetBackgroundPreset {
        preset: BackgroundPreset::Dusk,
    });
    assert_eq!(store.background(), 0x0040_5060);
}

#[test]
fn render_invalidation_is_tracked_separately_from_content() {
    let mut store = SceneStore::new();
    let version = store.version();
    let epoch = store.snapshot().render_epoch;

    store.invalidate_render();
    assert_eq!(store.version(), version, "invalidation is not a content change");
    assert!(store.snapshot().render_epoch > epoch);
}

// ============================================================================
// Persistence
// ============================================================================

#[test]
fn json_round_trip_preserves_the_scene() {
    let mut store = SceneStore::new();
    let a = add(&mut store, PrimitiveKind::Sphere);
    let b = add(&mut store, PrimitiveKind::Torus);
    store.apply(SceneCommand::UpdateTransform {
        id: a.clone(),
        transform: Transform::from_position(Vec3::new(0.5, 1.5, -2.0)),
    });
    store.apply(SceneCommand::UpdateMaterial {
        id: b.clone(),
        material: Material::glass(Vec3::new(0.9, 0.9, 1.0), 1.33),
    });
    store.apply(SceneCommand::SetSelection { id: Some(b.clone()) });
    store.apply(SceneCommand::SetBackground { color: 0x0066_99CC });

    let json = store.to_json().unwrap();
    let restored = SceneStore::from_json(&json).unwrap();

    assert_eq!(restored.objects().len(), 2);
    assert_eq!(restored.background(), 0x0066_99CC);
    assert_eq!(restored.selected(), Some(b.as_str()));
    assert_eq!(
        restored.get(&a).unwrap().transform.position,
        Vec3::new(0.5, 1.5, -2.0)
    );
    assert_eq!(restored.get(&b).unwrap().material.kind, MaterialKind::Glass);
}
