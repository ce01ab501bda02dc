//! Picker Tests
//!
//! Tests for:
//! - Ray/mesh hits against canonical primitives with expected distances
//! - Scaled, rotated, and translated instances
//! - Front-to-back ordering across objects
//! - Hidden-object and non-finite-transform exclusion
//! - Camera ray generation through the inverse matrices

use glam::Vec3;

use lumen::{
    camera_ray, pick, Material, MeshLibrary, OrbitCamera, PrimitiveKind, Ray, SceneObject,
    Transform,
};

fn object_at(primitive: PrimitiveKind, position: Vec3) -> SceneObject {
    let mut object = SceneObject::new(primitive);
    object.transform.position = position;
    object
}

// ============================================================================
// Canonical hits
// ============================================================================

#[test]
fn ray_hits_the_unit_sphere_at_the_expected_distance() {
    let library = MeshLibrary::build();
    let sphere = object_at(PrimitiveKind::Sphere, Vec3::ZERO);
    let ray = Ray::new(Vec3::new(0.0, 0.0, -5.0), Vec3::Z);

    let hit = pick(&library, &[sphere.clone()], &ray).expect("sphere should be hit");
    assert_eq!(hit.object_id, sphere.id);
    // Radius 1 at tessellated precision.
    assert!((3.9..=4.1).contains(&hit.t), "t = {}", hit.t);
    assert!(hit.world_point.z < -0.9);
}

#[test]
fn ray_through_empty_space_misses() {
    let library = MeshLibrary::build();
    let sphere = object_at(PrimitiveKind::Sphere, Vec3::ZERO);
    let ray = Ray::new(Vec3::new(0.0, 5.0, -5.0), Vec3::Z);

    assert!(pick(&library, &[sphere], &ray).is_none());
}

#[test]
fn flat_cuboid_face_hits_are_exact() {
    let library = MeshLibrary::build();
    let mut slab = object_at(PrimitiveKind::Cuboid, Vec3::ZERO);
    slab.transform.scale = Vec3::new(5.0, 0.2, 5.0);

    let ray = Ray::new(Vec3::new(0.3, 5.0, 0.3), Vec3::NEG_Y);
    let hit = pick(&library, &[slab], &ray).expect("slab should be hit");
    assert!((hit.t - 4.8).abs() < 1e-3, "t = {}", hit.t);
    assert!((hit.world_point.y - 0.2).abs() < 1e-3);
}

#[test]
fn rotated_cuboid_presents_its_edge() {
    let library = MeshLibrary::build();
    let mut cube = object_at(PrimitiveKind::Cuboid, Vec3::ZERO);
    // 45 degrees about Y puts the face plane at x + z = sqrt(2).
    cube.transform.rotation = Vec3::new(0.0, std::f32::consts::FRAC_PI_4, 0.0);

    // Slightly off the rotated edge so the hit lands on a face.
    let ray = Ray::new(Vec3::new(5.0, 0.0, 0.1), Vec3::NEG_X);
    let hit = pick(&library, &[cube], &ray).expect("rotated cube should be hit");
    let expected = 5.0 - (2f32.sqrt() - 0.1);
    assert!((hit.t - expected).abs() < 1e-2, "t = {}", hit.t);
}

#[test]
fn torus_tube_is_hit_from_above() {
    let library = MeshLibrary::build();
    let torus = object_at(PrimitiveKind::Torus, Vec3::ZERO);

    // Straight down onto the tube ring at radius 1.
    let ray = Ray::new(Vec3::new(1.0, 5.0, 0.0), Vec3::NEG_Y);
    let hit = pick(&library, &[torus], &ray).expect("torus tube should be hit");
    assert!((hit.t - 4.65).abs() < 0.05, "t = {}", hit.t);
}

#[test]
fn ray_through_the_torus_hole_misses() {
    let library = MeshLibrary::build();
    let torus = object_at(PrimitiveKind::Torus, Vec3::ZERO);

    let ray = Ray::new(Vec3::new(0.0, 5.0, 0.0), Vec3::NEG_Y);
    assert!(pick(&library, &[torus], &ray).is_none());
}

// ============================================================================
// Ordering and exclusion
// ============================================================================

#[test]
fn the_closest_object_wins() {
    let library = MeshLibrary::build();
    let near = object_at(PrimitiveKind::Sphere, Vec3::new(0.0, 0.0, 0.0));
    let far = object_at(PrimitiveKind::Sphere, Vec3::new(0.0, 0.0, 4.0));

    let ray = Ray::new(Vec3::new(0.0, 0.0, -5.0), Vec3::Z);
    // Scene order should not matter, only distance.
    let hit = pick(&library, &[far.clone(), near.clone()], &ray).unwrap();
    assert_eq!(hit.object_id, near.id);
}

#[test]
fn hidden_objects_are_not_pickable() {
    let library = MeshLibrary::build();
    let mut front = object_at(PrimitiveKind::Sphere, Vec3::ZERO);
    front.visible = false;
    let behind = object_at(PrimitiveKind::Sphere, Vec3::new(0.0, 0.0, 4.0));

    let ray = Ray::new(Vec3::new(0.0, 0.0, -5.0), Vec3::Z);
    let hit = pick(&library, &[front, behind.clone()], &ray).unwrap();
    assert_eq!(hit.object_id, behind.id);
}

#[test]
fn non_finite_transforms_are_skipped() {
    let library = MeshLibrary::build();
    let mut broken = object_at(PrimitiveKind::Sphere, Vec3::ZERO);
    broken.transform.scale.y = f32::NAN;

    let ray = Ray::new(Vec3::new(0.0, 0.0, -5.0), Vec3::Z);
    assert!(pick(&library, &[broken], &ray).is_none());
}

#[test]
fn glass_and_light_materials_pick_like_any_other() {
    let library = MeshLibrary::build();
    let mut lamp = object_at(PrimitiveKind::Cuboid, Vec3::ZERO);
    lamp.material = Material::light(Vec3::ONE, 10.0);

    let ray = Ray::new(Vec3::new(0.0, 0.0, -5.0), Vec3::Z);
    let hit = pick(&library, &[lamp.clone()], &ray).unwrap();
    assert_eq!(hit.object_id, lamp.id);
    assert!((hit.t - 4.0).abs() < 1e-3);
}

// ============================================================================
// Camera rays
// ============================================================================

#[test]
fn center_pixel_ray_points_at_the_target() {
    let camera = OrbitCamera::new();
    let ray = camera_ray(&camera, (128.0, 128.0), (256, 256));

    let to_target = (camera.target() - camera.position()).normalize();
    assert!(ray.dir.dot(to_target) > 0.9999);
    assert_eq!(ray.origin, camera.position());
}

#[test]
fn corner_pixel_rays_diverge_from_the_center() {
    let camera = OrbitCamera::new();
    let center = camera_ray(&camera, (128.0, 128.0), (256, 256));
    let corner = camera_ray(&camera, (0.0, 0.0), (256, 256));

    assert!(center.dir.dot(corner.dir) < 0.9999);
    // The top-left corner ray leans up relative to the center ray.
    assert!(corner.dir.y > center.dir.y);
}

#[test]
fn center_ray_picks_the_object_at_the_target() {
    let library = MeshLibrary::build();
    let camera = OrbitCamera::new();
    let sphere = object_at(PrimitiveKind::Sphere, Vec3::ZERO);

    let ray = camera_ray(&camera, (400.0, 300.0), (800, 600));
    let hit = pick(&library, &[sphere.clone()], &ray).expect("sphere under the crosshair");
    assert_eq!(hit.object_id, sphere.id);
    // Camera orbits at distance 8; the sphere surface is one unit early.
    assert!((hit.t - 7.0).abs() < 0.1, "t = {}", hit.t);
}
