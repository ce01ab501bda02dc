//! Orbit Camera Tests
//!
//! Tests for:
//! - Distance and elevation clamps, azimuth wrapping
//! - The spherical position formula
//! - View/projection inverse round-trips
//! - Version bumps on every mutation

use std::f32::consts::{FRAC_PI_2, PI, TAU};

use glam::{Vec3, Vec4};
use lumen::scene::camera::{DISTANCE_MAX, DISTANCE_MIN, ELEVATION_MARGIN};
use lumen::OrbitCamera;

const EPSILON: f32 = 1e-4;

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < EPSILON
}

// ============================================================================
// Clamps and wrapping
// ============================================================================

#[test]
fn zoom_clamps_to_the_distance_range() {
    let mut camera = OrbitCamera::new();
    camera.zoom(-1000.0);
    assert!(approx(camera.distance(), DISTANCE_MIN));
    camera.zoom(10_000.0);
    assert!(approx(camera.distance(), DISTANCE_MAX));
}

#[test]
fn elevation_never_reaches_the_poles() {
    let mut camera = OrbitCamera::new();
    camera.orbit(0.0, 100.0);
    assert!(camera.elevation() <= FRAC_PI_2 - ELEVATION_MARGIN + EPSILON);
    camera.orbit(0.0, -100.0);
    assert!(camera.elevation() >= -FRAC_PI_2 + ELEVATION_MARGIN - EPSILON);
    assert!(camera.elevation().abs() < FRAC_PI_2);
}

#[test]
fn azimuth_wraps_into_one_turn() {
    let mut camera = OrbitCamera::new();
    camera.orbit(5.0 * TAU + 0.25, 0.0);
    assert!(camera.azimuth() >= 0.0 && camera.azimuth() < TAU);
    // Wrapping preserves the angle modulo a full turn.
    assert!(approx(camera.azimuth(), (PI / 4.0 + 0.25).rem_euclid(TAU)));
}

// ============================================================================
// Position formula
// ============================================================================

#[test]
fn position_follows_the_spherical_formula() {
    let mut camera = OrbitCamera::new();
    camera.set_distance(10.0);
    camera.orbit(-camera.azimuth(), -camera.elevation()); // az = el = 0

    // Elevation 0, azimuth 0 looks down +Z from the target.
    let p = camera.position();
    assert!(approx(p.x, 0.0) && approx(p.y, 0.0) && approx(p.z, 10.0));

    camera.orbit(FRAC_PI_2, 0.0);
    let p = camera.position();
    assert!(approx(p.x, 10.0) && approx(p.z, 0.0));
}

#[test]
fn panning_moves_the_target_and_the_position_together() {
    let mut camera = OrbitCamera::new();
    let before = camera.position();
    camera.pan(Vec3::new(1.0, 2.0, 3.0));
    let after = camera.position();
    assert!((after - before - Vec3::new(1.0, 2.0, 3.0)).length() < EPSILON);
    assert_eq!(camera.target(), Vec3::new(1.0, 2.0, 3.0));
}

// ============================================================================
// Matrices
// ============================================================================

#[test]
fn view_matrix_round_trips_through_its_inverse() {
    let camera = OrbitCamera::new();
    let product = camera.view() * camera.inverse_view();
    let identity = glam::Mat4::IDENTITY;
    for col in 0..4 {
        assert!((product.col(col) - identity.col(col)).length() < 1e-4);
    }
}

#[test]
fn view_puts_the_target_on_the_negative_z_axis() {
    let camera = OrbitCamera::new();
    let target_view = camera.view() * Vec4::new(0.0, 0.0, 0.0, 1.0);
    assert!(target_view.x.abs() < EPSILON);
    assert!(target_view.y.abs() < EPSILON);
    assert!(approx(-target_view.z, camera.distance()));
}

#[test]
fn projection_is_finite_and_invertible() {
    let camera = OrbitCamera::new();
    for aspect in [0.5, 1.0, 16.0 / 9.0] {
        let projection = camera.projection(aspect);
        assert!(projection.is_finite());
        let product = projection * camera.inverse_projection(aspect);
        assert!((product.col(0) - Vec4::X).length() < 1e-4);
    }
}

// ============================================================================
// Versioning
// ============================================================================

#[test]
fn every_mutation_bumps_the_version() {
    let mut camera = OrbitCamera::new();
    let mut last = camera.version();

    camera.orbit(0.1, 0.1);
    assert!(camera.version() > last);
    last = camera.version();

    camera.zoom(1.0);
    assert!(camera.version() > last);
    last = camera.version();

    camera.pan(Vec3::X);
    assert!(camera.version() > last);
    last = camera.version();

    camera.set_fov_y(1.0);
    assert!(camera.version() > last);
}
