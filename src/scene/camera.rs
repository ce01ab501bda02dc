//! Orbit camera.
//!
//! The camera circles a target point on a clamped spherical shell.
//! Azimuth wraps; elevation stays strictly inside the poles so the view
//! basis never degenerates. Every mutation bumps a monotonic version,
//! which the renderer turns into an accumulation reset.

use std::f32::consts::{FRAC_PI_2, PI, TAU};

use glam::{Mat4, Vec3};

/// Distance clamp range.
pub const DISTANCE_MIN: f32 = 0.5;
pub const DISTANCE_MAX: f32 = 100.0;

/// Elevation stays this far away from the poles.
pub const ELEVATION_MARGIN: f32 = 0.1;

/// Near/far planes of the perspective projection.
pub const Z_NEAR: f32 = 0.1;
pub const Z_FAR: f32 = 1000.0;

#[derive(Debug, Clone)]
pub struct OrbitCamera {
    target: Vec3,
    up: Vec3,
    fov_y: f32,
    distance: f32,
    azimuth: f32,
    elevation: f32,
    version: u64,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self::new()
    }
}

impl OrbitCamera {
    #[must_use]
    pub fn new() -> Self {
        Self {
            target: Vec3::ZERO,
            up: Vec3::Y,
            fov_y: 45f32.to_radians(),
            distance: 8.0,
            azimuth: PI / 4.0,
            elevation: PI / 6.0,
            version: 0,
        }
    }

    /// World position derived from the spherical coordinates.
    #[must_use]
    pub fn position(&self) -> Vec3 {
        let (sin_az, cos_az) = self.azimuth.sin_cos();
        let (sin_el, cos_el) = self.elevation.sin_cos();
        self.target + self.distance * Vec3::new(cos_el * sin_az, sin_el, cos_el * cos_az)
    }

    #[must_use]
    pub fn view(&self) -> Mat4 {
        Mat4::look_at_rh(self.position(), self.target, self.up)
    }

    #[must_use]
    pub fn projection(&self, aspect: f32) -> Mat4 {
        Mat4::perspective_rh(self.fov_y, aspect.max(1e-4), Z_NEAR, Z_FAR)
    }

    #[must_use]
    pub fn inverse_view(&self) -> Mat4 {
        self.view().inverse()
    }

    #[must_use]
    pub fn inverse_projection(&self, aspect: f32) -> Mat4 {
        self.projection(aspect).inverse()
    }

    // ========================================================================
    // Mutation (input bindings live outside the core)
    // ========================================================================

    /// Rotates around the target. Azimuth wraps into `[0, 2pi)`;
    /// elevation clamps inside the poles.
    pub fn orbit(&mut self, delta_azimuth: f32, delta_elevation: f32) {
        self.azimuth = (self.azimuth + delta_azimuth).rem_euclid(TAU);
        self.elevation = (self.elevation + delta_elevation)
            .clamp(-FRAC_PI_2 + ELEVATION_MARGIN, FRAC_PI_2 - ELEVATION_MARGIN);
        self.touch();
    }

    /// Moves toward or away from the target, clamped to the distance
    /// range.
    pub fn zoom(&mut self, delta: f32) {
        self.distance = (self.distance + delta).clamp(DISTANCE_MIN, DISTANCE_MAX);
        self.touch();
    }

    /// Shifts the orbit target.
    pub fn pan(&mut self, offset: Vec3) {
        self.target += offset;
        self.touch();
    }

    pub fn set_fov_y(&mut self, fov_y: f32) {
        self.fov_y = fov_y.clamp(10f32.to_radians(), 120f32.to_radians());
        self.touch();
    }

    pub fn set_distance(&mut self, distance: f32) {
        self.distance = distance.clamp(DISTANCE_MIN, DISTANCE_MAX);
        self.touch();
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    #[must_use]
    pub fn target(&self) -> Vec3 {
        self.target
    }

    #[must_use]
    pub fn up(&self) -> Vec3 {
        self.up
    }

    #[must_use]
    pub fn fov_y(&self) -> f32 {
        self.fov_y
    }

    #[must_use]
    pub fn distance(&self) -> f32 {
        self.distance
    }

    #[must_use]
    pub fn azimuth(&self) -> f32 {
        self.azimuth
    }

    #[must_use]
    pub fn elevation(&self) -> f32 {
        self.elevation
    }

    /// Monotonic mutation counter.
    #[must_use]
    pub fn version(&self) -> u64 {
        self.version
    }

    fn touch(&mut self) {
        self.version = self.version.wrapping_add(1);
    }
}
