use std::f32::consts::PI;

use glam::Vec3;

use super::{RADIAL_SEGMENTS, TORUS_MINOR_RADIUS, TORUS_MINOR_SEGMENTS};
use crate::geometry::MeshData;

/// Torus: major radius 1, minor radius 0.35, ring in the XZ plane.
/// 32 major x 16 minor segments.
#[must_use]
pub fn create_torus() -> MeshData {
    let mut mesh = MeshData::new();

    for major in 0..=RADIAL_SEGMENTS {
        let u = major as f32 / RADIAL_SEGMENTS as f32 * 2.0 * PI;
        let (cu, su) = (u.cos(), u.sin());

        for minor in 0..=TORUS_MINOR_SEGMENTS {
            let v = minor as f32 / TORUS_MINOR_SEGMENTS as f32 * 2.0 * PI;
            let (cv, sv) = (v.cos(), v.sin());

            let ring = 1.0 + TORUS_MINOR_RADIUS * cv;
            let position = Vec3::new(ring * cu, TORUS_MINOR_RADIUS * sv, ring * su);
            // Normal points from the tube's center circle to the surface.
            let normal = Vec3::new(cv * cu, sv, cv * su);
            mesh.push_vertex(position, normal);
        }
    }

    let stride = TORUS_MINOR_SEGMENTS + 1;
    for major in 0..RADIAL_SEGMENTS {
        for minor in 0..TORUS_MINOR_SEGMENTS {
            let v0 = major * stride + minor;
            let v1 = v0 + 1;
            let v2 = (major + 1) * stride + minor;
            let v3 = v2 + 1;
            mesh.push_triangle(v0, v2, v1);
            mesh.push_triangle(v1, v2, v3);
        }
    }

    mesh.compute_bounds();
    mesh
}
