use std::f32::consts::PI;

use glam::Vec3;

use super::{cylinder::push_cap, RADIAL_SEGMENTS};
use crate::geometry::MeshData;

/// Capped cone: base radius 1 at y = -1, apex at y = +1. 32 segments.
///
/// The slant surface of `x^2 + z^2 = ((1 - y) / 2)^2` has the constant
/// outward normal direction `(2 cos phi, 1, 2 sin phi)`; the apex is
/// duplicated per segment so each column keeps its own slant normal.
#[must_use]
pub fn create_cone() -> MeshData {
    let mut mesh = MeshData::new();
    let inv_len = 1.0 / 5.0f32.sqrt();

    // Base ring then apex ring (degenerate positions, per-segment normals).
    for ring in 0..2u32 {
        for seg in 0..=RADIAL_SEGMENTS {
            let phi = seg as f32 / RADIAL_SEGMENTS as f32 * 2.0 * PI;
            let (c, s) = (phi.cos(), phi.sin());
            let normal = Vec3::new(2.0 * c, 1.0, 2.0 * s) * inv_len;
            let position = if ring == 0 {
                Vec3::new(c, -1.0, s)
            } else {
                Vec3::new(0.0, 1.0, 0.0)
            };
            mesh.push_vertex(position, normal);
        }
    }

    let stride = RADIAL_SEGMENTS + 1;
    for seg in 0..RADIAL_SEGMENTS {
        let base0 = seg;
        let base1 = seg + 1;
        let apex = stride + seg;
        mesh.push_triangle(base0, apex, base1);
    }

    push_cap(&mut mesh, -1.0, Vec3::NEG_Y);

    mesh.compute_bounds();
    mesh
}
