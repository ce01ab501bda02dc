use std::f32::consts::PI;

use glam::Vec3;

use super::{RADIAL_SEGMENTS, SPHERE_RINGS};
use crate::geometry::MeshData;

/// UV sphere, radius 1, origin-centered. 32 segments x 16 rings.
#[must_use]
pub fn create_sphere() -> MeshData {
    let mut mesh = MeshData::new();

    // Latitude from the south pole (theta = 0) to the north pole.
    for ring in 0..=SPHERE_RINGS {
        let v = ring as f32 / SPHERE_RINGS as f32;
        let theta = v * PI;
        let y = -theta.cos();
        let ring_radius = theta.sin();

        for seg in 0..=RADIAL_SEGMENTS {
            let u = seg as f32 / RADIAL_SEGMENTS as f32;
            let phi = u * 2.0 * PI;

            let x = -ring_radius * phi.cos();
            let z = ring_radius * phi.sin();

            // Unit sphere: the position is the outward normal.
            let p = Vec3::new(x, y, z);
            mesh.push_vertex(p, p);
        }
    }

    let stride = RADIAL_SEGMENTS + 1;
    for ring in 0..SPHERE_RINGS {
        for seg in 0..RADIAL_SEGMENTS {
            let v0 = ring * stride + seg;
            let v1 = v0 + 1;
            let v2 = (ring + 1) * stride + seg;
            let v3 = v2 + 1;

            mesh.push_triangle(v0, v1, v2);
            mesh.push_triangle(v1, v3, v2);
        }
    }

    mesh.compute_bounds();
    mesh
}
