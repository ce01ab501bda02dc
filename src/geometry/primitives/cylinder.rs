use std::f32::consts::PI;

use glam::Vec3;

use super::RADIAL_SEGMENTS;
use crate::geometry::MeshData;

/// Capped cylinder, radius 1, spanning y in [-1, 1]. 32 radial segments.
///
/// The side shares smooth radial normals; both caps duplicate the rim
/// vertices with flat +-Y normals.
#[must_use]
pub fn create_cylinder() -> MeshData {
    let mut mesh = MeshData::new();

    // Side wall: two rings, smooth normals.
    for ring in 0..2u32 {
        let y = if ring == 0 { -1.0 } else { 1.0 };
        for seg in 0..=RADIAL_SEGMENTS {
            let phi = seg as f32 / RADIAL_SEGMENTS as f32 * 2.0 * PI;
            let (x, z) = (phi.cos(), phi.sin());
            mesh.push_vertex(Vec3::new(x, y, z), Vec3::new(x, 0.0, z));
        }
    }
    let stride = RADIAL_SEGMENTS + 1;
    for seg in 0..RADIAL_SEGMENTS {
        let v0 = seg;
        let v1 = seg + 1;
        let v2 = stride + seg;
        let v3 = stride + seg + 1;
        mesh.push_triangle(v0, v2, v1);
        mesh.push_triangle(v1, v2, v3);
    }

    push_cap(&mut mesh, 1.0, Vec3::Y);
    push_cap(&mut mesh, -1.0, Vec3::NEG_Y);

    mesh.compute_bounds();
    mesh
}

/// Triangle-fan cap at height `y` with a flat `normal`.
pub(super) fn push_cap(mesh: &mut MeshData, y: f32, normal: Vec3) {
    let center = mesh.push_vertex(Vec3::new(0.0, y, 0.0), normal);
    let ring_base = mesh.vertex_count() as u32;
    for seg in 0..=RADIAL_SEGMENTS {
        let phi = seg as f32 / RADIAL_SEGMENTS as f32 * 2.0 * PI;
        mesh.push_vertex(Vec3::new(phi.cos(), y, phi.sin()), normal);
    }
    for seg in 0..RADIAL_SEGMENTS {
        let a = ring_base + seg;
        let b = ring_base + seg + 1;
        // Wind so the face looks outward along `normal`.
        if normal.y > 0.0 {
            mesh.push_triangle(center, b, a);
        } else {
            mesh.push_triangle(center, a, b);
        }
    }
}
