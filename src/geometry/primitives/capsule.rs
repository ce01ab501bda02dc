use std::f32::consts::PI;

use glam::Vec3;

use super::{RADIAL_SEGMENTS, SPHERE_RINGS};
use crate::geometry::MeshData;

/// Capsule: cylinder radius 1, half-height 1, hemispherical caps.
/// Total y-span [-2, 2]. 32 radial segments; each hemisphere uses half
/// the sphere's ring count so the cap density matches the UV sphere.
#[must_use]
pub fn create_capsule() -> MeshData {
    let mut mesh = MeshData::new();
    let half_rings = SPHERE_RINGS / 2;

    // Ring stack, bottom pole to top pole. The surface is smooth
    // everywhere (hemisphere equators share the radial wall normal), so
    // consecutive rings can simply be stitched.
    //
    // Bottom hemisphere: centers at y = -1.
    for ring in 0..=half_rings {
        let theta = ring as f32 / SPHERE_RINGS as f32 * PI;
        push_ring(&mut mesh, theta.sin(), -theta.cos() - 1.0, -theta.cos());
    }
    // Top of the cylinder wall (the bottom ring at y = -1 is the
    // hemisphere equator emitted above, and this ring doubles as the top
    // hemisphere's equator).
    push_ring(&mut mesh, 1.0, 1.0, 0.0);
    // Top hemisphere: centers at y = +1.
    for ring in half_rings + 1..=SPHERE_RINGS {
        let theta = ring as f32 / SPHERE_RINGS as f32 * PI;
        push_ring(&mut mesh, theta.sin(), -theta.cos() + 1.0, -theta.cos());
    }

    let stride = RADIAL_SEGMENTS + 1;
    let ring_count = mesh.vertex_count() as u32 / stride;
    for ring in 0..ring_count - 1 {
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

/// One latitude ring: radius `ring_radius` at height `y`, with the
/// normal's vertical component `normal_y` (0 on the cylinder wall).
fn push_ring(mesh: &mut MeshData, ring_radius: f32, y: f32, normal_y: f32) {
    for seg in 0..=RADIAL_SEGMENTS {
        let phi = seg as f32 / RADIAL_SEGMENTS as f32 * 2.0 * PI;
        let (x, z) = (-phi.cos(), phi.sin());
        let position = Vec3::new(ring_radius * x, y, ring_radius * z);
        let radial = (1.0 - normal_y * normal_y).max(0.0).sqrt();
        let normal = Vec3::new(radial * x, normal_y, radial * z);
        mesh.push_vertex(position, normal);
    }
}
