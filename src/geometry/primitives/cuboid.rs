use glam::Vec3;

use crate::geometry::MeshData;

/// Axis-aligned cuboid with half-extents (1, 1, 1), origin-centered.
///
/// 24 vertices (4 per face) so each face carries its own flat normal.
#[must_use]
pub fn create_cuboid() -> MeshData {
    let mut mesh = MeshData::new();

    // (normal, two in-plane tangents); corners are n + or - u + or - v.
    const FACES: [(Vec3, Vec3, Vec3); 6] = [
        (Vec3::Z, Vec3::X, Vec3::Y),         // front  (+Z)
        (Vec3::NEG_Z, Vec3::NEG_X, Vec3::Y), // back   (-Z)
        (Vec3::Y, Vec3::X, Vec3::NEG_Z),     // top    (+Y)
        (Vec3::NEG_Y, Vec3::X, Vec3::Z),     // bottom (-Y)
        (Vec3::X, Vec3::NEG_Z, Vec3::Y),     // right  (+X)
        (Vec3::NEG_X, Vec3::Z, Vec3::Y),     // left   (-X)
    ];

    for (normal, u, v) in FACES {
        let base = mesh.vertex_count() as u32;
        mesh.push_vertex(normal - u - v, normal);
        mesh.push_vertex(normal + u - v, normal);
        mesh.push_vertex(normal + u + v, normal);
        mesh.push_vertex(normal - u + v, normal);

        mesh.push_triangle(base, base + 1, base + 2);
        mesh.push_triangle(base, base + 2, base + 3);
    }

    mesh.compute_bounds();
    mesh
}
