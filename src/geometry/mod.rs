//! Mesh generation, per-mesh acceleration structures, and GPU packing.
//!
//! Every primitive mesh is generated deterministically at a fixed
//! tessellation, gets a BVH (BLAS) built over its triangles, and is packed
//! into the flat buffers of [`library::MeshLibrary`] once at startup.

pub mod bvh;
pub mod library;
pub mod primitives;

pub use bvh::{Blas, BvhNode};
pub use library::{GpuBvhNode, GpuMeshMeta, GpuVertex, MeshLibrary};

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::math::Aabb;

/// The six editable primitives. The discriminant order is the stable
/// mesh id used on the GPU.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrimitiveKind {
    Sphere,
    Cuboid,
    Cylinder,
    Cone,
    Capsule,
    Torus,
}

impl PrimitiveKind {
    /// All primitives in mesh-id order.
    pub const ALL: [PrimitiveKind; 6] = [
        PrimitiveKind::Sphere,
        PrimitiveKind::Cuboid,
        PrimitiveKind::Cylinder,
        PrimitiveKind::Cone,
        PrimitiveKind::Capsule,
        PrimitiveKind::Torus,
    ];

    /// Stable mesh id in `0..6`.
    #[must_use]
    pub fn mesh_id(self) -> u32 {
        match self {
            PrimitiveKind::Sphere => 0,
            PrimitiveKind::Cuboid => 1,
            PrimitiveKind::Cylinder => 2,
            PrimitiveKind::Cone => 3,
            PrimitiveKind::Capsule => 4,
            PrimitiveKind::Torus => 5,
        }
    }

    /// Generates the canonical object-space mesh for this primitive.
    #[must_use]
    pub fn generate(self) -> MeshData {
        match self {
            PrimitiveKind::Sphere => primitives::create_sphere(),
            PrimitiveKind::Cuboid => primitives::create_cuboid(),
            PrimitiveKind::Cylinder => primitives::create_cylinder(),
            PrimitiveKind::Cone => primitives::create_cone(),
            PrimitiveKind::Capsule => primitives::create_capsule(),
            PrimitiveKind::Torus => primitives::create_torus(),
        }
    }

    /// Display name used for default object names.
    #[must_use]
    pub fn display_name(self) -> &'static str {
        match self {
            PrimitiveKind::Sphere => "Sphere",
            PrimitiveKind::Cuboid => "Cuboid",
            PrimitiveKind::Cylinder => "Cylinder",
            PrimitiveKind::Cone => "Cone",
            PrimitiveKind::Capsule => "Capsule",
            PrimitiveKind::Torus => "Torus",
        }
    }
}

/// A triangle mesh in object space.
///
/// `positions` and `normals` run in parallel; `indices` holds `3m` entries
/// describing `m` triangles. `bounds` contains every vertex.
#[derive(Debug, Clone, PartialEq)]
pub struct MeshData {
    pub positions: Vec<Vec3>,
    pub normals: Vec<Vec3>,
    pub indices: Vec<u32>,
    pub bounds: Aabb,
}

impl MeshData {
    #[must_use]
    pub fn new() -> Self {
        Self {
            positions: Vec::new(),
            normals: Vec::new(),
            indices: Vec::new(),
            bounds: Aabb::EMPTY,
        }
    }

    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Appends a vertex and returns its index.
    pub fn push_vertex(&mut self, position: Vec3, normal: Vec3) -> u32 {
        let index = self.positions.len() as u32;
        self.positions.push(position);
        self.normals.push(normal);
        index
    }

    pub fn push_triangle(&mut self, a: u32, b: u32, c: u32) {
        self.indices.extend_from_slice(&[a, b, c]);
    }

    /// Recomputes `bounds` from the positions.
    pub fn compute_bounds(&mut self) {
        self.bounds = Aabb::from_points(self.positions.iter().copied());
    }
}

impl Default for MeshData {
    fn default() -> Self {
        Self::new()
    }
}
