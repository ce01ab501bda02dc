//! The packed mesh library: every primitive mesh and its BLAS
//! concatenated into four flat, GPU-ready buffers.
//!
//! Packing rewrites all local offsets into the global packed space:
//! vertex indices are pre-offset by the vertex cursor (the shader does a
//! flat array lookup), BLAS child indices are offset by the node cursor,
//! and leaf triangle offsets become offsets into the packed index buffer
//! measured in `u32` entries. The library is built once at renderer init
//! and is immutable for the run.

use bytemuck::{Pod, Zeroable};

use crate::geometry::{bvh, MeshData, PrimitiveKind};
use crate::math::Aabb;

/// Number of meshes in the library (one per primitive).
pub const MESH_COUNT: usize = PrimitiveKind::ALL.len();

/// Vertex record, 32 bytes: `position.xyz, 0, normal.xyz, 0`.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct GpuVertex {
    pub position: [f32; 3],
    pub _pad0: f32,
    pub normal: [f32; 3],
    pub _pad1: f32,
}

/// BLAS node record, 48 bytes:
/// `aabbMin | left | aabbMax | right | triIndexOffset | triCount | pad`.
///
/// Interior nodes carry global child indices and `tri_count == 0`;
/// leaves carry `left == right == -1` and `tri_index_offset` pointing at
/// the first of `3 * tri_count` entries in the packed index buffer.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct GpuBvhNode {
    pub aabb_min: [f32; 3],
    pub left: i32,
    pub aabb_max: [f32; 3],
    pub right: i32,
    pub tri_index_offset: u32,
    pub tri_count: u32,
    pub _pad: [u32; 2],
}

/// Per-mesh metadata record, 32 bytes (all `u32`).
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct GpuMeshMeta {
    pub vertex_offset: u32,
    pub vertex_count: u32,
    pub index_offset: u32,
    pub index_count: u32,
    pub node_offset: u32,
    pub node_count: u32,
    pub _pad: [u32; 2],
}

/// All primitive meshes packed for upload, plus the object-space bounds
/// the instance packer and picker need on the CPU side.
pub struct MeshLibrary {
    pub vertices: Vec<GpuVertex>,
    pub indices: Vec<u32>,
    pub nodes: Vec<GpuBvhNode>,
    pub meta: Vec<GpuMeshMeta>,
    object_bounds: [Aabb; MESH_COUNT],
}

impl MeshLibrary {
    /// Generates all six primitives, builds their BLASes, and packs them.
    #[must_use]
    pub fn build() -> Self {
        let mut library = Self {
            vertices: Vec::new(),
            indices: Vec::new(),
            nodes: Vec::new(),
            meta: Vec::new(),
            object_bounds: [Aabb::EMPTY; MESH_COUNT],
        };

        for kind in PrimitiveKind::ALL {
            let mesh = kind.generate();
            let blas = bvh::build_blas(&mesh.positions, &mesh.indices);
            library.pack_mesh(kind, &mesh, &blas);
        }

        library
    }

    fn pack_mesh(&mut self, kind: PrimitiveKind, mesh: &MeshData, blas: &bvh::Blas) {
        let v_cursor = self.vertices.len() as u32;
        let i_cursor = self.indices.len() as u32;
        let n_cursor = self.nodes.len() as u32;

        for (position, normal) in mesh.positions.iter().zip(&mesh.normals) {
            self.vertices.push(GpuVertex {
                position: position.to_array(),
                _pad0: 0.0,
                normal: normal.to_array(),
                _pad1: 0.0,
            });
        }

        // Indices in BLAS leaf order, pre-offset into the packed vertex
        // array.
        for &tri in &blas.tri_refs {
            let i = tri as usize * 3;
            self.indices.push(mesh.indices[i] + v_cursor);
            self.indices.push(mesh.indices[i + 1] + v_cursor);
            self.indices.push(mesh.indices[i + 2] + v_cursor);
        }

        for node in &blas.nodes {
            let (left, right, tri_index_offset) = if node.is_leaf() {
                (-1, -1, i_cursor + node.tri_offset * 3)
            } else {
                (node.left + n_cursor as i32, node.right + n_cursor as i32, 0)
            };
            self.nodes.push(GpuBvhNode {
                aabb_min: node.bounds.min.to_array(),
                left,
                aabb_max: node.bounds.max.to_array(),
                right,
                tri_index_offset,
                tri_count: node.tri_count,
                _pad: [0; 2],
            });
        }

        self.meta.push(GpuMeshMeta {
            vertex_offset: v_cursor,
            vertex_count: mesh.vertex_count() as u32,
            index_offset: i_cursor,
            index_count: mesh.indices.len() as u32,
            node_offset: n_cursor,
            node_count: blas.nodes.len() as u32,
            _pad: [0; 2],
        });

        self.object_bounds[kind.mesh_id() as usize] = mesh.bounds;
    }

    /// Object-space bounds of the mesh with the given id.
    #[must_use]
    pub fn object_bounds(&self, mesh_id: u32) -> Aabb {
        self.object_bounds[mesh_id as usize]
    }

    #[must_use]
    pub fn mesh_count(&self) -> u32 {
        self.meta.len() as u32
    }

    #[must_use]
    pub fn meta_of(&self, mesh_id: u32) -> &GpuMeshMeta {
        &self.meta[mesh_id as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_sizes_match_the_wire_format() {
        assert_eq!(std::mem::size_of::<GpuVertex>(), 32);
        assert_eq!(std::mem::size_of::<GpuBvhNode>(), 48);
        assert_eq!(std::mem::size_of::<GpuMeshMeta>(), 32);
    }
}
