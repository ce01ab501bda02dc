//! Mesh Library Packing Tests
//!
//! Tests for:
//! - GPU record sizes (vertex 32 B, node 48 B, meta 32 B)
//! - Cumulative offsets in the meta records
//! - Index pre-offsetting into the packed vertex array
//! - Global rewriting of BLAS child indices and leaf triangle offsets
//! - Leaf-order index reordering matching a fresh BLAS build
//! - Out-of-band object-space bounds

use lumen::geometry::bvh::build_blas;
use lumen::geometry::{GpuBvhNode, GpuMeshMeta, GpuVertex};
use lumen::{MeshLibrary, PrimitiveKind};

#[test]
fn record_sizes_match_the_wire_format() {
    assert_eq!(std::mem::size_of::<GpuVertex>(), 32);
    assert_eq!(std::mem::size_of::<GpuBvhNode>(), 48);
    assert_eq!(std::mem::size_of::<GpuMeshMeta>(), 32);
}

#[test]
fn library_packs_one_meta_record_per_primitive() {
    let library = MeshLibrary::build();
    assert_eq!(library.meta.len(), PrimitiveKind::ALL.len());
    assert_eq!(library.mesh_count(), 6);
}

#[test]
fn meta_offsets_are_cumulative_and_exhaustive() {
    let library = MeshLibrary::build();

    let mut vertex_cursor = 0;
    let mut index_cursor = 0;
    let mut node_cursor = 0;
    for meta in &library.meta {
        assert_eq!(meta.vertex_offset, vertex_cursor);
        assert_eq!(meta.index_offset, index_cursor);
        assert_eq!(meta.node_offset, node_cursor);
        vertex_cursor += meta.vertex_count;
        index_cursor += meta.index_count;
        node_cursor += meta.node_count;
    }
    assert_eq!(vertex_cursor as usize, library.vertices.len());
    assert_eq!(index_cursor as usize, library.indices.len());
    assert_eq!(node_cursor as usize, library.nodes.len());
}

#[test]
fn packed_indices_point_into_their_own_vertex_range() {
    let library = MeshLibrary::build();

    for meta in &library.meta {
        let start = meta.index_offset as usize;
        let end = start + meta.index_count as usize;
        for &index in &library.indices[start..end] {
            assert!(index >= meta.vertex_offset);
            assert!(index < meta.vertex_offset + meta.vertex_count);
        }
    }
}

#[test]
fn node_children_and_leaf_offsets_are_global() {
    let library = MeshLibrary::build();

    for meta in &library.meta {
        let start = meta.node_offset as usize;
        let end = start + meta.node_count as usize;
        for node in &library.nodes[start..end] {
            if node.tri_count > 0 {
                assert_eq!((node.left, node.right), (-1, -1));
                // Leaf offsets are u32 entries into the packed index
                // buffer, confined to this mesh's slice.
                assert!(node.tri_index_offset >= meta.index_offset);
                assert!(
                    node.tri_index_offset + node.tri_count * 3
                        <= meta.index_offset + meta.index_count
                );
            } else {
                assert!(node.left >= start as i32 && (node.left as usize) < end);
                assert!(node.right >= start as i32 && (node.right as usize) < end);
            }
        }
    }
}

#[test]
fn packed_index_order_matches_a_fresh_blas_build() {
    let library = MeshLibrary::build();

    for kind in PrimitiveKind::ALL {
        let mesh = kind.generate();
        let blas = build_blas(&mesh.positions, &mesh.indices);
        let meta = library.meta_of(kind.mesh_id());

        let mut expected = Vec::with_capacity(meta.index_count as usize);
        for &tri in &blas.tri_refs {
            for corner in 0..3 {
                expected.push(mesh.indices[tri as usize * 3 + corner] + meta.vertex_offset);
            }
        }

        let start = meta.index_offset as usize;
        let actual = &library.indices[start..start + meta.index_count as usize];
        assert_eq!(actual, expected.as_slice(), "{kind:?} index order differs");
    }
}

#[test]
fn packed_vertices_carry_positions_and_normals() {
    let library = MeshLibrary::build();
    let mesh = PrimitiveKind::Cuboid.generate();
    let meta = library.meta_of(PrimitiveKind::Cuboid.mesh_id());

    assert_eq!(meta.vertex_count as usize, mesh.vertex_count());
    for (i, (position, normal)) in mesh.positions.iter().zip(&mesh.normals).enumerate() {
        let vertex = &library.vertices[meta.vertex_offset as usize + i];
        assert_eq!(vertex.position, position.to_array());
        assert_eq!(vertex.normal, normal.to_array());
    }
}

#[test]
fn object_bounds_survive_packing() {
    let library = MeshLibrary::build();
    for kind in PrimitiveKind::ALL {
        let mesh = kind.generate();
        let bounds = library.object_bounds(kind.mesh_id());
        assert_eq!(bounds, mesh.bounds, "{kind:?} bounds differ");
    }
}
