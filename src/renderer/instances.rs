//! Scene-to-GPU instance packing.
//!
//! Each visible object becomes one 128-byte instance record carrying its
//! transform, material, mesh id, and a precomputed world-space AABB the
//! kernel uses as its per-instance cull. Packing also resolves the
//! selected object id to a dense index into the packed list so the
//! highlight pass and the instance loop always agree.

use bytemuck::{Pod, Zeroable};
use log::warn;

use crate::geometry::MeshLibrary;
use crate::scene::SceneObject;

/// Hard cap on rendered instances; objects beyond it are dropped with a
/// diagnostic.
pub const MAX_INSTANCES: usize = 256;

/// Instance record, 128 bytes. Field placement is the wire format the
/// kernel reads; see the matching WGSL struct.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct GpuInstance {
    pub position: [f32; 3],
    pub mesh_id: u32,
    pub scale: [f32; 3],
    pub _pad0: f32,
    pub rotation: [f32; 3],
    pub _pad1: f32,
    pub _reserved: [f32; 4],
    pub color: [f32; 3],
    pub material_kind: u32,
    pub ior: f32,
    pub intensity: f32,
    pub _pad2: [f32; 2],
    pub aabb_min: [f32; 3],
    pub _pad3: f32,
    pub aabb_max: [f32; 3],
    pub _pad4: f32,
}

/// Mesh-scene header, 16 bytes.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct GpuSceneHeader {
    pub instance_count: u32,
    pub mesh_count: u32,
    pub _pad: [u32; 2],
}

/// The packed result of one scene upload.
pub struct PackedScene {
    pub instances: Vec<GpuInstance>,
    pub header: GpuSceneHeader,
    /// Dense index of the selected object in `instances`, or -1.
    pub selected_index: i32,
}

/// Packs the visible objects, in scene order, into instance records.
///
/// Recoverable scene problems are clamped here: non-finite transforms
/// skip the object, and the list is truncated at [`MAX_INSTANCES`]; both
/// produce a diagnostic rather than an error.
#[must_use]
pub fn pack_instances(
    objects: &[SceneObject],
    selected: Option<&str>,
    library: &MeshLibrary,
) -> PackedScene {
    let mut instances = Vec::new();
    let mut selected_index = -1i32;

    for object in objects {
        if !object.visible {
            continue;
        }
        if !object.transform.is_finite() {
            warn!("object {} has a non-finite transform, skipping", object.id);
            continue;
        }
        if instances.len() == MAX_INSTANCES {
            warn!("instance cap {MAX_INSTANCES} reached, dropping the remaining visible objects");
            break;
        }

        let transform = &object.transform;
        let rotation = transform.rotation_matrix();
        let mesh_id = object.primitive.mesh_id();
        let world_bounds =
            library
                .object_bounds(mesh_id)
                .transformed(transform.scale, rotation, transform.position);

        if selected == Some(object.id.as_str()) {
            selected_index = instances.len() as i32;
        }

        let material = object.material;
        instances.push(GpuInstance {
            position: transform.position.to_array(),
            mesh_id,
            scale: transform.scale.to_array(),
            _pad0: 0.0,
            rotation: transform.rotation.to_array(),
            _pad1: 0.0,
            _reserved: [0.0; 4],
            color: material.color.to_array(),
            material_kind: material.kind.gpu_id(),
            ior: material.ior,
            intensity: material.intensity,
            _pad2: [0.0; 2],
            aabb_min: world_bounds.min.to_array(),
            _pad3: 0.0,
            aabb_max: world_bounds.max.to_array(),
            _pad4: 0.0,
        });
    }

    let header = GpuSceneHeader {
        instance_count: instances.len() as u32,
        mesh_count: library.mesh_count(),
        _pad: [0; 2],
    };

    PackedScene {
        instances,
        header,
        selected_index,
    }
}
