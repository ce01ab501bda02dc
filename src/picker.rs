//! CPU-side object picking.
//!
//! The picker walks the same packed mesh library the compute kernel
//! reads, with the same transform conventions: the ray is taken to
//! instance-local space via the transposed Euler rotation and a
//! component-wise scale divide, the local direction stays un-normalized,
//! and the world-space hit distance is recovered by projecting the
//! reconstructed hit point onto the world ray. A ray that hits an object
//! in the renderer resolves to the same object id here.

use glam::Vec3;

use crate::geometry::MeshLibrary;
use crate::math::{Aabb, Ray, EPSILON};
use crate::scene::{OrbitCamera, SceneObject};

/// Traversal stack depth, matching the kernel.
const STACK_SIZE: usize = 64;

/// Result of a successful pick.
#[derive(Debug, Clone, PartialEq)]
pub struct PickHit {
    pub object_id: String,
    pub t: f32,
    pub world_point: Vec3,
}

/// Builds the world-space ray through a pixel, exactly as the kernel's
/// ray generation does: unproject the pixel center through the inverse
/// projection and view matrices.
#[must_use]
pub fn camera_ray(camera: &OrbitCamera, pixel: (f32, f32), size: (u32, u32)) -> Ray {
    let (width, height) = (size.0.max(1) as f32, size.1.max(1) as f32);
    let ndc_x = pixel.0 / width * 2.0 - 1.0;
    let ndc_y = 1.0 - pixel.1 / height * 2.0;

    let inverse_projection = camera.inverse_projection(width / height);
    let inverse_view = camera.inverse_view();

    let view_target = inverse_projection * glam::Vec4::new(ndc_x, ndc_y, 1.0, 1.0);
    let view_dir = (view_target.truncate() / view_target.w).normalize();
    let world_dir = (inverse_view * view_dir.extend(0.0)).truncate().normalize();

    Ray::new(camera.position(), world_dir)
}

/// Finds the closest visible object hit by `ray`, or `None`.
///
/// Objects are tested in scene order; hidden objects are excluded, and
/// non-finite transforms are skipped the same way the instance packer
/// drops them.
#[must_use]
pub fn pick(library: &MeshLibrary, objects: &[SceneObject], ray: &Ray) -> Option<PickHit> {
    let mut best: Option<(f32, &SceneObject)> = None;

    for object in objects {
        if !object.visible || !object.transform.is_finite() {
            continue;
        }

        let transform = &object.transform;
        let rotation = transform.rotation_matrix();
        let mesh_id = object.primitive.mesh_id();

        let world_bounds =
            library
                .object_bounds(mesh_id)
                .transformed(transform.scale, rotation, transform.position);
        let best_t = best.map_or(f32::INFINITY, |(t, _)| t);
        let Some((aabb_near, _)) = world_bounds.hit(ray, best_t) else {
            continue;
        };
        if aabb_near > best_t {
            continue;
        }

        // Instance-local ray; direction deliberately not renormalized.
        let inverse_rotation = rotation.transpose();
        let local = Ray::new(
            inverse_rotation * (ray.origin - transform.position) / transform.scale,
            inverse_rotation * ray.dir / transform.scale,
        );

        if let Some(local_t) = intersect_mesh(library, mesh_id, &local) {
            let hit_world = rotation * (local.at(local_t) * transform.scale) + transform.position;
            let world_t = (hit_world - ray.origin).dot(ray.dir);
            if world_t > EPSILON && world_t < best_t {
                best = Some((world_t, object));
            }
        }
    }

    best.map(|(t, object)| PickHit {
        object_id: object.id.clone(),
        t,
        world_point: ray.at(t),
    })
}

/// Closest triangle hit of the local-space ray against one mesh's BLAS.
/// Returns the local-space `t`.
fn intersect_mesh(library: &MeshLibrary, mesh_id: u32, ray: &Ray) -> Option<f32> {
    let meta = library.meta_of(mesh_id);

    let mut best_t = f32::INFINITY;
    let mut stack = [0i32; STACK_SIZE];
    let mut sp = 0usize;
    let mut current = meta.node_offset as i32;

    loop {
        let node = &library.nodes[current as usize];

        if node.tri_count > 0 {
            for tri in 0..node.tri_count {
                let base = (node.tri_index_offset + tri * 3) as usize;
                let v0 = library.vertices[library.indices[base] as usize].position;
                let v1 = library.vertices[library.indices[base + 1] as usize].position;
                let v2 = library.vertices[library.indices[base + 2] as usize].position;
                if let Some(t) =
                    intersect_triangle(ray, Vec3::from(v0), Vec3::from(v1), Vec3::from(v2), best_t)
                {
                    best_t = t;
                }
            }
        } else if node.left >= 0 {
            let near_far = child_order(library, ray, node.left, node.right, best_t);
            match near_far {
                (Some(near), Some(far)) => {
                    if sp < STACK_SIZE {
                        stack[sp] = far;
                        sp += 1;
                    } else {
                        debug_assert!(false, "BLAS traversal stack saturated");
                    }
                    current = near;
                    continue;
                }
                (Some(only), None) => {
                    current = only;
                    continue;
                }
                _ => {}
            }
        }

        if sp == 0 {
            break;
        }
        sp -= 1;
        current = stack[sp];
    }

    (best_t < f32::INFINITY).then_some(best_t)
}

/// Tests both children against the ray; returns them near-first with
/// misses filtered out.
fn child_order(
    library: &MeshLibrary,
    ray: &Ray,
    left: i32,
    right: i32,
    best_t: f32,
) -> (Option<i32>, Option<i32>) {
    let hit_of = |index: i32| {
        let node = &library.nodes[index as usize];
        let bounds = Aabb::new(Vec3::from(node.aabb_min), Vec3::from(node.aabb_max));
        bounds.hit(ray, best_t).map(|(t_near, _)| t_near)
    };
    match (hit_of(left), hit_of(right)) {
        (Some(lt), Some(rt)) => {
            if lt <= rt {
                (Some(left), Some(right))
            } else {
                (Some(right), Some(left))
            }
        }
        (Some(_), None) => (Some(left), None),
        (None, Some(_)) => (Some(right), None),
        (None, None) => (None, None),
    }
}

/// Moeller-Trumbore. Accepts hits with `EPSILON < t < best_t`; the
/// determinant epsilon rejects rays parallel to the triangle plane.
fn intersect_triangle(ray: &Ray, v0: Vec3, v1: Vec3, v2: Vec3, best_t: f32) -> Option<f32> {
    const DET_EPSILON: f32 = 1e-8;

    let edge1 = v1 - v0;
    let edge2 = v2 - v0;
    let p = ray.dir.cross(edge2);
    let det = edge1.dot(p);
    if det.abs() < DET_EPSILON {
        return None;
    }

    let inv_det = 1.0 / det;
    let s = ray.origin - v0;
    let u = s.dot(p) * inv_det;
    if !(0.0..=1.0).contains(&u) {
        return None;
    }

    let q = s.cross(edge1);
    let v = ray.dir.dot(q) * inv_det;
    if v < 0.0 || u + v > 1.0 {
        return None;
    }

    let t = edge2.dot(q) * inv_det;
    (t > EPSILON && t < best_t).then_some(t)
}
