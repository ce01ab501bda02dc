//! Math utilities shared by the mesh pipeline, the instance packer, the
//! picker and (structurally) the WGSL kernel.
//!
//! Matrices are column-major (`glam`). The rotation convention used
//! everywhere in the core is ZYX Euler angles in radians.

pub mod aabb;
pub mod ray;

pub use aabb::Aabb;
pub use ray::Ray;

use glam::{Mat3, Vec3};

/// Intersection epsilon shared by the CPU picker and the compute kernel.
///
/// Triangle hits with `t <= EPSILON` are rejected, and scattered rays are
/// offset by `2 * EPSILON` along their direction.
pub const EPSILON: f32 = 1e-4;

/// Builds the rotation matrix for ZYX Euler angles: `Rz(z) * Ry(y) * Rx(x)`.
///
/// The WGSL kernel constructs the same product; its inverse is the
/// transpose, which the instance-local ray transform relies on.
#[must_use]
pub fn euler_to_mat3(euler: Vec3) -> Mat3 {
    Mat3::from_rotation_z(euler.z) * Mat3::from_rotation_y(euler.y) * Mat3::from_rotation_x(euler.x)
}
