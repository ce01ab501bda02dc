//! Deterministic primitive mesh generators.
//!
//! Canonical object-space dimensions (instance scale is applied later):
//! sphere radius 1; cuboid half-extents 1; cylinder radius 1 spanning
//! y ∈ [-1, 1]; cone base radius 1 at y = -1 with the apex at y = +1;
//! capsule cylinder radius 1 and half-height 1 with hemispherical caps
//! (total y-span [-2, 2]); torus major radius 1, minor radius 0.35 in the
//! XZ plane.
//!
//! Smoothly curved surfaces share vertices; flat faces (cuboid faces,
//! cylinder and cone caps) duplicate vertices so hard edges keep split
//! normals.

mod capsule;
mod cone;
mod cuboid;
mod cylinder;
mod sphere;
mod torus;

pub use capsule::create_capsule;
pub use cone::create_cone;
pub use cuboid::create_cuboid;
pub use cylinder::create_cylinder;
pub use sphere::create_sphere;
pub use torus::create_torus;

/// Radial segment count shared by every round primitive.
pub const RADIAL_SEGMENTS: u32 = 32;

/// Ring count of the UV sphere; the capsule hemispheres use half of it
/// per cap so their ring density matches.
pub const SPHERE_RINGS: u32 = 16;

/// Minor segment count of the torus tube.
pub const TORUS_MINOR_SEGMENTS: u32 = 16;

/// Canonical torus minor radius.
pub const TORUS_MINOR_RADIUS: f32 = 0.35;
