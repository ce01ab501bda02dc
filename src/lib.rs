//! Lumen: a progressive GPU path tracer and scene-editing core.
//!
//! The crate builds a deterministic library of primitive meshes with
//! per-mesh BVHs, packs editable scenes into flat instance buffers, and
//! renders them with a WGSL compute kernel that accumulates samples
//! across frames. A CPU picker mirrors the kernel's intersection
//! conventions so selection and rendering always agree.

#[cfg(feature = "winit")]
pub mod app;
pub mod errors;
pub mod geometry;
pub mod math;
pub mod picker;
pub mod renderer;
pub mod scene;

pub use errors::{LumenError, Result};
pub use geometry::{MeshData, MeshLibrary, PrimitiveKind};
pub use math::{Aabb, Ray};
pub use picker::{camera_ray, pick, PickHit};
pub use renderer::{RenderSettings, RenderStats, Renderer, WgpuContext};
pub use scene::{
    BackgroundPalette, BackgroundPreset, GizmoAxis, GizmoMode, GizmoState, Material, MaterialKind,
    OrbitCamera, SceneCommand, SceneObject, SceneSnapshot, SceneStore, Transform,
};
