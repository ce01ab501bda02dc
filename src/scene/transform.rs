use glam::{Mat3, Vec3};
use serde::{Deserialize, Serialize};

use crate::math::euler_to_mat3;

/// Minimum scale component accepted by the scene layer.
pub const MIN_SCALE: f32 = 0.1;

/// Position, ZYX Euler rotation (radians), and per-axis scale.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Vec3,
    pub scale: Vec3,
}

impl Transform {
    pub const IDENTITY: Self = Self {
        position: Vec3::ZERO,
        rotation: Vec3::ZERO,
        scale: Vec3::ONE,
    };

    #[must_use]
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Self::IDENTITY
        }
    }

    /// The rotation matrix `Rz * Ry * Rx` for this transform's Euler
    /// angles.
    #[must_use]
    pub fn rotation_matrix(&self) -> Mat3 {
        euler_to_mat3(self.rotation)
    }

    /// True when every component is finite.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.position.is_finite() && self.rotation.is_finite() && self.scale.is_finite()
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}
