use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Index-of-refraction range accepted for glass.
pub const IOR_RANGE: (f32, f32) = (1.0, 2.5);

/// Emission intensity range accepted for lights.
pub const INTENSITY_RANGE: (f32, f32) = (0.1, 20.0);

/// Surface response of an object. Encoded as `u32` in `0..4` on the GPU.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MaterialKind {
    Plastic,
    Metal,
    Glass,
    Light,
}

impl MaterialKind {
    #[must_use]
    pub fn gpu_id(self) -> u32 {
        match self {
            MaterialKind::Plastic => 0,
            MaterialKind::Metal => 1,
            MaterialKind::Glass => 2,
            MaterialKind::Light => 3,
        }
    }
}

/// Material parameters. `ior` only matters for glass and `intensity`
/// only for lights, but both are always present so the GPU record layout
/// stays uniform.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Material {
    pub kind: MaterialKind,
    pub color: Vec3,
    pub ior: f32,
    pub intensity: f32,
}

impl Material {
    #[must_use]
    pub fn plastic(color: Vec3) -> Self {
        Self {
            kind: MaterialKind::Plastic,
            color,
            ior: 1.5,
            intensity: 1.0,
        }
    }

    #[must_use]
    pub fn metal(color: Vec3) -> Self {
        Self {
            kind: MaterialKind::Metal,
            ..Self::plastic(color)
        }
    }

    #[must_use]
    pub fn glass(color: Vec3, ior: f32) -> Self {
        Self {
            kind: MaterialKind::Glass,
            ior,
            ..Self::plastic(color)
        }
        .clamped()
    }

    #[must_use]
    pub fn light(color: Vec3, intensity: f32) -> Self {
        Self {
            kind: MaterialKind::Light,
            intensity,
            ..Self::plastic(color)
        }
        .clamped()
    }

    /// Returns a copy with every field inside its accepted range.
    #[must_use]
    pub fn clamped(mut self) -> Self {
        self.color = self.color.clamp(Vec3::ZERO, Vec3::ONE);
        self.ior = self.ior.clamp(IOR_RANGE.0, IOR_RANGE.1);
        self.intensity = self.intensity.clamp(INTENSITY_RANGE.0, INTENSITY_RANGE.1);
        self
    }
}

impl Default for Material {
    fn default() -> Self {
        Self::plastic(Vec3::splat(0.8))
    }
}
