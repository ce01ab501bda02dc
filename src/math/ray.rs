use glam::Vec3;

/// A ray with an origin and a (not necessarily unit) direction.
///
/// World-space primary rays carry a normalized direction; instance-local
/// rays deliberately keep the scaled direction un-normalized so that the
/// world-space hit distance can be recovered by projection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub dir: Vec3,
}

impl Ray {
    #[must_use]
    pub fn new(origin: Vec3, dir: Vec3) -> Self {
        Self { origin, dir }
    }

    /// The point at parameter `t` along the ray.
    #[must_use]
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.dir * t
    }
}
