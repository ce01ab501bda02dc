use glam::{Mat3, Vec3};

use crate::math::Ray;

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Default for Aabb {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl Aabb {
    /// The empty box: growing it by any point yields that point.
    pub const EMPTY: Self = Self {
        min: Vec3::splat(f32::INFINITY),
        max: Vec3::splat(f32::NEG_INFINITY),
    };

    #[must_use]
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    #[must_use]
    pub fn from_points(points: impl IntoIterator<Item = Vec3>) -> Self {
        let mut aabb = Self::EMPTY;
        for p in points {
            aabb.grow(p);
        }
        aabb
    }

    /// Expands the box to contain `point`. NaN components are ignored by
    /// the min/max, so degenerate input cannot poison the bounds.
    pub fn grow(&mut self, point: Vec3) {
        self.min = self.min.min(point);
        self.max = self.max.max(point);
    }

    #[must_use]
    pub fn union(&self, other: &Aabb) -> Aabb {
        Aabb {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    #[must_use]
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    #[must_use]
    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.min.is_finite() && self.max.is_finite()
    }

    #[must_use]
    pub fn contains_point(&self, p: Vec3) -> bool {
        p.cmpge(self.min).all() && p.cmple(self.max).all()
    }

    /// The eight corners, min-to-max in binary order.
    #[must_use]
    pub fn corners(&self) -> [Vec3; 8] {
        let (lo, hi) = (self.min, self.max);
        [
            Vec3::new(lo.x, lo.y, lo.z),
            Vec3::new(hi.x, lo.y, lo.z),
            Vec3::new(lo.x, hi.y, lo.z),
            Vec3::new(hi.x, hi.y, lo.z),
            Vec3::new(lo.x, lo.y, hi.z),
            Vec3::new(hi.x, lo.y, hi.z),
            Vec3::new(lo.x, hi.y, hi.z),
            Vec3::new(hi.x, hi.y, hi.z),
        ]
    }

    /// World-space box of this box under `scale -> rotate -> translate`.
    ///
    /// Each corner is scaled component-wise, rotated, translated, and the
    /// result re-boxed; min/max over the signed endpoints tolerates
    /// negative scale components.
    #[must_use]
    pub fn transformed(&self, scale: Vec3, rotation: Mat3, translation: Vec3) -> Aabb {
        let mut out = Aabb::EMPTY;
        for corner in self.corners() {
            out.grow(rotation * (corner * scale) + translation);
        }
        out
    }

    /// Slab test. Returns `(t_near, t_far)` when the ray crosses the box
    /// within `(0, t_max)`; a ray starting inside reports `t_near <= 0`.
    #[must_use]
    pub fn hit(&self, ray: &Ray, t_max: f32) -> Option<(f32, f32)> {
        let inv = ray.dir.recip();
        let t0 = (self.min - ray.origin) * inv;
        let t1 = (self.max - ray.origin) * inv;
        let t_near = t0.min(t1).max_element();
        let t_far = t0.max(t1).min_element();
        if t_near <= t_far && t_far > 0.0 && t_near < t_max {
            Some((t_near, t_far))
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grow_from_empty() {
        let mut aabb = Aabb::EMPTY;
        aabb.grow(Vec3::new(1.0, -2.0, 3.0));
        assert_eq!(aabb.min, Vec3::new(1.0, -2.0, 3.0));
        assert_eq!(aabb.max, Vec3::new(1.0, -2.0, 3.0));
    }

    #[test]
    fn slab_hit_through_unit_box() {
        let aabb = Aabb::new(Vec3::splat(-1.0), Vec3::splat(1.0));
        let ray = Ray::new(Vec3::new(0.0, 0.0, -5.0), Vec3::Z);
        let (t_near, t_far) = aabb.hit(&ray, f32::INFINITY).unwrap();
        assert!((t_near - 4.0).abs() < 1e-6);
        assert!((t_far - 6.0).abs() < 1e-6);
    }

    #[test]
    fn slab_miss_behind_origin() {
        let aabb = Aabb::new(Vec3::splat(-1.0), Vec3::splat(1.0));
        let ray = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::Z);
        assert!(aabb.hit(&ray, f32::INFINITY).is_none());
    }

    #[test]
    fn slab_respects_t_max() {
        let aabb = Aabb::new(Vec3::splat(-1.0), Vec3::splat(1.0));
        let ray = Ray::new(Vec3::new(0.0, 0.0, -5.0), Vec3::Z);
        assert!(aabb.hit(&ray, 2.0).is_none());
    }

    #[test]
    fn slab_axis_parallel_ray() {
        let aabb = Aabb::new(Vec3::splat(-1.0), Vec3::splat(1.0));
        // Parallel to X inside the slab
        let ray = Ray::new(Vec3::new(-5.0, 0.5, 0.5), Vec3::X);
        assert!(aabb.hit(&ray, f32::INFINITY).is_some());
        // Parallel to X outside the slab
        let ray = Ray::new(Vec3::new(-5.0, 2.0, 0.5), Vec3::X);
        assert!(aabb.hit(&ray, f32::INFINITY).is_none());
    }
}
