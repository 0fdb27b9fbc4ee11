//! Sphere primitive for ray tracing.
//!
//! Implements efficient ray-sphere intersection using an optimized quadratic
//! formula. Spheres may move linearly over the shutter interval, which the
//! camera's per-ray time samples into motion blur.

use glam::Vec3A;

use crate::hittable::{HitRecord, Hittable};
use crate::interval::Interval;
use crate::material::Material;
use crate::ray::Ray;

/// Sphere primitive defined by center, radius, and material.
///
/// The center is stored as a ray from the position at shutter time 0 along
/// the motion vector to the position at time 1; a stationary sphere has a
/// zero-length motion vector.
#[derive(Debug, Clone)]
pub struct Sphere {
    center: Ray,
    radius: f32,
    material: Material,
}

impl Sphere {
    /// Create a stationary sphere.
    ///
    /// Negative radius values are clamped to 0.0.
    pub fn new(center: Vec3A, radius: f32, material: Material) -> Self {
        Self {
            center: Ray::new(center, Vec3A::ZERO),
            radius: radius.max(0.0),
            material,
        }
    }

    /// Create a sphere moving linearly from `center1` at shutter time 0 to
    /// `center2` at time 1.
    ///
    /// Negative radius values are clamped to 0.0.
    pub fn new_moving(center1: Vec3A, center2: Vec3A, radius: f32, material: Material) -> Self {
        Self {
            center: Ray::new(center1, center2 - center1),
            radius: radius.max(0.0),
            material,
        }
    }
}

impl Hittable for Sphere {
    fn hit(&self, r: &Ray, ray_t: Interval) -> Option<HitRecord> {
        // Sphere center at the instant this ray samples the shutter
        let current_center = self.center.at(r.time);
        let oc = current_center - r.origin;

        // Optimized quadratic equation coefficients
        let a = r.direction.length_squared();
        let h = r.direction.dot(oc);
        let c = oc.length_squared() - self.radius * self.radius;

        let discriminant = h * h - a * c;
        if discriminant < 0.0 {
            return None;
        }

        let sqrtd = discriminant.sqrt();

        // Find the nearest root that lies in the acceptable range
        let mut root = (h - sqrtd) / a;
        if !ray_t.surrounds(root) {
            root = (h + sqrtd) / a;
            if !ray_t.surrounds(root) {
                return None;
            }
        }

        let p = r.at(root);
        let mut rec = HitRecord {
            p,
            normal: Vec3A::ZERO,
            t: root,
            front_face: false,
            material: self.material,
        };
        let outward_normal = (p - current_center) / self.radius;
        rec.set_face_normal(r, outward_normal);

        Some(rec)
    }
}
