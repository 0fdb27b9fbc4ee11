//! Ray-object intersection system.
//!
//! Defines the Hittable trait for geometric primitives and HitRecord for
//! storing intersection data.

use glam::Vec3A;

use crate::interval::Interval;
use crate::material::Material;
use crate::ray::Ray;

/// Ray-object intersection information.
///
/// Contains intersection point, surface normal, distance, and material data
/// needed for shading calculations.
#[derive(Debug, Clone, Copy)]
pub struct HitRecord {
    /// Point where the ray intersects the object
    pub p: Vec3A,
    /// Surface normal at the intersection point (unit vector)
    pub normal: Vec3A,
    /// Distance along the ray to the intersection point
    pub t: f32,
    /// True if ray hits the front face, false if hits the back face
    pub front_face: bool,
    /// Material of the object at the hit point
    pub material: Material,
}

impl HitRecord {
    /// Set surface normal and determine front/back face.
    ///
    /// Ensures the normal always points against the incident ray.
    pub fn set_face_normal(&mut self, r: &Ray, outward_normal: Vec3A) {
        self.front_face = r.direction.dot(outward_normal) < 0.0;
        self.normal = if self.front_face {
            outward_normal
        } else {
            -outward_normal
        };
    }
}

/// Trait for objects that can be intersected by rays.
///
/// Core abstraction for geometric primitives. Must be thread-safe
/// (Sync + Send) for parallel rendering.
pub trait Hittable: Sync + Send {
    /// Test for ray intersection within the given parameter range.
    ///
    /// Among all intersections whose parametric t lies inside `ray_t`,
    /// returns the one closest to the ray's origin, or `None` on a miss.
    fn hit(&self, r: &Ray, ray_t: Interval) -> Option<HitRecord>;
}

/// Collection of objects forming a scene.
///
/// Uses linear search for intersection testing. Supports polymorphic
/// objects through Box<dyn Hittable>.
pub struct HittableList {
    /// Vector of boxed hittable objects, in insertion order
    pub objects: Vec<Box<dyn Hittable>>,
}

impl HittableList {
    /// Create a new empty scene.
    pub fn new() -> Self {
        Self {
            objects: Vec::new(),
        }
    }

    /// Add an object to the scene.
    pub fn add(&mut self, object: Box<dyn Hittable>) {
        self.objects.push(object);
    }
}

impl Default for HittableList {
    fn default() -> Self {
        Self::new()
    }
}

impl Hittable for HittableList {
    /// Resolve the closest hit over all members.
    ///
    /// The search interval shrinks to the best t found so far, and a
    /// candidate replaces it only when strictly inside the shrunk interval.
    /// A hit at exactly the best-so-far t therefore keeps the earlier
    /// object: for exact ties the result depends on insertion order.
    fn hit(&self, r: &Ray, ray_t: Interval) -> Option<HitRecord> {
        let mut closest_so_far = ray_t.max;
        let mut closest_hit = None;

        for object in &self.objects {
            if let Some(rec) = object.hit(r, Interval::new(ray_t.min, closest_so_far)) {
                closest_so_far = rec.t;
                closest_hit = Some(rec);
            }
        }

        closest_hit
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sphere::Sphere;

    fn diffuse(r: f32, g: f32, b: f32) -> Material {
        Material::Lambertian {
            albedo: Vec3A::new(r, g, b),
        }
    }

    #[test]
    fn closest_object_wins() {
        let mut world = HittableList::new();
        world.add(Box::new(Sphere::new(
            Vec3A::new(0.0, 0.0, -5.0),
            0.5,
            diffuse(0.0, 0.0, 1.0),
        )));
        world.add(Box::new(Sphere::new(
            Vec3A::new(0.0, 0.0, -2.0),
            0.5,
            diffuse(1.0, 0.0, 0.0),
        )));

        let r = Ray::new(Vec3A::ZERO, Vec3A::new(0.0, 0.0, -1.0));
        let rec = world
            .hit(&r, Interval::new(0.001, f32::INFINITY))
            .expect("ray through both spheres must hit");

        assert!((rec.t - 1.5).abs() < 1e-5);
        assert_eq!(rec.material, diffuse(1.0, 0.0, 0.0));
    }

    #[test]
    fn exact_tie_keeps_first_inserted() {
        let mut world = HittableList::new();
        world.add(Box::new(Sphere::new(
            Vec3A::new(0.0, 0.0, -2.0),
            0.5,
            diffuse(1.0, 0.0, 0.0),
        )));
        world.add(Box::new(Sphere::new(
            Vec3A::new(0.0, 0.0, -2.0),
            0.5,
            diffuse(0.0, 1.0, 0.0),
        )));

        let r = Ray::new(Vec3A::ZERO, Vec3A::new(0.0, 0.0, -1.0));
        let rec = world
            .hit(&r, Interval::new(0.001, f32::INFINITY))
            .expect("coincident spheres must hit");

        assert_eq!(rec.material, diffuse(1.0, 0.0, 0.0));
    }

    #[test]
    fn empty_list_misses() {
        let world = HittableList::new();
        let r = Ray::new(Vec3A::ZERO, Vec3A::new(0.0, 0.0, -1.0));

        assert!(world.hit(&r, Interval::new(0.001, f32::INFINITY)).is_none());
    }
}
