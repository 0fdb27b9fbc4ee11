//! Material system for ray tracing.
//!
//! Implements three material types: Lambertian (diffuse), Metal (specular),
//! and Dielectric (transparent).

use glam::Vec3A;
use rand::Rng;

use crate::hittable::HitRecord;
use crate::random;
use crate::ray::Ray;

/// RGB color type using Vec3A for SIMD optimization.
pub type Color = Vec3A;

/// Surface materials deciding how a ray scatters at a hit.
///
/// A closed sum type: the material set is small and fixed, and instances are
/// immutable `Copy` values shared freely between shapes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Material {
    /// Lambertian diffuse material for matte surfaces.
    Lambertian {
        /// Surface color/reflectance.
        albedo: Vec3A,
    },

    /// Metallic material with specular reflection.
    Metal {
        /// Metal color.
        albedo: Vec3A,
        /// Surface roughness (0.0 = mirror, 1.0 = rough).
        fuzz: f32,
    },

    /// Dielectric (transparent) material with refraction.
    Dielectric {
        /// Index of refraction (1.0 = air, 1.5 = glass, etc.).
        refraction_index: f32,
    },
}

impl Material {
    /// Compute ray scattering for this material.
    ///
    /// Returns the attenuation color and the scattered ray, or `None` when
    /// the ray is absorbed. Scattered rays carry the incident ray's time so
    /// a bounce chain samples moving geometry at one instant.
    pub fn scatter(
        &self,
        r_in: &Ray,
        rec: &HitRecord,
        rng: &mut impl Rng,
    ) -> Option<(Color, Ray)> {
        match self {
            Material::Lambertian { albedo } => self.scatter_lambertian(*albedo, r_in, rec, rng),
            Material::Metal { albedo, fuzz } => self.scatter_metal(*albedo, *fuzz, r_in, rec, rng),
            Material::Dielectric { refraction_index } => {
                self.scatter_dielectric(*refraction_index, r_in, rec, rng)
            }
        }
    }

    /// Lambertian diffuse scattering with cosine-weighted distribution.
    fn scatter_lambertian(
        &self,
        albedo: Vec3A,
        r_in: &Ray,
        rec: &HitRecord,
        rng: &mut impl Rng,
    ) -> Option<(Color, Ray)> {
        let mut scatter_direction = rec.normal + random::random_unit_vector(rng);

        // Catch degenerate scatter direction (very close to zero)
        if scatter_direction.length_squared() < 1e-8 {
            scatter_direction = rec.normal;
        }

        Some((albedo, Ray::with_time(rec.p, scatter_direction, r_in.time)))
    }

    /// Metallic reflection with optional surface roughness.
    fn scatter_metal(
        &self,
        albedo: Vec3A,
        fuzz: f32,
        r_in: &Ray,
        rec: &HitRecord,
        rng: &mut impl Rng,
    ) -> Option<(Color, Ray)> {
        let reflected = reflect(r_in.direction, rec.normal);
        let direction = reflected.normalize() + fuzz.min(1.0) * random::random_unit_vector(rng);

        // A fuzzed reflection that dips to or below the surface is absorbed
        if direction.dot(rec.normal) > 0.0 {
            Some((albedo, Ray::with_time(rec.p, direction, r_in.time)))
        } else {
            None
        }
    }

    /// Dielectric scattering with reflection and refraction.
    fn scatter_dielectric(
        &self,
        refraction_index: f32,
        r_in: &Ray,
        rec: &HitRecord,
        rng: &mut impl Rng,
    ) -> Option<(Color, Ray)> {
        let ri = if rec.front_face {
            1.0 / refraction_index
        } else {
            refraction_index
        };

        let unit_direction = r_in.direction.normalize();
        let cos_theta = (-unit_direction).dot(rec.normal).min(1.0);
        let sin_theta = (1.0 - cos_theta * cos_theta).sqrt();

        // Total internal reflection: Snell's law has no real solution.
        // The geometric check short-circuits ahead of the Schlick draw.
        let cannot_refract = ri * sin_theta > 1.0;
        let direction = if cannot_refract || reflectance(cos_theta, ri) > random::random_f32(rng) {
            reflect(unit_direction, rec.normal)
        } else {
            refract(unit_direction, rec.normal, ri)
        };

        // Glass doesn't attenuate light
        Some((Vec3A::ONE, Ray::with_time(rec.p, direction, r_in.time)))
    }
}

/// Reflect a vector off a surface using the law of reflection.
fn reflect(v: Vec3A, n: Vec3A) -> Vec3A {
    v - 2.0 * v.dot(n) * n
}

/// Refract a vector through an interface using Snell's law.
fn refract(uv: Vec3A, n: Vec3A, etai_over_etat: f32) -> Vec3A {
    let cos_theta = (-uv).dot(n).min(1.0);
    let r_out_perp = etai_over_etat * (uv + cos_theta * n);
    let r_out_parallel = -(1.0 - r_out_perp.length_squared()).abs().sqrt() * n;
    r_out_perp + r_out_parallel
}

/// Compute Fresnel reflectance using Schlick's approximation.
fn reflectance(cosine: f32, refraction_index: f32) -> f32 {
    let r0 = (1.0 - refraction_index) / (1.0 + refraction_index);
    let r0 = r0 * r0;
    r0 + (1.0 - r0) * (1.0 - cosine).powi(5)
}
