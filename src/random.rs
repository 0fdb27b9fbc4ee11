//! Random sampling helpers for ray tracing.
//!
//! Every helper draws from an explicit generator handle instead of a process
//! global, so rendering can run one seeded stream per pixel and reproduce
//! bit-identical images under any thread schedule. The camera owns the
//! ChaCha20 streams; these functions only consume them.

use glam::Vec3A;
use rand::Rng;

/// Generate a random f32 in [0.0, 1.0)
pub fn random_f32(rng: &mut impl Rng) -> f32 {
    rng.random()
}

/// Generate a random f32 in [min, max)
pub fn random_f32_range(rng: &mut impl Rng, min: f32, max: f32) -> f32 {
    min + (max - min) * random_f32(rng)
}

/// Generate a random Vec3A with components in [0.0, 1.0)
pub fn random_vec3a(rng: &mut impl Rng) -> Vec3A {
    Vec3A::new(rng.random(), rng.random(), rng.random())
}

/// Generate a random Vec3A with components in [min, max)
pub fn random_vec3a_range(rng: &mut impl Rng, min: f32, max: f32) -> Vec3A {
    Vec3A::splat(min) + (max - min) * random_vec3a(rng)
}

/// Generate a random point strictly inside the unit ball, by rejection sampling.
pub fn random_in_unit_sphere(rng: &mut impl Rng) -> Vec3A {
    loop {
        let p = random_vec3a_range(rng, -1.0, 1.0);
        if p.length_squared() < 1.0 {
            return p;
        }
    }
}

/// Generate a random unit vector uniformly distributed on the unit sphere.
///
/// Rejection-samples the unit ball and normalizes the accepted point.
/// Samples with a tiny squared length are rejected as well; normalizing them
/// would blow up in f32.
pub fn random_unit_vector(rng: &mut impl Rng) -> Vec3A {
    loop {
        let p = random_vec3a_range(rng, -1.0, 1.0);
        let length_squared = p.length_squared();
        if length_squared > 1e-12 && length_squared < 1.0 {
            return p / length_squared.sqrt();
        }
    }
}

/// Generate a random point inside the unit disk (z = 0), by rejection sampling.
pub fn random_in_unit_disk(rng: &mut impl Rng) -> Vec3A {
    loop {
        let p = Vec3A::new(
            random_f32_range(rng, -1.0, 1.0),
            random_f32_range(rng, -1.0, 1.0),
            0.0,
        );
        if p.length_squared() < 1.0 {
            return p;
        }
    }
}

/// Generate a random RGB color with components in [0.0, 1.0).
pub fn random_color(rng: &mut impl Rng) -> Vec3A {
    random_vec3a(rng)
}

/// Generate a random RGB color with components in [min, max).
pub fn random_color_range(rng: &mut impl Rng, min: f32, max: f32) -> Vec3A {
    random_vec3a_range(rng, min, max)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    #[test]
    fn seeded_streams_are_reproducible() {
        let mut a = ChaCha20Rng::seed_from_u64(7);
        let mut b = ChaCha20Rng::seed_from_u64(7);

        for _ in 0..32 {
            assert_eq!(random_f32(&mut a), random_f32(&mut b));
        }
        assert_eq!(random_vec3a(&mut a), random_vec3a(&mut b));
    }

    #[test]
    fn range_sampling_respects_bounds() {
        let mut rng = ChaCha20Rng::seed_from_u64(11);

        for _ in 0..256 {
            let x = random_f32_range(&mut rng, -2.0, 3.0);
            assert!((-2.0..3.0).contains(&x));

            let v = random_vec3a_range(&mut rng, 0.5, 1.0);
            assert!(v.min_element() >= 0.5 && v.max_element() < 1.0);
        }
    }

    #[test]
    fn unit_vector_has_unit_length() {
        let mut rng = ChaCha20Rng::seed_from_u64(13);

        for _ in 0..128 {
            let v = random_unit_vector(&mut rng);
            assert!((v.length() - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn ball_and_disk_samples_stay_inside() {
        let mut rng = ChaCha20Rng::seed_from_u64(17);

        for _ in 0..128 {
            assert!(random_in_unit_sphere(&mut rng).length_squared() < 1.0);

            let d = random_in_unit_disk(&mut rng);
            assert_eq!(d.z, 0.0);
            assert!(d.length_squared() < 1.0);
        }
    }
}
