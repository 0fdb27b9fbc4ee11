//! Ray representation for 3D ray tracing.
//!
//! A ray is defined as r(t) = origin + t * direction, representing a semi-infinite
//! line in 3D space used for intersection testing. Each ray also carries the
//! shutter instant it samples, which moving geometry reads for motion blur.

use glam::Vec3A;

/// Ray in 3D space defined by origin, direction and shutter time.
///
/// Mathematical representation: r(t) = origin + t * direction
#[derive(Debug, Clone, Copy)]
pub struct Ray {
    /// Starting point of the ray in world coordinates.
    ///
    /// This represents the ray's origin, typically the camera position for
    /// primary rays or a surface point for secondary rays.
    pub origin: Vec3A,

    /// Direction vector of the ray.
    ///
    /// While not required to be normalized, a unit vector simplifies distance
    /// calculations.
    pub direction: Vec3A,

    /// Shutter sample instant, conventionally in [0, 1).
    ///
    /// Scattered rays inherit the time of the ray that spawned them, so a
    /// whole bounce chain sees the scene at one instant.
    pub time: f32,
}

impl Ray {
    /// Create a new ray at shutter time 0.
    pub fn new(origin: Vec3A, direction: Vec3A) -> Self {
        Self::with_time(origin, direction, 0.0)
    }

    /// Create a new ray with an explicit shutter time.
    pub fn with_time(origin: Vec3A, direction: Vec3A, time: f32) -> Self {
        Self {
            origin,
            direction,
            time,
        }
    }

    /// Compute a point at parameter t along the ray.
    ///
    /// Returns r(t) = origin + t * direction.
    pub fn at(&self, t: f32) -> Vec3A {
        self.origin + t * self.direction
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn point_evaluation() {
        let r = Ray::new(Vec3A::new(1.0, 2.0, 3.0), Vec3A::new(0.0, 0.0, -2.0));

        assert_eq!(r.at(0.0), r.origin);
        assert_eq!(r.at(1.0), Vec3A::new(1.0, 2.0, 1.0));
        assert_eq!(r.at(-0.5), Vec3A::new(1.0, 2.0, 4.0));
    }

    #[test]
    fn default_time_is_zero() {
        let r = Ray::new(Vec3A::ZERO, Vec3A::NEG_Z);
        assert_eq!(r.time, 0.0);

        let timed = Ray::with_time(Vec3A::ZERO, Vec3A::NEG_Z, 0.75);
        assert_eq!(timed.time, 0.75);
    }
}
