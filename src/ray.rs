//! Ray representation for 3D ray tracing.
//!
//! A ray is defined as r(t) = origin + t * direction, a semi-infinite line
//! in 3D space used for intersection testing.

use glam::Vec3A;

/// Ray in 3D space defined by origin and direction.
///
/// Mathematical representation: r(t) = origin + t * direction
#[derive(Debug, Clone, Copy)]
pub struct Ray {
    /// Starting point of the ray in world coordinates.
    ///
    /// Typically the camera position for primary rays or a surface point
    /// for scattered secondary rays.
    pub origin: Vec3A,

    /// Direction vector of the ray.
    ///
    /// Not required to be normalized; intersection routines account for
    /// the direction's length where it matters.
    pub direction: Vec3A,
}

impl Ray {
    /// Create a new ray with origin and direction.
    pub fn new(origin: Vec3A, direction: Vec3A) -> Self {
        Self { origin, direction }
    }

    /// Compute the point at parameter t along the ray.
    ///
    /// Returns r(t) = origin + t * direction.
    pub fn at(&self, t: f32) -> Vec3A {
        self.origin + t * self.direction
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_ray_at() {
        let r = Ray::new(Vec3A::new(1.0, 2.0, 3.0), Vec3A::new(0.0, 0.0, -2.0));
        let p = r.at(1.5);
        assert_abs_diff_eq!(p.x, 1.0);
        assert_abs_diff_eq!(p.y, 2.0);
        assert_abs_diff_eq!(p.z, 0.0);
    }

    #[test]
    fn test_ray_at_zero_is_origin() {
        let r = Ray::new(Vec3A::new(-1.0, 0.5, 0.0), Vec3A::new(1.0, 1.0, 1.0));
        assert_eq!(r.at(0.0), r.origin);
    }
}
