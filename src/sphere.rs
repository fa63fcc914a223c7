//! Sphere primitive.
//!
//! Ray-sphere intersection via the reduced-discriminant quadratic formula.

use glam::Vec3A;
use std::sync::Arc;

use crate::hittable::HitRecord;
use crate::interval::Interval;
use crate::material::Material;
use crate::ray::Ray;

/// Sphere primitive defined by center, radius, and material.
#[derive(Debug, Clone)]
pub struct Sphere {
    /// Center point of the sphere in world coordinates.
    pub center: Vec3A,

    /// Radius of the sphere (always non-negative).
    ///
    /// Negative radius values are clamped to 0.0 in the constructor.
    pub radius: f32,

    /// Material properties determining light interaction.
    pub material: Arc<Material>,
}

impl Sphere {
    /// Create a new sphere.
    ///
    /// Negative radius values are clamped to 0.0.
    pub fn new(center: Vec3A, radius: f32, material: Arc<Material>) -> Self {
        Self {
            center,
            radius: radius.max(0.0),
            material,
        }
    }

    /// Test for ray intersection within the given parameter range.
    ///
    /// Solves |O + tD - C|^2 = r^2 with the reduced discriminant
    /// h^2 - a*c where h = D.(C - O). The nearer root is tested first,
    /// then the farther one; both outside the interval means no hit.
    pub fn hit(&self, r: &Ray, ray_t: Interval) -> Option<HitRecord<'_>> {
        let oc = self.center - r.origin;
        let a = r.direction.length_squared();
        let h = r.direction.dot(oc);
        let c = oc.length_squared() - self.radius * self.radius;

        let discriminant = h * h - a * c;
        if discriminant < 0.0 {
            return None;
        }

        let sqrtd = discriminant.sqrt();

        let mut root = (h - sqrtd) / a;
        if !ray_t.surrounds(root) {
            root = (h + sqrtd) / a;
            if !ray_t.surrounds(root) {
                return None;
            }
        }

        let p = r.at(root);
        let outward_normal = (p - self.center) / self.radius;
        let mut rec = HitRecord {
            t: root,
            p,
            normal: Vec3A::ZERO,
            u: 0.0,
            v: 0.0,
            front_face: false,
            material: &self.material,
        };
        rec.set_face_normal(r, outward_normal);

        Some(rec)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::material::Color;
    use crate::texture::Texture;
    use approx::assert_abs_diff_eq;

    fn test_sphere(center: Vec3A, radius: f32) -> Sphere {
        Sphere::new(
            center,
            radius,
            Arc::new(Material::Lambertian {
                albedo: Texture::SolidColor(Color::splat(0.5)),
            }),
        )
    }

    #[test]
    fn test_hit_from_outside() {
        let sphere = test_sphere(Vec3A::new(0.0, 0.0, -2.0), 0.5);
        let r = Ray::new(Vec3A::ZERO, Vec3A::new(0.0, 0.0, -1.0));
        let ray_t = Interval::new(0.001, f32::INFINITY);

        let rec = sphere.hit(&r, ray_t).unwrap();
        assert!(ray_t.surrounds(rec.t));
        assert_abs_diff_eq!(rec.t, 1.5, epsilon = 1e-5);
        assert!(rec.front_face);
        // The hit point sits on the sphere surface and the normal is unit.
        assert_abs_diff_eq!((rec.p - sphere.center).length(), 0.5, epsilon = 1e-5);
        assert_abs_diff_eq!(rec.normal.length(), 1.0, epsilon = 1e-5);
        assert_abs_diff_eq!(rec.normal.z, 1.0, epsilon = 1e-5);
    }

    #[test]
    fn test_hit_from_inside_flips_normal() {
        let sphere = test_sphere(Vec3A::ZERO, 1.0);
        let r = Ray::new(Vec3A::ZERO, Vec3A::new(0.0, 0.0, -1.0));

        let rec = sphere
            .hit(&r, Interval::new(0.001, f32::INFINITY))
            .unwrap();
        assert!(!rec.front_face);
        // Normal points back against the ray, i.e. towards +z.
        assert_abs_diff_eq!(rec.normal.z, 1.0, epsilon = 1e-5);
    }

    #[test]
    fn test_miss() {
        let sphere = test_sphere(Vec3A::new(0.0, 0.0, -2.0), 0.5);
        let r = Ray::new(Vec3A::ZERO, Vec3A::new(0.0, 1.0, 0.0));
        assert!(sphere
            .hit(&r, Interval::new(0.001, f32::INFINITY))
            .is_none());
    }

    #[test]
    fn test_roots_outside_interval_are_rejected() {
        let sphere = test_sphere(Vec3A::new(0.0, 0.0, -5.0), 1.0);
        let r = Ray::new(Vec3A::ZERO, Vec3A::new(0.0, 0.0, -1.0));
        // Roots are t=4 and t=6; the interval ends before both.
        assert!(sphere.hit(&r, Interval::new(0.001, 3.0)).is_none());
        // The interval covers only the farther root.
        let rec = sphere.hit(&r, Interval::new(5.0, 7.0)).unwrap();
        assert_abs_diff_eq!(rec.t, 6.0, epsilon = 1e-4);
        assert!(!rec.front_face);
    }

    #[test]
    fn test_negative_radius_is_clamped() {
        let sphere = test_sphere(Vec3A::ZERO, -3.0);
        assert_eq!(sphere.radius, 0.0);
    }
}
