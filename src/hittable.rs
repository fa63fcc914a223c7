//! Ray-object intersection system.
//!
//! Defines the closed set of geometric primitives, the hit record produced
//! by an intersection query, and the scene aggregate that answers the same
//! intersection contract as a single primitive.

use glam::Vec3A;
use rand::Rng;

use crate::interval::Interval;
use crate::material::Material;
use crate::medium::ConstantMedium;
use crate::quad::Quad;
use crate::ray::Ray;
use crate::sphere::Sphere;

/// Ray-object intersection information.
///
/// Contains the intersection point, surface normal, distance, surface
/// coordinates and a non-owning reference to the material at the hit.
/// Stack-scoped to a single intersection query, never persisted.
#[derive(Debug, Clone)]
pub struct HitRecord<'a> {
    /// Point where the ray intersects the object
    pub p: Vec3A,
    /// Surface normal at the intersection point (unit vector)
    pub normal: Vec3A,
    /// Ray parameter of the intersection point
    pub t: f32,
    /// First planar surface coordinate, in [0, 1]
    pub u: f32,
    /// Second planar surface coordinate, in [0, 1]
    pub v: f32,
    /// True if the ray hit the front face, false for the back face
    pub front_face: bool,
    /// Material of the object at the hit point
    pub material: &'a Material,
}

impl HitRecord<'_> {
    /// Set the surface normal and the front/back face flag.
    ///
    /// `outward_normal` must be unit length. The stored normal always
    /// points against the incident ray.
    pub fn set_face_normal(&mut self, r: &Ray, outward_normal: Vec3A) {
        self.front_face = r.direction.dot(outward_normal) < 0.0;
        self.normal = if self.front_face {
            outward_normal
        } else {
            -outward_normal
        };
    }
}

/// The closed set of geometric primitives a scene is built from.
///
/// Dispatch is an exhaustive match; adding a variant forces every
/// intersection site to handle it.
#[derive(Debug, Clone)]
pub enum Primitive {
    /// Sphere defined by center, radius and material.
    Sphere(Sphere),
    /// Finite parallelogram defined by a corner and two edge vectors.
    Quad(Quad),
    /// Volumetric constant-density medium wrapped around a boundary primitive.
    Medium(ConstantMedium),
}

impl Primitive {
    /// Test for ray intersection within the given parameter range.
    ///
    /// Returns the nearest valid hit, or `None`. The rng handle is
    /// consumed only by the medium variant, which samples its scattering
    /// distance during traversal; solid primitives ignore it.
    pub fn hit(&self, r: &Ray, ray_t: Interval, rng: &mut impl Rng) -> Option<HitRecord<'_>> {
        match self {
            Primitive::Sphere(sphere) => sphere.hit(r, ray_t),
            Primitive::Quad(quad) => quad.hit(r, ray_t),
            Primitive::Medium(medium) => medium.hit(r, ray_t, rng),
        }
    }
}

/// Collection of primitives forming a scene.
///
/// Intersection is a linear scan returning the closest hit; scenes stay
/// small enough (tens of primitives) that no spatial index is needed.
pub struct HittableList {
    /// The primitives in the scene, in insertion order
    pub objects: Vec<Primitive>,
}

impl HittableList {
    /// Create a new empty scene.
    pub fn new() -> Self {
        Self {
            objects: Vec::new(),
        }
    }

    /// Add a primitive to the scene.
    pub fn add(&mut self, object: Primitive) {
        self.objects.push(object);
    }

    /// Find the closest hit among all members within the interval.
    ///
    /// Each candidate is queried over the shrinking interval
    /// `[t_min, closest_so_far]`, so later members can only win by being
    /// strictly nearer.
    pub fn hit(&self, r: &Ray, ray_t: Interval, rng: &mut impl Rng) -> Option<HitRecord<'_>> {
        let mut closest_so_far = ray_t.max;
        let mut closest_hit = None;

        for object in &self.objects {
            if let Some(rec) = object.hit(r, Interval::new(ray_t.min, closest_so_far), rng) {
                closest_so_far = rec.t;
                closest_hit = Some(rec);
            }
        }

        closest_hit
    }
}

impl Default for HittableList {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::material::Color;
    use crate::texture::Texture;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;
    use std::sync::Arc;

    fn grey() -> Arc<Material> {
        Arc::new(Material::Lambertian {
            albedo: Texture::SolidColor(Color::splat(0.5)),
        })
    }

    #[test]
    fn test_empty_scene_never_hits() {
        let world = HittableList::new();
        let mut rng = ChaCha20Rng::seed_from_u64(0);
        let r = Ray::new(Vec3A::ZERO, Vec3A::new(0.0, 0.0, -1.0));
        assert!(world
            .hit(&r, Interval::new(0.001, f32::INFINITY), &mut rng)
            .is_none());
    }

    #[test]
    fn test_closest_of_two_spheres_wins() {
        let mut world = HittableList::new();
        world.add(Primitive::Sphere(Sphere::new(
            Vec3A::new(0.0, 0.0, -10.0),
            1.0,
            grey(),
        )));
        world.add(Primitive::Sphere(Sphere::new(
            Vec3A::new(0.0, 0.0, -3.0),
            1.0,
            grey(),
        )));

        let mut rng = ChaCha20Rng::seed_from_u64(0);
        let r = Ray::new(Vec3A::ZERO, Vec3A::new(0.0, 0.0, -1.0));
        let rec = world
            .hit(&r, Interval::new(0.001, f32::INFINITY), &mut rng)
            .unwrap();
        // The nearer sphere's front surface is at z = -2.
        assert!((rec.t - 2.0).abs() < 1e-4);
    }

    #[test]
    fn test_interval_bounds_exclude_hits() {
        let mut world = HittableList::new();
        world.add(Primitive::Sphere(Sphere::new(
            Vec3A::new(0.0, 0.0, -3.0),
            1.0,
            grey(),
        )));

        let mut rng = ChaCha20Rng::seed_from_u64(0);
        let r = Ray::new(Vec3A::ZERO, Vec3A::new(0.0, 0.0, -1.0));
        // Both sphere roots (t=2 and t=4) lie outside [0.001, 1.5].
        assert!(world
            .hit(&r, Interval::new(0.001, 1.5), &mut rng)
            .is_none());
    }

    #[test]
    fn test_set_face_normal_flips_on_back_face() {
        let material = grey();
        let mut rec = HitRecord {
            p: Vec3A::ZERO,
            normal: Vec3A::ZERO,
            t: 1.0,
            u: 0.0,
            v: 0.0,
            front_face: false,
            material: &material,
        };

        // Ray travelling along +z against an outward normal also along +z:
        // the ray comes from inside, so the normal must flip.
        let r = Ray::new(Vec3A::ZERO, Vec3A::new(0.0, 0.0, 1.0));
        rec.set_face_normal(&r, Vec3A::new(0.0, 0.0, 1.0));
        assert!(!rec.front_face);
        assert_eq!(rec.normal, Vec3A::new(0.0, 0.0, -1.0));
    }
}
