//! Constant-density participating medium.
//!
//! Wraps a boundary primitive with a homogeneous volume: a ray entering
//! the boundary scatters after an exponentially distributed free path,
//! or passes through if the sampled distance outruns the volume.

use glam::Vec3A;
use rand::Rng;

use crate::hittable::{HitRecord, Primitive};
use crate::interval::Interval;
use crate::material::{Color, Material};
use crate::ray::Ray;
use crate::texture::Texture;

/// Constant-density volumetric wrapper around a boundary primitive.
#[derive(Debug, Clone)]
pub struct ConstantMedium {
    /// Primitive delimiting the volume. Must be a closed surface.
    boundary: Box<Primitive>,
    /// Negative reciprocal of the density, used for free-path sampling.
    neg_inv_density: f32,
    /// Isotropic phase function applied at each scattering event.
    phase: Material,
}

impl ConstantMedium {
    /// Create a new medium of the given density and albedo around a boundary.
    pub fn new(boundary: Primitive, density: f32, albedo: Color) -> Self {
        Self {
            boundary: Box::new(boundary),
            neg_inv_density: -1.0 / density,
            phase: Material::Isotropic {
                albedo: Texture::SolidColor(albedo),
            },
        }
    }

    /// Test for a scattering event within the given parameter range.
    ///
    /// Probes the boundary twice to find the entry and exit parameters,
    /// clamps them into the query interval, then samples the free path
    /// `-ln(xi) / density`. A sampled distance longer than the in-volume
    /// segment means the ray passes through unaffected.
    pub fn hit(&self, r: &Ray, ray_t: Interval, rng: &mut impl Rng) -> Option<HitRecord<'_>> {
        let entry = self.boundary.hit(r, Interval::UNIVERSE, rng)?;
        let exit = self
            .boundary
            .hit(r, Interval::new(entry.t + 0.0001, f32::INFINITY), rng)?;

        let mut t_enter = entry.t.max(ray_t.min);
        let t_exit = exit.t.min(ray_t.max);

        if t_enter >= t_exit {
            return None;
        }
        if t_enter < 0.0 {
            t_enter = 0.0;
        }

        let ray_length = r.direction.length();
        let distance_inside_boundary = (t_exit - t_enter) * ray_length;
        let hit_distance = self.neg_inv_density * rng.random::<f32>().ln();

        if hit_distance > distance_inside_boundary {
            return None;
        }

        let t = t_enter + hit_distance / ray_length;

        // Normal and face orientation are arbitrary for a volume event.
        Some(HitRecord {
            t,
            p: r.at(t),
            normal: Vec3A::X,
            u: 0.0,
            v: 0.0,
            front_face: true,
            material: &self.phase,
        })
    }
}
