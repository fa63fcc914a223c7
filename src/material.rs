//! Material system for path tracing.
//!
//! Each material answers two questions about a hit: how much light it
//! emits on its own, and whether (and where) it redirects the incoming
//! ray, with a per-channel attenuation applied to whatever the scattered
//! ray gathers.

use glam::Vec3A;
use rand::Rng;
use std::sync::Arc;

use crate::hittable::HitRecord;
use crate::random;
use crate::ray::Ray;
use crate::texture::Texture;

/// RGB color type using Vec3A for SIMD optimization.
pub type Color = Vec3A;

/// The closed set of surface and volume materials.
#[derive(Debug, Clone)]
pub enum Material {
    /// Lambertian diffuse material for matte surfaces.
    Lambertian {
        /// Surface reflectance texture.
        albedo: Texture,
    },

    /// Metallic material with specular reflection.
    Metal {
        /// Metal color texture.
        albedo: Texture,
        /// Surface roughness (0.0 = mirror, 1.0 = rough), clamped at use.
        fuzz: f32,
    },

    /// Dielectric (transparent) material with refraction.
    Dielectric {
        /// Index of refraction (1.0 = air, 1.5 = glass, etc.).
        refraction_index: f32,
    },

    /// Emissive material that radiates light and never scatters.
    DiffuseLight {
        /// Emission color texture.
        emit: Texture,
        /// Scalar multiplier on the emitted radiance.
        strength: f32,
    },

    /// Wrapper that only interacts on the front face.
    ///
    /// Back-face hits pass the ray straight through unattenuated, making
    /// the surface a one-way window.
    OneSided {
        /// The material active on the front face.
        inner: Arc<Material>,
    },

    /// Uniform-random scatter in all directions, used for volume interiors.
    Isotropic {
        /// Volume albedo texture.
        albedo: Texture,
    },
}

impl Material {
    /// Light emitted at the hit point, independent of incoming light.
    ///
    /// Zero for everything but [`Material::DiffuseLight`].
    pub fn emitted(&self, u: f32, v: f32, p: Vec3A) -> Color {
        match self {
            Material::DiffuseLight { emit, strength } => *strength * emit.value(u, v, p),
            _ => Color::ZERO,
        }
    }

    /// Compute ray scattering for this material.
    ///
    /// Returns the attenuation and the scattered ray, or `None` when the
    /// material absorbs the path (or, for metal, when the fuzzed direction
    /// ends up under the surface).
    pub fn scatter(
        &self,
        r_in: &Ray,
        rec: &HitRecord,
        rng: &mut impl Rng,
    ) -> Option<(Color, Ray)> {
        match self {
            Material::Lambertian { albedo } => Self::scatter_lambertian(albedo, rec, rng),
            Material::Metal { albedo, fuzz } => Self::scatter_metal(albedo, *fuzz, r_in, rec, rng),
            Material::Dielectric { refraction_index } => {
                Self::scatter_dielectric(*refraction_index, r_in, rec, rng)
            }
            Material::DiffuseLight { .. } => None,
            Material::OneSided { inner } => {
                if rec.front_face {
                    inner.scatter(r_in, rec, rng)
                } else {
                    // Back face: pass through unattenuated and undeflected.
                    Some((Color::ONE, Ray::new(rec.p, r_in.direction)))
                }
            }
            Material::Isotropic { albedo } => Some((
                albedo.value(rec.u, rec.v, rec.p),
                Ray::new(rec.p, random::random_unit_vector(rng)),
            )),
        }
    }

    /// Diffuse scattering: normal plus a uniform unit-sphere offset.
    fn scatter_lambertian(
        albedo: &Texture,
        rec: &HitRecord,
        rng: &mut impl Rng,
    ) -> Option<(Color, Ray)> {
        let mut scatter_direction = rec.normal + random::random_unit_vector(rng);

        // Catch degenerate scatter direction (very close to zero).
        if scatter_direction.length_squared() < 1e-8 {
            scatter_direction = rec.normal;
        }

        Some((
            albedo.value(rec.u, rec.v, rec.p),
            Ray::new(rec.p, scatter_direction),
        ))
    }

    /// Metallic reflection with optional surface roughness.
    fn scatter_metal(
        albedo: &Texture,
        fuzz: f32,
        r_in: &Ray,
        rec: &HitRecord,
        rng: &mut impl Rng,
    ) -> Option<(Color, Ray)> {
        let reflected = reflect(r_in.direction, rec.normal);
        let direction =
            reflected.normalize() + fuzz.clamp(0.0, 1.0) * random::random_unit_vector(rng);

        // A fuzzed direction below the surface is absorbed; this darkens
        // grazing angles on rough metal.
        if direction.dot(rec.normal) > 0.0 {
            Some((albedo.value(rec.u, rec.v, rec.p), Ray::new(rec.p, direction)))
        } else {
            None
        }
    }

    /// Dielectric reflect/refract choice weighted by Schlick reflectance.
    fn scatter_dielectric(
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

        let cannot_refract = ri * sin_theta > 1.0;
        let direction = if cannot_refract || reflectance(cos_theta, ri) > rng.random::<f32>() {
            reflect(unit_direction, rec.normal)
        } else {
            refract(unit_direction, rec.normal, ri)
        };

        // Glass doesn't attenuate light.
        Some((Color::ONE, Ray::new(rec.p, direction)))
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
