//! Camera for ray generation and scene rendering.

use glam::Vec3A;
use image::{ImageBuffer, Rgb};
use indicatif::{ProgressBar, ProgressStyle};
use log::info;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use rayon::prelude::*;

use crate::hittable::HittableList;
use crate::interval::Interval;
use crate::material::Color;
use crate::random;
use crate::ray::Ray;

/// What a ray that escapes the scene contributes.
#[derive(Debug, Clone, Copy)]
pub enum Background {
    /// A constant color regardless of direction.
    Solid(
        /// The color returned for every escaped ray.
        Color,
    ),
    /// A vertical gradient blended on the ray's y direction.
    Gradient {
        /// Color at the horizon (ray pointing down).
        horizon: Color,
        /// Color at the zenith (ray pointing up).
        zenith: Color,
    },
}

impl Background {
    /// Evaluate the background for an escaped ray.
    pub fn value(&self, r: &Ray) -> Color {
        match self {
            Background::Solid(color) => *color,
            Background::Gradient { horizon, zenith } => {
                let unit_direction = r.direction.normalize();
                let a = 0.5 * (unit_direction.y + 1.0);
                (1.0 - a) * *horizon + a * *zenith
            }
        }
    }
}

/// Camera owning the render configuration and the top-level render loop.
///
/// Uses a pinhole model. Configuration fields are public and mutable
/// before `render` is called; derivation happens once at render start.
#[derive(Debug, Clone)]
pub struct Camera {
    /// Ratio of image width over height
    pub aspect_ratio: f32,
    /// Rendered image width in pixel count
    pub image_width: u32,
    /// Number of random samples for each pixel (for anti-aliasing)
    pub samples_per_pixel: u32,
    /// Maximum number of ray bounces (recursion depth limit)
    pub max_depth: u32,
    /// Vertical field of view in degrees
    pub vfov: f32,
    /// Point camera is looking from (camera position)
    pub lookfrom: Vec3A,
    /// Point camera is looking at (look target)
    pub lookat: Vec3A,
    /// Camera-relative "up" direction vector
    pub vup: Vec3A,
    /// Contribution of rays that leave the scene
    pub background: Background,
    /// Base seed for the per-pixel random streams
    pub seed: u64,

    /// Rendered image height, derived from width and aspect ratio
    image_height: u32,
    /// Camera position in world space (same as lookfrom)
    center: Vec3A,
    /// World position of the top-left pixel (pixel 0,0)
    pixel00_loc: Vec3A,
    /// Offset vector from pixel to pixel horizontally
    pixel_delta_u: Vec3A,
    /// Offset vector from pixel to pixel vertically
    pixel_delta_v: Vec3A,
    /// Color scale factor for a sum of pixel samples
    pixel_samples_scale: f32,
    /// Camera frame basis vector pointing right (u)
    u: Vec3A,
    /// Camera frame basis vector pointing up (v)
    v: Vec3A,
    /// Camera frame basis vector pointing opposite view direction (w)
    w: Vec3A,
    /// Flag to track whether camera parameters have been calculated
    initialized: bool,
}

impl Camera {
    /// Creates a new camera with default settings.
    ///
    /// Default: 400x225 image, 10 samples per pixel, 10 bounces, 60 degree
    /// FOV, black background.
    pub fn new() -> Self {
        Self {
            aspect_ratio: 16.0 / 9.0,
            image_width: 400,
            samples_per_pixel: 10,
            max_depth: 10,
            vfov: 60.0,
            lookfrom: Vec3A::ZERO,
            lookat: Vec3A::new(0.0, 0.0, -1.0),
            vup: Vec3A::new(0.0, 1.0, 0.0),
            background: Background::Solid(Color::ZERO),
            seed: 0,
            image_height: 0,
            center: Vec3A::ZERO,
            pixel00_loc: Vec3A::ZERO,
            pixel_delta_u: Vec3A::ZERO,
            pixel_delta_v: Vec3A::ZERO,
            pixel_samples_scale: 0.1,
            u: Vec3A::ZERO,
            v: Vec3A::ZERO,
            w: Vec3A::ZERO,
            initialized: false,
        }
    }

    /// Renders the scene using CPU path tracing.
    ///
    /// Pixels are processed in parallel; every pixel owns a random stream
    /// seeded from the camera seed and its coordinates, so a fixed seed
    /// reproduces the image byte for byte regardless of scheduling.
    ///
    /// Returns an HDR image buffer with linear f32 RGB values.
    pub fn render(&mut self, world: &HittableList) -> ImageBuffer<Rgb<f32>, Vec<f32>> {
        self.initialize();

        let mut image: ImageBuffer<Rgb<f32>, Vec<f32>> =
            ImageBuffer::new(self.image_width, self.image_height);

        info!(
            "Rendering {}x{} at {} spp using {} CPU cores...",
            self.image_width,
            self.image_height,
            self.samples_per_pixel,
            rayon::current_num_threads()
        );
        let generation_start = std::time::Instant::now();
        let pb = ProgressBar::new((self.image_width * self.image_height) as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{bar:40} {pos}/{len} ETA: {eta}")
                .unwrap(),
        );

        image.enumerate_pixels_mut().par_bridge().for_each(|(i, j, pixel)| {
            let mut rng = self.pixel_rng(i, j);
            let mut pixel_color = Color::ZERO;

            for _sample in 0..self.samples_per_pixel {
                let r = self.get_ray(i, j, &mut rng);
                pixel_color += self.ray_color(&r, world, self.max_depth, &mut rng);
            }

            pixel_color *= self.pixel_samples_scale;
            *pixel = Rgb([pixel_color.x, pixel_color.y, pixel_color.z]);
            pb.inc(1);
        });

        pb.finish();
        info!("Image generated in {:.2?}", generation_start.elapsed());

        image
    }

    /// Initialize derived camera parameters from the public configuration.
    fn initialize(&mut self) {
        if self.initialized {
            return;
        }

        let height = (self.image_width as f32 / self.aspect_ratio).round() as u32;
        self.image_height = height.max(1);

        self.pixel_samples_scale = 1.0 / self.samples_per_pixel as f32;

        self.center = self.lookfrom;

        // Viewport dimensions from the field of view and the distance to
        // the look target.
        let focal_length = (self.lookfrom - self.lookat).length();
        let theta = self.vfov.to_radians();
        let h = (theta / 2.0).tan();
        let viewport_height = h * focal_length;
        let viewport_width =
            viewport_height * (self.image_width as f32 / self.image_height as f32);

        // Orthonormal camera basis; w points away from the view direction.
        self.w = (self.lookfrom - self.lookat).normalize();
        self.u = self.vup.cross(self.w).normalize();
        self.v = self.w.cross(self.u);

        // Viewport edge vectors; v is inverted because image rows grow
        // downward while the viewport v axis grows upward.
        let viewport_u = viewport_width * self.u;
        let viewport_v = viewport_height * -self.v;

        self.pixel_delta_u = viewport_u / self.image_width as f32;
        self.pixel_delta_v = viewport_v / self.image_height as f32;

        let viewport_upper_left =
            self.center - (focal_length * self.w) - viewport_u / 2.0 - viewport_v / 2.0;
        self.pixel00_loc = viewport_upper_left + 0.5 * (self.pixel_delta_u + self.pixel_delta_v);

        self.initialized = true;
    }

    /// Random stream for one pixel, derived from the camera seed.
    fn pixel_rng(&self, i: u32, j: u32) -> ChaCha20Rng {
        ChaCha20Rng::seed_from_u64(self.seed ^ (((j as u64) << 32) | i as u64))
    }

    /// Generate a ray through pixel (i, j) with a jittered sample position.
    fn get_ray(&self, i: u32, j: u32, rng: &mut impl Rng) -> Ray {
        let offset = self.sample_square(rng);
        let pixel_sample = self.pixel00_loc
            + ((i as f32 + offset.x) * self.pixel_delta_u)
            + ((j as f32 + offset.y) * self.pixel_delta_v);

        Ray::new(self.center, pixel_sample - self.center)
    }

    /// Random offset within the [-0.5, 0.5] square for pixel sampling.
    fn sample_square(&self, rng: &mut impl Rng) -> Vec3A {
        Vec3A::new(
            random::random_f32(rng) - 0.5,
            random::random_f32(rng) - 0.5,
            0.0,
        )
    }

    /// Trace a ray and compute its radiance.
    ///
    /// Emission at each bounce is added unconditionally; the scattered
    /// contribution is attenuated before being combined. Depth exhaustion
    /// truncates the path to black.
    fn ray_color(
        &self,
        r: &Ray,
        world: &HittableList,
        depth: u32,
        rng: &mut impl Rng,
    ) -> Color {
        if depth == 0 {
            return Color::ZERO;
        }

        // The lower bound suppresses self-intersection at the origin of
        // secondary rays.
        match world.hit(r, Interval::new(0.001, f32::INFINITY), rng) {
            Some(rec) => {
                let emitted = rec.material.emitted(rec.u, rec.v, rec.p);
                match rec.material.scatter(r, &rec, rng) {
                    Some((attenuation, scattered)) => {
                        emitted + attenuation * self.ray_color(&scattered, world, depth - 1, rng)
                    }
                    None => emitted,
                }
            }
            None => self.background.value(r),
        }
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hittable::Primitive;
    use crate::material::Material;
    use crate::quad::Quad;
    use crate::sphere::Sphere;
    use crate::texture::Texture;
    use std::sync::Arc;

    fn sphere_under_light() -> HittableList {
        let mut world = HittableList::new();
        world.add(Primitive::Sphere(Sphere::new(
            Vec3A::ZERO,
            1.0,
            Arc::new(Material::Lambertian {
                albedo: Texture::SolidColor(Color::ONE),
            }),
        )));
        world.add(Primitive::Quad(Quad::new(
            Vec3A::new(-1.0, 3.0, -1.0),
            Vec3A::new(2.0, 0.0, 0.0),
            Vec3A::new(0.0, 0.0, 2.0),
            Arc::new(Material::DiffuseLight {
                emit: Texture::SolidColor(Color::ONE),
                strength: 4.0,
            }),
        )));
        world
    }

    fn small_camera() -> Camera {
        let mut camera = Camera::new();
        camera.aspect_ratio = 1.0;
        camera.image_width = 16;
        camera.samples_per_pixel = 2;
        camera.max_depth = 8;
        camera.lookfrom = Vec3A::new(0.0, 0.0, 4.0);
        camera.lookat = Vec3A::ZERO;
        camera.seed = 42;
        camera
    }

    #[test]
    fn test_depth_zero_returns_black() {
        let camera = small_camera();
        let world = sphere_under_light();
        let mut rng = ChaCha20Rng::seed_from_u64(0);
        let r = Ray::new(Vec3A::new(0.0, 0.0, 4.0), Vec3A::new(0.0, 0.0, -1.0));
        assert_eq!(camera.ray_color(&r, &world, 0, &mut rng), Color::ZERO);
    }

    #[test]
    fn test_empty_scene_is_black_for_every_ray() {
        let camera = small_camera();
        let world = HittableList::new();
        let mut rng = ChaCha20Rng::seed_from_u64(0);
        for direction in [Vec3A::X, Vec3A::Y, Vec3A::Z, Vec3A::NEG_Z] {
            let r = Ray::new(Vec3A::ZERO, direction);
            assert_eq!(camera.ray_color(&r, &world, 10, &mut rng), Color::ZERO);
        }
    }

    #[test]
    fn test_empty_scene_renders_pure_black() {
        let mut camera = small_camera();
        let world = HittableList::new();
        let image = camera.render(&world);
        assert!(image.as_raw().iter().all(|&channel| channel == 0.0));
    }

    #[test]
    fn test_gradient_background_blends_on_ray_height() {
        let background = Background::Gradient {
            horizon: Color::ONE,
            zenith: Color::new(0.5, 0.7, 1.0),
        };
        let up = background.value(&Ray::new(Vec3A::ZERO, Vec3A::Y));
        let down = background.value(&Ray::new(Vec3A::ZERO, Vec3A::NEG_Y));
        assert_eq!(up, Color::new(0.5, 0.7, 1.0));
        assert_eq!(down, Color::ONE);
    }

    #[test]
    fn test_fixed_seed_renders_are_reproducible() {
        let world = sphere_under_light();
        let first = small_camera().render(&world);
        let second = small_camera().render(&world);
        assert_eq!(first.as_raw(), second.as_raw());
    }

    #[test]
    fn test_image_height_is_clamped_to_one() {
        let mut camera = small_camera();
        camera.image_width = 5;
        camera.aspect_ratio = 100.0;
        let image = camera.render(&HittableList::new());
        assert_eq!(image.height(), 1);
        assert_eq!(image.width(), 5);
    }

    #[test]
    fn test_lit_scene_produces_light() {
        let mut camera = small_camera();
        let world = sphere_under_light();
        let image = camera.render(&world);
        let total: f32 = image.as_raw().iter().sum();
        assert!(total > 0.0);
    }
}
