use clap::Parser;
use glam::Vec3A;
use log::info;
use rand::Rng;
use std::sync::Arc;

use prismpath::camera::{Background, Camera};
use prismpath::cli::{Args, BackgroundKind};
use prismpath::hittable::{HittableList, Primitive};
use prismpath::logger::init_logger;
use prismpath::material::{Color, Material};
use prismpath::medium::ConstantMedium;
use prismpath::output::{save_image_as_exr, save_image_as_png, send_image_to_tev};
use prismpath::quad::Quad;
use prismpath::sphere::Sphere;
use prismpath::texture::Texture;

/// Create the Cornell box scene: colored walls, an area light, a one-way
/// front wall, a metal sphere, a glass sphere and a glass sphere filled
/// with a blue participating medium.
fn create_scene() -> HittableList {
    let mut world = HittableList::new();

    let red = Arc::new(Material::Lambertian {
        albedo: Texture::SolidColor(Color::new(0.65, 0.05, 0.05)),
    });
    let white = Arc::new(Material::Lambertian {
        albedo: Texture::SolidColor(Color::new(0.73, 0.73, 0.73)),
    });
    let green = Arc::new(Material::Lambertian {
        albedo: Texture::SolidColor(Color::new(0.12, 0.45, 0.15)),
    });
    let light = Arc::new(Material::DiffuseLight {
        emit: Texture::SolidColor(Color::ONE),
        strength: 15.0,
    });
    let see_thru = Arc::new(Material::OneSided {
        inner: white.clone(),
    });
    let mirror = Arc::new(Material::Metal {
        albedo: Texture::SolidColor(Color::splat(0.5)),
        fuzz: 0.0,
    });
    let glass = Arc::new(Material::Dielectric {
        refraction_index: 1.5,
    });

    // Walls.
    world.add(Primitive::Quad(Quad::new(
        Vec3A::new(555.0, 0.0, 0.0),
        Vec3A::new(0.0, 555.0, 0.0),
        Vec3A::new(0.0, 0.0, 555.0),
        green,
    )));
    world.add(Primitive::Quad(Quad::new(
        Vec3A::new(0.0, 0.0, 0.0),
        Vec3A::new(0.0, 555.0, 0.0),
        Vec3A::new(0.0, 0.0, 555.0),
        red,
    )));
    world.add(Primitive::Quad(Quad::new(
        Vec3A::new(343.0, 554.0, 332.0),
        Vec3A::new(-130.0, 0.0, 0.0),
        Vec3A::new(0.0, 0.0, -105.0),
        light,
    )));
    world.add(Primitive::Quad(Quad::new(
        Vec3A::new(0.0, 0.0, 0.0),
        Vec3A::new(555.0, 0.0, 0.0),
        Vec3A::new(0.0, 0.0, 555.0),
        white.clone(),
    )));
    world.add(Primitive::Quad(Quad::new(
        Vec3A::new(555.0, 555.0, 555.0),
        Vec3A::new(-555.0, 0.0, 0.0),
        Vec3A::new(0.0, 0.0, -555.0),
        white.clone(),
    )));
    world.add(Primitive::Quad(Quad::new(
        Vec3A::new(0.0, 0.0, 555.0),
        Vec3A::new(555.0, 0.0, 0.0),
        Vec3A::new(0.0, 555.0, 0.0),
        white,
    )));
    // The camera looks through this wall; it only interacts from inside.
    world.add(Primitive::Quad(Quad::new(
        Vec3A::new(0.0, 0.0, 0.0),
        Vec3A::new(555.0, 0.0, 0.0),
        Vec3A::new(0.0, 555.0, 0.0),
        see_thru,
    )));

    // Spheres.
    world.add(Primitive::Sphere(Sphere::new(
        Vec3A::new(450.0, 75.0, 300.0),
        75.0,
        mirror,
    )));
    world.add(Primitive::Sphere(Sphere::new(
        Vec3A::new(100.0, 75.0, 300.0),
        75.0,
        glass.clone(),
    )));

    // Glass shell with a blue fog interior.
    let boundary = Sphere::new(Vec3A::new(275.0, 75.0, 250.0), 75.0, glass);
    world.add(Primitive::Sphere(boundary.clone()));
    world.add(Primitive::Medium(ConstantMedium::new(
        Primitive::Sphere(boundary),
        0.5,
        Color::new(0.15, 0.65, 0.9),
    )));

    world
}

/// Create the camera for the Cornell box shot from the CLI settings.
fn create_camera(args: &Args) -> Camera {
    let mut camera = Camera::new();
    camera.aspect_ratio = args.aspect_ratio;
    camera.image_width = args.width;
    camera.samples_per_pixel = args.samples_per_pixel;
    camera.max_depth = args.max_depth;
    camera.lookfrom = Vec3A::new(278.0, 278.0, -1000.0);
    camera.lookat = Vec3A::new(278.0, 278.0, 0.0);
    camera.vup = Vec3A::new(0.0, 1.0, 0.0);
    camera.background = match args.background {
        BackgroundKind::Black => Background::Solid(Color::ZERO),
        BackgroundKind::Sky => Background::Gradient {
            horizon: Color::ONE,
            zenith: Color::new(0.5, 0.7, 1.0),
        },
    };
    camera.seed = args.seed.unwrap_or_else(|| rand::rng().random());
    camera
}

fn main() {
    let args = Args::parse();

    init_logger(args.debug_level.clone().into());

    info!(
        "PrismPath - Git Version {} ({})",
        env!("GIT_HASH"),
        env!("GIT_DATE")
    );
    info!(
        "Image resolution: {}x{:.0}, samples per pixel: {}",
        args.width,
        args.width as f32 / args.aspect_ratio,
        args.samples_per_pixel
    );

    let world = create_scene();
    let mut camera = create_camera(&args);

    let image = camera.render(&world);
    let (width, height) = (image.width(), image.height());

    let should_send_to_tev = args.tev || args.tev_address.is_some();
    if should_send_to_tev {
        let tev_address = args.tev_address.as_deref().unwrap_or("localhost:14158");
        send_image_to_tev(&image, tev_address, width, height);
    }

    if args.output.ends_with(".exr") {
        save_image_as_exr(&image, &args.output, width, height);
    } else if args.output.ends_with(".png") {
        save_image_as_png(&image, &args.output, width, height);
    } else {
        log::error!(
            "Unsupported file extension '{}'. Only .png and .exr formats are supported.",
            std::path::Path::new(&args.output)
                .extension()
                .unwrap_or_default()
                .to_string_lossy()
        );
        std::process::exit(1);
    }
}
