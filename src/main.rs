use clap::Parser;
use glam::Vec3A;
use log::info;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;

mod cli;
mod logger;

use cli::Args;
use logger::init_logger;
use prismpath::camera::Camera;
use prismpath::hittable::HittableList;
use prismpath::material::Material;
use prismpath::output::{save_image_as_png, save_image_as_ppm};
use prismpath::random;
use prismpath::sphere::Sphere;

/// Create the cover scene: a gray ground sphere, a 22x22 grid of small
/// randomized spheres, and three large feature spheres
fn create_scene(rng: &mut impl Rng) -> HittableList {
    let mut world = HittableList::new();

    // Ground sphere
    let ground_material = Material::Lambertian {
        albedo: Vec3A::new(0.5, 0.5, 0.5),
    };
    world.add(Box::new(Sphere::new(
        Vec3A::new(0.0, -1000.0, 0.0),
        1000.0,
        ground_material,
    )));

    for a in -11..11 {
        for b in -11..11 {
            let choose_mat = random::random_f32(rng);
            let center = Vec3A::new(
                a as f32 + 0.9 * random::random_f32(rng),
                0.2,
                b as f32 + 0.9 * random::random_f32(rng),
            );

            // Don't place spheres too close to the large feature spheres
            if (center - Vec3A::new(4.0, 0.2, 0.0)).length() > 0.9 {
                if choose_mat < 0.8 {
                    // Diffuse material, drifting upward over the shutter interval
                    let albedo = random::random_color(rng) * random::random_color(rng);
                    let center2 =
                        center + Vec3A::new(0.0, random::random_f32_range(rng, 0.0, 0.5), 0.0);
                    world.add(Box::new(Sphere::new_moving(
                        center,
                        center2,
                        0.2,
                        Material::Lambertian { albedo },
                    )));
                } else if choose_mat < 0.95 {
                    // Metal material
                    let albedo = random::random_color_range(rng, 0.5, 1.0);
                    let fuzz = random::random_f32_range(rng, 0.0, 0.5);
                    world.add(Box::new(Sphere::new(
                        center,
                        0.2,
                        Material::Metal { albedo, fuzz },
                    )));
                } else {
                    // Glass material
                    world.add(Box::new(Sphere::new(
                        center,
                        0.2,
                        Material::Dielectric {
                            refraction_index: 1.5,
                        },
                    )));
                }
            }
        }
    }

    // Three large feature spheres
    world.add(Box::new(Sphere::new(
        Vec3A::new(0.0, 1.0, 0.0),
        1.0,
        Material::Dielectric {
            refraction_index: 1.5,
        },
    )));
    world.add(Box::new(Sphere::new(
        Vec3A::new(-4.0, 1.0, 0.0),
        1.0,
        Material::Lambertian {
            albedo: Vec3A::new(0.4, 0.2, 0.1),
        },
    )));
    world.add(Box::new(Sphere::new(
        Vec3A::new(4.0, 1.0, 0.0),
        1.0,
        Material::Metal {
            albedo: Vec3A::new(0.7, 0.6, 0.5),
            fuzz: 0.0,
        },
    )));

    world
}

/// Create the cover-shot camera from command line settings
fn create_camera(args: &Args) -> Camera {
    let mut camera = Camera::new();
    camera.image_width = args.width;
    camera.aspect_ratio = args.aspect_ratio;
    camera.samples_per_pixel = args.samples_per_pixel;
    camera.max_depth = args.max_depth;
    camera.seed = args.seed;
    camera.vfov = 20.0;
    camera.lookfrom = Vec3A::new(13.0, 2.0, 3.0);
    camera.lookat = Vec3A::new(0.0, 0.0, 0.0);
    camera.vup = Vec3A::new(0.0, 1.0, 0.0);
    camera.defocus_angle = 0.6;
    camera.focus_dist = 10.0;
    camera
}

fn main() {
    let args = Args::parse();

    init_logger(args.debug_level.clone().into());

    // Log application startup with version information
    info!(
        "PrismPath - Git Version {} ({})",
        env!("GIT_HASH"),
        env!("GIT_DATE")
    );
    info!(
        "Image width: {}, aspect ratio: {:.4}, samples per pixel: {}, max depth: {}",
        args.width, args.aspect_ratio, args.samples_per_pixel, args.max_depth
    );

    // Scene randomness follows the CLI seed so whole renders reproduce
    let mut scene_rng = match args.seed {
        Some(seed) => ChaCha20Rng::seed_from_u64(seed),
        None => ChaCha20Rng::from_rng(&mut rand::rng()),
    };
    let world = create_scene(&mut scene_rng);
    info!("Scene built with {} objects", world.objects.len());

    let mut camera = create_camera(&args);
    let image = camera.render(&world);

    // Save image based on file extension
    if args.output.ends_with(".ppm") {
        save_image_as_ppm(&image, &args.output);
    } else if args.output.ends_with(".png") {
        save_image_as_png(&image, &args.output);
    } else {
        log::error!(
            "Unsupported file extension '{}'. Only .ppm and .png formats are supported.",
            std::path::Path::new(&args.output)
                .extension()
                .unwrap_or_default()
                .to_string_lossy()
        );
        std::process::exit(1);
    }
}
