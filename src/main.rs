use clap::Parser;
use glam::Vec3A;
use log::info;

mod cli;
mod logger;

use cli::Args;
use logger::init_logger;
use pathlight::camera::Camera;
use pathlight::hittable::HittableList;
use pathlight::material::MaterialType;
use pathlight::output::save_image;
use pathlight::random;
use pathlight::sphere::Sphere;

/// Create the classic book-cover scene: a ground sphere, a grid of small
/// randomized spheres, and three large feature spheres.
fn create_scene() -> HittableList {
    let mut world = HittableList::new();

    let ground_material = MaterialType::Lambertian {
        albedo: Vec3A::new(0.5, 0.5, 0.5),
    };
    world.add(Box::new(Sphere::new(
        Vec3A::new(0.0, -1000.0, 0.0),
        1000.0,
        ground_material,
    )));

    for a in -11..11 {
        for b in -11..11 {
            let choose_mat = random::random_f32();
            let center = Vec3A::new(
                a as f32 + 0.9 * random::random_f32(),
                0.2,
                b as f32 + 0.9 * random::random_f32(),
            );

            // Keep the small spheres clear of the large feature spheres.
            if (center - Vec3A::new(4.0, 0.2, 0.0)).length() <= 0.9 {
                continue;
            }

            let sphere_material = if choose_mat < 0.8 {
                MaterialType::Lambertian {
                    albedo: random::random_color() * random::random_color(),
                }
            } else if choose_mat < 0.95 {
                MaterialType::Metal {
                    albedo: random::random_color_range(0.5, 1.0),
                    fuzz: random::random_f32_range(0.0, 0.5),
                }
            } else {
                MaterialType::Dielectric {
                    refraction_index: 1.5,
                }
            };
            world.add(Box::new(Sphere::new(center, 0.2, sphere_material)));
        }
    }

    world.add(Box::new(Sphere::new(
        Vec3A::new(0.0, 1.0, 0.0),
        1.0,
        MaterialType::Dielectric {
            refraction_index: 1.5,
        },
    )));
    world.add(Box::new(Sphere::new(
        Vec3A::new(-4.0, 1.0, 0.0),
        1.0,
        MaterialType::Lambertian {
            albedo: Vec3A::new(0.4, 0.2, 0.1),
        },
    )));
    world.add(Box::new(Sphere::new(
        Vec3A::new(4.0, 1.0, 0.0),
        1.0,
        MaterialType::Metal {
            albedo: Vec3A::new(0.7, 0.6, 0.5),
            fuzz: 0.0,
        },
    )));

    world
}

/// Create the camera for the book-cover shot.
fn create_camera(args: &Args) -> Camera {
    let mut camera = Camera::new();
    camera.image_width = args.width;
    camera.image_height = args.height;
    camera.samples_per_pixel = args.samples_per_pixel.max(1);
    camera.max_depth = args.max_depth;
    camera.vfov = 20.0;
    camera.lookfrom = Vec3A::new(13.0, 2.0, 3.0);
    camera.lookat = Vec3A::new(0.0, 0.0, 0.0);
    camera.vup = Vec3A::new(0.0, 1.0, 0.0);
    camera.aperture = 0.1;
    camera.focus_dist = 10.0;
    camera.seed = args.seed;
    camera
}

fn main() {
    let args = Args::parse();
    init_logger(args.log_level.clone().into());

    info!(
        "Pathlight - {}x{}, {} samples per pixel, depth {}",
        args.width, args.height, args.samples_per_pixel, args.max_depth
    );

    if let Some(seed) = args.seed {
        // Seed scene generation too, so a fixed seed reproduces the whole
        // image, not just the sampling noise.
        random::reseed(seed);
    }
    let world = create_scene();
    info!("Scene built with {} spheres", world.len());

    let mut camera = create_camera(&args);
    let image = camera.render(&world);

    if save_image(&image, &args.output, args.gamma).is_err() {
        std::process::exit(1);
    }
}
