//! Camera, radiance integrator and render loop.
//!
//! The camera owns ray generation (viewport derivation, depth-of-field lens
//! jitter) and drives the render: pixels are visited strictly in scan order,
//! while each pixel's sample budget fans out across the rayon worker pool
//! and is folded back into a single color before the pixel is stored.

use glam::Vec3A;
use image::{ImageBuffer, Rgb};
use indicatif::{ProgressBar, ProgressStyle};
use log::info;
use rayon::prelude::*;
use std::ops::Range;

use crate::hittable::Hittable;
use crate::interval::Interval;
use crate::random;
use crate::ray::Ray;

/// RGB color type.
type Color = Vec3A;

/// Compute the radiance carried back along a ray.
///
/// Recursively follows bounces through the scene: on a hit the material
/// either scatters (attenuated recursive contribution) or absorbs (black);
/// on a miss the ray picks up the sky gradient. Recursion terminates when
/// the bounce budget is exhausted, so depth alone bounds the work per
/// sample.
///
/// `shadow_epsilon` is the lower bound of the acceptance window; it keeps a
/// bounce ray from re-intersecting the surface it just left due to
/// floating-point error ("shadow acne").
pub fn ray_color(r: &Ray, world: &dyn Hittable, depth: u32, shadow_epsilon: f32) -> Color {
    if depth == 0 {
        return Color::ZERO;
    }

    if let Some(rec) = world.hit(r, Interval::new(shadow_epsilon, f32::INFINITY)) {
        return match rec.material.scatter(r, &rec) {
            Some((attenuation, scattered)) => {
                attenuation * ray_color(&scattered, world, depth - 1, shadow_epsilon)
            }
            None => Color::ZERO,
        };
    }

    // Miss: vertical white-to-blue sky gradient keyed on ray height.
    let a = 0.5 * (r.direction.y + 1.0);
    (1.0 - a) * Color::new(1.0, 1.0, 1.0) + a * Color::new(0.5, 0.7, 1.0)
}

/// Camera for ray generation and scene rendering.
///
/// Configure the public fields, then call [`Camera::render`]. The derived
/// basis vectors and viewport are computed lazily on first use.
#[derive(Debug, Clone)]
pub struct Camera {
    /// Rendered image width in pixels.
    pub image_width: u32,
    /// Rendered image height in pixels.
    pub image_height: u32,
    /// Number of stochastic samples averaged per pixel.
    pub samples_per_pixel: u32,
    /// Maximum number of ray bounces (recursion depth limit).
    pub max_depth: u32,
    /// Vertical field of view in degrees.
    pub vfov: f32,
    /// Point the camera looks from.
    pub lookfrom: Vec3A,
    /// Point the camera looks at.
    pub lookat: Vec3A,
    /// Camera-relative "up" direction.
    pub vup: Vec3A,
    /// Lens aperture diameter; 0.0 disables depth-of-field blur.
    pub aperture: f32,
    /// Distance from the camera to the plane of perfect focus.
    pub focus_dist: f32,
    /// Lower bound of the hit acceptance window for bounce rays.
    pub shadow_epsilon: f32,
    /// Optional RNG seed; when set, renders are byte-for-byte reproducible.
    pub seed: Option<u64>,

    // Derived state, filled in by initialize().
    origin: Vec3A,
    horizontal: Vec3A,
    vertical: Vec3A,
    lower_left_corner: Vec3A,
    u: Vec3A,
    v: Vec3A,
    lens_radius: f32,
    initialized: bool,
}

impl Default for Camera {
    fn default() -> Self {
        Self::new()
    }
}

impl Camera {
    /// Create a camera with default settings: 100x100 image, 50 samples per
    /// pixel, 50 bounces, 90 degree FOV, no defocus blur.
    pub fn new() -> Self {
        Self {
            image_width: 100,
            image_height: 100,
            samples_per_pixel: 50,
            max_depth: 50,
            vfov: 90.0,
            lookfrom: Vec3A::ZERO,
            lookat: Vec3A::new(0.0, 0.0, -1.0),
            vup: Vec3A::new(0.0, 1.0, 0.0),
            aperture: 0.0,
            focus_dist: 10.0,
            shadow_epsilon: 0.001,
            seed: None,
            origin: Vec3A::ZERO,
            horizontal: Vec3A::ZERO,
            vertical: Vec3A::ZERO,
            lower_left_corner: Vec3A::ZERO,
            u: Vec3A::ZERO,
            v: Vec3A::ZERO,
            lens_radius: 0.0,
            initialized: false,
        }
    }

    /// Derive the camera basis and viewport from the public fields.
    ///
    /// Called automatically by [`Camera::render`]; call it directly when
    /// generating rays without rendering.
    pub fn initialize(&mut self) {
        if self.initialized {
            return;
        }

        self.image_height = self.image_height.max(1);
        let aspect_ratio = self.image_width as f32 / self.image_height as f32;

        let theta = self.vfov.to_radians();
        let h = (theta / 2.0).tan();
        let viewport_height = 2.0 * h;
        let viewport_width = viewport_height * aspect_ratio;

        // Orthonormal basis: w points opposite the view direction.
        let w = (self.lookfrom - self.lookat).normalize();
        self.u = self.vup.cross(w).normalize();
        self.v = w.cross(self.u);

        self.origin = self.lookfrom;
        self.horizontal = self.focus_dist * viewport_width * self.u;
        self.vertical = self.focus_dist * viewport_height * self.v;
        self.lower_left_corner =
            self.origin - self.horizontal / 2.0 - self.vertical / 2.0 - self.focus_dist * w;

        self.lens_radius = self.aperture / 2.0;
        self.initialized = true;
    }

    /// Generate a ray through viewport-normalized coordinates (s, t).
    ///
    /// s runs left to right, t bottom to top, both in [0, 1]. When the
    /// aperture is non-zero the origin is jittered on the lens disk, blurring
    /// everything off the focus plane.
    pub fn get_ray(&self, s: f32, t: f32) -> Ray {
        let rd = self.lens_radius * random::random_in_unit_disk();
        let offset = self.u * rd.x + self.v * rd.y;

        Ray::new(
            self.origin + offset,
            self.lower_left_corner + s * self.horizontal + t * self.vertical
                - self.origin
                - offset,
        )
    }

    /// Render the scene, returning a linear f32 RGB image buffer.
    ///
    /// Pixels are produced in scan order (top row first); within each pixel
    /// the sample budget is split into one contiguous partition per worker
    /// thread, each partition accumulating an independent partial sum. The
    /// parallel fold is the rendezvous: a pixel is stored only after every
    /// partition has reported.
    pub fn render(&mut self, world: &dyn Hittable) -> ImageBuffer<Rgb<f32>, Vec<f32>> {
        self.initialize();

        let workers = rayon::current_num_threads();
        let partitions = sample_partitions(self.samples_per_pixel, workers);
        let pixel_samples_scale = 1.0 / self.samples_per_pixel as f32;

        info!(
            "Rendering {}x{} at {} spp across {} workers...",
            self.image_width, self.image_height, self.samples_per_pixel, workers
        );
        let generation_start = std::time::Instant::now();
        let pb = ProgressBar::new(self.image_height as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{bar:40} {pos}/{len} ETA: {eta}")
                .expect("static progress template"),
        );

        let mut image: ImageBuffer<Rgb<f32>, Vec<f32>> =
            ImageBuffer::new(self.image_width, self.image_height);

        // j counts rows from the bottom of the viewport; the image is
        // written top row first.
        for j in (0..self.image_height).rev() {
            for i in 0..self.image_width {
                let pixel_index = ((self.image_height - 1 - j) * self.image_width + i) as u64;

                let pixel_color: Color = partitions
                    .par_iter()
                    .enumerate()
                    .map(|(k, partition)| {
                        if let Some(seed) = self.seed {
                            random::reseed(partition_seed(seed, pixel_index, k as u64));
                        }
                        self.sample_pixel(world, i, j, partition.clone())
                    })
                    .sum();

                image.put_pixel(
                    i,
                    self.image_height - 1 - j,
                    Rgb((pixel_color * pixel_samples_scale).into()),
                );
            }
            pb.inc(1);
        }

        pb.finish();
        info!("Image generated in {:.2?}", generation_start.elapsed());

        image
    }

    /// Accumulate one partition's worth of jittered samples for pixel (i, j).
    fn sample_pixel(&self, world: &dyn Hittable, i: u32, j: u32, partition: Range<u32>) -> Color {
        let mut acc = Color::ZERO;
        for _ in partition {
            let s = (i as f32 + random::random_f32()) / (self.image_width - 1) as f32;
            let t = (j as f32 + random::random_f32()) / (self.image_height - 1) as f32;
            let r = self.get_ray(s, t);
            acc += ray_color(&r, world, self.max_depth, self.shadow_epsilon);
        }
        acc
    }
}

/// Split a sample budget into contiguous per-worker ranges.
///
/// Remainder samples are handed out one per partition from the front, so no
/// samples are dropped when the budget does not divide evenly.
fn sample_partitions(total: u32, workers: usize) -> Vec<Range<u32>> {
    let workers = (workers as u32).clamp(1, total.max(1));
    let base = total / workers;
    let remainder = total % workers;

    let mut partitions = Vec::with_capacity(workers as usize);
    let mut start = 0;
    for k in 0..workers {
        let len = base + u32::from(k < remainder);
        partitions.push(start..start + len);
        start += len;
    }
    partitions
}

/// Mix a render seed with pixel and partition indices (SplitMix64 finalizer).
///
/// Gives every partition of every pixel its own generator stream,
/// independent of which worker thread executes it.
fn partition_seed(seed: u64, pixel_index: u64, partition: u64) -> u64 {
    let mut x = seed
        ^ pixel_index.wrapping_mul(0x9E37_79B9_7F4A_7C15)
        ^ partition.wrapping_mul(0xBF58_476D_1CE4_E5B9);
    x = (x ^ (x >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    x = (x ^ (x >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    x ^ (x >> 31)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hittable::HittableList;
    use crate::material::MaterialType;
    use crate::sphere::Sphere;

    #[test]
    fn exhausted_depth_budget_is_black() {
        let mut world = HittableList::new();
        world.add(Box::new(Sphere::new(
            Vec3A::new(0.0, 0.0, -1.0),
            0.5,
            MaterialType::Lambertian {
                albedo: Vec3A::splat(0.5),
            },
        )));
        let r = Ray::new(Vec3A::ZERO, Vec3A::new(0.0, 0.0, -1.0));
        assert_eq!(ray_color(&r, &world, 0, 0.001), Vec3A::ZERO);
    }

    #[test]
    fn escaped_rays_sample_the_sky_gradient() {
        let world = HittableList::new();

        let up = Ray::new(Vec3A::ZERO, Vec3A::new(0.0, 1.0, 0.0));
        assert!((ray_color(&up, &world, 50, 0.001) - Vec3A::new(0.5, 0.7, 1.0)).length() < 1e-6);

        let down = Ray::new(Vec3A::ZERO, Vec3A::new(0.0, -1.0, 0.0));
        assert!((ray_color(&down, &world, 50, 0.001) - Vec3A::ONE).length() < 1e-6);

        // Any other direction interpolates strictly between the endpoints.
        let slanted = Ray::new(Vec3A::ZERO, Vec3A::new(1.0, 0.5, 0.0));
        let c = ray_color(&slanted, &world, 50, 0.001);
        let a = 0.5 * (slanted.direction.y + 1.0);
        let expected = (1.0 - a) * Vec3A::ONE + a * Vec3A::new(0.5, 0.7, 1.0);
        assert!((c - expected).length() < 1e-6);
        assert!(c.x < 1.0 && c.x > 0.5);
    }

    #[test]
    fn center_ray_aims_at_the_look_target() {
        let mut camera = Camera::new();
        camera.lookfrom = Vec3A::new(0.0, 0.0, 2.0);
        camera.lookat = Vec3A::new(0.0, 0.0, -1.0);
        camera.initialize();

        let r = camera.get_ray(0.5, 0.5);
        assert!((r.origin - camera.lookfrom).length() < 1e-6);
        assert!((r.direction - Vec3A::new(0.0, 0.0, -1.0)).length() < 1e-5);
    }

    #[test]
    fn partitions_cover_the_budget_without_loss() {
        for (total, workers) in [(500u32, 8usize), (7, 3), (16, 16), (5, 8), (1, 4)] {
            let parts = sample_partitions(total, workers);
            let sum: u32 = parts.iter().map(|r| r.end - r.start).sum();
            assert_eq!(sum, total, "total={total} workers={workers}");

            // Contiguous, and balanced to within one sample.
            let mut expected_start = 0;
            let mut lens = Vec::new();
            for p in &parts {
                assert_eq!(p.start, expected_start);
                expected_start = p.end;
                lens.push(p.end - p.start);
            }
            let min = lens.iter().min().unwrap();
            let max = lens.iter().max().unwrap();
            assert!(max - min <= 1);
        }
    }

    #[test]
    fn partition_seeds_differ_per_pixel_and_partition() {
        let a = partition_seed(7, 0, 0);
        let b = partition_seed(7, 1, 0);
        let c = partition_seed(7, 0, 1);
        assert_ne!(a, b);
        assert_ne!(a, c);
        assert_ne!(b, c);
        assert_eq!(a, partition_seed(7, 0, 0));
    }
}
