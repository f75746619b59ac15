//! Material system for ray tracing.
//!
//! Implements the three scattering models — Lambertian (diffuse), Metal
//! (specular with fuzz), and Dielectric (transparent) — together with the
//! reflection and refraction formulas they are built on.

use crate::hittable::HitRecord;
use crate::random;
use crate::ray::Ray;
use glam::Vec3A;

/// RGB color type.
pub type Color = Vec3A;

/// Threshold below which every component of a scatter direction counts as
/// zero. Directions this short cannot be normalized meaningfully, so the
/// diffuse model substitutes the surface normal instead.
pub const NEAR_ZERO_EPS: f32 = 1e-8;

/// Material kinds as a plain value enum.
///
/// Materials are small `Copy` values; spheres store them by value, and many
/// spheres may carry the same constant. All state is immutable.
#[derive(Debug, Clone, Copy)]
pub enum MaterialType {
    /// Lambertian diffuse material for matte surfaces.
    Lambertian {
        /// Surface color/reflectance.
        albedo: Color,
    },
    /// Metallic material with mirror reflection.
    Metal {
        /// Metal tint.
        albedo: Color,
        /// Reflection roughness (0.0 = mirror, 1.0 = fully fuzzed).
        fuzz: f32,
    },
    /// Dielectric (transparent) material with refraction.
    Dielectric {
        /// Index of refraction (1.0 = air, 1.5 = glass).
        refraction_index: f32,
    },
}

impl MaterialType {
    /// Decide how an incoming ray continues after hitting a surface.
    ///
    /// Returns the attenuation color and the scattered ray, or `None` when
    /// the ray is absorbed.
    pub fn scatter(&self, r_in: &Ray, rec: &HitRecord) -> Option<(Color, Ray)> {
        match *self {
            MaterialType::Lambertian { albedo } => scatter_lambertian(albedo, rec),
            MaterialType::Metal { albedo, fuzz } => scatter_metal(albedo, fuzz, r_in, rec),
            MaterialType::Dielectric { refraction_index } => {
                scatter_dielectric(refraction_index, r_in, rec)
            }
        }
    }
}

/// Lambertian scattering: bounce about the normal, weighted towards it by a
/// uniform unit-sphere sample. Never absorbs.
fn scatter_lambertian(albedo: Color, rec: &HitRecord) -> Option<(Color, Ray)> {
    let mut scatter_direction = rec.normal + random::random_unit_vector();

    // The sphere sample can land opposite the normal and cancel it out,
    // leaving a direction too short to normalize. Scatter along the bare
    // normal in that case.
    if near_zero(scatter_direction) {
        scatter_direction = rec.normal;
    }

    Some((albedo, Ray::new(rec.p, scatter_direction)))
}

/// Metallic scattering: mirror reflection perturbed by a fuzzed ball sample.
/// Absorbs when the perturbation pushes the ray into the surface.
fn scatter_metal(albedo: Color, fuzz: f32, r_in: &Ray, rec: &HitRecord) -> Option<(Color, Ray)> {
    let reflected = reflect(r_in.direction, rec.normal)
        + fuzz.min(1.0) * random::random_in_unit_sphere();

    if reflected.dot(rec.normal) > 0.0 {
        Some((albedo, Ray::new(rec.p, reflected)))
    } else {
        None
    }
}

/// Dielectric scattering: refract when Snell's law allows it and a Schlick
/// reflectance draw passes, reflect otherwise. Never absorbs and never
/// tints.
fn scatter_dielectric(
    refraction_index: f32,
    r_in: &Ray,
    rec: &HitRecord,
) -> Option<(Color, Ray)> {
    let ri = if rec.front_face {
        1.0 / refraction_index
    } else {
        refraction_index
    };

    let cos_theta = (-r_in.direction).dot(rec.normal).min(1.0);
    let sin_theta = (1.0 - cos_theta * cos_theta).sqrt();

    let cannot_refract = ri * sin_theta > 1.0;
    let direction = if cannot_refract || reflectance(cos_theta, ri) > random::random_f32() {
        reflect(r_in.direction, rec.normal)
    } else {
        refract(r_in.direction, rec.normal, ri)
    };

    Some((Color::ONE, Ray::new(rec.p, direction)))
}

/// Whether all components of a vector are below [`NEAR_ZERO_EPS`] in
/// absolute value.
pub fn near_zero(v: Vec3A) -> bool {
    v.x.abs() < NEAR_ZERO_EPS && v.y.abs() < NEAR_ZERO_EPS && v.z.abs() < NEAR_ZERO_EPS
}

/// Reflect a vector off a surface with unit normal `n`.
pub fn reflect(v: Vec3A, n: Vec3A) -> Vec3A {
    v - 2.0 * v.dot(n) * n
}

/// Refract a unit vector through an interface using Snell's law in vector
/// form. `etai_over_etat` is the ratio of refractive indices across the
/// interface. `cos_theta` is clamped and the radicand passed through `abs()`
/// so floating round-off cannot produce NaN.
pub fn refract(uv: Vec3A, n: Vec3A, etai_over_etat: f32) -> Vec3A {
    let cos_theta = (-uv).dot(n).min(1.0);
    let r_out_perp = etai_over_etat * (uv + cos_theta * n);
    let r_out_parallel = -(1.0 - r_out_perp.length_squared()).abs().sqrt() * n;
    r_out_perp + r_out_parallel
}

/// Schlick's approximation of the angle-dependent reflection probability of
/// a dielectric.
fn reflectance(cosine: f32, refraction_index: f32) -> f32 {
    let r0 = (1.0 - refraction_index) / (1.0 + refraction_index);
    let r0 = r0 * r0;
    r0 + (1.0 - r0) * (1.0 - cosine).powi(5)
}
