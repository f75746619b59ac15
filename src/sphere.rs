//! Sphere primitive for ray tracing.
//!
//! Analytic ray-sphere intersection via the half-b form of the quadratic
//! formula.

use crate::hittable::{HitRecord, Hittable};
use crate::interval::Interval;
use crate::material::MaterialType;
use crate::ray::Ray;
use glam::Vec3A;

/// Sphere defined by center, radius, and material.
#[derive(Debug, Clone)]
pub struct Sphere {
    /// Center point of the sphere in world coordinates.
    pub center: Vec3A,
    /// Radius of the sphere; negative values are clamped to 0.0 at
    /// construction.
    pub radius: f32,
    /// Material at every point of the surface.
    pub material: MaterialType,
}

impl Sphere {
    /// Create a new sphere.
    pub fn new(center: Vec3A, radius: f32, material: MaterialType) -> Self {
        Self {
            center,
            radius: radius.max(0.0),
            material,
        }
    }
}

impl Hittable for Sphere {
    fn hit(&self, r: &Ray, ray_t: Interval) -> Option<HitRecord> {
        let oc = self.center - r.origin;
        let a = r.direction.length_squared();
        let h = r.direction.dot(oc);
        let c = oc.length_squared() - self.radius * self.radius;

        let discriminant = h * h - a * c;
        if discriminant < 0.0 {
            return None;
        }
        let sqrtd = discriminant.sqrt();

        // Prefer the nearer root, fall back to the farther one when the
        // nearer lies outside the acceptance window (ray origin inside the
        // sphere, or occluded by a closer hit).
        let mut root = (h - sqrtd) / a;
        if !ray_t.surrounds(root) {
            root = (h + sqrtd) / a;
            if !ray_t.surrounds(root) {
                return None;
            }
        }

        let p = r.at(root);
        let outward_normal = (p - self.center) / self.radius;
        Some(HitRecord::new(r, root, p, outward_normal, self.material))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_sphere_at(z: f32) -> Sphere {
        Sphere::new(
            Vec3A::new(0.0, 0.0, z),
            0.5,
            MaterialType::Lambertian {
                albedo: Vec3A::splat(0.5),
            },
        )
    }

    #[test]
    fn head_on_hit_at_distance_minus_radius() {
        let sphere = unit_sphere_at(-3.0);
        let ray = Ray::new(Vec3A::ZERO, Vec3A::new(0.0, 0.0, -1.0));
        let rec = sphere
            .hit(&ray, Interval::new(0.001, f32::INFINITY))
            .expect("head-on ray must hit");
        assert!((rec.t - 2.5).abs() < 1e-4);
        assert!((rec.normal - Vec3A::new(0.0, 0.0, 1.0)).length() < 1e-4);
    }

    #[test]
    fn offset_greater_than_radius_misses() {
        let sphere = unit_sphere_at(-3.0);
        let ray = Ray::new(Vec3A::new(0.6, 0.0, 0.0), Vec3A::new(0.0, 0.0, -1.0));
        assert!(sphere.hit(&ray, Interval::UNIVERSE).is_none());
    }

    #[test]
    fn tangent_hit_normal_is_perpendicular_to_ray() {
        let sphere = unit_sphere_at(-3.0);
        let ray = Ray::new(Vec3A::new(0.5, 0.0, 0.0), Vec3A::new(0.0, 0.0, -1.0));
        if let Some(rec) = sphere.hit(&ray, Interval::new(0.001, f32::INFINITY)) {
            // Grazing geometry: the normal lies in the plane perpendicular
            // to the ray.
            assert!(rec.normal.dot(ray.direction).abs() < 1e-3);
        }
    }

    #[test]
    fn hit_behind_the_origin_is_rejected() {
        let sphere = unit_sphere_at(3.0);
        let ray = Ray::new(Vec3A::ZERO, Vec3A::new(0.0, 0.0, -1.0));
        assert!(sphere
            .hit(&ray, Interval::new(0.001, f32::INFINITY))
            .is_none());
    }

    #[test]
    fn shrunken_window_rejects_the_near_root() {
        let sphere = unit_sphere_at(-3.0);
        let ray = Ray::new(Vec3A::ZERO, Vec3A::new(0.0, 0.0, -1.0));
        // Window ends before the sphere's near surface at t = 2.5.
        assert!(sphere.hit(&ray, Interval::new(0.001, 2.0)).is_none());
    }

    #[test]
    fn negative_radius_is_clamped() {
        let sphere = Sphere::new(
            Vec3A::ZERO,
            -1.0,
            MaterialType::Dielectric {
                refraction_index: 1.5,
            },
        );
        assert_eq!(sphere.radius, 0.0);
    }
}
