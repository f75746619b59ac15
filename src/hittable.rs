//! Ray-object intersection system.
//!
//! Defines the [`Hittable`] trait implemented by geometric primitives and the
//! [`HitRecord`] describing a single intersection. A scene is a
//! [`HittableList`], which resolves the nearest hit by linear scan.

use crate::interval::Interval;
use crate::material::MaterialType;
use crate::ray::Ray;
use glam::Vec3A;

/// Ray-object intersection information.
#[derive(Debug, Clone, Copy)]
pub struct HitRecord {
    /// Point where the ray intersects the object.
    pub p: Vec3A,
    /// Surface normal at the intersection point, unit length, always
    /// oriented against the incident ray.
    pub normal: Vec3A,
    /// Distance along the ray to the intersection point.
    pub t: f32,
    /// True if the ray hit the front face, false for the back face.
    pub front_face: bool,
    /// Material of the object at the hit point.
    pub material: MaterialType,
}

impl HitRecord {
    /// Build a hit record from the geometric outward normal.
    ///
    /// Records whether the outward normal already pointed against the ray
    /// (front face) and flips it otherwise, so shading code never has to.
    pub fn new(
        r: &Ray,
        t: f32,
        p: Vec3A,
        outward_normal: Vec3A,
        material: MaterialType,
    ) -> Self {
        let front_face = r.direction.dot(outward_normal) < 0.0;
        let normal = if front_face {
            outward_normal
        } else {
            -outward_normal
        };
        Self {
            p,
            normal,
            t,
            front_face,
            material,
        }
    }
}

/// Trait for objects that can be intersected by rays.
///
/// Implementors must be thread-safe: the scene is shared read-only across
/// all rendering workers.
pub trait Hittable: Sync + Send {
    /// Test for the nearest ray intersection with `t` strictly inside
    /// `ray_t`, or `None` when the ray misses.
    fn hit(&self, r: &Ray, ray_t: Interval) -> Option<HitRecord>;
}

/// Collection of objects forming a scene.
///
/// Intersection is a brute-force linear scan that keeps the closest accepted
/// hit; ties go to the earlier object since the acceptance window shrinks
/// strictly.
#[derive(Default)]
pub struct HittableList {
    objects: Vec<Box<dyn Hittable>>,
}

impl HittableList {
    /// Create a new empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an object to the scene.
    pub fn add(&mut self, object: Box<dyn Hittable>) {
        self.objects.push(object);
    }

    /// Number of objects in the scene.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Whether the scene contains no objects.
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

impl Hittable for HittableList {
    fn hit(&self, r: &Ray, ray_t: Interval) -> Option<HitRecord> {
        let mut closest: Option<HitRecord> = None;
        let mut window = ray_t;

        for object in &self.objects {
            if let Some(rec) = object.hit(r, window) {
                window.max = rec.t;
                closest = Some(rec);
            }
        }

        closest
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sphere::Sphere;

    fn lambertian() -> MaterialType {
        MaterialType::Lambertian {
            albedo: Vec3A::splat(0.5),
        }
    }

    #[test]
    fn nearest_hit_wins_regardless_of_insertion_order() {
        let near = Sphere::new(Vec3A::new(0.0, 0.0, -2.0), 0.5, lambertian());
        let far = Sphere::new(Vec3A::new(0.0, 0.0, -10.0), 0.5, lambertian());
        let ray = Ray::new(Vec3A::ZERO, Vec3A::new(0.0, 0.0, -1.0));

        for (a, b) in [(near.clone(), far.clone()), (far, near)] {
            let mut world = HittableList::new();
            world.add(Box::new(a));
            world.add(Box::new(b));

            let rec = world
                .hit(&ray, Interval::new(0.001, f32::INFINITY))
                .expect("ray through both spheres must hit");
            assert!((rec.t - 1.5).abs() < 1e-4);
        }
    }

    #[test]
    fn empty_list_never_hits() {
        let world = HittableList::new();
        let ray = Ray::new(Vec3A::ZERO, Vec3A::new(0.0, 0.0, -1.0));
        assert!(world.hit(&ray, Interval::UNIVERSE).is_none());
        assert!(world.is_empty());
    }

    #[test]
    fn front_face_normal_points_against_the_ray() {
        let sphere = Sphere::new(Vec3A::new(0.0, 0.0, -2.0), 0.5, lambertian());
        let ray = Ray::new(Vec3A::ZERO, Vec3A::new(0.0, 0.0, -1.0));
        let rec = sphere
            .hit(&ray, Interval::new(0.001, f32::INFINITY))
            .unwrap();
        assert!(rec.front_face);
        assert!(rec.normal.dot(ray.direction) < 0.0);
        assert!((rec.normal.length() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn back_face_hit_from_inside_flips_the_normal() {
        // Ray starts at the center, so the first intersection is the inside
        // of the shell.
        let sphere = Sphere::new(Vec3A::new(0.0, 0.0, -2.0), 0.5, lambertian());
        let ray = Ray::new(Vec3A::new(0.0, 0.0, -2.0), Vec3A::new(0.0, 0.0, -1.0));
        let rec = sphere
            .hit(&ray, Interval::new(0.001, f32::INFINITY))
            .unwrap();
        assert!(!rec.front_face);
        assert!(rec.normal.dot(ray.direction) < 0.0);
    }
}
