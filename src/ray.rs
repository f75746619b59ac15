//! Ray representation for 3D ray tracing.
//!
//! A ray is the semi-infinite line r(t) = origin + t * direction, used for
//! camera rays and scattered bounce rays alike.

use glam::Vec3A;

/// Ray in 3D space defined by origin and direction.
///
/// The direction is normalized at construction, so the parameter `t` measures
/// world-space distance along the ray.
#[derive(Debug, Clone, Copy)]
pub struct Ray {
    /// Starting point of the ray in world coordinates.
    pub origin: Vec3A,
    /// Unit direction vector of the ray.
    ///
    /// Constructing a ray from a zero-length direction is a caller error and
    /// yields non-finite components; scatter code guards against this with
    /// the near-zero check before building a ray.
    pub direction: Vec3A,
}

impl Ray {
    /// Create a new ray, normalizing the direction.
    pub fn new(origin: Vec3A, direction: Vec3A) -> Self {
        Self {
            origin,
            direction: direction.normalize(),
        }
    }

    /// Compute the point at parameter t along the ray.
    pub fn at(&self, t: f32) -> Vec3A {
        self.origin + t * self.direction
    }
}
