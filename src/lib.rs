//! Pathlight — a stochastic (Monte Carlo) path tracer for sphere scenes.
//!
//! For each pixel many randomly-jittered camera rays are traced through the
//! scene, bouncing off Lambertian, metallic and dielectric spheres until the
//! bounce budget runs out or the ray escapes to the sky gradient. Rendering
//! runs on the CPU with per-pixel sample parallelism; output is PPM, PNG or
//! EXR.

#![warn(missing_docs)]
#![warn(rustdoc::broken_intra_doc_links)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod ray;
pub mod sphere;
pub mod hittable;
pub mod interval;
pub mod camera;
pub mod random;
pub mod material;
pub mod output;
