//! PrismPath path tracer
//!
//! An offline CPU path tracer: a static scene of spheres, quads and
//! participating media is sampled by a Monte-Carlo radiance estimator,
//! in parallel over pixels, into an HDR buffer written out as PNG or EXR.

#![warn(missing_docs)]
#![warn(rustdoc::broken_intra_doc_links)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod camera;
pub mod cli;
pub mod hittable;
pub mod interval;
pub mod logger;
pub mod material;
pub mod medium;
pub mod output;
pub mod quad;
pub mod random;
pub mod ray;
pub mod sphere;
pub mod texture;
