//! Lume renderer - CPU Monte Carlo direct lighting.
//!
//! Estimates outgoing radiance at visible surface points by sampling a GGX
//! microfacet BRDF and a sphere area light, then tone-maps the accumulated
//! radiance into displayable pixel color:
//! - Ray/sphere intersection with deterministic nearest-hit selection
//! - GGX microfacet BRDF (evaluation, importance sampling, PDF)
//! - Light-surface and uniform-hemisphere sampling with solid-angle PDFs
//! - Bucketed, rayon-parallel render loop with per-bucket RNG streams

mod brdf;
mod bucket;
mod camera;
mod integrator;
mod intersect;
mod light;
mod renderer;
mod sampling;
mod tonemap;

pub use brdf::{eval_brdf, fresnel_schlick, ggx_distribution, smith_visibility};
pub use bucket::{generate_buckets, render_bucket, Bucket, BucketResult, DEFAULT_BUCKET_SIZE};
pub use camera::Camera;
pub use integrator::{shade, RenderConfig, SamplingStrategy};
pub use intersect::{closest_hit, intersect_sphere, Intersection, HIT_OFFSET};
pub use light::{sample_light_surface, LightSample};
pub use renderer::{render, render_pixel, Framebuffer};
pub use sampling::{
    gen_f32, sample_ggx, sample_uniform_hemisphere, GgxSample, PDF_EPS, UNIFORM_HEMISPHERE_PDF,
};
pub use tonemap::{exposure_from_ev100, ToneMap};

/// Re-export math and scene types used in this crate's public API
pub use lume_core::{Material, Scene, Sphere, SphereLight};
pub use lume_math::{Ray, Vec3};

/// Color type alias (RGB values typically 0-1)
pub type Color = Vec3;
