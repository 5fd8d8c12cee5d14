//! Direct-lighting Monte Carlo estimator.
//!
//! At a surface hit the integrator draws N sampled light directions, casts
//! a visibility ray along each, and accumulates `brdf * L * NoL / pdf` for
//! the ones that reach the light. No indirect bounces: incident radiance
//! comes only from the light's sphere.

use lume_core::{Material, Scene};
use lume_math::{Ray, Vec3};
use rand::RngCore;

use crate::intersect::{closest_hit, Intersection};
use crate::light::sample_light_surface;
use crate::sampling::{
    gen_f32, sample_ggx, sample_uniform_hemisphere, PDF_EPS, UNIFORM_HEMISPHERE_PDF,
};
use crate::tonemap::ToneMap;

/// How sampled light directions are drawn at each shading point.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SamplingStrategy {
    /// Importance-sample the GGX lobe; good for glossy surfaces.
    GgxImportance,
    /// Sample points on the light's surface; good for small lights.
    LightSurface,
    /// Uniform hemisphere; the reference baseline.
    UniformHemisphere,
}

/// Everything the render loop needs besides the scene itself.
#[derive(Clone, Copy, Debug)]
pub struct RenderConfig {
    pub width: u32,
    pub height: u32,
    pub samples_per_pixel: u32,
    pub strategy: SamplingStrategy,
    pub tone_map: ToneMap,
    /// Exposure value at ISO 100; scales radiance before tone mapping.
    pub ev100: f32,
    /// Base seed for the per-bucket RNG streams.
    pub seed: u64,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 512,
            height: 512,
            samples_per_pixel: 64,
            strategy: SamplingStrategy::LightSurface,
            tone_map: ToneMap::Reinhard,
            ev100: 1.0,
            seed: 0,
        }
    }
}

/// Radiance reaching `point` from `direction`, or zero if the light is not
/// the first thing the visibility ray meets.
fn incident_radiance(point: Vec3, direction: Vec3, scene: &Scene) -> Vec3 {
    match closest_hit(&Ray::new(point, direction), scene) {
        Intersection::Light { radiance, .. } => radiance,
        _ => Vec3::ZERO,
    }
}

/// One sampled direction's contribution to the estimator.
fn sample_direct(
    point: Vec3,
    normal: Vec3,
    material: &Material,
    view: Vec3,
    scene: &Scene,
    strategy: SamplingStrategy,
    rng: &mut dyn RngCore,
) -> Vec3 {
    let u1 = gen_f32(rng);
    let u2 = gen_f32(rng);

    let (direction, pdf) = match strategy {
        SamplingStrategy::GgxImportance => {
            match sample_ggx(u1, u2, view, normal, material.roughness) {
                Some(s) => (s.direction, s.pdf),
                None => return Vec3::ZERO,
            }
        }
        SamplingStrategy::LightSurface => {
            match sample_light_surface(u1, u2, point, &scene.light) {
                Some(s) => (s.direction, s.pdf),
                None => return Vec3::ZERO,
            }
        }
        SamplingStrategy::UniformHemisphere => (
            sample_uniform_hemisphere(u1, u2, normal),
            UNIFORM_HEMISPHERE_PDF,
        ),
    };

    let no_l = normal.dot(direction);
    if no_l <= 0.0 {
        return Vec3::ZERO;
    }

    let radiance = incident_radiance(point, direction, scene);
    if radiance == Vec3::ZERO {
        return Vec3::ZERO;
    }

    let brdf = crate::brdf::eval_brdf(material, direction, view, normal);
    brdf * radiance * no_l / pdf.max(PDF_EPS)
}

/// Estimate outgoing radiance at a surface hit.
///
/// Averages `samples_per_pixel` single-sample estimates; rejected samples
/// still count toward the average, which keeps the estimator unbiased.
pub fn shade(
    point: Vec3,
    normal: Vec3,
    material: &Material,
    view: Vec3,
    scene: &Scene,
    config: &RenderConfig,
    rng: &mut dyn RngCore,
) -> Vec3 {
    let n = config.samples_per_pixel.max(1);
    let mut sum = Vec3::ZERO;
    for _ in 0..n {
        sum += sample_direct(point, normal, material, view, scene, config.strategy, rng);
    }
    sum / n as f32
}
