//! Direction sampling for the Monte Carlo estimator.
//!
//! Both samplers return the sampled direction together with its PDF so the
//! estimator can divide the contribution through. A sample that cannot
//! contribute (below the horizon, degenerate PDF) is `None`; callers count
//! it as a zero-contribution sample rather than drawing again, which keeps
//! the estimator unbiased.

use std::f32::consts::PI;

use lume_math::{build_orthonormal_basis, reflect, Vec3};
use rand::RngCore;

/// PDFs at or below this are treated as degenerate.
pub const PDF_EPS: f32 = 1e-6;

/// Constant PDF of uniform hemisphere sampling, `1 / (2*pi)`.
pub const UNIFORM_HEMISPHERE_PDF: f32 = 1.0 / (2.0 * PI);

/// Uniform float in [0, 1) from the top 24 bits of the generator output.
#[inline]
pub fn gen_f32(rng: &mut dyn RngCore) -> f32 {
    (rng.next_u32() >> 8) as f32 / (1u32 << 24) as f32
}

/// A light direction drawn from the GGX distribution, with its PDF.
#[derive(Clone, Copy, Debug)]
pub struct GgxSample {
    pub direction: Vec3,
    pub pdf: f32,
}

/// Sample a light direction by drawing a microfacet half-vector from the
/// GGX distribution and reflecting the view direction about it.
///
/// `u1`, `u2` are uniform in [0, 1). The returned PDF is over solid angle,
/// `D(h) * NoH / (4 * VoH)`. Returns `None` when the reflected direction
/// falls below the horizon or the PDF degenerates.
pub fn sample_ggx(u1: f32, u2: f32, view: Vec3, normal: Vec3, roughness: f32) -> Option<GgxSample> {
    let alpha = roughness * roughness;
    let alpha2 = alpha * alpha;

    // Inverse-CDF sample of the GGX NDF in the normal's tangent frame
    let cos_theta = ((1.0 - u1) / (1.0 + (alpha2 - 1.0) * u1)).max(0.0).sqrt();
    let sin_theta = (1.0 - cos_theta * cos_theta).max(0.0).sqrt();
    let phi = 2.0 * PI * u2;

    let (tangent, bitangent) = build_orthonormal_basis(normal);
    let half = tangent * (sin_theta * phi.cos())
        + bitangent * (sin_theta * phi.sin())
        + normal * cos_theta;

    let direction = reflect(-view, half);
    if normal.dot(direction) <= 0.0 {
        return None;
    }

    let no_h = normal.dot(half).clamp(0.0, 1.0);
    let vo_h = view.dot(half).max(0.0);
    let pdf = crate::ggx_distribution(no_h, roughness) * no_h / (4.0 * vo_h + PDF_EPS);
    if pdf <= PDF_EPS {
        return None;
    }

    Some(GgxSample { direction, pdf })
}

/// Sample a direction uniformly over the hemisphere around `normal`.
///
/// The PDF is the constant [`UNIFORM_HEMISPHERE_PDF`].
pub fn sample_uniform_hemisphere(u1: f32, u2: f32, normal: Vec3) -> Vec3 {
    let cos_theta = u1;
    let sin_theta = (1.0 - cos_theta * cos_theta).max(0.0).sqrt();
    let phi = 2.0 * PI * u2;

    let (tangent, bitangent) = build_orthonormal_basis(normal);
    tangent * (sin_theta * phi.cos()) + bitangent * (sin_theta * phi.sin()) + normal * cos_theta
}

#[cfg(test)]
mod tests {
    use super::*;
    use lume_core::Material;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_gen_f32_in_unit_interval() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..10_000 {
            let x = gen_f32(&mut rng);
            assert!((0.0..1.0).contains(&x));
        }
    }

    #[test]
    fn test_uniform_hemisphere_stays_above_horizon() {
        let mut rng = StdRng::seed_from_u64(11);
        let normal = Vec3::new(0.3, -0.5, 0.8).normalize();
        for _ in 0..5_000 {
            let d = sample_uniform_hemisphere(gen_f32(&mut rng), gen_f32(&mut rng), normal);
            assert!((d.length() - 1.0).abs() < 1e-4);
            assert!(normal.dot(d) >= 0.0);
        }
    }

    #[test]
    fn test_uniform_hemisphere_cosine_average() {
        // E[NoL] over a uniform hemisphere is 1/2
        let mut rng = StdRng::seed_from_u64(13);
        let normal = Vec3::Y;
        let n = 100_000;
        let mut sum = 0.0f64;
        for _ in 0..n {
            let d = sample_uniform_hemisphere(gen_f32(&mut rng), gen_f32(&mut rng), normal);
            sum += normal.dot(d) as f64;
        }
        let mean = sum / n as f64;
        assert!((mean - 0.5).abs() < 0.01, "mean NoL = {}", mean);
    }

    #[test]
    fn test_ggx_sample_above_horizon_with_valid_pdf() {
        let mut rng = StdRng::seed_from_u64(17);
        let normal = Vec3::Z;
        let view = Vec3::new(0.4, 0.0, 0.9).normalize();
        for _ in 0..5_000 {
            if let Some(s) = sample_ggx(gen_f32(&mut rng), gen_f32(&mut rng), view, normal, 0.5) {
                assert!(normal.dot(s.direction) > 0.0);
                assert!(s.pdf > PDF_EPS);
                assert!((s.direction.length() - 1.0).abs() < 1e-3);
            }
        }
    }

    #[test]
    fn test_ggx_low_roughness_clusters_near_mirror() {
        let mut rng = StdRng::seed_from_u64(19);
        let normal = Vec3::Z;
        let view = Vec3::new(0.3, 0.0, 1.0).normalize();
        let mirror = reflect(-view, normal);
        for _ in 0..2_000 {
            if let Some(s) = sample_ggx(gen_f32(&mut rng), gen_f32(&mut rng), view, normal, 0.02) {
                assert!(
                    mirror.dot(s.direction) > 0.99,
                    "sample far from mirror: {:?}",
                    s.direction
                );
            }
        }
    }

    #[test]
    fn test_ggx_furnace_consistency() {
        // Importance-sampled estimate of the directional albedo of a smooth
        // white metal at normal incidence; should be close to 1.
        let material = Material::new(Vec3::ONE, 1.0, 0.05);
        let normal = Vec3::Z;
        let view = Vec3::Z;

        let mut rng = StdRng::seed_from_u64(23);
        let n = 20_000;
        let mut sum = 0.0f64;
        for _ in 0..n {
            if let Some(s) = sample_ggx(
                gen_f32(&mut rng),
                gen_f32(&mut rng),
                view,
                normal,
                material.roughness,
            ) {
                let brdf = crate::eval_brdf(&material, s.direction, view, normal);
                let no_l = normal.dot(s.direction).max(0.0);
                sum += (brdf.x * no_l / s.pdf) as f64;
            }
        }
        let albedo = sum / n as f64;
        assert!((albedo - 1.0).abs() < 0.05, "albedo = {}", albedo);
    }
}
