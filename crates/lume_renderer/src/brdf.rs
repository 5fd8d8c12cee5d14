//! GGX microfacet BRDF evaluation.
//!
//! Metallic-roughness model: a GGX (Trowbridge-Reitz) specular lobe with
//! Schlick Fresnel and height-correlated Smith visibility, plus a Lambertian
//! diffuse lobe scaled by the transmitted, non-metallic fraction.

use std::f32::consts::{FRAC_1_PI, PI};

use lume_core::Material;
use lume_math::Vec3;

/// Epsilon added to denominators so grazing angles stay finite.
const DENOM_EPS: f32 = 1e-7;

/// Base reflectance of a dielectric at normal incidence.
const DIELECTRIC_F0: f32 = 0.04;

/// GGX normal distribution, `alpha = roughness^2`.
#[inline]
pub fn ggx_distribution(no_h: f32, roughness: f32) -> f32 {
    let alpha = roughness * roughness;
    let alpha2 = alpha * alpha;
    let d = no_h * no_h * (alpha2 - 1.0) + 1.0;
    alpha2 / (PI * d * d + DENOM_EPS)
}

/// Schlick's approximation to the Fresnel reflectance.
#[inline]
pub fn fresnel_schlick(lo_h: f32, f0: Vec3) -> Vec3 {
    let w = (1.0 - lo_h).clamp(0.0, 1.0).powi(5);
    f0 + (Vec3::ONE - f0) * w
}

/// Height-correlated Smith visibility.
///
/// Folds the `4 * NoV * NoL` denominator of the microfacet model, so the
/// specular lobe is just `D * V * F` - do not divide again.
#[inline]
pub fn smith_visibility(no_v: f32, no_l: f32, roughness: f32) -> f32 {
    let alpha = roughness * roughness;
    let a2 = alpha * alpha;
    let lambda_v = no_l * ((-no_v * a2 + no_v) * no_v + a2).sqrt();
    let lambda_l = no_v * ((-no_l * a2 + no_l) * no_l + a2).sqrt();
    0.5 / (lambda_v + lambda_l + DENOM_EPS)
}

/// Fresnel reflectance at normal incidence for a material.
#[inline]
fn base_reflectance(material: &Material) -> Vec3 {
    Vec3::splat(DIELECTRIC_F0).lerp(material.diffuse, material.metallic)
}

/// Evaluate the BRDF for unit `light`, `view` and `normal` directions, all
/// pointing away from the surface.
///
/// Returns the reflectance weight; the caller multiplies by incident
/// radiance and `NoL` to get the shading contribution.
pub fn eval_brdf(material: &Material, light: Vec3, view: Vec3, normal: Vec3) -> Vec3 {
    let half = light + view;
    if half.length_squared() < DENOM_EPS {
        // view exactly opposite light; no meaningful half-vector
        return Vec3::ZERO;
    }
    let half = half.normalize();

    // NoV is kept strictly positive; the other cosines clamp to [0,1]
    let no_v = normal.dot(view).abs() + 1e-5;
    let no_l = normal.dot(light).clamp(0.0, 1.0);
    let no_h = normal.dot(half).clamp(0.0, 1.0);
    let lo_h = light.dot(half).clamp(0.0, 1.0);

    let d = ggx_distribution(no_h, material.roughness);
    let v = smith_visibility(no_v, no_l, material.roughness);
    let f = fresnel_schlick(lo_h, base_reflectance(material));

    let specular = d * v * f;

    // Energy compensation: only the non-reflected, non-metallic fraction
    // contributes diffusely
    let diffuse = material.diffuse * FRAC_1_PI * (Vec3::ONE - f) * (1.0 - material.metallic);

    diffuse + specular
}
