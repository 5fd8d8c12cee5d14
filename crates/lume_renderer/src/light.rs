//! Sphere-light sampling.

use std::f32::consts::PI;

use lume_core::SphereLight;
use lume_math::Vec3;

use crate::sampling::PDF_EPS;

/// A point on the light, seen from a shading point.
#[derive(Clone, Copy, Debug)]
pub struct LightSample {
    /// Unit direction from the shading point toward the sampled point.
    pub direction: Vec3,
    /// Sampled point on the light surface.
    pub point: Vec3,
    /// PDF over solid angle at the shading point.
    pub pdf: f32,
}

/// Sample a point uniformly on the light's surface and convert its area
/// PDF to a solid-angle PDF at `shading_point`.
///
/// `u1`, `u2` are uniform in [0, 1). The area-to-solid-angle Jacobian is
/// `distance^2 / cos(theta_light)`, where `theta_light` is measured at the
/// light's surface. Samples on the far side of the light face away from the
/// shading point and are rejected as `None`; the caller records a zero
/// contribution for them.
pub fn sample_light_surface(
    u1: f32,
    u2: f32,
    shading_point: Vec3,
    light: &SphereLight,
) -> Option<LightSample> {
    // Uniform direction on the unit sphere
    let cos_theta = 1.0 - 2.0 * u1;
    let sin_theta = (1.0 - cos_theta * cos_theta).max(0.0).sqrt();
    let phi = 2.0 * PI * u2;

    let surface_normal = Vec3::new(sin_theta * phi.cos(), sin_theta * phi.sin(), cos_theta);
    let point = light.center + surface_normal * light.radius;

    let to_sample = point - shading_point;
    let dist_sq = to_sample.length_squared();
    if dist_sq <= PDF_EPS {
        return None;
    }
    let direction = to_sample / dist_sq.sqrt();

    // Far side of the light: the surface element faces away
    let cos_light = surface_normal.dot(-direction);
    if cos_light <= 0.0 {
        return None;
    }

    let pdf = dist_sq / (light.surface_area() * cos_light);
    if pdf <= PDF_EPS || !pdf.is_finite() {
        return None;
    }

    Some(LightSample {
        direction,
        point,
        pdf,
    })
}
