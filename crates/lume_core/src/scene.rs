//! Scene types for Lume.
//!
//! This module defines the core scene representation: PBR materials,
//! sphere primitives, a sphere light with a radiance derived from its
//! emission specification, and the scene container handed to the renderer.

use std::f32::consts::PI;

use lume_math::Vec3;

/// Floor for material roughness.
///
/// A roughness of exactly zero makes the GGX distribution term divide by
/// zero, so construction clamps to this value instead of letting shading
/// blow up mid-render.
pub const MIN_ROUGHNESS: f32 = 1e-3;

/// Luminous efficacy of a monochromatic 555 nm source in lm/W (CIE).
const LUMENS_PER_WATT_555NM: f32 = 683.0;

/// A metallic-roughness PBR material.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Material {
    /// Albedo color (RGB, components in [0,1])
    pub diffuse: Vec3,
    /// Metallic factor (0=dielectric, 1=metal)
    pub metallic: f32,
    /// Roughness factor, floored at [`MIN_ROUGHNESS`]
    pub roughness: f32,
}

impl Material {
    /// Create a new material, clamping parameters into their valid ranges.
    pub fn new(diffuse: Vec3, metallic: f32, roughness: f32) -> Self {
        Self {
            diffuse: diffuse.clamp(Vec3::ZERO, Vec3::ONE),
            metallic: metallic.clamp(0.0, 1.0),
            roughness: roughness.clamp(MIN_ROUGHNESS, 1.0),
        }
    }
}

impl Default for Material {
    fn default() -> Self {
        Self {
            diffuse: Vec3::new(0.5, 0.5, 0.5), // Grey default
            metallic: 0.0,
            roughness: 0.5,
        }
    }
}

/// A sphere primitive.
#[derive(Clone, Copy, Debug)]
pub struct Sphere {
    pub center: Vec3,
    /// Radius, strictly positive (validated at scene load)
    pub radius: f32,
    pub material: Material,
}

impl Sphere {
    /// Create a new sphere.
    pub fn new(center: Vec3, radius: f32, material: Material) -> Self {
        Self {
            center,
            radius,
            material,
        }
    }
}

/// How a light's output is specified.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Emission {
    /// Photometric bulb rating: luminous efficacy (lm/W) times electrical watts.
    Photometric { efficacy: f32, watts: f32 },
    /// Radiometric output in watts.
    Radiometric { radiant_flux: f32 },
}

impl Emission {
    /// Radiant flux in watts.
    ///
    /// Photometric ratings divide out the 683 lm/W luminous efficacy of a
    /// monochromatic 555 nm source to get back to radiometric watts.
    pub fn radiant_flux(&self) -> f32 {
        match *self {
            Emission::Photometric { efficacy, watts } => {
                efficacy * watts / LUMENS_PER_WATT_555NM
            }
            Emission::Radiometric { radiant_flux } => radiant_flux,
        }
    }
}

/// A spherical area light.
///
/// The emitted radiance is derived once at construction and constant for
/// the light's lifetime: flux spreads over the sphere surface
/// (`4πr²`) to give radiant exitance, and the Lambertian-emitter relation
/// divides by π to get radiance.
#[derive(Clone, Copy, Debug)]
pub struct SphereLight {
    pub center: Vec3,
    /// Radius, strictly positive (validated at scene load)
    pub radius: f32,
    /// Emission tint (RGB, 0-1)
    pub color: Vec3,
    radiance: Vec3,
}

impl SphereLight {
    /// Create a new sphere light, deriving its radiance from the emission.
    pub fn new(center: Vec3, radius: f32, color: Vec3, emission: Emission) -> Self {
        let radiant_exitance = emission.radiant_flux() / (4.0 * PI * radius * radius);
        let radiance = color * radiant_exitance / PI;

        Self {
            center,
            radius,
            color,
            radiance,
        }
    }

    /// Radiance emitted from any point on the light surface, in W/(sr·m²).
    #[inline]
    pub fn radiance(&self) -> Vec3 {
        self.radiance
    }

    /// Surface area of the light sphere.
    #[inline]
    pub fn surface_area(&self) -> f32 {
        4.0 * PI * self.radius * self.radius
    }
}

/// A complete scene: spheres, one light, and an ambient fallback color.
///
/// Read-only from all render workers; the renderer only ever borrows it.
#[derive(Clone, Debug)]
pub struct Scene {
    /// Ordered sphere collection. Order is irrelevant to the output but
    /// fixed, so nearest-hit ties break deterministically.
    pub spheres: Vec<Sphere>,
    pub light: SphereLight,
    /// Display color for rays that miss everything
    pub ambient: Vec3,
}

impl Scene {
    /// Create a new scene.
    pub fn new(spheres: Vec<Sphere>, light: SphereLight, ambient: Vec3) -> Self {
        Self {
            spheres,
            light,
            ambient,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_material_clamps_roughness() {
        let mat = Material::new(Vec3::ONE, 0.0, 0.0);
        assert_eq!(mat.roughness, MIN_ROUGHNESS);

        let mat = Material::new(Vec3::ONE, 0.0, 2.0);
        assert_eq!(mat.roughness, 1.0);
    }

    #[test]
    fn test_material_clamps_metallic_and_albedo() {
        let mat = Material::new(Vec3::new(1.5, -0.2, 0.5), 1.7, 0.5);
        assert_eq!(mat.diffuse, Vec3::new(1.0, 0.0, 0.5));
        assert_eq!(mat.metallic, 1.0);
    }

    #[test]
    fn test_photometric_flux() {
        // 100 W bulb at 15 lm/W: 1500 lm, back to watts via 683 lm/W
        let e = Emission::Photometric {
            efficacy: 15.0,
            watts: 100.0,
        };
        assert!((e.radiant_flux() - 1500.0 / 683.0).abs() < 1e-5);
    }

    #[test]
    fn test_radiometric_flux_passthrough() {
        let e = Emission::Radiometric { radiant_flux: 40.0 };
        assert_eq!(e.radiant_flux(), 40.0);
    }

    #[test]
    fn test_sphere_light_radiance() {
        // Unit-radius white light with 4π² W of flux:
        // exitance = 4π²/(4π) = π, radiance = π/π = 1
        let flux = 4.0 * PI * PI;
        let light = SphereLight::new(
            Vec3::ZERO,
            1.0,
            Vec3::ONE,
            Emission::Radiometric { radiant_flux: flux },
        );
        assert!((light.radiance() - Vec3::ONE).length() < 1e-5);
    }

    #[test]
    fn test_sphere_light_radiance_is_constant() {
        let light = SphereLight::new(
            Vec3::ZERO,
            0.5,
            Vec3::new(1.0, 0.8, 0.6),
            Emission::Photometric {
                efficacy: 15.0,
                watts: 60.0,
            },
        );
        let first = light.radiance();
        assert_eq!(light.radiance(), first);
        assert!(first.min_element() >= 0.0);
    }
}
