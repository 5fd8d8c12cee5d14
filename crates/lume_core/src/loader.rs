//! JSON scene-file loading.
//!
//! Scene files describe a camera, an ambient color, a sphere list and one
//! sphere light. The raw serde types below mirror the file layout; they are
//! converted into runtime [`Scene`] types with validation, so malformed
//! input is rejected here rather than mid-render.

use std::fs;
use std::path::Path;

use lume_math::Vec3;
use serde::Deserialize;
use thiserror::Error;

use crate::scene::{Emission, Material, Scene, Sphere, SphereLight};

/// Errors that can occur during scene loading.
#[derive(Error, Debug)]
pub enum SceneError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{what} has non-positive radius {radius}")]
    InvalidRadius { what: &'static str, radius: f32 },

    #[error("light emission must be non-negative, got {0}")]
    NegativeEmission(f32),

    #[error("camera field of view must be in (0, 180), got {0}")]
    InvalidFov(f32),
}

/// Camera parameters carried in the scene file.
///
/// The camera itself lives in the renderer; the scene file only records
/// where to put it.
#[derive(Clone, Copy, Debug, Deserialize)]
pub struct CameraSettings {
    pub position: [f32; 3],
    pub look_at: [f32; 3],
    #[serde(default = "default_up")]
    pub up: [f32; 3],
    /// Vertical field of view in degrees
    #[serde(default = "default_vfov")]
    pub vfov: f32,
}

fn default_up() -> [f32; 3] {
    [0.0, 1.0, 0.0]
}

fn default_vfov() -> f32 {
    60.0
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            position: [0.0, 0.0, 5.0],
            look_at: [0.0, 0.0, 0.0],
            up: default_up(),
            vfov: default_vfov(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct SceneFile {
    #[serde(default)]
    camera: CameraSettings,
    #[serde(default)]
    ambient: [f32; 3],
    spheres: Vec<SphereFile>,
    light: LightFile,
}

#[derive(Debug, Deserialize)]
struct SphereFile {
    center: [f32; 3],
    radius: f32,
    material: MaterialFile,
}

#[derive(Debug, Deserialize)]
struct MaterialFile {
    diffuse: [f32; 3],
    #[serde(default)]
    metallic: f32,
    #[serde(default = "default_roughness")]
    roughness: f32,
}

fn default_roughness() -> f32 {
    0.5
}

#[derive(Debug, Deserialize)]
struct LightFile {
    center: [f32; 3],
    radius: f32,
    color: [f32; 3],
    emission: EmissionFile,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "snake_case")]
enum EmissionFile {
    Photometric { efficacy: f32, watts: f32 },
    Radiometric { radiant_flux: f32 },
}

/// Parse a scene from a JSON string.
pub fn parse_scene(json: &str) -> Result<(Scene, CameraSettings), SceneError> {
    let file: SceneFile = serde_json::from_str(json)?;

    if file.camera.vfov <= 0.0 || file.camera.vfov >= 180.0 {
        return Err(SceneError::InvalidFov(file.camera.vfov));
    }

    let mut spheres = Vec::with_capacity(file.spheres.len());
    for s in &file.spheres {
        if s.radius <= 0.0 {
            return Err(SceneError::InvalidRadius {
                what: "sphere",
                radius: s.radius,
            });
        }
        let material = Material::new(
            Vec3::from(s.material.diffuse),
            s.material.metallic,
            s.material.roughness,
        );
        spheres.push(Sphere::new(Vec3::from(s.center), s.radius, material));
    }

    if file.light.radius <= 0.0 {
        return Err(SceneError::InvalidRadius {
            what: "light",
            radius: file.light.radius,
        });
    }
    let emission = match file.light.emission {
        EmissionFile::Photometric { efficacy, watts } => {
            let flux = efficacy * watts;
            if flux < 0.0 {
                return Err(SceneError::NegativeEmission(flux));
            }
            Emission::Photometric { efficacy, watts }
        }
        EmissionFile::Radiometric { radiant_flux } => {
            if radiant_flux < 0.0 {
                return Err(SceneError::NegativeEmission(radiant_flux));
            }
            Emission::Radiometric { radiant_flux }
        }
    };
    let light = SphereLight::new(
        Vec3::from(file.light.center),
        file.light.radius,
        Vec3::from(file.light.color).clamp(Vec3::ZERO, Vec3::ONE),
        emission,
    );

    let scene = Scene::new(spheres, light, Vec3::from(file.ambient));

    log::info!(
        "Parsed scene: {} spheres, light radiance {:?}",
        scene.spheres.len(),
        scene.light.radiance()
    );

    Ok((scene, file.camera))
}

/// Load a scene from a JSON file on disk.
pub fn load_scene<P: AsRef<Path>>(path: P) -> Result<(Scene, CameraSettings), SceneError> {
    let json = fs::read_to_string(path)?;
    parse_scene(&json)
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL: &str = r#"{
        "camera": { "position": [0, 1, 6], "look_at": [0, 0, 0], "vfov": 45 },
        "ambient": [0.05, 0.05, 0.08],
        "spheres": [
            {
                "center": [0, 0, 0],
                "radius": 1,
                "material": { "diffuse": [1, 0, 0], "metallic": 0, "roughness": 0.5 }
            }
        ],
        "light": {
            "center": [0, 4, 0],
            "radius": 0.5,
            "color": [1, 1, 1],
            "emission": { "photometric": { "efficacy": 15, "watts": 100 } }
        }
    }"#;

    #[test]
    fn test_parse_minimal_scene() {
        let (scene, camera) = parse_scene(MINIMAL).unwrap();

        assert_eq!(scene.spheres.len(), 1);
        assert_eq!(scene.spheres[0].radius, 1.0);
        assert_eq!(scene.spheres[0].material.diffuse, Vec3::new(1.0, 0.0, 0.0));
        assert_eq!(scene.ambient, Vec3::new(0.05, 0.05, 0.08));
        assert!(scene.light.radiance().min_element() > 0.0);
        assert_eq!(camera.vfov, 45.0);
        assert_eq!(camera.position, [0.0, 1.0, 6.0]);
    }

    #[test]
    fn test_radiometric_emission() {
        let json = MINIMAL.replace(
            r#"{ "photometric": { "efficacy": 15, "watts": 100 } }"#,
            r#"{ "radiometric": { "radiant_flux": 25.0 } }"#,
        );
        let (scene, _) = parse_scene(&json).unwrap();
        assert!(scene.light.radiance().max_element() > 0.0);
    }

    #[test]
    fn test_rejects_bad_sphere_radius() {
        let json = MINIMAL.replace(r#""radius": 1,"#, r#""radius": -2.0,"#);
        match parse_scene(&json) {
            Err(SceneError::InvalidRadius { what: "sphere", .. }) => {}
            other => panic!("expected InvalidRadius, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_rejects_negative_emission() {
        let json = MINIMAL.replace(
            r#"{ "photometric": { "efficacy": 15, "watts": 100 } }"#,
            r#"{ "radiometric": { "radiant_flux": -1.0 } }"#,
        );
        assert!(matches!(
            parse_scene(&json),
            Err(SceneError::NegativeEmission(_))
        ));
    }

    #[test]
    fn test_rejects_bad_fov() {
        let json = MINIMAL.replace(r#""vfov": 45"#, r#""vfov": 200"#);
        assert!(matches!(parse_scene(&json), Err(SceneError::InvalidFov(_))));
    }

    #[test]
    fn test_rejects_malformed_json() {
        assert!(matches!(parse_scene("{ not json"), Err(SceneError::Json(_))));
    }
}
