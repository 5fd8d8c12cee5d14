//! Renderer-agnostic scene description for Lume.
//!
//! Defines the material, sphere and light types consumed by the renderer,
//! plus JSON scene-file loading with up-front validation. Everything here is
//! immutable during a render pass.

mod loader;
mod scene;

pub use loader::{load_scene, parse_scene, CameraSettings, SceneError};
pub use scene::{Emission, Material, Scene, Sphere, SphereLight, MIN_ROUGHNESS};
