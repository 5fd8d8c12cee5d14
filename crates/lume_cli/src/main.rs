//! Command-line renderer: loads a scene, renders it, writes a PNG.

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use lume_core::{load_scene, CameraSettings, Emission, Material, Scene, Sphere, SphereLight};
use lume_math::Vec3;
use lume_renderer::{render, Camera, RenderConfig, SamplingStrategy, ToneMap};

#[derive(Parser, Debug)]
#[command(name = "lume", about = "CPU Monte Carlo direct-lighting renderer")]
struct Args {
    /// Scene file (JSON); a built-in demo scene is used when omitted
    scene: Option<PathBuf>,

    /// Output image path
    #[arg(short, long, default_value = "render.png")]
    output: PathBuf,

    /// Image width in pixels
    #[arg(long, default_value_t = 512)]
    width: u32,

    /// Image height in pixels
    #[arg(long, default_value_t = 512)]
    height: u32,

    /// Light samples per pixel
    #[arg(short, long, default_value_t = 64)]
    spp: u32,

    /// Sampling strategy
    #[arg(long, value_enum, default_value_t = StrategyArg::Light)]
    strategy: StrategyArg,

    /// Tone mapping operator
    #[arg(long, value_enum, default_value_t = ToneMapArg::Reinhard)]
    tonemap: ToneMapArg,

    /// Exposure value at ISO 100
    #[arg(long, default_value_t = 1.0)]
    ev100: f32,

    /// Seed for the per-bucket RNG streams
    #[arg(long, default_value_t = 0)]
    seed: u64,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum StrategyArg {
    /// Importance-sample the GGX lobe
    Ggx,
    /// Sample the light's surface
    Light,
    /// Uniform hemisphere baseline
    Hemisphere,
}

impl From<StrategyArg> for SamplingStrategy {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::Ggx => SamplingStrategy::GgxImportance,
            StrategyArg::Light => SamplingStrategy::LightSurface,
            StrategyArg::Hemisphere => SamplingStrategy::UniformHemisphere,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ToneMapArg {
    Reinhard,
    Aces,
    Neutral,
}

impl From<ToneMapArg> for ToneMap {
    fn from(arg: ToneMapArg) -> Self {
        match arg {
            ToneMapArg::Reinhard => ToneMap::Reinhard,
            ToneMapArg::Aces => ToneMap::AcesFilmic,
            ToneMapArg::Neutral => ToneMap::PbrNeutral,
        }
    }
}

/// Three spheres across the roughness range under a warm light.
fn demo_scene() -> (Scene, CameraSettings) {
    let spheres = vec![
        Sphere::new(
            Vec3::new(-2.2, 0.0, 0.0),
            1.0,
            Material::new(Vec3::new(0.9, 0.2, 0.2), 0.0, 0.9),
        ),
        Sphere::new(
            Vec3::new(0.0, 0.0, 0.0),
            1.0,
            Material::new(Vec3::new(0.2, 0.8, 0.3), 0.0, 0.4),
        ),
        Sphere::new(
            Vec3::new(2.2, 0.0, 0.0),
            1.0,
            Material::new(Vec3::new(0.9, 0.8, 0.6), 1.0, 0.15),
        ),
        // Floor
        Sphere::new(
            Vec3::new(0.0, -101.0, 0.0),
            100.0,
            Material::new(Vec3::splat(0.5), 0.0, 0.8),
        ),
    ];
    let light = SphereLight::new(
        Vec3::new(0.0, 4.0, 2.0),
        0.5,
        Vec3::new(1.0, 0.95, 0.85),
        Emission::Photometric {
            efficacy: 15.0,
            watts: 200.0,
        },
    );
    let scene = Scene::new(spheres, light, Vec3::splat(0.03));
    let camera = CameraSettings {
        position: [0.0, 1.0, 7.0],
        look_at: [0.0, 0.0, 0.0],
        up: [0.0, 1.0, 0.0],
        vfov: 45.0,
    };
    (scene, camera)
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let (scene, camera_settings) = match &args.scene {
        Some(path) => load_scene(path)
            .with_context(|| format!("failed to load scene {}", path.display()))?,
        None => {
            log::info!("No scene file given, rendering the built-in demo scene");
            demo_scene()
        }
    };

    let camera = Camera::from_settings(&camera_settings, args.width, args.height);
    let config = RenderConfig {
        width: args.width,
        height: args.height,
        samples_per_pixel: args.spp,
        strategy: args.strategy.into(),
        tone_map: args.tonemap.into(),
        ev100: args.ev100,
        seed: args.seed,
    };

    let start = Instant::now();
    let frame = render(&camera, &scene, &config);
    log::info!("Rendered in {:.2?}", start.elapsed());

    let image = image::RgbaImage::from_raw(frame.width, frame.height, frame.into_rgba())
        .context("framebuffer size mismatch")?;
    image
        .save(&args.output)
        .with_context(|| format!("failed to write {}", args.output.display()))?;
    println!("Wrote {}", args.output.display());

    Ok(())
}
