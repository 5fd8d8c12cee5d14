//! Full-frame rendering.
//!
//! Drives the camera, intersection and integrator per pixel, tone-maps the
//! result, and runs buckets in parallel with rayon. Output is deterministic
//! for a fixed scene, config and seed: RNG streams derive from bucket
//! indices, never from thread scheduling.

use rand::RngCore;
use rayon::prelude::*;

use crate::bucket::{generate_buckets, render_bucket, BucketResult, DEFAULT_BUCKET_SIZE};
use crate::integrator::{shade, RenderConfig};
use crate::intersect::{closest_hit, Intersection};
use crate::tonemap::exposure_from_ev100;
use crate::{Camera, Color, Scene};

/// Render a single pixel to a display-space color.
///
/// One jittered primary ray is cast; a surface hit is shaded with the
/// configured number of light samples, then exposed and tone-mapped. A miss
/// shows the ambient color as-is, already in display space.
pub fn render_pixel(
    camera: &Camera,
    scene: &Scene,
    x: u32,
    y: u32,
    config: &RenderConfig,
    rng: &mut dyn RngCore,
) -> Color {
    let ray = camera.primary_ray(x, y, rng);
    let exposure = exposure_from_ev100(config.ev100);

    match closest_hit(&ray, scene) {
        Intersection::Miss => scene.ambient,
        Intersection::Light { radiance, .. } => config.tone_map.apply(radiance * exposure),
        Intersection::Surface {
            point,
            normal,
            material,
        } => {
            let view = -ray.direction;
            let radiance = shade(point, normal, &material, view, scene, config, rng);
            config.tone_map.apply(radiance * exposure)
        }
    }
}

/// 8-bit RGBA framebuffer, row-major from the top-left.
pub struct Framebuffer {
    pub width: u32,
    pub height: u32,
    pixels: Vec<u8>,
}

impl Framebuffer {
    /// Create a framebuffer filled with opaque black.
    pub fn new(width: u32, height: u32) -> Self {
        let mut pixels = vec![0u8; (width * height * 4) as usize];
        for a in pixels.iter_mut().skip(3).step_by(4) {
            *a = 255;
        }
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Write a display-space color at (x, y), rounding each channel to the
    /// nearest 8-bit value. Alpha is always 255.
    pub fn set(&mut self, x: u32, y: u32, color: Color) {
        let i = ((y * self.width + x) * 4) as usize;
        self.pixels[i] = (255.0 * color.x.clamp(0.0, 1.0)).round() as u8;
        self.pixels[i + 1] = (255.0 * color.y.clamp(0.0, 1.0)).round() as u8;
        self.pixels[i + 2] = (255.0 * color.z.clamp(0.0, 1.0)).round() as u8;
        self.pixels[i + 3] = 255;
    }

    /// RGBA bytes of the pixel at (x, y).
    pub fn get(&self, x: u32, y: u32) -> [u8; 4] {
        let i = ((y * self.width + x) * 4) as usize;
        [
            self.pixels[i],
            self.pixels[i + 1],
            self.pixels[i + 2],
            self.pixels[i + 3],
        ]
    }

    /// View the raw RGBA bytes.
    pub fn as_rgba(&self) -> &[u8] {
        &self.pixels
    }

    /// Consume the framebuffer, returning the raw RGBA bytes.
    pub fn into_rgba(self) -> Vec<u8> {
        self.pixels
    }
}

/// Render the whole frame, buckets in parallel.
pub fn render(camera: &Camera, scene: &Scene, config: &RenderConfig) -> Framebuffer {
    let buckets = generate_buckets(config.width, config.height, DEFAULT_BUCKET_SIZE);
    log::info!(
        "Rendering {}x{} at {} spp, {} buckets",
        config.width,
        config.height,
        config.samples_per_pixel,
        buckets.len()
    );

    let results: Vec<BucketResult> = buckets
        .par_iter()
        .map(|bucket| BucketResult::new(*bucket, render_bucket(bucket, camera, scene, config)))
        .collect();

    let mut frame = Framebuffer::new(config.width, config.height);
    for result in results {
        let bucket = result.bucket;
        for (i, color) in result.pixels.iter().enumerate() {
            let x = bucket.x + (i as u32 % bucket.width);
            let y = bucket.y + (i as u32 / bucket.width);
            frame.set(x, y, *color);
        }
    }

    frame
}
