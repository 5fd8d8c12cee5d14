//! Bucket-based tile rendering.
//!
//! Divides the image into tiles (buckets) that can be rendered
//! independently and in parallel using rayon. Each bucket owns an RNG
//! stream derived from the render seed and the bucket index, so results
//! are reproducible regardless of scheduling order.

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::renderer::render_pixel;
use crate::{Camera, Color, RenderConfig, Scene};

/// Per-bucket RNG streams are decorrelated with this multiplier.
const SEED_STRIDE: u64 = 0x9E37_79B9_7F4A_7C15;

/// A rectangular region of the image to render.
#[derive(Debug, Clone, Copy)]
pub struct Bucket {
    /// X coordinate of bucket's top-left corner
    pub x: u32,
    /// Y coordinate of bucket's top-left corner
    pub y: u32,
    /// Width of the bucket in pixels
    pub width: u32,
    /// Height of the bucket in pixels
    pub height: u32,
    /// Index of this bucket in the render order
    pub index: usize,
}

impl Bucket {
    /// Create a new bucket.
    pub fn new(x: u32, y: u32, width: u32, height: u32, index: usize) -> Self {
        Self {
            x,
            y,
            width,
            height,
            index,
        }
    }

    /// Get the total number of pixels in this bucket.
    pub fn pixel_count(&self) -> u32 {
        self.width * self.height
    }
}

/// Default bucket size in pixels.
pub const DEFAULT_BUCKET_SIZE: u32 = 32;

/// Generate buckets for an image, sorted center-out.
///
/// Edge tiles are clamped to the image bounds, so the buckets tile the
/// frame exactly. Rendering from the center outward is the pattern
/// production renderers use so the most important parts of the frame
/// appear first.
pub fn generate_buckets(width: u32, height: u32, bucket_size: u32) -> Vec<Bucket> {
    let step = bucket_size as usize;
    let mut buckets: Vec<Bucket> = (0..height)
        .step_by(step)
        .flat_map(|y| {
            (0..width).step_by(step).map(move |x| {
                Bucket::new(
                    x,
                    y,
                    bucket_size.min(width - x),
                    bucket_size.min(height - y),
                    0,
                )
            })
        })
        .collect();

    buckets.sort_by_key(|b| center_distance_sq(b, width, height));

    for (i, bucket) in buckets.iter_mut().enumerate() {
        bucket.index = i;
    }

    buckets
}

/// Squared distance from a bucket's center to the image center, in
/// quarter-pixel units so the sort key stays integral and total.
fn center_distance_sq(bucket: &Bucket, width: u32, height: u32) -> u64 {
    let dx = (2 * bucket.x + bucket.width) as i64 - width as i64;
    let dy = (2 * bucket.y + bucket.height) as i64 - height as i64;
    (dx * dx + dy * dy) as u64
}

/// Render a single bucket to a vector of display colors.
///
/// Returns pixels in row-major order within the bucket. The bucket's RNG
/// stream is seeded from the render seed and bucket index only, never from
/// thread identity.
pub fn render_bucket(
    bucket: &Bucket,
    camera: &Camera,
    scene: &Scene,
    config: &RenderConfig,
) -> Vec<Color> {
    let mut rng = StdRng::seed_from_u64(config.seed ^ (bucket.index as u64).wrapping_mul(SEED_STRIDE));
    let mut pixels = Vec::with_capacity(bucket.pixel_count() as usize);

    for local_y in 0..bucket.height {
        for local_x in 0..bucket.width {
            let global_x = bucket.x + local_x;
            let global_y = bucket.y + local_y;
            pixels.push(render_pixel(camera, scene, global_x, global_y, config, &mut rng));
        }
    }

    pixels
}

/// Result of rendering a bucket.
#[derive(Debug, Clone)]
pub struct BucketResult {
    /// The bucket that was rendered
    pub bucket: Bucket,
    /// Pixel colors in row-major order
    pub pixels: Vec<Color>,
}

impl BucketResult {
    /// Create a new bucket result.
    pub fn new(bucket: Bucket, pixels: Vec<Color>) -> Self {
        Self { bucket, pixels }
    }
}
