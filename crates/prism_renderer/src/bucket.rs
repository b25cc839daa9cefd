//! Bucket-based tile rendering.
//!
//! Divides the image into tiles (buckets) that are rendered
//! independently and in parallel using rayon.

use std::sync::atomic::{AtomicU64, Ordering};

use rayon::prelude::*;

use crate::renderer::{render_seeded_pixel, RenderConfig, RenderProgress};
use crate::{Camera, Color, Scene};

/// A rectangular region of the image to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
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
pub const DEFAULT_BUCKET_SIZE: u32 = 64;

/// Generate buckets for an image, sorted in spiral order from center.
///
/// A zero `bucket_size` yields no buckets.
pub fn generate_buckets(width: u32, height: u32, bucket_size: u32) -> Vec<Bucket> {
    let mut buckets = Vec::new();
    if bucket_size == 0 {
        return buckets;
    }

    let mut index = 0;
    let mut y = 0;
    while y < height {
        let mut x = 0;
        while x < width {
            let bw = bucket_size.min(width - x);
            let bh = bucket_size.min(height - y);
            buckets.push(Bucket::new(x, y, bw, bh, index));
            index += 1;
            x += bucket_size;
        }
        y += bucket_size;
    }

    sort_spiral(&mut buckets, width, height);

    // Update indices after sorting
    for (i, bucket) in buckets.iter_mut().enumerate() {
        bucket.index = i;
    }

    buckets
}

/// Sort buckets by distance from image center.
///
/// The sort is stable, so equidistant buckets keep row-major order.
fn sort_spiral(buckets: &mut [Bucket], width: u32, height: u32) {
    let center_x = width as f32 / 2.0;
    let center_y = height as f32 / 2.0;

    let distance = |b: &Bucket| {
        let bx = b.x as f32 + b.width as f32 / 2.0;
        let by = b.y as f32 + b.height as f32 / 2.0;
        (bx - center_x).powi(2) + (by - center_y).powi(2)
    };

    buckets.sort_by(|a, b| distance(a).total_cmp(&distance(b)));
}

/// Render a single bucket to a vector of colors.
///
/// Returns pixels in row-major order within the bucket. Each pixel
/// seeds its own generator, so the output does not depend on which
/// thread renders the bucket.
pub fn render_bucket(bucket: &Bucket, scene: &Scene, camera: &Camera, config: &RenderConfig) -> Vec<Color> {
    let mut pixels = Vec::with_capacity(bucket.pixel_count() as usize);

    for local_y in 0..bucket.height {
        for local_x in 0..bucket.width {
            let global_x = bucket.x + local_x;
            let global_y = bucket.y + local_y;
            pixels.push(render_seeded_pixel(scene, camera, global_x, global_y, config));
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
    pub fn new(bucket: Bucket, pixels: Vec<Color>) -> Self {
        Self { bucket, pixels }
    }
}

/// Render all buckets on the rayon pool.
///
/// `progress` is called from worker threads as buckets finish, with the
/// running total of completed pixels. Results come back in bucket order.
pub fn render_buckets(
    buckets: &[Bucket],
    scene: &Scene,
    camera: &Camera,
    config: &RenderConfig,
    progress: &(dyn Fn(RenderProgress) + Sync),
) -> Vec<BucketResult> {
    let total_pixels: u64 = buckets.iter().map(|b| b.pixel_count() as u64).sum();
    let completed = AtomicU64::new(0);

    buckets
        .par_iter()
        .map(|bucket| {
            let pixels = render_bucket(bucket, scene, camera, config);
            let done = completed.fetch_add(bucket.pixel_count() as u64, Ordering::Relaxed) + bucket.pixel_count() as u64;
            log::trace!("Bucket {} done ({}/{} px)", bucket.index, done, total_pixels);
            progress(RenderProgress {
                completed_pixels: done,
                total_pixels,
            });
            BucketResult::new(*bucket, pixels)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Light, Material, Sphere, Vec3};

    #[test]
    fn test_generate_buckets_exact_fit() {
        let buckets = generate_buckets(128, 128, 64);
        assert_eq!(buckets.len(), 4); // 2x2 grid

        let total_pixels: u32 = buckets.iter().map(|b| b.pixel_count()).sum();
        assert_eq!(total_pixels, 128 * 128);
    }

    #[test]
    fn test_generate_buckets_partial_fit() {
        let buckets = generate_buckets(100, 70, 64);
        assert_eq!(buckets.len(), 4); // 2x2 grid with partial buckets

        let total_pixels: u32 = buckets.iter().map(|b| b.pixel_count()).sum();
        assert_eq!(total_pixels, 100 * 70);
        assert!(buckets.iter().all(|b| b.x + b.width <= 100 && b.y + b.height <= 70));
    }

    #[test]
    fn test_zero_bucket_size() {
        assert!(generate_buckets(10, 10, 0).is_empty());
    }

    #[test]
    fn test_spiral_order() {
        let buckets = generate_buckets(192, 192, 64);
        assert_eq!(buckets.len(), 9); // 3x3 grid

        // First bucket should be the center one
        let first = &buckets[0];
        assert_eq!(first.x, 64);
        assert_eq!(first.y, 64);
        assert!(buckets.iter().enumerate().all(|(i, b)| b.index == i));
    }

    #[test]
    fn test_render_buckets_covers_image() {
        let mut scene = Scene::new().with_background(Color::splat(0.25));
        scene.add(Sphere::new(Vec3::new(0.0, 0.0, -3.0), 1.0, Material::default()).unwrap());
        scene.add_light(Light::directional(-Vec3::Z, Color::ONE, 1.0).unwrap());
        let camera = Camera::new(Vec3::ZERO, -Vec3::Z, Vec3::Y).unwrap();
        let config = RenderConfig::new(20, 12).with_bucket_size(8).with_antialiasing(false);

        let buckets = generate_buckets(20, 12, 8);
        let results = render_buckets(&buckets, &scene, &camera, &config, &|_: RenderProgress| {});
        assert_eq!(results.len(), buckets.len());
        for result in &results {
            assert_eq!(result.pixels.len(), result.bucket.pixel_count() as usize);
            let expected = render_bucket(&result.bucket, &scene, &camera, &config);
            assert_eq!(result.pixels, expected);
        }
    }
}
