//! Core ray casting renderer.
//!
//! Implements direct-lighting ray casting with:
//! - Nearest-hit visibility and hard shadows
//! - Diffuse, specular and border shading
//! - Anti-aliasing via stratified jitter sampling

use std::time::Instant;

use crate::bucket::{generate_buckets, render_buckets};
use crate::sampler::{pixel_rng, SamplePattern};
use crate::shader::ShadingContext;
use crate::{Camera, Color, Hit, RenderError, Scene};
use prism_math::{Interval, Ray};
use rand::RngCore;

/// Upper bound on the anti-aliasing grid size (`h_samples * v_samples`).
pub const MAX_SAMPLES_PER_PIXEL: u32 = 1 << 16;

/// Render configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderConfig {
    /// Image width in pixels
    pub width: u32,
    /// Image height in pixels
    pub height: u32,
    /// Jittered supersampling; when false each pixel gets one center ray
    pub antialias: bool,
    /// Horizontal cells of the anti-aliasing grid
    pub h_samples: u32,
    /// Vertical cells of the anti-aliasing grid
    pub v_samples: u32,
    /// Seed for the jitter generator
    pub seed: u64,
    /// Render buckets on the rayon thread pool
    pub parallel: bool,
    /// Bucket edge length in pixels (parallel mode only)
    pub bucket_size: u32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 200,
            height: 200,
            antialias: true,
            h_samples: 4,
            v_samples: 4,
            seed: 0,
            parallel: true,
            bucket_size: crate::bucket::DEFAULT_BUCKET_SIZE,
        }
    }
}

impl RenderConfig {
    /// Default settings at the given resolution.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            ..Default::default()
        }
    }

    /// Enable or disable jittered supersampling.
    pub fn with_antialiasing(mut self, antialias: bool) -> Self {
        self.antialias = antialias;
        self
    }

    /// Set the anti-aliasing grid.
    pub fn with_samples(mut self, h_samples: u32, v_samples: u32) -> Self {
        self.h_samples = h_samples;
        self.v_samples = v_samples;
        self
    }

    /// Set the jitter seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Choose between the sequential loop and parallel buckets.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Set the bucket size used in parallel mode.
    pub fn with_bucket_size(mut self, bucket_size: u32) -> Self {
        self.bucket_size = bucket_size;
        self
    }

    /// Width over height.
    pub fn aspect_ratio(&self) -> f32 {
        self.width as f32 / self.height as f32
    }

    /// The sample pattern every pixel uses.
    pub fn sample_pattern(&self) -> SamplePattern {
        if self.antialias {
            SamplePattern::Jittered {
                h: self.h_samples,
                v: self.v_samples,
            }
        } else {
            SamplePattern::Center
        }
    }

    /// Reject settings that cannot produce an image.
    pub fn validate(&self) -> Result<(), RenderError> {
        if self.width == 0 || self.height == 0 {
            return Err(RenderError::InvalidResolution {
                width: self.width,
                height: self.height,
            });
        }
        let grid = self.h_samples.checked_mul(self.v_samples);
        if self.antialias && !matches!(grid, Some(n) if n > 0 && n <= MAX_SAMPLES_PER_PIXEL) {
            return Err(RenderError::InvalidSampleGrid {
                h: self.h_samples,
                v: self.v_samples,
            });
        }
        if self.parallel && self.bucket_size == 0 {
            return Err(RenderError::InvalidBucketSize);
        }
        Ok(())
    }
}

/// Snapshot handed to progress observers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderProgress {
    pub completed_pixels: u64,
    pub total_pixels: u64,
}

impl RenderProgress {
    /// Completed fraction in [0, 1].
    pub fn fraction(&self) -> f32 {
        if self.total_pixels == 0 {
            return 1.0;
        }
        self.completed_pixels as f32 / self.total_pixels as f32
    }
}

/// Compute the color seen by a ray.
///
/// Returns the scene background when nothing is hit.
pub fn ray_color(ray: &Ray, scene: &Scene) -> Color {
    match scene.find_nearest(ray) {
        Some(hit) => shade(scene, &hit, ray),
        None => scene.background(),
    }
}

/// Shade a hit: direct light from every unshadowed light plus the border
/// term, clamped to the displayable range.
pub fn shade(scene: &Scene, hit: &Hit, ray: &Ray) -> Color {
    let ctx = ShadingContext::from_hit(hit, ray.direction());
    let mut color = Color::ZERO;

    for light in scene.lights() {
        let sample = light.sample(hit.point);
        if sample.intensity == Color::ZERO {
            continue;
        }
        if scene.is_shadowed(hit.point, hit.normal, light) {
            continue;
        }
        for shader in hit.material.shaders().filter(|s| s.is_light_dependent()) {
            color += shader.contribution(&ctx, Some(&sample));
        }
    }

    for shader in hit.material.shaders().filter(|s| !s.is_light_dependent()) {
        color += shader.contribution(&ctx, None);
    }

    clamp_color(color)
}

/// Clamp each channel to [0, 1].
#[inline]
pub fn clamp_color(color: Color) -> Color {
    Color::new(
        Interval::UNIT.clamp(color.x),
        Interval::UNIT.clamp(color.y),
        Interval::UNIT.clamp(color.z),
    )
}

/// Convert a color to 8-bit RGB.
pub fn color_to_rgb(color: Color) -> [u8; 3] {
    let c = clamp_color(color);
    [
        (255.0 * c.x).round() as u8,
        (255.0 * c.y).round() as u8,
        (255.0 * c.z).round() as u8,
    ]
}

/// Render a single pixel.
///
/// With anti-aliasing the samples of the jitter grid are averaged;
/// without it the single center ray's color is returned unchanged.
pub fn render_pixel(
    scene: &Scene,
    camera: &Camera,
    x: u32,
    y: u32,
    config: &RenderConfig,
    rng: &mut dyn RngCore,
) -> Color {
    let offsets = config.sample_pattern().offsets(rng);
    let mut pixel_color = Color::ZERO;

    for offset in &offsets {
        let ray = camera.get_ray(x, y, *offset, config.width, config.height);
        pixel_color += ray_color(&ray, scene);
    }

    if offsets.len() == 1 {
        return pixel_color;
    }

    // Average the samples
    pixel_color / offsets.len() as f32
}

/// Render a pixel with the generator derived from the config seed.
pub(crate) fn render_seeded_pixel(
    scene: &Scene,
    camera: &Camera,
    x: u32,
    y: u32,
    config: &RenderConfig,
) -> Color {
    let index = y as u64 * config.width as u64 + x as u64;
    let mut rng = pixel_rng(config.seed, index);
    render_pixel(scene, camera, x, y, config, &mut rng)
}

/// Image buffer for storing render output.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageBuffer {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<Color>,
}

impl ImageBuffer {
    /// Create a new image buffer filled with black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::ZERO; width as usize * height as usize],
        }
    }

    /// Get the pixel at (x, y).
    pub fn get(&self, x: u32, y: u32) -> Color {
        self.pixels[self.index(x, y)]
    }

    /// Set the pixel at (x, y).
    pub fn set(&mut self, x: u32, y: u32, color: Color) {
        let index = self.index(x, y);
        self.pixels[index] = color;
    }

    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Convert to packed 8-bit RGB rows (for display or saving).
    pub fn to_rgb8(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.pixels.len() * 3);
        for color in &self.pixels {
            bytes.extend_from_slice(&color_to_rgb(*color));
        }
        bytes
    }
}

/// Render the entire scene to an image buffer.
pub fn render(scene: &Scene, camera: &Camera, config: &RenderConfig) -> Result<ImageBuffer, RenderError> {
    render_with_progress(scene, camera, config, &|_: RenderProgress| {})
}

/// Render the entire scene, reporting progress after every row (sequential)
/// or bucket (parallel).
///
/// The callback only observes; it has no influence on the image.
pub fn render_with_progress(
    scene: &Scene,
    camera: &Camera,
    config: &RenderConfig,
    progress: &(dyn Fn(RenderProgress) + Sync),
) -> Result<ImageBuffer, RenderError> {
    config.validate()?;

    log::info!(
        "Rendering {}x{} @ {} spp ({}, {} primitives, {} lights)",
        config.width,
        config.height,
        config.sample_pattern().sample_count(),
        if config.parallel { "parallel" } else { "sequential" },
        scene.primitives().len(),
        scene.lights().len()
    );
    let start = Instant::now();

    let mut image = ImageBuffer::new(config.width, config.height);
    let total_pixels = config.width as u64 * config.height as u64;

    if config.parallel {
        let buckets = generate_buckets(config.width, config.height, config.bucket_size);
        log::debug!("Rendering {} buckets of {}px", buckets.len(), config.bucket_size);

        for result in render_buckets(&buckets, scene, camera, config, progress) {
            let bucket = result.bucket;
            for (i, color) in result.pixels.into_iter().enumerate() {
                let local_x = i as u32 % bucket.width;
                let local_y = i as u32 / bucket.width;
                image.set(bucket.x + local_x, bucket.y + local_y, color);
            }
        }
    } else {
        for y in 0..config.height {
            for x in 0..config.width {
                let color = render_seeded_pixel(scene, camera, x, y, config);
                image.set(x, y, color);
            }
            progress(RenderProgress {
                completed_pixels: (y as u64 + 1) * config.width as u64,
                total_pixels,
            });
        }
    }

    log::info!("Rendered in {:?}", start.elapsed());
    Ok(image)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::PIXEL_CENTER;
    use crate::{Attenuation, Light, Material, Plane, Sphere, Vec3};
    use prism_core::SceneDescription;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::sync::Mutex;

    fn camera() -> Camera {
        Camera::new(Vec3::ZERO, -Vec3::Z, Vec3::Y)
            .unwrap()
            .with_field_of_view(1.0, 0.5, 0.5)
            .unwrap()
    }

    fn sphere_scene() -> Scene {
        let mut scene = Scene::new().with_background(Color::new(0.1, 0.2, 0.3));
        scene.add(Sphere::new(Vec3::new(0.0, 0.0, -5.0), 1.0, Material::new(Color::ONE)).unwrap());
        scene.add_light(Light::directional(-Vec3::Z, Color::ONE, 1.0).unwrap());
        scene
    }

    #[test]
    fn test_miss_returns_background() {
        let scene = sphere_scene();
        let ray = Ray::from_unit(Vec3::ZERO, Vec3::Y);
        assert_eq!(ray_color(&ray, &scene), Color::new(0.1, 0.2, 0.3));
    }

    #[test]
    fn test_head_on_hit_is_fully_lit() {
        let scene = sphere_scene();
        let ray = Ray::from_unit(Vec3::ZERO, -Vec3::Z);
        let color = ray_color(&ray, &scene);
        assert!((color - Color::ONE).length() < 1e-4);
    }

    #[test]
    fn test_directional_light_over_plane() {
        let diffuse = 0.7;
        let intensity = 0.8;
        let floor = Plane::new(Vec3::ZERO, Vec3::Y, Material::new(Color::ONE).with_diffuse(diffuse)).unwrap();
        let ray = Ray::new(Vec3::new(0.0, 5.0, 5.0), Vec3::new(0.0, -1.0, -1.0)).unwrap();

        // Straight overhead
        let mut overhead = Scene::new();
        overhead.add(floor.clone());
        overhead.add_light(Light::directional(-Vec3::Y, Color::ONE, intensity).unwrap());
        let color = ray_color(&ray, &overhead);
        assert!((color - Color::splat(diffuse * intensity)).length() < 1e-5);

        // Grazing the surface
        let mut grazing = Scene::new();
        grazing.add(floor);
        grazing.add_light(Light::directional(Vec3::X, Color::ONE, intensity).unwrap());
        let color = ray_color(&ray, &grazing);
        assert!(color.length() < 1e-5);
    }

    #[test]
    fn test_point_light_shadowed_by_blocker() {
        let mut scene = Scene::new();
        // Target sphere, a blocker between it and the light, and the light above
        scene.add(Sphere::new(Vec3::new(0.0, 0.0, -5.0), 1.0, Material::new(Color::ONE)).unwrap());
        scene.add(Sphere::new(Vec3::new(0.0, 3.0, -5.0), 0.2, Material::new(Color::ONE)).unwrap());
        let light = Light::point(Vec3::new(0.0, 6.0, -5.0), Color::ONE, 1.0, Attenuation::NONE).unwrap();
        scene.add_light(light.clone());

        // Top of the target sphere sits directly under the blocker
        let top = Vec3::new(0.0, 1.0, -5.0);
        assert!(scene.is_shadowed(top, Vec3::Y, &light));
        let down = Ray::new(Vec3::new(0.0, 1.5, 0.0), top - Vec3::new(0.0, 1.5, 0.0)).unwrap();
        let hit = scene.find_nearest(&down).unwrap();
        assert_eq!(hit.primitive, 0);
        assert_eq!(shade(&scene, &hit, &down), Color::ZERO);

        // A point on the side of the sphere facing the light but clear of the blocker
        let side_normal = Vec3::new(1.0, 1.0, 0.0).normalize();
        let side = Vec3::new(0.0, 0.0, -5.0) + side_normal;
        assert!(!scene.is_shadowed(side, side_normal, &light));
        let side_hit = Hit {
            t: 1.0,
            point: side,
            normal: side_normal,
            material: scene.primitives()[0].material(),
            primitive: 0,
        };
        let view_ray = Ray::from_unit(side + side_normal, -side_normal);
        let expected = side_normal.dot(light.direction_to_light(side));
        let color = shade(&scene, &side_hit, &view_ray);
        assert!(expected > 0.0);
        assert!((color.x - expected).abs() < 1e-5);
    }

    #[test]
    fn test_shading_is_clamped() {
        let mut scene = Scene::new();
        scene.add(Sphere::new(Vec3::new(0.0, 0.0, -5.0), 1.0, Material::new(Color::ONE)).unwrap());
        scene.add_light(Light::directional(-Vec3::Z, Color::ONE, 3.0).unwrap());

        let color = ray_color(&Ray::from_unit(Vec3::ZERO, -Vec3::Z), &scene);
        assert_eq!(color, Color::ONE);
    }

    #[test]
    fn test_no_antialiasing_matches_center_ray() {
        let scene = sphere_scene();
        let camera = camera();
        let config = RenderConfig::new(8, 8).with_antialiasing(false).with_parallel(false);
        let image = render(&scene, &camera, &config).unwrap();

        for y in 0..8 {
            for x in 0..8 {
                let ray = camera.get_ray(x, y, PIXEL_CENTER, 8, 8);
                assert_eq!(image.get(x, y), ray_color(&ray, &scene));
            }
        }
    }

    #[test]
    fn test_render_pixel_accepts_injected_rng() {
        let scene = sphere_scene();
        let camera = camera();
        let config = RenderConfig::new(10, 10);

        let a = render_pixel(&scene, &camera, 5, 5, &config, &mut StdRng::seed_from_u64(3));
        let b = render_pixel(&scene, &camera, 5, 5, &config, &mut StdRng::seed_from_u64(3));
        assert_eq!(a, b);
    }

    #[test]
    fn test_antialiasing_averages_jittered_samples() {
        let scene = sphere_scene();
        let camera = camera();
        let config = RenderConfig::new(16, 16).with_samples(3, 2);
        // Pixel covering part of the sphere
        let (x, y) = (10, 8);

        let offsets = config.sample_pattern().offsets(&mut StdRng::seed_from_u64(9));
        assert_eq!(offsets.len(), 6);
        let mut sum = Color::ZERO;
        for offset in &offsets {
            sum += ray_color(&camera.get_ray(x, y, *offset, 16, 16), &scene);
        }

        let color = render_pixel(&scene, &camera, x, y, &config, &mut StdRng::seed_from_u64(9));
        assert!((color - sum / 6.0).length() < 1e-6);
    }

    #[test]
    fn test_sequential_and_parallel_match() {
        let desc = SceneDescription::demo();
        let config = RenderConfig::new(24, 18).with_seed(11).with_bucket_size(8);
        let scene = Scene::from_description(&desc).unwrap();
        let camera = Camera::from_description(&desc.camera, config.aspect_ratio()).unwrap();

        let parallel = render(&scene, &camera, &config).unwrap();
        let sequential = render(&scene, &camera, &config.clone().with_parallel(false)).unwrap();
        assert_eq!(parallel, sequential);
    }

    #[test]
    fn test_seed_changes_jitter() {
        let scene = sphere_scene();
        let camera = camera();
        let config = RenderConfig::new(16, 16).with_parallel(false);

        let a = render(&scene, &camera, &config.clone().with_seed(1)).unwrap();
        let b = render(&scene, &camera, &config.clone().with_seed(1)).unwrap();
        let c = render(&scene, &camera, &config.with_seed(2)).unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_progress_reaches_total() {
        let scene = sphere_scene();
        let camera = camera();
        for parallel in [false, true] {
            let config = RenderConfig::new(10, 6).with_parallel(parallel).with_bucket_size(4);
            let reports = Mutex::new(Vec::new());
            let image = render_with_progress(&scene, &camera, &config, &|p: RenderProgress| reports.lock().unwrap().push(p)).unwrap();

            let reports = reports.into_inner().unwrap();
            assert!(!reports.is_empty());
            let last = reports.iter().map(|p| p.completed_pixels).max().unwrap();
            assert_eq!(last, 60);
            assert!(reports.iter().all(|p| p.total_pixels == 60));
            // Observing progress does not change the image
            assert_eq!(image, render(&scene, &camera, &config).unwrap());
        }
    }

    #[test]
    fn test_invalid_config() {
        let scene = sphere_scene();
        let camera = camera();
        assert_eq!(
            render(&scene, &camera, &RenderConfig::new(0, 10)),
            Err(RenderError::InvalidResolution { width: 0, height: 10 })
        );
        assert_eq!(
            render(&scene, &camera, &RenderConfig::new(4, 4).with_samples(0, 4)),
            Err(RenderError::InvalidSampleGrid { h: 0, v: 4 })
        );
        assert_eq!(
            render(&scene, &camera, &RenderConfig::new(1, 1).with_samples(70_000, 70_000)),
            Err(RenderError::InvalidSampleGrid { h: 70_000, v: 70_000 })
        );
        assert!(RenderConfig::new(1, 1).with_samples(256, 256).validate().is_ok());
        assert!(RenderConfig::new(1, 1).with_samples(256, 257).validate().is_err());
        assert_eq!(
            render(&scene, &camera, &RenderConfig::new(4, 4).with_bucket_size(0)),
            Err(RenderError::InvalidBucketSize)
        );
        // The grid is irrelevant without anti-aliasing
        assert!(render(&scene, &camera, &RenderConfig::new(4, 4).with_samples(0, 0).with_antialiasing(false)).is_ok());
    }

    #[test]
    fn test_color_to_rgb() {
        assert_eq!(color_to_rgb(Color::ZERO), [0, 0, 0]);
        assert_eq!(color_to_rgb(Color::ONE), [255, 255, 255]);
        assert_eq!(color_to_rgb(Color::new(2.0, -1.0, 0.5)), [255, 0, 128]);
    }

    #[test]
    fn test_image_buffer() {
        let mut image = ImageBuffer::new(3, 2);
        image.set(2, 1, Color::ONE);
        assert_eq!(image.get(2, 1), Color::ONE);
        assert_eq!(image.get(0, 0), Color::ZERO);

        let bytes = image.to_rgb8();
        assert_eq!(bytes.len(), 18);
        assert_eq!(&bytes[15..18], &[255, 255, 255]);
    }
}
