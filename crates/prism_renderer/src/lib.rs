//! Prism renderer - CPU ray casting
//!
//! A direct-lighting ray caster: primary rays from a pinhole camera,
//! nearest-hit visibility over spheres and planes, hard shadows, and
//! a diffuse/specular/border shading model. Pixels are supersampled with
//! a stratified jitter grid and rendered either row by row or in
//! parallel buckets.

mod bucket;
mod camera;
mod error;
mod hittable;
mod light;
mod material;
mod plane;
mod renderer;
mod sampler;
mod scene;
mod shader;
mod sphere;

pub use bucket::{generate_buckets, render_bucket, render_buckets, Bucket, BucketResult, DEFAULT_BUCKET_SIZE};
pub use camera::{Camera, PIXEL_CENTER};
pub use error::{RenderError, SceneError};
pub use hittable::{Hit, Primitive};
pub use light::{Attenuation, DirectionalLight, Light, LightSample, PointLight, SpotLight, SHADOW_EPSILON};
pub use material::{Color, Material};
pub use plane::Plane;
pub use renderer::{
    clamp_color, color_to_rgb, ray_color, render, render_pixel, render_with_progress, shade, ImageBuffer,
    RenderConfig, RenderProgress, MAX_SAMPLES_PER_PIXEL,
};
pub use sampler::{gen_f32, pixel_rng, SamplePattern};
pub use scene::Scene;
pub use shader::{Shader, ShadingContext};
pub use sphere::Sphere;

/// Re-export Vec3 and common math types from prism_math
pub use prism_math::{Interval, Ray, Vec2, Vec3, EPSILON};
