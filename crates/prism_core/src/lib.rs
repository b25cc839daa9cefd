//! Prism Core - renderer-agnostic scene description.
//!
//! This crate provides:
//!
//! - **Scene description types**: `SceneDescription`, `CameraDescription`,
//!   `MaterialDescription`, `PrimitiveDescription`, `LightDescription`
//! - **Loading**: JSON scene files via serde
//! - **Demo scene**: a built-in scene used when no file is given
//!
//! Descriptions are plain data. Validation happens when the renderer turns
//! a description into a `Scene`.
//!
//! # Example
//!
//! ```ignore
//! use prism_core::load_scene;
//!
//! let description = load_scene("scene.json")?;
//! println!("Loaded {} primitives, {} lights",
//!     description.primitives.len(),
//!     description.lights.len());
//! ```

pub mod loader;
pub mod scene;

// Re-export commonly used types
pub use loader::{load_scene, load_scene_from_str, LoadError, LoadResult};
pub use scene::{
    AttenuationDescription, CameraDescription, LightDescription, MaterialDescription,
    PrimitiveDescription, SceneDescription,
};
