//! Scene file loading.
//!
//! Scene files are JSON documents matching [`SceneDescription`].

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::scene::SceneDescription;

/// Errors that can occur while loading a scene file.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for loading operations.
pub type LoadResult<T> = Result<T, LoadError>;

/// Load a scene description from a JSON file.
pub fn load_scene<P: AsRef<Path>>(path: P) -> LoadResult<SceneDescription> {
    let path = path.as_ref();
    let text = fs::read_to_string(path)?;
    let description = load_scene_from_str(&text)?;

    log::info!(
        "Loaded scene {}: {} materials, {} primitives, {} lights",
        path.display(),
        description.materials.len(),
        description.primitives.len(),
        description.lights.len()
    );

    Ok(description)
}

/// Parse a scene description from a JSON string.
pub fn load_scene_from_str(text: &str) -> LoadResult<SceneDescription> {
    let description: SceneDescription = serde_json::from_str(text)?;
    if description.lights.is_empty() {
        log::warn!("Scene has no lights; only border shading and background will be visible");
    }
    Ok(description)
}
