//! Error types raised before any pixel work begins.

use prism_math::DegenerateVectorError;
use thiserror::Error;

/// A primitive, light, material or camera was built from invalid parameters.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SceneError {
    #[error("sphere radius must be positive and finite, got {0}")]
    InvalidRadius(f32),

    #[error("{what} must not be a zero-length vector")]
    DegenerateVector {
        what: &'static str,
        #[source]
        source: DegenerateVectorError,
    },

    #[error("{what} must be finite")]
    NonFinite { what: &'static str },

    #[error("invalid material: {reason}")]
    InvalidMaterial { reason: String },

    #[error("light intensity must be non-negative and finite, got {0}")]
    InvalidIntensity(f32),

    #[error("attenuation terms must be non-negative with at least one positive, got ({constant}, {linear}, {quadratic})")]
    InvalidAttenuation {
        constant: f32,
        linear: f32,
        quadratic: f32,
    },

    #[error("spot light cone half-angle must be in (0, pi/2] radians, got {0}")]
    InvalidConeAngle(f32),

    #[error("field of view parameters must be positive and finite, got d={distance}, sx={scale_x}, sy={scale_y}")]
    InvalidFieldOfView {
        distance: f32,
        scale_x: f32,
        scale_y: f32,
    },

    #[error("camera up vector is parallel to the view direction")]
    CameraUpParallel,

    #[error("primitive references unknown material '{0}'")]
    UnknownMaterial(String),
}

impl SceneError {
    /// Wrap a normalization failure with the name of the offending input.
    pub(crate) fn degenerate(what: &'static str) -> impl FnOnce(DegenerateVectorError) -> SceneError {
        move |source| SceneError::DegenerateVector { what, source }
    }
}

/// Render settings that make the render impossible.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    #[error("image resolution must be non-zero, got {width}x{height}")]
    InvalidResolution { width: u32, height: u32 },

    #[error("anti-aliasing grid must be at least 1x1 and at most 65536 samples, got {h}x{v}")]
    InvalidSampleGrid { h: u32, v: u32 },

    #[error("bucket size must be non-zero")]
    InvalidBucketSize,
}

/// Reject NaN and infinite vector components.
pub(crate) fn ensure_finite(v: glam::Vec3, what: &'static str) -> Result<glam::Vec3, SceneError> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(SceneError::NonFinite { what })
    }
}
