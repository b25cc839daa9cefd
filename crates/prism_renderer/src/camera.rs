//! Camera for ray generation.
//!
//! A pinhole camera with an explicit image plane: the plane sits `distance`
//! in front of the eye and spans `[-scale_x, scale_x] x [-scale_y, scale_y]`
//! in camera space.

use crate::error::{ensure_finite, SceneError};
use prism_core::CameraDescription;
use prism_math::{try_unit, Ray, Vec2, Vec3};

/// Sub-pixel offset of the pixel center.
pub const PIXEL_CENTER: Vec2 = Vec2::new(0.5, 0.5);

/// Camera for generating rays into the scene.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    eye: Vec3,

    // Orthonormal basis
    forward: Vec3,
    right: Vec3,
    up: Vec3,

    // Field of view
    distance: f32,
    scale_x: f32,
    scale_y: f32,
}

impl Camera {
    /// Create a camera at `eye` looking along `view`, with `up` as a hint for
    /// the vertical axis.
    pub fn new(eye: Vec3, view: Vec3, up: Vec3) -> Result<Self, SceneError> {
        ensure_finite(eye, "camera eye")?;
        let forward = try_unit(view).map_err(SceneError::degenerate("camera view direction"))?;
        let up_hint = try_unit(up).map_err(SceneError::degenerate("camera up vector"))?;
        let right = try_unit(forward.cross(up_hint)).map_err(|_| SceneError::CameraUpParallel)?;
        let up = right.cross(forward);

        Ok(Self {
            eye,
            forward,
            right,
            up,
            distance: 1.0,
            scale_x: 0.5,
            scale_y: 0.5,
        })
    }

    /// Set the image plane distance and half-extents.
    pub fn with_field_of_view(mut self, distance: f32, scale_x: f32, scale_y: f32) -> Result<Self, SceneError> {
        let valid = [distance, scale_x, scale_y]
            .iter()
            .all(|v| v.is_finite() && *v > 0.0);
        if !valid {
            return Err(SceneError::InvalidFieldOfView {
                distance,
                scale_x,
                scale_y,
            });
        }
        self.distance = distance;
        self.scale_x = scale_x;
        self.scale_y = scale_y;
        Ok(self)
    }

    /// Set the field of view from a vertical angle in degrees and an aspect ratio.
    pub fn with_vertical_fov(self, vfov: f32, aspect: f32) -> Result<Self, SceneError> {
        let scale_y = (vfov.to_radians() / 2.0).tan();
        self.with_field_of_view(1.0, scale_y * aspect, scale_y)
    }

    /// Convert a scene file camera. `aspect` (width / height) fills in a
    /// missing horizontal scale so pixels stay square.
    pub fn from_description(desc: &CameraDescription, aspect: f32) -> Result<Self, SceneError> {
        let scale_x = desc.scale_x.unwrap_or(desc.scale_y * aspect);
        Camera::new(Vec3::from(desc.eye), Vec3::from(desc.view), Vec3::from(desc.up))?
            .with_field_of_view(desc.distance, scale_x, desc.scale_y)
    }

    pub fn eye(&self) -> Vec3 {
        self.eye
    }

    pub fn forward(&self) -> Vec3 {
        self.forward
    }

    pub fn right(&self) -> Vec3 {
        self.right
    }

    pub fn up(&self) -> Vec3 {
        self.up
    }

    /// Generate the ray through pixel (x, y) of a `width` x `height` image at
    /// sub-pixel `offset` (each component in [0, 1)).
    ///
    /// Row 0 is the top of the image.
    pub fn get_ray(&self, x: u32, y: u32, offset: Vec2, width: u32, height: u32) -> Ray {
        let u = self.scale_x * (2.0 * (x as f32 + offset.x) / width as f32 - 1.0);
        let v = self.scale_y * (1.0 - 2.0 * (y as f32 + offset.y) / height as f32);

        // `forward` is orthogonal to `right` and `up` and `distance` > 0,
        // so this can never be zero
        let direction = self.distance * self.forward + u * self.right + v * self.up;
        Ray::from_unit(self.eye, direction.normalize())
    }
}
