//! Infinite plane primitive.

use crate::error::{ensure_finite, SceneError};
use crate::Material;
use prism_math::{try_unit, Interval, Ray, Vec3, EPSILON};

/// An infinite plane through `point` with unit `normal`.
///
/// Planes are two-sided: hits report the normal facing the incoming ray.
#[derive(Debug, Clone, PartialEq)]
pub struct Plane {
    point: Vec3,
    normal: Vec3,
    material: Material,
}

impl Plane {
    /// Create a new plane. `normal` is normalized.
    pub fn new(point: Vec3, normal: Vec3, material: Material) -> Result<Self, SceneError> {
        ensure_finite(point, "plane point")?;
        let normal = try_unit(normal).map_err(SceneError::degenerate("plane normal"))?;
        material.validate()?;

        Ok(Self {
            point,
            normal,
            material,
        })
    }

    pub fn point(&self) -> Vec3 {
        self.point
    }

    /// The plane's fixed unit normal.
    pub fn normal(&self) -> Vec3 {
        self.normal
    }

    pub fn material(&self) -> &Material {
        &self.material
    }

    /// Solve `dot(o + t*d - p, n) = 0` for `t` strictly inside `ray_t`.
    pub fn intersect_within(&self, ray: &Ray, ray_t: Interval) -> Option<f32> {
        let denominator = ray.direction().dot(self.normal);
        if denominator.abs() < EPSILON {
            // Ray is parallel to the plane
            return None;
        }

        let t = (self.point - ray.origin()).dot(self.normal) / denominator;
        ray_t.surrounds(t).then_some(t)
    }
}
