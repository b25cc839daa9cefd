//! Sphere primitive for ray tracing.

use crate::error::{ensure_finite, SceneError};
use crate::Material;
use prism_math::{try_unit, DegenerateVectorError, Interval, Ray, Vec3};

/// A sphere primitive.
#[derive(Debug, Clone, PartialEq)]
pub struct Sphere {
    center: Vec3,
    radius: f32,
    material: Material,
}

impl Sphere {
    /// Create a new sphere.
    pub fn new(center: Vec3, radius: f32, material: Material) -> Result<Self, SceneError> {
        ensure_finite(center, "sphere center")?;
        if !radius.is_finite() || radius <= 0.0 {
            return Err(SceneError::InvalidRadius(radius));
        }
        material.validate()?;

        Ok(Self {
            center,
            radius,
            material,
        })
    }

    pub fn center(&self) -> Vec3 {
        self.center
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn material(&self) -> &Material {
        &self.material
    }

    /// Smallest root of `|o + t*d - c|^2 = r^2` strictly inside `ray_t`.
    pub fn intersect_within(&self, ray: &Ray, ray_t: Interval) -> Option<f32> {
        let oc = self.center - ray.origin();
        // Direction is unit length, so the quadratic's `a` term is 1
        let h = ray.direction().dot(oc);
        let c = oc.length_squared() - self.radius * self.radius;

        let discriminant = h * h - c;
        if discriminant < 0.0 {
            return None;
        }

        let sqrtd = discriminant.sqrt();

        // Find the nearest root in the acceptable range
        let mut root = h - sqrtd;
        if !ray_t.surrounds(root) {
            root = h + sqrtd;
            if !ray_t.surrounds(root) {
                return None;
            }
        }

        Some(root)
    }

    /// Outward unit normal at `point`.
    pub fn normal_at(&self, point: Vec3) -> Result<Vec3, DegenerateVectorError> {
        try_unit(point - self.center)
    }
}
