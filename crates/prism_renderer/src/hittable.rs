//! Primitive enum and the Hit record produced by ray-object intersection.

use crate::error::SceneError;
use crate::material::Material;
use crate::plane::Plane;
use crate::sphere::Sphere;
use prism_core::PrimitiveDescription;
use prism_math::{DegenerateVectorError, Interval, Ray, Vec3};

/// Record of a ray-object intersection.
#[derive(Debug, Clone, Copy)]
pub struct Hit<'a> {
    /// Parameter t where the intersection occurs
    pub t: f32,
    /// Point of intersection
    pub point: Vec3,
    /// Unit surface normal. Outward for spheres, facing the ray for planes.
    pub normal: Vec3,
    /// Material at the intersection point
    pub material: &'a Material,
    /// Index of the primitive in its scene
    pub primitive: usize,
}

/// The closed set of scene geometry.
#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    Sphere(Sphere),
    Plane(Plane),
}

impl From<Sphere> for Primitive {
    fn from(sphere: Sphere) -> Self {
        Primitive::Sphere(sphere)
    }
}

impl From<Plane> for Primitive {
    fn from(plane: Plane) -> Self {
        Primitive::Plane(plane)
    }
}

impl Primitive {
    /// Nearest forward intersection parameter, if any.
    pub fn intersect(&self, ray: &Ray) -> Option<f32> {
        self.intersect_within(ray, Interval::forward())
    }

    /// Nearest intersection parameter strictly inside `ray_t`.
    pub fn intersect_within(&self, ray: &Ray, ray_t: Interval) -> Option<f32> {
        match self {
            Primitive::Sphere(sphere) => sphere.intersect_within(ray, ray_t),
            Primitive::Plane(plane) => plane.intersect_within(ray, ray_t),
        }
    }

    /// Geometric normal at a point on the surface.
    pub fn normal_at(&self, point: Vec3) -> Result<Vec3, DegenerateVectorError> {
        match self {
            Primitive::Sphere(sphere) => sphere.normal_at(point),
            Primitive::Plane(plane) => Ok(plane.normal()),
        }
    }

    pub fn material(&self) -> &Material {
        match self {
            Primitive::Sphere(sphere) => sphere.material(),
            Primitive::Plane(plane) => plane.material(),
        }
    }

    /// Whether the surface is shaded from both sides.
    pub fn is_two_sided(&self) -> bool {
        matches!(self, Primitive::Plane(_))
    }

    /// Build the hit record for a known intersection parameter.
    ///
    /// Returns `None` if the normal cannot be computed, which drops the sample.
    pub fn hit_at(&self, ray: &Ray, t: f32, index: usize) -> Option<Hit<'_>> {
        let point = ray.at(t);
        let mut normal = match self.normal_at(point) {
            Ok(normal) => normal,
            Err(err) => {
                log::trace!("dropping hit on primitive {}: {}", index, err);
                return None;
            }
        };
        if self.is_two_sided() && normal.dot(ray.direction()) > 0.0 {
            normal = -normal;
        }
        Some(Hit {
            t,
            point,
            normal,
            material: self.material(),
            primitive: index,
        })
    }

    /// Convert a scene file primitive, resolving its material by name.
    pub fn from_description<'m>(
        desc: &PrimitiveDescription,
        lookup: impl Fn(&str) -> Option<&'m Material>,
    ) -> Result<Primitive, SceneError> {
        let material = lookup(desc.material())
            .ok_or_else(|| SceneError::UnknownMaterial(desc.material().to_string()))?
            .clone();
        match desc {
            PrimitiveDescription::Sphere { center, radius, .. } => {
                Sphere::new(Vec3::from(*center), *radius, material).map(Primitive::from)
            }
            PrimitiveDescription::Plane { point, normal, .. } => {
                Plane::new(Vec3::from(*point), Vec3::from(*normal), material).map(Primitive::from)
            }
        }
    }
}
