use crate::{try_unit, DegenerateVectorError, Vec3};

/// A half-line in 3D space with an origin and a unit-length direction.
///
/// The direction is normalized on construction so that the parameter `t`
/// of [`Ray::at`] is a true distance along the ray.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Ray {
    origin: Vec3,
    direction: Vec3,
}

impl Ray {
    /// Create a new ray, normalizing `direction`.
    pub fn new(origin: Vec3, direction: Vec3) -> Result<Self, DegenerateVectorError> {
        Ok(Self {
            origin,
            direction: try_unit(direction)?,
        })
    }

    /// Create a ray from a direction that should already be unit length.
    ///
    /// A direction that is not unit length is renormalized, so intersection
    /// code can always rely on `|direction| == 1`. A zero direction stays zero.
    #[inline]
    pub fn from_unit(origin: Vec3, direction: Vec3) -> Self {
        let direction = if direction.is_normalized() {
            direction
        } else {
            direction.normalize_or_zero()
        };
        Self { origin, direction }
    }

    /// Get the origin point of the ray.
    #[inline]
    pub fn origin(&self) -> Vec3 {
        self.origin
    }

    /// Get the unit direction of the ray.
    #[inline]
    pub fn direction(&self) -> Vec3 {
        self.direction
    }

    /// Get the point along the ray at parameter t.
    ///
    /// Returns: origin + t * direction
    #[inline]
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}
