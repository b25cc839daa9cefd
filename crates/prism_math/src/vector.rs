//! Vector helpers that glam does not provide in the shape we need.

use crate::Vec3;
use thiserror::Error;

/// Raised when a zero-length (or non-finite) vector is normalized.
#[derive(Error, Debug, Clone, Copy, PartialEq)]
#[error("cannot normalize degenerate vector {vector}")]
pub struct DegenerateVectorError {
    pub vector: Vec3,
}

/// Normalize `v`, failing instead of producing NaNs.
#[inline]
pub fn try_unit(v: Vec3) -> Result<Vec3, DegenerateVectorError> {
    v.try_normalize().ok_or(DegenerateVectorError { vector: v })
}

/// Reflect `incident` about `normal`.
///
/// Returns `incident - 2 * dot(incident, normal) * normal`. `normal` must be
/// unit length for the result to keep the length of `incident`.
#[inline]
pub fn reflect(incident: Vec3, normal: Vec3) -> Vec3 {
    incident - 2.0 * incident.dot(normal) * normal
}

/// Hermite interpolation between `edge0` and `edge1`, clamped to [0, 1].
#[inline]
pub fn smoothstep(edge0: f32, edge1: f32, x: f32) -> f32 {
    if edge1 <= edge0 {
        return if x < edge0 { 0.0 } else { 1.0 };
    }
    let t = ((x - edge0) / (edge1 - edge0)).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_try_unit() {
        let v = try_unit(Vec3::new(0.0, 3.0, 4.0)).unwrap();
        assert!((v.length() - 1.0).abs() < 1e-6);
        assert!((v - Vec3::new(0.0, 0.6, 0.8)).length() < 1e-6);
    }

    #[test]
    fn test_try_unit_zero_fails() {
        let err = try_unit(Vec3::ZERO).unwrap_err();
        assert_eq!(err.vector, Vec3::ZERO);
        assert!(try_unit(Vec3::new(f32::NAN, 0.0, 1.0)).is_err());
    }

    #[test]
    fn test_reflect() {
        // Ray coming down at 45 degrees bounces back up
        let incident = Vec3::new(1.0, -1.0, 0.0);
        let r = reflect(incident, Vec3::Y);
        assert_eq!(r, Vec3::new(1.0, 1.0, 0.0));

        // Head-on reflection reverses the vector
        assert_eq!(reflect(-Vec3::Z, Vec3::Z), Vec3::Z);
    }

    #[test]
    fn test_smoothstep() {
        assert_eq!(smoothstep(0.0, 1.0, -1.0), 0.0);
        assert_eq!(smoothstep(0.0, 1.0, 2.0), 1.0);
        assert!((smoothstep(0.0, 1.0, 0.5) - 0.5).abs() < 1e-6);
        assert!(smoothstep(0.2, 0.8, 0.3) < smoothstep(0.2, 0.8, 0.7));
    }
}
