// Re-export glam for convenience
pub use glam::*;

// Prism math types
mod interval;
mod ray;
mod vector;

pub use interval::Interval;
pub use ray::Ray;
pub use vector::{reflect, smoothstep, try_unit, DegenerateVectorError};

/// Minimum parametric distance accepted as a hit.
///
/// Anything closer is treated as the ray re-hitting the surface it left.
pub const EPSILON: f32 = 1e-4;
