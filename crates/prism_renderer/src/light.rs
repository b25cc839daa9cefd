//! Light sources.
//!
//! A light answers three questions about a surface point: which way the
//! light is, how far away it is, and how much light arrives there. The
//! renderer combines those answers with a shadow ray.

use crate::error::{ensure_finite, SceneError};
use crate::material::Color;
use prism_core::{AttenuationDescription, LightDescription};
use prism_math::{smoothstep, try_unit, Ray, Vec3};

/// Offset along the surface normal used to start shadow rays.
pub const SHADOW_EPSILON: f32 = 1e-4;

/// Everything the shaders need to know about one light at one point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LightSample {
    /// Unit vector from the surface point toward the light
    pub direction: Vec3,
    /// Distance to the light (infinite for directional lights)
    pub distance: f32,
    /// Light arriving at the point, after attenuation and falloff
    pub intensity: Color,
}

/// Distance falloff `1 / (constant + linear * d + quadratic * d^2)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Attenuation {
    pub constant: f32,
    pub linear: f32,
    pub quadratic: f32,
}

impl Attenuation {
    /// Physically motivated falloff.
    pub const INVERSE_SQUARE: Attenuation = Attenuation {
        constant: 0.0,
        linear: 0.0,
        quadratic: 1.0,
    };

    /// No falloff at all.
    pub const NONE: Attenuation = Attenuation {
        constant: 1.0,
        linear: 0.0,
        quadratic: 0.0,
    };

    /// Create attenuation terms, rejecting negative or all-zero terms.
    pub fn new(constant: f32, linear: f32, quadratic: f32) -> Result<Self, SceneError> {
        let terms = [constant, linear, quadratic];
        let valid = terms.iter().all(|t| t.is_finite() && *t >= 0.0) && terms.iter().any(|t| *t > 0.0);
        if !valid {
            return Err(SceneError::InvalidAttenuation {
                constant,
                linear,
                quadratic,
            });
        }
        Ok(Self {
            constant,
            linear,
            quadratic,
        })
    }

    /// Multiplier applied to the light intensity at `distance`.
    pub fn factor(&self, distance: f32) -> f32 {
        let denominator = self.constant + self.linear * distance + self.quadratic * distance * distance;
        if denominator <= 0.0 {
            // Only reachable at distance zero with no constant term
            return 0.0;
        }
        1.0 / denominator
    }
}

impl Default for Attenuation {
    fn default() -> Self {
        Self::INVERSE_SQUARE
    }
}

/// An infinitely distant light, like the sun.
#[derive(Debug, Clone, PartialEq)]
pub struct DirectionalLight {
    /// Direction the light travels, from the light into the scene
    direction: Vec3,
    color: Color,
    intensity: f32,
}

/// A light radiating equally in all directions from a point.
#[derive(Debug, Clone, PartialEq)]
pub struct PointLight {
    position: Vec3,
    color: Color,
    intensity: f32,
    attenuation: Attenuation,
}

/// A point light restricted to a cone.
#[derive(Debug, Clone, PartialEq)]
pub struct SpotLight {
    position: Vec3,
    /// Cone axis, pointing away from the light
    direction: Vec3,
    /// Cone half-angle in radians
    angle: f32,
    cos_cutoff: f32,
    color: Color,
    intensity: f32,
    attenuation: Attenuation,
}

/// The closed set of light sources.
#[derive(Debug, Clone, PartialEq)]
pub enum Light {
    Directional(DirectionalLight),
    Point(PointLight),
    Spot(SpotLight),
}

fn check_emission(color: Color, intensity: f32) -> Result<(), SceneError> {
    ensure_finite(color, "light color")?;
    if color.min_element() < 0.0 {
        return Err(SceneError::InvalidIntensity(color.min_element()));
    }
    if !intensity.is_finite() || intensity < 0.0 {
        return Err(SceneError::InvalidIntensity(intensity));
    }
    Ok(())
}

impl DirectionalLight {
    pub fn new(direction: Vec3, color: Color, intensity: f32) -> Result<Self, SceneError> {
        check_emission(color, intensity)?;
        let direction = try_unit(direction).map_err(SceneError::degenerate("directional light direction"))?;
        Ok(Self {
            direction,
            color,
            intensity,
        })
    }

    pub fn direction(&self) -> Vec3 {
        self.direction
    }
}

impl PointLight {
    pub fn new(position: Vec3, color: Color, intensity: f32, attenuation: Attenuation) -> Result<Self, SceneError> {
        check_emission(color, intensity)?;
        ensure_finite(position, "point light position")?;
        Ok(Self {
            position,
            color,
            intensity,
            attenuation,
        })
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }
}

impl SpotLight {
    /// Create a spot light. `angle` is the cone half-angle in radians.
    pub fn new(
        position: Vec3,
        direction: Vec3,
        angle: f32,
        color: Color,
        intensity: f32,
        attenuation: Attenuation,
    ) -> Result<Self, SceneError> {
        check_emission(color, intensity)?;
        ensure_finite(position, "spot light position")?;
        let direction = try_unit(direction).map_err(SceneError::degenerate("spot light direction"))?;
        if !(angle > 0.0 && angle <= std::f32::consts::FRAC_PI_2) {
            return Err(SceneError::InvalidConeAngle(angle));
        }
        Ok(Self {
            position,
            direction,
            angle,
            cos_cutoff: angle.cos(),
            color,
            intensity,
            attenuation,
        })
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn direction(&self) -> Vec3 {
        self.direction
    }

    pub fn angle(&self) -> f32 {
        self.angle
    }

    /// 1 on the cone axis, fading smoothly to 0 at the rim and beyond.
    fn falloff(&self, point: Vec3) -> f32 {
        let Some(from_light) = (point - self.position).try_normalize() else {
            return 0.0;
        };
        let cos_theta = from_light.dot(self.direction);
        if cos_theta <= self.cos_cutoff {
            return 0.0;
        }
        smoothstep(self.cos_cutoff, 1.0, cos_theta)
    }
}

impl Light {
    /// Constructs a new directional light. See `DirectionalLight::new(..)`.
    pub fn directional(direction: Vec3, color: Color, intensity: f32) -> Result<Light, SceneError> {
        DirectionalLight::new(direction, color, intensity).map(Light::Directional)
    }

    /// Constructs a new point light. See `PointLight::new(..)`.
    pub fn point(position: Vec3, color: Color, intensity: f32, attenuation: Attenuation) -> Result<Light, SceneError> {
        PointLight::new(position, color, intensity, attenuation).map(Light::Point)
    }

    /// Constructs a new spot light. See `SpotLight::new(..)`.
    pub fn spot(
        position: Vec3,
        direction: Vec3,
        angle: f32,
        color: Color,
        intensity: f32,
        attenuation: Attenuation,
    ) -> Result<Light, SceneError> {
        SpotLight::new(position, direction, angle, color, intensity, attenuation).map(Light::Spot)
    }

    /// Convert a scene file light. Spot angles in the file are in degrees.
    pub fn from_description(desc: &LightDescription) -> Result<Light, SceneError> {
        match desc {
            LightDescription::Directional {
                direction,
                color,
                intensity,
            } => Light::directional(Vec3::from(*direction), Color::from(*color), *intensity),
            LightDescription::Point {
                position,
                color,
                intensity,
                attenuation,
            } => Light::point(
                Vec3::from(*position),
                Color::from(*color),
                *intensity,
                attenuation_from(attenuation.as_ref())?,
            ),
            LightDescription::Spot {
                position,
                direction,
                angle,
                color,
                intensity,
                attenuation,
            } => Light::spot(
                Vec3::from(*position),
                Vec3::from(*direction),
                angle.to_radians(),
                Color::from(*color),
                *intensity,
                attenuation_from(attenuation.as_ref())?,
            ),
        }
    }

    /// Unit vector from `point` toward the light.
    pub fn direction_to_light(&self, point: Vec3) -> Vec3 {
        match self {
            Light::Directional(l) => -l.direction,
            Light::Point(l) => (l.position - point).normalize_or_zero(),
            Light::Spot(l) => (l.position - point).normalize_or_zero(),
        }
    }

    /// Distance from `point` to the light; infinite for directional lights.
    pub fn distance_to_light(&self, point: Vec3) -> f32 {
        match self {
            Light::Directional(_) => f32::INFINITY,
            Light::Point(l) => l.position.distance(point),
            Light::Spot(l) => l.position.distance(point),
        }
    }

    /// Light arriving at `point`, ignoring occlusion.
    pub fn intensity_at(&self, point: Vec3) -> Color {
        match self {
            Light::Directional(l) => l.color * l.intensity,
            Light::Point(l) => {
                let distance = l.position.distance(point);
                l.color * l.intensity * l.attenuation.factor(distance)
            }
            Light::Spot(l) => {
                let falloff = l.falloff(point);
                if falloff == 0.0 {
                    return Color::ZERO;
                }
                let distance = l.position.distance(point);
                l.color * l.intensity * l.attenuation.factor(distance) * falloff
            }
        }
    }

    /// Direction, distance and intensity at `point` in one go.
    pub fn sample(&self, point: Vec3) -> LightSample {
        LightSample {
            direction: self.direction_to_light(point),
            distance: self.distance_to_light(point),
            intensity: self.intensity_at(point),
        }
    }

    /// Ray from just above the surface toward the light, with the distance
    /// an occluder must be within to cast a shadow.
    pub fn shadow_ray(&self, point: Vec3, normal: Vec3) -> Option<(Ray, f32)> {
        let origin = point + SHADOW_EPSILON * normal;
        let ray = match self {
            Light::Directional(l) => Ray::from_unit(origin, -l.direction),
            Light::Point(PointLight { position, .. }) | Light::Spot(SpotLight { position, .. }) => {
                Ray::new(origin, *position - origin).ok()?
            }
        };
        let distance = match self {
            Light::Directional(_) => f32::INFINITY,
            _ => self.distance_to_light(origin),
        };
        Some((ray, distance))
    }
}

fn attenuation_from(desc: Option<&AttenuationDescription>) -> Result<Attenuation, SceneError> {
    match desc {
        Some(a) => Attenuation::new(a.constant, a.linear, a.quadratic),
        None => Ok(Attenuation::default()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_directional_light() {
        let light = Light::directional(Vec3::new(0.0, -2.0, 0.0), Color::ONE, 0.5).unwrap();
        let point = Vec3::new(10.0, 0.0, -3.0);

        assert_eq!(light.direction_to_light(point), Vec3::Y);
        assert_eq!(light.distance_to_light(point), f32::INFINITY);
        assert_eq!(light.intensity_at(point), Color::splat(0.5));
        // Same everywhere
        assert_eq!(light.intensity_at(Vec3::ZERO), light.intensity_at(point));
    }

    #[test]
    fn test_point_light_inverse_square() {
        let light = Light::point(Vec3::new(0.0, 2.0, 0.0), Color::ONE, 8.0, Attenuation::INVERSE_SQUARE).unwrap();

        assert_eq!(light.direction_to_light(Vec3::ZERO), Vec3::Y);
        assert!((light.distance_to_light(Vec3::ZERO) - 2.0).abs() < 1e-6);
        // 8 / 2^2
        assert!((light.intensity_at(Vec3::ZERO) - Color::splat(2.0)).length() < 1e-5);
        // 8 / 4^2
        let further = light.intensity_at(Vec3::new(0.0, -2.0, 0.0));
        assert!((further - Color::splat(0.5)).length() < 1e-5);
    }

    #[test]
    fn test_point_light_no_attenuation() {
        let light = Light::point(Vec3::new(0.0, 100.0, 0.0), Color::ONE, 1.0, Attenuation::NONE).unwrap();
        assert_eq!(light.intensity_at(Vec3::ZERO), Color::ONE);
    }

    #[test]
    fn test_spot_light_cone() {
        let light = Light::spot(
            Vec3::new(0.0, 10.0, 0.0),
            -Vec3::Y,
            30f32.to_radians(),
            Color::ONE,
            1.0,
            Attenuation::NONE,
        )
        .unwrap();

        // On the axis: full intensity
        assert!((light.intensity_at(Vec3::ZERO) - Color::ONE).length() < 1e-5);

        // 15 degrees off axis: dimmer but lit
        let inside = Vec3::new(10.0 * 15f32.to_radians().tan(), 0.0, 0.0);
        let inside_intensity = light.intensity_at(inside).x;
        assert!(inside_intensity > 0.0 && inside_intensity < 1.0);

        // 45 degrees off axis: outside the cone
        assert_eq!(light.intensity_at(Vec3::new(10.0, 0.0, 0.0)), Color::ZERO);

        // Behind the light
        assert_eq!(light.intensity_at(Vec3::new(0.0, 20.0, 0.0)), Color::ZERO);
    }

    #[test]
    fn test_invalid_lights() {
        assert!(matches!(
            Light::directional(Vec3::ZERO, Color::ONE, 1.0),
            Err(SceneError::DegenerateVector { .. })
        ));
        assert!(matches!(
            Light::point(Vec3::ZERO, Color::ONE, -1.0, Attenuation::NONE),
            Err(SceneError::InvalidIntensity(_))
        ));
        assert!(matches!(
            Light::spot(Vec3::ZERO, Vec3::Z, 0.0, Color::ONE, 1.0, Attenuation::NONE),
            Err(SceneError::InvalidConeAngle(_))
        ));
        // Wider than a hemisphere would light points behind the spot
        assert!(matches!(
            Light::spot(Vec3::ZERO, Vec3::Z, 120f32.to_radians(), Color::ONE, 1.0, Attenuation::NONE),
            Err(SceneError::InvalidConeAngle(_))
        ));
        assert!(Light::spot(Vec3::ZERO, Vec3::Z, std::f32::consts::FRAC_PI_2, Color::ONE, 1.0, Attenuation::NONE).is_ok());
        assert!(Attenuation::new(0.0, 0.0, 0.0).is_err());
        assert!(Attenuation::new(1.0, -0.5, 0.0).is_err());
    }

    #[test]
    fn test_shadow_ray_points_at_light() {
        let light = Light::point(Vec3::new(0.0, 5.0, 0.0), Color::ONE, 1.0, Attenuation::NONE).unwrap();
        let (ray, distance) = light.shadow_ray(Vec3::ZERO, Vec3::Y).unwrap();

        assert!(ray.origin().y > 0.0);
        assert!((ray.direction() - Vec3::Y).length() < 1e-6);
        assert!((distance - (5.0 - SHADOW_EPSILON)).abs() < 1e-4);

        let sun = Light::directional(-Vec3::Y, Color::ONE, 1.0).unwrap();
        let (ray, distance) = sun.shadow_ray(Vec3::ZERO, Vec3::Y).unwrap();
        assert_eq!(ray.direction(), Vec3::Y);
        assert_eq!(distance, f32::INFINITY);
    }

    #[test]
    fn test_from_description_converts_degrees() {
        let desc = LightDescription::Spot {
            position: [0.0, 1.0, 0.0],
            direction: [0.0, -1.0, 0.0],
            angle: 90.0,
            color: [1.0, 1.0, 1.0],
            intensity: 1.0,
            attenuation: None,
        };
        match Light::from_description(&desc).unwrap() {
            Light::Spot(spot) => {
                assert!((spot.angle() - std::f32::consts::FRAC_PI_2).abs() < 1e-6);
            }
            other => panic!("expected spot light, got {:?}", other),
        }
    }
}
