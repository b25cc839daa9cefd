//! Surface materials: the per-primitive shading coefficients.

use crate::error::{ensure_finite, SceneError};
use crate::shader::Shader;
use prism_core::MaterialDescription;
use prism_math::Vec3;

/// Color type alias (RGB values typically 0-1)
pub type Color = Vec3;

/// Shading coefficients owned by a primitive.
#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    /// Base color, modulates the diffuse term
    pub color: Color,
    /// Lambertian coefficient
    pub diffuse: f32,
    /// Phong highlight coefficient
    pub specular: f32,
    /// Phong exponent, at least 1
    pub shininess: f32,
    /// Edge highlight coefficient
    pub border: f32,
    /// Tint added at grazing angles
    pub border_color: Color,
    /// Start of the edge band in terms of `1 - dot(view, normal)`, in [0, 1)
    pub border_thickness: f32,
}

impl Default for Material {
    fn default() -> Self {
        Self::new(Color::splat(0.5))
    }
}

impl Material {
    /// A purely diffuse material of the given color.
    pub fn new(color: Color) -> Self {
        Self {
            color,
            diffuse: 1.0,
            specular: 0.0,
            shininess: 32.0,
            border: 0.0,
            border_color: Color::splat(185.0 / 255.0),
            border_thickness: 0.7,
        }
    }

    /// Set the diffuse coefficient.
    pub fn with_diffuse(mut self, diffuse: f32) -> Self {
        self.diffuse = diffuse;
        self
    }

    /// Add a Phong highlight.
    pub fn with_specular(mut self, specular: f32, shininess: f32) -> Self {
        self.specular = specular;
        self.shininess = shininess;
        self
    }

    /// Add an edge highlight.
    pub fn with_border(mut self, border: f32, color: Color, thickness: f32) -> Self {
        self.border = border;
        self.border_color = color;
        self.border_thickness = thickness;
        self
    }

    /// Convert a scene file material.
    pub fn from_description(desc: &MaterialDescription) -> Result<Self, SceneError> {
        let material = Self {
            color: Color::from(desc.color),
            diffuse: desc.diffuse,
            specular: desc.specular,
            shininess: desc.shininess,
            border: desc.border,
            border_color: Color::from(desc.border_color),
            border_thickness: desc.border_thickness,
        };
        material.validate()?;
        Ok(material)
    }

    /// Check that every coefficient is usable.
    pub fn validate(&self) -> Result<(), SceneError> {
        ensure_finite(self.color, "material color")?;
        ensure_finite(self.border_color, "material border color")?;

        let coefficients = [
            ("diffuse", self.diffuse),
            ("specular", self.specular),
            ("border", self.border),
        ];
        for (name, value) in coefficients {
            if !value.is_finite() || value < 0.0 {
                return Err(SceneError::InvalidMaterial {
                    reason: format!("{} coefficient must be non-negative, got {}", name, value),
                });
            }
        }
        if self.color.min_element() < 0.0 || self.border_color.min_element() < 0.0 {
            return Err(SceneError::InvalidMaterial {
                reason: "colors must be non-negative".to_string(),
            });
        }
        if !self.shininess.is_finite() || self.shininess < 1.0 {
            return Err(SceneError::InvalidMaterial {
                reason: format!("shininess must be at least 1, got {}", self.shininess),
            });
        }
        if !(0.0..1.0).contains(&self.border_thickness) {
            return Err(SceneError::InvalidMaterial {
                reason: format!(
                    "border thickness must be in [0, 1), got {}",
                    self.border_thickness
                ),
            });
        }
        Ok(())
    }

    /// Shaders with a non-zero coefficient on this material.
    pub fn shaders(&self) -> impl Iterator<Item = Shader> + '_ {
        Shader::ALL
            .into_iter()
            .filter(move |shader| shader.coefficient(self) > 0.0)
    }
}
