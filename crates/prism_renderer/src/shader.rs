//! Local shading model.
//!
//! Three shaders contribute to a surface color:
//! - `Diffuse`: Lambertian term, once per visible light
//! - `Specular`: Phong highlight, once per visible light
//! - `Border`: grazing-angle outline, once per hit and independent of lights

use crate::hittable::Hit;
use crate::light::LightSample;
use crate::material::{Color, Material};
use prism_math::{reflect, Vec3};

/// The closed set of shading terms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shader {
    Diffuse,
    Specular,
    Border,
}

/// Geometry of the surface being shaded.
#[derive(Debug, Clone, Copy)]
pub struct ShadingContext<'a> {
    pub point: Vec3,
    /// Unit surface normal
    pub normal: Vec3,
    /// Unit vector from the surface toward the viewer
    pub view: Vec3,
    pub material: &'a Material,
}

impl<'a> ShadingContext<'a> {
    /// Build the context for a hit seen along a ray with direction `ray_direction`.
    pub fn from_hit(hit: &Hit<'a>, ray_direction: Vec3) -> Self {
        Self {
            point: hit.point,
            normal: hit.normal,
            view: -ray_direction,
            material: hit.material,
        }
    }
}

impl Shader {
    /// Every shader, in accumulation order.
    pub const ALL: [Shader; 3] = [Shader::Diffuse, Shader::Specular, Shader::Border];

    /// Whether this term is evaluated once per light.
    pub fn is_light_dependent(self) -> bool {
        match self {
            Shader::Diffuse | Shader::Specular => true,
            Shader::Border => false,
        }
    }

    /// The material coefficient that scales this term.
    pub fn coefficient(self, material: &Material) -> f32 {
        match self {
            Shader::Diffuse => material.diffuse,
            Shader::Specular => material.specular,
            Shader::Border => material.border,
        }
    }

    /// Color contributed by this shader.
    ///
    /// Light-dependent shaders contribute nothing when `light` is `None`;
    /// `Border` ignores `light`.
    pub fn contribution(self, ctx: &ShadingContext, light: Option<&LightSample>) -> Color {
        let material = ctx.material;
        match (self, light) {
            (Shader::Diffuse, Some(light)) => {
                let n_dot_l = ctx.normal.dot(light.direction).max(0.0);
                material.diffuse * material.color * light.intensity * n_dot_l
            }
            (Shader::Specular, Some(light)) => {
                // Mirror the light direction about the normal
                let reflected = reflect(-light.direction, ctx.normal);
                let r_dot_v = reflected.dot(ctx.view).max(0.0);
                if r_dot_v == 0.0 {
                    return Color::ZERO;
                }
                material.specular * light.intensity * r_dot_v.powf(material.shininess)
            }
            (Shader::Diffuse | Shader::Specular, None) => Color::ZERO,
            (Shader::Border, _) => {
                let edge = (1.0 - ctx.view.dot(ctx.normal)).max(0.0);
                let thickness = material.border_thickness;
                let band = ((edge - thickness) / (1.0 - thickness)).clamp(0.0, 1.0);
                material.border * band * material.border_color
            }
        }
    }
}
