//! Scene description types for Prism.
//!
//! These types mirror the JSON scene format one to one. Vectors are plain
//! `[f32; 3]` arrays and colors are RGB in [0, 1]. Nothing here is
//! validated; the renderer rejects bad values when it builds its `Scene`.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A complete scene: camera, materials, geometry and lights.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneDescription {
    pub camera: CameraDescription,

    /// Color returned for rays that hit nothing
    pub background: [f32; 3],

    /// Named materials referenced by primitives
    pub materials: BTreeMap<String, MaterialDescription>,

    pub primitives: Vec<PrimitiveDescription>,

    pub lights: Vec<LightDescription>,
}

impl Default for SceneDescription {
    fn default() -> Self {
        Self {
            camera: CameraDescription::default(),
            background: [0.0, 0.0, 0.0],
            materials: BTreeMap::new(),
            primitives: Vec::new(),
            lights: Vec::new(),
        }
    }
}

/// Pinhole camera placement and field of view.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraDescription {
    /// Eye position
    pub eye: [f32; 3],

    /// Viewing direction (need not be normalized)
    pub view: [f32; 3],

    /// Approximate up vector, re-orthogonalized against `view`
    pub up: [f32; 3],

    /// Distance from the eye to the image plane
    pub distance: f32,

    /// Horizontal half-extent of the image plane. `None` derives it from
    /// `scale_y` and the image aspect ratio.
    pub scale_x: Option<f32>,

    /// Vertical half-extent of the image plane
    pub scale_y: f32,
}

impl Default for CameraDescription {
    fn default() -> Self {
        Self {
            eye: [0.0, 0.0, 0.0],
            view: [0.0, 0.0, 1.0],
            up: [0.0, 1.0, 0.0],
            distance: 1.0,
            scale_x: None,
            scale_y: 0.5,
        }
    }
}

/// Shading coefficients for a surface.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MaterialDescription {
    /// Base (albedo) color
    pub color: [f32; 3],

    /// Lambertian coefficient
    pub diffuse: f32,

    /// Phong highlight coefficient (0 disables the highlight)
    pub specular: f32,

    /// Phong exponent
    pub shininess: f32,

    /// Edge highlight coefficient (0 disables the outline)
    pub border: f32,

    /// Tint applied at grazing angles
    pub border_color: [f32; 3],

    /// Where the edge band starts, in terms of `1 - dot(view, normal)`
    pub border_thickness: f32,
}

impl Default for MaterialDescription {
    fn default() -> Self {
        Self {
            color: [0.5, 0.5, 0.5],
            diffuse: 1.0,
            specular: 0.0,
            shininess: 32.0,
            border: 0.0,
            border_color: [185.0 / 255.0; 3],
            border_thickness: 0.7,
        }
    }
}

/// A primitive in the scene.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PrimitiveDescription {
    Sphere {
        center: [f32; 3],
        radius: f32,
        material: String,
    },
    Plane {
        point: [f32; 3],
        normal: [f32; 3],
        material: String,
    },
}

impl PrimitiveDescription {
    /// Name of the material this primitive references.
    pub fn material(&self) -> &str {
        match self {
            PrimitiveDescription::Sphere { material, .. } => material,
            PrimitiveDescription::Plane { material, .. } => material,
        }
    }
}

/// Distance falloff `1 / (constant + linear * d + quadratic * d^2)`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AttenuationDescription {
    pub constant: f32,
    pub linear: f32,
    pub quadratic: f32,
}

impl Default for AttenuationDescription {
    fn default() -> Self {
        // Inverse-square
        Self {
            constant: 0.0,
            linear: 0.0,
            quadratic: 1.0,
        }
    }
}

/// A light source.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LightDescription {
    Directional {
        /// Direction the light travels, from the light into the scene
        direction: [f32; 3],
        #[serde(default = "white")]
        color: [f32; 3],
        #[serde(default = "unit_intensity")]
        intensity: f32,
    },
    Point {
        position: [f32; 3],
        #[serde(default = "white")]
        color: [f32; 3],
        #[serde(default = "unit_intensity")]
        intensity: f32,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        attenuation: Option<AttenuationDescription>,
    },
    Spot {
        position: [f32; 3],
        direction: [f32; 3],
        /// Cone half-angle in degrees
        angle: f32,
        #[serde(default = "white")]
        color: [f32; 3],
        #[serde(default = "unit_intensity")]
        intensity: f32,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        attenuation: Option<AttenuationDescription>,
    },
}

fn white() -> [f32; 3] {
    [1.0, 1.0, 1.0]
}

fn unit_intensity() -> f32 {
    1.0
}

impl SceneDescription {
    /// The built-in scene: a blue glossy sphere resting above a gray floor,
    /// lit by a spot light from above and behind the camera plus a dim fill.
    pub fn demo() -> Self {
        let mut materials = BTreeMap::new();
        materials.insert(
            "floor".to_string(),
            MaterialDescription {
                color: [0.5, 0.5, 0.5],
                ..Default::default()
            },
        );
        materials.insert(
            "blue".to_string(),
            MaterialDescription {
                color: [0.1, 0.25, 0.9],
                specular: 0.8,
                shininess: 40.0,
                border: 0.6,
                ..Default::default()
            },
        );

        let sphere_center = [0.0, 0.0, 100.0];
        let spot_position = [0.0, 50.0, 50.0];
        let spot_direction = [
            sphere_center[0] - spot_position[0],
            sphere_center[1] - spot_position[1],
            sphere_center[2] - spot_position[2],
        ];

        Self {
            camera: CameraDescription::default(),
            background: [0.0, 0.0, 0.0],
            materials,
            primitives: vec![
                PrimitiveDescription::Sphere {
                    center: sphere_center,
                    radius: 25.0,
                    material: "blue".to_string(),
                },
                PrimitiveDescription::Plane {
                    point: [0.0, -25.0, 0.0],
                    normal: [0.0, 1.0, 0.0],
                    material: "floor".to_string(),
                },
            ],
            lights: vec![
                LightDescription::Spot {
                    position: spot_position,
                    direction: spot_direction,
                    angle: 30.0,
                    color: white(),
                    // Roughly unit intensity at the sphere under inverse-square falloff
                    intensity: 5000.0,
                    attenuation: None,
                },
                LightDescription::Directional {
                    direction: [0.0, -1.0, 0.5],
                    color: white(),
                    intensity: 0.15,
                },
            ],
        }
    }
}
