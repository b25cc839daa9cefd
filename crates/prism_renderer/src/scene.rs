//! The renderable scene: validated primitives and lights.

use std::collections::BTreeMap;

use crate::error::{ensure_finite, SceneError};
use crate::hittable::{Hit, Primitive};
use crate::light::Light;
use crate::material::{Color, Material};
use prism_core::SceneDescription;
use prism_math::{Interval, Ray, Vec3};

/// An ordered list of primitives and lights.
///
/// Everything in a `Scene` was validated on construction, so rendering
/// can treat it as read-only and infallible.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    primitives: Vec<Primitive>,
    lights: Vec<Light>,
    background: Color,
}

impl Scene {
    /// Create an empty scene with a black background.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the color returned for rays that hit nothing.
    pub fn with_background(mut self, background: Color) -> Self {
        self.background = background;
        self
    }

    /// Add a primitive. Earlier primitives win exact distance ties.
    pub fn add(&mut self, primitive: impl Into<Primitive>) {
        self.primitives.push(primitive.into());
    }

    /// Add a light.
    pub fn add_light(&mut self, light: Light) {
        self.lights.push(light);
    }

    /// Build a scene from a description, failing on the first invalid entry.
    pub fn from_description(desc: &SceneDescription) -> Result<Self, SceneError> {
        let background = ensure_finite(Color::from(desc.background), "background color")?;

        let mut materials: BTreeMap<&str, Material> = BTreeMap::new();
        for (name, material) in &desc.materials {
            materials.insert(name.as_str(), Material::from_description(material)?);
        }

        let mut scene = Scene::new().with_background(background);
        for primitive in &desc.primitives {
            scene.add(Primitive::from_description(primitive, |name| materials.get(name))?);
        }
        for light in &desc.lights {
            scene.add_light(Light::from_description(light)?);
        }

        log::debug!(
            "Built scene: {} materials, {} primitives, {} lights",
            materials.len(),
            scene.primitives.len(),
            scene.lights.len()
        );

        Ok(scene)
    }

    pub fn primitives(&self) -> &[Primitive] {
        &self.primitives
    }

    pub fn lights(&self) -> &[Light] {
        &self.lights
    }

    pub fn background(&self) -> Color {
        self.background
    }

    /// Nearest forward hit along `ray`.
    pub fn find_nearest(&self, ray: &Ray) -> Option<Hit<'_>> {
        self.find_nearest_within(ray, Interval::forward())
    }

    /// Nearest hit strictly inside `ray_t`.
    ///
    /// Primitives are tested in order; a later primitive only replaces the
    /// current candidate when strictly closer.
    pub fn find_nearest_within(&self, ray: &Ray, ray_t: Interval) -> Option<Hit<'_>> {
        let mut closest: Option<(usize, f32)> = None;

        for (index, primitive) in self.primitives.iter().enumerate() {
            let max = closest.map_or(ray_t.max, |(_, t)| t);
            if let Some(t) = primitive.intersect_within(ray, ray_t.with_max(max)) {
                closest = Some((index, t));
            }
        }

        let (index, t) = closest?;
        self.primitives[index].hit_at(ray, t, index)
    }

    /// Whether something blocks `light` as seen from `point`.
    pub fn is_shadowed(&self, point: Vec3, normal: Vec3, light: &Light) -> bool {
        match light.shadow_ray(point, normal) {
            Some((ray, distance)) => self
                .primitives
                .iter()
                .any(|primitive| primitive.intersect_within(&ray, Interval::forward().with_max(distance)).is_some()),
            // Point sits on the light itself
            None => false,
        }
    }
}
