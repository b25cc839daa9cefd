//! Simple ray casting example.
//!
//! Renders the built-in demo scene plus a row of small spheres and saves
//! the result in PPM format.

use prism_core::SceneDescription;
use prism_renderer::{color_to_rgb, render, Camera, Color, ImageBuffer, Material, RenderConfig, Scene, Sphere, Vec3};
use std::fs::File;
use std::io::{BufWriter, Write};

fn main() {
    println!("Prism Ray Caster - Simple Example");
    println!("=================================");

    let config = RenderConfig::new(400, 300).with_samples(3, 3);

    // Build the scene
    let start = std::time::Instant::now();
    let desc = SceneDescription::demo();
    let scene = build_scene(&desc);
    println!("Scene built in {:?}", start.elapsed());

    let camera = Camera::from_description(&desc.camera, config.aspect_ratio()).expect("Invalid camera");

    println!(
        "Rendering {}x{} @ {} spp...",
        config.width,
        config.height,
        config.sample_pattern().sample_count()
    );

    let start = std::time::Instant::now();
    let image = render(&scene, &camera, &config).expect("Render failed");
    println!("Rendered in {:?}", start.elapsed());

    let filename = "output.ppm";
    save_ppm(&image, filename).expect("Failed to save image");
    println!("Saved to {}", filename);
}

fn build_scene(desc: &SceneDescription) -> Scene {
    let mut scene = Scene::from_description(desc).expect("Invalid demo scene");

    // Small spheres resting on the floor in front of the main one
    let colors = [
        Color::new(0.8, 0.2, 0.2),
        Color::new(0.2, 0.8, 0.2),
        Color::new(0.9, 0.8, 0.2),
    ];
    for (i, color) in colors.into_iter().enumerate() {
        let x = -30.0 + 30.0 * i as f32;
        let material = Material::new(color).with_specular(0.5, 20.0);
        scene.add(Sphere::new(Vec3::new(x, -17.0, 70.0), 8.0, material).expect("Invalid sphere"));
    }

    println!("Scene has {} primitives", scene.primitives().len());
    scene
}

fn save_ppm(image: &ImageBuffer, filename: &str) -> std::io::Result<()> {
    let file = File::create(filename)?;
    let mut writer = BufWriter::new(file);

    writeln!(writer, "P3")?;
    writeln!(writer, "{} {}", image.width, image.height)?;
    writeln!(writer, "255")?;

    for y in 0..image.height {
        for x in 0..image.width {
            let rgb = color_to_rgb(image.get(x, y));
            writeln!(writer, "{} {} {}", rgb[0], rgb[1], rgb[2])?;
        }
    }

    Ok(())
}
