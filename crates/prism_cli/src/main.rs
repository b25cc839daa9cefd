use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use prism_core::{load_scene, SceneDescription};
use prism_renderer::{render_with_progress, Camera, RenderConfig, RenderProgress, Scene};

mod cli;
mod logger;
mod output;

use cli::Args;
use logger::{format_duration, init_logger};
use output::save_image;

/// Logs render progress in 10% steps.
///
/// Safe to call from rayon workers; each step is logged once even when
/// buckets finish out of order.
struct ProgressLogger {
    last_step: AtomicU64,
}

impl ProgressLogger {
    fn new() -> Self {
        Self {
            last_step: AtomicU64::new(0),
        }
    }

    fn report(&self, progress: RenderProgress) {
        let step = progress_step(progress);
        let previous = self.last_step.fetch_max(step, Ordering::Relaxed);
        if step > previous {
            info!(
                "Progress: {}% ({}/{} px)",
                step * 10,
                progress.completed_pixels,
                progress.total_pixels
            );
        }
    }
}

/// Completed tenths of the image, 0 to 10.
fn progress_step(progress: RenderProgress) -> u64 {
    if progress.total_pixels == 0 {
        return 10;
    }
    progress.completed_pixels.min(progress.total_pixels) * 10 / progress.total_pixels
}

fn scene_description(args: &Args) -> Result<SceneDescription> {
    match &args.scene {
        Some(path) => load_scene(path).with_context(|| format!("Failed to load scene {}", path.display())),
        None => {
            info!("No scene given, using the built-in demo scene");
            Ok(SceneDescription::demo())
        }
    }
}

/// Validate the render settings, then build the scene and camera.
///
/// The config is checked first because a zero resolution makes the camera
/// aspect ratio meaningless.
fn prepare(desc: &SceneDescription, config: &RenderConfig) -> Result<(Scene, Camera)> {
    config.validate().context("Invalid render settings")?;
    let scene = Scene::from_description(desc).context("Invalid scene")?;
    let camera = Camera::from_description(&desc.camera, config.aspect_ratio()).context("Invalid camera")?;
    Ok((scene, camera))
}

fn main() -> Result<()> {
    let args = Args::parse();

    init_logger(args.log_level.into());

    info!("Starting Prism {}", env!("CARGO_PKG_VERSION"));
    let start = Instant::now();

    let desc = scene_description(&args)?;
    if args.print_scene {
        println!("{}", serde_json::to_string_pretty(&desc)?);
        return Ok(());
    }

    let config = args.render_config();
    let (scene, camera) = prepare(&desc, &config)?;

    let progress = ProgressLogger::new();
    let image = render_with_progress(&scene, &camera, &config, &|p: RenderProgress| progress.report(p))
        .context("Render failed")?;

    save_image(&image, &args.output)?;

    info!("Total time: {}", format_duration(start.elapsed()));
    Ok(())
}
