//! Writing rendered images to disk.
//!
//! Colors are clamped and quantized to 8 bits with no gamma curve.
//! JPEG output uses a fixed quality of 95; every other extension is
//! handed to the image crate's format detection.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use anyhow::{anyhow, Context, Result};
use image::codecs::jpeg::JpegEncoder;
use image::{ColorType, RgbImage};
use log::info;
use prism_renderer::ImageBuffer;

/// JPEG encoder quality.
pub const JPEG_QUALITY: u8 = 95;

/// Convert a render to an 8-bit RGB image.
pub fn to_rgb_image(image: &ImageBuffer) -> Result<RgbImage> {
    RgbImage::from_raw(image.width, image.height, image.to_rgb8())
        .ok_or_else(|| anyhow!("pixel data does not match {}x{}", image.width, image.height))
}

/// Save a render, choosing the format from the file extension.
pub fn save_image(image: &ImageBuffer, path: &Path) -> Result<()> {
    let rgb = to_rgb_image(image)?;

    if is_jpeg(path) {
        let file = File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;
        let mut encoder = JpegEncoder::new_with_quality(BufWriter::new(file), JPEG_QUALITY);
        encoder
            .encode(rgb.as_raw(), rgb.width(), rgb.height(), ColorType::Rgb8)
            .with_context(|| format!("Failed to encode {}", path.display()))?;
    } else {
        rgb.save(path)
            .with_context(|| format!("Failed to save {}", path.display()))?;
    }

    info!("Image saved as {}", path.display());
    Ok(())
}

fn is_jpeg(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("jpg") || ext.eq_ignore_ascii_case("jpeg"))
        .unwrap_or(false)
}
