//! Per-format encoding at a requested quality.
//!
//! WebP goes through `webp` (libwebp) because the `image` crate only encodes
//! lossless WebP; AVIF and JPEG go through the `image` crate's encoders.
//! Options the chosen encoders do not expose (the original encoder's effort,
//! smart subsampling, mozjpeg scan optimization) are left at the encoder
//! defaults.

use std::io::Cursor;

use image::codecs::avif::AvifEncoder;
use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, ExtendedColorType, ImageEncoder, ImageFormat};

use crate::core::OutputFormat;
use crate::utils::{OptimizerError, OptimizerResult};

/// Encoder speed for AVIF (1 = slowest/best, 10 = fastest). Fixed, the
/// service exposes only quality.
const AVIF_SPEED: u8 = 6;

/// Encodes `image` per the requested selector.
///
/// `None` is the documented passthrough fallback: the encode step is skipped
/// and the resized image is re-serialized in `source_format` with the
/// encoder defaults.
pub fn encode(
    image: &DynamicImage,
    format: Option<OutputFormat>,
    source_format: ImageFormat,
    quality: u8,
) -> OptimizerResult<Vec<u8>> {
    match format {
        Some(OutputFormat::WebP) => encode_webp(image, quality),
        Some(OutputFormat::Avif) => encode_avif(image, quality),
        Some(OutputFormat::Jpeg) => encode_jpeg(image, quality),
        None => passthrough(image, source_format),
    }
}

/// Lossy WebP via libwebp.
pub fn encode_webp(image: &DynamicImage, quality: u8) -> OptimizerResult<Vec<u8>> {
    let rgba = image.to_rgba8();
    let encoder = webp::Encoder::from_rgba(rgba.as_raw(), rgba.width(), rgba.height());
    Ok(encoder.encode(quality as f32).to_vec())
}

/// Lossy AVIF; chroma subsampling follows the encoder default.
pub fn encode_avif(image: &DynamicImage, quality: u8) -> OptimizerResult<Vec<u8>> {
    let rgba = image.to_rgba8();
    let mut out = Vec::new();

    let encoder = AvifEncoder::new_with_speed_quality(&mut out, AVIF_SPEED, quality);
    encoder
        .write_image(
            rgba.as_raw(),
            rgba.width(),
            rgba.height(),
            ExtendedColorType::Rgba8,
        )
        .map_err(|e| OptimizerError::encode(format!("AVIF encode failed: {e}")))?;

    Ok(out)
}

/// Lossy JPEG. JPEG has no alpha channel, so pixels are flattened to RGB.
pub fn encode_jpeg(image: &DynamicImage, quality: u8) -> OptimizerResult<Vec<u8>> {
    let rgb = image.to_rgb8();
    let mut out = Vec::new();

    let encoder = JpegEncoder::new_with_quality(&mut out, quality);
    encoder
        .write_image(
            rgb.as_raw(),
            rgb.width(),
            rgb.height(),
            ExtendedColorType::Rgb8,
        )
        .map_err(|e| OptimizerError::encode(format!("JPEG encode failed: {e}")))?;

    Ok(out)
}

/// Re-serializes `image` in its source container with default settings.
fn passthrough(image: &DynamicImage, source_format: ImageFormat) -> OptimizerResult<Vec<u8>> {
    let mut out = Cursor::new(Vec::new());
    image
        .write_to(&mut out, source_format)
        .map_err(|e| OptimizerError::encode(format!("Passthrough encode failed: {e}")))?;
    Ok(out.into_inner())
}
