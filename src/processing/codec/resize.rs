//! Fit-inside resizing.

use image::DynamicImage;
use image::imageops::FilterType;

/// Scales `image` to fit within the `width` x `height` box while preserving
/// aspect ratio. Never crops and never exceeds the box in either dimension;
/// upscaling follows the library default (allowed).
pub fn fit_inside(image: DynamicImage, width: u32, height: u32) -> DynamicImage {
    image.resize(width, height, FilterType::Lanczos3)
}
