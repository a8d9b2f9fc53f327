//! Source decoding with format detection.

use image::{DynamicImage, ImageFormat};

use crate::processing::codec::avif::decode_avif;
use crate::utils::{OptimizerError, OptimizerResult};

/// Decodes `bytes` into an image, guessing the container format from the
/// magic bytes.
///
/// The detected format is returned alongside the pixels: the passthrough
/// fallback re-serializes in the source format when no recognized target
/// format was requested.
pub fn decode(bytes: &[u8]) -> OptimizerResult<(DynamicImage, ImageFormat)> {
    let format = image::guess_format(bytes)
        .map_err(|e| OptimizerError::decode(format!("Unrecognized image data: {e}")))?;

    // The `image` crate has no pure Rust AVIF decoder, so AVIF takes the
    // rav1d path.
    let image = if format == ImageFormat::Avif {
        decode_avif(bytes)?
    } else {
        image::load_from_memory_with_format(bytes, format)
            .map_err(|e| OptimizerError::decode(format!("Failed to decode image: {e}")))?
    };

    Ok((image, format))
}

#[cfg(test)]
mod tests {
    use image::GenericImageView;

    use super::*;
    use crate::processing::codec::test_support::sample_png;

    #[test]
    fn decodes_png_and_reports_its_format() {
        let (image, format) = decode(&sample_png(8, 6)).unwrap();
        assert_eq!(format, ImageFormat::Png);
        assert_eq!(image.dimensions(), (8, 6));
    }

    #[test]
    fn decodes_its_own_avif_output() {
        let avif = crate::processing::codec::formats::encode_avif(
            &crate::processing::codec::test_support::sample_image(24, 16),
            55,
        )
        .unwrap();

        let (image, format) = decode(&avif).unwrap();
        assert_eq!(format, ImageFormat::Avif);
        assert_eq!(image.dimensions(), (24, 16));
    }

    #[test]
    fn rejects_non_image_bytes() {
        assert!(decode(b"definitely not an image").is_err());
        assert!(decode(&[]).is_err());
    }
}
