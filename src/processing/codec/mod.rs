//! Codec layer: decode, fit-inside resize, per-format encode.

mod avif;
mod decode;
mod formats;
mod resize;

pub use decode::decode;
pub use formats::encode;
pub use resize::fit_inside;

#[cfg(test)]
pub(crate) mod test_support {
    use std::io::Cursor;

    use image::{DynamicImage, ImageFormat, Rgba, RgbaImage};

    /// A small gradient image; enough structure for the encoders to chew on.
    pub fn sample_image(width: u32, height: u32) -> DynamicImage {
        DynamicImage::ImageRgba8(RgbaImage::from_fn(width, height, |x, y| {
            Rgba([(x * 8) as u8, (y * 8) as u8, 128, 255])
        }))
    }

    pub fn sample_png(width: u32, height: u32) -> Vec<u8> {
        let mut out = Cursor::new(Vec::new());
        sample_image(width, height)
            .write_to(&mut out, ImageFormat::Png)
            .unwrap();
        out.into_inner()
    }
}
