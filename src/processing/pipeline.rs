//! The conversion pipeline: decode → resize → encode → base64.
//!
//! Each request is processed inside a `tokio::task::spawn_blocking` call so
//! the async runtime is never blocked by pixel work. A conversion is a
//! single-shot unit of work: no shared mutable state, no cancellation, no
//! partial output.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use image::GenericImageView;
use tracing::debug;

use crate::core::ConversionRequest;
use crate::utils::{OptimizerError, OptimizerResult};

use super::codec;

/// Runs one conversion to completion, returning the result as base64 text.
pub async fn convert(request: ConversionRequest) -> OptimizerResult<String> {
    tokio::task::spawn_blocking(move || convert_blocking(&request))
        .await
        .map_err(|e| OptimizerError::processing(format!("Conversion task panicked: {e}")))?
}

/// Synchronous pipeline body, run on the blocking thread pool.
fn convert_blocking(request: &ConversionRequest) -> OptimizerResult<String> {
    let (image, source_format) = codec::decode(&request.source)?;

    let (source_width, source_height) = image.dimensions();
    debug!(
        "Decoded {:?} source: {}×{}, target box {}×{} q{}",
        source_format, source_width, source_height, request.width, request.height, request.quality,
    );

    let resized = codec::fit_inside(image, request.width, request.height);
    let encoded = codec::encode(&resized, request.format, source_format, request.quality)?;

    Ok(BASE64.encode(encoded))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::OutputFormat;
    use crate::processing::codec::test_support::sample_png;

    #[tokio::test]
    async fn converts_png_to_bounded_webp() {
        let request = ConversionRequest {
            source: sample_png(100, 50),
            width: 40,
            height: 40,
            quality: 80,
            format: Some(OutputFormat::WebP),
        };

        let b64 = convert(request).await.unwrap();
        assert!(!b64.is_empty());

        let bytes = BASE64.decode(b64).unwrap();
        assert_eq!(image::guess_format(&bytes).unwrap(), image::ImageFormat::WebP);

        let decoded = image::load_from_memory(&bytes).unwrap();
        assert_eq!(decoded.dimensions(), (40, 20));
    }

    #[tokio::test]
    async fn undecodable_source_fails() {
        let request = ConversionRequest {
            source: b"not an image".to_vec(),
            width: 40,
            height: 40,
            quality: 80,
            format: Some(OutputFormat::WebP),
        };

        assert!(convert(request).await.is_err());
    }
}
