//! `POST /crop-and-optimize`: conversion of an already-encoded base64 image.

use axum::{Form, Json};
use axum::extract::rejection::FormRejection;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use serde::Deserialize;
use tracing::warn;

use crate::core::{ConversionReply, ConversionRequest, OutputFormat};
use crate::processing;
use crate::utils::{OptimizerError, OptimizerResult};

/// Raw form fields, all optional so extraction itself never rejects a
/// request; the typed parse below decides what fails.
#[derive(Debug, Deserialize)]
pub struct CropForm {
    image: Option<String>,
    width: Option<String>,
    height: Option<String>,
    quality: Option<String>,
    format: Option<String>,
}

/// Accepts a urlencoded form with `image` as a base64 string plus `width`,
/// `height`, `quality`, and an explicit `format` selector (`avif` | `webp` |
/// `jpeg`). An unrecognized selector is not an error: the encode step is
/// skipped and the resized image comes back in its source container.
pub async fn crop_and_optimize(
    form: Result<Form<CropForm>, FormRejection>,
) -> Json<ConversionReply> {
    match run(form).await {
        Ok(image) => Json(ConversionReply::succeeded(image)),
        Err(e) => {
            warn!("crop-and-optimize request failed: {e}");
            Json(ConversionReply::failed())
        }
    }
}

async fn run(form: Result<Form<CropForm>, FormRejection>) -> OptimizerResult<String> {
    let Form(form) = form.map_err(|e| OptimizerError::field(format!("Malformed form: {e}")))?;

    let image = form
        .image
        .ok_or_else(|| OptimizerError::field("Missing image field"))?;

    let source = BASE64
        .decode(strip_data_uri(image.trim()))
        .map_err(|e| OptimizerError::field(format!("Image field is not valid base64: {e}")))?;

    // `OutputFormat::parse` yields None for unknown (or absent) selectors,
    // which the pipeline treats as the passthrough fallback.
    let format = form.format.as_deref().and_then(OutputFormat::parse);

    let request = ConversionRequest::from_fields(
        source,
        form.width.as_deref().unwrap_or_default(),
        form.height.as_deref().unwrap_or_default(),
        form.quality.as_deref().unwrap_or_default(),
        format,
    )?;

    processing::convert(request).await
}

/// Strips an optional `data:<mime>;base64,` prefix.
fn strip_data_uri(value: &str) -> &str {
    if value.starts_with("data:") {
        value.split_once(',').map(|(_, b64)| b64).unwrap_or(value)
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_data_uri_prefix() {
        assert_eq!(strip_data_uri("data:image/png;base64,aGk="), "aGk=");
        assert_eq!(strip_data_uri("aGk="), "aGk=");
    }
}
