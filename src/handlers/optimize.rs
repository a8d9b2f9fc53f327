//! `POST /optimize`: multipart upload conversion.

use axum::Json;
use axum::extract::Multipart;
use axum::extract::multipart::MultipartRejection;
use tracing::warn;

use crate::core::{ConversionReply, ConversionRequest, OutputFormat};
use crate::processing;
use crate::utils::{OptimizerError, OptimizerResult};

/// Accepts a multipart form with a binary `image` field plus `width`,
/// `height`, `quality`, and a boolean-ish `useAvif` flag. Returns the
/// converted image as base64 on success; any failure collapses to
/// `{"success":false}`.
pub async fn optimize(
    multipart: Result<Multipart, MultipartRejection>,
) -> Json<ConversionReply> {
    match run(multipart).await {
        Ok(image) => Json(ConversionReply::succeeded(image)),
        Err(e) => {
            warn!("optimize request failed: {e}");
            Json(ConversionReply::failed())
        }
    }
}

async fn run(multipart: Result<Multipart, MultipartRejection>) -> OptimizerResult<String> {
    let mut multipart =
        multipart.map_err(|e| OptimizerError::field(format!("Not a multipart request: {e}")))?;

    let mut source: Option<Vec<u8>> = None;
    let mut width = String::new();
    let mut height = String::new();
    let mut quality = String::new();
    let mut use_avif: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| OptimizerError::field(format!("Malformed multipart body: {e}")))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "image" => {
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| OptimizerError::field(format!("Unreadable image field: {e}")))?;
                source = Some(bytes.to_vec());
            }
            "width" => width = read_text(field).await?,
            "height" => height = read_text(field).await?,
            "quality" => quality = read_text(field).await?,
            "useAvif" => use_avif = Some(read_text(field).await?),
            // Unknown fields are ignored
            _ => {}
        }
    }

    let source = source.ok_or_else(|| OptimizerError::field("Missing image field"))?;

    // Boolean-ish flag: any present non-empty value selects AVIF, matching
    // the original's truthiness check (even the string "false" counts).
    let format = match use_avif.as_deref() {
        Some(value) if !value.is_empty() => OutputFormat::Avif,
        _ => OutputFormat::WebP,
    };

    let request = ConversionRequest::from_fields(source, &width, &height, &quality, Some(format))?;
    processing::convert(request).await
}

async fn read_text(field: axum::extract::multipart::Field<'_>) -> OptimizerResult<String> {
    field
        .text()
        .await
        .map_err(|e| OptimizerError::field(format!("Unreadable text field: {e}")))
}
