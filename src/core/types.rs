//! Core types for conversion requests and the wire reply.

use serde::{Deserialize, Serialize};

use crate::utils::{OptimizerError, OptimizerResult};

/// Output format selector for a conversion.
///
/// Parsed from the exact wire strings `webp`, `avif`, `jpeg`. Anything else
/// is not a parse error: it selects the passthrough fallback, where the
/// resized image is re-serialized in its source format (see
/// [`crate::processing`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    WebP,
    Avif,
    Jpeg,
}

impl OutputFormat {
    /// Parses a wire format selector.
    ///
    /// Only the exact strings `webp`, `avif` and `jpeg` select an encoder.
    /// No trimming, no case folding, no aliases: `JPEG`, `jpg` and
    /// `" webp "` all fall through to the passthrough fallback, so the
    /// caller treats `None` as that fallback rather than an error.
    pub fn parse(selector: &str) -> Option<Self> {
        match selector {
            "webp" => Some(Self::WebP),
            "avif" => Some(Self::Avif),
            "jpeg" => Some(Self::Jpeg),
            _ => None,
        }
    }
}

/// A fully parsed conversion request.
///
/// Numeric parsing happens exactly once, at construction; any parse failure
/// maps to the same generic failure outcome as a codec error.
#[derive(Debug, Clone)]
pub struct ConversionRequest {
    /// Raw source image bytes (already base64-decoded where applicable)
    pub source: Vec<u8>,
    /// Target bounding-box width in pixels
    pub width: u32,
    /// Target bounding-box height in pixels
    pub height: u32,
    /// Encoding quality, 1-100
    pub quality: u8,
    /// Target format; `None` selects the passthrough fallback
    pub format: Option<OutputFormat>,
}

impl ConversionRequest {
    /// Builds a request from raw form field strings.
    pub fn from_fields(
        source: Vec<u8>,
        width: &str,
        height: &str,
        quality: &str,
        format: Option<OutputFormat>,
    ) -> OptimizerResult<Self> {
        Ok(Self {
            source,
            width: parse_dimension("width", width)?,
            height: parse_dimension("height", height)?,
            quality: parse_quality(quality)?,
            format,
        })
    }
}

/// Parses a pixel dimension field. Must be a positive integer.
fn parse_dimension(name: &str, value: &str) -> OptimizerResult<u32> {
    let parsed: u32 = value
        .trim()
        .parse()
        .map_err(|_| OptimizerError::field(format!("Invalid {name}: {value:?}")))?;

    if parsed == 0 {
        return Err(OptimizerError::field(format!("{name} cannot be 0")));
    }

    Ok(parsed)
}

/// Parses the quality field. Must be an integer between 1 and 100.
fn parse_quality(value: &str) -> OptimizerResult<u8> {
    let parsed: u8 = value
        .trim()
        .parse()
        .map_err(|_| OptimizerError::field(format!("Invalid quality: {value:?}")))?;

    if !(1..=100).contains(&parsed) {
        return Err(OptimizerError::field(format!(
            "Invalid quality value: {parsed}. Must be between 1 and 100"
        )));
    }

    Ok(parsed)
}

/// The wire reply shared by both conversion endpoints.
///
/// On success `image` holds the standard-base64 encoding of the converted
/// bytes. On failure the body is exactly `{"success":false}`; no error
/// detail crosses the handler boundary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversionReply {
    /// Whether the conversion succeeded
    pub success: bool,
    /// Base64 of the converted image, present only on success
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl ConversionReply {
    pub fn succeeded(image: String) -> Self {
        Self {
            success: true,
            image: Some(image),
        }
    }

    pub fn failed() -> Self {
        Self {
            success: false,
            image: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_the_exact_format_selectors() {
        assert_eq!(OutputFormat::parse("webp"), Some(OutputFormat::WebP));
        assert_eq!(OutputFormat::parse("avif"), Some(OutputFormat::Avif));
        assert_eq!(OutputFormat::parse("jpeg"), Some(OutputFormat::Jpeg));
    }

    #[test]
    fn near_miss_selectors_fall_through_to_passthrough() {
        // Only the exact lowercase strings name an encoder; variants keep
        // the source container instead.
        assert_eq!(OutputFormat::parse("JPEG"), None);
        assert_eq!(OutputFormat::parse("jpg"), None);
        assert_eq!(OutputFormat::parse(" webp "), None);
        assert_eq!(OutputFormat::parse("WebP"), None);
    }

    #[test]
    fn unrecognized_selector_parses_to_none() {
        assert_eq!(OutputFormat::parse("bogus"), None);
        assert_eq!(OutputFormat::parse(""), None);
        assert_eq!(OutputFormat::parse("jxl"), None);
    }

    #[test]
    fn builds_request_from_valid_fields() {
        let request =
            ConversionRequest::from_fields(vec![1, 2, 3], "640", "480", "80", Some(OutputFormat::WebP))
                .unwrap();
        assert_eq!(request.width, 640);
        assert_eq!(request.height, 480);
        assert_eq!(request.quality, 80);
        assert_eq!(request.format, Some(OutputFormat::WebP));
    }

    #[test]
    fn rejects_non_numeric_fields() {
        assert!(ConversionRequest::from_fields(vec![], "abc", "480", "80", None).is_err());
        assert!(ConversionRequest::from_fields(vec![], "640", "", "80", None).is_err());
        assert!(ConversionRequest::from_fields(vec![], "640", "480", "80.5", None).is_err());
    }

    #[test]
    fn rejects_out_of_range_values() {
        assert!(ConversionRequest::from_fields(vec![], "0", "480", "80", None).is_err());
        assert!(ConversionRequest::from_fields(vec![], "640", "480", "0", None).is_err());
        assert!(ConversionRequest::from_fields(vec![], "640", "480", "101", None).is_err());
    }

    #[test]
    fn failed_reply_serializes_without_image_key() {
        let body = serde_json::to_string(&ConversionReply::failed()).unwrap();
        assert_eq!(body, r#"{"success":false}"#);
    }

    #[test]
    fn succeeded_reply_carries_the_image() {
        let body = serde_json::to_string(&ConversionReply::succeeded("aGk=".into())).unwrap();
        assert_eq!(body, r#"{"success":true,"image":"aGk="}"#);
    }
}
