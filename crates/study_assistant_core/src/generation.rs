//! crates/study_assistant_core/src/generation.rs
//!
//! The request contract handed to a `GenerationService`: an optional system
//! instruction, ordered content parts, and an optional response schema.

use base64::{engine::general_purpose::STANDARD, Engine};
use serde_json::Value;

/// MIME type used when a data-URL does not declare one.
pub const DEFAULT_IMAGE_MIME: &str = "image/jpeg";

/// One piece of user content sent to the generation service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentPart {
    Text { text: String },
    InlineData { mime_type: String, data: String },
}

impl ContentPart {
    pub fn text(text: impl Into<String>) -> Self {
        ContentPart::Text { text: text.into() }
    }
}

/// A single call against the generation service.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GenerationRequest {
    pub system_instruction: Option<String>,
    pub parts: Vec<ContentPart>,
    /// When present the service is asked for JSON conforming to this schema.
    pub response_schema: Option<Value>,
}

impl GenerationRequest {
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            parts: vec![ContentPart::text(text)],
            ..Default::default()
        }
    }

    pub fn with_schema(mut self, schema: Value) -> Self {
        self.response_schema = Some(schema);
        self
    }

    pub fn expects_json(&self) -> bool {
        self.response_schema.is_some()
    }
}

/// Strips the `data:<mime>;base64,` prefix of a data-URL.
///
/// Everything up to and including the first comma is dropped. Input without a
/// comma is treated as a raw payload and returned unchanged.
pub fn strip_data_url(input: &str) -> &str {
    match input.split_once(',') {
        Some((_, payload)) => payload,
        None => input,
    }
}

/// Reads the MIME type from a data-URL header, if it has one.
fn data_url_mime(input: &str) -> Option<&str> {
    let (header, _) = input.split_once(',')?;
    let mime = header
        .strip_prefix("data:")?
        .split(';')
        .next()
        .filter(|m| !m.is_empty())?;
    Some(mime)
}

/// Builds the inline image part for a data-URL or raw base64 payload.
pub fn image_part(image: &str) -> ContentPart {
    ContentPart::InlineData {
        mime_type: data_url_mime(image).unwrap_or(DEFAULT_IMAGE_MIME).to_string(),
        data: strip_data_url(image).to_string(),
    }
}

/// True when the payload of the image decodes as standard base64.
pub fn is_valid_image_payload(image: &str) -> bool {
    let payload = strip_data_url(image).trim();
    !payload.is_empty() && STANDARD.decode(payload).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_data_url_prefix() {
        assert_eq!(strip_data_url("data:image/jpeg;base64,AAAA"), "AAAA");
    }

    #[test]
    fn raw_payload_passes_through() {
        assert_eq!(strip_data_url("AAAA"), "AAAA");
    }

    #[test]
    fn only_first_comma_is_consumed() {
        assert_eq!(strip_data_url("data:x,AA,BB"), "AA,BB");
    }

    #[test]
    fn image_part_reads_mime() {
        assert_eq!(
            image_part("data:image/png;base64,AAAA"),
            ContentPart::InlineData {
                mime_type: "image/png".to_string(),
                data: "AAAA".to_string()
            }
        );
        assert_eq!(
            image_part("AAAA"),
            ContentPart::InlineData {
                mime_type: DEFAULT_IMAGE_MIME.to_string(),
                data: "AAAA".to_string()
            }
        );
    }

    #[test]
    fn validates_payload() {
        assert!(is_valid_image_payload("data:image/jpeg;base64,AAAA"));
        assert!(!is_valid_image_payload("data:image/jpeg;base64,"));
        assert!(!is_valid_image_payload("not base64!"));
    }
}
