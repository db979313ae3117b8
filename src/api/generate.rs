//! Multimodal generation through the `generateContent` endpoint.

use super::client::{GEMINI_API_BASE, UREQ_AGENT};
use super::error::ApiError;
use super::types::GenerateContentResponse;
use crate::session::{AssembledPrompt, EMPTY_INPUT_PLACEHOLDER};
use base64::{engine::general_purpose, Engine as _};
use tracing::{debug, warn};

/// An image attachment: the original encoded bytes plus the MIME type
/// sniffed from them. The bytes go to the service untouched; decoding only
/// happens locally for the preview.
#[derive(Clone)]
pub struct ImagePart {
    pub bytes: Vec<u8>,
    pub mime_type: &'static str,
}

impl ImagePart {
    pub fn new(bytes: Vec<u8>) -> Self {
        let mime_type = sniff_mime_type(&bytes);
        ImagePart { bytes, mime_type }
    }
}

/// Sniff the image MIME type from magic bytes. Unknown formats are declared
/// PNG, which the service accepts for everything the drop handler decodes.
pub fn sniff_mime_type(bytes: &[u8]) -> &'static str {
    if bytes.starts_with(&[0xff, 0xd8, 0xff]) {
        "image/jpeg"
    } else if bytes.starts_with(&[0x89, 0x50, 0x4e, 0x47]) {
        "image/png"
    } else if bytes.len() >= 12
        && bytes.starts_with(&[0x52, 0x49, 0x46, 0x46])
        && &bytes[8..12] == b"WEBP"
    {
        "image/webp"
    } else if bytes.starts_with(b"GIF8") {
        "image/gif"
    } else {
        "image/png"
    }
}

/// Build the parts array for one request: prompt text, then the image when
/// one is attached.
fn build_parts(prompt: &str, image: Option<&ImagePart>) -> Vec<serde_json::Value> {
    let mut parts = vec![serde_json::json!({ "text": prompt })];
    if let Some(img) = image {
        parts.push(serde_json::json!({
            "inline_data": {
                "mime_type": img.mime_type,
                "data": general_purpose::STANDARD.encode(&img.bytes),
            }
        }));
    }
    parts
}

/// Generation entry point for the interaction cycle. Blank input (no typed
/// text, no speech, no image) short-circuits to the fixed placeholder and
/// never touches the network.
pub fn respond(
    api_key: &str,
    model: &str,
    prompt: &AssembledPrompt,
    image: Option<&ImagePart>,
) -> Result<String, ApiError> {
    if prompt.is_blank() && image.is_none() {
        return Ok(EMPTY_INPUT_PLACEHOLDER.to_string());
    }
    generate_content(api_key, model, prompt.as_str(), image)
}

/// Submit one prompt (plus optional image) and return the generated text.
pub fn generate_content(
    api_key: &str,
    model: &str,
    prompt: &str,
    image: Option<&ImagePart>,
) -> Result<String, ApiError> {
    if api_key.trim().is_empty() {
        return Err(ApiError::MissingApiKey);
    }

    let url = format!("{GEMINI_API_BASE}/{model}:generateContent");
    let payload = serde_json::json!({
        "contents": [{
            "role": "user",
            "parts": build_parts(prompt, image)
        }]
    });

    debug!(model, has_image = image.is_some(), "sending generation request");
    let resp = UREQ_AGENT
        .post(&url)
        .header("x-goog-api-key", api_key)
        .send_json(payload)
        .map_err(ApiError::from_ureq)?;

    let body: GenerateContentResponse = resp
        .into_body()
        .read_json()
        .map_err(|e| ApiError::MalformedResponse(e.to_string()))?;

    let text = body.text();
    if text.is_empty() {
        warn!(model, "generation response carried no text parts");
        return Err(ApiError::EmptyResponse);
    }
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::language::OutputLanguage;

    #[test]
    fn mime_sniffing_recognizes_common_formats() {
        assert_eq!(sniff_mime_type(&[0xff, 0xd8, 0xff, 0xe0]), "image/jpeg");
        assert_eq!(
            sniff_mime_type(&[0x89, 0x50, 0x4e, 0x47, 0x0d, 0x0a]),
            "image/png"
        );
        assert_eq!(sniff_mime_type(b"GIF89a...."), "image/gif");
        let webp = [b'R', b'I', b'F', b'F', 0, 0, 0, 0, b'W', b'E', b'B', b'P'];
        assert_eq!(sniff_mime_type(&webp), "image/webp");
        assert_eq!(sniff_mime_type(b"????"), "image/png");
    }

    #[test]
    fn text_only_request_has_one_part() {
        let parts = build_parts("hello", None);
        assert_eq!(parts.len(), 1);
        assert_eq!(parts[0]["text"], "hello");
    }

    #[test]
    fn image_request_has_exactly_two_parts() {
        let image = ImagePart::new(vec![0x89, 0x50, 0x4e, 0x47]);
        let parts = build_parts(
            "Describe this photo.generate response in French",
            Some(&image),
        );
        assert_eq!(parts.len(), 2);
        assert_eq!(
            parts[0]["text"],
            "Describe this photo.generate response in French"
        );
        assert_eq!(parts[1]["inline_data"]["mime_type"], "image/png");
    }

    #[test]
    fn blank_prompt_returns_placeholder_without_any_request() {
        let prompt = AssembledPrompt::assemble("", OutputLanguage::English, "");
        // An empty API key would fail with MissingApiKey if the request path
        // were entered; the placeholder proves it never is.
        let result = respond("", "gemini-2.5-flash", &prompt, None);
        assert_eq!(result.expect("short-circuit"), EMPTY_INPUT_PLACEHOLDER);
    }

    #[test]
    fn blank_prompt_with_image_still_generates() {
        let prompt = AssembledPrompt::assemble("", OutputLanguage::English, "");
        let image = ImagePart::new(vec![0xff, 0xd8, 0xff]);
        // No key configured, so the request path must report MissingApiKey
        // rather than short-circuiting to the placeholder.
        let result = respond("", "gemini-2.5-flash", &prompt, Some(&image));
        assert!(matches!(result, Err(ApiError::MissingApiKey)));
    }
}
