//! Serde views of the `generateContent` wire format — only the fields we read.

use base64::{engine::general_purpose, Engine as _};
use serde::Deserialize;

#[derive(Deserialize, Debug, Default)]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Deserialize, Debug)]
pub struct Candidate {
    #[serde(default)]
    pub content: Option<Content>,
}

#[derive(Deserialize, Debug, Default)]
pub struct Content {
    #[serde(default)]
    pub parts: Vec<Part>,
}

#[derive(Deserialize, Debug, Default)]
pub struct Part {
    #[serde(default)]
    pub text: Option<String>,
    /// Reasoning parts on thinking-enabled models; never shown to the user.
    #[serde(default)]
    pub thought: bool,
    #[serde(rename = "inlineData", default)]
    pub inline_data: Option<InlineData>,
}

#[derive(Deserialize, Debug)]
pub struct InlineData {
    #[serde(rename = "mimeType", default)]
    pub mime_type: String,
    pub data: String,
}

impl GenerateContentResponse {
    /// Concatenated text of the first candidate, thought parts skipped.
    pub fn text(&self) -> String {
        self.candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .map(|content| {
                content
                    .parts
                    .iter()
                    .filter(|p| !p.thought)
                    .filter_map(|p| p.text.as_deref())
                    .collect::<String>()
            })
            .unwrap_or_default()
    }

    /// Base64-decoded bytes of the first inline-data part, if any.
    pub fn inline_bytes(&self) -> Option<Vec<u8>> {
        let data = self
            .candidates
            .first()
            .and_then(|c| c.content.as_ref())?
            .parts
            .iter()
            .find_map(|p| p.inline_data.as_ref())?;
        general_purpose::STANDARD.decode(&data.data).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_joins_parts_and_skips_thoughts() {
        let body = r#"{
            "candidates": [{
                "content": {
                    "parts": [
                        { "text": "let me think", "thought": true },
                        { "text": "Hello" },
                        { "text": " world" }
                    ]
                }
            }]
        }"#;
        let resp: GenerateContentResponse = serde_json::from_str(body).expect("parse");
        assert_eq!(resp.text(), "Hello world");
    }

    #[test]
    fn missing_candidates_yield_empty_text() {
        let resp: GenerateContentResponse = serde_json::from_str("{}").expect("parse");
        assert_eq!(resp.text(), "");
        assert!(resp.inline_bytes().is_none());
    }

    #[test]
    fn inline_data_decodes_to_raw_bytes() {
        // "AAEC" is base64 for [0, 1, 2]
        let body = r#"{
            "candidates": [{
                "content": {
                    "parts": [{
                        "inlineData": { "mimeType": "audio/L16;rate=24000", "data": "AAEC" }
                    }]
                }
            }]
        }"#;
        let resp: GenerateContentResponse = serde_json::from_str(body).expect("parse");
        assert_eq!(resp.inline_bytes(), Some(vec![0u8, 1, 2]));
    }

    #[test]
    fn bad_base64_is_treated_as_absent() {
        let body = r#"{
            "candidates": [{
                "content": {
                    "parts": [{ "inlineData": { "mimeType": "audio/wav", "data": "!!!" } }]
                }
            }]
        }"#;
        let resp: GenerateContentResponse = serde_json::from_str(body).expect("parse");
        assert!(resp.inline_bytes().is_none());
    }
}
