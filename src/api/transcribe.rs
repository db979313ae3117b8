//! Speech recognition: one WAV utterance in, transcribed text out.

use super::client::{GEMINI_API_BASE, UREQ_AGENT};
use super::error::ApiError;
use super::types::GenerateContentResponse;
use base64::{engine::general_purpose, Engine as _};
use tracing::debug;

/// Instruction sent alongside the audio. The model must reply with the
/// spoken words alone so the transcript buffer stays clean.
const TRANSCRIPTION_PROMPT: &str = "Transcribe this recording verbatim. Reply with the spoken \
words only, no commentary and no punctuation cleanup. If nothing intelligible is said, reply \
with an empty message.";

/// Submit one in-memory WAV recording for transcription.
///
/// An empty string is a valid result (silence or unintelligible audio); the
/// capture layer decides how to surface that.
pub fn transcribe_wav(api_key: &str, model: &str, wav_data: &[u8]) -> Result<String, ApiError> {
    if api_key.trim().is_empty() {
        return Err(ApiError::MissingApiKey);
    }

    let b64_audio = general_purpose::STANDARD.encode(wav_data);
    let url = format!("{GEMINI_API_BASE}/{model}:generateContent");
    let payload = serde_json::json!({
        "contents": [{
            "role": "user",
            "parts": [
                { "text": TRANSCRIPTION_PROMPT },
                {
                    "inline_data": {
                        "mime_type": "audio/wav",
                        "data": b64_audio
                    }
                }
            ]
        }]
    });

    debug!(model, wav_bytes = wav_data.len(), "sending transcription request");
    let resp = UREQ_AGENT
        .post(&url)
        .header("x-goog-api-key", api_key)
        .send_json(payload)
        .map_err(ApiError::from_ureq)?;

    let body: GenerateContentResponse = resp
        .into_body()
        .read_json()
        .map_err(|e| ApiError::MalformedResponse(e.to_string()))?;

    Ok(body.text().trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_key_fails_before_any_request() {
        let result = transcribe_wav("", "gemini-2.5-flash", &[0u8; 16]);
        assert!(matches!(result, Err(ApiError::MissingApiKey)));
    }
}
