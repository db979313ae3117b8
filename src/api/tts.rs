//! Speech synthesis through the Gemini TTS model.
//!
//! One request, one reply: the model returns base64 PCM which is wrapped
//! into an in-memory WAV clip. Nothing touches the filesystem.

use super::client::{GEMINI_API_BASE, UREQ_AGENT};
use super::error::ApiError;
use super::types::GenerateContentResponse;
use crate::audio::wav;
use std::io::Cursor;
use tracing::debug;

/// Sample rate of the PCM audio the TTS model returns (24 kHz mono s16le).
pub const TTS_SAMPLE_RATE: u32 = 24_000;

/// One synthesized utterance: a complete WAV container held in memory.
#[derive(Clone)]
pub struct AudioClip {
    wav_bytes: Vec<u8>,
    num_samples: usize,
    sample_rate: u32,
}

impl AudioClip {
    pub fn from_pcm16(samples: Vec<i16>, sample_rate: u32) -> Self {
        let wav_bytes = wav::encode_wav(&samples, sample_rate, 1);
        AudioClip {
            wav_bytes,
            num_samples: samples.len(),
            sample_rate,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.num_samples == 0
    }

    /// In-memory reader over the WAV container, positioned at the start.
    pub fn cursor(&self) -> Cursor<Vec<u8>> {
        Cursor::new(self.wav_bytes.clone())
    }

    pub fn duration_secs(&self) -> f32 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        self.num_samples as f32 / self.sample_rate as f32
    }
}

/// Synthesize `text` with a fixed prebuilt voice.
///
/// The output-language selector does not reach this call; the voice stays
/// the configured (English-leaning) one for every response.
pub fn synthesize(
    api_key: &str,
    model: &str,
    voice: &str,
    text: &str,
) -> Result<AudioClip, ApiError> {
    if api_key.trim().is_empty() {
        return Err(ApiError::MissingApiKey);
    }

    let url = format!("{GEMINI_API_BASE}/{model}:generateContent");
    let payload = serde_json::json!({
        "contents": [{
            "role": "user",
            "parts": [{ "text": text }]
        }],
        "generationConfig": {
            "responseModalities": ["AUDIO"],
            "speechConfig": {
                "voiceConfig": {
                    "prebuiltVoiceConfig": {
                        "voiceName": voice
                    }
                }
            }
        }
    });

    debug!(model, voice, chars = text.len(), "sending synthesis request");
    let resp = UREQ_AGENT
        .post(&url)
        .header("x-goog-api-key", api_key)
        .send_json(payload)
        .map_err(ApiError::from_ureq)?;

    let body: GenerateContentResponse = resp
        .into_body()
        .read_json()
        .map_err(|e| ApiError::MalformedResponse(e.to_string()))?;

    let pcm = body.inline_bytes().ok_or(ApiError::EmptyResponse)?;
    let clip = AudioClip::from_pcm16(wav::pcm16_from_le_bytes(&pcm), TTS_SAMPLE_RATE);
    if clip.is_empty() {
        return Err(ApiError::EmptyResponse);
    }
    Ok(clip)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clip_from_pcm_reads_from_offset_zero() {
        let clip = AudioClip::from_pcm16(vec![1, 2, 3, 4], TTS_SAMPLE_RATE);
        assert!(!clip.is_empty());
        let cursor = clip.cursor();
        assert_eq!(cursor.position(), 0);
        assert_eq!(&cursor.into_inner()[0..4], b"RIFF");
    }

    #[test]
    fn clip_duration_matches_sample_count() {
        let clip = AudioClip::from_pcm16(vec![0; 24_000], TTS_SAMPLE_RATE);
        assert!((clip.duration_secs() - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn clip_container_roundtrips_through_wav_decode() {
        let samples = vec![10, -10, 300, -300];
        let clip = AudioClip::from_pcm16(samples.clone(), TTS_SAMPLE_RATE);
        let (decoded, rate) = crate::audio::wav::decode_wav_mono(clip.cursor()).expect("decode");
        assert_eq!(decoded, samples);
        assert_eq!(rate, TTS_SAMPLE_RATE);
    }

    #[test]
    fn empty_pcm_would_make_an_empty_clip() {
        let clip = AudioClip::from_pcm16(Vec::new(), TTS_SAMPLE_RATE);
        assert!(clip.is_empty());
        assert_eq!(clip.duration_secs(), 0.0);
    }

    #[test]
    fn missing_key_fails_before_any_request() {
        let result = synthesize("", "gemini-2.5-flash-preview-tts", "Kore", "hello");
        assert!(matches!(result, Err(ApiError::MissingApiKey)));
    }
}
