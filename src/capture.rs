//! Speech capture: one utterance from the microphone to transcribed text.

use crate::api::{self, ApiError};
use crate::audio::record::{self, RecordError, RecorderSettings};
use crate::audio::wav;
use thiserror::Error;
use tracing::info;

/// Outcome of one capture attempt. Callers branch on the variant; failure
/// reasons never masquerade as transcriptions.
pub enum CaptureOutcome {
    Transcribed(String),
    Failed(CaptureError),
}

#[derive(Debug, Error)]
pub enum CaptureError {
    #[error("could not record audio: {0}")]
    Record(#[from] RecordError),
    #[error("could not understand the recording")]
    Unintelligible,
    #[error("speech recognition service failed: {0}")]
    Service(#[from] ApiError),
}

/// Record one utterance and transcribe it. The microphone is held only for
/// the duration of the recording, released on every exit path.
pub fn capture_once(api_key: &str, model: &str) -> CaptureOutcome {
    let settings = RecorderSettings::default();
    let samples = match record::record_utterance(&settings) {
        Ok(samples) => samples,
        Err(err) => return CaptureOutcome::Failed(err.into()),
    };

    let wav_data = wav::encode_wav(&samples, record::CAPTURE_SAMPLE_RATE, 1);
    info!(wav_bytes = wav_data.len(), "utterance recorded, transcribing");
    outcome_from_transcription(api::transcribe::transcribe_wav(api_key, model, &wav_data))
}

/// Fold the recognizer's reply into a tagged outcome. An empty transcription
/// means the audio carried nothing intelligible.
fn outcome_from_transcription(result: Result<String, ApiError>) -> CaptureOutcome {
    match result {
        Ok(text) => {
            let text = text.trim().to_string();
            if text.is_empty() {
                CaptureOutcome::Failed(CaptureError::Unintelligible)
            } else {
                CaptureOutcome::Transcribed(text)
            }
        }
        Err(err) => CaptureOutcome::Failed(err.into()),
    }
}
