//! One-utterance microphone capture.
//!
//! The input stream exists only inside `record_utterance`; dropping it on
//! any exit path (success, error, early return) releases the device.

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use std::sync::mpsc;
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::{debug, info};

/// Rate the recognizer expects; everything captured is resampled to this.
pub const CAPTURE_SAMPLE_RATE: u32 = 16_000;

/// Tuning for the utterance endpointer.
pub struct RecorderSettings {
    /// RMS level above which a frame counts as speech.
    pub speech_rms_threshold: f32,
    /// How long to wait for speech to start before giving up.
    pub start_window: Duration,
    /// Trailing silence that ends the utterance.
    pub silence_window: Duration,
    /// Hard cap on one utterance.
    pub max_utterance: Duration,
}

impl Default for RecorderSettings {
    fn default() -> Self {
        RecorderSettings {
            speech_rms_threshold: 0.01,
            start_window: Duration::from_secs(6),
            silence_window: Duration::from_millis(1200),
            max_utterance: Duration::from_secs(20),
        }
    }
}

#[derive(Debug, Error)]
pub enum RecordError {
    #[error("no audio input device available")]
    NoInputDevice,
    #[error("could not read the input device configuration: {0}")]
    DeviceConfig(String),
    #[error("audio stream failed: {0}")]
    Stream(String),
    #[error("nothing was heard before the timeout")]
    NoSpeech,
}

/// Record one utterance from the default microphone as mono 16 kHz PCM16.
///
/// Waits for the room to produce speech-level audio, then records until a
/// trailing-silence window or the hard cap.
pub fn record_utterance(settings: &RecorderSettings) -> Result<Vec<i16>, RecordError> {
    let host = cpal::default_host();
    let device = host
        .default_input_device()
        .ok_or(RecordError::NoInputDevice)?;
    let config = device
        .default_input_config()
        .map_err(|e| RecordError::DeviceConfig(e.to_string()))?;

    let sample_format = config.sample_format();
    let sample_rate = config.sample_rate();
    let channels = config.channels();
    let stream_config: cpal::StreamConfig = config.into();

    let (tx, rx) = mpsc::channel::<Vec<f32>>();
    let tx_i16 = tx.clone();
    let err_fn = |err| tracing::warn!("audio stream error: {err}");

    let stream = match sample_format {
        cpal::SampleFormat::F32 => device.build_input_stream(
            &stream_config,
            move |data: &[f32], _: &_| {
                let _ = tx.send(data.to_vec());
            },
            err_fn,
            None,
        ),
        cpal::SampleFormat::I16 => device.build_input_stream(
            &stream_config,
            move |data: &[i16], _: &_| {
                let _ = tx_i16.send(data.iter().map(|&s| s as f32 / 32768.0).collect());
            },
            err_fn,
            None,
        ),
        other => {
            return Err(RecordError::Stream(format!(
                "unsupported sample format {other:?}"
            )))
        }
    }
    .map_err(|e| RecordError::Stream(e.to_string()))?;

    stream
        .play()
        .map_err(|e| RecordError::Stream(e.to_string()))?;
    info!(sample_rate, channels, "listening for one utterance");

    let captured = listen(&rx, settings)?;
    drop(stream);

    let samples: Vec<i16> = captured
        .iter()
        .map(|&f| (f.clamp(-1.0, 1.0) * i16::MAX as f32) as i16)
        .collect();
    let mono = super::wav::downmix_to_mono(&samples, channels);
    let resampled = super::wav::resample(&mono, sample_rate, CAPTURE_SAMPLE_RATE);
    debug!(samples = resampled.len(), "utterance captured");
    Ok(resampled)
}

/// Drain frames off the stream until the endpointer decides the utterance
/// is over.
fn listen(
    rx: &mpsc::Receiver<Vec<f32>>,
    settings: &RecorderSettings,
) -> Result<Vec<f32>, RecordError> {
    let started = Instant::now();
    let mut speech_started = false;
    let mut last_voice = Instant::now();
    let mut captured: Vec<f32> = Vec::new();

    loop {
        match rx.recv_timeout(Duration::from_millis(200)) {
            Ok(frame) => {
                let level = rms(&frame);
                if !speech_started {
                    if level >= settings.speech_rms_threshold {
                        speech_started = true;
                        last_voice = Instant::now();
                        captured.extend(frame);
                    } else if started.elapsed() > settings.start_window {
                        return Err(RecordError::NoSpeech);
                    }
                } else {
                    if level >= settings.speech_rms_threshold {
                        last_voice = Instant::now();
                    }
                    captured.extend(frame);
                    if last_voice.elapsed() > settings.silence_window
                        || started.elapsed() > settings.max_utterance
                    {
                        return Ok(captured);
                    }
                }
            }
            Err(mpsc::RecvTimeoutError::Timeout) => {
                if speech_started && last_voice.elapsed() > settings.silence_window {
                    return Ok(captured);
                }
                if !speech_started && started.elapsed() > settings.start_window {
                    return Err(RecordError::NoSpeech);
                }
            }
            Err(mpsc::RecvTimeoutError::Disconnected) => {
                return Err(RecordError::Stream(
                    "input stream closed unexpectedly".to_string(),
                ));
            }
        }
    }
}

fn rms(frame: &[f32]) -> f32 {
    if frame.is_empty() {
        return 0.0;
    }
    let mut sum = 0.0;
    for &x in frame {
        sum += x * x;
    }
    (sum / frame.len() as f32).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rms_of_silence_is_zero() {
        assert_eq!(rms(&[0.0; 64]), 0.0);
        assert_eq!(rms(&[]), 0.0);
    }

    #[test]
    fn rms_of_full_scale_square_wave_is_one() {
        let frame: Vec<f32> = (0..64).map(|i| if i % 2 == 0 { 1.0 } else { -1.0 }).collect();
        assert!((rms(&frame) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn endpointer_stops_on_trailing_silence() {
        let settings = RecorderSettings {
            speech_rms_threshold: 0.01,
            start_window: Duration::from_secs(2),
            silence_window: Duration::from_millis(50),
            max_utterance: Duration::from_secs(5),
        };

        let (tx, rx) = mpsc::channel::<Vec<f32>>();
        std::thread::spawn(move || {
            // A burst of speech, then silence until the endpointer trips.
            for _ in 0..3 {
                let _ = tx.send(vec![0.5; 160]);
                std::thread::sleep(Duration::from_millis(10));
            }
            for _ in 0..20 {
                let _ = tx.send(vec![0.0; 160]);
                std::thread::sleep(Duration::from_millis(10));
            }
        });

        let captured = listen(&rx, &settings).expect("utterance");
        assert!(captured.len() >= 3 * 160);
    }

    #[test]
    fn endpointer_gives_up_without_speech() {
        let settings = RecorderSettings {
            speech_rms_threshold: 0.01,
            start_window: Duration::from_millis(80),
            silence_window: Duration::from_millis(50),
            max_utterance: Duration::from_secs(5),
        };

        let (tx, rx) = mpsc::channel::<Vec<f32>>();
        std::thread::spawn(move || {
            for _ in 0..10 {
                let _ = tx.send(vec![0.0001; 160]);
                std::thread::sleep(Duration::from_millis(20));
            }
        });

        assert!(matches!(listen(&rx, &settings), Err(RecordError::NoSpeech)));
    }
}
