//! Clip playback through the default output device.
//!
//! cpal streams are not `Send`, so a player is built on the thread that
//! plays the clip and dropped when the buffer drains.

use crate::api::tts::AudioClip;
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing::warn;

/// Playback sample rate (48 kHz - most devices support this).
pub const PLAYBACK_SAMPLE_RATE: u32 = 48_000;

/// Play one clip to completion, blocking the calling thread. Call from a
/// worker, never from the UI thread.
pub fn play_clip(clip: &AudioClip) {
    let (samples, source_rate) = match super::wav::decode_wav_mono(clip.cursor()) {
        Ok(decoded) => decoded,
        Err(e) => {
            warn!("could not decode clip for playback: {e}");
            return;
        }
    };

    let player = AudioPlayer::new(PLAYBACK_SAMPLE_RATE);
    if !player.is_open() {
        return;
    }
    let resampled = super::wav::resample(&samples, source_rate, PLAYBACK_SAMPLE_RATE);
    player.queue(&resampled);
    player.drain();
}

struct AudioPlayer {
    stream: Option<cpal::Stream>,
    shared_buffer: Arc<Mutex<VecDeque<i16>>>,
}

impl AudioPlayer {
    fn new(sample_rate: u32) -> Self {
        let shared_buffer: Arc<Mutex<VecDeque<i16>>> = Arc::new(Mutex::new(VecDeque::new()));
        let buffer_clone = shared_buffer.clone();

        let host = cpal::default_host();
        let device = host.default_output_device();
        if device.is_none() {
            warn!("no audio output device found");
        }

        let stream = device.and_then(|device| {
            // Stereo, since many devices refuse mono configs.
            let config = cpal::StreamConfig {
                channels: 2,
                sample_rate,
                buffer_size: cpal::BufferSize::Default,
            };

            let buffer_clone_f32 = buffer_clone.clone();

            // f32 output first; i16 as fallback.
            match device.build_output_stream(
                &config,
                move |data: &mut [f32], _: &cpal::OutputCallbackInfo| {
                    let mut buf = buffer_clone_f32.lock().unwrap();
                    for frame in data.chunks_mut(2) {
                        let i16_sample = buf.pop_front().unwrap_or(0);
                        let sample = i16_sample as f32 / 32768.0;
                        for out in frame {
                            *out = sample;
                        }
                    }
                },
                |err| tracing::warn!("audio playback error: {err}"),
                None,
            ) {
                Ok(stream) => Some(stream),
                Err(e) => {
                    warn!("failed to create f32 output stream: {e}");
                    match device.build_output_stream(
                        &config,
                        move |data: &mut [i16], _: &cpal::OutputCallbackInfo| {
                            let mut buf = buffer_clone.lock().unwrap();
                            for frame in data.chunks_mut(2) {
                                let sample = buf.pop_front().unwrap_or(0);
                                for out in frame {
                                    *out = sample;
                                }
                            }
                        },
                        |err| tracing::warn!("audio playback error: {err}"),
                        None,
                    ) {
                        Ok(stream) => Some(stream),
                        Err(e2) => {
                            warn!("failed to create i16 output stream: {e2}");
                            None
                        }
                    }
                }
            }
        });

        if let Some(ref s) = stream {
            if let Err(e) = s.play() {
                warn!("failed to start output stream: {e}");
            }
        }

        AudioPlayer {
            stream,
            shared_buffer,
        }
    }

    fn is_open(&self) -> bool {
        self.stream.is_some()
    }

    fn queue(&self, samples: &[i16]) {
        if let Ok(mut buf) = self.shared_buffer.lock() {
            buf.extend(samples.iter().copied());
        }
    }

    /// Block until the queued samples have been consumed by the device.
    fn drain(&self) {
        if self.stream.is_none() {
            return;
        }
        loop {
            let len = self.shared_buffer.lock().map(|b| b.len()).unwrap_or(0);
            if len == 0 {
                break;
            }
            std::thread::sleep(Duration::from_millis(50));
        }
        // Grace period for the hardware buffer.
        std::thread::sleep(Duration::from_millis(100));
    }
}
