//! In-memory WAV encode/decode and small PCM helpers.

use anyhow::Result;
use std::io::Cursor;

/// Encode PCM16 samples into a complete in-memory WAV container.
pub fn encode_wav(samples: &[i16], sample_rate: u32, channels: u16) -> Vec<u8> {
    let spec = hound::WavSpec {
        channels,
        sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };
    let mut wav_cursor = Cursor::new(Vec::new());
    {
        let mut writer =
            hound::WavWriter::new(&mut wav_cursor, spec).expect("Failed to create memory writer");
        for sample in samples {
            writer
                .write_sample(*sample)
                .expect("Failed to write sample");
        }
        writer.finalize().expect("Failed to finalize WAV");
    }
    wav_cursor.into_inner()
}

/// Decode a WAV container into mono PCM16 samples plus the source rate.
pub fn decode_wav_mono(wav_data: impl std::io::Read) -> Result<(Vec<i16>, u32)> {
    let reader = hound::WavReader::new(wav_data)?;
    let spec = reader.spec();

    let samples: Vec<i16> = match spec.sample_format {
        hound::SampleFormat::Int => reader
            .into_samples::<i16>()
            .filter_map(|s| s.ok())
            .collect(),
        hound::SampleFormat::Float => reader
            .into_samples::<f32>()
            .filter_map(|s| s.ok())
            .map(|f| (f * i16::MAX as f32) as i16)
            .collect(),
    };

    Ok((downmix_to_mono(&samples, spec.channels), spec.sample_rate))
}

/// Interpret raw little-endian bytes as PCM16 samples. A trailing odd byte
/// is dropped.
pub fn pcm16_from_le_bytes(bytes: &[u8]) -> Vec<i16> {
    bytes
        .chunks_exact(2)
        .map(|chunk| i16::from_le_bytes([chunk[0], chunk[1]]))
        .collect()
}

/// Downmix interleaved frames to mono by averaging each frame.
pub fn downmix_to_mono(samples: &[i16], channels: u16) -> Vec<i16> {
    if channels <= 1 {
        return samples.to_vec();
    }
    samples
        .chunks(channels as usize)
        .map(|frame| {
            let sum: i32 = frame.iter().map(|&s| s as i32).sum();
            (sum / frame.len() as i32) as i16
        })
        .collect()
}

/// Nearest-neighbor resample. Good enough for speech going to a recognizer
/// or out of a 24 kHz synthesis model.
pub fn resample(samples: &[i16], source_rate: u32, target_rate: u32) -> Vec<i16> {
    if source_rate == target_rate || samples.is_empty() {
        return samples.to_vec();
    }
    let ratio = target_rate as f64 / source_rate as f64;
    let new_len = (samples.len() as f64 * ratio) as usize;
    let mut resampled = Vec::with_capacity(new_len);
    for i in 0..new_len {
        let src_idx = (i as f64 / ratio) as usize;
        if src_idx < samples.len() {
            resampled.push(samples[src_idx]);
        }
    }
    resampled
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encoded_wav_has_riff_header() {
        let wav = encode_wav(&[0, 1, -1, 100], 16_000, 1);
        assert_eq!(&wav[0..4], b"RIFF");
        assert_eq!(&wav[8..12], b"WAVE");
    }

    #[test]
    fn encode_decode_roundtrip() {
        let samples: Vec<i16> = vec![0, 100, -100, i16::MAX, i16::MIN, 42];
        let wav = encode_wav(&samples, 16_000, 1);
        let (decoded, rate) = decode_wav_mono(wav.as_slice()).expect("decode");
        assert_eq!(decoded, samples);
        assert_eq!(rate, 16_000);
    }

    #[test]
    fn stereo_decodes_to_averaged_mono() {
        // Interleaved L/R frames: (100, 200) and (-50, 50)
        let wav = encode_wav(&[100, 200, -50, 50], 44_100, 2);
        let (decoded, _) = decode_wav_mono(wav.as_slice()).expect("decode");
        assert_eq!(decoded, vec![150, 0]);
    }

    #[test]
    fn le_bytes_parse_as_samples() {
        assert_eq!(pcm16_from_le_bytes(&[0x01, 0x00, 0xff, 0xff]), vec![1, -1]);
        // trailing odd byte ignored
        assert_eq!(pcm16_from_le_bytes(&[0x01, 0x00, 0x07]), vec![1]);
    }

    #[test]
    fn resample_scales_length() {
        let samples: Vec<i16> = (0..1000).map(|i| i as i16).collect();
        assert_eq!(resample(&samples, 48_000, 16_000).len(), 333);
        assert_eq!(resample(&samples, 16_000, 48_000).len(), 3000);
        assert_eq!(resample(&samples, 16_000, 16_000).len(), 1000);
    }

    #[test]
    fn resample_preserves_order() {
        let samples: Vec<i16> = (0..100).collect();
        let out = resample(&samples, 32_000, 16_000);
        let mut prev = -1i16;
        for s in out {
            assert!(s >= prev);
            prev = s;
        }
    }
}
