//! Config Default implementation.

use super::config_struct::Config;
use super::types::{
    default_generation_model, default_theme_mode, default_transcription_model,
    default_tts_model, default_tts_voice,
};
use crate::language::OutputLanguage;

impl Default for Config {
    fn default() -> Self {
        Config {
            gemini_api_key: String::new(),
            generation_model: default_generation_model(),
            transcription_model: default_transcription_model(),
            tts_model: default_tts_model(),
            tts_voice: default_tts_voice(),
            theme_mode: default_theme_mode(),
            output_language: OutputLanguage::default(),
        }
    }
}
