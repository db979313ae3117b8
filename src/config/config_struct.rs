//! Config struct definition.

use serde::{Deserialize, Serialize};

use super::types::{
    default_generation_model, default_theme_mode, default_transcription_model,
    default_tts_model, default_tts_voice, ThemeMode,
};
use crate::language::OutputLanguage;

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct Config {
    /// Gemini API key. Overridden by `GEMINI_API_KEY` / `GOOGLE_API_KEY`
    /// from the environment at load time.
    #[serde(default)]
    pub gemini_api_key: String,
    #[serde(default = "default_generation_model")]
    pub generation_model: String,
    #[serde(default = "default_transcription_model")]
    pub transcription_model: String,
    #[serde(default = "default_tts_model")]
    pub tts_model: String,
    #[serde(default = "default_tts_voice")]
    pub tts_voice: String,
    #[serde(default = "default_theme_mode")]
    pub theme_mode: ThemeMode,
    /// Last selector position, restored on the next run.
    #[serde(default)]
    pub output_language: OutputLanguage,
}
