//! Core configuration types and serde default helpers.

use serde::{Deserialize, Serialize};

// --- THEME MODE ENUM ---
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub enum ThemeMode {
    System,
    Dark,
    Light,
}

pub fn default_theme_mode() -> ThemeMode {
    ThemeMode::System
}

pub fn default_generation_model() -> String {
    "gemini-2.5-flash".to_string()
}

pub fn default_transcription_model() -> String {
    "gemini-2.5-flash".to_string()
}

pub fn default_tts_model() -> String {
    "gemini-2.5-flash-preview-tts".to_string()
}

/// Prebuilt voice used for every synthesis request. The voice reads in the
/// response's own language but is tuned for English; the output-language
/// selector deliberately does not reach the synthesis side.
pub fn default_tts_voice() -> String {
    "Kore".to_string()
}
