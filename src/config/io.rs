//! Config I/O: load, save, environment overrides.

use std::path::{Path, PathBuf};

use super::config_struct::Config;

// ============================================================================
// CONFIG PATH
// ============================================================================

/// Get the config file path, creating the parent directory as needed.
pub fn get_config_path() -> PathBuf {
    let config_dir = dirs::config_dir().unwrap_or_default().join("polyprompt");
    let _ = std::fs::create_dir_all(&config_dir);
    config_dir.join("config.json")
}

// ============================================================================
// CONFIG LOADING
// ============================================================================

/// Load config from disk, falling back to defaults on any problem, then
/// apply environment overrides.
pub fn load_config() -> Config {
    let mut config = load_from(&get_config_path());
    config.gemini_api_key = resolve_api_key(&config.gemini_api_key, env_api_key());
    config
}

fn load_from(path: &Path) -> Config {
    if !path.exists() {
        return Config::default();
    }

    let data = match std::fs::read_to_string(path) {
        Ok(d) => d,
        Err(_) => return Config::default(),
    };

    match serde_json::from_str(&data) {
        Ok(c) => c,
        Err(_) => Config::default(),
    }
}

/// The environment wins over the stored key so a shell-exported credential
/// never has to be copied into the config file.
fn resolve_api_key(stored: &str, env: Option<String>) -> String {
    env.unwrap_or_else(|| stored.to_string())
}

fn env_api_key() -> Option<String> {
    std::env::var("GEMINI_API_KEY")
        .or_else(|_| std::env::var("GOOGLE_API_KEY"))
        .ok()
        .filter(|key| !key.trim().is_empty())
}

// ============================================================================
// CONFIG SAVING
// ============================================================================

/// Save config to disk. Failures are ignored; the running session keeps its
/// in-memory settings either way.
pub fn save_config(config: &Config) {
    save_to(&get_config_path(), config);
}

fn save_to(path: &Path, config: &Config) {
    if let Ok(data) = serde_json::to_string_pretty(config) {
        let _ = std::fs::write(path, data);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::types::default_generation_model;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let config = load_from(&dir.path().join("nope.json"));
        assert!(config.gemini_api_key.is_empty());
        assert_eq!(config.generation_model, default_generation_model());
    }

    #[test]
    fn malformed_file_yields_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{ this is not json").expect("write");
        let config = load_from(&path);
        assert_eq!(config.generation_model, default_generation_model());
    }

    #[test]
    fn empty_object_fills_every_field_with_defaults() {
        let config: Config = serde_json::from_str("{}").expect("parse");
        assert!(config.gemini_api_key.is_empty());
        assert_eq!(config.tts_voice, "Kore");
        assert_eq!(config.theme_mode, crate::config::ThemeMode::System);
    }

    #[test]
    fn save_load_roundtrip() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("config.json");

        let mut config = Config::default();
        config.gemini_api_key = "test-key".to_string();
        config.output_language = crate::language::OutputLanguage::Hindi;
        save_to(&path, &config);

        let loaded = load_from(&path);
        assert_eq!(loaded.gemini_api_key, "test-key");
        assert_eq!(loaded.output_language, crate::language::OutputLanguage::Hindi);
    }

    #[test]
    fn environment_key_wins_over_stored_key() {
        assert_eq!(
            resolve_api_key("stored", Some("from-env".to_string())),
            "from-env"
        );
        assert_eq!(resolve_api_key("stored", None), "stored");
    }
}
