//! TOML configuration file loading
//!
//! Supports `~/.config/jarvis/config.toml` as a persistent config source.
//! All fields are optional; the file is a partial overlay on top of defaults.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Top-level TOML configuration file schema
#[derive(Debug, Default, Deserialize)]
pub struct JarvisConfigFile {
    #[serde(default)]
    pub assistant: AssistantFileConfig,

    /// Wake phrase gating
    #[serde(default)]
    pub wake: WakeFileConfig,

    /// Microphone timing
    #[serde(default)]
    pub listen: ListenFileConfig,

    /// Speech recognition and synthesis
    #[serde(default)]
    pub voice: VoiceFileConfig,

    /// API keys for external services
    #[serde(default)]
    pub api_keys: ApiKeysFileConfig,

    /// Endpoints of the HTTP collaborators
    #[serde(default)]
    pub services: ServicesFileConfig,

    /// Spoken application name to program, replaces the built-in table
    #[serde(default)]
    pub apps: Option<BTreeMap<String, String>>,

    /// Directory the play-music command picks from
    #[serde(default)]
    pub music_dir: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct AssistantFileConfig {
    pub name: Option<String>,

    /// Response language code or name (e.g. "hi", "hindi")
    pub language: Option<String>,

    /// Seed for canned-phrase selection
    pub seed: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
pub struct WakeFileConfig {
    pub enabled: Option<bool>,
    pub phrases: Option<Vec<String>>,
}

/// Durations in seconds
#[derive(Debug, Default, Deserialize)]
pub struct ListenFileConfig {
    pub wake_timeout: Option<f64>,
    pub wake_phrase_limit: Option<f64>,
    pub command_timeout: Option<f64>,
    pub command_phrase_limit: Option<f64>,
    pub pause: Option<f64>,
    pub calibration: Option<f64>,
    pub energy_floor: Option<f32>,
}

#[derive(Debug, Default, Deserialize)]
pub struct VoiceFileConfig {
    /// "whisper" or "deepgram"
    pub stt_provider: Option<String>,

    /// STT model (e.g. "whisper-1")
    pub stt_model: Option<String>,

    /// "openai", "elevenlabs", "system" or "console"
    pub tts_backend: Option<String>,

    /// TTS model (e.g. "tts-1")
    pub tts_model: Option<String>,

    /// TTS voice identifier (e.g. "alloy")
    pub tts_voice: Option<String>,

    /// TTS speed multiplier
    pub tts_speed: Option<f32>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ApiKeysFileConfig {
    pub openai: Option<String>,
    pub deepgram: Option<String>,
    pub elevenlabs: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ServicesFileConfig {
    pub weather_url: Option<String>,
    pub translate_url: Option<String>,
    pub search_url: Option<String>,

    /// HTTP request timeout in seconds
    pub http_timeout: Option<u64>,
}

/// Load the TOML config file from the standard path
///
/// Returns `JarvisConfigFile::default()` if the file doesn't exist or can't be parsed.
#[must_use]
pub fn load_config_file() -> JarvisConfigFile {
    config_file_path().map_or_else(JarvisConfigFile::default, |path| load_config_from(&path))
}

/// Load a config file from `path`, falling back to defaults
#[must_use]
pub fn load_config_from(path: &Path) -> JarvisConfigFile {
    if !path.exists() {
        return JarvisConfigFile::default();
    }

    match std::fs::read_to_string(path) {
        Ok(content) => match toml::from_str(&content) {
            Ok(config) => {
                tracing::info!(path = %path.display(), "loaded config file");
                config
            }
            Err(e) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %e,
                    "failed to parse config file, using defaults"
                );
                JarvisConfigFile::default()
            }
        },
        Err(e) => {
            tracing::warn!(
                path = %path.display(),
                error = %e,
                "failed to read config file"
            );
            JarvisConfigFile::default()
        }
    }
}

/// Return the config file path: `~/.config/jarvis/config.toml`
#[must_use]
pub fn config_file_path() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|d| d.config_dir().join("jarvis").join("config.toml"))
}
