//! Configuration management for Jarvis
//!
//! Values resolve as environment variable, then config file, then default.

pub mod file;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::context::DEFAULT_SEARCH_URL;
use crate::services::{DEFAULT_TRANSLATE_URL, DEFAULT_WEATHER_URL};
use crate::voice::{DEFAULT_WAKE_WORDS, ListenSettings, ListenWindow, SttProvider, TtsBackend};
use crate::{Error, Language, Result};

use self::file::JarvisConfigFile;

/// Jarvis configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Name the assistant answers to in logs
    pub name: String,

    /// Starting response language
    pub language: Language,

    /// Seed for canned-phrase selection; random when unset
    pub seed: Option<u64>,

    pub wake: WakeConfig,

    pub listen: ListenConfig,

    pub voice: VoiceConfig,

    pub api_keys: ApiKeys,

    pub services: ServicesConfig,

    /// Spoken application name to program
    pub apps: BTreeMap<String, String>,

    /// Directory the play-music command picks from
    pub music_dir: Option<PathBuf>,
}

/// Wake phrase gating
#[derive(Debug, Clone)]
pub struct WakeConfig {
    /// Require a wake phrase before each command
    pub enabled: bool,

    /// Phrases that activate the assistant
    pub phrases: Vec<String>,
}

/// Microphone timing
#[derive(Debug, Clone, Copy)]
pub struct ListenConfig {
    pub wake_window: ListenWindow,
    pub command_window: ListenWindow,
    pub settings: ListenSettings,
}

/// Speech recognition and synthesis
#[derive(Debug, Clone)]
pub struct VoiceConfig {
    pub stt_provider: SttProvider,

    /// STT model (e.g. "whisper-1", "nova-2")
    pub stt_model: String,

    pub tts_backend: TtsBackend,

    /// TTS model; the backend default when unset
    pub tts_model: Option<String>,

    /// TTS voice name (`OpenAI`) or voice id (`ElevenLabs`)
    pub tts_voice: String,

    /// TTS speed multiplier (0.25 to 4.0)
    pub tts_speed: f32,
}

/// API keys for external services
#[derive(Debug, Clone, Default)]
pub struct ApiKeys {
    /// `OpenAI` API key (for Whisper and TTS)
    pub openai: Option<String>,

    /// `Deepgram` API key (optional STT)
    pub deepgram: Option<String>,

    /// `ElevenLabs` API key (optional TTS)
    pub elevenlabs: Option<String>,
}

/// HTTP collaborator endpoints
#[derive(Debug, Clone)]
pub struct ServicesConfig {
    pub weather_url: String,
    pub translate_url: String,
    pub search_url: String,
    pub http_timeout: Duration,
}

impl Config {
    /// Load configuration from the environment and the config file
    ///
    /// # Errors
    ///
    /// Returns error if a configured language, provider or backend is unknown
    pub fn load() -> Result<Self> {
        Self::from_sources(file::load_config_file(), |key| std::env::var(key).ok())
    }

    /// Assemble configuration from a parsed file and an environment lookup
    ///
    /// # Errors
    ///
    /// Returns error if a configured language, provider or backend is unknown
    pub fn from_sources<F>(fc: JarvisConfigFile, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let env = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let language = env("JARVIS_LANGUAGE")
            .or(fc.assistant.language)
            .map(|l| l.parse::<Language>())
            .transpose()?
            .unwrap_or_default();

        let seed = match env("JARVIS_SEED") {
            Some(s) => Some(
                s.trim()
                    .parse::<u64>()
                    .map_err(|_| Error::Config(format!("invalid JARVIS_SEED: {s}")))?,
            ),
            None => fc.assistant.seed,
        };

        let wake = WakeConfig {
            enabled: env("JARVIS_WAKE")
                .map(|v| parse_bool(&v))
                .transpose()?
                .or(fc.wake.enabled)
                .unwrap_or(true),
            phrases: env("JARVIS_WAKE_WORDS")
                .map(|v| v.split(',').map(|p| p.trim().to_string()).collect())
                .or(fc.wake.phrases)
                .filter(|p: &Vec<String>| p.iter().any(|w| !w.trim().is_empty()))
                .unwrap_or_else(|| DEFAULT_WAKE_WORDS.iter().map(ToString::to_string).collect()),
        };

        let listen = listen_config(&fc.listen)?;

        let stt_provider = env("JARVIS_STT_PROVIDER")
            .or(fc.voice.stt_provider)
            .map(|p| p.parse::<SttProvider>())
            .transpose()?
            .unwrap_or_default();
        let tts_backend = env("JARVIS_TTS_BACKEND")
            .or(fc.voice.tts_backend)
            .map(|b| b.parse::<TtsBackend>())
            .transpose()?
            .unwrap_or_default();

        let voice = VoiceConfig {
            stt_provider,
            stt_model: env("JARVIS_STT_MODEL")
                .or(fc.voice.stt_model)
                .unwrap_or_else(|| default_stt_model(stt_provider).to_string()),
            tts_backend,
            tts_model: fc.voice.tts_model,
            tts_voice: env("JARVIS_TTS_VOICE")
                .or(fc.voice.tts_voice)
                .unwrap_or_else(|| default_tts_voice(tts_backend).to_string()),
            tts_speed: fc.voice.tts_speed.unwrap_or(1.0).clamp(0.25, 4.0),
        };

        let api_keys = ApiKeys {
            openai: env("OPENAI_API_KEY").or(fc.api_keys.openai),
            deepgram: env("DEEPGRAM_API_KEY").or(fc.api_keys.deepgram),
            elevenlabs: env("ELEVENLABS_API_KEY").or(fc.api_keys.elevenlabs),
        };

        let services = ServicesConfig {
            weather_url: env("JARVIS_WEATHER_URL")
                .or(fc.services.weather_url)
                .unwrap_or_else(|| DEFAULT_WEATHER_URL.to_string()),
            translate_url: env("JARVIS_TRANSLATE_URL")
                .or(fc.services.translate_url)
                .unwrap_or_else(|| DEFAULT_TRANSLATE_URL.to_string()),
            search_url: fc
                .services
                .search_url
                .unwrap_or_else(|| DEFAULT_SEARCH_URL.to_string()),
            http_timeout: Duration::from_secs(fc.services.http_timeout.unwrap_or(15)),
        };

        let apps = fc
            .apps
            .map(|apps| {
                apps.into_iter()
                    .map(|(name, program)| (name.trim().to_lowercase(), program))
                    .collect()
            })
            .unwrap_or_else(default_apps);

        let music_dir = env("JARVIS_MUSIC_DIR")
            .or(fc.music_dir)
            .map(|d| expand_home(&d))
            .or_else(default_music_dir);

        Ok(Self {
            name: fc.assistant.name.unwrap_or_else(|| "Jarvis".to_string()),
            language,
            seed,
            wake,
            listen,
            voice,
            api_keys,
            services,
            apps,
            music_dir,
        })
    }
}

fn listen_config(fc: &file::ListenFileConfig) -> Result<ListenConfig> {
    let wake_default = ListenWindow::wake();
    let command_default = ListenWindow::command();
    let settings_default = ListenSettings::default();

    let secs = |value: Option<f64>, default: Duration, field: &str| -> Result<Duration> {
        value.map_or(Ok(default), |v| {
            Duration::try_from_secs_f64(v)
                .map_err(|_| Error::Config(format!("invalid [listen] {field}: {v}")))
        })
    };

    Ok(ListenConfig {
        wake_window: ListenWindow::new(
            secs(fc.wake_timeout, wake_default.timeout, "wake_timeout")?,
            secs(fc.wake_phrase_limit, wake_default.phrase_limit, "wake_phrase_limit")?,
        ),
        command_window: ListenWindow::new(
            secs(fc.command_timeout, command_default.timeout, "command_timeout")?,
            secs(fc.command_phrase_limit, command_default.phrase_limit, "command_phrase_limit")?,
        ),
        settings: ListenSettings {
            pause: secs(fc.pause, settings_default.pause, "pause")?,
            calibration: secs(fc.calibration, settings_default.calibration, "calibration")?,
            energy_floor: fc.energy_floor.unwrap_or(settings_default.energy_floor),
        },
    })
}

fn parse_bool(value: &str) -> Result<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(Error::Config(format!("invalid boolean: {other}"))),
    }
}

const fn default_stt_model(provider: SttProvider) -> &'static str {
    match provider {
        SttProvider::Whisper => "whisper-1",
        SttProvider::Deepgram => "nova-2",
    }
}

const fn default_tts_voice(backend: TtsBackend) -> &'static str {
    match backend {
        // "Rachel", a stock ElevenLabs voice
        TtsBackend::ElevenLabs => "21m00Tcm4TlvDq8ikWAM",
        TtsBackend::OpenAI | TtsBackend::System | TtsBackend::Console => "alloy",
    }
}

/// Built-in application table for this OS
#[must_use]
pub fn default_apps() -> BTreeMap<String, String> {
    let apps: &[(&str, &str)] = if cfg!(target_os = "windows") {
        &[
            ("code", "code"),
            ("notepad", "notepad"),
            ("calculator", "calc"),
            ("paint", "mspaint"),
            ("command prompt", "cmd"),
        ]
    } else if cfg!(target_os = "macos") {
        &[
            ("code", "code"),
            ("calculator", "/System/Applications/Calculator.app/Contents/MacOS/Calculator"),
            ("terminal", "/System/Applications/Utilities/Terminal.app/Contents/MacOS/Terminal"),
            ("text editor", "/System/Applications/TextEdit.app/Contents/MacOS/TextEdit"),
        ]
    } else {
        &[
            ("code", "code"),
            ("calculator", "gnome-calculator"),
            ("terminal", "x-terminal-emulator"),
            ("text editor", "gedit"),
            ("firefox", "firefox"),
        ]
    };

    apps.iter()
        .map(|(name, program)| ((*name).to_string(), (*program).to_string()))
        .collect()
}

fn default_music_dir() -> Option<PathBuf> {
    directories::UserDirs::new().and_then(|d| d.audio_dir().map(Path::to_path_buf))
}

fn expand_home(path: &str) -> PathBuf {
    match path.strip_prefix("~/") {
        Some(rest) => directories::BaseDirs::new()
            .map_or_else(|| PathBuf::from(path), |d| d.home_dir().join(rest)),
        None => PathBuf::from(path),
    }
}
