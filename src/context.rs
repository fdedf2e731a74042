//! Everything a handler can touch
//!
//! The [`Context`] owns the [`Session`], the collaborators behind their
//! traits, and the settings handlers read. It is passed by `&mut` through
//! the loop; nothing is shared.

use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::config::Config;
use crate::phrases;
use crate::render::render;
use crate::services::{
    Clock, Launcher, MyMemoryTranslator, SystemClock, SystemLauncher, Translator, WeatherService,
    WttrWeather,
};
use crate::voice::{
    AudioPlayback, Capture, CloudVoice, ConsoleVoice, ListenWindow, Microphone, Recognizer,
    Speaker, SpeechCapture, SpeechToText, SttProvider, SystemVoice, TextToSpeech, TtsBackend,
    TtsProvider,
};
use crate::{Error, Result, Session};

/// Search engine used by the search and Wikipedia handlers
pub const DEFAULT_SEARCH_URL: &str = "https://www.google.com/search?q=";

/// Collaborators the assistant drives
pub struct Services {
    pub speech: SpeechCapture,
    pub speaker: Box<dyn Speaker>,
    pub translator: Box<dyn Translator>,
    pub weather: Box<dyn WeatherService>,
    pub launcher: Box<dyn Launcher>,
    pub clock: Box<dyn Clock>,
}

impl Services {
    /// Production collaborators for `config`
    ///
    /// # Errors
    ///
    /// Returns error if a required API key is missing or no audio output or
    /// synthesizer is available
    pub fn from_config(config: &Config) -> Result<Self> {
        let client = http_client(config)?;

        let speech = SpeechCapture::new(
            Box::new(Microphone::new(config.listen.settings)),
            recognizer_from_config(config, client.clone())?,
        );

        Ok(Self {
            speech,
            speaker: speaker_from_config(config, client.clone())?,
            translator: Box::new(MyMemoryTranslator::new(
                client.clone(),
                config.services.translate_url.clone(),
            )),
            weather: Box::new(WttrWeather::new(client, config.services.weather_url.clone())),
            launcher: Box::new(SystemLauncher),
            clock: Box::new(SystemClock),
        })
    }
}

/// HTTP client shared by every hosted collaborator
///
/// # Errors
///
/// Returns error if the client cannot be built
pub fn http_client(config: &Config) -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(config.services.http_timeout)
        .build()
        .map_err(|e| Error::Config(format!("failed to create HTTP client: {e}")))
}

/// Speech recognizer selected by configuration
///
/// # Errors
///
/// Returns error if the provider's API key is missing
pub fn recognizer_from_config(
    config: &Config,
    client: reqwest::Client,
) -> Result<Box<dyn Recognizer>> {
    let key = match config.voice.stt_provider {
        SttProvider::Whisper => config.api_keys.openai.clone(),
        SttProvider::Deepgram => config.api_keys.deepgram.clone(),
    };

    let stt = SpeechToText::new(
        client,
        config.voice.stt_provider,
        key.unwrap_or_default(),
        config.voice.stt_model.clone(),
    )?;
    Ok(Box::new(stt))
}

/// Speaker selected by configuration
///
/// # Errors
///
/// Returns error if a hosted backend lacks its API key, no output device is
/// available, or no local synthesizer is installed
pub fn speaker_from_config(config: &Config, client: reqwest::Client) -> Result<Box<dyn Speaker>> {
    let voice = &config.voice;

    let hosted = |provider: TtsProvider, key: Option<&String>| -> Result<Box<dyn Speaker>> {
        let tts = TextToSpeech::new(
            client.clone(),
            provider,
            key.cloned().unwrap_or_default(),
            voice.tts_voice.clone(),
            voice.tts_model.clone(),
            voice.tts_speed,
        )?;
        Ok(Box::new(CloudVoice::new(tts, AudioPlayback::new()?)))
    };

    match voice.tts_backend {
        TtsBackend::OpenAI => hosted(TtsProvider::OpenAI, config.api_keys.openai.as_ref()),
        TtsBackend::ElevenLabs => {
            hosted(TtsProvider::ElevenLabs, config.api_keys.elevenlabs.as_ref())
        }
        TtsBackend::System => Ok(Box::new(SystemVoice::detect()?)),
        TtsBackend::Console => Ok(Box::new(ConsoleVoice)),
    }
}

/// Handler settings resolved from configuration
#[derive(Debug, Clone)]
pub struct Settings {
    /// Prefix a URL-encoded query is appended to
    pub search_url: String,
    /// Directory the play-music handler picks from
    pub music_dir: Option<PathBuf>,
    /// Spoken application name to program
    pub apps: BTreeMap<String, String>,
    pub wake_window: ListenWindow,
    pub command_window: ListenWindow,
}

impl Settings {
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self {
            search_url: config.services.search_url.clone(),
            music_dir: config.music_dir.clone(),
            apps: config.apps.clone(),
            wake_window: config.listen.wake_window,
            command_window: config.listen.command_window,
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            search_url: DEFAULT_SEARCH_URL.to_string(),
            music_dir: None,
            apps: BTreeMap::new(),
            wake_window: ListenWindow::wake(),
            command_window: ListenWindow::command(),
        }
    }
}

/// Session, services and settings for one run
pub struct Context {
    pub session: Session,
    pub services: Services,
    pub settings: Settings,
}

impl Context {
    #[must_use]
    pub const fn new(session: Session, services: Services, settings: Settings) -> Self {
        Self {
            session,
            services,
            settings,
        }
    }

    /// Context wired to the production collaborators
    ///
    /// # Errors
    ///
    /// Returns error if a collaborator cannot be set up
    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self::new(
            Session::new(config.language, config.seed),
            Services::from_config(config)?,
            Settings::from_config(config),
        ))
    }

    /// Speak a response in the session language
    ///
    /// The text is printed before it is spoken. Speaker failures are logged
    /// and otherwise ignored.
    pub async fn respond(&mut self, text: &str) {
        let language = self.session.language();
        let rendered = render(self.services.translator.as_ref(), text, language).await;

        println!("Jarvis: {rendered}");
        tracing::info!(response = %rendered, %language, "responding");

        if let Err(e) = self.services.speaker.say(&rendered, language).await {
            tracing::warn!(error = %e, "failed to speak response");
        }
    }

    /// Capture a command
    ///
    /// Apologizes out loud when the recognizer is unreachable.
    ///
    /// # Errors
    ///
    /// Returns error only for audio device failures
    pub async fn listen_command(&mut self) -> Result<Option<String>> {
        let window = self.settings.command_window;
        let capture = self
            .services
            .speech
            .capture(window, self.session.language())
            .await?;

        if matches!(capture, Capture::ServiceFailure(_)) {
            self.respond(phrases::RECOGNITION_ERROR).await;
        }

        Ok(capture.into_text())
    }

    /// Capture a possible wake phrase; failures stay silent
    ///
    /// # Errors
    ///
    /// Returns error only for audio device failures
    pub async fn listen_wake(&mut self) -> Result<Option<String>> {
        let window = self.settings.wake_window;
        let capture = self
            .services
            .speech
            .capture(window, self.session.language())
            .await?;

        Ok(capture.into_text())
    }
}
