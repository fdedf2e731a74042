//! Error types for Jarvis

use thiserror::Error;

/// Result type alias for Jarvis operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in Jarvis
///
/// Most variants never escape the main loop: the capture, action and
/// rendering layers turn them into a silent no-op or a spoken apology.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// Audio device error
    #[error("audio error: {0}")]
    Audio(String),

    /// No speech started before the listening window closed
    #[error("listening timed out")]
    ListenTimeout,

    /// The recognizer could not derive any text from the audio
    #[error("speech not understood")]
    NotUnderstood,

    /// The recognition service could not be reached or rejected the request
    #[error("recognition service unavailable: {0}")]
    ServiceUnavailable(String),

    /// Weather or translation endpoint failure
    #[error("external api error: {0}")]
    ExternalApi(String),

    /// Launching a URL, file or program failed
    #[error("action failed: {0}")]
    Action(String),

    /// Speech-to-text error
    #[error("STT error: {0}")]
    Stt(String),

    /// Text-to-speech error
    #[error("TTS error: {0}")]
    Tts(String),

    /// IO error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP error
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// TOML parsing error
    #[error("toml error: {0}")]
    Toml(#[from] toml::de::Error),
}
