//! Voice processing module
//!
//! Handles microphone capture, phrase recording, speech recognition, wake
//! phrase detection, speech synthesis and playback. The assistant reaches
//! the outside world only through the [`AudioSource`], [`Recognizer`] and
//! [`Speaker`] traits.

mod capture;
mod listen;
mod playback;
mod speaker;
mod speech;
mod stt;
mod tts;
mod wake_word;

use async_trait::async_trait;

use crate::{Language, Result};

pub use capture::{AudioCapture, SAMPLE_RATE, calculate_energy, samples_to_wav};
pub use listen::{ListenSettings, ListenWindow, Microphone, PhraseRecorder, RecorderStatus};
pub use playback::AudioPlayback;
pub use speaker::{CloudVoice, ConsoleVoice, SystemVoice, TtsBackend};
pub use speech::{Capture, SpeechCapture};
pub use stt::{SpeechToText, SttProvider};
pub use tts::{TextToSpeech, TtsProvider};
pub use wake_word::{DEFAULT_WAKE_WORDS, DetectorState, WakeWordDetector};

/// Records one phrase of 16kHz mono audio
#[async_trait(?Send)]
pub trait AudioSource {
    /// Record a phrase within `window`
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::ListenTimeout`] when no speech starts in time,
    /// or an audio error when the device fails
    async fn record(&mut self, window: ListenWindow) -> Result<Vec<f32>>;
}

/// Turns recorded speech into text
#[async_trait(?Send)]
pub trait Recognizer {
    /// Recognize WAV audio using `language` as a hint
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::NotUnderstood`] for unintelligible audio and
    /// [`crate::Error::ServiceUnavailable`] when the service cannot be reached
    async fn recognize(&self, wav: &[u8], language: Language) -> Result<String>;
}

/// Speaks a response and waits for it to finish
#[async_trait(?Send)]
pub trait Speaker {
    /// Speak `text`, already rendered in `language`
    ///
    /// # Errors
    ///
    /// Returns error if synthesis or playback fails
    async fn say(&mut self, text: &str, language: Language) -> Result<()>;
}
