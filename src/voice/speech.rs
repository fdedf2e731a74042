//! Speech capture: one listen turned into a transcript

use super::capture::{SAMPLE_RATE, samples_to_wav};
use super::{AudioSource, ListenWindow, Recognizer};
use crate::{Error, Language, Result};

/// Result of one capture attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Capture {
    /// Recognized text, trimmed and non-empty
    Transcript(String),
    /// Nothing usable was heard
    Nothing,
    /// The recognizer could not be reached
    ServiceFailure(String),
}

impl Capture {
    /// Transcript text, if any
    #[must_use]
    pub fn into_text(self) -> Option<String> {
        match self {
            Self::Transcript(text) => Some(text),
            Self::Nothing | Self::ServiceFailure(_) => None,
        }
    }
}

/// Microphone plus recognizer
pub struct SpeechCapture {
    audio: Box<dyn AudioSource>,
    recognizer: Box<dyn Recognizer>,
}

impl SpeechCapture {
    #[must_use]
    pub fn new(audio: Box<dyn AudioSource>, recognizer: Box<dyn Recognizer>) -> Self {
        Self { audio, recognizer }
    }

    /// Listen once and recognize what was said
    ///
    /// Timeouts, unrecognized speech and recognizer outages are folded into
    /// [`Capture`]. Speech that is not understood with a non-English hint is
    /// retried once in English.
    ///
    /// # Errors
    ///
    /// Returns error only for audio device failures
    pub async fn capture(&mut self, window: ListenWindow, language: Language) -> Result<Capture> {
        let samples = match self.audio.record(window).await {
            Ok(samples) => samples,
            Err(Error::ListenTimeout) => {
                tracing::debug!("no speech before timeout");
                return Ok(Capture::Nothing);
            }
            Err(e) => return Err(e),
        };

        tracing::debug!(samples = samples.len(), %language, "phrase recorded");
        let wav = samples_to_wav(&samples, SAMPLE_RATE)?;

        let mut result = self.recognizer.recognize(&wav, language).await;
        if matches!(result, Err(Error::NotUnderstood)) && !language.is_base() {
            tracing::debug!(%language, "not understood, retrying in English");
            result = self.recognizer.recognize(&wav, Language::English).await;
        }

        Ok(match result {
            Ok(text) => classify(&text),
            Err(Error::NotUnderstood | Error::ListenTimeout) => {
                tracing::debug!("speech not understood");
                Capture::Nothing
            }
            Err(Error::ServiceUnavailable(reason) | Error::Stt(reason)) => {
                tracing::warn!(reason = %reason, "speech recognition service failed");
                Capture::ServiceFailure(reason)
            }
            Err(e) => {
                tracing::warn!(error = %e, "speech recognition failed");
                Capture::ServiceFailure(e.to_string())
            }
        })
    }
}

fn classify(text: &str) -> Capture {
    let text = text.trim();
    if text.is_empty() || text.eq_ignore_ascii_case("none") {
        Capture::Nothing
    } else {
        tracing::info!(transcript = text, "user said");
        Capture::Transcript(text.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_none_sentinel_is_nothing() {
        assert_eq!(classify("None"), Capture::Nothing);
        assert_eq!(classify("  "), Capture::Nothing);
        assert_eq!(
            classify(" open google "),
            Capture::Transcript("open google".to_string())
        );
    }

    #[test]
    fn test_into_text() {
        assert_eq!(Capture::Transcript("hi".to_string()).into_text().as_deref(), Some("hi"));
        assert_eq!(Capture::ServiceFailure("down".to_string()).into_text(), None);
    }
}
