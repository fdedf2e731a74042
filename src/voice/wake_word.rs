//! Wake phrase detection
//!
//! Works on transcripts: every wake capture is recognized first and the text
//! is matched against the configured phrases.

use std::cmp::Reverse;

/// Phrases used when none are configured
pub const DEFAULT_WAKE_WORDS: [&str; 3] = ["hey jarvis", "jarvis", "wake up"];

/// State of the wake word detector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DetectorState {
    /// Waiting for a wake phrase
    #[default]
    Waiting,
    /// Wake phrase heard, next utterance is a command
    Activated,
}

/// Detects wake phrases in transcripts
#[derive(Debug, Clone)]
pub struct WakeWordDetector {
    wake_words: Vec<String>,
    state: DetectorState,
}

impl WakeWordDetector {
    /// Create a new wake word detector
    ///
    /// # Arguments
    ///
    /// * `wake_words` - Phrases to detect (e.g., "hey jarvis"); blank entries
    ///   are ignored
    #[must_use]
    pub fn new(wake_words: Vec<String>) -> Self {
        let normalized: Vec<String> = wake_words
            .into_iter()
            .map(|w| w.trim().to_lowercase())
            .filter(|w| !w.is_empty())
            .collect();

        tracing::debug!(wake_words = ?normalized, "wake word detector initialized");

        Self {
            wake_words: normalized,
            state: DetectorState::Waiting,
        }
    }

    /// Check if transcribed text contains a wake word
    pub fn check_wake_word(&mut self, transcript: &str) -> bool {
        let normalized = transcript.to_lowercase();

        for wake_word in &self.wake_words {
            if normalized.contains(wake_word.as_str()) {
                tracing::info!(wake_word, transcript, "wake word detected");
                self.state = DetectorState::Activated;
                return true;
            }
        }

        self.reset();
        false
    }

    /// Command spoken in the same breath as the wake phrase
    ///
    /// Cuts after the earliest phrase, preferring the longest one starting
    /// there, so "hey jarvis open google" yields "open google" rather than
    /// the tail after "jarvis". Further wake phrases right after it are
    /// dropped too ("hey jarvis, wake up").
    /// Returns `None` when nothing follows.
    #[must_use]
    pub fn command_after_wake(&self, transcript: &str) -> Option<String> {
        let lower = transcript.to_lowercase();

        let (pos, phrase) = self
            .wake_words
            .iter()
            .filter_map(|w| lower.find(w.as_str()).map(|pos| (pos, w)))
            .min_by_key(|&(pos, w)| (pos, Reverse(w.len())))?;

        let mut command = trim_separators(&lower[pos + phrase.len()..]);
        while let Some(rest) = self.strip_leading_wake_word(command) {
            command = rest;
        }

        (!command.is_empty()).then(|| command.to_string())
    }

    /// Remainder after a whole wake phrase at the start of `text`
    fn strip_leading_wake_word<'a>(&self, text: &'a str) -> Option<&'a str> {
        self.wake_words
            .iter()
            .filter(|w| {
                text.strip_prefix(w.as_str())
                    .is_some_and(|rest| rest.is_empty() || !rest.starts_with(char::is_alphanumeric))
            })
            .max_by_key(|w| w.len())
            .map(|w| trim_separators(&text[w.len()..]))
    }

    /// Check if currently activated (wake word was detected)
    #[must_use]
    pub fn is_activated(&self) -> bool {
        self.state == DetectorState::Activated
    }

    /// Reset detector to waiting state
    pub const fn reset(&mut self) {
        self.state = DetectorState::Waiting;
    }

    /// Get current state
    #[must_use]
    pub const fn state(&self) -> DetectorState {
        self.state
    }

    /// Get the configured wake words
    #[must_use]
    pub fn wake_words(&self) -> &[String] {
        &self.wake_words
    }

    /// Manually activate (skip wake word detection)
    pub const fn activate(&mut self) {
        self.state = DetectorState::Activated;
    }
}

impl Default for WakeWordDetector {
    fn default() -> Self {
        Self::new(DEFAULT_WAKE_WORDS.iter().map(ToString::to_string).collect())
    }
}

fn trim_separators(text: &str) -> &str {
    text.trim_start_matches(|c: char| c.is_whitespace() || c == ',' || c == '.')
        .trim_end()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wake_word_detection() {
        let mut detector = WakeWordDetector::new(vec!["Hey Jarvis ".to_string()]);

        assert!(!detector.check_wake_word("hello world"));
        assert_eq!(detector.state(), DetectorState::Waiting);

        assert!(detector.check_wake_word("Hey Jarvis, what's up?"));
        assert_eq!(detector.state(), DetectorState::Activated);

        assert!(!detector.check_wake_word("nothing here"));
        assert_eq!(detector.state(), DetectorState::Waiting);
    }

    #[test]
    fn test_command_after_wake() {
        let detector = WakeWordDetector::default();

        assert_eq!(
            detector.command_after_wake("Hey Jarvis, what time is it"),
            Some("what time is it".to_string())
        );
        assert_eq!(
            detector.command_after_wake("jarvis open google."),
            Some("open google.".to_string())
        );
        assert_eq!(detector.command_after_wake("hey jarvis"), None);
        assert_eq!(detector.command_after_wake("open google"), None);
    }

    #[test]
    fn test_stacked_wake_phrases_are_not_a_command() {
        let detector = WakeWordDetector::default();

        assert_eq!(detector.command_after_wake("hey jarvis wake up"), None);
        assert_eq!(
            detector.command_after_wake("Hey Jarvis, wake up. Jarvis, tell me a joke"),
            Some("tell me a joke".to_string())
        );
        assert_eq!(
            detector.command_after_wake("jarvis wake upstairs lights"),
            Some("wake upstairs lights".to_string())
        );
    }

    #[test]
    fn test_blank_phrases_ignored() {
        let detector = WakeWordDetector::new(vec![String::new(), "  ".to_string()]);
        assert!(detector.wake_words().is_empty());
    }

    #[test]
    fn test_manual_activation() {
        let mut detector = WakeWordDetector::default();
        detector.activate();
        assert!(detector.is_activated());
        detector.reset();
        assert!(!detector.is_activated());
    }
}
