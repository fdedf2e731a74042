//! Voice pipeline integration tests
//!
//! Tests voice components without requiring audio hardware

use std::io::Cursor;
use std::time::Duration;

use jarvis::voice::{
    DetectorState, ListenWindow, PhraseRecorder, RecorderStatus, SAMPLE_RATE, WakeWordDetector,
    samples_to_wav,
};

/// Generate sine wave audio samples
fn generate_sine_samples(frequency: f32, duration_secs: f32, amplitude: f32) -> Vec<f32> {
    let num_samples = (SAMPLE_RATE as f32 * duration_secs) as usize;
    (0..num_samples)
        .map(|i| {
            let t = i as f32 / SAMPLE_RATE as f32;
            amplitude * (2.0 * std::f32::consts::PI * frequency * t).sin()
        })
        .collect()
}

/// Generate silence
fn generate_silence(duration_secs: f32) -> Vec<f32> {
    let num_samples = (SAMPLE_RATE as f32 * duration_secs) as usize;
    vec![0.0; num_samples]
}

#[test]
fn test_wake_word_detector_creation() {
    let detector = WakeWordDetector::new(vec!["hey jarvis".to_string()]);

    assert_eq!(detector.state(), DetectorState::Waiting);
    assert_eq!(detector.wake_words(), &["hey jarvis"]);
    assert!(!detector.is_activated());
}

#[test]
fn test_default_wake_words() {
    let detector = WakeWordDetector::default();
    assert_eq!(detector.wake_words(), &["hey jarvis", "jarvis", "wake up"]);
}

#[test]
fn test_wake_word_normalization() {
    let detector = WakeWordDetector::new(vec!["  Hey JARVIS  ".to_string(), "WAKE UP".to_string()]);

    // Should be normalized to lowercase and trimmed
    assert_eq!(detector.wake_words(), &["hey jarvis", "wake up"]);
}

#[test]
fn test_wake_word_check() {
    let mut detector = WakeWordDetector::default();

    // No wake word
    assert!(!detector.check_wake_word("hello world"));
    assert_eq!(detector.state(), DetectorState::Waiting);

    // Wake word present
    assert!(detector.check_wake_word("Wake up, it's morning"));
    assert_eq!(detector.state(), DetectorState::Activated);
    assert!(detector.is_activated());
}

#[test]
fn test_wake_word_case_insensitive() {
    let mut detector = WakeWordDetector::new(vec!["hey jarvis".to_string()]);

    assert!(detector.check_wake_word("HEY JARVIS"));
    detector.reset();

    assert!(detector.check_wake_word("HeY jArViS"));
    detector.reset();

    assert!(detector.check_wake_word("hey jarvis"));
}

#[test]
fn test_miss_resets_activation() {
    let mut detector = WakeWordDetector::default();

    detector.check_wake_word("jarvis");
    assert!(detector.is_activated());

    detector.check_wake_word("just talking");
    assert_eq!(detector.state(), DetectorState::Waiting);
}

#[test]
fn test_command_in_wake_utterance() {
    let detector = WakeWordDetector::default();

    assert_eq!(
        detector.command_after_wake("Hey Jarvis, open YouTube").as_deref(),
        Some("open youtube")
    );
    assert_eq!(detector.command_after_wake("Jarvis."), None);
}

#[test]
fn test_recorder_segments_phrase() {
    let window = ListenWindow::new(Duration::from_secs(2), Duration::from_secs(5));
    let mut recorder = PhraseRecorder::new(0.05, window, Duration::from_millis(500));

    assert_eq!(recorder.push(&generate_silence(0.2)), RecorderStatus::Waiting);
    assert_eq!(
        recorder.push(&generate_sine_samples(440.0, 0.5, 0.3)),
        RecorderStatus::Recording
    );
    assert_eq!(recorder.push(&generate_silence(0.6)), RecorderStatus::Complete);

    // Pushing after completion changes nothing
    let len = recorder.samples().len();
    assert_eq!(recorder.push(&generate_silence(0.1)), RecorderStatus::Complete);
    assert_eq!(recorder.samples().len(), len);
}

#[test]
fn test_recorder_ignores_quiet_noise() {
    let window = ListenWindow::new(Duration::from_secs(1), Duration::from_secs(5));
    let mut recorder = PhraseRecorder::new(0.1, window, Duration::from_millis(500));

    // below threshold counts as silence
    let hum = generate_sine_samples(50.0, 0.5, 0.05);
    assert_eq!(recorder.push(&hum), RecorderStatus::Waiting);
    assert_eq!(recorder.push(&hum), RecorderStatus::TimedOut);
}

#[test]
fn test_samples_to_wav() {
    let samples = generate_sine_samples(440.0, 0.1, 0.5);
    let wav_data = samples_to_wav(&samples, SAMPLE_RATE).unwrap();

    // Check WAV header magic
    assert_eq!(&wav_data[0..4], b"RIFF");
    assert_eq!(&wav_data[8..12], b"WAVE");

    // WAV should have reasonable size
    assert!(wav_data.len() > 44); // WAV header is 44 bytes
}

#[test]
fn test_wav_roundtrip() {
    let original_samples: Vec<f32> = vec![0.0, 0.5, -0.5, 1.0, -1.0, 0.25];
    let wav_data = samples_to_wav(&original_samples, SAMPLE_RATE).unwrap();

    // Read WAV back
    let cursor = Cursor::new(wav_data);
    let mut reader = hound::WavReader::new(cursor).unwrap();

    let spec = reader.spec();
    assert_eq!(spec.sample_rate, SAMPLE_RATE);
    assert_eq!(spec.channels, 1);
    assert_eq!(spec.bits_per_sample, 16);

    // Read samples back
    let read_samples: Vec<i16> = reader.samples::<i16>().map(|s| s.unwrap()).collect();
    assert_eq!(read_samples.len(), original_samples.len());
}
