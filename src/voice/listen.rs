//! Phrase recording
//!
//! One listen = open the microphone, sample the room to set an energy
//! threshold, wait for speech to start, record until a pause or the phrase
//! cap, release the microphone.

use std::time::{Duration, Instant};

use async_trait::async_trait;

use super::capture::{AudioCapture, SAMPLE_RATE, calculate_energy};
use super::AudioSource;
use crate::{Error, Result};

/// Poll interval while recording
const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Threshold multiplier applied to the ambient noise level
const AMBIENT_FACTOR: f32 = 1.5;

/// Bounds for a single listen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListenWindow {
    /// How long to wait for speech to start
    pub timeout: Duration,
    /// Longest phrase recorded once speech has started
    pub phrase_limit: Duration,
}

impl ListenWindow {
    #[must_use]
    pub const fn new(timeout: Duration, phrase_limit: Duration) -> Self {
        Self {
            timeout,
            phrase_limit,
        }
    }

    /// Short window used while waiting for the wake phrase
    #[must_use]
    pub const fn wake() -> Self {
        Self::new(Duration::from_secs(3), Duration::from_secs(3))
    }

    /// Window for a spoken command
    #[must_use]
    pub const fn command() -> Self {
        Self::new(Duration::from_secs(5), Duration::from_secs(8))
    }
}

/// Microphone tuning shared by every listen
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ListenSettings {
    /// Silence after speech that ends the phrase
    pub pause: Duration,
    /// Ambient noise sampling before each listen
    pub calibration: Duration,
    /// Lowest energy ever treated as speech
    pub energy_floor: f32,
}

impl Default for ListenSettings {
    fn default() -> Self {
        Self {
            pause: Duration::from_secs(1),
            calibration: Duration::from_millis(500),
            energy_floor: 0.02,
        }
    }
}

impl ListenSettings {
    /// Speech threshold for a measured ambient level
    #[must_use]
    pub fn threshold(&self, ambient: f32) -> f32 {
        (ambient * AMBIENT_FACTOR).max(self.energy_floor)
    }
}

/// Where the recorder stands after a chunk
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecorderStatus {
    /// No speech yet, still inside the timeout
    Waiting,
    /// Speech started, phrase still open
    Recording,
    /// Phrase finished by a pause or the length cap
    Complete,
    /// No speech before the timeout
    TimedOut,
}

/// Energy-gated phrase segmentation over a stream of sample chunks
#[derive(Debug)]
pub struct PhraseRecorder {
    threshold: f32,
    timeout_samples: usize,
    limit_samples: usize,
    pause_samples: usize,
    status: RecorderStatus,
    previous: Vec<f32>,
    buffer: Vec<f32>,
    waited: usize,
    silence: usize,
}

impl PhraseRecorder {
    /// Create a recorder for 16kHz audio
    #[must_use]
    pub fn new(threshold: f32, window: ListenWindow, pause: Duration) -> Self {
        Self {
            threshold,
            timeout_samples: samples_for(window.timeout),
            limit_samples: samples_for(window.phrase_limit),
            pause_samples: samples_for(pause),
            status: RecorderStatus::Waiting,
            previous: Vec::new(),
            buffer: Vec::new(),
            waited: 0,
            silence: 0,
        }
    }

    /// Feed the next chunk of samples
    pub fn push(&mut self, samples: &[f32]) -> RecorderStatus {
        let is_speech = calculate_energy(samples) > self.threshold;

        match self.status {
            RecorderStatus::Waiting => {
                if is_speech {
                    tracing::trace!(threshold = self.threshold, "speech started");
                    // keep the chunk before onset so the first syllable survives
                    self.buffer = std::mem::take(&mut self.previous);
                    self.buffer.extend_from_slice(samples);
                    self.silence = 0;
                    self.status = RecorderStatus::Recording;
                } else {
                    self.waited += samples.len();
                    self.previous = samples.to_vec();
                    if self.waited >= self.timeout_samples {
                        self.status = RecorderStatus::TimedOut;
                    }
                }
            }
            RecorderStatus::Recording => {
                self.buffer.extend_from_slice(samples);
                if is_speech {
                    self.silence = 0;
                } else {
                    self.silence += samples.len();
                }

                if self.silence >= self.pause_samples {
                    tracing::debug!(samples = self.buffer.len(), "phrase ended by pause");
                    self.status = RecorderStatus::Complete;
                } else if self.buffer.len() >= self.limit_samples {
                    tracing::debug!(samples = self.buffer.len(), "phrase hit length cap");
                    self.status = RecorderStatus::Complete;
                }
            }
            RecorderStatus::Complete | RecorderStatus::TimedOut => {}
        }

        self.status
    }

    /// Current status
    #[must_use]
    pub const fn status(&self) -> RecorderStatus {
        self.status
    }

    /// Recorded phrase so far
    #[must_use]
    pub fn samples(&self) -> &[f32] {
        &self.buffer
    }

    /// Take the recorded phrase
    #[must_use]
    pub fn into_samples(self) -> Vec<f32> {
        self.buffer
    }
}

/// Default microphone as an [`AudioSource`]
pub struct Microphone {
    settings: ListenSettings,
}

impl Microphone {
    #[must_use]
    pub const fn new(settings: ListenSettings) -> Self {
        Self { settings }
    }
}

#[async_trait(?Send)]
impl AudioSource for Microphone {
    async fn record(&mut self, window: ListenWindow) -> Result<Vec<f32>> {
        let capture = AudioCapture::open()?;

        tokio::time::sleep(self.settings.calibration).await;
        let ambient = calculate_energy(&capture.take_buffer());
        let threshold = self.settings.threshold(ambient);
        tracing::debug!(ambient, threshold, "calibrated for ambient noise");

        let mut recorder = PhraseRecorder::new(threshold, window, self.settings.pause);
        // guard against a stalled device that stops delivering chunks
        let deadline = Instant::now() + window.timeout + window.phrase_limit + self.settings.pause;

        loop {
            tokio::time::sleep(POLL_INTERVAL).await;

            let chunk = capture.take_buffer();
            let status = if chunk.is_empty() {
                recorder.status()
            } else {
                recorder.push(&chunk)
            };

            match status {
                RecorderStatus::Complete => return Ok(recorder.into_samples()),
                RecorderStatus::TimedOut => return Err(Error::ListenTimeout),
                RecorderStatus::Recording if Instant::now() >= deadline => {
                    return Ok(recorder.into_samples());
                }
                RecorderStatus::Waiting if Instant::now() >= deadline => {
                    return Err(Error::ListenTimeout);
                }
                RecorderStatus::Waiting | RecorderStatus::Recording => {}
            }
        }
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
fn samples_for(duration: Duration) -> usize {
    (duration.as_secs_f64() * f64::from(SAMPLE_RATE)) as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tone(secs: f32) -> Vec<f32> {
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let n = (SAMPLE_RATE as f32 * secs) as usize;
        #[allow(clippy::cast_precision_loss)]
        (0..n)
            .map(|i| 0.3 * (2.0 * std::f32::consts::PI * 440.0 * i as f32 / SAMPLE_RATE as f32).sin())
            .collect()
    }

    fn silence(secs: f32) -> Vec<f32> {
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let n = (SAMPLE_RATE as f32 * secs) as usize;
        vec![0.0; n]
    }

    fn recorder() -> PhraseRecorder {
        PhraseRecorder::new(
            0.02,
            ListenWindow::new(Duration::from_secs(1), Duration::from_secs(2)),
            Duration::from_millis(500),
        )
    }

    #[test]
    fn test_threshold_uses_floor() {
        let settings = ListenSettings::default();
        assert!((settings.threshold(0.0) - 0.02).abs() < f32::EPSILON);
        assert!((settings.threshold(0.1) - 0.15).abs() < 1e-6);
    }

    #[test]
    fn test_times_out_without_speech() {
        let mut rec = recorder();
        assert_eq!(rec.push(&silence(0.5)), RecorderStatus::Waiting);
        assert_eq!(rec.push(&silence(0.5)), RecorderStatus::TimedOut);
        assert!(rec.samples().is_empty());
    }

    #[test]
    fn test_pause_completes_phrase() {
        let mut rec = recorder();
        assert_eq!(rec.push(&silence(0.1)), RecorderStatus::Waiting);
        assert_eq!(rec.push(&tone(0.3)), RecorderStatus::Recording);
        assert_eq!(rec.push(&silence(0.3)), RecorderStatus::Recording);
        assert_eq!(rec.push(&silence(0.3)), RecorderStatus::Complete);

        // pre-roll + speech + trailing silence
        assert_eq!(rec.into_samples().len(), silence(0.1).len() + tone(0.3).len() + 2 * silence(0.3).len());
    }

    #[test]
    fn test_length_cap_completes_phrase() {
        let mut rec = recorder();
        assert_eq!(rec.push(&tone(1.0)), RecorderStatus::Recording);
        assert_eq!(rec.push(&tone(1.0)), RecorderStatus::Complete);
    }

    #[test]
    fn test_speech_resets_silence() {
        let mut rec = recorder();
        rec.push(&tone(0.2));
        rec.push(&silence(0.4));
        rec.push(&tone(0.2));
        assert_eq!(rec.push(&silence(0.4)), RecorderStatus::Recording);
    }

    #[test]
    fn test_default_windows() {
        assert!(ListenWindow::wake().timeout < ListenWindow::command().timeout);
    }
}
