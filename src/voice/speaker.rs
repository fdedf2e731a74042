//! Speech output backends

use std::path::PathBuf;
use std::process::Stdio;
use std::str::FromStr;

use async_trait::async_trait;
use tokio::process::Command;

use super::{AudioPlayback, Speaker, TextToSpeech};
use crate::{Error, Language, Result};

/// Which [`Speaker`] the assistant talks through
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum TtsBackend {
    #[default]
    OpenAI,
    ElevenLabs,
    /// Local synthesizer program
    System,
    /// Text only
    Console,
}

impl FromStr for TtsBackend {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "openai" => Ok(Self::OpenAI),
            "elevenlabs" => Ok(Self::ElevenLabs),
            "system" | "local" => Ok(Self::System),
            "console" | "none" => Ok(Self::Console),
            other => Err(Error::Config(format!("unknown TTS backend: {other}"))),
        }
    }
}

/// Hosted synthesis played through the default output device
pub struct CloudVoice {
    tts: TextToSpeech,
    playback: AudioPlayback,
}

impl CloudVoice {
    #[must_use]
    pub const fn new(tts: TextToSpeech, playback: AudioPlayback) -> Self {
        Self { tts, playback }
    }
}

#[async_trait(?Send)]
impl Speaker for CloudVoice {
    async fn say(&mut self, text: &str, _language: Language) -> Result<()> {
        let audio = self.tts.synthesize(text).await?;
        tracing::debug!(bytes = audio.len(), "speech synthesized");
        self.playback.play_mp3(&audio).await
    }
}

/// Local synthesizer found on `PATH`
pub struct SystemVoice {
    program: PathBuf,
    kind: SystemProgram,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum SystemProgram {
    Espeak,
    Say,
    PowerShell,
}

impl SystemVoice {
    /// Find a synthesizer, preferring `espeak-ng`
    ///
    /// # Errors
    ///
    /// Returns error if none of `espeak-ng`, `espeak`, `say` or `powershell`
    /// is installed
    pub fn detect() -> Result<Self> {
        let candidates = [
            ("espeak-ng", SystemProgram::Espeak),
            ("espeak", SystemProgram::Espeak),
            ("say", SystemProgram::Say),
            ("powershell", SystemProgram::PowerShell),
        ];

        for (bin, kind) in candidates {
            if let Ok(program) = which::which(bin) {
                tracing::debug!(program = %program.display(), "using system speech synthesizer");
                return Ok(Self { program, kind });
            }
        }

        Err(Error::Config(
            "no speech synthesizer found (install espeak-ng)".to_string(),
        ))
    }

    fn args(&self, text: &str, language: Language) -> Vec<String> {
        match self.kind {
            SystemProgram::Espeak => {
                vec!["-v".to_string(), language.code().to_string(), text.to_string()]
            }
            SystemProgram::Say => vec![text.to_string()],
            SystemProgram::PowerShell => vec![
                "-NoProfile".to_string(),
                "-Command".to_string(),
                format!(
                    "Add-Type -AssemblyName System.Speech; \
                     (New-Object System.Speech.Synthesis.SpeechSynthesizer).Speak('{}')",
                    text.replace('\'', "''")
                ),
            ],
        }
    }
}

#[async_trait(?Send)]
impl Speaker for SystemVoice {
    async fn say(&mut self, text: &str, language: Language) -> Result<()> {
        let status = Command::new(&self.program)
            .args(self.args(text, language))
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .await
            .map_err(|e| Error::Tts(format!("failed to run {}: {e}", self.program.display())))?;

        if !status.success() {
            let code = status.code().unwrap_or(-1);
            return Err(Error::Tts(format!("speech synthesizer exited with code {code}")));
        }

        Ok(())
    }
}

/// Silent speaker; responses are only printed
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleVoice;

#[async_trait(?Send)]
impl Speaker for ConsoleVoice {
    async fn say(&mut self, _text: &str, _language: Language) -> Result<()> {
        Ok(())
    }
}
