//! Speech-to-text (STT) processing

use std::str::FromStr;

use async_trait::async_trait;

use super::Recognizer;
use crate::{Error, Language, Result};

/// Response from `OpenAI` Whisper transcription API
#[derive(serde::Deserialize)]
struct WhisperResponse {
    text: String,
}

/// Response from Deepgram transcription API
#[derive(serde::Deserialize)]
struct DeepgramResponse {
    results: DeepgramResults,
}

#[derive(serde::Deserialize)]
struct DeepgramResults {
    channels: Vec<DeepgramChannel>,
}

#[derive(serde::Deserialize)]
struct DeepgramChannel {
    alternatives: Vec<DeepgramAlternative>,
}

#[derive(serde::Deserialize)]
struct DeepgramAlternative {
    transcript: String,
}

/// STT provider backend
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum SttProvider {
    #[default]
    Whisper,
    Deepgram,
}

impl FromStr for SttProvider {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "whisper" | "openai" => Ok(Self::Whisper),
            "deepgram" => Ok(Self::Deepgram),
            other => Err(Error::Config(format!("unknown STT provider: {other}"))),
        }
    }
}

/// Transcribes speech to text through a hosted recognizer
pub struct SpeechToText {
    client: reqwest::Client,
    api_key: String,
    model: String,
    provider: SttProvider,
}

impl SpeechToText {
    /// Create a new STT instance
    ///
    /// # Errors
    ///
    /// Returns error if API key is missing
    pub fn new(
        client: reqwest::Client,
        provider: SttProvider,
        api_key: String,
        model: String,
    ) -> Result<Self> {
        if api_key.is_empty() {
            return Err(Error::Config(format!(
                "API key required for {provider:?} speech recognition"
            )));
        }

        Ok(Self {
            client,
            api_key,
            model,
            provider,
        })
    }

    /// Transcribe using `OpenAI` Whisper
    async fn transcribe_whisper(&self, audio: &[u8], language: Language) -> Result<String> {
        tracing::debug!(audio_bytes = audio.len(), %language, "starting Whisper transcription");

        let form = reqwest::multipart::Form::new()
            .part(
                "file",
                reqwest::multipart::Part::bytes(audio.to_vec())
                    .file_name("audio.wav")
                    .mime_str("audio/wav")
                    .map_err(|e| Error::Stt(e.to_string()))?,
            )
            .text("model", self.model.clone())
            .text("language", language.code());

        let response = self
            .client
            .post("https://api.openai.com/v1/audio/transcriptions")
            .header("Authorization", format!("Bearer {}", self.api_key))
            .multipart(form)
            .send()
            .await
            .map_err(unavailable)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!(status = %status, body = %body, "Whisper API error");
            return Err(Error::ServiceUnavailable(format!(
                "Whisper API error {status}: {body}"
            )));
        }

        let result: WhisperResponse = response.json().await.map_err(unavailable)?;
        Ok(result.text)
    }

    /// Transcribe using Deepgram
    async fn transcribe_deepgram(&self, audio: &[u8], language: Language) -> Result<String> {
        tracing::debug!(audio_bytes = audio.len(), %language, "starting Deepgram transcription");

        let response = self
            .client
            .post(deepgram_url(&self.model, language))
            .header("Authorization", format!("Token {}", self.api_key))
            .header("Content-Type", "audio/wav")
            .body(audio.to_vec())
            .send()
            .await
            .map_err(unavailable)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!(status = %status, body = %body, "Deepgram API error");
            return Err(Error::ServiceUnavailable(format!(
                "Deepgram API error {status}: {body}"
            )));
        }

        let result: DeepgramResponse = response.json().await.map_err(unavailable)?;
        Ok(first_alternative(result))
    }
}

#[async_trait(?Send)]
impl Recognizer for SpeechToText {
    async fn recognize(&self, wav: &[u8], language: Language) -> Result<String> {
        let text = match self.provider {
            SttProvider::Whisper => self.transcribe_whisper(wav, language).await?,
            SttProvider::Deepgram => self.transcribe_deepgram(wav, language).await?,
        };

        let text = text.trim();
        if text.is_empty() {
            return Err(Error::NotUnderstood);
        }

        tracing::info!(transcript = %text, "transcription complete");
        Ok(text.to_string())
    }
}

fn unavailable(e: reqwest::Error) -> Error {
    tracing::error!(error = %e, "recognition request failed");
    Error::ServiceUnavailable(e.to_string())
}

/// Deepgram takes regional tags such as `en-IN` where it has a model for them
fn deepgram_url(model: &str, language: Language) -> String {
    format!(
        "https://api.deepgram.com/v1/listen?model={model}&language={}&punctuate=true",
        language.locale()
    )
}

fn first_alternative(response: DeepgramResponse) -> String {
    response
        .results
        .channels
        .into_iter()
        .next()
        .and_then(|c| c.alternatives.into_iter().next())
        .map(|a| a.transcript)
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_key_rejected() {
        let result = SpeechToText::new(
            reqwest::Client::new(),
            SttProvider::Whisper,
            String::new(),
            "whisper-1".to_string(),
        );
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_provider_from_str() {
        assert_eq!("OpenAI".parse::<SttProvider>().unwrap(), SttProvider::Whisper);
        assert_eq!("deepgram".parse::<SttProvider>().unwrap(), SttProvider::Deepgram);
        assert!("vosk".parse::<SttProvider>().is_err());
    }

    #[test]
    fn test_deepgram_url_uses_locale() {
        assert_eq!(
            deepgram_url("nova-2", Language::English),
            "https://api.deepgram.com/v1/listen?model=nova-2&language=en-IN&punctuate=true"
        );
        assert!(deepgram_url("nova-2", Language::Portuguese).contains("language=pt-BR"));
    }

    #[test]
    fn test_deepgram_first_alternative() {
        let body = r#"{"results":{"channels":[{"alternatives":[
            {"transcript":"open youtube"},{"transcript":"open you tube"}]}]}}"#;
        let parsed: DeepgramResponse = serde_json::from_str(body).unwrap();
        assert_eq!(first_alternative(parsed), "open youtube");

        let empty: DeepgramResponse =
            serde_json::from_str(r#"{"results":{"channels":[]}}"#).unwrap();
        assert_eq!(first_alternative(empty), "");
    }
}
