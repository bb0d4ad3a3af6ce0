//! Remote Whisper API backend.
//!
//! Posts encoded chunk artifacts to an OpenAI-compatible
//! `/audio/transcriptions` endpoint and parses the `verbose_json` response.
//! Timeouts and transport failures surface as ordinary per-chunk
//! transcription errors.

use crate::defaults::{AUTO_LANGUAGE, DEFAULT_BASE_URL, DEFAULT_MODEL, REQUEST_TIMEOUT_SECS};
use crate::error::{Result, VerbatimError};
use crate::stt::transcriber::{TranscribeOptions, TranscribeResponse, Transcriber};
use async_trait::async_trait;
use reqwest::multipart;
use std::time::Duration;

/// Transcriber backed by a remote Whisper-compatible HTTP API.
pub struct WhisperApiTranscriber {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl WhisperApiTranscriber {
    /// Create a backend with the default endpoint and model.
    pub fn new(api_key: String) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .unwrap_or_default();

        Self {
            client,
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
        }
    }

    /// Override the API base URL (no trailing slash).
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    /// Override the model.
    pub fn with_model(mut self, model: &str) -> Self {
        self.model = model.to_string();
        self
    }

    fn build_form(&self, audio: &[u8], options: &TranscribeOptions) -> Result<multipart::Form> {
        let file_part = multipart::Part::bytes(audio.to_vec())
            .file_name("audio.wav")
            .mime_str("audio/wav")
            .map_err(|e| VerbatimError::Transcription {
                message: format!("mime: {}", e),
            })?;

        let mut form = multipart::Form::new()
            .text("model", self.model.clone())
            .text("response_format", "verbose_json")
            .part("file", file_part);

        if let Some(language) = &options.language
            && language != AUTO_LANGUAGE
        {
            form = form.text("language", language.clone());
        }
        if let Some(prompt) = &options.prompt {
            form = form.text("prompt", prompt.clone());
        }

        Ok(form)
    }
}

#[async_trait]
impl Transcriber for WhisperApiTranscriber {
    async fn transcribe(
        &self,
        audio: &[u8],
        options: &TranscribeOptions,
    ) -> Result<TranscribeResponse> {
        let url = format!("{}/audio/transcriptions", self.base_url);
        let form = self.build_form(audio, options)?;

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .multipart(form)
            .send()
            .await
            .map_err(|e| VerbatimError::Transcription {
                message: format!("request: {}", e),
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            return Err(VerbatimError::Transcription {
                message: format!("status {}: {}", status, body),
            });
        }

        response
            .json::<TranscribeResponse>()
            .await
            .map_err(|e| VerbatimError::Transcription {
                message: format!("body: {}", e),
            })
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_the_openai_endpoint() {
        let transcriber = WhisperApiTranscriber::new("sk-test".to_string());
        assert_eq!(transcriber.base_url, "https://api.openai.com/v1");
        assert_eq!(transcriber.model_name(), "whisper-1");
    }

    #[test]
    fn builder_overrides_base_url_and_model() {
        let transcriber = WhisperApiTranscriber::new("sk-test".to_string())
            .with_base_url("http://localhost:8080/v1/")
            .with_model("whisper-large");

        assert_eq!(transcriber.base_url, "http://localhost:8080/v1");
        assert_eq!(transcriber.model_name(), "whisper-large");
    }

    #[test]
    fn build_form_accepts_language_and_prompt() {
        let transcriber = WhisperApiTranscriber::new("sk-test".to_string());
        let options = TranscribeOptions {
            language: Some("de".to_string()),
            prompt: Some("technical vocabulary".to_string()),
        };

        // Multipart form internals are opaque; building without error is the contract.
        assert!(transcriber.build_form(b"RIFF", &options).is_ok());
    }

    #[test]
    fn build_form_accepts_auto_language() {
        let transcriber = WhisperApiTranscriber::new("sk-test".to_string());
        let options = TranscribeOptions {
            language: Some(AUTO_LANGUAGE.to_string()),
            prompt: None,
        };

        assert!(transcriber.build_form(b"RIFF", &options).is_ok());
    }
}
