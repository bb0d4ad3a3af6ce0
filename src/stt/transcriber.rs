//! Transcriber capability consumed by the pipeline.

use crate::error::{Result, VerbatimError};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::sync::Mutex;

/// Trait for speech-to-text transcription of one encoded audio artifact.
///
/// This trait allows swapping implementations (remote Whisper API vs mock).
#[async_trait]
pub trait Transcriber: Send + Sync {
    /// Transcribe encoded audio bytes to text.
    ///
    /// Backends may omit language, duration, and segments — those are
    /// optional capabilities, surfaced as `Option` fields on the response.
    async fn transcribe(
        &self,
        audio: &[u8],
        options: &TranscribeOptions,
    ) -> Result<TranscribeResponse>;

    /// Get the name of the backing model.
    fn model_name(&self) -> &str;
}

/// Per-request knobs passed through to the backend.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TranscribeOptions {
    /// Language code (e.g., "en", "de"). `None` or "auto" lets the backend
    /// detect the spoken language.
    pub language: Option<String>,
    /// Context prompt to improve transcription quality.
    pub prompt: Option<String>,
}

/// A timestamped text span within one chunk's transcription.
///
/// `start` and `end` are seconds on the chunk's own local clock; the
/// reassembler shifts them onto the global timeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub start: f64,
    pub end: f64,
    pub text: String,
}

/// Backend response for one audio artifact.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TranscribeResponse {
    pub text: String,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub duration: Option<f64>,
    #[serde(default)]
    pub segments: Option<Vec<Segment>>,
}

impl TranscribeResponse {
    /// Text-only response, the minimum every backend provides.
    pub fn new(text: &str) -> Self {
        Self {
            text: text.to_string(),
            language: None,
            duration: None,
            segments: None,
        }
    }

    pub fn with_language(mut self, language: &str) -> Self {
        self.language = Some(language.to_string());
        self
    }

    pub fn with_duration(mut self, duration: f64) -> Self {
        self.duration = Some(duration);
        self
    }

    pub fn with_segments(mut self, segments: Vec<Segment>) -> Self {
        self.segments = Some(segments);
        self
    }
}

enum MockOutcome {
    Respond(TranscribeResponse),
    Fail(String),
}

/// Mock transcriber for testing.
///
/// Scripted outcomes are returned in the order they were enqueued; once the
/// script runs dry every call gets a fixed default response.
pub struct MockTranscriber {
    model_name: String,
    script: Mutex<VecDeque<MockOutcome>>,
}

impl MockTranscriber {
    /// Create a new mock transcriber with an empty script.
    pub fn new(model_name: &str) -> Self {
        Self {
            model_name: model_name.to_string(),
            script: Mutex::new(VecDeque::new()),
        }
    }

    /// Enqueue a successful response.
    pub fn with_response(self, response: TranscribeResponse) -> Self {
        self.push(MockOutcome::Respond(response))
    }

    /// Enqueue a failure.
    pub fn with_failure(self, message: &str) -> Self {
        self.push(MockOutcome::Fail(message.to_string()))
    }

    fn push(self, outcome: MockOutcome) -> Self {
        if let Ok(mut script) = self.script.lock() {
            script.push_back(outcome);
        }
        self
    }
}

#[async_trait]
impl Transcriber for MockTranscriber {
    async fn transcribe(
        &self,
        _audio: &[u8],
        _options: &TranscribeOptions,
    ) -> Result<TranscribeResponse> {
        let outcome = self.script.lock().ok().and_then(|mut s| s.pop_front());
        match outcome {
            Some(MockOutcome::Respond(response)) => Ok(response),
            Some(MockOutcome::Fail(message)) => Err(VerbatimError::Transcription { message }),
            None => Ok(TranscribeResponse::new("mock transcription")),
        }
    }

    fn model_name(&self) -> &str {
        &self.model_name
    }
}
