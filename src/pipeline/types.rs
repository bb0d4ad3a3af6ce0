//! Data types flowing through the transcription pipeline.

use crate::stt::transcriber::{Segment, TranscribeResponse};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// One bounded time-slice of source audio, materialized as an encoded
/// artifact and queued for transcription.
///
/// Created once by the partitioner/writer pair, read-only afterward, and
/// discarded after the runner consumes it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    /// Ordinal index in span emission order. This is the reassembly join
    /// key; downstream code must never infer it from list position.
    pub index: usize,
    pub start_ms: u64,
    pub end_ms: u64,
    /// Encoded artifact on disk, owned by the run's artifact store.
    pub path: PathBuf,
    /// Measured artifact size after encoding.
    pub size_bytes: u64,
}

impl Chunk {
    pub fn duration_ms(&self) -> u64 {
        self.end_ms - self.start_ms
    }
}

/// Everything a backend reported for one successfully transcribed chunk.
///
/// Duration and segments are optional backend capabilities; absence is
/// modeled here once instead of ad hoc checks downstream.
#[derive(Debug, Clone, PartialEq)]
pub struct ChunkTranscription {
    pub text: String,
    pub language: Option<String>,
    pub duration: Option<f64>,
    pub segments: Option<Vec<Segment>>,
}

impl From<TranscribeResponse> for ChunkTranscription {
    fn from(response: TranscribeResponse) -> Self {
        Self {
            text: response.text,
            language: response.language,
            duration: response.duration,
            segments: response.segments,
        }
    }
}

/// Tagged outcome of transcribing one chunk.
#[derive(Debug, Clone, PartialEq)]
pub enum ChunkOutcome {
    Success(ChunkTranscription),
    Failure { error: String },
}

/// Outcome of one chunk plus its originating index.
#[derive(Debug, Clone, PartialEq)]
pub struct ChunkResult {
    pub index: usize,
    pub outcome: ChunkOutcome,
}

impl ChunkResult {
    pub fn success(index: usize, transcription: ChunkTranscription) -> Self {
        Self {
            index,
            outcome: ChunkOutcome::Success(transcription),
        }
    }

    pub fn failure(index: usize, error: &str) -> Self {
        Self {
            index,
            outcome: ChunkOutcome::Failure {
                error: error.to_string(),
            },
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self.outcome, ChunkOutcome::Success(_))
    }
}

/// A failed chunk's index and error message, reported on total failure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChunkError {
    pub index: usize,
    pub error: String,
}

/// The pipeline's final output and the only shape downstream consumers
/// depend on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscriptResult {
    /// True iff at least one chunk succeeded.
    pub success: bool,
    /// Successful chunks' text in index order, joined by single spaces.
    pub text: String,
    /// Language of the first successful chunk, or "unknown".
    pub language: String,
    /// Merged segments on the global timeline.
    pub segments: Vec<Segment>,
    pub total_chunks: usize,
    pub successful_chunks: usize,
    pub failed_chunks: usize,
    /// Sum of successful chunks' reported durations, absent when none
    /// reported one.
    pub total_duration: Option<f64>,
    /// Per-chunk errors, present only when `success` is false.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chunk_errors: Option<Vec<ChunkError>>,
}
