//! Pipeline façade.

use crate::defaults::UNKNOWN_LANGUAGE;
use crate::error::{Result, VerbatimError};
use crate::pipeline::progress::ProgressObserver;
use crate::pipeline::reassembler::reassemble;
use crate::pipeline::runner::TranscriptionRunner;
use crate::pipeline::types::{Chunk, ChunkError, ChunkOutcome, ChunkResult, TranscriptResult};
use crate::stt::transcriber::{TranscribeOptions, Transcriber};
use std::sync::Arc;

/// The one entry point callers use to transcribe a batch of chunks.
///
/// Stateless across calls: each invocation is a pure function of its
/// inputs. A single chunk takes a fast path that skips the runner and
/// reassembler entirely, preserving the backend's native segment
/// timestamps; anything larger goes through sequential transcription and
/// index-ordered merging.
pub struct TranscriptionService {
    transcriber: Arc<dyn Transcriber>,
    options: TranscribeOptions,
}

impl TranscriptionService {
    pub fn new(transcriber: Arc<dyn Transcriber>) -> Self {
        Self {
            transcriber,
            options: TranscribeOptions::default(),
        }
    }

    pub fn with_options(mut self, options: TranscribeOptions) -> Self {
        self.options = options;
        self
    }

    /// Transcribe the chunk batch into one transcript.
    ///
    /// An empty batch is a caller error, rejected before any backend or
    /// disk I/O. Chunk-level failures are recovered into the result; the
    /// returned `Err` is reserved for structural problems.
    pub async fn transcribe(
        &self,
        chunks: &[Chunk],
        observer: Option<&dyn ProgressObserver>,
    ) -> Result<TranscriptResult> {
        if chunks.is_empty() {
            return Err(VerbatimError::InvalidInput {
                message: "no audio chunks provided".to_string(),
            });
        }

        let runner = TranscriptionRunner::new(self.transcriber.clone(), self.options.clone());

        if let [chunk] = chunks {
            if let Some(observer) = observer {
                observer.on_progress(0.5, "Transcribing audio...");
            }
            let result = runner.transcribe_chunk(chunk).await;
            if let Some(observer) = observer {
                observer.on_progress(1.0, "Transcription complete!");
            }
            return Ok(Self::from_single(result));
        }

        if let Some(observer) = observer {
            observer.on_progress(0.0, "Starting transcription...");
        }
        let results = runner.run(chunks, observer).await;
        let merged = reassemble(&results);
        if let Some(observer) = observer {
            observer.on_progress(1.0, "Transcription complete!");
        }

        Ok(merged)
    }

    /// Reshape a lone chunk's result without merging, so the backend's
    /// segment timestamps pass through unmodified (offset 0).
    fn from_single(result: ChunkResult) -> TranscriptResult {
        match result.outcome {
            ChunkOutcome::Success(transcription) => TranscriptResult {
                success: true,
                text: transcription.text.trim().to_string(),
                language: transcription
                    .language
                    .unwrap_or_else(|| UNKNOWN_LANGUAGE.to_string()),
                segments: transcription.segments.unwrap_or_default(),
                total_chunks: 1,
                successful_chunks: 1,
                failed_chunks: 0,
                total_duration: transcription.duration,
                chunk_errors: None,
            },
            ChunkOutcome::Failure { error } => TranscriptResult {
                success: false,
                text: String::new(),
                language: UNKNOWN_LANGUAGE.to_string(),
                segments: Vec::new(),
                total_chunks: 1,
                successful_chunks: 0,
                failed_chunks: 1,
                total_duration: None,
                chunk_errors: Some(vec![ChunkError {
                    index: result.index,
                    error,
                }]),
            },
        }
    }
}
