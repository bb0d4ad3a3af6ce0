//! Sequential chunk transcription.

use crate::pipeline::progress::ProgressObserver;
use crate::pipeline::types::{Chunk, ChunkResult};
use crate::stt::transcriber::{TranscribeOptions, Transcriber};
use std::sync::Arc;

/// Drives chunks through the transcriber strictly one at a time.
///
/// Sequential calls avoid backend-side rate-limit and connection
/// contention that a concurrent fan-out would trigger, at the cost of
/// wall-clock time linear in chunk count. One chunk's failure never
/// aborts the batch; it is recorded and the runner moves on.
pub struct TranscriptionRunner {
    transcriber: Arc<dyn Transcriber>,
    options: TranscribeOptions,
}

impl TranscriptionRunner {
    pub fn new(transcriber: Arc<dyn Transcriber>, options: TranscribeOptions) -> Self {
        Self {
            transcriber,
            options,
        }
    }

    /// Transcribe every chunk in order, stamping each result with its
    /// chunk's index.
    ///
    /// The returned list preserves chunk order. Results carry their own
    /// index because downstream merging must key on it, never on list
    /// position.
    pub async fn run(
        &self,
        chunks: &[Chunk],
        observer: Option<&dyn ProgressObserver>,
    ) -> Vec<ChunkResult> {
        let total = chunks.len();
        let mut results = Vec::with_capacity(total);

        for (position, chunk) in chunks.iter().enumerate() {
            if let Some(observer) = observer {
                observer.on_progress(
                    position as f64 / total as f64,
                    &format!("Transcribing chunk {}/{}...", position + 1, total),
                );
            }

            results.push(self.transcribe_chunk(chunk).await);

            if let Some(observer) = observer {
                observer.on_progress(
                    (position + 1) as f64 / total as f64,
                    &format!("Transcribed chunk {}/{}", position + 1, total),
                );
            }
        }

        results
    }

    /// One backend call; any failure (artifact read, network, backend)
    /// becomes a failure result for this chunk alone.
    pub(crate) async fn transcribe_chunk(&self, chunk: &Chunk) -> ChunkResult {
        let audio = match tokio::fs::read(&chunk.path).await {
            Ok(audio) => audio,
            Err(e) => {
                return ChunkResult::failure(
                    chunk.index,
                    &format!("Failed to read artifact {}: {}", chunk.path.display(), e),
                );
            }
        };

        match self.transcriber.transcribe(&audio, &self.options).await {
            Ok(response) => ChunkResult::success(chunk.index, response.into()),
            Err(e) => ChunkResult::failure(chunk.index, &e.to_string()),
        }
    }
}
