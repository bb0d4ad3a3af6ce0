//! Duration-bounded partitioning of decoded audio.
//!
//! Spans are emitted in strictly increasing, non-overlapping, contiguous
//! time order and together cover `[0, duration)` exactly.

use crate::error::{Result, VerbatimError};

/// A contiguous time slice `[start_ms, end_ms)` of an audio buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkSpan {
    pub start_ms: u64,
    pub end_ms: u64,
}

impl ChunkSpan {
    pub fn duration_ms(&self) -> u64 {
        self.end_ms - self.start_ms
    }
}

/// Split a total duration into spans no longer than `max_chunk_ms`.
///
/// A zero-length input yields no spans. `max_chunk_ms` must be positive;
/// this is validated before any I/O happens downstream.
pub fn partition(total_ms: u64, max_chunk_ms: u64) -> Result<Vec<ChunkSpan>> {
    if max_chunk_ms == 0 {
        return Err(VerbatimError::InvalidInput {
            message: "chunk duration must be positive".to_string(),
        });
    }

    let mut spans = Vec::new();
    let mut start_ms = 0;
    while start_ms < total_ms {
        let end_ms = (start_ms + max_chunk_ms).min(total_ms);
        spans.push(ChunkSpan { start_ms, end_ms });
        start_ms = end_ms;
    }

    Ok(spans)
}
