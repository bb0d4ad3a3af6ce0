//! Chunk transcription pipeline.
//!
//! Chunks flow through one lane: runner calls the backend strictly one
//! chunk at a time, the reassembler merges per-chunk results in index
//! order, and [`TranscriptionService`] is the single entry point that
//! picks the single-chunk fast path or the full runner + reassembler
//! route.

pub mod progress;
pub mod reassembler;
pub mod runner;
pub mod service;
pub mod types;

pub use progress::{CollectingObserver, ProgressObserver};
pub use reassembler::reassemble;
pub use runner::TranscriptionRunner;
pub use service::TranscriptionService;
pub use types::{Chunk, ChunkError, ChunkOutcome, ChunkResult, ChunkTranscription, TranscriptResult};
