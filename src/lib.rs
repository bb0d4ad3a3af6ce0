//! verbatim - Long-form audio transcription via the Whisper API.
//!
//! Splits long recordings into API-size-bounded chunks, transcribes them
//! sequentially, and reassembles the results into one transcript with
//! globally consistent timestamps.

#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]
#![warn(clippy::let_underscore_must_use)]

#[cfg(feature = "cli")]
pub mod app;
pub mod artifacts;
pub mod audio;
#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod defaults;
pub mod error;
pub mod pipeline;
pub mod stt;

// Core types (audio in → transcript out)
pub use artifacts::ArtifactStore;
pub use audio::buffer::{AudioBuffer, AudioInfo};
pub use audio::partitioner::{ChunkSpan, partition};
pub use audio::writer::{ChunkWriteFailure, ChunkWriter};

// Pipeline
pub use pipeline::progress::{CollectingObserver, ProgressObserver};
pub use pipeline::reassembler::reassemble;
pub use pipeline::runner::TranscriptionRunner;
pub use pipeline::service::TranscriptionService;
pub use pipeline::types::{
    Chunk, ChunkError, ChunkOutcome, ChunkResult, ChunkTranscription, TranscriptResult,
};

// Backends
pub use stt::transcriber::{
    MockTranscriber, Segment, TranscribeOptions, TranscribeResponse, Transcriber,
};
pub use stt::whisper_api::WhisperApiTranscriber;

// Error handling
pub use error::{Result, VerbatimError};

// Config
pub use config::Config;
