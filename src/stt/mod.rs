//! Speech-to-text backends.

pub mod transcriber;
pub mod whisper_api;

pub use transcriber::{MockTranscriber, Segment, TranscribeOptions, TranscribeResponse, Transcriber};
pub use whisper_api::WhisperApiTranscriber;
