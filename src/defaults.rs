//! Default configuration constants for verbatim.
//!
//! This module provides shared constants used across different configuration
//! types to ensure consistency and eliminate duplication.

/// Default maximum chunk duration in milliseconds (10 minutes).
///
/// Chosen empirically so that an encoded chunk stays under the per-request
/// upload ceiling. Duration-based partitioning is used instead of exact
/// byte-size partitioning because the encoded size is not known until after
/// encoding — this is a deliberate approximation, not a precise bound.
pub const CHUNK_DURATION_MS: u64 = 600_000;

/// Maximum encoded chunk size accepted by the transcription API (25 MB).
pub const MAX_UPLOAD_BYTES: u64 = 25 * 1024 * 1024;

/// Sample rate chunks are resampled to before upload.
///
/// 16kHz is the standard for speech recognition and keeps the encoded
/// byte rate low without hurting transcription quality.
pub const UPLOAD_SAMPLE_RATE: u32 = 16_000;

/// Channel count chunks are downmixed to before upload.
pub const UPLOAD_CHANNELS: u16 = 1;

/// Sample width of uploaded chunks in bytes (16-bit PCM).
pub const UPLOAD_SAMPLE_WIDTH: u16 = 2;

/// Encoded byte rate of an uploaded chunk in bytes per second.
///
/// 16kHz mono 16-bit PCM is 32,000 B/s, so a 10-minute chunk is ~19.2 MB —
/// under [`MAX_UPLOAD_BYTES`] with headroom for the WAV header.
pub const fn upload_byte_rate() -> u64 {
    UPLOAD_SAMPLE_RATE as u64 * UPLOAD_CHANNELS as u64 * UPLOAD_SAMPLE_WIDTH as u64
}

/// Default transcription model.
pub const DEFAULT_MODEL: &str = "whisper-1";

/// Default base URL of the transcription API.
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Default request timeout in seconds.
///
/// A 10-minute chunk can take a while to process server-side; this bounds
/// a single chunk request, surfaced to the runner as an ordinary failure.
pub const REQUEST_TIMEOUT_SECS: u64 = 300;

/// Language value that lets the backend detect the spoken language.
pub const AUTO_LANGUAGE: &str = "auto";

/// Language reported when no chunk declared one.
pub const UNKNOWN_LANGUAGE: &str = "unknown";
