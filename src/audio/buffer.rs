//! Decoded audio buffer and its derived metadata.

use crate::error::{Result, VerbatimError};
use serde::Serialize;
use std::io::Read;
use std::path::Path;

/// Decoded audio held in memory for the lifetime of a pipeline run.
///
/// Samples are interleaved 16-bit PCM at the source's native rate and
/// channel count. The buffer is immutable once loaded; the chunk writer
/// downmixes and resamples per chunk at encode time.
pub struct AudioBuffer {
    samples: Vec<i16>,
    channels: u16,
    sample_rate: u32,
    info: AudioInfo,
}

/// Read-only snapshot of an [`AudioBuffer`], computed once at load.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AudioInfo {
    pub duration_seconds: f64,
    pub duration_minutes: f64,
    pub channels: u16,
    pub sample_width: u16,
    pub frame_rate: u32,
    pub size_bytes: usize,
}

impl AudioBuffer {
    /// Build a buffer from raw interleaved samples (used by tests and
    /// non-WAV loaders).
    pub fn from_samples(samples: Vec<i16>, channels: u16, sample_rate: u32) -> Result<Self> {
        if channels == 0 {
            return Err(VerbatimError::AudioDecode {
                message: "channel count must be positive".to_string(),
            });
        }
        if sample_rate == 0 {
            return Err(VerbatimError::AudioDecode {
                message: "sample rate must be positive".to_string(),
            });
        }

        let frames = samples.len() / channels as usize;
        let duration_seconds = frames as f64 / sample_rate as f64;
        let info = AudioInfo {
            duration_seconds,
            duration_minutes: duration_seconds / 60.0,
            channels,
            sample_width: 2,
            frame_rate: sample_rate,
            size_bytes: samples.len() * 2,
        };

        Ok(Self {
            samples,
            channels,
            sample_rate,
            info,
        })
    }

    /// Load from any WAV reader.
    pub fn from_wav_reader(reader: Box<dyn Read + Send>) -> Result<Self> {
        let mut wav_reader =
            hound::WavReader::new(reader).map_err(|e| VerbatimError::AudioDecode {
                message: format!("Failed to parse WAV file: {}", e),
            })?;

        let spec = wav_reader.spec();
        if spec.sample_format != hound::SampleFormat::Int || spec.bits_per_sample != 16 {
            return Err(VerbatimError::AudioDecode {
                message: format!(
                    "unsupported sample format: {}-bit {:?} (only 16-bit PCM is supported)",
                    spec.bits_per_sample, spec.sample_format
                ),
            });
        }

        let samples: Vec<i16> = wav_reader
            .samples::<i16>()
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|e| VerbatimError::AudioDecode {
                message: format!("Failed to read WAV samples: {}", e),
            })?;

        Self::from_samples(samples, spec.channels, spec.sample_rate)
    }

    /// Load from a WAV file on disk.
    pub fn from_wav_file(path: &Path) -> Result<Self> {
        let file = std::fs::File::open(path).map_err(|e| VerbatimError::AudioDecode {
            message: format!("Failed to open {}: {}", path.display(), e),
        })?;
        Self::from_wav_reader(Box::new(std::io::BufReader::new(file)))
    }

    /// Total duration in milliseconds.
    pub fn duration_ms(&self) -> u64 {
        let frames = self.samples.len() as u64 / self.channels as u64;
        frames * 1000 / self.sample_rate as u64
    }

    /// Cached metadata snapshot.
    pub fn info(&self) -> &AudioInfo {
        &self.info
    }

    pub fn channels(&self) -> u16 {
        self.channels
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Interleaved samples for the time slice `[start_ms, end_ms)`,
    /// aligned to frame boundaries and clamped to the buffer's end.
    pub fn slice_ms(&self, start_ms: u64, end_ms: u64) -> &[i16] {
        let frame = |ms: u64| (ms * self.sample_rate as u64 / 1000) as usize * self.channels as usize;
        let start = frame(start_ms).min(self.samples.len());
        let end = frame(end_ms).min(self.samples.len());
        &self.samples[start..end.max(start)]
    }
}
