//! Chunk artifact encoding.
//!
//! Materializes each partition span as a 16kHz mono 16-bit PCM WAV file in
//! the run's artifact store. Encoding is deterministic: the same slice
//! always produces the same bytes. A chunk that fails to encode does not
//! abort its siblings.

use crate::artifacts::ArtifactStore;
use crate::audio::buffer::AudioBuffer;
use crate::audio::partitioner::ChunkSpan;
use crate::defaults::{UPLOAD_CHANNELS, UPLOAD_SAMPLE_RATE};
use crate::error::{Result, VerbatimError};
use crate::pipeline::types::Chunk;

/// A chunk that could not be materialized, reported alongside the chunks
/// that could.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChunkWriteFailure {
    pub index: usize,
    pub error: String,
}

/// Writes partition spans into the run's artifact store.
pub struct ChunkWriter<'a> {
    store: &'a ArtifactStore,
}

impl<'a> ChunkWriter<'a> {
    pub fn new(store: &'a ArtifactStore) -> Self {
        Self { store }
    }

    /// Encode a single span as a WAV artifact.
    pub fn write_chunk(&self, audio: &AudioBuffer, span: ChunkSpan, index: usize) -> Result<Chunk> {
        let encode_err = |message: String| VerbatimError::ChunkEncoding { index, message };

        let slice = audio.slice_ms(span.start_ms, span.end_ms);
        let mono = downmix(slice, audio.channels());
        let samples = resample(&mono, audio.sample_rate(), UPLOAD_SAMPLE_RATE);

        let path = self.store.chunk_path(index);
        let spec = hound::WavSpec {
            channels: UPLOAD_CHANNELS,
            sample_rate: UPLOAD_SAMPLE_RATE,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };

        let mut writer = hound::WavWriter::create(&path, spec)
            .map_err(|e| encode_err(format!("Failed to create artifact: {}", e)))?;
        for &sample in &samples {
            writer
                .write_sample(sample)
                .map_err(|e| encode_err(format!("Failed to write sample: {}", e)))?;
        }
        writer
            .finalize()
            .map_err(|e| encode_err(format!("Failed to finalize artifact: {}", e)))?;

        let size_bytes = std::fs::metadata(&path)
            .map_err(|e| encode_err(format!("Failed to stat artifact: {}", e)))?
            .len();

        Ok(Chunk {
            index,
            start_ms: span.start_ms,
            end_ms: span.end_ms,
            path,
            size_bytes,
        })
    }

    /// Encode every span, isolating per-chunk failures.
    ///
    /// Chunk indices follow span emission order. A span that fails to encode
    /// is reported in the failure list and its siblings proceed.
    pub fn write_chunks(
        &self,
        audio: &AudioBuffer,
        spans: &[ChunkSpan],
    ) -> (Vec<Chunk>, Vec<ChunkWriteFailure>) {
        let mut chunks = Vec::with_capacity(spans.len());
        let mut failures = Vec::new();

        for (index, &span) in spans.iter().enumerate() {
            match self.write_chunk(audio, span, index) {
                Ok(chunk) => chunks.push(chunk),
                Err(e) => failures.push(ChunkWriteFailure {
                    index,
                    error: e.to_string(),
                }),
            }
        }

        (chunks, failures)
    }
}

/// Average interleaved channels down to mono.
fn downmix(samples: &[i16], channels: u16) -> Vec<i16> {
    if channels <= 1 {
        return samples.to_vec();
    }

    samples
        .chunks_exact(channels as usize)
        .map(|frame| {
            let sum: i32 = frame.iter().map(|&s| s as i32).sum();
            (sum / channels as i32) as i16
        })
        .collect()
}

/// Simple linear interpolation resampling.
fn resample(samples: &[i16], from_rate: u32, to_rate: u32) -> Vec<i16> {
    if from_rate == to_rate {
        return samples.to_vec();
    }

    let ratio = from_rate as f64 / to_rate as f64;
    let output_len = (samples.len() as f64 / ratio).ceil() as usize;

    (0..output_len)
        .map(|i| {
            let source_pos = i as f64 * ratio;
            let source_idx = source_pos.floor() as usize;
            let fraction = source_pos - source_idx as f64;

            if source_idx + 1 >= samples.len() {
                samples[source_idx]
            } else {
                let left = samples[source_idx] as f64;
                let right = samples[source_idx + 1] as f64;
                (left + (right - left) * fraction) as i16
            }
        })
        .collect()
}
