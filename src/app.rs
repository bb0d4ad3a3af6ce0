//! Composition root for the CLI: wires audio loading, chunking, the API
//! backend, and result output together.

use crate::artifacts::ArtifactStore;
use crate::audio::buffer::AudioBuffer;
use crate::audio::partitioner::partition;
use crate::audio::writer::ChunkWriter;
use crate::config::{Config, api_key};
use crate::defaults::MAX_UPLOAD_BYTES;
use crate::pipeline::progress::ProgressObserver;
use crate::pipeline::service::TranscriptionService;
use crate::pipeline::types::TranscriptResult;
use crate::stt::transcriber::TranscribeOptions;
use crate::stt::whisper_api::WhisperApiTranscriber;
use anyhow::{Context, bail};
use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Progress observer that drives an indicatif bar on stderr.
struct ProgressBarObserver {
    bar: ProgressBar,
}

impl ProgressBarObserver {
    fn new() -> Self {
        let bar = ProgressBar::new(100);
        bar.set_style(
            // SAFETY: hardcoded template string — always valid
            #[allow(clippy::expect_used)]
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{bar:40.cyan/blue}] {percent}% {msg}")
                .expect("hardcoded progress bar template")
                .progress_chars("#>-"),
        );
        Self { bar }
    }

    fn finish(&self) {
        self.bar.finish_and_clear();
    }
}

impl ProgressObserver for ProgressBarObserver {
    fn on_progress(&self, fraction: f64, message: &str) {
        self.bar.set_position((fraction * 100.0) as u64);
        self.bar.set_message(message.to_string());
    }
}

/// Options resolved from CLI flags and config for one invocation.
pub struct TranscribeArgs {
    pub files: Vec<PathBuf>,
    pub language: Option<String>,
    pub prompt: Option<String>,
    pub model: Option<String>,
    pub chunk_duration_ms: Option<u64>,
    pub output: Option<PathBuf>,
    pub text: bool,
    pub quiet: bool,
}

/// Transcribe one or more audio files, printing each transcript.
///
/// Files are processed in order; one file's failure does not stop the
/// batch. Returns an error only when every file failed.
pub async fn run_transcribe_command(config: Config, args: TranscribeArgs) -> anyhow::Result<()> {
    if args.files.is_empty() {
        bail!("no input files given");
    }
    if args.output.is_some() && args.files.len() > 1 {
        bail!("--output only supports a single input file");
    }

    let key = api_key().context("API key required for transcription")?;
    let model = args.model.as_deref().unwrap_or(&config.api.model);
    let transcriber = WhisperApiTranscriber::new(key)
        .with_base_url(&config.api.base_url)
        .with_model(model);

    let options = TranscribeOptions {
        language: Some(
            args.language
                .clone()
                .unwrap_or_else(|| config.transcription.language.clone()),
        ),
        prompt: args.prompt.clone().or_else(|| config.transcription.prompt.clone()),
    };
    let service = TranscriptionService::new(Arc::new(transcriber)).with_options(options);
    let chunk_duration_ms = args
        .chunk_duration_ms
        .unwrap_or(config.chunking.chunk_duration_ms);

    let mut failed_files = Vec::new();
    for file in &args.files {
        match transcribe_file(&service, file, chunk_duration_ms, &args).await {
            Ok(result) => {
                if !args.quiet {
                    print_summary(file, &result);
                }
            }
            Err(e) => {
                eprintln!("{} {}: {:#}", "✗".red(), file.display(), e);
                failed_files.push(file.clone());
            }
        }
    }

    if failed_files.len() == args.files.len() {
        bail!("all {} input file(s) failed", failed_files.len());
    }
    Ok(())
}

/// Run the full pipeline for one file: load → partition → encode →
/// transcribe → emit. The artifact store lives for exactly this scope, so
/// chunk files are released on every exit path.
async fn transcribe_file(
    service: &TranscriptionService,
    file: &Path,
    chunk_duration_ms: u64,
    args: &TranscribeArgs,
) -> anyhow::Result<TranscriptResult> {
    let audio = AudioBuffer::from_wav_file(file)?;
    if !args.quiet {
        let info = audio.info();
        eprintln!(
            "{} {} — {:.1} min, {} ch, {} Hz",
            "▸".dimmed(),
            file.display(),
            info.duration_minutes,
            info.channels,
            info.frame_rate
        );
    }

    let spans = partition(audio.duration_ms(), chunk_duration_ms)?;
    if spans.is_empty() {
        bail!("audio file is empty");
    }

    let store = ArtifactStore::new()?;
    let writer = ChunkWriter::new(&store);
    let (chunks, write_failures) = writer.write_chunks(&audio, &spans);
    for failure in &write_failures {
        eprintln!(
            "{} skipping chunk {}: {}",
            "⚠".yellow(),
            failure.index,
            failure.error
        );
    }
    if chunks.is_empty() {
        bail!("all {} chunk(s) failed to encode", write_failures.len());
    }
    for chunk in &chunks {
        if chunk.size_bytes > MAX_UPLOAD_BYTES {
            eprintln!(
                "{} chunk {} is {:.1} MB, over the API's 25 MB limit — the backend may reject it",
                "⚠".yellow(),
                chunk.index,
                chunk.size_bytes as f64 / (1024.0 * 1024.0)
            );
        }
    }

    let bar = (!args.quiet).then(ProgressBarObserver::new);
    let observer = bar.as_ref().map(|b| b as &dyn ProgressObserver);
    let result = service.transcribe(&chunks, observer).await;
    if let Some(bar) = &bar {
        bar.finish();
    }
    let result = result?;

    emit_result(&result, args)?;
    Ok(result)
}

/// Write the transcript to stdout or `--output` as JSON or plain text.
fn emit_result(result: &TranscriptResult, args: &TranscribeArgs) -> anyhow::Result<()> {
    let rendered = if args.text {
        result.text.clone()
    } else {
        serde_json::to_string_pretty(result)?
    };

    match &args.output {
        Some(path) => {
            std::fs::write(path, rendered + "\n")
                .with_context(|| format!("Failed to write {}", path.display()))?;
        }
        None => println!("{}", rendered),
    }
    Ok(())
}

fn print_summary(file: &Path, result: &TranscriptResult) {
    if result.success {
        let duration = result
            .total_duration
            .map(|d| format!(", {:.1}s", d))
            .unwrap_or_default();
        eprintln!(
            "{} {}: {}/{} chunks transcribed{}",
            "✓".green(),
            file.display(),
            result.successful_chunks,
            result.total_chunks,
            duration
        );
        if result.failed_chunks > 0 {
            eprintln!(
                "{} {} chunk(s) failed; transcript has gaps",
                "⚠".yellow(),
                result.failed_chunks
            );
        }
    } else {
        eprintln!(
            "{} {}: all {} chunk(s) failed",
            "✗".red(),
            file.display(),
            result.total_chunks
        );
        if let Some(errors) = &result.chunk_errors {
            for error in errors {
                eprintln!("    chunk {}: {}", error.index, error.error);
            }
        }
    }
}

/// Print metadata about an audio file without transcribing it.
pub fn run_info_command(file: &Path) -> anyhow::Result<()> {
    let audio = AudioBuffer::from_wav_file(file)?;
    let info = audio.info();

    println!("{}", serde_json::to_string_pretty(info)?);
    Ok(())
}
