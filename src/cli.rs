//! Command-line interface for verbatim
//!
//! Provides argument parsing using clap derive macros.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Long-form audio transcription via the Whisper API
#[derive(Parser, Debug)]
#[command(
    name = "verbatim",
    version,
    about = "Long-form audio transcription via the Whisper API"
)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Audio files to transcribe (16-bit PCM WAV)
    #[arg(value_name = "FILE")]
    pub files: Vec<PathBuf>,

    /// Path to configuration file
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Suppress progress and summary output (quiet mode)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Language code for transcription (default: auto-detect). Examples: auto, en, de, es, fr
    #[arg(long, value_name = "LANG")]
    pub language: Option<String>,

    /// Context prompt to improve transcription quality
    #[arg(long, value_name = "TEXT")]
    pub prompt: Option<String>,

    /// Transcription model (default: whisper-1)
    #[arg(long, value_name = "MODEL")]
    pub model: Option<String>,

    /// Maximum chunk duration. Examples: 10m, 300s, 1h
    #[arg(long, value_name = "DURATION", value_parser = parse_chunk_duration_ms)]
    pub chunk_duration: Option<u64>,

    /// Write the transcript JSON to this file instead of stdout
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Print the transcript as plain text instead of JSON
    #[arg(long)]
    pub text: bool,
}

/// Parse a chunk duration string into milliseconds.
///
/// Supports any duration format accepted by `humantime`: bare numbers
/// (seconds), single-unit (`30s`, `5m`, `2h`), and compound (`1h30m`).
fn parse_chunk_duration_ms(s: &str) -> Result<u64, String> {
    let s = s.trim();
    // Bare number → seconds
    let ms = if let Ok(secs) = s.parse::<u64>() {
        secs * 1000
    } else {
        humantime::parse_duration(s)
            .map(|d| d.as_millis() as u64)
            .map_err(|e| e.to_string())?
    };

    if ms == 0 {
        return Err("chunk duration must be positive".to_string());
    }
    Ok(ms)
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show information about an audio file without transcribing it
    Info {
        /// Audio file to inspect (16-bit PCM WAV)
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
}
