//! Error types for verbatim.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum VerbatimError {
    // Configuration errors
    #[error("Configuration file not found at {path}")]
    ConfigFileNotFound { path: String },

    #[error("Invalid configuration value for {key}: {message}")]
    ConfigInvalidValue { key: String, message: String },

    #[error("Configuration error: {0}")]
    Config(#[from] toml::de::Error),

    #[error("No API key found: set VERBATIM_API_KEY or OPENAI_API_KEY")]
    MissingApiKey,

    // Input validation errors, rejected before any I/O
    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    // Audio decode errors
    #[error("Audio decode failed: {message}")]
    AudioDecode { message: String },

    // Chunk materialization errors, isolated to a single chunk
    #[error("Failed to encode chunk {index}: {message}")]
    ChunkEncoding { index: usize, message: String },

    // Transcription backend errors, recorded per chunk and never
    // propagated past the runner
    #[error("Transcription error: {message}")]
    Transcription { message: String },

    // General I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // Generic error for cases not covered above
    #[error("{0}")]
    Other(String),
}

// Type alias for convenience
pub type Result<T> = std::result::Result<T, VerbatimError>;
