//! Configuration loading and environment overrides.

use crate::defaults;
use crate::error::{Result, VerbatimError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct Config {
    pub api: ApiConfig,
    pub chunking: ChunkingConfig,
    pub transcription: TranscriptionConfig,
}

/// Transcription API endpoint configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
    pub model: String,
}

/// Audio partitioning configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ChunkingConfig {
    pub chunk_duration_ms: u64,
}

/// Transcription request configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TranscriptionConfig {
    pub language: String,
    pub prompt: Option<String>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: defaults::DEFAULT_BASE_URL.to_string(),
            model: defaults::DEFAULT_MODEL.to_string(),
        }
    }
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self {
            chunk_duration_ms: defaults::CHUNK_DURATION_MS,
        }
    }
}

impl Default for TranscriptionConfig {
    fn default() -> Self {
        Self {
            language: defaults::AUTO_LANGUAGE.to_string(),
            prompt: None,
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    ///
    /// Returns an error if the file contains invalid TOML.
    /// Missing fields will use default values.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                VerbatimError::ConfigFileNotFound {
                    path: path.display().to_string(),
                }
            } else {
                VerbatimError::Io(e)
            }
        })?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a file or return defaults if the file is
    /// missing. Invalid TOML is still an error.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        match Self::load(path) {
            Ok(config) => Ok(config),
            Err(VerbatimError::ConfigFileNotFound { .. }) => Ok(Self::default()),
            Err(e) => Err(e),
        }
    }

    /// Apply environment variable overrides
    ///
    /// Supported environment variables:
    /// - VERBATIM_BASE_URL → api.base_url
    /// - VERBATIM_MODEL → api.model
    /// - VERBATIM_LANGUAGE → transcription.language
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(base_url) = std::env::var("VERBATIM_BASE_URL")
            && !base_url.is_empty()
        {
            self.api.base_url = base_url;
        }
        if let Ok(model) = std::env::var("VERBATIM_MODEL")
            && !model.is_empty()
        {
            self.api.model = model;
        }
        if let Ok(language) = std::env::var("VERBATIM_LANGUAGE")
            && !language.is_empty()
        {
            self.transcription.language = language;
        }
        self
    }

    fn validate(&self) -> Result<()> {
        if self.chunking.chunk_duration_ms == 0 {
            return Err(VerbatimError::ConfigInvalidValue {
                key: "chunking.chunk_duration_ms".to_string(),
                message: "must be positive".to_string(),
            });
        }
        Ok(())
    }
}

/// Default config file location: `~/.config/verbatim/config.toml`.
#[cfg(feature = "cli")]
pub fn default_config_path() -> std::path::PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| std::path::PathBuf::from(".config"))
        .join("verbatim")
        .join("config.toml")
}

/// Resolve the API key from the environment.
///
/// `VERBATIM_API_KEY` wins; `OPENAI_API_KEY` is accepted as a fallback
/// since the default endpoint is the OpenAI API.
pub fn api_key() -> Result<String> {
    for var in ["VERBATIM_API_KEY", "OPENAI_API_KEY"] {
        if let Ok(key) = std::env::var(var)
            && !key.is_empty()
        {
            return Ok(key);
        }
    }
    Err(VerbatimError::MissingApiKey)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_uses_crate_defaults() {
        let config = Config::default();
        assert_eq!(config.api.base_url, "https://api.openai.com/v1");
        assert_eq!(config.api.model, "whisper-1");
        assert_eq!(config.chunking.chunk_duration_ms, 600_000);
        assert_eq!(config.transcription.language, "auto");
        assert!(config.transcription.prompt.is_none());
    }

    #[test]
    fn partial_toml_fills_missing_fields_with_defaults() {
        let toml_str = r#"
            [transcription]
            language = "de"
        "#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.transcription.language, "de");
        assert_eq!(config.api.model, "whisper-1");
        assert_eq!(config.chunking.chunk_duration_ms, 600_000);
    }

    #[test]
    fn load_missing_file_is_config_file_not_found() {
        let result = Config::load(Path::new("/nonexistent/config.toml"));
        assert!(matches!(
            result,
            Err(VerbatimError::ConfigFileNotFound { .. })
        ));
    }

    #[test]
    fn load_or_default_returns_defaults_for_missing_file() {
        let config = Config::load_or_default(Path::new("/nonexistent/config.toml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn load_or_default_still_rejects_invalid_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "not = valid = toml").unwrap();

        assert!(Config::load_or_default(&path).is_err());
    }

    #[test]
    fn load_rejects_zero_chunk_duration() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[chunking]\nchunk_duration_ms = 0\n").unwrap();

        assert!(matches!(
            Config::load(&path),
            Err(VerbatimError::ConfigInvalidValue { .. })
        ));
    }

    #[test]
    fn load_round_trips_a_full_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let original = Config {
            api: ApiConfig {
                base_url: "http://localhost:9000/v1".to_string(),
                model: "whisper-large".to_string(),
            },
            chunking: ChunkingConfig {
                chunk_duration_ms: 300_000,
            },
            transcription: TranscriptionConfig {
                language: "en".to_string(),
                prompt: Some("medical terminology".to_string()),
            },
        };
        fs::write(&path, toml::to_string(&original).unwrap()).unwrap();

        assert_eq!(Config::load(&path).unwrap(), original);
    }
}
