//! Run-scoped storage for encoded chunk artifacts.
//!
//! Each pipeline run owns one store. Artifacts are exclusively owned by the
//! run that created them; dropping the store deletes the directory and
//! everything in it, on every exit path including panics mid-batch.

use crate::error::{Result, VerbatimError};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Ephemeral directory holding one run's chunk artifacts.
pub struct ArtifactStore {
    dir: TempDir,
}

impl ArtifactStore {
    /// Create a fresh store under the system temp directory.
    pub fn new() -> Result<Self> {
        let dir = tempfile::Builder::new()
            .prefix("verbatim-")
            .tempdir()
            .map_err(|e| VerbatimError::Other(format!("Failed to create artifact store: {}", e)))?;
        Ok(Self { dir })
    }

    /// Root directory of the store.
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Path for the chunk with the given ordinal index.
    pub fn chunk_path(&self, index: usize) -> PathBuf {
        self.dir.path().join(format!("chunk_{:03}.wav", index))
    }
}
