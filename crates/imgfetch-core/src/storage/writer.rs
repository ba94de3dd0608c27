//! Writes image bodies into the destination directory.

use anyhow::{Context, Result};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Destination directory for fetched images.
#[derive(Debug, Clone)]
pub struct ImageStore {
    dir: PathBuf,
}

impl ImageStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Create the destination directory (and parents) if missing.
    pub fn ensure_dir(&self) -> Result<()> {
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("failed to create {}", self.dir.display()))
    }

    /// Where `filename` would be written. The name is joined as given.
    pub fn path_for(&self, filename: &str) -> PathBuf {
        self.dir.join(filename)
    }

    /// Write `data` as `filename`, overwriting any existing file. Returns the final path.
    pub fn write_file(&self, filename: &str, data: &[u8]) -> Result<PathBuf> {
        let final_path = self.path_for(filename);

        let mut tmp = tempfile::NamedTempFile::new_in(&self.dir)
            .with_context(|| format!("failed to create temp file in {}", self.dir.display()))?;
        tmp.write_all(data)
            .with_context(|| format!("failed to write {}", tmp.path().display()))?;
        tmp.as_file().sync_all().context("storage sync failed")?;

        tmp.persist(&final_path)
            .with_context(|| format!("failed to save {}", final_path.display()))?;
        tracing::debug!(path = %final_path.display(), bytes = data.len(), "image written");
        Ok(final_path)
    }
}
