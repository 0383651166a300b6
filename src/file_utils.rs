use anyhow::{Context, Result};
use log::{info, warn};
use std::fs;
use std::path::{Path, PathBuf};

use crate::document::ExportArtifact;

// @module: File and directory utilities

// @struct: File operations utility
pub struct FileManager;

impl FileManager {
    // @checks: File existence
    pub fn file_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().is_file()
    }

    // @creates: Directory and parents if needed
    pub fn ensure_dir<P: AsRef<Path>>(path: P) -> Result<()> {
        let path = path.as_ref();
        if !path.exists() {
            fs::create_dir_all(path)
                .with_context(|| format!("Failed to create directory: {:?}", path))?;
        }
        Ok(())
    }

    /// Write bytes to a file, creating the parent directory
    pub fn write_bytes<P: AsRef<Path>>(path: P, content: &[u8]) -> Result<()> {
        if let Some(parent) = path.as_ref().parent() {
            Self::ensure_dir(parent)?;
        }

        fs::write(&path, content)
            .with_context(|| format!("Failed to write to file: {:?}", path.as_ref()))
    }

    // @generates: Output path for an export
    pub fn output_path<P: AsRef<Path>>(output_dir: P, file_name: &str) -> PathBuf {
        output_dir.as_ref().join(file_name)
    }

    /// Write an export into `output_dir`
    ///
    /// Returns `None` when the target exists and `force_overwrite` is off.
    pub fn save_artifact<P: AsRef<Path>>(
        output_dir: P,
        artifact: &ExportArtifact,
        force_overwrite: bool,
    ) -> Result<Option<PathBuf>> {
        let path = Self::output_path(output_dir, artifact.file_name);

        if Self::file_exists(&path) && !force_overwrite {
            warn!("Output file already exists: {:?}. Use -f to force overwrite.", path);
            return Ok(None);
        }

        Self::write_bytes(&path, &artifact.bytes)?;
        info!("Wrote {} ({})", path.display(), artifact.mime_type);
        Ok(Some(path))
    }
}

