//! Writing downloaded payloads to disk

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Save `bytes` as `dir/filename`, creating `dir` if needed. An existing file
/// with the same name is replaced.
pub fn save_download(dir: &Path, filename: &str, bytes: &[u8]) -> Result<PathBuf> {
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create download directory {}", dir.display()))?;

    let path = dir.join(filename);
    fs::write(&path, bytes).with_context(|| format!("Failed to write {}", path.display()))?;

    tracing::info!(path = %path.display(), bytes = bytes.len(), "download saved");
    Ok(path)
}
