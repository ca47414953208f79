//! Atomic file write operations using a temp-and-rename strategy.
//!
//! Component files and the persisted configuration are written through this
//! module so that an interrupted write never leaves a half-written file at the
//! destination.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Create a directory and all of its parents if it does not exist.
pub fn ensure_dir(path: &Path) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)
            .with_context(|| format!("Failed to create directory: {}", path.display()))?;
    }
    Ok(())
}

/// Ensure the parent directory of `path` exists.
pub fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }
    Ok(())
}

/// Safely write a string to a file using atomic operations.
///
/// Convenience wrapper around [`atomic_write`] for text content.
pub fn safe_write(path: &Path, content: &str) -> Result<()> {
    atomic_write(path, content.as_bytes())
}

/// Atomically write bytes to a file using write-then-rename.
///
/// The content is first written to a sibling `<name>.tmp` file, synced to
/// disk, and then renamed over the target path. Readers either see the old
/// content or the new content, never a partial write. Parent directories are
/// created as needed.
pub fn atomic_write(path: &Path, content: &[u8]) -> Result<()> {
    use std::io::Write;

    ensure_parent_dir(path)?;

    let mut temp_name = path.as_os_str().to_owned();
    temp_name.push(".tmp");
    let temp_path = PathBuf::from(temp_name);

    {
        let mut file = fs::File::create(&temp_path)
            .with_context(|| format!("Failed to create temp file: {}", temp_path.display()))?;

        file.write_all(content)
            .with_context(|| format!("Failed to write to temp file: {}", temp_path.display()))?;

        file.sync_all().context("Failed to sync file to disk")?;
    }

    fs::rename(&temp_path, path)
        .with_context(|| format!("Failed to rename temp file to: {}", path.display()))?;

    Ok(())
}
