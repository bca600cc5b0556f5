//! Directory snapshot
//!
//! Lists the immediate entries of the media folder once, into memory.
//! Only names are read; file contents are never opened.

use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

/// Directory listing errors
#[derive(Debug, Error)]
pub enum ScanError {
    /// Specified path does not exist
    #[error("Path not found: {0}")]
    PathNotFound(PathBuf),

    /// Path exists but is not a directory
    #[error("Not a directory: {0}")]
    NotADirectory(PathBuf),

    /// Directory could not be read
    #[error("Failed to list {0}: {1}")]
    ListingFailed(PathBuf, String),
}

/// Names of the entries directly inside `dir`, in listing order
///
/// No recursion and no symlink following. Names that are not valid
/// UTF-8 are skipped since they cannot be written to the manifest as-is.
pub fn scan_directory(dir: &Path) -> Result<Vec<String>, ScanError> {
    if !dir.exists() {
        return Err(ScanError::PathNotFound(dir.to_path_buf()));
    }

    if !dir.is_dir() {
        return Err(ScanError::NotADirectory(dir.to_path_buf()));
    }

    let mut names = Vec::new();

    let walker = WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(false);

    for entry in walker {
        let entry = entry.map_err(|e| ScanError::ListingFailed(dir.to_path_buf(), e.to_string()))?;

        match entry.file_name().to_str() {
            Some(name) => names.push(name.to_string()),
            None => tracing::debug!(
                "Skipping entry with non UTF-8 name: {}",
                entry.path().display()
            ),
        }
    }

    tracing::debug!("Listed {} entries in {}", names.len(), dir.display());

    Ok(names)
}
