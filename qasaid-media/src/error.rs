//! Error types for qasaid-media

use std::path::PathBuf;
use thiserror::Error;

use crate::scanner::ScanError;

/// Fatal manifest build failures
///
/// Malformed file names are never errors; they are skipped during
/// classification.
#[derive(Debug, Error)]
pub enum MediaError {
    /// Directory could not be listed
    #[error(transparent)]
    Scan(#[from] ScanError),

    /// Manifest could not be serialised
    #[error("Failed to serialise manifest: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Manifest could not be written
    #[error("Failed to write manifest {path}: {source}")]
    Write {
        path: PathBuf,
        source: qasaid_common::Error,
    },

    /// Output name is not a plain file name
    #[error("Invalid manifest file name: {0}")]
    InvalidOutputName(String),
}
