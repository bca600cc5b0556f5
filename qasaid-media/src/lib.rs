//! qasaid-media - poem media manifest builder
//!
//! Scans a flat folder of media files, classifies every entry by its
//! name, and produces the `media.json` manifest consumed by the poem
//! pages:
//!
//! - `322.mp3` - original recitation
//! - `340_AI_Faz3.mp3` - AI narration
//! - `5_AI_song.mp3`, `5_AI_song (2).mp3` - AI song variants
//! - `224_img_Faz3.jpg` - AI illustration

pub mod classifier;
pub mod error;
pub mod manifest;
pub mod patterns;
pub mod rules;
pub mod scanner;

pub use classifier::{Classification, MediaClassifier, ScanSummary};
pub use error::MediaError;
pub use manifest::{write_manifest, Manifest, DEFAULT_MANIFEST_FILE};
pub use patterns::MediaPatterns;
pub use rules::{classify_name, Category, MediaMatch, PoemId, RuleOutcome};
pub use scanner::{scan_directory, ScanError};

use std::path::Path;

/// Snapshot `dir` and classify its entries
///
/// The listing is fully materialised before classification starts, so
/// changes to the folder during the run do not affect the result.
pub fn classify_directory(
    dir: &Path,
    classifier: &MediaClassifier,
) -> Result<Classification, MediaError> {
    let names = scan_directory(dir)?;
    Ok(classifier.classify(&names))
}
