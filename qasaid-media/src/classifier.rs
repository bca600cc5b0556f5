//! Media classifier
//!
//! Runs the rule table over a listing snapshot and aggregates the
//! matches into a [`Manifest`]. All state lives inside one `classify`
//! call, so repeated runs in the same process are independent.

use tracing::{debug, info};

use crate::manifest::{Manifest, ManifestBuilder};
use crate::patterns::MediaPatterns;
use crate::rules::{classify_name, Category, RuleOutcome};

/// Per-run counts, for the summary log
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanSummary {
    pub total_entries: usize,
    pub original_audio: usize,
    pub ai_audio: usize,
    pub ai_song_poems: usize,
    pub ai_song_files: usize,
    pub ai_image: usize,
    /// Names claimed by a rule but carrying no valid poem id
    pub rejected: usize,
    /// Names no rule applies to
    pub unrecognized: usize,
}

impl ScanSummary {
    /// True when no category has any entry
    pub fn is_empty(&self) -> bool {
        self.original_audio == 0 && self.ai_audio == 0 && self.ai_song_poems == 0 && self.ai_image == 0
    }
}

/// Manifest plus run statistics
#[derive(Debug, Clone)]
pub struct Classification {
    pub manifest: Manifest,
    pub summary: ScanSummary,
}

/// Classifies file names into media categories
#[derive(Debug, Clone, Default)]
pub struct MediaClassifier {
    patterns: MediaPatterns,
}

impl MediaClassifier {
    pub fn new(patterns: MediaPatterns) -> Self {
        Self { patterns }
    }

    pub fn patterns(&self) -> &MediaPatterns {
        &self.patterns
    }

    /// Classify a listing snapshot
    ///
    /// Never fails: malformed or unknown names are counted and skipped.
    pub fn classify<S: AsRef<str>>(&self, names: &[S]) -> Classification {
        let mut builder = ManifestBuilder::new();
        let mut rejected = 0;
        let mut unrecognized = 0;

        for name in names {
            let name = name.as_ref();
            match classify_name(name, &self.patterns) {
                RuleOutcome::Matched(media) => {
                    match (media.category, media.variant) {
                        (Category::AiSong, Some(variant)) => info!(
                            poem_id = media.poem_id,
                            "Found {}: {} (variation {})",
                            media.category,
                            name,
                            variant
                        ),
                        _ => info!(poem_id = media.poem_id, "Found {}: {}", media.category, name),
                    }
                    builder.add(&media, name);
                }
                RuleOutcome::Rejected { category, reason } => {
                    debug!(file = %name, "Ignoring {} candidate: {}", category, reason);
                    rejected += 1;
                }
                RuleOutcome::Unrecognized => {
                    debug!(file = %name, "Ignoring unrecognized name");
                    unrecognized += 1;
                }
            }
        }

        let manifest = builder.finish();
        let summary = ScanSummary {
            total_entries: names.len(),
            original_audio: manifest.original_audio.len(),
            ai_audio: manifest.ai_audio.len(),
            ai_song_poems: manifest.ai_song.len(),
            ai_song_files: manifest.ai_song_file_count(),
            ai_image: manifest.ai_image.len(),
            rejected,
            unrecognized,
        };

        Classification { manifest, summary }
    }
}
