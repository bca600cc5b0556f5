//! The `media.json` manifest

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use crate::error::MediaError;
use crate::rules::{Category, MediaMatch, PoemId};

/// Default manifest file name, written into the scanned folder
pub const DEFAULT_MANIFEST_FILE: &str = "media.json";

/// Media manifest
///
/// The id lists are strictly ascending and duplicate free. `ai_song` is
/// the key set of `ai_song_files`; each file list keeps the order in
/// which the names were listed. Field order is the JSON key order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    pub original_audio: Vec<PoemId>,
    pub ai_audio: Vec<PoemId>,
    pub ai_song: Vec<PoemId>,
    /// Serialised with stringified poem ids as keys
    pub ai_song_files: BTreeMap<PoemId, Vec<String>>,
    pub ai_image: Vec<PoemId>,
}

impl Manifest {
    /// True when all four categories are empty
    pub fn is_empty(&self) -> bool {
        self.original_audio.is_empty()
            && self.ai_audio.is_empty()
            && self.ai_song.is_empty()
            && self.ai_image.is_empty()
    }

    /// Total number of AI song files across all poems
    pub fn ai_song_file_count(&self) -> usize {
        self.ai_song_files.values().map(Vec::len).sum()
    }

    /// Pretty-printed JSON with two-space indentation and a trailing newline
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        let mut json = serde_json::to_string_pretty(self)?;
        json.push('\n');
        Ok(json)
    }
}

/// Accumulates matches in encounter order
#[derive(Debug, Default)]
pub struct ManifestBuilder {
    original_audio: Vec<PoemId>,
    ai_audio: Vec<PoemId>,
    ai_song_files: BTreeMap<PoemId, Vec<String>>,
    ai_image: Vec<PoemId>,
}

impl ManifestBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, media: &MediaMatch, file_name: &str) {
        match media.category {
            Category::OriginalAudio => self.original_audio.push(media.poem_id),
            Category::AiAudio => self.ai_audio.push(media.poem_id),
            Category::AiSong => self
                .ai_song_files
                .entry(media.poem_id)
                .or_default()
                .push(file_name.to_string()),
            Category::AiImage => self.ai_image.push(media.poem_id),
        }
    }

    /// Sort the id lists numerically and drop duplicates
    pub fn finish(self) -> Manifest {
        Manifest {
            original_audio: sorted_unique(self.original_audio),
            ai_audio: sorted_unique(self.ai_audio),
            ai_song: self.ai_song_files.keys().copied().collect(),
            ai_song_files: self.ai_song_files,
            ai_image: sorted_unique(self.ai_image),
        }
    }
}

fn sorted_unique(mut ids: Vec<PoemId>) -> Vec<PoemId> {
    ids.sort_unstable();
    ids.dedup();
    ids
}

/// Write `manifest` as `dir/file_name`, atomically
///
/// Returns the path written.
pub fn write_manifest(
    dir: &Path,
    file_name: &str,
    manifest: &Manifest,
) -> Result<PathBuf, MediaError> {
    if file_name.is_empty() || Path::new(file_name).file_name() != Some(OsStr::new(file_name)) {
        return Err(MediaError::InvalidOutputName(file_name.to_string()));
    }

    let path = dir.join(file_name);
    let json = manifest.to_json()?;

    qasaid_common::fs::atomic_write(&path, json.as_bytes()).map_err(|source| {
        MediaError::Write {
            path: path.clone(),
            source,
        }
    })?;

    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn media(category: Category, poem_id: PoemId) -> MediaMatch {
        MediaMatch {
            category,
            poem_id,
            variant: None,
        }
    }

    #[test]
    fn test_builder_sorts_numerically() {
        let mut builder = ManifestBuilder::new();
        for id in [100, 9, 20] {
            builder.add(&media(Category::OriginalAudio, id), "");
        }
        let manifest = builder.finish();
        assert_eq!(manifest.original_audio, vec![9, 20, 100]);
    }

    #[test]
    fn test_builder_keeps_song_order() {
        let mut builder = ManifestBuilder::new();
        builder.add(&media(Category::AiSong, 5), "5_AI_song (2).mp3");
        builder.add(&media(Category::AiSong, 3), "3_AI_song.mp3");
        builder.add(&media(Category::AiSong, 5), "5_AI_song.mp3");
        let manifest = builder.finish();

        assert_eq!(manifest.ai_song, vec![3, 5]);
        assert_eq!(
            manifest.ai_song_files[&5],
            vec!["5_AI_song (2).mp3".to_string(), "5_AI_song.mp3".to_string()]
        );
        assert_eq!(manifest.ai_song_file_count(), 3);
    }

    #[test]
    fn test_json_shape() {
        let mut builder = ManifestBuilder::new();
        builder.add(&media(Category::OriginalAudio, 322), "322.mp3");
        builder.add(&media(Category::AiSong, 5), "5_AI_song.mp3");
        let json = builder.finish().to_json().unwrap();

        let expected = r#"{
  "original_audio": [
    322
  ],
  "ai_audio": [],
  "ai_song": [
    5
  ],
  "ai_song_files": {
    "5": [
      "5_AI_song.mp3"
    ]
  },
  "ai_image": []
}
"#;
        assert_eq!(json, expected);
    }

    #[test]
    fn test_non_ascii_names_written_verbatim() {
        let mut builder = ManifestBuilder::new();
        builder.add(&media(Category::AiSong, 8), "8_AI_song قصيدة.mp3");
        let json = builder.finish().to_json().unwrap();
        assert!(json.contains("8_AI_song قصيدة.mp3"));
    }

    #[test]
    fn test_empty_manifest() {
        let manifest = ManifestBuilder::new().finish();
        assert!(manifest.is_empty());
        let value: serde_json::Value = serde_json::from_str(&manifest.to_json().unwrap()).unwrap();
        assert_eq!(value["ai_song_files"], serde_json::json!({}));
    }

    #[test]
    fn test_write_rejects_paths_as_names() {
        let dir = std::env::temp_dir();
        let manifest = Manifest::default();
        assert!(matches!(
            write_manifest(&dir, "../media.json", &manifest),
            Err(MediaError::InvalidOutputName(_))
        ));
        assert!(matches!(
            write_manifest(&dir, "", &manifest),
            Err(MediaError::InvalidOutputName(_))
        ));
    }
}
