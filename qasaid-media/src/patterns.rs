//! File name fragments recognised by the classifier

use qasaid_common::config::MediaSection;

/// Configurable name fragments
///
/// Defaults match the naming used in the poem media folders:
/// `322.mp3`, `340_AI_Faz3.mp3`, `332_AI_song.mp3`, `224_img_Faz3.jpg`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaPatterns {
    /// Audio extension without the leading dot
    pub audio_extension: String,
    /// Image extension without the leading dot
    pub image_extension: String,
    /// Tag in `<id>_AI_<tag>.<audio>`
    pub ai_audio_tag: String,
    /// Tag in `<id>_img_<tag>.<image>`
    pub ai_image_tag: String,
    /// Substring marking an AI song variant
    pub ai_song_marker: String,
}

impl Default for MediaPatterns {
    fn default() -> Self {
        Self {
            audio_extension: "mp3".to_string(),
            image_extension: "jpg".to_string(),
            ai_audio_tag: "Faz3".to_string(),
            ai_image_tag: "Faz3".to_string(),
            ai_song_marker: "_AI_song".to_string(),
        }
    }
}

impl MediaPatterns {
    /// Defaults overridden by a `[media]` TOML section
    pub fn from_section(section: &MediaSection) -> Self {
        let mut patterns = Self::default();
        patterns.apply(section);
        patterns
    }

    /// Override fields present in `section`
    ///
    /// Also used for command-line overrides, which are collected into a
    /// `MediaSection` and applied after the TOML layer.
    pub fn apply(&mut self, section: &MediaSection) {
        if let Some(ext) = &section.audio_extension {
            self.audio_extension = normalize_extension(ext);
        }
        if let Some(ext) = &section.image_extension {
            self.image_extension = normalize_extension(ext);
        }
        if let Some(tag) = &section.ai_audio_tag {
            self.ai_audio_tag = tag.clone();
        }
        if let Some(tag) = &section.ai_image_tag {
            self.ai_image_tag = tag.clone();
        }
        if let Some(marker) = &section.ai_song_marker {
            self.ai_song_marker = marker.clone();
        }
    }

    /// `.mp3`
    pub fn audio_suffix(&self) -> String {
        format!(".{}", self.audio_extension)
    }

    /// `_AI_Faz3.mp3`
    pub fn ai_audio_suffix(&self) -> String {
        format!("_AI_{}.{}", self.ai_audio_tag, self.audio_extension)
    }

    /// `_img_Faz3.jpg`
    pub fn ai_image_suffix(&self) -> String {
        format!("_img_{}.{}", self.ai_image_tag, self.image_extension)
    }

    /// One valid example name per category, for the "nothing found" hint
    pub fn example_names(&self) -> [String; 4] {
        [
            format!("322{}", self.audio_suffix()),
            format!("340{}", self.ai_audio_suffix()),
            format!("332{}{}", self.ai_song_marker, self.audio_suffix()),
            format!("224{}", self.ai_image_suffix()),
        ]
    }
}

fn normalize_extension(ext: &str) -> String {
    ext.trim().trim_start_matches('.').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_suffixes() {
        let patterns = MediaPatterns::default();
        assert_eq!(patterns.audio_suffix(), ".mp3");
        assert_eq!(patterns.ai_audio_suffix(), "_AI_Faz3.mp3");
        assert_eq!(patterns.ai_image_suffix(), "_img_Faz3.jpg");
    }

    #[test]
    fn test_example_names() {
        let patterns = MediaPatterns::default();
        assert_eq!(
            patterns.example_names(),
            [
                "322.mp3".to_string(),
                "340_AI_Faz3.mp3".to_string(),
                "332_AI_song.mp3".to_string(),
                "224_img_Faz3.jpg".to_string(),
            ]
        );
    }

    #[test]
    fn test_section_overrides_only_given_fields() {
        let section = MediaSection {
            audio_extension: Some(".ogg".to_string()),
            ai_audio_tag: Some("Faz4".to_string()),
            ..Default::default()
        };
        let patterns = MediaPatterns::from_section(&section);

        assert_eq!(patterns.audio_extension, "ogg");
        assert_eq!(patterns.ai_audio_suffix(), "_AI_Faz4.ogg");
        assert_eq!(patterns.image_extension, "jpg");
        assert_eq!(patterns.ai_song_marker, "_AI_song");
    }

    #[test]
    fn test_later_layer_wins() {
        let mut patterns = MediaPatterns::from_section(&MediaSection {
            image_extension: Some("png".to_string()),
            ..Default::default()
        });
        patterns.apply(&MediaSection {
            image_extension: Some("webp".to_string()),
            ..Default::default()
        });
        assert_eq!(patterns.ai_image_suffix(), "_img_Faz3.webp");
    }
}
