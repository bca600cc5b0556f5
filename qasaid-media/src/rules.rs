//! File name classification rules
//!
//! Each rule is a pair of pure functions over the file name: a pattern
//! test deciding whether the rule claims the name, and an id extractor.
//! Rules are evaluated in [`RULES`] order and the first rule whose pattern
//! applies claims the name. A claimed name whose poem id does not parse
//! is rejected; it never falls through to a later rule.

use crate::patterns::MediaPatterns;
use std::fmt;

/// Poem identifier
pub type PoemId = u64;

/// Media category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    /// `<id>.<audio>` - original recitation
    OriginalAudio,
    /// `<id>_AI_<tag>.<audio>` - AI narration
    AiAudio,
    /// `<id>_AI_song[...].<audio>` - AI song variant
    AiSong,
    /// `<id>_img_<tag>.<image>` - AI illustration
    AiImage,
}

impl Category {
    pub fn label(self) -> &'static str {
        match self {
            Category::OriginalAudio => "original audio",
            Category::AiAudio => "AI audio",
            Category::AiSong => "AI song",
            Category::AiImage => "AI image",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A recognised file name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaMatch {
    pub category: Category,
    pub poem_id: PoemId,
    /// Parenthesised variant index of an AI song, e.g. `(2)`.
    /// Diagnostic only; never used for ordering.
    pub variant: Option<u32>,
}

/// Result of running the rule table over one name
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleOutcome {
    Matched(MediaMatch),
    /// A rule claimed the name but no poem id could be parsed from it
    Rejected { category: Category, reason: String },
    /// No rule applies
    Unrecognized,
}

/// One declarative classification rule
pub struct Rule {
    pub category: Category,
    applies: fn(&str, &MediaPatterns) -> bool,
    poem_id: fn(&str, &MediaPatterns) -> Option<PoemId>,
}

impl Rule {
    /// `None` when the pattern does not apply, `Some(Err(reason))` when it
    /// applies but the poem id is malformed.
    pub fn apply(&self, name: &str, patterns: &MediaPatterns) -> Option<Result<MediaMatch, String>> {
        if !(self.applies)(name, patterns) {
            return None;
        }

        Some(match (self.poem_id)(name, patterns) {
            Some(poem_id) => Ok(MediaMatch {
                category: self.category,
                poem_id,
                variant: match self.category {
                    Category::AiSong => variant_index(name),
                    _ => None,
                },
            }),
            None => Err(format!("no numeric poem id in '{}'", name)),
        })
    }
}

/// Rules in priority order
pub const RULES: [Rule; 4] = [
    Rule {
        category: Category::OriginalAudio,
        applies: is_original_audio,
        poem_id: stem_poem_id,
    },
    Rule {
        category: Category::AiAudio,
        applies: is_ai_audio,
        poem_id: prefix_poem_id,
    },
    Rule {
        category: Category::AiSong,
        applies: is_ai_song,
        poem_id: prefix_poem_id,
    },
    Rule {
        category: Category::AiImage,
        applies: is_ai_image,
        poem_id: prefix_poem_id,
    },
];

/// Run the rule table over `name`
pub fn classify_name(name: &str, patterns: &MediaPatterns) -> RuleOutcome {
    for rule in RULES.iter() {
        match rule.apply(name, patterns) {
            None => continue,
            Some(Ok(media)) => return RuleOutcome::Matched(media),
            Some(Err(reason)) => {
                return RuleOutcome::Rejected {
                    category: rule.category,
                    reason,
                }
            }
        }
    }
    RuleOutcome::Unrecognized
}

fn is_original_audio(name: &str, patterns: &MediaPatterns) -> bool {
    name.ends_with(&patterns.audio_suffix()) && !name.contains('_')
}

fn is_ai_audio(name: &str, patterns: &MediaPatterns) -> bool {
    name.ends_with(&patterns.ai_audio_suffix())
}

fn is_ai_song(name: &str, patterns: &MediaPatterns) -> bool {
    name.contains(patterns.ai_song_marker.as_str()) && name.ends_with(&patterns.audio_suffix())
}

fn is_ai_image(name: &str, patterns: &MediaPatterns) -> bool {
    name.ends_with(&patterns.ai_image_suffix())
}

/// Whole name minus the audio extension
fn stem_poem_id(name: &str, patterns: &MediaPatterns) -> Option<PoemId> {
    name.strip_suffix(&patterns.audio_suffix())
        .and_then(parse_poem_id)
}

/// Text before the first underscore; `None` without an underscore
fn prefix_poem_id(name: &str, _patterns: &MediaPatterns) -> Option<PoemId> {
    name.split_once('_').and_then(|(prefix, _)| parse_poem_id(prefix))
}

/// Parse a non-negative decimal poem id, tolerating surrounding spaces
///
/// Only ASCII digits are accepted; a sign makes the id unparseable.
pub fn parse_poem_id(text: &str) -> Option<PoemId> {
    let digits = text.trim();
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

/// Integer between the first `(` and the following `)`
///
/// `"5_AI_song (2).mp3"` -> `Some(2)`
pub fn variant_index(name: &str) -> Option<u32> {
    let (_, rest) = name.split_once('(')?;
    let (inner, _) = rest.split_once(')')?;
    inner.trim().parse().ok()
}
