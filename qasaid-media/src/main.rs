//! qasaid-media - builds `media.json` for a folder of poem media files
//!
//! Run inside (or point at) the media folder. Every entry name is
//! classified, the manifest is written atomically next to the media, and
//! a per-category summary is logged. Media files are never modified.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing::{info, warn};

use qasaid_common::config::{load_toml_config, MediaSection};
use qasaid_common::logging::init_tracing;
use qasaid_media::{
    scan_directory, write_manifest, Classification, MediaClassifier, MediaPatterns, ScanSummary,
    DEFAULT_MANIFEST_FILE,
};

/// Command-line arguments for qasaid-media
#[derive(Parser, Debug)]
#[command(name = "qasaid-media")]
#[command(about = "Build media.json from a folder of poem media files")]
#[command(version)]
struct Args {
    /// Folder to scan (defaults to the current directory)
    dir: Option<PathBuf>,

    /// TOML config file
    #[arg(long, env = "QASAID_CONFIG")]
    config: Option<PathBuf>,

    /// Manifest file name, written inside the scanned folder
    #[arg(short, long, env = "QASAID_MEDIA_OUTPUT")]
    output: Option<String>,

    /// Print the manifest to stdout instead of writing it
    #[arg(long)]
    dry_run: bool,

    /// Audio extension (default: mp3)
    #[arg(long)]
    audio_ext: Option<String>,

    /// Image extension (default: jpg)
    #[arg(long)]
    image_ext: Option<String>,

    /// Tag in <id>_AI_<tag>.<audio> (default: Faz3)
    #[arg(long)]
    ai_audio_tag: Option<String>,

    /// Tag in <id>_img_<tag>.<image> (default: Faz3)
    #[arg(long)]
    ai_image_tag: Option<String>,

    /// Marker substring of AI song variants (default: _AI_song)
    #[arg(long)]
    song_marker: Option<String>,
}

impl Args {
    fn media_overrides(&self) -> MediaSection {
        MediaSection {
            audio_extension: self.audio_ext.clone(),
            image_extension: self.image_ext.clone(),
            ai_audio_tag: self.ai_audio_tag.clone(),
            ai_image_tag: self.ai_image_tag.clone(),
            ai_song_marker: self.song_marker.clone(),
            output_file: self.output.clone(),
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    let toml_config = load_toml_config(args.config.as_deref())?;
    init_tracing(&toml_config.logging.level)?;

    let dir = match &args.dir {
        Some(dir) => dir.clone(),
        None => std::env::current_dir().context("Failed to resolve current directory")?,
    };

    let mut patterns = MediaPatterns::from_section(&toml_config.media);
    patterns.apply(&args.media_overrides());

    let output_file = args
        .output
        .clone()
        .or(toml_config.media.output_file.clone())
        .unwrap_or_else(|| DEFAULT_MANIFEST_FILE.to_string());

    info!("Scanning folder: {}", dir.display());
    let names = scan_directory(&dir).with_context(|| format!("Failed to scan {}", dir.display()))?;
    info!("Total entries found: {}", names.len());

    let classifier = MediaClassifier::new(patterns);
    let Classification { manifest, summary } = classifier.classify(&names);

    if args.dry_run {
        print!("{}", manifest.to_json()?);
        info!("Dry run: manifest not written");
    } else {
        let path = write_manifest(&dir, &output_file, &manifest)?;
        info!("{} created at: {}", output_file, path.display());
    }

    log_summary(&summary, classifier.patterns());

    Ok(())
}

fn log_summary(summary: &ScanSummary, patterns: &MediaPatterns) {
    info!("Summary:");
    info!("  Original audio: {} files", summary.original_audio);
    info!("  AI audio: {} files", summary.ai_audio);
    info!(
        "  AI song: {} poems ({} total files)",
        summary.ai_song_poems, summary.ai_song_files
    );
    info!("  AI images: {} files", summary.ai_image);
    if summary.rejected > 0 {
        info!("  Skipped {} names without a numeric poem id", summary.rejected);
    }

    if summary.is_empty() {
        warn!("No media files found! Make sure files are named like:");
        for example in patterns.example_names() {
            warn!("  - {}", example);
        }
    }
}
