//! Command-line definitions.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use shorts_models::Resolution;

#[derive(Parser)]
#[command(name = "shorts", version, about = "Compose narrated shorts with burned-in captions")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Split narration into timed subtitle blocks and write SRT
    Segment(SegmentArgs),
    /// Render a subtitled single-image video
    Render(RenderArgs),
    /// Render a multi-cut video from a manifest
    Cuts(CutsArgs),
    /// Write the project-state JSON for a render
    Project(ProjectArgs),
}

#[derive(Args)]
pub struct SegmentArgs {
    /// Narration text, or a path to a file containing it
    #[arg(long)]
    pub narration: String,

    /// Total narration duration in seconds
    #[arg(long, conflicts_with = "audio")]
    pub duration: Option<f64>,

    /// Audio file to measure the duration from
    #[arg(long)]
    pub audio: Option<PathBuf>,

    /// Where to write the SRT (stdout when omitted)
    #[arg(long)]
    pub output: Option<PathBuf>,
}

#[derive(Args)]
pub struct RenderArgs {
    /// Still image shown for the whole video
    #[arg(long)]
    pub image: PathBuf,

    /// Narration audio track
    #[arg(long)]
    pub audio: PathBuf,

    /// Font file for subtitle overlays (SHORTS_FONT when omitted)
    #[arg(long)]
    pub font: Option<PathBuf>,

    /// Narration text, or a path to a file containing it
    #[arg(long, conflicts_with = "srt")]
    pub narration: Option<String>,

    /// Pre-timed subtitles in SRT form
    #[arg(long)]
    pub srt: Option<PathBuf>,

    /// Output video path
    #[arg(long)]
    pub output: PathBuf,

    /// Output resolution (720p or 1080p)
    #[arg(long)]
    pub resolution: Option<Resolution>,
}

#[derive(Args)]
pub struct CutsArgs {
    /// JSON manifest: a list of {image, audio, caption}
    #[arg(long)]
    pub manifest: PathBuf,

    /// Output video path
    #[arg(long)]
    pub output: PathBuf,
}

#[derive(Args)]
pub struct ProjectArgs {
    /// JSON manifest: a list of {image, audio, caption}
    #[arg(long)]
    pub manifest: PathBuf,

    /// Narration text, or a path to a file containing it
    #[arg(long)]
    pub narration: String,

    /// Audio file the subtitle timeline is measured against
    #[arg(long)]
    pub audio: PathBuf,

    /// Output JSON path
    #[arg(long)]
    pub output: PathBuf,

    /// Output resolution (720p or 1080p)
    #[arg(long)]
    pub resolution: Option<Resolution>,

    /// Leave subtitles out of the exported style
    #[arg(long)]
    pub no_subtitles: bool,

    /// Mark the export watermark-free
    #[arg(long)]
    pub remove_watermark: bool,
}
