//! FFmpeg CLI wrapper for shorts composition.
//!
//! This crate provides:
//! - Type-safe FFmpeg command building with progress parsing
//! - Duration-proportional narration segmentation
//! - Drawtext filter-graph building for timed caption overlays
//! - Single-image and multi-cut video composition
//! - SRT subtitle export and parsing
//!
//! Composition is a sequential pipeline: segmentation, filter-graph
//! construction, encode, and (for multi-cut renders) a per-cut encode loop
//! followed by lossless concatenation. The underlying encoder handle is
//! single-tenant; `Renderer` serializes encodes for callers that share one.

pub mod command;
pub mod compose;
pub mod cuts;
pub mod error;
pub mod filters;
pub mod fs_utils;
pub mod probe;
pub mod progress;
pub mod render;
pub mod segmenter;
pub mod srt;

pub use command::{check_ffmpeg, check_ffprobe, FfmpegCommand, FfmpegRunner};
pub use compose::{render_subtitled, SubtitledRenderRequest};
pub use cuts::{render_cuts, CutsRenderRequest, CUT_DURATION_SECS};
pub use error::{MediaError, MediaResult};
pub use probe::{audio_duration, probe_media, MediaInfo};
pub use progress::{FfmpegProgress, ProgressCallback};
pub use render::{RenderedVideo, Renderer};
pub use segmenter::split_narration;
pub use srt::{parse_srt, to_srt};
