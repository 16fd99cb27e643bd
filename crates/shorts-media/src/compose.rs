//! Single-image video composition.
//!
//! Loops one still image for the duration of the subtitle timeline, muxes
//! the narration audio, and burns in the timed caption overlays.

use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{info, warn};
use uuid::Uuid;

use shorts_models::{EncodingConfig, SubtitleBlock};

use crate::command::{FfmpegCommand, FfmpegRunner};
use crate::error::{MediaError, MediaResult};
use crate::filters::subtitle_filter_chain;
use crate::probe::audio_duration;
use crate::progress::FfmpegProgress;
use crate::render::{RenderedVideo, MIME_MP4};

/// Inputs for a single-image render.
#[derive(Debug, Clone)]
pub struct SubtitledRenderRequest {
    /// Still image shown for the whole video
    pub image: PathBuf,
    /// Narration audio track
    pub audio: PathBuf,
    /// Font file for the subtitle overlays
    pub font: PathBuf,
    /// Timed subtitle blocks; the last block's end sets the duration
    pub blocks: Vec<SubtitleBlock>,
    /// Output file name (e.g. "shorts_subtitled.mp4")
    pub output_name: String,
}

impl SubtitledRenderRequest {
    /// Validate the request before any encode work.
    ///
    /// Each missing input fails with an error naming the field.
    pub fn validate(&self) -> MediaResult<()> {
        if !self.image.exists() {
            return Err(MediaError::MissingInput { field: "image" });
        }
        if !self.audio.exists() {
            return Err(MediaError::MissingInput { field: "audio" });
        }
        if !self.font.exists() {
            return Err(MediaError::MissingInput { field: "font" });
        }
        if self.blocks.is_empty() {
            return Err(MediaError::NoSubtitles);
        }
        Ok(())
    }

    /// Image loop duration: the last block's end.
    pub fn loop_duration(&self) -> f64 {
        self.blocks.last().map(|b| b.end).unwrap_or(0.0)
    }
}

/// Render a subtitled single-image video and return the encoded bytes.
///
/// The work directory is removed on success and failure; a removal failure
/// is logged, never escalated.
pub async fn render_subtitled<F>(
    request: &SubtitledRenderRequest,
    encoding: &EncodingConfig,
    progress_callback: F,
) -> MediaResult<RenderedVideo>
where
    F: Fn(FfmpegProgress) + Send + 'static,
{
    let work_dir = render_work_dir()?;

    let result = compose_subtitled(
        request,
        encoding,
        work_dir.path(),
        &FfmpegRunner::new(),
        progress_callback,
    )
    .await;

    let video = match result {
        Ok((output, duration)) => {
            let bytes = fs::read(&output).await?;
            Ok(RenderedVideo {
                bytes,
                mime: MIME_MP4,
                duration,
            })
        }
        Err(e) => Err(e),
    };

    if let Err(e) = work_dir.close() {
        warn!("Failed to clean up render work directory: {}", e);
    }

    video
}

/// Encode the request into `work_dir`, returning the output path and the
/// expected duration.
pub(crate) async fn compose_subtitled<F>(
    request: &SubtitledRenderRequest,
    encoding: &EncodingConfig,
    work_dir: &Path,
    runner: &FfmpegRunner,
    progress_callback: F,
) -> MediaResult<(PathBuf, f64)>
where
    F: Fn(FfmpegProgress) + Send + 'static,
{
    request.validate()?;

    let loop_duration = request.loop_duration();
    let mut duration = loop_duration;

    // Shortest-stream policy: audio shorter than the subtitle span caps
    // the output. That is a data-quality signal, not an error.
    if let Ok(audio_secs) = audio_duration(&request.audio).await {
        if audio_secs + 0.05 < loop_duration {
            warn!(
                "Audio ({:.2}s) is shorter than the subtitle span ({:.2}s); output will be truncated",
                audio_secs, loop_duration
            );
            duration = audio_secs;
        }
    }

    let filter = subtitle_filter_chain(&request.blocks, &request.font.to_string_lossy());
    let output = work_dir.join(&request.output_name);

    info!(
        "Rendering subtitled video: {} blocks, {:.2}s -> {}",
        request.blocks.len(),
        loop_duration,
        output.display()
    );

    let cmd = FfmpegCommand::new(&output)
        .looped_image(&request.image, loop_duration)
        .input(&request.audio)
        .video_filter(filter)
        .encoding(encoding)
        .shortest();

    runner.run_with_progress(&cmd, progress_callback).await?;

    Ok((output, duration))
}

/// Per-render scoped work directory.
pub(crate) fn render_work_dir() -> MediaResult<tempfile::TempDir> {
    let dir = tempfile::Builder::new()
        .prefix(&format!("shorts-render-{}-", Uuid::new_v4()))
        .tempdir()?;
    Ok(dir)
}
