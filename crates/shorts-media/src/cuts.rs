//! Multi-cut video composition.
//!
//! Each cut (image + audio + caption) is encoded as its own fixed-length
//! segment, then the segments are joined in order with a lossless stream
//! copy. All segments share one encoding configuration, which is what
//! makes the stream-copy join valid.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::fs;
use tracing::{info, warn};

use shorts_models::{Cut, EncodingConfig};

use crate::command::{FfmpegCommand, FfmpegRunner};
use crate::compose::render_work_dir;
use crate::error::{MediaError, MediaResult};
use crate::filters::caption_drawtext;
use crate::progress::FfmpegProgress;
use crate::render::{RenderedVideo, MIME_MP4};

/// Fixed duration of one cut, in seconds.
pub const CUT_DURATION_SECS: f64 = 6.0;

/// Inputs for a multi-cut render.
#[derive(Debug, Clone)]
pub struct CutsRenderRequest {
    /// Cuts in playback order
    pub cuts: Vec<Cut>,
    /// Output file name (e.g. "shorts_final.mp4")
    pub output_name: String,
}

impl CutsRenderRequest {
    /// Validate the request before any encode work.
    pub fn validate(&self) -> MediaResult<()> {
        if self.cuts.is_empty() {
            return Err(MediaError::NoCuts);
        }

        for (index, cut) in self.cuts.iter().enumerate() {
            if !cut.image.exists() {
                return Err(MediaError::CutMissingField { index, field: "image" });
            }
            if !cut.audio.exists() {
                return Err(MediaError::CutMissingField { index, field: "audio" });
            }
            if cut.caption.trim().is_empty() {
                return Err(MediaError::CutMissingField { index, field: "caption" });
            }
        }

        Ok(())
    }

    /// Total duration at the fixed per-cut length.
    pub fn total_duration(&self) -> f64 {
        self.cuts.len() as f64 * CUT_DURATION_SECS
    }
}

/// Render a multi-cut video and return the encoded bytes.
///
/// Cuts are encoded one at a time, in list order; any cut failure aborts
/// the whole render with no partial output. Intermediate segments and the
/// concat manifest live in a scoped work directory, removed on both paths.
pub async fn render_cuts<F>(
    request: &CutsRenderRequest,
    encoding: &EncodingConfig,
    progress_callback: F,
) -> MediaResult<RenderedVideo>
where
    F: Fn(FfmpegProgress) + Send + Sync + 'static,
{
    let work_dir = render_work_dir()?;

    let result = compose_cuts(
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

/// Encode every cut into `work_dir`, concatenate, and return the final
/// output path and its nominal duration.
pub(crate) async fn compose_cuts<F>(
    request: &CutsRenderRequest,
    encoding: &EncodingConfig,
    work_dir: &Path,
    runner: &FfmpegRunner,
    progress_callback: F,
) -> MediaResult<(PathBuf, f64)>
where
    F: Fn(FfmpegProgress) + Send + Sync + 'static,
{
    request.validate()?;

    let total = request.cuts.len();
    let progress_callback = Arc::new(progress_callback);
    let mut manifest = String::new();

    info!("Rendering {} cuts at {:.0}s each", total, CUT_DURATION_SECS);

    // Sequential by design: the concat step needs byte-identical codec
    // parameters across segments, and the encoder handle is single-tenant.
    for (index, cut) in request.cuts.iter().enumerate() {
        let segment_name = format!("cut_{}.mp4", index);
        let segment = work_dir.join(&segment_name);

        info!("Encoding cut {}/{}: {}", index + 1, total, cut.image.display());

        let cmd = FfmpegCommand::new(&segment)
            .input_with_args(&cut.image, ["-loop", "1"])
            .input(&cut.audio)
            .video_filter(caption_drawtext(&cut.caption))
            .encoding(encoding)
            .shortest()
            .max_duration(CUT_DURATION_SECS);

        let per_cut = Arc::clone(&progress_callback);
        runner
            .run_with_progress(&cmd, move |p| per_cut(p))
            .await?;

        manifest.push_str(&format!("file '{}'\n", segment_name));
    }

    let manifest_path = work_dir.join("concat.txt");
    fs::write(&manifest_path, &manifest).await?;

    let output = work_dir.join(&request.output_name);
    let concat_cmd = FfmpegCommand::new(&output)
        .concat_manifest(&manifest_path)
        .codec_copy();

    runner.run(&concat_cmd).await?;

    Ok((output, request.total_duration()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn touch(dir: &Path, name: &str) -> PathBuf {
        let path = dir.join(name);
        let mut f = std::fs::File::create(&path).unwrap();
        f.write_all(b"fixture").unwrap();
        path
    }

    fn valid_cuts(dir: &Path, n: usize) -> Vec<Cut> {
        (0..n)
            .map(|i| {
                Cut::new(
                    touch(dir, &format!("img{}.jpg", i)),
                    touch(dir, &format!("audio{}.mp3", i)),
                    format!("Scene {}", i + 1),
                )
            })
            .collect()
    }

    #[test]
    fn test_validate_ok() {
        let dir = tempfile::tempdir().unwrap();
        let request = CutsRenderRequest {
            cuts: valid_cuts(dir.path(), 2),
            output_name: "final.mp4".to_string(),
        };
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_empty_cut_list_rejected() {
        let request = CutsRenderRequest {
            cuts: vec![],
            output_name: "final.mp4".to_string(),
        };
        assert!(matches!(request.validate(), Err(MediaError::NoCuts)));
    }

    #[test]
    fn test_cut_missing_members_named() {
        let dir = tempfile::tempdir().unwrap();

        let mut cuts = valid_cuts(dir.path(), 2);
        cuts[1].image = dir.path().join("gone.jpg");
        let request = CutsRenderRequest { cuts, output_name: "f.mp4".into() };
        assert!(matches!(
            request.validate(),
            Err(MediaError::CutMissingField { index: 1, field: "image" })
        ));

        let mut cuts = valid_cuts(dir.path(), 2);
        cuts[0].caption = "  ".to_string();
        let request = CutsRenderRequest { cuts, output_name: "f.mp4".into() };
        assert!(matches!(
            request.validate(),
            Err(MediaError::CutMissingField { index: 0, field: "caption" })
        ));
    }

    #[test]
    fn test_total_duration() {
        let dir = tempfile::tempdir().unwrap();
        let request = CutsRenderRequest {
            cuts: valid_cuts(dir.path(), 2),
            output_name: "final.mp4".to_string(),
        };
        assert!((request.total_duration() - 12.0).abs() < f64::EPSILON);
    }

    #[tokio::test]
    async fn test_render_rejects_bad_list_before_encode() {
        let result = render_cuts(
            &CutsRenderRequest { cuts: vec![], output_name: "f.mp4".into() },
            &EncodingConfig::default(),
            |_| {},
        )
        .await;
        assert!(matches!(result, Err(MediaError::NoCuts)));
    }
}
