//! Renderer handle: serialized encodes and output persistence.

use std::path::Path;
use tokio::sync::Mutex;
use tracing::{info, warn};

use shorts_models::EncodingConfig;

use crate::command::FfmpegRunner;
use crate::compose::{compose_subtitled, render_work_dir, SubtitledRenderRequest};
use crate::cuts::{compose_cuts, CutsRenderRequest};
use crate::error::MediaResult;
use crate::fs_utils::persist_output;
use crate::progress::FfmpegProgress;

/// MIME type of every render this crate produces.
pub const MIME_MP4: &str = "video/mp4";

/// An encoded video, exclusively owned by the caller.
///
/// The composer that produced it has already released its work directory;
/// nothing else references these bytes.
#[derive(Debug, Clone)]
pub struct RenderedVideo {
    /// Encoded container bytes
    pub bytes: Vec<u8>,
    /// MIME type ("video/mp4")
    pub mime: &'static str,
    /// Nominal duration in seconds
    pub duration: f64,
}

/// A render handle over one encoder instance.
///
/// The underlying encoder can only service one job at a time, so all
/// encodes through one `Renderer` are serialized by an internal mutex.
/// The handle is not safe to bypass: callers sharing an encoder must share
/// the `Renderer` rather than invoking the composers concurrently.
pub struct Renderer {
    encoding: EncodingConfig,
    timeout_secs: Option<u64>,
    gate: Mutex<()>,
}

impl Renderer {
    /// Create a renderer with the given encoding configuration.
    pub fn new(encoding: EncodingConfig) -> Self {
        Self {
            encoding,
            timeout_secs: None,
            gate: Mutex::new(()),
        }
    }

    /// Set a per-encode timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = Some(secs);
        self
    }

    /// The encoding configuration every render uses.
    pub fn encoding(&self) -> &EncodingConfig {
        &self.encoding
    }

    fn runner(&self) -> FfmpegRunner {
        match self.timeout_secs {
            Some(secs) => FfmpegRunner::new().with_timeout(secs),
            None => FfmpegRunner::new(),
        }
    }

    /// Render a subtitled single-image video to `destination`.
    ///
    /// Returns the nominal output duration in seconds.
    pub async fn render_subtitled<F>(
        &self,
        request: &SubtitledRenderRequest,
        destination: impl AsRef<Path>,
        progress_callback: F,
    ) -> MediaResult<f64>
    where
        F: Fn(FfmpegProgress) + Send + 'static,
    {
        let _guard = self.gate.lock().await;
        let work_dir = render_work_dir()?;

        let result = compose_subtitled(
            request,
            &self.encoding,
            work_dir.path(),
            &self.runner(),
            progress_callback,
        )
        .await;

        let outcome = match result {
            Ok((output, duration)) => {
                persist_output(&output, destination.as_ref()).await?;
                info!("Render complete: {}", destination.as_ref().display());
                Ok(duration)
            }
            Err(e) => Err(e),
        };

        if let Err(e) = work_dir.close() {
            warn!("Failed to clean up render work directory: {}", e);
        }

        outcome
    }

    /// Render a multi-cut video to `destination`.
    ///
    /// Returns the nominal output duration in seconds.
    pub async fn render_cuts<F>(
        &self,
        request: &CutsRenderRequest,
        destination: impl AsRef<Path>,
        progress_callback: F,
    ) -> MediaResult<f64>
    where
        F: Fn(FfmpegProgress) + Send + Sync + 'static,
    {
        let _guard = self.gate.lock().await;
        let work_dir = render_work_dir()?;

        let result = compose_cuts(
            request,
            &self.encoding,
            work_dir.path(),
            &self.runner(),
            progress_callback,
        )
        .await;

        let outcome = match result {
            Ok((output, duration)) => {
                persist_output(&output, destination.as_ref()).await?;
                info!("Render complete: {}", destination.as_ref().display());
                Ok(duration)
            }
            Err(e) => Err(e),
        };

        if let Err(e) = work_dir.close() {
            warn!("Failed to clean up render work directory: {}", e);
        }

        outcome
    }
}
