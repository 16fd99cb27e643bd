//! Error types for media operations.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for media operations.
pub type MediaResult<T> = Result<T, MediaError>;

/// Errors that can occur during composition.
///
/// Validation errors are raised before any encode work begins. Encoder
/// errors abort the whole render; nothing is retried internally. Cleanup
/// failures are logged warnings, never surfaced through this type.
#[derive(Debug, Error)]
pub enum MediaError {
    #[error("FFmpeg not found in PATH")]
    FfmpegNotFound,

    #[error("FFprobe not found in PATH")]
    FfprobeNotFound,

    #[error("Narration text is empty")]
    EmptyNarration,

    #[error("Narration contains no usable sentences")]
    NoSentences,

    #[error("Invalid duration: {0} (must be greater than zero)")]
    InvalidDuration(f64),

    #[error("Subtitle block list is empty")]
    NoSubtitles,

    #[error("Missing input: {field}")]
    MissingInput { field: &'static str },

    #[error("Cut list is empty")]
    NoCuts,

    #[error("Cut {index} is missing {field}")]
    CutMissingField { index: usize, field: &'static str },

    #[error("Invalid subtitle file: {0}")]
    InvalidSubtitleFile(String),

    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    #[error("FFmpeg command failed: {message}")]
    FfmpegFailed {
        message: String,
        stderr: Option<String>,
        exit_code: Option<i32>,
    },

    #[error("FFprobe command failed: {message}")]
    FfprobeFailed {
        message: String,
        stderr: Option<String>,
    },

    #[error("No audio stream in {0}")]
    NoAudioStream(PathBuf),

    #[error("Operation cancelled")]
    Cancelled,

    #[error("Operation timed out after {0} seconds")]
    Timeout(u64),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),
}

impl MediaError {
    /// Create an FFmpeg failure error.
    pub fn ffmpeg_failed(
        message: impl Into<String>,
        stderr: Option<String>,
        exit_code: Option<i32>,
    ) -> Self {
        Self::FfmpegFailed {
            message: message.into(),
            stderr,
            exit_code,
        }
    }

    /// Whether this error was raised by input validation, before any
    /// encoder work started.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::EmptyNarration
                | Self::NoSentences
                | Self::InvalidDuration(_)
                | Self::NoSubtitles
                | Self::MissingInput { .. }
                | Self::NoCuts
                | Self::CutMissingField { .. }
                | Self::FileNotFound(_)
        )
    }
}
