//! Shared data models for the shorts composition backend.
//!
//! This crate provides Serde-serializable types for:
//! - Timed subtitle blocks
//! - Cuts (image + audio + caption scene units)
//! - Render style and output resolution
//! - Encoding configuration
//! - Project-state export

pub mod cut;
pub mod encoding;
pub mod project;
pub mod style;
pub mod subtitle;
pub mod timestamp;

// Re-export common types
pub use cut::Cut;
pub use encoding::EncodingConfig;
pub use project::{ProjectImage, ProjectState, ProjectSubtitle};
pub use style::{RenderStyle, Resolution, ResolutionParseError};
pub use subtitle::{validate_blocks, SubtitleBlock, SubtitleListError};
pub use timestamp::{format_srt_timestamp, parse_srt_timestamp, TimestampError};
