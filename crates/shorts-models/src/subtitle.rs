//! Timed subtitle blocks.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One timed subtitle block: trimmed text visible over `[start, end)`.
///
/// Produced by the narration segmenter, consumed by the drawtext filter
/// builder and the SRT exporter. Blocks are never mutated after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct SubtitleBlock {
    /// Subtitle text (non-empty, trimmed)
    pub text: String,
    /// Start time in seconds
    pub start: f64,
    /// End time in seconds (must be greater than start)
    pub end: f64,
}

impl SubtitleBlock {
    /// Create a block, trimming the text.
    pub fn new(text: impl Into<String>, start: f64, end: f64) -> Self {
        Self {
            text: text.into().trim().to_string(),
            start,
            end,
        }
    }

    /// Start time in whole milliseconds.
    pub fn start_ms(&self) -> i64 {
        (self.start * 1000.0).round() as i64
    }

    /// End time in whole milliseconds.
    pub fn end_ms(&self) -> i64 {
        (self.end * 1000.0).round() as i64
    }

    /// Visible duration in seconds.
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }
}

/// Validation errors for a block list.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SubtitleListError {
    #[error("Subtitle list is empty")]
    Empty,
    #[error("Block {index} has empty text")]
    EmptyText { index: usize },
    #[error("Block {index} has invalid window [{start}, {end}]")]
    InvalidWindow { index: usize, start: f64, end: f64 },
    #[error("Block {index} starts before block {}", index - 1)]
    OutOfOrder { index: usize },
}

/// Validate an ordered block list: non-empty, every window well-formed,
/// starts monotonically non-decreasing.
pub fn validate_blocks(blocks: &[SubtitleBlock]) -> Result<(), SubtitleListError> {
    if blocks.is_empty() {
        return Err(SubtitleListError::Empty);
    }

    let mut prev_start = 0.0_f64;
    for (index, block) in blocks.iter().enumerate() {
        if block.text.trim().is_empty() {
            return Err(SubtitleListError::EmptyText { index });
        }
        if block.start < 0.0 || block.end <= block.start {
            return Err(SubtitleListError::InvalidWindow {
                index,
                start: block.start,
                end: block.end,
            });
        }
        if index > 0 && block.start < prev_start {
            return Err(SubtitleListError::OutOfOrder { index });
        }
        prev_start = block.start;
    }

    Ok(())
}
