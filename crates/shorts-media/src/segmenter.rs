//! Duration-proportional narration segmentation.
//!
//! Splits a narration string into sentence-level subtitle blocks that
//! cover a known audio duration with no gaps and no overlaps. Each block
//! gets an equal share of the timeline; windows are rounded to two decimal
//! places and the final block is clamped to end exactly at `duration`.

use shorts_models::SubtitleBlock;

use crate::error::{MediaError, MediaResult};

/// Minimum trimmed sentence length; shorter units are punctuation noise.
const MIN_SENTENCE_CHARS: usize = 4;

/// Split narration text into timed subtitle blocks spanning `[0, duration]`.
///
/// Sentences end at `.`, `!` or `?` followed by whitespace; the punctuation
/// stays with its sentence. Text without any sentence-final punctuation
/// becomes a single block spanning the full duration.
///
/// # Errors
/// - [`MediaError::EmptyNarration`] for empty or whitespace-only text
/// - [`MediaError::InvalidDuration`] for a non-positive duration
/// - [`MediaError::NoSentences`] when every unit is shorter than four
///   characters after trimming
pub fn split_narration(text: &str, duration: f64) -> MediaResult<Vec<SubtitleBlock>> {
    if text.trim().is_empty() {
        return Err(MediaError::EmptyNarration);
    }
    if !duration.is_finite() || duration <= 0.0 {
        return Err(MediaError::InvalidDuration(duration));
    }

    let sentences: Vec<&str> = split_sentences(text)
        .into_iter()
        .map(str::trim)
        .filter(|s| s.chars().count() >= MIN_SENTENCE_CHARS)
        .collect();

    if sentences.is_empty() {
        return Err(MediaError::NoSentences);
    }

    let n = sentences.len();
    let block_duration = duration / n as f64;

    let blocks = sentences
        .iter()
        .enumerate()
        .map(|(i, sentence)| {
            let start = round2(i as f64 * block_duration);
            let end = if i == n - 1 {
                duration
            } else {
                round2((i + 1) as f64 * block_duration)
            };
            SubtitleBlock::new(*sentence, start, end)
        })
        .collect();

    Ok(blocks)
}

/// Split text at sentence-final punctuation followed by whitespace,
/// keeping the punctuation with the preceding unit.
fn split_sentences(text: &str) -> Vec<&str> {
    let mut units = Vec::new();
    let mut unit_start = 0;
    let mut chars = text.char_indices().peekable();

    while let Some((_, c)) = chars.next() {
        if matches!(c, '.' | '!' | '?') {
            if let Some(&(next_idx, next)) = chars.peek() {
                if next.is_whitespace() {
                    units.push(&text[unit_start..next_idx]);
                    unit_start = next_idx;
                }
            }
        }
    }

    if unit_start < text.len() {
        units.push(&text[unit_start..]);
    }

    units
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
