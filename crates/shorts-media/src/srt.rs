//! SRT subtitle export and parsing.

use shorts_models::{format_srt_timestamp, parse_srt_timestamp, validate_blocks, SubtitleBlock};

use crate::error::{MediaError, MediaResult};

/// Export subtitle blocks as an SRT document.
///
/// One cue per block: 1-indexed sequence number, `HH:MM:SS,mmm -->
/// HH:MM:SS,mmm` window, text, blank line between cues.
pub fn to_srt(blocks: &[SubtitleBlock]) -> String {
    let mut out = String::new();

    for (i, block) in blocks.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        out.push_str(&format!(
            "{}\n{} --> {}\n{}\n",
            i + 1,
            format_srt_timestamp(block.start),
            format_srt_timestamp(block.end),
            block.text,
        ));
    }

    out
}

/// Parse an SRT document back into subtitle blocks.
///
/// Cue numbers are ignored beyond presence; multi-line cue text is joined
/// with single spaces.
pub fn parse_srt(content: &str) -> MediaResult<Vec<SubtitleBlock>> {
    let mut blocks = Vec::new();

    for chunk in content.split("\n\n") {
        let lines: Vec<&str> = chunk.lines().filter(|l| !l.trim().is_empty()).collect();
        if lines.is_empty() {
            continue;
        }
        if lines.len() < 3 {
            return Err(MediaError::InvalidSubtitleFile(format!(
                "incomplete cue: {:?}",
                chunk.trim()
            )));
        }

        lines[0].trim().parse::<u32>().map_err(|_| {
            MediaError::InvalidSubtitleFile(format!("invalid cue number: {}", lines[0].trim()))
        })?;

        let (start_str, end_str) = lines[1].split_once("-->").ok_or_else(|| {
            MediaError::InvalidSubtitleFile(format!("invalid cue timing: {}", lines[1]))
        })?;

        let start = parse_srt_timestamp(start_str)
            .map_err(|e| MediaError::InvalidSubtitleFile(e.to_string()))?;
        let end = parse_srt_timestamp(end_str)
            .map_err(|e| MediaError::InvalidSubtitleFile(e.to_string()))?;

        let text = lines[2..].join(" ");
        blocks.push(SubtitleBlock::new(text, start, end));
    }

    if blocks.is_empty() {
        return Err(MediaError::InvalidSubtitleFile("no cues found".to_string()));
    }
    validate_blocks(&blocks).map_err(|e| MediaError::InvalidSubtitleFile(e.to_string()))?;

    Ok(blocks)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_blocks() -> Vec<SubtitleBlock> {
        vec![
            SubtitleBlock::new("Hello there.", 0.0, 2.0),
            SubtitleBlock::new("How are you?", 2.0, 4.0),
            SubtitleBlock::new("I am fine.", 4.0, 6.0),
        ]
    }

    #[test]
    fn test_export_format() {
        let srt = to_srt(&sample_blocks());
        let expected = "1\n00:00:00,000 --> 00:00:02,000\nHello there.\n\n\
                        2\n00:00:02,000 --> 00:00:04,000\nHow are you?\n\n\
                        3\n00:00:04,000 --> 00:00:06,000\nI am fine.\n";
        assert_eq!(srt, expected);
    }

    #[test]
    fn test_round_trip_within_millisecond() {
        let blocks = vec![
            SubtitleBlock::new("First block here", 0.0, 2.437),
            SubtitleBlock::new("Second block here", 2.437, 4.874),
        ];
        let parsed = parse_srt(&to_srt(&blocks)).unwrap();

        assert_eq!(parsed.len(), blocks.len());
        for (orig, back) in blocks.iter().zip(&parsed) {
            assert_eq!(orig.text, back.text);
            assert!((orig.start - back.start).abs() < 0.001);
            assert!((orig.end - back.end).abs() < 0.001);
        }
    }

    #[test]
    fn test_parse_multi_line_cue() {
        let srt = "1\n00:00:00,000 --> 00:00:02,000\nline one\nline two\n";
        let blocks = parse_srt(srt).unwrap();
        assert_eq!(blocks[0].text, "line one line two");
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(parse_srt("").is_err());
        assert!(parse_srt("not a subtitle file").is_err());
        assert!(parse_srt("1\n00:00 -> 00:01\ntext\n").is_err());
    }

    #[test]
    fn test_parse_rejects_out_of_order_cues() {
        let srt = "1\n00:00:04,000 --> 00:00:06,000\nLater\n\n2\n00:00:00,000 --> 00:00:02,000\nEarlier\n";
        assert!(matches!(
            parse_srt(srt),
            Err(MediaError::InvalidSubtitleFile(_))
        ));
    }

    #[test]
    fn test_parse_tolerates_crlf_free_extra_blank_lines() {
        let srt = "1\n00:00:00,000 --> 00:00:02,000\nHello\n\n\n2\n00:00:02,000 --> 00:00:04,000\nWorld\n";
        let blocks = parse_srt(srt).unwrap();
        assert_eq!(blocks.len(), 2);
    }
}
