//! Drawtext filter-graph building for caption overlays.
//!
//! Each subtitle block becomes one drawtext instruction gated to its time
//! window; the multi-cut path burns a single caption for the whole cut
//! with no gating and no font-file dependency.

use shorts_models::SubtitleBlock;

/// Caption font size for timed subtitle overlays.
pub const SUBTITLE_FONT_SIZE: u32 = 32;
/// Caption color.
pub const SUBTITLE_FONT_COLOR: &str = "white";
/// Vertical offset: captions sit 100 px above the bottom edge.
pub const SUBTITLE_Y_EXPR: &str = "h-100";
/// Horizontal centering expression.
pub const SUBTITLE_X_EXPR: &str = "(w-text_w)/2";

/// Escape text for embedding in a drawtext `text='...'` value.
///
/// `:` separates drawtext options and `'` closes the quoted value, so both
/// must be escaped. No other substitution is applied.
pub fn escape_drawtext(text: &str) -> String {
    text.replace(':', "\\:").replace('\'', "\\'")
}

/// Build one time-gated drawtext instruction for a subtitle block.
///
/// The caption is centered horizontally, fixed near the bottom, and only
/// visible during `[start, end]`. An empty caption still emits an
/// instruction; it simply renders as blank.
pub fn timed_drawtext(block: &SubtitleBlock, font_file: &str) -> String {
    format!(
        "drawtext=fontfile={font}:text='{text}':fontsize={size}:fontcolor={color}:\
         x={x}:y={y}:enable='between(t,{start},{end})'",
        font = font_file,
        text = escape_drawtext(&block.text),
        size = SUBTITLE_FONT_SIZE,
        color = SUBTITLE_FONT_COLOR,
        x = SUBTITLE_X_EXPR,
        y = SUBTITLE_Y_EXPR,
        start = block.start,
        end = block.end,
    )
}

/// Build an ungated drawtext instruction for a whole-cut caption.
///
/// Uses the system default font: per-cut captions do not take a caller
/// supplied font file.
pub fn caption_drawtext(caption: &str) -> String {
    format!(
        "drawtext=text='{text}':fontcolor={color}:x={x}:y={y}",
        text = escape_drawtext(caption),
        color = SUBTITLE_FONT_COLOR,
        x = SUBTITLE_X_EXPR,
        y = SUBTITLE_Y_EXPR,
    )
}

/// Combine per-block instructions into a single filter chain, in block
/// order.
pub fn subtitle_filter_chain(blocks: &[SubtitleBlock], font_file: &str) -> String {
    blocks
        .iter()
        .map(|block| timed_drawtext(block, font_file))
        .collect::<Vec<_>>()
        .join(",")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_colon_and_quote() {
        assert_eq!(escape_drawtext("It's: ready"), "It\\'s\\: ready");
    }

    #[test]
    fn test_escape_plain_text_untouched() {
        assert_eq!(escape_drawtext("Hello there."), "Hello there.");
    }

    #[test]
    fn test_timed_drawtext_shape() {
        let block = SubtitleBlock::new("How are you?", 2.0, 4.0);
        let filter = timed_drawtext(&block, "font.ttf");

        assert!(filter.starts_with("drawtext=fontfile=font.ttf:"));
        assert!(filter.contains("text='How are you?'"));
        assert!(filter.contains("fontsize=32"));
        assert!(filter.contains("fontcolor=white"));
        assert!(filter.contains("x=(w-text_w)/2"));
        assert!(filter.contains("y=h-100"));
        assert!(filter.contains("enable='between(t,2,4)'"));
    }

    #[test]
    fn test_caption_drawtext_has_no_gating_or_font_file() {
        let filter = caption_drawtext("First scene");
        assert!(filter.contains("text='First scene'"));
        assert!(!filter.contains("enable"));
        assert!(!filter.contains("fontfile"));
    }

    #[test]
    fn test_empty_text_still_emits_instruction() {
        let filter = caption_drawtext("");
        assert!(filter.contains("text=''"));
    }

    #[test]
    fn test_chain_preserves_block_order() {
        let blocks = vec![
            SubtitleBlock::new("First one", 0.0, 2.0),
            SubtitleBlock::new("Second one", 2.0, 4.0),
        ];
        let chain = subtitle_filter_chain(&blocks, "font.ttf");

        let first = chain.find("First one").unwrap();
        let second = chain.find("Second one").unwrap();
        assert!(first < second);
        assert_eq!(chain.matches("drawtext=").count(), 2);
        assert!(chain.contains("','") || chain.contains(",drawtext="));
    }
}
