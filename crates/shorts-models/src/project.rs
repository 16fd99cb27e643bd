//! Project-state export.
//!
//! The JSON dump a finished render ships alongside the video and SRT
//! download: the ordered image list, the subtitle windows in milliseconds,
//! and the style block.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::style::RenderStyle;
use crate::subtitle::SubtitleBlock;

/// One image entry in the project dump.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProjectImage {
    /// Image location (URL or path)
    pub url: String,
    /// How long the image is on screen, in milliseconds
    pub duration_ms: i64,
    /// Transition into the next image ("none", "fade", ...)
    pub transition: String,
}

/// One subtitle entry in the project dump, window in milliseconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProjectSubtitle {
    pub start_time_ms: i64,
    pub end_time_ms: i64,
    pub text: String,
}

impl From<&SubtitleBlock> for ProjectSubtitle {
    fn from(block: &SubtitleBlock) -> Self {
        Self {
            start_time_ms: block.start_ms(),
            end_time_ms: block.end_ms(),
            text: block.text.clone(),
        }
    }
}

/// Full project state for export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProjectState {
    pub images: Vec<ProjectImage>,
    pub subtitles: Vec<ProjectSubtitle>,
    pub style: RenderStyle,
}

impl ProjectState {
    /// Build a project state from render inputs.
    pub fn new(images: Vec<ProjectImage>, blocks: &[SubtitleBlock], style: RenderStyle) -> Self {
        Self {
            images,
            subtitles: blocks.iter().map(ProjectSubtitle::from).collect(),
            style,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::Resolution;

    #[test]
    fn test_export_shape() {
        let blocks = vec![
            SubtitleBlock::new("Hello there.", 0.0, 2.0),
            SubtitleBlock::new("How are you?", 2.0, 4.0),
        ];
        let images = vec![ProjectImage {
            url: "img0.jpg".to_string(),
            duration_ms: 6000,
            transition: "none".to_string(),
        }];
        let state = ProjectState::new(images, &blocks, RenderStyle::default());

        let json = serde_json::to_value(&state).unwrap();
        assert_eq!(json["images"][0]["durationMs"], 6000);
        assert_eq!(json["subtitles"][0]["startTimeMs"], 0);
        assert_eq!(json["subtitles"][1]["endTimeMs"], 4000);
        assert_eq!(json["style"]["resolution"], "1080p");
    }

    #[test]
    fn test_round_trip() {
        let state = ProjectState::new(
            vec![ProjectImage {
                url: "a.jpg".to_string(),
                duration_ms: 6000,
                transition: "fade".to_string(),
            }],
            &[SubtitleBlock::new("One two three.", 0.0, 6.0)],
            RenderStyle {
                resolution: Resolution::Hd720,
                include_subtitles: false,
                remove_watermark: true,
            },
        );
        let json = serde_json::to_string(&state).unwrap();
        let back: ProjectState = serde_json::from_str(&json).unwrap();
        assert_eq!(back, state);
    }
}
