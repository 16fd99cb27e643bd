//! Render style and output resolution.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Output resolution for the final render.
///
/// Serialized exactly as the project-state format expects: `"720p"` or
/// `"1080p"`. Dimensions are vertical (9:16) short-form frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, JsonSchema)]
pub enum Resolution {
    #[serde(rename = "720p")]
    Hd720,
    #[default]
    #[serde(rename = "1080p")]
    Hd1080,
}

impl Resolution {
    /// Frame dimensions as (width, height).
    pub fn dimensions(&self) -> (u32, u32) {
        match self {
            Resolution::Hd720 => (720, 1280),
            Resolution::Hd1080 => (1080, 1920),
        }
    }

    /// FFmpeg `-s` size argument, e.g. "1080x1920".
    pub fn as_size_arg(&self) -> String {
        let (w, h) = self.dimensions();
        format!("{}x{}", w, h)
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Resolution::Hd720 => write!(f, "720p"),
            Resolution::Hd1080 => write!(f, "1080p"),
        }
    }
}

impl FromStr for Resolution {
    type Err = ResolutionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "720p" => Ok(Resolution::Hd720),
            "1080p" => Ok(Resolution::Hd1080),
            _ => Err(ResolutionParseError(s.to_string())),
        }
    }
}

#[derive(Debug, Error)]
#[error("Unknown resolution: {0} (expected 720p or 1080p)")]
pub struct ResolutionParseError(String);

/// Style options for a render, as persisted in the project state.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct RenderStyle {
    pub resolution: Resolution,
    pub include_subtitles: bool,
    pub remove_watermark: bool,
}

impl Default for RenderStyle {
    fn default() -> Self {
        Self {
            resolution: Resolution::Hd1080,
            include_subtitles: true,
            remove_watermark: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolution_serde_names() {
        assert_eq!(serde_json::to_string(&Resolution::Hd720).unwrap(), "\"720p\"");
        assert_eq!(serde_json::to_string(&Resolution::Hd1080).unwrap(), "\"1080p\"");
        let parsed: Resolution = serde_json::from_str("\"720p\"").unwrap();
        assert_eq!(parsed, Resolution::Hd720);
    }

    #[test]
    fn test_resolution_from_str() {
        assert_eq!("1080P".parse::<Resolution>().unwrap(), Resolution::Hd1080);
        assert!("4k".parse::<Resolution>().is_err());
    }

    #[test]
    fn test_dimensions_vertical() {
        assert_eq!(Resolution::Hd720.dimensions(), (720, 1280));
        assert_eq!(Resolution::Hd1080.as_size_arg(), "1080x1920");
    }

    #[test]
    fn test_style_default() {
        let style = RenderStyle::default();
        assert!(style.include_subtitles);
        assert!(!style.remove_watermark);
        let json = serde_json::to_value(&style).unwrap();
        assert_eq!(json["resolution"], "1080p");
        assert_eq!(json["includeSubtitles"], true);
    }
}
