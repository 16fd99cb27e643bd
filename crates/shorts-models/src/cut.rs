//! Cut: one scene unit in the multi-cut render path.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// One scene in a multi-cut sequence: a still image, its narration audio,
/// and the caption burned in for the cut's whole duration.
///
/// All three members must be present for the cut to be composable; a cut
/// missing any of them is an input error, not a partial-render state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Cut {
    /// Path to the still image
    pub image: PathBuf,
    /// Path to the audio track
    pub audio: PathBuf,
    /// Caption text burned in for the cut's duration
    pub caption: String,
}

impl Cut {
    pub fn new(image: impl Into<PathBuf>, audio: impl Into<PathBuf>, caption: impl Into<String>) -> Self {
        Self {
            image: image.into(),
            audio: audio.into(),
            caption: caption.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manifest_shape() {
        let json = r#"[
            {"image": "img0.jpg", "audio": "audio0.mp3", "caption": "First scene"},
            {"image": "img1.jpg", "audio": "audio1.mp3", "caption": "Second scene"}
        ]"#;
        let cuts: Vec<Cut> = serde_json::from_str(json).unwrap();
        assert_eq!(cuts.len(), 2);
        assert_eq!(cuts[0].image, PathBuf::from("img0.jpg"));
        assert_eq!(cuts[1].caption, "Second scene");
    }
}
