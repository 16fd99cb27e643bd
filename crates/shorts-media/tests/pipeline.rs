//! Pipeline tests: narration in, timed overlays and subtitle files out.
//!
//! Tests that need a real `ffmpeg` binary are `#[ignore]`d; they build
//! their fixtures from lavfi test sources and check encoded durations.

use shorts_media::{
    parse_srt, render_cuts, render_subtitled, split_narration, to_srt, CutsRenderRequest,
    MediaError, SubtitledRenderRequest, CUT_DURATION_SECS,
};
use shorts_models::{Cut, EncodingConfig};
use std::path::{Path, PathBuf};
use std::process::Command;

#[test]
fn segmenter_to_srt_end_to_end() {
    let blocks = split_narration("Hello there. How are you? I am fine.", 6.0).unwrap();
    let srt = to_srt(&blocks);

    assert!(srt.starts_with("1\n00:00:00,000 --> 00:00:02,000\nHello there.\n"));
    assert!(srt.contains("\n2\n00:00:02,000 --> 00:00:04,000\nHow are you?\n"));
    assert!(srt.contains("\n3\n00:00:04,000 --> 00:00:06,000\nI am fine.\n"));

    let parsed = parse_srt(&srt).unwrap();
    assert_eq!(parsed, blocks);
}

#[test]
fn segmenter_covers_duration_for_many_inputs() {
    let cases = [
        ("One sentence only.", 3.7, 1),
        ("First one here. Second one here.", 5.0, 2),
        ("A bb cc dd. Ee ff gg hh! Ii jj kk ll? Mm nn oo pp.", 11.11, 4),
    ];

    for (text, duration, expected) in cases {
        let blocks = split_narration(text, duration).unwrap();
        assert_eq!(blocks.len(), expected, "block count for {:?}", text);
        assert_eq!(blocks[0].start, 0.0);
        assert!((blocks.last().unwrap().end - duration).abs() < 0.01);
        for pair in blocks.windows(2) {
            assert!(pair[0].end <= pair[1].start + 1e-9);
            assert!(pair[1].start <= pair[0].end + 1e-9);
        }
    }
}

#[test]
fn all_noise_narration_is_rejected_not_crashed() {
    let result = split_narration("a. b. c.", 5.0);
    assert!(matches!(result, Err(MediaError::NoSentences)));
}

// ---------------------------------------------------------------------------
// Real-encoder tests below. Run with: cargo test -- --ignored
// ---------------------------------------------------------------------------

fn ffmpeg_available() -> bool {
    which::which("ffmpeg").is_ok() && which::which("ffprobe").is_ok()
}

/// Generate a solid-color JPEG fixture.
fn make_image(dir: &Path, name: &str) -> PathBuf {
    let path = dir.join(name);
    let status = Command::new("ffmpeg")
        .args(["-y", "-v", "error", "-f", "lavfi", "-i", "color=c=blue:s=320x568", "-frames:v", "1"])
        .arg(&path)
        .status()
        .expect("spawn ffmpeg");
    assert!(status.success(), "image fixture generation failed");
    path
}

/// Generate a sine-tone audio fixture of the given length.
fn make_audio(dir: &Path, name: &str, seconds: f64) -> PathBuf {
    let path = dir.join(name);
    let status = Command::new("ffmpeg")
        .args([
            "-y",
            "-v",
            "error",
            "-f",
            "lavfi",
            "-i",
            &format!("sine=frequency=440:duration={}", seconds),
        ])
        .arg(&path)
        .status()
        .expect("spawn ffmpeg");
    assert!(status.success(), "audio fixture generation failed");
    path
}

fn find_font() -> Option<PathBuf> {
    const CANDIDATES: &[&str] = &[
        "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
        "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
        "/usr/share/fonts/TTF/DejaVuSans.ttf",
        "/System/Library/Fonts/Helvetica.ttc",
    ];
    CANDIDATES.iter().map(PathBuf::from).find(|p| p.exists())
}

fn encoded_duration(bytes: &[u8], dir: &Path) -> f64 {
    let path = dir.join("probe_target.mp4");
    std::fs::write(&path, bytes).unwrap();
    let output = Command::new("ffprobe")
        .args([
            "-v",
            "quiet",
            "-print_format",
            "json",
            "-show_format",
        ])
        .arg(&path)
        .output()
        .expect("spawn ffprobe");
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    json["format"]["duration"]
        .as_str()
        .and_then(|d| d.parse().ok())
        .unwrap_or(0.0)
}

#[tokio::test]
#[ignore = "requires ffmpeg, ffprobe, and a system font"]
async fn shortest_stream_policy_caps_output_to_audio() {
    assert!(ffmpeg_available());
    let dir = tempfile::tempdir().unwrap();
    let font = find_font().expect("no usable system font found");

    // Subtitle span is 6s but the audio is only 3s; the shortest-stream
    // policy must cap the encoded output near 3s.
    let request = SubtitledRenderRequest {
        image: make_image(dir.path(), "image.jpg"),
        audio: make_audio(dir.path(), "audio.mp3", 3.0),
        font,
        blocks: split_narration("Hello there. How are you? I am fine.", 6.0).unwrap(),
        output_name: "short_audio.mp4".to_string(),
    };

    let video = render_subtitled(&request, &EncodingConfig::default(), |_| {})
        .await
        .unwrap();

    assert_eq!(video.mime, "video/mp4");
    assert!(!video.bytes.is_empty());

    let duration = encoded_duration(&video.bytes, dir.path());
    assert!(
        (duration - 3.0).abs() < 0.5,
        "expected ~3s output, got {:.2}s",
        duration
    );
}

#[tokio::test]
#[ignore = "requires ffmpeg and ffprobe"]
async fn two_cuts_concatenate_to_twelve_seconds() {
    assert!(ffmpeg_available());
    let dir = tempfile::tempdir().unwrap();

    let request = CutsRenderRequest {
        cuts: vec![
            Cut::new(
                make_image(dir.path(), "img0.jpg"),
                make_audio(dir.path(), "audio0.mp3", 8.0),
                "First scene",
            ),
            Cut::new(
                make_image(dir.path(), "img1.jpg"),
                make_audio(dir.path(), "audio1.mp3", 8.0),
                "Second scene",
            ),
        ],
        output_name: "final.mp4".to_string(),
    };

    let video = render_cuts(&request, &EncodingConfig::default(), |_| {})
        .await
        .unwrap();

    assert!((video.duration - 2.0 * CUT_DURATION_SECS).abs() < f64::EPSILON);

    let duration = encoded_duration(&video.bytes, dir.path());
    assert!(
        (duration - 12.0).abs() < 1.0,
        "expected ~12s concatenated output, got {:.2}s",
        duration
    );
}
