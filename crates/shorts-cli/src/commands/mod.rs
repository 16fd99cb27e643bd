//! Subcommand implementations.

pub mod cuts;
pub mod project;
pub mod render;
pub mod segment;

use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};

use anyhow::{Context, Result};
use tracing::info;

use shorts_media::FfmpegProgress;

/// Read a narration argument: a path to a text file, or the text itself.
pub(crate) fn read_narration(arg: &str) -> Result<String> {
    let path = Path::new(arg);
    if path.is_file() {
        std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read narration file {}", path.display()))
    } else {
        Ok(arg.to_string())
    }
}

/// A progress callback that logs every 10% step.
pub(crate) fn progress_logger(
    total_secs: f64,
) -> impl Fn(FfmpegProgress) + Send + Sync + 'static {
    let last_decile = AtomicU64::new(0);
    let total_ms = (total_secs * 1000.0) as i64;
    move |progress| {
        let pct = progress.percentage(total_ms);
        let decile = (pct / 10.0) as u64;
        if decile > last_decile.swap(decile, Ordering::Relaxed) {
            info!("Encoding: {:.0}%", pct);
        }
        if progress.is_complete {
            info!("Encoding: done");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_narration_literal_text() {
        let text = read_narration("Hello there. How are you?").unwrap();
        assert_eq!(text, "Hello there. How are you?");
    }

    #[test]
    fn test_read_narration_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("narration.txt");
        std::fs::write(&path, "From the file.").unwrap();
        let text = read_narration(path.to_str().unwrap()).unwrap();
        assert_eq!(text, "From the file.");
    }
}
