//! CLI configuration.

use std::path::PathBuf;

/// Environment-driven defaults for the CLI.
#[derive(Debug, Clone)]
pub struct CliConfig {
    /// Default font file for subtitle overlays (`--font` overrides)
    pub font: Option<PathBuf>,
    /// Directory relative output paths are resolved against
    pub output_dir: PathBuf,
    /// Per-encode timeout in seconds
    pub encode_timeout_secs: u64,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            font: None,
            output_dir: PathBuf::from("."),
            encode_timeout_secs: 600,
        }
    }
}

impl CliConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        Self {
            font: std::env::var("SHORTS_FONT").ok().map(PathBuf::from),
            output_dir: std::env::var("SHORTS_OUTPUT_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(".")),
            encode_timeout_secs: std::env::var("SHORTS_ENCODE_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(600),
        }
    }

    /// Resolve an output path against the configured output directory.
    ///
    /// Absolute paths pass through unchanged.
    pub fn resolve_output(&self, path: &std::path::Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.output_dir.join(path)
        }
    }
}
