//! `cuts` subcommand: multi-cut video from a manifest.

use anyhow::{Context, Result};
use tracing::info;

use shorts_media::{check_ffmpeg, CutsRenderRequest, Renderer};
use shorts_models::{Cut, EncodingConfig};

use crate::cli::CutsArgs;
use crate::commands::progress_logger;
use crate::config::CliConfig;

pub async fn run(args: CutsArgs, config: &CliConfig) -> Result<()> {
    check_ffmpeg()?;

    let manifest = std::fs::read_to_string(&args.manifest)
        .with_context(|| format!("Failed to read {}", args.manifest.display()))?;
    let cuts: Vec<Cut> = serde_json::from_str(&manifest)
        .with_context(|| format!("Invalid cut manifest {}", args.manifest.display()))?;
    info!("Loaded {} cuts from {}", cuts.len(), args.manifest.display());

    let destination = config.resolve_output(&args.output);
    let output_name = destination
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "shorts_final.mp4".to_string());

    let request = CutsRenderRequest { cuts, output_name };
    let total = request.total_duration();

    let renderer =
        Renderer::new(EncodingConfig::default()).with_timeout(config.encode_timeout_secs);
    let duration = renderer
        .render_cuts(&request, &destination, progress_logger(total))
        .await?;

    info!(
        "Rendered {:.2}s video to {}",
        duration,
        destination.display()
    );
    Ok(())
}
