//! `project` subcommand: export the project-state JSON for a render.

use anyhow::{Context, Result};
use tracing::info;

use shorts_media::{audio_duration, split_narration, CUT_DURATION_SECS};
use shorts_models::{Cut, ProjectImage, ProjectState, RenderStyle};

use crate::cli::ProjectArgs;
use crate::commands::read_narration;
use crate::config::CliConfig;

pub async fn run(args: ProjectArgs, config: &CliConfig) -> Result<()> {
    let manifest = std::fs::read_to_string(&args.manifest)
        .with_context(|| format!("Failed to read {}", args.manifest.display()))?;
    let cuts: Vec<Cut> = serde_json::from_str(&manifest)
        .with_context(|| format!("Invalid cut manifest {}", args.manifest.display()))?;

    let narration = read_narration(&args.narration)?;
    let duration = audio_duration(&args.audio).await?;
    let blocks = split_narration(&narration, duration)?;

    let images = cuts
        .iter()
        .map(|cut| ProjectImage {
            url: cut.image.to_string_lossy().into_owned(),
            duration_ms: (CUT_DURATION_SECS * 1000.0) as i64,
            transition: "none".to_string(),
        })
        .collect();

    let style = RenderStyle {
        resolution: args.resolution.unwrap_or_default(),
        include_subtitles: !args.no_subtitles,
        remove_watermark: args.remove_watermark,
    };

    let state = ProjectState::new(images, &blocks, style);
    let json = serde_json::to_string_pretty(&state)?;

    let path = config.resolve_output(&args.output);
    std::fs::write(&path, json).with_context(|| format!("Failed to write {}", path.display()))?;
    info!(
        "Wrote project state ({} images, {} subtitles) to {}",
        state.images.len(),
        state.subtitles.len(),
        path.display()
    );
    Ok(())
}
