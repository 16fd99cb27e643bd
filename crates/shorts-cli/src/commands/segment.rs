//! `segment` subcommand: narration text to SRT.

use anyhow::{bail, Context, Result};
use tracing::info;

use shorts_media::{audio_duration, split_narration, to_srt};

use crate::cli::SegmentArgs;
use crate::commands::read_narration;
use crate::config::CliConfig;

pub async fn run(args: SegmentArgs, config: &CliConfig) -> Result<()> {
    let narration = read_narration(&args.narration)?;

    let duration = match (args.duration, &args.audio) {
        (Some(secs), _) => secs,
        (None, Some(audio)) => audio_duration(audio).await?,
        (None, None) => bail!("Either --duration or --audio is required"),
    };

    let blocks = split_narration(&narration, duration)?;
    info!(
        "Segmented narration into {} blocks over {:.2}s",
        blocks.len(),
        duration
    );

    let srt = to_srt(&blocks);
    match args.output {
        Some(path) => {
            let path = config.resolve_output(&path);
            std::fs::write(&path, srt)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!("Wrote {}", path.display());
        }
        None => print!("{srt}"),
    }

    Ok(())
}
