//! `render` subcommand: single-image subtitled video.

use anyhow::{bail, Context, Result};
use tracing::info;

use shorts_media::{
    audio_duration, check_ffmpeg, parse_srt, split_narration, Renderer, SubtitledRenderRequest,
};
use shorts_models::EncodingConfig;

use crate::cli::RenderArgs;
use crate::commands::{progress_logger, read_narration};
use crate::config::CliConfig;

pub async fn run(args: RenderArgs, config: &CliConfig) -> Result<()> {
    check_ffmpeg()?;

    let font = match args.font.or_else(|| config.font.clone()) {
        Some(font) => font,
        None => bail!("A font is required: pass --font or set SHORTS_FONT"),
    };

    let blocks = match (&args.narration, &args.srt) {
        (Some(narration), None) => {
            let text = read_narration(narration)?;
            let duration = audio_duration(&args.audio).await?;
            split_narration(&text, duration)?
        }
        (None, Some(srt)) => {
            let content = std::fs::read_to_string(srt)
                .with_context(|| format!("Failed to read {}", srt.display()))?;
            parse_srt(&content)?
        }
        _ => bail!("Either --narration or --srt is required"),
    };

    let destination = config.resolve_output(&args.output);
    let output_name = destination
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "shorts_subtitled.mp4".to_string());

    let request = SubtitledRenderRequest {
        image: args.image,
        audio: args.audio,
        font,
        blocks,
        output_name,
    };

    let mut encoding = EncodingConfig::default();
    if let Some(resolution) = args.resolution {
        encoding = encoding.with_extra_args(vec!["-s".to_string(), resolution.as_size_arg()]);
    }

    let renderer = Renderer::new(encoding).with_timeout(config.encode_timeout_secs);
    let total = request.loop_duration();
    let duration = renderer
        .render_subtitled(&request, &destination, progress_logger(total))
        .await?;

    info!(
        "Rendered {:.2}s video to {}",
        duration,
        destination.display()
    );
    Ok(())
}
