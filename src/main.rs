mod acts;
mod config;
mod domain;
mod encode;
mod render;
mod scene;
mod stage;
mod stats;

use anyhow::{Context, Result};
use clap::Parser;
use std::time::Instant;

use config::{Cli, RenderConfig};
use encode::{FrameSink, PngSequenceSink, VideoSink};
use stage::Stage;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let default_filter = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    if cli.list_encoders {
        return list_encoders();
    }

    let config = cli.resolve_config()?;
    log::info!(
        "Rendering {}x{} @ {} fps",
        config.width,
        config.height,
        config.fps
    );

    let start = Instant::now();
    let frames = if let Some(dir) = &cli.png_dir {
        let sink = PngSequenceSink::new(dir.clone(), config.width, config.height)?;
        render(&config, sink)?
    } else {
        let output = cli
            .output
            .clone()
            .unwrap_or_else(|| config.default_output_path());
        if let Some(parent) = output.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        log::info!("Output: {}", output.display());
        let sink = VideoSink::create(
            &output,
            config.width,
            config.height,
            config.fps,
            config.container,
            config.encoder.as_deref(),
        )?;
        render(&config, sink)?
    };

    let elapsed = start.elapsed();
    log::info!(
        "Rendered {} frames ({:.1}s of video) in {:.1}s",
        frames,
        frames as f64 / config.fps as f64,
        elapsed.as_secs_f64()
    );
    Ok(())
}

/// Play all five acts into the sink and finalize it
fn render<S: FrameSink>(config: &RenderConfig, sink: S) -> Result<u64> {
    let mut stage = Stage::new(config, sink);
    acts::run_all(&mut stage)?;
    let frames = stage.frames_rendered();
    let mut sink = stage.into_sink();
    sink.finish()?;
    Ok(frames)
}

fn list_encoders() -> Result<()> {
    let encoders = encode::encoder::detect_encoders()?;
    if encoders.is_empty() {
        println!("No video encoders available. Install GStreamer encoder plugins.");
        return Ok(());
    }
    for encoder in encoders {
        println!("{:<16} {}", encoder.gst_element, encoder.display_name());
    }
    Ok(())
}
