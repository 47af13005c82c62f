//! Video file sink backed by the GStreamer pipeline

use anyhow::{Context, Result};
use std::path::Path;

use super::encoder::{self, EncoderInfo};
use super::pipeline::Pipeline;
use super::sink::FrameSink;
use crate::config::Container;

/// Encodes pushed frames into a video file
pub struct VideoSink {
    pipeline: Pipeline,
    frames: u64,
}

impl VideoSink {
    /// Create and start an encoding pipeline
    ///
    /// `encoder_override` selects a specific GStreamer element; otherwise the
    /// best detected encoder is used.
    pub fn create(
        output_path: &Path,
        width: u32,
        height: u32,
        framerate: u32,
        container: Container,
        encoder_override: Option<&str>,
    ) -> Result<Self> {
        let encoder: EncoderInfo = match encoder_override {
            Some(name) => encoder::find_encoder(name)?,
            None => encoder::best_encoder()?,
        };
        log::info!(
            "Using encoder: {} ({})",
            encoder.display_name(),
            encoder.codec.name()
        );

        let pipeline = Pipeline::new(
            &encoder,
            container,
            output_path,
            width,
            height,
            framerate,
        )
        .context("Failed to create GStreamer pipeline")?;
        pipeline.start()?;

        Ok(Self {
            pipeline,
            frames: 0,
        })
    }

    pub fn frame_count(&self) -> u64 {
        self.frames
    }
}

impl FrameSink for VideoSink {
    fn push(&mut self, rgba: &[u8], pts_nanos: u64) -> Result<()> {
        self.pipeline.push_frame(rgba, pts_nanos)?;
        self.frames += 1;
        if self.frames % 300 == 0 {
            log::info!("Encoded {} frames", self.frames);
        }
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        log::info!("Finalizing video ({} frames)...", self.frames);
        self.pipeline.finish()
    }
}
