//! GStreamer pipeline construction and management

use anyhow::{Context, Result};
use gstreamer as gst;
use gstreamer::prelude::*;
use gstreamer_app as gst_app;
use gstreamer_video as gst_video;
use std::path::{Path, PathBuf};

use super::encoder::EncoderInfo;
use crate::config::Container;

/// GStreamer pipeline for encoding rendered frames to a video file
pub struct Pipeline {
    pipeline: gst::Pipeline,
    appsrc: gst_app::AppSrc,
    output_path: PathBuf,
}

impl Pipeline {
    /// Create a new encoding pipeline
    ///
    /// # Arguments
    /// * `encoder` - Encoder to use
    /// * `container` - Container format
    /// * `output_path` - Output file path
    /// * `width` - Video width
    /// * `height` - Video height
    /// * `framerate` - Frames per second
    pub fn new(
        encoder: &EncoderInfo,
        container: Container,
        output_path: &Path,
        width: u32,
        height: u32,
        framerate: u32,
    ) -> Result<Self> {
        gst::init().context("Failed to initialize GStreamer")?;

        let pipeline = gst::Pipeline::new();

        // Frames are rendered faster or slower than realtime, so the source
        // is not live and pushes block when the encoder queue is full.
        let appsrc = gst_app::AppSrc::builder()
            .name("scene-source")
            .is_live(false)
            .block(true)
            .format(gst::Format::Time)
            .build();

        let videoconvert = gst::ElementFactory::make("videoconvert")
            .build()
            .context("Failed to create videoconvert element")?;

        let encoder_elem = gst::ElementFactory::make(&encoder.gst_element)
            .build()
            .with_context(|| format!("Failed to create encoder: {}", encoder.gst_element))?;

        let muxer = gst::ElementFactory::make(container.muxer_element())
            .build()
            .with_context(|| format!("Failed to create muxer: {}", container.muxer_element()))?;

        let filesink = gst::ElementFactory::make("filesink")
            .property("location", output_path.display().to_string())
            .build()
            .context("Failed to create filesink element")?;

        pipeline.add_many([
            appsrc.upcast_ref(),
            &videoconvert,
            &encoder_elem,
            &muxer,
            &filesink,
        ])?;
        gst::Element::link_many([
            appsrc.upcast_ref(),
            &videoconvert,
            &encoder_elem,
            &muxer,
            &filesink,
        ])?;

        // Raw RGBA caps matching the rendered frames
        let video_info =
            gst_video::VideoInfo::builder(gst_video::VideoFormat::Rgba, width, height)
                .fps(gst::Fraction::new(framerate as i32, 1))
                .build()
                .context("Failed to build video info")?;
        let caps = video_info.to_caps().context("Failed to build caps")?;
        appsrc.set_caps(Some(&caps));

        Ok(Self {
            pipeline,
            appsrc,
            output_path: output_path.to_path_buf(),
        })
    }

    /// Start the pipeline
    pub fn start(&self) -> Result<()> {
        self.pipeline
            .set_state(gst::State::Playing)
            .context("Failed to start pipeline")?;
        Ok(())
    }

    /// Push a video frame to the pipeline
    ///
    /// # Arguments
    /// * `data` - Raw RGBA frame data
    /// * `timestamp` - Frame timestamp in nanoseconds
    pub fn push_frame(&self, data: &[u8], timestamp: u64) -> Result<()> {
        let mut buffer =
            gst::Buffer::with_size(data.len()).context("Failed to allocate GStreamer buffer")?;

        {
            let buffer_mut = buffer.get_mut().unwrap();
            buffer_mut.set_pts(gst::ClockTime::from_nseconds(timestamp));
            let mut map = buffer_mut
                .map_writable()
                .context("Failed to map buffer for writing")?;
            map.copy_from_slice(data);
        }

        self.appsrc
            .push_buffer(buffer)
            .map_err(|_| anyhow::anyhow!("Failed to push buffer to pipeline"))?;

        Ok(())
    }

    /// Signal end of stream and finalize the video file
    pub fn finish(&self) -> Result<()> {
        log::info!("Sending EOS signal to pipeline...");
        self.appsrc
            .end_of_stream()
            .map_err(|_| anyhow::anyhow!("Failed to send EOS"))?;

        // Wait for EOS to propagate through the pipeline
        let bus = self.pipeline.bus().unwrap();
        let mut eos_received = false;
        for msg in bus.iter_timed(gst::ClockTime::from_seconds(30)) {
            use gst::MessageView;
            match msg.view() {
                MessageView::Eos(..) => {
                    log::info!("EOS received, finalizing...");
                    eos_received = true;
                    break;
                }
                MessageView::Error(err) => {
                    return Err(anyhow::anyhow!(
                        "Pipeline error: {} ({})",
                        err.error(),
                        err.debug().unwrap_or_default()
                    ));
                }
                _ => {}
            }
        }

        if !eos_received {
            log::warn!("EOS timeout reached, forcing pipeline shutdown");
        }

        self.pipeline
            .set_state(gst::State::Null)
            .context("Failed to stop pipeline")?;

        self.verify_output()?;

        Ok(())
    }

    /// Verify that the output file exists and has data
    fn verify_output(&self) -> Result<()> {
        if !self.output_path.exists() {
            return Err(anyhow::anyhow!(
                "Output file was not created: {}",
                self.output_path.display()
            ));
        }

        let metadata = std::fs::metadata(&self.output_path).with_context(|| {
            format!(
                "Failed to read output file metadata: {}",
                self.output_path.display()
            )
        })?;

        if metadata.len() == 0 {
            return Err(anyhow::anyhow!(
                "Output file is empty: {}",
                self.output_path.display()
            ));
        }

        log::info!(
            "Output file verified: {} ({} bytes)",
            self.output_path.display(),
            metadata.len()
        );

        Ok(())
    }
}
