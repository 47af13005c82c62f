//! Frame sinks
//!
//! The stage produces raw RGBA frames and hands them to a sink. The video
//! sink lives in [`super::video`]; this module holds the trait and the two
//! non-GStreamer sinks.

use anyhow::{Context, Result};
use image::RgbaImage;
use std::fs::File;
use std::io;
use std::path::PathBuf;

/// Receives rendered frames in presentation order
pub trait FrameSink {
    /// Push one RGBA frame with its timestamp in nanoseconds
    fn push(&mut self, rgba: &[u8], pts_nanos: u64) -> Result<()>;

    /// Finalize the output; no frames may be pushed afterwards
    fn finish(&mut self) -> Result<()>;
}

/// Counts frames in memory, retaining the last one; used by tests
#[derive(Default)]
pub struct MemorySink {
    pub frames: u64,
    pub last_frame: Vec<u8>,
    pub last_pts: u64,
    pub finished: bool,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }
}

impl FrameSink for MemorySink {
    fn push(&mut self, rgba: &[u8], pts_nanos: u64) -> Result<()> {
        anyhow::ensure!(!self.finished, "push after finish");
        self.frames += 1;
        self.last_frame.clear();
        self.last_frame.extend_from_slice(rgba);
        self.last_pts = pts_nanos;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.finished = true;
        Ok(())
    }
}

/// Writes numbered PNG frames into a directory (preview mode)
pub struct PngSequenceSink {
    dir: PathBuf,
    width: u32,
    height: u32,
    next_index: u64,
}

impl PngSequenceSink {
    /// Create the directory if needed
    pub fn new(dir: PathBuf, width: u32, height: u32) -> Result<Self> {
        std::fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create PNG directory: {}", dir.display()))?;
        Ok(Self {
            dir,
            width,
            height,
            next_index: 0,
        })
    }
}

impl FrameSink for PngSequenceSink {
    fn push(&mut self, rgba: &[u8], _pts_nanos: u64) -> Result<()> {
        let img = RgbaImage::from_raw(self.width, self.height, rgba.to_vec())
            .context("Frame size does not match the configured resolution")?;
        let path = self.dir.join(format!("frame_{:05}.png", self.next_index));
        let mut file = File::create(&path)
            .with_context(|| format!("Failed to create {}", path.display()))?;
        write_png(&mut file, &img)
            .with_context(|| format!("Failed to encode {}", path.display()))?;
        self.next_index += 1;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        log::info!(
            "Wrote {} PNG frames to {}",
            self.next_index,
            self.dir.display()
        );
        Ok(())
    }
}

fn write_png<W: io::Write>(w: W, image: &RgbaImage) -> Result<(), png::EncodingError> {
    let mut encoder = png::Encoder::new(w, image.width(), image.height());
    encoder.set_color(png::ColorType::Rgba);
    encoder.set_depth(png::BitDepth::Eight);
    let mut writer = encoder.write_header()?;
    writer.write_image_data(image.as_raw())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_sink_counts_and_retains_last() {
        let mut sink = MemorySink::new();
        sink.push(&[1, 2, 3, 4], 0).unwrap();
        sink.push(&[5, 6, 7, 8], 33_333_333).unwrap();
        assert_eq!(sink.frames, 2);
        assert_eq!(sink.last_frame, vec![5, 6, 7, 8]);
        assert_eq!(sink.last_pts, 33_333_333);
        sink.finish().unwrap();
        assert!(sink.push(&[0; 4], 0).is_err());
    }

    #[test]
    fn test_png_sequence_sink_writes_numbered_files() {
        let dir = tempfile::tempdir().unwrap();
        let mut sink = PngSequenceSink::new(dir.path().join("frames"), 2, 2).unwrap();
        let frame = vec![255u8; 2 * 2 * 4];
        sink.push(&frame, 0).unwrap();
        sink.push(&frame, 1).unwrap();
        sink.finish().unwrap();
        assert!(dir.path().join("frames/frame_00000.png").exists());
        assert!(dir.path().join("frames/frame_00001.png").exists());
    }

    #[test]
    fn test_png_sequence_sink_rejects_wrong_size() {
        let dir = tempfile::tempdir().unwrap();
        let mut sink = PngSequenceSink::new(dir.path().to_path_buf(), 4, 4).unwrap();
        assert!(sink.push(&[0u8; 7], 0).is_err());
    }
}
