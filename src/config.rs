//! Render configuration and command line interface

use anyhow::{Context, Result};
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::domain::{Color, palette};

/// Video container format
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Container {
    #[default]
    Mp4,
    Webm,
    Mkv,
}

impl Container {
    /// Get file extension for this container
    pub fn extension(&self) -> &'static str {
        match self {
            Container::Mp4 => "mp4",
            Container::Webm => "webm",
            Container::Mkv => "mkv",
        }
    }

    /// Get GStreamer muxer element name
    pub fn muxer_element(&self) -> &'static str {
        match self {
            Container::Mp4 => "mp4mux",
            Container::Webm => "webmmux",
            Container::Mkv => "matroskamux",
        }
    }
}

/// Render configuration, optionally loaded from a TOML file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Output width in pixels
    pub width: u32,
    /// Output height in pixels
    pub height: u32,
    /// Frames per second
    pub fps: u32,
    /// Background color as `#RRGGBB`
    pub background: String,
    /// Video container format
    pub container: Container,
    /// Video encoder element (None = auto-detect)
    pub encoder: Option<String>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 1920,
            height: 1080,
            fps: 30,
            background: "#1E1E1E".to_string(),
            container: Container::Mp4,
            encoder: None,
        }
    }
}

impl RenderConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        toml::from_str(&raw)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Check that the configuration can actually be encoded
    pub fn validate(&self) -> Result<()> {
        anyhow::ensure!(
            self.width >= 16 && self.height >= 16,
            "Resolution too small: {}x{}",
            self.width,
            self.height
        );
        // Most encoders require even dimensions for 4:2:0 output
        anyhow::ensure!(
            self.width % 2 == 0 && self.height % 2 == 0,
            "Width and height must be even, got {}x{}",
            self.width,
            self.height
        );
        anyhow::ensure!(
            (1..=240).contains(&self.fps),
            "Framerate out of range: {}",
            self.fps
        );
        anyhow::ensure!(
            Color::from_hex(&self.background).is_some(),
            "Invalid background color: {:?}",
            self.background
        );
        Ok(())
    }

    /// Parsed background color
    pub fn background_color(&self) -> Color {
        Color::from_hex(&self.background).unwrap_or(palette::BACKGROUND)
    }

    /// Default output path: Videos folder with a timestamped name
    pub fn default_output_path(&self) -> PathBuf {
        let dir = dirs::video_dir()
            .or_else(|| dirs::home_dir().map(|h| h.join("Videos")))
            .unwrap_or_else(|| PathBuf::from("."));
        let name = chrono::Local::now()
            .format("StatisticalSignificance_%Y-%m-%d_%H-%M-%S")
            .to_string();
        dir.join(format!("{}.{}", name, self.container.extension()))
    }
}

/// Renders an educational animation explaining statistical significance
#[derive(Parser, Debug)]
#[command(name = "sigmareel", version, about)]
pub struct Cli {
    /// Output video path (default: Videos folder, timestamped name)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Read render settings from a TOML file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Output width in pixels
    #[arg(long)]
    pub width: Option<u32>,

    /// Output height in pixels
    #[arg(long)]
    pub height: Option<u32>,

    /// Frames per second
    #[arg(long)]
    pub fps: Option<u32>,

    /// Video container format
    #[arg(long, value_enum)]
    pub container: Option<Container>,

    /// Video encoder element (e.g. x264enc); default auto-detects
    #[arg(long)]
    pub encoder: Option<String>,

    /// List available encoders and exit
    #[arg(long)]
    pub list_encoders: bool,

    /// Write numbered PNG frames to this directory instead of a video
    #[arg(long)]
    pub png_dir: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Merge defaults, config file and command line flags, then validate
    pub fn resolve_config(&self) -> Result<RenderConfig> {
        let mut config = match &self.config {
            Some(path) => RenderConfig::load(path)?,
            None => RenderConfig::default(),
        };
        if let Some(width) = self.width {
            config.width = width;
        }
        if let Some(height) = self.height {
            config.height = height;
        }
        if let Some(fps) = self.fps {
            config.fps = fps;
        }
        if let Some(container) = self.container {
            config.container = container;
        }
        if let Some(encoder) = &self.encoder {
            config.encoder = Some(encoder.clone());
        }
        config.validate()?;
        Ok(config)
    }
}
