//! Scene rasterization
//!
//! This module contains:
//! - Geometry constants and math shared by the primitive rasterizers
//! - Frame rendering using tiny-skia
//! - Text layout and rasterization using cosmic-text

pub mod geometry;
pub mod raster;
pub mod text;

pub use raster::FrameRenderer;
pub use text::TextEngine;
