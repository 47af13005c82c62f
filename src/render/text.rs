//! Text layout and rasterization using cosmic-text
//!
//! Text blocks are shaped once per frame into a tight RGBA pixmap, which the
//! frame rasterizer then composites with per-object opacity, rotation and
//! reveal clipping. Multi-line blocks are center-aligned.

use cosmic_text::{Align, Attrs, Buffer, Family, FontSystem, Metrics, Shaping, SwashCache};
use tiny_skia::Pixmap;

use crate::domain::Color;

/// Line height as a multiple of the font size
const LINE_HEIGHT: f32 = 1.4;

/// Shared font system and glyph cache
pub struct TextEngine {
    font_system: FontSystem,
    cache: SwashCache,
}

impl TextEngine {
    /// Load system fonts; expensive, so the stage creates exactly one
    pub fn new() -> Self {
        Self {
            font_system: FontSystem::new(),
            cache: SwashCache::new(),
        }
    }

    fn shape(&mut self, content: &str, font_size: f32) -> Buffer {
        let metrics = Metrics::new(font_size, font_size * LINE_HEIGHT);
        let mut buffer = Buffer::new(&mut self.font_system, metrics);
        buffer.set_size(&mut self.font_system, None, None);
        buffer.set_text(
            &mut self.font_system,
            content,
            Attrs::new().family(Family::SansSerif),
            Shaping::Advanced,
        );
        buffer.shape_until_scroll(&mut self.font_system, false);
        buffer
    }

    /// Measure the extent of a text block at the given font size
    pub fn measure(&mut self, content: &str, font_size: f32) -> (f32, f32) {
        let buffer = self.shape(content, font_size);
        let mut width: f32 = 0.0;
        let mut lines = 0usize;
        for run in buffer.layout_runs() {
            width = width.max(run.line_w);
            lines += 1;
        }
        (width, lines as f32 * font_size * LINE_HEIGHT)
    }

    /// Rasterize a text block into a tight premultiplied pixmap
    ///
    /// Returns `None` for empty content or when no glyph coverage exists
    /// (e.g. no usable fonts on the system).
    pub fn rasterize(&mut self, content: &str, font_size: f32, color: Color) -> Option<Pixmap> {
        if content.is_empty() {
            return None;
        }
        let (width, height) = self.measure(content, font_size);
        let pix_w = width.ceil() as u32;
        let pix_h = height.ceil() as u32;
        if pix_w == 0 || pix_h == 0 {
            return None;
        }

        // Reshape with a fixed width so multi-line blocks center-align
        let metrics = Metrics::new(font_size, font_size * LINE_HEIGHT);
        let mut buffer = Buffer::new(&mut self.font_system, metrics);
        buffer.set_size(&mut self.font_system, Some(pix_w as f32), None);
        buffer.set_text(
            &mut self.font_system,
            content,
            Attrs::new().family(Family::SansSerif),
            Shaping::Advanced,
        );
        for line in buffer.lines.iter_mut() {
            line.set_align(Some(Align::Center));
        }
        buffer.shape_until_scroll(&mut self.font_system, false);

        // Straight-alpha staging buffer, converted to premultiplied below
        let mut rgba = vec![0u8; (pix_w * pix_h * 4) as usize];
        let [r, g, b, _] = color.to_rgba_u8(1.0);
        let text_color = cosmic_text::Color::rgba(r, g, b, 0xFF);
        buffer.draw(
            &mut self.font_system,
            &mut self.cache,
            text_color,
            |x, y, w, h, c| {
                let ca = c.a();
                if ca == 0 {
                    return;
                }
                for dy in 0..h {
                    for dx in 0..w {
                        let px = x + dx as i32;
                        let py = y + dy as i32;
                        if px < 0 || py < 0 || px >= pix_w as i32 || py >= pix_h as i32 {
                            continue;
                        }
                        let idx = ((py as u32 * pix_w + px as u32) * 4) as usize;
                        // Source-over onto the staging buffer
                        let sa = ca as u32;
                        let da = rgba[idx + 3] as u32;
                        let out_a = sa + da * (255 - sa) / 255;
                        if out_a == 0 {
                            continue;
                        }
                        rgba[idx] = blend(c.r(), rgba[idx], sa, da, out_a);
                        rgba[idx + 1] = blend(c.g(), rgba[idx + 1], sa, da, out_a);
                        rgba[idx + 2] = blend(c.b(), rgba[idx + 2], sa, da, out_a);
                        rgba[idx + 3] = out_a as u8;
                    }
                }
            },
        );

        if rgba.iter().skip(3).step_by(4).all(|&a| a == 0) {
            return None;
        }

        // Premultiply for tiny-skia
        for px in rgba.chunks_exact_mut(4) {
            let a = px[3] as u32;
            px[0] = (px[0] as u32 * a / 255) as u8;
            px[1] = (px[1] as u32 * a / 255) as u8;
            px[2] = (px[2] as u32 * a / 255) as u8;
        }
        Pixmap::from_vec(rgba, tiny_skia::IntSize::from_wh(pix_w, pix_h)?)
    }
}

/// Source-over blend of one straight-alpha channel
fn blend(src: u8, dst: u8, sa: u32, da: u32, out_a: u32) -> u8 {
    let s = src as u32;
    let d = dst as u32;
    ((s * sa + d * da * (255 - sa) / 255) / out_a) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::palette;

    #[test]
    fn test_measure_empty_is_zero_width() {
        let mut engine = TextEngine::new();
        let (w, _) = engine.measure("", 24.0);
        assert_eq!(w, 0.0);
    }

    #[test]
    fn test_measure_scales_with_font_size() {
        let mut engine = TextEngine::new();
        let (w_small, h_small) = engine.measure("statistical", 16.0);
        let (w_large, h_large) = engine.measure("statistical", 32.0);
        if w_small > 0.0 {
            // Twice the font size should roughly double the extent
            assert!(w_large > w_small * 1.5);
            assert!(h_large > h_small * 1.5);
        }
    }

    #[test]
    fn test_multiline_measures_taller() {
        let mut engine = TextEngine::new();
        let (_, h1) = engine.measure("one line", 20.0);
        let (_, h2) = engine.measure("two\nlines", 20.0);
        assert!(h2 >= h1 * 2.0 - 0.5);
    }

    #[test]
    fn test_rasterize_empty_returns_none() {
        let mut engine = TextEngine::new();
        assert!(engine.rasterize("", 24.0, palette::WHITE).is_none());
    }
}
