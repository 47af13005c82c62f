//! Frame rasterization using tiny-skia
//!
//! Draws a whole [`Scene`] into a premultiplied RGBA pixmap. Every primitive
//! honors its entry's opacity and draw progress; `Write`/`Create` reveals are
//! implemented here, not in the scene layer.

use anyhow::{Context, Result};
use tiny_skia::{
    FillRule, LineCap, LineJoin, Paint, PathBuilder, Pixmap, PixmapPaint, Stroke, StrokeDash,
    Transform,
};

use super::geometry::{axis, brace, dash};
use super::text::TextEngine;
use crate::domain::{Color, Point, normalize_rect};
use crate::scene::{Axes, Brace, Curve, DashedLine, Entry, Primitive, Region, Scene, Text};

/// Rasterizes scenes at a fixed resolution
pub struct FrameRenderer {
    width: u32,
    height: u32,
    /// Logical-pixel scale relative to the 1080p reference
    scale: f32,
    background: Color,
}

impl FrameRenderer {
    pub fn new(width: u32, height: u32, background: Color) -> Self {
        Self {
            width,
            height,
            scale: height as f32 / 1080.0,
            background,
        }
    }

    /// Render the scene into a fresh pixmap
    pub fn render(&self, scene: &Scene, text: &mut TextEngine) -> Result<Pixmap> {
        let mut pixmap = Pixmap::new(self.width, self.height)
            .context("Failed to allocate frame pixmap")?;
        let [r, g, b, a] = self.background.to_rgba_u8(1.0);
        pixmap.fill(tiny_skia::Color::from_rgba8(r, g, b, a));

        for entry in scene.iter() {
            if entry.opacity <= 0.0 {
                continue;
            }
            match &entry.primitive {
                Primitive::Axes(axes) => self.draw_axes(&mut pixmap, axes, entry),
                Primitive::Curve(curve) => self.draw_curve(&mut pixmap, curve, entry),
                Primitive::Region(region) => self.draw_region(&mut pixmap, region, entry),
                Primitive::DashedLine(line) => self.draw_dashed_line(&mut pixmap, line, entry),
                Primitive::Brace(b) => self.draw_brace(&mut pixmap, b, entry),
                Primitive::Text(t) => self.draw_text(&mut pixmap, t, entry, text),
            }
        }
        Ok(pixmap)
    }

    fn stroke_paint(&self, color: Color, alpha: f32) -> Paint<'static> {
        let [r, g, b, a] = color.to_rgba_u8(alpha);
        let mut paint = Paint::default();
        paint.set_color_rgba8(r, g, b, a);
        paint.anti_alias = true;
        paint
    }

    fn round_stroke(&self, width: f32) -> Stroke {
        Stroke {
            width: width * self.scale,
            line_cap: LineCap::Round,
            line_join: LineJoin::Round,
            ..Default::default()
        }
    }

    fn draw_axes(&self, pixmap: &mut Pixmap, axes: &Axes, entry: &Entry) {
        let paint = self.stroke_paint(axes.color, entry.opacity);
        let stroke = self.round_stroke(axis::THICKNESS);
        let progress = entry.progress.clamp(0.0, 1.0);
        let rect = axes.rect;
        let baseline_y = axes.origin().y;
        let y_axis_x = axes.c2p(0.0, axes.y_min).x;
        let tick = axis::TICK_LEN * self.scale * 0.5;

        let mut pb = PathBuilder::new();

        // X axis reveals left to right, Y axis bottom to top
        let x_reach = rect.left + rect.width() * progress;
        pb.move_to(rect.left, baseline_y);
        pb.line_to(x_reach, baseline_y);

        let y_reach = rect.bottom - rect.height() * progress;
        pb.move_to(y_axis_x, rect.bottom);
        pb.line_to(y_axis_x, y_reach);

        // Ticks appear once the axis line has passed them
        for v in axis::tick_values(axes.x_min, axes.x_max, axes.x_step) {
            let p = axes.c2p(v, axes.y_min);
            if p.x <= x_reach {
                pb.move_to(p.x, p.y - tick);
                pb.line_to(p.x, p.y + tick);
            }
        }
        for v in axis::tick_values(axes.y_min, axes.y_max, axes.y_step) {
            let p = axes.c2p(0.0, v);
            if p.y >= y_reach {
                pb.move_to(p.x - tick, p.y);
                pb.line_to(p.x + tick, p.y);
            }
        }

        if let Some(path) = pb.finish() {
            pixmap.stroke_path(&path, &paint, &stroke, Transform::identity(), None);
        }
    }

    fn draw_curve(&self, pixmap: &mut Pixmap, curve: &Curve, entry: &Entry) {
        let n = curve.points.len();
        if n < 2 {
            return;
        }
        // Create reveals the polyline prefix
        let visible = ((n as f32 * entry.progress).ceil() as usize).clamp(2, n);
        let Some(path) = build_polyline_path(&curve.points[..visible]) else {
            return;
        };
        let paint = self.stroke_paint(curve.color, entry.opacity);
        let stroke = self.round_stroke(curve.stroke_width);
        pixmap.stroke_path(&path, &paint, &stroke, Transform::identity(), None);
    }

    fn draw_region(&self, pixmap: &mut Pixmap, region: &Region, entry: &Entry) {
        let Some(path) = build_polygon_path(&region.outline) else {
            return;
        };
        // Regions materialize by ramping toward their fill alpha
        let alpha = region.fill_alpha * entry.opacity * entry.progress;
        let paint = self.stroke_paint(region.color, alpha);
        pixmap.fill_path(&path, &paint, FillRule::Winding, Transform::identity(), None);
    }

    fn draw_dashed_line(&self, pixmap: &mut Pixmap, line: &DashedLine, entry: &Entry) {
        let end = line.from.lerp(line.to, entry.progress.clamp(0.0, 1.0));
        if line.from.distance(end) < 0.5 {
            return;
        }
        let mut pb = PathBuilder::new();
        pb.move_to(line.from.x, line.from.y);
        pb.line_to(end.x, end.y);
        let Some(path) = pb.finish() else {
            return;
        };
        let paint = self.stroke_paint(line.color, entry.opacity);
        let mut stroke = self.round_stroke(line.stroke_width);
        stroke.dash = StrokeDash::new(
            vec![dash::LENGTH * self.scale, dash::GAP * self.scale],
            0.0,
        );
        pixmap.stroke_path(&path, &paint, &stroke, Transform::identity(), None);
    }

    fn draw_brace(&self, pixmap: &mut Pixmap, b: &Brace, entry: &Entry) {
        let Some(path) = build_brace_path(b.from, b.to, brace::DEPTH * self.scale) else {
            return;
        };
        // Braces fade in along their Create progress
        let paint = self.stroke_paint(b.color, entry.opacity * entry.progress);
        let stroke = self.round_stroke(brace::THICKNESS);
        pixmap.stroke_path(&path, &paint, &stroke, Transform::identity(), None);
    }

    fn draw_text(&self, pixmap: &mut Pixmap, t: &Text, entry: &Entry, engine: &mut TextEngine) {
        let font_size = t.style.size_for_height(self.height);
        let Some(glyphs) = engine.rasterize(&t.content, font_size, t.style.color) else {
            return;
        };
        let full_w = glyphs.width() as f32;
        let full_h = glyphs.height() as f32;

        // Write reveals columns left to right
        let progress = entry.progress.clamp(0.0, 1.0);
        let glyphs = if progress < 1.0 {
            let visible = (full_w * progress).ceil() as u32;
            match clip_columns(&glyphs, visible) {
                Some(clipped) => clipped,
                None => return,
            }
        } else {
            glyphs
        };

        let paint = PixmapPaint {
            opacity: entry.opacity.clamp(0.0, 1.0),
            ..Default::default()
        };
        let transform = if t.rotated {
            Transform::from_rotate_at(-90.0, t.anchor.x, t.anchor.y)
                .pre_translate(t.anchor.x - full_w * 0.5, t.anchor.y - full_h * 0.5)
        } else {
            Transform::from_translate(t.anchor.x - full_w * 0.5, t.anchor.y - full_h * 0.5)
        };
        pixmap.draw_pixmap(0, 0, glyphs.as_ref(), &paint, transform, None);
    }
}

/// Build an open polyline path from consecutive points
fn build_polyline_path(points: &[Point]) -> Option<tiny_skia::Path> {
    let (first, rest) = points.split_first()?;
    let mut pb = PathBuilder::new();
    pb.move_to(first.x, first.y);
    for p in rest {
        pb.line_to(p.x, p.y);
    }
    pb.finish()
}

/// Build a closed polygon path
fn build_polygon_path(points: &[Point]) -> Option<tiny_skia::Path> {
    let (first, rest) = points.split_first()?;
    let mut pb = PathBuilder::new();
    pb.move_to(first.x, first.y);
    for p in rest {
        pb.line_to(p.x, p.y);
    }
    pb.close();
    pb.finish()
}

/// Build a curly brace below the span `from..to`, tip pointing down at center
fn build_brace_path(from: Point, to: Point, depth: f32) -> Option<tiny_skia::Path> {
    let (x0, _, x1, _) = normalize_rect(from.x, from.y, to.x, to.y);
    let span = x1 - x0;
    if span < brace::MIN_SPAN {
        return None;
    }
    let y = from.y;
    let mid = (x0 + x1) * 0.5;
    let shoulder = y + depth * 0.5;
    let tip = y + depth;
    let cap = (depth * 0.8).min(span * 0.25);

    let mut pb = PathBuilder::new();
    // Left half: end hook down to the shoulder bar, bar to the center dip
    pb.move_to(x0, y);
    pb.cubic_to(x0, shoulder, x0 + cap, shoulder, x0 + cap, shoulder);
    pb.line_to(mid - cap, shoulder);
    pb.cubic_to(mid, shoulder, mid, tip, mid, tip);
    // Right half, mirrored
    pb.move_to(x1, y);
    pb.cubic_to(x1, shoulder, x1 - cap, shoulder, x1 - cap, shoulder);
    pb.line_to(mid + cap, shoulder);
    pb.cubic_to(mid, shoulder, mid, tip, mid, tip);
    pb.finish()
}

/// Copy the leftmost `visible` columns into a new pixmap
fn clip_columns(src: &Pixmap, visible: u32) -> Option<Pixmap> {
    if visible == 0 {
        return None;
    }
    let visible = visible.min(src.width());
    let mut out = vec![0u8; (visible * src.height() * 4) as usize];
    let src_stride = (src.width() * 4) as usize;
    let dst_stride = (visible * 4) as usize;
    let data = src.data();
    for row in 0..src.height() as usize {
        let s = row * src_stride;
        let d = row * dst_stride;
        out[d..d + dst_stride].copy_from_slice(&data[s..s + dst_stride]);
    }
    Pixmap::from_vec(out, tiny_skia::IntSize::from_wh(visible, src.height())?)
}
