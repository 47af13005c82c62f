//! Drawable primitive types
//!
//! A primitive is pure data: geometry in canvas coordinates plus styling.
//! Rasterization lives in [`crate::render`], animation state in
//! [`crate::scene::Scene`].

use crate::domain::{Color, Point, Rect, TextStyle};

/// Coordinate axes mapping a data range onto a canvas rectangle
#[derive(Clone, Debug)]
pub struct Axes {
    pub x_min: f64,
    pub x_max: f64,
    /// Tick spacing along the x axis, in data units
    pub x_step: f64,
    pub y_min: f64,
    pub y_max: f64,
    pub y_step: f64,
    /// Canvas region covered by the data ranges
    pub rect: Rect,
    pub color: Color,
}

impl Axes {
    /// Map data coordinates to a canvas point
    pub fn c2p(&self, x: f64, y: f64) -> Point {
        let fx = ((x - self.x_min) / (self.x_max - self.x_min)) as f32;
        let fy = ((y - self.y_min) / (self.y_max - self.y_min)) as f32;
        Point {
            x: self.rect.left + fx * self.rect.width(),
            y: self.rect.bottom - fy * self.rect.height(),
        }
    }

    /// Canvas point where the axes cross (x=0 on the baseline)
    pub fn origin(&self) -> Point {
        self.c2p(0.0, self.y_min)
    }
}

/// A function curve sampled into a canvas-space polyline
#[derive(Clone, Debug)]
pub struct Curve {
    pub points: Vec<Point>,
    pub color: Color,
    pub stroke_width: f32,
}

impl Curve {
    /// Sample `f` uniformly over the full x range of `axes`
    pub fn plot(axes: &Axes, f: impl Fn(f64) -> f64, color: Color, stroke_width: f32) -> Self {
        // 4 samples per pixel column would be wasteful; 256 is smooth at 1080p
        const SAMPLES: usize = 256;
        let mut points = Vec::with_capacity(SAMPLES + 1);
        for i in 0..=SAMPLES {
            let x = axes.x_min + (axes.x_max - axes.x_min) * i as f64 / SAMPLES as f64;
            points.push(axes.c2p(x, f(x)));
        }
        Self {
            points,
            color,
            stroke_width,
        }
    }
}

/// A filled area between a curve and the axis baseline
#[derive(Clone, Debug)]
pub struct Region {
    /// Closed polygon outline in canvas space
    pub outline: Vec<Point>,
    pub color: Color,
    /// Fill opacity at full object opacity
    pub fill_alpha: f32,
}

impl Region {
    /// Area under `f` between `x0` and `x1`, closed along the baseline
    pub fn under_curve(
        axes: &Axes,
        f: impl Fn(f64) -> f64,
        x0: f64,
        x1: f64,
        color: Color,
        fill_alpha: f32,
    ) -> Self {
        const SAMPLES: usize = 128;
        let mut outline = Vec::with_capacity(SAMPLES + 3);
        for i in 0..=SAMPLES {
            let x = x0 + (x1 - x0) * i as f64 / SAMPLES as f64;
            outline.push(axes.c2p(x, f(x)));
        }
        // Close along the baseline, right to left
        outline.push(axes.c2p(x1, axes.y_min));
        outline.push(axes.c2p(x0, axes.y_min));
        Self {
            outline,
            color,
            fill_alpha,
        }
    }
}

/// A dashed straight line
#[derive(Clone, Debug)]
pub struct DashedLine {
    pub from: Point,
    pub to: Point,
    pub color: Color,
    pub stroke_width: f32,
}

/// A horizontal curly brace spanning `from.x..to.x`, opening upward
#[derive(Clone, Debug)]
pub struct Brace {
    pub from: Point,
    pub to: Point,
    pub color: Color,
}

/// A block of text centered on `anchor`
#[derive(Clone, Debug)]
pub struct Text {
    pub content: String,
    pub style: TextStyle,
    pub anchor: Point,
    /// Rotate 90 degrees counter-clockwise (vertical axis labels)
    pub rotated: bool,
}

impl Text {
    pub fn new(content: impl Into<String>, style: TextStyle, anchor: Point) -> Self {
        Self {
            content: content.into(),
            style,
            anchor,
            rotated: false,
        }
    }

    pub fn rotated(content: impl Into<String>, style: TextStyle, anchor: Point) -> Self {
        Self {
            content: content.into(),
            style,
            anchor,
            rotated: true,
        }
    }
}

/// One drawable visual element
#[derive(Clone, Debug)]
pub enum Primitive {
    Text(Text),
    Axes(Axes),
    Curve(Curve),
    Region(Region),
    DashedLine(DashedLine),
    Brace(Brace),
}

impl Primitive {
    /// Replace the primary color of the primitive, where it has one
    pub fn set_color(&mut self, color: Color) {
        match self {
            Primitive::Text(t) => t.style.color = color,
            Primitive::Axes(a) => a.color = color,
            Primitive::Curve(c) => c.color = color,
            Primitive::Region(r) => r.color = color,
            Primitive::DashedLine(l) => l.color = color,
            Primitive::Brace(b) => b.color = color,
        }
    }

    /// The primary color of the primitive
    pub fn color(&self) -> Color {
        match self {
            Primitive::Text(t) => t.style.color,
            Primitive::Axes(a) => a.color,
            Primitive::Curve(c) => c.color,
            Primitive::Region(r) => r.color,
            Primitive::DashedLine(l) => l.color,
            Primitive::Brace(b) => b.color,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::palette;

    fn test_axes() -> Axes {
        Axes {
            x_min: -4.0,
            x_max: 4.0,
            x_step: 1.0,
            y_min: 0.0,
            y_max: 0.5,
            y_step: 0.1,
            rect: Rect::new(100.0, 100.0, 900.0, 600.0),
            color: palette::LIGHT_GRAY,
        }
    }

    #[test]
    fn test_c2p_corners() {
        let axes = test_axes();
        let bl = axes.c2p(-4.0, 0.0);
        assert_eq!((bl.x, bl.y), (100.0, 600.0));
        let tr = axes.c2p(4.0, 0.5);
        assert_eq!((tr.x, tr.y), (900.0, 100.0));
    }

    #[test]
    fn test_c2p_origin_is_centered() {
        let axes = test_axes();
        let origin = axes.origin();
        assert_eq!(origin.x, 500.0);
        assert_eq!(origin.y, 600.0);
    }

    #[test]
    fn test_plot_covers_full_range() {
        let axes = test_axes();
        let curve = Curve::plot(&axes, |x| x.abs() / 10.0, palette::WHITE, 3.0);
        let first = curve.points.first().unwrap();
        let last = curve.points.last().unwrap();
        assert_eq!(first.x, axes.rect.left);
        assert_eq!(last.x, axes.rect.right);
    }

    #[test]
    fn test_region_outline_is_closed_on_baseline() {
        let axes = test_axes();
        let region = Region::under_curve(&axes, |_| 0.25, -1.0, 1.0, palette::BLUE, 0.3);
        let n = region.outline.len();
        // Last two points are on the baseline at x1 and x0
        assert_eq!(region.outline[n - 1].y, axes.rect.bottom);
        assert_eq!(region.outline[n - 2].y, axes.rect.bottom);
        assert_eq!(region.outline[n - 1].x, axes.c2p(-1.0, 0.0).x);
    }

    #[test]
    fn test_set_color_applies_to_text() {
        let mut p = Primitive::Text(Text::new(
            "x",
            crate::domain::Role::Cell.style(),
            Point::default(),
        ));
        p.set_color(palette::SIGMA_PURPLE);
        assert_eq!(p.color(), palette::SIGMA_PURPLE);
    }
}
