//! The five acts of the animation, in their fixed order
//!
//! Each act is a plain function against the stage: it adds primitives, plays
//! directive batches, and fades everything it added back out before
//! returning. No state crosses act boundaries.

pub mod conclusion;
pub mod introduction;
pub mod normal_distribution;
pub mod real_world;
pub mod sigma_levels;

use anyhow::Result;

use crate::domain::{Color, Point, Rect, Role, TextStyle, palette};
use crate::encode::FrameSink;
use crate::render::geometry::curve;
use crate::scene::{Axes, Curve, Directive, ObjectId, Primitive, Text};
use crate::stage::Stage;
use crate::stats;

/// Default duration of a Write/Create/Fade batch in seconds
pub(crate) const PLAY_SECS: f32 = 1.0;
/// Duration of the quick region swaps in the sigma-levels act
pub(crate) const QUICK_SECS: f32 = 0.7;

/// Act names in playback order
pub const ACT_NAMES: [&str; 5] = [
    "introduction",
    "normal_distribution",
    "sigma_levels",
    "real_world",
    "conclusion",
];

/// Run all five acts in their fixed order
pub fn run_all<S: FrameSink>(stage: &mut Stage<S>) -> Result<()> {
    let acts: [(&str, fn(&mut Stage<S>) -> Result<()>); 5] = [
        (ACT_NAMES[0], introduction::play),
        (ACT_NAMES[1], normal_distribution::play),
        (ACT_NAMES[2], sigma_levels::play),
        (ACT_NAMES[3], real_world::play),
        (ACT_NAMES[4], conclusion::play),
    ];
    for (name, act) in acts {
        log::info!("Act: {}", name);
        act(stage)?;
        debug_assert!(
            stage.scene().is_empty(),
            "act '{}' leaked {} scene objects",
            name,
            stage.scene().len()
        );
    }
    Ok(())
}

/// Canvas-relative positioning shared by the acts
pub(crate) struct Layout {
    pub w: f32,
    pub h: f32,
}

impl Layout {
    pub fn of<S: FrameSink>(stage: &Stage<S>) -> Self {
        Self {
            w: stage.width(),
            h: stage.height(),
        }
    }

    /// Anchor for a heading at the top edge
    pub fn top_center(&self, text_h: f32) -> Point {
        Point::new(self.w * 0.5, self.h * 0.06 + text_h * 0.5)
    }

    /// Anchor for a caption at the bottom edge
    pub fn bottom_center(&self, text_h: f32) -> Point {
        Point::new(self.w * 0.5, self.h * 0.92 - text_h * 0.5)
    }

    pub fn center(&self) -> Point {
        Point::new(self.w * 0.5, self.h * 0.5)
    }

    /// Centered plot area; `width_frac` of the canvas width, fixed height
    pub fn plot_rect(&self, width_frac: f32) -> Rect {
        Rect::from_center(
            Point::new(self.w * 0.5, self.h * 0.50),
            self.w * width_frac,
            self.h * 0.45,
        )
    }
}

/// Parameters for a normal-density plot shared by three acts
pub(crate) struct PlotSpec {
    pub x_min: f64,
    pub x_max: f64,
    pub width_frac: f32,
    pub curve_color: Color,
    pub x_label: Option<&'static str>,
    pub y_label: Option<&'static str>,
}

/// Scene handles for a constructed plot
pub(crate) struct Plot {
    /// Coordinate mapping, kept for positioning dependent primitives
    pub axes: Axes,
    pub axes_id: ObjectId,
    pub curve_id: ObjectId,
    pub label_ids: Vec<ObjectId>,
}

/// Build axes, optional labels, and the standard normal density curve
pub(crate) fn add_density_plot<S: FrameSink>(stage: &mut Stage<S>, spec: PlotSpec) -> Plot {
    let layout = Layout::of(stage);
    let axes = Axes {
        x_min: spec.x_min,
        x_max: spec.x_max,
        x_step: 1.0,
        y_min: 0.0,
        y_max: 0.45,
        y_step: 0.1,
        rect: layout.plot_rect(spec.width_frac),
        color: palette::LIGHT_GRAY,
    };

    let axes_id = stage.add(Primitive::Axes(axes.clone()));

    let mut label_ids = Vec::new();
    let label_style = Role::AxisLabel.style();
    if let Some(x_label) = spec.x_label {
        let (_, text_h) = stage.measure_text(x_label, label_style);
        let anchor = Point::new(
            axes.rect.center().x,
            axes.rect.bottom + layout.h * 0.055 + text_h * 0.5,
        );
        label_ids.push(add_text(stage, x_label, label_style, anchor));
    }
    if let Some(y_label) = spec.y_label {
        let anchor = Point::new(axes.rect.left - layout.w * 0.025, axes.rect.center().y);
        label_ids.push(stage.add(Primitive::Text(Text::rotated(y_label, label_style, anchor))));
    }

    // Curve last, so it draws on top of the axes
    let density = Curve::plot(&axes, stats::pdf, spec.curve_color, curve::THICKNESS);
    let curve_id = stage.add(Primitive::Curve(density));

    Plot {
        axes,
        axes_id,
        curve_id,
        label_ids,
    }
}

/// Add a text block centered on `anchor`
pub(crate) fn add_text<S: FrameSink>(
    stage: &mut Stage<S>,
    content: &str,
    style: TextStyle,
    anchor: Point,
) -> ObjectId {
    stage.add(Primitive::Text(Text::new(content, style, anchor)))
}

/// Fade out every object still in the scene
pub(crate) fn fade_out_scene<S: FrameSink>(stage: &mut Stage<S>, seconds: f32) -> Result<()> {
    let directives: Vec<Directive> = stage
        .scene()
        .ids()
        .into_iter()
        .map(Directive::FadeOut)
        .collect();
    if directives.is_empty() {
        return Ok(());
    }
    stage.play(&directives, seconds)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RenderConfig;
    use crate::domain::Role;
    use crate::encode::MemorySink;

    pub(crate) fn test_stage() -> Stage<MemorySink> {
        let config = RenderConfig {
            width: 128,
            height: 72,
            fps: 2,
            ..Default::default()
        };
        Stage::new(&config, MemorySink::new())
    }

    #[test]
    fn test_act_order_is_fixed() {
        assert_eq!(
            ACT_NAMES,
            [
                "introduction",
                "normal_distribution",
                "sigma_levels",
                "real_world",
                "conclusion",
            ]
        );
    }

    #[test]
    fn test_run_all_leaves_scene_empty_and_renders_frames() {
        let mut stage = test_stage();
        run_all(&mut stage).unwrap();
        assert!(stage.scene().is_empty());
        let rendered = stage.frames_rendered();
        assert!(rendered > 0);
        let sink = stage.into_sink();
        assert_eq!(sink.frames, rendered);
    }

    #[test]
    fn test_fade_out_scene_empties_everything() {
        let mut stage = test_stage();
        let layout = Layout::of(&stage);
        add_text(&mut stage, "a", Role::Caption.style(), layout.center());
        add_text(&mut stage, "b", Role::Caption.style(), layout.center());
        fade_out_scene(&mut stage, 0.5).unwrap();
        assert!(stage.scene().is_empty());
    }

    #[test]
    fn test_fade_out_empty_scene_renders_nothing() {
        let mut stage = test_stage();
        fade_out_scene(&mut stage, 0.5).unwrap();
        assert_eq!(stage.frames_rendered(), 0);
    }
}
