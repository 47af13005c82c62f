//! Act 2: the normal distribution and what one standard deviation covers

use anyhow::Result;

use super::{Layout, PLAY_SECS, PlotSpec, add_density_plot, add_text, fade_out_scene};
use crate::domain::{Point, Role, palette};
use crate::encode::FrameSink;
use crate::render::geometry::{brace as brace_geom, dash};
use crate::scene::{Brace, DashedLine, Directive, Primitive, Region};
use crate::stage::Stage;
use crate::stats;

const TITLE: &str = "The Normal Distribution";
const SPREAD_NOTE: &str = "In scientific measurements, data often follows a normal distribution";
const SIGMA_NOTE: &str = "Standard deviation (σ) measures the spread of data";

pub fn play<S: FrameSink>(stage: &mut Stage<S>) -> Result<()> {
    let layout = Layout::of(stage);

    let title_style = Role::SectionTitle.style();
    let (_, title_h) = stage.measure_text(TITLE, title_style);
    let title = add_text(stage, TITLE, title_style, layout.top_center(title_h));
    stage.play(&[Directive::Write(title)], PLAY_SECS)?;

    let plot = add_density_plot(
        stage,
        PlotSpec {
            x_min: -4.0,
            x_max: 4.0,
            width_frac: 0.72,
            curve_color: palette::BLUE,
            x_label: Some("Value"),
            y_label: Some("Probability Density"),
        },
    );
    let mut axes_batch = vec![Directive::Create(plot.axes_id)];
    axes_batch.extend(plot.label_ids.iter().map(|&id| Directive::FadeIn(id)));
    stage.play(&axes_batch, PLAY_SECS)?;
    stage.play(&[Directive::Create(plot.curve_id)], PLAY_SECS)?;
    stage.wait(1.0)?;

    // Dashed mean line up to the density peak
    let peak = stats::pdf(0.0);
    let mean_line = stage.add(Primitive::DashedLine(DashedLine {
        from: plot.axes.c2p(0.0, 0.0),
        to: plot.axes.c2p(0.0, peak),
        color: palette::RED,
        stroke_width: dash::THICKNESS,
    }));
    let mean_style = Role::AxisLabel.style_with(palette::RED);
    let (_, mean_h) = stage.measure_text("Mean (μ)", mean_style);
    let mean_anchor = plot
        .axes
        .c2p(0.0, peak)
        .translate(0.0, -(mean_h * 0.5 + layout.h * 0.015));
    let mean_label = add_text(stage, "Mean (μ)", mean_style, mean_anchor);
    stage.play(
        &[Directive::Create(mean_line), Directive::Write(mean_label)],
        PLAY_SECS,
    )?;

    let caption_style = Role::Caption.style();
    let (_, caption_h) = stage.measure_text(SPREAD_NOTE, caption_style);
    let caption_anchor = layout.bottom_center(caption_h);
    let spread_note = add_text(stage, SPREAD_NOTE, caption_style, caption_anchor);
    stage.play(&[Directive::Write(spread_note)], PLAY_SECS)?;
    stage.wait(2.0)?;
    stage.play(&[Directive::FadeOut(spread_note)], PLAY_SECS)?;

    // Shade one standard deviation either side of the mean
    let sigma_note = add_text(stage, SIGMA_NOTE, caption_style, caption_anchor);
    let area = stage.add(Primitive::Region(Region::under_curve(
        &plot.axes,
        stats::pdf,
        -1.0,
        1.0,
        palette::BLUE,
        0.3,
    )));
    let brace_from = plot.axes.c2p(-1.0, 0.0).translate(0.0, layout.h * 0.012);
    let brace_to = plot.axes.c2p(1.0, 0.0).translate(0.0, layout.h * 0.012);
    let brace = stage.add(Primitive::Brace(Brace {
        from: brace_from,
        to: brace_to,
        color: palette::SIGMA_YELLOW,
    }));
    let sigma_style = Role::SigmaLabel.style_with(palette::SIGMA_YELLOW);
    let (_, sigma_h) = stage.measure_text("1σ", sigma_style);
    let brace_depth = brace_geom::DEPTH * layout.h / 1080.0;
    let label_anchor = Point::new(
        (brace_from.x + brace_to.x) * 0.5,
        brace_from.y + brace_depth + sigma_h * 0.5 + layout.h * 0.01,
    );
    let sigma_label = add_text(stage, "1σ", sigma_style, label_anchor);

    stage.play(&[Directive::Write(sigma_note)], PLAY_SECS)?;
    stage.play(
        &[
            Directive::Create(area),
            Directive::Create(brace),
            Directive::Write(sigma_label),
        ],
        PLAY_SECS,
    )?;
    stage.wait(2.0)?;

    fade_out_scene(stage, PLAY_SECS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::acts::tests::test_stage;

    #[test]
    fn test_normal_distribution_leaves_scene_empty() {
        let mut stage = test_stage();
        play(&mut stage).unwrap();
        assert!(stage.scene().is_empty());
        assert!(stage.frames_rendered() > 0);
    }

    #[test]
    fn test_plot_spec_places_curve_inside_axes() {
        let mut stage = test_stage();
        let plot = add_density_plot(
            &mut stage,
            PlotSpec {
                x_min: -4.0,
                x_max: 4.0,
                width_frac: 0.72,
                curve_color: palette::BLUE,
                x_label: None,
                y_label: None,
            },
        );
        let entry = stage.scene().get(plot.curve_id).unwrap();
        let Primitive::Curve(curve) = &entry.primitive else {
            panic!("expected a curve");
        };
        for p in &curve.points {
            assert!(p.x >= plot.axes.rect.left - 0.5);
            assert!(p.x <= plot.axes.rect.right + 0.5);
            assert!(p.y <= plot.axes.rect.bottom + 0.5);
        }
    }
}
