//! Act 3: nested sigma intervals and their confidence levels

use anyhow::Result;

use super::{Layout, PLAY_SECS, PlotSpec, QUICK_SECS, add_density_plot, add_text, fade_out_scene};
use crate::domain::{Color, Point, Role, palette};
use crate::encode::FrameSink;
use crate::render::geometry::{brace as brace_geom, dash};
use crate::scene::{Axes, Brace, DashedLine, Directive, ObjectId, Primitive, Region};
use crate::stage::Stage;
use crate::stats;

const TITLE: &str = "Sigma (σ) Levels and Confidence";
const SUMMARY: &str = "Higher sigma values = stronger statistical significance";

/// One sigma interval: half-width, display color and confidence caption
pub struct SigmaLevel {
    pub sigma: f64,
    pub color: Color,
    pub caption: &'static str,
}

/// The four intervals this act walks through, in ascending order
pub const SIGMA_LEVELS: [SigmaLevel; 4] = [
    SigmaLevel {
        sigma: 1.0,
        color: palette::SIGMA_BLUE,
        caption: "1σ: 68% confidence (1-in-3 chance of random fluctuation)",
    },
    SigmaLevel {
        sigma: 2.0,
        color: palette::SIGMA_GREEN,
        caption: "2σ: 95% confidence (1-in-20 chance of random fluctuation)",
    },
    SigmaLevel {
        sigma: 3.0,
        color: palette::SIGMA_YELLOW,
        caption: "3σ: 99.7% confidence (1-in-370 chance of random fluctuation)",
    },
    SigmaLevel {
        sigma: 5.0,
        color: palette::SIGMA_PURPLE,
        caption: "5σ: 99.9999% confidence (1-in-3.5 million chance of random fluctuation)",
    },
];

/// Add the four nested shaded regions, widest drawn first so all stay visible
pub(crate) fn add_sigma_regions<S: FrameSink>(
    stage: &mut Stage<S>,
    axes: &Axes,
) -> Vec<ObjectId> {
    SIGMA_LEVELS
        .iter()
        .rev()
        .map(|level| {
            stage.add(Primitive::Region(Region::under_curve(
                axes,
                stats::pdf,
                -level.sigma,
                level.sigma,
                level.color,
                0.3,
            )))
        })
        .collect()
}

pub fn play<S: FrameSink>(stage: &mut Stage<S>) -> Result<()> {
    let layout = Layout::of(stage);

    let title_style = Role::SectionTitle.style();
    let (_, title_h) = stage.measure_text(TITLE, title_style);
    let title = add_text(stage, TITLE, title_style, layout.top_center(title_h));
    stage.play(&[Directive::Write(title)], PLAY_SECS)?;

    let plot = add_density_plot(
        stage,
        PlotSpec {
            x_min: -5.0,
            x_max: 5.0,
            width_frac: 0.82,
            curve_color: palette::WHITE,
            x_label: Some("Standard Deviations from Mean (σ)"),
            y_label: Some("Probability Density"),
        },
    );
    let mut plot_batch = vec![
        Directive::Create(plot.axes_id),
        Directive::Create(plot.curve_id),
    ];
    plot_batch.extend(plot.label_ids.iter().map(|&id| Directive::FadeIn(id)));
    stage.play(&plot_batch, PLAY_SECS)?;

    let peak = stats::pdf(0.0);
    let mean_line = stage.add(Primitive::DashedLine(DashedLine {
        from: plot.axes.c2p(0.0, 0.0),
        to: plot.axes.c2p(0.0, peak),
        color: palette::RED,
        stroke_width: dash::THICKNESS,
    }));
    let mean_style = Role::AxisLabel.style_with(palette::RED);
    let (_, mean_h) = stage.measure_text("Mean", mean_style);
    let mean_anchor = plot
        .axes
        .c2p(0.0, peak)
        .translate(0.0, -(mean_h * 0.5 + layout.h * 0.015));
    let mean_label = add_text(stage, "Mean", mean_style, mean_anchor);
    stage.play(
        &[Directive::Create(mean_line), Directive::Write(mean_label)],
        PLAY_SECS,
    )?;
    stage.wait(1.0)?;

    let regions = add_sigma_regions(stage, &plot.axes);
    let create_regions: Vec<Directive> = regions.iter().map(|&id| Directive::Create(id)).collect();
    stage.play(&create_regions, PLAY_SECS)?;
    stage.wait(1.0)?;

    let brace_depth = brace_geom::DEPTH * layout.h / 1080.0;
    let caption_style = Role::Caption.style();

    // Focus each interval in turn: hide the others, brace and caption it,
    // then bring the others back.
    for (i, level) in SIGMA_LEVELS.iter().enumerate() {
        log::debug!(
            "Focus {}σ: coverage {:.4}%",
            level.sigma,
            stats::coverage(level.sigma) * 100.0
        );
        // `regions` is widest-first, SIGMA_LEVELS narrowest-first
        let focused = regions[SIGMA_LEVELS.len() - 1 - i];
        let others: Vec<ObjectId> = regions
            .iter()
            .copied()
            .filter(|&id| id != focused)
            .collect();

        let hide: Vec<Directive> = others
            .iter()
            .map(|&id| Directive::FadeTo(id, 0.0))
            .collect();
        stage.play(&hide, QUICK_SECS)?;

        let shift = layout.h * 0.012 * level.sigma as f32;
        let from = plot.axes.c2p(-level.sigma, 0.0).translate(0.0, shift);
        let to = plot.axes.c2p(level.sigma, 0.0).translate(0.0, shift);
        let brace = stage.add(Primitive::Brace(Brace {
            from,
            to,
            color: level.color,
        }));

        let sigma_text = format!("{}σ", level.sigma);
        let sigma_style = Role::SigmaLabel.style_with(level.color);
        let (_, sigma_h) = stage.measure_text(&sigma_text, sigma_style);
        let label_anchor = Point::new(
            (from.x + to.x) * 0.5,
            from.y + brace_depth + sigma_h * 0.5 + layout.h * 0.01,
        );
        let label = add_text(stage, &sigma_text, sigma_style, label_anchor);

        let (_, caption_h) = stage.measure_text(level.caption, caption_style);
        let caption = add_text(
            stage,
            level.caption,
            caption_style,
            layout.bottom_center(caption_h),
        );

        stage.play(
            &[
                Directive::Create(brace),
                Directive::Write(label),
                Directive::Write(caption),
            ],
            PLAY_SECS,
        )?;
        stage.wait(2.0)?;

        stage.play(
            &[
                Directive::FadeOut(brace),
                Directive::FadeOut(label),
                Directive::FadeOut(caption),
            ],
            PLAY_SECS,
        )?;

        let restore: Vec<Directive> = others
            .iter()
            .map(|&id| Directive::FadeTo(id, 1.0))
            .collect();
        stage.play(&restore, QUICK_SECS)?;
    }

    // All braces together, vertically staggered so they stay readable
    let mut final_batch = Vec::new();
    for level in &SIGMA_LEVELS {
        let shift = layout.h * 0.028 * (level.sigma as f32 - 1.0) + layout.h * 0.012;
        let from = plot.axes.c2p(-level.sigma, 0.0).translate(0.0, shift);
        let to = plot.axes.c2p(level.sigma, 0.0).translate(0.0, shift);
        let brace = stage.add(Primitive::Brace(Brace {
            from,
            to,
            color: level.color,
        }));
        final_batch.push(Directive::Create(brace));

        let sigma_text = format!("{}σ", level.sigma);
        let sigma_style = Role::SigmaLabel.style_with(level.color);
        // Off to the right of the brace end, so staggered labels do not stack
        let label_anchor = Point::new(to.x + layout.w * 0.022, from.y + brace_depth * 0.5);
        let label = add_text(stage, &sigma_text, sigma_style, label_anchor);
        final_batch.push(Directive::Write(label));
    }
    stage.play(&final_batch, PLAY_SECS)?;

    let (_, summary_h) = stage.measure_text(SUMMARY, caption_style);
    let summary = add_text(
        stage,
        SUMMARY,
        caption_style,
        layout.bottom_center(summary_h),
    );
    stage.play(&[Directive::Write(summary)], PLAY_SECS)?;
    stage.wait(2.0)?;

    fade_out_scene(stage, PLAY_SECS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::acts::tests::test_stage;

    #[test]
    fn test_sigma_levels_table_matches_narrative() {
        assert_eq!(SIGMA_LEVELS.len(), 4);
        let sigmas: Vec<f64> = SIGMA_LEVELS.iter().map(|l| l.sigma).collect();
        assert_eq!(sigmas, vec![1.0, 2.0, 3.0, 5.0]);
        assert!(SIGMA_LEVELS[0].caption.contains("68%"));
        assert!(SIGMA_LEVELS[1].caption.contains("1-in-20"));
        assert!(SIGMA_LEVELS[2].caption.contains("99.7%"));
        assert!(SIGMA_LEVELS[3].caption.contains("3.5 million"));
    }

    #[test]
    fn test_caption_odds_agree_with_coverage_math() {
        // "1-in-N chance of random fluctuation" is 1 / (1 - coverage);
        // the quoted 1, 2 and 3 sigma odds are two-sided
        let odds_1 = 1.0 / (1.0 - stats::coverage(1.0));
        let odds_2 = 1.0 / (1.0 - stats::coverage(2.0));
        let odds_3 = 1.0 / (1.0 - stats::coverage(3.0));
        assert!((odds_1 - 3.15).abs() < 0.05);
        assert!((odds_2 - 22.0).abs() < 1.0);
        assert!((odds_3 - 370.0).abs() < 5.0);

        // The 5-sigma "1 in 3.5 million" discovery figure is the one-sided
        // tail; only order-of-magnitude is stable at this tolerance
        let tail_5 = 1.0 - stats::cdf(5.0);
        assert!(tail_5 > 1e-7 && tail_5 < 5e-7);
    }

    #[test]
    fn test_exactly_four_shaded_regions() {
        let mut stage = test_stage();
        let plot = add_density_plot(
            &mut stage,
            PlotSpec {
                x_min: -5.0,
                x_max: 5.0,
                width_frac: 0.82,
                curve_color: palette::WHITE,
                x_label: None,
                y_label: None,
            },
        );
        let regions = add_sigma_regions(&mut stage, &plot.axes);
        assert_eq!(regions.len(), 4);
        assert_eq!(
            stage
                .scene()
                .count_where(|p| matches!(p, Primitive::Region(_))),
            4
        );
    }

    #[test]
    fn test_sigma_levels_leaves_scene_empty() {
        let mut stage = test_stage();
        play(&mut stage).unwrap();
        assert!(stage.scene().is_empty());
        assert!(stage.frames_rendered() > 0);
    }
}
