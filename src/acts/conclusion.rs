//! Act 5: reading sigma thresholds, and the closing message

use anyhow::Result;

use super::{Layout, PLAY_SECS, PlotSpec, add_density_plot, add_text, fade_out_scene};
use crate::domain::{Color, Point, Role, palette};
use crate::encode::FrameSink;
use crate::render::geometry::dash;
use crate::scene::{DashedLine, Directive, Primitive};
use crate::stage::Stage;
use crate::stats;

const TITLE: &str = "When is a Discovery Real?";
const CLOSING_NOTE: &str = "3σ means \"interesting enough to investigate further\"\n5σ means \"conclusive evidence\"";
const FINAL_MESSAGE: &str =
    "Statistical significance helps scientists\ndistinguish real discoveries from random chance";

/// One marked threshold: position, color, confidence and verdict
pub struct Threshold {
    pub sigma: f64,
    pub color: Color,
    pub confidence: &'static str,
    pub verdict: &'static str,
}

impl Threshold {
    /// Interpretive caption, e.g. "1σ (68%): Likely noise"
    pub fn note(&self) -> String {
        format!(
            "{}σ ({}): {}",
            self.sigma, self.confidence, self.verdict
        )
    }
}

/// The four thresholds marked on the curve
pub const THRESHOLDS: [Threshold; 4] = [
    Threshold {
        sigma: 1.0,
        color: palette::SIGMA_BLUE,
        confidence: "68%",
        verdict: "Likely noise",
    },
    Threshold {
        sigma: 2.0,
        color: palette::SIGMA_GREEN,
        confidence: "95%",
        verdict: "Possibly real",
    },
    Threshold {
        sigma: 3.0,
        color: palette::SIGMA_YELLOW,
        confidence: "99.7%",
        verdict: "Probably real",
    },
    Threshold {
        sigma: 5.0,
        color: palette::SIGMA_PURPLE,
        confidence: "99.9999%",
        verdict: "Definitely real",
    },
];

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
            width_frac: 0.72,
            curve_color: palette::WHITE,
            x_label: None,
            y_label: None,
        },
    );
    stage.play(
        &[
            Directive::Create(plot.axes_id),
            Directive::Create(plot.curve_id),
        ],
        PLAY_SECS,
    )?;

    // Threshold lines on the positive side, notes staggered down the right
    let mut batch = Vec::new();
    let label_gap = layout.h * 0.015;
    for (i, threshold) in THRESHOLDS.iter().enumerate() {
        let top = plot.axes.c2p(threshold.sigma, stats::pdf(threshold.sigma));
        let line = stage.add(Primitive::DashedLine(DashedLine {
            from: plot.axes.c2p(threshold.sigma, 0.0),
            to: top,
            color: threshold.color,
            stroke_width: dash::THICKNESS,
        }));
        batch.push(Directive::Create(line));

        let sigma_text = format!("{}σ", threshold.sigma);
        let sigma_style = Role::SigmaLabel.style_with(threshold.color);
        let (_, sigma_h) = stage.measure_text(&sigma_text, sigma_style);
        let label = add_text(
            stage,
            &sigma_text,
            sigma_style,
            top.translate(0.0, -(sigma_h * 0.5 + label_gap)),
        );
        batch.push(Directive::Write(label));

        let note_style = Role::ThresholdNote.style_with(threshold.color);
        let note_anchor = Point::new(layout.w * 0.82, layout.h * (0.28 + i as f32 * 0.09));
        let note = add_text(stage, &threshold.note(), note_style, note_anchor);
        batch.push(Directive::Write(note));
    }
    stage.play(&batch, PLAY_SECS)?;

    let caption_style = Role::Caption.style();
    let (_, closing_h) = stage.measure_text(CLOSING_NOTE, caption_style);
    let closing = add_text(
        stage,
        CLOSING_NOTE,
        caption_style,
        layout.bottom_center(closing_h),
    );
    stage.play(&[Directive::Write(closing)], PLAY_SECS)?;
    stage.wait(3.0)?;
    fade_out_scene(stage, PLAY_SECS)?;

    // Closing card
    let final_message = add_text(stage, FINAL_MESSAGE, Role::Closing.style(), layout.center());
    stage.play(&[Directive::Write(final_message)], PLAY_SECS)?;
    stage.wait(3.0)?;
    stage.play(&[Directive::FadeOut(final_message)], PLAY_SECS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::acts::tests::test_stage;

    #[test]
    fn test_thresholds_match_narrative() {
        let sigmas: Vec<f64> = THRESHOLDS.iter().map(|t| t.sigma).collect();
        assert_eq!(sigmas, vec![1.0, 2.0, 3.0, 5.0]);
        let verdicts: Vec<&str> = THRESHOLDS.iter().map(|t| t.verdict).collect();
        assert_eq!(
            verdicts,
            vec![
                "Likely noise",
                "Possibly real",
                "Probably real",
                "Definitely real",
            ]
        );
    }

    #[test]
    fn test_note_format() {
        assert_eq!(THRESHOLDS[0].note(), "1σ (68%): Likely noise");
        assert_eq!(THRESHOLDS[3].note(), "5σ (99.9999%): Definitely real");
    }

    #[test]
    fn test_conclusion_leaves_scene_empty() {
        let mut stage = test_stage();
        play(&mut stage).unwrap();
        assert!(stage.scene().is_empty());
        assert!(stage.frames_rendered() > 0);
    }
}
