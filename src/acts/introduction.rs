//! Act 1: title card

use anyhow::Result;

use super::{Layout, PLAY_SECS, add_text, fade_out_scene};
use crate::domain::Role;
use crate::encode::FrameSink;
use crate::scene::Directive;
use crate::stage::Stage;

const TITLE: &str = "Understanding Statistical Significance";
const SUBTITLE: &str = "The meaning of σ (sigma) in scientific observations";

pub fn play<S: FrameSink>(stage: &mut Stage<S>) -> Result<()> {
    let layout = Layout::of(stage);

    let title_style = Role::Title.style();
    let (_, title_h) = stage.measure_text(TITLE, title_style);
    let title_anchor = layout.center().translate(0.0, -title_h);
    let title = add_text(stage, TITLE, title_style, title_anchor);

    let subtitle_style = Role::Subtitle.style();
    let (_, subtitle_h) = stage.measure_text(SUBTITLE, subtitle_style);
    let subtitle_anchor =
        title_anchor.translate(0.0, title_h * 0.5 + subtitle_h * 0.5 + layout.h * 0.02);
    let subtitle = add_text(stage, SUBTITLE, subtitle_style, subtitle_anchor);

    stage.play(&[Directive::Write(title)], PLAY_SECS)?;
    stage.play(&[Directive::FadeIn(subtitle)], PLAY_SECS)?;
    stage.wait(2.0)?;

    fade_out_scene(stage, PLAY_SECS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::acts::tests::test_stage;

    #[test]
    fn test_introduction_leaves_scene_empty() {
        let mut stage = test_stage();
        play(&mut stage).unwrap();
        assert!(stage.scene().is_empty());
        // Write + fade-in + 2s hold + fade-out at 2 fps
        assert_eq!(stage.frames_rendered(), 2 + 2 + 4 + 2);
    }
}
