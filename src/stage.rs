//! Stage: drives the scene through time and renders frames into a sink
//!
//! Acts talk exclusively to the stage: they add primitives, then `play`
//! directive batches and `wait` holds. Every call renders and pushes the
//! exact number of frames the duration implies at the configured framerate;
//! nothing is asynchronous.

use anyhow::Result;

use crate::config::RenderConfig;
use crate::domain::{Color, TextStyle};
use crate::encode::FrameSink;
use crate::render::{FrameRenderer, TextEngine};
use crate::scene::{Directive, ObjectId, Primitive, Scene, lerp_color, smooth};

/// One directive with the object state captured at batch start
struct Running {
    directive: Directive,
    start_opacity: f32,
    start_color: Color,
}

/// Owns the scene, the renderer and the output sink for one full render
pub struct Stage<S: FrameSink> {
    scene: Scene,
    renderer: FrameRenderer,
    text: TextEngine,
    sink: S,
    fps: u32,
    width: u32,
    height: u32,
    frame_index: u64,
}

impl<S: FrameSink> Stage<S> {
    pub fn new(config: &RenderConfig, sink: S) -> Self {
        Self {
            scene: Scene::new(),
            renderer: FrameRenderer::new(config.width, config.height, config.background_color()),
            text: TextEngine::new(),
            sink,
            fps: config.fps,
            width: config.width,
            height: config.height,
            frame_index: 0,
        }
    }

    /// Canvas width in pixels
    pub fn width(&self) -> f32 {
        self.width as f32
    }

    /// Canvas height in pixels
    pub fn height(&self) -> f32 {
        self.height as f32
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Add a primitive to the scene; it stays invisible until animated in
    pub fn add(&mut self, primitive: Primitive) -> ObjectId {
        self.scene.add(primitive)
    }

    /// Measure a text block at this canvas resolution
    pub fn measure_text(&mut self, content: &str, style: TextStyle) -> (f32, f32) {
        self.text.measure(content, style.size_for_height(self.height))
    }

    /// Frames needed to cover `seconds` at the configured framerate
    pub fn frames_for(&self, seconds: f32) -> u64 {
        ((seconds * self.fps as f32).round() as u64).max(1)
    }

    /// Total frames pushed so far
    pub fn frames_rendered(&self) -> u64 {
        self.frame_index
    }

    /// Consume the stage, returning the sink for finalization
    pub fn into_sink(self) -> S {
        self.sink
    }

    /// Animate a batch of directives over the given duration
    ///
    /// All directives share one eased clock. Objects targeted by `FadeOut`
    /// are removed from the scene once the batch completes.
    pub fn play(&mut self, directives: &[Directive], seconds: f32) -> Result<()> {
        let running: Vec<Running> = directives
            .iter()
            .filter_map(|&directive| {
                let entry = self.scene.get(directive.target())?;
                Some(Running {
                    directive,
                    start_opacity: entry.opacity,
                    start_color: entry.primitive.color(),
                })
            })
            .collect();

        let frames = self.frames_for(seconds);
        for i in 1..=frames {
            let t = smooth(i as f32 / frames as f32);
            for run in &running {
                self.apply(run, t);
            }
            self.render_frame()?;
        }

        for run in &running {
            if run.directive.removes_target() {
                self.scene.remove(run.directive.target());
            }
        }
        Ok(())
    }

    /// Hold the current scene for the given duration
    pub fn wait(&mut self, seconds: f32) -> Result<()> {
        for _ in 0..self.frames_for(seconds) {
            self.render_frame()?;
        }
        Ok(())
    }

    fn apply(&mut self, run: &Running, t: f32) {
        let Some(entry) = self.scene.get_mut(run.directive.target()) else {
            return;
        };
        match run.directive {
            Directive::FadeIn(_) => {
                entry.opacity = run.start_opacity + (1.0 - run.start_opacity) * t;
            }
            Directive::FadeOut(_) => {
                entry.opacity = run.start_opacity * (1.0 - t);
            }
            Directive::Write(_) | Directive::Create(_) => {
                entry.opacity = 1.0;
                entry.progress = t;
            }
            Directive::FadeTo(_, target) => {
                entry.opacity = run.start_opacity + (target - run.start_opacity) * t;
            }
            Directive::Recolor(_, to) => {
                entry
                    .primitive
                    .set_color(lerp_color(run.start_color, to, t));
            }
        }
    }

    fn render_frame(&mut self) -> Result<()> {
        let pixmap = self.renderer.render(&self.scene, &mut self.text)?;
        // The background is opaque, so premultiplied data is plain RGBA
        let pts = self.frame_index * 1_000_000_000 / self.fps as u64;
        self.sink.push(pixmap.data(), pts)?;
        self.frame_index += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Point, Role, palette};
    use crate::encode::MemorySink;
    use crate::scene::Text;

    fn test_stage() -> Stage<MemorySink> {
        let config = RenderConfig {
            width: 64,
            height: 36,
            fps: 10,
            ..Default::default()
        };
        Stage::new(&config, MemorySink::new())
    }

    fn add_text(stage: &mut Stage<MemorySink>) -> ObjectId {
        stage.add(Primitive::Text(Text::new(
            "x",
            Role::Caption.style(),
            Point::new(32.0, 18.0),
        )))
    }

    #[test]
    fn test_play_produces_rounded_frame_count() {
        let mut stage = test_stage();
        let id = add_text(&mut stage);
        stage.play(&[Directive::FadeIn(id)], 1.0).unwrap();
        assert_eq!(stage.frames_rendered(), 10);
        stage.wait(0.55).unwrap();
        // 0.55s at 10 fps rounds to 6 frames
        assert_eq!(stage.frames_rendered(), 16);
    }

    #[test]
    fn test_play_never_renders_zero_frames() {
        let mut stage = test_stage();
        let id = add_text(&mut stage);
        stage.play(&[Directive::FadeIn(id)], 0.0).unwrap();
        assert_eq!(stage.frames_rendered(), 1);
    }

    #[test]
    fn test_fade_in_reaches_full_opacity() {
        let mut stage = test_stage();
        let id = add_text(&mut stage);
        stage.play(&[Directive::FadeIn(id)], 0.5).unwrap();
        assert_eq!(stage.scene().get(id).unwrap().opacity, 1.0);
    }

    #[test]
    fn test_fade_out_removes_object() {
        let mut stage = test_stage();
        let id = add_text(&mut stage);
        stage.play(&[Directive::FadeIn(id)], 0.2).unwrap();
        stage.play(&[Directive::FadeOut(id)], 0.2).unwrap();
        assert!(stage.scene().get(id).is_none());
        assert!(stage.scene().is_empty());
    }

    #[test]
    fn test_write_completes_progress() {
        let mut stage = test_stage();
        let id = add_text(&mut stage);
        stage.play(&[Directive::Write(id)], 0.3).unwrap();
        let entry = stage.scene().get(id).unwrap();
        assert_eq!(entry.progress, 1.0);
        assert_eq!(entry.opacity, 1.0);
    }

    #[test]
    fn test_fade_to_keeps_object_in_scene() {
        let mut stage = test_stage();
        let id = add_text(&mut stage);
        stage.play(&[Directive::FadeIn(id)], 0.2).unwrap();
        stage.play(&[Directive::FadeTo(id, 0.0)], 0.2).unwrap();
        let entry = stage.scene().get(id).unwrap();
        assert_eq!(entry.opacity, 0.0);
        stage.play(&[Directive::FadeTo(id, 1.0)], 0.2).unwrap();
        assert_eq!(stage.scene().get(id).unwrap().opacity, 1.0);
    }

    #[test]
    fn test_recolor_reaches_target() {
        let mut stage = test_stage();
        let id = add_text(&mut stage);
        stage
            .play(
                &[
                    Directive::FadeIn(id),
                    Directive::Recolor(id, palette::SIGMA_PURPLE),
                ],
                0.2,
            )
            .unwrap();
        let entry = stage.scene().get(id).unwrap();
        assert_eq!(entry.primitive.color(), palette::SIGMA_PURPLE);
    }

    #[test]
    fn test_directive_against_missing_object_is_ignored() {
        let mut stage = test_stage();
        let id = add_text(&mut stage);
        stage.play(&[Directive::FadeOut(id)], 0.1).unwrap();
        // Object is gone; replaying against the stale id is a no-op
        stage.play(&[Directive::FadeIn(id)], 0.1).unwrap();
        assert!(stage.scene().is_empty());
    }

    #[test]
    fn test_frame_timestamps_follow_framerate() {
        let mut stage = test_stage();
        stage.wait(0.3).unwrap();
        let sink = stage.into_sink();
        assert_eq!(sink.frames, 3);
        // Third frame carries pts of frame index 2 at 10 fps
        assert_eq!(sink.last_pts, 200_000_000);
    }
}
