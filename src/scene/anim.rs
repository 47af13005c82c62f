//! Animation directives and easing
//!
//! A directive names one object and one way of bringing it on or off screen.
//! Directives are applied in batches by [`crate::stage::Stage::play`]; every
//! directive in a batch shares the same clock.

use crate::domain::Color;
use crate::scene::ObjectId;

/// One timed animation command against a scene object
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Directive {
    /// Ramp opacity from its current value up to 1
    FadeIn(ObjectId),
    /// Ramp opacity down to 0 and remove the object when done
    FadeOut(ObjectId),
    /// Reveal text left to right
    Write(ObjectId),
    /// Progressively draw the object along its own geometry
    Create(ObjectId),
    /// Ramp opacity to an arbitrary target without removing the object
    FadeTo(ObjectId, f32),
    /// Interpolate the object's primary color to a new value
    Recolor(ObjectId, Color),
}

impl Directive {
    /// The object this directive animates
    pub fn target(&self) -> ObjectId {
        match *self {
            Directive::FadeIn(id)
            | Directive::FadeOut(id)
            | Directive::Write(id)
            | Directive::Create(id)
            | Directive::FadeTo(id, _)
            | Directive::Recolor(id, _) => id,
        }
    }

    /// Whether the object is removed from the scene once the batch finishes
    pub fn removes_target(&self) -> bool {
        matches!(self, Directive::FadeOut(_))
    }
}

/// Cubic smoothstep, the default easing for every directive
pub fn smooth(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

/// Component-wise color interpolation, exact at the endpoints
pub fn lerp_color(from: Color, to: Color, t: f32) -> Color {
    if t <= 0.0 {
        return from;
    }
    if t >= 1.0 {
        return to;
    }
    Color {
        r: from.r + (to.r - from.r) * t,
        g: from.g + (to.g - from.g) * t,
        b: from.b + (to.b - from.b) * t,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::palette;

    #[test]
    fn test_smooth_endpoints_and_midpoint() {
        assert_eq!(smooth(0.0), 0.0);
        assert_eq!(smooth(1.0), 1.0);
        assert_eq!(smooth(0.5), 0.5);
        // Clamped outside [0, 1]
        assert_eq!(smooth(-2.0), 0.0);
        assert_eq!(smooth(3.0), 1.0);
    }

    #[test]
    fn test_smooth_is_monotonic() {
        let mut prev = 0.0;
        for i in 1..=100 {
            let v = smooth(i as f32 / 100.0);
            assert!(v >= prev);
            prev = v;
        }
    }

    #[test]
    fn test_lerp_color_endpoints() {
        let a = palette::BLUE;
        let b = palette::SIGMA_PURPLE;
        assert_eq!(lerp_color(a, b, 0.0), a);
        assert_eq!(lerp_color(a, b, 1.0), b);
    }

    #[test]
    fn test_only_fade_out_removes() {
        let id = ObjectId(7);
        assert!(Directive::FadeOut(id).removes_target());
        assert!(!Directive::FadeIn(id).removes_target());
        assert!(!Directive::Write(id).removes_target());
        assert!(!Directive::Create(id).removes_target());
        assert!(!Directive::FadeTo(id, 0.0).removes_target());
    }
}
