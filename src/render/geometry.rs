//! Shared geometry constants and math for primitive rasterization
//!
//! Constants are in logical pixels at 1080p canvas height and are scaled by
//! the renderer for other resolutions.

/// Axis drawing constants
pub mod axis {
    /// Axis line thickness in logical pixels
    pub const THICKNESS: f32 = 2.0;
    /// Tick mark length in logical pixels
    pub const TICK_LEN: f32 = 8.0;

    /// Tick positions: multiples of `step` within `[min, max]`
    pub fn tick_values(min: f64, max: f64, step: f64) -> Vec<f64> {
        let mut ticks = Vec::new();
        if step <= 0.0 {
            return ticks;
        }
        let mut v = (min / step).ceil() * step;
        // Nudge for float error so `max` itself is included
        while v <= max + step * 1e-9 {
            ticks.push(v);
            v += step;
        }
        ticks
    }
}

/// Curve stroke constants
pub mod curve {
    /// Default curve thickness in logical pixels
    pub const THICKNESS: f32 = 4.0;
}

/// Dashed line constants
pub mod dash {
    /// Dash segment length in logical pixels
    pub const LENGTH: f32 = 12.0;
    /// Gap between dashes in logical pixels
    pub const GAP: f32 = 8.0;
    /// Default dashed line thickness in logical pixels
    pub const THICKNESS: f32 = 3.0;
}

/// Curly brace constants
pub mod brace {
    /// Vertical depth of the brace body in logical pixels
    pub const DEPTH: f32 = 22.0;
    /// Brace stroke thickness in logical pixels
    pub const THICKNESS: f32 = 3.0;
    /// Minimum span for a brace to be drawn
    pub const MIN_SPAN: f32 = 12.0;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tick_values_symmetric_range() {
        let ticks = axis::tick_values(-4.0, 4.0, 1.0);
        assert_eq!(ticks.len(), 9);
        assert_eq!(ticks[0], -4.0);
        assert_eq!(ticks[8], 4.0);
        assert!(ticks.contains(&0.0));
    }

    #[test]
    fn test_tick_values_fractional_step() {
        let ticks = axis::tick_values(0.0, 0.45, 0.1);
        assert_eq!(ticks.len(), 5);
        assert!((ticks[4] - 0.4).abs() < 1e-9);
    }

    #[test]
    fn test_tick_values_degenerate_step() {
        assert!(axis::tick_values(0.0, 1.0, 0.0).is_empty());
        assert!(axis::tick_values(0.0, 1.0, -1.0).is_empty());
    }
}
