//! Style table keyed by semantic role
//!
//! Colors and font sizes live here rather than inline at the call sites, so
//! every act pulls from the same palette.

use serde::{Deserialize, Serialize};

/// Serializable RGB color, components in 0.0-1.0
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Parse a `#RRGGBB` hex string
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.strip_prefix('#')?;
        if hex.len() != 6 {
            return None;
        }
        let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
        let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
        let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
        Some(Self {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
        })
    }

    /// Convert to RGBA bytes (0-255) with the given alpha
    pub fn to_rgba_u8(self, alpha: f32) -> [u8; 4] {
        [
            (self.r * 255.0).round() as u8,
            (self.g * 255.0).round() as u8,
            (self.b * 255.0).round() as u8,
            (alpha.clamp(0.0, 1.0) * 255.0).round() as u8,
        ]
    }
}

/// Named palette used across all five acts
pub mod palette {
    use super::Color;

    pub const BACKGROUND: Color = Color::new(0.118, 0.118, 0.118); // #1E1E1E
    pub const BLUE: Color = Color::new(0.345, 0.769, 0.867); // #58C4DD
    pub const LIGHT_GRAY: Color = Color::new(0.733, 0.733, 0.733); // #BBBBBB
    pub const WHITE: Color = Color::new(1.0, 1.0, 1.0);
    pub const RED: Color = Color::new(0.988, 0.384, 0.333); // #FC6255

    // Per-sigma colors: 1, 2, 3, 5 sigma respectively
    pub const SIGMA_BLUE: Color = Color::new(0.161, 0.671, 0.792); // #29ABCA
    pub const SIGMA_GREEN: Color = Color::new(0.467, 0.690, 0.365); // #77B05D
    pub const SIGMA_YELLOW: Color = Color::new(0.957, 0.827, 0.271); // #F4D345
    pub const SIGMA_PURPLE: Color = Color::new(0.443, 0.333, 0.510); // #715582
}

/// Semantic text role, mapped to a font size and color
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Role {
    /// Main title shown in the introduction
    Title,
    /// Per-act heading at the top edge
    SectionTitle,
    /// Subtitle under the main title
    Subtitle,
    /// Explanatory line at the bottom edge
    Caption,
    /// Axis label ("Value", "Probability Density")
    AxisLabel,
    /// Table header cell
    CellHeader,
    /// Table data cell
    Cell,
    /// Sigma annotation next to a brace or threshold line
    SigmaLabel,
    /// Interpretive note next to a threshold line
    ThresholdNote,
    /// Final closing message
    Closing,
}

/// Resolved text style for one role
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextStyle {
    /// Font size in pixels at 1080p canvas height
    pub size: f32,
    pub color: Color,
}

impl Role {
    /// Look up the default style for this role
    pub fn style(self) -> TextStyle {
        match self {
            Role::Title => TextStyle {
                size: 56.0,
                color: palette::BLUE,
            },
            Role::SectionTitle => TextStyle {
                size: 48.0,
                color: palette::BLUE,
            },
            Role::Subtitle => TextStyle {
                size: 30.0,
                color: palette::LIGHT_GRAY,
            },
            Role::Caption => TextStyle {
                size: 27.0,
                color: palette::LIGHT_GRAY,
            },
            Role::AxisLabel => TextStyle {
                size: 25.0,
                color: palette::LIGHT_GRAY,
            },
            Role::CellHeader => TextStyle {
                size: 28.0,
                color: palette::SIGMA_YELLOW,
            },
            Role::Cell => TextStyle {
                size: 23.0,
                color: palette::WHITE,
            },
            Role::SigmaLabel => TextStyle {
                size: 27.0,
                color: palette::WHITE,
            },
            Role::ThresholdNote => TextStyle {
                size: 23.0,
                color: palette::WHITE,
            },
            Role::Closing => TextStyle {
                size: 40.0,
                color: palette::BLUE,
            },
        }
    }

    /// Style for this role with the color overridden
    pub fn style_with(self, color: Color) -> TextStyle {
        TextStyle {
            color,
            ..self.style()
        }
    }
}

impl TextStyle {
    /// Font size in pixels for a canvas of the given height
    pub fn size_for_height(&self, canvas_height: u32) -> f32 {
        self.size * canvas_height as f32 / 1080.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_from_hex() {
        let c = Color::from_hex("#1E1E1E").unwrap();
        assert!((c.r - 0.118).abs() < 0.002);
        assert_eq!(Color::from_hex("1E1E1E"), None);
        assert_eq!(Color::from_hex("#XYZ"), None);
    }

    #[test]
    fn test_color_to_rgba_u8_clamps_alpha() {
        let c = Color::new(1.0, 0.5, 0.0);
        assert_eq!(c.to_rgba_u8(2.0), [255, 128, 0, 255]);
        assert_eq!(c.to_rgba_u8(-1.0)[3], 0);
    }

    #[test]
    fn test_role_style_scaling() {
        let style = Role::Title.style();
        assert_eq!(style.size_for_height(1080), style.size);
        assert_eq!(style.size_for_height(540), style.size * 0.5);
    }

    #[test]
    fn test_style_with_overrides_color_only() {
        let base = Role::Cell.style();
        let purple = Role::Cell.style_with(palette::SIGMA_PURPLE);
        assert_eq!(purple.size, base.size);
        assert_eq!(purple.color, palette::SIGMA_PURPLE);
    }
}
