//! Vanba theme constants
//!
//! The colour tokens of the web theme that the chart and terminal renderers
//! reuse.

use serde::{Deserialize, Serialize};

/// Color in RGBA format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const BLACK: Color = Color::rgb(0, 0, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Color { r, g, b, a: 255 }
    }

    /// Same colour with opacity `alpha` in [0, 1].
    pub fn with_alpha(self, alpha: f32) -> Self {
        Color {
            a: (alpha.clamp(0.0, 1.0) * 255.0).round() as u8,
            ..self
        }
    }

    /// Create color from hex string (e.g., "#FF0000" or "#FF0000FF")
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.trim_start_matches('#');
        let channel = |i: usize| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok();
        match hex.len() {
            6 => Some(Color::rgb(channel(0)?, channel(2)?, channel(4)?)),
            8 => Some(Color {
                r: channel(0)?,
                g: channel(2)?,
                b: channel(4)?,
                a: channel(6)?,
            }),
            _ => None,
        }
    }

    /// Convert to CSS string
    pub fn to_css_string(&self) -> String {
        if self.a == 255 {
            format!("rgb({}, {}, {})", self.r, self.g, self.b)
        } else {
            format!(
                "rgba({}, {}, {}, {:.2})",
                self.r,
                self.g,
                self.b,
                self.a as f32 / 255.0
            )
        }
    }

    /// 24-bit ANSI foreground escape.
    pub fn ansi_fg(&self) -> String {
        format!("\x1b[38;2;{};{};{}m", self.r, self.g, self.b)
    }
}

pub const ANSI_RESET: &str = "\x1b[0m";

// =============================================================================
// TOKENS
// =============================================================================

/// warm-saffron
pub const PRIMARY: Color = Color::rgb(0xFF, 0x8C, 0x42);
/// cosmic-purple (900)
pub const SECONDARY: Color = Color::rgb(0x2E, 0x10, 0x65);
/// cosmic-purple-500, the chart series colour
pub const SECONDARY_500: Color = Color::rgb(0x7C, 0x3A, 0xED);
/// cosmic-purple-400, card headings
pub const SECONDARY_400: Color = Color::rgb(0x9B, 0x82, 0xFF);
/// pure-gold
pub const ACCENT: Color = Color::rgb(0xFF, 0xD7, 0x00);
/// space-dark
pub const BACKGROUND: Color = Color::rgb(0x0F, 0x0B, 0x1A);
pub const SURFACE: Color = Color::rgb(0x1A, 0x16, 0x25);
pub const TEXT_PRIMARY: Color = Color::rgb(0xF7, 0xF3, 0xE9);
pub const TEXT_SECONDARY: Color = Color::rgb(0xA6, 0x9B, 0x8C);
pub const SUCCESS: Color = Color::rgb(0x4A, 0xDE, 0x80);
pub const WARNING: Color = Color::rgb(0xFB, 0xBF, 0x24);
pub const ERROR: Color = Color::rgb(0xEF, 0x44, 0x44);
