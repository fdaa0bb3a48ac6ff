//! RGBA color values used by every graphics item and the renderer.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Straight (non-premultiplied) RGBA color, components in `0.0..=1.0`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Color {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub a: f64,
}

impl Color {
    pub const fn new(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self { r, g, b, a }
    }

    /// Parses a `#RRGGBB` or `#RRGGBBAA` hex string.
    ///
    /// Returns `None` for malformed input; callers that load this from a
    /// config file should log and fall back to a default rather than panic.
    pub fn from_hex(s: &str) -> Option<Self> {
        let s = s.strip_prefix('#').unwrap_or(s);
        let (r, g, b, a) = match s.len() {
            6 => (
                u8::from_str_radix(&s[0..2], 16).ok()?,
                u8::from_str_radix(&s[2..4], 16).ok()?,
                u8::from_str_radix(&s[4..6], 16).ok()?,
                255u8,
            ),
            8 => (
                u8::from_str_radix(&s[0..2], 16).ok()?,
                u8::from_str_radix(&s[2..4], 16).ok()?,
                u8::from_str_radix(&s[4..6], 16).ok()?,
                u8::from_str_radix(&s[6..8], 16).ok()?,
            ),
            _ => return None,
        };
        Some(Self::from_u8(r, g, b, a))
    }

    pub fn from_u8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self {
            r: r as f64 / 255.0,
            g: g as f64 / 255.0,
            b: b as f64 / 255.0,
            a: a as f64 / 255.0,
        }
    }

    pub fn to_hex(self) -> String {
        let [r, g, b, a] = self.to_u8();
        format!("#{r:02x}{g:02x}{b:02x}{a:02x}")
    }

    pub fn to_u8(self) -> [u8; 4] {
        [
            (self.r.clamp(0.0, 1.0) * 255.0).round() as u8,
            (self.g.clamp(0.0, 1.0) * 255.0).round() as u8,
            (self.b.clamp(0.0, 1.0) * 255.0).round() as u8,
            (self.a.clamp(0.0, 1.0) * 255.0).round() as u8,
        ]
    }

    /// Parses the `#AARRGGBB` convention used by Xournal/Xournal++ `fill`
    /// and `color` attributes (alpha leads, not trails).
    pub fn from_xournal_argb(s: &str) -> Option<Self> {
        let s = s.strip_prefix('#').unwrap_or(s);
        if s.len() != 8 {
            return None;
        }
        let a = u8::from_str_radix(&s[0..2], 16).ok()?;
        let r = u8::from_str_radix(&s[2..4], 16).ok()?;
        let g = u8::from_str_radix(&s[4..6], 16).ok()?;
        let b = u8::from_str_radix(&s[6..8], 16).ok()?;
        Some(Self::from_u8(r, g, b, a))
    }

    pub fn to_xournal_argb(self) -> String {
        let [r, g, b, a] = self.to_u8();
        format!("#{a:02x}{r:02x}{g:02x}{b:02x}")
    }

    pub fn with_alpha(self, a: f64) -> Self {
        Self { a, ..self }
    }
}

pub const RED: Color = Color::new(1.0, 0.0, 0.0, 1.0);
pub const GREEN: Color = Color::new(0.0, 1.0, 0.0, 1.0);
pub const BLUE: Color = Color::new(0.0, 0.0, 1.0, 1.0);
pub const YELLOW: Color = Color::new(1.0, 1.0, 0.0, 1.0);
pub const ORANGE: Color = Color::new(1.0, 0.5, 0.0, 1.0);
pub const PINK: Color = Color::new(1.0, 0.0, 1.0, 1.0);
pub const WHITE: Color = Color::new(1.0, 1.0, 1.0, 1.0);
pub const BLACK: Color = Color::new(0.0, 0.0, 0.0, 1.0);
pub const TRANSPARENT: Color = Color::new(0.0, 0.0, 0.0, 0.0);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_round_trip() {
        let c = Color::from_hex("#ff8800cc").unwrap();
        assert_eq!(c.to_hex(), "#ff8800cc");
    }

    #[test]
    fn hex_without_alpha_defaults_opaque() {
        let c = Color::from_hex("#112233").unwrap();
        assert_eq!(c.a, 1.0);
    }

    #[test]
    fn xournal_argb_swaps_alpha_position() {
        let c = Color::from_xournal_argb("#80ff0000").unwrap();
        assert!((c.r - 1.0).abs() < 1e-9);
        assert!((c.a - 128.0 / 255.0).abs() < 1e-6);
        assert_eq!(c.to_xournal_argb(), "#80ff0000");
    }

    #[test]
    fn malformed_hex_is_none() {
        assert!(Color::from_hex("#zzz").is_none());
        assert!(Color::from_hex("#fff").is_none());
    }
}
